use serde::{Serialize, Deserialize};

/// Transform applied to each output difference `desired - actual` before it
/// is backpropagated.
///
/// - `Linear`: the difference is used as is.
/// - `Tanh`  : `ln((1 + d) / (1 - d))`, which grows steeply as `|d|`
///              approaches 1 so large errors dominate the update. Clamped
///              to `±17` once `|d|` reaches `0.9999999`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorFunction {
    Linear,
    #[default]
    Tanh,
}

const TANH_CLAMP: f64 = 17.0;
const TANH_LIMIT: f64 = 0.9999999;

impl ErrorFunction {
    pub fn apply(&self, diff: f64) -> f64 {
        match self {
            ErrorFunction::Linear => diff,
            ErrorFunction::Tanh => {
                if diff < -TANH_LIMIT {
                    -TANH_CLAMP
                } else if diff > TANH_LIMIT {
                    TANH_CLAMP
                } else {
                    ((1.0 + diff) / (1.0 - diff)).ln()
                }
            }
        }
    }
}
