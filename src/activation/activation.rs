use serde::{Serialize, Deserialize};

/// Activation functions available to hidden/output layers and cascade candidates.
///
/// Every function is evaluated on the steepness-scaled sum `x = steepness * sum`.
/// Symmetric variants produce values in `[-1, 1]`, the others in `[0, 1]`
/// (except `Linear`, `ReLU` and `LeakyReLU`, which are unbounded).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivationFunction {
    Linear,
    Sigmoid,
    SigmoidSymmetric,
    Gaussian,
    GaussianSymmetric,
    Elliot,
    ElliotSymmetric,
    Sin,
    SinSymmetric,
    Cos,
    CosSymmetric,
    ReLU,
    LeakyReLU,
}

const LEAKY_SLOPE: f64 = 0.01;

fn clip(v: f64, lo: f64, hi: f64) -> f64 {
    v.max(lo).min(hi)
}

impl ActivationFunction {
    /// Output value for the steepness-scaled sum `x`.
    pub fn function(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Linear => x,
            ActivationFunction::Sigmoid => 1.0 / (1.0 + (-2.0 * x).exp()),
            ActivationFunction::SigmoidSymmetric => 2.0 / (1.0 + (-2.0 * x).exp()) - 1.0,
            ActivationFunction::Gaussian => (-x * x).exp(),
            ActivationFunction::GaussianSymmetric => 2.0 * (-x * x).exp() - 1.0,
            ActivationFunction::Elliot => (x / 2.0) / (1.0 + x.abs()) + 0.5,
            ActivationFunction::ElliotSymmetric => x / (1.0 + x.abs()),
            ActivationFunction::Sin => x.sin() / 2.0 + 0.5,
            ActivationFunction::SinSymmetric => x.sin(),
            ActivationFunction::Cos => x.cos() / 2.0 + 0.5,
            ActivationFunction::CosSymmetric => x.cos(),
            ActivationFunction::ReLU => if x > 0.0 { x } else { 0.0 },
            ActivationFunction::LeakyReLU => if x > 0.0 { x } else { LEAKY_SLOPE * x },
        }
    }

    /// Derivative with respect to the unscaled sum.
    ///
    /// `x` is the steepness-scaled sum and `value` the output it produced.
    /// Sigmoid values are clipped away from their asymptotes so saturated
    /// neurons keep a non-zero gradient.
    pub fn derivative(&self, steepness: f64, x: f64, value: f64) -> f64 {
        match self {
            ActivationFunction::Linear => steepness,
            ActivationFunction::Sigmoid => {
                let y = clip(value, 0.01, 0.99);
                2.0 * steepness * y * (1.0 - y)
            }
            ActivationFunction::SigmoidSymmetric => {
                let y = clip(value, -0.98, 0.98);
                steepness * (1.0 - y * y)
            }
            ActivationFunction::Gaussian => -2.0 * x * value * steepness,
            ActivationFunction::GaussianSymmetric => -2.0 * x * (value + 1.0) * steepness,
            ActivationFunction::Elliot => {
                let d = 1.0 + x.abs();
                steepness / (2.0 * d * d)
            }
            ActivationFunction::ElliotSymmetric => {
                let d = 1.0 + x.abs();
                steepness / (d * d)
            }
            ActivationFunction::Sin => steepness * x.cos() / 2.0,
            ActivationFunction::SinSymmetric => steepness * x.cos(),
            ActivationFunction::Cos => -steepness * x.sin() / 2.0,
            ActivationFunction::CosSymmetric => -steepness * x.sin(),
            ActivationFunction::ReLU => if x > 0.0 { steepness } else { 0.0 },
            ActivationFunction::LeakyReLU => if x > 0.0 { steepness } else { LEAKY_SLOPE * steepness },
        }
    }

    /// Symmetric outputs span `[-1, 1]`; their output error is halved before
    /// it is fed into the error function.
    pub fn is_symmetric(&self) -> bool {
        matches!(
            self,
            ActivationFunction::SigmoidSymmetric
                | ActivationFunction::GaussianSymmetric
                | ActivationFunction::ElliotSymmetric
                | ActivationFunction::SinSymmetric
                | ActivationFunction::CosSymmetric
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [ActivationFunction; 13] = [
        ActivationFunction::Linear,
        ActivationFunction::Sigmoid,
        ActivationFunction::SigmoidSymmetric,
        ActivationFunction::Gaussian,
        ActivationFunction::GaussianSymmetric,
        ActivationFunction::Elliot,
        ActivationFunction::ElliotSymmetric,
        ActivationFunction::Sin,
        ActivationFunction::SinSymmetric,
        ActivationFunction::Cos,
        ActivationFunction::CosSymmetric,
        ActivationFunction::ReLU,
        ActivationFunction::LeakyReLU,
    ];

    #[test]
    fn sigmoid_midpoints() {
        assert!((ActivationFunction::Sigmoid.function(0.0) - 0.5).abs() < 1e-12);
        assert!(ActivationFunction::SigmoidSymmetric.function(0.0).abs() < 1e-12);
        assert!((ActivationFunction::SigmoidSymmetric.function(0.7) - 0.7f64.tanh()).abs() < 1e-12);
    }

    #[test]
    fn derivatives_match_finite_differences() {
        // Points stay away from 0 (ReLU kink) and from the sigmoid clipping range.
        let steepness = 0.5;
        for f in ALL {
            for &sum in &[-1.3, -0.4, 0.35, 1.1] {
                let h = 1e-6;
                let g = |s: f64| f.function(steepness * s);
                let numeric = (g(sum + h) - g(sum - h)) / (2.0 * h);
                let x = steepness * sum;
                let analytic = f.derivative(steepness, x, f.function(x));
                assert!(
                    (numeric - analytic).abs() < 1e-5,
                    "{f:?} at {sum}: numeric={numeric} analytic={analytic}"
                );
            }
        }
    }
}
