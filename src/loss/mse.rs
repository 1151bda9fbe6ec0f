use serde::{Serialize, Deserialize};

/// Running mean-square-error and bit-fail statistics.
///
/// Every output neuron of every pattern passed through `update` contributes
/// one squared difference, so `mse()` is the mean over output values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MseLoss {
    sum: f64,
    count: usize,
    bit_fail: usize,
}

impl MseLoss {
    /// Accumulates one pattern and returns the per-output differences
    /// `desired - predicted`, halved when the output activation is symmetric.
    pub fn update(
        &mut self,
        predicted: &[f64],
        expected: &[f64],
        symmetric: bool,
        bit_fail_limit: f64,
    ) -> Vec<f64> {
        predicted.iter().zip(expected.iter())
            .map(|(p, e)| {
                let mut diff = e - p;
                if symmetric {
                    diff /= 2.0;
                }
                self.sum += diff * diff;
                self.count += 1;
                if diff.abs() >= bit_fail_limit {
                    self.bit_fail += 1;
                }
                diff
            })
            .collect()
    }

    pub fn mse(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }

    /// Output values whose difference reached the bit-fail limit.
    pub fn bit_fail(&self) -> usize {
        self.bit_fail
    }

    pub fn reset(&mut self) {
        *self = MseLoss::default();
    }
}
