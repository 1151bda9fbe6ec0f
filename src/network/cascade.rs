use serde::{Serialize, Deserialize};

use crate::activation::activation::ActivationFunction;

/// Candidate configuration for cascade-style topology growth.
///
/// A growth policy trains `num_candidates()` candidate neurons: every
/// activation function paired with every steepness, repeated for each
/// candidate group. Nothing here is validated; the growth policy decides
/// what an empty list means.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CascadeParams {
    pub activation_functions: Vec<ActivationFunction>,
    pub activation_steepnesses: Vec<f64>,
    pub num_candidate_groups: usize,
}

impl Default for CascadeParams {
    fn default() -> Self {
        CascadeParams {
            activation_functions: vec![
                ActivationFunction::Sigmoid,
                ActivationFunction::SigmoidSymmetric,
                ActivationFunction::Gaussian,
                ActivationFunction::GaussianSymmetric,
                ActivationFunction::Elliot,
                ActivationFunction::ElliotSymmetric,
                ActivationFunction::SinSymmetric,
                ActivationFunction::CosSymmetric,
                ActivationFunction::Sin,
                ActivationFunction::Cos,
            ],
            activation_steepnesses: vec![0.25, 0.50, 0.75, 1.00],
            num_candidate_groups: 2,
        }
    }
}

impl CascadeParams {
    pub fn num_candidates(&self) -> usize {
        self.activation_functions.len() * self.activation_steepnesses.len() * self.num_candidate_groups
    }
}
