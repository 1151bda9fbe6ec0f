use serde::{Serialize, Deserialize};

use crate::activation::activation::ActivationFunction;
use crate::loss::loss_type::ErrorFunction;

/// Hyperparameters used when building layers and applying training steps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingParams {
    pub learning_rate: f64,
    pub activation_hidden: ActivationFunction,
    pub activation_output: ActivationFunction,
    pub steepness_hidden: f64,
    pub steepness_output: f64,
    pub train_error_function: ErrorFunction,
    /// An output whose difference reaches this limit counts as a bit fail.
    pub bit_fail_limit: f64,
}

impl Default for TrainingParams {
    fn default() -> Self {
        TrainingParams {
            learning_rate: 0.7,
            activation_hidden: ActivationFunction::Sigmoid,
            activation_output: ActivationFunction::Sigmoid,
            steepness_hidden: 0.5,
            steepness_output: 0.5,
            train_error_function: ErrorFunction::Tanh,
            bit_fail_limit: 0.35,
        }
    }
}
