pub mod mse;
pub mod loss_type;

pub use mse::MseLoss;
pub use loss_type::ErrorFunction;
