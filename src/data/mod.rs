pub mod table;
pub mod training_data;

pub use table::{Table, TableView};
pub use training_data::TrainingData;
