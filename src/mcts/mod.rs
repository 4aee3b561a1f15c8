pub mod algorithm;
pub mod hyperparameters;
pub mod node;
pub mod report;
pub mod selection;
