pub mod coordinate_mapper;
pub mod preprocessor;
pub mod region_extractor;
mod selection_error;

pub use selection_error::SelectionError;
