pub mod entity;
pub mod error;

pub use entity::{Company, Region, Resolution, SymbolDirectory};
pub use error::DirectoryError;
