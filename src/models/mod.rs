// Data models (structs)
pub mod generation;
pub mod photo;
pub mod selection;
pub mod style;

pub use generation::*;
pub use photo::*;
pub use selection::*;
pub use style::*;
