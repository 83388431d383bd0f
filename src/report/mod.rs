//! Report module - summarizing and exporting compiled menus

pub mod export;
pub mod summary;

pub use export::*;
pub use summary::*;
