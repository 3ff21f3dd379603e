//! Error management and constants shared by the whole crate.
pub mod error;
pub mod util;
