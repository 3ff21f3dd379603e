//! The main module containing all necessary structures for reading a logfile and
//! extracting marker lines from it.
pub mod compression;
pub mod filter;
pub mod logreader;
