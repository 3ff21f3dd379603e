//! Extracts an add-on's records from a client logfile and appends them to an accumulator file.
pub mod misc;
pub mod configuration;
pub mod logfile;
