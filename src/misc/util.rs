//! All constants reside here.

/// Default source log, relative to the add-on directory the tool is deployed in.
pub const DEFAULT_SOURCE: &str = "../../../../../ClientLog.txt";

/// Default accumulator file.
pub const DEFAULT_DESTINATION: &str = "./LoreHound.txt";

/// Default marker, the add-on identifier found in its own log records.
pub const DEFAULT_MARKER: &str = ".LoreHound";

/// Default separator between the record prefix and its payload.
pub const DEFAULT_SEPARATOR: &str = " - ";

/// Default name of the program's own log file, created in the temporary directory.
pub const DEFAULT_LOGGER_NAME: &str = "logfilter.log";

/// Default capacity for all strings pre-allocations
pub const DEFAULT_STRING_CAPACITY: usize = 1024;

/// Default capacity for all `Vec` pre-allocations
pub const DEFAULT_CONTAINER_CAPACITY: usize = 30;

// process exit codes
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
