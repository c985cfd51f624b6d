pub const BATCH_SIZE: &str = "batch_size";
pub const RUNTIME: &str = "runtime";

/// Column order of the files written by the runtime measurement plugin.
pub const MEASUREMENT_COLUMNS: [&str; 2] = [BATCH_SIZE, RUNTIME];
