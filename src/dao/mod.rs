/// Append-only spin log persisted as a flat text file.
pub mod spin_log;
/// Storage error types shared by log backends.
pub mod storage;
