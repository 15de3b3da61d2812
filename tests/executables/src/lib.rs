//! Paths of the built binaries under test.
pub const RAM_CLIENT: &str = env!("CARGO_BIN_FILE_RAM_CLIENT");
