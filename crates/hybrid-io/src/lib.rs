#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for I/O operations.
pub mod error;

/// High-level image reading and writing functions.
///
/// The file format is picked by the `image` crate from the file contents when reading and
/// from the extension when writing.
pub mod functional;

pub use error::IoError;
