#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// color transformations module.
pub mod color;

/// image filtering module.
pub mod filter;

/// low/high frequency split and hybrid image synthesis.
pub mod hybrid;

/// module containing parallization utilities.
pub mod parallel;
