//! Filter operations
//!
//! Kernel construction, zero-padded "same" convolution and the blurs built on top of them.

/// Filter kernels
pub mod kernels;

/// Error type for the filter operations
mod error;
pub use error::FilterError;

/// 2D convolution
mod convolution;
pub use convolution::*;

/// Filter operations
mod ops;
pub use ops::*;

/// Separable filter operations
mod separable_filter;
pub use separable_filter::*;
