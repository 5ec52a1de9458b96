#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! `hybrid-tensor` stores multi-dimensional arrays contiguously in row-major order,
//! with the number of dimensions fixed at compile time. Filter kernels are
//! [`Tensor1`]/[`Tensor2`] values and images wrap a [`Tensor3`].
//!
//! ```rust
//! use hybrid_tensor::Tensor2;
//!
//! let identity = Tensor2::<f32>::from_shape_fn([3, 3], |[i, j]| if i == j { 1.0 } else { 0.0 });
//! assert_eq!(identity.get([1, 1]), Some(&1.0));
//! assert_eq!(identity.sum(), 3.0);
//! ```

/// Tensor type and the errors raised while building or combining tensors.
pub mod tensor;

pub use crate::tensor::{get_strides_from_shape, Tensor, TensorError};

/// Type alias for a 1-dimensional tensor.
pub type Tensor1<T> = Tensor<T, 1>;

/// Type alias for a 2-dimensional tensor.
pub type Tensor2<T> = Tensor<T, 2>;

/// Type alias for a 3-dimensional tensor.
pub type Tensor3<T> = Tensor<T, 3>;
