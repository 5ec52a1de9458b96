use hybrid_image::ImageError;
use hybrid_tensor::TensorError;

/// An error type for the filter module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum FilterError {
    /// The box kernel size must be odd and positive.
    #[error("Kernel size must be odd and positive, got {0}")]
    InvalidKernelSize(usize),

    /// Sigma must be finite and non-negative.
    #[error("Sigma must be finite and non-negative, got {0}")]
    InvalidSigma(f64),

    /// Kernels must have odd, non-zero dimensions so they have a center.
    #[error("Kernel dimensions must be odd and non-zero, got {0}x{1}")]
    InvalidKernelShape(usize, usize),

    /// The clip range is empty.
    #[error("Invalid clip range: min {0} is greater than max {1}")]
    InvalidClipRange(f64, f64),

    /// Error from the image module, including image size mismatches.
    #[error(transparent)]
    Image(#[from] ImageError),

    /// Error from the tensor module.
    #[error(transparent)]
    Tensor(#[from] TensorError),
}
