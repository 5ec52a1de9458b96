use hybrid_image::ImageError;
use hybrid_tensor::{Tensor1, Tensor2};
use num_traits::{Float, ToPrimitive};

use super::FilterError;

pub(crate) fn to_float<T: Float>(x: impl ToPrimitive) -> Result<T, FilterError> {
    T::from(x).ok_or_else(|| ImageError::CastError(std::any::type_name::<T>().to_string()).into())
}

fn check_box_kernel_size(kernel_size: usize) -> Result<(), FilterError> {
    // odd implies positive
    if kernel_size % 2 != 1 {
        return Err(FilterError::InvalidKernelSize(kernel_size));
    }
    Ok(())
}

/// Create a box blur kernel.
///
/// # Arguments
///
/// * `kernel_size` - The size of the kernel. Must be odd and positive.
///
/// # Returns
///
/// A kernel of length `kernel_size` where every weight is `1 / kernel_size`.
pub fn box_kernel_1d<T: Float>(kernel_size: usize) -> Result<Tensor1<T>, FilterError> {
    check_box_kernel_size(kernel_size)?;
    let weight = T::one() / to_float::<T>(kernel_size)?;
    Ok(Tensor1::from_shape_val([kernel_size], weight))
}

/// Create a 2D box blur kernel.
///
/// # Arguments
///
/// * `kernel_size` - The size `n` of the n×n kernel. Must be odd and positive.
///
/// # Returns
///
/// An n×n kernel where every weight is `1 / n²`.
///
/// # Example
///
/// ```
/// use hybrid_imgproc::filter::kernels::box_kernel_2d;
///
/// let kernel = box_kernel_2d::<f64>(3).unwrap();
/// assert_eq!(kernel.shape, [3, 3]);
/// assert_eq!(kernel.get([1, 2]), Some(&(1.0 / 9.0)));
///
/// assert!(box_kernel_2d::<f64>(4).is_err());
/// ```
pub fn box_kernel_2d<T: Float>(kernel_size: usize) -> Result<Tensor2<T>, FilterError> {
    check_box_kernel_size(kernel_size)?;
    let weight = T::one() / to_float::<T>(kernel_size * kernel_size)?;
    Ok(Tensor2::from_shape_val([kernel_size, kernel_size], weight))
}

/// Compute the length of the gaussian kernel for a given sigma.
///
/// The length is `ceil(6 * sigma)`, bumped by one when even so the kernel has a center.
///
/// # Errors
///
/// Returns [`FilterError::InvalidSigma`] if sigma is negative or not finite.
pub fn kernel_size_from_sigma<T: Float>(sigma: T) -> Result<usize, FilterError> {
    if !sigma.is_finite() || sigma < T::zero() {
        return Err(FilterError::InvalidSigma(sigma.to_f64().unwrap_or(f64::NAN)));
    }

    let kernel_size = (to_float::<T>(6.0)? * sigma)
        .ceil()
        .to_usize()
        .ok_or_else(|| ImageError::CastError("usize".to_string()))?;

    if kernel_size % 2 == 1 {
        Ok(kernel_size)
    } else {
        Ok(kernel_size + 1)
    }
}

/// Create a gaussian blur kernel.
///
/// The kernel size is derived from sigma with [`kernel_size_from_sigma`]. Sigma values small
/// enough to give a kernel of size one return the identity kernel `[1.0]`.
///
/// # Arguments
///
/// * `sigma` - The sigma of the gaussian kernel.
///
/// # Returns
///
/// A normalized, symmetric kernel of odd length.
///
/// # Example
///
/// ```
/// use hybrid_imgproc::filter::kernels::gaussian_kernel_1d;
///
/// let kernel = gaussian_kernel_1d(1.0f64).unwrap();
/// assert_eq!(kernel.shape, [7]);
///
/// let kernel = gaussian_kernel_1d(0.0f64).unwrap();
/// assert_eq!(kernel.as_slice(), &[1.0]);
/// ```
pub fn gaussian_kernel_1d<T: Float>(sigma: T) -> Result<Tensor1<T>, FilterError> {
    let kernel_size = kernel_size_from_sigma(sigma)?;

    if kernel_size == 1 {
        return Ok(Tensor1::from_shape_val([1], T::one()));
    }

    let mut kernel = Vec::with_capacity(kernel_size);

    let mean = to_float::<T>(kernel_size / 2)?;
    let two_sigma_sq = to_float::<T>(2.0)? * sigma * sigma;

    // compute the kernel
    for i in 0..kernel_size {
        let x = to_float::<T>(i)? - mean;
        kernel.push((-(x * x) / two_sigma_sq).exp());
    }

    // normalize the kernel
    let norm = kernel.iter().fold(T::zero(), |acc, &k| acc + k);
    kernel.iter_mut().for_each(|k| *k = *k / norm);

    Ok(Tensor1::from_shape_vec([kernel_size], kernel)?)
}

/// Outer product of two 1D kernels.
///
/// # Arguments
///
/// * `kernel_y` - The vertical kernel, one weight per row.
/// * `kernel_x` - The horizontal kernel, one weight per column.
///
/// # Returns
///
/// A 2D kernel with shape `[len(kernel_y), len(kernel_x)]`.
pub fn kernel_outer<T: Float>(kernel_y: &Tensor1<T>, kernel_x: &Tensor1<T>) -> Tensor2<T> {
    let ky = kernel_y.as_slice();
    let kx = kernel_x.as_slice();
    Tensor2::from_shape_fn([ky.len(), kx.len()], |[r, c]| ky[r] * kx[c])
}

/// Create a 2D gaussian blur kernel.
///
/// The isotropic gaussian is separable, so the 2D kernel is the outer product of
/// [`gaussian_kernel_1d`] with itself.
pub fn gaussian_kernel_2d<T: Float>(sigma: T) -> Result<Tensor2<T>, FilterError> {
    let kernel = gaussian_kernel_1d(sigma)?;
    Ok(kernel_outer(&kernel, &kernel))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_box_kernel_2d() -> Result<(), FilterError> {
        for n in [1, 3, 5, 7, 11] {
            let kernel = box_kernel_2d::<f64>(n)?;
            assert_eq!(kernel.shape, [n, n]);
            assert_relative_eq!(kernel.sum(), 1.0, epsilon = 1e-9);
            for &k in kernel.as_slice() {
                assert_eq!(k, 1.0 / (n * n) as f64);
            }
        }
        Ok(())
    }

    #[test]
    fn test_box_kernel_invalid_size() {
        assert_eq!(
            box_kernel_2d::<f64>(0).err(),
            Some(FilterError::InvalidKernelSize(0))
        );
        assert_eq!(
            box_kernel_2d::<f32>(4).err(),
            Some(FilterError::InvalidKernelSize(4))
        );
        assert_eq!(
            box_kernel_1d::<f32>(2).err(),
            Some(FilterError::InvalidKernelSize(2))
        );
    }

    #[test]
    fn test_box_kernel_1d() -> Result<(), FilterError> {
        let kernel = box_kernel_1d::<f64>(5)?;
        assert_eq!(kernel.as_slice(), &[0.2; 5]);
        Ok(())
    }

    #[test]
    fn test_kernel_size_from_sigma() -> Result<(), FilterError> {
        assert_eq!(kernel_size_from_sigma(0.0f64)?, 1);
        assert_eq!(kernel_size_from_sigma(0.1f64)?, 1);
        assert_eq!(kernel_size_from_sigma(0.3f64)?, 3);
        assert_eq!(kernel_size_from_sigma(0.5f64)?, 3);
        assert_eq!(kernel_size_from_sigma(1.0f64)?, 7);
        assert_eq!(kernel_size_from_sigma(2.0f64)?, 13);
        assert_eq!(kernel_size_from_sigma(1.2f64)?, 9);
        Ok(())
    }

    #[test]
    fn test_invalid_sigma() {
        assert_eq!(
            gaussian_kernel_1d(-1.0f64).err(),
            Some(FilterError::InvalidSigma(-1.0))
        );
        assert!(matches!(
            gaussian_kernel_1d(f64::NAN),
            Err(FilterError::InvalidSigma(_))
        ));
        assert!(gaussian_kernel_2d(f32::INFINITY).is_err());
    }

    #[test]
    fn test_gaussian_kernel_1d() -> Result<(), FilterError> {
        for sigma in [0.3f64, 0.5, 1.0, 1.7, 2.0, 5.5] {
            let kernel = gaussian_kernel_1d(sigma)?;
            let len = kernel.numel();
            assert_eq!(len % 2, 1);
            assert_eq!(len, kernel_size_from_sigma(sigma)?);
            assert_relative_eq!(kernel.sum(), 1.0, epsilon = 1e-9);

            let k = kernel.as_slice();
            for i in 0..len {
                assert_eq!(k[i], k[len - 1 - i]);
            }
            // peak at the center
            assert!(k.iter().all(|&v| v <= k[len / 2]));
        }
        Ok(())
    }

    #[test]
    fn test_gaussian_kernel_1d_values() -> Result<(), FilterError> {
        // sigma = 0.5 gives a 3-tap kernel [e^-2, 1, e^-2] / (1 + 2e^-2)
        let kernel = gaussian_kernel_1d(0.5f64)?;
        let e = (-2.0f64).exp();
        let norm = 1.0 + 2.0 * e;
        let expected = [e / norm, 1.0 / norm, e / norm];

        for (k, e) in kernel.as_slice().iter().zip(expected.iter()) {
            assert_relative_eq!(*k, *e, epsilon = 1e-12);
        }
        Ok(())
    }

    #[test]
    fn test_gaussian_kernel_degenerate() -> Result<(), FilterError> {
        for sigma in [0.0f32, 0.05, 1.0 / 6.0 - 1e-3] {
            let kernel = gaussian_kernel_1d(sigma)?;
            assert_eq!(kernel.as_slice(), &[1.0]);
        }
        let kernel = gaussian_kernel_2d(0.0f64)?;
        assert_eq!(kernel.shape, [1, 1]);
        assert_eq!(kernel.as_slice(), &[1.0]);
        Ok(())
    }

    #[test]
    fn test_gaussian_kernel_2d() -> Result<(), FilterError> {
        for sigma in [0.5f64, 1.0, 2.0] {
            let kernel_1d = gaussian_kernel_1d(sigma)?;
            let kernel_2d = gaussian_kernel_2d(sigma)?;
            let len = kernel_1d.numel();

            assert_eq!(kernel_2d.shape, [len, len]);
            assert_relative_eq!(kernel_2d.sum(), 1.0, epsilon = 1e-9);

            let k = kernel_1d.as_slice();
            for r in 0..len {
                for c in 0..len {
                    assert_relative_eq!(
                        *kernel_2d.get_unchecked([r, c]),
                        k[r] * k[c],
                        epsilon = 1e-15
                    );
                }
            }
        }
        Ok(())
    }

    #[test]
    fn test_kernel_outer_shape() -> Result<(), FilterError> {
        let ky = Tensor1::from_shape_vec([3], vec![1.0f32, 2.0, 3.0])?;
        let kx = Tensor1::from_shape_vec([1], vec![2.0f32])?;
        let k = kernel_outer(&ky, &kx);
        assert_eq!(k.shape, [3, 1]);
        assert_eq!(k.as_slice(), &[2.0, 4.0, 6.0]);
        Ok(())
    }
}
