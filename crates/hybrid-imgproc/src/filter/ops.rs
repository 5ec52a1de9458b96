use hybrid_image::Image;
use num_traits::Float;

use super::{convolve2d_channels, kernels, FilterError};

/// Blur an image using a gaussian blur filter
///
/// The 2D gaussian kernel is built from `sigma` and convolved with every channel using the
/// same kernel. The kernel size is `ceil(6 * sigma)` rounded up to the next odd number.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `sigma` - The sigma of the gaussian kernel. Must be finite and non-negative.
///
/// # Returns
///
/// The blurred image, same shape as `src`.
///
/// # Example
///
/// ```
/// use hybrid_image::{Image, ImageSize};
/// use hybrid_imgproc::filter::gaussian_blur;
///
/// let image = Image::<f32, 3>::from_size_val(ImageSize { width: 8, height: 8 }, 0.5).unwrap();
/// let blurred = gaussian_blur(&image, 1.0).unwrap();
/// assert_eq!(blurred.size(), image.size());
/// ```
pub fn gaussian_blur<T, const C: usize>(
    src: &Image<T, C>,
    sigma: T,
) -> Result<Image<T, C>, FilterError>
where
    T: Float + Send + Sync,
{
    let kernel = kernels::gaussian_kernel_2d(sigma)?;
    log::debug!(
        "gaussian blur: sigma {:?}, kernel {}x{}, image {}",
        sigma.to_f64(),
        kernel.shape[0],
        kernel.shape[1],
        src.size()
    );
    convolve2d_channels(src, &kernel)
}

/// Blur an image using a box blur filter
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `kernel_size` - The size `n` of the n×n box kernel. Must be odd and positive.
pub fn box_blur<T, const C: usize>(
    src: &Image<T, C>,
    kernel_size: usize,
) -> Result<Image<T, C>, FilterError>
where
    T: Float + Send + Sync,
{
    let kernel = kernels::box_kernel_2d(kernel_size)?;
    log::debug!("box blur: kernel {kernel_size}x{kernel_size}, image {}", src.size());
    convolve2d_channels(src, &kernel)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{convolve2d, separable_filter};
    use approx::assert_relative_eq;
    use hybrid_image::ImageSize;

    #[test]
    fn test_gaussian_blur_single_channel() -> Result<(), FilterError> {
        let size = ImageSize {
            width: 6,
            height: 4,
        };
        let image = Image::<f64, 1>::new(size, (0..24).map(|x| (x * x) as f64).collect())?;

        let blurred = gaussian_blur(&image, 1.0)?;
        let expected = convolve2d(&image, &kernels::gaussian_kernel_2d(1.0)?)?;
        assert_eq!(blurred.as_slice(), expected.as_slice());
        Ok(())
    }

    #[test]
    fn test_gaussian_blur_zero_sigma_is_identity() -> Result<(), FilterError> {
        let image = Image::<f32, 3>::new([2, 2].into(), (0..12).map(|x| x as f32).collect())?;
        let blurred = gaussian_blur(&image, 0.0)?;
        assert_eq!(blurred, image);
        Ok(())
    }

    #[test]
    fn test_gaussian_blur_matches_separable() -> Result<(), FilterError> {
        let size = ImageSize {
            width: 12,
            height: 10,
        };
        let data = (0..size.width * size.height * 3)
            .map(|i| ((i * 53) % 256) as f64)
            .collect();
        let image = Image::<f64, 3>::new(size, data)?;

        let kernel = kernels::gaussian_kernel_1d(1.5)?;
        let fast = separable_filter(&image, &kernel, &kernel)?;
        let blurred = gaussian_blur(&image, 1.5)?;

        for (a, b) in fast.as_slice().iter().zip(blurred.as_slice().iter()) {
            assert_relative_eq!(*a, *b, epsilon = 1e-9);
        }
        Ok(())
    }

    #[test]
    fn test_gaussian_blur_invalid_sigma() -> Result<(), FilterError> {
        let image = Image::<f32, 1>::from_size_val([3, 3].into(), 0.0)?;
        assert_eq!(
            gaussian_blur(&image, -0.5).err(),
            Some(FilterError::InvalidSigma(-0.5))
        );
        Ok(())
    }

    #[test]
    fn test_box_blur() -> Result<(), FilterError> {
        let image = Image::<f64, 2>::from_size_val([5, 5].into(), 100.0)?;
        let blurred = box_blur(&image, 3)?;
        assert_relative_eq!(*blurred.get_pixel(2, 2, 0).unwrap(), 100.0, epsilon = 1e-9);
        assert_relative_eq!(*blurred.get_pixel(2, 2, 1).unwrap(), 100.0, epsilon = 1e-9);
        assert_relative_eq!(
            *blurred.get_pixel(0, 0, 1).unwrap(),
            400.0 / 9.0,
            epsilon = 1e-9
        );

        assert_eq!(
            box_blur(&image, 2).err(),
            Some(FilterError::InvalidKernelSize(2))
        );
        Ok(())
    }
}
