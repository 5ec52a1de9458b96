//! Frequency split and hybrid image synthesis.
//!
//! A hybrid image is the low frequencies of one image plus the high frequencies of another.
//! Up close the high frequencies dominate; from far away only the low ones are visible.
//!
//! High frequency images are signed. Nothing here clamps implicitly: call [`clip`] or
//! [`to_u8`] once, after every additive step.

use hybrid_image::{Image, ImageError};
use num_traits::{Float, ToPrimitive};

use crate::{
    filter::{gaussian_blur, FilterError},
    parallel,
};

fn check_same_size<T, const C: usize>(
    a: &Image<T, C>,
    b: &Image<T, C>,
) -> Result<(), ImageError> {
    if a.size() != b.size() {
        return Err(ImageError::InvalidImageSize(
            a.width(),
            a.height(),
            b.width(),
            b.height(),
        ));
    }
    Ok(())
}

/// Add two images sample by sample.
///
/// # Errors
///
/// Returns [`ImageError::InvalidImageSize`] if the images differ in size.
pub fn add<T, const C: usize>(
    a: &Image<T, C>,
    b: &Image<T, C>,
) -> Result<Image<T, C>, FilterError>
where
    T: Float,
{
    check_same_size(a, b)?;
    Ok(Image(a.element_wise_op(b, |x, y| *x + *y)?))
}

/// Subtract `b` from `a` sample by sample.
///
/// # Errors
///
/// Returns [`ImageError::InvalidImageSize`] if the images differ in size.
pub fn sub<T, const C: usize>(
    a: &Image<T, C>,
    b: &Image<T, C>,
) -> Result<Image<T, C>, FilterError>
where
    T: Float,
{
    check_same_size(a, b)?;
    Ok(Image(a.element_wise_op(b, |x, y| *x - *y)?))
}

/// The low frequency component of an image, i.e. its gaussian blur.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `sigma` - The sigma of the gaussian low-pass filter.
pub fn low_frequency<T, const C: usize>(
    src: &Image<T, C>,
    sigma: T,
) -> Result<Image<T, C>, FilterError>
where
    T: Float + Send + Sync,
{
    gaussian_blur(src, sigma)
}

/// The high frequency component of an image: the image minus its own gaussian blur.
///
/// The result may contain negative values.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `sigma` - The sigma of the gaussian low-pass filter that is removed.
pub fn high_frequency<T, const C: usize>(
    src: &Image<T, C>,
    sigma: T,
) -> Result<Image<T, C>, FilterError>
where
    T: Float + Send + Sync,
{
    let low = low_frequency(src, sigma)?;
    sub(src, &low)
}

/// Compose a hybrid image.
///
/// # Arguments
///
/// * `low_src` - The image seen from far away. Its low frequencies are kept.
/// * `high_src` - The image seen up close. Its high frequencies are kept.
/// * `sigma_low` - The sigma used to blur `low_src`.
/// * `sigma_high` - The sigma of the blur subtracted from `high_src`.
///
/// # Returns
///
/// The unclipped sum of both components.
///
/// # Errors
///
/// Returns [`ImageError::InvalidImageSize`] if the images differ in size, before any filtering.
///
/// # Example
///
/// ```
/// use hybrid_image::{Image, ImageSize};
/// use hybrid_imgproc::hybrid;
///
/// let size = ImageSize { width: 16, height: 16 };
/// let dog = Image::<f32, 3>::from_size_val(size, 200.0).unwrap();
/// let cat = Image::<f32, 3>::from_size_val(size, 50.0).unwrap();
///
/// let composite = hybrid::hybrid_image(&dog, &cat, 2.0, 2.0).unwrap();
/// let output = hybrid::to_u8(&composite).unwrap();
/// assert_eq!(output.size(), size);
/// ```
pub fn hybrid_image<T, const C: usize>(
    low_src: &Image<T, C>,
    high_src: &Image<T, C>,
    sigma_low: T,
    sigma_high: T,
) -> Result<Image<T, C>, FilterError>
where
    T: Float + Send + Sync,
{
    check_same_size(low_src, high_src)?;

    log::debug!(
        "hybrid image {}: sigma_low {:?}, sigma_high {:?}",
        low_src.size(),
        sigma_low.to_f64(),
        sigma_high.to_f64()
    );

    let low = low_frequency(low_src, sigma_low)?;
    let high = high_frequency(high_src, sigma_high)?;
    add(&low, &high)
}

/// Clamp every sample into `[min, max]`.
///
/// Values already inside the range are returned unchanged.
///
/// # Errors
///
/// Returns [`FilterError::InvalidClipRange`] if `min > max`.
pub fn clip<T, const C: usize>(
    src: &Image<T, C>,
    min: T,
    max: T,
) -> Result<Image<T, C>, FilterError>
where
    T: Float + Send + Sync,
{
    if min > max {
        return Err(FilterError::InvalidClipRange(
            min.to_f64().unwrap_or(f64::NAN),
            max.to_f64().unwrap_or(f64::NAN),
        ));
    }

    let mut dst = Image::from_size_val(src.size(), T::zero())?;
    parallel::par_iter_rows_val(src, &mut dst, |&s, d| {
        *d = s.max(min).min(max);
    });

    Ok(dst)
}

/// Convert a float image in the [0, 255] range to `u8`.
///
/// Samples are clipped to [0, 255] first and then rounded to the nearest integer.
pub fn to_u8<T, const C: usize>(src: &Image<T, C>) -> Result<Image<u8, C>, FilterError>
where
    T: Float + Send + Sync,
{
    let max = T::from(u8::MAX)
        .ok_or_else(|| ImageError::CastError(std::any::type_name::<T>().to_string()))?;
    let clipped = clip(src, T::zero(), max)?;
    Ok(Image(clipped.map(|v| v.round().to_u8().unwrap_or(0))))
}
