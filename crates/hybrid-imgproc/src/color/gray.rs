use crate::parallel;
use hybrid_image::{Image, ImageError};

/// Define the RGB weights for the grayscale conversion.
const RW: f64 = 0.299;
const GW: f64 = 0.587;
const BW: f64 = 0.114;

/// Convert an RGB image to grayscale using the formula:
///
/// Y = 0.299 * R + 0.587 * G + 0.114 * B
///
/// # Arguments
///
/// * `src` - The input RGB image.
/// * `dst` - The output grayscale image.
///
/// Precondition: the input and output images must have the same size.
///
/// # Example
///
/// ```
/// use hybrid_image::{Image, ImageSize};
/// use hybrid_imgproc::color::gray_from_rgb;
///
/// let image = Image::<f32, 3>::new(
///     ImageSize {
///         width: 4,
///         height: 5,
///     },
///     vec![0f32; 4 * 5 * 3],
/// )
/// .unwrap();
///
/// let mut gray = Image::<f32, 1>::from_size_val(image.size(), 0.0).unwrap();
///
/// gray_from_rgb(&image, &mut gray).unwrap();
/// assert_eq!(gray.num_channels(), 1);
/// assert_eq!(gray.size().width, 4);
/// assert_eq!(gray.size().height, 5);
/// ```
pub fn gray_from_rgb<T>(src: &Image<T, 3>, dst: &mut Image<T, 1>) -> Result<(), ImageError>
where
    T: Send + Sync + num_traits::Float,
{
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    let cast_error = || ImageError::CastError(std::any::type_name::<T>().to_string());
    let rw = T::from(RW).ok_or_else(cast_error)?;
    let gw = T::from(GW).ok_or_else(cast_error)?;
    let bw = T::from(BW).ok_or_else(cast_error)?;

    // parallelize the grayscale conversion by rows
    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        let r = src_pixel[0];
        let g = src_pixel[1];
        let b = src_pixel[2];
        dst_pixel[0] = rw * r + gw * g + bw * b;
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use hybrid_image::{Image, ImageError, ImageSize};

    #[test]
    fn gray_from_rgb() -> Result<(), ImageError> {
        let image = Image::<f64, 3>::new(
            ImageSize {
                width: 2,
                height: 1,
            },
            vec![255.0, 0.0, 0.0, 100.0, 100.0, 100.0],
        )?;

        let mut gray = Image::<f64, 1>::from_size_val(image.size(), 0.0)?;
        super::gray_from_rgb(&image, &mut gray)?;

        assert_relative_eq!(gray.as_slice()[0], 0.299 * 255.0, epsilon = 1e-9);
        assert_relative_eq!(gray.as_slice()[1], 100.0, epsilon = 1e-9);
        Ok(())
    }

    #[test]
    fn gray_from_rgb_size_mismatch() -> Result<(), ImageError> {
        let image = Image::<f32, 3>::from_size_val([4, 4].into(), 0.0)?;
        let mut gray = Image::<f32, 1>::from_size_val([4, 3].into(), 0.0)?;
        assert_eq!(
            super::gray_from_rgb(&image, &mut gray),
            Err(ImageError::InvalidImageSize(4, 4, 4, 3))
        );
        Ok(())
    }
}
