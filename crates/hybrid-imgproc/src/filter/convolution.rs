use hybrid_image::Image;
use hybrid_tensor::Tensor2;
use num_traits::Float;
use rayon::prelude::*;

use super::FilterError;

pub(crate) fn check_kernel_shape(rows: usize, cols: usize) -> Result<(), FilterError> {
    if rows % 2 != 1 || cols % 2 != 1 {
        return Err(FilterError::InvalidKernelShape(rows, cols));
    }
    Ok(())
}

/// Convolve a single channel image with a 2D kernel.
///
/// This is a true convolution (the kernel is flipped) with "same" output size and zero padding:
/// samples outside the image contribute nothing. The kernel is applied as given, no
/// normalization happens here.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, 1).
/// * `kernel` - The kernel with shape (kH, kW). Both dimensions must be odd.
///
/// # Returns
///
/// A new image with the same shape as `src`.
///
/// # Example
///
/// ```
/// use hybrid_image::{Image, ImageSize};
/// use hybrid_imgproc::filter::{convolve2d, kernels};
///
/// let image = Image::<f64, 1>::from_size_val(ImageSize { width: 5, height: 5 }, 100.0).unwrap();
/// let kernel = kernels::box_kernel_2d(3).unwrap();
///
/// let blurred = convolve2d(&image, &kernel).unwrap();
/// assert_eq!(blurred.size(), image.size());
/// assert!((blurred.get_pixel(2, 2, 0).unwrap() - 100.0).abs() < 1e-9);
/// ```
pub fn convolve2d<T>(src: &Image<T, 1>, kernel: &Tensor2<T>) -> Result<Image<T, 1>, FilterError>
where
    T: Float + Send + Sync,
{
    let [krows, kcols] = kernel.shape;
    check_kernel_shape(krows, kcols)?;

    let mut dst = Image::from_size_val(src.size(), T::zero())?;

    let (rows, cols) = (src.rows(), src.cols());
    if rows == 0 || cols == 0 {
        return Ok(dst);
    }

    if krows > rows || kcols > cols {
        log::warn!(
            "kernel {}x{} is larger than the image {}x{}",
            krows,
            kcols,
            rows,
            cols
        );
    }

    let (ry, rx) = (krows / 2, kcols / 2);
    let src_data = src.as_slice();
    let kernel_data = kernel.as_slice();

    dst.as_slice_mut()
        .par_chunks_exact_mut(cols)
        .enumerate()
        .for_each(|(r, dst_row)| {
            for (c, out) in dst_row.iter_mut().enumerate() {
                let mut sum = T::zero();
                for i in 0..krows {
                    // kernel row i reads the source row r + ry - i
                    let Some(sr) = (r + ry).checked_sub(i).filter(|&sr| sr < rows) else {
                        continue;
                    };
                    let src_row = &src_data[sr * cols..(sr + 1) * cols];
                    let kernel_row = &kernel_data[i * kcols..(i + 1) * kcols];
                    for (j, &k) in kernel_row.iter().enumerate() {
                        let Some(sc) = (c + rx).checked_sub(j).filter(|&sc| sc < cols) else {
                            continue;
                        };
                        sum = sum + k * src_row[sc];
                    }
                }
                *out = sum;
            }
        });

    Ok(dst)
}

/// Convolve every channel of an image with the same 2D kernel.
///
/// Channels are processed independently and in parallel, then stacked back in their
/// original order.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `kernel` - The kernel with shape (kH, kW). Both dimensions must be odd.
pub fn convolve2d_channels<T, const C: usize>(
    src: &Image<T, C>,
    kernel: &Tensor2<T>,
) -> Result<Image<T, C>, FilterError>
where
    T: Float + Send + Sync,
{
    let channels = src.split_channels()?;

    let filtered = channels
        .par_iter()
        .map(|channel| convolve2d(channel, kernel))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Image::from_channels(&filtered)?)
}
