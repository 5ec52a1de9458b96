use hybrid_image::Image;
use hybrid_tensor::Tensor1;
use num_traits::Float;
use rayon::prelude::*;

use super::{convolution::check_kernel_shape, FilterError};

/// Apply a separable filter to an image.
///
/// Runs a horizontal then a vertical 1D convolution with zero padding. The result matches
/// [`super::convolve2d_channels`] with the kernel `kernels::kernel_outer(kernel_y, kernel_x)`
/// up to floating point rounding, at `O(kx + ky)` instead of `O(kx * ky)` per pixel.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `kernel_x` - The horizontal kernel. Must have odd length.
/// * `kernel_y` - The vertical kernel. Must have odd length.
pub fn separable_filter<T, const C: usize>(
    src: &Image<T, C>,
    kernel_x: &Tensor1<T>,
    kernel_y: &Tensor1<T>,
) -> Result<Image<T, C>, FilterError>
where
    T: Float + Send + Sync,
{
    check_kernel_shape(kernel_y.numel(), kernel_x.numel())?;

    let mut temp = Image::<T, C>::from_size_val(src.size(), T::zero())?;
    let mut dst = Image::<T, C>::from_size_val(src.size(), T::zero())?;

    let (rows, cols) = (src.rows(), src.cols());
    if rows == 0 || cols == 0 {
        return Ok(dst);
    }

    let row_len = cols * C;
    let kernel_x = kernel_x.as_slice();
    let kernel_y = kernel_y.as_slice();
    let half_x = kernel_x.len() / 2;
    let half_y = kernel_y.len() / 2;

    // apply the horizontal filter
    temp.as_slice_mut()
        .par_chunks_exact_mut(row_len)
        .zip(src.as_slice().par_chunks_exact(row_len))
        .for_each(|(temp_row, src_row)| {
            for x in 0..cols {
                for c in 0..C {
                    let mut sum = T::zero();
                    for (k, &w) in kernel_x.iter().enumerate() {
                        if let Some(x_pos) = (x + half_x).checked_sub(k).filter(|&p| p < cols) {
                            sum = sum + w * src_row[x_pos * C + c];
                        }
                    }
                    temp_row[x * C + c] = sum;
                }
            }
        });

    // apply the vertical filter
    let temp_data = temp.as_slice();
    dst.as_slice_mut()
        .par_chunks_exact_mut(row_len)
        .enumerate()
        .for_each(|(y, dst_row)| {
            for (k, &w) in kernel_y.iter().enumerate() {
                let Some(y_pos) = (y + half_y).checked_sub(k).filter(|&p| p < rows) else {
                    continue;
                };
                let temp_row = &temp_data[y_pos * row_len..(y_pos + 1) * row_len];
                dst_row
                    .iter_mut()
                    .zip(temp_row.iter())
                    .for_each(|(d, &t)| *d = *d + w * t);
            }
        });

    Ok(dst)
}
