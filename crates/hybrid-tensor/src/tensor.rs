use thiserror::Error;

/// An error type for tensor operations.
#[derive(Error, Debug, PartialEq)]
pub enum TensorError {
    /// Tensor shape does not match the provided data.
    ///
    /// The product of the shape dimensions must equal the number of elements.
    #[error("Shape mismatch: expected {expected} elements for shape, but got {actual} elements in data")]
    InvalidShape {
        /// Expected number of elements based on shape
        expected: usize,
        /// Actual number of elements in the data
        actual: usize,
    },

    /// Tensor dimensions incompatible for the requested operation.
    #[error("Dimension mismatch: {message}. Expected shape: {expected}, got: {actual}")]
    DimensionMismatch {
        /// Human-readable description of the mismatch
        message: String,
        /// Expected shape description
        expected: String,
        /// Actual shape description
        actual: String,
    },
}

impl TensorError {
    /// Creates an InvalidShape error with clear context.
    pub fn invalid_shape(expected: usize, actual: usize) -> Self {
        Self::InvalidShape { expected, actual }
    }

    /// Creates a DimensionMismatch error with formatted shapes.
    pub fn dimension_mismatch(
        message: impl Into<String>,
        expected: &[usize],
        actual: &[usize],
    ) -> Self {
        Self::DimensionMismatch {
            message: message.into(),
            expected: format!("{expected:?}"),
            actual: format!("{actual:?}"),
        }
    }
}

/// Compute the strides from the shape of a tensor.
///
/// # Arguments
///
/// * `shape` - The shape of the tensor.
///
/// # Returns
///
/// * `strides` - The strides of the tensor, row-major.
///
/// # Example
///
/// ```
/// use hybrid_tensor::get_strides_from_shape;
///
/// let strides = get_strides_from_shape([2, 3, 4]);
/// assert_eq!(strides, [12, 4, 1]);
/// ```
pub fn get_strides_from_shape<const N: usize>(shape: [usize; N]) -> [usize; N] {
    let mut strides: [usize; N] = [0; N];
    let mut stride = 1;
    for i in (0..shape.len()).rev() {
        strides[i] = stride;
        stride *= shape[i];
    }
    strides
}

/// A multi-dimensional array with owned, contiguous, row-major data.
///
/// # Type Parameters
///
/// * `T` - The element type stored in the tensor
/// * `N` - The number of dimensions, checked at compile time
///
/// # Example
///
/// ```
/// use hybrid_tensor::Tensor2;
///
/// let t = Tensor2::<u8>::from_shape_vec([2, 2], vec![1, 2, 3, 4]).unwrap();
/// assert_eq!(t.shape, [2, 2]);
/// assert_eq!(t.get([1, 0]), Some(&3));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Tensor<T, const N: usize> {
    data: Vec<T>,
    /// The shape of the tensor.
    pub shape: [usize; N],
    /// The strides of the tensor data in memory.
    pub strides: [usize; N],
}

impl<T, const N: usize> Tensor<T, N> {
    /// Get the data of the tensor as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Get the data of the tensor as a mutable slice.
    #[inline]
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consume the tensor and return its data.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Creates a new `Tensor` with the given shape and data.
    ///
    /// # Errors
    ///
    /// If the number of elements in the data does not match the shape of the tensor, an error is returned.
    ///
    /// # Example
    ///
    /// ```
    /// use hybrid_tensor::Tensor2;
    ///
    /// let t = Tensor2::<u8>::from_shape_vec([2, 2], vec![1, 2, 3, 4]).unwrap();
    /// assert_eq!(t.as_slice(), vec![1, 2, 3, 4]);
    /// ```
    pub fn from_shape_vec(shape: [usize; N], data: Vec<T>) -> Result<Self, TensorError> {
        let numel = shape.iter().product::<usize>();
        if numel != data.len() {
            return Err(TensorError::invalid_shape(numel, data.len()));
        }
        let strides = get_strides_from_shape(shape);
        Ok(Self {
            data,
            shape,
            strides,
        })
    }

    /// Creates a new `Tensor` with the given shape filled with `value`.
    ///
    /// # Example
    ///
    /// ```
    /// use hybrid_tensor::Tensor3;
    ///
    /// let t = Tensor3::<u8>::from_shape_val([2, 1, 3], 2);
    /// assert_eq!(t.as_slice(), vec![2, 2, 2, 2, 2, 2]);
    /// ```
    pub fn from_shape_val(shape: [usize; N], value: T) -> Self
    where
        T: Clone,
    {
        let numel = shape.iter().product::<usize>();
        Self {
            data: vec![value; numel],
            shape,
            strides: get_strides_from_shape(shape),
        }
    }

    /// Create a new `Tensor` with the given shape and a function to generate the data.
    ///
    /// The function `f` is called with the index of the element to generate.
    ///
    /// # Example
    ///
    /// ```
    /// use hybrid_tensor::Tensor2;
    ///
    /// let t = Tensor2::<u8>::from_shape_fn([2, 2], |[i, j]| (i * 2 + j) as u8);
    /// assert_eq!(t.as_slice(), vec![0, 1, 2, 3]);
    /// ```
    pub fn from_shape_fn<F>(shape: [usize; N], f: F) -> Self
    where
        F: Fn([usize; N]) -> T,
    {
        let numel = shape.iter().product::<usize>();
        let data: Vec<T> = (0..numel)
            .map(|i| {
                let mut index = [0; N];
                let mut j = i;
                for k in (0..N).rev() {
                    index[k] = j % shape[k];
                    j /= shape[k];
                }
                f(index)
            })
            .collect();
        Self {
            data,
            shape,
            strides: get_strides_from_shape(shape),
        }
    }

    /// Creates a new `Tensor` filled with zeros.
    pub fn zeros(shape: [usize; N]) -> Self
    where
        T: Clone + num_traits::Zero,
    {
        Self::from_shape_val(shape, T::zero())
    }

    /// Returns the number of elements in the tensor.
    #[inline]
    pub fn numel(&self) -> usize {
        self.data.len()
    }

    /// Get the offset of the element at the given index, or `None` if out of bounds.
    pub fn get_iter_offset(&self, index: [usize; N]) -> Option<usize> {
        let mut offset = 0;
        for ((&idx, dim_size), stride) in index.iter().zip(self.shape).zip(self.strides) {
            if idx >= dim_size {
                return None;
            }
            offset += idx * stride;
        }
        Some(offset)
    }

    /// Get the element at the given index without bounds checking on the dimensions.
    ///
    /// Panics if the computed offset falls outside the data.
    #[inline]
    pub fn get_unchecked(&self, index: [usize; N]) -> &T {
        let offset = index
            .iter()
            .zip(self.strides)
            .fold(0, |acc, (&idx, stride)| acc + idx * stride);
        &self.data[offset]
    }

    /// Get the element at the given index.
    pub fn get(&self, index: [usize; N]) -> Option<&T> {
        self.get_iter_offset(index).map(|offset| &self.data[offset])
    }

    /// Apply a function to every element, producing a new tensor of the same shape.
    ///
    /// # Example
    ///
    /// ```
    /// use hybrid_tensor::Tensor1;
    ///
    /// let t = Tensor1::<f32>::from_shape_vec([3], vec![0.4, 1.6, 2.5]).unwrap();
    /// let r = t.map(|x| x.round() as u8);
    /// assert_eq!(r.as_slice(), vec![0, 2, 3]);
    /// ```
    pub fn map<U, F>(&self, f: F) -> Tensor<U, N>
    where
        F: Fn(&T) -> U,
    {
        Tensor {
            data: self.data.iter().map(f).collect(),
            shape: self.shape,
            strides: self.strides,
        }
    }

    /// Sum of all the elements of the tensor.
    pub fn sum(&self) -> T
    where
        T: Copy + std::iter::Sum,
    {
        self.data.iter().copied().sum()
    }

    /// Apply an element-wise operation with another tensor of identical shape.
    ///
    /// # Errors
    ///
    /// Returns [`TensorError::DimensionMismatch`] if the shapes differ; no broadcasting is done.
    ///
    /// # Example
    ///
    /// ```
    /// use hybrid_tensor::Tensor1;
    ///
    /// let a = Tensor1::<i32>::from_shape_vec([3], vec![1, 2, 3]).unwrap();
    /// let b = Tensor1::<i32>::from_shape_vec([3], vec![3, 2, 1]).unwrap();
    /// let c = a.element_wise_op(&b, |x, y| x - y).unwrap();
    /// assert_eq!(c.as_slice(), vec![-2, 0, 2]);
    /// ```
    pub fn element_wise_op<F>(&self, other: &Tensor<T, N>, op: F) -> Result<Self, TensorError>
    where
        F: Fn(&T, &T) -> T,
    {
        if self.shape != other.shape {
            return Err(TensorError::dimension_mismatch(
                "Element-wise operations require identical shapes",
                &self.shape,
                &other.shape,
            ));
        }

        let data = self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| op(a, b))
            .collect();

        Ok(Self {
            data,
            shape: self.shape,
            strides: self.strides,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructor_1d() -> Result<(), TensorError> {
        let t = Tensor::<u8, 1>::from_shape_vec([1], vec![2])?;
        assert_eq!(t.shape, [1]);
        assert_eq!(t.as_slice(), vec![2]);
        assert_eq!(t.strides, [1]);
        Ok(())
    }

    #[test]
    fn constructor_wrong_shape() {
        let t = Tensor::<u8, 2>::from_shape_vec([2, 3], vec![0; 5]);
        assert_eq!(t, Err(TensorError::invalid_shape(6, 5)));
    }

    #[test]
    fn get_3d() -> Result<(), TensorError> {
        let data: Vec<u8> = (0..12).collect();
        let t = Tensor::<u8, 3>::from_shape_vec([2, 3, 2], data)?;
        assert_eq!(t.strides, [6, 2, 1]);
        assert_eq!(t.get([0, 0, 0]), Some(&0));
        assert_eq!(t.get([1, 2, 1]), Some(&11));
        assert_eq!(*t.get_unchecked([1, 0, 1]), 7);
        assert_eq!(t.get([2, 0, 0]), None);
        assert_eq!(t.get([0, 3, 0]), None);
        Ok(())
    }

    #[test]
    fn from_shape_fn_row_major() {
        let t = Tensor::<usize, 2>::from_shape_fn([2, 3], |[r, c]| r * 10 + c);
        assert_eq!(t.as_slice(), vec![0, 1, 2, 10, 11, 12]);
    }

    #[test]
    fn zeros_and_sum() {
        let t = Tensor::<f64, 2>::zeros([3, 4]);
        assert_eq!(t.numel(), 12);
        assert_eq!(t.sum(), 0.0);

        let t = Tensor::<f64, 2>::from_shape_val([2, 2], 0.25);
        assert_eq!(t.sum(), 1.0);
    }

    #[test]
    fn element_wise_shape_mismatch() -> Result<(), TensorError> {
        let a = Tensor::<f32, 2>::zeros([2, 2]);
        let b = Tensor::<f32, 2>::zeros([2, 3]);
        let res = a.element_wise_op(&b, |x, y| x + y);
        assert!(matches!(res, Err(TensorError::DimensionMismatch { .. })));

        let c = Tensor::<f32, 2>::from_shape_val([2, 2], 1.5);
        let d = a.element_wise_op(&c, |x, y| x + y)?;
        assert_eq!(d.as_slice(), vec![1.5; 4]);
        Ok(())
    }
}
