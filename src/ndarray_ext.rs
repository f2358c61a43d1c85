//! ndarray integration for tensor batch files
//!
//! This module provides conversions from ndarray arrays to `TensorItem`s for
//! writing, and from stored `TensorView`s back to owned ndarray arrays.
//! Elements are always encoded little-endian in logical (row-major) order, so
//! non-contiguous and transposed arrays are written correctly.
//!
//! Enable with the `ndarray` feature flag.

use crate::types::{DType, TensorItem, TensorView};
use half::{bf16, f16};
use ndarray::{ArrayBase, ArrayD, Data, Dimension, IxDyn};
use thiserror::Error;

/// Error type for ndarray conversions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NdarrayError {
    /// DType mismatch between expected and actual
    #[error("DType mismatch: expected {expected:?}, got {actual:?}")]
    DTypeMismatch { expected: DType, actual: DType },
    /// Shape doesn't match data length
    #[error("Shape {shape:?} doesn't match data length {data_len}")]
    ShapeMismatch { shape: Vec<i64>, data_len: usize },
    /// Array dimension does not fit an i64 shape entry
    #[error("dimension {0} too large for the index")]
    DimensionTooLarge(usize),
    /// Stored bytes are not a valid element of the dtype
    #[error("invalid {dtype:?} element at position {position}")]
    InvalidElement { dtype: DType, position: usize },
}

/// Element types that can be stored in a tensor
pub trait TensorElement: Copy + 'static {
    const DTYPE: DType;

    /// Append the little-endian encoding of `self`
    fn extend_le(self, out: &mut Vec<u8>);

    /// Decode one element; `bytes` has exactly `DTYPE.element_size()` bytes
    fn from_le(bytes: &[u8]) -> Option<Self>;
}

macro_rules! impl_tensor_element {
    ($($ty:ty => $dtype:ident),* $(,)?) => {
        $(
            impl TensorElement for $ty {
                const DTYPE: DType = DType::$dtype;

                fn extend_le(self, out: &mut Vec<u8>) {
                    out.extend_from_slice(&self.to_le_bytes());
                }

                fn from_le(bytes: &[u8]) -> Option<Self> {
                    bytes.try_into().ok().map(<$ty>::from_le_bytes)
                }
            }
        )*
    };
}

impl_tensor_element!(
    f32 => Float32,
    f64 => Float64,
    f16 => Float16,
    bf16 => BFloat16,
    i8 => Int8,
    u8 => UInt8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
);

impl TensorElement for bool {
    const DTYPE: DType = DType::Bool;

    fn extend_le(self, out: &mut Vec<u8>) {
        out.push(self as u8);
    }

    fn from_le(bytes: &[u8]) -> Option<Self> {
        match bytes {
            [0] => Some(false),
            [1] => Some(true),
            _ => None,
        }
    }
}

// =============================================================================
// From ndarray to tensor items
// =============================================================================

impl TensorItem<'static> {
    /// Create a tensor item from any ndarray array
    ///
    /// Elements are copied in logical order, so the memory layout of `arr`
    /// does not matter.
    pub fn from_ndarray<T, S, D>(
        key: impl Into<String>,
        arr: &ArrayBase<S, D>,
    ) -> Result<Self, NdarrayError>
    where
        T: TensorElement,
        S: Data<Elem = T>,
        D: Dimension,
    {
        let shape = arr
            .shape()
            .iter()
            .map(|&d| i64::try_from(d).map_err(|_| NdarrayError::DimensionTooLarge(d)))
            .collect::<Result<Vec<i64>, _>>()?;

        let mut data = Vec::with_capacity(arr.len() * T::DTYPE.element_size());
        for &value in arr.iter() {
            value.extend_le(&mut data);
        }
        Ok(TensorItem::new(key, T::DTYPE, shape, data))
    }
}

// =============================================================================
// From stored tensors to ndarray (owned)
// =============================================================================

impl<'a> TensorView<'a> {
    /// Convert to an owned ndarray ArrayD
    pub fn to_ndarray<T: TensorElement>(&self) -> Result<ArrayD<T>, NdarrayError> {
        if T::DTYPE != self.dtype {
            return Err(NdarrayError::DTypeMismatch {
                expected: T::DTYPE,
                actual: self.dtype,
            });
        }

        let mismatch = || NdarrayError::ShapeMismatch {
            shape: self.shape.to_vec(),
            data_len: self.data.len(),
        };

        let shape = self
            .shape
            .iter()
            .map(|&d| usize::try_from(d).map_err(|_| mismatch()))
            .collect::<Result<Vec<usize>, _>>()?;
        let expected_len = shape
            .iter()
            .try_fold(T::DTYPE.element_size(), |acc, &d| acc.checked_mul(d))
            .ok_or_else(mismatch)?;
        if self.data.len() != expected_len {
            return Err(mismatch());
        }

        let elements = self
            .data
            .chunks_exact(T::DTYPE.element_size())
            .enumerate()
            .map(|(position, chunk)| {
                T::from_le(chunk).ok_or(NdarrayError::InvalidElement {
                    dtype: T::DTYPE,
                    position,
                })
            })
            .collect::<Result<Vec<T>, _>>()?;

        ArrayD::from_shape_vec(IxDyn(&shape), elements).map_err(|_| mismatch())
    }
}
