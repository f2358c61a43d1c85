//! Tensor types - owned/borrowed items for writing, views for reading

use super::DType;
use crate::error::{Result, TbfError};
use std::borrow::Cow;

/// One named tensor handed to the writer
///
/// `data` holds the little-endian element bytes in row-major order. It may
/// borrow the caller's buffer; the writer only copies key, dtype and shape.
/// The dtype is kept as its raw wire code; unknown codes are rejected when
/// the item is written.
#[derive(Debug, Clone)]
pub struct TensorItem<'a> {
    pub key: String,
    pub dtype_code: u16,
    pub shape: Vec<i64>,
    pub data: Cow<'a, [u8]>,
}

impl<'a> TensorItem<'a> {
    pub fn new(
        key: impl Into<String>,
        dtype: DType,
        shape: Vec<i64>,
        data: impl Into<Cow<'a, [u8]>>,
    ) -> Self {
        Self::with_code(key, dtype.code(), shape, data)
    }

    /// Create from a raw dtype code
    pub fn with_code(
        key: impl Into<String>,
        dtype_code: u16,
        shape: Vec<i64>,
        data: impl Into<Cow<'a, [u8]>>,
    ) -> Self {
        Self {
            key: key.into(),
            dtype_code,
            shape,
            data: data.into(),
        }
    }

    /// Decoded dtype, if the code is known
    pub fn dtype(&self) -> Option<DType> {
        DType::from_u16(self.dtype_code)
    }

    /// Check everything the index needs before any byte is written
    ///
    /// Returns the decoded dtype on success.
    pub fn validate(&self) -> Result<DType> {
        if self.key.is_empty() {
            return Err(TbfError::EmptyKey);
        }
        if self.key.len() > u32::MAX as usize {
            return Err(TbfError::KeyTooLong {
                len: self.key.len(),
            });
        }
        let dtype = self
            .dtype()
            .ok_or(TbfError::UnknownDType(self.dtype_code))?;
        if self.shape.len() > u16::MAX as usize {
            return Err(TbfError::TooManyDimensions {
                key: self.key.clone(),
                ndim: self.shape.len(),
            });
        }
        if let Some((axis, &dim)) = self.shape.iter().enumerate().find(|(_, d)| **d < 0) {
            return Err(TbfError::NegativeDimension {
                key: self.key.clone(),
                axis,
                dim,
            });
        }

        let expected =
            expected_byte_length(&self.shape, dtype).ok_or_else(|| TbfError::ShapeOverflow {
                key: self.key.clone(),
                shape: self.shape.clone(),
            })?;
        let actual = self.data.len() as u64;
        if actual != expected {
            return Err(TbfError::DataSizeMismatch {
                key: self.key.clone(),
                expected,
                actual,
            });
        }
        Ok(dtype)
    }
}

/// Bytes needed by a tensor of this shape and dtype
///
/// The empty shape is a scalar holding one element. Returns `None` for a
/// negative dimension or when the size overflows u64.
pub fn expected_byte_length(shape: &[i64], dtype: DType) -> Option<u64> {
    shape
        .iter()
        .try_fold(1u64, |acc, &dim| {
            let dim = u64::try_from(dim).ok()?;
            acc.checked_mul(dim)
        })?
        .checked_mul(dtype.element_size() as u64)
}

/// View of a stored tensor (zero-copy)
#[derive(Debug, Clone, Copy)]
pub struct TensorView<'a> {
    pub record_id: u64,
    pub key: &'a str,
    pub dtype: DType,
    pub shape: &'a [i64],
    pub data: &'a [u8],
}

impl<'a> TensorView<'a> {
    /// Total number of elements, `None` if the shape is negative or overflows
    pub fn num_elements(&self) -> Option<u64> {
        expected_byte_length(self.shape, DType::UInt8)
    }

    /// Convert to an owned item that can be written again
    pub fn to_item(&self) -> TensorItem<'static> {
        TensorItem::new(
            self.key,
            self.dtype,
            self.shape.to_vec(),
            self.data.to_vec(),
        )
    }
}
