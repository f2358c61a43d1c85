//! Element types for tensors

/// Element type of a tensor, with its on-disk u16 code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum DType {
    Float32 = 1,
    Float64 = 2,
    Float16 = 3,
    BFloat16 = 4,
    Int8 = 5,
    UInt8 = 6,
    Int16 = 7,
    Int32 = 8,
    Int64 = 9,
    Bool = 10,
}

impl DType {
    /// Size in bytes of a single element
    pub fn element_size(self) -> usize {
        match self {
            DType::Int8 | DType::UInt8 | DType::Bool => 1,
            DType::Float16 | DType::BFloat16 | DType::Int16 => 2,
            DType::Float32 | DType::Int32 => 4,
            DType::Float64 | DType::Int64 => 8,
        }
    }

    /// Wire code of this dtype
    pub fn code(self) -> u16 {
        self as u16
    }

    /// Try to convert from a wire code
    pub fn from_u16(code: u16) -> Option<Self> {
        match code {
            1 => Some(DType::Float32),
            2 => Some(DType::Float64),
            3 => Some(DType::Float16),
            4 => Some(DType::BFloat16),
            5 => Some(DType::Int8),
            6 => Some(DType::UInt8),
            7 => Some(DType::Int16),
            8 => Some(DType::Int32),
            9 => Some(DType::Int64),
            10 => Some(DType::Bool),
            _ => None,
        }
    }
}
