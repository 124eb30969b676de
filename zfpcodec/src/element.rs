//! Element types supported by zfp.

/// The native zfp type for the zfp library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZfpNativeType {
    /// 32-bit integer (`zfp_type_int32`)
    Int32,
    /// 64-bit integer (`zfp_type_int64`)
    Int64,
    /// 32-bit float (`zfp_type_float`)
    Float,
    /// 64-bit float (`zfp_type_double`)
    Double,
}

impl ZfpNativeType {
    pub(crate) fn to_sys(self) -> zfp_sys::zfp_type {
        match self {
            Self::Int32 => zfp_sys::zfp_type_zfp_type_int32,
            Self::Int64 => zfp_sys::zfp_type_zfp_type_int64,
            Self::Float => zfp_sys::zfp_type_zfp_type_float,
            Self::Double => zfp_sys::zfp_type_zfp_type_double,
        }
    }

    pub(crate) fn from_sys(zfp_type: zfp_sys::zfp_type) -> Option<Self> {
        match zfp_type {
            zfp_sys::zfp_type_zfp_type_int32 => Some(Self::Int32),
            zfp_sys::zfp_type_zfp_type_int64 => Some(Self::Int64),
            zfp_sys::zfp_type_zfp_type_float => Some(Self::Float),
            zfp_sys::zfp_type_zfp_type_double => Some(Self::Double),
            _ => None,
        }
    }
}

/// An element type that zfp encodes natively.
///
/// Implemented for [`f32`], [`f64`], [`i32`], and [`i64`].
pub trait ZfpElement: bytemuck::Pod + Send + Sync {
    /// The zfp type of the element.
    const NATIVE_TYPE: ZfpNativeType;
}

impl ZfpElement for f32 {
    const NATIVE_TYPE: ZfpNativeType = ZfpNativeType::Float;
}

impl ZfpElement for f64 {
    const NATIVE_TYPE: ZfpNativeType = ZfpNativeType::Double;
}

impl ZfpElement for i32 {
    const NATIVE_TYPE: ZfpNativeType = ZfpNativeType::Int32;
}

impl ZfpElement for i64 {
    const NATIVE_TYPE: ZfpNativeType = ZfpNativeType::Int64;
}
