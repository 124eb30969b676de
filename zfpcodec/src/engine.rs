//! The zfp engine interface.

use crate::{FieldGeometry, ZfpElement, ZfpError, ZfpMode, ZfpNativeType};

/// The element type and geometry described by a zfp header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZfpHeader {
    /// The element type.
    pub native_type: ZfpNativeType,
    /// The field geometry.
    pub geometry: FieldGeometry,
}

/// Traits for a zfp engine.
///
/// An engine compresses and decompresses a single field per call.
/// It is stateless: every call configures its own stream from the [`ZfpMode`] it is passed, and releases it before returning.
///
/// [`ZfpSysEngine`](crate::ZfpSysEngine) is the engine backed by the zfp C library.
pub trait ZfpEngine {
    /// Returns the maximum compressed size in bytes of a field with `geometry` in `mode`.
    ///
    /// The size includes space for a full zfp header.
    ///
    /// # Errors
    /// Returns an error if the stream or field cannot be created.
    fn maximum_size<T: ZfpElement>(
        &self,
        mode: &ZfpMode,
        geometry: &FieldGeometry,
    ) -> Result<usize, ZfpError>;

    /// Compress `values` into `buffer`, optionally preceded by a full zfp header.
    ///
    /// Returns the number of bytes written, where `0` indicates failure.
    ///
    /// # Errors
    /// Returns an error if `values` does not match `geometry`, `buffer` is smaller than [`maximum_size`](ZfpEngine::maximum_size), or the stream or field cannot be created.
    fn compress<T: ZfpElement>(
        &self,
        mode: &ZfpMode,
        geometry: &FieldGeometry,
        values: &[T],
        buffer: &mut [u64],
        write_header: bool,
    ) -> Result<usize, ZfpError>;

    /// Decompress header-less `encoded` bytes into `out`.
    ///
    /// Returns the number of bytes consumed, where `0` indicates failure.
    /// The number of bytes consumed may exceed `encoded.len()` if `encoded` is truncated, but the engine must not read beyond `encoded`.
    ///
    /// # Errors
    /// Returns an error if `out` does not match `geometry` or the stream or field cannot be created.
    fn decompress<T: ZfpElement>(
        &self,
        mode: &ZfpMode,
        geometry: &FieldGeometry,
        encoded: &[u8],
        out: &mut [T],
    ) -> Result<usize, ZfpError>;

    /// Decompress `encoded` bytes that start with a full zfp header into `out`.
    ///
    /// The stream parameters are taken from the header.
    /// Returns the number of bytes consumed (including the header), where `0` indicates failure.
    ///
    /// # Errors
    /// Returns an error if the header is invalid, the header does not match `T` and `geometry`, `out` does not match `geometry`, or the stream or field cannot be created.
    fn decompress_with_header<T: ZfpElement>(
        &self,
        geometry: &FieldGeometry,
        encoded: &[u8],
        out: &mut [T],
    ) -> Result<usize, ZfpError>;

    /// Read the full zfp header at the start of `encoded`.
    ///
    /// # Errors
    /// Returns [`ZfpError::InvalidHeader`] if `encoded` does not start with a valid header.
    fn read_header(&self, encoded: &[u8]) -> Result<ZfpHeader, ZfpError>;
}
