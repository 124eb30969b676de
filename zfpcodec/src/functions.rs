//! Compression functions with per-call mode selection.

use zfpcodec_metadata::{CompressionMode, ZfpParameters};

use crate::{ZfpCodec, ZfpElement, ZfpError};

/// Compress a row-major array with `shape`.
///
/// `compression_mode` selects which of the `parameters` is used.
/// The returned bytes carry neither the shape nor the mode, which must be passed to [`decompress`] unchanged.
///
/// Shapes with 1 to 4 dimensions are compressed as fields of the same dimensionality.
/// Any other shape is compressed as a 1D field of all elements.
///
/// # Errors
/// Returns [`ZfpError::InvalidShape`] if `shape` has a zero extent, [`ZfpError::CompressionFailure`] if zfp produces no output, or another error if `input` does not match `shape`.
pub fn compress<T: ZfpElement>(
    input: &[T],
    shape: &[usize],
    compression_mode: CompressionMode,
    parameters: &ZfpParameters,
) -> Result<Vec<u8>, ZfpError> {
    ZfpCodec::from_compression_mode(compression_mode, parameters).encode(input, shape)
}

/// Decompress bytes produced by [`compress`] into a row-major array with `shape`.
///
/// The shape, `compression_mode`, and `parameters` must match those used to compress.
///
/// # Errors
/// Returns [`ZfpError::InvalidShape`] if `shape` has a zero extent, [`ZfpError::DecompressionFailure`] if zfp fails to decode or `compressed_bytes` is truncated, or another error if `out` does not match `shape`.
/// The contents of `out` are unspecified if an error is returned.
pub fn decompress<T: ZfpElement>(
    compressed_bytes: &[u8],
    out: &mut [T],
    shape: &[usize],
    compression_mode: CompressionMode,
    parameters: &ZfpParameters,
) -> Result<(), ZfpError> {
    ZfpCodec::from_compression_mode(compression_mode, parameters).decode_into(
        compressed_bytes,
        out,
        shape,
    )
}
