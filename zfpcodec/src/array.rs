//! [`ndarray`] support.

use ndarray::{ArrayView, ArrayViewMut, Dimension};
use zfpcodec_metadata::{CompressionMode, ZfpParameters};

use crate::{ZfpCodec, ZfpElement, ZfpError};

impl ZfpCodec {
    /// Encode an [`ndarray`] array.
    ///
    /// # Errors
    /// Returns [`ZfpError::NonContiguous`] if `input` is not in standard layout, otherwise see [`encode`](ZfpCodec::encode).
    pub fn encode_array<T: ZfpElement, D: Dimension>(
        &self,
        input: &ArrayView<'_, T, D>,
    ) -> Result<Vec<u8>, ZfpError> {
        let values = input.as_slice().ok_or(ZfpError::NonContiguous)?;
        self.encode(values, input.shape())
    }

    /// Decode into an [`ndarray`] array with the shape that was encoded.
    ///
    /// # Errors
    /// Returns [`ZfpError::NonContiguous`] if `out` is not in standard layout, otherwise see [`decode_into`](ZfpCodec::decode_into).
    pub fn decode_into_array<T: ZfpElement, D: Dimension>(
        &self,
        encoded: &[u8],
        mut out: ArrayViewMut<'_, T, D>,
    ) -> Result<(), ZfpError> {
        let shape = out.shape().to_vec();
        let values = out.as_slice_mut().ok_or(ZfpError::NonContiguous)?;
        self.decode_into(encoded, values, &shape)
    }
}

/// Compress an [`ndarray`] array.
///
/// See [`compress`](crate::compress).
///
/// # Errors
/// Returns [`ZfpError::NonContiguous`] if `input` is not in standard layout, otherwise see [`compress`](crate::compress).
pub fn compress_array<T: ZfpElement, D: Dimension>(
    input: &ArrayView<'_, T, D>,
    compression_mode: CompressionMode,
    parameters: &ZfpParameters,
) -> Result<Vec<u8>, ZfpError> {
    ZfpCodec::from_compression_mode(compression_mode, parameters).encode_array(input)
}

/// Decompress into an [`ndarray`] array with the shape that was compressed.
///
/// See [`decompress`](crate::decompress).
///
/// # Errors
/// Returns [`ZfpError::NonContiguous`] if `out` is not in standard layout, otherwise see [`decompress`](crate::decompress).
pub fn decompress_into_array<T: ZfpElement, D: Dimension>(
    compressed_bytes: &[u8],
    out: ArrayViewMut<'_, T, D>,
    compression_mode: CompressionMode,
    parameters: &ZfpParameters,
) -> Result<(), ZfpError> {
    ZfpCodec::from_compression_mode(compression_mode, parameters)
        .decode_into_array(compressed_bytes, out)
}
