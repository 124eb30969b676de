//! zfp codec errors.

use thiserror::Error;

use crate::ZfpHeader;

/// A zfp codec error.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ZfpError {
    /// zfp produced no output.
    #[error("zfp compression failed")]
    CompressionFailure,
    /// zfp failed to decode the stream, or the stream was truncated.
    #[error("zfp decompression failed")]
    DecompressionFailure,
    /// A `zfp_field` could not be created.
    #[error("failed to create zfp field")]
    FieldCreate,
    /// A `zfp_stream` could not be created, or zfp rejected the stream parameters.
    #[error("failed to create zfp stream")]
    StreamCreate,
    /// A `bitstream` could not be created.
    #[error("failed to create zfp bitstream")]
    BitstreamCreate,
    /// The number of elements does not match the shape.
    #[error("the number of elements is {len}, expected {expected_len}")]
    InvalidNumberOfElements {
        /// The number of elements supplied.
        len: usize,
        /// The number of elements implied by the shape.
        expected_len: usize,
    },
    /// The shape has a zero extent, or too many elements to allocate.
    #[error("invalid shape {_0:?}")]
    InvalidShape(Vec<usize>),
    /// A compression buffer is smaller than the maximum compressed size.
    #[error("the compression buffer is {len} bytes, expected at least {expected_len}")]
    InvalidBufferSize {
        /// The size of the buffer in bytes.
        len: usize,
        /// The maximum compressed size in bytes.
        expected_len: usize,
    },
    /// An array is not contiguous in standard (row-major) layout.
    #[error("the array is not contiguous in standard (row-major) layout")]
    NonContiguous,
    /// The zfp header is missing or invalid.
    #[error("the zfp header is missing or invalid")]
    InvalidHeader,
    /// The zfp header does not describe the expected element type and shape.
    #[error("the zfp header describes {header:?}, expected {expected:?}")]
    HeaderMismatch {
        /// The header read from the stream.
        header: ZfpHeader,
        /// The expected header.
        expected: ZfpHeader,
    },
    /// The codec configuration is not supported.
    #[error("unsupported zfp codec configuration: {_0}")]
    UnsupportedConfiguration(String),
    /// The codec configuration could not be parsed.
    #[error(transparent)]
    InvalidConfiguration(#[from] serde_json::Error),
}
