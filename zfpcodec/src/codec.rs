//! The zfp codec.

use zfpcodec_metadata::{
    CompressionMode, ZfpCodecConfiguration, ZfpCodecConfigurationV1, ZfpMode, ZfpParameters,
};

use crate::{FieldGeometry, ZfpElement, ZfpEngine, ZfpError, ZfpHeader, ZfpSysEngine};

/// A `zfp` codec implementation.
///
/// The codec compresses row-major arrays of 1 to 4 dimensions.
/// Encoded bytes do not describe the array shape or the [`ZfpMode`] unless a header is written (see [`with_write_header`](ZfpCodec::with_write_header)), so an array must be decoded with the shape and mode it was encoded with.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZfpCodec {
    mode: ZfpMode,
    write_header: bool,
}

impl ZfpCodec {
    /// Create a new `zfp` codec in expert mode.
    #[must_use]
    pub const fn new_expert(minbits: u32, maxbits: u32, maxprec: u32, minexp: i32) -> Self {
        Self::new(ZfpMode::Expert {
            minbits,
            maxbits,
            maxprec,
            minexp,
        })
    }

    /// Create a new `zfp` codec in fixed rate mode.
    #[must_use]
    pub const fn new_fixed_rate(rate: f64) -> Self {
        Self::new(ZfpMode::FixedRate { rate })
    }

    /// Create a new `zfp` codec in fixed precision mode.
    #[must_use]
    pub const fn new_fixed_precision(precision: u32) -> Self {
        Self::new(ZfpMode::FixedPrecision { precision })
    }

    /// Create a new `zfp` codec in fixed accuracy mode.
    #[must_use]
    pub const fn new_fixed_accuracy(tolerance: f64) -> Self {
        Self::new(ZfpMode::FixedAccuracy { tolerance })
    }

    /// Create a new `zfp` codec in reversible mode.
    #[must_use]
    pub const fn new_reversible() -> Self {
        Self::new(ZfpMode::Reversible)
    }

    /// Create a new `zfp` codec with `mode`.
    #[must_use]
    pub const fn new(mode: ZfpMode) -> Self {
        Self {
            mode,
            write_header: false,
        }
    }

    /// Create a new `zfp` codec in the mode selected by `compression_mode` from `parameters`.
    #[must_use]
    pub const fn from_compression_mode(
        compression_mode: CompressionMode,
        parameters: &ZfpParameters,
    ) -> Self {
        Self::new(parameters.mode(compression_mode))
    }

    /// Create a new `zfp` codec from configuration.
    ///
    /// # Errors
    /// Returns an error if the configuration is not supported.
    pub fn new_with_configuration(
        configuration: &ZfpCodecConfiguration,
    ) -> Result<Self, ZfpError> {
        match configuration {
            ZfpCodecConfiguration::V1(configuration) => {
                Ok(Self::new(configuration.mode).with_write_header(configuration.write_header))
            }
            _ => Err(ZfpError::UnsupportedConfiguration(configuration.to_string())),
        }
    }

    /// Create a new `zfp` codec from JSON configuration.
    ///
    /// # Errors
    /// Returns an error if the JSON is not a valid or supported configuration.
    pub fn new_with_configuration_json(json: &str) -> Result<Self, ZfpError> {
        let configuration: ZfpCodecConfiguration = serde_json::from_str(json)?;
        Self::new_with_configuration(&configuration)
    }

    /// Returns the configuration of the codec.
    #[must_use]
    pub fn configuration(&self) -> ZfpCodecConfiguration {
        ZfpCodecConfiguration::V1(ZfpCodecConfigurationV1 {
            mode: self.mode,
            write_header: self.write_header,
        })
    }

    /// Returns the zfp mode.
    #[must_use]
    pub const fn mode(&self) -> ZfpMode {
        self.mode
    }

    /// Returns true if the codec writes and reads a zfp header.
    #[must_use]
    pub const fn write_header(&self) -> bool {
        self.write_header
    }

    /// Set whether to write the full zfp header.
    ///
    /// The header records the element type, the field extents, and the stream parameters.
    /// A codec that writes a header also expects one when decoding, and checks it against the destination.
    #[must_use]
    pub const fn with_write_header(mut self, write_header: bool) -> Self {
        self.write_header = write_header;
        self
    }

    /// Returns the maximum encoded size in bytes of an array with `shape`.
    ///
    /// # Errors
    /// Returns an error if the zfp stream or field cannot be created.
    pub fn encoded_size_bound<T: ZfpElement>(&self, shape: &[usize]) -> Result<usize, ZfpError> {
        ZfpSysEngine.maximum_size::<T>(&self.mode, &FieldGeometry::from_shape(shape))
    }

    /// Encode a row-major array with `shape`.
    ///
    /// # Errors
    /// Returns [`ZfpError::CompressionFailure`] if zfp produces no output, or another error if `values` does not match `shape` or zfp resources cannot be created.
    pub fn encode<T: ZfpElement>(
        &self,
        values: &[T],
        shape: &[usize],
    ) -> Result<Vec<u8>, ZfpError> {
        self.encode_with(&ZfpSysEngine, values, shape)
    }

    /// Encode a row-major array with `shape` using `engine`.
    ///
    /// # Errors
    /// See [`encode`](ZfpCodec::encode).
    pub fn encode_with<E: ZfpEngine, T: ZfpElement>(
        &self,
        engine: &E,
        values: &[T],
        shape: &[usize],
    ) -> Result<Vec<u8>, ZfpError> {
        let geometry = FieldGeometry::from_shape(shape);
        geometry.validate_len(values.len())?;

        let bufsize = engine.maximum_size::<T>(&self.mode, &geometry)?;
        let mut buffer = vec![0u64; bufsize.div_ceil(size_of::<u64>())];
        let size = engine.compress(&self.mode, &geometry, values, &mut buffer, self.write_header)?;

        let buffer: &[u8] = bytemuck::cast_slice(&buffer);
        if size == 0 || size > buffer.len() {
            log::debug!(
                "zfp compression of {} elements {geometry:?} in mode {} reported {size} bytes",
                values.len(),
                self.mode
            );
            return Err(ZfpError::CompressionFailure);
        }
        log::debug!(
            "zfp compressed {} elements {geometry:?} to {size} of at most {bufsize} bytes",
            values.len()
        );
        Ok(buffer[..size].to_vec())
    }

    /// Decode `encoded` bytes into a row-major array with `shape`.
    ///
    /// # Errors
    /// Returns [`ZfpError::DecompressionFailure`] if zfp fails to decode or the bytes are truncated, or another error if `out` does not match `shape` or zfp resources cannot be created.
    /// The contents of `out` are unspecified if an error is returned.
    pub fn decode_into<T: ZfpElement>(
        &self,
        encoded: &[u8],
        out: &mut [T],
        shape: &[usize],
    ) -> Result<(), ZfpError> {
        self.decode_into_with(&ZfpSysEngine, encoded, out, shape)
    }

    /// Decode `encoded` bytes into a row-major array with `shape` using `engine`.
    ///
    /// # Errors
    /// See [`decode_into`](ZfpCodec::decode_into).
    pub fn decode_into_with<E: ZfpEngine, T: ZfpElement>(
        &self,
        engine: &E,
        encoded: &[u8],
        out: &mut [T],
        shape: &[usize],
    ) -> Result<(), ZfpError> {
        let geometry = FieldGeometry::from_shape(shape);
        geometry.validate_len(out.len())?;

        let consumed = if self.write_header {
            engine.decompress_with_header(&geometry, encoded, out)?
        } else {
            engine.decompress(&self.mode, &geometry, encoded, out)?
        };
        validate_consumed(consumed, encoded.len())
    }

    /// Decode `encoded` bytes into a new row-major array with `shape`.
    ///
    /// # Errors
    /// Returns [`ZfpError::InvalidShape`] if `shape` has a zero extent or too many elements to allocate, otherwise see [`decode_into`](ZfpCodec::decode_into).
    pub fn decode<T: ZfpElement>(
        &self,
        encoded: &[u8],
        shape: &[usize],
    ) -> Result<Vec<T>, ZfpError> {
        let geometry = FieldGeometry::from_shape(shape);
        geometry.validate()?;
        let mut out = zeroed_vec(geometry.num_elements())
            .ok_or_else(|| ZfpError::InvalidShape(shape.to_vec()))?;
        self.decode_into(encoded, &mut out, shape)?;
        Ok(out)
    }

    /// Decode `encoded` bytes that start with a full zfp header, recovering the array shape.
    ///
    /// Returns the decoded elements and the row-major shape recorded in the header.
    /// The stream parameters are read from the header, so no codec is needed.
    ///
    /// # Errors
    /// Returns [`ZfpError::InvalidHeader`] or [`ZfpError::HeaderMismatch`] if the header is invalid, describes more blocks than `encoded` could hold, or is not for `T`, or [`ZfpError::DecompressionFailure`] if zfp fails to decode.
    pub fn decode_with_header<T: ZfpElement>(
        encoded: &[u8],
    ) -> Result<(Vec<T>, Vec<usize>), ZfpError> {
        decode_with_header_with(&ZfpSysEngine, encoded)
    }
}

fn decode_with_header_with<E: ZfpEngine, T: ZfpElement>(
    engine: &E,
    encoded: &[u8],
) -> Result<(Vec<T>, Vec<usize>), ZfpError> {
    let header = engine.read_header(encoded)?;
    if header.native_type != T::NATIVE_TYPE {
        return Err(ZfpError::HeaderMismatch {
            header,
            expected: ZfpHeader {
                native_type: T::NATIVE_TYPE,
                ..header
            },
        });
    }

    // zfp spends at least one bit on every block
    let num_blocks = header.geometry.num_blocks();
    if num_blocks > encoded.len().saturating_mul(8) {
        log::debug!(
            "zfp header describes {num_blocks} blocks {:?}, but only {} bytes were supplied",
            header.geometry,
            encoded.len()
        );
        return Err(ZfpError::InvalidHeader);
    }
    let mut out = zeroed_vec(header.geometry.num_elements()).ok_or(ZfpError::InvalidHeader)?;
    let consumed = engine.decompress_with_header(&header.geometry, encoded, &mut out)?;
    validate_consumed(consumed, encoded.len())?;
    Ok((out, header.geometry.shape()))
}

/// Allocate `len` zeroed elements, or return [`None`] if they would exceed the maximum allocation size.
fn zeroed_vec<T: ZfpElement>(len: usize) -> Option<Vec<T>> {
    len.checked_mul(size_of::<T>())
        .filter(|&bytes| bytes <= isize::MAX.unsigned_abs())
        .map(|_| vec![T::zeroed(); len])
}

fn validate_consumed(consumed: usize, len: usize) -> Result<(), ZfpError> {
    if consumed == 0 {
        log::debug!("zfp decompression reported failure");
        Err(ZfpError::DecompressionFailure)
    } else if consumed > len {
        log::debug!("zfp decompression consumed {consumed} bytes, but only {len} were supplied");
        Err(ZfpError::DecompressionFailure)
    } else {
        Ok(())
    }
}
