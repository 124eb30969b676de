//! The zfp engine backed by the zfp C library.

mod zfp_bitstream;
mod zfp_field;
mod zfp_stream;

use zfp_sys::{ZFP_HEADER_FULL, zfp_compress, zfp_decompress, zfp_read_header, zfp_write_header};

use self::zfp_bitstream::ZfpBitstream;
use self::zfp_field::ZfpField;
use self::zfp_stream::ZfpStream;
use crate::{FieldGeometry, ZfpElement, ZfpEngine, ZfpError, ZfpHeader, ZfpMode};

/// Bytes read when inspecting a header, which is at most 148 bits.
const HEADER_SCRATCH_BYTES: usize = 32;

/// The zfp engine backed by the zfp C library through [`zfp_sys`].
///
/// Every call opens its own stream, field, and bitstream, and closes them before returning.
/// Encoded bytes are copied into a zero-padded buffer sized to the maximum compressed size before decompression, so zfp never reads beyond the bytes it is given.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZfpSysEngine;

/// Copy `bytes` into a zeroed word buffer of at least `min_len` bytes.
fn padded_words(bytes: &[u8], min_len: usize) -> Vec<u64> {
    let len = bytes.len().max(min_len);
    let mut words = vec![0u64; len.div_ceil(size_of::<u64>())];
    bytemuck::cast_slice_mut::<u64, u8>(&mut words)[..bytes.len()].copy_from_slice(bytes);
    words
}

/// Read the header at the start of `encoded`.
///
/// Returns the header and the maximum compressed size of a stream with the header's parameters.
fn inspect_header(encoded: &[u8]) -> Result<(ZfpHeader, usize), ZfpError> {
    let mut scratch = padded_words(
        &encoded[..encoded.len().min(HEADER_SCRATCH_BYTES)],
        HEADER_SCRATCH_BYTES,
    );
    let bitstream = ZfpBitstream::new(&mut scratch).ok_or(ZfpError::BitstreamCreate)?;
    let mut stream = ZfpStream::open().ok_or(ZfpError::StreamCreate)?;
    stream.set_bit_stream(&bitstream);
    let field = ZfpField::alloc().ok_or(ZfpError::FieldCreate)?;
    let bits = unsafe {
        // SAFETY: the stream is bound to a valid bitstream, and the field is valid
        zfp_read_header(stream.as_zfp_stream(), field.as_zfp_field(), ZFP_HEADER_FULL)
    };
    if bits == 0 {
        return Err(ZfpError::InvalidHeader);
    }
    let header = ZfpHeader {
        native_type: field.native_type().ok_or(ZfpError::InvalidHeader)?,
        geometry: field.geometry().ok_or(ZfpError::InvalidHeader)?,
    };
    Ok((header, stream.maximum_size(&field)))
}

impl ZfpEngine for ZfpSysEngine {
    fn maximum_size<T: ZfpElement>(
        &self,
        mode: &ZfpMode,
        geometry: &FieldGeometry,
    ) -> Result<usize, ZfpError> {
        geometry.validate()?;
        let zfp_type = T::NATIVE_TYPE.to_sys();
        let stream = ZfpStream::new(mode, zfp_type).ok_or(ZfpError::StreamCreate)?;
        let field = unsafe {
            // SAFETY: the field is only used to compute the maximum size
            ZfpField::new_empty(zfp_type, geometry)
        }
        .ok_or(ZfpError::FieldCreate)?;
        Ok(stream.maximum_size(&field))
    }

    fn compress<T: ZfpElement>(
        &self,
        mode: &ZfpMode,
        geometry: &FieldGeometry,
        values: &[T],
        buffer: &mut [u64],
        write_header: bool,
    ) -> Result<usize, ZfpError> {
        geometry.validate_len(values.len())?;
        let mut stream =
            ZfpStream::new(mode, T::NATIVE_TYPE.to_sys()).ok_or(ZfpError::StreamCreate)?;
        let field = ZfpField::new_readonly(values, geometry).ok_or(ZfpError::FieldCreate)?;

        let expected_len = stream.maximum_size(&field);
        let len = buffer.len() * size_of::<u64>();
        if len < expected_len {
            return Err(ZfpError::InvalidBufferSize { len, expected_len });
        }

        let bitstream = ZfpBitstream::new(buffer).ok_or(ZfpError::BitstreamCreate)?;
        stream.set_bit_stream(&bitstream);
        if write_header {
            let bits = unsafe {
                // SAFETY: zfp stream and field are valid
                zfp_write_header(stream.as_zfp_stream(), field.as_zfp_field(), ZFP_HEADER_FULL)
            };
            if bits == 0 {
                return Ok(0);
            }
        }

        let size = unsafe {
            // SAFETY: zfp stream and field are valid, and the bitstream holds the maximum compressed size
            zfp_compress(stream.as_zfp_stream(), field.as_zfp_field())
        };
        Ok(size)
    }

    fn decompress<T: ZfpElement>(
        &self,
        mode: &ZfpMode,
        geometry: &FieldGeometry,
        encoded: &[u8],
        out: &mut [T],
    ) -> Result<usize, ZfpError> {
        geometry.validate_len(out.len())?;
        let mut stream =
            ZfpStream::new(mode, T::NATIVE_TYPE.to_sys()).ok_or(ZfpError::StreamCreate)?;
        let field = ZfpField::new(out, geometry).ok_or(ZfpError::FieldCreate)?;

        // One extra word so a stream that ends on a word boundary never reads unowned memory
        let mut words = padded_words(encoded, stream.maximum_size(&field) + size_of::<u64>());
        let bitstream = ZfpBitstream::new(&mut words).ok_or(ZfpError::BitstreamCreate)?;
        stream.set_bit_stream(&bitstream);

        let size = unsafe {
            // SAFETY: zfp stream and field are valid, and the bitstream holds the maximum compressed size
            zfp_decompress(stream.as_zfp_stream(), field.as_zfp_field())
        };
        Ok(size)
    }

    fn decompress_with_header<T: ZfpElement>(
        &self,
        geometry: &FieldGeometry,
        encoded: &[u8],
        out: &mut [T],
    ) -> Result<usize, ZfpError> {
        geometry.validate_len(out.len())?;
        let (header, maximum_size) = inspect_header(encoded)?;
        let expected = ZfpHeader {
            native_type: T::NATIVE_TYPE,
            geometry: *geometry,
        };
        if header != expected {
            return Err(ZfpError::HeaderMismatch { header, expected });
        }

        let mut words = padded_words(encoded, maximum_size + size_of::<u64>());
        let bitstream = ZfpBitstream::new(&mut words).ok_or(ZfpError::BitstreamCreate)?;
        let mut stream = ZfpStream::open().ok_or(ZfpError::StreamCreate)?;
        stream.set_bit_stream(&bitstream);
        let field = ZfpField::alloc().ok_or(ZfpError::FieldCreate)?;
        let bits = unsafe {
            // SAFETY: the stream is bound to a valid bitstream, and the field is valid
            zfp_read_header(stream.as_zfp_stream(), field.as_zfp_field(), ZFP_HEADER_FULL)
        };
        if bits == 0 {
            return Err(ZfpError::InvalidHeader);
        }
        let field = field.with_data(out).ok_or(ZfpError::InvalidHeader)?;

        let size = unsafe {
            // SAFETY: zfp stream and field are valid, and the bitstream holds the maximum compressed size
            zfp_decompress(stream.as_zfp_stream(), field.as_zfp_field())
        };
        Ok(size)
    }

    fn read_header(&self, encoded: &[u8]) -> Result<ZfpHeader, ZfpError> {
        inspect_header(encoded).map(|(header, _)| header)
    }
}
