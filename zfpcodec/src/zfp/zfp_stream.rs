use std::ptr::NonNull;

use zfp_sys::{
    zfp_stream, zfp_stream_close, zfp_stream_maximum_size, zfp_stream_open, zfp_stream_rewind,
    zfp_stream_set_accuracy, zfp_stream_set_bit_stream, zfp_stream_set_params,
    zfp_stream_set_precision, zfp_stream_set_rate, zfp_stream_set_reversible, zfp_type,
};

use super::{zfp_bitstream::ZfpBitstream, zfp_field::ZfpField};
use crate::ZfpMode;

/// A `zfp_stream`. Closed on drop.
///
/// The stream does not own the bitstream it is bound to.
pub(super) struct ZfpStream {
    zfp: NonNull<zfp_stream>,
}

impl Drop for ZfpStream {
    fn drop(&mut self) {
        unsafe {
            // SAFETY: the stream was opened by zfp and is closed once, which does not touch its bitstream
            zfp_stream_close(self.zfp.as_ptr());
        }
    }
}

impl ZfpStream {
    /// Open a stream with default parameters and no bitstream.
    pub(super) fn open() -> Option<Self> {
        let zfp = unsafe {
            // SAFETY: a null bitstream is permitted, and is set before use
            zfp_stream_open(std::ptr::null_mut())
        };
        NonNull::new(zfp).map(|zfp| Self { zfp })
    }

    /// Open a stream configured for `mode`.
    ///
    /// Fixed rate mode uses a one-dimensional rate with no word alignment of blocks, for any field dimensionality.
    ///
    /// Returns [`None`] if the stream cannot be opened, or zfp rejects the expert mode parameters.
    pub(super) fn new(mode: &ZfpMode, zfp_type: zfp_type) -> Option<Self> {
        let stream = Self::open()?;
        let zfp = stream.as_zfp_stream();
        // SAFETY: zfp is a valid stream
        match *mode {
            ZfpMode::Expert {
                minbits,
                maxbits,
                maxprec,
                minexp,
            } => {
                let valid =
                    unsafe { zfp_stream_set_params(zfp, minbits, maxbits, maxprec, minexp) };
                if valid == 0 {
                    return None;
                }
            }
            ZfpMode::FixedRate { rate } => {
                unsafe { zfp_stream_set_rate(zfp, rate, zfp_type, 1, 0) };
            }
            ZfpMode::FixedPrecision { precision } => {
                unsafe { zfp_stream_set_precision(zfp, precision) };
            }
            ZfpMode::FixedAccuracy { tolerance } => {
                unsafe { zfp_stream_set_accuracy(zfp, tolerance) };
            }
            ZfpMode::Reversible => {
                unsafe { zfp_stream_set_reversible(zfp) };
            }
        }
        Some(stream)
    }

    pub(super) fn as_zfp_stream(&self) -> *mut zfp_stream {
        self.zfp.as_ptr()
    }

    /// Bind `bitstream` and rewind to its start.
    ///
    /// The bitstream must outlive any use of this stream that reads or writes bits.
    pub(super) fn set_bit_stream(&mut self, bitstream: &ZfpBitstream<'_>) {
        unsafe {
            // SAFETY: the stream and bitstream are valid
            zfp_stream_set_bit_stream(self.zfp.as_ptr(), bitstream.as_bitstream());
            zfp_stream_rewind(self.zfp.as_ptr());
        }
    }

    /// Returns the maximum compressed size in bytes of `field`, including a full header.
    pub(super) fn maximum_size(&self, field: &ZfpField<'_>) -> usize {
        unsafe {
            // SAFETY: zfp_stream_maximum_size does not read field data, or the bitstream
            zfp_stream_maximum_size(self.zfp.as_ptr(), field.as_zfp_field())
        }
    }
}
