use std::{ffi::c_void, marker::PhantomData, ptr::NonNull};

use zfp_sys::{bitstream, stream_close, stream_open};

/// A `bitstream` over a word buffer borrowed for `'a`. Closed on drop.
pub(super) struct ZfpBitstream<'a> {
    stream: NonNull<bitstream>,
    phantom: PhantomData<&'a mut [u64]>,
}

impl Drop for ZfpBitstream<'_> {
    fn drop(&mut self) {
        unsafe {
            // SAFETY: the bitstream was opened by zfp and is closed once, which does not free the buffer
            stream_close(self.stream.as_ptr());
        }
    }
}

impl<'a> ZfpBitstream<'a> {
    /// Open a bitstream over `buffer`.
    ///
    /// zfp reads and writes whole words, so the buffer is a word slice.
    pub(super) fn new(buffer: &'a mut [u64]) -> Option<Self> {
        let stream = unsafe {
            // SAFETY: the buffer is valid for its length in bytes for 'a
            stream_open(
                buffer.as_mut_ptr().cast::<c_void>(),
                buffer.len() * size_of::<u64>(),
            )
        };
        NonNull::new(stream).map(|stream| Self {
            stream,
            phantom: PhantomData,
        })
    }

    pub(super) fn as_bitstream(&self) -> *mut bitstream {
        self.stream.as_ptr()
    }
}
