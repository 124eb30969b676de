//! `zfpcodec` is a safe wrapper of the [zfp](https://zfp.io/) compressed number format for 1D to 4D arrays of 32/64-bit floating point or integer data.
//!
//! Arrays are row-major slices with an explicit shape.
//! The accuracy policy is a [`ZfpMode`]:
//! - *fixed rate*: a constant number of compressed bits per value,
//! - *fixed precision*: a constant number of uncompressed bit planes,
//! - *fixed accuracy*: a constant absolute error tolerance,
//! - *reversible*: lossless, or
//! - *expert*: raw zfp stream parameters.
//!
//! Encoded bytes are exactly the zfp stream.
//! They do not record the array shape or the mode, which must be supplied again to decode, unless the codec writes a zfp header ([`ZfpCodec::with_write_header`]).
//!
//! ## Example
//! ```rust
//! use zfpcodec::{CompressionMode, ZfpParameters, compress, decompress};
//!
//! let input: Vec<f32> = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
//! let parameters = ZfpParameters::default().with_tolerance(0.001);
//! let compressed = compress(&input, &[2, 3], CompressionMode::FixedAccuracy, &parameters)?;
//!
//! let mut out = vec![0.0f32; 6];
//! decompress(&compressed, &mut out, &[2, 3], CompressionMode::FixedAccuracy, &parameters)?;
//! for (a, b) in input.iter().zip(&out) {
//!     assert!((a - b).abs() <= 0.001);
//! }
//! # Ok::<(), zfpcodec::ZfpError>(())
//! ```
//!
//! The same is available through a [`ZfpCodec`]:
//! ```rust
//! # use zfpcodec::ZfpCodec;
//! let codec = ZfpCodec::new_fixed_precision(16);
//! let input: Vec<f64> = (0..64).map(f64::from).collect();
//! let encoded = codec.encode(&input, &[4, 4, 4])?;
//! let decoded: Vec<f64> = codec.decode(&encoded, &[4, 4, 4])?;
//! assert_eq!(decoded.len(), 64);
//! # Ok::<(), zfpcodec::ZfpError>(())
//! ```
//!
//! ## Crate Features
//! #### Default
//! - `ndarray`: Adds [`ndarray`](https://docs.rs/ndarray/latest/ndarray/) compress/decompress functions.
//!
//! ## Logging
//! `zfpcodec` logs through the [`log`](https://docs.rs/log/latest/log/) crate.
//! A warning is logged if a shape with an unsupported number of dimensions is flattened.
//!
//! ## Licence
//! `zfpcodec` is licensed under either of
//!  - the Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> or
//!  - the MIT license <http://opensource.org/licenses/MIT>, at your option.
//!
//! Unless you explicitly state otherwise, any contribution intentionally submitted for inclusion in the work by you, as defined in the Apache-2.0 license, shall be dual licensed as above, without any additional terms or conditions.

#[cfg(feature = "ndarray")]
mod array;
mod codec;
mod element;
mod engine;
mod error;
mod functions;
mod geometry;
mod zfp;

#[cfg(feature = "ndarray")]
pub use array::{compress_array, decompress_into_array};
pub use codec::ZfpCodec;
pub use element::{ZfpElement, ZfpNativeType};
pub use engine::{ZfpEngine, ZfpHeader};
pub use error::ZfpError;
pub use functions::{compress, decompress};
pub use geometry::FieldGeometry;
pub use zfp::ZfpSysEngine;

pub use zfpcodec_metadata::{
    CompressionMode, ZfpCodecConfiguration, ZfpCodecConfigurationV1, ZfpMode, ZfpParameters,
};
