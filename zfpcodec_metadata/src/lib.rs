//! Configuration metadata for the [`zfpcodec`](https://docs.rs/zfpcodec) crate.
//!
//! This crate holds the serialisable description of how a zfp stream is configured:
//! - [`ZfpMode`]: the accuracy policy applied to the zfp stream,
//! - [`CompressionMode`] and [`ZfpParameters`]: the selector-plus-parameters form used by callers that pass all three parameters on every call, and
//! - [`ZfpCodecConfiguration`]: versioned codec configuration, including whether a zfp header is written.
//!
//! ## Licence
//! `zfpcodec_metadata` is licensed under either of
//!  - the Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> or
//!  - the MIT license <http://opensource.org/licenses/MIT>, at your option.

mod configuration;
mod mode;

pub use configuration::{ZfpCodecConfiguration, ZfpCodecConfigurationV1};
pub use mode::{
    CompressionMode, DEFAULT_PRECISION, DEFAULT_RATE, DEFAULT_TOLERANCE, ZfpMode, ZfpParameters,
};
