//! zfp codec configuration.

use derive_more::{Display, From};
use serde::{Deserialize, Serialize};

use crate::ZfpMode;

/// A wrapper to handle various versions of zfp codec configuration parameters.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug, Display, From)]
#[non_exhaustive]
#[serde(untagged)]
pub enum ZfpCodecConfiguration {
    /// Version 1.0.
    V1(ZfpCodecConfigurationV1),
}

/// zfp codec configuration parameters (version 1.0).
///
/// The mode is flattened into the configuration:
/// ```json
/// {
///     "mode": "fixed_accuracy",
///     "tolerance": 0.001,
///     "write_header": true
/// }
/// ```
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Debug, Display)]
#[display("{}", serde_json::to_string(self).unwrap_or_default())]
pub struct ZfpCodecConfigurationV1 {
    /// The zfp mode.
    #[serde(flatten)]
    pub mode: ZfpMode,
    /// Whether the full zfp header precedes the compressed stream.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub write_header: bool,
}

impl From<ZfpMode> for ZfpCodecConfigurationV1 {
    fn from(mode: ZfpMode) -> Self {
        Self {
            mode,
            write_header: false,
        }
    }
}

impl From<ZfpMode> for ZfpCodecConfiguration {
    fn from(mode: ZfpMode) -> Self {
        Self::V1(mode.into())
    }
}
