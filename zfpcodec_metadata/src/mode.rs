//! zfp compression modes.

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// The default rate (compressed bits per value) of [`ZfpParameters`].
pub const DEFAULT_RATE: f64 = 8.0;

/// The default precision (uncompressed bit planes) of [`ZfpParameters`].
pub const DEFAULT_PRECISION: u32 = 8;

/// The default absolute error tolerance of [`ZfpParameters`].
pub const DEFAULT_TOLERANCE: f64 = 0.001;

/// The zfp compression mode.
///
/// Only the parameter relevant to a mode is carried by it.
/// Parameters are forwarded to zfp without range checks.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Debug, Display)]
#[serde(tag = "mode", rename_all = "snake_case")]
#[display("{}", serde_json::to_string(self).unwrap_or_default())]
pub enum ZfpMode {
    /// Expert mode.
    ///
    /// See <https://zfp.readthedocs.io/en/release1.0.1/modes.html#expert-mode>.
    Expert {
        /// The minimum number of compressed bits used to represent a block.
        minbits: u32,
        /// The maximum number of bits used to represent a block.
        maxbits: u32,
        /// The maximum number of bit planes encoded.
        maxprec: u32,
        /// The smallest absolute bit plane number encoded (applies to floating point data only).
        minexp: i32,
    },
    /// Fixed rate mode.
    FixedRate {
        /// The number of compressed bits per value.
        rate: f64,
    },
    /// Fixed precision mode.
    FixedPrecision {
        /// The number of uncompressed bit planes encoded.
        precision: u32,
    },
    /// Fixed accuracy mode.
    FixedAccuracy {
        /// The absolute error tolerance.
        tolerance: f64,
    },
    /// Reversible (lossless) mode.
    Reversible,
}

/// Selects which of the [`ZfpParameters`] is consulted.
#[derive(Serialize, Deserialize, Clone, Copy, Eq, PartialEq, Hash, Debug, Display)]
#[serde(rename_all = "snake_case")]
pub enum CompressionMode {
    /// Consult [`ZfpParameters::rate`].
    #[display("fixed_rate")]
    FixedRate,
    /// Consult [`ZfpParameters::precision`].
    #[display("fixed_precision")]
    FixedPrecision,
    /// Consult [`ZfpParameters::tolerance`].
    #[display("fixed_accuracy")]
    FixedAccuracy,
}

/// The rate, precision, and tolerance a [`CompressionMode`] selects from.
///
/// The defaults are:
/// - `rate`: `8.0`
/// - `precision`: `8`
/// - `tolerance`: `0.001`
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Debug)]
#[serde(default)]
pub struct ZfpParameters {
    /// The number of compressed bits per value in fixed rate mode.
    pub rate: f64,
    /// The number of uncompressed bit planes in fixed precision mode.
    pub precision: u32,
    /// The absolute error tolerance in fixed accuracy mode.
    pub tolerance: f64,
}

impl Default for ZfpParameters {
    fn default() -> Self {
        Self {
            rate: DEFAULT_RATE,
            precision: DEFAULT_PRECISION,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl ZfpParameters {
    /// Set the rate.
    #[must_use]
    pub const fn with_rate(mut self, rate: f64) -> Self {
        self.rate = rate;
        self
    }

    /// Set the precision.
    #[must_use]
    pub const fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }

    /// Set the tolerance.
    #[must_use]
    pub const fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Returns the [`ZfpMode`] selected by `compression_mode`.
    ///
    /// The two parameters not selected are ignored.
    #[must_use]
    pub const fn mode(&self, compression_mode: CompressionMode) -> ZfpMode {
        match compression_mode {
            CompressionMode::FixedRate => ZfpMode::FixedRate { rate: self.rate },
            CompressionMode::FixedPrecision => ZfpMode::FixedPrecision {
                precision: self.precision,
            },
            CompressionMode::FixedAccuracy => ZfpMode::FixedAccuracy {
                tolerance: self.tolerance,
            },
        }
    }
}
