//! Loader for JSON share files.
//!
//! A share file carries the scheme parameters under `"keys"` and one entry per
//! point, keyed by the decimal `x` coordinate:
//!
//! ```json
//! {
//!     "keys": { "n": 4, "k": 3 },
//!     "1": { "base": "10", "value": "4" },
//!     "2": { "base": "2", "value": "111" }
//! }
//! ```
//!
//! Each `value` is the `y` coordinate written in `base` (2 to 36).

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use num_bigint::BigInt;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{RecoveryError, Result};
use crate::lagrange::reconstruct_secret;
use crate::share::{Share, Threshold};

pub const MIN_RADIX: u32 = 2;
pub const MAX_RADIX: u32 = 36;

/// A base given either as a JSON string (`"16"`) or a number (`16`).
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Radix {
    Number(u64),
    Text(String),
}

impl Radix {
    pub fn parse(&self) -> Result<u32> {
        let radix = match self {
            Radix::Number(n) => u32::try_from(*n).ok(),
            Radix::Text(text) => text.trim().parse::<u32>().ok(),
        };
        match radix {
            Some(r) if (MIN_RADIX..=MAX_RADIX).contains(&r) => Ok(r),
            _ => Err(RecoveryError::InvalidBase(self.to_string())),
        }
    }
}

impl std::fmt::Display for Radix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Radix::Number(n) => write!(f, "{}", n),
            Radix::Text(text) => write!(f, "{}", text),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct EncodedValue {
    pub base: Radix,
    pub value: String,
}

impl EncodedValue {
    pub fn decode(&self) -> Result<BigInt> {
        decode_value(self.base.parse()?, &self.value)
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct ShareFile {
    keys: Threshold,
    #[serde(flatten)]
    points: BTreeMap<String, EncodedValue>,
}

impl ShareFile {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|source| RecoveryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn threshold(&self) -> Threshold {
        self.keys
    }

    /// Decodes every point in the file, sorted by ascending `x`.
    pub fn shares(&self) -> Result<Vec<Share>> {
        if self.points.len() != self.keys.share_count {
            warn!(
                declared = self.keys.share_count,
                found = self.points.len(),
                "share count does not match the keys record"
            );
        }

        let mut shares = self
            .points
            .iter()
            .map(|(key, encoded)| {
                let x = parse_digits(key.trim(), 10)
                    .ok_or_else(|| RecoveryError::InvalidCoordinate(key.clone()))?;
                let y = encoded.decode()?;
                debug!(%x, base = %encoded.base, "decoded share");
                Ok(Share::new(x, y))
            })
            .collect::<Result<Vec<Share>>>()?;

        shares.sort_by(|a, b| a.x.cmp(&b.x));
        Ok(shares)
    }

    /// The `k` shares with the smallest `x`, in ascending order.
    pub fn select_shares(&self) -> Result<Vec<Share>> {
        let k = self.keys.threshold;
        let mut shares = self.shares()?;
        if shares.len() < k {
            return Err(RecoveryError::InsufficientPoints {
                needed: k,
                available: shares.len(),
            });
        }
        shares.truncate(k);
        Ok(shares)
    }

    pub fn recover_secret(&self) -> Result<BigInt> {
        let shares = self.select_shares()?;
        reconstruct_secret(&shares, self.keys.threshold)
    }
}

/// Parses `digits` as a big integer written in `radix`.
///
/// Letters are case-insensitive and a leading sign is allowed.
pub fn decode_value(radix: u32, digits: &str) -> Result<BigInt> {
    if !(MIN_RADIX..=MAX_RADIX).contains(&radix) {
        return Err(RecoveryError::InvalidBase(radix.to_string()));
    }
    parse_digits(digits.trim(), radix).ok_or_else(|| RecoveryError::InvalidDigits {
        base: radix,
        value: digits.to_string(),
    })
}

// num-bigint also takes `_` separators, which share files must not contain
fn parse_digits(text: &str, radix: u32) -> Option<BigInt> {
    let unsigned = text.strip_prefix(['-', '+']).unwrap_or(text);
    if unsigned.is_empty() || !unsigned.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    BigInt::parse_bytes(text.as_bytes(), radix)
}
