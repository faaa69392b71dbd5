use num_bigint::BigInt;
use serde::{Deserialize, Serialize};

/// Parameters of a `(k, n)` threshold scheme, as carried in the `"keys"`
/// record of a share file.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Threshold {
    #[serde(rename = "k")]
    pub threshold: usize, //k
    #[serde(rename = "n")]
    pub share_count: usize, //n
}

impl Threshold {
    pub fn new(threshold: usize, share_count: usize) -> Self {
        Threshold {
            threshold,
            share_count,
        }
    }

    /// Degree of the hidden polynomial.
    pub fn degree(&self) -> usize {
        self.threshold.saturating_sub(1)
    }
}

/// One point `(x, y)` on the hidden polynomial.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Share {
    pub x: BigInt,
    pub y: BigInt,
}

impl Share {
    pub fn new(x: BigInt, y: BigInt) -> Self {
        Share { x, y }
    }

    pub fn from_ints(x: i64, y: i64) -> Self {
        Share {
            x: BigInt::from(x),
            y: BigInt::from(y),
        }
    }
}

impl From<(i64, i64)> for Share {
    fn from((x, y): (i64, i64)) -> Self {
        Share::from_ints(x, y)
    }
}
