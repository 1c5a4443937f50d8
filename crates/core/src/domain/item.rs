// Item Domain Model

use rand::Rng;
use std::fmt;

/// Exclusive upper bound of generated item values
pub const ITEM_VALUE_UPPER_BOUND: u32 = 100;

/// Opaque value moved through the pipeline
///
/// Produced as the decimal text of an integer in `[0, 100)`. Items carry no
/// identity beyond their value and are never mutated once created.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Item(String);

impl Item {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Generate a fresh item from the caller's own random source
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(rng.gen_range(0..ITEM_VALUE_UPPER_BOUND).to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Item {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
