//! Jersey numbers and depth chart ranks.

use crate::error::{DepthChartError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Jersey number, unique within a team.
///
/// Displays with a leading `#`, the way depth charts print players:
///
/// ```rust
/// use depth_chart::PlayerNumber;
///
/// assert_eq!(PlayerNumber::new(12).to_string(), "#12");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerNumber(pub u32);

impl PlayerNumber {
    pub fn new(number: u32) -> Self {
        Self(number)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for PlayerNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl FromStr for PlayerNumber {
    type Err = DepthChartError;

    fn from_str(s: &str) -> Result<Self> {
        let digits = s.trim().trim_start_matches('#');
        Ok(Self(digits.parse()?))
    }
}

/// Zero-based depth at a position. Rank 0 is the starter; a larger rank
/// means a lower priority.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Rank(pub u32);

impl Rank {
    pub const STARTER: Rank = Rank(0);

    pub fn new(rank: u32) -> Self {
        Self(rank)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }

    /// The rank directly below this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }

    /// The rank directly above this one, saturating at the starter slot.
    pub fn prev(self) -> Self {
        Self(self.0.saturating_sub(1))
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Rank {
    type Err = DepthChartError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self(s.trim().parse()?))
    }
}
