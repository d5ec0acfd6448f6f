//! Survey standards accepted by GGOutlier's `-standard` flag.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GgoutlierQaxError;

/// IHO SP44 / HIPP survey standard to check the grid against.
///
/// The string forms match what GGOutlier accepts on its command line and
/// what QAX presents in the `Standard` parameter option list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Standard {
    Order2,
    Order1b,
    #[default]
    Order1a,
    SpecialOrder,
    ExclusiveOrder,
    Hipp1,
    Hipp2,
    // "lowercase" would render this as "hipppassage"; GGOutlier and the
    // QAX option list both spell it with a single p
    #[serde(rename = "hippassage")]
    HippPassage,
}

impl Standard {
    /// All standards, in the order the QAX UI lists them.
    pub fn all() -> [Standard; 8] {
        [
            Standard::Order2,
            Standard::Order1b,
            Standard::Order1a,
            Standard::SpecialOrder,
            Standard::ExclusiveOrder,
            Standard::Hipp1,
            Standard::Hipp2,
            Standard::HippPassage,
        ]
    }

    /// The command-line form passed to GGOutlier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Standard::Order2 => "order2",
            Standard::Order1b => "order1b",
            Standard::Order1a => "order1a",
            Standard::SpecialOrder => "specialorder",
            Standard::ExclusiveOrder => "exclusiveorder",
            Standard::Hipp1 => "hipp1",
            Standard::Hipp2 => "hipp2",
            Standard::HippPassage => "hippassage",
        }
    }
}

impl fmt::Display for Standard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Standard {
    type Err = GgoutlierQaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Standard::all()
            .into_iter()
            .find(|std| std.as_str() == s)
            .ok_or_else(|| {
                GgoutlierQaxError::Check(format!("Unknown survey standard: '{}'", s))
            })
    }
}
