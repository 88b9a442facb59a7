use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Card networks recognised when tokenizing a card.
///
/// `description` is the value the ordering API expects for its `cardtype`
/// parameter. Submitting a basket with [`CardBrand::Unknown`] will fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CardBrand {
    Visa,
    AmericanExpress,
    Discover,
    MasterCard,
    /// A brand the widget recognised but payments are not accepted for
    Unsupported,
    #[default]
    Unknown,
}

impl CardBrand {
    pub fn description(&self) -> &'static str {
        match self {
            CardBrand::Visa => "Visa",
            CardBrand::AmericanExpress => "Amex",
            CardBrand::Discover => "Discover",
            CardBrand::MasterCard => "Mastercard",
            CardBrand::Unsupported => "Unsupported",
            CardBrand::Unknown => "Unknown",
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, CardBrand::Unsupported | CardBrand::Unknown)
    }
}

impl fmt::Display for CardBrand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

impl FromStr for CardBrand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "visa" => Ok(CardBrand::Visa),
            "amex" | "americanexpress" => Ok(CardBrand::AmericanExpress),
            "discover" => Ok(CardBrand::Discover),
            "mastercard" => Ok(CardBrand::MasterCard),
            "unsupported" => Ok(CardBrand::Unsupported),
            "unknown" => Ok(CardBrand::Unknown),
            other => Err(format!("Unknown card brand: {other}")),
        }
    }
}
