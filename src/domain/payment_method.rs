use super::card_brand::CardBrand;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw card values handed to the tokenization service.
#[derive(Clone, PartialEq, Default)]
pub struct CardParams {
    pub number: String,
    pub exp_month: u8,
    pub exp_year: u16,
    pub cvc: String,
    pub postal_code: Option<String>,
}

impl CardParams {
    pub fn last4(&self) -> String {
        let digits: Vec<char> = self.number.chars().filter(char::is_ascii_digit).collect();
        digits[digits.len().saturating_sub(4)..].iter().collect()
    }
}

// Card number and CVC never reach logs.
impl fmt::Debug for CardParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardParams")
            .field("last4", &self.last4())
            .field("exp_month", &self.exp_month)
            .field("exp_year", &self.exp_year)
            .field("postal_code", &self.postal_code)
            .finish_non_exhaustive()
    }
}

/// A CVV re-entered for an already stored card.
#[derive(Clone, PartialEq, Default)]
pub struct CvvTokenParams {
    pub cvv: String,
}

impl fmt::Debug for CvvTokenParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CvvTokenParams").finish_non_exhaustive()
    }
}

/// A tokenized card, ready to be submitted with a basket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentMethod {
    /// The payment method token.
    pub id: String,
    pub last4: String,
    pub exp_month: u8,
    pub exp_year: u16,
    pub card_type: CardBrand,
    pub postal_code: Option<String>,
}

/// A tokenized CVV for an already stored card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CvvUpdateToken {
    pub id: String,
}
