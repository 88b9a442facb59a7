use std::fmt;
use std::str::FromStr;

/// The fields of a credit/debit card entry form.
///
/// Variants are declared in error-priority order: when several fields are in
/// error, the earliest one is the one reported to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CardField {
    CardNumber,
    Expiration,
    Cvc,
    PostalCode,
}

impl CardField {
    /// Every field, in error-priority order.
    pub const ALL: [CardField; 4] = [
        CardField::CardNumber,
        CardField::Expiration,
        CardField::Cvc,
        CardField::PostalCode,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CardField::CardNumber => "card_number",
            CardField::Expiration => "expiration",
            CardField::Cvc => "cvc",
            CardField::PostalCode => "postal_code",
        }
    }

    /// Looks up the message identifier for this field's current error.
    ///
    /// An empty field always reports the "missing" message. Otherwise the
    /// unsupported message wins if the field has one (only the card number
    /// does), falling back to the generic "invalid" message.
    pub fn error_key(&self, is_empty: bool, is_unsupported: bool) -> MessageKey {
        match (self, is_empty, is_unsupported) {
            (CardField::CardNumber, true, _) => MessageKey::EmptyCardNumber,
            (CardField::CardNumber, false, true) => MessageKey::UnsupportedCardType,
            (CardField::CardNumber, false, false) => MessageKey::InvalidCardNumber,
            (CardField::Expiration, true, _) => MessageKey::EmptyExpiration,
            (CardField::Expiration, false, _) => MessageKey::InvalidExpiration,
            (CardField::Cvc, true, _) => MessageKey::EmptyCvc,
            (CardField::Cvc, false, _) => MessageKey::InvalidCvc,
            (CardField::PostalCode, true, _) => MessageKey::EmptyPostalCode,
            (CardField::PostalCode, false, _) => MessageKey::InvalidPostalCode,
        }
    }

    /// Resolves this field's error text through `text`.
    pub fn error(
        &self,
        text: &dyn ErrorTextProvider,
        is_empty: bool,
        is_unsupported: bool,
    ) -> String {
        text.text(self.error_key(is_empty, is_unsupported))
    }
}

impl fmt::Display for CardField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CardField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "card_number" => Ok(CardField::CardNumber),
            "expiration" => Ok(CardField::Expiration),
            "cvc" => Ok(CardField::Cvc),
            "postal_code" => Ok(CardField::PostalCode),
            other => Err(format!("Unknown card field: {other}")),
        }
    }
}

/// Fixed identifiers for every user-facing field error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    EmptyCardNumber,
    InvalidCardNumber,
    UnsupportedCardType,
    EmptyExpiration,
    InvalidExpiration,
    EmptyCvc,
    InvalidCvc,
    EmptyPostalCode,
    InvalidPostalCode,
    EmptyCvv,
    IncompleteCvv,
    InvalidCardDetails,
}

/// Localized lookup of error text by message identifier.
pub trait ErrorTextProvider: Send + Sync {
    fn text(&self, key: MessageKey) -> String;
}

/// The built-in English error messages.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnglishErrorText;

impl ErrorTextProvider for EnglishErrorText {
    fn text(&self, key: MessageKey) -> String {
        let text = match key {
            MessageKey::EmptyCardNumber => "Your card's number is missing",
            MessageKey::InvalidCardNumber => "Your card's number is invalid",
            MessageKey::UnsupportedCardType => "Your card type is not supported",
            MessageKey::EmptyExpiration => "Your card's expiration date is missing",
            MessageKey::InvalidExpiration => "Your card's expiration date is invalid",
            MessageKey::EmptyCvc => "Your card's security code is missing",
            MessageKey::InvalidCvc => "Your card's security code is invalid",
            MessageKey::EmptyPostalCode => "Your ZIP/postal code is missing",
            MessageKey::InvalidPostalCode => "Your ZIP/postal code is invalid",
            MessageKey::EmptyCvv => "Your card's security code is missing",
            MessageKey::IncompleteCvv => "Your card's security code is incomplete",
            MessageKey::InvalidCardDetails => "Your card details are invalid",
        };
        text.to_string()
    }
}
