/// The kinds of card error the tokenization service can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardErrorType {
    InvalidNumber,
    InvalidExpMonth,
    InvalidExpYear,
    InvalidCvc,
    IncorrectNumber,
    ExpiredCard,
    CardDeclined,
    IncorrectCvc,
    ProcessingError,
    IncorrectZip,
    UnknownCardError,
}

impl CardErrorType {
    /// Maps a processor error code onto a card error kind.
    ///
    /// Unrecognised or missing codes map to [`CardErrorType::UnknownCardError`].
    pub fn from_code(code: Option<&str>) -> Self {
        match code {
            Some("invalid_number") => CardErrorType::InvalidNumber,
            Some("invalid_expiry_month") => CardErrorType::InvalidExpMonth,
            Some("invalid_expiry_year") => CardErrorType::InvalidExpYear,
            Some("invalid_cvc") => CardErrorType::InvalidCvc,
            Some("incorrect_number") => CardErrorType::IncorrectNumber,
            Some("expired_card") => CardErrorType::ExpiredCard,
            Some("card_declined") => CardErrorType::CardDeclined,
            Some("incorrect_cvc") => CardErrorType::IncorrectCvc,
            Some("processing_error") => CardErrorType::ProcessingError,
            Some("incorrect_zip") => CardErrorType::IncorrectZip,
            _ => CardErrorType::UnknownCardError,
        }
    }
}
