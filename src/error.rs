use crate::domain::card_error::CardErrorType;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PaymentError {
    #[error("Card error ({kind:?}): {message}")]
    CardError { kind: CardErrorType, message: String },
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Rate limit exceeded: {0}")]
    RateLimit(String),
    #[error("API connection error: {0}")]
    ApiConnection(String),
    #[error("API error: {0}")]
    Api(String),
    #[error("Invalid card details: {0}")]
    InvalidCardDetails(String),
    #[error("Invalid CVV: {0}")]
    InvalidCvv(String),
    #[error("Invalid event: {0}")]
    InvalidEvent(String),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PaymentError>;
