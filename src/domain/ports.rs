use super::payment_method::{CardParams, CvvTokenParams, CvvUpdateToken, PaymentMethod};
use crate::error::Result;
use async_trait::async_trait;

/// The external service that turns raw card values into payment tokens.
///
/// Failures come back as typed [`PaymentError`](crate::error::PaymentError)
/// variants: card errors, invalid requests, rate limiting, connection
/// problems or generic API failures.
#[async_trait]
pub trait TokenizationService: Send + Sync {
    async fn create_payment_method(&self, params: CardParams) -> Result<PaymentMethod>;
    async fn create_cvv_update_token(&self, params: CvvTokenParams) -> Result<CvvUpdateToken>;
}

pub type TokenizationServiceBox = Box<dyn TokenizationService>;
