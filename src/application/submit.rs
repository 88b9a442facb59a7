use crate::application::card::MultiFieldCardEngine;
use crate::application::cvv::CvvFieldEngine;
use crate::domain::field::MessageKey;
use crate::domain::payment_method::{CardParams, CvvTokenParams, CvvUpdateToken, PaymentMethod};
use crate::domain::ports::TokenizationServiceBox;
use crate::error::{PaymentError, Result};
use tracing::{debug, warn};

/// Gatekeeper in front of the tokenization service.
///
/// Refuses to send input the engines already know is invalid, so the user
/// gets the local error message instead of a round trip to the processor.
pub struct PaymentSubmitter {
    service: TokenizationServiceBox,
}

impl PaymentSubmitter {
    pub fn new(service: TokenizationServiceBox) -> Self {
        Self { service }
    }

    pub async fn submit_card(
        &self,
        engine: &MultiFieldCardEngine,
        params: CardParams,
    ) -> Result<PaymentMethod> {
        if !engine.is_valid() {
            let mut message = engine.error_message(false);
            if message.is_empty() {
                message = engine.error_text().text(MessageKey::InvalidCardDetails);
            }
            warn!(%message, "card submission rejected");
            return Err(PaymentError::InvalidCardDetails(message));
        }

        debug!(?params, "creating payment method");
        self.service.create_payment_method(params).await
    }

    /// Forces the CVV field's error to surface before checking it.
    pub async fn submit_cvv(
        &self,
        engine: &mut CvvFieldEngine,
        cvv: &str,
    ) -> Result<CvvUpdateToken> {
        engine.editing_completed();

        if !engine.is_valid() {
            let message = engine.error_message(false);
            warn!(%message, "CVV submission rejected");
            return Err(PaymentError::InvalidCvv(message));
        }

        self.service
            .create_cvv_update_token(CvvTokenParams {
                cvv: cvv.to_string(),
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::card_brand::CardBrand;
    use crate::domain::field::{CardField, ErrorTextProvider};
    use crate::infrastructure::in_memory::InMemoryTokenizationService;
    use std::collections::HashSet;
    use std::sync::Arc;

    fn visa() -> CardParams {
        CardParams {
            number: "4242424242424242".to_string(),
            exp_month: 12,
            exp_year: 2030,
            cvc: "123".to_string(),
            postal_code: Some("55056".to_string()),
        }
    }

    #[tokio::test]
    async fn test_submit_valid_card() {
        let service = InMemoryTokenizationService::new();
        let submitter = PaymentSubmitter::new(Box::new(service.clone()));
        let mut engine = MultiFieldCardEngine::default();
        engine.on_input_changed(true, &HashSet::new());

        let method = submitter.submit_card(&engine, visa()).await.unwrap();

        assert_eq!(method.last4, "4242");
        assert_eq!(method.card_type, CardBrand::Visa);
        assert_eq!(service.payment_methods().await, vec![method]);
    }

    #[tokio::test]
    async fn test_submit_invalid_card_is_rejected_locally() {
        let service = InMemoryTokenizationService::new();
        let submitter = PaymentSubmitter::new(Box::new(service.clone()));
        let mut engine = MultiFieldCardEngine::default();
        engine.on_input_changed(false, &[CardField::Expiration].into_iter().collect());

        let result = submitter.submit_card(&engine, visa()).await;

        assert!(matches!(
            result,
            Err(PaymentError::InvalidCardDetails(ref msg))
                if msg == "Your card's expiration date is missing"
        ));
        assert!(service.payment_methods().await.is_empty());
    }

    #[tokio::test]
    async fn test_generic_message_without_custom_errors() {
        let submitter = PaymentSubmitter::new(Box::new(InMemoryTokenizationService::new()));
        let engine = MultiFieldCardEngine::new(false);

        let result = submitter.submit_card(&engine, visa()).await;

        assert!(matches!(
            result,
            Err(PaymentError::InvalidCardDetails(ref msg)) if msg == "Your card details are invalid"
        ));
    }

    #[tokio::test]
    async fn test_generic_message_uses_engine_error_text() {
        struct French;
        impl ErrorTextProvider for French {
            fn text(&self, key: MessageKey) -> String {
                match key {
                    MessageKey::InvalidCardDetails => "Les détails de votre carte sont invalides",
                    _ => "Erreur",
                }
                .to_string()
            }
        }

        let submitter = PaymentSubmitter::new(Box::new(InMemoryTokenizationService::new()));
        let engine = MultiFieldCardEngine::new(false).with_error_text(Arc::new(French));

        let result = submitter.submit_card(&engine, visa()).await;

        assert!(matches!(
            result,
            Err(PaymentError::InvalidCardDetails(ref msg))
                if msg == "Les détails de votre carte sont invalides"
        ));
    }

    #[tokio::test]
    async fn test_submit_cvv() {
        let submitter = PaymentSubmitter::new(Box::new(InMemoryTokenizationService::new()));
        let mut engine = CvvFieldEngine::new();
        engine.on_input_changed("123");

        let token = submitter.submit_cvv(&mut engine, "123").await.unwrap();
        assert_eq!(token.id, "cvv_1");
    }

    #[tokio::test]
    async fn test_submit_cvv_surfaces_error() {
        let submitter = PaymentSubmitter::new(Box::new(InMemoryTokenizationService::new()));
        let mut engine = CvvFieldEngine::new();

        let result = submitter.submit_cvv(&mut engine, "").await;

        assert!(matches!(
            result,
            Err(PaymentError::InvalidCvv(ref msg)) if msg == "Your card's security code is missing"
        ));
        assert!(engine.has_error_message(true));
    }
}
