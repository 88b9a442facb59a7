use crate::domain::card_brand::CardBrand;
use crate::domain::card_error::CardErrorType;
use crate::domain::payment_method::{CardParams, CvvTokenParams, CvvUpdateToken, PaymentMethod};
use crate::domain::ports::TokenizationService;
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Ledger {
    next_id: u64,
    payment_methods: Vec<PaymentMethod>,
    cvv_tokens: Vec<CvvUpdateToken>,
}

impl Ledger {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

/// A deterministic, in-process tokenization service.
///
/// Issues sequential tokens and keeps every one it has issued. Used by the
/// test harness and for testing anything that talks to a
/// [`TokenizationService`]. Clones share the same ledger.
#[derive(Debug, Default, Clone)]
pub struct InMemoryTokenizationService {
    ledger: Arc<RwLock<Ledger>>,
}

impl InMemoryTokenizationService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every payment method issued so far, oldest first.
    pub async fn payment_methods(&self) -> Vec<PaymentMethod> {
        self.ledger.read().await.payment_methods.clone()
    }

    pub async fn cvv_tokens(&self) -> Vec<CvvUpdateToken> {
        self.ledger.read().await.cvv_tokens.clone()
    }
}

/// Infers the card network from the leading digits.
pub fn detect_brand(number: &str) -> CardBrand {
    let digits: String = number.chars().filter(|c| !c.is_whitespace()).collect();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return CardBrand::Unknown;
    }

    let prefix = |len: usize| digits.get(..len).and_then(|p| p.parse::<u32>().ok());

    if digits.starts_with('4') {
        CardBrand::Visa
    } else if matches!(prefix(2), Some(34 | 37)) {
        CardBrand::AmericanExpress
    } else if matches!(prefix(2), Some(51..=55)) || matches!(prefix(4), Some(2221..=2720)) {
        CardBrand::MasterCard
    } else if digits.starts_with("6011") || digits.starts_with("65") {
        CardBrand::Discover
    } else {
        CardBrand::Unsupported
    }
}

#[async_trait]
impl TokenizationService for InMemoryTokenizationService {
    async fn create_payment_method(&self, params: CardParams) -> Result<PaymentMethod> {
        let brand = detect_brand(&params.number);
        if !brand.is_supported() {
            return Err(PaymentError::CardError {
                kind: CardErrorType::InvalidNumber,
                message: "Your card type is not supported".to_string(),
            });
        }

        let mut ledger = self.ledger.write().await;
        let method = PaymentMethod {
            id: format!("pm_{}", ledger.next_id()),
            last4: params.last4(),
            exp_month: params.exp_month,
            exp_year: params.exp_year,
            card_type: brand,
            postal_code: params.postal_code,
        };
        ledger.payment_methods.push(method.clone());
        Ok(method)
    }

    async fn create_cvv_update_token(&self, params: CvvTokenParams) -> Result<CvvUpdateToken> {
        if params.cvv.is_empty() {
            return Err(PaymentError::InvalidRequest("CVV is required".to_string()));
        }

        let mut ledger = self.ledger.write().await;
        let token = CvvUpdateToken {
            id: format!("cvv_{}", ledger.next_id()),
        };
        ledger.cvv_tokens.push(token.clone());
        Ok(token)
    }
}
