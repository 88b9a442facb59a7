//! Application layer containing the card entry state machines.
//!
//! [`cvv::CvvFieldEngine`] drives a standalone CVV input,
//! [`card::MultiFieldCardEngine`] a full card form, and
//! [`submit::PaymentSubmitter`] guards the tokenization service with both.

pub mod card;
pub mod cvv;
pub mod session;
pub mod submit;
