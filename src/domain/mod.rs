//! Domain types shared by the card entry engines and the tokenization port.

pub mod card_brand;
pub mod card_error;
pub mod field;
pub mod field_state;
pub mod payment_method;
pub mod ports;
pub mod postal_code;
