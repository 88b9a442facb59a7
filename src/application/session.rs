use crate::application::card::MultiFieldCardEngine;
use crate::application::cvv::CvvFieldEngine;
use crate::application::submit::PaymentSubmitter;
use crate::config::CardFormConfig;
use crate::domain::card_brand::CardBrand;
use crate::domain::field::CardField;
use crate::domain::field_state::FieldState;
use crate::domain::payment_method::CardParams;
use crate::error::{PaymentError, Result};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Name of the lone field in a CVV form.
pub const CVV_FIELD: &str = "cvv";

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Text,
    Focus,
    Blur,
    Widget,
    Brand,
    Complete,
    Reset,
}

/// A single UI event, as recorded by the harness.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct FieldEvent {
    pub event: EventKind,
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
}

enum Form {
    Card {
        engine: MultiFieldCardEngine,
        values: HashMap<CardField, String>,
    },
    Cvv {
        engine: CvvFieldEngine,
        value: String,
    },
}

/// Replays UI events against one of the engines and remembers the text
/// entered so the form can be submitted afterwards.
pub struct FormSession {
    form: Form,
    ignore_unedited_field_errors: bool,
}

impl FormSession {
    pub fn card(config: &CardFormConfig) -> Self {
        Self {
            form: Form::Card {
                engine: MultiFieldCardEngine::with_config(config),
                values: HashMap::new(),
            },
            ignore_unedited_field_errors: config.ignore_unedited_field_errors,
        }
    }

    pub fn cvv(config: &CardFormConfig) -> Self {
        Self {
            form: Form::Cvv {
                engine: CvvFieldEngine::new(),
                value: String::new(),
            },
            ignore_unedited_field_errors: config.ignore_unedited_field_errors,
        }
    }

    pub fn apply(&mut self, event: FieldEvent) -> Result<()> {
        debug!(kind = ?event.event, field = ?event.field, "applying event");
        let text = event.value.unwrap_or_default();

        match &mut self.form {
            Form::Card { engine, values } => match event.event {
                EventKind::Text => {
                    let field = parse_field(event.field.as_deref())?;
                    engine.on_field_text_changed(field, &text);
                    values.insert(field, text);
                }
                EventKind::Focus => engine.on_focus_changed(parse_field(event.field.as_deref())?),
                EventKind::Blur => engine.clear_focus(),
                EventKind::Widget => {
                    let widget_valid = parse_validity(&text)?;
                    let invalid_fields = parse_field_set(event.field.as_deref())?;
                    engine.on_input_changed(widget_valid, &invalid_fields);
                }
                EventKind::Brand => {
                    let brand = text.parse::<CardBrand>().map_err(PaymentError::InvalidEvent)?;
                    engine.set_card_brand(brand);
                }
                EventKind::Complete => {
                    return Err(PaymentError::InvalidEvent(
                        "complete is only supported by the CVV form".to_string(),
                    ));
                }
                EventKind::Reset => {
                    engine.reset();
                    values.clear();
                }
            },
            Form::Cvv { engine, value } => {
                check_cvv_field(event.field.as_deref())?;
                match event.event {
                    EventKind::Text => {
                        engine.on_input_changed(&text);
                        *value = text;
                    }
                    EventKind::Focus => engine.on_focus_changed(true),
                    EventKind::Blur => engine.on_focus_changed(false),
                    EventKind::Complete => engine.editing_completed(),
                    EventKind::Reset => {
                        engine.reset();
                        value.clear();
                    }
                    EventKind::Widget | EventKind::Brand => {
                        return Err(PaymentError::InvalidEvent(format!(
                            "{:?} is only supported by the card form",
                            event.event
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    /// Field names paired with their state, in display order.
    pub fn states(&self) -> Vec<(String, FieldState)> {
        match &self.form {
            Form::Card { engine, .. } => engine
                .field_states()
                .iter()
                .map(|(field, state)| (field.to_string(), *state))
                .collect(),
            Form::Cvv { engine, .. } => vec![(CVV_FIELD.to_string(), *engine.field_state())],
        }
    }

    pub fn is_valid(&self) -> bool {
        match &self.form {
            Form::Card { engine, .. } => engine.is_valid(),
            Form::Cvv { engine, .. } => engine.is_valid(),
        }
    }

    pub fn error_message(&self) -> String {
        match &self.form {
            Form::Card { engine, .. } => engine.error_message(self.ignore_unedited_field_errors),
            Form::Cvv { engine, .. } => engine.error_message(self.ignore_unedited_field_errors),
        }
    }

    /// Submits the entered values and returns the issued token id.
    pub async fn submit(&mut self, submitter: &PaymentSubmitter) -> Result<String> {
        match &mut self.form {
            Form::Card { engine, values } => {
                let params = card_params(values);
                let method = submitter.submit_card(engine, params).await?;
                Ok(method.id)
            }
            Form::Cvv { engine, value } => {
                let token = submitter.submit_cvv(engine, value).await?;
                Ok(token.id)
            }
        }
    }
}

fn parse_field(name: Option<&str>) -> Result<CardField> {
    name.ok_or_else(|| PaymentError::InvalidEvent("missing field".to_string()))?
        .parse::<CardField>()
        .map_err(PaymentError::InvalidEvent)
}

/// CVV events may omit the field, but must not name a card field.
fn check_cvv_field(name: Option<&str>) -> Result<()> {
    match name.map(str::trim) {
        None | Some("") | Some(CVV_FIELD) => Ok(()),
        Some(other) => Err(PaymentError::InvalidEvent(format!("Unknown CVV field: {other}"))),
    }
}

fn parse_field_set(names: Option<&str>) -> Result<HashSet<CardField>> {
    names
        .unwrap_or_default()
        .split('|')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| name.parse::<CardField>().map_err(PaymentError::InvalidEvent))
        .collect()
}

fn parse_validity(value: &str) -> Result<bool> {
    match value.trim() {
        "valid" => Ok(true),
        "invalid" => Ok(false),
        other => Err(PaymentError::InvalidEvent(format!(
            "widget value must be valid or invalid, got {other:?}"
        ))),
    }
}

/// Builds card params from the entered text. The expiration is `MM/YY`;
/// anything unparseable is left as zero for the service to reject.
fn card_params(values: &HashMap<CardField, String>) -> CardParams {
    let value = |field: CardField| values.get(&field).cloned().unwrap_or_default();

    let expiration = value(CardField::Expiration);
    let (month, year) = expiration.split_once('/').unwrap_or_default();
    let exp_month = month.trim().parse::<u8>().unwrap_or(0);
    let exp_year = match year.trim().parse::<u16>() {
        Ok(year) if year < 100 => 2000 + year,
        Ok(year) => year,
        Err(_) => 0,
    };

    let postal_code = Some(value(CardField::PostalCode)).filter(|code| !code.is_empty());

    CardParams {
        number: value(CardField::CardNumber),
        exp_month,
        exp_year,
        cvc: value(CardField::Cvc),
        postal_code,
    }
}
