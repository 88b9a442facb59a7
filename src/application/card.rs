use crate::application::cvv::ValidStateChangedListener;
use crate::config::CardFormConfig;
use crate::domain::card_brand::CardBrand;
use crate::domain::field::{CardField, EnglishErrorText, ErrorTextProvider};
use crate::domain::field_state::FieldState;
use crate::domain::postal_code::is_valid_postal_code;
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Called when the postal code field receives a well-formed US or CA code.
pub type PostalCodeValidListener = Box<dyn FnMut() + Send>;

/// One [`FieldState`] per card field. The key set is fixed for the lifetime
/// of the form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldStates {
    card_number: FieldState,
    expiration: FieldState,
    cvc: FieldState,
    postal_code: FieldState,
}

impl FieldStates {
    pub fn get(&self, field: CardField) -> &FieldState {
        match field {
            CardField::CardNumber => &self.card_number,
            CardField::Expiration => &self.expiration,
            CardField::Cvc => &self.cvc,
            CardField::PostalCode => &self.postal_code,
        }
    }

    pub(crate) fn get_mut(&mut self, field: CardField) -> &mut FieldState {
        match field {
            CardField::CardNumber => &mut self.card_number,
            CardField::Expiration => &mut self.expiration,
            CardField::Cvc => &mut self.cvc,
            CardField::PostalCode => &mut self.postal_code,
        }
    }

    /// Iterates in error-priority order.
    pub fn iter(&self) -> impl Iterator<Item = (CardField, &FieldState)> + '_ {
        CardField::ALL.into_iter().map(move |field| (field, self.get(field)))
    }

    fn reset(&mut self) {
        for field in CardField::ALL {
            self.get_mut(field).reset();
        }
    }
}

/// Aggregate state machine for a card number / expiration / CVC / postal
/// code form.
///
/// Per-field validity is not computed here: the wrapped card widget knows
/// the card network rules and reports which fields are invalid through
/// [`on_input_changed`](Self::on_input_changed). The engine reconciles that
/// report with its own edit and focus tracking to decide which error, if
/// any, to show.
pub struct MultiFieldCardEngine {
    field_states: FieldStates,
    stripe_widget_valid: bool,
    card_brand: CardBrand,
    supports_custom_errors: bool,
    pub postal_code_required: bool,
    pub postal_code_enabled: bool,
    valid_state_listener: Option<ValidStateChangedListener>,
    postal_code_listener: Option<PostalCodeValidListener>,
    error_text: Arc<dyn ErrorTextProvider>,
}

impl Default for MultiFieldCardEngine {
    fn default() -> Self {
        Self::new(true)
    }
}

impl fmt::Debug for MultiFieldCardEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultiFieldCardEngine")
            .field("field_states", &self.field_states)
            .field("stripe_widget_valid", &self.stripe_widget_valid)
            .field("card_brand", &self.card_brand)
            .field("supports_custom_errors", &self.supports_custom_errors)
            .field("postal_code_required", &self.postal_code_required)
            .field("postal_code_enabled", &self.postal_code_enabled)
            .finish_non_exhaustive()
    }
}

impl MultiFieldCardEngine {
    pub fn new(supports_custom_errors: bool) -> Self {
        Self {
            field_states: FieldStates::default(),
            stripe_widget_valid: false,
            card_brand: CardBrand::Unknown,
            supports_custom_errors,
            postal_code_required: false,
            postal_code_enabled: true,
            valid_state_listener: None,
            postal_code_listener: None,
            error_text: Arc::new(EnglishErrorText),
        }
    }

    pub fn with_config(config: &CardFormConfig) -> Self {
        let mut engine = Self::new(config.supports_custom_errors);
        engine.postal_code_required = config.postal_code_required;
        engine.postal_code_enabled = config.postal_code_enabled;
        engine
    }

    pub fn with_error_text(mut self, error_text: Arc<dyn ErrorTextProvider>) -> Self {
        self.error_text = error_text;
        self
    }

    pub fn field_states(&self) -> &FieldStates {
        &self.field_states
    }

    #[cfg(test)]
    fn field_states_mut(&mut self) -> &mut FieldStates {
        &mut self.field_states
    }

    pub fn field_state(&self, field: CardField) -> &FieldState {
        self.field_states.get(field)
    }

    pub fn error_text(&self) -> &dyn ErrorTextProvider {
        self.error_text.as_ref()
    }

    pub fn supports_custom_errors(&self) -> bool {
        self.supports_custom_errors
    }

    pub fn card_brand(&self) -> CardBrand {
        self.card_brand
    }

    /// Records the brand the widget detected. Only affects which card number
    /// message is shown, never validity.
    pub fn set_card_brand(&mut self, brand: CardBrand) {
        self.card_brand = brand;
    }

    /// Registers the aggregate validity listener, replacing any previous one.
    pub fn set_valid_state_changed_listener<F>(&mut self, listener: F)
    where
        F: FnMut(bool) + Send + 'static,
    {
        self.valid_state_listener = Some(Box::new(listener));
    }

    pub fn clear_valid_state_changed_listener(&mut self) {
        self.valid_state_listener = None;
    }

    pub fn set_postal_code_valid_listener<F>(&mut self, listener: F)
    where
        F: FnMut() + Send + 'static,
    {
        self.postal_code_listener = Some(Box::new(listener));
    }

    pub fn clear_postal_code_valid_listener(&mut self) {
        self.postal_code_listener = None;
    }

    /// Mirrors the widget's aggregate validity. Per-field flags are not
    /// consulted.
    pub fn is_valid(&self) -> bool {
        self.stripe_widget_valid
    }

    pub fn focused_field(&self) -> Option<CardField> {
        self.field_states
            .iter()
            .find(|(_, state)| state.is_focused())
            .map(|(field, _)| field)
    }

    pub fn on_field_text_changed(&mut self, field: CardField, new_text: &str) {
        let state = self.field_states.get_mut(field);
        state.set_edited(true);
        state.set_empty(new_text.is_empty());

        if field == CardField::PostalCode
            && is_valid_postal_code(new_text)
            && let Some(listener) = self.postal_code_listener.as_mut()
        {
            listener();
        }
    }

    /// Applies a validity report from the wrapped widget.
    pub fn on_input_changed(&mut self, widget_valid: bool, invalid_fields: &HashSet<CardField>) {
        let previous_valid = self.is_valid();
        self.stripe_widget_valid = widget_valid;

        for field in CardField::ALL {
            self.field_states
                .get_mut(field)
                .set_valid(!invalid_fields.contains(&field));
        }

        self.notify_valid_state_changed(previous_valid);
    }

    pub fn on_focus_changed(&mut self, field: CardField) {
        if let Some(previous) = self.focused_field()
            && previous != field
        {
            self.blur(previous);
        }

        debug!(%field, "card field focused");
        self.field_states.get_mut(field).set_is_focused(true);
    }

    /// Moves focus out of the form entirely.
    pub fn clear_focus(&mut self) {
        if let Some(previous) = self.focused_field() {
            self.blur(previous);
        }
    }

    // No edited gate here, unlike the CVV engine.
    fn blur(&mut self, field: CardField) {
        let state = self.field_states.get_mut(field);
        state.set_is_focused(false);
        state.set_was_focused(true);
    }

    /// Invalid fields, optionally limited to those the user has edited and
    /// left. Ordered by error priority.
    pub fn error_fields(
        &self,
        ignore_unedited_field_errors: bool,
    ) -> BTreeMap<CardField, FieldState> {
        self.field_states
            .iter()
            .filter(|(_, state)| {
                let visited = state.was_edited() && state.was_focused();
                !state.is_valid() && (!ignore_unedited_field_errors || visited)
            })
            .map(|(field, state)| (field, *state))
            .collect()
    }

    pub fn has_error_message(&self, ignore_unedited_field_errors: bool) -> bool {
        self.supports_custom_errors && !self.error_fields(ignore_unedited_field_errors).is_empty()
    }

    /// The single message to show, for the highest priority field in error.
    pub fn error_message(&self, ignore_unedited_field_errors: bool) -> String {
        if !self.supports_custom_errors {
            return String::new();
        }

        let Some((field, state)) = self
            .error_fields(ignore_unedited_field_errors)
            .into_iter()
            .next()
        else {
            return String::new();
        };

        let unsupported =
            field == CardField::CardNumber && self.card_brand == CardBrand::Unsupported;
        field.error(self.error_text.as_ref(), state.is_empty(), unsupported)
    }

    pub fn reset(&mut self) {
        let previous_valid = self.is_valid();
        self.field_states.reset();
        self.stripe_widget_valid = false;
        debug!("card form reset");
        self.notify_valid_state_changed(previous_valid);
    }

    fn notify_valid_state_changed(&mut self, previous_valid: bool) {
        let is_valid = self.is_valid();
        if previous_valid == is_valid {
            return;
        }

        debug!(is_valid, "card form validity changed");
        if let Some(listener) = self.valid_state_listener.as_mut() {
            listener(is_valid);
        }
    }
}
