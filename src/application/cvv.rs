use crate::domain::field::{EnglishErrorText, ErrorTextProvider, MessageKey};
use crate::domain::field_state::FieldState;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

static CVV_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{3,4}$").expect("CVV pattern is valid"));

/// Called with the new validity whenever it flips.
pub type ValidStateChangedListener = Box<dyn FnMut(bool) + Send>;

/// State machine for a standalone CVV input.
///
/// Unlike the multi-field engine, the CVV engine validates text itself and
/// only marks the field as visited when it loses focus after being edited,
/// so tabbing through an untouched field does not flash an error.
pub struct CvvFieldEngine {
    field_state: FieldState,
    listener: Option<ValidStateChangedListener>,
    error_text: Arc<dyn ErrorTextProvider>,
}

impl Default for CvvFieldEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CvvFieldEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CvvFieldEngine")
            .field("field_state", &self.field_state)
            .field("has_listener", &self.listener.is_some())
            .finish()
    }
}

impl CvvFieldEngine {
    pub fn new() -> Self {
        Self::with_error_text(Arc::new(EnglishErrorText))
    }

    pub fn with_error_text(error_text: Arc<dyn ErrorTextProvider>) -> Self {
        Self {
            field_state: FieldState::default(),
            listener: None,
            error_text,
        }
    }

    pub fn field_state(&self) -> &FieldState {
        &self.field_state
    }

    #[cfg(test)]
    fn field_state_mut(&mut self) -> &mut FieldState {
        &mut self.field_state
    }

    pub fn is_valid(&self) -> bool {
        self.field_state.is_valid()
    }

    pub fn is_focused(&self) -> bool {
        self.field_state.is_focused()
    }

    /// Registers the validity listener, replacing any previous one.
    pub fn set_valid_state_changed_listener<F>(&mut self, listener: F)
    where
        F: FnMut(bool) + Send + 'static,
    {
        self.listener = Some(Box::new(listener));
    }

    pub fn clear_valid_state_changed_listener(&mut self) {
        self.listener = None;
    }

    pub fn on_input_changed(&mut self, new_text: &str) {
        self.field_state.set_empty(new_text.is_empty());

        if !new_text.is_empty() {
            self.field_state.set_edited(true);
        }

        let previous_valid = self.is_valid();
        self.field_state.set_valid(Self::is_valid_cvv_code(new_text));
        self.notify_valid_state_changed(previous_valid);
    }

    pub fn on_focus_changed(&mut self, is_focused: bool) {
        let had_focus = self.field_state.is_focused();

        // Losing focus only counts as a visit once the field has been edited
        if had_focus && !is_focused && self.field_state.was_edited() {
            self.field_state.set_was_focused(true);
        }
        self.field_state.set_is_focused(is_focused);
    }

    /// Three or four ASCII digits, nothing else.
    pub fn is_valid_cvv_code(value: &str) -> bool {
        CVV_CODE.is_match(value)
    }

    /// Marks the field as edited and visited, e.g. when the user submits.
    pub fn editing_completed(&mut self) {
        self.field_state.set_edited(true);
        self.field_state.set_was_focused(true);
    }

    pub fn has_error_message(&self, ignore_unedited_field_errors: bool) -> bool {
        if !ignore_unedited_field_errors {
            return !self.field_state.is_valid();
        }

        let state = &self.field_state;
        !state.is_valid() && state.was_edited() && state.was_focused()
    }

    pub fn error_message(&self, ignore_unedited_field_errors: bool) -> String {
        if !self.has_error_message(ignore_unedited_field_errors) {
            return String::new();
        }

        let key = if self.field_state.is_empty() {
            MessageKey::EmptyCvv
        } else {
            MessageKey::IncompleteCvv
        };
        self.error_text.text(key)
    }

    pub fn reset(&mut self) {
        let previous_valid = self.is_valid();
        self.field_state.reset();
        debug!("CVV field reset");
        self.notify_valid_state_changed(previous_valid);
    }

    fn notify_valid_state_changed(&mut self, previous_valid: bool) {
        let is_valid = self.is_valid();
        if previous_valid == is_valid {
            return;
        }

        debug!(is_valid, "CVV validity changed");
        if let Some(listener) = self.listener.as_mut() {
            listener(is_valid);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn recording_engine() -> (CvvFieldEngine, Arc<Mutex<Vec<bool>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&calls);
        let mut engine = CvvFieldEngine::new();
        engine.set_valid_state_changed_listener(move |valid| recorded.lock().unwrap().push(valid));
        (engine, calls)
    }

    #[test]
    fn test_initial_state() {
        let engine = CvvFieldEngine::new();
        assert!(!engine.is_valid());
        assert_eq!(*engine.field_state(), FieldState::default());
    }

    #[test]
    fn test_cvv_code_format() {
        assert!(CvvFieldEngine::is_valid_cvv_code("123"));
        assert!(CvvFieldEngine::is_valid_cvv_code("1234"));
        assert!(!CvvFieldEngine::is_valid_cvv_code("12"));
        assert!(!CvvFieldEngine::is_valid_cvv_code("12345"));
        assert!(!CvvFieldEngine::is_valid_cvv_code("12a"));
        assert!(!CvvFieldEngine::is_valid_cvv_code(""));
        assert!(!CvvFieldEngine::is_valid_cvv_code(" 123"));
        assert!(!CvvFieldEngine::is_valid_cvv_code("123\n"));
        assert!(!CvvFieldEngine::is_valid_cvv_code("١٢٣"));
    }

    #[test]
    fn test_listener_fires_only_on_transition() {
        let (mut engine, calls) = recording_engine();

        engine.on_input_changed("123");
        engine.on_input_changed("345");

        assert_eq!(*calls.lock().unwrap(), vec![true]);
    }

    #[test]
    fn test_listener_fires_when_becoming_invalid() {
        let (mut engine, calls) = recording_engine();

        engine.on_input_changed("123");
        engine.on_input_changed("12");
        engine.on_input_changed("1");

        assert_eq!(*calls.lock().unwrap(), vec![true, false]);
    }

    #[test]
    fn test_listener_is_replaced() {
        let (mut engine, first) = recording_engine();
        let second = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&second);
        engine.set_valid_state_changed_listener(move |valid| recorded.lock().unwrap().push(valid));

        engine.on_input_changed("123");

        assert!(first.lock().unwrap().is_empty());
        assert_eq!(*second.lock().unwrap(), vec![true]);
    }

    #[test]
    fn test_cleared_listener_is_not_called() {
        let (mut engine, calls) = recording_engine();
        engine.clear_valid_state_changed_listener();
        engine.on_input_changed("123");
        assert!(calls.lock().unwrap().is_empty());
        assert!(engine.is_valid());
    }

    #[test]
    fn test_input_tracks_empty_and_sticky_edited() {
        let mut engine = CvvFieldEngine::new();

        engine.on_input_changed("");
        assert!(engine.field_state().is_empty());
        assert!(!engine.field_state().was_edited());

        engine.on_input_changed("1");
        assert!(!engine.field_state().is_empty());
        assert!(engine.field_state().was_edited());

        engine.on_input_changed("");
        assert!(engine.field_state().is_empty());
        assert!(engine.field_state().was_edited());
    }

    #[test]
    fn test_blur_without_edit_is_not_a_visit() {
        let mut engine = CvvFieldEngine::new();
        engine.on_focus_changed(true);
        engine.on_focus_changed(false);

        assert!(!engine.is_focused());
        assert!(!engine.field_state().was_focused());
    }

    #[test]
    fn test_blur_after_edit_is_a_visit() {
        let mut engine = CvvFieldEngine::new();
        engine.on_focus_changed(true);
        engine.field_state_mut().set_edited(true);
        engine.on_focus_changed(false);

        assert!(engine.field_state().was_focused());
    }

    #[test]
    fn test_blur_while_unfocused_is_not_a_visit() {
        let mut engine = CvvFieldEngine::new();
        engine.on_input_changed("1");
        engine.on_focus_changed(false);
        assert!(!engine.field_state().was_focused());
    }

    #[test]
    fn test_editing_completed() {
        let mut engine = CvvFieldEngine::new();
        engine.editing_completed();

        let state = engine.field_state();
        assert!(state.was_edited());
        assert!(state.was_focused());
        assert!(state.is_empty());
        assert!(!state.is_valid());
        assert!(!state.is_focused());
    }

    #[test]
    fn test_error_suppressed_until_edited_and_visited() {
        let mut engine = CvvFieldEngine::new();
        assert!(engine.has_error_message(false));
        assert!(!engine.has_error_message(true));
        assert_eq!(engine.error_message(true), "");

        engine.on_focus_changed(true);
        engine.on_input_changed("12");
        assert!(!engine.has_error_message(true));

        engine.on_focus_changed(false);
        assert!(engine.has_error_message(true));
        assert_eq!(engine.error_message(true), "Your card's security code is incomplete");
    }

    #[test]
    fn test_error_messages() {
        let mut engine = CvvFieldEngine::new();
        assert_eq!(engine.error_message(false), "Your card's security code is missing");

        engine.field_state_mut().set_empty(false);
        assert_eq!(engine.error_message(false), "Your card's security code is incomplete");

        engine.field_state_mut().set_valid(true);
        assert_eq!(engine.error_message(false), "");
    }

    #[test]
    fn test_reset_notifies_when_previously_valid() {
        let (mut engine, calls) = recording_engine();
        engine.on_focus_changed(true);
        engine.on_input_changed("123");
        engine.on_focus_changed(false);

        engine.reset();

        assert_eq!(*engine.field_state(), FieldState::default());
        assert_eq!(*calls.lock().unwrap(), vec![true, false]);
    }

    #[test]
    fn test_reset_silent_when_already_invalid() {
        let (mut engine, calls) = recording_engine();
        engine.on_input_changed("12");

        engine.reset();

        assert_eq!(*engine.field_state(), FieldState::default());
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_custom_error_text() {
        struct Shouty;
        impl ErrorTextProvider for Shouty {
            fn text(&self, key: MessageKey) -> String {
                format!("{key:?}").to_uppercase()
            }
        }

        let engine = CvvFieldEngine::with_error_text(Arc::new(Shouty));
        assert_eq!(engine.error_message(false), "EMPTYCVV");
    }
}
