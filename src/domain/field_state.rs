use std::fmt;

/// Tracks the interaction state of a single card input field.
///
/// A `FieldState` is owned by the engine driving its form. It holds no
/// validation rules of its own: the owning engine decides when each flag
/// flips. `was_edited` and `was_focused` are sticky and only go back to
/// `false` through [`FieldState::reset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldState {
    is_valid: bool,
    is_focused: bool,
    is_empty: bool,
    was_edited: bool,
    was_focused: bool,
}

impl Default for FieldState {
    fn default() -> Self {
        Self {
            is_valid: false,
            is_focused: false,
            is_empty: true,
            was_edited: false,
            was_focused: false,
        }
    }
}

impl FieldState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the field currently holds a valid value.
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Whether the field currently has input focus.
    pub fn is_focused(&self) -> bool {
        self.is_focused
    }

    /// Whether the field has no text.
    pub fn is_empty(&self) -> bool {
        self.is_empty
    }

    /// Whether the user ever entered text. Stays `true` after the text is deleted.
    pub fn was_edited(&self) -> bool {
        self.was_edited
    }

    /// Whether the field has been focused and then left.
    pub fn was_focused(&self) -> bool {
        self.was_focused
    }

    pub fn set_valid(&mut self, valid: bool) {
        self.is_valid = valid;
    }

    pub fn set_is_focused(&mut self, focused: bool) {
        self.is_focused = focused;
    }

    pub fn set_empty(&mut self, empty: bool) {
        self.is_empty = empty;
    }

    pub fn set_edited(&mut self, edited: bool) {
        self.was_edited = edited;
    }

    pub fn set_was_focused(&mut self, focused: bool) {
        self.was_focused = focused;
    }

    /// Restores every flag to its construction default.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl fmt::Display for FieldState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FieldState(is_valid={}, is_focused={}, is_empty={}, was_edited={}, was_focused={})",
            self.is_valid, self.is_focused, self.is_empty, self.was_edited, self.was_focused
        )
    }
}
