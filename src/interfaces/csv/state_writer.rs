use crate::domain::field_state::FieldState;
use crate::error::Result;
use std::io::Write;

/// Writes field states as CSV, followed by the form summary.
pub struct StateWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> StateWriter<W> {
    pub fn new(sink: W) -> Self {
        let writer = csv::WriterBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_writer(sink);
        Self { writer }
    }

    pub fn write_states<'a, I>(&mut self, states: I) -> Result<()>
    where
        I: IntoIterator<Item = (&'a str, &'a FieldState)>,
    {
        self.writer.write_record([
            "field",
            "is_valid",
            "is_focused",
            "is_empty",
            "was_edited",
            "was_focused",
        ])?;
        for (field, state) in states {
            self.writer.write_record([
                field,
                bool_str(state.is_valid()),
                bool_str(state.is_focused()),
                bool_str(state.is_empty()),
                bool_str(state.was_edited()),
                bool_str(state.was_focused()),
            ])?;
        }
        Ok(())
    }

    pub fn write_summary(&mut self, is_valid: bool, error_message: &str) -> Result<()> {
        self.writer.write_record(["valid", bool_str(is_valid)])?;
        self.writer.write_record(["error", error_message])?;
        Ok(())
    }

    pub fn write_token(&mut self, token: &str) -> Result<()> {
        self.writer.write_record(["token", token])?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

fn bool_str(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}
