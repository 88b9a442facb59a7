use crate::application::session::FieldEvent;
use crate::error::{PaymentError, Result};
use std::io::Read;

/// Reads recorded UI events from a CSV source with `event, field, value`
/// columns.
///
/// Whitespace around values is trimmed and short rows are accepted, so a
/// `blur` or `reset` row does not need trailing commas.
pub struct EventReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> EventReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Lazily deserializes events; a malformed row yields an error without
    /// ending the stream.
    pub fn events(self) -> impl Iterator<Item = Result<FieldEvent>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(PaymentError::from))
    }
}
