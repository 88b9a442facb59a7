use std::io::Write;
use tempfile::NamedTempFile;

pub const HEADER: &str = "event, field, value";

/// Writes an events CSV with the standard header followed by `rows`.
pub fn events_file(rows: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{HEADER}").unwrap();
    for row in rows {
        writeln!(file, "{row}").unwrap();
    }
    file.flush().unwrap();
    file
}

/// Events that fill every card field and end with a valid widget report.
pub const VALID_CARD: &[&str] = &[
    "focus, card_number,",
    "text, card_number, 4242424242424242",
    "focus, expiration,",
    "text, expiration, 12/30",
    "focus, cvc,",
    "text, cvc, 123",
    "focus, postal_code,",
    "text, postal_code, 55056",
    "blur",
    "widget, , valid",
];
