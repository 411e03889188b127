//! # Payload Table Rendering
//!
//! Renders a payload as the byte-column table used by the controller's
//! diagnostic output. Built purely from `fields()` metadata: each column is
//! `4 * length + 2` characters wide and shows the field label above the hex
//! of its encoded bytes.
//!
//! ```text
//!                  +----------------------------------+----------------------------------+----------+------+------+------+------+------+
//!  CMD_RGB_LED     | dst                              | src                              | swarm id | ver. | type | red  | green| blue |
//!  (23 Bytes)      | 0x0000000000000001               | 0x0000000000000002               | 0x0003   | 0x01 | 0x01 | 0xff | 0x00 | 0x80 |
//!                  +----------------------------------+----------------------------------+----------+------+------+------+------+------+
//! ```
//!
//! Frames longer than 24 bytes put the body fields in a second table below
//! the header.

use crate::field::ProtocolField;
use crate::payload::ProtocolPayload;
use crate::protocol_constants::TYPE_TAG_SIZE;
use std::fmt;

/// Frames above this size render the body on its own rows
const SINGLE_ROW_LIMIT: usize = 24;

const PREFIX_WIDTH: usize = 16;

/// One rendered column
struct Column {
    width: usize,
    label: String,
    value: String,
}

impl Column {
    fn for_field(field: &ProtocolField) -> Self {
        // Overflowing values cannot come out of typed bodies; render them
        // as a marker rather than failing the whole table
        let hex = field.hex().unwrap_or_else(|| "?".repeat(2 * field.length));
        Self {
            width: 4 * field.length + 2,
            label: field.name.to_string(),
            value: format!("0x{}", hex),
        }
    }

    fn type_tag(tag: u8) -> Self {
        Self {
            width: 4 * TYPE_TAG_SIZE + 2,
            label: "type".to_string(),
            value: format!("0x{:02x}", tag),
        }
    }
}

fn write_separator(f: &mut fmt::Formatter<'_>, columns: &[Column]) -> fmt::Result {
    write!(f, "{:width$}+", "", width = PREFIX_WIDTH + 1)?;
    for column in columns {
        write!(f, "{}+", "-".repeat(column.width))?;
    }
    writeln!(f)
}

fn write_row(
    f: &mut fmt::Formatter<'_>,
    prefix: &str,
    columns: &[Column],
    cell: impl Fn(&Column) -> &str,
) -> fmt::Result {
    write!(f, " {:<width$}|", prefix, width = PREFIX_WIDTH)?;
    for column in columns {
        write!(f, " {:<width$}|", cell(column), width = column.width - 1)?;
    }
    writeln!(f)
}

fn write_table(
    f: &mut fmt::Formatter<'_>,
    title: &str,
    subtitle: &str,
    columns: &[Column],
) -> fmt::Result {
    write_separator(f, columns)?;
    write_row(f, title, columns, |c| c.label.as_str())?;
    write_row(f, subtitle, columns, |c| c.value.as_str())?;
    write_separator(f, columns)
}

impl fmt::Display for ProtocolPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut header_columns: Vec<Column> =
            self.header.fields().iter().map(Column::for_field).collect();
        header_columns.push(Column::type_tag(self.payload_type() as u8));
        let body_columns: Vec<Column> = self.body.fields().iter().map(Column::for_field).collect();

        let title = self.payload_type().name();
        let subtitle = format!("({} Bytes)", self.encoded_len());

        if self.encoded_len() > SINGLE_ROW_LIMIT {
            write_table(f, title, &subtitle, &header_columns)?;
            write_table(f, "", "", &body_columns)
        } else {
            header_columns.extend(body_columns);
            write_table(f, title, &subtitle, &header_columns)
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::data::{CommandMoveRaw, CommandRgbLed, Lh2RawData};
    use crate::header::ProtocolHeader;
    use crate::payload::ProtocolPayload;

    #[test]
    fn test_single_row_table() {
        let payload = ProtocolPayload::new(
            ProtocolHeader::new(1, 2, 3),
            CommandRgbLed::new(255, 0, 128),
        );
        let rendered = payload.to_string();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with(&format!("{}+", " ".repeat(17))));
        assert!(lines[1].starts_with(" CMD_RGB_LED     |"));
        assert!(lines[2].starts_with(" (23 Bytes)      |"));
        assert!(lines[1].contains("| swarm id |"));
        assert!(lines[2].contains("| 0x0000000000000001"));
        assert!(lines[2].contains("| 0xff |"));
        assert!(lines[2].contains("| 0x80 |"));
        assert_eq!(lines[0], lines[3]);

        // All rows line up column for column
        let widths: Vec<usize> = lines.iter().map(|l| l.chars().count()).collect();
        assert!(widths.iter().all(|w| *w == widths[0]));
    }

    #[test]
    fn test_move_raw_negative_values() {
        let payload = ProtocolPayload::new(
            ProtocolHeader::new(1, 2, 3),
            CommandMoveRaw::new(-1, -128, 127, 0),
        );
        let rendered = payload.to_string();
        assert!(rendered.contains("(24 Bytes)"));
        assert!(rendered.contains("| 0xff |"));
        assert!(rendered.contains("| 0x80 |"));
        assert!(rendered.contains("| 0x7f |"));
        assert_eq!(rendered.lines().count(), 4);
    }

    #[test]
    fn test_wide_payload_splits_body() {
        let payload = ProtocolPayload::new(ProtocolHeader::new(1, 2, 3), Lh2RawData::default());
        let rendered = payload.to_string();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 8);
        assert!(lines[1].contains("LH2_RAW_DATA"));
        assert!(lines[2].contains("(60 Bytes)"));
        assert!(!lines[1].contains("bits"));
        assert_eq!(lines[5].matches("bits").count(), 4);
        assert_eq!(lines[5].matches("poly").count(), 4);
    }
}
