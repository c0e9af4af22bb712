// ABOUTME: Conversion of MySQL binary-protocol values into JSON
// ABOUTME: Used by the JSON Lines exporter to turn result rows into records

use base64::{engine::general_purpose::STANDARD, Engine as _};
use mysql_async::consts::ColumnType;
use mysql_async::{Row, Value};
use serde_json::{Map, Number, Value as JsonValue};

/// Character set id the server reports for binary strings and blobs
const BINARY_CHARSET: u16 = 63;

/// A result row rendered as an ordered JSON object (column name -> value)
pub type Record = Map<String, JsonValue>;

/// How the bytes of a column should be interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// DECIMAL/NUMERIC, sent as text but numeric in meaning
    Decimal,
    /// JSON documents; MySQL reports them with the binary charset
    Json,
    /// BINARY/VARBINARY/BLOB and friends
    Binary,
    Text,
}

impl ColumnKind {
    pub fn of(column: &mysql_async::Column) -> Self {
        match column.column_type() {
            ColumnType::MYSQL_TYPE_DECIMAL | ColumnType::MYSQL_TYPE_NEWDECIMAL => Self::Decimal,
            ColumnType::MYSQL_TYPE_JSON => Self::Json,
            _ if column.character_set() == BINARY_CHARSET => Self::Binary,
            _ => Self::Text,
        }
    }
}

/// Render a whole row as a record keyed by column name
pub fn row_to_record(row: &Row) -> Record {
    row.columns_ref()
        .iter()
        .enumerate()
        .map(|(idx, column)| {
            let value = row
                .as_ref(idx)
                .map(|value| value_to_json(value, ColumnKind::of(column)))
                .unwrap_or(JsonValue::Null);
            (column.name_str().into_owned(), value)
        })
        .collect()
}

/// Convert one column value; SQL NULL becomes JSON null, everything else is kept verbatim
pub fn value_to_json(value: &Value, kind: ColumnKind) -> JsonValue {
    match value {
        Value::NULL => JsonValue::Null,
        Value::Int(v) => JsonValue::Number((*v).into()),
        Value::UInt(v) => JsonValue::Number((*v).into()),
        Value::Float(v) => float(f64::from(*v)),
        Value::Double(v) => float(*v),
        Value::Date(year, month, day, hour, minute, second, micros) => {
            let mut text = format!(
                "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
                year, month, day, hour, minute, second
            );
            if *micros > 0 {
                text.push_str(&format!(".{:06}", micros));
            }
            JsonValue::String(text)
        }
        Value::Time(negative, days, hours, minutes, seconds, micros) => {
            let mut text = String::new();
            if *negative {
                text.push('-');
            }
            if *days > 0 {
                text.push_str(&format!("{}.", days));
            }
            text.push_str(&format!("{:02}:{:02}:{:02}", hours, minutes, seconds));
            if *micros > 0 {
                text.push_str(&format!(".{:06}", micros));
            }
            JsonValue::String(text)
        }
        Value::Bytes(bytes) => match kind {
            ColumnKind::Binary => JsonValue::String(STANDARD.encode(bytes)),
            // Numbers keep the server's digits and scale (arbitrary_precision)
            ColumnKind::Decimal => {
                let text = String::from_utf8_lossy(bytes);
                text.parse::<Number>()
                    .map(JsonValue::Number)
                    .unwrap_or_else(|_| JsonValue::String(text.into_owned()))
            }
            ColumnKind::Json => serde_json::from_slice(bytes)
                .unwrap_or_else(|_| JsonValue::String(String::from_utf8_lossy(bytes).into_owned())),
            ColumnKind::Text => match std::str::from_utf8(bytes) {
                Ok(text) => JsonValue::String(text.to_string()),
                Err(_) => JsonValue::String(STANDARD.encode(bytes)),
            },
        },
    }
}

fn float(v: f64) -> JsonValue {
    Number::from_f64(v)
        .map(JsonValue::Number)
        .unwrap_or_else(|| JsonValue::String(v.to_string()))
}
