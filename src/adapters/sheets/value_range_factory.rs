use google_sheets4::api::ValueRange;
use serde_json::Value;
use std::borrow::Cow;

use crate::ports::sheets_service::SheetRow;

pub trait ValueRangeFactory {
    fn from_rows(rows: &[SheetRow]) -> Self;
    fn into_rows(self) -> Vec<SheetRow>;
}

fn wrap_value<'a, T: Into<Cow<'a, str>>>(value: T) -> Value {
    Value::String(value.into().into_owned())
}

// Formatted cells come back as strings; anything else is rendered as JSON.
fn unwrap_value(value: Value) -> String {
    match value {
        Value::String(value) => value,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

impl ValueRangeFactory for ValueRange {
    fn from_rows(rows: &[SheetRow]) -> Self {
        let values = rows
            .iter()
            .map(|row| row.iter().map(|cell| wrap_value(cell.as_str())).collect())
            .collect::<Vec<_>>();

        Self {
            major_dimension: Some("ROWS".to_string()),
            range: None,
            values: Some(values),
        }
    }

    fn into_rows(self) -> Vec<SheetRow> {
        self.values
            .unwrap_or_default()
            .into_iter()
            .map(|row| row.into_iter().map(unwrap_value).collect())
            .collect()
    }
}
