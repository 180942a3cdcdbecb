use chrono::{DateTime, Datelike, Utc};
use serde_json::{Map, Value};
use tracing::debug;

use crate::model::{AccessDates, Tab};

pub const DEFAULT_TITLE: &str = "No Title";

/// Tab candidates (duplicates included) and access dates found in a tree.
#[derive(Debug, Default)]
pub struct Extraction {
    pub tabs: Vec<Tab>,
    pub dates: AccessDates,
}

/// Walks an exported tab tree and collects every tab record in document order.
///
/// A sequence whose second element is a mapping is a tagged record: its `data`
/// mapping may describe a tab, and its children start at index 2. Any other
/// sequence or mapping is searched element by element.
pub fn extract_tabs(root: &Value) -> Extraction {
    let mut extraction = Extraction::default();
    walk(root, &mut extraction);
    debug!(
        action = "complete",
        component = "tree_walker",
        tab_count = extraction.tabs.len(),
        date_count = extraction.dates.len(),
        "Tree walk completed"
    );
    extraction
}

fn walk(node: &Value, acc: &mut Extraction) {
    match node {
        Value::Array(items) => match items.get(1) {
            Some(Value::Object(descriptor)) => {
                visit_record(descriptor, acc);
                for child in &items[2..] {
                    walk(child, acc);
                }
            }
            _ => {
                for item in items {
                    walk(item, acc);
                }
            }
        },
        Value::Object(map) => {
            for value in map.values() {
                walk(value, acc);
            }
        }
        _ => {}
    }
}

fn visit_record(descriptor: &Map<String, Value>, acc: &mut Extraction) {
    let Some(Value::Object(data)) = descriptor.get("data") else {
        return;
    };

    if let Some(raw) = data.get("lastAccessed") {
        match access_date(raw) {
            Some(date) => {
                acc.dates.insert(date);
            }
            None => debug!(component = "tree_walker", value = %raw, "Ignoring unusable lastAccessed"),
        }
    }

    let url = string_field(data, "url", "");
    if url.is_empty() {
        return;
    }

    acc.tabs.push(Tab {
        title: string_field(data, "title", DEFAULT_TITLE),
        url,
        icon: string_field(data, "favIconUrl", ""),
    });
}

fn string_field(data: &Map<String, Value>, key: &str, default: &str) -> String {
    data.get(key)
        .and_then(Value::as_str)
        .unwrap_or(default)
        .to_string()
}

/// Converts a millisecond epoch timestamp. Non-numbers and instants outside
/// years 1..=9999 yield `None`.
pub fn access_date(raw: &Value) -> Option<DateTime<Utc>> {
    let Value::Number(number) = raw else {
        return None;
    };

    let instant = match number.as_i64() {
        Some(ms) => DateTime::from_timestamp_millis(ms),
        None => {
            let micros = (number.as_f64()? * 1000.0).round();
            if !micros.is_finite() || micros.abs() >= i64::MAX as f64 {
                return None;
            }
            DateTime::from_timestamp_micros(micros as i64)
        }
    }?;

    (1..=9999).contains(&instant.year()).then_some(instant)
}
