//! MARC datafield lookup over the JSON `record.datafield` structure

use crate::domain::BibliographicRecord;
use serde_json::Value;

/// Accepts either a sequence or a single object as a one-element sequence
fn as_sequence(value: &Value) -> &[Value] {
    match value {
        Value::Array(items) => items.as_slice(),
        Value::Object(_) => std::slice::from_ref(value),
        _ => &[],
    }
}

fn datafields(record: &BibliographicRecord) -> &[Value] {
    record
        .get("record")
        .and_then(|marc| marc.get("datafield"))
        .map(as_sequence)
        .unwrap_or(&[])
}

/// Text of one subfield; `#text` wins over `value`
fn subfield_text(subfield: &Value) -> Option<&str> {
    subfield
        .get("#text")
        .and_then(Value::as_str)
        .or_else(|| subfield.get("value").and_then(Value::as_str))
}

fn tag_of(datafield: &Value) -> Option<String> {
    match datafield.get("tag")? {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(format!("{:0>3}", n.to_string())),
        _ => None,
    }
}

/// Values of `tag` / `code` in datafield order
///
/// With a code, each matching subfield yields one value. Without a code,
/// each matching datafield yields its subfield texts joined by a space.
/// Values are trimmed and empty ones dropped.
pub fn marc_values(record: &BibliographicRecord, tag: &str, code: Option<char>) -> Vec<String> {
    let mut values = Vec::new();

    for datafield in datafields(record) {
        if tag_of(datafield).as_deref() != Some(tag) {
            continue;
        }

        let subfields = datafield.get("subfield").map(as_sequence).unwrap_or(&[]);

        match code {
            Some(code) => {
                for subfield in subfields {
                    let matches = subfield
                        .get("code")
                        .and_then(Value::as_str)
                        .map(|c| c.trim().chars().eq(std::iter::once(code)))
                        .unwrap_or(false);
                    if !matches {
                        continue;
                    }
                    if let Some(text) = subfield_text(subfield).map(str::trim) {
                        if !text.is_empty() {
                            values.push(text.to_string());
                        }
                    }
                }
            }
            None => {
                let joined = subfields
                    .iter()
                    .filter_map(subfield_text)
                    .map(str::trim)
                    .filter(|text| !text.is_empty())
                    .collect::<Vec<_>>()
                    .join(" ");
                if !joined.is_empty() {
                    values.push(joined);
                }
            }
        }
    }

    values
}
