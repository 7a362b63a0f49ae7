//! Deleted-record detection
//!
//! A record counts as deleted when any of these top-level signals hold:
//! the title mentions "deleted" or is blank, `record_status` is `deleted`,
//! the cataloging level description mentions "deleted", or the record is
//! suppressed from both publishing and external search while carrying no
//! embedded metadata. False positives are possible (a title that uses the
//! word "deleted") and accepted.

use crate::domain::BibliographicRecord;

const DELETED: &str = "deleted";

/// Returns `true` if the record should be written as a deletion marker
pub fn is_deleted(record: &BibliographicRecord) -> bool {
    title_signals_deletion(record)
        || status_signals_deletion(record)
        || cataloging_level_signals_deletion(record)
        || suppression_signals_deletion(record)
}

fn title_signals_deletion(record: &BibliographicRecord) -> bool {
    let title = record.attr("title").unwrap_or_default().to_lowercase();
    title.contains(DELETED) || title.trim().is_empty()
}

fn status_signals_deletion(record: &BibliographicRecord) -> bool {
    record.attr("record_status").as_deref() == Some(DELETED)
}

fn cataloging_level_signals_deletion(record: &BibliographicRecord) -> bool {
    record
        .get("cataloging_level")
        .and_then(|level| level.get("desc"))
        .and_then(|desc| desc.as_str())
        .map(|desc| desc.to_lowercase().contains(DELETED))
        .unwrap_or(false)
}

fn suppression_signals_deletion(record: &BibliographicRecord) -> bool {
    let flag = |name: &str| {
        record
            .attr(name)
            .unwrap_or_else(|| "false".to_string())
            .to_lowercase()
            == "true"
    };

    flag("suppress_from_publishing")
        && flag("suppress_from_external_search")
        && !record.has_anies()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use test_case::test_case;

    fn record(value: Value) -> BibliographicRecord {
        BibliographicRecord::from_value(value).unwrap()
    }

    #[test_case(json!({"title": "Normal Title"}), false; "normal title")]
    #[test_case(json!({"title": "DELETED record"}), true; "title mentions deleted")]
    #[test_case(json!({"title": "Undeleted memories"}), true; "substring match")]
    #[test_case(json!({"title": "   "}), true; "blank title")]
    #[test_case(json!({}), true; "absent title")]
    #[test_case(json!({"title": null}), true; "null title")]
    fn test_title_signal(value: Value, expected: bool) {
        assert_eq!(is_deleted(&record(value)), expected);
    }

    #[test]
    fn test_record_status_exact_match() {
        assert!(is_deleted(&record(json!({"title": "T", "record_status": "deleted"}))));
        assert!(!is_deleted(&record(json!({"title": "T", "record_status": "Deleted"}))));
        assert!(!is_deleted(&record(json!({"title": "T", "record_status": "active"}))));
    }

    #[test]
    fn test_cataloging_level_desc() {
        assert!(is_deleted(&record(json!({
            "title": "T",
            "cataloging_level": {"value": "99", "desc": "Record DELETED"}
        }))));
        assert!(!is_deleted(&record(json!({
            "title": "T",
            "cataloging_level": {"value": "00", "desc": "Default Level"}
        }))));
        assert!(!is_deleted(&record(json!({"title": "T", "cataloging_level": "deleted"}))));
    }

    #[test]
    fn test_suppression_requires_both_flags_and_no_anies() {
        let both = json!({
            "title": "T",
            "suppress_from_publishing": "true",
            "suppress_from_external_search": "TRUE"
        });
        assert!(is_deleted(&record(both.clone())));

        let mut with_anies = both.clone();
        with_anies["anies"] = json!(["<dc/>"]);
        assert!(!is_deleted(&record(with_anies)));

        let mut empty_anies = both;
        empty_anies["anies"] = json!([]);
        assert!(is_deleted(&record(empty_anies)));

        assert!(!is_deleted(&record(json!({
            "title": "T",
            "suppress_from_publishing": "true",
            "suppress_from_external_search": "false"
        }))));
        assert!(!is_deleted(&record(json!({
            "title": "T",
            "suppress_from_publishing": "true"
        }))));
    }

    #[test]
    fn test_boolean_suppress_flags() {
        assert!(is_deleted(&record(json!({
            "title": "T",
            "suppress_from_publishing": true,
            "suppress_from_external_search": true
        }))));
    }
}
