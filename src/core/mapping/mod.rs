//! Record-to-row mapping
//!
//! [`RowMapper`] turns one [`BibliographicRecord`] into either a fixed-schema
//! [`OutputRow`] or a deletion marker. Mapping is pure: the same record and
//! options always produce the same result.

pub mod rules;

pub use rules::{standard_rules, ColumnRule, Policy, JOIN_SEPARATOR};

use crate::core::deletion::is_deleted;
use crate::core::extract::FieldExtractor;
use crate::domain::{BibliographicRecord, OutputRow};

/// Institution code used when a record carries no `originating_system`
pub const DEFAULT_INSTITUTION_CODE: &str = "01GCL_INST";

/// Identifier written for deleted records without an MMS ID
pub const UNKNOWN_MMS_ID: &str = "unknown";

/// Options that parameterize the rule table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingOptions {
    /// Fallback institution code for the custom namespace
    pub institution_code: String,
    /// Constant for the DCMI type column when the record has none
    pub resource_type: Option<String>,
}

impl Default for MappingOptions {
    fn default() -> Self {
        Self {
            institution_code: DEFAULT_INSTITUTION_CODE.to_string(),
            resource_type: None,
        }
    }
}

/// Outcome of mapping one record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mapped {
    /// Active record
    Row(OutputRow),
    /// Deleted record, written as a comment line
    Deleted { mms_id: String },
}

impl Mapped {
    pub fn is_deleted(&self) -> bool {
        matches!(self, Mapped::Deleted { .. })
    }
}

/// Applies the rule table to records
///
/// # Examples
///
/// ```
/// use bibexport::core::mapping::{Mapped, RowMapper};
/// use bibexport::domain::BibliographicRecord;
/// use serde_json::json;
///
/// let mapper = RowMapper::default();
/// let record = BibliographicRecord::from_value(json!({
///     "mms_id": "99123",
///     "title": "Fallback title",
///     "author": "Doe, Jane"
/// }))
/// .unwrap();
///
/// match mapper.map_record(&record) {
///     Mapped::Row(row) => {
///         assert_eq!(row.first("dc:title"), Some("Fallback title"));
///         assert_eq!(row.first("dc:creator"), Some("Doe, Jane"));
///     }
///     Mapped::Deleted { .. } => unreachable!(),
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RowMapper {
    options: MappingOptions,
    rules: Vec<ColumnRule>,
}

impl RowMapper {
    /// Creates a mapper with the standard rule table
    pub fn new(options: MappingOptions) -> Self {
        let rules = standard_rules(&options);
        Self { options, rules }
    }

    /// Creates a mapper with a custom rule table
    pub fn with_rules(options: MappingOptions, rules: Vec<ColumnRule>) -> Self {
        Self { options, rules }
    }

    pub fn options(&self) -> &MappingOptions {
        &self.options
    }

    pub fn rules(&self) -> &[ColumnRule] {
        &self.rules
    }

    /// Maps one record, checking deletion first
    pub fn map_record(&self, record: &BibliographicRecord) -> Mapped {
        if is_deleted(record) {
            let mms_id = record
                .mms_id()
                .unwrap_or_else(|| UNKNOWN_MMS_ID.to_string());
            tracing::debug!(mms_id = %mms_id, "Record classified as deleted");
            return Mapped::Deleted { mms_id };
        }

        Mapped::Row(self.build_row(record))
    }

    /// Builds the row without deletion classification
    pub fn build_row(&self, record: &BibliographicRecord) -> OutputRow {
        let extractor = FieldExtractor::new(record, &self.options.institution_code);
        let mut row = OutputRow::new();
        for rule in &self.rules {
            rule.apply(&extractor, &mut row);
        }
        row
    }
}

impl Default for RowMapper {
    fn default() -> Self {
        Self::new(MappingOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::schema::LCSH_COLUMN;
    use serde_json::{json, Value};

    fn record(value: Value) -> BibliographicRecord {
        BibliographicRecord::from_value(value).unwrap()
    }

    fn row(value: Value) -> OutputRow {
        match RowMapper::default().map_record(&record(value)) {
            Mapped::Row(row) => row,
            Mapped::Deleted { mms_id } => panic!("unexpected deletion of {mms_id}"),
        }
    }

    fn dc_document(body: &str) -> String {
        format!(
            r#"<record xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/">{body}</record>"#
        )
    }

    #[test]
    fn test_deleted_record_marker() {
        let mapped = RowMapper::default().map_record(&record(json!({
            "mms_id": "99555",
            "title": "Deleted"
        })));
        assert_eq!(
            mapped,
            Mapped::Deleted {
                mms_id: "99555".to_string()
            }
        );
        assert!(mapped.is_deleted());
    }

    #[test]
    fn test_deleted_record_without_id() {
        let mapped = RowMapper::default().map_record(&record(json!({"title": ""})));
        assert_eq!(
            mapped,
            Mapped::Deleted {
                mms_id: "unknown".to_string()
            }
        );
    }

    #[test]
    fn test_dublin_core_precedence_over_flat() {
        let row = row(json!({
            "mms_id": "99123",
            "title": "Flat title",
            "author": "Flat author",
            "anies": [dc_document("<dc:title>DC title</dc:title><dc:creator>A</dc:creator><dc:creator>B</dc:creator>")]
        }));

        assert_eq!(row.first("mms_id"), Some("99123"));
        assert_eq!(row.first("dc:title"), Some("DC title"));
        assert_eq!(row.first("dc:creator"), Some("A; B"));
    }

    #[test]
    fn test_flat_fallbacks_for_date_and_issued() {
        let row = row(json!({
            "title": "T",
            "date_of_publication": "1923",
            "publisher_const": "Grinnell College"
        }));

        assert_eq!(row.first("dc:date"), Some("1923"));
        assert_eq!(row.first("dcterms:issued"), Some("1923"));
        assert_eq!(row.all("dcterms:publisher"), vec!["Grinnell College", ""]);
    }

    #[test]
    fn test_subject_spread_drops_excess() {
        let mut body = String::new();
        for i in 1..=10 {
            body.push_str(&format!("<dc:subject>S{i}</dc:subject>"));
        }
        for i in 11..=13 {
            body.push_str(&format!("<dcterms:subject>S{i}</dcterms:subject>"));
        }
        let row = row(json!({"title": "T", "anies": [dc_document(&body)]}));

        assert_eq!(row.first("dc:subject"), Some("S1"));
        let lcsh = row.all(LCSH_COLUMN);
        assert_eq!(lcsh.len(), 11);
        assert_eq!(lcsh[0], "S2");
        assert_eq!(lcsh[10], "S12");
        assert!(!row.values().iter().any(|v| v == "S13"));
    }

    #[test]
    fn test_repeated_columns_filled_in_order() {
        let row = row(json!({
            "title": "T",
            "anies": [dc_document(
                "<dcterms:publisher>P1</dcterms:publisher><dcterms:publisher>P2</dcterms:publisher>\
                 <dcterms:publisher>P3</dcterms:publisher>\
                 <dcterms:extent>E1</dcterms:extent>\
                 <dcterms:isPartOf>I1</dcterms:isPartOf><dcterms:isPartOf>I2</dcterms:isPartOf>"
            )]
        }));

        assert_eq!(row.all("dcterms:publisher"), vec!["P1", "P2"]);
        assert_eq!(row.all("dcterms:extent"), vec!["E1", ""]);
        assert_eq!(row.all("dcterms:isPartOf"), vec!["I1", "I2", ""]);
    }

    #[test]
    fn test_marc_fallback() {
        let row = row(json!({
            "title": "Flat title",
            "record": {"datafield": [
                {"tag": "245", "subfield": [{"code": "a", "#text": "MARC title"}]},
                {"tag": "100", "subfield": [{"code": "a", "#text": "Doe, Jane"}]},
                {"tag": "260", "subfield": [{"code": "b", "#text": "Old Press"}, {"code": "c", "#text": "1901"}]},
                {"tag": "650", "subfield": [{"code": "a", "#text": "Rivers"}, {"code": "z", "#text": "Iowa"}]}
            ]}
        }));

        assert_eq!(row.first("dc:title"), Some("MARC title"));
        assert_eq!(row.first("dc:creator"), Some("Doe, Jane"));
        assert_eq!(row.first("dcterms:publisher"), Some("Old Press"));
        assert_eq!(row.first("dc:date"), Some("1901"));
        assert_eq!(row.first("dc:subject"), Some("Rivers Iowa"));
    }

    #[test]
    fn test_unmapped_columns_stay_empty() {
        let row = row(json!({"title": "T"}));
        for name in ["group_id", "collection_id", "oldalttitle", "rep_label", "file_name_1"] {
            assert_eq!(row.first(name), Some(""), "{name} should be empty");
        }
    }

    #[test]
    fn test_mapping_is_idempotent() {
        let rec = record(json!({
            "mms_id": "1",
            "title": "T",
            "anies": [dc_document("<dc:subject>A</dc:subject>")]
        }));
        let mapper = RowMapper::default();
        assert_eq!(mapper.map_record(&rec), mapper.map_record(&rec));
    }
}
