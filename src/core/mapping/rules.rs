//! Column rules: which sources feed which output positions
//!
//! Each rule pairs a fallback chain of selector groups with a projection
//! policy. The first group producing at least one value wins; the values of
//! the selectors within one group are concatenated in order.

use super::MappingOptions;
use crate::core::extract::{FieldExtractor, Selector};
use crate::domain::schema::{self, LCSH_COLUMN};
use crate::domain::OutputRow;

/// Separator for joined multi-value columns
pub const JOIN_SEPARATOR: &str = "; ";

/// How winning values are projected onto a rule's slots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// First value only
    First,
    /// All values joined with [`JOIN_SEPARATOR`]
    Join,
    /// Value `i` into slot `i`; values beyond the last slot are dropped
    Spread,
    /// First value that is an `http://` or `https://` URI
    Uri,
}

/// One mapping rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRule {
    /// Schema positions written, in fill order
    pub slots: Vec<usize>,
    /// Fallback chain of selector groups
    pub chain: Vec<Vec<Selector>>,
    /// Projection policy
    pub policy: Policy,
}

impl ColumnRule {
    /// Rule writing every column named `column`
    ///
    /// Returns `None` when the name is not part of the schema.
    pub fn new(column: &str, chain: Vec<Vec<Selector>>, policy: Policy) -> Option<Self> {
        let slots = schema::slots(column);
        if slots.is_empty() {
            return None;
        }
        Some(Self {
            slots,
            chain,
            policy,
        })
    }

    /// Rule with a single one-selector group
    pub fn single(column: &str, selector: Selector, policy: Policy) -> Option<Self> {
        Self::new(column, vec![vec![selector]], policy)
    }

    /// Values of the first chain group that yields anything
    pub fn resolve(&self, extractor: &FieldExtractor<'_>) -> Vec<String> {
        for group in &self.chain {
            let values: Vec<String> = group
                .iter()
                .flat_map(|selector| extractor.values(selector))
                .collect();
            if !values.is_empty() {
                return values;
            }
        }
        Vec::new()
    }

    /// Resolves and writes this rule into `row`
    pub fn apply(&self, extractor: &FieldExtractor<'_>, row: &mut OutputRow) {
        let values = self.resolve(extractor);
        if values.is_empty() {
            return;
        }

        match self.policy {
            Policy::First => {
                if let Some(slot) = self.slots.first() {
                    row.set(*slot, values[0].as_str());
                }
            }
            Policy::Join => {
                if let Some(slot) = self.slots.first() {
                    row.set(*slot, values.join(JOIN_SEPARATOR));
                }
            }
            Policy::Spread => {
                for (slot, value) in self.slots.iter().zip(values) {
                    row.set(*slot, value);
                }
            }
            Policy::Uri => {
                let uri = values
                    .iter()
                    .find(|v| v.starts_with("http://") || v.starts_with("https://"));
                if let (Some(slot), Some(uri)) = (self.slots.first(), uri) {
                    row.set(*slot, uri.as_str());
                }
            }
        }
    }
}

fn join(column: &str, selector: Selector) -> Option<ColumnRule> {
    ColumnRule::single(column, selector, Policy::Join)
}

fn first(column: &str, selector: Selector) -> Option<ColumnRule> {
    ColumnRule::single(column, selector, Policy::First)
}

/// The full rule table
///
/// Descriptive columns prefer Dublin Core, then MARC, then flat attributes.
/// Columns without a rule stay empty.
pub fn standard_rules(options: &MappingOptions) -> Vec<ColumnRule> {
    let mut subject_slots = schema::slots("dc:subject");
    subject_slots.extend(schema::slots(LCSH_COLUMN));

    let mut dcmi_chain = vec![vec![Selector::dcterms("type")]];
    if let Some(resource_type) = options.resource_type.as_deref() {
        dcmi_chain.push(vec![Selector::constant(resource_type)]);
    }

    let rules = vec![
        // Identity
        first("mms_id", Selector::flat("mms_id")),
        first("originating_system_id", Selector::flat("originating_system_id")),
        first(
            "compoundrelationship",
            Selector::institution("compoundrelationship"),
        ),
        // Core descriptive
        ColumnRule::new(
            "dc:title",
            vec![
                vec![Selector::dc("title")],
                vec![Selector::marc_all("245")],
                vec![Selector::flat("title")],
            ],
            Policy::First,
        ),
        join("dcterms:alternative", Selector::dcterms("alternative")),
        join("dc:identifier", Selector::dc("identifier")),
        ColumnRule::single(
            "dcterms:identifier.dcterms:URI",
            Selector::dc("identifier"),
            Policy::Uri,
        ),
        join("dcterms:tableOfContents", Selector::dcterms("tableOfContents")),
        ColumnRule::new(
            "dc:creator",
            vec![
                vec![Selector::dc("creator")],
                vec![Selector::marc("100", 'a')],
                vec![Selector::flat("author")],
            ],
            Policy::Join,
        ),
        join("dc:contributor", Selector::dc("contributor")),
        Some(ColumnRule {
            slots: subject_slots,
            chain: vec![
                vec![Selector::dc("subject"), Selector::dcterms("subject")],
                vec![Selector::marc_all("650")],
            ],
            policy: Policy::Spread,
        }),
        // Descriptive prose
        join("dc:description", Selector::dc("description")),
        join("dcterms:provenance", Selector::dcterms("provenance")),
        join(
            "dcterms:bibliographicCitation",
            Selector::dcterms("bibliographicCitation"),
        ),
        join("dcterms:abstract", Selector::dcterms("abstract")),
        // Publication
        ColumnRule::new(
            "dcterms:publisher",
            vec![
                vec![Selector::dcterms("publisher")],
                vec![Selector::marc("264", 'b'), Selector::marc("260", 'b')],
                vec![Selector::flat("publisher_const")],
            ],
            Policy::Spread,
        ),
        ColumnRule::new(
            "dc:date",
            vec![
                vec![Selector::dc("date")],
                vec![Selector::marc("264", 'c'), Selector::marc("260", 'c')],
                vec![Selector::flat("date_of_publication")],
            ],
            Policy::First,
        ),
        first("dcterms:created", Selector::dcterms("created")),
        ColumnRule::new(
            "dcterms:issued",
            vec![
                vec![Selector::dcterms("issued")],
                vec![Selector::flat("date_of_publication")],
            ],
            Policy::First,
        ),
        first("dcterms:dateSubmitted", Selector::dcterms("dateSubmitted")),
        first("dcterms:dateAccepted", Selector::dcterms("dateAccepted")),
        // Typing
        first("dc:type", Selector::dc("type")),
        first("dc:format", Selector::dc("format")),
        ColumnRule::new(
            "dcterms:extent",
            vec![
                vec![Selector::dcterms("extent")],
                vec![Selector::marc("300", 'a')],
            ],
            Policy::Spread,
        ),
        first("dcterms:medium", Selector::dcterms("medium")),
        first("dcterms:format.dcterms:IMT", Selector::dcterms("format")),
        ColumnRule::new("dcterms:type.dcterms:DCMIType", dcmi_chain, Policy::First),
        join("dc:language", Selector::dc("language")),
        // Relational
        join("dc:relation", Selector::dc("relation")),
        ColumnRule::new(
            "dcterms:isPartOf",
            vec![
                vec![Selector::dcterms("isPartOf")],
                vec![Selector::marc("490", 'a')],
            ],
            Policy::Spread,
        ),
        // Contextual
        join("dc:coverage", Selector::dc("coverage")),
        join("dcterms:spatial", Selector::dcterms("spatial")),
        join("dcterms:temporal", Selector::dcterms("temporal")),
        join("dc:rights", Selector::dc("rights")),
        join("dc:source", Selector::dc("source")),
        // Institution custom fields
        join("bib custom field", Selector::institution("bibcustomfield")),
        first("googlesheetsource", Selector::institution("googlesheetsource")),
        first("dginfo", Selector::institution("dginfo")),
    ];

    rules.into_iter().flatten().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::schema::COLUMN_COUNT;
    use crate::domain::BibliographicRecord;
    use serde_json::json;
    use std::collections::HashSet;

    #[test]
    fn test_every_rule_targets_known_columns() {
        let rules = standard_rules(&MappingOptions::default());
        assert_eq!(rules.len(), 38);
        for rule in &rules {
            assert!(!rule.slots.is_empty());
            assert!(rule.slots.iter().all(|slot| *slot < COLUMN_COUNT));
        }
    }

    #[test]
    fn test_no_slot_written_twice() {
        let rules = standard_rules(&MappingOptions::default());
        let mut seen = HashSet::new();
        for rule in &rules {
            for slot in &rule.slots {
                assert!(seen.insert(*slot), "slot {slot} written twice");
            }
        }
    }

    #[test]
    fn test_subject_rule_has_twelve_slots() {
        let rules = standard_rules(&MappingOptions::default());
        let subject = schema::slot("dc:subject").unwrap();
        let rule = rules.iter().find(|r| r.slots[0] == subject).unwrap();
        assert_eq!(rule.slots.len(), 12);
        assert_eq!(rule.policy, Policy::Spread);
    }

    #[test]
    fn test_unknown_column_yields_no_rule() {
        assert!(ColumnRule::single("dc:nothing", Selector::dc("x"), Policy::First).is_none());
    }

    #[test]
    fn test_resolve_uses_first_non_empty_group() {
        let record = BibliographicRecord::from_value(json!({
            "title": "Flat",
            "record": {"datafield": [{"tag": "245", "subfield": [
                {"code": "a", "#text": "MARC title /"},
                {"code": "c", "#text": "by someone."}
            ]}]}
        }))
        .unwrap();
        let extractor = FieldExtractor::new(&record, "01GCL_INST");

        let rule = ColumnRule::new(
            "dc:title",
            vec![
                vec![Selector::dc("title")],
                vec![Selector::marc_all("245")],
                vec![Selector::flat("title")],
            ],
            Policy::First,
        )
        .unwrap();

        assert_eq!(rule.resolve(&extractor), vec!["MARC title / by someone."]);
    }

    #[test]
    fn test_uri_policy_skips_non_uri_values() {
        let record = BibliographicRecord::from_value(json!({
            "anies": ["<r xmlns:dc=\"http://purl.org/dc/elements/1.1/\"><dc:identifier>local-1</dc:identifier><dc:identifier>https://hdl.handle.net/1/2</dc:identifier></r>"]
        }))
        .unwrap();
        let extractor = FieldExtractor::new(&record, "01GCL_INST");
        let rule = ColumnRule::single(
            "dcterms:identifier.dcterms:URI",
            Selector::dc("identifier"),
            Policy::Uri,
        )
        .unwrap();

        let mut row = OutputRow::new();
        rule.apply(&extractor, &mut row);
        assert_eq!(
            row.first("dcterms:identifier.dcterms:URI"),
            Some("https://hdl.handle.net/1/2")
        );
    }

    #[test]
    fn test_resource_type_constant_is_last_resort() {
        let options = MappingOptions {
            resource_type: Some("Text".to_string()),
            ..MappingOptions::default()
        };
        let rules = standard_rules(&options);
        let slot = schema::slot("dcterms:type.dcterms:DCMIType").unwrap();
        let rule = rules.iter().find(|r| r.slots == vec![slot]).unwrap();
        assert_eq!(rule.chain.len(), 2);
        assert_eq!(rule.chain[1], vec![Selector::constant("Text")]);
    }
}
