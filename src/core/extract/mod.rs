//! Field extraction across the three record shapes
//!
//! A [`Selector`] names one value source: a flat attribute, a namespaced
//! element of the embedded XML document, a MARC datafield/subfield, or a
//! constant. [`FieldExtractor`] evaluates selectors against one record and
//! always returns an ordered, trimmed list of non-empty values. Anomalies in
//! the record degrade to an empty list.

pub mod marc;
pub mod xml;

pub use xml::XmlIndex;

use crate::domain::BibliographicRecord;

/// Dublin Core elements namespace
pub const DC_NAMESPACE: &str = "http://purl.org/dc/elements/1.1/";

/// DCMI terms namespace
pub const DCTERMS_NAMESPACE: &str = "http://purl.org/dc/terms/";

/// Prefix of the per-institution custom namespace
pub const INSTITUTION_NAMESPACE_PREFIX: &str = "http://alma.exlibrisgroup.com/dc/";

/// XML namespace a selector searches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Namespace {
    /// `dc:`
    Dc,
    /// `dcterms:`
    DcTerms,
    /// The record's institution namespace
    Institution,
}

/// One value source
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Top-level scalar attribute
    Flat { attribute: &'static str },
    /// Namespaced descendant element of the embedded document
    Xml {
        namespace: Namespace,
        element: &'static str,
    },
    /// MARC datafield, optionally narrowed to one subfield code
    Marc { tag: &'static str, code: Option<char> },
    /// Fixed value
    Constant { value: String },
}

impl Selector {
    pub fn flat(attribute: &'static str) -> Self {
        Self::Flat { attribute }
    }

    pub fn dc(element: &'static str) -> Self {
        Self::Xml {
            namespace: Namespace::Dc,
            element,
        }
    }

    pub fn dcterms(element: &'static str) -> Self {
        Self::Xml {
            namespace: Namespace::DcTerms,
            element,
        }
    }

    pub fn institution(element: &'static str) -> Self {
        Self::Xml {
            namespace: Namespace::Institution,
            element,
        }
    }

    pub fn marc(tag: &'static str, code: char) -> Self {
        Self::Marc {
            tag,
            code: Some(code),
        }
    }

    pub fn marc_all(tag: &'static str) -> Self {
        Self::Marc { tag, code: None }
    }

    pub fn constant(value: impl Into<String>) -> Self {
        Self::Constant {
            value: value.into(),
        }
    }
}

/// Evaluates selectors against one record
///
/// The embedded document is parsed once, on construction.
///
/// # Examples
///
/// ```
/// use bibexport::core::extract::{FieldExtractor, Selector};
/// use bibexport::domain::BibliographicRecord;
/// use serde_json::json;
///
/// let record = BibliographicRecord::from_value(json!({
///     "title": " Flat title ",
///     "anies": ["<r xmlns:dc=\"http://purl.org/dc/elements/1.1/\"><dc:title>DC title</dc:title></r>"]
/// }))
/// .unwrap();
///
/// let extractor = FieldExtractor::new(&record, "01GCL_INST");
/// assert_eq!(extractor.values(&Selector::dc("title")), vec!["DC title"]);
/// assert_eq!(extractor.values(&Selector::flat("title")), vec!["Flat title"]);
/// ```
pub struct FieldExtractor<'r> {
    record: &'r BibliographicRecord,
    document: XmlIndex,
    institution_namespace: String,
}

impl<'r> FieldExtractor<'r> {
    /// Prepares extraction for `record`
    ///
    /// `default_institution` is used for the institution namespace when the
    /// record has no `originating_system` attribute.
    pub fn new(record: &'r BibliographicRecord, default_institution: &str) -> Self {
        let document = record
            .anies_document()
            .map(XmlIndex::parse)
            .unwrap_or_default();

        let institution = record
            .attr("originating_system")
            .unwrap_or_else(|| default_institution.to_string());

        Self {
            record,
            document,
            institution_namespace: format!("{INSTITUTION_NAMESPACE_PREFIX}{institution}"),
        }
    }

    /// The record being extracted from
    pub fn record(&self) -> &BibliographicRecord {
        self.record
    }

    /// Resolved URI of the institution namespace for this record
    pub fn institution_namespace(&self) -> &str {
        &self.institution_namespace
    }

    fn namespace_uri(&self, namespace: Namespace) -> &str {
        match namespace {
            Namespace::Dc => DC_NAMESPACE,
            Namespace::DcTerms => DCTERMS_NAMESPACE,
            Namespace::Institution => &self.institution_namespace,
        }
    }

    /// Ordered values for one selector
    pub fn values(&self, selector: &Selector) -> Vec<String> {
        match selector {
            Selector::Flat { attribute } => self
                .record
                .attr(attribute)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .into_iter()
                .collect(),
            Selector::Xml { namespace, element } => {
                let values = self.document.find(self.namespace_uri(*namespace), element);
                if !values.is_empty() {
                    tracing::trace!(
                        element = %element,
                        count = values.len(),
                        "Extracted embedded metadata values"
                    );
                }
                values
            }
            Selector::Marc { tag, code } => marc::marc_values(self.record, tag, *code),
            Selector::Constant { value } => {
                let value = value.trim();
                if value.is_empty() {
                    Vec::new()
                } else {
                    vec![value.to_string()]
                }
            }
        }
    }
}

/// One-shot extraction; prefer [`FieldExtractor`] for several selectors
pub fn extract(
    record: &BibliographicRecord,
    selector: &Selector,
    default_institution: &str,
) -> Vec<String> {
    FieldExtractor::new(record, default_institution).values(selector)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn record(value: Value) -> BibliographicRecord {
        BibliographicRecord::from_value(value).unwrap()
    }

    #[test]
    fn test_flat_selector_trims_and_drops_empty() {
        let rec = record(json!({"title": "  T  ", "author": "   ", "mms_id": 991}));
        assert_eq!(extract(&rec, &Selector::flat("title"), "X"), vec!["T"]);
        assert!(extract(&rec, &Selector::flat("author"), "X").is_empty());
        assert!(extract(&rec, &Selector::flat("missing"), "X").is_empty());
        assert_eq!(extract(&rec, &Selector::flat("mms_id"), "X"), vec!["991"]);
    }

    #[test]
    fn test_institution_namespace_from_record() {
        let rec = record(json!({
            "originating_system": "OTHER_INST",
            "anies": ["<r xmlns:g=\"http://alma.exlibrisgroup.com/dc/OTHER_INST\"><g:dginfo>info</g:dginfo></r>"]
        }));
        let extractor = FieldExtractor::new(&rec, "01GCL_INST");
        assert_eq!(
            extractor.institution_namespace(),
            "http://alma.exlibrisgroup.com/dc/OTHER_INST"
        );
        assert_eq!(extractor.values(&Selector::institution("dginfo")), vec!["info"]);
    }

    #[test]
    fn test_institution_namespace_default() {
        let rec = record(json!({
            "anies": ["<r xmlns:g=\"http://alma.exlibrisgroup.com/dc/01GCL_INST\"><g:dginfo>x</g:dginfo></r>"]
        }));
        assert_eq!(
            extract(&rec, &Selector::institution("dginfo"), "01GCL_INST"),
            vec!["x"]
        );
        assert!(extract(&rec, &Selector::institution("dginfo"), "ELSEWHERE").is_empty());
    }

    #[test]
    fn test_missing_or_invalid_anies() {
        for value in [
            json!({}),
            json!({"anies": []}),
            json!({"anies": null}),
            json!({"anies": ["<broken"]}),
        ] {
            let rec = record(value);
            assert!(extract(&rec, &Selector::dc("title"), "X").is_empty());
        }
    }

    #[test]
    fn test_constant_selector() {
        let rec = record(json!({}));
        assert_eq!(extract(&rec, &Selector::constant("Text"), "X"), vec!["Text"]);
        assert!(extract(&rec, &Selector::constant(" "), "X").is_empty());
    }

    #[test]
    fn test_marc_selector_delegates() {
        let rec = record(json!({
            "record": {"datafield": [{"tag": "300", "subfield": [{"code": "a", "#text": "1 v."}]}]}
        }));
        assert_eq!(extract(&rec, &Selector::marc("300", 'a'), "X"), vec!["1 v."]);
    }
}
