//! Fixed output column schema
//!
//! The export layout is fixed by the downstream digital-collections loader.
//! Several names repeat; a column is identified by its position, never by its
//! name alone.

/// Repeated subject heading column
pub const LCSH_COLUMN: &str = "dcterms:subject.dcterms:LCSH";

/// Ordered output columns
pub const COLUMNS: [&str; 68] = [
    "group_id",
    "collection_id",
    "mms_id",
    "originating_system_id",
    "compoundrelationship",
    "dc:title",
    "dcterms:alternative",
    "oldalttitle",
    "dc:identifier",
    "dcterms:identifier.dcterms:URI",
    "dcterms:tableOfContents",
    "dc:creator",
    "dc:contributor",
    "dc:subject",
    LCSH_COLUMN,
    LCSH_COLUMN,
    LCSH_COLUMN,
    LCSH_COLUMN,
    LCSH_COLUMN,
    LCSH_COLUMN,
    LCSH_COLUMN,
    LCSH_COLUMN,
    LCSH_COLUMN,
    LCSH_COLUMN,
    LCSH_COLUMN,
    "dc:description",
    "dcterms:provenance",
    "dcterms:bibliographicCitation",
    "dcterms:abstract",
    "dcterms:publisher",
    "dcterms:publisher",
    "dc:date",
    "dcterms:created",
    "dcterms:issued",
    "dcterms:dateSubmitted",
    "dcterms:dateAccepted",
    "dc:type",
    "dc:format",
    "dcterms:extent",
    "dcterms:extent",
    "dcterms:medium",
    "dcterms:format.dcterms:IMT",
    "dcterms:type.dcterms:DCMIType",
    "dc:language",
    "dc:relation",
    "dcterms:isPartOf",
    "dcterms:isPartOf",
    "dcterms:isPartOf",
    "dc:coverage",
    "dcterms:spatial",
    "dcterms:spatial.dcterms:Point",
    "dcterms:temporal",
    "dc:rights",
    "dc:source",
    "bib custom field",
    "rep_label",
    "rep_public_note",
    "rep_access_rights",
    "rep_usage_type",
    "rep_library",
    "rep_note",
    "rep_custom field",
    "file_name_1",
    "file_label_1",
    "file_name_2",
    "file_label_2",
    "googlesheetsource",
    "dginfo",
];

/// Number of output columns
pub const COLUMN_COUNT: usize = COLUMNS.len();

/// Every position holding `name`, in schema order
pub fn slots(name: &str) -> Vec<usize> {
    COLUMNS
        .iter()
        .enumerate()
        .filter(|(_, column)| **column == name)
        .map(|(index, _)| index)
        .collect()
}

/// First position holding `name`
pub fn slot(name: &str) -> Option<usize> {
    COLUMNS.iter().position(|column| *column == name)
}

/// One output row, one string per schema position
///
/// Unset positions hold the empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRow {
    values: Vec<String>,
}

impl OutputRow {
    /// Creates a row with every column empty
    pub fn new() -> Self {
        Self {
            values: vec![String::new(); COLUMN_COUNT],
        }
    }

    /// Sets the value at a schema position; out-of-range positions are ignored
    pub fn set(&mut self, position: usize, value: impl Into<String>) {
        if let Some(cell) = self.values.get_mut(position) {
            *cell = value.into();
        }
    }

    /// Value at a schema position
    pub fn get(&self, position: usize) -> Option<&str> {
        self.values.get(position).map(String::as_str)
    }

    /// Value of the first column named `name`
    pub fn first(&self, name: &str) -> Option<&str> {
        slot(name).and_then(|position| self.get(position))
    }

    /// Values of every column named `name`, in schema order
    pub fn all(&self, name: &str) -> Vec<&str> {
        slots(name)
            .into_iter()
            .filter_map(|position| self.get(position))
            .collect()
    }

    /// All values in schema order
    pub fn values(&self) -> &[String] {
        &self.values
    }
}

impl Default for OutputRow {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_layout() {
        assert_eq!(COLUMN_COUNT, 68);
        assert_eq!(COLUMNS[0], "group_id");
        assert_eq!(COLUMNS[COLUMN_COUNT - 1], "dginfo");
        assert_eq!(slots(LCSH_COLUMN).len(), 11);
        assert_eq!(slots("dcterms:publisher").len(), 2);
        assert_eq!(slots("dcterms:extent").len(), 2);
        assert_eq!(slots("dcterms:isPartOf").len(), 3);
    }

    #[test]
    fn test_lcsh_follows_primary_subject() {
        let subject = slot("dc:subject").unwrap();
        let lcsh = slots(LCSH_COLUMN);
        let expected: Vec<usize> = (subject + 1..subject + 12).collect();
        assert_eq!(lcsh, expected);
    }

    #[test]
    fn test_slot_missing() {
        assert_eq!(slot("dc:nothing"), None);
        assert!(slots("dc:nothing").is_empty());
    }

    #[test]
    fn test_output_row_defaults_empty() {
        let row = OutputRow::new();
        assert_eq!(row.values().len(), COLUMN_COUNT);
        assert!(row.values().iter().all(String::is_empty));
    }

    #[test]
    fn test_output_row_set_and_get() {
        let mut row = OutputRow::new();
        let publishers = slots("dcterms:publisher");
        row.set(publishers[1], "Second");
        row.set(COLUMN_COUNT + 5, "ignored");

        assert_eq!(row.all("dcterms:publisher"), vec!["", "Second"]);
        assert_eq!(row.first("dcterms:publisher"), Some(""));
        assert_eq!(row.get(COLUMN_COUNT), None);
    }
}
