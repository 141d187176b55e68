use serde::Deserialize;
use std::collections::BTreeMap;

/// A recognized header label
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HeaderField {
    Title,
    Goal,
    Description,
    Scope,
    Creator,
    UsageNote,
}

impl HeaderField {
    /// The literal label authors write before the colon
    pub fn label(self) -> &'static str {
        match self {
            HeaderField::Title => "Snippet Title",
            HeaderField::Goal => "Goal",
            HeaderField::Description => "Description",
            HeaderField::Scope => "Scope",
            HeaderField::Creator => "Creator",
            HeaderField::UsageNote => "Usage note",
        }
    }
}

/// Versioned list of recognized header fields
///
/// New versions only ever append fields. A file written against an older
/// version parses under a newer one with the added fields set to `""`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderFieldSet {
    V1,
    #[default]
    V2,
}

const FIELDS_V1: &[HeaderField] = &[
    HeaderField::Title,
    HeaderField::Goal,
    HeaderField::Description,
    HeaderField::Scope,
];

const FIELDS_V2: &[HeaderField] = &[
    HeaderField::Title,
    HeaderField::Goal,
    HeaderField::Description,
    HeaderField::Scope,
    HeaderField::Creator,
    HeaderField::UsageNote,
];

impl HeaderFieldSet {
    pub fn fields(self) -> &'static [HeaderField] {
        match self {
            HeaderFieldSet::V1 => FIELDS_V1,
            HeaderFieldSet::V2 => FIELDS_V2,
        }
    }
}

/// Parsed header values, one entry per field of the set that was parsed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderValues {
    values: BTreeMap<HeaderField, String>,
}

impl HeaderValues {
    /// Every field of `set` mapped to `""`
    pub fn empty(set: HeaderFieldSet) -> Self {
        Self {
            values: set
                .fields()
                .iter()
                .map(|field| (*field, String::new()))
                .collect(),
        }
    }

    pub(crate) fn insert(&mut self, field: HeaderField, value: String) {
        self.values.insert(field, value);
    }

    /// Value of `field`, or `""` if it was absent or not part of the set
    pub fn get(&self, field: HeaderField) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    /// Whether `field` was part of the parsed set
    pub fn contains(&self, field: HeaderField) -> bool {
        self.values.contains_key(&field)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (HeaderField, &str)> {
        self.values.iter().map(|(k, v)| (*k, v.as_str()))
    }
}
