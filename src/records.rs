//! Result rows for comparing extrapolation methods across noise levels.

use serde::{Deserialize, Serialize};

/// One extrapolation outcome. Immutable once built.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Record {
    extrapolation_type: String,
    noise_strength: f64,
    scale_factor: f64,
    value: f64,
}

impl Record {
    pub fn extrapolation_type(&self) -> &str {
        &self.extrapolation_type
    }

    pub fn noise_strength(&self) -> f64 {
        self.noise_strength
    }

    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

/// Builds a single record row.
pub fn make_record(method: &str, noise_strength: f64, scale_factor: f64, value: f64) -> Record {
    Record {
        extrapolation_type: method.to_string(),
        noise_strength,
        scale_factor,
        value,
    }
}

/// Ordered collection of records.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordTable {
    records: Vec<Record>,
}

impl RecordTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }

    /// Rows produced by one extrapolation method, in insertion order.
    pub fn by_method<'a>(&'a self, method: &'a str) -> impl Iterator<Item = &'a Record> + 'a {
        self.records
            .iter()
            .filter(move |r| r.extrapolation_type == method)
    }

    /// Rows for one noise strength, in insertion order.
    pub fn by_noise_strength(&self, noise_strength: f64) -> impl Iterator<Item = &Record> {
        self.records
            .iter()
            .filter(move |r| r.noise_strength == noise_strength)
    }

    /// Renders the table as a JSON array of row objects.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl FromIterator<Record> for RecordTable {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl Extend<Record> for RecordTable {
    fn extend<I: IntoIterator<Item = Record>>(&mut self, iter: I) {
        self.records.extend(iter);
    }
}

impl<'a> IntoIterator for &'a RecordTable {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
