use crate::model::enquiry::EnquiryRecord;
use crate::model::schema::EnquirySchema;
use crate::service::cascade::{FilterError, Selection};
use serde::Serialize;

/// Every criterion the user can set on one table.
///
/// The exact-find block is inert until armed: its values can be edited
/// freely without changing the result until `arm_exact` is called.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub search_text: String,
    pub primary: Selection,
    pub exact: Selection,
    pub exact_armed: bool,
}

impl FilterState {
    pub fn new(schema: &EnquirySchema) -> Self {
        Self {
            search_text: String::new(),
            primary: Selection::new(&schema.filters),
            exact: Selection::new(&schema.exact_find),
            exact_armed: false,
        }
    }

    pub fn set_primary(&mut self, schema: &EnquirySchema, key: &str, value: &str) -> Result<(), FilterError> {
        self.primary.set(schema, key, value)
    }

    pub fn set_exact(&mut self, schema: &EnquirySchema, key: &str, value: &str) -> Result<(), FilterError> {
        self.exact.set(schema, key, value)
    }

    pub fn arm_exact(&mut self) {
        self.exact_armed = true;
    }

    pub fn clear_exact(&mut self) {
        self.exact.reset();
        self.exact_armed = false;
    }

    pub fn reset(&mut self) {
        self.search_text.clear();
        self.primary.reset();
        self.clear_exact();
    }

    pub fn matches(&self, schema: &EnquirySchema, record: &EnquiryRecord) -> bool {
        self.passes(record, &schema.search_keys())
    }

    pub fn apply<'a>(&self, schema: &EnquirySchema, records: &'a [EnquiryRecord]) -> Vec<&'a EnquiryRecord> {
        let search_keys = schema.search_keys();
        records
            .iter()
            .filter(|record| self.passes(record, &search_keys))
            .collect()
    }

    fn passes(&self, record: &EnquiryRecord, search_keys: &[&str]) -> bool {
        matches_search(record, search_keys, &self.search_text)
            && matches_selection(record, &self.primary)
            && (!self.exact_armed || matches_selection(record, &self.exact))
    }

    /// Value a stats dimension reports on: an armed exact-find value wins,
    /// then the primary filter; `None` means "count everything".
    pub fn stats_selection(&self, key: &str) -> Option<&str> {
        let exact = if self.exact_armed {
            self.exact.constraint(key)
        } else {
            None
        };
        exact.or_else(|| self.primary.constraint(key))
    }

    pub fn stats(&self, schema: &EnquirySchema, records: &[EnquiryRecord]) -> Stats {
        let dimensions = schema
            .stats
            .iter()
            .map(|&key| {
                let selected = self.stats_selection(key);
                let count = match selected {
                    Some(value) => records
                        .iter()
                        .filter(|record| record.field(key) == Some(value))
                        .count(),
                    None => records.len(),
                };
                DimensionStat {
                    key,
                    label: schema.label(key),
                    selected: selected.map(str::to_string),
                    count,
                }
            })
            .collect();

        Stats {
            total: records.len(),
            dimensions,
        }
    }
}

/// Empty (or blank) query matches everything; otherwise the lowercased query
/// must be a substring of one of `keys`.
pub fn matches_search(record: &EnquiryRecord, keys: &[&str], query: &str) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }
    keys.iter()
        .filter_map(|key| record.field(key))
        .any(|value| value.to_lowercase().contains(&query))
}

pub fn matches_selection(record: &EnquiryRecord, selection: &Selection) -> bool {
    selection
        .active()
        .all(|(key, value)| record.field(key) == Some(value))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DimensionStat {
    pub key: &'static str,
    pub label: &'static str,
    pub selected: Option<String>,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub total: usize,
    pub dimensions: Vec<DimensionStat>,
}

impl Stats {
    pub fn count(&self, key: &str) -> Option<usize> {
        self.dimensions
            .iter()
            .find(|dimension| dimension.key == key)
            .map(|dimension| dimension.count)
    }
}
