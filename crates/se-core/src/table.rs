//! The loaded, immutable record table

use crate::record::Record;

/// Ordered sequence of records, loaded once and never mutated afterwards.
///
/// Shared between views behind an `Arc`; every query borrows it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    records: Vec<Record>,
}

impl Table {
    /// Create a table from records in source order
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// All records in source order
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Records observed in `year`, in table order
    pub fn for_year(&self, year: i32) -> impl Iterator<Item = &Record> + '_ {
        self.records.iter().filter(move |r| r.year == year)
    }

    /// Records of one entity, in table order
    pub fn for_entity<'a>(&'a self, entity: &'a str) -> impl Iterator<Item = &'a Record> + 'a {
        self.records.iter().filter(move |r| r.entity == entity)
    }
}

impl FromIterator<Record> for Table {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
