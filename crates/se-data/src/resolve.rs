//! Map-layer country names to dataset records
//!
//! Names on the globe and entity names in the dataset are not guaranteed to be
//! identical strings, so lookup falls back from an exact match to a loose one.

use tracing::debug;

use se_core::{Record, Table};

/// Two-tier name lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountryResolver {
    /// Year searched for an exact (case-insensitive, trimmed) name match
    pub preferred_year: i32,

    /// Year searched when no exact match exists; either name may contain the other
    pub fallback_year: i32,
}

impl Default for CountryResolver {
    fn default() -> Self {
        Self {
            preferred_year: 2019,
            fallback_year: 2020,
        }
    }
}

impl CountryResolver {
    pub fn new(preferred_year: i32, fallback_year: i32) -> Self {
        Self { preferred_year, fallback_year }
    }

    /// First record matching `name`, in table order.
    ///
    /// A blank name never matches.
    pub fn resolve<'a>(&self, table: &'a Table, name: &str) -> Option<&'a Record> {
        if name.trim().is_empty() {
            return None;
        }
        self.exact(table, name).or_else(|| self.loose(table, name))
    }

    fn exact<'a>(&self, table: &'a Table, name: &str) -> Option<&'a Record> {
        let wanted = name.trim().to_lowercase();
        table
            .for_year(self.preferred_year)
            .find(|r| !r.entity.is_empty() && r.entity.trim().to_lowercase() == wanted)
    }

    fn loose<'a>(&self, table: &'a Table, name: &str) -> Option<&'a Record> {
        let wanted = name.to_lowercase();
        let found = table.for_year(self.fallback_year).find(|r| {
            if r.entity.is_empty() {
                return false;
            }
            let entity = r.entity.to_lowercase();
            entity.contains(&wanted) || wanted.contains(&entity)
        });

        if let Some(record) = found {
            debug!("Resolved '{}' to '{}' by containment", name, record.entity);
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Table {
        Table::new(vec![
            Record::new("Germany", 2019).with_metric("co2", 1.0),
            Record::new("Germany", 2020).with_metric("co2", 2.0),
            Record::new("Congo", 2020).with_metric("co2", 3.0),
            Record::new("Democratic Republic of Congo", 2020).with_metric("co2", 4.0),
            Record::new("Niger", 2019).with_metric("co2", 5.0),
        ])
    }

    #[test]
    fn test_exact_match_prefers_preferred_year() {
        let table = table();
        let resolver = CountryResolver::default();

        let record = resolver.resolve(&table, "  gERMANY ").unwrap();
        assert_eq!(record.year, 2019);
        assert_eq!(record.metric("co2"), Some(1.0));
    }

    #[test]
    fn test_substring_fallback_uses_fallback_year() {
        let table = table();
        let resolver = CountryResolver::default();

        let record = resolver.resolve(&table, "Federal Republic of Germany").unwrap();
        assert_eq!((record.entity.as_str(), record.year), ("Germany", 2020));

        // first match in table order wins
        let congo = resolver.resolve(&table, "Congo (Kinshasa)").unwrap();
        assert_eq!(congo.entity, "Congo");
    }

    #[test]
    fn test_typo_without_containment_is_missing() {
        let table = table();
        assert!(CountryResolver::default().resolve(&table, "Deutschand").is_none());
    }

    #[test]
    fn test_blank_name_resolves_to_nothing() {
        let table = table();
        let resolver = CountryResolver::default();
        assert!(resolver.resolve(&table, "").is_none());
        assert!(resolver.resolve(&table, "   ").is_none());
    }

    #[test]
    fn test_fallback_only_searches_fallback_year() {
        let table = table();
        // Niger only exists in 2019, so "Nigeria" cannot reach it by containment
        assert!(CountryResolver::default().resolve(&table, "Nigeria").is_none());
        assert!(CountryResolver::new(2019, 2019).resolve(&table, "Nigeria").is_some());
    }
}
