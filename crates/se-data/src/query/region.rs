//! Coarse continental classification from coordinates
//!
//! This is a heuristic: boxes of latitude/longitude checked in a fixed order.
//! It is not geographically authoritative, only deterministic.

use indexmap::IndexMap;
use tracing::debug;

use se_core::metrics::{LATITUDE, LONGITUDE};
use se_core::{Coordinates, Region, RegionMapping, Table, is_aggregate};

/// One box rule: the first matching rule decides the region
struct RegionRule {
    region: Region,
    matches: fn(Coordinates) -> bool,
}

const RULES: &[RegionRule] = &[
    RegionRule {
        region: Region::NorthAmerica,
        matches: |c| (-170.0..=-30.0).contains(&c.lng) && c.lat >= 15.0,
    },
    RegionRule {
        region: Region::SouthAmerica,
        matches: |c| (-85.0..=-30.0).contains(&c.lng) && c.lat < 15.0,
    },
    RegionRule {
        region: Region::Europe,
        matches: |c| (-30.0..=45.0).contains(&c.lng) && c.lat >= 35.0,
    },
    RegionRule {
        region: Region::Africa,
        matches: |c| (-30.0..=60.0).contains(&c.lng) && (-40.0..35.0).contains(&c.lat),
    },
    RegionRule {
        region: Region::Asia,
        matches: |c| c.lng > 60.0 && c.lng <= 180.0 && c.lat >= -10.0,
    },
    RegionRule {
        region: Region::Oceania,
        matches: |c| ((c.lng > 60.0 && c.lng <= 180.0) || (-180.0..-170.0).contains(&c.lng)) && c.lat < -10.0,
    },
];

/// Everything no rule claims
const DEFAULT_REGION: Region = Region::Asia;

/// Region for a single coordinate pair
pub fn classify_coordinates(coords: Coordinates) -> Region {
    RULES
        .iter()
        .find(|rule| (rule.matches)(coords))
        .map(|rule| rule.region)
        .unwrap_or(DEFAULT_REGION)
}

/// Assign every non-aggregate entity with known coordinates to one region.
///
/// A coordinate of exactly zero counts as unknown, like a missing one. The
/// last record carrying both coordinates decides an entity's position;
/// members are listed in order of the entity's first appearance. All six
/// regions are present in the result, possibly empty.
pub fn classify_by_region(table: &Table) -> RegionMapping {
    let mut positions: IndexMap<&str, Coordinates> = IndexMap::new();
    let known = |value: Option<f64>| value.filter(|v| *v != 0.0);
    for record in table {
        if let (Some(lat), Some(lng)) = (known(record.metric(LATITUDE)), known(record.metric(LONGITUDE))) {
            positions.insert(record.entity.as_str(), Coordinates::new(lat, lng));
        }
    }

    let mut mapping = RegionMapping::with_all_regions();
    for (entity, coords) in positions {
        if is_aggregate(entity) {
            continue;
        }
        mapping.insert(classify_coordinates(coords), entity);
    }

    debug!("Classified entities into {} regions", Region::ALL.len());
    mapping
}

#[cfg(test)]
mod tests {
    use super::*;
    use se_core::Record;

    fn at(lat: f64, lng: f64) -> Region {
        classify_coordinates(Coordinates::new(lat, lng))
    }

    #[test]
    fn test_rule_boxes() {
        assert_eq!(at(38.9, -77.0), Region::NorthAmerica); // Washington
        assert_eq!(at(-15.8, -47.9), Region::SouthAmerica); // Brasilia
        assert_eq!(at(52.5, 13.4), Region::Europe); // Berlin
        assert_eq!(at(-1.3, 36.8), Region::Africa); // Nairobi
        assert_eq!(at(35.7, 139.7), Region::Asia); // Tokyo
        assert_eq!(at(-35.3, 149.1), Region::Oceania); // Canberra
        assert_eq!(at(-14.3, -170.7), Region::Oceania); // American Samoa, west of -170
    }

    #[test]
    fn test_rule_priority_and_default() {
        // inside both the North America and South America longitude bands
        assert_eq!(at(15.0, -60.0), Region::NorthAmerica);
        assert_eq!(at(14.9, -60.0), Region::SouthAmerica);
        // Baghdad sits inside the Africa box
        assert_eq!(at(33.3, 44.4), Region::Africa);
        // the Caspian falls through every box
        assert_eq!(at(40.0, 50.0), Region::Asia);
        // far south Atlantic matches nothing
        assert_eq!(at(-60.0, -20.0), Region::Asia);
        // date-line sliver north of -10
        assert_eq!(at(0.0, -175.0), Region::Asia);
    }

    fn located(entity: &str, year: i32, lat: f64, lng: f64) -> Record {
        Record::new(entity, year).with_metric(LATITUDE, lat).with_metric(LONGITUDE, lng)
    }

    #[test]
    fn test_classify_table() {
        let table = Table::new(vec![
            located("Kenya", 2000, -1.3, 36.8),
            located("World", 2000, 0.0, 0.0),
            located("European Union", 2000, 50.0, 10.0),
            located("Fiji", 2000, -17.7, 178.1),
            Record::new("Atlantis", 2000),
            located("Kenya", 2001, 52.0, 13.0),
            located("Germany", 2000, 51.2, 10.5),
        ]);

        let mapping = classify_by_region(&table);

        // last coordinates win for Kenya
        assert_eq!(mapping.region_of("Kenya"), Some(Region::Europe));
        let europe: Vec<_> = mapping.members(Region::Europe).unwrap().iter().cloned().collect();
        assert_eq!(europe, vec!["Kenya", "Germany"]);
        assert_eq!(mapping.region_of("Fiji"), Some(Region::Oceania));
        assert_eq!(mapping.region_of("World"), None);
        assert_eq!(mapping.region_of("European Union"), None);
        assert_eq!(mapping.region_of("Atlantis"), None);
        assert!(mapping.members(Region::Africa).unwrap().is_empty());
    }

    #[test]
    fn test_zero_coordinate_is_unknown() {
        let table = Table::new(vec![
            located("Gabon", 2000, 0.0, 11.6),
            located("Ghana", 2000, 7.9, 0.0),
            located("Kenya", 2000, -0.02, 37.9),
        ]);

        let mapping = classify_by_region(&table);
        assert_eq!(mapping.region_of("Gabon"), None);
        assert_eq!(mapping.region_of("Ghana"), None);
        assert_eq!(mapping.region_of("Kenya"), Some(Region::Africa));
    }

    #[test]
    fn test_classification_is_idempotent() {
        let table = Table::new(vec![
            located("Peru", 2000, -9.2, -75.0),
            located("India", 2000, 20.6, 79.0),
        ]);
        assert_eq!(classify_by_region(&table), classify_by_region(&table));
    }
}
