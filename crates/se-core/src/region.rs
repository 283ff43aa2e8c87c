//! Continental regions used by the regional aggregation views

use std::fmt;
use std::str::FromStr;

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// One of the six fixed continental groupings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Region {
    #[serde(rename = "North America")]
    NorthAmerica,
    #[serde(rename = "South America")]
    SouthAmerica,
    Europe,
    Africa,
    Asia,
    Oceania,
}

impl Region {
    /// All regions in display order
    pub const ALL: [Region; 6] = [
        Region::NorthAmerica,
        Region::SouthAmerica,
        Region::Europe,
        Region::Africa,
        Region::Asia,
        Region::Oceania,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Region::NorthAmerica => "North America",
            Region::SouthAmerica => "South America",
            Region::Europe => "Europe",
            Region::Africa => "Africa",
            Region::Asia => "Asia",
            Region::Oceania => "Oceania",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Region {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Region::ALL
            .iter()
            .copied()
            .find(|r| r.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown region '{}'", s))
    }
}

/// Latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Region name to member entities
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionMapping {
    regions: IndexMap<Region, IndexSet<String>>,
}

impl RegionMapping {
    /// Mapping with every region present and empty, in display order
    pub fn with_all_regions() -> Self {
        Self {
            regions: Region::ALL.iter().map(|r| (*r, IndexSet::new())).collect(),
        }
    }

    /// Add an entity to a region, creating the region entry if needed
    pub fn insert(&mut self, region: Region, entity: impl Into<String>) {
        self.regions.entry(region).or_default().insert(entity.into());
    }

    /// Members of a region, if the region is part of this mapping
    pub fn members(&self, region: Region) -> Option<&IndexSet<String>> {
        self.regions.get(&region)
    }

    /// Region an entity was assigned to
    pub fn region_of(&self, entity: &str) -> Option<Region> {
        self.regions
            .iter()
            .find(|(_, members)| members.contains(entity))
            .map(|(region, _)| *region)
    }

    pub fn regions(&self) -> impl Iterator<Item = Region> + '_ {
        self.regions.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Region, &IndexSet<String>)> + '_ {
        self.regions.iter().map(|(r, m)| (*r, m))
    }
}

impl<S: Into<String>> FromIterator<(Region, S)> for RegionMapping {
    fn from_iter<I: IntoIterator<Item = (Region, S)>>(iter: I) -> Self {
        let mut mapping = RegionMapping::default();
        for (region, entity) in iter {
            mapping.insert(region, entity);
        }
        mapping
    }
}
