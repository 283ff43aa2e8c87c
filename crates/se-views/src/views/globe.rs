//! Country card shown when a country is picked on the globe

use std::sync::Arc;
use parking_lot::Mutex;
use serde::Serialize;
use tracing::debug;

use se_core::metrics::{CO2_EMISSIONS, ELECTRICITY_ACCESS, RENEWABLE_SHARE};
use se_core::{CountryPicked, EventBus, Table};
use se_data::CountryResolver;

use crate::format::{format_fixed, format_trimmed, NOT_AVAILABLE};

/// What the info card shows
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GlobeCard {
    Stats {
        /// Name as picked on the map
        name: String,
        /// Dataset entity it resolved to
        entity: String,
        year: i32,
        electricity_access: String,
        renewable_share: String,
        co2_emissions: String,
    },
    NoData {
        name: String,
        message: String,
    },
}

impl GlobeCard {
    pub fn name(&self) -> &str {
        match self {
            GlobeCard::Stats { name, .. } | GlobeCard::NoData { name, .. } => name,
        }
    }

    pub fn has_data(&self) -> bool {
        matches!(self, GlobeCard::Stats { .. })
    }
}

/// The card for the most recent globe pick
#[derive(Clone, Default)]
pub struct PickedCard {
    card: Arc<Mutex<Option<GlobeCard>>>,
}

impl PickedCard {
    pub fn current(&self) -> Option<GlobeCard> {
        self.card.lock().clone()
    }
}

/// Globe page
#[derive(Debug, Clone, Default)]
pub struct GlobeView {
    resolver: CountryResolver,
}

impl GlobeView {
    pub fn new(resolver: CountryResolver) -> Self {
        Self { resolver }
    }

    /// Card for the country named `name` on the map
    pub fn pick(&self, table: &Table, name: &str) -> GlobeCard {
        match self.resolver.resolve(table, name) {
            Some(record) => {
                debug!("Globe pick '{}' -> {} {}", name, record.entity, record.year);
                GlobeCard::Stats {
                    name: name.to_string(),
                    entity: record.entity.clone(),
                    year: record.year,
                    electricity_access: percent(record.metric(ELECTRICITY_ACCESS)),
                    renewable_share: percent(record.metric(RENEWABLE_SHARE)),
                    co2_emissions: format_trimmed(record.metric(CO2_EMISSIONS), 2),
                }
            }
            None => GlobeCard::NoData {
                name: name.to_string(),
                message: format!("No data available for {}.", self.resolver.preferred_year),
            },
        }
    }

    /// Answer every `CountryPicked` on `bus` with a card for `table`.
    ///
    /// Blank names are ignored and leave the previous card in place.
    pub fn follow(&self, bus: &EventBus, table: Arc<Table>) -> PickedCard {
        let picked = PickedCard::default();
        let card = picked.card.clone();
        let view = self.clone();

        bus.subscribe::<CountryPicked>(move |event| {
            if event.name.trim().is_empty() {
                return;
            }
            *card.lock() = Some(view.pick(&table, &event.name));
        });
        picked
    }
}

fn percent(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{}%", format_fixed(Some(v), 2)),
        _ => NOT_AVAILABLE.to_string(),
    }
}
