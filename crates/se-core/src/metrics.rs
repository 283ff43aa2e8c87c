//! Metric catalog

use serde::{Deserialize, Serialize};

/// Renewable share of final energy consumption, in percent
pub const RENEWABLE_SHARE: &str = "Renewable energy share in the total final energy consumption (%)";
/// Share of the population with access to electricity, in percent
pub const ELECTRICITY_ACCESS: &str = "Access to electricity (% of population)";
/// CO2 emissions in kilotonnes
pub const CO2_EMISSIONS: &str = "Value_co2_emissions_kt_by_country";
/// GDP per capita in USD
pub const GDP_PER_CAPITA: &str = "gdp_per_capita";
pub const LATITUDE: &str = "Latitude";
pub const LONGITUDE: &str = "Longitude";

/// How a metric value is rendered for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NumberFormat {
    Percentage,
    LargeNumber,
    Currency,
    #[default]
    Plain,
}

/// A metric the dashboard knows how to present
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricDef {
    /// Short identifier used on the command line
    pub id: String,

    /// Column name in the dataset
    pub key: String,

    /// Human readable label
    pub label: String,

    pub format: NumberFormat,

    /// Hex colour used for chart datasets
    pub color: String,
}

impl MetricDef {
    pub fn new(id: &str, key: &str, label: &str, format: NumberFormat, color: &str) -> Self {
        Self {
            id: id.to_string(),
            key: key.to_string(),
            label: label.to_string(),
            format,
            color: color.to_string(),
        }
    }

    /// Percent metrics are plotted on an axis starting at zero
    pub fn begins_at_zero(&self) -> bool {
        self.format == NumberFormat::Percentage
    }
}

/// The four indicators shown by the dashboard
pub fn default_metrics() -> Vec<MetricDef> {
    vec![
        MetricDef::new("renewable", RENEWABLE_SHARE, "Renewable Energy (%)", NumberFormat::Percentage, "#48bb78"),
        MetricDef::new("electricity", ELECTRICITY_ACCESS, "Access to Electricity (%)", NumberFormat::Percentage, "#4299e1"),
        MetricDef::new("co2", CO2_EMISSIONS, "CO2 Emissions (kt)", NumberFormat::LargeNumber, "#f56565"),
        MetricDef::new("gdp", GDP_PER_CAPITA, "GDP per Capita", NumberFormat::Currency, "#f6ad55"),
    ]
}

/// Look up a metric by id, falling back to an exact column-name match
pub fn find_metric<'a>(metrics: &'a [MetricDef], id_or_key: &str) -> Option<&'a MetricDef> {
    metrics
        .iter()
        .find(|m| m.id.eq_ignore_ascii_case(id_or_key))
        .or_else(|| metrics.iter().find(|m| m.key == id_or_key))
}
