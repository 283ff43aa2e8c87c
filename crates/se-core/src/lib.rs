//! Core functionality for the sustainable-energy dashboard
//! 
//! This crate provides the record/table model, region and metric definitions,
//! the derived view value objects and the shared dashboard state.

pub mod events;
pub mod entity;
pub mod metrics;
pub mod record;
pub mod region;
pub mod state;
pub mod table;
pub mod views;

// Re-export commonly used types
pub use entity::is_aggregate;
pub use events::{CountryPicked, Event, EventBus, SelectionChanged, SubscriptionId};
pub use metrics::{MetricDef, NumberFormat, default_metrics};
pub use record::{MetricValue, Record};
pub use region::{Coordinates, Region, RegionMapping};
pub use state::{DashboardState, RankingMode, Selection};
pub use table::Table;
pub use views::{MetricChange, RankedValue, TrendPoint, YearValue};
