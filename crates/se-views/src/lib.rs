//! Presentation adapters for the sustainable-energy dashboard
//!
//! Views turn query results into plain chart specifications, table rows and
//! export payloads. Drawing is left to a [`ChartRenderer`]; this crate only
//! guarantees that each chart slot owns at most one live visual.

pub mod chart;
pub mod export;
pub mod format;
mod slot;
mod views;

pub use chart::{ChartKind, ChartRenderer, ChartSpec, Dataset};
pub use export::{ExportError, ExportFormat};
pub use format::{format_change, format_fixed, format_number, format_trimmed};
pub use slot::{ChartSlot, Visual};
pub use views::compare::{Comparison, ComparisonView, CountrySummary};
pub use views::globe::{GlobeCard, GlobeView, PickedCard};
pub use views::prediction::{Prediction, PredictionView};
pub use views::statistics::{ExportRows, SelectionInbox, StatRow, StatisticsSnapshot, StatisticsView};
