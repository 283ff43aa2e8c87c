use std::sync::Arc;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::events::{CountryPicked, EventBus, SelectionChanged};

/// Which ranking the statistics page shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankingMode {
    /// Highest values first
    #[default]
    Top,
    /// Lowest values first
    Bottom,
    /// Global average over the years
    Global,
}

/// What the user is currently looking at
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    /// Metric id from the catalog
    pub metric: String,

    /// Year used by rankings and regional views
    pub year: i32,

    pub mode: RankingMode,

    /// Year changes are measured against
    pub baseline_year: i32,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            metric: "renewable".to_string(),
            year: 2020,
            mode: RankingMode::Top,
            baseline_year: 2000,
        }
    }
}

/// Shared dashboard state
pub struct DashboardState {
    /// The current selection
    selection: Arc<RwLock<Selection>>,

    /// The event bus
    pub event_bus: Arc<EventBus>,
}

impl DashboardState {
    /// Create a new dashboard state
    pub fn new(selection: Selection) -> Self {
        Self {
            selection: Arc::new(RwLock::new(selection)),
            event_bus: Arc::new(EventBus::new()),
        }
    }

    /// Snapshot of the current selection
    pub fn selection(&self) -> Selection {
        self.selection.read().clone()
    }

    pub fn set_year(&self, year: i32) {
        self.update(|s| s.year = year);
    }

    pub fn set_metric(&self, metric: impl Into<String>) {
        let metric = metric.into();
        self.update(|s| s.metric = metric);
    }

    pub fn set_mode(&self, mode: RankingMode) {
        self.update(|s| s.mode = mode);
    }

    /// Forward a globe click
    pub fn pick_country(&self, name: impl Into<String>) {
        self.event_bus.publish(CountryPicked { name: name.into() });
    }

    /// Apply a change and publish it if anything actually changed
    fn update(&self, change: impl FnOnce(&mut Selection)) {
        let updated = {
            let mut selection = self.selection.write();
            let before = selection.clone();
            change(&mut selection);
            (*selection != before).then(|| selection.clone())
        };

        // publish outside the lock so handlers may read the state
        if let Some(selection) = updated {
            debug!("Selection changed to {:?}", selection);
            self.event_bus.publish(SelectionChanged { selection });
        }
    }
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new(Selection::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[test]
    fn test_selection_change_publishes_once() {
        let state = DashboardState::default();
        let changes = Arc::new(Mutex::new(Vec::new()));

        let sink = changes.clone();
        state
            .event_bus
            .subscribe::<SelectionChanged>(move |changed| sink.lock().push(changed.selection.year));

        state.set_year(2015);
        state.set_year(2015);
        state.set_mode(RankingMode::Bottom);

        assert_eq!(*changes.lock(), vec![2015, 2015]);
        assert_eq!(state.selection().mode, RankingMode::Bottom);
    }

    #[test]
    fn test_pick_country_is_published() {
        let state = DashboardState::default();
        let picked = Arc::new(Mutex::new(None));

        let sink = picked.clone();
        state
            .event_bus
            .subscribe::<CountryPicked>(move |event| *sink.lock() = Some(event.name.clone()));

        state.pick_country("Chile");
        assert_eq!(picked.lock().as_deref(), Some("Chile"));
    }
}
