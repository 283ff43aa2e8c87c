//! Statistics page: rankings, global trend and regional comparison

use std::sync::Arc;
use anyhow::Context;
use parking_lot::Mutex;
use serde::Serialize;
use tracing::debug;

use se_core::{
    EventBus, MetricDef, RankedValue, RankingMode, RegionMapping, Selection, SelectionChanged, Table, YearValue,
};
use se_data::query;

use crate::chart::{ChartKind, ChartRenderer, ChartSpec, Dataset};
use crate::export::{self, ExportError};
use crate::format::{NOT_AVAILABLE, format_change, format_number};
use crate::slot::ChartSlot;

/// One line of the data table under the main chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatRow {
    pub rank: usize,
    /// Country name or year
    pub label: String,
    pub value: String,
    /// Change since the baseline year
    pub change: String,
}

/// Data behind the main chart, ready for export
#[derive(Debug, Clone, PartialEq)]
pub enum ExportRows {
    Ranking(Vec<RankedValue>),
    Yearly(Vec<YearValue>),
}

impl ExportRows {
    pub fn to_csv(&self, label: &str) -> Result<String, ExportError> {
        match self {
            ExportRows::Ranking(rows) => export::ranking_csv(label, rows),
            ExportRows::Yearly(rows) => export::yearly_csv(label, rows),
        }
    }

    pub fn to_json(&self) -> Result<String, ExportError> {
        match self {
            ExportRows::Ranking(rows) => export::to_json(rows),
            ExportRows::Yearly(rows) => export::to_json(rows),
        }
    }
}

/// Everything the statistics page shows for one selection
#[derive(Debug, Clone, PartialEq)]
pub struct StatisticsSnapshot {
    pub title: String,
    pub main: ChartSpec,
    pub trends: ChartSpec,
    pub regions: ChartSpec,
    pub rows: Vec<StatRow>,
    pub export: ExportRows,
}

/// Latest selection published on the bus that the page has not drawn yet.
///
/// Several changes in a row collapse into the last one, so the page redraws
/// once per burst of control changes.
#[derive(Clone, Default)]
pub struct SelectionInbox {
    latest: Arc<Mutex<Option<Selection>>>,
}

impl SelectionInbox {
    /// Collect every `SelectionChanged` published on `bus`
    pub fn subscribe(bus: &EventBus) -> Self {
        let inbox = Self::default();
        let latest = inbox.latest.clone();
        bus.subscribe::<SelectionChanged>(move |changed| {
            *latest.lock() = Some(changed.selection.clone());
        });
        inbox
    }

    /// The pending selection, leaving the inbox empty
    pub fn take(&self) -> Option<Selection> {
        self.latest.lock().take()
    }
}

/// Statistics page
pub struct StatisticsView<R: ChartRenderer> {
    renderer: R,
    regions: RegionMapping,
    limit: usize,

    main_chart: ChartSlot<R::Handle>,
    trends_chart: ChartSlot<R::Handle>,
    regions_chart: ChartSlot<R::Handle>,

    // Cached snapshot
    cached: Option<(Selection, StatisticsSnapshot)>,
}

impl<R: ChartRenderer> StatisticsView<R> {
    /// Create a new statistics view
    pub fn new(renderer: R, regions: RegionMapping, limit: usize) -> Self {
        Self {
            renderer,
            regions,
            limit,
            main_chart: ChartSlot::new("main"),
            trends_chart: ChartSlot::new("trends"),
            regions_chart: ChartSlot::new("regions"),
            cached: None,
        }
    }

    /// Recompute and redraw for `selection`, unless it was the last one shown
    pub fn refresh(&mut self, table: &Table, metric: &MetricDef, selection: &Selection) -> anyhow::Result<&StatisticsSnapshot> {
        let stale = self.cached.as_ref().map_or(true, |(shown, _)| shown != selection);
        if stale {
            self.cached = None;
            let snapshot = Self::snapshot(table, metric, selection, &self.regions, self.limit);

            let renderer = &mut self.renderer;
            self.main_chart
                .replace_with(|| renderer.render(&snapshot.main))
                .context("drawing main chart")?;
            self.trends_chart
                .replace_with(|| renderer.render(&snapshot.trends))
                .context("drawing trends chart")?;
            self.regions_chart
                .replace_with(|| renderer.render(&snapshot.regions))
                .context("drawing regions chart")?;

            self.cached = Some((selection.clone(), snapshot));
        }

        let (_, snapshot) = self.cached.as_ref().context("statistics snapshot missing after refresh")?;
        Ok(snapshot)
    }

    /// Build the page contents without drawing anything
    pub fn snapshot(
        table: &Table,
        metric: &MetricDef,
        selection: &Selection,
        regions: &RegionMapping,
        limit: usize,
    ) -> StatisticsSnapshot {
        debug!("Building statistics for {} / {} / {:?}", metric.id, selection.year, selection.mode);

        let global = query::global_average_by_year(table, &metric.key);
        let yearly: Vec<YearValue> = global.iter().map(|(&year, &value)| YearValue { year, value }).collect();

        let (title, main, rows, export) = match selection.mode {
            RankingMode::Global => {
                let title = format!("Global Average {} ({})", metric.label, selection.year);
                let main = ChartSpec::new(ChartKind::Bar, title.clone())
                    .with_labels(yearly.iter().map(|y| y.year))
                    .with_dataset(Dataset::dense(
                        format!("Global Average {}", metric.label),
                        yearly.iter().map(|y| y.value),
                        metric.color.clone(),
                    ))
                    .begin_at_zero(metric.begins_at_zero());
                let rows = yearly
                    .iter()
                    .enumerate()
                    .map(|(i, y)| StatRow {
                        rank: i + 1,
                        label: y.year.to_string(),
                        value: format_number(Some(y.value), metric.format),
                        change: NOT_AVAILABLE.to_string(),
                    })
                    .collect();
                (title, main, rows, ExportRows::Yearly(yearly.clone()))
            }
            RankingMode::Top | RankingMode::Bottom => {
                let descending = selection.mode == RankingMode::Top;
                let ranked = query::top_by_metric(table, &metric.key, selection.year, limit, descending);
                let title = format!(
                    "{} {} Countries by {} ({})",
                    if descending { "Top" } else { "Bottom" },
                    limit,
                    metric.label,
                    selection.year
                );
                let main = ChartSpec::new(ChartKind::HorizontalBar, title.clone())
                    .with_labels(ranked.iter().map(|r| r.entity.clone()))
                    .with_dataset(Dataset::dense(
                        metric.label.clone(),
                        ranked.iter().map(|r| r.value),
                        metric.color.clone(),
                    ))
                    .begin_at_zero(metric.begins_at_zero());

                let names: Vec<&str> = ranked.iter().map(|r| r.entity.as_str()).collect();
                let changes = query::metric_change_by_country(
                    table,
                    &metric.key,
                    selection.baseline_year,
                    selection.year,
                    &names,
                );
                let rows = ranked
                    .iter()
                    .enumerate()
                    .map(|(i, r)| StatRow {
                        rank: i + 1,
                        label: r.entity.clone(),
                        value: format_number(Some(r.value), metric.format),
                        change: format_change(changes.get(r.entity.as_str()).map(|c| c.percentage_change)),
                    })
                    .collect();
                (title, main, rows, ExportRows::Ranking(ranked))
            }
        };

        let trends = ChartSpec::new(ChartKind::Line, format!("Global {}", metric.label))
            .with_labels(yearly.iter().map(|y| y.year))
            .with_dataset(Dataset::dense(
                format!("Global {}", metric.label),
                yearly.iter().map(|y| y.value),
                metric.color.clone(),
            ))
            .begin_at_zero(metric.begins_at_zero());

        let regional = query::regional_averages_by_year(table, &metric.key, selection.year, regions);
        let regions_chart = ChartSpec::new(ChartKind::Radar, format!("{} by Region ({})", metric.label, selection.year))
            .with_labels(regional.keys())
            .with_dataset(Dataset::dense(
                metric.label.clone(),
                regional.values().copied(),
                metric.color.clone(),
            ));

        StatisticsSnapshot {
            title,
            main,
            trends,
            regions: regions_chart,
            rows,
            export,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::testing::RecordingRenderer;
    use se_core::{NumberFormat, Record, Region};

    fn metric() -> MetricDef {
        MetricDef::new("co2", "co2", "CO2 Emissions (kt)", NumberFormat::LargeNumber, "#f56565")
    }

    fn table() -> Table {
        Table::new(vec![
            Record::new("Norway", 2000).with_metric("co2", 40_000.0),
            Record::new("Chad", 2000).with_metric("co2", 200.0),
            Record::new("Norway", 2020).with_metric("co2", 42_000.0),
            Record::new("Chad", 2020).with_metric("co2", 300.0),
            Record::new("Japan", 2020).with_metric("co2", 1_100_000.0),
            Record::new("World", 2020).with_metric("co2", 34_000_000.0),
        ])
    }

    fn regions() -> RegionMapping {
        let mut regions = RegionMapping::with_all_regions();
        regions.insert(Region::Europe, "Norway");
        regions.insert(Region::Africa, "Chad");
        regions.insert(Region::Asia, "Japan");
        regions
    }

    #[test]
    fn test_top_ranking_snapshot() {
        let selection = Selection { metric: "co2".to_string(), year: 2020, mode: RankingMode::Top, baseline_year: 2000 };
        let snapshot = StatisticsView::<RecordingRenderer>::snapshot(&table(), &metric(), &selection, &regions(), 10);

        assert_eq!(snapshot.title, "Top 10 Countries by CO2 Emissions (kt) (2020)");
        assert_eq!(snapshot.main.kind, ChartKind::HorizontalBar);
        assert_eq!(snapshot.main.labels, vec!["Japan", "Norway", "Chad"]);

        let first = &snapshot.rows[0];
        assert_eq!((first.rank, first.label.as_str(), first.value.as_str()), (1, "Japan", "1.1M"));
        // Japan has no baseline value
        assert_eq!(first.change, "N/A");
        assert_eq!(snapshot.rows[1].change, "+5.0%");
        assert_eq!(snapshot.rows[2].change, "+50.0%");

        assert_eq!(snapshot.regions.labels, vec!["North America", "South America", "Europe", "Africa", "Asia", "Oceania"]);
        assert_eq!(
            snapshot.regions.datasets[0].values,
            vec![Some(0.0), Some(0.0), Some(42_000.0), Some(300.0), Some(1_100_000.0), Some(0.0)]
        );
    }

    #[test]
    fn test_bottom_ranking_is_ascending() {
        let selection = Selection { metric: "co2".to_string(), year: 2020, mode: RankingMode::Bottom, baseline_year: 2000 };
        let snapshot = StatisticsView::<RecordingRenderer>::snapshot(&table(), &metric(), &selection, &regions(), 2);

        assert_eq!(snapshot.title, "Bottom 2 Countries by CO2 Emissions (kt) (2020)");
        assert_eq!(snapshot.main.labels, vec!["Chad", "Norway"]);
        assert_eq!(
            snapshot.export.to_csv("CO2 Emissions (kt)").unwrap(),
            "Rank,Country,CO2 Emissions (kt)\n1,Chad,300\n2,Norway,42000\n"
        );
    }

    #[test]
    fn test_global_mode_uses_yearly_averages() {
        let selection = Selection { metric: "co2".to_string(), year: 2020, mode: RankingMode::Global, baseline_year: 2000 };
        let snapshot = StatisticsView::<RecordingRenderer>::snapshot(&table(), &metric(), &selection, &regions(), 10);

        assert_eq!(snapshot.title, "Global Average CO2 Emissions (kt) (2020)");
        assert_eq!(snapshot.main.labels, vec!["2000", "2020"]);
        assert_eq!(snapshot.rows.len(), 2);
        assert!(snapshot.rows.iter().all(|r| r.change == "N/A"));
        match &snapshot.export {
            ExportRows::Yearly(rows) => assert_eq!(rows[0], YearValue { year: 2000, value: 20_100.0 }),
            other => panic!("unexpected export rows {:?}", other),
        }
    }

    #[test]
    fn test_refresh_replaces_charts_and_caches() {
        let renderer = RecordingRenderer::default();
        let drawn = renderer.drawn.clone();
        let released = renderer.released.clone();
        let mut view = StatisticsView::new(renderer, regions(), 10);

        let mut selection = Selection { metric: "co2".to_string(), year: 2020, mode: RankingMode::Top, baseline_year: 2000 };
        view.refresh(&table(), &metric(), &selection).unwrap();
        view.refresh(&table(), &metric(), &selection).unwrap();
        assert_eq!(drawn.borrow().len(), 3);
        assert!(released.borrow().is_empty());

        selection.mode = RankingMode::Global;
        let snapshot = view.refresh(&table(), &metric(), &selection).unwrap();
        assert_eq!(snapshot.main.kind, ChartKind::Bar);
        assert_eq!(drawn.borrow().len(), 6);
        assert_eq!(released.borrow().len(), 3);

        drop(view);
        assert_eq!(released.borrow().len(), 6);
    }

    #[test]
    fn test_inbox_keeps_last_selection_only() {
        let state = se_core::DashboardState::default();
        let inbox = SelectionInbox::subscribe(&state.event_bus);
        assert!(inbox.take().is_none());

        state.set_year(2010);
        state.set_mode(RankingMode::Global);
        let pending = inbox.take().unwrap();
        assert_eq!((pending.year, pending.mode), (2010, RankingMode::Global));
        assert!(inbox.take().is_none());

        let renderer = RecordingRenderer::default();
        let drawn = renderer.drawn.clone();
        let mut view = StatisticsView::new(renderer, regions(), 10);
        let snapshot = view.refresh(&table(), &metric(), &pending).unwrap();
        assert_eq!(snapshot.title, "Global Average CO2 Emissions (kt) (2010)");
        assert_eq!(drawn.borrow().len(), 3);
    }
}
