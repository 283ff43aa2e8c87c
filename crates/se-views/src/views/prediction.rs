//! Linear-trend predictions for one country and metric

use std::collections::BTreeSet;
use anyhow::Context;

use se_core::{MetricDef, Table, TrendPoint};
use se_data::query::{self, LinearTrend};

use crate::chart::{ChartKind, ChartRenderer, ChartSpec, Dataset};
use crate::slot::ChartSlot;

const TREND_COLOR: &str = "#a0aec0";

/// History and forecasts for one entity and metric
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub entity: String,
    pub history: Vec<TrendPoint>,
    pub trend: Option<LinearTrend>,
    /// One entry per requested year, `None` when there was too little history
    pub forecasts: Vec<(i32, Option<f64>)>,
    pub chart: ChartSpec,
}

/// Prediction page
pub struct PredictionView<R: ChartRenderer> {
    renderer: R,
    chart: ChartSlot<R::Handle>,
}

impl<R: ChartRenderer> PredictionView<R> {
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            chart: ChartSlot::new("prediction"),
        }
    }

    /// Predict and redraw
    pub fn show(&mut self, table: &Table, entity: &str, metric: &MetricDef, target_years: &[i32]) -> anyhow::Result<Prediction> {
        let prediction = Self::predict(table, entity, metric, target_years);
        let renderer = &mut self.renderer;
        self.chart
            .replace_with(|| renderer.render(&prediction.chart))
            .with_context(|| format!("drawing prediction chart for {}", entity))?;
        Ok(prediction)
    }

    /// Build the prediction without drawing
    pub fn predict(table: &Table, entity: &str, metric: &MetricDef, target_years: &[i32]) -> Prediction {
        let history = query::metric_series(table, entity, &metric.key);
        let trend = LinearTrend::fit(&history);
        let forecasts: Vec<(i32, Option<f64>)> = target_years
            .iter()
            .map(|&year| (year, trend.map(|t| t.at(f64::from(year)))))
            .collect();

        // History years are whole years, so the cast back is exact
        let years: Vec<i32> = history
            .iter()
            .map(|p| p.x as i32)
            .chain(target_years.iter().copied())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let observed = years
            .iter()
            .map(|&year| history.iter().find(|p| p.x == f64::from(year)).map(|p| p.y))
            .collect();
        // Trend line over the whole range so the forecast joins the history
        let fitted = years
            .iter()
            .map(|&year| trend.map(|t| t.at(f64::from(year))))
            .collect();

        let chart = ChartSpec::new(ChartKind::Line, format!("{} Prediction: {}", metric.label, entity))
            .with_labels(years.iter())
            .with_dataset(Dataset::new("History", observed, metric.color.clone()))
            .with_dataset(Dataset::new("Trend", fitted, TREND_COLOR))
            .begin_at_zero(metric.begins_at_zero());

        Prediction {
            entity: entity.to_string(),
            history,
            trend,
            forecasts,
            chart,
        }
    }
}
