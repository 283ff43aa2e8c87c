//! Renderer-agnostic chart descriptions

use serde::{Deserialize, Serialize};

use crate::slot::Visual;

/// Chart type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Bar,
    HorizontalBar,
    Line,
    Radar,
    Doughnut,
}

/// One series of a chart.
///
/// Values line up with the chart labels; `None` leaves a gap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub label: String,
    pub values: Vec<Option<f64>>,
    pub color: String,
}

impl Dataset {
    pub fn new(label: impl Into<String>, values: Vec<Option<f64>>, color: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            values,
            color: color.into(),
        }
    }

    /// Dataset without gaps
    pub fn dense(label: impl Into<String>, values: impl IntoIterator<Item = f64>, color: impl Into<String>) -> Self {
        Self::new(label, values.into_iter().map(Some).collect(), color)
    }
}

/// Everything a renderer needs to draw one chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub title: String,
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
    /// Value axis starts at zero
    pub begin_at_zero: bool,
}

impl ChartSpec {
    pub fn new(kind: ChartKind, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            kind,
            labels: Vec::new(),
            datasets: Vec::new(),
            begin_at_zero: false,
        }
    }

    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        self.labels = labels.into_iter().map(|l| l.to_string()).collect();
        self
    }

    pub fn with_dataset(mut self, dataset: Dataset) -> Self {
        self.datasets.push(dataset);
        self
    }

    pub fn begin_at_zero(mut self, begin_at_zero: bool) -> Self {
        self.begin_at_zero = begin_at_zero;
        self
    }
}

/// Draws chart specs and hands back a handle to the live visual
pub trait ChartRenderer {
    type Handle: Visual;

    fn render(&mut self, spec: &ChartSpec) -> anyhow::Result<Self::Handle>;
}
