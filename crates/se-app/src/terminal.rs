//! Plain-text chart renderer for the terminal

use tracing::debug;

use se_views::{ChartKind, ChartRenderer, ChartSpec, Visual};

const BAR: char = '#';

/// Draws charts as text bars on stdout
pub struct TerminalRenderer {
    /// Width of the longest bar, in characters
    width: usize,
}

impl TerminalRenderer {
    pub fn new(width: usize) -> Self {
        Self { width: width.max(1) }
    }

    /// Text drawing of `spec`, one block per dataset
    pub fn draw(&self, spec: &ChartSpec) -> String {
        let mut out = format!("== {} ({}) ==\n", spec.title, kind_name(spec.kind));
        let label_width = spec.labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);

        for dataset in &spec.datasets {
            if spec.datasets.len() > 1 {
                out.push_str(&format!("-- {} --\n", dataset.label));
            }

            let max = dataset
                .values
                .iter()
                .flatten()
                .filter(|v| v.is_finite())
                .fold(0.0_f64, |max, v| max.max(v.abs()));

            for (label, value) in spec.labels.iter().zip(&dataset.values) {
                let line = match value.filter(|v| v.is_finite()) {
                    Some(v) => {
                        let len = if max > 0.0 {
                            ((v.abs() / max) * self.width as f64).round() as usize
                        } else {
                            0
                        };
                        format!("{:<lw$} | {} {}", label, BAR.to_string().repeat(len), trim_float(v), lw = label_width)
                    }
                    None => format!("{:<lw$} | -", label, lw = label_width),
                };
                out.push_str(line.trim_end());
                out.push('\n');
            }
        }

        out
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(40)
    }
}

/// Handle for a chart already printed
pub struct PrintedChart {
    title: String,
}

impl Visual for PrintedChart {
    fn release(&mut self) {
        debug!("Released chart '{}'", self.title);
    }
}

impl ChartRenderer for TerminalRenderer {
    type Handle = PrintedChart;

    fn render(&mut self, spec: &ChartSpec) -> anyhow::Result<PrintedChart> {
        println!("{}", self.draw(spec));
        Ok(PrintedChart {
            title: spec.title.clone(),
        })
    }
}

fn kind_name(kind: ChartKind) -> &'static str {
    match kind {
        ChartKind::Bar => "bar",
        ChartKind::HorizontalBar => "horizontal bar",
        ChartKind::Line => "line",
        ChartKind::Radar => "radar",
        ChartKind::Doughnut => "doughnut",
    }
}

fn trim_float(value: f64) -> String {
    let text = format!("{:.2}", value);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}
