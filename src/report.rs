use crate::distribution::DistributionCurves;
use crate::stats::SummaryStats;
use crate::types::{Configuration, Sample, View};
use anyhow::{Context, Result};
use rmp_serde::encode;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

/// Points and summary of one configuration of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    pub configuration: Configuration,
    pub label: String,
    /// Raw or decimated points, depending on the report view.
    pub points: Vec<Sample>,
    /// Summary of the raw series; `None` if the series was missing or empty.
    pub stats: Option<SummaryStats>,
}

/// Everything a renderer needs to draw the run chart and the density chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotReport {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub view: View,
    pub traces: Vec<Trace>,
    /// Density curves of the deflected and undeflected summaries, in that order.
    pub curves: Option<DistributionCurves>,
}

impl PlotReport {
    /// Human readable mean/sigma summary of each trace.
    pub fn summary(&self) -> String {
        let mut out = String::new();
        for trace in &self.traces {
            let line = match &trace.stats {
                Some(stats) => format!(
                    "{label} Mean: {:.6}\n{label} Sigma: {:.6}\n",
                    stats.mean,
                    stats.sigma,
                    label = trace.label
                ),
                None => format!("{}: no data\n", trace.label),
            };
            out.push_str(&line);
        }
        out
    }

    /// Save the report as MessagePack.
    pub fn save<P: AsRef<Path>>(&self, file: P) -> Result<()> {
        let file = file.as_ref();
        let file = File::create(file).with_context(|| format!("failed to create {file:?}"))?;
        let mut writer = BufWriter::new(file);
        encode::write_named(&mut writer, self).context("failed to serialize report")?;
        writer.flush().context("failed to flush writer stream")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> PlotReport {
        PlotReport {
            title: "Cup Run 1".to_string(),
            x_label: "Time".to_string(),
            y_label: "Voltage (mV)".to_string(),
            view: View::Raw,
            traces: vec![
                Trace {
                    configuration: Configuration::Deflected,
                    label: "Deflected".to_string(),
                    points: vec![Sample::new(0.0, 1.0)],
                    stats: Some(SummaryStats {
                        mean: 1.0,
                        sigma: 0.25,
                    }),
                },
                Trace {
                    configuration: Configuration::Undeflected,
                    label: "Undeflected".to_string(),
                    points: Vec::new(),
                    stats: None,
                },
            ],
            curves: None,
        }
    }

    #[test]
    fn summary_lists_each_trace() {
        let summary = report().summary();
        assert_eq!(
            summary,
            "Deflected Mean: 1.000000\nDeflected Sigma: 0.250000\nUndeflected: no data\n"
        );
    }
}
