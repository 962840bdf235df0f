use crate::catalog::{RunPair, RunSet};
use crate::config::Config;
use crate::distribution::build_curves;
use crate::error::Error;
use crate::report::{PlotReport, Trace};
use crate::stats::SummaryStats;
use crate::types::{Configuration, Instrument, Series, View};
use crate::window::decimate;
use anyhow::{Context, Result};
use std::path::Path;

/// Turns the runs of one instrument into plot reports.
pub struct Analyst {
    cfg: Config,
    run_set: RunSet,
}

impl Analyst {
    pub fn new(cfg: Config, run_set: RunSet) -> Self {
        Self { cfg, run_set }
    }

    /// Discover the runs of `instrument` in `data_dir`.
    pub fn discover<P: AsRef<Path>>(cfg: Config, data_dir: P, instrument: Instrument) -> Result<Self> {
        let data_dir = data_dir.as_ref();
        let run_set = RunSet::discover(data_dir, instrument)
            .with_context(|| format!("failed to discover runs in {data_dir:?}"))?;
        Ok(Self::new(cfg, run_set))
    }

    /// Build the report of a 1-based run.
    pub fn analyze(&self, run: usize, view: View) -> Result<PlotReport> {
        let pair = self.run_set.select(run);

        let traces = Configuration::ALL
            .into_iter()
            .map(|cfg| self.trace(&pair, cfg, run, view))
            .collect::<Result<Vec<_>>>()?;

        let curves = match (traces[0].stats, traces[1].stats) {
            (Some(a), Some(b)) => {
                match build_curves(&a, &b, self.cfg.resolution, self.cfg.sigma_span) {
                    Ok(curves) => Some(curves),
                    Err(err @ Error::DegenerateDistribution { .. }) => {
                        log::warn!("skipping distribution curves: {err}");
                        None
                    }
                    Err(err) => return Err(err).context("failed to build distribution curves"),
                }
            }
            _ => None,
        };

        Ok(PlotReport {
            title: format!("{} Run {run}", self.run_set.instrument().title()),
            x_label: "Time".to_string(),
            y_label: "Voltage (mV)".to_string(),
            view,
            traces,
            curves,
        })
    }

    fn trace(&self, pair: &RunPair, cfg: Configuration, run: usize, view: View) -> Result<Trace> {
        let empty = Series::default();
        let series = if self.cfg.strict {
            pair.require(cfg, run)?
        } else {
            pair.get(cfg).unwrap_or_else(|| {
                log::warn!("no {cfg} source for run {run}; using an empty series");
                &empty
            })
        };

        if let Some(key) = self.run_set.key(cfg, run) {
            log::info!("run {run} {cfg}: {} ({} samples)", key.name, series.len());
        }

        let points = match view {
            View::Raw => series.samples().to_vec(),
            View::Decimated { window_size } => decimate(series.samples(), window_size)
                .with_context(|| format!("failed to decimate {cfg} series"))?,
        };

        let stats = match SummaryStats::compute(series.samples()) {
            Ok(stats) => Some(stats),
            Err(err) => {
                log::warn!("no statistics for {cfg} series of run {run}: {err}");
                None
            }
        };

        Ok(Trace {
            configuration: cfg,
            label: cfg.label().to_string(),
            points,
            stats,
        })
    }
}
