use crate::error::Error;
use crate::loader::load_file;
use crate::types::{Configuration, Instrument, Series};
use anyhow::{Context, Result};
use glob::glob;
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

/// Descriptor parsed from a series file name.
///
/// Names look like `<instrument>_<configuration>[_<run>][...][.ext]`, e.g.
/// `cup_deflected_3.txt`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesKey {
    pub instrument: Instrument,
    pub configuration: Configuration,
    pub run_token: Option<u64>,
    pub name: String,
}

impl SeriesKey {
    /// Parse a file name into a key, or `None` if it does not follow the convention.
    pub fn parse(name: &str) -> Option<Self> {
        let stem = match name.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem,
            _ => name,
        };

        let mut tokens = stem.split('_');
        let instrument = Instrument::from_token(tokens.next()?)?;
        let configuration = Configuration::from_token(tokens.next()?)?;
        // A third token must be a run number; `cup_deflected_1.txt.bak` is not a candidate.
        let run_token = match tokens.next() {
            Some(tok) => Some(tok.parse().ok()?),
            None => None,
        };

        Some(Self {
            instrument,
            configuration,
            run_token,
            name: name.to_string(),
        })
    }

    /// Candidates order by run token (missing tokens last), then by name.
    fn order(&self) -> (bool, u64, &str) {
        (
            self.run_token.is_none(),
            self.run_token.unwrap_or(0),
            &self.name,
        )
    }
}

/// Deflected and undeflected series of a single run.
///
/// A missing side means no candidate matched; callers decide whether that is fatal.
#[derive(Debug, Clone, Default)]
pub struct RunPair {
    pub deflected: Option<Series>,
    pub undeflected: Option<Series>,
}

impl RunPair {
    pub fn get(&self, configuration: Configuration) -> Option<&Series> {
        match configuration {
            Configuration::Deflected => self.deflected.as_ref(),
            Configuration::Undeflected => self.undeflected.as_ref(),
        }
    }

    /// Get a side of the pair, failing if it was not found.
    pub fn require(&self, configuration: Configuration, run: usize) -> Result<&Series, Error> {
        self.get(configuration)
            .ok_or(Error::SourceNotFound { configuration, run })
    }
}

/// All series discovered for one instrument.
///
/// Built once and read-only afterwards. Run `r` is the `r`-th distinct run
/// token found across both configurations, and each side is matched by that
/// token, so a gap on one side never shifts the other. Candidates without a
/// token are numbered after the tokened runs, by position.
#[derive(Debug, Clone)]
pub struct RunSet {
    instrument: Instrument,
    runs: BTreeMap<Configuration, Vec<(SeriesKey, Series)>>,
    tokens: Vec<u64>,
}

impl RunSet {
    /// Build a run set from already loaded candidates of `instrument`.
    pub fn from_candidates<I>(instrument: Instrument, candidates: I) -> Self
    where
        I: IntoIterator<Item = (SeriesKey, Series)>,
    {
        let mut runs: BTreeMap<Configuration, Vec<(SeriesKey, Series)>> = BTreeMap::new();
        for (key, series) in candidates {
            runs.entry(key.configuration).or_default().push((key, series));
        }
        for candidates in runs.values_mut() {
            candidates.sort_by(|(a, _), (b, _)| a.order().cmp(&b.order()));
            for pair in candidates.windows(2) {
                let (a, b) = (&pair[0].0, &pair[1].0);
                if a.run_token.is_some() && a.run_token == b.run_token {
                    log::warn!("{} and {} share a run number; using {}", a.name, b.name, a.name);
                }
            }
        }

        let mut tokens: Vec<u64> = runs
            .values()
            .flatten()
            .filter_map(|(key, _)| key.run_token)
            .collect();
        tokens.sort_unstable();
        tokens.dedup();

        Self {
            instrument,
            runs,
            tokens,
        }
    }

    /// Discover and load every series of `instrument` in `dir`.
    ///
    /// Files that do not follow the naming convention are skipped. A file that
    /// follows it but cannot be loaded aborts discovery.
    pub fn discover<P: AsRef<Path>>(dir: P, instrument: Instrument) -> Result<Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            anyhow::bail!("{dir:?} is not a directory");
        }

        let mut candidates = Vec::new();
        for file in list_files(dir).context("failed to list data files")? {
            let Some(name) = file.file_name().and_then(|name| name.to_str()) else {
                log::debug!("skipping {file:?}: name is not valid UTF-8");
                continue;
            };
            let Some(key) = SeriesKey::parse(name) else {
                log::debug!("skipping {file:?}: name does not follow the convention");
                continue;
            };
            if key.instrument != instrument {
                continue;
            }
            let series = load_file(&file)?;
            candidates.push((key, series));
        }

        let run_set = Self::from_candidates(instrument, candidates);
        log::info!(
            "discovered {} {} runs ({} deflected, {} undeflected) in {dir:?}",
            run_set.n_runs(),
            instrument.token(),
            run_set.count(Configuration::Deflected),
            run_set.count(Configuration::Undeflected),
        );
        Ok(run_set)
    }

    pub fn instrument(&self) -> Instrument {
        self.instrument
    }

    /// Number of candidates for a configuration.
    pub fn count(&self, configuration: Configuration) -> usize {
        self.runs.get(&configuration).map_or(0, Vec::len)
    }

    /// Number of runs with at least one side present.
    pub fn n_runs(&self) -> usize {
        let n_untokened = Configuration::ALL
            .iter()
            .map(|cfg| self.untokened(*cfg).count())
            .max()
            .unwrap_or(0);
        self.tokens.len() + n_untokened
    }

    /// Key of the candidate selected for a 1-based run.
    pub fn key(&self, configuration: Configuration, run: usize) -> Option<&SeriesKey> {
        self.entry(configuration, run).map(|(key, _)| key)
    }

    /// Select the pair for a 1-based run; missing sides are `None`.
    pub fn select(&self, run: usize) -> RunPair {
        let pick = |cfg| self.entry(cfg, run).map(|(_, series)| series.clone());
        RunPair {
            deflected: pick(Configuration::Deflected),
            undeflected: pick(Configuration::Undeflected),
        }
    }

    fn entry(&self, configuration: Configuration, run: usize) -> Option<&(SeriesKey, Series)> {
        let idx = run.checked_sub(1)?;
        match self.tokens.get(idx) {
            Some(&token) => self
                .runs
                .get(&configuration)?
                .iter()
                .find(|(key, _)| key.run_token == Some(token)),
            None => self
                .untokened(configuration)
                .nth(idx - self.tokens.len()),
        }
    }

    fn untokened(&self, configuration: Configuration) -> impl Iterator<Item = &(SeriesKey, Series)> {
        self.runs
            .get(&configuration)
            .into_iter()
            .flatten()
            .filter(|(key, _)| key.run_token.is_none())
    }
}

fn list_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let pattern = dir.join("*");
    let pattern = pattern.to_str().context("pattern is not valid UTF-8")?;
    let files = glob(pattern)
        .context("failed to glob data files")?
        .filter_map(Result::ok)
        .filter(|p| p.is_file())
        .collect();
    Ok(files)
}
