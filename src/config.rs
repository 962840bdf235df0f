use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::{fmt::Debug, fs, ops::RangeBounds, path::Path};

/// Analysis configuration parameters.
///
/// Loaded from a TOML file and validated before use; every field is optional
/// in the file and falls back to [`Config::default`].
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Number of consecutive samples averaged into one decimated point.
    pub window_size: usize,

    /// Number of steps the distribution domain is divided into.
    pub resolution: usize,
    /// Half-width of the distribution domain, in standard deviations.
    pub sigma_span: f64,

    /// Fail instead of warning when a run has no source for a configuration.
    pub strict: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window_size: 10,
            resolution: 100,
            sigma_span: 4.0,
            strict: false,
        }
    }
}

impl Config {
    /// Load a [`Config`] from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, deserialized,
    /// or if the configuration values are invalid.
    pub fn from_file<P: AsRef<Path>>(file: P) -> Result<Self> {
        let file = file.as_ref();
        let contents = fs::read_to_string(file).with_context(|| format!("failed to read {file:?}"))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents).context("failed to deserialize config")?;
        config.validate().context("failed to validate config")?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        check_num(self.window_size, 1..=1_000_000).context("invalid window size")?;
        check_num(self.resolution, 1..=1_000_000).context("invalid resolution")?;
        check_num(self.sigma_span, 0.5..=100.0).context("invalid sigma span")?;
        Ok(())
    }
}

fn check_num<T, R>(num: T, range: R) -> Result<()>
where
    T: PartialOrd + Debug,
    R: RangeBounds<T> + Debug,
{
    if !range.contains(&num) {
        bail!("number must be in the range {range:?}, but is {num:?}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn partial_file_overrides_fields() {
        let config = Config::from_toml("window_size = 25\nstrict = true\n").unwrap();
        assert_eq!(config.window_size, 25);
        assert!(config.strict);
        assert_eq!(config.resolution, Config::default().resolution);
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(Config::from_toml("window_size = 0").is_err());
        assert!(Config::from_toml("sigma_span = -1.0").is_err());
        assert!(Config::from_toml("window = 3").is_err());
    }
}
