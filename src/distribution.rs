//! Gaussian curves for comparing two summaries.

use crate::error::Error;
use crate::stats::SummaryStats;
use crate::types::Sample;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Closed x-range over which curves are sampled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    pub lower: f64,
    pub upper: f64,
}

impl Domain {
    /// Smallest range covering `mean ± span * sigma` of both summaries.
    pub fn spanning(a: &SummaryStats, b: &SummaryStats, span: f64) -> Self {
        Self {
            lower: (a.mean - span * a.sigma).min(b.mean - span * b.sigma),
            upper: (a.mean + span * a.sigma).max(b.mean + span * b.sigma),
        }
    }

    /// `resolution + 1` evenly spaced points, both bounds included.
    pub fn points(&self, resolution: usize) -> Vec<f64> {
        let step = (self.upper - self.lower) / resolution as f64;
        (0..=resolution)
            .map(|k| {
                if k == resolution {
                    self.upper
                } else {
                    self.lower + k as f64 * step
                }
            })
            .collect()
    }
}

/// Sampled density curves of two summaries over a shared domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionCurves {
    pub domain: Domain,
    pub curve_a: Vec<Sample>,
    pub curve_b: Vec<Sample>,
}

/// Normal probability density of `stats` at `x`.
pub fn gaussian_pdf(x: f64, stats: &SummaryStats) -> f64 {
    let z = (x - stats.mean) / stats.sigma;
    (-0.5 * z * z).exp() / (stats.sigma * (2.0 * PI).sqrt())
}

/// Sample the densities of `a` and `b` over the domain spanning both.
///
/// # Errors
/// Fails with [`Error::DegenerateDistribution`] if either sigma is not a
/// positive finite number, and with [`Error::InvalidResolution`] if
/// `resolution` is zero.
pub fn build_curves(
    a: &SummaryStats,
    b: &SummaryStats,
    resolution: usize,
    span: f64,
) -> Result<DistributionCurves, Error> {
    check_stats(a)?;
    check_stats(b)?;
    if resolution == 0 {
        return Err(Error::InvalidResolution);
    }

    let domain = Domain::spanning(a, b, span);
    let xs = domain.points(resolution);
    let curve = |stats: &SummaryStats| -> Vec<Sample> {
        xs.iter()
            .map(|&x| Sample::new(x, gaussian_pdf(x, stats)))
            .collect()
    };

    Ok(DistributionCurves {
        domain,
        curve_a: curve(a),
        curve_b: curve(b),
    })
}

fn check_stats(stats: &SummaryStats) -> Result<(), Error> {
    if !stats.mean.is_finite() || !stats.sigma.is_finite() || stats.sigma <= 0.0 {
        return Err(Error::DegenerateDistribution {
            mean: stats.mean,
            sigma: stats.sigma,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(mean: f64, sigma: f64) -> SummaryStats {
        SummaryStats { mean, sigma }
    }

    #[test]
    fn domain_spans_both_distributions() {
        let domain = Domain::spanning(&stats(0.0, 1.0), &stats(5.0, 2.0), 4.0);
        assert_eq!(domain, Domain { lower: -4.0, upper: 13.0 });
    }

    #[test]
    fn pdf_peaks_at_mean() {
        for sigma in [0.01, 0.5, 1.0, 30.0] {
            let s = stats(2.5, sigma);
            let peak = 1.0 / (sigma * (2.0 * PI).sqrt());
            assert!((gaussian_pdf(2.5, &s) - peak).abs() < 1e-12 * peak);
            assert!(gaussian_pdf(2.5 + sigma, &s) < peak);
        }
    }

    #[test]
    fn curve_covers_domain_inclusively() {
        let curves = build_curves(&stats(0.0, 1.0), &stats(5.0, 2.0), 170, 4.0).unwrap();
        assert_eq!(curves.curve_a.len(), 171);
        assert_eq!(curves.curve_b.len(), 171);
        assert_eq!(curves.curve_a.first().unwrap().x, -4.0);
        assert_eq!(curves.curve_a.last().unwrap().x, 13.0);
        assert!((curves.curve_a[4].x - (-3.6)).abs() < 1e-12);
        for (pa, pb) in curves.curve_a.iter().zip(&curves.curve_b) {
            assert_eq!(pa.x, pb.x);
        }
    }

    #[test]
    fn curve_integrates_to_about_one() {
        let curves = build_curves(&stats(1.0, 0.5), &stats(1.2, 0.4), 2000, 4.0).unwrap();
        let dx = curves.curve_a[1].x - curves.curve_a[0].x;
        let area: f64 = curves.curve_a.iter().map(|p| p.y * dx).sum();
        assert!((area - 1.0).abs() < 1e-3);
    }

    #[test]
    fn zero_sigma_is_degenerate() {
        let err = build_curves(&stats(1.0, 0.0), &stats(0.0, 1.0), 10, 4.0).unwrap_err();
        assert!(matches!(err, Error::DegenerateDistribution { .. }));

        let err = build_curves(&stats(0.0, 1.0), &stats(f64::NAN, 1.0), 10, 4.0).unwrap_err();
        assert!(matches!(err, Error::DegenerateDistribution { .. }));
    }

    #[test]
    fn zero_resolution_is_rejected() {
        let err = build_curves(&stats(0.0, 1.0), &stats(0.0, 1.0), 0, 4.0).unwrap_err();
        assert!(matches!(err, Error::InvalidResolution));
    }
}
