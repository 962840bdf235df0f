use crate::error::Error;
use crate::types::Sample;

/// Decimate samples by averaging non-overlapping windows of `window_size`.
///
/// Output point `i` holds the mean y of `samples[i*n..(i+1)*n]` and takes its
/// x from `samples[i + n/2]`. Trailing samples that do not fill a window are
/// dropped.
pub fn decimate(samples: &[Sample], window_size: usize) -> Result<Vec<Sample>, Error> {
    if window_size == 0 {
        return Err(Error::InvalidWindow);
    }

    let half = window_size / 2;
    let pts = samples
        .chunks_exact(window_size)
        .enumerate()
        .map(|(i_win, win)| {
            let y_sum: f64 = win.iter().map(|s| s.y).sum();
            Sample::new(samples[i_win + half].x, y_sum / window_size as f64)
        })
        .collect();

    Ok(pts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Series;
    use rand::prelude::*;
    use rand_chacha::ChaCha12Rng;
    use rand_distr::Normal;

    fn random_series(rng: &mut ChaCha12Rng, len: usize) -> Series {
        let dist = Normal::new(50.0, 5.0).unwrap();
        Series::from_values((0..len).map(|_| dist.sample(&mut *rng)))
    }

    #[test]
    fn pairs_use_offset_midpoint() {
        let series = Series::from_values([1.0, 2.0, 3.0, 4.0]);
        let pts = decimate(series.samples(), 2).unwrap();
        assert_eq!(pts, vec![Sample::new(1.0, 1.5), Sample::new(2.0, 3.5)]);
    }

    #[test]
    fn leftover_samples_are_dropped() {
        let series = Series::from_values([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
        let pts = decimate(series.samples(), 3).unwrap();
        assert_eq!(pts, vec![Sample::new(1.0, 2.0), Sample::new(2.0, 5.0)]);
    }

    #[test]
    fn oversized_window_is_empty() {
        let series = Series::from_values([1.0, 2.0]);
        assert!(decimate(series.samples(), 3).unwrap().is_empty());
        assert!(decimate(&[], 1).unwrap().is_empty());
    }

    #[test]
    fn zero_window_is_rejected() {
        assert!(matches!(decimate(&[], 0), Err(Error::InvalidWindow)));
    }

    #[test]
    fn unit_window_is_identity() {
        let mut rng = ChaCha12Rng::seed_from_u64(7);
        let series = random_series(&mut rng, 257);
        let pts = decimate(series.samples(), 1).unwrap();
        assert_eq!(pts.as_slice(), series.samples());
    }

    #[test]
    fn windows_hold_their_means() {
        let mut rng = ChaCha12Rng::seed_from_u64(42);
        for _ in 0..32 {
            let len = rng.random_range(1..500);
            let n = rng.random_range(1..=len);
            let series = random_series(&mut rng, len);
            let pts = decimate(series.samples(), n).unwrap();

            assert_eq!(pts.len(), len / n);
            for (i_win, pt) in pts.iter().enumerate() {
                let win = &series.samples()[i_win * n..(i_win + 1) * n];
                let mean = win.iter().map(|s| s.y).sum::<f64>() / n as f64;
                assert!((pt.y - mean).abs() < 1e-9);
                assert_eq!(pt.x, (i_win + n / 2) as f64);
            }
        }
    }
}
