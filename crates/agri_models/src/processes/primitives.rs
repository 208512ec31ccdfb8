//! Composable stochastic building blocks.
//!
//! Each function is a pure function of its arguments and the draws it takes
//! from the supplied [`SimRng`]; none keeps hidden state.

use agri_core::rng::SimRng;
use agri_core::types::PhysicalBounds;

use super::params::TrendNoise;
use crate::error::SimulationError;

/// How a shocked period's magnitude is drawn.
#[derive(Debug, Clone, PartialEq)]
pub enum ShockMagnitude {
    /// Uniform pick from a discrete set (e.g. ±150 mm rainfall)
    Choice(Vec<f64>),
    /// Continuous uniform draw in `[low, high)` (e.g. pest outbreak boost)
    Uniform {
        /// Lower end
        low: f64,
        /// Upper end
        high: f64,
    },
}

impl ShockMagnitude {
    fn draw(&self, rng: &mut SimRng) -> Result<f64, SimulationError> {
        match self {
            Self::Choice(choices) => rng.choose(choices).ok_or(SimulationError::EmptyShockChoices),
            Self::Uniform { low, high } => Ok(rng.uniform_range(*low, *high)),
        }
    }
}

/// Trend plus Gaussian noise over `n_periods` consecutive periods.
///
/// Value `i` is `base + trend · (first_offset + i) + N(0, σ)`. Passing the
/// number of already-elapsed periods as `first_offset` continues a trend
/// across a window boundary instead of restarting it.
///
/// # Examples
///
/// ```
/// use agri_core::rng::SimRng;
/// use agri_models::processes::{trended_noisy_series, TrendNoise};
///
/// let mut rng = SimRng::from_seed(1);
/// let flat = TrendNoise::new(25.0, 0.03, 0.0);
///
/// let future = trended_noisy_series(&flat, 25, 2, &mut rng);
/// assert!((future[0] - 25.75).abs() < 1e-12);
/// assert!((future[1] - 25.78).abs() < 1e-12);
/// ```
pub fn trended_noisy_series(
    process: &TrendNoise,
    first_offset: usize,
    n_periods: usize,
    rng: &mut SimRng,
) -> Vec<f64> {
    (0..n_periods)
        .map(|i| {
            let elapsed = (first_offset + i) as f64;
            process.level(elapsed) + rng.normal(0.0, process.noise_std)
        })
        .collect()
}

/// Random walk with drift: `v[0] = initial`, `v[i] = v[i-1] + drift + N(0, σ)`.
///
/// Returns `n_steps` values including the initial one; the caller clips.
pub fn bounded_random_walk(
    initial: f64,
    drift_per_step: f64,
    step_noise_std: f64,
    n_steps: usize,
    rng: &mut SimRng,
) -> Vec<f64> {
    let mut values = Vec::with_capacity(n_steps);
    if n_steps == 0 {
        return values;
    }
    values.push(initial);
    for i in 1..n_steps {
        let next = values[i - 1] + drift_per_step + rng.normal(0.0, step_noise_std);
        values.push(next);
    }
    values
}

/// Adds a shock to `n_shocks` distinct periods chosen without replacement.
///
/// Returns the shocked indices in draw order.
///
/// # Errors
///
/// - `TooManyShocks` when `n_shocks` exceeds the series length
/// - `EmptyShockChoices` for an empty `Choice` set
pub fn inject_discrete_shocks(
    series: &mut [f64],
    n_shocks: usize,
    magnitude: &ShockMagnitude,
    rng: &mut SimRng,
) -> Result<Vec<usize>, SimulationError> {
    let indices = rng
        .sample_distinct(series.len(), n_shocks)
        .ok_or(SimulationError::TooManyShocks {
            requested: n_shocks,
            periods: series.len(),
        })?;
    for &i in &indices {
        series[i] += magnitude.draw(rng)?;
    }
    Ok(indices)
}

/// Independent uniform draws in `[low, high)`.
pub fn uniform_series(low: f64, high: f64, n_periods: usize, rng: &mut SimRng) -> Vec<f64> {
    (0..n_periods).map(|_| rng.uniform_range(low, high)).collect()
}

/// Elementwise clamp; `upper == None` leaves the series unbounded above.
///
/// # Examples
///
/// ```
/// use agri_models::processes::clip_to_range;
///
/// let mut rainfall = vec![250.0, 640.0];
/// clip_to_range(&mut rainfall, 300.0, None);
/// assert_eq!(rainfall, vec![300.0, 640.0]);
/// ```
pub fn clip_to_range(series: &mut [f64], lower: f64, upper: Option<f64>) {
    PhysicalBounds { lower, upper }.clip_slice(series);
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_trended_series_without_noise_is_exact_line() {
        let mut rng = SimRng::from_seed(0);
        let p = TrendNoise::new(800.0, -3.0, 0.0);
        let s = trended_noisy_series(&p, 0, 25, &mut rng);
        for (i, v) in s.iter().enumerate() {
            assert_relative_eq!(*v, 800.0 - 3.0 * i as f64, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_trended_series_offset_continues_trend() {
        let p = TrendNoise::new(30.0, 1.0, 0.0);
        let mut rng = SimRng::from_seed(0);
        let hist = trended_noisy_series(&p, 0, 25, &mut rng);
        let future = trended_noisy_series(&p, 25, 10, &mut rng);
        assert_relative_eq!(future[0] - hist[24], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_trended_series_is_reproducible() {
        let p = TrendNoise::new(25.0, 0.03, 0.4);
        let a = trended_noisy_series(&p, 0, 50, &mut SimRng::from_seed(11));
        let b = trended_noisy_series(&p, 0, 50, &mut SimRng::from_seed(11));
        assert_eq!(a, b);
    }

    #[test]
    fn test_random_walk_starts_at_initial() {
        let mut rng = SimRng::from_seed(5);
        let walk = bounded_random_walk(0.72, -0.003, 0.005, 25, &mut rng);
        assert_eq!(walk.len(), 25);
        assert_eq!(walk[0], 0.72);
    }

    #[test]
    fn test_random_walk_deterministic_drift() {
        let mut rng = SimRng::from_seed(5);
        let walk = bounded_random_walk(1.0, -0.1, 0.0, 4, &mut rng);
        assert_relative_eq!(walk[3], 0.7, epsilon = 1e-12);
    }

    #[test]
    fn test_random_walk_empty() {
        let mut rng = SimRng::from_seed(5);
        assert!(bounded_random_walk(1.0, 0.0, 1.0, 0, &mut rng).is_empty());
    }

    #[test]
    fn test_shocks_hit_distinct_periods() {
        let mut rng = SimRng::from_seed(21);
        let mut series = vec![0.0; 25];
        let hit = inject_discrete_shocks(
            &mut series,
            2,
            &ShockMagnitude::Choice(vec![-150.0, 150.0]),
            &mut rng,
        )
        .unwrap();

        assert_eq!(hit.len(), 2);
        assert_ne!(hit[0], hit[1]);
        let shocked: Vec<f64> = series.iter().copied().filter(|v| *v != 0.0).collect();
        assert_eq!(shocked.len(), 2);
        assert!(shocked.iter().all(|v| v.abs() == 150.0));
    }

    #[test]
    fn test_uniform_shock_range() {
        let mut rng = SimRng::from_seed(8);
        let mut series = vec![0.2; 10];
        let hit = inject_discrete_shocks(
            &mut series,
            3,
            &ShockMagnitude::Uniform { low: 0.4, high: 0.6 },
            &mut rng,
        )
        .unwrap();
        for i in hit {
            assert!(series[i] >= 0.6 && series[i] < 0.8);
        }
    }

    #[test]
    fn test_too_many_shocks() {
        let mut rng = SimRng::from_seed(8);
        let mut series = vec![0.0; 2];
        let err = inject_discrete_shocks(
            &mut series,
            3,
            &ShockMagnitude::Choice(vec![1.0]),
            &mut rng,
        )
        .unwrap_err();
        assert_eq!(
            err,
            SimulationError::TooManyShocks {
                requested: 3,
                periods: 2
            }
        );
    }

    #[test]
    fn test_empty_choice_set() {
        let mut rng = SimRng::from_seed(8);
        let mut series = vec![0.0; 4];
        let err =
            inject_discrete_shocks(&mut series, 1, &ShockMagnitude::Choice(vec![]), &mut rng)
                .unwrap_err();
        assert_eq!(err, SimulationError::EmptyShockChoices);
    }

    #[test]
    fn test_clip_to_range() {
        let mut s = vec![0.4, 0.7, 0.9];
        clip_to_range(&mut s, 0.5, Some(0.85));
        assert_eq!(s, vec![0.5, 0.7, 0.85]);
    }

    #[test]
    fn test_uniform_series_bounds() {
        let mut rng = SimRng::from_seed(2);
        let s = uniform_series(0.1, 0.5, 1000, &mut rng);
        assert!(s.iter().all(|v| (0.1..0.5).contains(v)));
    }
}
