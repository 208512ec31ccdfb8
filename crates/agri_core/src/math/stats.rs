//! Descriptive statistics over `f64` slices.

/// Arithmetic mean, `None` for an empty slice.
///
/// # Examples
/// ```
/// use agri_core::math::mean;
///
/// assert_eq!(mean(&[1.0, 2.0, 3.0]), Some(2.0));
/// assert_eq!(mean(&[]), None);
/// ```
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population variance (divides by `n`), `None` for an empty slice.
pub fn population_variance(values: &[f64]) -> Option<f64> {
    let m = mean(values)?;
    Some(values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / values.len() as f64)
}

/// Population standard deviation (divides by `n`), `None` for an empty slice.
///
/// Matches the scale used for feature standardisation.
pub fn population_std(values: &[f64]) -> Option<f64> {
    population_variance(values).map(f64::sqrt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean() {
        assert_relative_eq!(mean(&[800.0, 790.0, 780.0]).unwrap(), 790.0, epsilon = 1e-12);
    }

    #[test]
    fn test_population_std() {
        // Population std of [2, 4, 4, 4, 5, 5, 7, 9] is exactly 2
        let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(population_std(&v).unwrap(), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_constant_has_zero_variance() {
        assert_eq!(population_variance(&[3.5; 10]), Some(0.0));
    }

    #[test]
    fn test_empty() {
        assert!(population_std(&[]).is_none());
    }
}
