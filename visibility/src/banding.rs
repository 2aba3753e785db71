//! Splitting wrapped position angle ranges for filled-region rendering
//!
//! A range with `min > max` covers `[min, 360) ∪ [0, max]`. Filling between
//! min and max directly would paint the complement, so wrapped epochs go to
//! an upper and a lower band while the rest stay in the middle band.

use crate::projector::PaRange;

/// Full circle, degrees
pub const FULL_CIRCLE_DEG: f64 = 360.0;

/// Three time-aligned bands. No band ever holds a range with `min > max`.
#[derive(Debug, Clone, PartialEq)]
pub struct WrapBands {
    /// `[min, 360]` at wrapped epochs
    pub upper: Vec<Option<PaRange>>,
    /// `[0, max]` at wrapped epochs
    pub lower: Vec<Option<PaRange>>,
    /// The original range at non-wrapped epochs
    pub middle: Vec<Option<PaRange>>,
}

impl WrapBands {
    pub fn len(&self) -> usize {
        self.middle.len()
    }

    pub fn is_empty(&self) -> bool {
        self.middle.is_empty()
    }

    pub fn has_wraps(&self) -> bool {
        self.upper.iter().any(Option::is_some)
    }

    /// Upper, lower and middle bands in drawing order
    pub fn bands(&self) -> [&[Option<PaRange>]; 3] {
        [&self.upper, &self.lower, &self.middle]
    }
}

/// Decompose a range series into wraparound bands.
pub fn split_wraparound(series: &[Option<PaRange>]) -> WrapBands {
    let mut upper = Vec::with_capacity(series.len());
    let mut lower = Vec::with_capacity(series.len());
    let mut middle = Vec::with_capacity(series.len());

    for range in series {
        match range {
            Some(r) if r.wraps() => {
                upper.push(Some(PaRange::new(r.min, FULL_CIRCLE_DEG)));
                lower.push(Some(PaRange::new(0.0, r.max)));
                middle.push(None);
            }
            other => {
                upper.push(None);
                lower.push(None);
                middle.push(*other);
            }
        }
    }

    WrapBands {
        upper,
        lower,
        middle,
    }
}

/// Maximal runs of consecutive populated epochs, paired with their epochs.
pub fn contiguous_runs(epochs: &[f64], band: &[Option<PaRange>]) -> Vec<Vec<(f64, PaRange)>> {
    let mut runs = Vec::new();
    let mut current = Vec::new();
    for (&t, range) in epochs.iter().zip(band) {
        match range {
            Some(r) => current.push((t, *r)),
            None if !current.is_empty() => runs.push(std::mem::take(&mut current)),
            None => {}
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapped_epoch_recovers_both_arcs() {
        let series = vec![
            Some(PaRange::new(100.0, 110.0)),
            Some(PaRange::new(350.0, 10.0)),
            None,
        ];
        let bands = split_wraparound(&series);

        assert_eq!(bands.upper[1], Some(PaRange::new(350.0, 360.0)));
        assert_eq!(bands.lower[1], Some(PaRange::new(0.0, 10.0)));
        assert_eq!(bands.middle[1], None);
        assert_eq!(bands.middle[0], series[0]);
        assert!(bands.upper[0].is_none() && bands.lower[0].is_none());
        assert!(bands.bands().iter().all(|b| b[2].is_none()));
        assert!(bands.has_wraps());

        for band in bands.bands() {
            assert_eq!(band.len(), series.len());
            assert!(band.iter().flatten().all(|r| r.min <= r.max));
        }
    }

    #[test]
    fn test_degenerate_range_is_middle_only() {
        let bands = split_wraparound(&[Some(PaRange::new(42.0, 42.0))]);
        assert_eq!(bands.middle[0], Some(PaRange::new(42.0, 42.0)));
        assert!(!bands.has_wraps());
        assert!(bands.lower[0].is_none());
    }

    #[test]
    fn test_contiguous_runs() {
        let r = PaRange::new(1.0, 2.0);
        let band = vec![Some(r), Some(r), None, None, Some(r)];
        let epochs = [0.0, 1.0, 2.0, 3.0, 4.0];
        let runs = contiguous_runs(&epochs, &band);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].len(), 2);
        assert_eq!(runs[1], vec![(4.0, r)]);
        assert!(contiguous_runs(&epochs, &[None; 5]).is_empty());
    }
}
