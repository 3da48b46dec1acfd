//! Two-handle range selection over a numeric domain.

use crate::aggregate::NumericRange;
use crate::filter::RangeFilter;

/// Steps needed to cross the whole domain with `nudge_*`.
const STEPS_PER_SPAN: u64 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeSlider {
    domain: NumericRange,
    low: u64,
    high: u64,
}

impl RangeSlider {
    /// Create a slider over `[min, max]` with handles at `start`, clamped into range.
    pub fn new(min: u64, max: u64, start: [u64; 2]) -> Self {
        let domain = NumericRange {
            min: min.min(max),
            max: max.max(min),
        };
        let mut slider = Self {
            domain,
            low: domain.min,
            high: domain.max,
        };
        slider.set(start[0], start[1]);
        slider
    }

    pub fn spanning(domain: NumericRange) -> Self {
        Self::new(domain.min, domain.max, [domain.min, domain.max])
    }

    pub fn get(&self) -> [u64; 2] {
        [self.low, self.high]
    }

    pub fn domain(&self) -> NumericRange {
        self.domain
    }

    /// Move both handles. Returns `true` when the selection changed, which
    /// is the owner's cue to re-run its filters.
    pub fn set(&mut self, low: u64, high: u64) -> bool {
        let (low, high) = if low <= high { (low, high) } else { (high, low) };
        let low = low.clamp(self.domain.min, self.domain.max);
        let high = high.clamp(self.domain.min, self.domain.max);
        let changed = (low, high) != (self.low, self.high);
        self.low = low;
        self.high = high;
        changed
    }

    pub fn step(&self) -> u64 {
        ((self.domain.max - self.domain.min) / STEPS_PER_SPAN).max(1)
    }

    /// Move the low handle by `steps` (negative moves down). Never crosses the high handle.
    pub fn nudge_low(&mut self, steps: i64) -> bool {
        let low = shift(self.low, steps, self.step()).min(self.high);
        self.set(low, self.high)
    }

    /// Move the high handle by `steps`. Never crosses the low handle.
    pub fn nudge_high(&mut self, steps: i64) -> bool {
        let high = shift(self.high, steps, self.step()).max(self.low);
        self.set(self.low, high)
    }

    pub fn reset(&mut self) -> bool {
        self.set(self.domain.min, self.domain.max)
    }

    pub fn is_full(&self) -> bool {
        self.low == self.domain.min && self.high == self.domain.max
    }

    pub fn to_filter(&self) -> RangeFilter {
        RangeFilter::new(self.domain, self.low, self.high)
    }
}

fn shift(value: u64, steps: i64, step: u64) -> u64 {
    let delta = step.saturating_mul(steps.unsigned_abs());
    if steps < 0 {
        value.saturating_sub(delta)
    } else {
        value.saturating_add(delta)
    }
}
