/// Closed range `[min, max]` of reals.
///
/// Used both for the accepted span of ray parameters during intersection and for
/// the displayable range of color channels. `min > max` means empty.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    pub const EMPTY: Interval = Interval::new(f32::INFINITY, f32::NEG_INFINITY);
    pub const UNIVERSE: Interval = Interval::new(f32::NEG_INFINITY, f32::INFINITY);

    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// `max - min`; negative for an empty interval.
    pub fn size(&self) -> f32 {
        self.max - self.min
    }

    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }

    /// Membership with inclusive bounds.
    pub fn contains(&self, x: f32) -> bool {
        self.min <= x && x <= self.max
    }

    /// Membership with exclusive bounds. A root lying exactly on either end is
    /// not a valid hit.
    pub fn surrounds(&self, x: f32) -> bool {
        self.min < x && x < self.max
    }

    /// Pin `x` into the interval. Total for any interval, including `EMPTY`,
    /// where `f32::clamp` would panic.
    pub fn clamp(&self, x: f32) -> f32 {
        if x < self.min {
            return self.min;
        }
        if x > self.max {
            return self.max;
        }
        x
    }

    /// Same interval with its upper end moved to `max`.
    pub fn with_max(self, max: f32) -> Self {
        Self { max, ..self }
    }
}

impl Default for Interval {
    fn default() -> Self {
        Self::EMPTY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_inclusive_vs_exclusive() {
        let t = Interval::new(0.001, 5.0);
        for (x, contains, surrounds) in [
            (0.001, true, false),
            (5.0, true, false),
            (2.5, true, true),
            (0.0, false, false),
            (6.0, false, false),
        ] {
            assert_eq!(t.contains(x), contains, "contains({x})");
            assert_eq!(t.surrounds(x), surrounds, "surrounds({x})");
        }
    }

    #[test]
    fn test_clamp_to_unit_range() {
        let unit = Interval::new(0.0, 1.0);
        assert_eq!(unit.clamp(-0.2), 0.0);
        assert_eq!(unit.clamp(1.7), 1.0);
        assert_eq!(unit.clamp(0.42), 0.42);
    }

    #[test]
    fn test_empty_and_universe() {
        assert!(Interval::EMPTY.is_empty());
        assert!(Interval::default().is_empty());
        assert!(!Interval::EMPTY.contains(0.0));
        assert!(Interval::EMPTY.size() < 0.0);
        // Must not panic
        let _ = Interval::EMPTY.clamp(3.0);

        assert!(!Interval::UNIVERSE.is_empty());
        assert!(Interval::UNIVERSE.surrounds(-1e30));
        assert!(Interval::UNIVERSE.surrounds(1e30));
    }

    #[test]
    fn test_with_max_shrinks() {
        let t = Interval::new(0.001, f32::INFINITY).with_max(2.0);
        assert_eq!(t, Interval::new(0.001, 2.0));
        assert_eq!(t.size(), 2.0 - 0.001);
    }
}
