//! Input ranges and clamped linear rescaling.

/// Inclusive `[min, max]` range of an analog value.
///
/// A range always satisfies `min < max`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Range {
    min: i32,
    max: i32,
}

/// Returned by [`Range::new`] when `min >= max`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidRange {
    pub min: i32,
    pub max: i32,
}

impl Range {
    /// Wire range of a trigger byte.
    pub const TRIGGER_NATIVE: Self = Self { min: 0, max: 255 };

    /// Wire range of a joystick axis.
    pub const JOYSTICK_NATIVE: Self = Self {
        min: i16::MIN as i32,
        max: i16::MAX as i32,
    };

    /// Create a range, rejecting empty or inverted bounds.
    pub const fn new(min: i32, max: i32) -> Result<Self, InvalidRange> {
        if min >= max {
            return Err(InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    #[inline]
    #[must_use]
    pub const fn min(self) -> i32 {
        self.min
    }

    #[inline]
    #[must_use]
    pub const fn max(self) -> i32 {
        self.max
    }
}

/// Rescale `value` from `input` to `output`.
///
/// Values at or beyond the input bounds land exactly on the output bounds,
/// identical ranges pass the value through untouched, and everything else is
/// linearly interpolated with truncating integer division.
#[must_use]
pub fn rescale(value: i32, input: Range, output: Range) -> i32 {
    if value <= input.min {
        return output.min;
    }
    if value >= input.max {
        return output.max;
    }
    if input == output {
        return value;
    }

    let offset = i64::from(value) - i64::from(input.min);
    let out_span = i64::from(output.max) - i64::from(output.min);
    let in_span = i64::from(input.max) - i64::from(input.min);
    let scaled = offset * out_span / in_span + i64::from(output.min);

    // value is strictly inside input, so scaled lies inside output
    scaled as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_empty_and_inverted() {
        assert_eq!(Range::new(5, 5), Err(InvalidRange { min: 5, max: 5 }));
        assert_eq!(Range::new(10, -10), Err(InvalidRange { min: 10, max: -10 }));
        assert!(Range::new(-1, 1).is_ok());
    }

    #[test]
    fn test_identity_range_passes_through() {
        let native = Range::TRIGGER_NATIVE;
        for v in 0..=255 {
            assert_eq!(rescale(v, native, native), v);
        }
    }

    #[test]
    fn test_clamps_at_bounds() {
        let input = Range::new(0, 100).unwrap();
        assert_eq!(rescale(-50, input, Range::TRIGGER_NATIVE), 0);
        assert_eq!(rescale(0, input, Range::TRIGGER_NATIVE), 0);
        assert_eq!(rescale(100, input, Range::TRIGGER_NATIVE), 255);
        assert_eq!(rescale(i32::MAX, input, Range::TRIGGER_NATIVE), 255);
    }

    #[test]
    fn test_midpoint() {
        let input = Range::new(0, 100).unwrap();
        assert_eq!(rescale(50, input, Range::TRIGGER_NATIVE), 127);
    }

    #[test]
    fn test_wide_ranges_do_not_overflow() {
        let input = Range::new(i32::MIN, i32::MAX).unwrap();
        let out = rescale(0, input, Range::JOYSTICK_NATIVE);
        assert!((-1..=0).contains(&out));
        assert_eq!(rescale(i32::MIN, input, Range::JOYSTICK_NATIVE), -32768);
        assert_eq!(rescale(i32::MAX, input, Range::JOYSTICK_NATIVE), 32767);
    }

    #[test]
    fn test_adc_range_to_joystick() {
        let adc = Range::new(0, 1023).unwrap();
        assert_eq!(rescale(0, adc, Range::JOYSTICK_NATIVE), -32768);
        assert_eq!(rescale(1023, adc, Range::JOYSTICK_NATIVE), 32767);
        let mid = rescale(512, adc, Range::JOYSTICK_NATIVE);
        assert!((0..=64).contains(&mid), "mid = {mid}");
    }
}
