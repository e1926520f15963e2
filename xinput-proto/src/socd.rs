//! Directional inputs and SOCD (simultaneous opposite cardinal direction)
//! cleaning.

/// Four digital directions, as read from a D-pad or a digital stick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Directions {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl Directions {
    pub const NEUTRAL: Self = Self {
        up: false,
        down: false,
        left: false,
        right: false,
    };

    #[must_use]
    pub const fn new(up: bool, down: bool, left: bool, right: bool) -> Self {
        Self {
            up,
            down,
            left,
            right,
        }
    }

    /// Resolve opposing pairs: up + down keeps up, left + right is neutral.
    #[must_use]
    pub const fn cleaned(self) -> Self {
        let (left, right) = if self.left && self.right {
            (false, false)
        } else {
            (self.left, self.right)
        };
        Self {
            up: self.up,
            down: self.down && !self.up,
            left,
            right,
        }
    }

    /// Clean when `socd` is set, otherwise return the directions untouched.
    #[inline]
    #[must_use]
    pub const fn resolve(self, socd: bool) -> Self {
        if socd {
            self.cleaned()
        } else {
            self
        }
    }

    /// Joystick axes for these directions, `(x, y)`.
    ///
    /// An axis only leaves zero when exactly one of its two directions is
    /// held; `i16::MIN + i16::MAX` is -1, not 0.
    #[must_use]
    pub const fn axes(self) -> (i16, i16) {
        (axis(self.left, self.right), axis(self.down, self.up))
    }
}

const fn axis(negative: bool, positive: bool) -> i16 {
    match (negative, positive) {
        (true, false) => i16::MIN,
        (false, true) => i16::MAX,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cleaning() {
        let all = Directions::new(true, true, true, true).cleaned();
        assert_eq!(all, Directions::new(true, false, false, false));

        let down_right = Directions::new(false, true, false, true);
        assert_eq!(down_right.cleaned(), down_right);
    }

    #[test]
    fn test_resolve_without_socd_is_raw() {
        let all = Directions::new(true, true, true, true);
        assert_eq!(all.resolve(false), all);
    }

    #[test]
    fn test_axes() {
        assert_eq!(Directions::new(true, false, false, false).axes(), (0, 32767));
        assert_eq!(Directions::new(false, true, true, false).axes(), (-32768, -32768));
        assert_eq!(Directions::new(true, true, true, true).axes(), (0, 0));
        assert_eq!(Directions::NEUTRAL.axes(), (0, 0));
    }

    #[test]
    fn test_cleaned_axes() {
        let up_down = Directions::new(true, true, false, false);
        assert_eq!(up_down.resolve(true).axes(), (0, i16::MAX));
        assert_eq!(up_down.resolve(false).axes(), (0, 0));

        let left_right = Directions::new(false, false, true, true);
        assert_eq!(left_right.resolve(true).axes(), (0, 0));
    }
}
