//! Logical controls and their static report maps.
//!
//! Every control resolves through one of three lookups, [`button_map`],
//! [`trigger_map`] or [`joystick_map`]. A control that does not belong to a
//! category resolves to `None` for that category.

use crate::range::Range;
use crate::report::{
    DPAD_BYTE, FACE_BYTE, LEFT_STICK_X, LEFT_STICK_Y, LEFT_TRIGGER, RIGHT_STICK_X,
    RIGHT_STICK_Y, RIGHT_TRIGGER,
};

/// Every addressable control on the pad.
///
/// The discriminants are the numeric control ids of the Arduino XInput
/// library, so raw ids can be converted with [`TryFrom<u8>`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Control {
    ButtonLogo = 0,
    ButtonA = 1,
    ButtonB = 2,
    ButtonX = 3,
    ButtonY = 4,
    ButtonLb = 5,
    ButtonRb = 6,
    ButtonBack = 7,
    ButtonStart = 8,
    ButtonL3 = 9,
    ButtonR3 = 10,
    DpadUp = 11,
    DpadDown = 12,
    DpadLeft = 13,
    DpadRight = 14,
    TriggerLeft = 15,
    TriggerRight = 16,
    /// Left stick. Resolves to the L3 click when used as a button.
    JoyLeft = 17,
    /// Right stick. Resolves to the R3 click when used as a button.
    JoyRight = 18,
}

impl Control {
    /// All controls in identifier order.
    pub const ALL: [Control; 19] = [
        Control::ButtonLogo,
        Control::ButtonA,
        Control::ButtonB,
        Control::ButtonX,
        Control::ButtonY,
        Control::ButtonLb,
        Control::ButtonRb,
        Control::ButtonBack,
        Control::ButtonStart,
        Control::ButtonL3,
        Control::ButtonR3,
        Control::DpadUp,
        Control::DpadDown,
        Control::DpadLeft,
        Control::DpadRight,
        Control::TriggerLeft,
        Control::TriggerRight,
        Control::JoyLeft,
        Control::JoyRight,
    ];

    /// Raw numeric identifier.
    #[inline]
    #[must_use]
    pub const fn id(self) -> u8 {
        self as u8
    }
}

/// A raw identifier that names no control.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UnknownControl(pub u8);

impl TryFrom<u8> for Control {
    type Error = UnknownControl;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        Control::ALL
            .get(usize::from(id))
            .copied()
            .ok_or(UnknownControl(id))
    }
}

/// Location of a single button bit in the report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonMap {
    pub index: usize,
    pub mask: u8,
}

impl ButtonMap {
    const fn new(index: usize, bit: u8) -> Self {
        Self {
            index,
            mask: 1 << bit,
        }
    }
}

/// Location of a trigger byte in the report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TriggerMap {
    pub index: usize,
}

impl TriggerMap {
    /// Range of the trigger field on the wire.
    pub const NATIVE: Range = Range::TRIGGER_NATIVE;
}

/// Byte locations of a joystick's two little-endian axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct JoystickMap {
    pub x_low: usize,
    pub x_high: usize,
    pub y_low: usize,
    pub y_high: usize,
}

impl JoystickMap {
    /// Range of each joystick axis on the wire.
    pub const NATIVE: Range = Range::JOYSTICK_NATIVE;

    const fn at(x: usize, y: usize) -> Self {
        Self {
            x_low: x,
            x_high: x + 1,
            y_low: y,
            y_high: y + 1,
        }
    }
}

const MAP_DPAD_UP: ButtonMap = ButtonMap::new(DPAD_BYTE, 0);
const MAP_DPAD_DOWN: ButtonMap = ButtonMap::new(DPAD_BYTE, 1);
const MAP_DPAD_LEFT: ButtonMap = ButtonMap::new(DPAD_BYTE, 2);
const MAP_DPAD_RIGHT: ButtonMap = ButtonMap::new(DPAD_BYTE, 3);
const MAP_START: ButtonMap = ButtonMap::new(DPAD_BYTE, 4);
const MAP_BACK: ButtonMap = ButtonMap::new(DPAD_BYTE, 5);
const MAP_L3: ButtonMap = ButtonMap::new(DPAD_BYTE, 6);
const MAP_R3: ButtonMap = ButtonMap::new(DPAD_BYTE, 7);

const MAP_LB: ButtonMap = ButtonMap::new(FACE_BYTE, 0);
const MAP_RB: ButtonMap = ButtonMap::new(FACE_BYTE, 1);
const MAP_LOGO: ButtonMap = ButtonMap::new(FACE_BYTE, 2);
const MAP_A: ButtonMap = ButtonMap::new(FACE_BYTE, 4);
const MAP_B: ButtonMap = ButtonMap::new(FACE_BYTE, 5);
const MAP_X: ButtonMap = ButtonMap::new(FACE_BYTE, 6);
const MAP_Y: ButtonMap = ButtonMap::new(FACE_BYTE, 7);

const MAP_TRIGGER_LEFT: TriggerMap = TriggerMap {
    index: LEFT_TRIGGER,
};
const MAP_TRIGGER_RIGHT: TriggerMap = TriggerMap {
    index: RIGHT_TRIGGER,
};

const MAP_JOY_LEFT: JoystickMap = JoystickMap::at(LEFT_STICK_X, LEFT_STICK_Y);
const MAP_JOY_RIGHT: JoystickMap = JoystickMap::at(RIGHT_STICK_X, RIGHT_STICK_Y);

/// Resolve a control to its button bit.
///
/// Sticks alias to their click buttons; triggers have no button bit.
#[must_use]
pub const fn button_map(control: Control) -> Option<ButtonMap> {
    match control {
        Control::DpadUp => Some(MAP_DPAD_UP),
        Control::DpadDown => Some(MAP_DPAD_DOWN),
        Control::DpadLeft => Some(MAP_DPAD_LEFT),
        Control::DpadRight => Some(MAP_DPAD_RIGHT),
        Control::ButtonA => Some(MAP_A),
        Control::ButtonB => Some(MAP_B),
        Control::ButtonX => Some(MAP_X),
        Control::ButtonY => Some(MAP_Y),
        Control::ButtonLb => Some(MAP_LB),
        Control::ButtonRb => Some(MAP_RB),
        Control::JoyLeft | Control::ButtonL3 => Some(MAP_L3),
        Control::JoyRight | Control::ButtonR3 => Some(MAP_R3),
        Control::ButtonStart => Some(MAP_START),
        Control::ButtonBack => Some(MAP_BACK),
        Control::ButtonLogo => Some(MAP_LOGO),
        Control::TriggerLeft | Control::TriggerRight => None,
    }
}

/// Resolve a control to its trigger byte.
#[must_use]
pub const fn trigger_map(control: Control) -> Option<TriggerMap> {
    match control {
        Control::TriggerLeft => Some(MAP_TRIGGER_LEFT),
        Control::TriggerRight => Some(MAP_TRIGGER_RIGHT),
        _ => None,
    }
}

/// Resolve a control to its joystick axes.
#[must_use]
pub const fn joystick_map(control: Control) -> Option<JoystickMap> {
    match control {
        Control::JoyLeft => Some(MAP_JOY_LEFT),
        Control::JoyRight => Some(MAP_JOY_RIGHT),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_ids_round_trip() {
        for control in Control::ALL {
            assert_eq!(Control::try_from(control.id()), Ok(control));
        }
        assert_eq!(Control::try_from(19), Err(UnknownControl(19)));
        assert_eq!(Control::try_from(0xFF), Err(UnknownControl(0xFF)));
    }

    #[test]
    fn test_stick_click_aliases() {
        assert_eq!(button_map(Control::JoyLeft), button_map(Control::ButtonL3));
        assert_eq!(button_map(Control::JoyRight), button_map(Control::ButtonR3));
    }

    #[test]
    fn test_categories_are_exclusive_except_sticks() {
        for control in Control::ALL {
            let hits = [
                button_map(control).is_some(),
                trigger_map(control).is_some(),
                joystick_map(control).is_some(),
            ]
            .iter()
            .filter(|&&hit| hit)
            .count();

            match control {
                Control::JoyLeft | Control::JoyRight => assert_eq!(hits, 2),
                _ => assert_eq!(hits, 1, "{control:?}"),
            }
        }
    }

    #[test]
    fn test_button_bits_match_layout() {
        assert_eq!(button_map(Control::DpadUp), Some(ButtonMap { index: 2, mask: 0x01 }));
        assert_eq!(button_map(Control::ButtonR3), Some(ButtonMap { index: 2, mask: 0x80 }));
        assert_eq!(button_map(Control::ButtonLogo), Some(ButtonMap { index: 3, mask: 0x04 }));
        assert_eq!(button_map(Control::ButtonA), Some(ButtonMap { index: 3, mask: 0x10 }));
        assert_eq!(button_map(Control::ButtonY), Some(ButtonMap { index: 3, mask: 0x80 }));
    }

    #[test]
    fn test_joystick_offsets() {
        let right = joystick_map(Control::JoyRight).unwrap();
        assert_eq!((right.x_low, right.x_high, right.y_low, right.y_high), (10, 11, 12, 13));
    }
}
