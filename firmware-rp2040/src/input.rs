//! Physical inputs: active-low push buttons and an analog left stick.
//!
//! Buttons are wired between the GPIO and ground with the internal pull-up
//! enabled, so a pressed button reads low.

use embassy_rp::adc::{Adc, Async, Channel as AdcChannel, Error as AdcError};
use embassy_rp::gpio::Input;
use xinput_core::{Control, Directions, Transport, XInputController};

/// ADC full-scale reading (12-bit).
pub const ADC_MAX: i32 = 4095;

/// Face and system buttons with the control each one drives.
pub struct ButtonPad<'d> {
    dpad: [Input<'d>; 4],
    buttons: [(Input<'d>, Control); 6],
}

impl<'d> ButtonPad<'d> {
    /// Create a pad from D-pad inputs in up, down, left, right order and
    /// the remaining buttons paired with their controls.
    #[must_use]
    pub fn new(dpad: [Input<'d>; 4], buttons: [(Input<'d>, Control); 6]) -> Self {
        Self { dpad, buttons }
    }

    /// Current D-pad directions.
    #[must_use]
    pub fn directions(&self) -> Directions {
        let [up, down, left, right] = &self.dpad;
        Directions::new(up.is_low(), down.is_low(), left.is_low(), right.is_low())
    }

    /// Copy the button states into the controller.
    pub fn apply<T: Transport>(&self, pad: &mut XInputController<T>, socd: bool) {
        pad.set_dpad_directions(self.directions(), socd);
        for (input, control) in &self.buttons {
            pad.set_button(*control, input.is_low());
        }
    }
}

/// Left stick on two ADC channels.
pub struct AnalogStick<'d> {
    adc: Adc<'d, Async>,
    x: AdcChannel<'d>,
    y: AdcChannel<'d>,
}

impl<'d> AnalogStick<'d> {
    #[must_use]
    pub fn new(adc: Adc<'d, Async>, x: AdcChannel<'d>, y: AdcChannel<'d>) -> Self {
        Self { adc, x, y }
    }

    /// Sample both axes as raw ADC counts.
    pub async fn read(&mut self) -> Result<(i32, i32), AdcError> {
        let x = self.adc.read(&mut self.x).await?;
        let y = self.adc.read(&mut self.y).await?;
        // Pushing the stick up lowers the Y reading
        Ok((i32::from(x), ADC_MAX - i32::from(y)))
    }
}
