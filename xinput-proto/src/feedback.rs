//! Host-to-device feedback packets: rumble and player LEDs.

/// Largest feedback packet the host sends.
pub const MAX_FEEDBACK_SIZE: usize = 8;

/// Shortest packet worth decoding (type, length and one payload byte).
pub const MIN_FEEDBACK_SIZE: usize = 3;

/// Packet type byte for rumble packets.
pub const RUMBLE_TYPE: u8 = 0x00;

/// Packet type byte for LED packets.
pub const LED_TYPE: u8 = 0x01;

/// Offset of the large (left) motor intensity in a rumble packet.
pub const RUMBLE_LEFT_OFFSET: usize = 3;

/// Offset of the small (right) motor intensity in a rumble packet.
pub const RUMBLE_RIGHT_OFFSET: usize = 4;

/// Offset of the pattern code in an LED packet.
pub const LED_OFFSET: usize = 2;

/// Ring-of-light animation requested by the host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum LedPattern {
    #[default]
    Off = 0x00,
    Blinking = 0x01,
    Flash1 = 0x02,
    Flash2 = 0x03,
    Flash3 = 0x04,
    Flash4 = 0x05,
    On1 = 0x06,
    On2 = 0x07,
    On3 = 0x08,
    On4 = 0x09,
    Rotating = 0x0A,
    BlinkOnce = 0x0B,
    BlinkSlow = 0x0C,
    Alternating = 0x0D,
}

/// LED code outside `0x00..=0x0D`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UnknownLedPattern(pub u8);

impl LedPattern {
    /// Player slot this pattern assigns.
    ///
    /// `None` for the animations that say nothing about the slot, so the
    /// previous assignment stays in effect.
    #[must_use]
    pub const fn player(self) -> Option<u8> {
        match self {
            LedPattern::Off | LedPattern::Blinking => Some(0),
            LedPattern::On1 | LedPattern::Flash1 => Some(1),
            LedPattern::On2 | LedPattern::Flash2 => Some(2),
            LedPattern::On3 | LedPattern::Flash3 => Some(3),
            LedPattern::On4 | LedPattern::Flash4 => Some(4),
            LedPattern::Rotating
            | LedPattern::BlinkOnce
            | LedPattern::BlinkSlow
            | LedPattern::Alternating => None,
        }
    }
}

impl TryFrom<u8> for LedPattern {
    type Error = UnknownLedPattern;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Ok(match code {
            0x00 => LedPattern::Off,
            0x01 => LedPattern::Blinking,
            0x02 => LedPattern::Flash1,
            0x03 => LedPattern::Flash2,
            0x04 => LedPattern::Flash3,
            0x05 => LedPattern::Flash4,
            0x06 => LedPattern::On1,
            0x07 => LedPattern::On2,
            0x08 => LedPattern::On3,
            0x09 => LedPattern::On4,
            0x0A => LedPattern::Rotating,
            0x0B => LedPattern::BlinkOnce,
            0x0C => LedPattern::BlinkSlow,
            0x0D => LedPattern::Alternating,
            other => return Err(UnknownLedPattern(other)),
        })
    }
}

/// Decoded feedback packet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FeedbackPacket {
    /// Motor intensities, large (left) and small (right).
    Rumble { left: u8, right: u8 },
    /// Raw LED pattern code, not yet validated.
    Led(u8),
    /// Any other packet type.
    Other(u8),
}

impl FeedbackPacket {
    /// Decode a packet.
    ///
    /// Returns `None` for packets shorter than [`MIN_FEEDBACK_SIZE`]. Payload
    /// bytes past the end of a short packet read as zero.
    #[must_use]
    pub fn decode(data: &[u8]) -> Option<Self> {
        if data.len() < MIN_FEEDBACK_SIZE {
            return None;
        }
        let byte = |offset: usize| data.get(offset).copied().unwrap_or(0);

        Some(match data[0] {
            RUMBLE_TYPE => FeedbackPacket::Rumble {
                left: byte(RUMBLE_LEFT_OFFSET),
                right: byte(RUMBLE_RIGHT_OFFSET),
            },
            LED_TYPE => FeedbackPacket::Led(byte(LED_OFFSET)),
            other => FeedbackPacket::Other(other),
        })
    }

    /// Packet type byte this packet was decoded from.
    #[must_use]
    pub const fn packet_type(&self) -> u8 {
        match self {
            FeedbackPacket::Rumble { .. } => RUMBLE_TYPE,
            FeedbackPacket::Led(_) => LED_TYPE,
            FeedbackPacket::Other(packet_type) => *packet_type,
        }
    }
}

/// Feedback state accumulated from the host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Feedback {
    pub rumble_left: u8,
    pub rumble_right: u8,
    pub led: LedPattern,
    pub player: u8,
}

impl Feedback {
    /// No rumble, LEDs off, no player slot.
    pub const NONE: Self = Self {
        rumble_left: 0,
        rumble_right: 0,
        led: LedPattern::Off,
        player: 0,
    };

    /// Both motors packed as `left << 8 | right`.
    #[inline]
    #[must_use]
    pub const fn rumble(&self) -> u16 {
        (self.rumble_left as u16) << 8 | self.rumble_right as u16
    }

    /// Apply a decoded packet. Returns whether any field changed.
    ///
    /// An LED packet with an unknown pattern code leaves the state untouched
    /// and returns the code as an error.
    pub fn apply(&mut self, packet: FeedbackPacket) -> Result<bool, UnknownLedPattern> {
        let before = *self;
        match packet {
            FeedbackPacket::Rumble { left, right } => {
                self.rumble_left = left;
                self.rumble_right = right;
            }
            FeedbackPacket::Led(code) => {
                let pattern = LedPattern::try_from(code)?;
                self.led = pattern;
                if let Some(player) = pattern.player() {
                    self.player = player;
                }
            }
            FeedbackPacket::Other(_) => {}
        }
        Ok(*self != before)
    }
}
