//! Packed ease selector and curve evaluation.
//!
//! An [`Ease`] is a single byte kept bit-compatible with baked assets:
//!
//! ```text
//! [M M M | F F F F F]
//!  7 6 5   4 3 2 1 0
//! ```
//!
//! The low 5 bits always name an [`EaseFamily`]. The top 3 bits are
//! context-dependent: the wrap view reads bit 7 as a reversed flag and bits
//! 6–5 as a [`WrapMode`]; the sequenced blender reads all three as a
//! [`Channel`] selector. The two views must not be conflated — which one
//! applies is a property of the data set the byte came from.

pub mod functions;

use serde::{Deserialize, Serialize};

use self::functions::*;

/// Named easing curve, stored in the low 5 bits of a selector byte.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum EaseFamily {
    #[default]
    Linear = 0,
    InSine = 1,
    OutSine = 2,
    InOutSine = 3,
    InQuad = 4,
    OutQuad = 5,
    InOutQuad = 6,
    InCubic = 7,
    OutCubic = 8,
    InOutCubic = 9,
    InQuart = 10,
    OutQuart = 11,
    InOutQuart = 12,
    InQuint = 13,
    OutQuint = 14,
    InOutQuint = 15,
    InExpo = 16,
    OutExpo = 17,
    InOutExpo = 18,
    InCirc = 19,
    OutCirc = 20,
    InOutCirc = 21,
    InElastic = 22,
    OutElastic = 23,
    InOutElastic = 24,
    InBack = 25,
    OutBack = 26,
    InOutBack = 27,
    InBounce = 28,
    OutBounce = 29,
    InOutBounce = 30,
    /// Placeholder for caller-supplied curves; always evaluates to 1. An
    /// adapter that owns authored curve assets substitutes its own sampling.
    Custom = 31,
}

impl EaseFamily {
    /// Decode a raw byte's family bits. Every masked value names a curve, so
    /// a raw byte can never select anything but a named family; the fallback
    /// arm pins the documented "unknown ⇒ linear" policy.
    pub fn from_byte(byte: u8) -> Self {
        match byte & Ease::FAMILY_MASK {
            0 => Self::Linear,
            1 => Self::InSine,
            2 => Self::OutSine,
            3 => Self::InOutSine,
            4 => Self::InQuad,
            5 => Self::OutQuad,
            6 => Self::InOutQuad,
            7 => Self::InCubic,
            8 => Self::OutCubic,
            9 => Self::InOutCubic,
            10 => Self::InQuart,
            11 => Self::OutQuart,
            12 => Self::InOutQuart,
            13 => Self::InQuint,
            14 => Self::OutQuint,
            15 => Self::InOutQuint,
            16 => Self::InExpo,
            17 => Self::OutExpo,
            18 => Self::InOutExpo,
            19 => Self::InCirc,
            20 => Self::OutCirc,
            21 => Self::InOutCirc,
            22 => Self::InElastic,
            23 => Self::OutElastic,
            24 => Self::InOutElastic,
            25 => Self::InBack,
            26 => Self::OutBack,
            27 => Self::InOutBack,
            28 => Self::InBounce,
            29 => Self::OutBounce,
            30 => Self::InOutBounce,
            31 => Self::Custom,
            _ => Self::Linear,
        }
    }

    /// Evaluate the curve at normalized time t. Callers pre-wrap t into
    /// [0,1]; the base curves do not clamp.
    pub fn evaluate(self, t: f32) -> f32 {
        match self {
            Self::Linear => t,
            Self::InSine => in_sine(t),
            Self::OutSine => out_sine(t),
            Self::InOutSine => in_out_sine(t),
            Self::InQuad => in_quad(t),
            Self::OutQuad => out_quad(t),
            Self::InOutQuad => in_out_quad(t),
            Self::InCubic => in_cubic(t),
            Self::OutCubic => out_cubic(t),
            Self::InOutCubic => in_out_cubic(t),
            Self::InQuart => in_quart(t),
            Self::OutQuart => out_quart(t),
            Self::InOutQuart => in_out_quart(t),
            Self::InQuint => in_quint(t),
            Self::OutQuint => out_quint(t),
            Self::InOutQuint => in_out_quint(t),
            Self::InExpo => in_expo(t),
            Self::OutExpo => out_expo(t),
            Self::InOutExpo => in_out_expo(t),
            Self::InCirc => in_circ(t),
            Self::OutCirc => out_circ(t),
            Self::InOutCirc => in_out_circ(t),
            Self::InElastic => in_elastic(t),
            Self::OutElastic => out_elastic(t),
            Self::InOutElastic => in_out_elastic(t),
            Self::InBack => in_back(t),
            Self::OutBack => out_back(t),
            Self::InOutBack => in_out_back(t),
            Self::InBounce => in_bounce(t),
            Self::OutBounce => out_bounce(t),
            Self::InOutBounce => in_out_bounce(t),
            Self::Custom => 1.0,
        }
    }
}

/// Wrap mode in the wrap view of the selector (bits 6–5). Value 3 is
/// reserved and decodes as `None`.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[repr(u8)]
pub enum WrapMode {
    #[default]
    None = 0,
    Loop = 1,
    PingPong = 2,
}

impl WrapMode {
    /// Normalize t according to this wrap mode. `None` passes t through.
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        match self {
            WrapMode::None => t,
            WrapMode::Loop => apply_loop(t),
            WrapMode::PingPong => apply_ping_pong(t),
        }
    }
}

/// Blend channel in the channel view of the selector (all top 3 bits).
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Channel {
    #[default]
    PositionX = 0,
    PositionY = 1,
    PositionZ = 2,
    Position = 3,
    RotationX = 4,
    RotationY = 5,
    RotationZ = 6,
    Scale = 7,
}

impl Channel {
    #[inline]
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0b111 {
            0 => Channel::PositionX,
            1 => Channel::PositionY,
            2 => Channel::PositionZ,
            3 => Channel::Position,
            4 => Channel::RotationX,
            5 => Channel::RotationY,
            6 => Channel::RotationZ,
            _ => Channel::Scale,
        }
    }
}

/// Packed ease selector byte. See the module docs for the bit layout and the
/// two context-dependent views of the top 3 bits.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ease(u8);

impl Ease {
    pub const FAMILY_MASK: u8 = 0b0001_1111;

    /// Build a selector from a family and raw leading bits (low 3 used).
    #[inline]
    pub fn new(family: EaseFamily, leading: u8) -> Self {
        Ease(family as u8 | (leading & 0b111) << 5)
    }

    /// Build a selector in the channel view (blender data sets).
    #[inline]
    pub fn with_channel(family: EaseFamily, channel: Channel) -> Self {
        Self::new(family, channel as u8)
    }

    /// Build a selector in the wrap view.
    #[inline]
    pub fn with_wrap(family: EaseFamily, wrap: WrapMode, reversed: bool) -> Self {
        Self::new(family, wrap as u8 | (u8::from(reversed) << 2))
    }

    #[inline]
    pub fn from_byte(byte: u8) -> Self {
        Ease(byte)
    }

    #[inline]
    pub fn byte(self) -> u8 {
        self.0
    }

    #[inline]
    pub fn family(self) -> EaseFamily {
        EaseFamily::from_byte(self.0)
    }

    /// Raw top 3 bits, shifted down.
    #[inline]
    pub fn leading_bits(self) -> u8 {
        (self.0 & !Self::FAMILY_MASK) >> 5
    }

    /// Channel view of the top 3 bits.
    #[inline]
    pub fn channel(self) -> Channel {
        Channel::from_bits(self.leading_bits())
    }

    /// Wrap view: bits 6–5.
    #[inline]
    pub fn wrap_mode(self) -> WrapMode {
        match (self.0 >> 5) & 0b11 {
            1 => WrapMode::Loop,
            2 => WrapMode::PingPong,
            _ => WrapMode::None,
        }
    }

    /// Wrap view: bit 7.
    #[inline]
    pub fn reversed(self) -> bool {
        self.0 & 0b1000_0000 != 0
    }

    /// Pre-wrap helper for the wrap view: apply the wrap mode, then mirror
    /// if the reversed flag is set. The result is ready for `evaluate`.
    #[inline]
    pub fn normalize_time(self, t: f32) -> f32 {
        let wrapped = self.wrap_mode().apply(t);
        if self.reversed() {
            1.0 - wrapped
        } else {
            wrapped
        }
    }

    /// Evaluate this selector's family at normalized time t.
    #[inline]
    pub fn evaluate(self, t: f32) -> f32 {
        self.family().evaluate(t)
    }

    /// Advance `time` by `step` against `duration` and sample the curve.
    /// Returns `(true, eased)` while still inside the duration; once the
    /// result exceeds it, returns `(false, 1.0)` — finished, not an error.
    /// Non-positive durations finish immediately.
    #[inline]
    pub fn try_evaluate(self, time: f32, duration: f32, step: f32) -> (bool, f32) {
        let time = time + step;
        if duration <= 0.0 || time > duration {
            return (false, 1.0);
        }
        (true, self.evaluate(time / duration))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// it should preserve the byte layout through the typed accessors
    #[test]
    fn selector_bit_layout() {
        let e = Ease::with_channel(EaseFamily::InOutCubic, Channel::RotationY);
        assert_eq!(e.byte(), 0b1010_1001);
        assert_eq!(e.family(), EaseFamily::InOutCubic);
        assert_eq!(e.channel(), Channel::RotationY);

        let w = Ease::with_wrap(EaseFamily::OutSine, WrapMode::PingPong, true);
        assert_eq!(w.family(), EaseFamily::OutSine);
        assert_eq!(w.wrap_mode(), WrapMode::PingPong);
        assert!(w.reversed());
    }

    /// it should decode every masked byte to a named family
    #[test]
    fn all_family_bytes_named() {
        for byte in 0u8..=255 {
            let family = EaseFamily::from_byte(byte);
            assert_eq!(family as u8, byte & Ease::FAMILY_MASK);
        }
    }
}
