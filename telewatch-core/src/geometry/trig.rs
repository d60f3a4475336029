//! Fixed-point trigonometry
//!
//! A full turn is [`TRIG_MAX_ANGLE`] units and sine/cosine are scaled to
//! [`TRIG_MAX_RATIO`]. Values come from a quarter-wave table with linear
//! interpolation between entries.

/// Units in one full turn
pub const TRIG_MAX_ANGLE: i32 = 0x10000;

/// Value of sin(90°)
pub const TRIG_MAX_RATIO: i32 = 0xFFFF;

const QUARTER_TURN: i32 = TRIG_MAX_ANGLE / 4;
const TABLE_STEPS: i32 = 64;
const STEP: i32 = QUARTER_TURN / TABLE_STEPS;

/// sin(i * 90° / 64) * 0xFFFF, rounded
const QUARTER_SINE: [u16; TABLE_STEPS as usize + 1] = [
    0, 1608, 3216, 4821, 6424, 8022, 9616, 11204, //
    12785, 14359, 15924, 17479, 19024, 20557, 22078, 23586, //
    25079, 26557, 28020, 29465, 30893, 32302, 33692, 35061, //
    36409, 37736, 39039, 40319, 41575, 42806, 44011, 45189, //
    46340, 47464, 48558, 49624, 50659, 51664, 52638, 53580, //
    54490, 55367, 56211, 57021, 57797, 58537, 59243, 59913, //
    60546, 61144, 61704, 62227, 62713, 63161, 63571, 63943, //
    64276, 64570, 64826, 65042, 65219, 65357, 65456, 65515, //
    65535,
];

/// An angle in fixed-point turn units
///
/// Zero points at 12 o'clock; angles grow clockwise on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Angle(i32);

impl Angle {
    pub const ZERO: Angle = Angle(0);

    /// Angle from raw turn units
    pub const fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    /// `numerator / denominator` of a full turn, truncated
    pub const fn from_turns(numerator: i32, denominator: i32) -> Self {
        Self(TRIG_MAX_ANGLE * numerator / denominator)
    }

    /// Raw turn units
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// The same direction reduced into `0..TRIG_MAX_ANGLE`
    pub const fn normalized(self) -> Self {
        Self(self.0.rem_euclid(TRIG_MAX_ANGLE))
    }

    pub fn sin(self) -> i32 {
        sin_lookup(self.0)
    }

    pub fn cos(self) -> i32 {
        cos_lookup(self.0)
    }
}

/// Sine of `angle` turn units, scaled to [`TRIG_MAX_RATIO`]
pub fn sin_lookup(angle: i32) -> i32 {
    let angle = angle.rem_euclid(TRIG_MAX_ANGLE);
    let offset = angle % QUARTER_TURN;
    match angle / QUARTER_TURN {
        0 => quarter_sine(offset),
        1 => quarter_sine(QUARTER_TURN - offset),
        2 => -quarter_sine(offset),
        _ => -quarter_sine(QUARTER_TURN - offset),
    }
}

/// Cosine of `angle` turn units, scaled to [`TRIG_MAX_RATIO`]
pub fn cos_lookup(angle: i32) -> i32 {
    sin_lookup(angle.wrapping_add(QUARTER_TURN))
}

// offset is in 0..=QUARTER_TURN
fn quarter_sine(offset: i32) -> i32 {
    let index = (offset / STEP) as usize;
    let low = QUARTER_SINE[index] as i32;
    if index == TABLE_STEPS as usize {
        return low;
    }
    let high = QUARTER_SINE[index + 1] as i32;
    low + (high - low) * (offset % STEP) / STEP
}
