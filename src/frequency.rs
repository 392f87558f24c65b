//! Frequency display

use alloc::string::{String, ToString};
use core::fmt;

/// A frequency in hertz, displayed in megahertz as `MMM.kkk`.
///
/// The integer part is space-padded to three digits and the fractional part
/// is the kilohertz, zero-padded to three digits. Anything below 1 kHz is
/// truncated.
///
/// ```
/// use spiradio::MegaHertz;
///
/// assert_eq!(MegaHertz(433_920_000).to_string(), "433.920");
/// assert_eq!(MegaHertz(0).to_string(), "  0.000");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MegaHertz(pub u32);

impl fmt::Display for MegaHertz {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mhz = self.0 / 1_000_000;
        let khz = (self.0 % 1_000_000) / 1_000;
        write!(f, "{mhz:3}.{khz:03}")
    }
}

/// Formats `freq` hertz as a `MMM.kkk` megahertz string.
pub fn mega_hertz(freq: u32) -> String {
    MegaHertz(freq).to_string()
}
