use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    ops::{BitOr, BitOrAssign},
};

/// Bit set of gameplay mods as used by `enabled_mods` and the `mods` filter.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Mods(u32);

#[rustfmt::skip]
impl Mods {
    pub const NONE: Self =         Self(0);
    pub const NO_FAIL: Self =      Self(1 << 0);
    pub const EASY: Self =         Self(1 << 1);
    pub const TOUCH_DEVICE: Self = Self(1 << 2);
    pub const HIDDEN: Self =       Self(1 << 3);
    pub const HARD_ROCK: Self =    Self(1 << 4);
    pub const SUDDEN_DEATH: Self = Self(1 << 5);
    pub const DOUBLE_TIME: Self =  Self(1 << 6);
    pub const RELAX: Self =        Self(1 << 7);
    pub const HALF_TIME: Self =    Self(1 << 8);
    pub const NIGHTCORE: Self =    Self(1 << 9);
    pub const FLASHLIGHT: Self =   Self(1 << 10);
    pub const AUTOPLAY: Self =     Self(1 << 11);
    pub const SPUN_OUT: Self =     Self(1 << 12);
    pub const AUTOPILOT: Self =    Self(1 << 13);
    pub const PERFECT: Self =      Self(1 << 14);
    pub const KEY4: Self =         Self(1 << 15);
    pub const KEY5: Self =         Self(1 << 16);
    pub const KEY6: Self =         Self(1 << 17);
    pub const KEY7: Self =         Self(1 << 18);
    pub const KEY8: Self =         Self(1 << 19);
    pub const FADE_IN: Self =      Self(1 << 20);
    pub const RANDOM: Self =       Self(1 << 21);
    pub const CINEMA: Self =       Self(1 << 22);
    pub const TARGET: Self =       Self(1 << 23);
    pub const KEY9: Self =         Self(1 << 24);
    pub const KEY_COOP: Self =     Self(1 << 25);
    pub const KEY1: Self =         Self(1 << 26);
    pub const KEY3: Self =         Self(1 << 27);
    pub const KEY2: Self =         Self(1 << 28);
    pub const SCORE_V2: Self =     Self(1 << 29);
    pub const MIRROR: Self =       Self(1 << 30);
}

static ACRONYMS: [(Mods, &str); 31] = [
    (Mods::NO_FAIL, "NF"),
    (Mods::EASY, "EZ"),
    (Mods::TOUCH_DEVICE, "TD"),
    (Mods::HIDDEN, "HD"),
    (Mods::HARD_ROCK, "HR"),
    (Mods::SUDDEN_DEATH, "SD"),
    (Mods::DOUBLE_TIME, "DT"),
    (Mods::RELAX, "RX"),
    (Mods::HALF_TIME, "HT"),
    (Mods::NIGHTCORE, "NC"),
    (Mods::FLASHLIGHT, "FL"),
    (Mods::AUTOPLAY, "AT"),
    (Mods::SPUN_OUT, "SO"),
    (Mods::AUTOPILOT, "AP"),
    (Mods::PERFECT, "PF"),
    (Mods::KEY4, "4K"),
    (Mods::KEY5, "5K"),
    (Mods::KEY6, "6K"),
    (Mods::KEY7, "7K"),
    (Mods::KEY8, "8K"),
    (Mods::FADE_IN, "FI"),
    (Mods::RANDOM, "RD"),
    (Mods::CINEMA, "CN"),
    (Mods::TARGET, "TP"),
    (Mods::KEY9, "9K"),
    (Mods::KEY_COOP, "CO"),
    (Mods::KEY1, "1K"),
    (Mods::KEY3, "3K"),
    (Mods::KEY2, "2K"),
    (Mods::SCORE_V2, "V2"),
    (Mods::MIRROR, "MR"),
];

impl Mods {
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Unassigned bits are dropped.
    pub const fn from_bits_truncate(bits: u32) -> Self {
        Self(bits & (u32::MAX >> 1))
    }

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }
}

impl Display for Mods {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        if self.is_empty() {
            return f.write_str("NM");
        }

        // NC and PF imply DT and SD, the API sets both bits
        let mut bits = *self;

        if bits.contains(Self::NIGHTCORE) {
            bits.0 &= !Self::DOUBLE_TIME.0;
        }

        if bits.contains(Self::PERFECT) {
            bits.0 &= !Self::SUDDEN_DEATH.0;
        }

        ACRONYMS
            .iter()
            .filter(|(m, _)| bits.contains(*m))
            .try_for_each(|(_, acronym)| f.write_str(acronym))
    }
}

impl From<u32> for Mods {
    #[inline]
    fn from(bits: u32) -> Self {
        Self::from_bits_truncate(bits)
    }
}

impl BitOr for Mods {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Mods {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_acronyms() {
        assert_eq!(Mods::NONE.to_string(), "NM");
        assert_eq!((Mods::HIDDEN | Mods::HARD_ROCK).to_string(), "HDHR");
        assert_eq!(Mods::from(72).to_string(), "HDDT");
        assert_eq!(Mods::from(584).to_string(), "HDNC");
    }

    #[test]
    fn bits_roundtrip() {
        let mods = Mods::HIDDEN | Mods::DOUBLE_TIME;

        assert_eq!(mods.bits(), 72);
        assert_eq!(mods.len(), 2);
        assert!(mods.contains(Mods::HIDDEN));
        assert!(!mods.contains(Mods::FLASHLIGHT));
        assert_eq!(Mods::from(1 << 31), Mods::NONE);
    }
}
