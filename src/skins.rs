//! The skin catalog: cosmetic colors plus the stat bundle each skin applies
//! to a run.
use enum_map::Enum;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a catalog skin.  The catalog is fixed; profiles persist
/// which entries they own and which one is active.
#[derive(Clone, Copy, Debug, Default, Deserialize, Enum, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum SkinId {
    #[default]
    Classic,
    Neon,
    Magma,
    Gold,
    Ghost,
}

impl SkinId {
    /// Look up the catalog entry for this id
    pub(crate) fn skin(self) -> &'static Skin {
        &CATALOG[self.into_usize()]
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Skin {
    pub(crate) id: SkinId,
    pub(crate) name: &'static str,
    pub(crate) price: u32,
    pub(crate) head_color: Color,
    pub(crate) body_color: Color,
    pub(crate) blurb: &'static str,
    pub(crate) stats: SkinStats,
}

/// Stat modifiers a skin applies to a run
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct SkinStats {
    /// Milliseconds shaved off the initial tick interval (negative = slower)
    pub(crate) speed_mod: i64,

    /// Multiplier on score deltas from non-poison food
    pub(crate) score_mod: Multiplier,

    /// Multiplier on positive growth deltas
    pub(crate) growth_mod: Multiplier,

    /// Multiplier on the score & growth impact of poison
    pub(crate) poison_resist: Multiplier,
}

impl SkinStats {
    pub(crate) const NEUTRAL: SkinStats = SkinStats {
        speed_mod: 0,
        score_mod: Multiplier::ONE,
        growth_mod: Multiplier::ONE,
        poison_resist: Multiplier::ONE,
    };
}

impl Default for SkinStats {
    fn default() -> SkinStats {
        SkinStats::NEUTRAL
    }
}

/// An exact rational stat multiplier.
///
/// The original stat table only ever uses small decimal factors, so keeping
/// them as numerator/denominator pairs gives exact ceiling & rounding
/// without any float arithmetic.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Multiplier {
    num: i32,
    den: i32,
}

impl Multiplier {
    pub(crate) const ONE: Multiplier = Multiplier { num: 1, den: 1 };

    /// `den` must be positive
    pub(crate) const fn of(num: i32, den: i32) -> Multiplier {
        Multiplier { num, den }
    }

    pub(crate) fn is_one(self) -> bool {
        self == Multiplier::ONE
    }

    /// `ceil(base × self)`
    pub(crate) fn apply_ceil(self, base: i32) -> i32 {
        let n = base * self.num;
        let q = n.div_euclid(self.den);
        if n.rem_euclid(self.den) != 0 {
            q + 1
        } else {
            q
        }
    }

    /// `round(base × self)`, rounding halves up
    pub(crate) fn apply_round(self, base: i32) -> i32 {
        (2 * base * self.num + self.den).div_euclid(2 * self.den)
    }
}

impl fmt::Display for Multiplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", f64::from(self.num) / f64::from(self.den))
    }
}

static CATALOG: [Skin; SkinId::LENGTH] = [
    Skin {
        id: SkinId::Classic,
        name: "Classic",
        price: 0,
        head_color: Color::Rgb(0x22, 0xC5, 0x5E),
        body_color: Color::Rgb(0x15, 0x80, 0x3D),
        blurb: "The green of the wild. Standard stats.",
        stats: SkinStats::NEUTRAL,
    },
    Skin {
        id: SkinId::Neon,
        name: "Neon Night",
        price: 50,
        head_color: Color::Rgb(0x06, 0xB6, 0xD4),
        body_color: Color::Rgb(0x08, 0x91, 0xB2),
        blurb: "Cyber speed! 20% faster, 25% more points.",
        stats: SkinStats {
            speed_mod: 20,
            score_mod: Multiplier::of(5, 4),
            ..SkinStats::NEUTRAL
        },
    },
    Skin {
        id: SkinId::Magma,
        name: "Magma",
        price: 150,
        head_color: Color::Rgb(0xF9, 0x73, 0x16),
        body_color: Color::Rgb(0xC2, 0x41, 0x0C),
        blurb: "Poison resistance! 50% less impact from poisons.",
        stats: SkinStats {
            poison_resist: Multiplier::of(1, 2),
            score_mod: Multiplier::of(11, 10),
            ..SkinStats::NEUTRAL
        },
    },
    Skin {
        id: SkinId::Gold,
        name: "Gold",
        price: 500,
        head_color: Color::Rgb(0xFA, 0xCC, 0x15),
        body_color: Color::Rgb(0xA1, 0x62, 0x07),
        blurb: "Wealth! All scores and coins are doubled.",
        stats: SkinStats {
            score_mod: Multiplier::of(2, 1),
            ..SkinStats::NEUTRAL
        },
    },
    Skin {
        id: SkinId::Ghost,
        name: "Ghost",
        price: 1000,
        head_color: Color::Rgb(0xF8, 0xFA, 0xFC),
        body_color: Color::Rgb(0xCB, 0xD5, 0xE1),
        blurb: "Weightless! Moves 30% slower and grows less.",
        stats: SkinStats {
            speed_mod: -40,
            growth_mod: Multiplier::of(1, 2),
            ..SkinStats::NEUTRAL
        },
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::EnumExt;
    use rstest::rstest;

    #[test]
    fn catalog_order_matches_ids() {
        for id in SkinId::iter() {
            assert_eq!(id.skin().id, id, "catalog entry out of order");
        }
    }

    #[test]
    fn classic_is_free_and_neutral() {
        let classic = SkinId::Classic.skin();
        assert_eq!(classic.price, 0);
        assert_eq!(classic.stats, SkinStats::NEUTRAL);
    }

    #[rstest]
    #[case(Multiplier::ONE, 1, 1)]
    #[case(Multiplier::of(5, 4), 1, 2)] // ceil(1.25) = 2
    #[case(Multiplier::of(2, 1), 1, 2)]
    #[case(Multiplier::of(2, 1), 5, 10)]
    #[case(Multiplier::of(11, 10), 5, 6)] // ceil(5.5) = 6
    #[case(Multiplier::of(1, 2), -3, -1)] // ceil(-1.5) = -1
    fn test_apply_ceil(#[case] m: Multiplier, #[case] base: i32, #[case] scaled: i32) {
        assert_eq!(m.apply_ceil(base), scaled);
    }

    #[rstest]
    #[case(Multiplier::ONE, 3, 3)]
    #[case(Multiplier::of(1, 2), 1, 1)] // round(0.5) = 1 (half up)
    #[case(Multiplier::of(1, 2), 3, 2)] // round(1.5) = 2
    #[case(Multiplier::of(1, 2), -2, -1)] // round(-1.0) = -1
    fn test_apply_round(#[case] m: Multiplier, #[case] base: i32, #[case] scaled: i32) {
        assert_eq!(m.apply_round(base), scaled);
    }

    #[rstest]
    #[case(Multiplier::of(5, 4), "1.25")]
    #[case(Multiplier::of(2, 1), "2")]
    #[case(Multiplier::of(11, 10), "1.1")]
    fn test_display(#[case] m: Multiplier, #[case] s: &str) {
        assert_eq!(m.to_string(), s);
    }

    #[test]
    fn skin_ids_serialize_lowercase() {
        let json = serde_json::to_string(&SkinId::Neon).expect("serialization should succeed");
        assert_eq!(json, r#""neon""#);
        let id = serde_json::from_str::<SkinId>(r#""ghost""#).expect("deserialization");
        assert_eq!(id, SkinId::Ghost);
    }
}
