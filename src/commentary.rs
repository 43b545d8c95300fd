//! Game-over commentary.
//!
//! The game-over screen asks the [`Commentary`] capability for a short
//! congratulatory line keyed to the final score.  Any failure is swallowed by
//! the caller, which falls back to
//! [`DEFAULT_COMMENTARY`][crate::consts::DEFAULT_COMMENTARY]; a broken
//! phrasebook must never take the UI down with it.
use crate::config::CommentaryConfig;
use rand::seq::IndexedRandom;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Score below which a run gets the gentle lines
const LOW_TIER: u32 = 10;

/// Score below which a run gets the mid-tier lines
const MID_TIER: u32 = 30;

/// Commentary capability: final score in, one short line out
pub(crate) trait Commentary: fmt::Debug {
    fn comment(&self, score: u32) -> Result<String, CommentaryError>;
}

#[derive(Debug, Error)]
pub(crate) enum CommentaryError {
    #[error("commentary is disabled")]
    Disabled,
    #[error("failed to read phrasebook")]
    Read(#[from] std::io::Error),
    #[error("failed to parse phrasebook")]
    Parse(#[from] toml::de::Error),
    #[error("phrasebook tier has no lines")]
    Empty,
}

/// The shipped implementation: a tiered phrasebook, either built in or
/// loaded from a user-supplied TOML file on every call (so edits show up
/// without a restart, and so failures stay contained to one game over)
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Phrasebook {
    enabled: bool,
    path: Option<PathBuf>,
}

impl Phrasebook {
    pub(crate) fn from_config(cfg: &CommentaryConfig) -> Phrasebook {
        Phrasebook {
            enabled: cfg.enabled,
            path: cfg.phrasebook.clone(),
        }
    }
}

impl Commentary for Phrasebook {
    fn comment(&self, score: u32) -> Result<String, CommentaryError> {
        if !self.enabled {
            return Err(CommentaryError::Disabled);
        }
        let tiers = if let Some(path) = &self.path {
            let src = fs_err::read_to_string(path)?;
            toml::from_str::<Tiers>(&src)?
        } else {
            Tiers::builtin()
        };
        tiers.pick(score, &mut rand::rng())
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Deserialize)]
#[serde(default)]
struct Tiers {
    low: Vec<String>,
    mid: Vec<String>,
    high: Vec<String>,
}

impl Tiers {
    fn builtin() -> Tiers {
        let lines = |phrases: &[&str]| phrases.iter().map(|&s| s.to_owned()).collect();
        Tiers {
            low: lines(&[
                "Every hunter starts somewhere!",
                "The mice got lucky this time.",
                "Warm-up round, right?",
            ]),
            mid: lines(&[
                "Now that's some proper mousing!",
                "The burrows are talking about you.",
                "A respectable day's hunt!",
            ]),
            high: lines(&[
                "Legendary! The mice fear your name.",
                "An apex predator walks among us.",
                "Scoreboard-shattering stuff!",
            ]),
        }
    }

    fn pick<R: rand::Rng>(&self, score: u32, rng: &mut R) -> Result<String, CommentaryError> {
        let tier = if score < LOW_TIER {
            &self.low
        } else if score < MID_TIER {
            &self.mid
        } else {
            &self.high
        };
        tier.choose(rng).cloned().ok_or(CommentaryError::Empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use rstest::rstest;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    fn phrasebook(enabled: bool, path: Option<PathBuf>) -> Phrasebook {
        Phrasebook { enabled, path }
    }

    #[rstest]
    #[case(0)]
    #[case(15)]
    #[case(99)]
    fn builtin_always_has_a_line(#[case] score: u32) {
        let pb = phrasebook(true, None);
        let line = pb.comment(score).expect("builtin phrasebook should succeed");
        assert!(!line.is_empty());
    }

    #[test]
    fn picks_from_the_right_tier() {
        let tiers = Tiers::builtin();
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED);
        let line = tiers.pick(50, &mut rng).expect("pick should succeed");
        assert!(tiers.high.contains(&line));
        let line = tiers.pick(3, &mut rng).expect("pick should succeed");
        assert!(tiers.low.contains(&line));
    }

    #[test]
    fn disabled_is_an_error() {
        let pb = phrasebook(false, None);
        assert!(matches!(pb.comment(10), Err(CommentaryError::Disabled)));
    }

    #[test]
    fn missing_phrasebook_is_an_error() {
        let tmp = tempfile::tempdir().expect("tempdir should be creatable");
        let pb = phrasebook(true, Some(tmp.path().join("nope.toml")));
        assert!(matches!(pb.comment(10), Err(CommentaryError::Read(_))));
    }

    #[test]
    fn malformed_phrasebook_is_an_error() {
        let tmp = tempfile::tempdir().expect("tempdir should be creatable");
        let path = tmp.path().join("phrases.toml");
        fs_err::write(&path, "low = \"not an array\"").expect("write should succeed");
        let pb = phrasebook(true, Some(path));
        assert!(matches!(pb.comment(10), Err(CommentaryError::Parse(_))));
    }

    #[test]
    fn empty_tier_is_an_error() {
        let tmp = tempfile::tempdir().expect("tempdir should be creatable");
        let path = tmp.path().join("phrases.toml");
        fs_err::write(&path, "high = [\"Only the best!\"]").expect("write should succeed");
        let pb = phrasebook(true, Some(path));
        assert!(matches!(pb.comment(0), Err(CommentaryError::Empty)));
        assert_eq!(
            pb.comment(40).expect("high tier should succeed"),
            "Only the best!"
        );
    }
}
