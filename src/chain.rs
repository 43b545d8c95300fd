//! The simulated ledger.
//!
//! Purchases and score saves go through the [`Ledger`] capability, which
//! returns a cosmetic receipt.  The shipped implementation fabricates
//! hashes locally; a real chain integration would satisfy the same trait
//! without touching game logic.
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a transaction was for
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub(crate) enum TxKind {
    Purchase,
    ScoreSync,
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TxKind::Purchase => "PURCHASE",
            TxKind::ScoreSync => "SCORE SYNC",
        };
        f.pad(name)
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub(crate) enum TxStatus {
    Success,
    Pending,
}

/// A (purely cosmetic) transaction receipt
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub(crate) struct Receipt {
    pub(crate) hash: String,
    pub(crate) kind: TxKind,
    pub(crate) timestamp: u64,
    pub(crate) status: TxStatus,
}

/// Submit a transaction, get a receipt.  The single seam between the game
/// and whatever pretends to be a chain.
pub(crate) trait Ledger: fmt::Debug {
    fn submit(&mut self, kind: TxKind) -> Receipt;
}

/// Ledger that invents receipts out of thin air and random bits
#[derive(Clone, Debug)]
pub(crate) struct SimulatedLedger<R = rand::rngs::ThreadRng> {
    rng: R,
}

impl SimulatedLedger {
    pub(crate) fn new() -> SimulatedLedger {
        SimulatedLedger { rng: rand::rng() }
    }
}

impl<R> SimulatedLedger<R> {
    pub(crate) fn with_rng(rng: R) -> SimulatedLedger<R> {
        SimulatedLedger { rng }
    }
}

impl<R: Rng + fmt::Debug> Ledger for SimulatedLedger<R> {
    fn submit(&mut self, kind: TxKind) -> Receipt {
        let mut hash = String::with_capacity(66);
        hash.push_str("0x");
        for _ in 0..64 {
            let digit: u32 = self.rng.random_range(0..16);
            hash.push(char::from_digit(digit, 16).expect("digit should be less than 16"));
        }
        Receipt {
            hash,
            kind,
            timestamp: crate::util::now_unix(),
            status: TxStatus::Success,
        }
    }
}
