//! Per-identity persisted state: coin balance, owned & active skins, and the
//! recent-transaction log.
//!
//! Every field is stored under its own key so that one corrupt value never
//! takes the rest of the profile down with it; a key that fails to load
//! falls back to its default and the error is reported upward as a warning.
use crate::chain::Receipt;
use crate::consts;
use crate::skins::SkinId;
use crate::store::{get_value, put_value, KvStore, LoadError, SaveError};
use enum_map::EnumMap;

/// Store key for the global high score (shared across identities)
pub(crate) const HIGH_SCORE_KEY: &str = "high-score";

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Profile {
    pub(crate) coins: u32,
    pub(crate) owned: EnumMap<SkinId, bool>,
    pub(crate) active: SkinId,
    pub(crate) txs: Vec<Receipt>,
}

impl Default for Profile {
    fn default() -> Profile {
        let mut owned = EnumMap::default();
        owned[SkinId::Classic] = true;
        Profile {
            coins: 0,
            owned,
            active: SkinId::Classic,
            txs: Vec::new(),
        }
    }
}

impl Profile {
    /// Load the profile stored under `ns`, falling back to the default for
    /// any key that is missing or corrupt.  Load failures are returned
    /// alongside the profile for display as warnings.
    pub(crate) fn load(store: &dyn KvStore, ns: &str) -> (Profile, Vec<LoadError>) {
        let mut profile = Profile::default();
        let mut errors = Vec::new();
        match get_value::<u32>(store, &key(ns, "coins")) {
            Ok(Some(coins)) => profile.coins = coins,
            Ok(None) => (),
            Err(e) => errors.push(e),
        }
        match get_value::<Vec<SkinId>>(store, &key(ns, "owned-skins")) {
            Ok(Some(ids)) => {
                for id in ids {
                    profile.owned[id] = true;
                }
            }
            Ok(None) => (),
            Err(e) => errors.push(e),
        }
        match get_value::<SkinId>(store, &key(ns, "active-skin")) {
            Ok(Some(id)) => profile.active = id,
            Ok(None) => (),
            Err(e) => errors.push(e),
        }
        match get_value::<Vec<Receipt>>(store, &key(ns, "txs")) {
            Ok(Some(txs)) => profile.txs = txs,
            Ok(None) => (),
            Err(e) => errors.push(e),
        }
        // The free skin is always owned, and the active skin must be owned
        profile.owned[SkinId::Classic] = true;
        if !profile.owned[profile.active] {
            profile.active = SkinId::Classic;
        }
        (profile, errors)
    }

    pub(crate) fn save_coins(&self, store: &dyn KvStore, ns: &str) -> Result<(), SaveError> {
        put_value(store, &key(ns, "coins"), &self.coins)
    }

    pub(crate) fn save_skins(&self, store: &dyn KvStore, ns: &str) -> Result<(), SaveError> {
        let owned = self
            .owned
            .iter()
            .filter_map(|(id, &have)| have.then_some(id))
            .collect::<Vec<_>>();
        put_value(store, &key(ns, "owned-skins"), &owned)?;
        put_value(store, &key(ns, "active-skin"), &self.active)
    }

    /// Prepend a receipt to the transaction log, dropping the oldest beyond
    /// the cap, and persist the log
    pub(crate) fn record_tx(
        &mut self,
        store: &dyn KvStore,
        ns: &str,
        receipt: Receipt,
    ) -> Result<(), SaveError> {
        self.txs.insert(0, receipt);
        self.txs.truncate(consts::MAX_TX_LOG);
        put_value(store, &key(ns, "txs"), &self.txs)
    }
}

fn key(ns: &str, field: &str) -> String {
    format!("{ns}/{field}")
}

pub(crate) fn load_high_score(store: &dyn KvStore) -> Result<u32, LoadError> {
    Ok(get_value::<u32>(store, HIGH_SCORE_KEY)?.unwrap_or(0))
}

pub(crate) fn save_high_score(store: &dyn KvStore, score: u32) -> Result<(), SaveError> {
    put_value(store, HIGH_SCORE_KEY, &score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::{TxKind, TxStatus};
    use crate::store::MemoryStore;

    fn receipt(n: u64) -> Receipt {
        Receipt {
            hash: format!("0x{n:064x}"),
            kind: TxKind::ScoreSync,
            timestamp: n,
            status: TxStatus::Success,
        }
    }

    #[test]
    fn fresh_profile_defaults() {
        let store = MemoryStore::new();
        let (profile, errors) = Profile::load(&store, "guest");
        assert!(errors.is_empty());
        assert_eq!(profile, Profile::default());
        assert!(profile.owned[SkinId::Classic]);
        assert!(!profile.owned[SkinId::Gold]);
    }

    #[test]
    fn roundtrip() {
        let store = MemoryStore::new();
        let mut profile = Profile {
            coins: 77,
            active: SkinId::Neon,
            ..Profile::default()
        };
        profile.owned[SkinId::Neon] = true;
        profile.save_coins(&store, "guest").expect("save should succeed");
        profile.save_skins(&store, "guest").expect("save should succeed");
        let (loaded, errors) = Profile::load(&store, "guest");
        assert!(errors.is_empty());
        assert_eq!(loaded, profile);
    }

    #[test]
    fn corrupt_key_falls_back_alone() {
        let store = MemoryStore::new();
        let profile = Profile {
            coins: 500,
            ..Profile::default()
        };
        profile.save_coins(&store, "guest").expect("save should succeed");
        store
            .set("guest/active-skin", "not a skin id")
            .expect("set should succeed");
        let (loaded, errors) = Profile::load(&store, "guest");
        assert_eq!(errors.len(), 1);
        assert_eq!(loaded.coins, 500);
        assert_eq!(loaded.active, SkinId::Classic);
    }

    #[test]
    fn unowned_active_skin_resets_to_classic() {
        let store = MemoryStore::new();
        put_value(&store, "guest/active-skin", &SkinId::Gold).expect("put should succeed");
        let (loaded, errors) = Profile::load(&store, "guest");
        assert!(errors.is_empty());
        assert_eq!(loaded.active, SkinId::Classic);
    }

    #[test]
    fn profiles_are_namespaced() {
        let store = MemoryStore::new();
        let profile = Profile {
            coins: 9,
            ..Profile::default()
        };
        profile.save_coins(&store, "0xabcdef").expect("save should succeed");
        let (guest, _) = Profile::load(&store, "guest");
        assert_eq!(guest.coins, 0);
        let (wallet, _) = Profile::load(&store, "0xabcdef");
        assert_eq!(wallet.coins, 9);
    }

    #[test]
    fn tx_log_caps_at_five_newest_first() {
        let store = MemoryStore::new();
        let mut profile = Profile::default();
        for n in 0..7 {
            profile
                .record_tx(&store, "guest", receipt(n))
                .expect("record should succeed");
        }
        assert_eq!(profile.txs.len(), consts::MAX_TX_LOG);
        let stamps = profile.txs.iter().map(|r| r.timestamp).collect::<Vec<_>>();
        assert_eq!(stamps, vec![6, 5, 4, 3, 2]);
        let (loaded, _) = Profile::load(&store, "guest");
        assert_eq!(loaded.txs, profile.txs);
    }

    #[test]
    fn high_score_roundtrip() {
        let store = MemoryStore::new();
        assert_eq!(load_high_score(&store).expect("load should succeed"), 0);
        save_high_score(&store, 42).expect("save should succeed");
        assert_eq!(load_high_score(&store).expect("load should succeed"), 42);
    }
}
