use crate::chain::Ledger;
use crate::commentary::Commentary;
use crate::config::Config;
use crate::consts;
use crate::leaderboard::Leaderboard;
use crate::profile::{load_high_score, Profile};
use crate::session::Session;
use crate::skins::Skin;
use crate::store::KvStore;
use enum_map::Enum;
use ratatui::layout::{Flex, Layout, Rect, Size};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Shared context threaded through every screen: configuration, identity,
/// loaded state, and the injected capabilities (store, ledger, commentary).
///
/// Screens own a copy and hand clones to whatever screen they transition to,
/// so mutations made on one screen flow forward.  The capability handles are
/// `Rc`s, so cloning shares them.
#[derive(Clone, Debug)]
pub(crate) struct Globals {
    pub(crate) config: Config,
    pub(crate) store: Rc<dyn KvStore>,
    pub(crate) ledger: Rc<RefCell<dyn Ledger>>,
    pub(crate) commentary: Rc<dyn Commentary>,
    pub(crate) session: Session,
    pub(crate) profile: Profile,
    pub(crate) leaderboard: Leaderboard,
    pub(crate) high_score: u32,
}

impl Globals {
    /// Assemble globals from freshly-constructed capabilities, loading all
    /// persisted state.  Load failures degrade to defaults; their messages
    /// are returned for display in a warning popup.
    pub(crate) fn load(
        config: Config,
        store: Rc<dyn KvStore>,
        ledger: Rc<RefCell<dyn Ledger>>,
        commentary: Rc<dyn Commentary>,
    ) -> (Globals, Vec<String>) {
        let mut warnings = Vec::new();
        let session = Session::new(config.wallet.address.clone());
        let (profile, errors) = Profile::load(store.as_ref(), session.namespace());
        warnings.extend(errors.iter().map(|e| error_chain(e)));
        let leaderboard = Leaderboard::load(store.as_ref()).unwrap_or_else(|e| {
            warnings.push(error_chain(&e));
            Leaderboard::default()
        });
        let high_score = load_high_score(store.as_ref()).unwrap_or_else(|e| {
            warnings.push(error_chain(&e));
            0
        });
        let globals = Globals {
            config,
            store,
            ledger,
            commentary,
            session,
            profile,
            leaderboard,
            high_score,
        };
        (globals, warnings)
    }

    /// Re-read the profile for the current identity (after a wallet
    /// connect/disconnect switched the namespace)
    pub(crate) fn reload_profile(&mut self) -> Vec<String> {
        let (profile, errors) = Profile::load(self.store.as_ref(), self.session.namespace());
        self.profile = profile;
        errors.iter().map(|e| error_chain(e)).collect()
    }

    pub(crate) fn active_skin(&self) -> &'static Skin {
        self.profile.active.skin()
    }

    /// Globals backed entirely by in-memory fakes, for tests
    #[cfg(test)]
    pub(crate) fn test() -> Globals {
        use crate::chain::SimulatedLedger;
        use crate::commentary::Phrasebook;
        use crate::config::CommentaryConfig;
        use crate::store::MemoryStore;
        let (globals, warnings) = Globals::load(
            Config::default(),
            Rc::new(MemoryStore::new()),
            Rc::new(RefCell::new(SimulatedLedger::new())),
            Rc::new(Phrasebook::from_config(&CommentaryConfig::default())),
        );
        assert!(warnings.is_empty(), "test globals should load cleanly");
        globals
    }
}

/// Flatten an error and its chain of causes into a single message
pub(crate) fn error_chain(e: &dyn std::error::Error) -> String {
    let mut msg = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        msg.push_str(": ");
        msg.push_str(&cause.to_string());
        source = cause.source();
    }
    msg
}

/// Return the centered [`consts::DISPLAY_SIZE`]-sized rectangle that all
/// screens draw themselves inside of
pub(crate) fn get_display_area(buffer_area: Rect) -> Rect {
    center_rect(buffer_area, consts::DISPLAY_SIZE)
}

/// Return a rectangle of (at most) `size` centered within `area`
pub(crate) fn center_rect(area: Rect, size: Size) -> Rect {
    let [area] = Layout::horizontal([size.width])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::vertical([size.height])
        .flex(Flex::Center)
        .areas(area);
    area
}

/// Convenience methods for `enum_map::Enum` types used as menu selections
pub(crate) trait EnumExt: Enum + Copy {
    fn min() -> Self {
        Self::from_usize(0)
    }

    fn max() -> Self {
        Self::from_usize(Self::LENGTH - 1)
    }

    fn next(self) -> Option<Self> {
        let i = self.into_usize() + 1;
        (i < Self::LENGTH).then(|| Self::from_usize(i))
    }

    fn prev(self) -> Option<Self> {
        self.into_usize().checked_sub(1).map(Self::from_usize)
    }

    fn iter() -> impl Iterator<Item = Self> {
        (0..Self::LENGTH).map(Self::from_usize)
    }
}

impl<T: Enum + Copy> EnumExt for T {}

/// Current wall-clock time as seconds since the Unix epoch
pub(crate) fn now_unix() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// Render a Unix timestamp as a `YYYY-MM-DD` calendar date (UTC)
pub(crate) fn format_date(unix_secs: u64) -> String {
    // Days-to-civil conversion (Hinnant's algorithm, unsigned branch)
    let days = unix_secs / 86_400;
    let z = days + 719_468;
    let era = z / 146_097;
    let doe = z % 146_097;
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };
    let y = yoe + era * 400 + u64::from(m <= 2);
    format!("{y:04}-{m:02}-{d:02}")
}

/// Abbreviate a wallet address for display: first six characters, an
/// ellipsis, last four
pub(crate) fn short_address(addr: &str) -> String {
    if addr.chars().count() <= 12 {
        return addr.to_owned();
    }
    let head = addr.chars().take(6).collect::<String>();
    let tail_start = addr.chars().count() - 4;
    let tail = addr.chars().skip(tail_start).collect::<String>();
    format!("{head}…{tail}")
}

/// Abbreviate a transaction hash for display: `0x` plus the first eight hex
/// digits
pub(crate) fn short_hash(hash: &str) -> String {
    let digits = hash.strip_prefix("0x").unwrap_or(hash);
    let head = digits.chars().take(8).collect::<String>();
    format!("0x{head}…")
}
