//! Wallet identity.
//!
//! The address is only ever a namespacing key and a display label; nothing is
//! cryptographically verified.  "Connecting" uses the externally-supplied
//! address when one was configured (the stand-in for a browser-injected
//! provider) and otherwise fabricates a guest address.
use crate::util::short_address;
use rand::Rng;

/// Namespace used for profile keys when no wallet is connected
pub(crate) const GUEST_NAMESPACE: &str = "guest";

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Session {
    /// The currently-connected address, if any
    address: Option<String>,

    /// Address supplied via the config file or command line
    configured: Option<String>,
}

impl Session {
    pub(crate) fn new(configured: Option<String>) -> Session {
        Session {
            address: None,
            configured,
        }
    }

    pub(crate) fn connected(&self) -> bool {
        self.address.is_some()
    }

    pub(crate) fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    /// The key prefix under which this identity's profile is stored
    pub(crate) fn namespace(&self) -> &str {
        self.address.as_deref().unwrap_or(GUEST_NAMESPACE)
    }

    /// Short label for the menu header
    pub(crate) fn display(&self) -> Option<String> {
        self.address.as_deref().map(short_address)
    }

    /// Connect a wallet: the configured address when present, otherwise a
    /// freshly-fabricated guest address
    pub(crate) fn connect<R: Rng>(&mut self, mut rng: R) {
        let address = self.configured.clone().unwrap_or_else(|| {
            let mut addr = String::with_capacity(10);
            addr.push_str("0x");
            for _ in 0..8 {
                let digit: u32 = rng.random_range(0..16);
                addr.push(char::from_digit(digit, 16).expect("digit should be less than 16"));
            }
            addr
        });
        self.address = Some(address);
    }

    pub(crate) fn disconnect(&mut self) {
        self.address = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    #[test]
    fn guest_until_connected() {
        let session = Session::new(None);
        assert!(!session.connected());
        assert_eq!(session.namespace(), GUEST_NAMESPACE);
        assert_eq!(session.display(), None);
    }

    #[test]
    fn connect_uses_configured_address() {
        let mut session = Session::new(Some(String::from("0xdeadbeefcafe1234")));
        session.connect(ChaCha12Rng::seed_from_u64(RNG_SEED));
        assert_eq!(session.address(), Some("0xdeadbeefcafe1234"));
        assert_eq!(session.namespace(), "0xdeadbeefcafe1234");
    }

    #[test]
    fn connect_fabricates_guest_address() {
        let mut session = Session::new(None);
        session.connect(ChaCha12Rng::seed_from_u64(RNG_SEED));
        let addr = session.address().expect("address should be set").to_owned();
        assert!(addr.starts_with("0x"));
        assert_eq!(addr.len(), 10);
        assert!(addr[2..].chars().all(|c| c.is_ascii_hexdigit()));
        session.disconnect();
        assert_eq!(session.namespace(), GUEST_NAMESPACE);
    }
}
