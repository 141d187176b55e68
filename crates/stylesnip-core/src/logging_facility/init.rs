//! Subscriber setup

use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Output shape of the process-wide subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable lines on stderr, debug and up
    Development,
    /// One JSON object per event on stderr, info and up
    Production,
    /// No output; pair with `init_test_capture()` to assert on events
    Test,
}

impl Profile {
    /// Filter used when `RUST_LOG` is unset
    pub fn default_directive(self) -> &'static str {
        match self {
            Profile::Development => "stylesnip=debug",
            Profile::Production | Profile::Test => "stylesnip=info",
        }
    }

    fn env_filter(self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.default_directive()))
    }
}

static INIT_ONCE: Once = Once::new();

/// Install the global subscriber for `profile`
///
/// Only the first call in a process has an effect. If another subscriber
/// was installed already (for example the test capture layer), it is kept.
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| {
        let installed = match profile {
            Profile::Development => tracing_subscriber::fmt()
                .with_env_filter(profile.env_filter())
                .with_writer(std::io::stderr)
                .finish()
                .try_init(),
            Profile::Production => tracing_subscriber::fmt()
                .json()
                .with_env_filter(profile.env_filter())
                .with_writer(std::io::stderr)
                .finish()
                .try_init(),
            Profile::Test => tracing_subscriber::registry().try_init(),
        };
        if installed.is_err() {
            tracing::debug!(?profile, "global subscriber already set; keeping it");
        }
    });
}
