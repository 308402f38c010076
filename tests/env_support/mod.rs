//! Serialized access to the `SPOTIFY_*` variables read by `CredentialsConfig::from_env`.

use std::sync::{Mutex, MutexGuard};

const KEYS: [&str; 3] = [
    "SPOTIFY_CLIENT_ID",
    "SPOTIFY_CLIENT_SECRET",
    "SPOTIFY_TOKEN_URL",
];

static LOCK: Mutex<()> = Mutex::new(());

/// Holds the env lock with every `SPOTIFY_*` key cleared; restores the old
/// values on drop.
pub struct SpotifyEnv {
    saved: [Option<String>; 3],
    _lock: MutexGuard<'static, ()>,
}

impl SpotifyEnv {
    pub fn cleared() -> Self {
        let lock = LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let saved = KEYS.map(|key| std::env::var(key).ok());
        for key in KEYS {
            std::env::remove_var(key);
        }
        Self { saved, _lock: lock }
    }

    pub fn set(&self, key: &str, value: &str) -> &Self {
        assert!(KEYS.contains(&key), "{key} is not restored on drop");
        std::env::set_var(key, value);
        self
    }
}

impl Drop for SpotifyEnv {
    fn drop(&mut self) {
        for (key, value) in KEYS.iter().zip(&self.saved) {
            match value {
                Some(value) => std::env::set_var(key, value),
                None => std::env::remove_var(key),
            }
        }
    }
}
