mod server;

use std::env;

use tempfile::TempDir;

/// Restores the previous value of an env var when dropped.
pub(crate) struct EnvGuard {
    key: &'static str,
    saved: Option<String>,
}

impl EnvGuard {
    pub(crate) fn set(key: &'static str, value: &str) -> Self {
        let guard = Self::capture(key);
        unsafe { env::set_var(key, value) };
        guard
    }

    #[allow(dead_code)]
    pub(crate) fn remove(key: &'static str) -> Self {
        let guard = Self::capture(key);
        unsafe { env::remove_var(key) };
        guard
    }

    fn capture(key: &'static str) -> Self {
        Self {
            key,
            saved: env::var(key).ok(),
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        unsafe {
            match self.saved.take() {
                Some(value) => env::set_var(self.key, value),
                None => env::remove_var(self.key),
            }
        }
    }
}

/// Point RELAY_CONFIG_DIR at a fresh temp dir for the duration of a test.
pub(crate) fn setup_config_dir() -> (TempDir, EnvGuard) {
    let temp = TempDir::new().unwrap();
    let guard = EnvGuard::set("RELAY_CONFIG_DIR", temp.path().to_str().unwrap());
    (temp, guard)
}
