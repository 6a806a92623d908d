use super::{KeyInjector, MediaKey};

/// Stub injector for platforms without virtual media keys.
/// Clicks are logged so the UI path can still be exercised.
#[derive(Clone)]
pub struct DummyKeyInjector;

impl DummyKeyInjector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DummyKeyInjector {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyInjector for DummyKeyInjector {
    fn press(&self, key: MediaKey) {
        tracing::info!("[Keys/Dummy] Ignoring {} (no injection backend)", key.label());
    }
}
