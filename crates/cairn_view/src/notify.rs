use cairn_core::prelude::*;
use std::collections::HashSet;
use std::sync::Mutex;
use tracing::{error, info, warn};

pub const FETCH_PENDING: &str = "Fetching all data assets from Ipfs of your address...";
pub const FETCH_SUCCEEDED: &str = "Fetched all data assets from Ipfs of your address!";
pub const FETCH_FAILED: &str = "The data assets could not be fetched.";

pub const AUTH_EXPIRED_ADVISORY: &str = "Native auth token expired. Re-login and try again!";

/// Every failed manifest shares this key, so the advisory shows once per mount.
pub const MANIFEST_ADVISORY_KEY: &str = "fetch-manifest-file1";
pub const MANIFEST_ADVISORY: &str = "Wait some more time for the manifest file to get pinned if you can't find the one you are looking for";

/// The advisory shown when the asset listing fails.
pub fn index_advisory(err: &IndexError) -> String {
    match err {
        IndexError::AuthExpired => AUTH_EXPIRED_ADVISORY.to_string(),
        IndexError::ServiceUnavailable { message } if message.is_empty() => {
            "Sorry, there's a problem with the service, try again later.".to_string()
        }
        IndexError::ServiceUnavailable { message } => {
            format!("Sorry, there's a problem with the service, try again later. {message}")
        }
    }
}

pub fn manifest_advisory() -> Notice {
    Notice::Advisory {
        key: Some(MANIFEST_ADVISORY_KEY.to_string()),
        message: MANIFEST_ADVISORY.to_string(),
    }
}

/// Routes notices into `tracing` when no toast surface is attached.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        match notice {
            Notice::Pending(message) | Notice::Succeeded(message) => info!("{message}"),
            Notice::Failed(message) => error!("{message}"),
            Notice::Advisory { message, .. } => warn!("{message}"),
        }
    }
}

/// Collects notices in memory, e.g. for a UI drained once per frame.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .map(|n| n.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    pub fn advisories(&self) -> Vec<Notice> {
        self.notices()
            .into_iter()
            .filter(|n| matches!(n, Notice::Advisory { .. }))
            .collect()
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, notice: Notice) {
        match self.notices.lock() {
            Ok(mut notices) => notices.push(notice),
            Err(poisoned) => poisoned.into_inner().push(notice),
        }
    }
}

/// Drops keyed advisories whose key was already shown.
pub struct Deduplicated<N> {
    inner: N,
    shown: Mutex<HashSet<String>>,
}

impl<N: Notifier> Deduplicated<N> {
    pub fn new(inner: N) -> Self {
        Self {
            inner,
            shown: Mutex::new(HashSet::new()),
        }
    }

    pub fn inner(&self) -> &N {
        &self.inner
    }

    /// Forgets the shown keys.
    pub fn reset(&self) {
        match self.shown.lock() {
            Ok(mut shown) => shown.clear(),
            Err(poisoned) => poisoned.into_inner().clear(),
        }
    }

    fn first_time(&self, key: &str) -> bool {
        match self.shown.lock() {
            Ok(mut shown) => shown.insert(key.to_string()),
            Err(poisoned) => poisoned.into_inner().insert(key.to_string()),
        }
    }
}

impl<N: Notifier> Notifier for Deduplicated<N> {
    fn notify(&self, notice: Notice) {
        if let Notice::Advisory { key: Some(key), .. } = &notice {
            if !self.first_time(key) {
                return;
            }
        }
        self.inner.notify(notice);
    }
}
