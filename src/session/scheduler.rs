//! Auto-logout at credential expiry
//!
//! At most one timer is pending at any time. Re-scheduling cancels the
//! previous timer before arming a new one, under a single lock acquisition.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use tokio::task::AbortHandle;

use super::claims::{decode_claims, expiry_of};
use super::store::TokenStore;
use crate::error::Result;
use crate::router::{LOGIN_ROUTE, Navigator};

/// Pending timer and the id it was armed with
struct Pending {
    id: u64,
    handle: AbortHandle,
}

struct Inner {
    store: Arc<dyn TokenStore>,
    navigator: Arc<dyn Navigator>,
    pending: Mutex<Option<Pending>>,
    next_id: AtomicU64,
}

impl Inner {
    fn pending(&self) -> MutexGuard<'_, Option<Pending>> {
        self.pending.lock().unwrap_or_else(|p| p.into_inner())
    }

    fn end_session(&self) -> Result<()> {
        let cleared = self.store.clear();
        self.navigator.navigate_to(&LOGIN_ROUTE);
        cleared
    }
}

/// What `schedule` decided
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheduled {
    /// No decodable credential or no expiry claim
    Nothing,
    /// Expiry already passed; the session was ended immediately
    LoggedOut,
    /// A timer is pending for the remaining lifetime
    Armed(std::time::Duration),
}

/// Single-slot expiry timer that ends the session when the credential lapses.
#[derive(Clone)]
pub struct AutoLogout {
    inner: Arc<Inner>,
}

impl AutoLogout {
    pub fn new(store: Arc<dyn TokenStore>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            inner: Arc::new(Inner {
                store,
                navigator,
                pending: Mutex::new(None),
                next_id: AtomicU64::new(0),
            }),
        }
    }

    /// Arm a timer for the stored credential's expiry.
    ///
    /// Any previously pending timer is cancelled first. Must be called from
    /// within a tokio runtime for a future expiry to be armed.
    pub fn schedule(&self) -> Scheduled {
        let mut slot = self.inner.pending();
        if let Some(previous) = slot.take() {
            previous.handle.abort();
        }

        let Some(credential) = self.inner.store.get() else {
            log::debug!("No credential stored; auto-logout not armed");
            return Scheduled::Nothing;
        };

        let claims = match decode_claims(&credential) {
            Ok(claims) => claims,
            Err(e) => {
                log::debug!("No auto-logout armed: {}", e);
                return Scheduled::Nothing;
            }
        };

        let Some(expiry) = expiry_of(&claims) else {
            log::debug!("Credential has no expiry; auto-logout not armed");
            return Scheduled::Nothing;
        };

        let remaining = match (expiry - Utc::now()).to_std() {
            Ok(remaining) if !remaining.is_zero() => remaining,
            _ => {
                drop(slot);
                log::info!("Credential expired at {}; logging out", expiry);
                if let Err(e) = self.inner.end_session() {
                    log::warn!("Failed to clear expired credential: {}", e);
                }
                return Scheduled::LoggedOut;
            }
        };

        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(runtime) => runtime,
            Err(_) => {
                log::warn!("No async runtime; auto-logout not armed");
                return Scheduled::Nothing;
            }
        };

        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed) + 1;

        let inner = Arc::clone(&self.inner);
        let task = runtime.spawn(async move {
            tokio::time::sleep(remaining).await;

            // A timer replaced while it slept must not end the newer session.
            let mut slot = inner.pending();
            if slot.as_ref().map(|p| p.id) != Some(id) {
                log::debug!("Superseded auto-logout timer woke; ignoring");
                return;
            }
            slot.take();

            if inner.store.get().as_deref() != Some(credential.as_str()) {
                log::debug!("Credential changed since the timer was armed; ignoring");
                return;
            }

            log::info!("Session expired; logging out");
            if let Err(e) = inner.end_session() {
                log::warn!("Failed to clear expired credential: {}", e);
            }
        });

        *slot = Some(Pending {
            id,
            handle: task.abort_handle(),
        });
        log::debug!("Auto-logout armed for {:?}", remaining);

        Scheduled::Armed(remaining)
    }

    /// Drop the pending timer without ending the session.
    pub fn cancel(&self) {
        if let Some(pending) = self.inner.pending().take() {
            pending.handle.abort();
            log::debug!("Auto-logout cancelled");
        }
    }

    /// Whether a timer is currently pending.
    #[cfg(test)]
    pub fn is_armed(&self) -> bool {
        self.inner.pending().is_some()
    }

    /// The single session exit point. Safe to call any number of times.
    pub fn logout(&self) -> Result<()> {
        self.cancel();
        self.inner.end_session()
    }
}
