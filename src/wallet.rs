//! Wallet context (C9): composes exactly one storage, server, and UI façade, and drives
//! the terms-of-service acceptance protocol across them.
//!
//! Grounded on `zallet/src/application.rs`'s role as the top-level object that owns and
//! sequences the application's components, and on the acquire-check-prompt-persist
//! sequencing described in `zallet/src/components/keystore.rs`'s module documentation
//! for other security-sensitive, user-facing decisions.

use time::OffsetDateTime;
use tracing::{debug, info};

use crate::error::Error;
use crate::facade::{ServerFacade, StorageFacade, UiFacade};

/// Composes one storage, one server, and one UI façade, taking ownership of all three
/// at construction.
pub struct WalletContext {
    storage: StorageFacade,
    server: ServerFacade,
    ui: UiFacade,
    cached_text: Option<Vec<u8>>,
    cached_accepted: bool,
    cached_when: Option<OffsetDateTime>,
}

impl WalletContext {
    /// Takes ownership of the three façades, with no cached terms-of-service state.
    pub fn new(storage: StorageFacade, server: ServerFacade, ui: UiFacade) -> Self {
        WalletContext {
            storage,
            server,
            ui,
            cached_text: None,
            cached_accepted: false,
            cached_when: None,
        }
    }

    /// Runs the terms-of-service acceptance protocol:
    ///
    /// 1. If no terms text is cached, fetch it from the server and clear the
    ///    acceptance cache (a fresh fetch always re-checks acceptance).
    /// 2. If acceptance is not cached, ask storage whether this exact text has been
    ///    accepted before, and cache the answer.
    /// 3. If still not accepted, prompt via the UI. On acceptance, stamp the current
    ///    time and best-effort persist it — a persistence failure here is swallowed,
    ///    not propagated, since the only consequence is a re-prompt next time.
    /// 4. Return the text, whether it is accepted, and (only meaningful when accepted)
    ///    when.
    ///
    /// Rejection is idempotent and not sticky: a caller that calls `ensure_terms` again
    /// after a rejection will be re-prompted, not permanently blocked.
    pub fn ensure_terms(&mut self) -> Result<(Vec<u8>, bool, Option<OffsetDateTime>), Error> {
        if self.cached_text.is_none() {
            debug!("fetching terms of service from server");
            let text = self.server.get_terms()?;
            self.cached_text = Some(text);
            self.cached_accepted = false;
            self.cached_when = None;
        }
        let text = self
            .cached_text
            .clone()
            .expect("just populated above if absent");

        if !self.cached_accepted {
            let (accepted, when) = self.storage.are_terms_accepted(&text)?;
            self.cached_accepted = accepted;
            self.cached_when = when;
        }

        if !self.cached_accepted {
            debug!("prompting user to accept terms of service");
            let accepted = self.ui.show_terms(&text)?;
            if accepted {
                let now = OffsetDateTime::now_utc();
                self.cached_accepted = true;
                self.cached_when = Some(now);
                if let Err(error) = self.storage.accept_terms(&text, Some(now)) {
                    info!(%error, "failed to persist terms-of-service acceptance; will re-prompt next time");
                }
            }
        }

        Ok((text, self.cached_accepted, self.cached_when))
    }

    /// Whether any terms-of-service text has ever been accepted, per storage.
    pub fn have_accepted_terms(&self) -> Result<bool, Error> {
        self.storage.have_accepted_terms()
    }

    /// Tears down the UI, server, and storage façades in that order — the reverse of
    /// construction order — and always attempts all three regardless of how this
    /// wallet's façade backends implement teardown.
    ///
    /// Infallible: teardown is modeled as ordinary `Drop` on the host's backend types,
    /// not a fallible callback, so there is nothing for this method to report.
    pub fn release(self) {
        let WalletContext {
            ui, server, storage, ..
        } = self;
        drop(ui);
        drop(server);
        drop(storage);
    }
}
