//! UI façade (C8): a host-provided prompt surface, state-machined the same way as
//! [`crate::facade::ServerFacade`] — the trait-object-component idiom from
//! `zallet/src/components.rs` applied to a new callback surface the teacher has no
//! direct equivalent for (zallet itself is headless).

use tracing::info;

use crate::error::{Error, ErrorKind};

/// A running UI session, returned by [`UiBackend::startup`].
pub trait UiSession: Send {
    /// Presents `text` to the user and returns whether they accepted it.
    ///
    /// Rejection is not an error: a `false` result is success from this trait's point
    /// of view. Only a failure to present the prompt at all is an `Err`.
    fn show_terms(&mut self, text: &[u8]) -> Result<bool, Error>;
}

/// A host-provided UI connector.
pub trait UiBackend: Send {
    /// Starts the UI. Required.
    fn startup(&self) -> Result<Box<dyn UiSession>, Error>;
}

enum State {
    Unstarted,
    Running(Box<dyn UiSession>),
    Shutdown,
}

/// The UI façade: `UNSTARTED → RUNNING → SHUTDOWN` (terminal).
pub struct UiFacade {
    backend: Box<dyn UiBackend>,
    state: State,
}

impl UiFacade {
    /// Wraps a host-provided backend, starting in the `UNSTARTED` state.
    pub fn new(backend: Box<dyn UiBackend>) -> Self {
        UiFacade {
            backend,
            state: State::Unstarted,
        }
    }

    /// Starts the UI, transitioning `UNSTARTED → RUNNING`. Calling this from any other
    /// state is [`ErrorKind::InvalidArgument`].
    pub fn startup(&mut self) -> Result<(), Error> {
        match self.state {
            State::Unstarted => {
                let session = self
                    .backend
                    .startup()
                    .map_err(|e| Error::with_source(ErrorKind::StartupFailed, e))?;
                self.state = State::Running(session);
                info!("user interface started");
                Ok(())
            }
            State::Running(_) | State::Shutdown => Err(ErrorKind::InvalidArgument.into()),
        }
    }

    /// Shuts the UI down, transitioning `RUNNING → SHUTDOWN`. A no-op if the UI was
    /// never started or is already shut down.
    pub fn shutdown(&mut self) {
        if matches!(self.state, State::Running(_)) {
            if let State::Running(session) = std::mem::replace(&mut self.state, State::Shutdown) {
                drop(session);
                info!("user interface shut down");
            }
        }
    }

    /// Displays `text` and returns whether the user accepted it. Requires `RUNNING`;
    /// any other state is [`ErrorKind::Headless`].
    pub fn show_terms(&mut self, text: &[u8]) -> Result<bool, Error> {
        match &mut self.state {
            State::Running(session) => session.show_terms(text),
            State::Unstarted | State::Shutdown => Err(ErrorKind::Headless.into()),
        }
    }

    /// True iff the façade is currently running.
    pub fn is_running(&self) -> bool {
        matches!(self.state, State::Running(_))
    }
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;

    #[test]
    fn show_terms_requires_running_state() {
        let mut facade = UiFacade::new(Box::new(MockUi {
            accept: true,
            fail_startup: false,
        }));
        assert_eq!(
            facade.show_terms(b"foo").unwrap_err().kind(),
            ErrorKind::Headless
        );
    }

    #[test]
    fn startup_then_show_terms_returns_user_choice() {
        let mut facade = UiFacade::new(Box::new(MockUi {
            accept: true,
            fail_startup: false,
        }));
        facade.startup().unwrap();
        assert!(facade.show_terms(b"foo").unwrap());

        let mut rejecting = UiFacade::new(Box::new(MockUi {
            accept: false,
            fail_startup: false,
        }));
        rejecting.startup().unwrap();
        assert!(!rejecting.show_terms(b"foo").unwrap());
    }

    #[test]
    fn shutdown_before_startup_is_a_no_op() {
        let mut facade = UiFacade::new(Box::new(MockUi {
            accept: true,
            fail_startup: false,
        }));
        facade.shutdown();
        assert!(!facade.is_running());
        // The façade must still be in UNSTARTED, not the terminal SHUTDOWN state.
        facade.startup().unwrap();
        assert!(facade.is_running());
    }

    #[test]
    fn shutdown_then_show_terms_fails() {
        let mut facade = UiFacade::new(Box::new(MockUi {
            accept: true,
            fail_startup: false,
        }));
        facade.startup().unwrap();
        facade.shutdown();
        assert!(!facade.is_running());
        assert_eq!(
            facade.show_terms(b"foo").unwrap_err().kind(),
            ErrorKind::Headless
        );
    }

    #[test]
    fn failed_startup_surfaces_startup_failed() {
        let mut facade = UiFacade::new(Box::new(MockUi {
            accept: true,
            fail_startup: true,
        }));
        assert_eq!(
            facade.startup().unwrap_err().kind(),
            ErrorKind::StartupFailed
        );
    }
}
