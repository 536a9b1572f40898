//! The host-provided façade contracts: storage (C6), server (C7), and UI (C8).
//!
//! Each façade is a trait a host application implements and an owning wrapper this
//! crate provides around it, modeled on the teacher's component pattern
//! (`zallet/src/components.rs` and its `database`/`keystore` submodules): a pluggable
//! backend behind a trait object, composed once by the top-level context and torn down
//! by an ordinary `Drop` when the wrapper goes out of scope.

pub(crate) mod server;
pub(crate) mod storage;
pub(crate) mod ui;

pub use server::{ServerBackend, ServerConnection, ServerFacade};
pub use storage::{DbBackend, DbOpener, LogBackend, LogOpener, StorageFacade, TermsRecord};
pub use ui::{UiBackend, UiFacade, UiSession};

/// Seconds between the Unix epoch and the webcash epoch, `2022-01-01T00:00:00Z`.
pub const WC_EPOCH: i64 = 1_641_067_200;
