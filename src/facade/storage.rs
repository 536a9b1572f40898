//! Storage façade (C6): an append-only recovery log plus a database holding
//! terms-of-service acceptance records, both supplied by the host.

use time::OffsetDateTime;
use tracing::info;

use crate::error::{Error, ErrorKind};
use crate::facade::WC_EPOCH;

/// A host-provided recovery log backend.
///
/// The trait carries no operations of its own — the recovery log is write-only from
/// this crate's perspective and append semantics are entirely the host's concern — but
/// a concrete implementation's `Drop` impl is where "closing" the log happens, mirroring
/// the optional `log_close` callback in the source contract (see [`StorageFacade`]).
pub trait LogBackend: Send {}

/// A host-provided database backend holding terms-of-service acceptance records.
///
/// All seconds-past-epoch values exchanged with this trait are in the *internal*
/// (webcash-epoch-relative) form; translation to/from absolute time happens only at the
/// [`StorageFacade`] boundary.
pub trait DbBackend: Send {
    /// Does any accepted-terms row exist at all?
    fn any_terms(&self) -> Result<bool, Error>;

    /// All accepted-terms rows, as (text, seconds past the webcash epoch) pairs.
    fn all_terms(&self) -> Result<Vec<(Vec<u8>, u64)>, Error>;

    /// The acceptance time (seconds past the webcash epoch) for `text`, or 0 if `text`
    /// has never been accepted.
    fn terms_accepted(&self, text: &[u8]) -> Result<u64, Error>;

    /// Records that `text` was accepted at `now` (seconds past the webcash epoch).
    fn accept_terms(&mut self, text: &[u8], now: u64) -> Result<(), Error>;
}

/// Opens a host's recovery-log backend for a given URL. Analogous to the source
/// contract's `log_open(url) → log_handle` callback, required.
pub trait LogOpener {
    fn open(&self, url: &str) -> Result<Box<dyn LogBackend>, Error>;
}

/// Opens a host's database backend for a given URL. Analogous to the source contract's
/// `db_open(url) → db_handle` callback, required.
pub trait DbOpener {
    fn open(&self, url: &str) -> Result<Box<dyn DbBackend>, Error>;
}

/// A single accepted-terms record, converted to an absolute broken-down UTC time for
/// the caller.
#[derive(Debug, Clone)]
pub struct TermsRecord {
    pub text: Vec<u8>,
    pub when: OffsetDateTime,
}

/// The storage façade: an owned recovery log and an owned database, both torn down
/// (via `Drop`) when this façade is dropped.
pub struct StorageFacade {
    log: Box<dyn LogBackend>,
    db: Box<dyn DbBackend>,
}

impl std::fmt::Debug for StorageFacade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageFacade").finish_non_exhaustive()
    }
}

impl StorageFacade {
    /// Opens the log, then the database. If the log opens but the database does not,
    /// the log is closed (dropped) before returning `db-open-failed`, matching the
    /// source contract's "close log on partial failure" sequencing.
    pub fn open(
        log_opener: &dyn LogOpener,
        db_opener: &dyn DbOpener,
        log_url: &str,
        db_url: &str,
    ) -> Result<Self, Error> {
        let log = log_opener
            .open(log_url)
            .map_err(|e| Error::with_source(ErrorKind::LogOpenFailed, e))?;
        let db = match db_opener.open(db_url) {
            Ok(db) => db,
            Err(e) => {
                info!("closing recovery log after database open failed");
                drop(log);
                return Err(Error::with_source(ErrorKind::DbOpenFailed, e));
            }
        };
        info!("storage façade opened");
        Ok(StorageFacade { log, db })
    }

    /// Builds a façade directly from already-opened backends. Useful for hosts (and
    /// tests) that manage opening themselves rather than going through [`Self::open`].
    pub fn from_backends(log: Box<dyn LogBackend>, db: Box<dyn DbBackend>) -> Self {
        StorageFacade { log, db }
    }

    /// Enumerates every accepted-terms row, translating each stored time to an absolute
    /// broken-down UTC time. A row whose stored time cannot be represented (arithmetic
    /// overflow against the webcash epoch, or an out-of-range Unix timestamp) fails the
    /// whole call with [`ErrorKind::DbCorrupt`] rather than returning a partial list.
    pub fn enumerate_terms(&self) -> Result<Vec<TermsRecord>, Error> {
        self.db
            .all_terms()?
            .into_iter()
            .map(|(text, raw)| {
                let when = absolute_time_from_raw(raw)?;
                Ok(TermsRecord { text, when })
            })
            .collect()
    }

    /// Whether any terms-of-service text has ever been accepted.
    pub fn have_accepted_terms(&self) -> Result<bool, Error> {
        self.db.any_terms()
    }

    /// Whether `text` has been accepted, and if so, when.
    pub fn are_terms_accepted(
        &self,
        text: &[u8],
    ) -> Result<(bool, Option<OffsetDateTime>), Error> {
        let raw = self.db.terms_accepted(text)?;
        if raw == 0 {
            return Ok((false, None));
        }
        Ok((true, Some(absolute_time_from_raw(raw)?)))
    }

    /// Records acceptance of `text`. `now` resolves to the current system time when
    /// `None`. Fails with [`ErrorKind::InvalidArgument`] if `now` is earlier than the
    /// webcash epoch.
    pub fn accept_terms(&mut self, text: &[u8], now: Option<OffsetDateTime>) -> Result<(), Error> {
        let now = now.unwrap_or_else(OffsetDateTime::now_utc);
        let raw = raw_from_absolute_time(now)?;
        self.db.accept_terms(text, raw)
    }
}

/// Converts a raw (webcash-epoch-relative) seconds count to an absolute broken-down UTC
/// time, failing with [`ErrorKind::DbCorrupt`] on overflow or an unrepresentable result —
/// this is used only for values already stored in the database, so a failure here means
/// the stored data itself is inconsistent.
fn absolute_time_from_raw(raw: u64) -> Result<OffsetDateTime, Error> {
    let raw: i64 = raw.try_into().map_err(|_| Error::from(ErrorKind::DbCorrupt))?;
    let unix = WC_EPOCH
        .checked_add(raw)
        .ok_or_else(|| Error::from(ErrorKind::DbCorrupt))?;
    OffsetDateTime::from_unix_timestamp(unix).map_err(|_| Error::from(ErrorKind::DbCorrupt))
}

/// Converts an absolute time to the raw (webcash-epoch-relative) seconds count stored
/// in the database, failing with [`ErrorKind::InvalidArgument`] if `when` precedes the
/// webcash epoch.
fn raw_from_absolute_time(when: OffsetDateTime) -> Result<u64, Error> {
    let unix = when.unix_timestamp();
    let raw = unix
        .checked_sub(WC_EPOCH)
        .ok_or_else(|| Error::from(ErrorKind::InvalidArgument))?;
    u64::try_from(raw).map_err(|_| Error::from(ErrorKind::InvalidArgument))
}
