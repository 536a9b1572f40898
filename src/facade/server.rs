//! Server façade (C7): an outbound connection to the webcash server, exposed as a
//! three-state machine mirroring `zallet`'s JSON-RPC connection lifecycle
//! (`zallet/src/components/json_rpc/server.rs`), direction inverted — here the wallet
//! is the client connecting out, not a server accepting connections in.

use tracing::info;

use crate::error::{Error, ErrorKind};

/// A live connection to the server, returned by [`ServerBackend::connect`].
pub trait ServerConnection: Send {
    /// The current terms-of-service text.
    fn get_terms(&self) -> Result<Vec<u8>, Error>;
}

/// A host-provided server connector.
pub trait ServerBackend: Send {
    /// Establishes a connection. Required.
    fn connect(&self) -> Result<Box<dyn ServerConnection>, Error>;
}

enum State {
    Unconnected,
    Connected(Box<dyn ServerConnection>),
    Disconnected,
}

/// The server façade: `UNCONNECTED → CONNECTED → DISCONNECTED` (terminal). Once
/// disconnected, a façade cannot be reconnected — build a new one instead.
pub struct ServerFacade {
    backend: Box<dyn ServerBackend>,
    state: State,
}

impl ServerFacade {
    /// Wraps a host-provided backend, starting in the `UNCONNECTED` state.
    pub fn new(backend: Box<dyn ServerBackend>) -> Self {
        ServerFacade {
            backend,
            state: State::Unconnected,
        }
    }

    /// Connects, transitioning `UNCONNECTED → CONNECTED`. Calling this from any other
    /// state is [`ErrorKind::InvalidArgument`] (façade misuse).
    pub fn connect(&mut self) -> Result<(), Error> {
        match self.state {
            State::Unconnected => {
                let conn = self.backend.connect().map_err(|e| {
                    Error::with_source(ErrorKind::ConnectFailed, e)
                })?;
                self.state = State::Connected(conn);
                info!("connected to server");
                Ok(())
            }
            State::Connected(_) | State::Disconnected => Err(ErrorKind::InvalidArgument.into()),
        }
    }

    /// Disconnects, transitioning `CONNECTED → DISCONNECTED`. A no-op if already
    /// disconnected or never connected — disconnect is optional in the source contract.
    pub fn disconnect(&mut self) {
        if matches!(self.state, State::Connected(_)) {
            if let State::Connected(conn) = std::mem::replace(&mut self.state, State::Disconnected)
            {
                drop(conn);
                info!("disconnected from server");
            }
        }
    }

    /// Fetches the current terms-of-service text. Requires `CONNECTED`; any other state
    /// is [`ErrorKind::NotConnected`].
    pub fn get_terms(&self) -> Result<Vec<u8>, Error> {
        match &self.state {
            State::Connected(conn) => conn.get_terms(),
            State::Unconnected | State::Disconnected => Err(ErrorKind::NotConnected.into()),
        }
    }

    /// True iff the façade is currently connected.
    pub fn is_connected(&self) -> bool {
        matches!(self.state, State::Connected(_))
    }
}
