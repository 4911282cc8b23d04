//! Error taxonomy for the PixelPup core.
//!
//! Recoverable conditions (a full timer pool, a busy fetch client) are
//! reported as typed errors so callers can decide whether to retry,
//! drop, or log.  Fatal conditions do not exist in the animation core:
//! the pet keeps moving no matter what the outside world does.

use core::fmt;

/// Crate-wide result alias.
pub type Result<T> = core::result::Result<T, Error>;

/// Top-level error for the PixelPup core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Deferred-call registry errors.
    Timer(TimerError),
    /// Fetch client / network worker errors.
    Net(NetError),
    /// Invalid configuration value.
    Config(&'static str),
}

/// Errors raised by the deferred-call registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerError {
    /// All slots are occupied; the deferred call was dropped.
    PoolExhausted,
}

/// Errors raised by the fetch client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetError {
    /// A request is already in flight; at most one is allowed.
    Busy,
    /// The request channel to the worker was full.
    ChannelFull,
    /// The transport failed or returned a non-success status.
    TransportFailed,
    /// The response body was not a JSON object.
    MalformedResponse,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timer(e) => write!(f, "timer: {e}"),
            Self::Net(e) => write!(f, "net: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl fmt::Display for TimerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PoolExhausted => write!(f, "pool exhausted"),
        }
    }
}

impl fmt::Display for NetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Busy => write!(f, "request already in flight"),
            Self::ChannelFull => write!(f, "request channel full"),
            Self::TransportFailed => write!(f, "transport failed"),
            Self::MalformedResponse => write!(f, "malformed response"),
        }
    }
}

impl core::error::Error for Error {}

impl From<TimerError> for Error {
    fn from(e: TimerError) -> Self {
        Self::Timer(e)
    }
}

impl From<NetError> for Error {
    fn from(e: NetError) -> Self {
        Self::Net(e)
    }
}
