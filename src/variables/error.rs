//! Variable and registry error types

use crate::transport::TransportError;
use core::fmt;

/// Errors from rendering frame text into a fixed-capacity buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Rendered text does not fit the output buffer
    Overflow,
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::Overflow => write!(f, "frame buffer overflow"),
        }
    }
}

impl From<fmt::Error> for FrameError {
    fn from(_: fmt::Error) -> Self {
        FrameError::Overflow
    }
}

/// Errors reported by a variable's lifecycle hooks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum VariableError {
    /// Setup of the backing source failed
    InitializationFailed {
        /// Human-readable reason for failure
        reason: &'static str,
    },
    /// Polling the backing source failed
    UpdateFailed {
        /// Human-readable reason for failure
        reason: &'static str,
    },
}

impl fmt::Display for VariableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariableError::InitializationFailed { reason } => {
                write!(f, "variable initialization failed: {}", reason)
            }
            VariableError::UpdateFailed { reason } => {
                write!(f, "variable update failed: {}", reason)
            }
        }
    }
}

/// Registry errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegistryError {
    /// Registry is at capacity; the variable was not registered
    Full,
    /// No variable at the requested index or with the requested name
    NotFound,
    /// This `declare_variable!` site already placed its variable
    AlreadyDeclared,
    /// A write was requested before `set_transport`
    TransportUnset,
    /// The shared transport is already borrowed (re-entrant write)
    TransportBusy,
    /// The transport rejected the write
    Transport(TransportError),
    /// Frame text did not fit the output buffer
    Frame(FrameError),
    /// A variable's lifecycle hook failed
    Variable {
        /// Registration index of the failing variable
        index: usize,
        /// Error reported by the variable
        error: VariableError,
    },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::Full => write!(f, "variable registry full"),
            RegistryError::NotFound => write!(f, "variable not found"),
            RegistryError::AlreadyDeclared => write!(f, "variable already declared"),
            RegistryError::TransportUnset => write!(f, "transport not set"),
            RegistryError::TransportBusy => write!(f, "transport busy"),
            RegistryError::Transport(err) => write!(f, "transport error: {}", err),
            RegistryError::Frame(err) => write!(f, "{}", err),
            RegistryError::Variable { index, error } => {
                write!(f, "variable #{}: {}", index, error)
            }
        }
    }
}

impl From<TransportError> for RegistryError {
    fn from(err: TransportError) -> Self {
        RegistryError::Transport(err)
    }
}

impl From<FrameError> for RegistryError {
    fn from(err: FrameError) -> Self {
        RegistryError::Frame(err)
    }
}
