//! PlainProtocol Transport Abstraction
//!
//! The transport is the external collaborator that actually puts a variable's
//! value on the wire. This crate never encodes frames for the line itself; it
//! hands the transport a name and a typed [`WireValue`] and lets the
//! implementation decide the byte format.
//!
//! # Design Pattern
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │   NamedVariable / Registry           │
//! │  (name + current value)              │
//! └──────────┬───────────────────────────┘
//!            │
//!            │ Transport::write(name, WireValue)
//!            │
//!            ▼
//! ┌─────────────────┬────────────────────┐
//! │  Serial driver  │   MockTransport    │
//! │ (firmware side) │   (host tests)     │
//! └─────────────────┴────────────────────┘
//! ```

pub mod mock;

pub use mock::MockTransport;

use crate::variables::WireValue;
use core::fmt;

/// Outbound side of the PlainProtocol link
///
/// One implementation is shared by every registered variable; see
/// [`Registry::set_transport`](crate::Registry::set_transport).
///
/// Writes are synchronous. An implementation may block on physical I/O
/// readiness, but must not call back into the registry.
pub trait Transport {
    /// Send one named value
    ///
    /// # Arguments
    ///
    /// * `name` - Variable identifier, already truncated to
    ///   [`MAX_NAME_LEN`](crate::MAX_NAME_LEN)
    /// * `value` - Borrowed, typed view of the variable's current value
    fn write(&mut self, name: &str, value: WireValue<'_>) -> Result<(), TransportError>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn write(&mut self, name: &str, value: WireValue<'_>) -> Result<(), TransportError> {
        (**self).write(name, value)
    }
}

/// Transport error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError {
    /// Generic I/O error (driver failure, buffer overflow)
    IoError,

    /// Operation timed out
    Timeout,

    /// Transport disconnected (cable unplugged, link down)
    Disconnected,
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::IoError => write!(f, "I/O error"),
            TransportError::Timeout => write!(f, "Operation timed out"),
            TransportError::Disconnected => write!(f, "Transport disconnected"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_error_display() {
        assert_eq!(format!("{}", TransportError::IoError), "I/O error");
        assert_eq!(format!("{}", TransportError::Timeout), "Operation timed out");
        assert_eq!(
            format!("{}", TransportError::Disconnected),
            "Transport disconnected"
        );
    }

    #[test]
    fn test_write_through_mut_reference() {
        fn send<T: Transport>(mut transport: T) -> Result<(), TransportError> {
            transport.write("RPM", WireValue::U16(900))
        }

        let mut mock = MockTransport::new();
        send(&mut mock).unwrap();
        assert_eq!(mock.write_count(), 1);
        assert_eq!(mock.last().unwrap().value.as_str(), "900");
    }
}
