//! Mock transport implementation for testing
//!
//! Records every write as text so tests can verify what the registry pushed
//! without a serial port. Always compiled, like the other mocks in this
//! crate, so integration tests and firmware host builds can use it.

use super::{Transport, TransportError};
use crate::variables::{WireValue, MAX_NAME_LEN};
use core::fmt::Write;
use heapless::{String, Vec};

/// Maximum number of writes retained by [`MockTransport`]
pub const MOCK_WRITE_CAPACITY: usize = 64;

/// Maximum rendered value length retained per write
pub const MOCK_VALUE_LEN: usize = 32;

/// One recorded [`Transport::write`] call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedWrite {
    /// Variable name as passed to the transport
    pub name: String<MAX_NAME_LEN>,
    /// Value rendered with its canonical text form
    pub value: String<MOCK_VALUE_LEN>,
}

/// Mock transport for testing
///
/// Can be configured to fail every write with a given error.
///
/// # Example
///
/// ```
/// use plain_protocol_vars::{MockTransport, Transport, WireValue};
///
/// let mut transport = MockTransport::new();
/// transport.write("TEMP", WireValue::F32(21.5)).unwrap();
///
/// let last = transport.last().unwrap();
/// assert_eq!(last.name.as_str(), "TEMP");
/// assert_eq!(last.value.as_str(), "21.50");
/// ```
#[derive(Debug, Default)]
pub struct MockTransport {
    writes: Vec<RecordedWrite, MOCK_WRITE_CAPACITY>,
    write_error: Option<TransportError>,
}

impl MockTransport {
    /// Create a mock transport that accepts every write
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock transport that rejects every write with `error`
    pub fn failing(error: TransportError) -> Self {
        Self {
            writes: Vec::new(),
            write_error: Some(error),
        }
    }

    /// All recorded writes, oldest first
    pub fn writes(&self) -> &[RecordedWrite] {
        &self.writes
    }

    /// Most recent write
    pub fn last(&self) -> Option<&RecordedWrite> {
        self.writes.last()
    }

    /// Number of recorded writes
    pub fn write_count(&self) -> usize {
        self.writes.len()
    }

    /// Forget recorded writes
    pub fn clear(&mut self) {
        self.writes.clear();
    }
}

impl Transport for MockTransport {
    fn write(&mut self, name: &str, value: WireValue<'_>) -> Result<(), TransportError> {
        if let Some(err) = self.write_error {
            return Err(err);
        }

        let mut recorded_name = String::new();
        recorded_name
            .push_str(name)
            .map_err(|_| TransportError::IoError)?;

        let mut recorded_value = String::new();
        write!(recorded_value, "{}", value).map_err(|_| TransportError::IoError)?;

        self.writes
            .push(RecordedWrite {
                name: recorded_name,
                value: recorded_value,
            })
            .map_err(|_| TransportError::IoError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_records_writes_in_order() {
        let mut transport = MockTransport::new();
        transport.write("A", WireValue::I32(-4)).unwrap();
        transport.write("B", WireValue::Char('x')).unwrap();

        let writes = transport.writes();
        assert_eq!(writes.len(), 2);
        assert_eq!(writes[0].name.as_str(), "A");
        assert_eq!(writes[0].value.as_str(), "-4");
        assert_eq!(writes[1].name.as_str(), "B");
        assert_eq!(writes[1].value.as_str(), "x");
    }

    #[test]
    fn test_mock_failing() {
        let mut transport = MockTransport::failing(TransportError::Disconnected);
        assert_eq!(
            transport.write("A", WireValue::U8(1)),
            Err(TransportError::Disconnected)
        );
        assert_eq!(transport.write_count(), 0);
    }

    #[test]
    fn test_mock_full_buffer_reports_io_error() {
        let mut transport = MockTransport::new();
        for _ in 0..MOCK_WRITE_CAPACITY {
            transport.write("N", WireValue::U8(0)).unwrap();
        }
        assert_eq!(
            transport.write("N", WireValue::U8(0)),
            Err(TransportError::IoError)
        );

        transport.clear();
        assert_eq!(transport.write_count(), 0);
    }
}
