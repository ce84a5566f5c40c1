//! Named variables
//!
//! A [`NamedVariable`] pairs an immutable, bounded name with an enable flag and
//! a [`Slot`]. The registry only sees variables through the object-safe
//! [`PlainVariable`] interface, which is what lets one registry hold counters,
//! floats, flags and text side by side.
//!
//! Variables are deliberately neither `Clone` nor `Copy`: the registry stores
//! references to them, and the borrow it holds keeps them in place.

use super::error::{FrameError, VariableError};
use super::slot::{Slot, StorageMode};
use super::value::FrameValue;
use super::{MAX_FRAME_LEN, MAX_NAME_LEN};
use crate::transport::{Transport, TransportError};
use core::cell::Cell;
use core::fmt;
use heapless::String;

/// Uniform interface the registry uses for every variable
///
/// Implemented by [`NamedVariable`]. Firmware can implement it for its own
/// types (typically wrapping a `NamedVariable`) to hook hardware setup and
/// polling into [`initialize`](Self::initialize) and [`update`](Self::update).
pub trait PlainVariable {
    /// Identifier sent in every frame
    fn name(&self) -> &str;

    /// Whether batch frame generation includes this variable
    fn is_enabled(&self) -> bool;

    /// Include or exclude this variable from batch frame generation
    fn set_enabled(&self, enabled: bool);

    /// Append this variable's frame fragment (`name` + value + `;`) to `out`
    fn write_frame(&self, out: &mut dyn fmt::Write) -> fmt::Result;

    /// Send the current value through `transport`
    ///
    /// Ignores the enable flag; callers decide whether a disabled variable
    /// should still be written.
    fn write(&self, transport: &mut dyn Transport) -> Result<(), TransportError>;

    /// One-time setup of whatever backs this variable
    fn initialize(&self) -> Result<(), VariableError> {
        Ok(())
    }

    /// Periodic refresh from whatever backs this variable
    fn update(&self) -> Result<(), VariableError> {
        Ok(())
    }
}

/// A named value that can be framed and written over PlainProtocol
///
/// # Example
///
/// ```
/// use core::cell::Cell;
/// use plain_protocol_vars::{NamedVariable, StorageMode};
///
/// // Owned, default-initialized
/// let ticks: NamedVariable<'_, u32> = NamedVariable::new("TICKS");
/// ticks.set(12);
/// assert_eq!(ticks.frame().unwrap().as_str(), "TICKS12;");
///
/// // Aliasing firmware-owned storage
/// let battery = Cell::new(11.1f32);
/// let volts = NamedVariable::aliased("VBAT", &battery);
/// assert_eq!(volts.storage_mode(), StorageMode::Aliased);
/// battery.set(10.8);
/// assert_eq!(volts.frame().unwrap().as_str(), "VBAT10.80;");
/// ```
#[derive(Debug)]
pub struct NamedVariable<'a, T> {
    name: String<MAX_NAME_LEN>,
    enabled: Cell<bool>,
    value: Slot<'a, T>,
}

/// Copy at most [`MAX_NAME_LEN`] bytes of `name`, cutting on a char boundary
fn bounded_name(name: &str) -> String<MAX_NAME_LEN> {
    let mut bounded = String::new();
    for ch in name.chars() {
        if bounded.push(ch).is_err() {
            break;
        }
    }
    bounded
}

impl<'a, T> NamedVariable<'a, T> {
    fn from_slot(name: &str, value: Slot<'a, T>) -> Self {
        Self {
            name: bounded_name(name),
            enabled: Cell::new(true),
            value,
        }
    }

    /// Enabled variable owning a default-initialized value
    pub fn new(name: &str) -> Self
    where
        T: Default,
    {
        Self::from_slot(name, Slot::default())
    }

    /// Enabled variable owning `value`
    pub fn with_value(name: &str, value: T) -> Self {
        Self::from_slot(name, Slot::owned(value))
    }

    /// Enabled variable reading and writing through firmware-owned `target`
    pub fn aliased(name: &str, target: &'a Cell<T>) -> Self {
        Self::from_slot(name, Slot::aliased(target))
    }

    /// Set the initial enable flag
    pub fn with_enabled(self, enabled: bool) -> Self {
        self.enabled.set(enabled);
        self
    }

    /// Start out excluded from batch frames
    pub fn disabled(self) -> Self {
        self.with_enabled(false)
    }

    /// Underlying value slot
    pub fn slot(&self) -> &Slot<'a, T> {
        &self.value
    }

    /// Owned or aliased
    pub fn storage_mode(&self) -> StorageMode {
        self.value.mode()
    }

    /// Replace the current value (writes through an alias)
    pub fn set(&self, value: T) {
        self.value.set(value);
    }
}

impl<T: Clone + Default> NamedVariable<'_, T> {
    /// Copy of the current value
    pub fn get(&self) -> T {
        self.value.get()
    }
}

impl<T: PartialEq + Default> NamedVariable<'_, T> {
    /// `current == value`
    pub fn equals(&self, value: &T) -> bool {
        self.value.equals(value)
    }
}

impl<T: PartialOrd + Default> NamedVariable<'_, T> {
    /// `current < value`
    pub fn less_than(&self, value: &T) -> bool {
        self.value.less_than(value)
    }

    /// `current > value`
    pub fn greater_than(&self, value: &T) -> bool {
        self.value.greater_than(value)
    }
}

impl<T: FrameValue> NamedVariable<'_, T> {
    /// Render this variable's frame fragment
    pub fn frame(&self) -> Result<String<MAX_FRAME_LEN>, FrameError> {
        let mut out = String::new();
        self.write_frame(&mut out)?;
        Ok(out)
    }
}

impl<T: FrameValue> PlainVariable for NamedVariable<'_, T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_enabled(&self) -> bool {
        self.enabled.get()
    }

    fn set_enabled(&self, enabled: bool) {
        self.enabled.set(enabled);
    }

    fn write_frame(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        let value = self.value.get();
        write!(out, "{}{};", self.name, value.to_wire())
    }

    // The transport sees a copy, so it may update this variable mid-write
    fn write(&self, transport: &mut dyn Transport) -> Result<(), TransportError> {
        let value = self.value.get();
        transport.write(&self.name, value.to_wire())
    }
}

/// Unsigned 8-bit variable (also used for raw bytes)
pub type U8Variable<'a> = NamedVariable<'a, u8>;
/// Signed 8-bit variable
pub type I8Variable<'a> = NamedVariable<'a, i8>;
/// Unsigned 16-bit variable
pub type U16Variable<'a> = NamedVariable<'a, u16>;
/// Signed 16-bit variable
pub type I16Variable<'a> = NamedVariable<'a, i16>;
/// Unsigned 32-bit variable
pub type U32Variable<'a> = NamedVariable<'a, u32>;
/// Signed 32-bit variable
pub type I32Variable<'a> = NamedVariable<'a, i32>;
/// Single-precision float variable
pub type FloatVariable<'a> = NamedVariable<'a, f32>;
/// Double-precision float variable
pub type DoubleVariable<'a> = NamedVariable<'a, f64>;
/// Character variable
pub type CharVariable<'a> = NamedVariable<'a, char>;
/// Boolean flag variable
pub type BoolVariable<'a> = NamedVariable<'a, bool>;
/// Bounded text variable
pub type TextVariable<'a, const N: usize> = NamedVariable<'a, String<N>>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockTransport;
    use crate::variables::{WireValue, NAME_BUFFER_LEN};

    #[test]
    fn test_name_is_stored_unmodified() {
        let var: U8Variable<'_> = NamedVariable::new("LED");
        assert_eq!(var.name(), "LED");
        assert!(var.is_enabled());
    }

    #[test]
    fn test_long_name_is_truncated() {
        let input = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789abcd";
        assert_eq!(input.len(), 40);

        let var = NamedVariable::with_value(input, 1u8);
        assert_eq!(var.name().len(), MAX_NAME_LEN);
        assert_eq!(var.name().len(), NAME_BUFFER_LEN - 1);
        assert_eq!(var.name(), &input[..MAX_NAME_LEN]);
    }

    #[test]
    fn test_name_exactly_at_limit_is_kept() {
        let input = "N".repeat(MAX_NAME_LEN);
        let var = NamedVariable::with_value(&input, 0u8);
        assert_eq!(var.name(), input.as_str());
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        // 2-byte chars: 15 fit in 31 bytes, the 16th would need bytes 31..33
        let input = "é".repeat(20);
        let var = NamedVariable::with_value(&input, 0u8);
        assert_eq!(var.name(), "é".repeat(15));
        assert_eq!(var.name().len(), 30);
    }

    #[test]
    fn test_default_value_constructor() {
        let var: NamedVariable<'_, f32> = NamedVariable::new("F");
        assert_eq!(var.get(), 0.0);
        assert_eq!(var.storage_mode(), StorageMode::Owned);
    }

    #[test]
    fn test_enabled_flag() {
        let var = NamedVariable::with_value("X", 1i32).disabled();
        assert!(!var.is_enabled());
        var.set_enabled(true);
        assert!(var.is_enabled());

        let var = NamedVariable::with_value("Y", 1i32).with_enabled(false);
        assert!(!var.is_enabled());
    }

    #[test]
    fn test_frame_fragment() {
        let count = NamedVariable::with_value("CNT", 42u16);
        assert_eq!(count.frame().unwrap().as_str(), "CNT42;");

        let temp = NamedVariable::with_value("T", -12.345f32);
        assert_eq!(temp.frame().unwrap().as_str(), "T-12.35;");

        let mode: TextVariable<'_, 8> =
            NamedVariable::with_value("MODE", String::try_from("auto").unwrap());
        assert_eq!(mode.frame().unwrap().as_str(), "MODEauto;");
    }

    #[test]
    fn test_frame_overflow() {
        let long: TextVariable<'_, 64> =
            NamedVariable::with_value("MSG", String::try_from("x".repeat(64).as_str()).unwrap());
        assert_eq!(long.frame(), Err(FrameError::Overflow));
    }

    #[test]
    fn test_aliased_variable_tracks_firmware_value() {
        let counter = Cell::new(0u32);
        let var = NamedVariable::aliased("C", &counter);

        counter.set(counter.get() + 5);
        assert_eq!(var.get(), 5);
        assert_eq!(var.frame().unwrap().as_str(), "C5;");

        var.set(9);
        assert_eq!(counter.get(), 9);
    }

    #[test]
    fn test_comparisons() {
        let var = NamedVariable::with_value("V", 10i8);
        assert!(var.equals(&10));
        assert!(var.less_than(&11));
        assert!(var.greater_than(&-1));
    }

    #[test]
    fn test_write_ignores_enabled_flag() {
        let var = NamedVariable::with_value("OFF", 'q').disabled();
        let mut transport = MockTransport::new();

        var.write(&mut transport).unwrap();

        let last = transport.last().unwrap();
        assert_eq!(last.name.as_str(), "OFF");
        assert_eq!(last.value.as_str(), "q");
    }

    /// Transport that bumps the variable it is sending, like an ack counter
    struct AckCounter<'v> {
        target: &'v NamedVariable<'v, u8>,
        sent: Option<u8>,
    }

    impl Transport for AckCounter<'_> {
        fn write(&mut self, _name: &str, value: WireValue<'_>) -> Result<(), TransportError> {
            if let WireValue::U8(v) = value {
                self.sent = Some(v);
                self.target.set(v.wrapping_add(1));
            }
            Ok(())
        }
    }

    #[test]
    fn test_transport_may_update_variable_being_written() {
        let var = NamedVariable::with_value("ACK", 4u8);
        let mut transport = AckCounter {
            target: &var,
            sent: None,
        };

        var.write(&mut transport).unwrap();
        var.write(&mut transport).unwrap();

        assert_eq!(transport.sent, Some(5));
        assert_eq!(var.get(), 6);
        assert_eq!(var.frame().unwrap().as_str(), "ACK6;");
    }

    #[test]
    fn test_default_hooks_succeed() {
        let var = NamedVariable::with_value("H", false);
        assert_eq!(var.initialize(), Ok(()));
        assert_eq!(var.update(), Ok(()));
    }
}
