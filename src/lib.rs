#![cfg_attr(not(test), no_std)]

//! plain_protocol_vars - Named variables for PlainProtocol telemetry
//!
//! Firmware declares one [`NamedVariable`] per quantity of interest (counters,
//! sensor readings, flags). Each declaration is registered in a fixed-capacity
//! [`Registry`], which enumerates variables in registration order, renders them
//! as `name` + `value` + `;` frames, and pushes individual values to a shared
//! [`Transport`].
//!
//! # Modules
//!
//! - [`variables`]: value slots, named variables and the registry
//! - [`transport`]: the transport seam and a recording mock
//! - [`diagnostics`]: line-oriented diagnostic sinks
//!
//! # Example
//!
//! ```
//! use core::cell::Cell;
//! use plain_protocol_vars::{NamedVariable, Registry};
//!
//! let rpm = Cell::new(1200u16);
//! let speed = NamedVariable::aliased("SPD", &rpm);
//! let flag = NamedVariable::with_value("ARM", true).disabled();
//!
//! let mut registry: Registry = Registry::new();
//! registry.register(&speed).unwrap();
//! registry.register(&flag).unwrap();
//!
//! rpm.set(1500);
//! let frames = registry.all_frames::<64>().unwrap();
//! assert_eq!(frames.as_str(), "SPD1500;");
//! ```

pub mod diagnostics;
mod logging;
pub mod transport;
pub mod variables;

pub use diagnostics::{DiagnosticSink, LogSink, MockSink};
pub use transport::{MockTransport, Transport, TransportError};
pub use variables::{
    BoolVariable, CharVariable, DoubleVariable, FloatVariable, FrameError, FrameValue,
    I16Variable, I32Variable, I8Variable, NamedVariable, PlainVariable, Registry, RegistryError,
    Slot, StorageMode, TextVariable, U16Variable, U32Variable, U8Variable, VariableError,
    WireValue, FLOAT_PRECISION, FLOAT_TEXT_LIMIT, MAX_FRAME_LEN, MAX_NAME_LEN, MAX_VARIABLES,
    NAME_BUFFER_LEN,
};

#[doc(hidden)]
pub use static_cell;
