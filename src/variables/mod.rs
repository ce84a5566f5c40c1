//! PlainProtocol variables
//!
//! Named values that firmware declares once and the registry enumerates,
//! frames and writes for the rest of the program's life.
//!
//! - [`value`]: per-type wire views and canonical text
//! - [`slot`]: owned or aliased value storage
//! - [`variable`]: named, enable-able variables
//! - [`registry`]: fixed-capacity, registration-ordered collection

pub mod error;
pub mod registry;
pub mod slot;
pub mod value;
pub mod variable;

pub use error::{FrameError, RegistryError, VariableError};
pub use registry::Registry;
pub use slot::{Slot, StorageMode};
pub use value::{FrameValue, WireValue};
pub use variable::{
    BoolVariable, CharVariable, DoubleVariable, FloatVariable, I16Variable, I32Variable,
    I8Variable, NamedVariable, PlainVariable, TextVariable, U16Variable, U32Variable, U8Variable,
};

/// Name buffer size in bytes, counting the terminator of the on-device layout
pub const NAME_BUFFER_LEN: usize = 32;

/// Maximum stored name length in bytes
///
/// Longer names are truncated silently at the last character boundary that
/// fits.
pub const MAX_NAME_LEN: usize = NAME_BUFFER_LEN - 1;

/// Maximum number of variables a default-sized registry holds
pub const MAX_VARIABLES: usize = 32;

/// Capacity of a single rendered frame fragment
pub const MAX_FRAME_LEN: usize = 64;

/// Fractional digits used when rendering floating point values
pub const FLOAT_PRECISION: usize = 2;

/// Largest float magnitude rendered as digits; beyond it the text is `ovf`
pub const FLOAT_TEXT_LIMIT: f64 = 4_294_967_040.0;
