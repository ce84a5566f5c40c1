//! Frame value types
//!
//! [`FrameValue`] is the capability every variable type must provide: a
//! borrowed, typed [`WireValue`] view. The view is what the transport
//! receives, and its `Display` impl is the canonical text used in frames.

use super::{FLOAT_PRECISION, FLOAT_TEXT_LIMIT};
use core::fmt;

/// Typed, borrowed view of a variable's value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WireValue<'v> {
    /// Unsigned 8-bit integer (also used for raw bytes)
    U8(u8),
    /// Signed 8-bit integer
    I8(i8),
    /// Unsigned 16-bit integer
    U16(u16),
    /// Signed 16-bit integer
    I16(i16),
    /// Unsigned 32-bit integer
    U32(u32),
    /// Signed 32-bit integer
    I32(i32),
    /// 32-bit float
    F32(f32),
    /// 64-bit float
    F64(f64),
    /// Single character
    Char(char),
    /// Boolean flag
    Bool(bool),
    /// Text
    Str(&'v str),
}

impl fmt::Display for WireValue<'_> {
    /// Integers in decimal, floats with [`FLOAT_PRECISION`] fractional
    /// digits, booleans as `1`/`0`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            WireValue::U8(v) => write!(f, "{}", v),
            WireValue::I8(v) => write!(f, "{}", v),
            WireValue::U16(v) => write!(f, "{}", v),
            WireValue::I16(v) => write!(f, "{}", v),
            WireValue::U32(v) => write!(f, "{}", v),
            WireValue::I32(v) => write!(f, "{}", v),
            WireValue::F32(v) => write_float(f, f64::from(v)),
            WireValue::F64(v) => write_float(f, v),
            WireValue::Char(v) => write!(f, "{}", v),
            WireValue::Bool(v) => f.write_str(if v { "1" } else { "0" }),
            WireValue::Str(v) => f.write_str(v),
        }
    }
}

/// Fixed-precision float text
///
/// NaN renders as `nan`, either infinity as `inf`, and anything beyond
/// [`FLOAT_TEXT_LIMIT`] as `ovf`. Negative zero renders as `0.00`.
fn write_float(f: &mut fmt::Formatter<'_>, v: f64) -> fmt::Result {
    if v.is_nan() {
        return f.write_str("nan");
    }
    if v.is_infinite() {
        return f.write_str("inf");
    }
    if v > FLOAT_TEXT_LIMIT || v < -FLOAT_TEXT_LIMIT {
        return f.write_str("ovf");
    }
    let v = if v == 0.0 { 0.0 } else { v };
    write!(f, "{:.*}", FLOAT_PRECISION, v)
}

/// A type that can be held by a [`NamedVariable`](super::NamedVariable)
pub trait FrameValue: Clone + Default {
    /// Borrowed wire view of this value
    fn to_wire(&self) -> WireValue<'_>;
}

macro_rules! impl_frame_value {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl FrameValue for $ty {
                fn to_wire(&self) -> WireValue<'_> {
                    WireValue::$variant(*self)
                }
            }
        )*
    };
}

impl_frame_value! {
    u8 => U8,
    i8 => I8,
    u16 => U16,
    i16 => I16,
    u32 => U32,
    i32 => I32,
    f32 => F32,
    f64 => F64,
    char => Char,
    bool => Bool,
}

impl<const N: usize> FrameValue for heapless::String<N> {
    fn to_wire(&self) -> WireValue<'_> {
        WireValue::Str(self.as_str())
    }
}
