//! Variable registry
//!
//! The registry is the ordered, fixed-capacity collection of every declared
//! variable. It has two phases:
//!
//! 1. **Registration** (setup): variables are appended with
//!    [`Registry::register`] / [`Registry::declare`] and the shared transport
//!    is assigned with [`Registry::set_transport`].
//! 2. **Steady state**: frames are generated and values written; the set of
//!    entries never changes again.
//!
//! Entries are never removed. The registry stores non-owning references, so
//! every variable must outlive it; in firmware that means `'static` storage,
//! which [`declare_variable!`](crate::declare_variable) provides.
//!
//! The registry is not a global. Firmware owns one instance (usually in a
//! `StaticCell`) and hands it to whoever needs it. It is single-threaded by
//! construction: variables use `Cell`/`RefCell`, so neither they nor the
//! registry are `Sync`.

use super::error::{FrameError, RegistryError};
use super::value::FrameValue;
use super::variable::{NamedVariable, PlainVariable};
use super::{MAX_NAME_LEN, MAX_VARIABLES};
use crate::diagnostics::DiagnosticSink;
use crate::transport::Transport;
use crate::logging::{log_debug, log_error, log_warn};
use core::cell::RefCell;
use core::fmt::{self, Write};
use heapless::{String, Vec};

/// First line emitted by [`Registry::debug_dump`]
pub const DUMP_HEADER: &str = "***PRINTING ALL REGISTERED VARIABLES***";

/// Prefix of each per-variable line emitted by [`Registry::debug_dump`]
pub const DUMP_PREFIX: &str = "Variable Name:";

const DUMP_LINE_LEN: usize = DUMP_PREFIX.len() + MAX_NAME_LEN;

/// Ordered, fixed-capacity collection of PlainProtocol variables
///
/// # Example
///
/// ```
/// use core::cell::RefCell;
/// use plain_protocol_vars::{MockTransport, NamedVariable, Registry};
///
/// let a = NamedVariable::with_value("A", 1u8);
/// let b = NamedVariable::with_value("B", 2u8).disabled();
/// let c = NamedVariable::with_value("C", 3u8);
/// let transport = RefCell::new(MockTransport::new());
///
/// let mut registry: Registry = Registry::new();
/// registry.register(&a).unwrap();
/// registry.register(&b).unwrap();
/// registry.register(&c).unwrap();
/// registry.set_transport(&transport);
///
/// assert_eq!(registry.all_frames::<32>().unwrap().as_str(), "A1;C3;");
///
/// registry.write_index(1).unwrap();
/// assert_eq!(transport.borrow().last().unwrap().name.as_str(), "B");
/// ```
pub struct Registry<'a, const N: usize = MAX_VARIABLES> {
    entries: Vec<&'a dyn PlainVariable, N>,
    transport: Option<&'a RefCell<dyn Transport + 'a>>,
}

impl<'a, const N: usize> Registry<'a, N> {
    /// Create an empty registry with no transport
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            transport: None,
        }
    }

    /// Append a variable
    ///
    /// # Returns
    ///
    /// - `Ok(index)` - Position of the variable in enumeration order
    /// - `Err(RegistryError::Full)` - Registry already holds `N` variables;
    ///   existing entries are untouched
    pub fn register(&mut self, variable: &'a dyn PlainVariable) -> Result<usize, RegistryError> {
        let index = self.entries.len();
        if self.entries.push(variable).is_err() {
            log_error!(
                "Variable registry full: cannot register '{}' (capacity {})",
                variable.name(),
                N
            );
            return Err(RegistryError::Full);
        }

        log_debug!("Registered variable '{}' at index {}", variable.name(), index);
        Ok(index)
    }

    /// Register a typed variable and hand the same reference back
    ///
    /// Lets declaration and registration happen in one expression while the
    /// caller keeps typed access (`get`/`set`) to the variable.
    pub fn declare<T: FrameValue + 'a>(
        &mut self,
        variable: &'a NamedVariable<'a, T>,
    ) -> Result<&'a NamedVariable<'a, T>, RegistryError> {
        self.register(variable)?;
        Ok(variable)
    }

    /// Variable registered at `index`
    ///
    /// # Returns
    ///
    /// `Err(RegistryError::NotFound)` if `index >= self.len()`
    pub fn get_by_index(&self, index: usize) -> Result<&'a dyn PlainVariable, RegistryError> {
        match self.entries.get(index) {
            Some(variable) => Ok(*variable),
            None => {
                log_warn!(
                    "Invalid variable index {} ({} registered)",
                    index,
                    self.entries.len()
                );
                Err(RegistryError::NotFound)
            }
        }
    }

    /// First variable registered under `name`
    pub fn find(&self, name: &str) -> Option<&'a dyn PlainVariable> {
        self.entries.iter().copied().find(|v| v.name() == name)
    }

    /// Registered variables in registration order
    pub fn iter(&self) -> impl Iterator<Item = &'a dyn PlainVariable> + '_ {
        self.entries.iter().copied()
    }

    /// Number of registered variables
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing has been registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of variables
    pub const fn capacity(&self) -> usize {
        N
    }

    /// True when another registration would fail
    pub fn is_full(&self) -> bool {
        self.entries.is_full()
    }

    /// Assign the transport used by [`write`](Self::write)
    ///
    /// Intended to be called once during setup. Replacing an already
    /// assigned transport is allowed but logged.
    pub fn set_transport(&mut self, transport: &'a RefCell<dyn Transport + 'a>) {
        if self.transport.is_some() {
            log_warn!("Replacing already assigned transport");
        }
        self.transport = Some(transport);
    }

    /// True once a transport has been assigned
    pub fn has_transport(&self) -> bool {
        self.transport.is_some()
    }

    /// Push one variable's current value through the shared transport
    ///
    /// The enable flag is not consulted.
    ///
    /// # Errors
    ///
    /// - `TransportUnset` - [`set_transport`](Self::set_transport) was never called
    /// - `TransportBusy` - The transport is already borrowed
    /// - `Transport(_)` - The transport rejected the write
    pub fn write(&self, variable: &dyn PlainVariable) -> Result<(), RegistryError> {
        let Some(transport) = self.transport else {
            log_warn!("Write of '{}' before transport was set", variable.name());
            return Err(RegistryError::TransportUnset);
        };

        let mut transport = transport
            .try_borrow_mut()
            .map_err(|_| RegistryError::TransportBusy)?;
        variable.write(&mut *transport)?;
        Ok(())
    }

    /// [`write`](Self::write) the variable registered at `index`
    pub fn write_index(&self, index: usize) -> Result<(), RegistryError> {
        self.write(self.get_by_index(index)?)
    }

    /// Write every enabled variable in registration order
    ///
    /// Stops at the first failure.
    ///
    /// # Returns
    ///
    /// Number of variables written
    pub fn write_enabled(&self) -> Result<usize, RegistryError> {
        let mut written = 0;
        for variable in self.iter().filter(|v| v.is_enabled()) {
            self.write(variable)?;
            written += 1;
        }
        Ok(written)
    }

    /// Append the frame fragments of all enabled variables to `out`
    ///
    /// Disabled variables contribute nothing.
    pub fn write_frames(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        for variable in self.iter().filter(|v| v.is_enabled()) {
            variable.write_frame(out)?;
        }
        Ok(())
    }

    /// Concatenated frame fragments of all enabled variables
    ///
    /// Empty when nothing is registered or everything is disabled.
    pub fn all_frames<const CAP: usize>(&self) -> Result<String<CAP>, FrameError> {
        let mut out = String::new();
        self.write_frames(&mut out)?;
        Ok(out)
    }

    /// Emit every registered name to `sink`, in registration order
    pub fn debug_dump(&self, sink: &mut dyn DiagnosticSink) {
        sink.write_line(DUMP_HEADER);

        for variable in self.iter() {
            let mut line = String::<DUMP_LINE_LEN>::new();
            // Names are bounded by MAX_NAME_LEN, so the line always fits
            let _ = write!(line, "{}{}", DUMP_PREFIX, variable.name());
            sink.write_line(&line);
        }
    }

    /// Run every variable's `initialize` hook in registration order
    ///
    /// Stops at the first failure and reports its index.
    pub fn initialize_all(&self) -> Result<(), RegistryError> {
        for (index, variable) in self.iter().enumerate() {
            variable.initialize().map_err(|error| {
                log_error!(
                    "Variable '{}' failed to initialize: {}",
                    variable.name(),
                    error
                );
                RegistryError::Variable { index, error }
            })?;
        }
        Ok(())
    }

    /// Run every variable's `update` hook in registration order
    ///
    /// Stops at the first failure and reports its index.
    pub fn update_all(&self) -> Result<(), RegistryError> {
        for (index, variable) in self.iter().enumerate() {
            variable.update().map_err(|error| {
                log_error!("Variable '{}' failed to update: {}", variable.name(), error);
                RegistryError::Variable { index, error }
            })?;
        }
        Ok(())
    }
}

impl<const N: usize> Default for Registry<'_, N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Declare a `'static` variable and register it in one step
///
/// Places the variable in a dedicated `StaticCell` and calls
/// [`Registry::declare`]. Each expansion site owns one cell, so a given
/// invocation can succeed only once; running it again returns
/// `Err(RegistryError::AlreadyDeclared)` and leaves the registry untouched.
///
/// # Example
///
/// ```
/// use plain_protocol_vars::{declare_variable, NamedVariable, Registry};
///
/// let mut registry: Registry<'static> = Registry::new();
/// let uptime = declare_variable!(registry, u32, NamedVariable::with_value("UP", 0)).unwrap();
///
/// uptime.set(30);
/// assert_eq!(registry.all_frames::<16>().unwrap().as_str(), "UP30;");
/// ```
#[macro_export]
macro_rules! declare_variable {
    ($registry:expr, $ty:ty, $variable:expr) => {{
        static CELL: $crate::static_cell::StaticCell<$crate::NamedVariable<'static, $ty>> =
            $crate::static_cell::StaticCell::new();
        match CELL.try_init($variable) {
            Some(variable) => {
                let variable: &'static $crate::NamedVariable<'static, $ty> = variable;
                $registry.declare(variable)
            }
            None => Err($crate::RegistryError::AlreadyDeclared),
        }
    }};
}
