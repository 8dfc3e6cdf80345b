//! Fault codes: message codes that identify a class of failures.

use std::fmt;
use std::ops::Deref;

use super::message::MessageCode;
use crate::fault::Fault;

/// A [`MessageCode`] used to construct [`Fault`]s.
///
/// Rendering prefixes the code: a fault code `app.io` with template
/// `disk {0} is full` formats as `app.io: disk sda is full`.
///
/// Fault codes are meant to be created once per kind of failure and kept for
/// the life of the program, typically in a [`FaultCatalog`](crate::FaultCatalog)
/// or in `static`s of the host crate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FaultCode(MessageCode);

impl FaultCode {
    /// Creates a validated fault code.
    ///
    /// Performs exactly the checks of [`MessageCode::new`].
    pub fn new(
        code: impl Into<String>,
        num_args: i64,
        template: impl Into<String>,
    ) -> Result<Self, Fault> {
        MessageCode::new(code, num_args, template).map(Self)
    }

    pub(crate) const fn from_static(
        code: &'static str,
        num_args: usize,
        template: &'static str,
    ) -> Self {
        Self(MessageCode::from_static(code, num_args, template))
    }

    /// Derives a fault code from a native error type.
    ///
    /// The code is the type's path as reported by [`std::any::type_name`],
    /// with one argument and the template `{0}`. Naturalized faults carry
    /// the native error's message as that argument.
    pub fn from_native_error<E: ?Sized + 'static>() -> Self {
        Self::from_static(std::any::type_name::<E>(), 1, "{0}")
    }

    /// Renders `code: <filled template>`.
    ///
    /// # Errors
    ///
    /// Same as [`MessageCode::format`].
    pub fn format<S: AsRef<str>>(&self, args: &[S]) -> Result<String, Fault> {
        let body = self.0.format(args)?;
        Ok(format!("{}: {}", self.0.code(), body))
    }

    /// The underlying message code.
    pub fn message_code(&self) -> &MessageCode {
        &self.0
    }
}

impl Deref for FaultCode {
    type Target = MessageCode;

    fn deref(&self) -> &MessageCode {
        &self.0
    }
}

impl From<FaultCode> for MessageCode {
    fn from(code: FaultCode) -> Self {
        code.0
    }
}

impl fmt::Display for FaultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
