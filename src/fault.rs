//! The unified failure value.
//!
//! A [`Fault`] is the only error type the framework surfaces. It carries:
//!
//! 1. a [`FaultCode`]: the identifier, message template and arity,
//! 2. the arguments that fill the template,
//! 3. the rendered message (`code: filled template`),
//! 4. optionally, the native error it was naturalized from.
//!
//! # Usage
//!
//! ```
//! use pahakia_fault::{Fault, FaultCode};
//!
//! let disk_full = FaultCode::new("app.disk.Full", 1, "disk {0} is full")?;
//!
//! // Create
//! let fault = Fault::create(&disk_full, ["sda"])?;
//! assert_eq!(fault.message(), "app.disk.Full: disk sda is full");
//!
//! // Naturalize a native error
//! let parse = "x".parse::<u8>().unwrap_err();
//! let fault = Fault::naturalize(parse);
//! assert!(fault.code().code().ends_with("ParseIntError"));
//! # Ok::<(), Fault>(())
//! ```

use std::any::Any;
use std::error::Error as StdError;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use crate::code::FaultCode;
use crate::dispatch::CodeBlockWorker;

/// Shared handle to the native error a fault was naturalized from.
pub type Cause = Arc<dyn StdError + Send + Sync + 'static>;

/// A failure identified by a [`FaultCode`] and its arguments.
///
/// Faults are immutable once created. Construction always checks the
/// argument count against the code and never pads or truncates.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct Fault {
    code: FaultCode,
    args: Vec<String>,
    message: String,
    #[source]
    cause: Option<Cause>,
}

impl Fault {
    /// Creates a fault for `code` with the given arguments.
    ///
    /// # Errors
    ///
    /// Returns a [`NUM_ARGS_NOT_MATCH_CODE`](crate::codes::NUM_ARGS_NOT_MATCH_CODE)
    /// fault if the number of arguments differs from the code's arity, or a
    /// template fault if the code's template cannot be rendered.
    pub fn create<I, S>(code: &FaultCode, args: I) -> Result<Self, Fault>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        Self::assemble(code.clone(), args, None)
    }

    /// Like [`create`](Self::create), but a misuse fault is returned in place
    /// of the requested one.
    ///
    /// This is the form to use at a raise site:
    /// `return Err(Fault::raise(&NOT_FOUND, [id]))`.
    pub fn raise<I, S>(code: &FaultCode, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::create(code, args).unwrap_or_else(|misuse| misuse)
    }

    /// Creates a fault for a code that takes no arguments.
    pub fn without_args(code: &FaultCode) -> Result<Self, Fault> {
        Self::create(code, Vec::<String>::new())
    }

    /// Converts any error into a fault.
    ///
    /// A `Fault` is returned unchanged. Any other error becomes a fault whose
    /// code is [`FaultCode::from_native_error::<E>()`](FaultCode::from_native_error),
    /// whose single argument is the error's message, and whose cause is the
    /// error itself.
    ///
    /// The code is derived from the static type `E`, not from the value.
    /// Every `std::io::Error` gets the same code whatever it wraps, and a
    /// wrapper enum gets the wrapper's name rather than its variant's.
    /// `Box<dyn Error + Send + Sync>` does not implement `Error` and cannot be
    /// naturalized at all. Convert at each boundary where the concrete type
    /// is still known, typically with [`ResultExt::naturalize`].
    pub fn naturalize<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        if let Some(fault) = (&err as &dyn Any).downcast_ref::<Fault>() {
            return fault.clone();
        }
        Self::from_native(err)
    }

    /// Starts a protected execution of `code_block`.
    ///
    /// See [`CodeBlockWorker`] for attaching handlers and running it.
    pub fn tri<'a, T, E, F>(code_block: F) -> CodeBlockWorker<'a, T, E, F>
    where
        F: FnOnce() -> Result<T, E>,
        E: StdError + Send + Sync + 'static,
    {
        CodeBlockWorker::wrap(code_block)
    }

    /// Builds a framework-misuse fault from one of the internal codes.
    pub(crate) fn misuse<const N: usize>(code: &'static FaultCode, args: [String; N]) -> Self {
        let args = Vec::from(args);
        // Internal templates are covered by tests, so rendering cannot fail
        // here. Fall back to the raw template rather than recursing.
        let message = code
            .format(&args)
            .unwrap_or_else(|_| format!("{}: {}", code.code(), code.template()));
        Self {
            code: code.clone(),
            args,
            message,
            cause: None,
        }
    }

    fn from_native<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        let code = FaultCode::from_native_error::<E>();
        let detail = err.to_string();
        // The derived template is always `{0}`.
        let message = format!("{}: {}", code.code(), detail);
        Self {
            code,
            args: vec![detail],
            message,
            cause: Some(Arc::new(err)),
        }
    }

    fn assemble(code: FaultCode, args: Vec<String>, cause: Option<Cause>) -> Result<Self, Fault> {
        code.check_arity(args.len())?;
        let message = code.format(&args)?;
        Ok(Self {
            code,
            args,
            message,
            cause,
        })
    }

    /// The fault's code.
    pub fn code(&self) -> &FaultCode {
        &self.code
    }

    /// The arguments that filled the code's template.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// The rendered message, `code: filled template`.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The native error this fault was naturalized from, if any.
    pub fn cause(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.cause.as_deref()
    }

    /// The cause, if it is of type `E`.
    pub fn cause_as<E: StdError + 'static>(&self) -> Option<&E> {
        self.cause.as_deref()?.downcast_ref::<E>()
    }

    /// Returns true if this fault carries `code`.
    pub fn is(&self, code: &FaultCode) -> bool {
        self.code.code() == code.code()
    }

    /// A serializable snapshot for reporting layers.
    pub fn report(&self) -> FaultReport {
        FaultReport {
            code: self.code.code().to_string(),
            args: self.args.clone(),
            message: self.message.clone(),
            cause: self.cause.as_ref().map(|cause| cause.to_string()),
        }
    }
}

impl PartialEq for Fault {
    fn eq(&self, other: &Self) -> bool {
        let same_cause = match (&self.cause, &other.cause) {
            (None, None) => true,
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        };
        same_cause
            && self.code == other.code
            && self.args == other.args
            && self.message == other.message
    }
}

/// Flat, serializable view of a [`Fault`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FaultReport {
    /// The fault code identifier.
    pub code: String,
    /// Template arguments, in order.
    pub args: Vec<String>,
    /// Rendered message.
    pub message: String,
    /// Display text of the naturalized native error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cause: Option<String>,
}

/// Naturalizes the error side of a `Result`.
pub trait ResultExt<T> {
    /// Converts the error into a [`Fault`] with [`Fault::naturalize`].
    fn naturalize(self) -> Result<T, Fault>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: StdError + Send + Sync + 'static,
{
    fn naturalize(self) -> Result<T, Fault> {
        self.map_err(Fault::naturalize)
    }
}
