//! Pahakia fault - structured, code-driven error handling.
//!
//! Every failure is a single [`Fault`] type carrying a [`FaultCode`] (a
//! stable identifier bound to a message template) and the string arguments
//! that fill the template. Native errors are converted with
//! [`Fault::naturalize`], and [`CodeBlockWorker`] replaces
//! `try`/`catch`/`finally` with handlers selected by fault code patterns.
//!
//! ```
//! use pahakia_fault::{Fault, FaultCode};
//!
//! let code = FaultCode::new("main.test.fault", 2, "{0}: {1}")?;
//! let fault = Fault::create(&code, ["hello", "world"])?;
//! assert_eq!(fault.message(), "main.test.fault: hello: world");
//! # Ok::<(), Fault>(())
//! ```

pub mod catalog;
pub mod code;
pub mod codes;
pub mod dispatch;
pub mod fault;
pub mod logging;

pub use catalog::FaultCatalog;
pub use code::{FaultCode, MessageCode};
pub use dispatch::{CodeBlockWorker, CodePattern, IntoCodePattern};
pub use fault::{Cause, Fault, FaultReport, ResultExt};
