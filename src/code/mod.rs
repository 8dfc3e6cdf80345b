//! Message codes and fault codes.
//!
//! A [`MessageCode`] binds a stable identifier to a positional message
//! template and the number of arguments that template needs. A
//! [`FaultCode`] is the flavour used to build [`Fault`](crate::Fault)s.

pub mod fault_code;
pub mod message;
mod template;

pub use fault_code::FaultCode;
pub use message::MessageCode;
