//! Fault codes raised by the framework itself.
//!
//! These report misuse of the framework: invalid codes, argument count
//! mismatches, broken templates and patterns, and catalog problems. All of
//! them live under [`RESERVED_PREFIX`] so they never collide with
//! application codes.

use crate::code::FaultCode;

/// Namespace reserved for the framework's own codes.
pub const RESERVED_PREFIX: &str = "pahakia.fault.";

/// A message code was created with a blank code.
pub static CODE_IS_MANDATORY: FaultCode = FaultCode::from_static(
    "pahakia.fault.CodeIsMandatory",
    0,
    "Code is mandatory when creating MessageCode.",
);

/// A message code was created with a negative argument count.
pub static NUM_ARGS_NEGATIVE: FaultCode = FaultCode::from_static(
    "pahakia.fault.NumArgsNegative",
    1,
    "Number of arguments can not be negative when creating MessageCode: {0}.",
);

/// A message template lacks one of the placeholders its arity requires.
pub static INSUFFICIENT_ARGS: FaultCode = FaultCode::from_static(
    "pahakia.fault.InsufficientArgs",
    3,
    "Message template does not have enough \"{{n}}\"s for code: {0}, expected: {1}, message template: \"{2}\".",
);

/// A message code was created with a blank template.
pub static EMPTY_MESSAGE_TEMPLATE: FaultCode = FaultCode::from_static(
    "pahakia.fault.EmptyMessageTemplate",
    0,
    "Message template may not be null or empty.",
);

/// A fault was raised with the wrong number of arguments for its code.
pub static NUM_ARGS_NOT_MATCH_CODE: FaultCode = FaultCode::from_static(
    "pahakia.fault.CodeNumArgsNoMatch",
    3,
    "The number of String parameters must match the number of arguments specified in code: {0}, expected: {1}, got: {2}.",
);

/// A template references an argument index that was not supplied.
pub static FORMAT_ARG_MISSING: FaultCode = FaultCode::from_static(
    "pahakia.fault.FormatArgMissing",
    3,
    "Message template of code {0} references argument {{{1}}} but only {2} were supplied.",
);

/// A template contains a brace that is neither an escape nor a placeholder.
pub static MALFORMED_TEMPLATE: FaultCode = FaultCode::from_static(
    "pahakia.fault.MalformedTemplate",
    2,
    "Message template of code {0} has a malformed placeholder at byte {1}.",
);

/// A handler was registered with a pattern that is not a valid regex.
pub static INVALID_CODE_PATTERN: FaultCode = FaultCode::from_static(
    "pahakia.fault.InvalidCodePattern",
    2,
    "Invalid fault code pattern \"{0}\": {1}",
);

/// A handler was registered without any pattern.
pub static PATTERN_IS_MANDATORY: FaultCode = FaultCode::from_static(
    "pahakia.fault.PatternIsMandatory",
    0,
    "At least one fault code pattern is required when registering a handler.",
);

/// A catalog already holds a code with the same identifier.
pub static DUPLICATE_CODE: FaultCode = FaultCode::from_static(
    "pahakia.fault.DuplicateCode",
    1,
    "Fault code {0} is already registered in the catalog.",
);

/// An application code uses the framework's reserved namespace.
pub static RESERVED_CODE: FaultCode = FaultCode::from_static(
    "pahakia.fault.ReservedCode",
    1,
    "Fault code {0} uses the reserved \"pahakia.fault.\" namespace.",
);

/// A catalog lookup found no code with the requested identifier.
pub static UNKNOWN_CODE: FaultCode = FaultCode::from_static(
    "pahakia.fault.UnknownCode",
    1,
    "Fault code {0} is not registered in the catalog.",
);

/// A catalog file does not exist.
pub static CATALOG_NOT_FOUND: FaultCode = FaultCode::from_static(
    "pahakia.fault.CatalogNotFound",
    1,
    "Fault catalog file not found: {0}",
);

/// Every internal fault code.
pub fn all() -> [&'static FaultCode; 13] {
    [
        &CODE_IS_MANDATORY,
        &NUM_ARGS_NEGATIVE,
        &INSUFFICIENT_ARGS,
        &EMPTY_MESSAGE_TEMPLATE,
        &NUM_ARGS_NOT_MATCH_CODE,
        &FORMAT_ARG_MISSING,
        &MALFORMED_TEMPLATE,
        &INVALID_CODE_PATTERN,
        &PATTERN_IS_MANDATORY,
        &DUPLICATE_CODE,
        &RESERVED_CODE,
        &UNKNOWN_CODE,
        &CATALOG_NOT_FOUND,
    ]
}

/// Returns true if `code` lies in the reserved namespace.
pub fn is_reserved(code: &str) -> bool {
    code.starts_with(RESERVED_PREFIX)
}
