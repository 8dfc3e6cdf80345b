//! The coded, templated message that fault codes are built on.

use std::borrow::Cow;
use std::fmt;

use super::template::{self, TemplateError};
use crate::codes;
use crate::fault::Fault;

/// An immutable `(code, number of arguments, message template)` triple.
///
/// A `MessageCode` can only be obtained through [`MessageCode::new`], which
/// rejects a blank code, a negative argument count, a blank template, and a
/// template missing any of the placeholders `{0}..{num_args - 1}`. Once
/// constructed it is valid for its whole lifetime.
///
/// Equality is structural: two codes with the same identifier but a
/// different arity or template are different codes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MessageCode {
    code: Cow<'static, str>,
    num_args: usize,
    template: Cow<'static, str>,
}

impl MessageCode {
    /// Creates a validated message code.
    ///
    /// # Errors
    ///
    /// Returns a fault carrying one of the internal codes
    /// [`CODE_IS_MANDATORY`](codes::CODE_IS_MANDATORY),
    /// [`NUM_ARGS_NEGATIVE`](codes::NUM_ARGS_NEGATIVE),
    /// [`EMPTY_MESSAGE_TEMPLATE`](codes::EMPTY_MESSAGE_TEMPLATE) or
    /// [`INSUFFICIENT_ARGS`](codes::INSUFFICIENT_ARGS).
    ///
    /// # Examples
    ///
    /// ```
    /// use pahakia_fault::MessageCode;
    ///
    /// let code = MessageCode::new("app.greeting", 1, "Hello, {0}!")?;
    /// assert_eq!(code.format(&["world"])?, "Hello, world!");
    ///
    /// assert!(MessageCode::new("app.greeting", 2, "Hello, {0}!").is_err());
    /// # Ok::<(), pahakia_fault::Fault>(())
    /// ```
    pub fn new(
        code: impl Into<String>,
        num_args: i64,
        template: impl Into<String>,
    ) -> Result<Self, Fault> {
        let code = code.into();
        let template = template.into();

        if code.trim().is_empty() {
            return Err(Fault::misuse(&codes::CODE_IS_MANDATORY, []));
        }
        if num_args < 0 {
            return Err(Fault::misuse(
                &codes::NUM_ARGS_NEGATIVE,
                [num_args.to_string()],
            ));
        }
        if template.trim().is_empty() {
            return Err(Fault::misuse(&codes::EMPTY_MESSAGE_TEMPLATE, []));
        }

        // A count past usize::MAX can never have all of its placeholders.
        let num_args = usize::try_from(num_args).map_err(|_| {
            Fault::misuse(
                &codes::INSUFFICIENT_ARGS,
                [code.clone(), num_args.to_string(), template.clone()],
            )
        })?;

        // Substring search only; unused placeholders past num_args are allowed.
        if (0..num_args).any(|i| !template.contains(&template::placeholder(i))) {
            return Err(Fault::misuse(
                &codes::INSUFFICIENT_ARGS,
                [code, num_args.to_string(), template],
            ));
        }

        Ok(Self {
            code: Cow::Owned(code),
            num_args,
            template: Cow::Owned(template),
        })
    }

    /// Builds a code from static parts without validation.
    ///
    /// Only used for codes whose validity is covered by tests.
    pub(crate) const fn from_static(
        code: &'static str,
        num_args: usize,
        template: &'static str,
    ) -> Self {
        Self {
            code: Cow::Borrowed(code),
            num_args,
            template: Cow::Borrowed(template),
        }
    }

    /// The machine-readable identifier.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// The number of arguments the template expects.
    pub fn num_args(&self) -> usize {
        self.num_args
    }

    /// The raw message template.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Fills the template with `args`.
    ///
    /// # Errors
    ///
    /// [`NUM_ARGS_NOT_MATCH_CODE`](codes::NUM_ARGS_NOT_MATCH_CODE) if the
    /// argument count differs from [`num_args`](Self::num_args),
    /// [`FORMAT_ARG_MISSING`](codes::FORMAT_ARG_MISSING) if the template
    /// references an argument beyond the supplied ones, and
    /// [`MALFORMED_TEMPLATE`](codes::MALFORMED_TEMPLATE) for stray braces.
    pub fn format<S: AsRef<str>>(&self, args: &[S]) -> Result<String, Fault> {
        self.check_arity(args.len())?;
        template::substitute(&self.template, args).map_err(|err| self.template_fault(err))
    }

    pub(crate) fn check_arity(&self, supplied: usize) -> Result<(), Fault> {
        if supplied == self.num_args {
            return Ok(());
        }
        Err(Fault::misuse(
            &codes::NUM_ARGS_NOT_MATCH_CODE,
            [
                self.code.to_string(),
                self.num_args.to_string(),
                supplied.to_string(),
            ],
        ))
    }

    fn template_fault(&self, err: TemplateError) -> Fault {
        match err {
            TemplateError::MissingArg { index, supplied } => Fault::misuse(
                &codes::FORMAT_ARG_MISSING,
                [self.code.to_string(), index.to_string(), supplied.to_string()],
            ),
            TemplateError::Malformed { position } => Fault::misuse(
                &codes::MALFORMED_TEMPLATE,
                [self.code.to_string(), position.to_string()],
            ),
        }
    }
}

impl fmt::Display for MessageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "code={}, num args={}, message template={}",
            self.code, self.num_args, self.template
        )
    }
}
