//! Positional message templates.
//!
//! Templates use `{n}` placeholders that are replaced by the n-th argument.
//! `{{` and `}}` produce literal braces. Any other use of a brace is rejected
//! so that a broken template surfaces as an error instead of garbled output.

use thiserror::Error;

/// Failure while substituting arguments into a template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum TemplateError {
    /// A placeholder references an argument that was not supplied.
    #[error("placeholder {{{index}}} has no argument ({supplied} supplied)")]
    MissingArg { index: usize, supplied: usize },

    /// A brace that is neither an escape nor a well-formed placeholder.
    #[error("malformed placeholder at byte {position}")]
    Malformed { position: usize },
}

/// Returns the placeholder text for argument `index`, e.g. `{2}`.
pub(crate) fn placeholder(index: usize) -> String {
    format!("{{{}}}", index)
}

/// Substitutes `args` into `template`.
///
/// Argument text is inserted verbatim and never re-scanned for placeholders.
pub(crate) fn substitute<S: AsRef<str>>(template: &str, args: &[S]) -> Result<String, TemplateError> {
    let bytes = template.as_bytes();
    let mut out = String::with_capacity(template.len());
    let mut literal_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'{' if bytes.get(i + 1) == Some(&b'{') => {
                out.push_str(&template[literal_start..i]);
                out.push('{');
                i += 2;
                literal_start = i;
            }
            b'}' if bytes.get(i + 1) == Some(&b'}') => {
                out.push_str(&template[literal_start..i]);
                out.push('}');
                i += 2;
                literal_start = i;
            }
            b'{' => {
                let digits_start = i + 1;
                let mut end = digits_start;
                while end < bytes.len() && bytes[end].is_ascii_digit() {
                    end += 1;
                }
                if end == digits_start || bytes.get(end) != Some(&b'}') {
                    return Err(TemplateError::Malformed { position: i });
                }
                let index: usize = template[digits_start..end]
                    .parse()
                    .map_err(|_| TemplateError::Malformed { position: i })?;
                let arg = args.get(index).ok_or(TemplateError::MissingArg {
                    index,
                    supplied: args.len(),
                })?;

                out.push_str(&template[literal_start..i]);
                out.push_str(arg.as_ref());
                i = end + 1;
                literal_start = i;
            }
            b'}' => return Err(TemplateError::Malformed { position: i }),
            _ => i += 1,
        }
    }

    out.push_str(&template[literal_start..]);
    Ok(out)
}
