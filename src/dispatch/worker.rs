//! The protected-execution engine.

use std::error::Error as StdError;
use std::marker::PhantomData;

use tracing::{debug, trace, warn};

use super::pattern::{CodePattern, IntoCodePattern};
use crate::codes;
use crate::fault::Fault;

/// Handler callback invoked with the fault that matched.
pub type KatchBlock<'a, T> = Box<dyn FnOnce(Fault) -> Result<T, Fault> + 'a>;

/// Lifecycle of one protected execution, reported through `tracing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Running,
    Completed,
    Handled,
    Propagating,
    Finalized,
}

impl Phase {
    fn as_str(self) -> &'static str {
        match self {
            Phase::Running => "running",
            Phase::Completed => "completed",
            Phase::Handled => "handled",
            Phase::Propagating => "propagating",
            Phase::Finalized => "finalized",
        }
    }
}

enum Action<'a, T> {
    /// Swallow the fault and produce the default value.
    Ignore(fn() -> T),
    Katch(KatchBlock<'a, T>),
}

impl<T> Action<'_, T> {
    fn invoke(self, fault: Fault) -> Result<T, Fault> {
        match self {
            Action::Ignore(default) => Ok(default()),
            Action::Katch(block) => block(fault),
        }
    }

    fn is_ignore(&self) -> bool {
        matches!(self, Action::Ignore(_))
    }
}

struct KatchHandler<'a, T> {
    primary: CodePattern,
    additional: Vec<CodePattern>,
    action: Action<'a, T>,
}

impl<T> KatchHandler<'_, T> {
    fn matches(&self, code: &str) -> bool {
        self.primary.matches(code) || self.additional.iter().any(|p| p.matches(code))
    }
}

/// Runs the finalizer when dropped, so it also runs while unwinding.
struct Finale<Z: FnOnce()> {
    finalizer: Option<Z>,
}

impl<Z: FnOnce()> Drop for Finale<Z> {
    fn drop(&mut self) {
        let ran = match self.finalizer.take() {
            Some(finalizer) => {
                finalizer();
                true
            }
            None => false,
        };
        trace!(phase = Phase::Finalized.as_str(), finalizer = ran, "protected block finished");
    }
}

/// Fluent replacement for `try`/`catch`/`finally`.
///
/// Wrap a computation, register handlers with [`katch`](Self::katch) and
/// [`ignore`](Self::ignore), then run everything with
/// [`finale`](Self::finale) or [`finale_with`](Self::finale_with). Nothing
/// runs until one of the `finale` methods is called.
///
/// When the computation fails its error is [naturalized](Fault::naturalize)
/// and the handlers are scanned in registration order. Within a handler the
/// first pattern is tested before the additional ones. The first handler
/// with a matching pattern wins; an unmatched fault is returned unchanged.
///
/// A worker is single-use. Each protected execution gets its own worker.
///
/// # Examples
///
/// ```
/// use pahakia_fault::{CodeBlockWorker, Fault, FaultCode};
///
/// let not_found = FaultCode::new("app.user.NotFound", 1, "user {0} not found")?;
///
/// let name = CodeBlockWorker::wrap(|| Err(Fault::raise(&not_found, ["42"])))
///     .katch("app\\.user\\..*", |fault| Ok(format!("guest ({})", fault.args()[0])))
///     .finale()?;
///
/// assert_eq!(name, "guest (42)");
/// # Ok::<(), Fault>(())
/// ```
pub struct CodeBlockWorker<'a, T, E, F> {
    code_block: F,
    handlers: Vec<KatchHandler<'a, T>>,
    misuse: Option<Fault>,
    _error: PhantomData<fn() -> E>,
}

impl<'a, T, E, F> CodeBlockWorker<'a, T, E, F>
where
    F: FnOnce() -> Result<T, E>,
    E: StdError + Send + Sync + 'static,
{
    /// Wraps `code_block` for protected execution.
    pub fn wrap(code_block: F) -> Self {
        Self {
            code_block,
            handlers: Vec::new(),
            misuse: None,
            _error: PhantomData,
        }
    }

    /// Swallows faults matching `pattern`, producing `T::default()`.
    pub fn ignore<P>(self, pattern: P) -> Self
    where
        P: IntoCodePattern,
        T: Default,
    {
        self.ignore_any([pattern])
    }

    /// Swallows faults matching any of `patterns`, producing `T::default()`.
    pub fn ignore_any<I>(self, patterns: I) -> Self
    where
        I: IntoIterator,
        I::Item: IntoCodePattern,
        T: Default,
    {
        self.register(patterns, Action::Ignore(T::default))
    }

    /// Handles faults matching `pattern` with `action`.
    pub fn katch<P, H>(self, pattern: P, action: H) -> Self
    where
        P: IntoCodePattern,
        H: FnOnce(Fault) -> Result<T, Fault> + 'a,
    {
        self.katch_any([pattern], action)
    }

    /// Handles faults matching any of `patterns` with `action`.
    pub fn katch_any<I, H>(self, patterns: I, action: H) -> Self
    where
        I: IntoIterator,
        I::Item: IntoCodePattern,
        H: FnOnce(Fault) -> Result<T, Fault> + 'a,
    {
        self.register(patterns, Action::Katch(Box::new(action)))
    }

    /// Number of handlers registered so far.
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    fn register<I>(mut self, patterns: I, action: Action<'a, T>) -> Self
    where
        I: IntoIterator,
        I::Item: IntoCodePattern,
    {
        let compiled: Result<Vec<CodePattern>, Fault> = patterns
            .into_iter()
            .map(IntoCodePattern::into_code_pattern)
            .collect();

        let mut compiled = match compiled {
            Ok(compiled) => compiled.into_iter(),
            Err(fault) => {
                self.record_misuse(fault);
                return self;
            }
        };

        let Some(primary) = compiled.next() else {
            self.record_misuse(Fault::misuse(&codes::PATTERN_IS_MANDATORY, []));
            return self;
        };

        self.handlers.push(KatchHandler {
            primary,
            additional: compiled.collect(),
            action,
        });
        self
    }

    fn record_misuse(&mut self, fault: Fault) {
        warn!(code = %fault.code().code(), "rejected handler registration");
        self.misuse.get_or_insert(fault);
    }

    /// Runs the computation and, on failure, the first matching handler.
    ///
    /// # Errors
    ///
    /// Returns the naturalized fault if no handler matches, the handler's
    /// own fault if the matched handler fails, or the first registration
    /// misuse fault (in which case the computation is not run).
    pub fn finale(self) -> Result<T, Fault> {
        self.run(Finale::<fn()> { finalizer: None })
    }

    /// Like [`finale`](Self::finale), then runs `finalizer` exactly once on
    /// every exit path, including a panic in the computation or a handler.
    pub fn finale_with<Z>(self, finalizer: Z) -> Result<T, Fault>
    where
        Z: FnOnce(),
    {
        self.run(Finale {
            finalizer: Some(finalizer),
        })
    }

    fn run<Z: FnOnce()>(self, finale: Finale<Z>) -> Result<T, Fault> {
        // Dropped last, after any handler has returned.
        let _finale = finale;
        let Self {
            code_block,
            handlers,
            misuse,
            ..
        } = self;

        if let Some(fault) = misuse {
            warn!(code = %fault.code().code(), "skipping protected block after misuse");
            return Err(fault);
        }

        trace!(
            phase = Phase::Running.as_str(),
            handlers = handlers.len(),
            "running protected block"
        );
        let fault = match code_block() {
            Ok(value) => {
                trace!(phase = Phase::Completed.as_str(), "protected block completed");
                return Ok(value);
            }
            Err(err) => Fault::naturalize(err),
        };

        let code = fault.code().code().to_owned();
        for (index, handler) in handlers.into_iter().enumerate() {
            if handler.matches(&code) {
                debug!(
                    phase = Phase::Handled.as_str(),
                    code = %code,
                    handler = index,
                    ignored = handler.action.is_ignore(),
                    "fault matched handler"
                );
                return handler.action.invoke(fault);
            }
        }

        debug!(phase = Phase::Propagating.as_str(), code = %code, "no handler matched fault");
        Err(fault)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::FaultCode;
    use std::cell::{Cell, RefCell};

    fn app_code(code: &str) -> FaultCode {
        FaultCode::new(code, 1, "failed: {0}").unwrap()
    }

    fn failing(code: &FaultCode) -> impl FnOnce() -> Result<u32, Fault> + '_ {
        move || Err(Fault::raise(code, ["boom"]))
    }

    #[test]
    fn test_success_returns_value() {
        let result = CodeBlockWorker::wrap(|| Ok::<_, Fault>(7))
            .katch(".*", |_| Ok(0))
            .finale();
        assert_eq!(result.unwrap(), 7);
    }

    #[test]
    fn test_katch_receives_fault() {
        let code = app_code("app.x");
        let seen = RefCell::new(None);
        let result = CodeBlockWorker::wrap(failing(&code))
            .katch(&code, |fault| {
                *seen.borrow_mut() = Some(fault);
                Ok(1)
            })
            .finale();

        assert_eq!(result.unwrap(), 1);
        let fault = seen.into_inner().unwrap();
        assert_eq!(fault.message(), "app.x: failed: boom");
    }

    #[test]
    fn test_ignore_returns_default() {
        let code = app_code("app.y");
        let result = CodeBlockWorker::wrap(failing(&code)).ignore("app\\.y").finale();
        assert_eq!(result.unwrap(), 0);
    }

    #[test]
    fn test_ignore_additional_patterns() {
        let code = app_code("app.second");
        let result = CodeBlockWorker::wrap(failing(&code))
            .ignore_any(["app.first", "app.second"])
            .finale();
        assert_eq!(result.unwrap(), 0);
    }

    #[test]
    fn test_katch_additional_patterns() {
        let code = app_code("app.third");
        let result = CodeBlockWorker::wrap(failing(&code))
            .katch_any(["app.first", "app.second", "app.third"], |_| Ok(3))
            .finale();
        assert_eq!(result.unwrap(), 3);
    }

    #[test]
    fn test_first_registered_match_wins() {
        let code = app_code("AB");
        let result = CodeBlockWorker::wrap(failing(&code))
            .katch("A.*", |_| Ok(1))
            .katch("AB", |_| Ok(2))
            .finale();
        assert_eq!(result.unwrap(), 1);
    }

    #[test]
    fn test_ignore_before_overlapping_katch() {
        let code = app_code("app.z");
        let called = Cell::new(false);
        let result = CodeBlockWorker::wrap(failing(&code))
            .ignore("app\\..*")
            .katch(&code, |_| {
                called.set(true);
                Ok(9)
            })
            .finale();
        assert_eq!(result.unwrap(), 0);
        assert!(!called.get());
    }

    #[test]
    fn test_unmatched_fault_propagates() {
        let code = app_code("app.lost");
        let result = CodeBlockWorker::wrap(failing(&code))
            .katch("other\\..*", |_| Ok(1))
            .finale();
        let fault = result.unwrap_err();
        assert!(fault.is(&code));
        assert_eq!(fault.args(), ["boom"]);
    }

    #[test]
    fn test_invalid_pattern_skips_computation() {
        let ran = Cell::new(false);
        let finalized = Cell::new(0);
        let result = CodeBlockWorker::wrap(|| {
            ran.set(true);
            Ok::<u32, Fault>(1)
        })
        .katch("(", |_| Ok(2))
        .finale_with(|| finalized.set(finalized.get() + 1));

        assert!(result.unwrap_err().is(&codes::INVALID_CODE_PATTERN));
        assert!(!ran.get());
        assert_eq!(finalized.get(), 1);
    }

    #[test]
    fn test_empty_pattern_list_is_misuse() {
        let worker = CodeBlockWorker::wrap(|| Ok::<u32, Fault>(1))
            .katch_any(Vec::<&str>::new(), |_| Ok(2));
        assert_eq!(worker.handler_count(), 0);
        assert!(worker.finale().unwrap_err().is(&codes::PATTERN_IS_MANDATORY));
    }

    #[test]
    fn test_first_misuse_is_kept() {
        let result = CodeBlockWorker::wrap(|| Ok::<u32, Fault>(1))
            .ignore_any(Vec::<&str>::new())
            .katch("[", |_| Ok(2))
            .finale();
        assert!(result.unwrap_err().is(&codes::PATTERN_IS_MANDATORY));
    }

    #[test]
    fn test_phase_names() {
        assert_eq!(Phase::Running.as_str(), "running");
        assert_eq!(Phase::Finalized.as_str(), "finalized");
    }
}
