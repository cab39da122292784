//! `Outcome<T>`: exactly one of a success value or a structured [`Error`].
//!
//! Combinators never mutate: each one consumes an outcome and returns a new one.
//! Failures travel by value; the library itself never panics on the failure
//! path except in [`Outcome::expect_value`].
//!
//! Closures passed to `map`, `bind`, `tap` and friends are assumed total. If one
//! panics, the panic propagates to the caller untouched. Use [`Outcome::attempt`]
//! (or its async variants) at the boundary where a fallible operation should be
//! turned into a failure instead.

use std::future::Future;

use crate::error::Error;
use crate::kinds::InternalServerError;

/// Result of an operation that either produced a `T` or failed with an [`Error`].
///
/// Equality: two successes are equal when their values are; two failures are
/// equal when their errors share `(code, message)`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "this `Outcome` may be a failure, which should be handled"]
pub enum Outcome<T> {
    Success(T),
    Failure(Error),
}

/// An outcome that carries no success payload.
pub type VoidOutcome = Outcome<()>;

impl VoidOutcome {
    /// Successful completion with nothing to report.
    pub fn ok() -> Self {
        Outcome::Success(())
    }
}

impl<T> Outcome<T> {
    pub fn success(value: T) -> Self {
        Outcome::Success(value)
    }

    pub fn failure(error: Error) -> Self {
        Outcome::Failure(error)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Outcome::Success(value) => Some(value),
            Outcome::Failure(_) => None,
        }
    }

    pub fn error(&self) -> Option<&Error> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failure(error) => Some(error),
        }
    }

    pub fn as_ref(&self) -> Outcome<&T> {
        match self {
            Outcome::Success(value) => Outcome::Success(value),
            Outcome::Failure(error) => Outcome::Failure(error.clone()),
        }
    }

    /// Convert into a std `Result`, e.g. to use `?`.
    pub fn into_result(self) -> Result<T, Error> {
        match self {
            Outcome::Success(value) => Ok(value),
            Outcome::Failure(error) => Err(error),
        }
    }

    pub fn map<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Outcome::Success(value) => Outcome::Success(f(value)),
            Outcome::Failure(error) => Outcome::Failure(error),
        }
    }

    /// Chain an operation that may itself fail. `f` is not called on failure.
    pub fn bind<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> Outcome<U>,
    {
        match self {
            Outcome::Success(value) => f(value),
            Outcome::Failure(error) => Outcome::Failure(error),
        }
    }

    pub fn map_error<F>(self, f: F) -> Self
    where
        F: FnOnce(Error) -> Error,
    {
        match self {
            Outcome::Success(value) => Outcome::Success(value),
            Outcome::Failure(error) => Outcome::Failure(f(error)),
        }
    }

    /// Keep a success only if `predicate` holds; otherwise fail with `error`.
    /// A failure is returned unchanged and the predicate is not evaluated.
    pub fn filter<P>(self, predicate: P, error: Error) -> Self
    where
        P: FnOnce(&T) -> bool,
    {
        self.filter_with(predicate, |_| error)
    }

    /// Like [`filter`](Self::filter), but builds the error from the rejected value.
    pub fn filter_with<P, E>(self, predicate: P, error: E) -> Self
    where
        P: FnOnce(&T) -> bool,
        E: FnOnce(&T) -> Error,
    {
        match self {
            Outcome::Success(value) => {
                if predicate(&value) {
                    Outcome::Success(value)
                } else {
                    Outcome::Failure(error(&value))
                }
            }
            failure @ Outcome::Failure(_) => failure,
        }
    }

    /// Observe the success value without changing the outcome.
    pub fn tap<F>(self, f: F) -> Self
    where
        F: FnOnce(&T),
    {
        if let Outcome::Success(value) = &self {
            f(value);
        }
        self
    }

    /// Observe the error without changing the outcome.
    pub fn tap_error<F>(self, f: F) -> Self
    where
        F: FnOnce(&Error),
    {
        if let Outcome::Failure(error) = &self {
            f(error);
        }
        self
    }

    /// Collapse the outcome into a single value.
    pub fn fold<R, S, F>(self, on_success: S, on_failure: F) -> R
    where
        S: FnOnce(T) -> R,
        F: FnOnce(Error) -> R,
    {
        match self {
            Outcome::Success(value) => on_success(value),
            Outcome::Failure(error) => on_failure(error),
        }
    }

    /// Discard this value and continue with `next`.
    ///
    /// `next` is an already-evaluated argument: whatever produced it has run
    /// regardless of this outcome. Use [`then_with`](Self::then_with) to defer it.
    pub fn then<U>(self, next: Outcome<U>) -> Outcome<U> {
        match self {
            Outcome::Success(_) => next,
            Outcome::Failure(error) => Outcome::Failure(error),
        }
    }

    /// Discard this value and continue with `next()`, which only runs on success.
    pub fn then_with<U, F>(self, next: F) -> Outcome<U>
    where
        F: FnOnce() -> Outcome<U>,
    {
        match self {
            Outcome::Success(_) => next(),
            Outcome::Failure(error) => Outcome::Failure(error),
        }
    }

    /// Drop the success payload.
    pub fn discard(self) -> VoidOutcome {
        self.map(|_| ())
    }

    pub fn value_or(self, default: T) -> T {
        match self {
            Outcome::Success(value) => value,
            Outcome::Failure(_) => default,
        }
    }

    pub fn value_or_default(self) -> T
    where
        T: Default,
    {
        self.value_or_else(|_| T::default())
    }

    pub fn value_or_else<F>(self, f: F) -> T
    where
        F: FnOnce(Error) -> T,
    {
        match self {
            Outcome::Success(value) => value,
            Outcome::Failure(error) => f(error),
        }
    }

    /// Return the success value.
    ///
    /// # Panics
    ///
    /// Panics on failure with a message that includes the error's message.
    #[track_caller]
    pub fn expect_value(self) -> T {
        match self {
            Outcome::Success(value) => value,
            Outcome::Failure(error) => panic!(
                "called `Outcome::expect_value` on a failure: {} ({})",
                error.message(),
                error.code()
            ),
        }
    }

    /// Return the success value, or the caller's own error built from the failure.
    pub fn value_or_raise<E, F>(self, f: F) -> Result<T, E>
    where
        F: FnOnce(Error) -> E,
    {
        self.into_result().map_err(f)
    }

    /// Run a fallible operation, turning an `Err` into an internal-server failure.
    pub fn attempt<E, F>(operation: F) -> Self
    where
        F: FnOnce() -> Result<T, E>,
        E: Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
    {
        Self::attempt_with(operation, InternalServerError::from_exception)
    }

    /// Run a fallible operation, mapping an `Err` through `error_factory`.
    pub fn attempt_with<E, F, G>(operation: F, error_factory: G) -> Self
    where
        F: FnOnce() -> Result<T, E>,
        G: FnOnce(E) -> Error,
    {
        match operation() {
            Ok(value) => Outcome::Success(value),
            Err(err) => Outcome::Failure(converted(error_factory(err))),
        }
    }

    /// Await a fallible operation, turning an `Err` into an internal-server failure.
    pub async fn attempt_async<E, Fut>(operation: Fut) -> Self
    where
        Fut: Future<Output = Result<T, E>>,
        E: Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
    {
        Self::attempt_async_with(operation, InternalServerError::from_exception).await
    }

    /// Await a fallible operation, mapping an `Err` through `error_factory`.
    pub async fn attempt_async_with<E, Fut, G>(operation: Fut, error_factory: G) -> Self
    where
        Fut: Future<Output = Result<T, E>>,
        G: FnOnce(E) -> Error,
    {
        match operation.await {
            Ok(value) => Outcome::Success(value),
            Err(err) => Outcome::Failure(converted(error_factory(err))),
        }
    }

    /// Collect successes in order, or return the first failure.
    ///
    /// Iteration stops at the first failure; later outcomes are not inspected
    /// and their errors are not accumulated.
    pub fn combine<I>(outcomes: I) -> Outcome<Vec<T>>
    where
        I: IntoIterator<Item = Outcome<T>>,
    {
        outcomes.into_iter().collect()
    }
}

fn converted(error: Error) -> Error {
    tracing::debug!(
        code = %error.code(),
        kind = %error.kind(),
        "operation failed; converted to outcome"
    );
    error
}

impl<T, C> FromIterator<Outcome<T>> for Outcome<C>
where
    C: FromIterator<T>,
{
    fn from_iter<I: IntoIterator<Item = Outcome<T>>>(iter: I) -> Self {
        iter.into_iter()
            .map(Outcome::into_result)
            .collect::<Result<C, Error>>()
            .into()
    }
}

impl<T> From<Error> for Outcome<T> {
    fn from(error: Error) -> Self {
        Outcome::Failure(error)
    }
}

impl<T, E> From<Result<T, E>> for Outcome<T>
where
    E: Into<Error>,
{
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Outcome::Success(value),
            Err(error) => Outcome::Failure(error.into()),
        }
    }
}

impl<T> From<Outcome<T>> for Result<T, Error> {
    fn from(outcome: Outcome<T>) -> Self {
        outcome.into_result()
    }
}
