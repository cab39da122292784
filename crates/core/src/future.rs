//! Combinators over pending outcomes.
//!
//! [`OutcomeFutureExt`] lifts the [`Outcome`] algebra over any future that
//! resolves to an outcome. Every combinator awaits the underlying future to
//! completion first, then applies its transformation at most once. Nothing
//! here adds retries, timeouts or cancellation semantics: dropping the
//! returned future drops the underlying one.
//!
//! `*_async` methods take a synchronous transformation; `*_await` methods take
//! one that returns a future. Both short-circuit on failure exactly like their
//! synchronous counterparts.

use std::future::Future;

use crate::error::Error;
use crate::outcome::{Outcome, VoidOutcome};

pub trait OutcomeFutureExt<T>: Future<Output = Outcome<T>> + Sized {
    fn map_async<U, F>(self, f: F) -> impl Future<Output = Outcome<U>>
    where
        F: FnOnce(T) -> U,
    {
        async move { self.await.map(f) }
    }

    fn map_await<U, F, Fut>(self, f: F) -> impl Future<Output = Outcome<U>>
    where
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = U>,
    {
        async move {
            match self.await {
                Outcome::Success(value) => Outcome::Success(f(value).await),
                Outcome::Failure(error) => Outcome::Failure(error),
            }
        }
    }

    fn bind_async<U, F>(self, f: F) -> impl Future<Output = Outcome<U>>
    where
        F: FnOnce(T) -> Outcome<U>,
    {
        async move { self.await.bind(f) }
    }

    fn bind_await<U, F, Fut>(self, f: F) -> impl Future<Output = Outcome<U>>
    where
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = Outcome<U>>,
    {
        async move {
            match self.await {
                Outcome::Success(value) => f(value).await,
                Outcome::Failure(error) => Outcome::Failure(error),
            }
        }
    }

    fn map_error_async<F>(self, f: F) -> impl Future<Output = Outcome<T>>
    where
        F: FnOnce(Error) -> Error,
    {
        async move { self.await.map_error(f) }
    }

    fn filter_async<P>(self, predicate: P, error: Error) -> impl Future<Output = Outcome<T>>
    where
        P: FnOnce(&T) -> bool,
    {
        async move { self.await.filter(predicate, error) }
    }

    fn tap_async<F>(self, f: F) -> impl Future<Output = Outcome<T>>
    where
        F: FnOnce(&T),
    {
        async move { self.await.tap(f) }
    }

    /// Run an async side effect on success; the outcome passes through unchanged.
    fn tap_await<F, Fut>(self, f: F) -> impl Future<Output = Outcome<T>>
    where
        F: FnOnce(&T) -> Fut,
        Fut: Future<Output = ()>,
    {
        async move {
            let outcome = self.await;
            if let Outcome::Success(value) = &outcome {
                f(value).await;
            }
            outcome
        }
    }

    fn tap_error_async<F>(self, f: F) -> impl Future<Output = Outcome<T>>
    where
        F: FnOnce(&Error),
    {
        async move { self.await.tap_error(f) }
    }

    fn fold_async<R, S, F>(self, on_success: S, on_failure: F) -> impl Future<Output = R>
    where
        S: FnOnce(T) -> R,
        F: FnOnce(Error) -> R,
    {
        async move { self.await.fold(on_success, on_failure) }
    }

    /// Continue with `next()` only once this outcome has resolved to a success.
    fn then_await<U, F, Fut>(self, next: F) -> impl Future<Output = Outcome<U>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Outcome<U>>,
    {
        async move {
            match self.await {
                Outcome::Success(_) => next().await,
                Outcome::Failure(error) => Outcome::Failure(error),
            }
        }
    }

    fn discard_async(self) -> impl Future<Output = VoidOutcome> {
        async move { self.await.discard() }
    }

    fn value_or_async(self, default: T) -> impl Future<Output = T> {
        async move { self.await.value_or(default) }
    }

    fn value_or_else_async<F>(self, f: F) -> impl Future<Output = T>
    where
        F: FnOnce(Error) -> T,
    {
        async move { self.await.value_or_else(f) }
    }
}

impl<T, Fut> OutcomeFutureExt<T> for Fut where Fut: Future<Output = Outcome<T>> {}
