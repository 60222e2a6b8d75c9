//! Guarded operations.
//!
//! This module provides the [`Operation`] and [`Predicate`] traits and the
//! [`with_guard`] wrapper, the resolver-side counterpart of a
//! `login_required` view decorator:
//!
//! ```
//! use std::sync::Arc;
//! use portico_auth::{with_guard, IsAuthenticated, Operation, Predicate, ResolverContext};
//! use portico_core::PorticoError;
//!
//! let whoami = with_guard(IsAuthenticated, |(): (), ctx: Arc<ResolverContext>| async move {
//!     Ok::<_, PorticoError>(ctx.me.as_ref().map(|p| p.uid.clone()))
//! });
//! assert!(!whoami.predicate().allows(&ResolverContext::anonymous()));
//! ```
//!
//! Guards nest: `with_guard(a, with_guard(b, op))` checks `a`, then `b`, then
//! runs `op`. Guards hold no mutable state, so one predicate value can be
//! cloned across as many operations as needed.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use portico_core::{PorticoError, PorticoResult};
use tracing::debug;

use crate::context::HasPrincipal;

/// The future returned by an [`Operation`].
pub type ResolverFuture<T> = Pin<Box<dyn Future<Output = PorticoResult<T>> + Send>>;

/// An async resolver operation taking `Args` and a shared `Ctx`.
///
/// Every `Fn(Args, Arc<Ctx>) -> impl Future<Output = PorticoResult<T>>` is an
/// operation.
pub trait Operation<Args, Ctx, T>: Send + Sync {
    /// Runs the operation.
    fn call(&self, args: Args, ctx: Arc<Ctx>) -> ResolverFuture<T>;
}

impl<F, Fut, Args, Ctx, T> Operation<Args, Ctx, T> for F
where
    F: Fn(Args, Arc<Ctx>) -> Fut + Send + Sync,
    Fut: Future<Output = PorticoResult<T>> + Send + 'static,
{
    fn call(&self, args: Args, ctx: Arc<Ctx>) -> ResolverFuture<T> {
        Box::pin(self(args, ctx))
    }
}

/// A pure check over a resolver context.
///
/// Every `Fn(&Ctx) -> bool` is a predicate.
pub trait Predicate<Ctx>: Send + Sync {
    /// Returns `true` if the operation may run.
    fn allows(&self, ctx: &Ctx) -> bool;
}

impl<F, Ctx> Predicate<Ctx> for F
where
    F: Fn(&Ctx) -> bool + Send + Sync,
{
    fn allows(&self, ctx: &Ctx) -> bool {
        self(ctx)
    }
}

/// Combinators for [`Predicate`]s.
pub trait PredicateExt<Ctx>: Predicate<Ctx> + Sized {
    /// Passes only if both `self` and `other` pass. `other` is not evaluated
    /// when `self` fails.
    fn and<Q: Predicate<Ctx>>(self, other: Q) -> And<Self, Q> {
        And(self, other)
    }
}

impl<Ctx, P: Predicate<Ctx>> PredicateExt<Ctx> for P {}

/// Conjunction of two predicates. See [`PredicateExt::and`].
#[derive(Debug, Clone, Copy)]
pub struct And<A, B>(A, B);

impl<Ctx, A, B> Predicate<Ctx> for And<A, B>
where
    A: Predicate<Ctx>,
    B: Predicate<Ctx>,
{
    fn allows(&self, ctx: &Ctx) -> bool {
        self.0.allows(ctx) && self.1.allows(ctx)
    }
}

/// Passes iff the context carries an authenticated principal.
#[derive(Debug, Clone, Copy, Default)]
pub struct IsAuthenticated;

impl<Ctx: HasPrincipal> Predicate<Ctx> for IsAuthenticated {
    fn allows(&self, ctx: &Ctx) -> bool {
        ctx.principal().is_some()
    }
}

/// An operation wrapped by a predicate. See [`with_guard`].
#[derive(Debug, Clone)]
pub struct Guarded<P, O> {
    predicate: P,
    operation: O,
}

/// Wraps `operation` so that it only runs when `predicate` allows the
/// context.
///
/// A denied call resolves to [`PorticoError::Unauthorized`] without invoking
/// `operation`. An allowed call passes args and context through unchanged and
/// returns the operation's result or error unchanged.
pub const fn with_guard<P, O>(predicate: P, operation: O) -> Guarded<P, O> {
    Guarded {
        predicate,
        operation,
    }
}

impl<P, O> Guarded<P, O> {
    /// Returns the guard's predicate.
    pub const fn predicate(&self) -> &P {
        &self.predicate
    }
}

impl<P, O, Args, Ctx, T> Operation<Args, Ctx, T> for Guarded<P, O>
where
    P: Predicate<Ctx>,
    O: Operation<Args, Ctx, T>,
    T: Send + 'static,
{
    fn call(&self, args: Args, ctx: Arc<Ctx>) -> ResolverFuture<T> {
        if self.predicate.allows(&ctx) {
            self.operation.call(args, ctx)
        } else {
            debug!("guard denied operation");
            Box::pin(std::future::ready(Err(PorticoError::Unauthorized)))
        }
    }
}
