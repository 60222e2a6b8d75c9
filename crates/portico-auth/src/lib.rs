//! # portico-auth
//!
//! Authorization for portico resolvers. An [`Operation`](gate::Operation) is
//! any async function of `(args, Arc<ctx>)`; [`with_guard`](gate::with_guard)
//! wraps one so that a [`Predicate`](gate::Predicate) over the context is
//! checked before it runs. Denials short-circuit with
//! [`PorticoError::Unauthorized`](portico_core::PorticoError::Unauthorized).
//!
//! ## Modules
//!
//! - [`context`] - Principals and the per-execution resolver context
//! - [`gate`] - Operations, predicates, and the guard wrapper
//! - [`resolvers`] - The `me` resolver and the query root

pub mod context;
pub mod gate;
pub mod resolvers;

pub use context::{HasPrincipal, Principal, ResolverContext};
pub use gate::{with_guard, And, Guarded, IsAuthenticated, Operation, Predicate, PredicateExt, ResolverFuture};
pub use resolvers::{me, signup_query_root, GraphQLError, MeResponse, QueryResponse, QueryRoot};
