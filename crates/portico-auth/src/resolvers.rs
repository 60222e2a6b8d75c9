//! Resolvers and the query root.
//!
//! [`QueryRoot`] maps query field names to type-erased operations and turns
//! each execution into a GraphQL-shaped response:
//!
//! ```json
//! { "data": { "me": null },
//!   "errors": [ { "message": "Not authenticated as user.",
//!                 "path": ["me"],
//!                 "extensions": { "code": "UNAUTHENTICATED" } } ] }
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use portico_core::logging::resolver_span;
use portico_core::{PorticoError, PorticoResult, ValidationError};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn, Instrument};

use crate::context::ResolverContext;
use crate::gate::{with_guard, IsAuthenticated, Operation, ResolverFuture};

/// The result of the `me` query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeResponse {
    /// The principal's e-mail address.
    pub email: String,
    /// The principal's user id.
    pub uid: String,
}

async fn resolve_me(_args: (), ctx: Arc<ResolverContext>) -> PorticoResult<MeResponse> {
    let principal = ctx.me.as_ref().ok_or(PorticoError::Unauthorized)?;
    Ok(MeResponse {
        email: principal.email.clone(),
        uid: principal.uid.clone(),
    })
}

/// The `me` resolver: the current principal, for authenticated callers only.
pub fn me() -> impl Operation<(), ResolverContext, MeResponse> + Clone {
    with_guard(IsAuthenticated, resolve_me)
}

/// The `extensions` member of a GraphQL error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorExtensions {
    /// Machine-readable error code, see [`PorticoError::code`].
    pub code: String,
}

/// One entry of a GraphQL `errors` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphQLError {
    /// Human-readable message.
    pub message: String,
    /// Path of the failing field.
    pub path: Vec<String>,
    /// Error code.
    pub extensions: ErrorExtensions,
}

impl GraphQLError {
    fn from_error(field: &str, err: &PorticoError) -> Self {
        let message = match err {
            PorticoError::Validation(inner) => inner.to_string(),
            other => other.to_string(),
        };
        Self {
            message,
            path: vec![field.to_string()],
            extensions: ErrorExtensions {
                code: err.code().to_string(),
            },
        }
    }
}

/// A GraphQL-shaped response for one executed field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    /// `{ field: value }`, with `null` for a failed field.
    pub data: Value,
    /// Errors raised while resolving, omitted when empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<GraphQLError>,
}

impl QueryResponse {
    fn ok(field: &str, value: Value) -> Self {
        let mut data = Map::new();
        data.insert(field.to_string(), value);
        Self {
            data: Value::Object(data),
            errors: Vec::new(),
        }
    }

    fn failed(field: &str, err: &PorticoError) -> Self {
        let mut response = Self::ok(field, Value::Null);
        response.errors.push(GraphQLError::from_error(field, err));
        response
    }

    /// Returns `true` if the field resolved without errors.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the value resolved for `field`.
    pub fn field(&self, field: &str) -> Option<&Value> {
        self.data.get(field)
    }
}

type ErasedResolver<Ctx> = Box<dyn Fn(Value, Arc<Ctx>) -> ResolverFuture<Value> + Send + Sync>;

/// Query field names mapped to resolvers.
pub struct QueryRoot<Ctx> {
    resolvers: BTreeMap<String, ErasedResolver<Ctx>>,
}

impl<Ctx> Default for QueryRoot<Ctx> {
    fn default() -> Self {
        Self {
            resolvers: BTreeMap::new(),
        }
    }
}

impl<Ctx> std::fmt::Debug for QueryRoot<Ctx> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryRoot")
            .field("fields", &self.resolvers.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl<Ctx: Send + Sync + 'static> QueryRoot<Ctx> {
    /// Creates an empty query root.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `operation` under `name`, replacing any previous resolver.
    ///
    /// Arguments are decoded from the JSON passed to [`execute`](Self::execute)
    /// (`null` for operations taking `()`), and results are encoded back to
    /// JSON.
    #[must_use]
    pub fn field<Args, T, O>(mut self, name: impl Into<String>, operation: O) -> Self
    where
        O: Operation<Args, Ctx, T> + 'static,
        Args: DeserializeOwned + Send + 'static,
        T: Serialize + Send + 'static,
    {
        let operation = Arc::new(operation);
        let resolver: ErasedResolver<Ctx> = Box::new(move |args: Value, ctx: Arc<Ctx>| -> ResolverFuture<Value> {
            Box::pin(run_erased(Arc::clone(&operation), args, ctx))
        });
        self.resolvers.insert(name.into(), resolver);
        self
    }

    /// Returns the registered field names in order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.resolvers.keys().map(String::as_str)
    }

    /// Resolves `field` with `args` against `ctx`.
    ///
    /// Never fails: resolver errors, denials, and unknown fields all come back
    /// as entries in the response's `errors` list.
    pub async fn execute(&self, field: &str, args: Value, ctx: Arc<Ctx>) -> QueryResponse {
        let Some(resolver) = self.resolvers.get(field) else {
            warn!(field, "query for unknown field");
            let err = PorticoError::Validation(ValidationError::new(
                format!("Cannot query field \"{field}\" on type \"Query\"."),
                "unknown_field",
            ));
            return QueryResponse::failed(field, &err);
        };

        match resolver(args, ctx).instrument(resolver_span(field)).await {
            Ok(value) => QueryResponse::ok(field, value),
            Err(err) => {
                debug!(field, code = err.code(), "resolver returned an error");
                QueryResponse::failed(field, &err)
            }
        }
    }
}

async fn run_erased<Args, Ctx, T, O>(operation: Arc<O>, args: Value, ctx: Arc<Ctx>) -> PorticoResult<Value>
where
    O: Operation<Args, Ctx, T>,
    Args: DeserializeOwned + Send,
    T: Serialize + Send,
    Ctx: Send + Sync,
{
    let args: Args = serde_json::from_value(args)
        .map_err(|e| PorticoError::Validation(ValidationError::new(e.to_string(), "invalid_arguments")))?;
    let value = operation.call(args, ctx).await?;
    serde_json::to_value(value).map_err(|e| PorticoError::Operation(e.to_string()))
}

/// The query root of the sign-up API.
pub fn signup_query_root() -> QueryRoot<ResolverContext> {
    QueryRoot::new().field("me", me())
}
