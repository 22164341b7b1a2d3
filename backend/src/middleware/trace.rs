//! Tracing middleware attaching a request-scoped trace identifier.
//!
//! Each incoming request receives a UUID `trace_id` stored in task-local
//! storage for correlation across logs and error responses.
//!
//! Tokio task-local variables are not inherited across spawned tasks. Use
//! [`TraceId::scope`] when spawning new tasks or moving work onto blocking
//! threads so the active trace identifier propagates correctly.

use std::task::{Context, Poll};

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::future::Future;
use tokio::task_local;
use tracing::error;
use uuid::Uuid;

task_local! {
    static TRACE_ID: TraceId;
}

/// Response header carrying the request trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";

/// Per-request trace identifier exposed via task-local storage.
///
/// # Examples
/// ```
/// use backend::middleware::trace::TraceId;
///
/// async fn handler() {
///     if let Some(id) = TraceId::current() {
///         tracing::info!(trace_id = %id, "handling request");
///     }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceId(Uuid);

impl TraceId {
    fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the current trace identifier if one is in scope.
    pub fn current() -> Option<Self> {
        TRACE_ID.try_with(|id| *id).ok()
    }

    /// Execute the provided future with the supplied trace identifier in scope.
    ///
    /// # Examples
    /// ```
    /// use backend::middleware::trace::TraceId;
    ///
    /// # tokio::runtime::Runtime::new().unwrap().block_on(async {
    /// let trace_id: TraceId = "00000000-0000-0000-0000-000000000000"
    ///     .parse()
    ///     .expect("valid UUID");
    /// let observed = TraceId::scope(trace_id, async move { TraceId::current() }).await;
    /// assert_eq!(observed, Some(trace_id));
    /// # });
    /// ```
    pub async fn scope<Fut>(trace_id: TraceId, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        TRACE_ID.scope(trace_id, fut).await
    }
}

impl std::fmt::Display for TraceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Tracing middleware attaching a request-scoped UUID and
/// adding a `trace-id` header to every response.
///
/// Handlers can read the trace id via [`TraceId::current`].
///
/// # Examples
/// ```
/// use actix_web::App;
/// use backend::Trace;
///
/// let app = App::new().wrap(Trace);
/// ```
#[derive(Clone)]
pub struct Trace;

impl<S, B> Transform<S, ServiceRequest> for Trace
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TraceMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TraceMiddleware { service }))
    }
}

/// Service wrapper produced by [`Trace`].
///
/// Applications should not use this type directly.
pub struct TraceMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for TraceMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let trace_id = TraceId::generate();
        let header_value = trace_id.to_string();
        let fut = self.service.call(req);
        Box::pin(TraceId::scope(trace_id, async move {
            let mut res = fut.await?;
            match HeaderValue::from_str(&header_value) {
                Ok(value) => {
                    res.response_mut()
                        .headers_mut()
                        .insert(HeaderName::from_static(TRACE_ID_HEADER), value);
                }
                Err(error) => {
                    error!(
                        %error,
                        trace_id = %trace_id,
                        "failed to encode trace identifier header"
                    );
                }
            }
            Ok(res)
        }))
    }
}
