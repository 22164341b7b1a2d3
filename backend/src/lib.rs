//! Backend library modules.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
/// Tracing middleware attaching a request-scoped trace identifier.
pub use middleware::trace::Trace;
