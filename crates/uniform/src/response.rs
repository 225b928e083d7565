//! Response-side types the request model needs to know about.
//!
//! The response itself is handled by connectors. The request only exposes a
//! hook that lets a server connector commit a response before the pipeline
//! has finished running.

use http::Response;

use crate::Request;

/// Type alias for HTTP response headers.
///
/// The body is attached later by the connector that writes the response.
pub type ResponseHead = Response<()>;

/// Installed by connectors that can send a response while the request is
/// still being processed.
#[cfg_attr(test, mockall::automock)]
pub trait Committer: Send + Sync {
    fn commit(&self, request: &Request, response: &ResponseHead);
}
