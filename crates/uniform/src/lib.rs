//! A protocol-independent request model
//!
//! This crate provides the uniform request that server connectors produce,
//! processing stages (filters, routers, resources) inspect and rewrite, and
//! client connectors finally consume. Nothing in it depends on the wire
//! protocol that carried the request.
//!
//! # Features
//!
//! - Absolute and relative URI references, with base resolution
//! - Separate routing and original references
//! - Lazily created client info, conditions, cookies and ranges, safe to
//!   materialize from many threads at once
//! - Effective protocol and confidentiality resolution
//! - Entity availability rules per method
//! - Conversion from `http::Request`
//!
//! # Example
//!
//! ```
//! use http::Method;
//! use micro_uniform::Request;
//! use micro_uniform::data::Protocol;
//!
//! let request = Request::builder()
//!     .method(Method::POST)
//!     .resource_uri("https://example.com/orders")
//!     .build()?;
//!
//! assert!(request.is_confidential());
//! assert_eq!(request.effective_protocol(), Some(Protocol::HTTPS));
//!
//! // sub-objects are created on first read
//! assert!(request.peek_client_info().is_none());
//! assert!(request.client_info().read().agent.is_none());
//! assert!(request.peek_client_info().is_some());
//! # Ok::<(), micro_uniform::RequestBuildError>(())
//! ```
//!
//! # Modules
//!
//! - [`data`]: references, protocols, credentials and the other request metadata
//! - [`message`]: the message and its entity representation
//! - [`resolve`]: effective protocol resolution
//! - [`current`]: the request bound to the running task
//! - [`connector`]: conversion from `http` crate requests

pub mod connector;
pub mod current;
pub mod data;
pub mod message;
pub mod resolve;

mod builder;
mod error;
mod lazy;
mod request;
mod response;

pub use builder::RequestBuilder;
pub use error::{ConnectorError, ReferenceError, RequestBuildError};
pub use request::{Request, Shared};
pub use response::{Committer, ResponseHead};

mod utils;
pub(crate) use utils::ensure;
