//! The uniform request.
//!
//! A [`Request`] is produced by a connector, travels through a chain of
//! processing stages and is finally consumed by another connector. Nothing in
//! it depends on the wire protocol that carried it.
//!
//! # References
//!
//! A request carries several references:
//!
//! - the *resource reference*, the live routing cursor. Routers rewrite it
//!   (and its base) as they progressively resolve the target.
//! - the *original reference*, a snapshot of what the client asked for. It is
//!   never touched by routing.
//! - the *host*, *referrer* and *root* references. The referrer never carries
//!   a fragment: one present at assignment time is stripped.
//!
//! # Lazy sub-objects
//!
//! Client info, conditions, cookies and ranges are only allocated when first
//! read. Reads go through `&self` and are safe from any number of threads:
//! exactly one default instance is ever created and every reader gets that
//! same instance.

use std::fmt;
use std::sync::Arc;

use http::Method;
use parking_lot::{Mutex, RwLock};
use tracing::{debug, trace};

use crate::builder::RequestBuilder;
use crate::data::{ChallengeResponse, ClientInfo, Conditions, CookieSeries, Protocol, Range, Reference};
use crate::error::ReferenceError;
use crate::lazy::LazySlot;
use crate::message::{EntitySize, Message, Representation};
use crate::resolve;
use crate::response::{Committer, ResponseHead};

/// A sub-object shared between the request and the stages that touch it.
pub type Shared<T> = Arc<RwLock<T>>;

/// Generic request sent by client connectors and received by server connectors.
pub struct Request {
    message: Message,
    method: Method,
    resource_ref: Option<Reference>,
    original_ref: Option<Reference>,
    host_ref: Option<Reference>,
    referrer_ref: Option<Reference>,
    root_ref: Option<Reference>,
    protocol: Option<Protocol>,
    challenge_response: Option<ChallengeResponse>,
    proxy_challenge_response: Option<ChallengeResponse>,
    length: EntitySize,

    client_info: LazySlot<RwLock<ClientInfo>>,
    conditions: LazySlot<RwLock<Conditions>>,
    cookies: LazySlot<RwLock<CookieSeries>>,
    ranges: LazySlot<RwLock<Vec<Range>>>,
    init_lock: Mutex<()>,

    committer: Option<Arc<dyn Committer>>,
}

macro_rules! lazy_accessors {
    ($(#[$doc:meta])* $field:ident, $setter:ident, $peek:ident, $ty:ty) => {
        $(#[$doc])*
        ///
        /// A default instance is created on first read if none has been set.
        pub fn $field(&self) -> Shared<$ty> {
            self.$field.get_or_init(&self.init_lock, || {
                trace!(sub_object = stringify!($field), "materializing default");
                RwLock::new(<$ty>::default())
            })
        }

        /// Returns the current value without creating a default one.
        pub fn $peek(&self) -> Option<Shared<$ty>> {
            self.$field.get()
        }

        /// Replaces the value without going through materialization. `None`
        /// makes the next read create a fresh default.
        pub fn $setter(&mut self, value: Option<Shared<$ty>>) {
            self.$field.set(value);
        }
    };
}

impl Request {
    /// Creates a request without entity. Every other field starts unset.
    pub fn new(method: Method, resource_ref: Reference) -> Self {
        Self::from_message(method, Some(resource_ref), Message::default())
    }

    /// Creates a request carrying the given entity.
    pub fn with_entity<R>(method: Method, resource_ref: Reference, entity: R) -> Self
    where
        R: Representation,
    {
        Self::from_message(method, Some(resource_ref), Message::new(Some(Box::new(entity))))
    }

    /// Creates a request for a URI string, failing if the URI is malformed.
    pub fn parse(method: Method, resource_uri: &str) -> Result<Self, ReferenceError> {
        Ok(Self::new(method, Reference::parse(resource_uri)?))
    }

    /// Like [`parse`](Self::parse), with an entity attached.
    pub fn parse_with_entity<R>(method: Method, resource_uri: &str, entity: R) -> Result<Self, ReferenceError>
    where
        R: Representation,
    {
        Ok(Self::with_entity(method, Reference::parse(resource_uri)?, entity))
    }

    /// Starts building a request step by step.
    pub fn builder() -> RequestBuilder {
        RequestBuilder::new()
    }

    pub(crate) fn from_message(method: Method, resource_ref: Option<Reference>, message: Message) -> Self {
        Self {
            message,
            method,
            resource_ref,
            original_ref: None,
            host_ref: None,
            referrer_ref: None,
            root_ref: None,
            protocol: None,
            challenge_response: None,
            proxy_challenge_response: None,
            length: EntitySize::Unknown,
            client_info: LazySlot::empty(),
            conditions: LazySlot::empty(),
            cookies: LazySlot::empty(),
            ranges: LazySlot::empty(),
            init_lock: Mutex::new(()),
            committer: None,
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Overrides the method. Connectors set it once; test harnesses may change it.
    pub fn set_method(&mut self, method: Method) {
        self.method = method;
    }

    /// Returns the reference of the target resource.
    ///
    /// This is the reference routing works on; it may differ from
    /// [`original_ref`](Self::original_ref) once stages have rewritten it.
    pub fn resource_ref(&self) -> Option<&Reference> {
        self.resource_ref.as_ref()
    }

    /// Gives routing stages in-place access to the resource reference, e.g. to move its base.
    pub fn resource_ref_mut(&mut self) -> Option<&mut Reference> {
        self.resource_ref.as_mut()
    }

    /// Replaces the resource reference, base included. The original
    /// reference is left alone.
    pub fn set_resource_ref(&mut self, resource_ref: Option<Reference>) {
        self.resource_ref = resource_ref;
    }

    /// Sets the resource reference from a URI string.
    ///
    /// When a resource reference is already set, the new one keeps its base
    /// reference so that relative URIs stay relative to the current base.
    pub fn set_resource_uri(&mut self, resource_uri: &str) -> Result<(), ReferenceError> {
        let base_ref = self.resource_ref.as_ref().and_then(Reference::shared_base_ref);
        self.resource_ref = Some(Reference::with_base(base_ref, resource_uri)?);
        Ok(())
    }

    /// Returns the reference as originally requested by the client.
    pub fn original_ref(&self) -> Option<&Reference> {
        self.original_ref.as_ref()
    }

    /// Records what the client asked for. Connectors call this once.
    pub fn set_original_ref(&mut self, original_ref: Option<Reference>) {
        self.original_ref = original_ref;
    }

    /// Returns the host reference, which may differ from the resource reference's host.
    pub fn host_ref(&self) -> Option<&Reference> {
        self.host_ref.as_ref()
    }

    pub fn set_host_ref(&mut self, host_ref: Option<Reference>) {
        self.host_ref = host_ref;
    }

    /// Parses and sets the host reference.
    pub fn set_host_uri(&mut self, host_uri: &str) -> Result<(), ReferenceError> {
        self.set_host_ref(Some(Reference::parse(host_uri)?));
        Ok(())
    }

    /// Returns the referrer reference, never carrying a fragment.
    pub fn referrer_ref(&self) -> Option<&Reference> {
        self.referrer_ref.as_ref()
    }

    /// Sets the referrer reference, removing any fragment it carries.
    pub fn set_referrer_ref(&mut self, referrer_ref: Option<Reference>) {
        self.referrer_ref = referrer_ref.map(|mut referrer| {
            if let Some(fragment) = referrer.fragment() {
                debug!(referrer = %referrer, fragment, "stripping fragment from referrer");
                referrer.set_fragment(None);
            }
            referrer
        });
    }

    /// Parses and sets the referrer reference, removing any fragment.
    pub fn set_referrer_uri(&mut self, referrer_uri: &str) -> Result<(), ReferenceError> {
        self.set_referrer_ref(Some(Reference::parse(referrer_uri)?));
        Ok(())
    }

    /// Returns the application root reference.
    pub fn root_ref(&self) -> Option<&Reference> {
        self.root_ref.as_ref()
    }

    pub fn set_root_ref(&mut self, root_ref: Option<Reference>) {
        self.root_ref = root_ref;
    }

    /// Returns the protocol explicitly set on the request.
    ///
    /// Most callers want [`effective_protocol`](Self::effective_protocol) instead.
    pub fn protocol(&self) -> Option<&Protocol> {
        self.protocol.as_ref()
    }

    /// Sets the explicit protocol, which takes precedence over any scheme.
    pub fn set_protocol(&mut self, protocol: Option<Protocol>) {
        self.protocol = protocol;
    }

    /// Returns the protocol in use: the explicit one, else the one inferred
    /// from the resource reference's scheme, else from its base's scheme.
    pub fn effective_protocol(&self) -> Option<Protocol> {
        resolve::effective_protocol(self.protocol.as_ref(), self.resource_ref.as_ref())
    }

    /// Returns true if the effective protocol protects data in transit.
    pub fn is_confidential(&self) -> bool {
        self.effective_protocol().is_some_and(|protocol| protocol.is_confidential())
    }

    /// Credentials sent to the origin server (the `Authorization` header for HTTP).
    pub fn challenge_response(&self) -> Option<&ChallengeResponse> {
        self.challenge_response.as_ref()
    }

    pub fn set_challenge_response(&mut self, challenge_response: Option<ChallengeResponse>) {
        self.challenge_response = challenge_response;
    }

    /// Credentials sent to a proxy (the `Proxy-Authorization` header for HTTP).
    pub fn proxy_challenge_response(&self) -> Option<&ChallengeResponse> {
        self.proxy_challenge_response.as_ref()
    }

    pub fn set_proxy_challenge_response(&mut self, challenge_response: Option<ChallengeResponse>) {
        self.proxy_challenge_response = challenge_response;
    }

    /// Advisory content length, [`EntitySize::Unknown`] unless a connector set it.
    pub fn length(&self) -> EntitySize {
        self.length
    }

    /// Sets the advisory content length, typically from a `Content-Length` header.
    pub fn set_length(&mut self, length: EntitySize) {
        self.length = length;
    }

    lazy_accessors!(
        /// Returns the client-specific information.
        client_info, set_client_info, peek_client_info, ClientInfo
    );

    lazy_accessors!(
        /// Returns the conditions applying to this request.
        conditions, set_conditions, peek_conditions, Conditions
    );

    lazy_accessors!(
        /// Returns the cookies provided by the client.
        cookies, set_cookies, peek_cookies, CookieSeries
    );

    lazy_accessors!(
        /// Returns the byte ranges to return from the target resource's representation.
        ranges, set_ranges, peek_ranges, Vec<Range>
    );

    /// Returns the underlying message: entity and attributes.
    pub fn message(&self) -> &Message {
        &self.message
    }

    pub fn message_mut(&mut self) -> &mut Message {
        &mut self.message
    }

    /// Returns the attached entity, whatever the method.
    pub fn entity(&self) -> Option<&dyn Representation> {
        self.message.entity()
    }

    pub fn set_entity(&mut self, entity: Option<Box<dyn Representation>>) {
        self.message.set_entity(entity);
    }

    /// Detaches the entity, leaving the request without one.
    pub fn take_entity(&mut self) -> Option<Box<dyn Representation>> {
        self.message.take_entity()
    }

    /// Typed values stages attach to the request.
    pub fn attributes(&self) -> &http::Extensions {
        self.message.attributes()
    }

    pub fn attributes_mut(&mut self) -> &mut http::Extensions {
        self.message.attributes_mut()
    }

    /// Indicates if an entity is available and can be sent.
    ///
    /// Always false for `GET`, `HEAD` and `DELETE`, whatever is attached:
    /// those methods never carry a meaningful body.
    pub fn is_entity_available(&self) -> bool {
        if matches!(self.method, Method::GET | Method::HEAD | Method::DELETE) {
            return false;
        }

        self.message.is_entity_available()
    }

    /// Asks the server connector to commit the given response right away.
    ///
    /// A no-op unless the connector installed a [`Committer`].
    pub fn commit(&self, response: &ResponseHead) {
        match &self.committer {
            Some(committer) => {
                debug!(status = %response.status(), "committing response early");
                committer.commit(self, response);
            }
            None => trace!(status = %response.status(), "no committer installed, ignoring commit"),
        }
    }

    /// Installs the hook [`commit`](Self::commit) forwards to.
    pub fn set_committer(&mut self, committer: Option<Arc<dyn Committer>>) {
        self.committer = committer;
    }
}

impl Default for Request {
    fn default() -> Self {
        Self::from_message(Method::GET, None, Message::default())
    }
}

impl fmt::Debug for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Request")
            .field("method", &self.method)
            .field("resource_ref", &self.resource_ref)
            .field("original_ref", &self.original_ref)
            .field("host_ref", &self.host_ref)
            .field("referrer_ref", &self.referrer_ref)
            .field("root_ref", &self.root_ref)
            .field("protocol", &self.protocol)
            .field("challenge_response", &self.challenge_response)
            .field("proxy_challenge_response", &self.proxy_challenge_response)
            .field("length", &self.length)
            .field("client_info", &self.client_info)
            .field("conditions", &self.conditions)
            .field("cookies", &self.cookies)
            .field("ranges", &self.ranges)
            .field("message", &self.message)
            .field("committer", &self.committer.is_some())
            .finish()
    }
}
