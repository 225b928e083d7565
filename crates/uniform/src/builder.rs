use http::Method;

use crate::Request;
use crate::data::{ChallengeResponse, Protocol, Reference};
use crate::error::{ReferenceError, RequestBuildError};
use crate::message::{EntitySize, Message, Representation};

/// A reference given either as a value or as a URI string parsed at build time.
#[derive(Debug)]
enum PendingRef {
    Reference(Reference),
    Uri(String),
}

impl PendingRef {
    fn resolve(self) -> Result<Reference, ReferenceError> {
        match self {
            PendingRef::Reference(reference) => Ok(reference),
            PendingRef::Uri(uri) => Reference::parse(&uri),
        }
    }
}

/// Step-by-step construction of a [`Request`].
///
/// URI strings are only parsed in [`build`](Self::build), which reports the
/// first malformed one.
#[derive(Debug, Default)]
pub struct RequestBuilder {
    method: Option<Method>,
    resource: Option<PendingRef>,
    host: Option<PendingRef>,
    referrer: Option<PendingRef>,
    root: Option<PendingRef>,
    entity: Option<Box<dyn Representation>>,
    protocol: Option<Protocol>,
    challenge_response: Option<ChallengeResponse>,
    proxy_challenge_response: Option<ChallengeResponse>,
    length: EntitySize,
    snapshot_original: bool,
}

impl RequestBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Defaults to `GET`.
    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Sets the target resource. Required.
    pub fn resource_ref(mut self, resource_ref: Reference) -> Self {
        self.resource = Some(PendingRef::Reference(resource_ref));
        self
    }

    /// Sets the target resource from a URI string, parsed in `build`.
    pub fn resource_uri(mut self, resource_uri: impl Into<String>) -> Self {
        self.resource = Some(PendingRef::Uri(resource_uri.into()));
        self
    }

    pub fn host_ref(mut self, host_ref: Reference) -> Self {
        self.host = Some(PendingRef::Reference(host_ref));
        self
    }

    /// Sets the host from a URI string, parsed in `build`.
    pub fn host_uri(mut self, host_uri: impl Into<String>) -> Self {
        self.host = Some(PendingRef::Uri(host_uri.into()));
        self
    }

    /// Sets the referrer. Any fragment is removed in `build`.
    pub fn referrer_ref(mut self, referrer_ref: Reference) -> Self {
        self.referrer = Some(PendingRef::Reference(referrer_ref));
        self
    }

    pub fn referrer_uri(mut self, referrer_uri: impl Into<String>) -> Self {
        self.referrer = Some(PendingRef::Uri(referrer_uri.into()));
        self
    }

    pub fn root_ref(mut self, root_ref: Reference) -> Self {
        self.root = Some(PendingRef::Reference(root_ref));
        self
    }

    /// Attaches an entity.
    pub fn entity(mut self, entity: impl Representation) -> Self {
        self.entity = Some(Box::new(entity));
        self
    }

    /// Sets the explicit protocol. Otherwise it is inferred from the resource scheme.
    pub fn protocol(mut self, protocol: Protocol) -> Self {
        self.protocol = Some(protocol);
        self
    }

    pub fn challenge_response(mut self, challenge_response: ChallengeResponse) -> Self {
        self.challenge_response = Some(challenge_response);
        self
    }

    pub fn proxy_challenge_response(mut self, challenge_response: ChallengeResponse) -> Self {
        self.proxy_challenge_response = Some(challenge_response);
        self
    }

    /// Sets the advisory length, [`EntitySize::Unknown`] by default.
    pub fn length(mut self, length: EntitySize) -> Self {
        self.length = length;
        self
    }

    /// Records a copy of the resource reference as the original reference.
    pub fn snapshot_original(mut self, snapshot: bool) -> Self {
        self.snapshot_original = snapshot;
        self
    }

    /// Builds the request, parsing any URI string given so far.
    ///
    /// Fails with [`RequestBuildError::MissingResource`] when no resource was
    /// set, or with the first reference that does not parse.
    pub fn build(self) -> Result<Request, RequestBuildError> {
        let resource_ref = self.resource.ok_or(RequestBuildError::MissingResource)?.resolve()?;
        let method = self.method.unwrap_or(Method::GET);

        let mut request = Request::from_message(method, Some(resource_ref), Message::new(self.entity));

        if self.snapshot_original {
            let original = request.resource_ref().cloned();
            request.set_original_ref(original);
        }
        request.set_host_ref(self.host.map(PendingRef::resolve).transpose()?);
        request.set_referrer_ref(self.referrer.map(PendingRef::resolve).transpose()?);
        request.set_root_ref(self.root.map(PendingRef::resolve).transpose()?);
        request.set_protocol(self.protocol);
        request.set_challenge_response(self.challenge_response);
        request.set_proxy_challenge_response(self.proxy_challenge_response);
        request.set_length(self.length);

        Ok(request)
    }
}
