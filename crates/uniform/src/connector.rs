//! Bridge from `http` crate requests to uniform requests.
//!
//! Server connectors that already decoded a request head into
//! [`http::request::Parts`] hand it over together with the protocol they speak
//! and the request body. The peer address is read from the parts' extensions
//! when the connector stored a [`SocketAddr`] there.

use std::net::SocketAddr;
use std::sync::Arc;

use http::header::{ACCEPT, CONTENT_LENGTH, CONTENT_TYPE, HOST, REFERER, USER_AGENT};
use http::request::Parts;
use http::{HeaderMap, HeaderName};
use http_body::Body;
use mime::Mime;
use parking_lot::RwLock;
use tracing::debug;

use crate::data::{ClientInfo, Preference, Protocol, Reference};
use crate::error::ConnectorError;
use crate::message::{BodyRepresentation, EntitySize, Message};
use crate::{Request, ensure};

static X_FORWARDED_FOR: HeaderName = HeaderName::from_static("x-forwarded-for");

/// Converts a full [`http::Request`] into a [`Request`].
pub fn from_http<B>(request: http::Request<B>, protocol: &Protocol) -> Result<Request, ConnectorError>
where
    B: Body + Send + 'static,
{
    let (parts, body) = request.into_parts();
    from_parts(parts, protocol, body)
}

/// Converts a decoded request head and its body into a [`Request`].
pub fn from_parts<B>(parts: Parts, protocol: &Protocol, body: B) -> Result<Request, ConnectorError>
where
    B: Body + Send + 'static,
{
    let host_ref = Arc::new(host_reference(&parts, protocol)?);

    let target = parts.uri.path_and_query().map_or("/", |pq| pq.as_str());
    let mut resource_ref = if parts.uri.scheme().is_some() || !target.starts_with('/') {
        Reference::parse_escaped(&parts.uri.to_string())?
    } else {
        Reference::parse_escaped(&format!("{host_ref}{target}"))?
    };
    resource_ref.set_base_ref(Some(Arc::clone(&host_ref)));

    let mut representation = BodyRepresentation::new(body);
    if let Some(media_type) = header_str(&parts.headers, &CONTENT_TYPE).and_then(|value| value.parse::<Mime>().ok()) {
        representation = representation.with_media_type(media_type);
    }

    let message = Message::new(Some(Box::new(representation)));
    let mut request = Request::from_message(parts.method, Some(resource_ref), message);
    request.set_original_ref(request.resource_ref().cloned());
    request.set_host_ref(Some(Arc::unwrap_or_clone(host_ref)));
    request.set_protocol(Some(protocol.clone()));

    if let Some(referer) = header_str(&parts.headers, &REFERER) {
        match Reference::parse(referer) {
            Ok(referrer_ref) => request.set_referrer_ref(Some(referrer_ref)),
            Err(e) => debug!(cause = %e, referer, "skipping malformed referer header"),
        }
    }

    if let Some(length) = header_str(&parts.headers, &CONTENT_LENGTH).and_then(|value| value.parse::<u64>().ok()) {
        request.set_length(EntitySize::Known(length));
    }

    let client_info = client_info(&parts.headers, parts.extensions.get::<SocketAddr>());
    if client_info != ClientInfo::default() {
        request.set_client_info(Some(Arc::new(RwLock::new(client_info))));
    }

    Ok(request)
}

fn host_reference(parts: &Parts, protocol: &Protocol) -> Result<Reference, ConnectorError> {
    let (scheme, authority) = match (parts.uri.scheme_str(), parts.uri.authority()) {
        (Some(scheme), Some(authority)) => (scheme, authority.as_str()),
        _ => {
            let host = parts.headers.get(HOST).ok_or(ConnectorError::MissingHost)?;
            let host = host.to_str().map_err(ConnectorError::invalid_host)?;
            ensure!(!host.is_empty(), ConnectorError::MissingHost);
            ensure!(!host.contains(['/', '?', '#', '@']), ConnectorError::invalid_host(host));
            (protocol.scheme(), host)
        }
    };

    Ok(Reference::parse(&format!("{}://{authority}", scheme.to_ascii_lowercase()))?)
}

fn client_info(headers: &HeaderMap, peer: Option<&SocketAddr>) -> ClientInfo {
    let mut info = ClientInfo::new();

    if let Some(peer) = peer {
        info.addresses.push(peer.ip().to_string());
        info.port = Some(peer.port());
    }
    for forwarded in headers.get_all(&X_FORWARDED_FOR).iter().filter_map(|value| value.to_str().ok()) {
        info.addresses.extend(forwarded.split(',').map(str::trim).filter(|a| !a.is_empty()).map(str::to_string));
    }

    info.agent = header_str(headers, &USER_AGENT).map(str::to_string);

    for accept in headers.get_all(ACCEPT).iter().filter_map(|value| value.to_str().ok()) {
        let entries = accept.split(',').map(str::trim).filter(|entry| !entry.is_empty());
        info.accepted_media_types.extend(entries.filter_map(media_preference));
    }

    info
}

/// Parses one `Accept` entry; the `q` parameter becomes the quality and is
/// removed from the media type, other parameters are kept.
fn media_preference(entry: &str) -> Option<Preference<Mime>> {
    let media_type = match entry.parse::<Mime>() {
        Ok(media_type) => media_type,
        Err(e) => {
            debug!(cause = %e, entry, "skipping malformed accept entry");
            return None;
        }
    };

    let Some(quality) = media_type.get_param("q") else {
        return Some(Preference::new(media_type));
    };
    let Ok(quality) = quality.as_str().parse::<f32>() else {
        debug!(entry, "skipping accept entry with malformed quality");
        return None;
    };

    let without_quality = media_type
        .params()
        .filter(|(name, _)| *name != "q")
        .fold(media_type.essence_str().to_string(), |acc, (name, value)| format!("{acc}; {name}={value}"));
    let media_type = without_quality.parse::<Mime>().unwrap_or(media_type);
    Some(Preference::with_quality(media_type, quality))
}

fn header_str<'a>(headers: &'a HeaderMap, name: &HeaderName) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}
