//! Hierarchical URI references.
//!
//! A [`Reference`] keeps the five RFC 3986 components of a URI (scheme,
//! authority, path, query and fragment) as separate values so that routing
//! stages can inspect and rewrite them cheaply. A reference may also carry a
//! base reference, used to resolve it when it is relative and to compute the
//! part that still has to be routed.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use url::Url;

use crate::data::Protocol;
use crate::ensure;
use crate::error::ReferenceError;

/// Characters [`Reference::parse`] refuses, escaped by [`Reference::parse_escaped`].
const ILLEGAL: &AsciiSet =
    &CONTROLS.add(b' ').add(b'<').add(b'>').add(b'"').add(b'{').add(b'}').add(b'|').add(b'\\').add(b'^').add(b'`');

/// A URI reference with an optional base reference.
///
/// Equality and the [`Display`](fmt::Display) form only consider the
/// reference's own components, never the base.
#[derive(Clone, Default)]
pub struct Reference {
    scheme: Option<String>,
    authority: Option<String>,
    path: String,
    query: Option<String>,
    fragment: Option<String>,
    base_ref: Option<Arc<Reference>>,
}

impl Reference {
    /// Parses a URI string into a reference without base.
    pub fn parse(uri: &str) -> Result<Self, ReferenceError> {
        if let Some((position, character)) = uri.char_indices().find(|(_, c)| is_illegal(*c)) {
            return Err(ReferenceError::invalid_character(position, character));
        }

        let mut rest = uri;

        let fragment = match rest.split_once('#') {
            Some((before, fragment)) => {
                rest = before;
                Some(fragment.to_string())
            }
            None => None,
        };

        let query = match rest.split_once('?') {
            Some((before, query)) => {
                rest = before;
                Some(query.to_string())
            }
            None => None,
        };

        let scheme = match rest.find(':') {
            Some(index) if !rest[..index].contains('/') && index > 0 => {
                let scheme = &rest[..index];
                ensure!(is_valid_scheme(scheme), ReferenceError::invalid_scheme(scheme));
                rest = &rest[index + 1..];
                Some(scheme.to_string())
            }
            _ => None,
        };

        let authority = match rest.strip_prefix("//") {
            Some(after) => {
                let end = after.find('/').unwrap_or(after.len());
                let authority = &after[..end];
                rest = &after[end..];
                Some(authority.to_string())
            }
            None => None,
        };

        if let Some(authority) = &authority {
            if let Some(port) = split_authority(authority).1 {
                ensure!(port.bytes().all(|b| b.is_ascii_digit()), ReferenceError::invalid_port(port));
                ensure!(port.is_empty() || port.parse::<u16>().is_ok(), ReferenceError::invalid_port(port));
            }
        }

        Ok(Self { scheme, authority, path: rest.to_string(), query, fragment, base_ref: None })
    }

    /// Parses a URI string after percent-encoding the characters [`parse`](Self::parse)
    /// would refuse.
    ///
    /// Meant for URIs another layer already accepted, such as a decoded HTTP
    /// request target. Existing `%` escapes are kept as they are.
    pub fn parse_escaped(uri: &str) -> Result<Self, ReferenceError> {
        Self::parse(&utf8_percent_encode(uri, ILLEGAL).to_string())
    }

    /// Parses a URI string and attaches the given base reference.
    pub fn with_base(base_ref: Option<Arc<Reference>>, uri: &str) -> Result<Self, ReferenceError> {
        let mut reference = Self::parse(uri)?;
        reference.base_ref = base_ref;
        Ok(reference)
    }

    pub fn scheme(&self) -> Option<&str> {
        self.scheme.as_deref()
    }

    /// Returns the protocol registered for this reference's scheme, if any.
    pub fn scheme_protocol(&self) -> Option<Protocol> {
        self.scheme().and_then(Protocol::from_scheme)
    }

    pub fn authority(&self) -> Option<&str> {
        self.authority.as_deref()
    }

    /// Returns the host part of the authority, without user info, port or IPv6 brackets.
    pub fn host_domain(&self) -> Option<&str> {
        let (host, _) = split_authority(self.authority.as_deref()?);
        let host = host.strip_prefix('[').and_then(|h| h.strip_suffix(']')).unwrap_or(host);
        Some(host)
    }

    /// Returns the explicit port of the authority, if any.
    pub fn host_port(&self) -> Option<u16> {
        let (_, port) = split_authority(self.authority.as_deref()?);
        port.and_then(|port| port.parse().ok())
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    pub fn has_fragment(&self) -> bool {
        self.fragment.is_some()
    }

    pub fn set_fragment(&mut self, fragment: Option<String>) {
        self.fragment = fragment;
    }

    pub fn base_ref(&self) -> Option<&Reference> {
        self.base_ref.as_deref()
    }

    /// Returns the base reference as a shared handle, without copying it.
    pub fn shared_base_ref(&self) -> Option<Arc<Reference>> {
        self.base_ref.clone()
    }

    pub fn set_base_ref(&mut self, base_ref: Option<Arc<Reference>>) {
        self.base_ref = base_ref;
    }

    #[must_use]
    pub fn with_base_ref(mut self, base_ref: Reference) -> Self {
        self.base_ref = Some(Arc::new(base_ref));
        self
    }

    /// A reference is absolute when it has a scheme.
    pub fn is_absolute(&self) -> bool {
        self.scheme.is_some()
    }

    pub fn is_relative(&self) -> bool {
        !self.is_absolute()
    }

    /// Resolves this reference against its base reference.
    ///
    /// An absolute reference resolves to itself. A relative reference without
    /// a base, or whose base cannot be made absolute, is returned unchanged.
    /// The resolved reference carries no base.
    pub fn target_ref(&self) -> Result<Reference, ReferenceError> {
        if self.is_absolute() {
            return Ok(self.without_base());
        }

        let Some(base) = self.base_ref.as_deref() else {
            return Ok(self.clone());
        };

        let base = base.target_ref()?;
        if base.is_relative() {
            return Ok(self.clone());
        }

        let joined = Url::parse(&base.to_string())?.join(&self.to_string())?;
        Reference::parse(joined.as_str())
    }

    /// Returns the part of the target reference that follows the base
    /// reference, or `None` when this reference is not under its base.
    pub fn remaining_part(&self) -> Result<Option<String>, ReferenceError> {
        let Some(base) = self.base_ref.as_deref() else {
            return Ok(None);
        };

        let target = self.target_ref()?.to_string();
        let base = base.target_ref()?.to_string();
        Ok(target.strip_prefix(&base).map(str::to_string))
    }

    fn without_base(&self) -> Reference {
        Reference { base_ref: None, ..self.clone() }
    }
}

/// Splits an authority into host and port, dropping any user info.
fn split_authority(authority: &str) -> (&str, Option<&str>) {
    let host_port = authority.rsplit_once('@').map_or(authority, |(_, hp)| hp);

    // IPv6 literals carry colons inside the brackets
    let search_from = host_port.find(']').unwrap_or(0);
    match host_port[search_from..].find(':') {
        Some(index) => {
            let index = search_from + index;
            (&host_port[..index], Some(&host_port[index + 1..]))
        }
        None => (host_port, None),
    }
}

fn is_valid_scheme(scheme: &str) -> bool {
    let mut bytes = scheme.bytes();
    bytes.next().is_some_and(|b| b.is_ascii_alphabetic())
        && bytes.all(|b| b.is_ascii_alphanumeric() || matches!(b, b'+' | b'-' | b'.'))
}

fn is_illegal(c: char) -> bool {
    c.is_control() || matches!(c, ' ' | '<' | '>' | '"' | '{' | '}' | '|' | '\\' | '^' | '`')
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(scheme) = &self.scheme {
            write!(f, "{scheme}:")?;
        }
        if let Some(authority) = &self.authority {
            write!(f, "//{authority}")?;
        }
        f.write_str(&self.path)?;
        if let Some(query) = &self.query {
            write!(f, "?{query}")?;
        }
        if let Some(fragment) = &self.fragment {
            write!(f, "#{fragment}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("Reference");
        debug.field("uri", &self.to_string());
        if let Some(base) = &self.base_ref {
            debug.field("base", &base.to_string());
        }
        debug.finish()
    }
}

impl PartialEq for Reference {
    fn eq(&self, other: &Self) -> bool {
        self.scheme == other.scheme
            && self.authority == other.authority
            && self.path == other.path
            && self.query == other.query
            && self.fragment == other.fragment
    }
}

impl Eq for Reference {}

impl FromStr for Reference {
    type Err = ReferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Reference::parse(s)
    }
}

impl TryFrom<&str> for Reference {
    type Error = ReferenceError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Reference::parse(value)
    }
}

impl TryFrom<&http::Uri> for Reference {
    type Error = ReferenceError;

    fn try_from(uri: &http::Uri) -> Result<Self, Self::Error> {
        Reference::parse(&uri.to_string())
    }
}

impl Serialize for Reference {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Reference {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let uri = String::deserialize(deserializer)?;
        Reference::parse(&uri).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_reference() {
        let reference = Reference::parse("https://user@example.com:8443/a/b?x=1&y=2#top").unwrap();

        assert_eq!(reference.scheme(), Some("https"));
        assert_eq!(reference.authority(), Some("user@example.com:8443"));
        assert_eq!(reference.host_domain(), Some("example.com"));
        assert_eq!(reference.host_port(), Some(8443));
        assert_eq!(reference.path(), "/a/b");
        assert_eq!(reference.query(), Some("x=1&y=2"));
        assert_eq!(reference.fragment(), Some("top"));
        assert!(reference.is_absolute());
        assert_eq!(reference.to_string(), "https://user@example.com:8443/a/b?x=1&y=2#top");
    }

    #[test]
    fn parse_relative_reference() {
        let reference = Reference::parse("/x").unwrap();

        assert_eq!(reference.scheme(), None);
        assert_eq!(reference.authority(), None);
        assert_eq!(reference.path(), "/x");
        assert!(reference.is_relative());
        assert_eq!(reference.to_string(), "/x");
    }

    #[test]
    fn parse_ipv6_authority() {
        let reference = Reference::parse("http://[::1]:8080/").unwrap();

        assert_eq!(reference.host_domain(), Some("::1"));
        assert_eq!(reference.host_port(), Some(8080));
    }

    #[test]
    fn parse_urn_without_authority() {
        let reference = Reference::parse("urn:isbn:0451450523").unwrap();

        assert_eq!(reference.scheme(), Some("urn"));
        assert_eq!(reference.authority(), None);
        assert_eq!(reference.path(), "isbn:0451450523");
        assert_eq!(reference.scheme_protocol(), None);
    }

    #[test]
    fn colon_after_slash_is_not_a_scheme() {
        let reference = Reference::parse("./a:b").unwrap();

        assert_eq!(reference.scheme(), None);
        assert_eq!(reference.path(), "./a:b");
    }

    #[test]
    fn illegal_characters_are_rejected() {
        assert_eq!(
            Reference::parse("http://example.com/a b"),
            Err(ReferenceError::invalid_character(20, ' '))
        );
        assert!(matches!(Reference::parse("/a<b"), Err(ReferenceError::InvalidCharacter { character: '<', .. })));
    }

    #[test]
    fn escaped_parse_encodes_illegal_characters() {
        let reference = Reference::parse_escaped("/search?q=a|b&t={x}^y").unwrap();
        assert_eq!(reference.path(), "/search");
        assert_eq!(reference.query(), Some("q=a%7Cb&t=%7Bx%7D%5Ey"));

        let reference = Reference::parse_escaped("/already%20encoded/caf\u{e9}").unwrap();
        assert_eq!(reference.path(), "/already%20encoded/caf%C3%A9");
    }

    #[test]
    fn invalid_scheme_is_rejected() {
        assert_eq!(Reference::parse("1http://host/"), Err(ReferenceError::invalid_scheme("1http")));
    }

    #[test]
    fn invalid_port_is_rejected() {
        assert_eq!(Reference::parse("http://host:http/"), Err(ReferenceError::invalid_port("http")));
        assert_eq!(Reference::parse("http://host:99999/"), Err(ReferenceError::invalid_port("99999")));
    }

    #[test]
    fn empty_port_is_accepted() {
        let reference = Reference::parse("http://host:/").unwrap();
        assert_eq!(reference.host_port(), None);
        assert_eq!(reference.host_domain(), Some("host"));
    }

    #[test]
    fn scheme_protocol_lookup() {
        assert_eq!(Reference::parse("HTTPS://host/").unwrap().scheme_protocol(), Some(Protocol::HTTPS));
        assert_eq!(Reference::parse("/relative").unwrap().scheme_protocol(), None);
    }

    #[test]
    fn fragment_can_be_removed() {
        let mut reference = Reference::parse("http://example.com/path#section").unwrap();
        reference.set_fragment(None);

        assert!(!reference.has_fragment());
        assert_eq!(reference.to_string(), "http://example.com/path");
    }

    #[test]
    fn target_ref_resolves_against_base() {
        let base = Reference::parse("http://example.com/app/users/").unwrap();
        let reference = Reference::parse("42?full=true").unwrap().with_base_ref(base);

        let target = reference.target_ref().unwrap();
        assert_eq!(target.to_string(), "http://example.com/app/users/42?full=true");
        assert!(target.base_ref().is_none());
    }

    #[test]
    fn target_ref_of_absolute_or_unbased_reference() {
        let absolute = Reference::parse("http://a/b").unwrap().with_base_ref(Reference::parse("ftp://c/").unwrap());
        assert_eq!(absolute.target_ref().unwrap().to_string(), "http://a/b");

        let lonely = Reference::parse("/b").unwrap();
        assert_eq!(lonely.target_ref().unwrap(), lonely);
    }

    #[test]
    fn remaining_part_after_base() {
        let base = Reference::parse("http://example.com/app").unwrap();
        let reference = Reference::parse("http://example.com/app/users/42").unwrap().with_base_ref(base);

        assert_eq!(reference.remaining_part().unwrap().as_deref(), Some("/users/42"));

        let elsewhere = Reference::parse("http://other.org/x")
            .unwrap()
            .with_base_ref(Reference::parse("http://example.com/app").unwrap());
        assert_eq!(elsewhere.remaining_part().unwrap(), None);
    }

    #[test]
    fn equality_ignores_base() {
        let plain = Reference::parse("/x").unwrap();
        let based = Reference::parse("/x").unwrap().with_base_ref(Reference::parse("http://h/").unwrap());
        assert_eq!(plain, based);
    }

    #[test]
    fn serde_as_string() {
        let reference = Reference::parse("http://example.com/a?b#c").unwrap();
        let json = serde_json::to_string(&reference).unwrap();
        assert_eq!(json, r#""http://example.com/a?b#c""#);

        let back: Reference = serde_json::from_str(&json).unwrap();
        assert_eq!(back, reference);

        assert!(serde_json::from_str::<Reference>(r#""http://bad host/""#).is_err());
    }
}
