//! Effective protocol resolution.
//!
//! The protocol of a request is either set explicitly by the connector or
//! inferred from its resource reference. Candidates are tried in a fixed
//! order and the first one that yields a protocol wins:
//!
//! 1. the explicit protocol,
//! 2. the protocol of the resource reference's scheme,
//! 3. the protocol of the scheme of the resource reference's base.

use crate::data::{Protocol, Reference};

/// Returns the first candidate that yields a value, evaluating them in order
/// and stopping at the first hit.
pub fn first_resolved<T, I, F>(candidates: I) -> Option<T>
where
    I: IntoIterator<Item = F>,
    F: FnOnce() -> Option<T>,
{
    candidates.into_iter().find_map(|candidate| candidate())
}

/// Resolves the protocol a request uses, or `None` if nothing tells it.
pub fn effective_protocol(explicit: Option<&Protocol>, resource_ref: Option<&Reference>) -> Option<Protocol> {
    let candidates: [&dyn Fn() -> Option<Protocol>; 3] = [
        &|| explicit.cloned(),
        &|| resource_ref.and_then(Reference::scheme_protocol),
        &|| resource_ref.and_then(Reference::base_ref).and_then(Reference::scheme_protocol),
    ];

    first_resolved(candidates)
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    fn reference(uri: &str) -> Reference {
        Reference::parse(uri).unwrap()
    }

    #[test]
    fn explicit_protocol_wins() {
        let resource = reference("https://example.com/");
        assert_eq!(effective_protocol(Some(&Protocol::HTTP), Some(&resource)), Some(Protocol::HTTP));
    }

    #[test]
    fn resource_scheme() {
        let resource = reference("https://example.com/");
        assert_eq!(effective_protocol(None, Some(&resource)), Some(Protocol::HTTPS));
    }

    #[test]
    fn resource_scheme_beats_base_scheme() {
        let resource = reference("ftp://example.com/file").with_base_ref(reference("http://example.com/"));
        assert_eq!(effective_protocol(None, Some(&resource)), Some(Protocol::FTP));
    }

    #[test]
    fn falls_back_to_base_scheme() {
        let relative = reference("/users/42").with_base_ref(reference("http://example.com/"));
        assert_eq!(effective_protocol(None, Some(&relative)), Some(Protocol::HTTP));

        let unmapped = reference("urn:x:y").with_base_ref(reference("https://example.com/"));
        assert_eq!(effective_protocol(None, Some(&unmapped)), Some(Protocol::HTTPS));
    }

    #[test]
    fn nothing_resolves() {
        assert_eq!(effective_protocol(None, None), None);
        assert_eq!(effective_protocol(None, Some(&reference("/x"))), None);

        let unmapped = reference("/x").with_base_ref(reference("urn:a:b"));
        assert_eq!(effective_protocol(None, Some(&unmapped)), None);
    }

    #[test]
    fn candidates_after_a_hit_are_not_evaluated() {
        let calls = Cell::new(0);
        let count = |value: Option<u8>| {
            calls.set(calls.get() + 1);
            value
        };

        let candidates: [&dyn Fn() -> Option<u8>; 3] = [&|| count(None), &|| count(Some(2)), &|| count(Some(3))];
        let result = first_resolved(candidates);

        assert_eq!(result, Some(2));
        assert_eq!(calls.get(), 2);
    }
}
