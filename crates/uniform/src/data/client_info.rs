//! Client-specific information attached to a request.

use mime::Mime;

/// A metadata value weighted by a quality factor in `[0.0, 1.0]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Preference<T> {
    metadata: T,
    quality: f32,
}

impl<T> Preference<T> {
    pub fn new(metadata: T) -> Self {
        Self { metadata, quality: 1.0 }
    }

    /// Creates a preference, clamping the quality into `[0.0, 1.0]`.
    pub fn with_quality(metadata: T, quality: f32) -> Self {
        Self { metadata, quality: quality.clamp(0.0, 1.0) }
    }

    pub fn metadata(&self) -> &T {
        &self.metadata
    }

    pub fn quality(&self) -> f32 {
        self.quality
    }
}

/// Information about the client that issued the request.
///
/// The first address is the one of the immediate peer. Further addresses are
/// the ones forwarded by intermediaries, for example from `X-Forwarded-For`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientInfo {
    pub addresses: Vec<String>,
    pub port: Option<u16>,
    pub agent: Option<String>,
    pub accepted_media_types: Vec<Preference<Mime>>,
    pub accepted_languages: Vec<Preference<String>>,
    pub accepted_encodings: Vec<Preference<String>>,
    pub accepted_character_sets: Vec<Preference<String>>,
}

impl ClientInfo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the address of the immediate peer, if known.
    pub fn address(&self) -> Option<&str> {
        self.addresses.first().map(String::as_str)
    }

    /// Returns the addresses forwarded by intermediaries.
    pub fn forwarded_addresses(&self) -> &[String] {
        self.addresses.get(1..).unwrap_or_default()
    }

    /// Returns the accepted media type with the highest quality, first one wins ties.
    pub fn preferred_media_type(&self) -> Option<&Mime> {
        self.accepted_media_types
            .iter()
            .filter(|preference| preference.quality() > 0.0)
            .fold(None::<&Preference<Mime>>, |best, current| match best {
                Some(best) if best.quality() >= current.quality() => Some(best),
                _ => Some(current),
            })
            .map(Preference::metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addresses() {
        let mut info = ClientInfo::new();
        assert_eq!(info.address(), None);
        assert!(info.forwarded_addresses().is_empty());

        info.addresses = vec!["10.0.0.1".to_string(), "192.168.1.7".to_string()];
        assert_eq!(info.address(), Some("10.0.0.1"));
        assert_eq!(info.forwarded_addresses(), ["192.168.1.7".to_string()]);
    }

    #[test]
    fn quality_is_clamped() {
        assert_eq!(Preference::with_quality("en", 3.0).quality(), 1.0);
        assert_eq!(Preference::with_quality("en", -1.0).quality(), 0.0);
    }

    #[test]
    fn preferred_media_type() {
        let info = ClientInfo {
            accepted_media_types: vec![
                Preference::with_quality(mime::TEXT_HTML, 0.5),
                Preference::new(mime::APPLICATION_JSON),
                Preference::new(mime::TEXT_PLAIN),
                Preference::with_quality(mime::STAR_STAR, 0.0),
            ],
            ..ClientInfo::default()
        };

        assert_eq!(info.preferred_media_type(), Some(&mime::APPLICATION_JSON));
        assert_eq!(ClientInfo::new().preferred_media_type(), None);
    }
}
