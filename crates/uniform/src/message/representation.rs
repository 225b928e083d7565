use std::any::Any;
use std::fmt;

use bytes::Bytes;
use http_body::Body;
use mime::Mime;
use parking_lot::Mutex;

/// Represents the size information of an entity.
///
/// `Unknown` is a sentinel distinct from `Known(0)`: the entity may still
/// carry data, its length is just not advertised.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum EntitySize {
    /// Entity with known length in bytes
    Known(u64),
    /// Length not known in advance, e.g. a chunked stream
    #[default]
    Unknown,
}

impl EntitySize {
    #[inline]
    pub fn is_unknown(&self) -> bool {
        matches!(self, EntitySize::Unknown)
    }

    /// Returns true only for a known size of zero bytes
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, EntitySize::Known(0))
    }

    #[inline]
    pub fn known(&self) -> Option<u64> {
        match self {
            EntitySize::Known(size) => Some(*size),
            EntitySize::Unknown => None,
        }
    }
}

/// The payload attached to a message.
///
/// Implementations must be shareable across threads since a request travels
/// between pipeline stages that may run on different workers.
pub trait Representation: Any + Send + Sync + fmt::Debug {
    /// Size of the data that can still be read.
    fn size(&self) -> EntitySize;

    /// Returns false once the content can no longer be read.
    fn is_available(&self) -> bool {
        true
    }

    fn media_type(&self) -> Option<&Mime> {
        None
    }
}

impl dyn Representation {
    pub fn is<T: Representation>(&self) -> bool {
        let any: &dyn Any = self;
        any.is::<T>()
    }

    pub fn downcast_ref<T: Representation>(&self) -> Option<&T> {
        let any: &dyn Any = self;
        any.downcast_ref::<T>()
    }
}

/// An in-memory representation.
#[derive(Debug, Clone)]
pub struct BytesRepresentation {
    data: Bytes,
    media_type: Option<Mime>,
}

impl BytesRepresentation {
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self { data: data.into(), media_type: None }
    }

    #[must_use]
    pub fn with_media_type(mut self, media_type: Mime) -> Self {
        self.media_type = Some(media_type);
        self
    }

    pub fn bytes(&self) -> &Bytes {
        &self.data
    }
}

impl Representation for BytesRepresentation {
    fn size(&self) -> EntitySize {
        EntitySize::Known(self.data.len() as u64)
    }

    fn media_type(&self) -> Option<&Mime> {
        self.media_type.as_ref()
    }
}

impl From<Bytes> for BytesRepresentation {
    fn from(data: Bytes) -> Self {
        Self::new(data)
    }
}

impl From<String> for BytesRepresentation {
    fn from(value: String) -> Self {
        Self::new(Bytes::from(value))
    }
}

impl From<&'static str> for BytesRepresentation {
    fn from(value: &'static str) -> Self {
        Self::new(Bytes::from_static(value.as_bytes()))
    }
}

/// Bridges a streaming [`http_body::Body`] into a representation.
///
/// The size is taken from the body's size hint when it is exact. The body can
/// be taken out exactly once by the stage that consumes it; afterwards the
/// representation reports itself unavailable.
pub struct BodyRepresentation<B> {
    body: Mutex<Option<B>>,
    media_type: Option<Mime>,
}

impl<B> BodyRepresentation<B> {
    pub fn new(body: B) -> Self {
        Self { body: Mutex::new(Some(body)), media_type: None }
    }

    #[must_use]
    pub fn with_media_type(mut self, media_type: Mime) -> Self {
        self.media_type = Some(media_type);
        self
    }

    /// Takes the body out, leaving the representation consumed.
    pub fn take_body(&self) -> Option<B> {
        self.body.lock().take()
    }
}

impl<B> Representation for BodyRepresentation<B>
where
    B: Body + Send + 'static,
{
    fn size(&self) -> EntitySize {
        match self.body.lock().as_ref() {
            Some(body) => body.size_hint().exact().map_or(EntitySize::Unknown, EntitySize::Known),
            None => EntitySize::Known(0),
        }
    }

    fn is_available(&self) -> bool {
        self.body.lock().as_ref().is_some_and(|body| !body.is_end_stream())
    }

    fn media_type(&self) -> Option<&Mime> {
        self.media_type.as_ref()
    }
}

impl<B> fmt::Debug for BodyRepresentation<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BodyRepresentation")
            .field("consumed", &self.body.lock().is_none())
            .field("media_type", &self.media_type)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use http_body_util::{Empty, Full};

    use super::*;

    #[test]
    fn bytes_size() {
        let representation = BytesRepresentation::from("hello").with_media_type(mime::TEXT_PLAIN);

        assert_eq!(representation.size(), EntitySize::Known(5));
        assert!(representation.is_available());
        assert_eq!(representation.media_type(), Some(&mime::TEXT_PLAIN));
    }

    #[test]
    fn full_body_has_exact_size() {
        let representation = BodyRepresentation::new(Full::new(Bytes::from_static(b"0123456789")));

        assert_eq!(representation.size(), EntitySize::Known(10));
        assert!(representation.is_available());
    }

    #[test]
    fn empty_body_is_not_available() {
        let representation = BodyRepresentation::new(Empty::<Bytes>::new());

        assert_eq!(representation.size(), EntitySize::Known(0));
        assert!(!representation.is_available());
    }

    /// A body that never advertises its length.
    struct Chunked;

    impl Body for Chunked {
        type Data = Bytes;
        type Error = std::convert::Infallible;

        fn poll_frame(
            self: std::pin::Pin<&mut Self>,
            _cx: &mut std::task::Context<'_>,
        ) -> std::task::Poll<Option<Result<http_body::Frame<Self::Data>, Self::Error>>> {
            std::task::Poll::Ready(None)
        }
    }

    #[test]
    fn streaming_body_has_unknown_size() {
        let representation = BodyRepresentation::new(Chunked).with_media_type(mime::APPLICATION_OCTET_STREAM);

        assert_eq!(representation.size(), EntitySize::Unknown);
        assert!(representation.is_available());
        assert_eq!(representation.media_type(), Some(&mime::APPLICATION_OCTET_STREAM));
    }

    #[test]
    fn taken_body_is_consumed() {
        let representation = BodyRepresentation::new(Full::new(Bytes::from_static(b"abc")));

        assert!(representation.take_body().is_some());
        assert!(representation.take_body().is_none());
        assert_eq!(representation.size(), EntitySize::Known(0));
        assert!(!representation.is_available());
    }

    #[test]
    fn downcast_trait_object() {
        let entity: Box<dyn Representation> = Box::new(BytesRepresentation::from("x"));

        assert!(entity.is::<BytesRepresentation>());
        assert!(!entity.is::<BodyRepresentation<Full<Bytes>>>());
        assert_eq!(entity.downcast_ref::<BytesRepresentation>().map(|r| r.bytes().len()), Some(1));
    }
}
