//! The envelope shared by every message travelling through a pipeline.
//!
//! A [`Message`] holds an optional entity (the payload, behind the
//! [`Representation`] trait) and a typed attribute map that pipeline stages
//! can use to pass data along with the message.

mod representation;

pub use representation::BodyRepresentation;
pub use representation::BytesRepresentation;
pub use representation::EntitySize;
pub use representation::Representation;

use http::Extensions;

#[derive(Debug, Default)]
pub struct Message {
    entity: Option<Box<dyn Representation>>,
    attributes: Extensions,
}

impl Message {
    pub fn new(entity: Option<Box<dyn Representation>>) -> Self {
        Self { entity, attributes: Extensions::new() }
    }

    pub fn entity(&self) -> Option<&dyn Representation> {
        self.entity.as_deref()
    }

    pub fn set_entity(&mut self, entity: Option<Box<dyn Representation>>) {
        self.entity = entity;
    }

    pub fn take_entity(&mut self) -> Option<Box<dyn Representation>> {
        self.entity.take()
    }

    pub fn attributes(&self) -> &Extensions {
        &self.attributes
    }

    pub fn attributes_mut(&mut self) -> &mut Extensions {
        &mut self.attributes
    }

    /// Returns true if an entity is attached, still readable and not known to be empty.
    pub fn is_entity_available(&self) -> bool {
        self.entity
            .as_deref()
            .is_some_and(|entity| entity.is_available() && !entity.size().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::*;

    #[test]
    fn no_entity() {
        assert!(!Message::default().is_entity_available());
    }

    #[test]
    fn empty_entity_is_not_available() {
        let message = Message::new(Some(Box::new(BytesRepresentation::new(Bytes::new()))));
        assert!(!message.is_entity_available());
    }

    #[test]
    fn non_empty_entity_is_available() {
        let mut message = Message::default();
        message.set_entity(Some(Box::new(BytesRepresentation::from("payload"))));
        assert!(message.is_entity_available());

        assert!(message.take_entity().is_some());
        assert!(!message.is_entity_available());
    }

    /// A stream whose length is only known once it has been read.
    #[derive(Debug)]
    struct Streaming;

    impl Representation for Streaming {
        fn size(&self) -> EntitySize {
            EntitySize::Unknown
        }
    }

    #[test]
    fn unknown_size_entity_is_available() {
        let message = Message::new(Some(Box::new(Streaming)));
        assert!(message.is_entity_available());
    }

    #[test]
    fn typed_attributes() {
        #[derive(Clone, Debug, PartialEq)]
        struct TraceId(u64);

        let mut message = Message::default();
        message.attributes_mut().insert(TraceId(7));

        assert_eq!(message.attributes().get::<TraceId>(), Some(&TraceId(7)));
    }
}
