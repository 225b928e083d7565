use std::borrow::Cow;
use std::time::SystemTime;

/// An entity tag, as carried by `If-Match` / `If-None-Match`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tag {
    name: Cow<'static, str>,
    weak: bool,
}

impl Tag {
    /// The `*` tag, matching any current entity.
    pub const ALL: Tag = Tag { name: Cow::Borrowed("*"), weak: false };

    /// Creates a strong tag, compared byte for byte.
    pub fn strong(name: impl Into<String>) -> Self {
        Self { name: Cow::Owned(name.into()), weak: false }
    }

    /// Creates a weak tag (`W/"..."`), only usable for weak comparison.
    pub fn weak(name: impl Into<String>) -> Self {
        Self { name: Cow::Owned(name.into()), weak: true }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_weak(&self) -> bool {
        self.weak
    }

    pub fn is_all(&self) -> bool {
        self.name == "*"
    }
}

/// Conditions applying to a request, used for conditional methods.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conditions {
    pub if_match: Vec<Tag>,
    pub if_none_match: Vec<Tag>,
    pub modified_since: Option<SystemTime>,
    pub unmodified_since: Option<SystemTime>,
}

impl Conditions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if at least one condition is set.
    pub fn has_some(&self) -> bool {
        !self.if_match.is_empty()
            || !self.if_none_match.is_empty()
            || self.modified_since.is_some()
            || self.unmodified_since.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_conditions() {
        assert!(!Conditions::new().has_some());
    }

    #[test]
    fn any_condition_counts() {
        let mut conditions = Conditions::new();
        conditions.if_none_match.push(Tag::ALL);
        assert!(conditions.has_some());
        assert!(conditions.if_none_match[0].is_all());

        let conditions = Conditions { modified_since: Some(SystemTime::UNIX_EPOCH), ..Conditions::default() };
        assert!(conditions.has_some());
    }

    #[test]
    fn weak_tags() {
        assert!(Tag::weak("v1").is_weak());
        assert!(!Tag::strong("v1").is_weak());
        assert_ne!(Tag::weak("v1"), Tag::strong("v1"));
    }

    #[test]
    fn all_tag() {
        assert!(Tag::ALL.is_all());
        assert_eq!(Tag::ALL, Tag::strong("*"));
        assert!(!Tag::strong("v1").is_all());
    }
}
