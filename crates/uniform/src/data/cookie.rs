use crate::data::series::{Named, Series};

/// A cookie sent by the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    version: u32,
    name: String,
    value: Option<String>,
    path: Option<String>,
    domain: Option<String>,
}

impl Cookie {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self { version: 0, name: name.into(), value: Some(value.into()), path: None, domain: None }
    }

    #[must_use]
    pub fn with_version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }
}

impl Named for Cookie {
    fn name(&self) -> &str {
        &self.name
    }

    fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

pub type CookieSeries = Series<Cookie>;

#[cfg(test)]
mod tests {
    use super::*;

    fn series() -> CookieSeries {
        [
            Cookie::new("session", "abc").with_path("/"),
            Cookie::new("theme", "dark"),
            Cookie::new("session", "def").with_domain("example.com").with_version(1),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn lookup_by_name() {
        let cookies = series();

        assert_eq!(cookies.len(), 3);
        assert_eq!(cookies.first_value("session"), Some("abc"));
        assert_eq!(cookies.first("Theme"), None);
        assert_eq!(cookies.first_ignore_case("Theme").and_then(Named::value), Some("dark"));
        assert_eq!(cookies.values("session").collect::<Vec<_>>(), vec!["abc", "def"]);
    }

    #[test]
    fn remove_all_by_name() {
        let mut cookies = series();

        assert!(cookies.remove_all("session"));
        assert!(!cookies.remove_all("session"));
        assert_eq!(cookies.len(), 1);
        assert_eq!(cookies.iter().next().map(Named::name), Some("theme"));
    }
}
