use std::borrow::Cow;
use std::fmt;

/// An authentication scheme, identified by a technical name such as `HTTP_BASIC`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChallengeScheme {
    name: Cow<'static, str>,
    technical_name: Cow<'static, str>,
}

impl ChallengeScheme {
    pub const HTTP_BASIC: ChallengeScheme = ChallengeScheme::from_static("HTTP_BASIC", "Basic");
    pub const HTTP_DIGEST: ChallengeScheme = ChallengeScheme::from_static("HTTP_DIGEST", "Digest");
    pub const HTTP_NEGOTIATE: ChallengeScheme = ChallengeScheme::from_static("HTTP_NEGOTIATE", "Negotiate");

    const fn from_static(name: &'static str, technical_name: &'static str) -> Self {
        Self { name: Cow::Borrowed(name), technical_name: Cow::Borrowed(technical_name) }
    }

    pub fn new(name: impl Into<Cow<'static, str>>, technical_name: impl Into<Cow<'static, str>>) -> Self {
        Self { name: name.into(), technical_name: technical_name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The name used on the wire, e.g. `Basic` in an `Authorization` header.
    pub fn technical_name(&self) -> &str {
        &self.technical_name
    }
}

/// Credentials sent by a client to an origin server or to a proxy.
///
/// The core never interprets these values, connectors fill and read them.
#[derive(Clone, PartialEq, Eq)]
pub struct ChallengeResponse {
    scheme: ChallengeScheme,
    identifier: Option<String>,
    secret: Option<String>,
    raw_credentials: Option<String>,
}

impl ChallengeResponse {
    pub fn new(scheme: ChallengeScheme, identifier: impl Into<String>, secret: impl Into<String>) -> Self {
        Self { scheme, identifier: Some(identifier.into()), secret: Some(secret.into()), raw_credentials: None }
    }

    /// Creates a response from unparsed credentials, as found after the scheme on the wire.
    pub fn raw(scheme: ChallengeScheme, credentials: impl Into<String>) -> Self {
        Self { scheme, identifier: None, secret: None, raw_credentials: Some(credentials.into()) }
    }

    pub fn scheme(&self) -> &ChallengeScheme {
        &self.scheme
    }

    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    pub fn secret(&self) -> Option<&str> {
        self.secret.as_deref()
    }

    pub fn raw_credentials(&self) -> Option<&str> {
        self.raw_credentials.as_deref()
    }
}

impl fmt::Debug for ChallengeResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChallengeResponse")
            .field("scheme", &self.scheme.name())
            .field("identifier", &self.identifier)
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .field("raw_credentials", &self.raw_credentials.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_hides_secrets() {
        let response = ChallengeResponse::new(ChallengeScheme::HTTP_BASIC, "scott", "tiger");
        let debug = format!("{response:?}");

        assert!(debug.contains("scott"));
        assert!(!debug.contains("tiger"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn raw_credentials() {
        let response = ChallengeResponse::raw(ChallengeScheme::HTTP_NEGOTIATE, "YIIB...");

        assert_eq!(response.scheme().technical_name(), "Negotiate");
        assert_eq!(response.identifier(), None);
        assert_eq!(response.raw_credentials(), Some("YIIB..."));
    }
}
