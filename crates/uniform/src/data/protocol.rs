//! Protocols a request can travel over.
//!
//! A [`Protocol`] is a plain value: its scheme name, a display name, the
//! default port and whether the transport is confidential. The well-known
//! protocols are exposed as associated constants and can be looked up from a
//! URI scheme with [`Protocol::from_scheme`].

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;

/// A protocol used by connectors to transfer requests and responses.
#[derive(Debug, Clone)]
pub struct Protocol {
    scheme: Cow<'static, str>,
    name: Cow<'static, str>,
    description: Cow<'static, str>,
    default_port: Option<u16>,
    confidential: bool,
    version: Option<Cow<'static, str>>,
}

macro_rules! well_known {
    (
        $(#[$doc:meta])*
        $ident:ident, $scheme:literal, $name:literal, $desc:literal, $port:expr, $confidential:literal
    ) => {
        $(#[$doc])*
        pub const $ident: Protocol = Protocol::from_static($scheme, $name, $desc, $port, $confidential);
    };
}

impl Protocol {
    well_known!(
        /// Apache JServ protocol.
        AJP, "ajp", "AJP", "Apache Jakarta Protocol", Some(8009), false
    );
    well_known!(
        /// Class loader access protocol.
        CLAP, "clap", "CLAP", "Class Loader Access Protocol", None, false
    );
    well_known!(
        /// Local file system access.
        FILE, "file", "FILE", "Local File System Protocol", None, false
    );
    well_known!(FTP, "ftp", "FTP", "File Transfer Protocol", Some(21), false);
    well_known!(HTTP, "http", "HTTP", "HyperText Transport Protocol", Some(80), false);
    well_known!(
        /// HTTP over TLS.
        HTTPS, "https", "HTTPS", "HyperText Transport Protocol (Secure)", Some(443), true
    );
    well_known!(JAR, "jar", "JAR", "Java ARchive", None, false);
    well_known!(POP, "pop", "POP", "Post Office Protocol", Some(110), false);
    well_known!(POPS, "pops", "POPS", "Post Office Protocol (Secure)", Some(995), true);
    well_known!(
        /// Internal access between components of the same process.
        RIAP, "riap", "RIAP", "Internal Access Protocol", None, false
    );
    well_known!(SMTP, "smtp", "SMTP", "Simple Mail Transfer Protocol", Some(25), false);
    well_known!(SMTPS, "smtps", "SMTPS", "Simple Mail Transfer Protocol (Secure)", Some(465), true);
    well_known!(WAR, "war", "WAR", "Web Archive Access Protocol", None, false);
    well_known!(ZIP, "zip", "ZIP", "Zip Archive Access Protocol", None, false);

    const fn from_static(
        scheme: &'static str,
        name: &'static str,
        description: &'static str,
        default_port: Option<u16>,
        confidential: bool,
    ) -> Self {
        Self {
            scheme: Cow::Borrowed(scheme),
            name: Cow::Borrowed(name),
            description: Cow::Borrowed(description),
            default_port,
            confidential,
            version: None,
        }
    }

    /// Creates a non-confidential protocol that is not part of the well-known set.
    pub fn new(
        scheme: impl Into<Cow<'static, str>>,
        name: impl Into<Cow<'static, str>>,
        description: impl Into<Cow<'static, str>>,
        default_port: Option<u16>,
    ) -> Self {
        Self {
            scheme: scheme.into(),
            name: name.into(),
            description: description.into(),
            default_port,
            confidential: false,
            version: None,
        }
    }

    /// Marks the protocol as confidential (or not).
    #[must_use]
    pub fn with_confidential(mut self, confidential: bool) -> Self {
        self.confidential = confidential;
        self
    }

    #[must_use]
    pub fn with_version(mut self, version: impl Into<Cow<'static, str>>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Looks up a well-known protocol from a URI scheme, ignoring case.
    ///
    /// Returns `None` for schemes that have no registered protocol.
    pub fn from_scheme(scheme: &str) -> Option<Protocol> {
        if scheme.bytes().any(|b| b.is_ascii_uppercase()) {
            BY_SCHEME.get(scheme.to_ascii_lowercase().as_str()).cloned()
        } else {
            BY_SCHEME.get(scheme).cloned()
        }
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn default_port(&self) -> Option<u16> {
        self.default_port
    }

    /// Returns true if data travelling over this protocol is protected in transit.
    pub fn is_confidential(&self) -> bool {
        self.confidential
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }
}

static BY_SCHEME: Lazy<HashMap<String, Protocol>> = Lazy::new(|| {
    [
        Protocol::AJP,
        Protocol::CLAP,
        Protocol::FILE,
        Protocol::FTP,
        Protocol::HTTP,
        Protocol::HTTPS,
        Protocol::JAR,
        Protocol::POP,
        Protocol::POPS,
        Protocol::RIAP,
        Protocol::SMTP,
        Protocol::SMTPS,
        Protocol::WAR,
        Protocol::ZIP,
    ]
    .into_iter()
    .map(|protocol| (protocol.scheme().to_owned(), protocol))
    .collect()
});

impl PartialEq for Protocol {
    fn eq(&self, other: &Self) -> bool {
        self.scheme.eq_ignore_ascii_case(&other.scheme) && self.version == other.version
    }
}

impl Eq for Protocol {}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(version) => write!(f, "{}/{}", self.name, version),
            None => f.write_str(&self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(Protocol::from_scheme("https"), Some(Protocol::HTTPS));
        assert_eq!(Protocol::from_scheme("HTTP"), Some(Protocol::HTTP));
        assert_eq!(Protocol::from_scheme("Riap"), Some(Protocol::RIAP));
    }

    #[test]
    fn unknown_scheme_has_no_protocol() {
        assert_eq!(Protocol::from_scheme("urn"), None);
        assert_eq!(Protocol::from_scheme(""), None);
    }

    #[test]
    fn confidential_flags() {
        assert!(Protocol::HTTPS.is_confidential());
        assert!(Protocol::SMTPS.is_confidential());
        assert!(Protocol::POPS.is_confidential());
        assert!(!Protocol::HTTP.is_confidential());
        assert!(!Protocol::FILE.is_confidential());
    }

    #[test]
    fn custom_protocol() {
        let sip = Protocol::new("sips", "SIPS", "Session Initiation Protocol (Secure)", Some(5061))
            .with_confidential(true)
            .with_version("2.0");

        assert_eq!(sip.scheme(), "sips");
        assert_eq!(sip.default_port(), Some(5061));
        assert!(sip.is_confidential());
        assert_eq!(sip.to_string(), "SIPS/2.0");
        assert_eq!(Protocol::from_scheme("sips"), None);
    }

    #[test]
    fn equality_ignores_scheme_case_but_not_version() {
        let upper = Protocol::new("HTTP", "HTTP", "", Some(80));
        assert_eq!(upper, Protocol::HTTP);
        assert_ne!(Protocol::HTTP.with_version("1.1"), Protocol::HTTP);
    }
}
