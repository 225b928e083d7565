use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReferenceError {
    #[error("invalid character {character:?} at position {position}")]
    InvalidCharacter { position: usize, character: char },

    #[error("invalid scheme: {scheme}")]
    InvalidScheme { scheme: String },

    #[error("invalid port: {port}")]
    InvalidPort { port: String },

    #[error("unable to resolve reference: {source}")]
    Resolve {
        #[from]
        source: url::ParseError,
    },
}

impl ReferenceError {
    pub fn invalid_character(position: usize, character: char) -> Self {
        Self::InvalidCharacter { position, character }
    }

    pub fn invalid_scheme<S: ToString>(scheme: S) -> Self {
        Self::InvalidScheme { scheme: scheme.to_string() }
    }

    pub fn invalid_port<S: ToString>(port: S) -> Self {
        Self::InvalidPort { port: port.to_string() }
    }
}

#[derive(Error, Debug)]
pub enum RequestBuildError {
    #[error("resource reference must be set")]
    MissingResource,

    #[error("invalid reference: {source}")]
    Reference {
        #[from]
        source: ReferenceError,
    },
}

#[derive(Error, Debug)]
pub enum ConnectorError {
    #[error("request target is not absolute and no host header is present")]
    MissingHost,

    #[error("invalid host header: {reason}")]
    InvalidHost { reason: String },

    #[error("invalid reference: {source}")]
    Reference {
        #[from]
        source: ReferenceError,
    },
}

impl ConnectorError {
    pub fn invalid_host<S: ToString>(str: S) -> Self {
        Self::InvalidHost { reason: str.to_string() }
    }
}
