//! Value types carried by a request.
//!
//! Connectors produce these values from the wire and read them back when
//! serializing. The request model stores them but never interprets their
//! grammar: a [`Cookie`] or a [`Range`] is taken as given.

mod challenge;
mod client_info;
mod conditions;
mod cookie;
mod protocol;
mod range;
mod reference;
mod series;

pub use challenge::ChallengeResponse;
pub use challenge::ChallengeScheme;
pub use client_info::ClientInfo;
pub use client_info::Preference;
pub use conditions::Conditions;
pub use conditions::Tag;
pub use cookie::Cookie;
pub use cookie::CookieSeries;
pub use protocol::Protocol;
pub use range::Range;
pub use reference::Reference;
pub use series::Named;
pub use series::Series;
