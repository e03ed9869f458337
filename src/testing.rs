//! Test doubles for services built on this crate.
//!
//! [`EndpointFactory`] assembles endpoint instances with an injected caller identity and a
//! freshly built [`ServiceProvider`]; [`StubTransport`] replays scripted HTTP responses for
//! code that talks to other services through [`ReadyRequest`](crate::http::ReadyRequest).

pub mod endpoint;
pub mod logger;
pub mod services;
pub mod transport;

pub use endpoint::*;
pub use logger::*;
pub use services::*;
pub use transport::*;
