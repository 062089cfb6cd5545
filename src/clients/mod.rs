/// Client configuration
pub mod config;
/// Two-phase JSON decoding of response bodies
pub mod decode;
/// Query string construction and request dispatch
pub mod dispatch;
/// Response shapes
pub mod entities;
/// Error types and result aliases
pub mod errors;
/// HTTP capability the client is built on
pub mod http;
/// Numbers transmitted as JSON strings
pub mod numeral;
/// Spotify metadata API client
pub mod spotify;

pub use config::{ClientConfig, ClientConfigBuilder};
pub use errors::{Error, Result, TransportError};
pub use http::{HttpClient, HttpResponse, ReqwestHttpClient};
pub use spotify::SpotifyClient;
