//! Spmeta - Client for the Spotify metadata web service
//!
//! This library searches and looks up albums, artists and tracks, decoding
//! the service's string-encoded numbers into typed values.

/// Client modules for the metadata web service
pub mod clients;
