use std::sync::Arc;

use log::debug;

use crate::clients::{
    config::ClientConfig,
    decode::{Decode, decode},
    dispatch::{Params, dispatch},
    entities::{
        LookupAlbumResponse, LookupArtistResponse, LookupTrackResponse, SearchAlbumsResponse,
        SearchArtistsResponse, SearchTracksResponse,
    },
    errors::Result,
    http::{HttpClient, ReqwestHttpClient},
};

const SEARCH_ALBUMS: &str = "/search/1/album.json";
const SEARCH_ARTISTS: &str = "/search/1/artist.json";
const SEARCH_TRACKS: &str = "/search/1/track.json";
// One endpoint serves all three lookups, the uri decides what comes back
const LOOKUP: &str = "/lookup/1/.json";

/// Client for the Spotify metadata web service.
///
/// Every call is one independent request/decode round; the client holds no
/// mutable state and can be cloned and shared across tasks.
#[derive(Clone)]
pub struct SpotifyClient {
    http: Arc<dyn HttpClient>,
    base_url: String,
}

impl SpotifyClient {
    pub fn new(config: &ClientConfig, http: Arc<dyn HttpClient>) -> Self {
        SpotifyClient {
            http,
            base_url: config.base_url.clone(),
        }
    }

    // Create a reqwest backed SpotifyClient from the given configuration
    pub fn with_config(config: &ClientConfig) -> Result<Self> {
        let http = ReqwestHttpClient::new(config)?;
        Ok(Self::new(config, Arc::new(http)))
    }

    // Create a SpotifyClient from environment variables or raise a configuration error
    pub fn try_default() -> Result<Self> {
        let config = ClientConfig::from_env()?;
        debug!("Using metadata service at {}", config.base_url);
        Self::with_config(&config)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn fetch<T: Decode>(&self, endpoint: &str, key: &str, value: &str) -> Result<T> {
        let params = Params::from([(key, value)]);
        let body = dispatch(self.http.as_ref(), &self.base_url, endpoint, &params).await?;
        decode(&body)
    }

    /// Search albums by free text.
    pub async fn search_albums(&self, query: &str) -> Result<SearchAlbumsResponse> {
        self.fetch(SEARCH_ALBUMS, "q", query).await
    }

    /// Search artists by free text.
    pub async fn search_artists(&self, query: &str) -> Result<SearchArtistsResponse> {
        self.fetch(SEARCH_ARTISTS, "q", query).await
    }

    /// Search tracks by free text.
    pub async fn search_tracks(&self, query: &str) -> Result<SearchTracksResponse> {
        self.fetch(SEARCH_TRACKS, "q", query).await
    }

    /// Look up a single artist, e.g. `spotify:artist:4YrKBkKSVeqDamzBPWVnSJ`.
    pub async fn lookup_artist(&self, uri: &str) -> Result<LookupArtistResponse> {
        self.fetch(LOOKUP, "uri", uri).await
    }

    /// Look up a single track, e.g. `spotify:track:6NmXV4o6bmp704aPGyTVVG`.
    pub async fn lookup_track(&self, uri: &str) -> Result<LookupTrackResponse> {
        self.fetch(LOOKUP, "uri", uri).await
    }

    /// Look up a single album, e.g. `spotify:album:6G9fHYDCoyEErUkHrFYfs4`.
    pub async fn lookup_album(&self, uri: &str) -> Result<LookupAlbumResponse> {
        self.fetch(LOOKUP, "uri", uri).await
    }
}
