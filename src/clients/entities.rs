//! Response shapes returned by the metadata service.
//!
//! Field names follow Rust conventions; `serde` renames map them back onto the
//! wire keys so serializing a decoded value reproduces the service's JSON.
//! Optional fields are `Option`s and are left out when absent.

use serde::Serialize;

use crate::clients::numeral::{FloatString, IntString};

/// Third-party catalog identifier, e.g. `{"type": "upc", "id": "0724384960650"}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExternalId {
    #[serde(rename = "type")]
    pub id_type: String,
    pub id: IntString,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Artist {
    pub href: String,
    pub name: String,
    /// Present in search results, usually absent from lookups.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub popularity: Option<FloatString>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Availability {
    /// Space separated territory codes, e.g. `"GB US"`.
    pub territories: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Album {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub released: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub popularity: Option<FloatString>,
    #[serde(rename = "external-ids")]
    pub external_ids: Vec<ExternalId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
    pub href: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artists: Option<Vec<Artist>>,
    pub availability: Availability,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Track {
    pub album: Album,
    pub name: String,
    pub external_ids: Vec<ExternalId>,
    pub popularity: FloatString,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explicit: Option<bool>,
    /// Duration in seconds.
    pub length: f64,
    pub href: String,
    pub artists: Vec<Artist>,
    pub track_number: IntString,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability: Option<Availability>,
}

/// Paging and echo metadata attached to every search response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchInfo {
    pub num_results: i64,
    pub limit: i64,
    pub offset: i64,
    pub query: String,
    #[serde(rename = "type")]
    pub result_type: String,
    pub page: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchAlbumsResponse {
    pub info: SearchInfo,
    pub albums: Vec<Album>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchArtistsResponse {
    pub info: SearchInfo,
    pub artists: Vec<Artist>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchTracksResponse {
    pub info: SearchInfo,
    pub tracks: Vec<Track>,
}

/// Metadata attached to every lookup response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LookupInfo {
    #[serde(rename = "type")]
    pub entity_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LookupArtistResponse {
    pub info: LookupInfo,
    pub artist: Artist,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LookupTrackResponse {
    pub info: LookupInfo,
    pub track: Track,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LookupAlbumResponse {
    pub info: LookupInfo,
    pub album: AlbumLookupView,
}

// The album lookup endpoint returns a flatter projection than search does:
// the artist is a bare name and external ids are not coerced.

/// Album as returned by the lookup endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct AlbumLookupView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist_id: Option<String>,
    pub name: String,
    pub artist: String,
    pub external_ids: Vec<RawExternalId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub released: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracks: Option<Vec<AlbumLookupTrack>>,
}

/// External id whose value is kept as the string the service sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawExternalId {
    #[serde(rename = "type")]
    pub id_type: String,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlbumLookupTrack {
    pub available: bool,
    pub href: String,
    pub artists: Vec<TrackArtistRef>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackArtistRef {
    pub href: String,
    pub name: String,
}
