//! Response decoding.
//!
//! Decoding happens in two explicit steps: the body is parsed into a generic
//! [`serde_json::Value`] tree, then each response shape projects itself out of
//! that tree through [`Node`], which tracks the field path so every failure
//! names the exact place in the document it came from.

use log::debug;
use serde_json::{Map, Value};

use crate::clients::{
    entities::{
        Album, AlbumLookupTrack, AlbumLookupView, Artist, Availability, ExternalId,
        LookupAlbumResponse, LookupArtistResponse, LookupInfo, LookupTrackResponse,
        RawExternalId, SearchAlbumsResponse, SearchArtistsResponse, SearchInfo,
        SearchTracksResponse, Track, TrackArtistRef,
    },
    errors::{Error, Result},
    numeral::{self, FloatString, IntString, NumeralError},
};

/// A type that can be projected out of a JSON tree.
pub trait Decode: Sized {
    fn from_node(node: Node<'_>) -> Result<Self>;
}

/// Decode a raw response body into `T`.
pub fn decode<T: Decode>(body: &[u8]) -> Result<T> {
    let tree: Value = serde_json::from_slice(body).map_err(Error::MalformedJson)?;
    debug!(
        "Decoding {} byte body as {}",
        body.len(),
        std::any::type_name::<T>()
    );
    T::from_node(Node::root(&tree))
}

/// A position in the JSON tree together with the path that led to it.
#[derive(Debug, Clone)]
pub struct Node<'a> {
    value: &'a Value,
    path: String,
}

impl<'a> Node<'a> {
    pub fn root(value: &'a Value) -> Self {
        Node {
            value,
            path: String::new(),
        }
    }

    /// Dotted path of this node, e.g. `albums[0].external-ids[1].id`.
    pub fn path(&self) -> &str {
        if self.path.is_empty() {
            "<root>"
        } else {
            &self.path
        }
    }

    fn mismatch(&self, reason: impl Into<String>) -> Error {
        Error::SchemaMismatch {
            path: self.path().to_string(),
            reason: reason.into(),
        }
    }

    fn expected(&self, what: &str) -> Error {
        self.mismatch(format!("expected {what}, found {}", json_type(self.value)))
    }

    fn numeral_error(&self, err: NumeralError) -> Error {
        Error::NumeralParse {
            path: self.path().to_string(),
            value: err.value,
            kind: err.kind,
        }
    }

    fn object(&self) -> Result<&'a Map<String, Value>> {
        self.value.as_object().ok_or_else(|| self.expected("object"))
    }

    fn child_path(&self, key: &str) -> String {
        if self.path.is_empty() {
            key.to_string()
        } else {
            format!("{}.{key}", self.path)
        }
    }

    fn child(&self, key: &str, value: &'a Value) -> Node<'a> {
        Node {
            value,
            path: self.child_path(key),
        }
    }

    /// Project a required field. Missing keys and explicit `null` are both errors.
    pub fn required<T>(
        &self,
        key: &str,
        project: impl FnOnce(Node<'a>) -> Result<T>,
    ) -> Result<T> {
        match self.object()?.get(key) {
            Some(Value::Null) | None => Err(Error::SchemaMismatch {
                path: self.child_path(key),
                reason: "missing required field".to_string(),
            }),
            Some(value) => project(self.child(key, value)),
        }
    }

    /// Project an optional field; missing keys and `null` become `None`.
    pub fn optional<T>(
        &self,
        key: &str,
        project: impl FnOnce(Node<'a>) -> Result<T>,
    ) -> Result<Option<T>> {
        match self.object()?.get(key) {
            Some(Value::Null) | None => Ok(None),
            Some(value) => project(self.child(key, value)).map(Some),
        }
    }

    pub fn string(self) -> Result<String> {
        self.value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| self.expected("string"))
    }

    pub fn boolean(self) -> Result<bool> {
        self.value.as_bool().ok_or_else(|| self.expected("boolean"))
    }

    pub fn float(self) -> Result<f64> {
        self.value.as_f64().ok_or_else(|| self.expected("number"))
    }

    pub fn integer(self) -> Result<i64> {
        self.value.as_i64().ok_or_else(|| self.expected("integer"))
    }

    /// A float that the service sends as a JSON string.
    pub fn float_string(self) -> Result<FloatString> {
        let s = self.value.as_str().ok_or_else(|| self.expected("numeric string"))?;
        numeral::parse_float(s)
            .map(FloatString)
            .map_err(|e| self.numeral_error(e))
    }

    /// An integer that the service sends as a JSON string.
    pub fn int_string(self) -> Result<IntString> {
        let s = self.value.as_str().ok_or_else(|| self.expected("numeric string"))?;
        numeral::parse_int(s)
            .map(IntString)
            .map_err(|e| self.numeral_error(e))
    }

    pub fn array<T: Decode>(self) -> Result<Vec<T>> {
        let items = self.value.as_array().ok_or_else(|| self.expected("array"))?;
        items
            .iter()
            .enumerate()
            .map(|(i, value)| {
                T::from_node(Node {
                    value,
                    path: format!("{}[{i}]", self.path()),
                })
            })
            .collect()
    }

    pub fn decode<T: Decode>(self) -> Result<T> {
        T::from_node(self)
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl Decode for ExternalId {
    fn from_node(node: Node<'_>) -> Result<Self> {
        Ok(ExternalId {
            id_type: node.required("type", Node::string)?,
            id: node.required("id", Node::int_string)?,
        })
    }
}

impl Decode for Artist {
    fn from_node(node: Node<'_>) -> Result<Self> {
        Ok(Artist {
            href: node.required("href", Node::string)?,
            name: node.required("name", Node::string)?,
            popularity: node.optional("popularity", Node::float_string)?,
        })
    }
}

impl Decode for Availability {
    fn from_node(node: Node<'_>) -> Result<Self> {
        Ok(Availability {
            territories: node.required("territories", Node::string)?,
        })
    }
}

impl Decode for Album {
    fn from_node(node: Node<'_>) -> Result<Self> {
        Ok(Album {
            name: node.required("name", Node::string)?,
            released: node.optional("released", Node::string)?,
            popularity: node.optional("popularity", Node::float_string)?,
            external_ids: node.required("external-ids", Node::array)?,
            length: node.optional("length", Node::float)?,
            href: node.required("href", Node::string)?,
            artists: node.optional("artists", Node::array)?,
            availability: node.required("availability", Node::decode)?,
        })
    }
}

impl Decode for Track {
    fn from_node(node: Node<'_>) -> Result<Self> {
        Ok(Track {
            album: node.required("album", Node::decode)?,
            name: node.required("name", Node::string)?,
            external_ids: node.required("external-ids", Node::array)?,
            popularity: node.required("popularity", Node::float_string)?,
            explicit: node.optional("explicit", Node::boolean)?,
            length: node.required("length", Node::float)?,
            href: node.required("href", Node::string)?,
            artists: node.required("artists", Node::array)?,
            track_number: node.required("track-number", Node::int_string)?,
            availability: node.optional("availability", Node::decode)?,
        })
    }
}

impl Decode for SearchInfo {
    fn from_node(node: Node<'_>) -> Result<Self> {
        Ok(SearchInfo {
            num_results: node.required("num_results", Node::integer)?,
            limit: node.required("limit", Node::integer)?,
            offset: node.required("offset", Node::integer)?,
            query: node.required("query", Node::string)?,
            result_type: node.required("type", Node::string)?,
            page: node.required("page", Node::integer)?,
        })
    }
}

impl Decode for SearchAlbumsResponse {
    fn from_node(node: Node<'_>) -> Result<Self> {
        Ok(SearchAlbumsResponse {
            info: node.required("info", Node::decode)?,
            albums: node.required("albums", Node::array)?,
        })
    }
}

impl Decode for SearchArtistsResponse {
    fn from_node(node: Node<'_>) -> Result<Self> {
        Ok(SearchArtistsResponse {
            info: node.required("info", Node::decode)?,
            artists: node.required("artists", Node::array)?,
        })
    }
}

impl Decode for SearchTracksResponse {
    fn from_node(node: Node<'_>) -> Result<Self> {
        Ok(SearchTracksResponse {
            info: node.required("info", Node::decode)?,
            tracks: node.required("tracks", Node::array)?,
        })
    }
}

impl Decode for LookupInfo {
    fn from_node(node: Node<'_>) -> Result<Self> {
        Ok(LookupInfo {
            entity_type: node.required("type", Node::string)?,
        })
    }
}

impl Decode for LookupArtistResponse {
    fn from_node(node: Node<'_>) -> Result<Self> {
        Ok(LookupArtistResponse {
            info: node.required("info", Node::decode)?,
            artist: node.required("artist", Node::decode)?,
        })
    }
}

impl Decode for LookupTrackResponse {
    fn from_node(node: Node<'_>) -> Result<Self> {
        Ok(LookupTrackResponse {
            info: node.required("info", Node::decode)?,
            track: node.required("track", Node::decode)?,
        })
    }
}

impl Decode for LookupAlbumResponse {
    fn from_node(node: Node<'_>) -> Result<Self> {
        Ok(LookupAlbumResponse {
            info: node.required("info", Node::decode)?,
            album: node.required("album", Node::decode)?,
        })
    }
}

impl Decode for AlbumLookupView {
    fn from_node(node: Node<'_>) -> Result<Self> {
        Ok(AlbumLookupView {
            artist_id: node.optional("artist-id", Node::string)?,
            name: node.required("name", Node::string)?,
            artist: node.required("artist", Node::string)?,
            external_ids: node.required("external-ids", Node::array)?,
            released: node.optional("released", Node::string)?,
            tracks: node.optional("tracks", Node::array)?,
        })
    }
}

impl Decode for RawExternalId {
    fn from_node(node: Node<'_>) -> Result<Self> {
        Ok(RawExternalId {
            id_type: node.required("type", Node::string)?,
            id: node.required("id", Node::string)?,
        })
    }
}

impl Decode for AlbumLookupTrack {
    fn from_node(node: Node<'_>) -> Result<Self> {
        Ok(AlbumLookupTrack {
            available: node.required("available", Node::boolean)?,
            href: node.required("href", Node::string)?,
            artists: node.required("artists", Node::array)?,
            name: node.required("name", Node::string)?,
        })
    }
}

impl Decode for TrackArtistRef {
    fn from_node(node: Node<'_>) -> Result<Self> {
        Ok(TrackArtistRef {
            href: node.required("href", Node::string)?,
            name: node.required("name", Node::string)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::numeral::NumeralKind;
    use proptest::prelude::*;

    const TRACK: &str = r#"{
        "album": {
            "released": "1997",
            "href": "spotify:album:6dVIqQ8qmQ5GBnJ9shOYGE",
            "name": "OK Computer",
            "external-ids": [],
            "availability": {"territories": "GB US"}
        },
        "name": "Karma Police",
        "popularity": "0.79",
        "explicit": false,
        "external-ids": [{"type": "isrc", "id": "4321"}],
        "length": 264.066,
        "href": "spotify:track:3SVAN3BRByDmHOhKyIDxfC",
        "artists": [{"href": "spotify:artist:4Z8W4fKeB5YxbusRsdQVPb", "name": "Radiohead"}],
        "track-number": "6"
    }"#;

    fn search_albums_body(popularity: &str) -> String {
        format!(
            r#"{{"info":{{"num_results":1,"limit":10,"offset":0,"query":"x","type":"album","page":1}},
               "albums":[{{"name":"Foo",{popularity}"href":"spotify:album:1",
               "external-ids":[{{"type":"catalog","id":"42"}}],
               "availability":{{"territories":"US"}}}}]}}"#
        )
    }

    #[test]
    fn test_decode_search_albums() {
        let body = search_albums_body(r#""popularity":"0.53","#);
        let resp: SearchAlbumsResponse = decode(body.as_bytes()).unwrap();
        assert_eq!(resp.info.num_results, 1);
        assert_eq!(resp.info.result_type, "album");
        let album = &resp.albums[0];
        assert_eq!(album.popularity, Some(FloatString(0.53)));
        assert_eq!(album.external_ids[0].id, IntString(42));
        assert_eq!(album.external_ids[0].id_type, "catalog");
        assert_eq!(album.released, None);
        assert_eq!(album.length, None);
        assert_eq!(album.artists, None);
    }

    #[test]
    fn test_zero_popularity_is_distinct_from_absent() {
        let zero: SearchAlbumsResponse =
            decode(search_albums_body(r#""popularity":"0","#).as_bytes()).unwrap();
        let absent: SearchAlbumsResponse = decode(search_albums_body("").as_bytes()).unwrap();
        let null: SearchAlbumsResponse =
            decode(search_albums_body(r#""popularity":null,"#).as_bytes()).unwrap();
        assert_eq!(zero.albums[0].popularity, Some(FloatString(0.0)));
        assert_eq!(absent.albums[0].popularity, None);
        assert_eq!(null.albums[0].popularity, None);
    }

    #[test]
    fn test_invalid_numeral_is_an_error_not_a_crash() {
        let body = search_albums_body(r#""popularity":"N/A","#);
        match decode::<SearchAlbumsResponse>(body.as_bytes()) {
            Err(Error::NumeralParse { path, value, kind }) => {
                assert_eq!(path, "albums[0].popularity");
                assert_eq!(value, "N/A");
                assert_eq!(kind, NumeralKind::Float);
            }
            other => panic!("expected NumeralParse, got {other:?}"),
        }
    }

    #[test]
    fn test_number_where_string_expected_is_schema_mismatch() {
        let body = search_albums_body(r#""popularity":0.5,"#);
        match decode::<SearchAlbumsResponse>(body.as_bytes()) {
            Err(Error::SchemaMismatch { path, reason }) => {
                assert_eq!(path, "albums[0].popularity");
                assert_eq!(reason, "expected numeric string, found number");
            }
            other => panic!("expected SchemaMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_required_field_is_schema_mismatch() {
        let body = br#"{"info":{"type":"artist"},"artist":{"name":"Radiohead"}}"#;
        match decode::<LookupArtistResponse>(body) {
            Err(Error::SchemaMismatch { path, reason }) => {
                assert_eq!(path, "artist.href");
                assert_eq!(reason, "missing required field");
            }
            other => panic!("expected SchemaMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_root_must_be_object() {
        match decode::<LookupArtistResponse>(b"[1, 2]") {
            Err(Error::SchemaMismatch { path, reason }) => {
                assert_eq!(path, "<root>");
                assert_eq!(reason, "expected object, found array");
            }
            other => panic!("expected SchemaMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            decode::<SearchTracksResponse>(b"not json"),
            Err(Error::MalformedJson(_))
        ));
        assert!(matches!(
            decode::<LookupAlbumResponse>(b""),
            Err(Error::MalformedJson(_))
        ));
    }

    #[test]
    fn test_decode_lookup_track() {
        let body = format!(r#"{{"info":{{"type":"track"}},"track":{TRACK}}}"#);
        let resp: LookupTrackResponse = decode(body.as_bytes()).unwrap();
        assert_eq!(resp.info.entity_type, "track");
        let track = resp.track;
        assert_eq!(track.popularity, FloatString(0.79));
        assert_eq!(track.track_number, IntString(6));
        assert_eq!(track.explicit, Some(false));
        assert_eq!(track.availability, None);
        assert_eq!(track.album.released.as_deref(), Some("1997"));
        assert_eq!(track.artists[0].popularity, None);
    }

    #[test]
    fn test_bad_track_number_path() {
        let body = format!(
            r#"{{"info":{{"num_results":1,"limit":100,"offset":0,"query":"karma","type":"track","page":1}},"tracks":[{}]}}"#,
            TRACK.replace(r#""track-number": "6""#, r#""track-number": "six""#)
        );
        match decode::<SearchTracksResponse>(body.as_bytes()) {
            Err(Error::NumeralParse { path, kind, .. }) => {
                assert_eq!(path, "tracks[0].track-number");
                assert_eq!(kind, NumeralKind::Int);
            }
            other => panic!("expected NumeralParse, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_lookup_album_view() {
        let body = br#"{
            "info": {"type": "album"},
            "album": {
                "artist-id": "spotify:artist:4Z8W4fKeB5YxbusRsdQVPb",
                "name": "OK Computer",
                "artist": "Radiohead",
                "external-ids": [{"type": "upc", "id": "0724385522925"}],
                "released": "1997",
                "tracks": [{
                    "available": true,
                    "href": "spotify:track:3SVAN3BRByDmHOhKyIDxfC",
                    "artists": [{"href": "spotify:artist:4Z8W4fKeB5YxbusRsdQVPb", "name": "Radiohead"}],
                    "name": "Karma Police"
                }]
            }
        }"#;
        let resp: LookupAlbumResponse = decode(body).unwrap();
        let album = resp.album;
        assert_eq!(album.artist, "Radiohead");
        // kept verbatim, leading zero included
        assert_eq!(album.external_ids[0].id, "0724385522925");
        let tracks = album.tracks.unwrap();
        assert!(tracks[0].available);
        assert_eq!(tracks[0].artists[0].name, "Radiohead");
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let body = br#"{"info":{"type":"artist","extra":1},"artist":{"href":"h","name":"n","genre":"rock"}}"#;
        let resp: LookupArtistResponse = decode(body).unwrap();
        assert_eq!(resp.artist.name, "n");
    }

    #[test]
    fn test_serialize_then_decode_is_identity() {
        let body = format!(
            r#"{{"info":{{"num_results":1,"limit":100,"offset":0,"query":"karma","type":"track","page":1}},"tracks":[{TRACK}]}}"#
        );
        let first: SearchTracksResponse = decode(body.as_bytes()).unwrap();
        let encoded = serde_json::to_vec(&first).unwrap();
        let second: SearchTracksResponse = decode(&encoded).unwrap();
        assert_eq!(first, second);
    }

    proptest! {
        /// Popularity and ids survive encode/decode in the string-numeral convention
        #[test]
        fn artist_and_ids_round_trip(
            popularity in proptest::option::of(any::<f64>().prop_filter("finite", |n| n.is_finite())),
            id in any::<i64>(),
        ) {
            let album = Album {
                name: "Kid A".to_string(),
                released: None,
                popularity: popularity.map(FloatString),
                external_ids: vec![ExternalId { id_type: "upc".to_string(), id: IntString(id) }],
                length: None,
                href: "spotify:album:1".to_string(),
                artists: Some(vec![Artist {
                    href: "spotify:artist:1".to_string(),
                    name: "Radiohead".to_string(),
                    popularity: popularity.map(FloatString),
                }]),
                availability: Availability { territories: "GB".to_string() },
            };
            let encoded = serde_json::to_vec(&album).unwrap();
            let decoded: Album = decode(&encoded).unwrap();
            prop_assert_eq!(decoded, album);
        }

        /// A valid numeral string decodes to exactly what the standard parser yields
        #[test]
        fn popularity_decodes_to_parsed_value(s in "[0-9]{1,3}\\.[0-9]{1,6}") {
            let body = format!(r#"{{"href":"h","name":"n","popularity":"{s}"}}"#);
            let artist: Artist = decode(body.as_bytes()).unwrap();
            prop_assert_eq!(artist.popularity, Some(FloatString(s.parse().unwrap())));
        }
    }
}
