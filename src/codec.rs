//! Shareable-link encoding of the candle layout
//!
//! The token is the JSON candle list, percent-encoded so it can sit in a
//! query parameter: `?candles=%5B%7B%22x%22%3A120...`. Links made by the old
//! page decode unchanged.

use crate::consts::CANDLES_PARAM;
use crate::error::CodecError;
use crate::scene::Candle;
use crate::settings::query_pairs;

/// Candles to URL-safe token
pub fn encode(candles: &[Candle]) -> String {
    // A Vec of plain structs cannot fail to serialize
    let json = serde_json::to_string(candles).unwrap_or_else(|_| "[]".to_string());
    urlencoding::encode(&json).into_owned()
}

/// Token to candles, with the reason on failure
pub fn try_decode(token: &str) -> Result<Vec<Candle>, CodecError> {
    let json = urlencoding::decode(token)?;
    let candles: Vec<Candle> = serde_json::from_str(&json)?;
    if let Some(index) = candles
        .iter()
        .position(|c| !c.x.is_finite() || !c.y.is_finite())
    {
        return Err(CodecError::NonFinite { index });
    }
    Ok(candles)
}

/// Token to candles; malformed input is logged and yields `None`
pub fn decode(token: &str) -> Option<Vec<Candle>> {
    match try_decode(token) {
        Ok(candles) => Some(candles),
        Err(e) => {
            log::warn!("Invalid candle data in URL: {e}");
            None
        }
    }
}

/// Decoded value of the `candles` query parameter
pub fn query_token(search: &str) -> Option<String> {
    query_pairs(search)
        .find(|(key, _)| key == CANDLES_PARAM)
        .map(|(_, value)| value.into_owned())
}

/// Initial layout for a page: empty unless the query carries a valid token.
/// The parameter value is decoded once more by `decode`, as old links expect.
pub fn load_from_query(search: &str) -> Vec<Candle> {
    query_token(search)
        .and_then(|token| decode(&token))
        .unwrap_or_default()
}

/// Full share link for the current page
pub fn share_url(origin: &str, path: &str, candles: &[Candle]) -> String {
    format!("{origin}{path}?{CANDLES_PARAM}={}", encode(candles))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample() -> Vec<Candle> {
        vec![
            Candle { x: 120.0, y: 20.0, lit: true },
            Candle { x: 250.5, y: -3.25, lit: false },
        ]
    }

    #[test]
    fn test_token_is_url_safe() {
        let token = encode(&sample());
        assert!(
            token
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || "-_.~%".contains(c)),
            "unexpected char in {token}"
        );
    }

    #[test]
    fn test_roundtrip() {
        assert_eq!(decode(&encode(&sample())), Some(sample()));
        assert_eq!(decode(&encode(&[])), Some(vec![]));
    }

    #[test]
    fn test_decodes_legacy_link() {
        // encodeURIComponent(JSON.stringify([{x:120,y:20,lit:true}]))
        let token = "%5B%7B%22x%22%3A120%2C%22y%22%3A20%2C%22lit%22%3Atrue%7D%5D";
        assert_eq!(
            decode(token),
            Some(vec![Candle { x: 120.0, y: 20.0, lit: true }])
        );
    }

    #[test]
    fn test_malformed_is_none() {
        assert_eq!(decode("not-valid-token"), None);
        assert_eq!(decode("%7B%22x%22%3A1%7D"), None); // object, not a list
        assert_eq!(decode("%5B%7B%22x%22%3A1%7D%5D"), None); // missing fields
        assert!(matches!(try_decode("%FF%FE"), Err(CodecError::Percent(_))));
        assert!(matches!(try_decode("nope"), Err(CodecError::Json(_))));
    }

    #[test]
    fn test_load_from_query() {
        let search = format!("?foo=1&candles={}", encode(&sample()));
        assert_eq!(load_from_query(&search), sample());
        assert!(load_from_query("?candles=garbage").is_empty());
        assert!(load_from_query("").is_empty());
        assert_eq!(query_token("?a=b"), None);
    }

    #[test]
    fn test_query_token_is_form_decoded() {
        assert_eq!(query_token("?candles=+%5B%5D").as_deref(), Some(" []"));
        assert_eq!(load_from_query("?candles=+%5B%5D"), vec![]);

        // A doubly-escaped token still loads after the extra decode
        let twice = urlencoding::encode(&encode(&sample())).into_owned();
        assert_eq!(load_from_query(&format!("?candles={twice}")), sample());
    }

    #[test]
    fn test_share_url() {
        let url = share_url("https://cake.example", "/party/", &sample());
        let (base, search) = url.split_once('?').unwrap();
        assert_eq!(base, "https://cake.example/party/");
        assert_eq!(load_from_query(search), sample());
    }

    proptest! {
        #[test]
        fn prop_roundtrip(
            raw in prop::collection::vec((-1.0e6f32..1.0e6, -1.0e6f32..1.0e6, any::<bool>()), 0..40)
        ) {
            let candles: Vec<Candle> = raw.into_iter().map(|(x, y, lit)| Candle { x, y, lit }).collect();
            prop_assert_eq!(decode(&encode(&candles)), Some(candles));
        }
    }
}
