use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use log::debug;
use url::Url;

use crate::constants::SHARE_QUERY_KEY;
use crate::errors::{Error, Result};
use crate::portfolio::holdings::NormalizedHolding;

/// Encodes holdings into a share payload.
pub fn encode_holdings(holdings: &[NormalizedHolding]) -> Result<String> {
    let json = serde_json::to_string(holdings)?;
    let escaped = encode_uri_component(&json);
    Ok(BASE64.encode(escaped.as_bytes()))
}

/// Percent-encodes like the browser's `encodeURIComponent`, which leaves
/// `!'()*` unescaped. Links built here and in the web client are then
/// byte-identical.
fn encode_uri_component(input: &str) -> String {
    let mut escaped = urlencoding::encode(input).into_owned();
    for (encoded, mark) in [("%21", "!"), ("%27", "'"), ("%28", "("), ("%29", ")"), ("%2A", "*")] {
        if escaped.contains(encoded) {
            escaped = escaped.replace(encoded, mark);
        }
    }
    escaped
}

/// Decodes a share payload.
///
/// Returns `None` for a missing or empty parameter and for any payload that
/// does not decode to a JSON array of holdings. Never fails.
pub fn decode_holdings(param: Option<&str>) -> Option<Vec<NormalizedHolding>> {
    let param = param.map(str::trim).filter(|p| !p.is_empty())?;
    match try_decode_holdings(param) {
        Ok(holdings) => Some(holdings),
        Err(e) => {
            debug!("[Share] Ignoring shared payload: {}", e);
            None
        }
    }
}

/// Strict variant of [`decode_holdings`] reporting why a payload was rejected.
pub fn try_decode_holdings(param: &str) -> Result<Vec<NormalizedHolding>> {
    let bytes = BASE64
        .decode(param)
        .map_err(|e| Error::MalformedShareLink(format!("invalid base64: {}", e)))?;
    let escaped = String::from_utf8(bytes)
        .map_err(|e| Error::MalformedShareLink(format!("payload is not UTF-8: {}", e)))?;
    let json = urlencoding::decode(&escaped)
        .map_err(|e| Error::MalformedShareLink(format!("invalid percent-encoding: {}", e)))?;
    let value: serde_json::Value = serde_json::from_str(&json)
        .map_err(|e| Error::MalformedShareLink(format!("invalid JSON: {}", e)))?;

    if !value.is_array() {
        return Err(Error::MalformedShareLink(
            "payload is not a list of holdings".to_string(),
        ));
    }

    serde_json::from_value(value)
        .map_err(|e| Error::MalformedShareLink(format!("invalid holding: {}", e)))
}

/// Returns `base_url` with the share parameter set to the encoded holdings,
/// replacing any payload already present.
pub fn build_share_url(base_url: &str, holdings: &[NormalizedHolding]) -> Result<String> {
    let mut url = Url::parse(base_url)
        .map_err(|e| Error::InvalidConfigValue(format!("share URL '{}': {}", base_url, e)))?;
    let encoded = encode_holdings(holdings)?;

    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != SHARE_QUERY_KEY)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    url.query_pairs_mut()
        .clear()
        .extend_pairs(kept)
        .append_pair(SHARE_QUERY_KEY, &encoded);

    Ok(url.to_string())
}

/// Reads shared holdings out of a full URL, if it carries a usable payload.
pub fn holdings_from_share_url(url: &str) -> Option<Vec<NormalizedHolding>> {
    let url = Url::parse(url).ok()?;
    let param = url
        .query_pairs()
        .find(|(key, _)| key == SHARE_QUERY_KEY)
        .map(|(_, value)| value.into_owned());
    decode_holdings(param.as_deref())
}

/// Shared holdings when present, otherwise the caller's own dataset.
pub fn resolve_shared_holdings(
    shared: Option<Vec<NormalizedHolding>>,
    fallback: Vec<NormalizedHolding>,
) -> Vec<NormalizedHolding> {
    shared.unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample() -> Vec<NormalizedHolding> {
        vec![
            NormalizedHolding {
                ticker: Some("AAA".to_string()),
                name: "Alpha & Omega Holdings".to_string(),
                security_id: "sec-a".to_string(),
                sector: Some("Finance".to_string()),
                price: Some(dec!(12.5)),
                percentage: dec!(62.5),
                percentage_pl: dec!(-20.25),
            },
            NormalizedHolding {
                ticker: None,
                name: "Security sec-b".to_string(),
                security_id: "sec-b".to_string(),
                sector: None,
                price: None,
                percentage: dec!(37.5),
                percentage_pl: dec!(120.25),
            },
        ]
    }

    #[test]
    fn encoded_payload_decodes_to_same_holdings() {
        let holdings = sample();
        let encoded = encode_holdings(&holdings).unwrap();

        assert_eq!(decode_holdings(Some(&encoded)), Some(holdings));
    }

    #[test]
    fn decodes_browser_payload() {
        // encodeURIComponent output for a holding written by the web client
        let escaped = "%5B%7B%22name%22%3A%22Security%20A%22%2C%22securityId%22%3A%22A%22%2C%22percentage%22%3A100%2C%22percentagePL%22%3Anull%7D%5D";
        let param = BASE64.encode(escaped);

        let holdings = decode_holdings(Some(&param)).unwrap();

        assert_eq!(holdings.len(), 1);
        assert_eq!(holdings[0].name, "Security A");
        assert_eq!(holdings[0].ticker, None);
        assert_eq!(holdings[0].percentage, dec!(100));
        assert_eq!(holdings[0].percentage_pl, dec!(0));
    }

    #[test]
    fn escapes_like_encode_uri_component() {
        let mut holding = sample().remove(1);
        holding.name = "O'Neil (Class A)*! 100%".to_string();

        let encoded = encode_holdings(&[holding.clone()]).unwrap();
        let escaped = String::from_utf8(BASE64.decode(&encoded).unwrap()).unwrap();

        assert!(escaped.contains("O'Neil%20(Class%20A)*!%20100%25"));
        assert!(escaped.starts_with("%5B%7B%22ticker%22%3Anull%2C%22name%22%3A%22O'Neil"));
        assert_eq!(decode_holdings(Some(&encoded)), Some(vec![holding]));
    }

    #[test]
    fn truncated_payload_yields_no_data() {
        let encoded = encode_holdings(&sample()).unwrap();
        let truncated = &encoded[..encoded.len() - 3];

        assert_eq!(decode_holdings(Some(truncated)), None);
        assert!(matches!(
            try_decode_holdings(truncated),
            Err(Error::MalformedShareLink(_))
        ));
    }

    #[test]
    fn rejects_malformed_payloads() {
        assert_eq!(decode_holdings(None), None);
        assert_eq!(decode_holdings(Some("")), None);
        assert_eq!(decode_holdings(Some("not base64 at all!")), None);
        // Valid base64, invalid JSON
        assert_eq!(decode_holdings(Some(&BASE64.encode("%7Bnope"))), None);
        // Valid JSON, not an array
        assert_eq!(decode_holdings(Some(&BASE64.encode("%7B%7D"))), None);
        // Broken percent-encoding into invalid UTF-8
        assert_eq!(decode_holdings(Some(&BASE64.encode("%FF%FE"))), None);
        // Array of the wrong shape
        assert_eq!(decode_holdings(Some(&BASE64.encode("%5B1%2C2%5D"))), None);
    }

    #[test]
    fn share_url_replaces_existing_payload() {
        let first = build_share_url("https://roast.example/portfolio?view=bubbles&s=stale", &sample())
            .unwrap();

        let url = Url::parse(&first).unwrap();
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(pairs.iter().filter(|(k, _)| k == SHARE_QUERY_KEY).count(), 1);
        assert!(pairs.iter().any(|(k, v)| k == "view" && v == "bubbles"));

        assert_eq!(holdings_from_share_url(&first), Some(sample()));
    }

    #[test]
    fn share_url_rejects_relative_base() {
        assert!(matches!(
            build_share_url("/portfolio", &sample()),
            Err(Error::InvalidConfigValue(_))
        ));
    }

    #[test]
    fn falls_back_to_default_dataset() {
        let fresh = sample();
        let shared = holdings_from_share_url("https://roast.example/?s=%%%");

        let effective = resolve_shared_holdings(shared, fresh.clone());
        assert_eq!(effective, fresh);

        let from_link = resolve_shared_holdings(Some(vec![fresh[1].clone()]), fresh);
        assert_eq!(from_link.len(), 1);
    }
}
