use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::Deserialize;

/// Claims read from the token payload without signature verification.
/// Display hint only; the backend re-derives authorization per request.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct SessionClaims {
    #[serde(default, alias = "_id", alias = "sub")]
    pub id: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

pub fn decode_claims(token: &str) -> Option<SessionClaims> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return None;
    }
    let payload = URL_SAFE_NO_PAD.decode(parts[1]).ok()?;
    serde_json::from_slice(&payload).ok()
}
