//! OAuth 1.0a request signing (HMAC-SHA1) for the Cardmarket API

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use hmac::{Hmac, Mac};
use mtg_common::{Error, Result};
use sha1::Sha1;

use crate::config::CardmarketCredentials;

type HmacSha1 = Hmac<Sha1>;

/// Percent-encoding per RFC 3986: only `A-Z a-z 0-9 - _ . ~` pass through
pub fn percent_encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Signs requests with the app and access tokens
pub struct OAuthSigner {
    credentials: CardmarketCredentials,
}

impl OAuthSigner {
    pub fn new(credentials: CardmarketCredentials) -> Self {
        Self { credentials }
    }

    /// `Authorization` header value for a request made now
    pub fn authorization(
        &self,
        method: &str,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<String> {
        let nonce = uuid::Uuid::new_v4().simple().to_string();
        let timestamp = chrono::Utc::now().timestamp().to_string();
        self.authorization_with(method, url, query, &nonce, &timestamp)
    }

    /// Deterministic variant of [`authorization`](Self::authorization)
    pub fn authorization_with(
        &self,
        method: &str,
        url: &str,
        query: &[(&str, String)],
        nonce: &str,
        timestamp: &str,
    ) -> Result<String> {
        let mut oauth_params: Vec<(&str, String)> = vec![
            ("oauth_consumer_key", self.credentials.app_token.clone()),
            ("oauth_nonce", nonce.to_string()),
            ("oauth_signature_method", "HMAC-SHA1".to_string()),
            ("oauth_timestamp", timestamp.to_string()),
            ("oauth_token", self.credentials.access_token.clone()),
            ("oauth_version", "1.0".to_string()),
        ];

        let mut signed_params = oauth_params.clone();
        signed_params.extend(query.iter().cloned());
        let base = signature_base_string(method, url, &signed_params);
        let signature = self.sign(&base)?;
        oauth_params.push(("oauth_signature", signature));

        let fields: Vec<String> = oauth_params
            .iter()
            .map(|(k, v)| format!("{}=\"{}\"", k, percent_encode(v)))
            .collect();
        Ok(format!("OAuth realm=\"{}\", {}", url, fields.join(", ")))
    }

    fn sign(&self, base: &str) -> Result<String> {
        let key = format!(
            "{}&{}",
            percent_encode(&self.credentials.app_secret),
            percent_encode(&self.credentials.access_token_secret)
        );
        let mut mac = HmacSha1::new_from_slice(key.as_bytes())
            .map_err(|e| Error::Signing(e.to_string()))?;
        mac.update(base.as_bytes());
        Ok(BASE64.encode(mac.finalize().into_bytes()))
    }
}

/// `METHOD&enc(url)&enc(k1=v1&k2=v2...)` with parameters sorted after encoding
pub fn signature_base_string(method: &str, url: &str, params: &[(&str, String)]) -> String {
    let mut encoded: Vec<(String, String)> = params
        .iter()
        .map(|(k, v)| (percent_encode(k), percent_encode(v)))
        .collect();
    encoded.sort();

    let normalized: Vec<String> = encoded
        .into_iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect();

    format!(
        "{}&{}&{}",
        method.to_uppercase(),
        percent_encode(url),
        percent_encode(&normalized.join("&"))
    )
}
