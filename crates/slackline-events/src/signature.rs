//! Request signature verification
//!
//! Slack signs every Events API request with the app's signing secret:
//! `X-Slack-Signature: v0=hex(HMAC-SHA256(secret, "v0:{timestamp}:{body}"))`.

use crate::error::{Error, Result};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::time::{SystemTime, UNIX_EPOCH};
use subtle::ConstantTimeEq;
use tracing::{debug, warn};

/// Maximum allowed timestamp age in seconds (5 minutes)
pub const MAX_TIMESTAMP_AGE_SECS: u64 = 300;

/// Header carrying the request signature
pub const SIGNATURE_HEADER: &str = "x-slack-signature";

/// Header carrying the request timestamp
pub const TIMESTAMP_HEADER: &str = "x-slack-request-timestamp";

const SIGNATURE_VERSION: &str = "v0";

type HmacSha256 = Hmac<Sha256>;

/// Verifies Slack request signatures against a signing secret
#[derive(Clone)]
pub struct SecretsVerifier {
    signing_secret: String,
}

impl std::fmt::Debug for SecretsVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretsVerifier")
            .field("signing_secret", &"[REDACTED]")
            .finish()
    }
}

impl SecretsVerifier {
    /// Create a verifier for the app's signing secret
    #[must_use]
    pub fn new(signing_secret: impl Into<String>) -> Self {
        Self {
            signing_secret: signing_secret.into(),
        }
    }

    /// Expected `X-Slack-Signature` value for a timestamp and body
    pub fn sign(&self, timestamp: &str, body: &str) -> Result<String> {
        let mut mac = HmacSha256::new_from_slice(self.signing_secret.as_bytes())
            .map_err(|_| Error::Signature("invalid signing secret".to_string()))?;
        mac.update(format!("{SIGNATURE_VERSION}:{timestamp}:{body}").as_bytes());
        Ok(format!(
            "{SIGNATURE_VERSION}={}",
            hex::encode(mac.finalize().into_bytes())
        ))
    }

    /// Verify a request signature against the current time
    pub fn verify(&self, timestamp: &str, body: &str, signature: &str) -> Result<()> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|_| Error::Signature("system time error".to_string()))?
            .as_secs();
        self.verify_at(now, timestamp, body, signature)
    }

    /// Verify a request signature as of `now` (epoch seconds)
    pub fn verify_at(&self, now: u64, timestamp: &str, body: &str, signature: &str) -> Result<()> {
        let ts: u64 = timestamp
            .parse()
            .map_err(|_| Error::Signature("invalid timestamp".to_string()))?;

        if now.abs_diff(ts) > MAX_TIMESTAMP_AGE_SECS {
            warn!(
                timestamp = %ts,
                now = %now,
                "Slack request timestamp outside replay window"
            );
            return Err(Error::Signature(
                "request timestamp is too old or in the future".to_string(),
            ));
        }

        let expected = self.sign(timestamp, body)?;
        if !bool::from(expected.as_bytes().ct_eq(signature.as_bytes())) {
            warn!("Slack signature verification failed");
            return Err(Error::Signature("invalid request signature".to_string()));
        }

        debug!("Slack signature verified");
        Ok(())
    }

    /// Verify using request headers (looked up case-insensitively)
    pub fn verify_headers(&self, headers: &[(String, String)], body: &str) -> Result<()> {
        let timestamp = find_header(headers, TIMESTAMP_HEADER)
            .ok_or_else(|| Error::Signature("missing X-Slack-Request-Timestamp header".into()))?;
        let signature = find_header(headers, SIGNATURE_HEADER)
            .ok_or_else(|| Error::Signature("missing X-Slack-Signature header".into()))?;

        self.verify(timestamp, body, signature)
    }
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}
