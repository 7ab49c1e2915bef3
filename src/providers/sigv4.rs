/*!
 * AWS Signature Version 4 request signing.
 *
 * Only what a JSON `POST` to a single service path needs: no query string,
 * a fixed set of signed headers, and a hashed body.
 */

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

use crate::errors::ProviderError;

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "AWS4-HMAC-SHA256";

/// Credentials used to sign requests
#[derive(Clone)]
pub struct Credentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field("session_token", &self.session_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Headers to attach to a signed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    pub amz_date: String,
    pub authorization: String,
    pub session_token: Option<String>,
}

/// Request pieces that go into the signature
#[derive(Debug, Clone)]
pub struct SigningInput<'a> {
    pub method: &'a str,
    pub host: &'a str,
    pub path: &'a str,
    pub content_type: &'a str,
    pub body: &'a [u8],
    pub region: &'a str,
    pub service: &'a str,
}

pub fn sha256_hex(data: &[u8]) -> String {
    hex(&Sha256::digest(data))
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

fn hmac(key: &[u8], data: &[u8]) -> Result<Vec<u8>, ProviderError> {
    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|e| ProviderError::AuthenticationError(format!("Invalid signing key: {}", e)))?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}

/// Derive the per-day, per-region, per-service signing key
pub fn signing_key(secret: &str, date_stamp: &str, region: &str, service: &str) -> Result<Vec<u8>, ProviderError> {
    let k_date = hmac(format!("AWS4{}", secret).as_bytes(), date_stamp.as_bytes())?;
    let k_region = hmac(&k_date, region.as_bytes())?;
    let k_service = hmac(&k_region, service.as_bytes())?;
    hmac(&k_service, b"aws4_request")
}

/// Canonical request string for the input at the given timestamp
pub fn canonical_request(input: &SigningInput<'_>, amz_date: &str, session_token: Option<&str>) -> (String, String) {
    let mut headers = vec![
        ("content-type", input.content_type.to_string()),
        ("host", input.host.to_string()),
        ("x-amz-date", amz_date.to_string()),
    ];
    if let Some(token) = session_token {
        headers.push(("x-amz-security-token", token.to_string()));
    }

    let canonical_headers: String = headers.iter()
        .map(|(name, value)| format!("{}:{}\n", name, value.trim()))
        .collect();
    let signed_headers = headers.iter()
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join(";");

    let request = format!(
        "{}\n{}\n\n{}\n{}\n{}",
        input.method,
        input.path,
        canonical_headers,
        signed_headers,
        sha256_hex(input.body),
    );
    (request, signed_headers)
}

/// Sign a request at the given time
pub fn sign(
    input: &SigningInput<'_>,
    credentials: &Credentials,
    now: DateTime<Utc>,
) -> Result<SignedHeaders, ProviderError> {
    let amz_date = now.format("%Y%m%dT%H%M%SZ").to_string();
    let date_stamp = now.format("%Y%m%d").to_string();
    let scope = format!("{}/{}/{}/aws4_request", date_stamp, input.region, input.service);

    let (canonical, signed_headers) =
        canonical_request(input, &amz_date, credentials.session_token.as_deref());

    let string_to_sign = format!(
        "{}\n{}\n{}\n{}",
        ALGORITHM,
        amz_date,
        scope,
        sha256_hex(canonical.as_bytes())
    );

    let key = signing_key(&credentials.secret_access_key, &date_stamp, input.region, input.service)?;
    let signature = hex(&hmac(&key, string_to_sign.as_bytes())?);

    Ok(SignedHeaders {
        authorization: format!(
            "{} Credential={}/{}, SignedHeaders={}, Signature={}",
            ALGORITHM, credentials.access_key_id, scope, signed_headers, signature
        ),
        amz_date,
        session_token: credentials.session_token.clone(),
    })
}
