//! Stateless HS256 bearer tokens.
//!
//! Wire format: `base64url(header).base64url(payload).base64url(hmac)`, no
//! padding on any segment. The signature covers the two encoded segments
//! exactly as transmitted.

use std::{collections::BTreeMap, fmt::Display};

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde_json::{Map, Value, value::RawValue};
use sha2::Sha256;
use time::{Duration, OffsetDateTime};

use crate::app_error::TokenError;

type HmacSha256 = Hmac<Sha256>;

pub const ALGORITHM: &str = "HS256";
const TOKEN_TYPE: &str = "JWT";
const DELIMITER: char = '.';

// Field order is the wire order.
#[derive(Serialize)]
struct Header<'a> {
    alg: &'a str,
    typ: &'a str,
}

#[derive(Serialize)]
struct Payload<'a> {
    sub: &'a str,
    exp: i64,
}

/// Claims recovered from a verified token.
#[derive(Debug, Clone, PartialEq)]
pub struct Claims {
    /// Subject as text. A non-string `sub` is kept as its JSON text.
    pub sub: Option<String>,
    /// Expiry in seconds since the epoch, when the payload carries an integer `exp`.
    /// Integers beyond the `i64` range saturate to its bounds.
    pub exp: Option<i64>,
    /// Every other payload field, untouched.
    pub extra: Map<String, Value>,
}

impl Claims {
    fn from_payload(raw: &[u8]) -> Result<Self, TokenError> {
        let mut payload = parse_object(raw)?;
        let sub = match payload.remove("sub") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s),
            Some(other) => Some(other.to_string()),
        };
        let exp = integer_exp(raw);
        if exp.is_some() {
            payload.remove("exp");
        }
        Ok(Self { sub, exp, extra: payload })
    }
}

/// `exp` as written in the payload, if its JSON text is an integer literal.
///
/// Decided on the text so integers too large for a `Number` to hold exactly
/// still count; they saturate, keeping the sign for the expiry comparison.
fn integer_exp(raw: &[u8]) -> Option<i64> {
    let fields: BTreeMap<String, &RawValue> = serde_json::from_slice(raw).ok()?;
    let text = fields.get("exp")?.get();
    let digits = text.strip_prefix('-').unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(text.parse().unwrap_or(if digits.len() < text.len() {
        i64::MIN
    } else {
        i64::MAX
    }))
}

/// How a payload without an integer `exp` is treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExpiryPolicy {
    /// No integer `exp` means no expiry constraint.
    #[default]
    Optional,
    /// No integer `exp` is an invalid payload.
    Required,
}

pub fn unix_now() -> i64 {
    OffsetDateTime::now_utc().unix_timestamp()
}

pub fn issue(subject: impl Display, secret: &SecretString, ttl: Duration) -> String {
    issue_at(subject, secret, ttl, unix_now())
}

/// Issue a token as if the clock read `now`.
pub fn issue_at(subject: impl Display, secret: &SecretString, ttl: Duration, now: i64) -> String {
    let sub = subject.to_string();
    let header = encode_segment(&Header { alg: ALGORITHM, typ: TOKEN_TYPE });
    let payload = encode_segment(&Payload {
        sub: &sub,
        exp: now.saturating_add(ttl.whole_seconds()),
    });
    let signing_input = format!("{header}{DELIMITER}{payload}");
    let signature = URL_SAFE_NO_PAD.encode(sign(secret, &signing_input));
    format!("{signing_input}{DELIMITER}{signature}")
}

pub fn verify(token: &str, secret: &SecretString) -> Result<Claims, TokenError> {
    verify_at(token, secret, unix_now())
}

pub fn verify_at(token: &str, secret: &SecretString, now: i64) -> Result<Claims, TokenError> {
    verify_with(token, secret, now, ExpiryPolicy::Optional)
}

/// Verify `token` against `secret` as if the clock read `now`.
///
/// The signature is checked before the header or payload are decoded, so
/// nothing from an unauthenticated token ever drives a decision.
pub fn verify_with(
    token: &str,
    secret: &SecretString,
    now: i64,
    policy: ExpiryPolicy,
) -> Result<Claims, TokenError> {
    let (header_b64, payload_b64, signature_b64) = split(token)?;

    let signing_input = format!("{header_b64}{DELIMITER}{payload_b64}");
    check_signature(secret, &signing_input, signature_b64)?;

    let header = parse_object(&decode_segment(header_b64)?)?;
    if header.get("alg").and_then(Value::as_str) != Some(ALGORITHM) {
        return Err(TokenError::UnsupportedAlgorithm);
    }

    let claims = Claims::from_payload(&decode_segment(payload_b64)?)?;
    match (claims.exp, policy) {
        (Some(exp), _) if exp < now => Err(TokenError::TokenExpired),
        (None, ExpiryPolicy::Required) => Err(TokenError::InvalidPayload),
        _ => Ok(claims),
    }
}

fn split(token: &str) -> Result<(&str, &str, &str), TokenError> {
    let mut parts = token.split(DELIMITER);
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(header), Some(payload), Some(signature), None)
            if !header.is_empty() && !payload.is_empty() && !signature.is_empty() =>
        {
            Ok((header, payload, signature))
        }
        _ => Err(TokenError::MalformedToken),
    }
}

fn mac(secret: &SecretString, signing_input: &str) -> HmacSha256 {
    let mut mac = HmacSha256::new_from_slice(secret.expose_secret().as_bytes())
        .expect("HMAC accepts any key length");
    mac.update(signing_input.as_bytes());
    mac
}

fn sign(secret: &SecretString, signing_input: &str) -> Vec<u8> {
    mac(secret, signing_input).finalize().into_bytes().to_vec()
}

fn check_signature(
    secret: &SecretString,
    signing_input: &str,
    signature_b64: &str,
) -> Result<(), TokenError> {
    let provided = URL_SAFE_NO_PAD
        .decode(signature_b64)
        .map_err(|_| TokenError::InvalidSignature)?;
    // verify_slice compares in constant time.
    mac(secret, signing_input)
        .verify_slice(&provided)
        .map_err(|_| TokenError::InvalidSignature)
}

fn encode_segment<T: Serialize>(value: &T) -> String {
    let json = serde_json::to_vec(value).expect("header and payload serialize to JSON");
    URL_SAFE_NO_PAD.encode(json)
}

fn decode_segment(segment: &str) -> Result<Vec<u8>, TokenError> {
    URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|_| TokenError::InvalidPayload)
}

fn parse_object(raw: &[u8]) -> Result<Map<String, Value>, TokenError> {
    match serde_json::from_slice(raw) {
        Ok(Value::Object(map)) => Ok(map),
        _ => Err(TokenError::InvalidPayload),
    }
}


#[cfg(test)]
mod interop_tests {
    use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    struct StandardClaims {
        sub: String,
        exp: i64,
        iat: i64,
    }

    #[test]
    fn standard_tooling_accepts_issued_tokens() {
        let token = issue(7, &SecretString::new("s3cr3t".into()), Duration::hours(1));

        let data = decode::<serde_json::Value>(
            &token,
            &DecodingKey::from_secret(b"s3cr3t"),
            &Validation::new(Algorithm::HS256),
        )
        .unwrap();

        assert_eq!(data.header.alg, Algorithm::HS256);
        assert_eq!(data.claims["sub"], "7");
    }

    #[test]
    fn tokens_from_standard_tooling_verify() {
        let now = unix_now();
        let claims = StandardClaims { sub: "99".into(), exp: now + 600, iat: now };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"s3cr3t"),
        )
        .unwrap();

        let verified = verify(&token, &SecretString::new("s3cr3t".into())).unwrap();
        assert_eq!(verified.sub.as_deref(), Some("99"));
        assert_eq!(verified.exp, Some(now + 600));
        assert_eq!(verified.extra.get("iat"), Some(&serde_json::Value::from(now)));
    }

    #[test]
    fn hs512_tokens_from_standard_tooling_are_rejected() {
        let now = unix_now();
        let claims = StandardClaims { sub: "99".into(), exp: now + 600, iat: now };
        let token = encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(b"s3cr3t"),
        )
        .unwrap();

        // The HS256 recomputation cannot match an HS512 signature.
        assert_eq!(
            verify(&token, &SecretString::new("s3cr3t".into())),
            Err(TokenError::InvalidSignature)
        );
    }
}
