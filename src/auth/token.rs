//! Signed session tokens: `<timestamp-ms>.<hex hmac-sha256(timestamp)>`

use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// Tokens older than this are rejected (30 days)
pub const MAX_AGE_MS: i64 = 1000 * 60 * 60 * 24 * 30;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    #[error("malformed session token")]
    Malformed,

    #[error("session token expired")]
    Expired,

    #[error("session token signature mismatch")]
    BadSignature,
}

/// Issues and verifies owner session tokens with a shared secret
#[derive(Clone)]
pub struct TokenSigner {
    secret: Vec<u8>,
}

impl TokenSigner {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        Self {
            secret: secret.as_ref().to_vec(),
        }
    }

    /// Maximum token age as a duration
    pub fn max_age() -> Duration {
        Duration::milliseconds(MAX_AGE_MS)
    }

    fn mac(&self) -> HmacSha256 {
        HmacSha256::new_from_slice(&self.secret).expect("HMAC can take key of any size")
    }

    /// Produce a token for `now`
    pub fn issue(&self, now: DateTime<Utc>) -> String {
        let timestamp = now.timestamp_millis().to_string();
        let mut mac = self.mac();
        mac.update(timestamp.as_bytes());
        let signature = hex::encode(mac.finalize().into_bytes());
        format!("{}.{}", timestamp, signature)
    }

    /// Check a token's shape, age and signature as of `now`
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<(), TokenError> {
        let (timestamp, signature) = token.split_once('.').ok_or(TokenError::Malformed)?;
        if timestamp.is_empty() || signature.is_empty() {
            return Err(TokenError::Malformed);
        }
        if !timestamp.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TokenError::Malformed);
        }
        let issued_at: i64 = timestamp.parse().map_err(|_| TokenError::Malformed)?;

        if now.timestamp_millis().saturating_sub(issued_at) > MAX_AGE_MS {
            return Err(TokenError::Expired);
        }

        // issue() only emits lowercase hex
        if !signature
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
        {
            return Err(TokenError::BadSignature);
        }
        let signature = hex::decode(signature).map_err(|_| TokenError::BadSignature)?;

        let mut mac = self.mac();
        mac.update(timestamp.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| TokenError::BadSignature)
    }

    /// Compare a presented owner secret with the configured one in constant time
    pub fn secrets_match(&self, presented: &str, expected: &str) -> bool {
        let mut expected_mac = self.mac();
        expected_mac.update(expected.as_bytes());
        let expected_tag = expected_mac.finalize().into_bytes();

        let mut presented_mac = self.mac();
        presented_mac.update(presented.as_bytes());
        presented_mac.verify_slice(&expected_tag).is_ok()
    }
}

impl std::fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSigner").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(ms: i64) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(ms).unwrap()
    }

    const T: i64 = 1_700_000_000_000;

    #[test]
    fn test_issue_format() {
        let token = TokenSigner::new("k").issue(at(T));
        let (ts, sig) = token.split_once('.').unwrap();
        assert_eq!(ts, T.to_string());
        assert_eq!(sig.len(), 64);
    }

    #[test]
    fn test_verify_within_window() {
        let signer = TokenSigner::new("session-secret");
        let token = signer.issue(at(T));
        assert_eq!(signer.verify(&token, at(T)), Ok(()));
        assert_eq!(signer.verify(&token, at(T + MAX_AGE_MS)), Ok(()));
    }

    #[test]
    fn test_verify_expired() {
        let signer = TokenSigner::new("session-secret");
        let token = signer.issue(at(T));
        assert_eq!(
            signer.verify(&token, at(T + MAX_AGE_MS + 1)),
            Err(TokenError::Expired)
        );
        assert_eq!(
            signer.verify(&token, at(T) + Duration::days(31)),
            Err(TokenError::Expired)
        );
    }

    #[test]
    fn test_tampered_signature() {
        let signer = TokenSigner::new("session-secret");
        let token = signer.issue(at(T));
        let (ts, sig) = token.split_once('.').unwrap();

        let mut flipped = sig.to_string();
        let last = if flipped.ends_with('0') { "1" } else { "0" };
        flipped.replace_range(63.., last);
        let tampered = format!("{}.{}", ts, flipped);
        assert_eq!(
            signer.verify(&tampered, at(T)),
            Err(TokenError::BadSignature)
        );

        let upper = format!("{}.{}", ts, sig.to_uppercase());
        assert_eq!(signer.verify(&upper, at(T)), Err(TokenError::BadSignature));
    }

    #[test]
    fn test_tampered_timestamp() {
        let signer = TokenSigner::new("session-secret");
        let token = signer.issue(at(T));
        let (_, sig) = token.split_once('.').unwrap();
        let forged = format!("{}.{}", T + 1000, sig);
        assert_eq!(
            signer.verify(&forged, at(T + 1000)),
            Err(TokenError::BadSignature)
        );
    }

    #[test]
    fn test_wrong_secret() {
        let token = TokenSigner::new("one").issue(at(T));
        assert_eq!(
            TokenSigner::new("two").verify(&token, at(T)),
            Err(TokenError::BadSignature)
        );
    }

    #[test]
    fn test_malformed_tokens() {
        let signer = TokenSigner::new("k");
        for token in ["", "abc", ".", "123.", ".abcd", "12a.ff", "-5.ff", "1 2.ff"] {
            assert_eq!(
                signer.verify(token, at(T)),
                Err(TokenError::Malformed),
                "{token:?}"
            );
        }
        assert_eq!(
            signer.verify(&format!("{}.zz", T), at(T)),
            Err(TokenError::BadSignature)
        );
    }

    #[test]
    fn test_secrets_match() {
        let signer = TokenSigner::new("k");
        assert!(signer.secrets_match("correct", "correct"));
        assert!(!signer.secrets_match("wrong", "correct"));
        assert!(!signer.secrets_match("", "correct"));
    }
}
