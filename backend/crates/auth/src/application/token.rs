//! Session Token Service
//!
//! The opaque handle handed to clients is `<session-uuid>.<signature>`
//! where the signature is an HMAC-SHA256 over the UUID string, base64url
//! encoded without padding. Parsing verifies the signature before the
//! session store is ever consulted, so a tampered or malformed token is
//! rejected cheaply and is indistinguishable from a signed-out session.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use uuid::Uuid;

use crate::error::{AuthError, AuthResult};

type HmacSha256 = Hmac<Sha256>;

/// Mint a signed session token
pub fn mint(secret: &[u8; 32], session_id: Uuid) -> String {
    let session_id = session_id.to_string();

    let mut mac =
        HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(session_id.as_bytes());
    let signature = mac.finalize().into_bytes();

    format!("{}.{}", session_id, URL_SAFE_NO_PAD.encode(signature))
}

/// Parse and verify a session token
///
/// Returns `SessionInvalid` for any malformed, unsigned, or tampered
/// token.
pub fn parse(secret: &[u8; 32], token: &str) -> AuthResult<Uuid> {
    let Some((session_id_str, signature_b64)) = token.split_once('.') else {
        return Err(AuthError::SessionInvalid);
    };

    let mut mac =
        HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(session_id_str.as_bytes());

    let signature = URL_SAFE_NO_PAD
        .decode(signature_b64)
        .map_err(|_| AuthError::SessionInvalid)?;

    mac.verify_slice(&signature)
        .map_err(|_| AuthError::SessionInvalid)?;

    session_id_str
        .parse()
        .map_err(|_| AuthError::SessionInvalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: [u8; 32] = [7u8; 32];

    #[test]
    fn test_mint_parse_roundtrip() {
        let session_id = Uuid::new_v4();
        let token = mint(&SECRET, session_id);
        assert_eq!(parse(&SECRET, &token).unwrap(), session_id);
    }

    #[test]
    fn test_tampered_token_rejected() {
        let token = mint(&SECRET, Uuid::new_v4());

        // Swap the session ID while keeping the signature
        let (_, signature) = token.split_once('.').unwrap();
        let forged = format!("{}.{}", Uuid::new_v4(), signature);

        assert!(matches!(
            parse(&SECRET, &forged),
            Err(AuthError::SessionInvalid)
        ));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = mint(&SECRET, Uuid::new_v4());
        let other_secret = [8u8; 32];
        assert!(matches!(
            parse(&other_secret, &token),
            Err(AuthError::SessionInvalid)
        ));
    }

    #[test]
    fn test_malformed_tokens_rejected() {
        for garbage in ["", "no-dot", "a.b.c", "not-a-uuid.!!!", "."] {
            assert!(
                matches!(parse(&SECRET, garbage), Err(AuthError::SessionInvalid)),
                "token {garbage:?} should be invalid"
            );
        }
    }
}
