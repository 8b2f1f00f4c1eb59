//! Encrypted session token
//!
//! A token is `base64url(nonce || ciphertext || tag)` where the plaintext is
//! the JSON session payload. AES-256-GCM provides both secrecy and integrity,
//! and the cookie name is bound in as associated data so a token cannot be
//! replayed under a different cookie. Each configured secret is stretched to
//! an AES key with HMAC-SHA256.

use hmac::{Hmac, Mac};
use ring::aead::{AES_256_GCM, Aad, LessSafeKey, NONCE_LEN, Nonce, UnboundKey};
use sha2::Sha256;

use crate::session::errors::SessionError;
use crate::session::types::SessionPayload;
use crate::utils::{base64url_decode, base64url_encode, gen_random_bytes};

type HmacSha256 = Hmac<Sha256>;

const KEY_DERIVATION_LABEL: &[u8] = b"jokes_auth session cookie v1";

fn derive_key(secret: &[u8]) -> Result<LessSafeKey, SessionError> {
    let mut mac = HmacSha256::new_from_slice(secret)
        .map_err(|e| SessionError::Crypto(format!("Invalid session secret: {e}")))?;
    mac.update(KEY_DERIVATION_LABEL);
    let key_bytes = mac.finalize().into_bytes();

    let unbound = UnboundKey::new(&AES_256_GCM, &key_bytes)
        .map_err(|_| SessionError::Crypto("Failed to build session key".to_string()))?;
    Ok(LessSafeKey::new(unbound))
}

/// Encrypt a session payload with `secret`
pub(super) fn seal_payload(
    secret: &[u8],
    cookie_name: &str,
    payload: &SessionPayload,
) -> Result<String, SessionError> {
    let key = derive_key(secret)?;
    let nonce_bytes = gen_random_bytes::<NONCE_LEN>()?;

    let mut in_out = serde_json::to_vec(payload)
        .map_err(|e| SessionError::Crypto(format!("Failed to serialize session: {e}")))?;

    key.seal_in_place_append_tag(
        Nonce::assume_unique_for_key(nonce_bytes),
        Aad::from(cookie_name.as_bytes()),
        &mut in_out,
    )
    .map_err(|_| SessionError::Crypto("Failed to encrypt session".to_string()))?;

    let mut token = Vec::with_capacity(NONCE_LEN + in_out.len());
    token.extend_from_slice(&nonce_bytes);
    token.extend_from_slice(&in_out);

    Ok(base64url_encode(&token))
}

/// Decrypt a token with the first secret that authenticates it
///
/// Any failure (bad encoding, wrong key, altered bytes, unexpected JSON)
/// yields `None`.
pub(super) fn open_payload(
    secrets: &[Vec<u8>],
    cookie_name: &str,
    token: &str,
) -> Option<SessionPayload> {
    let raw = base64url_decode(token).ok()?;
    if raw.len() <= NONCE_LEN {
        return None;
    }
    let (nonce_bytes, ciphertext) = raw.split_at(NONCE_LEN);

    secrets.iter().enumerate().find_map(|(index, secret)| {
        let key = derive_key(secret).ok()?;
        let nonce = Nonce::try_assume_unique_for_key(nonce_bytes).ok()?;
        let mut in_out = ciphertext.to_vec();

        let plaintext = key
            .open_in_place(nonce, Aad::from(cookie_name.as_bytes()), &mut in_out)
            .ok()?;

        if index > 0 {
            tracing::debug!(secret_index = index, "Session decrypted with a retired secret");
        }
        serde_json::from_slice(plaintext).ok()
    })
}
