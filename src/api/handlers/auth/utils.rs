//! Token helpers for session handling.

use sha2::{Digest, Sha256};

/// Hash a session token so raw values never touch the database.
pub(crate) fn hash_session_token(token: &str) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hasher.finalize().to_vec()
}

#[cfg(test)]
pub(crate) fn generate_session_token() -> String {
    use base64::Engine;
    use rand::{rngs::OsRng, RngCore};

    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_unique_and_url_safe() {
        let a = generate_session_token();
        let b = generate_session_token();
        assert_ne!(a, b);
        assert!(a
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn hash_is_stable_sha256() {
        let hash = hash_session_token("token");
        assert_eq!(hash.len(), 32);
        assert_eq!(hash, hash_session_token("token"));
        assert_ne!(hash, hash_session_token("other"));
    }
}
