//! Stateless user identity tokens.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::domain::entities::UserId;

type HmacSha256 = Hmac<Sha256>;

const USER_ID_LEN: usize = 4;
const SIGNATURE_LEN: usize = 32;

/// Length in bytes of a decoded token.
pub const TOKEN_BYTES: usize = USER_ID_LEN + SIGNATURE_LEN;

/// Encodes user ids into tamper-evident bearer tokens and back.
///
/// A token is `hex(big_endian(user_id) || HMAC-SHA256(secret, big_endian(user_id)))`,
/// 72 hex characters in total. Nothing is stored server-side: a token is valid
/// exactly as long as the secret it was minted under stays configured.
#[derive(Clone)]
pub struct UserTokenCodec {
    mac: HmacSha256,
}

impl UserTokenCodec {
    /// Creates a codec keyed with `secret`.
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        let mac =
            HmacSha256::new_from_slice(secret.as_ref()).expect("HMAC accepts any key length");
        Self { mac }
    }

    /// Draws a fresh random user id and returns it with its token.
    pub fn mint(&self) -> (UserId, String) {
        let user_id = rand::random::<UserId>();
        (user_id, self.mint_for(user_id))
    }

    /// Returns the token for a known user id.
    pub fn mint_for(&self, user_id: UserId) -> String {
        let id_bytes = user_id.to_be_bytes();

        let mut mac = self.mac.clone();
        mac.update(&id_bytes);
        let signature = mac.finalize().into_bytes();

        let mut token = Vec::with_capacity(TOKEN_BYTES);
        token.extend_from_slice(&id_bytes);
        token.extend_from_slice(&signature);
        hex::encode(token)
    }

    /// Returns the user id carried by `token` if its signature checks out.
    ///
    /// Malformed hex, a wrong length and a bad signature all yield `None`.
    /// The signature comparison is constant-time.
    pub fn verify(&self, token: &str) -> Option<UserId> {
        let data = hex::decode(token).ok()?;
        if data.len() != TOKEN_BYTES {
            return None;
        }

        let (id_bytes, signature) = data.split_at(USER_ID_LEN);

        let mut mac = self.mac.clone();
        mac.update(id_bytes);
        mac.verify_slice(signature).ok()?;

        let id_bytes: [u8; USER_ID_LEN] = id_bytes.try_into().ok()?;
        Some(UserId::from_be_bytes(id_bytes))
    }
}

impl std::fmt::Debug for UserTokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserTokenCodec").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec() -> UserTokenCodec {
        UserTokenCodec::new("test-user-token-secret")
    }

    #[test]
    fn test_minted_token_verifies_to_same_id() {
        let codec = codec();

        for _ in 0..32 {
            let (user_id, token) = codec.mint();
            assert_eq!(codec.verify(&token), Some(user_id));
        }
    }

    #[test]
    fn test_token_layout() {
        let token = codec().mint_for(0x0102_0304);

        assert_eq!(token.len(), TOKEN_BYTES * 2);
        assert!(token.starts_with("01020304"));
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_mint_for_is_deterministic() {
        let codec = codec();
        assert_eq!(codec.mint_for(42), codec.mint_for(42));
        assert_ne!(codec.mint_for(42), codec.mint_for(43));
    }

    #[test]
    fn test_any_flipped_bit_is_rejected() {
        let codec = codec();
        let token = codec.mint_for(7);
        let bytes = hex::decode(&token).unwrap();

        for i in 0..bytes.len() {
            for bit in 0..8 {
                let mut tampered = bytes.clone();
                tampered[i] ^= 1 << bit;
                assert_eq!(codec.verify(&hex::encode(&tampered)), None);
            }
        }
    }

    #[test]
    fn test_malformed_tokens_are_rejected() {
        let codec = codec();
        let token = codec.mint_for(7);

        assert_eq!(codec.verify(""), None);
        assert_eq!(codec.verify("not-hex"), None);
        assert_eq!(codec.verify("0000"), None);
        assert_eq!(codec.verify(&token[..token.len() - 2]), None);
        assert_eq!(codec.verify(&format!("{token}00")), None);
        assert_eq!(codec.verify(&token[1..]), None);
    }

    #[test]
    fn test_secret_scopes_validity() {
        let first = UserTokenCodec::new("secret-a");
        let second = UserTokenCodec::new("secret-b");

        let token = first.mint_for(99);
        assert_eq!(first.verify(&token), Some(99));
        assert_eq!(second.verify(&token), None);
    }

    #[test]
    fn test_uppercase_hex_is_accepted() {
        let codec = codec();
        let token = codec.mint_for(5).to_uppercase();
        assert_eq!(codec.verify(&token), Some(5));
    }
}
