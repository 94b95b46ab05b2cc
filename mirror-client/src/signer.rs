//! secp256k1 transaction signer.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use ethers_core::k256::ecdsa::{signature::Signer as _, Signature, SigningKey};
use ethers_core::k256::elliptic_curve::sec1::ToEncodedPoint;
use std::fmt;

use crate::error::{ClientError, Result};
use crate::tx::{PubKey, StdSignature, PUB_KEY_SECP256K1};

/// Signs amino sign documents with a raw secp256k1 private key.
///
/// Signatures are SHA-256 based, deterministic (RFC 6979) and encoded as
/// the 64-byte compact `r || s` form.
#[derive(Clone)]
pub struct KeySigner {
    key: SigningKey,
}

impl KeySigner {
    /// Load a 32-byte private key from hex (an optional `0x` prefix is accepted).
    pub fn from_hex(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        let hex_key = trimmed.strip_prefix("0x").unwrap_or(trimmed);
        let bytes = hex::decode(hex_key)
            .map_err(|e| ClientError::Signing(format!("private key is not valid hex: {}", e)))?;
        let key = SigningKey::from_slice(&bytes)
            .map_err(|_| ClientError::Signing("private key is not a valid secp256k1 scalar".into()))?;
        Ok(Self { key })
    }

    /// Compressed SEC1 public key.
    pub fn public_key(&self) -> Vec<u8> {
        self.key
            .verifying_key()
            .to_encoded_point(true)
            .as_bytes()
            .to_vec()
    }

    /// Sign `bytes` and package the result with the public key.
    pub fn sign(&self, bytes: &[u8]) -> StdSignature {
        let signature: Signature = self.key.sign(bytes);
        StdSignature {
            pub_key: PubKey {
                kind: PUB_KEY_SECP256K1.to_string(),
                value: STANDARD.encode(self.public_key()),
            },
            signature: STANDARD.encode(signature.to_bytes()),
        }
    }
}

impl fmt::Debug for KeySigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeySigner")
            .field("public_key", &hex::encode(self.public_key()))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethers_core::k256::ecdsa::{signature::Verifier, VerifyingKey};

    const KEY: &str = "0101010101010101010101010101010101010101010101010101010101010101";

    #[test]
    fn test_signature_verifies() {
        let signer = KeySigner::from_hex(KEY).unwrap();
        let sig = signer.sign(b"sign me");

        let pub_key = STANDARD.decode(&sig.pub_key.value).unwrap();
        assert_eq!(pub_key.len(), 33);
        let verifying = VerifyingKey::from_sec1_bytes(&pub_key).unwrap();

        let raw_sig = STANDARD.decode(&sig.signature).unwrap();
        assert_eq!(raw_sig.len(), 64);
        let signature = Signature::from_slice(&raw_sig).unwrap();
        assert!(verifying.verify(b"sign me", &signature).is_ok());
    }

    #[test]
    fn test_signing_is_deterministic() {
        let signer = KeySigner::from_hex(&format!("0x{}", KEY)).unwrap();
        assert_eq!(signer.sign(b"x"), signer.sign(b"x"));
    }

    #[test]
    fn test_rejects_bad_keys() {
        assert!(KeySigner::from_hex("zz").is_err());
        assert!(KeySigner::from_hex("0101").is_err());
        assert!(KeySigner::from_hex(&"00".repeat(32)).is_err());
    }

    #[test]
    fn test_debug_hides_secret() {
        let signer = KeySigner::from_hex(KEY).unwrap();
        assert!(!format!("{:?}", signer).contains(KEY));
    }
}
