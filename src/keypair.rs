//! Ed25519 keypairs.
//!
//! Signing itself is delegated to `solana_signer::Signer`; this module only adds
//! checked constructors for the two secret key encodings callers hand us.

use crate::error::{Result, TxError};
use crate::pubkey::Pubkey;
use solana_signer::Signer;

/// Re-export the underlying Solana Keypair type.
pub use solana_keypair::Keypair;

pub trait KeypairExt {
    fn from_secret_key_bytes(secret_key: &[u8]) -> Result<Keypair>;
    fn from_solana_secret_key(secret_key: &[u8]) -> Result<Keypair>;
    fn public_key(&self) -> Pubkey;
    fn address(&self) -> String;
}

impl KeypairExt for Keypair {
    /// Create a keypair from a 32-byte secret key (Ed25519 seed).
    fn from_secret_key_bytes(secret_key: &[u8]) -> Result<Keypair> {
        let bytes: [u8; 32] = secret_key
            .try_into()
            .map_err(|_| TxError::InvalidKeyLength {
                what: "secret key",
                expected: 32,
                actual: secret_key.len(),
            })?;
        Ok(Keypair::new_from_array(bytes))
    }

    /// Create a keypair from a 64-byte Solana secret key (secret + public concatenated).
    fn from_solana_secret_key(secret_key: &[u8]) -> Result<Keypair> {
        if secret_key.len() != 64 {
            return Err(TxError::InvalidKeyLength {
                what: "solana secret key",
                expected: 64,
                actual: secret_key.len(),
            });
        }
        Keypair::try_from(secret_key).map_err(|e| TxError::decode(format!("keypair: {}", e)))
    }

    fn public_key(&self) -> Pubkey {
        self.pubkey()
    }

    /// Base58 address of the public key.
    fn address(&self) -> String {
        self.pubkey().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BITGOJS_SEED: [u8; 32] = [
        210, 49, 239, 175, 249, 91, 42, 66, 77, 70, 3, 144, 23, 0, 145, 152, 86, 35, 166, 11, 129,
        49, 201, 162, 255, 195, 94, 229, 98, 78, 76, 38,
    ];

    #[test]
    fn test_deterministic_pubkey() {
        let keypair1 = Keypair::from_secret_key_bytes(&[1u8; 32]).unwrap();
        let keypair2 = Keypair::from_secret_key_bytes(&[1u8; 32]).unwrap();
        assert_eq!(keypair1.public_key(), keypair2.public_key());
    }

    #[test]
    fn test_solana_secret_key_format() {
        let keypair = Keypair::from_secret_key_bytes(&BITGOJS_SEED).unwrap();

        let mut solana_secret = [0u8; 64];
        solana_secret[..32].copy_from_slice(&BITGOJS_SEED);
        solana_secret[32..].copy_from_slice(&keypair.public_key().to_bytes());

        let keypair2 = Keypair::from_solana_secret_key(&solana_secret).unwrap();
        assert_eq!(keypair.address(), keypair2.address());
    }

    #[test]
    fn test_invalid_secret_key_length() {
        assert!(Keypair::from_secret_key_bytes(&[0u8; 31]).is_err());
        assert!(Keypair::from_secret_key_bytes(&[0u8; 33]).is_err());
        assert!(matches!(
            Keypair::from_solana_secret_key(&[0u8; 63]),
            Err(TxError::InvalidKeyLength { expected: 64, actual: 63, .. })
        ));
    }

    #[test]
    fn test_bitgojs_compatibility() {
        let keypair = Keypair::from_secret_key_bytes(&BITGOJS_SEED).unwrap();
        assert_eq!(
            keypair.address(),
            "FKjSjCqByQRwSzZoMXA7bKnDbJe41YgJTHFFzBeC42bH"
        );
    }

    #[test]
    fn test_signatures_are_deterministic() {
        let keypair = Keypair::from_secret_key_bytes(&BITGOJS_SEED).unwrap();
        let a = keypair.sign_message(b"message");
        let b = keypair.sign_message(b"message");
        assert_eq!(a, b);
        assert!(a.verify(keypair.public_key().as_ref(), b"message"));
        assert!(!a.verify(keypair.public_key().as_ref(), b"other"));
    }
}
