//! Solana public key (address) handling.
//!
//! Wraps `solana_pubkey::Pubkey` with checked constructors and program-derived
//! address helpers.

use crate::error::{Result, TxError};
use sha2::{Digest, Sha256};
use std::str::FromStr;

/// Re-export the underlying Solana Pubkey type.
pub use solana_pubkey::Pubkey;

pub const PUBKEY_BYTES: usize = 32;
pub const MAX_SEED_LEN: usize = 32;
pub const MAX_SEEDS: usize = 16;

const PDA_MARKER: &[u8] = b"ProgramDerivedAddress";

/// Extension trait for Pubkey with crate error handling.
pub trait PubkeyExt {
    fn from_base58(address: &str) -> Result<Pubkey>;
    fn from_bytes_checked(bytes: &[u8]) -> Result<Pubkey>;
}

impl PubkeyExt for Pubkey {
    /// Create a Pubkey from a base58 string.
    fn from_base58(address: &str) -> Result<Pubkey> {
        Pubkey::from_str(address).map_err(|_| TxError::InvalidBase58 {
            what: "public key",
            value: address.to_string(),
        })
    }

    /// Create a Pubkey from a byte slice with length validation.
    fn from_bytes_checked(bytes: &[u8]) -> Result<Pubkey> {
        let array: [u8; PUBKEY_BYTES] =
            bytes.try_into().map_err(|_| TxError::InvalidKeyLength {
                what: "public key",
                expected: PUBKEY_BYTES,
                actual: bytes.len(),
            })?;
        Ok(Pubkey::new_from_array(array))
    }
}

/// Derive a program address from `seeds` and `program_id`.
///
/// The result is `sha256(seeds || program_id || "ProgramDerivedAddress")` and must
/// not be a valid ed25519 point, so no private key can sign for it.
pub fn create_program_address(seeds: &[&[u8]], program_id: &Pubkey) -> Result<Pubkey> {
    if seeds.len() > MAX_SEEDS {
        return Err(TxError::TooManySeeds(seeds.len()));
    }
    if seeds.iter().any(|seed| seed.len() > MAX_SEED_LEN) {
        return Err(TxError::MaxSeedLengthExceeded);
    }

    let mut hasher = Sha256::new();
    for seed in seeds {
        hasher.update(seed);
    }
    hasher.update(program_id.as_ref());
    hasher.update(PDA_MARKER);
    let hash: [u8; PUBKEY_BYTES] = hasher.finalize().into();

    let address = Pubkey::new_from_array(hash);
    if address.is_on_curve() {
        return Err(TxError::InvalidSeeds);
    }
    Ok(address)
}

/// Find a valid program address and its bump seed.
///
/// Bump seeds are tried from 255 downwards; the first off-curve address wins.
pub fn find_program_address(seeds: &[&[u8]], program_id: &Pubkey) -> Result<(Pubkey, u8)> {
    if seeds.len() >= MAX_SEEDS {
        // One slot is reserved for the bump.
        return Err(TxError::TooManySeeds(seeds.len() + 1));
    }
    for bump in (0..=u8::MAX).rev() {
        let bump_seed = [bump];
        let mut with_bump: Vec<&[u8]> = seeds.to_vec();
        with_bump.push(&bump_seed);
        match create_program_address(&with_bump, program_id) {
            Ok(address) => return Ok((address, bump)),
            Err(TxError::InvalidSeeds) => continue,
            Err(e) => return Err(e),
        }
    }
    Err(TxError::NoViableBump)
}
