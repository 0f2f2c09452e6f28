//! Instruction constructors for well-known programs.
//!
//! These only assemble keys and data; instruction data is encoded with the
//! programs' own interface crates.

pub mod compute_budget;
pub mod memo;
pub mod system;

use crate::pubkey::Pubkey;
use solana_address::Address;
use solana_pubkey::pubkey;

pub const SYSTEM_PROGRAM_ID: Pubkey = pubkey!("11111111111111111111111111111111");
pub const STAKE_PROGRAM_ID: Pubkey = pubkey!("Stake11111111111111111111111111111111111111");
pub const COMPUTE_BUDGET_PROGRAM_ID: Pubkey =
    pubkey!("ComputeBudget111111111111111111111111111111");
pub const MEMO_PROGRAM_ID: Pubkey = pubkey!("MemoSq4gqABAXKb96qnH8TysNcWxMyWCqXgDLGmfcHr");
pub const TOKEN_PROGRAM_ID: Pubkey = pubkey!("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA");
pub const TOKEN_2022_PROGRAM_ID: Pubkey = pubkey!("TokenzQdBNbLqP5VEhdkAS6EPFLC1PHnBqCXEpPxuEb");

/// Sysvar read by the nonce instructions to check the stored blockhash.
pub const SYSVAR_RECENT_BLOCKHASHES: Pubkey =
    pubkey!("SysvarRecentB1ockHashes11111111111111111111");
pub const SYSVAR_RENT: Pubkey = pubkey!("SysvarRent111111111111111111111111111111111");

/// The program interface crates use the 3.x address type.
pub(crate) fn to_address(pubkey: &Pubkey) -> Address {
    Address::new_from_array(pubkey.to_bytes())
}

pub(crate) fn from_address(address: &Address) -> Pubkey {
    Pubkey::new_from_array(address.to_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_program_ids() {
        assert_eq!(SYSTEM_PROGRAM_ID, Pubkey::default());
        assert_eq!(
            MEMO_PROGRAM_ID.to_string(),
            "MemoSq4gqABAXKb96qnH8TysNcWxMyWCqXgDLGmfcHr"
        );
        assert_eq!(
            SYSVAR_RECENT_BLOCKHASHES.to_string(),
            "SysvarRecentB1ockHashes11111111111111111111"
        );
    }

    #[test]
    fn test_address_conversion() {
        let key = Pubkey::new_from_array([4; 32]);
        assert_eq!(from_address(&to_address(&key)), key);
    }
}
