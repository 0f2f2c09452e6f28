//! System program instructions.
//!
//! Data is the bincode encoding of `SystemInstruction`: a 4-byte little-endian
//! discriminator followed by the variant's fields.

use super::{to_address, SYSTEM_PROGRAM_ID, SYSVAR_RECENT_BLOCKHASHES, SYSVAR_RENT};
use crate::account::AccountMeta;
use crate::error::{Result, TxError};
use crate::instruction::TransactionInstruction;
use crate::pubkey::Pubkey;
use solana_system_interface::instruction::SystemInstruction;

/// Bytes of a nonce account.
pub const NONCE_ACCOUNT_SPACE: u64 = 80;

fn instruction(data: &SystemInstruction, keys: Vec<AccountMeta>) -> Result<TransactionInstruction> {
    let data = bincode::serialize(data).map_err(|e| TxError::InstructionData(e.to_string()))?;
    Ok(TransactionInstruction::new(SYSTEM_PROGRAM_ID, keys, data))
}

/// Move `lamports` from `from` (signer) to `to`.
pub fn transfer(from: &Pubkey, to: &Pubkey, lamports: u64) -> Result<TransactionInstruction> {
    instruction(
        &SystemInstruction::Transfer { lamports },
        vec![AccountMeta::new(*from, true), AccountMeta::new(*to, false)],
    )
}

/// Fund and allocate `new_account`, owned by `owner`. Both accounts sign.
pub fn create_account(
    from: &Pubkey,
    new_account: &Pubkey,
    lamports: u64,
    space: u64,
    owner: &Pubkey,
) -> Result<TransactionInstruction> {
    instruction(
        &SystemInstruction::CreateAccount {
            lamports,
            space,
            owner: to_address(owner),
        },
        vec![
            AccountMeta::new(*from, true),
            AccountMeta::new(*new_account, true),
        ],
    )
}

pub fn assign(account: &Pubkey, owner: &Pubkey) -> Result<TransactionInstruction> {
    instruction(
        &SystemInstruction::Assign {
            owner: to_address(owner),
        },
        vec![AccountMeta::new(*account, true)],
    )
}

pub fn allocate(account: &Pubkey, space: u64) -> Result<TransactionInstruction> {
    instruction(
        &SystemInstruction::Allocate { space },
        vec![AccountMeta::new(*account, true)],
    )
}

/// Advance a durable nonce. Must be the first instruction of a transaction
/// that uses the nonce value as its blockhash.
pub fn advance_nonce_account(nonce: &Pubkey, authority: &Pubkey) -> Result<TransactionInstruction> {
    instruction(
        &SystemInstruction::AdvanceNonceAccount,
        vec![
            AccountMeta::new(*nonce, false),
            AccountMeta::new_readonly(SYSVAR_RECENT_BLOCKHASHES, false),
            AccountMeta::new_readonly(*authority, true),
        ],
    )
}

/// Initialize a freshly created nonce account under `authority`.
pub fn initialize_nonce_account(
    nonce: &Pubkey,
    authority: &Pubkey,
) -> Result<TransactionInstruction> {
    instruction(
        &SystemInstruction::InitializeNonceAccount(to_address(authority)),
        vec![
            AccountMeta::new(*nonce, false),
            AccountMeta::new_readonly(SYSVAR_RECENT_BLOCKHASHES, false),
            AccountMeta::new_readonly(SYSVAR_RENT, false),
        ],
    )
}
