//! Decoded instruction types.
//!
//! Account fields hold the resolved keys; amounts stay in the program's own
//! units (lamports, micro-lamports, token base units).

use crate::account::AccountMeta;
use crate::pubkey::Pubkey;

/// A decoded instruction, or the raw form when the program or its data is
/// not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedInstruction {
    // System program
    Transfer(TransferParams),
    CreateAccount(CreateAccountParams),
    Assign(AssignParams),
    Allocate(AllocateParams),
    NonceAdvance(NonceAdvanceParams),
    NonceInitialize(NonceInitializeParams),

    // Stake program
    StakeInitialize(StakeInitializeParams),
    StakingDelegate(StakingDelegateParams),
    StakingDeactivate(StakingDeactivateParams),
    StakingWithdraw(StakingWithdrawParams),
    StakingAuthorize(StakingAuthorizeParams),

    // Compute budget program
    SetComputeUnitLimit(SetComputeUnitLimitParams),
    SetPriorityFee(SetPriorityFeeParams),

    // SPL token
    TokenTransfer(TokenTransferParams),
    CloseTokenAccount(CloseTokenAccountParams),

    Memo(MemoParams),

    Unknown(UnknownInstructionParams),
}

// =============================================================================
// System Program Params
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferParams {
    pub from_address: Pubkey,
    pub to_address: Pubkey,
    pub amount: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateAccountParams {
    pub from_address: Pubkey,
    pub new_address: Pubkey,
    pub amount: u64,
    pub space: u64,
    pub owner: Pubkey,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignParams {
    pub account_address: Pubkey,
    pub owner: Pubkey,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocateParams {
    pub account_address: Pubkey,
    pub space: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonceAdvanceParams {
    pub wallet_nonce_address: Pubkey,
    pub auth_wallet_address: Pubkey,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonceInitializeParams {
    pub nonce_address: Pubkey,
    pub auth_address: Pubkey,
}

// =============================================================================
// Stake Program Params
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StakeInitializeParams {
    pub staking_address: Pubkey,
    pub staker: Pubkey,
    pub withdrawer: Pubkey,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StakingDelegateParams {
    pub staking_address: Pubkey,
    pub from_address: Pubkey,
    pub validator: Pubkey,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StakingDeactivateParams {
    pub staking_address: Pubkey,
    pub from_address: Pubkey,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StakingWithdrawParams {
    pub staking_address: Pubkey,
    pub from_address: Pubkey,
    pub to_address: Pubkey,
    pub amount: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizeType {
    Staker,
    Withdrawer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StakingAuthorizeParams {
    pub staking_address: Pubkey,
    pub old_authorize_address: Pubkey,
    pub new_authorize_address: Pubkey,
    pub authorize_type: AuthorizeType,
    pub custodian_address: Option<Pubkey>,
}

// =============================================================================
// ComputeBudget Params
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetComputeUnitLimitParams {
    pub units: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetPriorityFeeParams {
    pub fee: u64,
}

// =============================================================================
// Token Params
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenTransferParams {
    /// Owner or delegate authorizing the transfer.
    pub from_address: Pubkey,
    /// Destination token account.
    pub to_address: Pubkey,
    pub amount: u64,
    pub source_address: Pubkey,
    /// Mint, present for `TransferChecked` only.
    pub token_address: Option<Pubkey>,
    pub program_id: Pubkey,
    pub decimal_places: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseTokenAccountParams {
    pub account_address: Pubkey,
    pub destination_address: Pubkey,
    pub authority_address: Pubkey,
    pub program_id: Pubkey,
}

// =============================================================================
// Memo & Unknown
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoParams {
    pub memo: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownInstructionParams {
    pub program_id: Pubkey,
    /// Accounts with roles as inferred from the message header.
    pub accounts: Vec<AccountMeta>,
    pub data: Vec<u8>,
}
