//! Instruction decoding using the official Solana interface crates.

use super::types::*;
use crate::account::AccountMeta;
use crate::programs::{
    from_address, COMPUTE_BUDGET_PROGRAM_ID, MEMO_PROGRAM_ID, STAKE_PROGRAM_ID,
    SYSTEM_PROGRAM_ID, TOKEN_2022_PROGRAM_ID, TOKEN_PROGRAM_ID,
};
use crate::pubkey::Pubkey;
use solana_compute_budget_interface::ComputeBudgetInstruction;
use solana_stake_interface::instruction::StakeInstruction;
use solana_stake_interface::state::StakeAuthorize;
use solana_system_interface::instruction::SystemInstruction;

/// An instruction with its accounts resolved against the message.
pub struct InstructionContext<'a> {
    pub program_id: &'a Pubkey,
    pub accounts: &'a [AccountMeta],
    pub data: &'a [u8],
}

impl InstructionContext<'_> {
    fn account(&self, index: usize) -> Option<Pubkey> {
        self.accounts.get(index).map(|meta| meta.pubkey)
    }
}

/// Decode a single instruction. Unrecognized programs, unsupported variants,
/// malformed data and short account lists all fall back to
/// [`ParsedInstruction::Unknown`].
pub fn decode_instruction(ctx: InstructionContext) -> ParsedInstruction {
    let program_id = ctx.program_id;
    let decoded = if *program_id == SYSTEM_PROGRAM_ID {
        decode_system_instruction(&ctx)
    } else if *program_id == STAKE_PROGRAM_ID {
        decode_stake_instruction(&ctx)
    } else if *program_id == COMPUTE_BUDGET_PROGRAM_ID {
        decode_compute_budget_instruction(&ctx)
    } else if *program_id == MEMO_PROGRAM_ID {
        decode_memo_instruction(&ctx)
    } else if *program_id == TOKEN_PROGRAM_ID || *program_id == TOKEN_2022_PROGRAM_ID {
        decode_token_instruction(&ctx)
    } else {
        None
    };

    decoded.unwrap_or_else(|| {
        tracing::trace!(%program_id, len = ctx.data.len(), "instruction left undecoded");
        make_unknown(&ctx)
    })
}

fn make_unknown(ctx: &InstructionContext) -> ParsedInstruction {
    ParsedInstruction::Unknown(UnknownInstructionParams {
        program_id: *ctx.program_id,
        accounts: ctx.accounts.to_vec(),
        data: ctx.data.to_vec(),
    })
}

// =============================================================================
// System Program Decoding
// =============================================================================

fn decode_system_instruction(ctx: &InstructionContext) -> Option<ParsedInstruction> {
    let instr = bincode::deserialize::<SystemInstruction>(ctx.data).ok()?;

    let parsed = match instr {
        SystemInstruction::Transfer { lamports } => ParsedInstruction::Transfer(TransferParams {
            from_address: ctx.account(0)?,
            to_address: ctx.account(1)?,
            amount: lamports,
        }),
        SystemInstruction::CreateAccount {
            lamports,
            space,
            owner,
        } => ParsedInstruction::CreateAccount(CreateAccountParams {
            from_address: ctx.account(0)?,
            new_address: ctx.account(1)?,
            amount: lamports,
            space,
            owner: from_address(&owner),
        }),
        SystemInstruction::Assign { owner } => ParsedInstruction::Assign(AssignParams {
            account_address: ctx.account(0)?,
            owner: from_address(&owner),
        }),
        SystemInstruction::Allocate { space } => ParsedInstruction::Allocate(AllocateParams {
            account_address: ctx.account(0)?,
            space,
        }),
        // [0] nonce, [1] recent blockhashes sysvar, [2] authority
        SystemInstruction::AdvanceNonceAccount => {
            ParsedInstruction::NonceAdvance(NonceAdvanceParams {
                wallet_nonce_address: ctx.account(0)?,
                auth_wallet_address: ctx.account(2)?,
            })
        }
        SystemInstruction::InitializeNonceAccount(authority) => {
            ParsedInstruction::NonceInitialize(NonceInitializeParams {
                nonce_address: ctx.account(0)?,
                auth_address: from_address(&authority),
            })
        }
        _ => return None,
    };
    Some(parsed)
}

// =============================================================================
// Stake Program Decoding
// =============================================================================

fn authorize_type(kind: StakeAuthorize) -> AuthorizeType {
    match kind {
        StakeAuthorize::Staker => AuthorizeType::Staker,
        StakeAuthorize::Withdrawer => AuthorizeType::Withdrawer,
    }
}

fn decode_stake_instruction(ctx: &InstructionContext) -> Option<ParsedInstruction> {
    let instr = bincode::deserialize::<StakeInstruction>(ctx.data).ok()?;

    let parsed = match instr {
        // [0] stake, [1] rent sysvar
        StakeInstruction::Initialize(authorized, _lockup) => {
            ParsedInstruction::StakeInitialize(StakeInitializeParams {
                staking_address: ctx.account(0)?,
                staker: from_address(&authorized.staker),
                withdrawer: from_address(&authorized.withdrawer),
            })
        }
        // [0] stake, [1] vote, [2] clock, [3] stake history, [4] config, [5] authority
        StakeInstruction::DelegateStake => {
            ParsedInstruction::StakingDelegate(StakingDelegateParams {
                staking_address: ctx.account(0)?,
                from_address: ctx.account(5)?,
                validator: ctx.account(1)?,
            })
        }
        // [0] stake, [1] clock, [2] authority
        StakeInstruction::Deactivate => {
            ParsedInstruction::StakingDeactivate(StakingDeactivateParams {
                staking_address: ctx.account(0)?,
                from_address: ctx.account(2)?,
            })
        }
        // [0] stake, [1] recipient, [2] clock, [3] stake history, [4] authority
        StakeInstruction::Withdraw(lamports) => {
            ParsedInstruction::StakingWithdraw(StakingWithdrawParams {
                staking_address: ctx.account(0)?,
                from_address: ctx.account(4)?,
                to_address: ctx.account(1)?,
                amount: lamports,
            })
        }
        // [0] stake, [1] clock, [2] authority, [3] optional custodian
        StakeInstruction::Authorize(new_authority, kind) => {
            ParsedInstruction::StakingAuthorize(StakingAuthorizeParams {
                staking_address: ctx.account(0)?,
                old_authorize_address: ctx.account(2)?,
                new_authorize_address: from_address(&new_authority),
                authorize_type: authorize_type(kind),
                custodian_address: ctx.account(3),
            })
        }
        // [0] stake, [1] clock, [2] authority, [3] new authority, [4] optional custodian
        StakeInstruction::AuthorizeChecked(kind) => {
            ParsedInstruction::StakingAuthorize(StakingAuthorizeParams {
                staking_address: ctx.account(0)?,
                old_authorize_address: ctx.account(2)?,
                new_authorize_address: ctx.account(3)?,
                authorize_type: authorize_type(kind),
                custodian_address: ctx.account(4),
            })
        }
        _ => return None,
    };
    Some(parsed)
}

// =============================================================================
// ComputeBudget Program Decoding
// =============================================================================

fn decode_compute_budget_instruction(ctx: &InstructionContext) -> Option<ParsedInstruction> {
    use borsh::BorshDeserialize;

    match ComputeBudgetInstruction::try_from_slice(ctx.data).ok()? {
        ComputeBudgetInstruction::SetComputeUnitLimit(units) => Some(
            ParsedInstruction::SetComputeUnitLimit(SetComputeUnitLimitParams { units }),
        ),
        ComputeBudgetInstruction::SetComputeUnitPrice(micro_lamports) => Some(
            ParsedInstruction::SetPriorityFee(SetPriorityFeeParams {
                fee: micro_lamports,
            }),
        ),
        _ => None,
    }
}

// =============================================================================
// Memo Program Decoding
// =============================================================================

fn decode_memo_instruction(ctx: &InstructionContext) -> Option<ParsedInstruction> {
    let memo = std::str::from_utf8(ctx.data).ok()?;
    Some(ParsedInstruction::Memo(MemoParams {
        memo: memo.to_string(),
    }))
}

// =============================================================================
// Token Program Decoding (basic)
// =============================================================================

const TOKEN_TRANSFER: u8 = 3;
const TOKEN_CLOSE_ACCOUNT: u8 = 9;
const TOKEN_TRANSFER_CHECKED: u8 = 12;

fn read_amount(data: &[u8]) -> Option<u64> {
    let bytes: [u8; 8] = data.get(1..9)?.try_into().ok()?;
    Some(u64::from_le_bytes(bytes))
}

fn decode_token_instruction(ctx: &InstructionContext) -> Option<ParsedInstruction> {
    let parsed = match *ctx.data.first()? {
        // [0] source, [1] destination, [2] owner or delegate
        TOKEN_TRANSFER => ParsedInstruction::TokenTransfer(TokenTransferParams {
            from_address: ctx.account(2)?,
            to_address: ctx.account(1)?,
            amount: read_amount(ctx.data)?,
            source_address: ctx.account(0)?,
            token_address: None,
            program_id: *ctx.program_id,
            decimal_places: None,
        }),
        // [0] source, [1] mint, [2] destination, [3] owner or delegate
        TOKEN_TRANSFER_CHECKED => ParsedInstruction::TokenTransfer(TokenTransferParams {
            from_address: ctx.account(3)?,
            to_address: ctx.account(2)?,
            amount: read_amount(ctx.data)?,
            source_address: ctx.account(0)?,
            token_address: Some(ctx.account(1)?),
            program_id: *ctx.program_id,
            decimal_places: Some(*ctx.data.get(9)?),
        }),
        // [0] account, [1] destination, [2] owner
        TOKEN_CLOSE_ACCOUNT => ParsedInstruction::CloseTokenAccount(CloseTokenAccountParams {
            account_address: ctx.account(0)?,
            destination_address: ctx.account(1)?,
            authority_address: ctx.account(2)?,
            program_id: *ctx.program_id,
        }),
        _ => return None,
    };
    Some(parsed)
}
