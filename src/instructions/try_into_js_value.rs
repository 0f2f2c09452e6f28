//! TryIntoJsValue implementations for decoded instructions.
//!
//! Addresses become base58 strings and u64 amounts become BigInt.

use crate::js_obj;
use crate::wasm::try_into_js_value::{JsConversionError, TryIntoJsValue};
use base64::prelude::*;
use wasm_bindgen::JsValue;

use super::types::*;

impl TryIntoJsValue for AuthorizeType {
    fn try_to_js_value(&self) -> Result<JsValue, JsConversionError> {
        let s = match self {
            AuthorizeType::Staker => "Staker",
            AuthorizeType::Withdrawer => "Withdrawer",
        };
        Ok(JsValue::from_str(s))
    }
}

// =============================================================================
// System Program Params
// =============================================================================

impl TryIntoJsValue for TransferParams {
    fn try_to_js_value(&self) -> Result<JsValue, JsConversionError> {
        js_obj!(
            "type" => "Transfer",
            "fromAddress" => self.from_address,
            "toAddress" => self.to_address,
            "amount" => self.amount
        )
    }
}

impl TryIntoJsValue for CreateAccountParams {
    fn try_to_js_value(&self) -> Result<JsValue, JsConversionError> {
        js_obj!(
            "type" => "CreateAccount",
            "fromAddress" => self.from_address,
            "newAddress" => self.new_address,
            "amount" => self.amount,
            "space" => self.space,
            "owner" => self.owner
        )
    }
}

impl TryIntoJsValue for AssignParams {
    fn try_to_js_value(&self) -> Result<JsValue, JsConversionError> {
        js_obj!(
            "type" => "Assign",
            "accountAddress" => self.account_address,
            "owner" => self.owner
        )
    }
}

impl TryIntoJsValue for AllocateParams {
    fn try_to_js_value(&self) -> Result<JsValue, JsConversionError> {
        js_obj!(
            "type" => "Allocate",
            "accountAddress" => self.account_address,
            "space" => self.space
        )
    }
}

impl TryIntoJsValue for NonceAdvanceParams {
    fn try_to_js_value(&self) -> Result<JsValue, JsConversionError> {
        js_obj!(
            "type" => "NonceAdvance",
            "walletNonceAddress" => self.wallet_nonce_address,
            "authWalletAddress" => self.auth_wallet_address
        )
    }
}

impl TryIntoJsValue for NonceInitializeParams {
    fn try_to_js_value(&self) -> Result<JsValue, JsConversionError> {
        js_obj!(
            "type" => "NonceInitialize",
            "nonceAddress" => self.nonce_address,
            "authAddress" => self.auth_address
        )
    }
}

// =============================================================================
// Stake Program Params
// =============================================================================

impl TryIntoJsValue for StakeInitializeParams {
    fn try_to_js_value(&self) -> Result<JsValue, JsConversionError> {
        js_obj!(
            "type" => "StakeInitialize",
            "stakingAddress" => self.staking_address,
            "staker" => self.staker,
            "withdrawer" => self.withdrawer
        )
    }
}

impl TryIntoJsValue for StakingDelegateParams {
    fn try_to_js_value(&self) -> Result<JsValue, JsConversionError> {
        js_obj!(
            "type" => "StakingDelegate",
            "stakingAddress" => self.staking_address,
            "fromAddress" => self.from_address,
            "validator" => self.validator
        )
    }
}

impl TryIntoJsValue for StakingDeactivateParams {
    fn try_to_js_value(&self) -> Result<JsValue, JsConversionError> {
        js_obj!(
            "type" => "StakingDeactivate",
            "stakingAddress" => self.staking_address,
            "fromAddress" => self.from_address
        )
    }
}

impl TryIntoJsValue for StakingWithdrawParams {
    fn try_to_js_value(&self) -> Result<JsValue, JsConversionError> {
        js_obj!(
            "type" => "StakingWithdraw",
            "stakingAddress" => self.staking_address,
            "fromAddress" => self.from_address,
            "toAddress" => self.to_address,
            "amount" => self.amount
        )
    }
}

impl TryIntoJsValue for StakingAuthorizeParams {
    fn try_to_js_value(&self) -> Result<JsValue, JsConversionError> {
        js_obj!(
            "type" => "StakingAuthorize",
            "stakingAddress" => self.staking_address,
            "oldAuthorizeAddress" => self.old_authorize_address,
            "newAuthorizeAddress" => self.new_authorize_address,
            "authorizeType" => self.authorize_type,
            "custodianAddress" => self.custodian_address
        )
    }
}

// =============================================================================
// ComputeBudget Params
// =============================================================================

impl TryIntoJsValue for SetComputeUnitLimitParams {
    fn try_to_js_value(&self) -> Result<JsValue, JsConversionError> {
        js_obj!(
            "type" => "SetComputeUnitLimit",
            "units" => self.units
        )
    }
}

impl TryIntoJsValue for SetPriorityFeeParams {
    fn try_to_js_value(&self) -> Result<JsValue, JsConversionError> {
        js_obj!(
            "type" => "SetPriorityFee",
            "fee" => self.fee
        )
    }
}

// =============================================================================
// Token Params
// =============================================================================

impl TryIntoJsValue for TokenTransferParams {
    fn try_to_js_value(&self) -> Result<JsValue, JsConversionError> {
        js_obj!(
            "type" => "TokenTransfer",
            "fromAddress" => self.from_address,
            "toAddress" => self.to_address,
            "amount" => self.amount,
            "sourceAddress" => self.source_address,
            "tokenAddress" => self.token_address,
            "programId" => self.program_id,
            "decimalPlaces" => self.decimal_places
        )
    }
}

impl TryIntoJsValue for CloseTokenAccountParams {
    fn try_to_js_value(&self) -> Result<JsValue, JsConversionError> {
        js_obj!(
            "type" => "CloseTokenAccount",
            "accountAddress" => self.account_address,
            "destinationAddress" => self.destination_address,
            "authorityAddress" => self.authority_address,
            "programId" => self.program_id
        )
    }
}

// =============================================================================
// Memo & Unknown
// =============================================================================

impl TryIntoJsValue for MemoParams {
    fn try_to_js_value(&self) -> Result<JsValue, JsConversionError> {
        js_obj!(
            "type" => "Memo",
            "memo" => self.memo
        )
    }
}

impl TryIntoJsValue for UnknownInstructionParams {
    fn try_to_js_value(&self) -> Result<JsValue, JsConversionError> {
        js_obj!(
            "type" => "Unknown",
            "programId" => self.program_id,
            "accounts" => self.accounts,
            "data" => BASE64_STANDARD.encode(&self.data)
        )
    }
}

// =============================================================================
// ParsedInstruction enum
// =============================================================================

impl TryIntoJsValue for ParsedInstruction {
    fn try_to_js_value(&self) -> Result<JsValue, JsConversionError> {
        match self {
            ParsedInstruction::Transfer(p) => p.try_to_js_value(),
            ParsedInstruction::CreateAccount(p) => p.try_to_js_value(),
            ParsedInstruction::Assign(p) => p.try_to_js_value(),
            ParsedInstruction::Allocate(p) => p.try_to_js_value(),
            ParsedInstruction::NonceAdvance(p) => p.try_to_js_value(),
            ParsedInstruction::NonceInitialize(p) => p.try_to_js_value(),
            ParsedInstruction::StakeInitialize(p) => p.try_to_js_value(),
            ParsedInstruction::StakingDelegate(p) => p.try_to_js_value(),
            ParsedInstruction::StakingDeactivate(p) => p.try_to_js_value(),
            ParsedInstruction::StakingWithdraw(p) => p.try_to_js_value(),
            ParsedInstruction::StakingAuthorize(p) => p.try_to_js_value(),
            ParsedInstruction::SetComputeUnitLimit(p) => p.try_to_js_value(),
            ParsedInstruction::SetPriorityFee(p) => p.try_to_js_value(),
            ParsedInstruction::TokenTransfer(p) => p.try_to_js_value(),
            ParsedInstruction::CloseTokenAccount(p) => p.try_to_js_value(),
            ParsedInstruction::Memo(p) => p.try_to_js_value(),
            ParsedInstruction::Unknown(p) => p.try_to_js_value(),
        }
    }
}
