//! Compute budget program instructions (borsh encoded, no accounts).

use super::COMPUTE_BUDGET_PROGRAM_ID;
use crate::error::{Result, TxError};
use crate::instruction::TransactionInstruction;
use solana_compute_budget_interface::ComputeBudgetInstruction;

fn instruction(data: &ComputeBudgetInstruction) -> Result<TransactionInstruction> {
    let data = borsh::to_vec(data).map_err(|e| TxError::InstructionData(e.to_string()))?;
    Ok(TransactionInstruction::new(COMPUTE_BUDGET_PROGRAM_ID, vec![], data))
}

pub fn set_compute_unit_limit(units: u32) -> Result<TransactionInstruction> {
    instruction(&ComputeBudgetInstruction::SetComputeUnitLimit(units))
}

/// Priority fee in micro-lamports per compute unit.
pub fn set_compute_unit_price(micro_lamports: u64) -> Result<TransactionInstruction> {
    instruction(&ComputeBudgetInstruction::SetComputeUnitPrice(micro_lamports))
}
