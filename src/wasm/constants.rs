//! Program ID constants exported via WASM.
//!
//! These let JavaScript code reference well-known Solana program IDs
//! without importing @solana/web3.js.

use crate::programs::{
    system::NONCE_ACCOUNT_SPACE, COMPUTE_BUDGET_PROGRAM_ID, MEMO_PROGRAM_ID, STAKE_PROGRAM_ID,
    SYSTEM_PROGRAM_ID, SYSVAR_RECENT_BLOCKHASHES, SYSVAR_RENT, TOKEN_2022_PROGRAM_ID,
    TOKEN_PROGRAM_ID,
};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub fn system_program_id() -> String {
    SYSTEM_PROGRAM_ID.to_string()
}

#[wasm_bindgen]
pub fn stake_program_id() -> String {
    STAKE_PROGRAM_ID.to_string()
}

#[wasm_bindgen]
pub fn compute_budget_program_id() -> String {
    COMPUTE_BUDGET_PROGRAM_ID.to_string()
}

#[wasm_bindgen]
pub fn memo_program_id() -> String {
    MEMO_PROGRAM_ID.to_string()
}

/// Token Program ID (SPL Token)
#[wasm_bindgen]
pub fn token_program_id() -> String {
    TOKEN_PROGRAM_ID.to_string()
}

#[wasm_bindgen]
pub fn token_2022_program_id() -> String {
    TOKEN_2022_PROGRAM_ID.to_string()
}

/// Sysvar Recent Blockhashes address
#[wasm_bindgen]
pub fn sysvar_recent_blockhashes() -> String {
    SYSVAR_RECENT_BLOCKHASHES.to_string()
}

#[wasm_bindgen]
pub fn sysvar_rent() -> String {
    SYSVAR_RENT.to_string()
}

/// Nonce account space in bytes (80)
#[wasm_bindgen]
pub fn nonce_account_space() -> u64 {
    NONCE_ACCOUNT_SPACE
}
