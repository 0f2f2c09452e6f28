//! Types for transaction building.
//!
//! These are deserialized from JavaScript via serde. Public keys are base58
//! strings and lamport amounts are decimal strings, since JavaScript numbers
//! lose precision above 2^53.

use serde::Deserialize;

/// Nonce source for a transaction: a recent blockhash or a durable nonce account.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Nonce {
    Blockhash { value: String },
    /// Prepends an `AdvanceNonceAccount` instruction; `value` is the nonce
    /// stored in the account and becomes the blockhash.
    Durable {
        address: String,
        authority: String,
        value: String,
    },
}

/// Intent to build a transaction.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionIntent {
    pub fee_payer: String,
    pub nonce: Nonce,
    pub instructions: Vec<Instruction>,
    /// When non-empty, a V0 message is compiled against these tables. An
    /// empty list builds a legacy message.
    #[serde(default)]
    pub address_lookup_tables: Option<Vec<AddressLookupTable>>,
}

/// A lookup table with its full contents.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressLookupTable {
    pub account_key: String,
    pub addresses: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountMetaIntent {
    pub pubkey: String,
    #[serde(default)]
    pub is_signer: bool,
    #[serde(default)]
    pub is_writable: bool,
}

/// An instruction to include in the transaction, tagged by `type`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Instruction {
    // ===== System Program Instructions =====
    Transfer {
        from: String,
        to: String,
        lamports: String,
    },

    CreateAccount {
        from: String,
        #[serde(rename = "newAccount")]
        new_account: String,
        lamports: String,
        space: u64,
        owner: String,
    },

    NonceAdvance {
        nonce: String,
        authority: String,
    },

    NonceInitialize {
        nonce: String,
        authority: String,
    },

    Allocate {
        account: String,
        space: u64,
    },

    Assign {
        account: String,
        owner: String,
    },

    // ===== Memo Program =====
    Memo {
        message: String,
        /// Addresses that must sign the memo.
        #[serde(default)]
        signers: Vec<String>,
    },

    // ===== Compute Budget Program =====
    /// Emits a limit instruction, a price instruction, or both (limit first).
    ComputeBudget {
        #[serde(rename = "unitLimit")]
        unit_limit: Option<u32>,
        /// Micro-lamports per compute unit.
        #[serde(rename = "unitPrice")]
        unit_price: Option<u64>,
    },

    /// Any other program; `data` is base64.
    Custom {
        #[serde(rename = "programId")]
        program_id: String,
        accounts: Vec<AccountMetaIntent>,
        data: String,
    },
}
