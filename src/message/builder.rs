//! Mutable message builder.

use super::lookup::AddressLookupTableAccount;
use super::{Hash, LegacyMessage, V0Message, VersionedMessage};
use crate::account::{AccountKeysList, AccountMeta};
use crate::error::{Result, TxError};
use crate::instruction::TransactionInstruction;
use crate::pubkey::Pubkey;
use std::str::FromStr;

/// Accumulates instructions and settings until compiled.
///
/// Compilation does not consume or modify the builder; the compiled message is
/// an independent value.
#[derive(Debug, Clone, Default)]
pub struct Message {
    fee_payer: Option<Pubkey>,
    recent_blockhash: Option<Hash>,
    instructions: Vec<TransactionInstruction>,
    lookup_tables: Vec<AddressLookupTableAccount>,
}

impl Message {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_instruction(&mut self, instruction: TransactionInstruction) -> &mut Self {
        self.instructions.push(instruction);
        self
    }

    pub fn add_instructions(
        &mut self,
        instructions: impl IntoIterator<Item = TransactionInstruction>,
    ) -> &mut Self {
        self.instructions.extend(instructions);
        self
    }

    pub fn set_fee_payer(&mut self, fee_payer: Pubkey) -> &mut Self {
        self.fee_payer = Some(fee_payer);
        self
    }

    pub fn set_recent_blockhash(&mut self, blockhash: Hash) -> &mut Self {
        self.recent_blockhash = Some(blockhash);
        self
    }

    /// Set the blockhash from its base58 text form.
    pub fn set_recent_blockhash_str(&mut self, blockhash: &str) -> Result<&mut Self> {
        let hash = Hash::from_str(blockhash).map_err(|_| TxError::InvalidBase58 {
            what: "blockhash",
            value: blockhash.to_string(),
        })?;
        Ok(self.set_recent_blockhash(hash))
    }

    pub fn add_lookup_table(&mut self, table: AddressLookupTableAccount) -> &mut Self {
        self.lookup_tables.push(table);
        self
    }

    pub fn fee_payer(&self) -> Option<&Pubkey> {
        self.fee_payer.as_ref()
    }

    pub fn recent_blockhash(&self) -> Option<&Hash> {
        self.recent_blockhash.as_ref()
    }

    pub fn instructions(&self) -> &[TransactionInstruction] {
        &self.instructions
    }

    pub fn lookup_tables(&self) -> &[AddressLookupTableAccount] {
        &self.lookup_tables
    }

    /// Merged view of every account referenced so far, fee payer included.
    pub fn account_keys(&self) -> AccountKeysList {
        let mut list = AccountKeysList::new();
        if let Some(payer) = &self.fee_payer {
            list.add(AccountMeta::new(*payer, true));
        }
        for instruction in &self.instructions {
            list.add_instruction(instruction);
        }
        list
    }

    fn preconditions(&self) -> Result<(&Pubkey, Hash)> {
        let fee_payer = self.fee_payer.as_ref().ok_or(TxError::MissingFeePayer)?;
        let blockhash = self.recent_blockhash.ok_or(TxError::MissingRecentBlockhash)?;
        if self.instructions.is_empty() {
            return Err(TxError::NoInstructions);
        }
        Ok((fee_payer, blockhash))
    }

    /// Compile to the legacy format, ignoring any lookup tables.
    pub fn compile_legacy(&self) -> Result<LegacyMessage> {
        let (fee_payer, blockhash) = self.preconditions()?;
        LegacyMessage::compile(fee_payer, blockhash, &self.instructions)
    }

    /// Compile to V0 with the supplied tables, even when there are none.
    pub fn compile_v0(&self) -> Result<V0Message> {
        let (fee_payer, blockhash) = self.preconditions()?;
        V0Message::compile(fee_payer, blockhash, &self.instructions, &self.lookup_tables)
    }

    /// Legacy when no lookup tables were added, V0 otherwise.
    pub fn compile(&self) -> Result<VersionedMessage> {
        if self.lookup_tables.is_empty() {
            self.compile_legacy().map(VersionedMessage::Legacy)
        } else {
            self.compile_v0().map(VersionedMessage::V0)
        }
    }

    pub fn serialize(&self) -> Result<Vec<u8>> {
        Ok(self.compile()?.serialize())
    }
}
