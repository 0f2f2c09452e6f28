//! Transaction assembly and signing.
//!
//! # Wire Format
//!
//! ```text
//! [len + signatures: 64 bytes each][message]
//! ```
//!
//! Signature `i` belongs to the message's `i`-th account key. Unsigned or
//! partially signed transactions carry 64 zero bytes in each pending slot so
//! that later signers can complete them from the wire bytes alone.

mod signed;

pub use signed::{SignedTransaction, SIGNATURE_BYTES};

use crate::error::Result;
use crate::instruction::TransactionInstruction;
use crate::message::{AddressLookupTableAccount, Hash, LegacyMessage, Message, VersionedMessage};
use crate::pubkey::Pubkey;
use solana_signer::Signer;

/// Compile with a fee payer, defaulting it to the first signer, then sign.
fn sign_message(
    message: &mut Message,
    signers: &[&dyn Signer],
    compile: impl FnOnce(&Message) -> Result<VersionedMessage>,
) -> Result<SignedTransaction> {
    if message.fee_payer().is_none() {
        if let Some(first) = signers.first() {
            message.set_fee_payer(first.pubkey());
        }
    }
    let mut tx = SignedTransaction::from_message(compile(message)?);
    tx.sign(signers)?;
    Ok(tx)
}

/// Builder for legacy transactions.
#[derive(Debug, Clone, Default)]
pub struct Transaction {
    message: Message,
}

impl Transaction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_message(message: Message) -> Self {
        Transaction { message }
    }

    pub fn message(&self) -> &Message {
        &self.message
    }

    pub fn message_mut(&mut self) -> &mut Message {
        &mut self.message
    }

    pub fn add_instruction(&mut self, instruction: TransactionInstruction) -> &mut Self {
        self.message.add_instruction(instruction);
        self
    }

    pub fn set_fee_payer(&mut self, fee_payer: Pubkey) -> &mut Self {
        self.message.set_fee_payer(fee_payer);
        self
    }

    pub fn set_recent_blockhash(&mut self, blockhash: Hash) -> &mut Self {
        self.message.set_recent_blockhash(blockhash);
        self
    }

    pub fn compile(&self) -> Result<LegacyMessage> {
        self.message.compile_legacy()
    }

    /// Sign with `signers`. Signers not covering every required slot leave
    /// the rest pending.
    pub fn sign(&mut self, signers: &[&dyn Signer]) -> Result<SignedTransaction> {
        sign_message(&mut self.message, signers, |m| {
            m.compile_legacy().map(VersionedMessage::Legacy)
        })
    }

    /// Wire bytes with a zeroed placeholder in every signature slot.
    pub fn serialize_unsigned(&self) -> Result<Vec<u8>> {
        SignedTransaction::from_message(self.compile()?.into()).serialize(true)
    }
}

/// Builder for transactions that may reference address lookup tables.
///
/// Without tables it produces exactly the legacy encoding.
#[derive(Debug, Clone, Default)]
pub struct VersionedTransaction {
    message: Message,
}

impl VersionedTransaction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_message(message: Message) -> Self {
        VersionedTransaction { message }
    }

    pub fn message(&self) -> &Message {
        &self.message
    }

    pub fn message_mut(&mut self) -> &mut Message {
        &mut self.message
    }

    pub fn add_instruction(&mut self, instruction: TransactionInstruction) -> &mut Self {
        self.message.add_instruction(instruction);
        self
    }

    pub fn set_fee_payer(&mut self, fee_payer: Pubkey) -> &mut Self {
        self.message.set_fee_payer(fee_payer);
        self
    }

    pub fn set_recent_blockhash(&mut self, blockhash: Hash) -> &mut Self {
        self.message.set_recent_blockhash(blockhash);
        self
    }

    pub fn add_lookup_table(&mut self, table: AddressLookupTableAccount) -> &mut Self {
        self.message.add_lookup_table(table);
        self
    }

    pub fn compile(&self) -> Result<VersionedMessage> {
        self.message.compile()
    }

    pub fn sign(&mut self, signers: &[&dyn Signer]) -> Result<SignedTransaction> {
        sign_message(&mut self.message, signers, Message::compile)
    }

    pub fn serialize_unsigned(&self) -> Result<Vec<u8>> {
        SignedTransaction::from_message(self.compile()?).serialize(true)
    }
}
