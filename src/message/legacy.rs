//! The legacy (unversioned) message format.

use super::{
    check_instruction_indexes, compile_instructions, ensure_consumed, read_blockhash,
    read_instructions, read_keys, write_instructions, write_keys, Hash, MessageHeader,
    MESSAGE_VERSION_PREFIX,
};
use crate::account::{AccountKeysList, AccountMeta};
use crate::compact::ByteReader;
use crate::error::{Result, TxError};
use crate::instruction::{CompiledInstruction, TransactionInstruction};
use crate::pubkey::Pubkey;

/// A compiled legacy message. Every account is embedded by its full key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyMessage {
    pub header: MessageHeader,
    pub account_keys: Vec<Pubkey>,
    pub recent_blockhash: Hash,
    pub instructions: Vec<CompiledInstruction>,
}

impl LegacyMessage {
    /// Compile `instructions` into the canonical account order with `fee_payer` first.
    pub fn compile(
        fee_payer: &Pubkey,
        recent_blockhash: Hash,
        instructions: &[TransactionInstruction],
    ) -> Result<Self> {
        if instructions.is_empty() {
            return Err(TxError::NoInstructions);
        }
        let accounts = AccountKeysList::from_instructions(instructions).compile(Some(fee_payer));
        let header = MessageHeader::from_accounts(&accounts)?;
        let account_keys: Vec<Pubkey> = accounts.iter().map(|meta| meta.pubkey).collect();
        let instructions = compile_instructions(instructions, &account_keys)?;

        tracing::debug!(
            %fee_payer,
            num_accounts = account_keys.len(),
            num_signers = header.num_required_signatures,
            num_instructions = instructions.len(),
            "compiled legacy message"
        );
        Ok(LegacyMessage {
            header,
            account_keys,
            recent_blockhash,
            instructions,
        })
    }

    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(
            MessageHeader::LEN + 1 + self.account_keys.len() * 32 + 32 + 1,
        );
        self.header.write(&mut out);
        write_keys(&mut out, &self.account_keys);
        out.extend_from_slice(self.recent_blockhash.as_ref());
        write_instructions(&mut out, &self.instructions);
        out
    }

    /// Decode a legacy message occupying all of `bytes`.
    pub fn deserialize(bytes: &[u8]) -> Result<Self> {
        let mut reader = ByteReader::new(bytes);
        let message = Self::read(&mut reader)?;
        ensure_consumed(&reader, "legacy message")?;
        Ok(message)
    }

    pub(crate) fn read(reader: &mut ByteReader<'_>) -> Result<Self> {
        if let Some(prefix) = reader.peek_u8().filter(|b| b & MESSAGE_VERSION_PREFIX != 0) {
            return Err(TxError::decode(format!(
                "legacy message: unexpected version prefix {:#04x}",
                prefix
            )));
        }
        let header = MessageHeader::read(reader)?;
        let account_keys = read_keys(reader)?;
        header.check(account_keys.len())?;
        let recent_blockhash = read_blockhash(reader)?;
        let instructions = read_instructions(reader)?;
        check_instruction_indexes(&instructions, account_keys.len())?;

        Ok(LegacyMessage {
            header,
            account_keys,
            recent_blockhash,
            instructions,
        })
    }

    pub fn fee_payer(&self) -> Option<&Pubkey> {
        self.account_keys.first()
    }

    /// The keys whose signatures the message requires, in slot order.
    pub fn signer_keys(&self) -> &[Pubkey] {
        let n = (self.header.num_required_signatures as usize).min(self.account_keys.len());
        &self.account_keys[..n]
    }

    pub fn is_signer(&self, index: usize) -> bool {
        index < self.account_keys.len() && self.header.is_signer(index)
    }

    pub fn is_writable(&self, index: usize) -> bool {
        index < self.account_keys.len()
            && self.header.is_writable(index, self.account_keys.len())
    }

    /// Roles of every account key, as inferred from the header.
    pub fn account_metas(&self) -> Vec<AccountMeta> {
        self.account_keys
            .iter()
            .enumerate()
            .map(|(i, pubkey)| AccountMeta {
                pubkey: *pubkey,
                is_signer: self.is_signer(i),
                is_writable: self.is_writable(i),
            })
            .collect()
    }

    /// Expand index-form instructions back to key form.
    ///
    /// Account roles come from the header, so they reflect the merged roles of
    /// the message rather than what each instruction originally requested.
    pub fn decompile(&self) -> Result<Vec<TransactionInstruction>> {
        decompile_with(&self.account_metas(), &self.instructions)
    }
}

pub(crate) fn decompile_with(
    metas: &[AccountMeta],
    instructions: &[CompiledInstruction],
) -> Result<Vec<TransactionInstruction>> {
    let meta = |index: u8| {
        metas.get(index as usize).copied().ok_or_else(|| {
            TxError::decode(format!(
                "account index {} out of range for {} keys",
                index,
                metas.len()
            ))
        })
    };
    instructions
        .iter()
        .map(|ix| {
            Ok(TransactionInstruction {
                program_id: meta(ix.program_id_index)?.pubkey,
                keys: ix
                    .accounts
                    .iter()
                    .map(|&index| meta(index))
                    .collect::<Result<Vec<_>>>()?,
                data: ix.data.clone(),
            })
        })
        .collect()
}
