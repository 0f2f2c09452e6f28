//! Message compilation and wire encoding.
//!
//! A [`Message`] accumulates instructions, a fee payer, a blockhash and
//! optionally address lookup tables. Compiling it yields an immutable
//! [`VersionedMessage`]: either a [`LegacyMessage`] (no lookup tables) or a
//! [`V0Message`] whose non-signer, non-program accounts may be referenced
//! through the supplied tables.
//!
//! # Wire Format
//!
//! ```text
//! legacy: [header: 3][len + keys: 32 each][blockhash: 32][len + instructions]
//! v0:     [0x80][header: 3][len + keys][blockhash][len + instructions][len + lookups]
//! ```

mod builder;
mod header;
mod legacy;
mod lookup;
mod v0;
mod versioned;

pub use builder::Message;
pub use header::MessageHeader;
pub use legacy::LegacyMessage;
pub use lookup::{AddressLookupTableAccount, LoadedAddresses, MessageAddressTableLookup};
pub use v0::V0Message;
pub use versioned::{AccountRef, TxVersion, VersionedMessage};

/// Re-export the blockhash type.
pub use solana_sdk::hash::Hash;

use crate::compact::{write_length, ByteReader};
use crate::error::{Result, TxError};
use crate::instruction::{CompiledInstruction, TransactionInstruction};
use crate::pubkey::Pubkey;
use std::collections::HashMap;

/// High bit of the first message byte; set for versioned messages.
pub const MESSAGE_VERSION_PREFIX: u8 = 0x80;

/// Replace every key in `instructions` with its position in `keys`.
pub(crate) fn compile_instructions(
    instructions: &[TransactionInstruction],
    keys: &[Pubkey],
) -> Result<Vec<CompiledInstruction>> {
    if keys.len() > u8::MAX as usize + 1 {
        return Err(TxError::AccountIndexOverflow);
    }
    let positions: HashMap<&Pubkey, u8> = keys
        .iter()
        .enumerate()
        .map(|(i, key)| (key, i as u8))
        .collect();
    let position = |key: &Pubkey| {
        positions
            .get(key)
            .copied()
            .ok_or(TxError::UnknownAccount(*key))
    };

    instructions
        .iter()
        .map(|ix| {
            Ok(CompiledInstruction {
                program_id_index: position(&ix.program_id)?,
                accounts: ix
                    .keys
                    .iter()
                    .map(|meta| position(&meta.pubkey))
                    .collect::<Result<Vec<u8>>>()?,
                data: ix.data.clone(),
            })
        })
        .collect()
}

pub(crate) fn write_keys(out: &mut Vec<u8>, keys: &[Pubkey]) {
    write_length(out, keys.len());
    for key in keys {
        out.extend_from_slice(key.as_ref());
    }
}

pub(crate) fn read_keys(reader: &mut ByteReader<'_>) -> Result<Vec<Pubkey>> {
    let len = reader.read_length()?;
    // Each key needs 32 bytes; reject absurd lengths before allocating.
    if len > reader.remaining().len() / 32 {
        return Err(TxError::decode(format!(
            "account keys: {} keys do not fit in {} bytes",
            len,
            reader.remaining().len()
        )));
    }
    (0..len)
        .map(|_| Ok(Pubkey::new_from_array(reader.read_array("account key")?)))
        .collect()
}

pub(crate) fn write_instructions(out: &mut Vec<u8>, instructions: &[CompiledInstruction]) {
    write_length(out, instructions.len());
    for ix in instructions {
        ix.write(out);
    }
}

pub(crate) fn read_instructions(reader: &mut ByteReader<'_>) -> Result<Vec<CompiledInstruction>> {
    let len = reader.read_length()?;
    // The smallest instruction is 3 bytes.
    if len > reader.remaining().len() / 3 {
        return Err(TxError::decode(format!(
            "instructions: {} instructions do not fit in {} bytes",
            len,
            reader.remaining().len()
        )));
    }
    (0..len).map(|_| CompiledInstruction::read(reader)).collect()
}

/// Fail if any instruction points past the `num_keys` addressable accounts.
pub(crate) fn check_instruction_indexes(
    instructions: &[CompiledInstruction],
    num_keys: usize,
) -> Result<()> {
    for (i, ix) in instructions.iter().enumerate() {
        let out_of_range = std::iter::once(&ix.program_id_index)
            .chain(&ix.accounts)
            .find(|&&index| index as usize >= num_keys);
        if let Some(index) = out_of_range {
            return Err(TxError::decode(format!(
                "instruction {}: account index {} out of range for {} keys",
                i, index, num_keys
            )));
        }
    }
    Ok(())
}

pub(crate) fn read_blockhash(reader: &mut ByteReader<'_>) -> Result<Hash> {
    Ok(Hash::new_from_array(reader.read_array("recent blockhash")?))
}

pub(crate) fn ensure_consumed(reader: &ByteReader<'_>, what: &str) -> Result<()> {
    if !reader.remaining().is_empty() {
        return Err(TxError::decode(format!(
            "{}: {} trailing bytes at offset {}",
            what,
            reader.remaining().len(),
            reader.offset()
        )));
    }
    Ok(())
}
