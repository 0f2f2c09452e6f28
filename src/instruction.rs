//! Program invocations, in key form and in compiled (index) form.

use crate::account::AccountMeta;
use crate::compact::{write_length, ByteReader};
use crate::error::Result;
use crate::pubkey::Pubkey;

/// A call to a program with its account references and opaque data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionInstruction {
    pub program_id: Pubkey,
    pub keys: Vec<AccountMeta>,
    pub data: Vec<u8>,
}

impl TransactionInstruction {
    pub fn new(program_id: Pubkey, keys: Vec<AccountMeta>, data: Vec<u8>) -> Self {
        TransactionInstruction {
            program_id,
            keys,
            data,
        }
    }
}

/// An instruction whose program and accounts are indexes into a message's
/// account list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledInstruction {
    pub program_id_index: u8,
    pub accounts: Vec<u8>,
    pub data: Vec<u8>,
}

impl CompiledInstruction {
    /// `[program index][len + account indexes][len + data]`
    pub(crate) fn write(&self, out: &mut Vec<u8>) {
        out.push(self.program_id_index);
        write_length(out, self.accounts.len());
        out.extend_from_slice(&self.accounts);
        write_length(out, self.data.len());
        out.extend_from_slice(&self.data);
    }

    pub(crate) fn read(reader: &mut ByteReader<'_>) -> Result<Self> {
        let program_id_index = reader.read_u8("instruction program index")?;
        let num_accounts = reader.read_length()?;
        let accounts = reader
            .read_bytes(num_accounts, "instruction account indexes")?
            .to_vec();
        let data_len = reader.read_length()?;
        let data = reader.read_bytes(data_len, "instruction data")?.to_vec();
        Ok(CompiledInstruction {
            program_id_index,
            accounts,
            data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compiled_instruction_layout() {
        let ix = CompiledInstruction {
            program_id_index: 2,
            accounts: vec![0, 1],
            data: vec![9, 8, 7],
        };
        let mut out = Vec::new();
        ix.write(&mut out);
        assert_eq!(out, vec![2, 2, 0, 1, 3, 9, 8, 7]);

        let mut reader = ByteReader::new(&out);
        assert_eq!(CompiledInstruction::read(&mut reader).unwrap(), ix);
        assert!(reader.remaining().is_empty());
    }

    #[test]
    fn test_read_truncated_data() {
        let bytes = [2, 1, 0, 5, 1, 2];
        let mut reader = ByteReader::new(&bytes);
        assert!(CompiledInstruction::read(&mut reader).is_err());
    }
}
