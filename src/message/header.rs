//! The 3-byte message header.

use crate::account::AccountMeta;
use crate::compact::ByteReader;
use crate::error::{Result, TxError};

/// Role counts over a message's static account keys.
///
/// Together with the key order they fully determine each static account's
/// role: the first `num_required_signatures` keys sign, the last
/// `num_readonly_signed_accounts` of those are read-only, and the last
/// `num_readonly_unsigned_accounts` keys overall are read-only non-signers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MessageHeader {
    pub num_required_signatures: u8,
    pub num_readonly_signed_accounts: u8,
    pub num_readonly_unsigned_accounts: u8,
}

impl MessageHeader {
    pub const LEN: usize = 3;

    /// Count roles over an already role-sorted account list.
    pub fn from_accounts(accounts: &[AccountMeta]) -> Result<Self> {
        let try_into_u8 =
            |num: usize| u8::try_from(num).map_err(|_| TxError::AccountIndexOverflow);

        let signers = accounts.iter().filter(|m| m.is_signer).count();
        let readonly_signers = accounts
            .iter()
            .filter(|m| m.is_signer && !m.is_writable)
            .count();
        let readonly_unsigned = accounts
            .iter()
            .filter(|m| !m.is_signer && !m.is_writable)
            .count();

        Ok(MessageHeader {
            num_required_signatures: try_into_u8(signers)?,
            num_readonly_signed_accounts: try_into_u8(readonly_signers)?,
            num_readonly_unsigned_accounts: try_into_u8(readonly_unsigned)?,
        })
    }

    pub(crate) fn write(&self, out: &mut Vec<u8>) {
        out.push(self.num_required_signatures);
        out.push(self.num_readonly_signed_accounts);
        out.push(self.num_readonly_unsigned_accounts);
    }

    pub(crate) fn read(reader: &mut ByteReader<'_>) -> Result<Self> {
        Ok(MessageHeader {
            num_required_signatures: reader.read_u8("header")?,
            num_readonly_signed_accounts: reader.read_u8("header")?,
            num_readonly_unsigned_accounts: reader.read_u8("header")?,
        })
    }

    /// Reject headers whose counts can not describe `num_static_keys` keys.
    pub(crate) fn check(&self, num_static_keys: usize) -> Result<()> {
        let signers = self.num_required_signatures as usize;
        let valid = signers <= num_static_keys
            // The fee payer is always a writable signer.
            && self.num_readonly_signed_accounts < self.num_required_signatures
            && signers + self.num_readonly_unsigned_accounts as usize <= num_static_keys;
        if !valid {
            return Err(TxError::decode(format!(
                "message header {:?} for {} account keys",
                self, num_static_keys
            )));
        }
        Ok(())
    }

    pub fn is_signer(&self, index: usize) -> bool {
        index < self.num_required_signatures as usize
    }

    /// Writability of a static key at `index` among `num_static_keys`.
    pub fn is_writable(&self, index: usize, num_static_keys: usize) -> bool {
        let signers = self.num_required_signatures as usize;
        if index < signers {
            index < signers - self.num_readonly_signed_accounts as usize
        } else {
            index < num_static_keys.saturating_sub(self.num_readonly_unsigned_accounts as usize)
        }
    }
}
