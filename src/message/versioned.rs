//! The closed set of compiled message formats.

use super::lookup::{AddressLookupTableAccount, MessageAddressTableLookup};
use super::{Hash, LegacyMessage, MessageHeader, V0Message, MESSAGE_VERSION_PREFIX};
use crate::account::AccountMeta;
use crate::compact::ByteReader;
use crate::error::{Result, TxError};
use crate::instruction::{CompiledInstruction, TransactionInstruction};
use crate::pubkey::Pubkey;

/// Transaction version, as exposed to callers.
///
/// Named `TxVersion` to keep it apart from the message types themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxVersion {
    Legacy,
    V0,
}

/// An instruction account as far as the message alone can describe it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountRef {
    Static(AccountMeta),
    /// Loaded through a lookup table. `index` is the position in the combined
    /// account list; resolving the address needs the table contents.
    Lookup { index: usize, is_writable: bool },
}

/// A compiled message of either format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionedMessage {
    Legacy(LegacyMessage),
    V0(V0Message),
}

impl VersionedMessage {
    pub fn version(&self) -> TxVersion {
        match self {
            VersionedMessage::Legacy(_) => TxVersion::Legacy,
            VersionedMessage::V0(_) => TxVersion::V0,
        }
    }

    pub fn header(&self) -> &MessageHeader {
        match self {
            VersionedMessage::Legacy(m) => &m.header,
            VersionedMessage::V0(m) => &m.header,
        }
    }

    /// Keys embedded in the message itself.
    pub fn static_account_keys(&self) -> &[Pubkey] {
        match self {
            VersionedMessage::Legacy(m) => &m.account_keys,
            VersionedMessage::V0(m) => &m.account_keys,
        }
    }

    pub fn recent_blockhash(&self) -> &Hash {
        match self {
            VersionedMessage::Legacy(m) => &m.recent_blockhash,
            VersionedMessage::V0(m) => &m.recent_blockhash,
        }
    }

    pub fn instructions(&self) -> &[CompiledInstruction] {
        match self {
            VersionedMessage::Legacy(m) => &m.instructions,
            VersionedMessage::V0(m) => &m.instructions,
        }
    }

    /// Lookups of a V0 message; always empty for legacy.
    pub fn address_table_lookups(&self) -> &[MessageAddressTableLookup] {
        match self {
            VersionedMessage::Legacy(_) => &[],
            VersionedMessage::V0(m) => &m.address_table_lookups,
        }
    }

    pub fn fee_payer(&self) -> Option<&Pubkey> {
        self.static_account_keys().first()
    }

    pub fn signer_keys(&self) -> &[Pubkey] {
        match self {
            VersionedMessage::Legacy(m) => m.signer_keys(),
            VersionedMessage::V0(m) => m.signer_keys(),
        }
    }

    pub fn is_signer(&self, index: usize) -> bool {
        match self {
            VersionedMessage::Legacy(m) => m.is_signer(index),
            VersionedMessage::V0(m) => m.is_signer(index),
        }
    }

    pub fn is_writable(&self, index: usize) -> bool {
        match self {
            VersionedMessage::Legacy(m) => m.is_writable(index),
            VersionedMessage::V0(m) => m.is_writable(index),
        }
    }

    /// Static keys plus, for V0, every address pulled in through lookups.
    pub fn num_addressable_keys(&self) -> usize {
        match self {
            VersionedMessage::Legacy(m) => m.account_keys.len(),
            VersionedMessage::V0(m) => m.num_addressable_keys(),
        }
    }

    /// Describe the account at `index` of the combined list without any
    /// lookup tables. `None` past the end of the list.
    pub fn account_ref(&self, index: usize) -> Option<AccountRef> {
        if let Some(pubkey) = self.static_account_keys().get(index) {
            return Some(AccountRef::Static(AccountMeta {
                pubkey: *pubkey,
                is_signer: self.is_signer(index),
                is_writable: self.is_writable(index),
            }));
        }
        (index < self.num_addressable_keys()).then(|| AccountRef::Lookup {
            index,
            is_writable: self.is_writable(index),
        })
    }

    /// Roles for every addressable account. `tables` is ignored for legacy messages.
    pub fn account_metas(&self, tables: &[AddressLookupTableAccount]) -> Result<Vec<AccountMeta>> {
        match self {
            VersionedMessage::Legacy(m) => Ok(m.account_metas()),
            VersionedMessage::V0(m) => m.account_metas(tables),
        }
    }

    pub fn decompile(
        &self,
        tables: &[AddressLookupTableAccount],
    ) -> Result<Vec<TransactionInstruction>> {
        match self {
            VersionedMessage::Legacy(m) => m.decompile(),
            VersionedMessage::V0(m) => m.decompile(tables),
        }
    }

    pub fn serialize(&self) -> Vec<u8> {
        match self {
            VersionedMessage::Legacy(m) => m.serialize(),
            VersionedMessage::V0(m) => m.serialize(),
        }
    }

    /// Decode a message of either format occupying all of `bytes`.
    ///
    /// A first byte with the high bit clear is a legacy header; `0x80` starts a
    /// V0 message; any other versioned prefix is rejected.
    pub fn deserialize(bytes: &[u8]) -> Result<Self> {
        let mut reader = ByteReader::new(bytes);
        let message = Self::read(&mut reader)?;
        super::ensure_consumed(&reader, "message")?;
        Ok(message)
    }

    pub(crate) fn read(reader: &mut ByteReader<'_>) -> Result<Self> {
        let prefix = reader
            .peek_u8()
            .ok_or_else(|| TxError::decode("message: unexpected end of input"))?;
        if prefix & MESSAGE_VERSION_PREFIX == 0 {
            return LegacyMessage::read(reader).map(VersionedMessage::Legacy);
        }
        match prefix & !MESSAGE_VERSION_PREFIX {
            0 => V0Message::read(reader).map(VersionedMessage::V0),
            version => Err(TxError::UnsupportedVersion(version)),
        }
    }
}

impl From<LegacyMessage> for VersionedMessage {
    fn from(message: LegacyMessage) -> Self {
        VersionedMessage::Legacy(message)
    }
}

impl From<V0Message> for VersionedMessage {
    fn from(message: V0Message) -> Self {
        VersionedMessage::V0(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(n: u8) -> Pubkey {
        Pubkey::new_from_array([n; 32])
    }

    fn instructions() -> Vec<TransactionInstruction> {
        vec![TransactionInstruction::new(
            key(10),
            vec![AccountMeta::new(key(1), true), AccountMeta::new(key(2), false)],
            vec![],
        )]
    }

    #[test]
    fn test_deserialize_dispatches_on_prefix() {
        let legacy = LegacyMessage::compile(&key(1), Hash::default(), &instructions()).unwrap();
        let v0 = V0Message::compile(&key(1), Hash::default(), &instructions(), &[]).unwrap();

        let decoded = VersionedMessage::deserialize(&legacy.serialize()).unwrap();
        assert_eq!(decoded.version(), TxVersion::Legacy);
        assert_eq!(decoded, VersionedMessage::Legacy(legacy));

        let decoded = VersionedMessage::deserialize(&v0.serialize()).unwrap();
        assert_eq!(decoded.version(), TxVersion::V0);
        assert_eq!(decoded, VersionedMessage::V0(v0));
    }

    #[test]
    fn test_unsupported_versions() {
        let mut bytes = V0Message::compile(&key(1), Hash::default(), &instructions(), &[])
            .unwrap()
            .serialize();
        for (prefix, version) in [(0x81, 1), (0xff, 0x7f)] {
            bytes[0] = prefix;
            assert_eq!(
                VersionedMessage::deserialize(&bytes),
                Err(TxError::UnsupportedVersion(version))
            );
        }
        assert!(VersionedMessage::deserialize(&[]).is_err());
    }

    #[test]
    fn test_accessors_agree_across_formats() {
        let legacy: VersionedMessage = LegacyMessage::compile(&key(1), Hash::default(), &instructions())
            .unwrap()
            .into();
        let v0: VersionedMessage = V0Message::compile(&key(1), Hash::default(), &instructions(), &[])
            .unwrap()
            .into();

        assert_eq!(legacy.static_account_keys(), v0.static_account_keys());
        assert_eq!(legacy.signer_keys(), &[key(1)]);
        assert_eq!(v0.signer_keys(), &[key(1)]);
        assert_eq!(legacy.fee_payer(), Some(&key(1)));
        assert!(legacy.address_table_lookups().is_empty());
        assert_eq!(legacy.decompile(&[]).unwrap(), v0.decompile(&[]).unwrap());
    }

    #[test]
    fn test_account_ref_without_tables() {
        let table = AddressLookupTableAccount::new(key(100), vec![key(2)]);
        let ixs = vec![TransactionInstruction::new(
            key(10),
            vec![
                AccountMeta::new(key(1), true),
                AccountMeta::new(key(2), false),
                AccountMeta::new_readonly(key(3), false),
            ],
            vec![],
        )];
        let message: VersionedMessage =
            V0Message::compile(&key(1), Hash::default(), &ixs, &[table])
                .unwrap()
                .into();

        // static: payer, 3, program 10; loaded: 2
        assert_eq!(message.static_account_keys(), &[key(1), key(3), key(10)]);
        assert_eq!(message.num_addressable_keys(), 4);
        assert_eq!(
            message.account_ref(0),
            Some(AccountRef::Static(AccountMeta::new(key(1), true)))
        );
        assert_eq!(
            message.account_ref(1),
            Some(AccountRef::Static(AccountMeta::new_readonly(key(3), false)))
        );
        assert_eq!(
            message.account_ref(3),
            Some(AccountRef::Lookup {
                index: 3,
                is_writable: true,
            })
        );
        assert_eq!(message.account_ref(4), None);
        assert_eq!(message.instructions()[0].accounts, vec![0, 3, 1]);
    }
}
