//! Address lookup tables, as supplied by callers and as referenced on the wire.

use crate::compact::{write_length, ByteReader};
use crate::error::{Result, TxError};
use crate::pubkey::Pubkey;

/// An already-fetched on-chain lookup table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressLookupTableAccount {
    pub key: Pubkey,
    pub addresses: Vec<Pubkey>,
}

impl AddressLookupTableAccount {
    pub fn new(key: Pubkey, addresses: Vec<Pubkey>) -> Self {
        AddressLookupTableAccount { key, addresses }
    }
}

/// Reference into one lookup table: `[table key][len + writable][len + readonly]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageAddressTableLookup {
    pub account_key: Pubkey,
    pub writable_indexes: Vec<u8>,
    pub readonly_indexes: Vec<u8>,
}

impl MessageAddressTableLookup {
    pub(crate) fn write(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self.account_key.as_ref());
        write_length(out, self.writable_indexes.len());
        out.extend_from_slice(&self.writable_indexes);
        write_length(out, self.readonly_indexes.len());
        out.extend_from_slice(&self.readonly_indexes);
    }

    pub(crate) fn read(reader: &mut ByteReader<'_>) -> Result<Self> {
        let account_key = Pubkey::new_from_array(reader.read_array("lookup table key")?);
        let len = reader.read_length()?;
        let writable_indexes = reader.read_bytes(len, "writable lookup indexes")?.to_vec();
        let len = reader.read_length()?;
        let readonly_indexes = reader.read_bytes(len, "readonly lookup indexes")?.to_vec();
        Ok(MessageAddressTableLookup {
            account_key,
            writable_indexes,
            readonly_indexes,
        })
    }

    pub fn num_accounts(&self) -> usize {
        self.writable_indexes.len() + self.readonly_indexes.len()
    }
}

/// Addresses a V0 message pulls in through its lookups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedAddresses {
    pub writable: Vec<Pubkey>,
    pub readonly: Vec<Pubkey>,
}

impl LoadedAddresses {
    /// Resolve every lookup against `tables`.
    ///
    /// All writable addresses come first (in lookup order), then all read-only
    /// ones, matching the index space instructions compile against.
    pub fn resolve(
        lookups: &[MessageAddressTableLookup],
        tables: &[AddressLookupTableAccount],
    ) -> Result<Self> {
        let mut loaded = LoadedAddresses::default();
        for lookup in lookups {
            let table = tables
                .iter()
                .find(|table| table.key == lookup.account_key)
                .ok_or(TxError::MissingLookupTable(lookup.account_key))?;

            let fetch = |index: &u8| {
                table.addresses.get(*index as usize).copied().ok_or_else(|| {
                    TxError::decode(format!(
                        "lookup index {} out of range for table {} ({} addresses)",
                        index,
                        table.key,
                        table.addresses.len()
                    ))
                })
            };
            for index in &lookup.writable_indexes {
                loaded.writable.push(fetch(index)?);
            }
            for index in &lookup.readonly_indexes {
                loaded.readonly.push(fetch(index)?);
            }
        }
        Ok(loaded)
    }

    pub fn len(&self) -> usize {
        self.writable.len() + self.readonly.len()
    }

    pub fn is_empty(&self) -> bool {
        self.writable.is_empty() && self.readonly.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(n: u8) -> Pubkey {
        Pubkey::new_from_array([n; 32])
    }

    #[test]
    fn test_lookup_layout() {
        let lookup = MessageAddressTableLookup {
            account_key: key(7),
            writable_indexes: vec![3],
            readonly_indexes: vec![0, 1],
        };
        let mut out = Vec::new();
        lookup.write(&mut out);

        assert_eq!(out.len(), 32 + 1 + 1 + 1 + 2);
        assert_eq!(&out[32..], &[1, 3, 2, 0, 1]);
        let mut reader = ByteReader::new(&out);
        assert_eq!(MessageAddressTableLookup::read(&mut reader).unwrap(), lookup);
    }

    #[test]
    fn test_resolve_groups_writable_before_readonly() {
        let tables = [
            AddressLookupTableAccount::new(key(100), vec![key(1), key(2)]),
            AddressLookupTableAccount::new(key(101), vec![key(3), key(4)]),
        ];
        let lookups = [
            MessageAddressTableLookup {
                account_key: key(100),
                writable_indexes: vec![1],
                readonly_indexes: vec![0],
            },
            MessageAddressTableLookup {
                account_key: key(101),
                writable_indexes: vec![0],
                readonly_indexes: vec![1],
            },
        ];
        let loaded = LoadedAddresses::resolve(&lookups, &tables).unwrap();
        assert_eq!(loaded.writable, vec![key(2), key(3)]);
        assert_eq!(loaded.readonly, vec![key(1), key(4)]);
    }

    #[test]
    fn test_resolve_missing_table() {
        let lookups = [MessageAddressTableLookup {
            account_key: key(100),
            writable_indexes: vec![0],
            readonly_indexes: vec![],
        }];
        assert_eq!(
            LoadedAddresses::resolve(&lookups, &[]),
            Err(TxError::MissingLookupTable(key(100)))
        );
    }

    #[test]
    fn test_resolve_index_out_of_range() {
        let tables = [AddressLookupTableAccount::new(key(100), vec![key(1)])];
        let lookups = [MessageAddressTableLookup {
            account_key: key(100),
            writable_indexes: vec![],
            readonly_indexes: vec![1],
        }];
        assert!(matches!(
            LoadedAddresses::resolve(&lookups, &tables),
            Err(TxError::Decode(_))
        ));
    }
}
