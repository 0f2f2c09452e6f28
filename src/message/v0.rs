//! Version 0 messages and address lookup table compilation.
//!
//! Accounts that are neither signers nor invoked programs may be moved out of
//! the static key list when a supplied lookup table holds them; instructions then
//! index into the combined list
//! `[static keys][writable lookups by table][read-only lookups by table]`.

use super::legacy::decompile_with;
use super::lookup::{AddressLookupTableAccount, LoadedAddresses, MessageAddressTableLookup};
use super::{
    check_instruction_indexes, compile_instructions, ensure_consumed, read_blockhash,
    read_instructions, read_keys, write_instructions, write_keys, Hash, MessageHeader,
    MESSAGE_VERSION_PREFIX,
};
use crate::account::{AccountKeysList, AccountMeta};
use crate::compact::{write_length, ByteReader};
use crate::error::{Result, TxError};
use crate::instruction::{CompiledInstruction, TransactionInstruction};
use crate::pubkey::Pubkey;
use std::collections::{HashMap, HashSet};

/// A compiled V0 message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct V0Message {
    pub header: MessageHeader,
    /// Keys embedded in the message. Header counts describe only these.
    pub account_keys: Vec<Pubkey>,
    pub recent_blockhash: Hash,
    pub instructions: Vec<CompiledInstruction>,
    pub address_table_lookups: Vec<MessageAddressTableLookup>,
}

/// Accounts one table contributes, in compiled account order.
#[derive(Default)]
struct TableSelection {
    writable: Vec<(Pubkey, u8)>,
    readonly: Vec<(Pubkey, u8)>,
}

impl V0Message {
    /// Compile `instructions`, moving eligible accounts into `tables`.
    ///
    /// An address held by several tables is taken from the first one supplied.
    /// Only tables that end up contributing an account are referenced.
    pub fn compile(
        fee_payer: &Pubkey,
        recent_blockhash: Hash,
        instructions: &[TransactionInstruction],
        tables: &[AddressLookupTableAccount],
    ) -> Result<Self> {
        if instructions.is_empty() {
            return Err(TxError::NoInstructions);
        }
        let accounts = AccountKeysList::from_instructions(instructions).compile(Some(fee_payer));
        let program_ids: HashSet<Pubkey> = instructions.iter().map(|ix| ix.program_id).collect();

        let mut table_index: HashMap<Pubkey, (usize, usize)> = HashMap::new();
        for (t, table) in tables.iter().enumerate() {
            for (i, address) in table.addresses.iter().enumerate() {
                table_index.entry(*address).or_insert((t, i));
            }
        }

        let mut static_accounts: Vec<AccountMeta> = Vec::with_capacity(accounts.len());
        let mut selections: Vec<TableSelection> =
            tables.iter().map(|_| TableSelection::default()).collect();
        for meta in accounts {
            let lookup = if meta.is_signer || program_ids.contains(&meta.pubkey) {
                None
            } else {
                table_index.get(&meta.pubkey).copied()
            };
            let Some((t, i)) = lookup else {
                tracing::trace!(pubkey = %meta.pubkey, "static account");
                static_accounts.push(meta);
                continue;
            };
            let index = u8::try_from(i).map_err(|_| TxError::LookupIndexOverflow)?;
            tracing::trace!(
                pubkey = %meta.pubkey,
                table = %tables[t].key,
                index,
                writable = meta.is_writable,
                "lookup account"
            );
            if meta.is_writable {
                selections[t].writable.push((meta.pubkey, index));
            } else {
                selections[t].readonly.push((meta.pubkey, index));
            }
        }

        let header = MessageHeader::from_accounts(&static_accounts)?;
        let account_keys: Vec<Pubkey> = static_accounts.iter().map(|meta| meta.pubkey).collect();

        let mut address_table_lookups = Vec::new();
        let mut loaded = LoadedAddresses::default();
        for (table, selection) in tables.iter().zip(&selections) {
            if selection.writable.is_empty() && selection.readonly.is_empty() {
                continue;
            }
            address_table_lookups.push(MessageAddressTableLookup {
                account_key: table.key,
                writable_indexes: selection.writable.iter().map(|(_, i)| *i).collect(),
                readonly_indexes: selection.readonly.iter().map(|(_, i)| *i).collect(),
            });
            loaded.writable.extend(selection.writable.iter().map(|(key, _)| *key));
            loaded.readonly.extend(selection.readonly.iter().map(|(key, _)| *key));
        }

        let full_keys: Vec<Pubkey> = account_keys
            .iter()
            .chain(&loaded.writable)
            .chain(&loaded.readonly)
            .copied()
            .collect();
        let instructions = compile_instructions(instructions, &full_keys)?;

        tracing::debug!(
            %fee_payer,
            num_static = account_keys.len(),
            num_lookup_writable = loaded.writable.len(),
            num_lookup_readonly = loaded.readonly.len(),
            num_tables = address_table_lookups.len(),
            "compiled v0 message"
        );
        Ok(V0Message {
            header,
            account_keys,
            recent_blockhash,
            instructions,
            address_table_lookups,
        })
    }

    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(
            1 + MessageHeader::LEN + 1 + self.account_keys.len() * 32 + 32 + 2,
        );
        out.push(MESSAGE_VERSION_PREFIX);
        self.header.write(&mut out);
        write_keys(&mut out, &self.account_keys);
        out.extend_from_slice(self.recent_blockhash.as_ref());
        write_instructions(&mut out, &self.instructions);
        write_length(&mut out, self.address_table_lookups.len());
        for lookup in &self.address_table_lookups {
            lookup.write(&mut out);
        }
        out
    }

    /// Decode a V0 message, including its `0x80` prefix, occupying all of `bytes`.
    pub fn deserialize(bytes: &[u8]) -> Result<Self> {
        let mut reader = ByteReader::new(bytes);
        let message = Self::read(&mut reader)?;
        ensure_consumed(&reader, "v0 message")?;
        Ok(message)
    }

    pub(crate) fn read(reader: &mut ByteReader<'_>) -> Result<Self> {
        match reader.read_u8("message version")? {
            MESSAGE_VERSION_PREFIX => {}
            prefix if prefix & MESSAGE_VERSION_PREFIX != 0 => {
                return Err(TxError::UnsupportedVersion(prefix & !MESSAGE_VERSION_PREFIX));
            }
            prefix => {
                return Err(TxError::decode(format!(
                    "v0 message: missing version prefix, found {:#04x}",
                    prefix
                )));
            }
        }
        let header = MessageHeader::read(reader)?;
        let account_keys = read_keys(reader)?;
        header.check(account_keys.len())?;
        let recent_blockhash = read_blockhash(reader)?;
        let instructions = read_instructions(reader)?;

        let num_lookups = reader.read_length()?;
        // A lookup is at least 34 bytes.
        if num_lookups > reader.remaining().len() / 34 {
            return Err(TxError::decode(format!(
                "address table lookups: {} lookups do not fit in {} bytes",
                num_lookups,
                reader.remaining().len()
            )));
        }
        let address_table_lookups = (0..num_lookups)
            .map(|_| MessageAddressTableLookup::read(reader))
            .collect::<Result<Vec<_>>>()?;

        let message = V0Message {
            header,
            account_keys,
            recent_blockhash,
            instructions,
            address_table_lookups,
        };
        check_instruction_indexes(&message.instructions, message.num_addressable_keys())?;
        Ok(message)
    }

    pub fn fee_payer(&self) -> Option<&Pubkey> {
        self.account_keys.first()
    }

    /// The keys whose signatures the message requires, in slot order.
    pub fn signer_keys(&self) -> &[Pubkey] {
        let n = (self.header.num_required_signatures as usize).min(self.account_keys.len());
        &self.account_keys[..n]
    }

    fn num_lookup_writable(&self) -> usize {
        self.address_table_lookups
            .iter()
            .map(|lookup| lookup.writable_indexes.len())
            .sum()
    }

    /// Static keys plus every address pulled in through lookups.
    pub fn num_addressable_keys(&self) -> usize {
        self.account_keys.len()
            + self
                .address_table_lookups
                .iter()
                .map(MessageAddressTableLookup::num_accounts)
                .sum::<usize>()
    }

    /// Whether the account at `index` of the combined list signs. Lookup
    /// accounts never do.
    pub fn is_signer(&self, index: usize) -> bool {
        index < self.account_keys.len() && self.header.is_signer(index)
    }

    /// Writability of the account at `index` of the combined list.
    pub fn is_writable(&self, index: usize) -> bool {
        let num_static = self.account_keys.len();
        if index < num_static {
            self.header.is_writable(index, num_static)
        } else {
            index < num_static + self.num_lookup_writable()
        }
    }

    /// Roles for the combined account list, resolving lookups against `tables`.
    pub fn account_metas(&self, tables: &[AddressLookupTableAccount]) -> Result<Vec<AccountMeta>> {
        let loaded = LoadedAddresses::resolve(&self.address_table_lookups, tables)?;
        Ok(self
            .account_keys
            .iter()
            .chain(&loaded.writable)
            .chain(&loaded.readonly)
            .enumerate()
            .map(|(i, pubkey)| AccountMeta {
                pubkey: *pubkey,
                is_signer: self.is_signer(i),
                is_writable: self.is_writable(i),
            })
            .collect())
    }

    /// Expand index-form instructions back to key form.
    ///
    /// Every table the message references must be present in `tables`.
    pub fn decompile(
        &self,
        tables: &[AddressLookupTableAccount],
    ) -> Result<Vec<TransactionInstruction>> {
        decompile_with(&self.account_metas(tables)?, &self.instructions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::LegacyMessage;

    fn key(n: u8) -> Pubkey {
        Pubkey::new_from_array([n; 32])
    }

    const PAYER: u8 = 1;
    const PROGRAM: u8 = 10;
    const TABLE_A: u8 = 100;
    const TABLE_B: u8 = 101;

    /// payer signs; 2 writable, 3 read-only, 4 read-only co-signer.
    fn instructions() -> Vec<TransactionInstruction> {
        vec![TransactionInstruction::new(
            key(PROGRAM),
            vec![
                AccountMeta::new(key(PAYER), true),
                AccountMeta::new(key(2), false),
                AccountMeta::new_readonly(key(3), false),
                AccountMeta::new_readonly(key(4), true),
            ],
            vec![5],
        )]
    }

    #[test]
    fn test_partition_and_index_space() {
        let tables = [
            AddressLookupTableAccount::new(key(TABLE_A), vec![key(9), key(3), key(4)]),
            AddressLookupTableAccount::new(key(TABLE_B), vec![key(2), key(3)]),
        ];
        let message =
            V0Message::compile(&key(PAYER), Hash::default(), &instructions(), &tables).unwrap();

        // Signer 4 stays static even though table A holds it.
        assert_eq!(
            message.account_keys,
            vec![key(PAYER), key(4), key(PROGRAM)]
        );
        assert_eq!(
            message.header,
            MessageHeader {
                num_required_signatures: 2,
                num_readonly_signed_accounts: 1,
                num_readonly_unsigned_accounts: 1,
            }
        );
        // 3 comes from table A (first supplied), 2 from table B.
        assert_eq!(
            message.address_table_lookups,
            vec![
                MessageAddressTableLookup {
                    account_key: key(TABLE_A),
                    writable_indexes: vec![],
                    readonly_indexes: vec![1],
                },
                MessageAddressTableLookup {
                    account_key: key(TABLE_B),
                    writable_indexes: vec![0],
                    readonly_indexes: vec![],
                },
            ]
        );
        // Combined list: [payer, 4, program, 2 (writable), 3 (read-only)].
        assert_eq!(message.instructions[0].program_id_index, 2);
        assert_eq!(message.instructions[0].accounts, vec![0, 3, 4, 1]);
        assert!(message.is_writable(3));
        assert!(!message.is_writable(4));
        assert!(!message.is_signer(3));
    }

    #[test]
    fn test_program_ids_stay_static() {
        let tables = [AddressLookupTableAccount::new(
            key(TABLE_A),
            vec![key(PROGRAM), key(PAYER)],
        )];
        let message =
            V0Message::compile(&key(PAYER), Hash::default(), &instructions(), &tables).unwrap();

        assert!(message.account_keys.contains(&key(PROGRAM)));
        assert!(message.account_keys.contains(&key(PAYER)));
        assert!(message.address_table_lookups.is_empty());
    }

    #[test]
    fn test_unused_tables_are_not_referenced() {
        let tables = [
            AddressLookupTableAccount::new(key(TABLE_A), vec![key(50)]),
            AddressLookupTableAccount::new(key(TABLE_B), vec![key(3)]),
        ];
        let message =
            V0Message::compile(&key(PAYER), Hash::default(), &instructions(), &tables).unwrap();
        assert_eq!(message.address_table_lookups.len(), 1);
        assert_eq!(message.address_table_lookups[0].account_key, key(TABLE_B));
    }

    #[test]
    fn test_header_counts_static_keys_only() {
        let no_tables =
            V0Message::compile(&key(PAYER), Hash::default(), &instructions(), &[]).unwrap();
        let tables = [AddressLookupTableAccount::new(
            key(TABLE_A),
            vec![key(2), key(3)],
        )];
        let with_tables =
            V0Message::compile(&key(PAYER), Hash::default(), &instructions(), &tables).unwrap();

        assert_eq!(no_tables.header.num_required_signatures, 2);
        assert_eq!(no_tables.header.num_readonly_unsigned_accounts, 2);
        assert_eq!(with_tables.header.num_required_signatures, 2);
        assert_eq!(with_tables.header.num_readonly_unsigned_accounts, 1);
        assert_eq!(with_tables.account_keys.len(), 3);
    }

    #[test]
    fn test_lookup_index_overflow() {
        let mut addresses: Vec<Pubkey> = (0..=255u8)
            .map(|n| {
                let mut bytes = [0xeeu8; 32];
                bytes[0] = n;
                Pubkey::new_from_array(bytes)
            })
            .collect();
        addresses.push(key(3));
        let tables = [AddressLookupTableAccount::new(key(TABLE_A), addresses)];
        assert_eq!(
            V0Message::compile(&key(PAYER), Hash::default(), &instructions(), &tables),
            Err(TxError::LookupIndexOverflow)
        );
    }

    #[test]
    fn test_compile_requires_instructions() {
        let tables = [AddressLookupTableAccount::new(key(TABLE_A), vec![key(2)])];
        assert_eq!(
            V0Message::compile(&key(PAYER), Hash::default(), &[], &tables),
            Err(TxError::NoInstructions)
        );
    }

    #[test]
    fn test_serialize_deserialize_decompile() {
        let tables = [AddressLookupTableAccount::new(
            key(TABLE_A),
            vec![key(2), key(3)],
        )];
        let message =
            V0Message::compile(&key(PAYER), Hash::default(), &instructions(), &tables).unwrap();
        let bytes = message.serialize();
        assert_eq!(bytes[0], 0x80);

        let decoded = V0Message::deserialize(&bytes).unwrap();
        assert_eq!(decoded, message);
        assert_eq!(decoded.decompile(&tables).unwrap(), instructions());
        assert_eq!(
            decoded.decompile(&[]),
            Err(TxError::MissingLookupTable(key(TABLE_A)))
        );
    }

    #[test]
    fn test_deserialize_version_bytes() {
        let message =
            V0Message::compile(&key(PAYER), Hash::default(), &instructions(), &[]).unwrap();
        let mut bytes = message.serialize();

        bytes[0] = 0x81;
        assert_eq!(
            V0Message::deserialize(&bytes),
            Err(TxError::UnsupportedVersion(1))
        );

        let legacy = LegacyMessage::compile(&key(PAYER), Hash::default(), &instructions())
            .unwrap()
            .serialize();
        assert!(matches!(
            V0Message::deserialize(&legacy),
            Err(TxError::Decode(_))
        ));
    }

    #[test]
    fn test_body_matches_legacy_without_tables() {
        let v0 = V0Message::compile(&key(PAYER), Hash::default(), &instructions(), &[])
            .unwrap()
            .serialize();
        let legacy = LegacyMessage::compile(&key(PAYER), Hash::default(), &instructions())
            .unwrap()
            .serialize();
        // Prefix, same body, then an empty lookup list.
        assert_eq!(&v0[1..v0.len() - 1], &legacy[..]);
        assert_eq!(v0[v0.len() - 1], 0);
    }

    #[test]
    fn test_matches_reference_compilation() {
        use solana_message::v0::Message as SdkV0;
        use solana_message::{AddressLookupTableAccount as SdkTable, VersionedMessage as SdkVersioned};
        use solana_sdk::instruction::{AccountMeta as SdkMeta, Instruction};
        use solana_sdk::pubkey::Pubkey as SdkPubkey;

        let sdk_key = |pk: &Pubkey| SdkPubkey::new_from_array(pk.to_bytes());
        let ixs = instructions();
        let tables = [
            AddressLookupTableAccount::new(key(TABLE_A), vec![key(3)]),
            AddressLookupTableAccount::new(key(TABLE_B), vec![key(2)]),
        ];

        let sdk_ixs: Vec<Instruction> = ixs
            .iter()
            .map(|ix| Instruction {
                program_id: sdk_key(&ix.program_id),
                accounts: ix
                    .keys
                    .iter()
                    .map(|m| SdkMeta {
                        pubkey: sdk_key(&m.pubkey),
                        is_signer: m.is_signer,
                        is_writable: m.is_writable,
                    })
                    .collect(),
                data: ix.data.clone(),
            })
            .collect();
        let sdk_tables: Vec<SdkTable> = tables
            .iter()
            .map(|t| SdkTable {
                key: sdk_key(&t.key),
                addresses: t.addresses.iter().map(sdk_key).collect(),
            })
            .collect();
        let reference = SdkV0::try_compile(
            &sdk_key(&key(PAYER)),
            &sdk_ixs,
            &sdk_tables,
            Hash::new_from_array([3; 32]),
        )
        .unwrap();

        let ours = V0Message::compile(
            &key(PAYER),
            Hash::new_from_array([3; 32]),
            &ixs,
            &tables,
        )
        .unwrap();
        assert_eq!(ours.serialize(), SdkVersioned::V0(reference).serialize());
    }
}
