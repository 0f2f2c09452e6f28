//! High-level transaction parser.
//!
//! `parse_transaction` decodes wire bytes of either message version and turns
//! every instruction into a [`ParsedInstruction`]. Instructions the decoders
//! do not recognize come back in raw form; only a malformed transaction
//! envelope is an error.

use crate::account::AccountMeta;
use crate::error::{Result, TxError};
use crate::instructions::{decode_instruction, InstructionContext, ParsedInstruction};
use crate::js_obj;
use crate::message::{AddressLookupTableAccount, Hash, TxVersion};
use crate::pubkey::Pubkey;
use crate::transaction::SignedTransaction;
use crate::wasm::try_into_js_value::{JsConversionError, TryIntoJsValue};
use solana_signature::Signature;
use wasm_bindgen::JsValue;

/// A decoded transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTransaction {
    pub version: TxVersion,

    pub fee_payer: Pubkey,

    /// Number of required signatures.
    pub num_signatures: u8,

    /// The recent blockhash, or the nonce value for durable nonce transactions.
    pub nonce: Hash,

    /// Set when the first instruction advances a durable nonce.
    pub durable_nonce: Option<DurableNonce>,

    pub instructions_data: Vec<ParsedInstruction>,

    /// Every addressable account with its inferred roles: static keys first,
    /// then accounts loaded through lookup tables.
    pub account_keys: Vec<AccountMeta>,

    /// One entry per signer slot; `None` for placeholder slots.
    pub signatures: Vec<Option<Signature>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DurableNonce {
    pub wallet_nonce_address: Pubkey,
    pub auth_wallet_address: Pubkey,
}

impl TryIntoJsValue for DurableNonce {
    fn try_to_js_value(&self) -> std::result::Result<JsValue, JsConversionError> {
        js_obj!(
            "walletNonceAddress" => self.wallet_nonce_address,
            "authWalletAddress" => self.auth_wallet_address
        )
    }
}

impl TryIntoJsValue for ParsedTransaction {
    fn try_to_js_value(&self) -> std::result::Result<JsValue, JsConversionError> {
        js_obj!(
            "version" => self.version,
            "feePayer" => self.fee_payer,
            "numSignatures" => self.num_signatures,
            "nonce" => self.nonce,
            "durableNonce" => self.durable_nonce,
            "instructionsData" => self.instructions_data,
            "accountKeys" => self.account_keys,
            "signatures" => self.signatures
        )
    }
}

/// Parse a serialized transaction.
///
/// V0 messages resolve their lookups against `lookup_tables`; a table the
/// message references but the caller did not supply is an error. Legacy
/// messages ignore `lookup_tables`.
pub fn parse_transaction(
    bytes: &[u8],
    lookup_tables: &[AddressLookupTableAccount],
) -> Result<ParsedTransaction> {
    let tx = SignedTransaction::deserialize(bytes)?;
    let message = tx.message();
    let account_keys = message.account_metas(lookup_tables)?;

    let fee_payer = *message
        .fee_payer()
        .ok_or_else(|| TxError::decode("transaction has no account keys"))?;

    let mut instructions_data = Vec::with_capacity(message.instructions().len());
    let mut durable_nonce = None;

    for (idx, instruction) in message.instructions().iter().enumerate() {
        let program_id = account_keys
            .get(usize::from(instruction.program_id_index))
            .map(|meta| meta.pubkey)
            .ok_or_else(|| {
                TxError::decode(format!("instruction {idx}: program id index out of range"))
            })?;
        let accounts = instruction
            .accounts
            .iter()
            .map(|&i| {
                account_keys.get(usize::from(i)).copied().ok_or_else(|| {
                    TxError::decode(format!("instruction {idx}: account index {i} out of range"))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let parsed = decode_instruction(InstructionContext {
            program_id: &program_id,
            accounts: &accounts,
            data: &instruction.data,
        });

        if idx == 0 {
            if let ParsedInstruction::NonceAdvance(params) = &parsed {
                durable_nonce = Some(DurableNonce {
                    wallet_nonce_address: params.wallet_nonce_address,
                    auth_wallet_address: params.auth_wallet_address,
                });
            }
        }

        instructions_data.push(parsed);
    }

    tracing::debug!(
        %fee_payer,
        version = ?message.version(),
        instructions = instructions_data.len(),
        durable_nonce = durable_nonce.is_some(),
        "parsed transaction"
    );

    Ok(ParsedTransaction {
        version: message.version(),
        fee_payer,
        num_signatures: message.header().num_required_signatures,
        nonce: *message.recent_blockhash(),
        durable_nonce,
        instructions_data,
        account_keys,
        signatures: tx.signatures().to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instructions::{CreateAccountParams, NonceAdvanceParams, TransferParams};
    use crate::keypair::{Keypair, KeypairExt};
    use crate::message::Message;
    use crate::programs::{memo, system};
    use crate::pubkey::PubkeyExt;
    use crate::transaction::{Transaction, VersionedTransaction};
    use base64::prelude::*;

    // Simple SOL transfer from @solana/web3.js
    const TEST_TX_BASE64: &str = "AQAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAABAAEDFVMqpim7tqEi2XL8R6KKkP0DYJvY3eiRXLlL1P9EjYgXKQC+k0FKnqyC4AZGJR7OhJXfpPP3NHOhS8t/6G7bLAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA/1c7Oaj3RbyLIjU0/ZPpsmVfVUWAzc8g36fK5g6A0JoBAgIAAQwCAAAAoIYBAAAAAAA=";

    // Marinade staking activate: CreateAccount + StakeInitialize, two signatures
    const MARINADE_STAKING_ACTIVATE: &str = "AuRFS0r7hJ+/+WuDQbbwdjSgxfnKOWi94EnWEha9uaBPt8VZOXiOoSiSoES34VkyBNLlLqlfK0fP3d5eJR+srQvN04gqzpOZPTVzqiomyMXqwQ6FYoQg5nEkdiDVny8SsyhRnAeDMzexkKD+3rwSGP0E+XN/2crTL6PZRnip42YFAgADBUXlebz5JTz2i0ff8fs6OlwsIbrFsjwJrhKm4FVr8ItBYnsvugEnYfm5Gbz5TLtMncgFHZ8JMpkxTTlJIzJovekAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAah2BeRN1QqmDQ3vf4qerJVf1NcinhyK2ikncAAAAAABqfVFxksXFEhjMlMPUrxf1ja7gibof1E49vZigAAAADjMtr5L6vs6LY/96RABeX9/Zr6FYdWthxalfkEs7jQgQICAgABNAAAAADgkwQAAAAAAMgAAAAAAAAABqHYF5E3VCqYNDe9/ip6slV/U1yKeHIraKSdwAAAAAADAgEEdAAAAACx+Xl4mhxH0TxI2HovJxcQ63+TJglRFzFikL1sKdr12UXlebz5JTz2i0ff8fs6OlwsIbrFsjwJrhKm4FVr8ItBAAAAAAAAAAAAAAAAAAAAAEXlebz5JTz2i0ff8fs6OlwsIbrFsjwJrhKm4FVr8ItB";

    fn key(n: u8) -> Pubkey {
        Pubkey::new_from_array([n; 32])
    }

    fn address(s: &str) -> Pubkey {
        Pubkey::from_base58(s).unwrap()
    }

    #[test]
    fn test_parse_transfer_transaction() {
        let bytes = BASE64_STANDARD.decode(TEST_TX_BASE64).unwrap();
        let parsed = parse_transaction(&bytes, &[]).unwrap();

        assert_eq!(parsed.version, TxVersion::Legacy);
        assert_eq!(parsed.num_signatures, 1);
        assert_eq!(parsed.signatures, vec![None]);
        assert_eq!(parsed.durable_nonce, None);
        assert_eq!(parsed.account_keys.len(), 3);
        assert_eq!(parsed.account_keys[0], AccountMeta::new(parsed.fee_payer, true));
        assert_eq!(parsed.instructions_data.len(), 1);

        match &parsed.instructions_data[0] {
            ParsedInstruction::Transfer(params) => {
                assert_eq!(params.amount, 100000);
                assert_eq!(params.from_address, parsed.fee_payer);
                assert_eq!(params.to_address, parsed.account_keys[1].pubkey);
            }
            other => panic!("Expected Transfer instruction, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_invalid_bytes() {
        assert!(parse_transaction(&[0, 1, 2, 3], &[]).is_err());
        assert!(parse_transaction(&[], &[]).is_err());
    }

    #[test]
    fn test_parse_marinade_staking_activate() {
        let bytes = BASE64_STANDARD.decode(MARINADE_STAKING_ACTIVATE).unwrap();
        let parsed = parse_transaction(&bytes, &[]).unwrap();

        assert_eq!(parsed.num_signatures, 2);
        assert!(parsed.signatures.iter().all(Option::is_some));
        assert_eq!(parsed.instructions_data.len(), 2);

        let staker = address("5hr5fisPi6DXNuuRpm5XUbzpiEnmdyxXuBDTwzwZj5Pe");
        let stake_account = address("7dRuGFbU2y2kijP6o1LYNzVyz4yf13MooqoionCzv5Za");
        assert_eq!(parsed.fee_payer, staker);

        match &parsed.instructions_data[0] {
            ParsedInstruction::CreateAccount(params) => {
                assert_eq!(params.from_address, staker);
                assert_eq!(params.new_address, stake_account);
                assert_eq!(params.amount, 300000);
            }
            other => panic!("Expected CreateAccount instruction, got {:?}", other),
        }

        match &parsed.instructions_data[1] {
            ParsedInstruction::StakeInitialize(params) => {
                assert_eq!(params.staking_address, stake_account);
                assert_eq!(
                    params.staker,
                    address("CyjoLt3kjqB57K7ewCBHmnHq3UgEj3ak6A7m6EsBsuhA")
                );
                assert_eq!(params.withdrawer, staker);
            }
            other => panic!("Expected StakeInitialize instruction, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_durable_nonce_and_unknown() {
        let payer = key(1);
        let nonce_value = Hash::new_from_array([7; 32]);
        let mut tx = Transaction::new();
        tx.set_fee_payer(payer)
            .set_recent_blockhash(nonce_value)
            .add_instruction(system::advance_nonce_account(&key(2), &payer).unwrap())
            .add_instruction(crate::instruction::TransactionInstruction::new(
                key(50),
                vec![AccountMeta::new(key(3), false)],
                vec![9, 9],
            ));
        let bytes = tx.serialize_unsigned().unwrap();

        let parsed = parse_transaction(&bytes, &[]).unwrap();
        assert_eq!(parsed.nonce, nonce_value);
        assert_eq!(
            parsed.durable_nonce,
            Some(DurableNonce {
                wallet_nonce_address: key(2),
                auth_wallet_address: payer,
            })
        );
        assert_eq!(
            parsed.instructions_data[0],
            ParsedInstruction::NonceAdvance(NonceAdvanceParams {
                wallet_nonce_address: key(2),
                auth_wallet_address: payer,
            })
        );
        let ParsedInstruction::Unknown(unknown) = &parsed.instructions_data[1] else {
            panic!("expected Unknown");
        };
        assert_eq!(unknown.program_id, key(50));
        assert_eq!(unknown.accounts, vec![AccountMeta::new(key(3), false)]);
        assert_eq!(unknown.data, vec![9, 9]);
    }

    #[test]
    fn test_nonce_advance_after_first_is_not_durable() {
        let payer = key(1);
        let mut message = Message::new();
        message
            .set_fee_payer(payer)
            .set_recent_blockhash(Hash::new_from_array([7; 32]))
            .add_instruction(memo::memo("first", &[]))
            .add_instruction(system::advance_nonce_account(&key(2), &payer).unwrap());
        let bytes = Transaction::from_message(message).serialize_unsigned().unwrap();

        let parsed = parse_transaction(&bytes, &[]).unwrap();
        assert_eq!(parsed.durable_nonce, None);
        assert!(matches!(
            parsed.instructions_data[1],
            ParsedInstruction::NonceAdvance(_)
        ));
    }

    #[test]
    fn test_parse_v0_with_lookup_table() {
        let payer = Keypair::from_secret_key_bytes(&[3; 32]).unwrap();
        let table = AddressLookupTableAccount::new(key(200), vec![key(10), key(11)]);

        let mut tx = VersionedTransaction::new();
        tx.set_fee_payer(payer.public_key())
            .set_recent_blockhash(Hash::new_from_array([5; 32]))
            .add_instruction(system::transfer(&payer.public_key(), &key(10), 42).unwrap())
            .add_lookup_table(table.clone());
        let bytes = tx.serialize_unsigned().unwrap();

        let parsed = parse_transaction(&bytes, &[table]).unwrap();
        assert_eq!(parsed.version, TxVersion::V0);
        assert_eq!(
            parsed.instructions_data,
            vec![ParsedInstruction::Transfer(TransferParams {
                from_address: payer.public_key(),
                to_address: key(10),
                amount: 42,
            })]
        );
        // loaded writable account follows the static keys
        assert_eq!(
            parsed.account_keys.last(),
            Some(&AccountMeta::new(key(10), false))
        );

        assert!(matches!(
            parse_transaction(&bytes, &[]),
            Err(TxError::MissingLookupTable(k)) if k == key(200)
        ));
    }

    #[test]
    fn test_signed_slots_are_reported() {
        let payer = Keypair::from_secret_key_bytes(&[4; 32]).unwrap();
        let mut tx = Transaction::new();
        tx.set_recent_blockhash(Hash::new_from_array([1; 32]))
            .add_instruction(
                system::create_account(&payer.public_key(), &key(9), 10, 0, &key(8)).unwrap(),
            );
        let signed = tx.sign(&[&payer]).unwrap();
        let bytes = signed.serialize(true).unwrap();

        let parsed = parse_transaction(&bytes, &[]).unwrap();
        assert_eq!(parsed.signatures.len(), 2);
        assert_eq!(parsed.signatures[0], signed.signature(&payer.public_key()).copied());
        assert_eq!(parsed.signatures[1], None);
        assert!(matches!(
            &parsed.instructions_data[0],
            ParsedInstruction::CreateAccount(CreateAccountParams { amount: 10, .. })
        ));
    }
}
