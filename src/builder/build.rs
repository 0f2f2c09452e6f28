//! Transaction building implementation.
//!
//! Intents are turned into crate instructions, compiled with the crate's own
//! message compiler, and serialized with a placeholder in every signature slot.

use super::types::{
    AccountMetaIntent, AddressLookupTable, Instruction as IntentInstruction, Nonce,
    TransactionIntent,
};
use crate::account::AccountMeta;
use crate::error::{Result, TxError};
use crate::instruction::TransactionInstruction;
use crate::message::{AddressLookupTableAccount, Message};
use crate::programs::{compute_budget, memo, system};
use crate::pubkey::{Pubkey, PubkeyExt};
use crate::transaction::SignedTransaction;
use base64::prelude::*;

fn parse_pubkey(field: &str, value: &str) -> Result<Pubkey> {
    Pubkey::from_base58(value)
        .map_err(|_| TxError::InvalidIntent(format!("invalid {}: {}", field, value)))
}

fn parse_lamports(field: &str, value: &str) -> Result<u64> {
    value
        .parse()
        .map_err(|_| TxError::InvalidIntent(format!("invalid {}: {}", field, value)))
}

/// Build a transaction from an intent.
///
/// Returns the serialized unsigned transaction (wire format) with a zeroed
/// placeholder for every required signature. A V0 message is produced when
/// the intent carries lookup tables, a legacy message otherwise.
pub fn build_transaction(intent: TransactionIntent) -> Result<Vec<u8>> {
    let fee_payer = parse_pubkey("feePayer", &intent.fee_payer)?;

    let mut message = Message::new();
    message.set_fee_payer(fee_payer);

    let blockhash = match &intent.nonce {
        Nonce::Blockhash { value } => value,
        Nonce::Durable {
            address,
            authority,
            value,
        } => {
            let nonce = parse_pubkey("nonce.address", address)?;
            let authority = parse_pubkey("nonce.authority", authority)?;
            message.add_instruction(system::advance_nonce_account(&nonce, &authority)?);
            value
        }
    };
    message.set_recent_blockhash_str(blockhash)?;

    for ix in intent.instructions {
        message.add_instructions(build_instruction(ix)?);
    }

    for table in intent.address_lookup_tables.into_iter().flatten() {
        message.add_lookup_table(convert_lookup_table(&table)?);
    }

    let compiled = message.compile()?;
    tracing::debug!(
        %fee_payer,
        version = ?compiled.version(),
        instructions = message.instructions().len(),
        "built transaction from intent"
    );
    SignedTransaction::from_message(compiled).serialize(true)
}

pub(crate) fn convert_lookup_table(table: &AddressLookupTable) -> Result<AddressLookupTableAccount> {
    let key = parse_pubkey("addressLookupTables.accountKey", &table.account_key)?;
    let addresses = table
        .addresses
        .iter()
        .map(|address| parse_pubkey("addressLookupTables.addresses", address))
        .collect::<Result<Vec<_>>>()?;
    Ok(AddressLookupTableAccount::new(key, addresses))
}

fn convert_account_meta(meta: &AccountMetaIntent) -> Result<AccountMeta> {
    Ok(AccountMeta {
        pubkey: parse_pubkey("custom.accounts.pubkey", &meta.pubkey)?,
        is_signer: meta.is_signer,
        is_writable: meta.is_writable,
    })
}

/// Build the instructions for one intent entry. Most entries map to exactly
/// one instruction; `computeBudget` may produce two.
fn build_instruction(ix: IntentInstruction) -> Result<Vec<TransactionInstruction>> {
    let instruction = match ix {
        // ===== System Program =====
        IntentInstruction::Transfer { from, to, lamports } => system::transfer(
            &parse_pubkey("transfer.from", &from)?,
            &parse_pubkey("transfer.to", &to)?,
            parse_lamports("transfer.lamports", &lamports)?,
        )?,

        IntentInstruction::CreateAccount {
            from,
            new_account,
            lamports,
            space,
            owner,
        } => system::create_account(
            &parse_pubkey("createAccount.from", &from)?,
            &parse_pubkey("createAccount.newAccount", &new_account)?,
            parse_lamports("createAccount.lamports", &lamports)?,
            space,
            &parse_pubkey("createAccount.owner", &owner)?,
        )?,

        IntentInstruction::NonceAdvance { nonce, authority } => system::advance_nonce_account(
            &parse_pubkey("nonceAdvance.nonce", &nonce)?,
            &parse_pubkey("nonceAdvance.authority", &authority)?,
        )?,

        IntentInstruction::NonceInitialize { nonce, authority } => {
            system::initialize_nonce_account(
                &parse_pubkey("nonceInitialize.nonce", &nonce)?,
                &parse_pubkey("nonceInitialize.authority", &authority)?,
            )?
        }

        IntentInstruction::Allocate { account, space } => {
            system::allocate(&parse_pubkey("allocate.account", &account)?, space)?
        }

        IntentInstruction::Assign { account, owner } => system::assign(
            &parse_pubkey("assign.account", &account)?,
            &parse_pubkey("assign.owner", &owner)?,
        )?,

        // ===== Memo Program =====
        IntentInstruction::Memo { message, signers } => {
            let signers = signers
                .iter()
                .map(|s| parse_pubkey("memo.signers", s))
                .collect::<Result<Vec<_>>>()?;
            memo::memo(&message, &signers)
        }

        // ===== Compute Budget Program =====
        IntentInstruction::ComputeBudget {
            unit_limit,
            unit_price,
        } => {
            if unit_limit.is_none() && unit_price.is_none() {
                return Err(TxError::InvalidIntent(
                    "computeBudget requires unitLimit or unitPrice".to_string(),
                ));
            }
            let mut instructions = Vec::with_capacity(2);
            if let Some(units) = unit_limit {
                instructions.push(compute_budget::set_compute_unit_limit(units)?);
            }
            if let Some(price) = unit_price {
                instructions.push(compute_budget::set_compute_unit_price(price)?);
            }
            return Ok(instructions);
        }

        // ===== Other programs =====
        IntentInstruction::Custom {
            program_id,
            accounts,
            data,
        } => {
            let program_id = parse_pubkey("custom.programId", &program_id)?;
            let accounts = accounts
                .iter()
                .map(convert_account_meta)
                .collect::<Result<Vec<_>>>()?;
            let data = BASE64_STANDARD
                .decode(&data)
                .map_err(|_| TxError::InvalidIntent(format!("invalid custom.data: {}", data)))?;
            TransactionInstruction::new(program_id, accounts, data)
        }
    };
    Ok(vec![instruction])
}
