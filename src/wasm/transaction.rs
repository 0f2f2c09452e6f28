//! WASM bindings for wire-format transactions.
//!
//! Wraps `SignedTransaction`, so JavaScript can inspect a transaction, add
//! signatures to it and serialize it again without recompiling the message.

use crate::error::TxError;
use crate::js_obj;
use crate::message::{AccountRef, TxVersion};
use crate::pubkey::{Pubkey, PubkeyExt};
use crate::transaction::SignedTransaction;
use crate::wasm::keypair::WasmKeypair;
use crate::wasm::parser::lookup_tables_from_js;
use crate::wasm::try_into_js_value::TryIntoJsValue;
use base64::prelude::*;
use solana_signer::Signer;
use wasm_bindgen::prelude::*;

/// WASM wrapper for a transaction of either message version.
#[wasm_bindgen]
pub struct WasmTransaction {
    inner: SignedTransaction,
}

#[wasm_bindgen]
impl WasmTransaction {
    /// Deserialize a transaction from raw bytes.
    #[wasm_bindgen]
    pub fn from_bytes(bytes: &[u8]) -> Result<WasmTransaction, TxError> {
        SignedTransaction::deserialize(bytes).map(|inner| WasmTransaction { inner })
    }

    /// Deserialize a transaction from a base64-encoded string.
    ///
    /// This is the format used by `@solana/web3.js` `Transaction.serialize()`.
    #[wasm_bindgen]
    pub fn from_base64(base64_str: &str) -> Result<WasmTransaction, TxError> {
        let bytes = BASE64_STANDARD
            .decode(base64_str)
            .map_err(|e| TxError::decode(format!("base64: {}", e)))?;
        Self::from_bytes(&bytes)
    }

    #[wasm_bindgen(getter)]
    pub fn is_versioned(&self) -> bool {
        self.inner.message().version() == TxVersion::V0
    }

    /// `"legacy"` or `"v0"`.
    #[wasm_bindgen(getter)]
    pub fn version(&self) -> String {
        match self.inner.message().version() {
            TxVersion::Legacy => "legacy".to_string(),
            TxVersion::V0 => "v0".to_string(),
        }
    }

    /// Fee payer address, or `undefined` for a message without keys.
    #[wasm_bindgen(getter)]
    pub fn fee_payer(&self) -> Option<String> {
        self.inner.message().fee_payer().map(|key| key.to_string())
    }

    #[wasm_bindgen(getter)]
    pub fn recent_blockhash(&self) -> String {
        self.inner.message().recent_blockhash().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn num_instructions(&self) -> usize {
        self.inner.message().instructions().len()
    }

    #[wasm_bindgen(getter)]
    pub fn num_signatures(&self) -> usize {
        self.inner.signer_keys().len()
    }

    /// The serialized message, i.e. the bytes each signer signs.
    #[wasm_bindgen]
    pub fn signable_payload(&self) -> js_sys::Uint8Array {
        js_sys::Uint8Array::from(self.inner.message_bytes())
    }

    /// Static account keys as base58 strings.
    #[wasm_bindgen]
    pub fn account_keys(&self) -> js_sys::Array {
        self.inner
            .message()
            .static_account_keys()
            .iter()
            .map(|key| JsValue::from_str(&key.to_string()))
            .collect()
    }

    /// Signer addresses in slot order.
    #[wasm_bindgen]
    pub fn signer_keys(&self) -> js_sys::Array {
        self.inner
            .signer_keys()
            .iter()
            .map(|key| JsValue::from_str(&key.to_string()))
            .collect()
    }

    /// Signature for slot `index` as base58, `undefined` when the slot is
    /// pending or out of range.
    #[wasm_bindgen]
    pub fn signature_at(&self, index: usize) -> Option<String> {
        self.inner
            .signatures()
            .get(index)
            .and_then(|slot| slot.as_ref())
            .map(|sig| sig.to_string())
    }

    /// Attach an externally produced 64-byte signature for `pubkey` (base58).
    #[wasm_bindgen]
    pub fn add_signature(&mut self, pubkey: &str, signature: &[u8]) -> Result<(), TxError> {
        let pubkey = Pubkey::from_base58(pubkey)?;
        self.inner.add_signature(&pubkey, signature)
    }

    /// Sign with a keypair that owns one of the signer slots.
    #[wasm_bindgen]
    pub fn sign(&mut self, keypair: &WasmKeypair) -> Result<(), TxError> {
        self.inner.sign(&[keypair.inner() as &dyn Signer])
    }

    /// Per-slot verification results; pending slots verify as `false`.
    #[wasm_bindgen]
    pub fn verify_signatures(&self) -> js_sys::Array {
        self.inner
            .verify_signatures()
            .into_iter()
            .map(JsValue::from_bool)
            .collect()
    }

    #[wasm_bindgen(getter)]
    pub fn is_fully_signed(&self) -> bool {
        self.inner.is_fully_signed()
    }

    /// Serialize to wire bytes; pending slots are written as zeroed placeholders.
    #[wasm_bindgen]
    pub fn to_bytes(&self) -> Result<js_sys::Uint8Array, TxError> {
        let bytes = self.inner.serialize(true)?;
        Ok(js_sys::Uint8Array::from(&bytes[..]))
    }

    #[wasm_bindgen]
    pub fn to_base64(&self) -> Result<String, TxError> {
        Ok(BASE64_STANDARD.encode(self.inner.serialize(true)?))
    }

    /// Lookups of a V0 message as `[{ accountKey, writableIndexes, readonlyIndexes }]`;
    /// empty for legacy.
    #[wasm_bindgen]
    pub fn address_lookup_tables(&self) -> Result<JsValue, JsValue> {
        Ok(self.inner.message().address_table_lookups().to_vec().try_to_js_value()?)
    }

    /// Instructions with their accounts and roles.
    ///
    /// Each entry is `{ programId, accounts, data }`. Accounts are
    /// `{ pubkey, isSigner, isWritable }`. Without `lookupTables`, an account
    /// loaded through a lookup table comes back as `{ lookupIndex, isWritable }`.
    ///
    /// @param lookupTables - Optional `[{ accountKey, addresses }]` to resolve V0 lookups
    #[wasm_bindgen]
    pub fn instructions(&self, lookup_tables: JsValue) -> Result<js_sys::Array, JsValue> {
        let message = self.inner.message();
        let tables = lookup_tables_from_js(lookup_tables)?;
        let resolved = if tables.is_empty() {
            None
        } else {
            Some(message.account_metas(&tables)?)
        };

        let arr = js_sys::Array::new();
        for instruction in message.instructions() {
            let program_id = *message
                .static_account_keys()
                .get(usize::from(instruction.program_id_index))
                .ok_or_else(|| TxError::decode("program id index outside static keys"))?;
            let accounts = instruction
                .accounts
                .iter()
                .map(|&i| {
                    let index = usize::from(i);
                    let account = match &resolved {
                        Some(metas) => metas.get(index).copied().map(AccountRef::Static),
                        None => message.account_ref(index),
                    };
                    account.ok_or_else(|| {
                        TxError::decode(format!("account index {} out of range", i))
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            let obj = js_obj!(
                "programId" => program_id,
                "accounts" => accounts
            )?;
            let data = js_sys::Uint8Array::from(&instruction.data[..]);
            js_sys::Reflect::set(&obj, &"data".into(), &data)?;
            arr.push(&obj);
        }
        Ok(arr)
    }
}

impl WasmTransaction {
    pub fn inner(&self) -> &SignedTransaction {
        &self.inner
    }
}
