//! WASM binding for high-level transaction parsing.

use crate::builder::{self, AddressLookupTable};
use crate::message::AddressLookupTableAccount;
use crate::parser;
use crate::wasm::try_into_js_value::TryIntoJsValue;
use wasm_bindgen::prelude::*;

/// Namespace for transaction parsing operations.
#[wasm_bindgen]
pub struct ParserNamespace;

#[wasm_bindgen]
impl ParserNamespace {
    /// Parse a serialized Solana transaction into structured data.
    ///
    /// The result has:
    /// - `version`: `"legacy"` or `"v0"`
    /// - `feePayer`: The fee payer address (base58)
    /// - `numSignatures`: Number of required signatures
    /// - `nonce`: The blockhash/nonce value (base58)
    /// - `durableNonce`: Durable nonce info, if the first instruction advances a nonce
    /// - `instructionsData`: Decoded instructions, each with a `type` field
    /// - `accountKeys`: `{ pubkey, isSigner, isWritable }` for every account
    /// - `signatures`: base58 signatures, `undefined` for placeholder slots
    ///
    /// @param bytes - The raw transaction bytes (wire format)
    /// @param lookupTables - Optional `[{ accountKey, addresses }]` for V0 messages
    #[wasm_bindgen]
    pub fn parse_transaction(bytes: &[u8], lookup_tables: JsValue) -> Result<JsValue, JsValue> {
        let tables = lookup_tables_from_js(lookup_tables)?;
        let parsed = parser::parse_transaction(bytes, &tables)?;
        Ok(parsed.try_to_js_value()?)
    }
}

/// Read optional `[{ accountKey, addresses }]` tables; `undefined` and `null` mean none.
pub(crate) fn lookup_tables_from_js(
    lookup_tables: JsValue,
) -> Result<Vec<AddressLookupTableAccount>, JsValue> {
    if lookup_tables.is_undefined() || lookup_tables.is_null() {
        return Ok(Vec::new());
    }
    let tables: Vec<AddressLookupTable> = serde_wasm_bindgen::from_value(lookup_tables)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse lookup tables: {}", e)))?;
    let tables = tables
        .iter()
        .map(builder::convert_lookup_table)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(tables)
}
