//! WASM binding for transaction building.

use crate::builder;
use wasm_bindgen::prelude::*;

/// Namespace for transaction building operations.
#[wasm_bindgen]
pub struct BuilderNamespace;

#[wasm_bindgen]
impl BuilderNamespace {
    /// Build a Solana transaction from an intent structure.
    ///
    /// ```json
    /// {
    ///   "feePayer": "DgT9qyYwYKBRDyDw3EfR12LHQCQjtNrKu2qMsXHuosmB",
    ///   "nonce": { "type": "blockhash", "value": "GWaQEymC3Z9SHM2gkh8u12xL1zJPMHPCSVR3pSDpEXE4" },
    ///   "instructions": [
    ///     { "type": "transfer", "from": "...", "to": "...", "lamports": "1000000" },
    ///     { "type": "memo", "message": "BitGo tx" }
    ///   ],
    ///   "addressLookupTables": [{ "accountKey": "...", "addresses": ["..."] }]
    /// }
    /// ```
    ///
    /// Instruction types: `transfer`, `createAccount`, `nonceAdvance`,
    /// `nonceInitialize`, `allocate`, `assign`, `memo`, `computeBudget`, `custom`.
    /// `addressLookupTables` is optional; when present a V0 message is built.
    ///
    /// @param intent - The transaction intent as a JSON object
    /// @returns Serialized transaction bytes with zeroed signature placeholders
    #[wasm_bindgen]
    pub fn build_transaction(intent: JsValue) -> Result<Vec<u8>, JsValue> {
        let intent: builder::TransactionIntent =
            serde_wasm_bindgen::from_value(intent).map_err(|e| {
                JsValue::from_str(&format!("Failed to parse transaction intent: {}", e))
            })?;

        Ok(builder::build_transaction(intent)?)
    }
}
