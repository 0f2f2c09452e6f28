//! WASM bindings for Solana public key (address) operations.

use crate::error::TxError;
use crate::pubkey::{find_program_address, Pubkey, PubkeyExt};
use wasm_bindgen::prelude::*;

/// WASM wrapper for Solana public key (address).
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct WasmPubkey {
    inner: Pubkey,
}

#[wasm_bindgen]
impl WasmPubkey {
    /// Create a Pubkey from a base58 string.
    #[wasm_bindgen]
    pub fn from_base58(address: &str) -> Result<WasmPubkey, TxError> {
        Pubkey::from_base58(address).map(|inner| WasmPubkey { inner })
    }

    /// Create a Pubkey from raw bytes (32 bytes).
    #[wasm_bindgen]
    pub fn from_bytes(bytes: &[u8]) -> Result<WasmPubkey, TxError> {
        Pubkey::from_bytes_checked(bytes).map(|inner| WasmPubkey { inner })
    }

    /// Derive a program address, trying bump seeds from 255 down.
    ///
    /// @returns `[address, bump]`
    #[wasm_bindgen]
    pub fn find_program_address(
        seeds: Vec<js_sys::Uint8Array>,
        program_id: &WasmPubkey,
    ) -> Result<js_sys::Array, TxError> {
        let seeds: Vec<Vec<u8>> = seeds.iter().map(|seed| seed.to_vec()).collect();
        let seed_refs: Vec<&[u8]> = seeds.iter().map(Vec::as_slice).collect();
        let (address, bump) = find_program_address(&seed_refs, &program_id.inner)?;

        let result = js_sys::Array::new();
        result.push(&JsValue::from(WasmPubkey { inner: address }));
        result.push(&JsValue::from(bump));
        Ok(result)
    }

    /// Convert to base58 string (the standard Solana address format).
    #[wasm_bindgen]
    pub fn to_base58(&self) -> String {
        self.inner.to_string()
    }

    #[wasm_bindgen]
    pub fn to_bytes(&self) -> js_sys::Uint8Array {
        let bytes = self.inner.to_bytes();
        js_sys::Uint8Array::from(&bytes[..])
    }

    #[wasm_bindgen]
    pub fn equals(&self, other: &WasmPubkey) -> bool {
        self.inner == other.inner
    }

    /// Check if this public key is on the Ed25519 curve.
    #[wasm_bindgen]
    pub fn is_on_curve(&self) -> bool {
        self.inner.is_on_curve()
    }
}

impl WasmPubkey {
    pub fn inner(&self) -> &Pubkey {
        &self.inner
    }
}
