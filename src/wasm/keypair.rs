//! WASM bindings for Solana keypair operations.

use crate::error::TxError;
use crate::keypair::{Keypair, KeypairExt};
use solana_signer::Signer;
use wasm_bindgen::prelude::*;

/// WASM wrapper for Solana Ed25519 keypairs.
#[wasm_bindgen]
#[derive(Debug)]
pub struct WasmKeypair {
    inner: Keypair,
}

#[wasm_bindgen]
impl WasmKeypair {
    /// Generate a new random keypair.
    #[wasm_bindgen]
    pub fn generate() -> WasmKeypair {
        WasmKeypair {
            inner: Keypair::new(),
        }
    }

    /// Create a keypair from a 32-byte secret key.
    #[wasm_bindgen]
    pub fn from_secret_key(secret_key: &[u8]) -> Result<WasmKeypair, TxError> {
        Keypair::from_secret_key_bytes(secret_key).map(|inner| WasmKeypair { inner })
    }

    /// Create a keypair from a 64-byte Solana secret key (secret + public concatenated).
    #[wasm_bindgen]
    pub fn from_solana_secret_key(secret_key: &[u8]) -> Result<WasmKeypair, TxError> {
        Keypair::from_solana_secret_key(secret_key).map(|inner| WasmKeypair { inner })
    }

    /// Get the public key as a 32-byte Uint8Array.
    #[wasm_bindgen(getter)]
    pub fn public_key(&self) -> js_sys::Uint8Array {
        let bytes = self.inner.pubkey().to_bytes();
        js_sys::Uint8Array::from(&bytes[..])
    }

    /// Get the secret key (the 32-byte seed) as a Uint8Array.
    #[wasm_bindgen(getter)]
    pub fn secret_key(&self) -> js_sys::Uint8Array {
        let bytes = self.inner.to_bytes();
        js_sys::Uint8Array::from(&bytes[..32])
    }

    /// Get the address as a base58 string.
    #[wasm_bindgen]
    pub fn address(&self) -> String {
        self.inner.address()
    }

    /// Sign a message with this keypair and return the 64-byte Ed25519 signature.
    #[wasm_bindgen]
    pub fn sign(&self, message: &[u8]) -> js_sys::Uint8Array {
        let sig = self.inner.sign_message(message);
        js_sys::Uint8Array::from(sig.as_ref())
    }
}

impl WasmKeypair {
    pub fn inner(&self) -> &Keypair {
        &self.inner
    }
}
