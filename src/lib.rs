//! wasm-solana-tx: Solana transaction compilation, signing and decoding,
//! with WASM bindings.
//!
//! Builds legacy and V0 (lookup table) messages from instructions, serializes
//! them in the Solana wire format, collects ed25519 signatures positionally,
//! and decodes wire bytes back into structured instructions.
//!
//! # Architecture
//!
//! 1. **Core** (`compact`, `pubkey`, `keypair`, `account`, `instruction`,
//!    `message`, `transaction`) - account ordering, message compilation and
//!    the wire codec
//! 2. **Programs and decoding** (`programs`, `instructions`, `parser`,
//!    `builder`) - instruction constructors, decoders and the JSON intent builder
//! 3. **WASM bindings** (`wasm/`) - thin wrappers that expose the above to JavaScript
//!
//! # Usage from Rust
//!
//! ```rust
//! use wasm_solana_tx::programs::system;
//! use wasm_solana_tx::{Hash, Keypair, KeypairExt, Pubkey, Transaction};
//!
//! let payer = Keypair::from_secret_key_bytes(&[7; 32])?;
//! let to = Pubkey::new_from_array([9; 32]);
//!
//! let mut tx = Transaction::new();
//! tx.set_recent_blockhash(Hash::new_from_array([1; 32]))
//!     .add_instruction(system::transfer(&payer.public_key(), &to, 1_000)?);
//!
//! // The fee payer defaults to the first signer.
//! let signed = tx.sign(&[&payer])?;
//! assert!(signed.is_fully_signed());
//! let wire = signed.serialize(false)?;
//! assert_eq!(wire[0], 1);
//! # Ok::<(), wasm_solana_tx::TxError>(())
//! ```

pub mod account;
pub mod builder;
pub mod compact;
mod error;
pub mod instruction;
pub mod instructions;
pub mod keypair;
pub mod message;
pub mod parser;
pub mod programs;
pub mod pubkey;
pub mod transaction;
pub mod wasm;

// Re-export core types at crate root
pub use account::{AccountKeysList, AccountMeta};
pub use error::{Result, TxError};
pub use instruction::{CompiledInstruction, TransactionInstruction};
pub use keypair::{Keypair, KeypairExt};
pub use message::{
    AddressLookupTableAccount, Hash, LegacyMessage, Message, MessageHeader, TxVersion,
    V0Message, VersionedMessage,
};
pub use parser::{parse_transaction, ParsedTransaction};
pub use pubkey::{Pubkey, PubkeyExt};
pub use transaction::{SignedTransaction, Transaction, VersionedTransaction};

// Re-export WASM types
pub use wasm::{BuilderNamespace, ParserNamespace, WasmKeypair, WasmPubkey, WasmTransaction};
