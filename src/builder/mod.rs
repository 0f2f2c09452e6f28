//! Transaction building from a declarative intent.
//!
//! `build_transaction` takes a `TransactionIntent` (camelCase JSON on the
//! JavaScript side) and returns unsigned wire bytes.

mod build;
mod types;

pub use build::build_transaction;
pub(crate) use build::convert_lookup_table;
pub use types::{AccountMetaIntent, AddressLookupTable, Instruction, Nonce, TransactionIntent};
