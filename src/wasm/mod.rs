mod builder;
mod constants;
mod keypair;
mod parser;
mod pubkey;
mod transaction;
pub mod try_into_js_value;

pub use builder::BuilderNamespace;
pub use keypair::WasmKeypair;
pub use parser::ParserNamespace;
pub use pubkey::WasmPubkey;
pub use transaction::WasmTransaction;

pub use constants::*;
