//! Instruction decoders for the well-known programs, built on the official
//! Solana interface crates.

mod decode;
mod try_into_js_value;
mod types;

pub use decode::{decode_instruction, InstructionContext};
pub use types::*;
