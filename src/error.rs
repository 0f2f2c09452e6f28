use crate::pubkey::Pubkey;
use thiserror::Error;
use wasm_bindgen::JsValue;

/// Errors produced while compiling, encoding, decoding or signing transactions.
///
/// Variants fall into three families: precondition violations (caller input is
/// incomplete or malformed, nothing was written), internal invariant violations
/// (compilation reached a state it can not represent), and decode errors (the
/// input bytes are not a transaction this crate understands).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TxError {
    // ===== Preconditions =====
    #[error("transaction fee payer required")]
    MissingFeePayer,

    #[error("recent blockhash required")]
    MissingRecentBlockhash,

    #[error("no instructions provided")]
    NoInstructions,

    #[error("invalid {what} length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("invalid base58 {what}: {value}")]
    InvalidBase58 { what: &'static str, value: String },

    #[error("invalid signature length: expected 64 bytes, got {0}")]
    InvalidSignatureLength(usize),

    #[error("unknown signer: {0}")]
    UnknownSigner(Pubkey),

    #[error("missing signature for {0}")]
    MissingSignature(Pubkey),

    #[error("max seed length exceeded")]
    MaxSeedLengthExceeded,

    #[error("too many seeds: {0} (max 16)")]
    TooManySeeds(usize),

    #[error("invalid seeds, address must fall off the curve")]
    InvalidSeeds,

    #[error("invalid transaction intent: {0}")]
    InvalidIntent(String),

    // ===== Internal invariants =====
    #[error("account index overflowed during compilation")]
    AccountIndexOverflow,

    #[error("address lookup table index overflowed during compilation")]
    LookupIndexOverflow,

    #[error("encountered unknown account key `{0}` during instruction compilation")]
    UnknownAccount(Pubkey),

    #[error("address lookup table `{0}` was referenced but not resolved")]
    MissingLookupTable(Pubkey),

    #[error("unable to find a viable program address bump seed")]
    NoViableBump,

    #[error("failed to encode instruction data: {0}")]
    InstructionData(String),

    // ===== Decoding =====
    #[error("unsupported message version: {0}")]
    UnsupportedVersion(u8),

    #[error("failed to decode {0}")]
    Decode(String),
}

impl TxError {
    pub fn decode(what: impl Into<String>) -> Self {
        TxError::Decode(what.into())
    }
}

pub type Result<T> = std::result::Result<T, TxError>;

// Converts errors into JavaScript exceptions with a stack trace.
impl From<TxError> for JsValue {
    fn from(err: TxError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}
