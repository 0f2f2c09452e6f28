//! Memo program instruction.

use super::MEMO_PROGRAM_ID;
use crate::account::AccountMeta;
use crate::instruction::TransactionInstruction;
use crate::pubkey::Pubkey;

/// Attach `text` to a transaction. Each of `signers` must sign it.
pub fn memo(text: &str, signers: &[Pubkey]) -> TransactionInstruction {
    TransactionInstruction::new(
        MEMO_PROGRAM_ID,
        signers
            .iter()
            .map(|signer| AccountMeta::new_readonly(*signer, true))
            .collect(),
        text.as_bytes().to_vec(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memo() {
        let ix = memo("hello", &[]);
        assert_eq!(ix.program_id, MEMO_PROGRAM_ID);
        assert!(ix.keys.is_empty());
        assert_eq!(ix.data, b"hello");

        let signer = Pubkey::new_from_array([1; 32]);
        let ix = memo("", &[signer]);
        assert_eq!(ix.keys, vec![AccountMeta::new_readonly(signer, true)]);
    }
}
