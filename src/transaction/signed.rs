//! Signature slots over immutable message bytes.

use crate::compact::{write_length, ByteReader};
use crate::error::{Result, TxError};
use crate::message::VersionedMessage;
use crate::pubkey::Pubkey;
use solana_signature::Signature;
use solana_signer::Signer;

pub const SIGNATURE_BYTES: usize = 64;

/// A compiled message plus one signature slot per required signer.
///
/// Slots are positional: slot `i` belongs to `signer_keys()[i]`, which are the
/// first `num_required_signatures` keys of the message. Everything here works
/// from the message bytes alone, so a transaction can be completed by parties
/// that only ever see its wire form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    message_bytes: Vec<u8>,
    message: VersionedMessage,
    signer_keys: Vec<Pubkey>,
    signatures: Vec<Option<Signature>>,
}

impl SignedTransaction {
    /// Wrap a compiled message with every slot pending.
    pub fn from_message(message: VersionedMessage) -> Self {
        let message_bytes = message.serialize();
        Self::with_empty_slots(message_bytes, message)
    }

    /// Wrap serialized message bytes with every slot pending.
    pub fn from_message_bytes(bytes: &[u8]) -> Result<Self> {
        let message = VersionedMessage::deserialize(bytes)?;
        Ok(Self::with_empty_slots(bytes.to_vec(), message))
    }

    fn with_empty_slots(message_bytes: Vec<u8>, message: VersionedMessage) -> Self {
        let signer_keys = message.signer_keys().to_vec();
        let signatures = vec![None; signer_keys.len()];
        SignedTransaction {
            message_bytes,
            message,
            signer_keys,
            signatures,
        }
    }

    /// Decode wire bytes: `[len + signatures][message]`.
    ///
    /// All-zero signatures are placeholders and come back as pending slots.
    pub fn deserialize(bytes: &[u8]) -> Result<Self> {
        let mut reader = ByteReader::new(bytes);
        let num_signatures = reader.read_length()?;
        if num_signatures > reader.remaining().len() / SIGNATURE_BYTES {
            return Err(TxError::decode(format!(
                "transaction: {} signatures do not fit in {} bytes",
                num_signatures,
                reader.remaining().len()
            )));
        }
        let signatures = (0..num_signatures)
            .map(|_| {
                let bytes: [u8; SIGNATURE_BYTES] = reader.read_array("signature")?;
                Ok((bytes != [0u8; SIGNATURE_BYTES]).then(|| Signature::from(bytes)))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut tx = Self::from_message_bytes(reader.remaining())?;
        if signatures.len() != tx.signer_keys.len() {
            return Err(TxError::decode(format!(
                "transaction: {} signatures for {} required signers",
                signatures.len(),
                tx.signer_keys.len()
            )));
        }
        tx.signatures = signatures;
        Ok(tx)
    }

    fn position(&self, pubkey: &Pubkey) -> Result<usize> {
        self.signer_keys
            .iter()
            .position(|key| key == pubkey)
            .ok_or(TxError::UnknownSigner(*pubkey))
    }

    /// Sign the message with each of `signers`, overwriting their slots.
    ///
    /// Every signer must hold one of the required slots; nothing is signed if
    /// any of them does not.
    pub fn sign(&mut self, signers: &[&dyn Signer]) -> Result<()> {
        let positions = signers
            .iter()
            .map(|signer| self.position(&signer.pubkey()))
            .collect::<Result<Vec<_>>>()?;
        for (signer, position) in signers.iter().zip(positions) {
            let signature = signer.sign_message(&self.message_bytes);
            tracing::debug!(signer = %self.signer_keys[position], slot = position, "signed transaction");
            self.signatures[position] = Some(signature);
        }
        Ok(())
    }

    /// Attach a signature produced elsewhere.
    pub fn add_signature(&mut self, pubkey: &Pubkey, signature: &[u8]) -> Result<()> {
        let bytes: [u8; SIGNATURE_BYTES] = signature
            .try_into()
            .map_err(|_| TxError::InvalidSignatureLength(signature.len()))?;
        let position = self.position(pubkey)?;
        self.signatures[position] = Some(Signature::from(bytes));
        Ok(())
    }

    /// Encode to wire bytes.
    ///
    /// With `include_null_signatures`, pending slots are written as 64 zero
    /// bytes. Without it, a pending slot is an error: dropping it would shift
    /// every later signature out of position.
    pub fn serialize(&self, include_null_signatures: bool) -> Result<Vec<u8>> {
        if !include_null_signatures {
            if let Some(i) = self.signatures.iter().position(Option::is_none) {
                return Err(TxError::MissingSignature(self.signer_keys[i]));
            }
        }
        let mut out = Vec::with_capacity(
            1 + self.signatures.len() * SIGNATURE_BYTES + self.message_bytes.len(),
        );
        write_length(&mut out, self.signatures.len());
        for signature in &self.signatures {
            match signature {
                Some(signature) => out.extend_from_slice(signature.as_ref()),
                None => out.extend_from_slice(&[0u8; SIGNATURE_BYTES]),
            }
        }
        out.extend_from_slice(&self.message_bytes);
        Ok(out)
    }

    /// Check every slot against its key; pending slots report `false`.
    pub fn verify_signatures(&self) -> Vec<bool> {
        self.signer_keys
            .iter()
            .zip(&self.signatures)
            .map(|(key, signature)| {
                signature
                    .as_ref()
                    .is_some_and(|s| s.verify(key.as_ref(), &self.message_bytes))
            })
            .collect()
    }

    pub fn signature(&self, pubkey: &Pubkey) -> Option<&Signature> {
        let position = self.signer_keys.iter().position(|key| key == pubkey)?;
        self.signatures[position].as_ref()
    }

    /// Slots in signer order; `None` marks a pending slot.
    pub fn signatures(&self) -> &[Option<Signature>] {
        &self.signatures
    }

    pub fn signer_keys(&self) -> &[Pubkey] {
        &self.signer_keys
    }

    pub fn message_bytes(&self) -> &[u8] {
        &self.message_bytes
    }

    pub fn message(&self) -> &VersionedMessage {
        &self.message
    }

    pub fn is_fully_signed(&self) -> bool {
        self.signatures.iter().all(Option::is_some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::AccountMeta;
    use crate::instruction::TransactionInstruction;
    use crate::keypair::{Keypair, KeypairExt};
    use crate::message::{Hash, LegacyMessage};
    use base64::prelude::*;

    // Test transaction from @solana/web3.js - a simple SOL transfer with a
    // zeroed signature slot.
    const TEST_TX_BASE64: &str = "AQAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAABAAEDFVMqpim7tqEi2XL8R6KKkP0DYJvY3eiRXLlL1P9EjYgXKQC+k0FKnqyC4AZGJR7OhJXfpPP3NHOhS8t/6G7bLAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA/1c7Oaj3RbyLIjU0/ZPpsmVfVUWAzc8g36fK5g6A0JoBAgIAAQwCAAAAoIYBAAAAAAA=";

    fn keypair(n: u8) -> Keypair {
        Keypair::from_secret_key_bytes(&[n; 32]).unwrap()
    }

    /// Message needing signatures from both `a` (fee payer) and `b`.
    fn two_signer_message(a: &Keypair, b: &Keypair) -> VersionedMessage {
        let ix = TransactionInstruction::new(
            Pubkey::new_from_array([10; 32]),
            vec![
                AccountMeta::new(b.public_key(), true),
                AccountMeta::new(Pubkey::new_from_array([3; 32]), false),
            ],
            vec![1, 2, 3],
        );
        LegacyMessage::compile(&a.public_key(), Hash::new_from_array([7; 32]), &[ix])
            .unwrap()
            .into()
    }

    #[test]
    fn test_deserialize_web3_fixture() {
        let bytes = BASE64_STANDARD.decode(TEST_TX_BASE64).unwrap();
        let tx = SignedTransaction::deserialize(&bytes).unwrap();

        assert_eq!(tx.signer_keys().len(), 1);
        assert_eq!(tx.signatures(), &[None]);
        assert!(!tx.is_fully_signed());
        assert_eq!(tx.message_bytes(), &bytes[65..]);
        assert_eq!(tx.serialize(true).unwrap(), bytes);
        assert_eq!(
            tx.serialize(false),
            Err(TxError::MissingSignature(tx.signer_keys()[0]))
        );
    }

    #[test]
    fn test_signature_count_must_match_header() {
        let bytes = BASE64_STANDARD.decode(TEST_TX_BASE64).unwrap();
        let mut extra = vec![2u8];
        extra.extend_from_slice(&[0u8; 64]);
        extra.extend_from_slice(&bytes[1..]);
        assert!(matches!(
            SignedTransaction::deserialize(&extra),
            Err(TxError::Decode(_))
        ));
        assert!(SignedTransaction::deserialize(&bytes[..40]).is_err());
    }

    #[test]
    fn test_sign_fills_positional_slots() {
        let (a, b) = (keypair(1), keypair(2));
        let mut tx = SignedTransaction::from_message(two_signer_message(&a, &b));
        assert_eq!(tx.signer_keys(), &[a.public_key(), b.public_key()]);

        tx.sign(&[&b]).unwrap();
        assert_eq!(tx.verify_signatures(), vec![false, true]);
        tx.sign(&[&a]).unwrap();
        assert_eq!(tx.verify_signatures(), vec![true, true]);
        assert!(tx.is_fully_signed());
        assert_eq!(
            tx.signature(&a.public_key()),
            Some(&a.sign_message(tx.message_bytes()))
        );
    }

    #[test]
    fn test_unknown_signer_signs_nothing() {
        let (a, b, c) = (keypair(1), keypair(2), keypair(3));
        let mut tx = SignedTransaction::from_message(two_signer_message(&a, &b));
        assert_eq!(
            tx.sign(&[&a, &c]),
            Err(TxError::UnknownSigner(c.public_key()))
        );
        assert_eq!(tx.signatures(), &[None, None]);
    }

    #[test]
    fn test_add_signature() {
        let (a, b) = (keypair(1), keypair(2));
        let mut tx = SignedTransaction::from_message(two_signer_message(&a, &b));
        let signature = b.sign_message(tx.message_bytes());

        assert_eq!(
            tx.add_signature(&b.public_key(), &signature.as_ref()[..63]),
            Err(TxError::InvalidSignatureLength(63))
        );
        assert_eq!(
            tx.add_signature(&keypair(3).public_key(), signature.as_ref()),
            Err(TxError::UnknownSigner(keypair(3).public_key()))
        );
        tx.add_signature(&b.public_key(), signature.as_ref()).unwrap();
        assert_eq!(tx.signature(&b.public_key()), Some(&signature));
    }

    #[test]
    fn test_bad_signature_fails_verification() {
        let (a, b) = (keypair(1), keypair(2));
        let mut tx = SignedTransaction::from_message(two_signer_message(&a, &b));
        let wrong = a.sign_message(b"something else");
        tx.add_signature(&a.public_key(), wrong.as_ref()).unwrap();
        assert_eq!(tx.verify_signatures(), vec![false, false]);
    }

    #[test]
    fn test_wire_roundtrip_keeps_message_bytes() {
        let (a, b) = (keypair(1), keypair(2));
        let mut tx = SignedTransaction::from_message(two_signer_message(&a, &b));
        tx.sign(&[&a]).unwrap();

        let wire = tx.serialize(true).unwrap();
        assert_eq!(wire[0], 2);
        assert_eq!(&wire[65..129], &[0u8; 64]);
        let decoded = SignedTransaction::deserialize(&wire).unwrap();
        assert_eq!(decoded, tx);
    }
}
