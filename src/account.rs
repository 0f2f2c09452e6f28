//! Account references and the account list compiler.
//!
//! Every instruction names the accounts it touches together with the role it
//! needs (signer and/or writable). Compilation merges those references into one
//! deduplicated list whose order is fixed by the protocol:
//!
//! 1. the fee payer (always signer + writable)
//! 2. writable signers
//! 3. read-only signers
//! 4. writable non-signers
//! 5. read-only non-signers
//!
//! Within a group, accounts keep the order in which they were first referenced.

use crate::instruction::TransactionInstruction;
use crate::pubkey::Pubkey;
use std::cmp::Ordering;
use std::collections::HashMap;

/// A single account reference with its requested role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountMeta {
    pub pubkey: Pubkey,
    pub is_signer: bool,
    pub is_writable: bool,
}

impl AccountMeta {
    /// A writable account reference.
    pub fn new(pubkey: Pubkey, is_signer: bool) -> Self {
        AccountMeta {
            pubkey,
            is_signer,
            is_writable: true,
        }
    }

    /// A read-only account reference.
    pub fn new_readonly(pubkey: Pubkey, is_signer: bool) -> Self {
        AccountMeta {
            pubkey,
            is_signer,
            is_writable: false,
        }
    }

    /// Widen this reference with the role requested by `other`.
    ///
    /// Roles only ever grow: a key seen as writable (or as a signer) anywhere
    /// stays writable (or a signer).
    pub fn merge(&mut self, other: &AccountMeta) {
        debug_assert_eq!(self.pubkey, other.pubkey);
        self.is_signer |= other.is_signer;
        self.is_writable |= other.is_writable;
    }
}

/// Total order over account roles: signers before non-signers, then writable
/// before read-only. Keys are not compared, so a stable sort keeps insertion
/// order among equal roles.
pub fn compare_roles(a: &AccountMeta, b: &AccountMeta) -> Ordering {
    b.is_signer
        .cmp(&a.is_signer)
        .then_with(|| b.is_writable.cmp(&a.is_writable))
}

/// Insertion-ordered, deduplicated set of account references.
#[derive(Debug, Clone, Default)]
pub struct AccountKeysList {
    accounts: Vec<AccountMeta>,
    positions: HashMap<Pubkey, usize>,
}

impl AccountKeysList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a reference, merging roles if the key is already present.
    pub fn add(&mut self, meta: AccountMeta) {
        match self.positions.get(&meta.pubkey) {
            Some(&pos) => self.accounts[pos].merge(&meta),
            None => {
                self.positions.insert(meta.pubkey, self.accounts.len());
                self.accounts.push(meta);
            }
        }
    }

    pub fn add_all<'a>(&mut self, metas: impl IntoIterator<Item = &'a AccountMeta>) {
        for meta in metas {
            self.add(*meta);
        }
    }

    /// Add an instruction's keys in order, then its program id as a read-only
    /// non-signer.
    pub fn add_instruction(&mut self, instruction: &TransactionInstruction) {
        self.add_all(&instruction.keys);
        self.add(AccountMeta::new_readonly(instruction.program_id, false));
    }

    pub fn from_instructions(instructions: &[TransactionInstruction]) -> Self {
        let mut list = Self::new();
        for instruction in instructions {
            list.add_instruction(instruction);
        }
        list
    }

    pub fn get(&self, pubkey: &Pubkey) -> Option<&AccountMeta> {
        self.positions.get(pubkey).map(|&pos| &self.accounts[pos])
    }

    pub fn contains(&self, pubkey: &Pubkey) -> bool {
        self.positions.contains_key(pubkey)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// References in first-seen order, before any role sorting.
    pub fn iter(&self) -> impl Iterator<Item = &AccountMeta> {
        self.accounts.iter()
    }

    /// The role-sorted list without fee payer handling.
    pub fn sorted(&self) -> Vec<AccountMeta> {
        let mut list = self.accounts.clone();
        // Vec::sort_by is stable.
        list.sort_by(compare_roles);
        list
    }

    /// The final account order for a message.
    ///
    /// When a fee payer is given it is placed first as a writable signer no matter
    /// how instructions referenced it; the rest follow in role order.
    pub fn compile(&self, fee_payer: Option<&Pubkey>) -> Vec<AccountMeta> {
        let Some(payer) = fee_payer else {
            return self.sorted();
        };

        let mut rest: Vec<AccountMeta> = self
            .accounts
            .iter()
            .filter(|meta| meta.pubkey != *payer)
            .copied()
            .collect();
        rest.sort_by(compare_roles);

        let mut list = Vec::with_capacity(rest.len() + 1);
        list.push(AccountMeta::new(*payer, true));
        list.extend(rest);
        list
    }
}
