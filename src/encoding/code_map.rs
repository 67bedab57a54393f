use alloc::collections::BTreeMap;

use crate::common::BitSequence;
use crate::tree::{HuffmanTree, Node};

/// Maps every character of a tree to its prefix code, the path from the root
/// to the characters leaf (left is `0`, right is `1`).
///
/// If the root itself is a leaf its character gets an empty code.
#[derive(Debug, Clone)]
pub struct CodeMap {
    codes: BTreeMap<u16, BitSequence>,
}

impl CodeMap {
    pub fn new(tree: &HuffmanTree) -> Self {
        fn collect(node: &Node, path: &mut BitSequence, codes: &mut BTreeMap<u16, BitSequence>) {
            match node {
                Node::Leaf { character, .. } => {
                    codes.insert(*character, path.clone());
                }
                Node::Internal { left, right, .. } => {
                    let mut left_path = path.clone();
                    left_path.push(false);
                    collect(left, &mut left_path, codes);
                    path.push(true);
                    collect(right, path, codes);
                }
            }
        }

        let mut codes = BTreeMap::new();
        collect(tree.root(), &mut BitSequence::new(), &mut codes);
        CodeMap { codes }
    }

    pub fn get(&self, character: u16) -> Option<&BitSequence> {
        self.codes.get(&character)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u16, &BitSequence)> + '_ {
        self.codes.iter().map(|(character, code)| (*character, code))
    }

    /// Number of bits needed to encode `text`, or `None` if it contains a
    /// character without a code
    pub fn encoded_len(&self, text: &[u16]) -> Option<usize> {
        text.iter()
            .map(|character| self.get(*character).map(BitSequence::len))
            .sum()
    }

    /// Append the codes of every character of `text` to `target`, in order.
    ///
    /// Returns the first character that has no code.
    pub fn encode_into(&self, text: &[u16], target: &mut BitSequence) -> Result<(), u16> {
        for &character in text {
            let code = self.get(character).ok_or(character)?;
            target.extend_from(code);
        }
        Ok(())
    }
}
