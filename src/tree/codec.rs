//! Serialization of the tree structure.
//!
//! The tree is written in preorder, one flag bit per node:
//! - `1` marks a leaf and is followed by its 16 bit character, most significant bit first
//! - `0` marks an internal node and is followed by its left, then its right subtree
//!
//! Weights are not stored, decoding only needs the shape. The bits are packed like
//! any [`BitSequence`] and padded to a whole byte. Because the flags delimit the
//! structure, no length prefix is needed.

use alloc::boxed::Box;

use super::{HuffmanTree, Node};
use crate::common::{BitSequence, CHARACTER_BITS, MAX_TREE_DEPTH};
use crate::decoding::bit_reader::BitReader;
use crate::io::{self, Read};

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum TreeDecodeError {
    #[error("Serialized tree ended after {bits_read} bits, before the structure was complete")]
    Truncated { bits_read: usize },
    #[error("Serialized tree nests deeper than {max_depth} levels. Stream is probably corrupted")]
    TooDeep { max_depth: usize },
    #[error(transparent)]
    Io(io::Error),
}

/// Append the preorder encoding of `tree` to `target`
pub fn write_tree_bits(tree: &HuffmanTree, target: &mut BitSequence) {
    fn write_node(node: &Node, target: &mut BitSequence) {
        match node {
            Node::Leaf { character, .. } => {
                target.push(true);
                target.push_bits_msb(u64::from(*character), CHARACTER_BITS);
            }
            Node::Internal { left, right, .. } => {
                target.push(false);
                write_node(left, target);
                write_node(right, target);
            }
        }
    }
    write_node(tree.root(), target);
}

/// Serialize `tree` into its packed byte form
pub fn write_tree(tree: &HuffmanTree) -> alloc::vec::Vec<u8> {
    let mut bits = BitSequence::new();
    write_tree_bits(tree, &mut bits);
    vdebug!(
        "serialized tree with {} leaves into {} bits",
        tree.leaf_count(),
        bits.len()
    );
    bits.into_bytes()
}

/// Read a tree written by [`write_tree`] from `source`.
///
/// Consumes exactly the bytes the writer produced. The leaves of the returned
/// tree have a weight of zero.
pub fn read_tree(source: impl Read) -> Result<HuffmanTree, TreeDecodeError> {
    let mut br = BitReader::new(source);
    let root = read_node(&mut br, 0)?;
    vdebug!("read tree of {} bits", br.bits_read());
    Ok(HuffmanTree::new(root))
}

fn read_node<R: Read>(br: &mut BitReader<R>, depth: usize) -> Result<Node, TreeDecodeError> {
    if depth > MAX_TREE_DEPTH {
        return Err(TreeDecodeError::TooDeep {
            max_depth: MAX_TREE_DEPTH,
        });
    }
    let is_leaf = read_or_truncated(br, |br| br.get_bit())?;
    if is_leaf {
        let character = read_or_truncated(br, |br| br.get_bits_msb(CHARACTER_BITS))?;
        // CHARACTER_BITS is 16, the value always fits
        Ok(Node::leaf(character as u16, 0))
    } else {
        let left = read_node(br, depth + 1)?;
        let right = read_node(br, depth + 1)?;
        Ok(Node::Internal {
            weight: 0,
            left: Box::new(left),
            right: Box::new(right),
        })
    }
}

fn read_or_truncated<R: Read, T>(
    br: &mut BitReader<R>,
    read: impl FnOnce(&mut BitReader<R>) -> io::Result<T>,
) -> Result<T, TreeDecodeError> {
    read(br).map_err(|err| match err.kind() {
        io::ErrorKind::UnexpectedEof => TreeDecodeError::Truncated {
            bits_read: br.bits_read(),
        },
        _ => TreeDecodeError::Io(err),
    })
}
