//! The Huffman tree shared by the encoding and the decoding side.
//!
//! A tree is built once per compression from the character frequencies of the
//! whole input (see [`builder`]) and written in front of the compressed data
//! (see [`codec`]). Decompression reads the same structure back, without
//! weights, and walks it bit by bit.

use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use core::fmt;

pub mod builder;
pub mod codec;

pub use builder::{build_tree, FrequencyTable};
pub use codec::{read_tree, write_tree, TreeDecodeError};

/// A node of a Huffman tree.
///
/// Internal nodes own both children exclusively, there is no sharing between
/// subtrees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf {
        character: u16,
        /// How often `character` occured. Zero for trees read from a stream.
        weight: u64,
    },
    Internal {
        /// Always the sum of the childrens weights
        weight: u64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    pub fn leaf(character: u16, weight: u64) -> Node {
        Node::Leaf { character, weight }
    }

    /// Merge two subtrees under a new internal node
    pub fn merge(left: Node, right: Node) -> Node {
        Node::Internal {
            weight: left.weight() + right.weight(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn weight(&self) -> u64 {
        match self {
            Node::Leaf { weight, .. } | Node::Internal { weight, .. } => *weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// Number of leaves below and including this node
    pub fn leaf_count(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }

    /// Length of the longest root-to-leaf path, a lone leaf has depth 0
    pub fn depth(&self) -> usize {
        match self {
            Node::Leaf { .. } => 0,
            Node::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }
}

/// An immutable Huffman tree. Once built it is only ever read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: Node,
}

impl HuffmanTree {
    pub fn new(root: Node) -> Self {
        HuffmanTree { root }
    }

    /// Build the tree for a frequency table.
    ///
    /// Returns `None` if the table is empty.
    pub fn from_frequencies(frequencies: &FrequencyTable) -> Option<Self> {
        build_tree(frequencies)
    }

    /// Count the characters of `text` and build the tree for them.
    ///
    /// Returns `None` if `text` is empty.
    pub fn from_text(text: &[u16]) -> Option<Self> {
        build_tree(&builder::count_frequencies(text))
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Weight of the root. For a freshly built tree this is the number of
    /// characters it was built from.
    pub fn weight(&self) -> u64 {
        self.root.weight()
    }

    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }

    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// Collect the weight of every leaf, keyed by its character
    pub fn frequencies(&self) -> FrequencyTable {
        fn collect(node: &Node, table: &mut BTreeMap<u16, u64>) {
            match node {
                Node::Leaf { character, weight } => {
                    table.insert(*character, *weight);
                }
                Node::Internal { left, right, .. } => {
                    collect(left, table);
                    collect(right, table);
                }
            }
        }
        let mut table = BTreeMap::new();
        collect(&self.root, &mut table);
        table
    }
}

/// Draws the tree sideways, one node per line:
///
/// ```text
/// (3)
/// |-'b'
/// \-'a'
/// ```
impl fmt::Display for HuffmanTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn draw(
            node: &Node,
            f: &mut fmt::Formatter<'_>,
            prefix: &mut alloc::string::String,
            is_last: bool,
            is_root: bool,
        ) -> fmt::Result {
            let connector = match (is_root, is_last) {
                (true, _) => "",
                (false, false) => "|-",
                (false, true) => "\\-",
            };
            match node {
                Node::Leaf { character, .. } => {
                    writeln!(f, "{prefix}{connector}'{}'", Escaped(*character))
                }
                Node::Internal {
                    weight,
                    left,
                    right,
                } => {
                    writeln!(f, "{prefix}{connector}({weight})")?;
                    let restore = prefix.len();
                    if !is_root {
                        prefix.push_str(if is_last { "  " } else { "| " });
                    }
                    draw(left, f, prefix, false, false)?;
                    draw(right, f, prefix, true, false)?;
                    prefix.truncate(restore);
                    Ok(())
                }
            }
        }
        draw(
            &self.root,
            f,
            &mut alloc::string::String::new(),
            true,
            true,
        )
    }
}

/// Prints a code unit as a character, escaping the control characters that
/// would break the tree drawing
struct Escaped(u16);

impl fmt::Display for Escaped {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match char::from_u32(u32::from(self.0)) {
            Some('\n') => f.write_str("\\n"),
            Some('\r') => f.write_str("\\r"),
            Some('\t') => f.write_str("\\t"),
            Some(c) if !c.is_control() => write!(f, "{c}"),
            // Control characters and unpaired surrogates
            _ => write!(f, "\\u{{{:04x}}}", self.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{HuffmanTree, Node};
    use alloc::string::ToString;
    use alloc::vec::Vec;

    fn units(text: &str) -> Vec<u16> {
        text.encode_utf16().collect()
    }

    #[test]
    fn internal_weight_is_sum_of_children() {
        let node = Node::merge(Node::leaf(1, 3), Node::leaf(2, 4));
        assert_eq!(node.weight(), 7);
        assert!(!node.is_leaf());
        assert_eq!(node.leaf_count(), 2);
        assert_eq!(node.depth(), 1);
    }

    #[test]
    fn frequencies_read_back_from_leaves() {
        let tree = HuffmanTree::from_text(&units("abracadabra")).unwrap();
        let frequencies = tree.frequencies();
        assert_eq!(frequencies.get(&u16::from(b'a')), Some(&5));
        assert_eq!(frequencies.get(&u16::from(b'b')), Some(&2));
        assert_eq!(frequencies.get(&u16::from(b'r')), Some(&2));
        assert_eq!(frequencies.get(&u16::from(b'c')), Some(&1));
        assert_eq!(frequencies.get(&u16::from(b'd')), Some(&1));
        assert_eq!(tree.leaf_count(), 5);
        assert_eq!(tree.weight(), 11);
    }

    #[test]
    fn draw_small_tree() {
        let tree = HuffmanTree::from_text(&units("aab")).unwrap();
        assert_eq!(tree.to_string(), "(3)\n|-'b'\n\\-'a'\n");
    }

    #[test]
    fn draw_nested_tree_with_escapes() {
        let tree = HuffmanTree::new(Node::merge(
            Node::leaf(u16::from(b'x'), 3),
            Node::merge(Node::leaf(u16::from(b'\n'), 1), Node::leaf(0x01, 1)),
        ));
        assert_eq!(
            tree.to_string(),
            "(5)\n|-'x'\n\\-(2)\n  |-'\\n'\n  \\-'\\u{0001}'\n"
        );
    }

    #[test]
    fn draw_lone_leaf() {
        let tree = HuffmanTree::new(Node::leaf(u16::from(b'z'), 4));
        assert_eq!(tree.to_string(), "'z'\n");
    }
}
