//! Greedy construction of a Huffman tree from character frequencies.

use alloc::collections::{BTreeMap, BinaryHeap};
use core::cmp::{Ordering, Reverse};

use super::{HuffmanTree, Node};

/// Occurrence count per character. Ordered so that building is reproducible.
pub type FrequencyTable = BTreeMap<u16, u64>;

/// Count how often each code unit occurs in `text`
pub fn count_frequencies(text: &[u16]) -> FrequencyTable {
    let mut frequencies = FrequencyTable::new();
    for &character in text {
        *frequencies.entry(character).or_insert(0) += 1;
    }
    frequencies
}

/// A node waiting in the priority queue.
///
/// Ordered by weight first. Equal weights are ordered by the moment the entry
/// was queued, which keeps the merge order independent of the heap internals.
struct QueueEntry {
    weight: u64,
    sequence: usize,
    node: Node,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.weight.cmp(&other.weight) {
            Ordering::Equal => self.sequence.cmp(&other.sequence),
            other => other,
        }
    }
}

/// Build a Huffman tree by repeatedly merging the two lightest nodes.
///
/// Leaves are queued in ascending character order. Of the two nodes taken
/// from the queue the first becomes the left child, the second the right one.
/// A table with a single character yields a tree whose root is that leaf.
///
/// Returns `None` for an empty table.
pub fn build_tree(frequencies: &FrequencyTable) -> Option<HuffmanTree> {
    let mut queue = BinaryHeap::with_capacity(frequencies.len());
    let mut sequence = 0;
    for (&character, &weight) in frequencies {
        queue.push(Reverse(QueueEntry {
            weight,
            sequence,
            node: Node::leaf(character, weight),
        }));
        sequence += 1;
    }

    while queue.len() > 1 {
        let Reverse(left) = queue.pop()?;
        let Reverse(right) = queue.pop()?;
        let node = Node::merge(left.node, right.node);
        queue.push(Reverse(QueueEntry {
            weight: node.weight(),
            sequence,
            node,
        }));
        sequence += 1;
    }

    let Reverse(root) = queue.pop()?;
    vdebug!(
        "built huffman tree: {} leaves, depth {}, weight {}",
        root.node.leaf_count(),
        root.node.depth(),
        root.weight
    );
    Some(HuffmanTree::new(root.node))
}
