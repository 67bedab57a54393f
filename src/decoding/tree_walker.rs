use crate::tree::{HuffmanTree, Node};

/// Turns data block bits back into characters by walking the tree.
///
/// Starting at the root every bit moves one level down, `1` to the right and
/// `0` to the left. A leaf is only emitted when the *next* bit arrives, after
/// which the walk restarts at the root. Once `expected` characters have been
/// emitted all further bits are padding and are ignored.
pub struct TreeWalker<'t> {
    root: &'t Node,
    current: &'t Node,
    emitted: u64,
    expected: u64,
}

impl<'t> TreeWalker<'t> {
    pub fn new(tree: &'t HuffmanTree, expected: u64) -> Self {
        TreeWalker {
            root: tree.root(),
            current: tree.root(),
            emitted: 0,
            expected,
        }
    }

    pub fn emitted(&self) -> u64 {
        self.emitted
    }

    pub fn is_finished(&self) -> bool {
        self.emitted >= self.expected
    }

    /// Feed the next bit. Returns the character completed before this bit, if any.
    pub fn next_bit(&mut self, bit: bool) -> Option<u16> {
        if self.is_finished() {
            return None;
        }
        let emitted = self.take_leaf();
        let current: &'t Node = self.current;
        if let Node::Internal { left, right, .. } = current {
            self.current = if bit { &**right } else { &**left };
        }
        emitted
    }

    /// Feed all bits of a byte, least significant first
    pub fn next_byte(&mut self, byte: u8, mut emit: impl FnMut(u16)) {
        let mut mask: u16 = 1;
        while mask != 256 && !self.is_finished() {
            if let Some(character) = self.next_bit(u16::from(byte) & mask != 0) {
                emit(character);
            }
            mask <<= 1;
        }
    }

    /// Emit the leaf reached by the very last bit of the data block, which has
    /// no following bit to trigger it
    pub fn finish(&mut self) -> Option<u16> {
        if self.is_finished() {
            return None;
        }
        self.take_leaf()
    }

    fn take_leaf(&mut self) -> Option<u16> {
        let current: &'t Node = self.current;
        match current {
            Node::Leaf { character, .. } => {
                self.current = self.root;
                self.emitted += 1;
                Some(*character)
            }
            Node::Internal { .. } => None,
        }
    }
}
