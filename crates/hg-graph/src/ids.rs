use hg_core::{EdgeId, NodeId};

/// Issues identifiers from the counter shared by nodes and edges.
///
/// The counter only moves forward, so an identifier released by a deletion is
/// never handed out again by the same store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    /// Creates an allocator whose first identifier is zero.
    pub const fn new() -> Self {
        Self { next: 0 }
    }

    /// Creates an allocator that continues from a restored counter position.
    pub const fn resume_from(next: u64) -> Self {
        Self { next }
    }

    /// Returns the identifier the next allocation will use.
    pub fn peek(&self) -> u64 {
        self.next
    }

    /// Allocates a node identifier.
    pub fn next_node(&mut self) -> NodeId {
        NodeId::from_raw(self.bump())
    }

    /// Allocates an edge identifier.
    pub fn next_edge(&mut self) -> EdgeId {
        EdgeId::from_raw(self.bump())
    }

    fn bump(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// Removes the first occurrence of `value`, returning whether one was found.
pub(crate) fn remove_first<T: PartialEq>(list: &mut Vec<T>, value: &T) -> bool {
    match list.iter().position(|entry| entry == value) {
        Some(index) => {
            list.remove(index);
            true
        }
        None => false,
    }
}
