//! Ordered chains of decoded records
//!
//! A [`Chain`] is a singly linked sequence stored in an arena: nodes live in
//! a slot vector and link to their successor by [`NodeId`]. Head and tail
//! are both tracked, so appending a whole file's worth of records is O(1)
//! per record. A node may only be released on its own once it is detached,
//! that is once it has no successor.

use crate::error::{DxfError, Result};
use std::fmt;

/// Identifier of one node in a [`Chain`]
///
/// Identifiers are never reused: after a node is released its id stays
/// invalid for the lifetime of the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Slot index of the node
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone)]
struct Node<T> {
    value: T,
    next: Option<NodeId>,
}

/// Singly linked, NULL-terminated sequence of records of one type
#[derive(Debug, Clone)]
pub struct Chain<T> {
    slots: Vec<Option<Node<T>>>,
    head: Option<NodeId>,
    tail: Option<NodeId>,
    len: usize,
}

impl<T> Chain<T> {
    /// Create an empty chain
    pub fn new() -> Self {
        Chain {
            slots: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// Append a value after the current tail
    pub fn append(&mut self, value: T) -> NodeId {
        let id = NodeId(self.slots.len());
        self.slots.push(Some(Node { value, next: None }));
        match self.tail {
            Some(tail) => {
                if let Some(node) = self.node_mut(tail) {
                    node.next = Some(id);
                }
            }
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        self.len += 1;
        id
    }

    /// Number of live nodes
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the chain is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// First node
    pub fn head(&self) -> Option<NodeId> {
        self.head
    }

    /// Last node
    pub fn tail(&self) -> Option<NodeId> {
        self.tail
    }

    /// Value stored in a node
    pub fn get(&self, id: NodeId) -> Option<&T> {
        self.node(id).map(|node| &node.value)
    }

    /// Mutable value stored in a node
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.node_mut(id).map(|node| &mut node.value)
    }

    /// Successor of a node
    pub fn next(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|node| node.next)
    }

    /// Iterate over the values from head to tail
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            chain: self,
            cursor: self.head,
        }
    }

    /// Iterate over node ids from head to tail
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.head, move |id| self.next(*id))
    }

    /// Release a single detached node and return its value.
    ///
    /// Fails with [`DxfError::ChainNotDetached`] if the node still has a
    /// successor, since releasing it would orphan the rest of the chain.
    pub fn free_one(&mut self, id: NodeId) -> Result<T> {
        match self.node(id) {
            None => return Err(DxfError::NoSuchNode(id)),
            Some(node) if node.next.is_some() => return Err(DxfError::ChainNotDetached(id)),
            Some(_) => {}
        }

        let predecessor = self.ids().find(|candidate| self.next(*candidate) == Some(id));
        match predecessor {
            Some(prev) => {
                if let Some(node) = self.node_mut(prev) {
                    node.next = None;
                }
                self.tail = Some(prev);
            }
            None => {
                self.head = None;
                self.tail = None;
            }
        }

        let node = self.slots[id.0].take().ok_or(DxfError::NoSuchNode(id))?;
        self.len -= 1;
        Ok(node.value)
    }

    /// Release every node, walking from head to tail.
    ///
    /// The successor link is saved before each node is released. Returns
    /// the number of nodes released.
    pub fn free_all(mut self) -> usize {
        let mut released = 0;
        let mut cursor = self.head.take();
        while let Some(id) = cursor {
            let node = self.slots.get_mut(id.0).and_then(Option::take);
            cursor = node.as_ref().and_then(|node| node.next);
            if node.is_some() {
                released += 1;
            }
            drop(node);
        }
        self.tail = None;
        self.len = 0;
        released
    }

    /// Remove every node. Ids issued before stay invalid.
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Move the values out in chain order
    pub fn into_vec(mut self) -> Vec<T> {
        let mut values = Vec::with_capacity(self.len);
        let mut cursor = self.head;
        while let Some(id) = cursor {
            match self.slots.get_mut(id.0).and_then(Option::take) {
                Some(node) => {
                    cursor = node.next;
                    values.push(node.value);
                }
                None => break,
            }
        }
        values
    }

    fn node(&self, id: NodeId) -> Option<&Node<T>> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node<T>> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }
}

impl<T> Default for Chain<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PartialEq> PartialEq for Chain<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

/// Iterator over the values of a [`Chain`]
pub struct Iter<'a, T> {
    chain: &'a Chain<T>,
    cursor: Option<NodeId>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor?;
        let node = self.chain.node(id)?;
        self.cursor = node.next;
        Some(&node.value)
    }
}

impl<'a, T> IntoIterator for &'a Chain<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> IntoIterator for Chain<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_vec().into_iter()
    }
}

impl<T> FromIterator<T> for Chain<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut chain = Chain::new();
        for value in iter {
            chain.append(value);
        }
        chain
    }
}

impl<T> Extend<T> for Chain<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.append(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_keeps_order() {
        let mut chain = Chain::new();
        let a = chain.append("a");
        let b = chain.append("b");
        chain.append("c");
        assert_eq!(chain.len(), 3);
        assert_eq!(chain.head(), Some(a));
        assert_eq!(chain.next(a), Some(b));
        assert_eq!(chain.iter().copied().collect::<Vec<_>>(), ["a", "b", "c"]);
    }

    #[test]
    fn test_free_one_requires_detached_node() {
        let mut chain: Chain<i32> = (1..=3).collect();
        let head = chain.head().unwrap();
        assert!(matches!(chain.free_one(head), Err(DxfError::ChainNotDetached(id)) if id == head));
        assert_eq!(chain.len(), 3);

        let tail = chain.tail().unwrap();
        assert_eq!(chain.free_one(tail).unwrap(), 3);
        assert_eq!(chain.len(), 2);
        assert_eq!(chain.next(chain.tail().unwrap()), None);
        assert!(matches!(chain.free_one(tail), Err(DxfError::NoSuchNode(_))));
    }

    #[test]
    fn test_free_one_last_node_empties_chain() {
        let mut chain = Chain::new();
        let only = chain.append(7);
        assert_eq!(chain.free_one(only).unwrap(), 7);
        assert!(chain.is_empty());
        assert_eq!(chain.head(), None);
        assert_eq!(chain.tail(), None);

        let again = chain.append(8);
        assert_eq!(chain.head(), Some(again));
    }

    #[test]
    fn test_free_all_counts_nodes() {
        let chain: Chain<String> = ["x", "y", "z"].iter().map(|s| s.to_string()).collect();
        assert_eq!(chain.free_all(), 3);
        assert_eq!(Chain::<u8>::new().free_all(), 0);
    }

    #[test]
    fn test_into_vec_after_partial_release() {
        let mut chain: Chain<i32> = (1..=4).collect();
        let tail = chain.tail().unwrap();
        chain.free_one(tail).unwrap();
        chain.append(9);
        assert_eq!(chain.into_vec(), vec![1, 2, 3, 9]);
    }
}
