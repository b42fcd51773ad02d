use std::cmp::Ordering;

use crate::{
    iter::{OwnedIter, RefIter},
    node::{remove_recurse, Node},
};

/// A self-balancing (AVL) binary search tree over ordered keys.
///
/// Keys are kept in search order: for every node, keys in its left subtree
/// compare less than the node's key, and keys in its right subtree compare
/// greater than or equal to it. After every mutation the tree restores the
/// AVL balance invariant (the subtree heights of each node differ by at
/// most 1), bounding the height - and therefore the cost of a lookup,
/// insertion, or removal - to O(log n) in the worst case.
///
/// Duplicate keys are retained, not merged: inserting an equal key places a
/// new node in the right subtree of the existing one.
#[derive(Debug, Clone)]
pub struct AvlTree<K>(Option<Box<Node<K>>>);

impl<K> Default for AvlTree<K> {
    fn default() -> Self {
        Self(Default::default())
    }
}

impl<K> AvlTree<K>
where
    K: Ord,
{
    /// Insert `key` into the tree, returning a handle to the newly created
    /// node.
    ///
    /// Insertion always succeeds. A key equal to one already in the tree is
    /// routed into the right subtree of the existing node - duplicates are
    /// retained, never rejected or merged.
    ///
    /// The returned handle borrows the tree; it is released by the next
    /// mutation.
    pub fn insert(&mut self, key: K) -> &Node<K>
    where
        K: Clone,
    {
        let probe = key.clone();

        match self.0 {
            Some(ref mut v) => v.insert(key),
            None => self.0 = Some(Box::new(Node::new(key))),
        }

        // Walk back down to the node created above.
        //
        // Descending right on key equality terminates at the most recently
        // inserted duplicate: a new duplicate is placed in-order last among
        // its equals, and rotations preserve the in-order sequence.
        let mut newest = None;
        let mut cur = self.0.as_deref();
        while let Some(n) = cur {
            cur = match probe.cmp(n.key()) {
                Ordering::Less => n.left(),
                Ordering::Equal => {
                    newest = Some(n);
                    n.right()
                }
                Ordering::Greater => n.right(),
            };
        }

        match newest {
            Some(v) => v,
            // The key was inserted immediately above.
            None => unreachable!(),
        }
    }

    /// Search for `key`, returning a handle to the first matching node
    /// found, or [`None`] if no node holds `key`.
    ///
    /// The walk descends from the root, moving left or right by key order,
    /// and completes in O(log n) time.
    pub fn find(&self, key: &K) -> Option<&Node<K>> {
        let mut cur = self.0.as_deref();

        while let Some(n) = cur {
            cur = match key.cmp(n.key()) {
                Ordering::Less => n.left(),
                Ordering::Equal => return Some(n),
                Ordering::Greater => n.right(),
            };
        }

        None
    }

    /// Returns true if at least one node holds `key`.
    pub fn contains(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Remove the first node found holding `key`, returning true iff such a
    /// node existed.
    ///
    /// Removing a key that is not in the tree is a no-op, leaving every
    /// node, key and cached height untouched.
    ///
    /// Removal never relinks a node with two children out of the tree: the
    /// node's key is overwritten with its in-order successor key and the
    /// successor is excised instead, so node identities survive removal.
    pub fn remove(&mut self, key: &K) -> bool
    where
        K: Clone,
    {
        remove_recurse(&mut self.0, key)
    }

    /// Returns a handle to the root node, if any - the entry point for the
    /// walks in the [`traverse`](crate::traverse) module.
    pub fn root(&self) -> Option<&Node<K>> {
        self.0.as_deref()
    }

    /// Returns true if the tree holds no keys.
    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    /// The height of the tree: 0 for both an empty tree and a tree of a
    /// single node.
    pub fn height(&self) -> u8 {
        self.0.as_deref().map(|v| v.height()).unwrap_or_default()
    }

    /// An iterator over the keys of the tree, in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &K> {
        self.0.iter().flat_map(|v| RefIter::new(v)).map(|v| v.key())
    }
}

impl<K> IntoIterator for AvlTree<K> {
    type Item = K;
    type IntoIter = OwnedIter<K>;

    /// Consume the tree, yielding each key in ascending order.
    fn into_iter(self) -> Self::IntoIter {
        OwnedIter::new(self.0)
    }
}
