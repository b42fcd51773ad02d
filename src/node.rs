use std::cmp::Ordering;

use crate::traverse::BinaryNode;

/// A single cell in the tree, holding a key, a cached subtree height, and
/// ownership of the left/right subtrees.
///
/// A shared reference to a [`Node`] is the handle type returned by the tree
/// lookups - it exposes read access to the key, the height, and the child
/// links, and nothing that could invalidate the tree invariants.
#[derive(Debug, Clone)]
pub struct Node<K> {
    /// Child node pointers.
    left: Option<Box<Node<K>>>,
    right: Option<Box<Node<K>>>,

    /// The node's AVL height.
    ///
    /// A leaf has a height of 0.
    ///
    /// A u8 holds a maximum value of 255, meaning it can represent the height
    /// of a balanced tree of up to 5.78*10⁷⁶ entries.
    height: u8,

    key: K,
}

impl<K> Node<K> {
    pub(crate) fn new(key: K) -> Self {
        Self {
            key,
            left: None,
            right: None,
            height: 0,
        }
    }

    /// Insert `key` into the subtree rooted at `self`, restoring the balance
    /// invariant on the way back up the insertion path.
    ///
    /// An equal key descends right, exactly as a strictly greater key does:
    /// duplicates are retained, never merged or rejected.
    pub(crate) fn insert(self: &mut Box<Self>, key: K)
    where
        K: Ord,
    {
        let child = match key.cmp(&self.key) {
            Ordering::Less => &mut self.left,
            Ordering::Equal | Ordering::Greater => &mut self.right,
        };

        match child {
            Some(v) => v.insert(key),
            None => {
                // Insert the key as a new immediate descendent of self.
                //
                // Attaching a leaf directly cannot skew the tree past the
                // balance invariant as, at most, it creates an absolute
                // height difference of 1 in this direction (from balanced,
                // or slightly skewed in the opposite direction).
                //
                // Update this node's height and skip the rebalancing checks.
                *child = Some(Box::new(Self::new(key)));
                update_height(self);
                return;
            }
        }

        // The child subtree may have grown by one level; recompute this
        // node's height and correct the skew if the absolute difference in
        // height between branches is now > 1.
        rebalance(self);
    }

    /// Returns the key held by this node.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Returns this node's cached AVL height - 0 for a leaf.
    pub fn height(&self) -> u8 {
        self.height
    }

    /// Returns the left child, if any.
    pub fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    /// Returns the right child, if any.
    pub fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    pub(crate) fn left_mut(&mut self) -> Option<&mut Box<Self>> {
        self.left.as_mut()
    }

    pub(crate) fn right_mut(&mut self) -> Option<&mut Box<Self>> {
        self.right.as_mut()
    }

    /// Remove the left child, if any.
    pub(crate) fn take_left(&mut self) -> Option<Box<Self>> {
        self.left.take()
    }

    /// Remove the right child, if any.
    pub(crate) fn take_right(&mut self) -> Option<Box<Self>> {
        self.right.take()
    }

    /// Explode this [`Node`] into the key it contains.
    pub(crate) fn into_key(self) -> K {
        self.key
    }
}

impl<K> BinaryNode for Node<K> {
    fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }
}

/// Recurse into `link`, removing the first node holding `key` from the
/// subtree it roots, and rebalancing every node on the removal path during
/// the unwind.
///
/// Returns false, leaving the subtree untouched, if no node holds `key`.
///
/// A node with two children is not unlinked: its key is overwritten with the
/// in-order successor key, and the successor's key is then removed from the
/// right subtree instead. A node observed before the removal therefore
/// remains the same node afterwards - only key contents move.
pub(super) fn remove_recurse<K>(link: &mut Option<Box<Node<K>>>, key: &K) -> bool
where
    K: Ord + Clone,
{
    let node = match link {
        Some(v) => v,
        None => return false,
    };

    match key.cmp(&node.key) {
        Ordering::Less => {
            if !remove_recurse(&mut node.left, key) {
                return false;
            }
        }
        Ordering::Greater => {
            if !remove_recurse(&mut node.right, key) {
                return false;
            }
        }
        Ordering::Equal if node.left.is_some() && node.right.is_some() => {
            // This node holds the key to be removed and has two children.
            //
            // Overwrite the key with the in-order successor key (the
            // minimum of the right subtree) and remove that key from the
            // right subtree, shifting the removal to a node with at most
            // one child.
            let successor = match node.right.as_deref() {
                Some(v) => subtree_min(v).clone(),
                None => unreachable!(),
            };
            node.key = successor;

            let removed = remove_recurse(&mut node.right, &node.key);

            // Invariant: the right subtree always contains the successor.
            debug_assert!(removed);
        }
        Ordering::Equal => {
            // At most one child: the surviving child subtree (if any)
            // replaces this node in the parent link.
            //
            // The child was a valid, balanced subtree before the unlink and
            // is not modified by it, so no rebalancing is needed at this
            // level.
            let old = match link.take() {
                Some(v) => v,
                None => unreachable!(),
            };
            *link = old.left.or(old.right);
            return true;
        }
    }

    // A node was removed from a subtree below self, which may have shrunk
    // past the balance invariant at this level.
    rebalance(node);

    true
}

/// Returns the minimum (left-most) key of the subtree rooted at `n`.
fn subtree_min<K>(n: &Node<K>) -> &K {
    let mut cur = n;
    while let Some(v) = cur.left() {
        cur = v;
    }
    &cur.key
}

fn update_height<K>(n: &mut Node<K>) {
    n.height = n
        .left()
        .map(|v| v.height() + 1)
        .max(n.right().map(|v| v.height() + 1))
        .unwrap_or_default()
}

/// Compute the "balance factor" of the subtree rooted at `n`.
///
/// Returns the subtree height skew / magnitude, which is a positive number
/// when left heavy, and a negative number when right heavy. An empty child
/// counts as height -1, one level below a leaf.
fn balance<K>(n: &Node<K>) -> i8 {
    // Correctness: the height is a u8, the maximal value of which fits in an
    // i16 without truncation or sign inversion.
    let left = n.left().map(|v| v.height() as i16).unwrap_or(-1);
    let right = n.right().map(|v| v.height() as i16).unwrap_or(-1);
    (left - right) as i8
}

/// Restore the balance invariant of the (possibly skewed) subtree rooted at
/// `v`, recomputing its height first.
///
/// This is the single rebalancing step shared by the insertion and removal
/// unwinds; callers apply it to every node along the mutated path.
fn rebalance<K>(v: &mut Box<Node<K>>) {
    // Recompute the height of this node before evaluating the skew.
    update_height(v);

    match balance(v) {
        // Left-heavy
        (2..) if v.left().map(balance).unwrap_or_default() >= 0 => {
            rotate_right(v);
        }
        (2..) => {
            v.left_mut().map(rotate_left);
            rotate_right(v);
        }
        // Right-heavy
        (..=-2) if v.right().map(balance).unwrap_or_default() <= 0 => {
            rotate_left(v);
        }
        (..=-2) => {
            v.right_mut().map(rotate_right);
            rotate_left(v);
        }
        (-1..=1) => { /* The tree is well balanced */ }
    }

    // Invariant: the absolute difference between tree heights ("balance
    // factor") cannot exceed 1 once rebalanced.
    debug_assert!(balance(v).abs() <= 1);
}

/// Left rotate the given subtree rooted at `x` around the pivot point `P`.
///
/// ```text
///
///      x
///     / \                               P
///    1   P         Rotate Left        /   \
///       / \      --------------->    x     y
///      2   y                        / \   / \
///         / \                      1   2 3   4
///        3   4
/// ```
///
/// Rotating a node with no right child is a no-op: the balance-factor
/// gating in [`rebalance`] never requests it, and a malformed request must
/// not corrupt the tree.
fn rotate_left<K>(x: &mut Box<Node<K>>) {
    let mut p = match x.right.take() {
        Some(v) => v,
        None => return,
    };
    std::mem::swap(x, &mut p);

    p.right = x.left.take();
    update_height(&mut p);

    x.left = Some(p);
    update_height(x);
}

/// Right rotate the given subtree rooted at `y` around the pivot point `P`.
///
/// ```text
///          y
///         / \                           P
///        P   4     Rotate Right       /   \
///       / \      --------------->    x     y
///      x   3                        / \   / \
///     / \                          1   2 3   4
///    1   2
/// ```
///
/// Rotating a node with no left child is a no-op, exactly as for
/// [`rotate_left`].
fn rotate_right<K>(y: &mut Box<Node<K>>) {
    let mut p = match y.left.take() {
        Some(v) => v,
        None => return,
    };
    std::mem::swap(y, &mut p);

    p.left = y.right.take();
    update_height(&mut p);

    y.right = Some(p);
    update_height(y);
}
