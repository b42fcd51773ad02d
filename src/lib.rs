//! A height-balanced ([AVL]) binary search tree with visitor-based
//! traversals.
//!
//! An [`AvlTree`] keeps its keys in binary-search order and restores the
//! AVL height-balance invariant after every insertion and removal, so the
//! height of a tree holding `n` keys stays within O(log n) - lookups,
//! insertions and removals are logarithmic in the worst case, not merely on
//! average.
//!
//! Read-only walks live in the [`traverse`] module: four visitor-callback
//! traversal orders over any [`traverse::BinaryNode`] graph, oblivious to
//! the balancing performed by the tree that owns the nodes.
//!
//! ```
//! use keytree::{traverse, AvlTree};
//!
//! let mut t = AvlTree::default();
//!
//! // Inserting an ascending run re-balances the tree under the hood.
//! for key in [10, 20, 30] {
//!     t.insert(key);
//! }
//!
//! assert!(t.contains(&20));
//! assert_eq!(t.iter().copied().collect::<Vec<_>>(), vec![10, 20, 30]);
//!
//! // The rebalancing rotation left 20 at the root.
//! let mut level = Vec::new();
//! traverse::level_order(t.root(), |n| level.push(*n.key()));
//! assert_eq!(level, vec![20, 10, 30]);
//!
//! assert!(t.remove(&10));
//! assert!(!t.contains(&10));
//! ```
//!
//! [AVL]: https://en.wikipedia.org/wiki/AVL_tree

mod iter;
mod node;
pub mod traverse;
mod tree;


pub use iter::OwnedIter;
pub use node::Node;
pub use tree::AvlTree;
