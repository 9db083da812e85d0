//! A red-black tree with a pluggable ordering function.
//!
//! This crate provides [`RbTree`], a self-balancing ordered binary search
//! tree. Insertion, deletion, and membership search run in O(log n); the
//! 2-coloring invariants bound the tree height at 2·log₂(n + 1) after every
//! mutation.
//!
//! Unlike `BTreeSet`, the ordering is injected: any total order expressible
//! as a "greater or equal" predicate over the stored values can drive the
//! tree, so values need not implement [`Ord`] themselves. Equal values are
//! kept as distinct nodes, making the tree a multiset.
//!
//! # Example
//!
//! ```
//! use carmine_tree::RbTree;
//!
//! let mut tree = RbTree::new();
//! tree.insert(3).insert(1).insert(2).insert(2);
//!
//! assert_eq!(tree.len(), 4);
//! assert!(tree.contains(&2));
//! assert_eq!(tree.min_value(), Some(&1));
//! assert_eq!(tree.in_order(), [&1, &2, &2, &3]);
//!
//! assert!(tree.remove(&2));
//! assert_eq!(tree.len(), 3);
//! ```
//!
//! Ordering values that are not `Ord` by a caller-supplied predicate:
//!
//! ```
//! use carmine_tree::RbTree;
//!
//! #[derive(Debug, PartialEq)]
//! struct Account { id: u32 }
//!
//! let mut tree = RbTree::with_ordering(|a: &Account, b: &Account| a.id >= b.id);
//! tree.insert(Account { id: 33 }).insert(Account { id: 1 });
//! assert_eq!(tree.min_value(), Some(&Account { id: 1 }));
//! ```
//!
//! # Implementation
//!
//! Nodes live in a slot arena and refer to each other by niche-optimized
//! integer handles, so the non-owning parent back-references need neither
//! reference counting nor `unsafe`. The balancing engine is the classic
//! red-black insert/delete fix-up pair built on two O(1) rotation
//! primitives; both are exercised against a model multiset by the
//! integration tests.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod raw;

pub mod rbtree;

pub use raw::Color;
pub use rbtree::{NodeRef, RbTree};
