//! This crate provides a queue of strings built on a sentinel-terminated
//! cyclic doubly-linked list, the [`Ring`], together with algorithms that
//! rearrange the ring in place by relinking its nodes.
//!
//! The [`Ring`] allows inserting, removing and moving elements at a known
//! position in constant time. Sorting, merging, reversing, filtering and
//! shuffling never move or clone an element: they only rewrite `next` and
//! `prev` pointers.
//!
//! Here is a quick example showing how the queue works.
//!
//! ```
//! use ring_queue::Queue;
//!
//! let mut queue = Queue::new();
//! for value in ["dog", "cat", "ant", "cat"] {
//!     queue.insert_tail(value)?;
//! }
//!
//! queue.sort(false);
//! assert_eq!(queue.values(), ["ant", "cat", "cat", "dog"]);
//!
//! queue.delete_dup(); // drops every copy of a repeated value
//! assert_eq!(queue.values(), ["ant", "dog"]);
//!
//! queue.reverse();
//! assert_eq!(queue.remove_head(None).map(|e| e.into_value()), Some("dog".to_owned()));
//! # Ok::<(), ring_queue::QueueError>(())
//! ```
//!
//! # Memory Layout
//!
//! The memory layout of the ring is like the following graph:
//! ```text
//!          ┌─────────────────────────────────────────────────────────────────────┐
//!          ↓                                                     (Ghost) Node N  │
//!    ╔═══════════╗           ╔═══════════╗                        ┌───────────┐  │
//!    ║   next    ║ ────────→ ║   next    ║ ────────→ ┄┄ ────────→ │   next    │ ─┘
//!    ╟───────────╢           ╟───────────╢     Node 2, 3, ...     ├───────────┤
//! ┌─ ║   prev    ║ ←──────── ║   prev    ║ ←──────── ┄┄ ←──────── │   prev    │
//! │  ╟───────────╢           ╟───────────╢                        ├───────────┤
//! │  ║ element T ║           ║ element T ║                        ┊No element ┊
//! │  ╚═══════════╝           ╚═══════════╝                        └╌╌╌╌╌╌╌╌╌╌╌┘
//! │      Node 0                  Node 1                               ↑   ↑
//! └───────────────────────────────────────────────────────────────────┘   │
//! ╔═══════════╗                                                           │
//! ║   ghost   ║ ──────────────────────────────────────────────────────────┘
//! ╚═══════════╝
//!     Ring
//! ```
//! The `Ring` only holds the pointer `ghost`. Its length is not stored, and
//! [`Ring::len`] walks the ring.
//!
//! An empty ring is a ghost node whose `next` and `prev` point to itself. As
//! elements are inserted, `ghost.next` points to the first element and
//! `ghost.prev` to the last one.
//!
//! In a ring with length *n*, the nodes are indexed by 0, 1, ..., *n* - 1, and
//! the ghost node is indexed by *n*. The "middle" node used by
//! [`Ring::remove_middle`] and by the merge sort is the one at index
//! `floor(n / 2)`.
//!
//! # Algorithms
//!
//! - [`Ring::swap_pairs`], [`Ring::reverse`] and [`Ring::reverse_groups`]:
//!   structural transforms in *O*(*n*) time;
//! - [`Ring::merge_by`] and [`Ring::sort_by`]: a stable two-way merge, and a
//!   recursive merge sort that splits the ring at its middle node;
//! - [`Ring::retain_unique_by`] and [`Ring::retain_sorted_by`]: duplicate and
//!   monotonic filtering;
//! - [`Ring::shuffle`]: a uniform permutation driven by any [`Uniform`] source.
//!
//! A [`Chain`] owns many queues and merges all of them into the first one with
//! [`Chain::merge`].
//!
//! # Features
//!
//! - `rand` (default): implements [`Uniform`] for every `rand::Rng`;
//! - `extended_random_tests`: runs the statistical tests with more trials.

#[doc(inline)]
pub use error::QueueError;
#[doc(inline)]
pub use queue::{merge_all, Chain, Element, Queue, QueueContext, QueueId};
#[doc(inline)]
pub use ring::iterator::{IntoIter, Iter, IterMut};
#[doc(inline)]
pub use ring::{Ring, Uniform};

pub mod error;
pub mod queue;
pub mod ring;
