//! Top-N container implementations.
//!
//! - [`list::ListTopN`]: strict, sorted linked list; best for small `n`
//! - [`tree::TreeTopN`]: rank buckets; strict, bounded or lenient ties

pub mod list;
pub mod tree;
