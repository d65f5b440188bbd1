//! Descending doubly linked list backed by [`SlotArena`].
//!
//! Nodes live in a `SlotArena` and are linked by `SlotId`, so unlinking a
//! node never shifts its neighbours. The list is kept in **non-increasing**
//! order from head to tail; equal elements keep their arrival order because
//! [`insert_desc`](SortedList::insert_desc) places a new element *after*
//! every element that compares greater than or equal to it.
//!
//! ## Architecture
//!
//! ```text
//!   arena (SlotArena<Node<T>>)
//!   ┌────────┬──────────────────────────────────────────────┐
//!   │ SlotId │ Node { value, prev, next }                   │
//!   ├────────┼──────────────────────────────────────────────┤
//!   │ id_0   │ { value: 9, prev: None,       next: id_2 }   │
//!   │ id_1   │ { value: 4, prev: Some(id_2), next: None }   │
//!   │ id_2   │ { value: 7, prev: Some(id_0), next: id_1 }   │
//!   └────────┴──────────────────────────────────────────────┘
//!
//!   head ─► [9] ◄──► [7] ◄──► [4] ◄── tail (minimum)
//! ```
//!
//! ## Performance
//! - `insert_desc`: O(k), k = elements strictly below the new one (tail scan)
//! - `pop_back` / `remove`: O(1)
//! - `find` / `nth`: O(n)
//! - `iter`: O(n), double-ended
//!
//! `check_invariants()` is available in debug/test builds.

use std::cmp::Ordering;
use std::iter::FusedIterator;

use crate::ds::slot_arena::{SlotArena, SlotId};
#[cfg(any(test, debug_assertions))]
use crate::error::InvariantError;

#[derive(Debug, Clone)]
struct Node<T> {
    value: T,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

/// Arena-backed linked list kept in descending order, ties oldest-first.
#[derive(Debug, Clone)]
pub struct SortedList<T> {
    arena: SlotArena<Node<T>>,
    head: Option<SlotId>,
    tail: Option<SlotId>,
}

impl<T> SortedList<T> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty list with reserved node capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: SlotArena::with_capacity(capacity),
            head: None,
            tail: None,
        }
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Greatest element.
    pub fn front(&self) -> Option<&T> {
        self.head.and_then(|id| self.get(id))
    }

    /// Smallest element; among ties, the most recently inserted one.
    pub fn back(&self) -> Option<&T> {
        self.tail.and_then(|id| self.get(id))
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.arena.get(id).map(|node| &node.value)
    }

    /// Element at descending rank `index`.
    pub fn nth(&self, index: usize) -> Option<&T> {
        self.iter().nth(index)
    }

    /// First node, from the head, whose value satisfies `pred`.
    pub fn find(&self, mut pred: impl FnMut(&T) -> bool) -> Option<SlotId> {
        let mut current = self.head;
        while let Some(id) = current {
            let node = self.arena.get(id)?;
            if pred(&node.value) {
                return Some(id);
            }
            current = node.next;
        }
        None
    }

    /// Returns a head-to-tail iterator.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            front: self.head,
            back: self.tail,
            remaining: self.len(),
        }
    }

    /// Removes and returns the tail value.
    pub fn pop_back(&mut self) -> Option<T> {
        let id = self.tail?;
        self.remove(id)
    }

    /// Unlinks the node `id` and returns its value.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        let node = self.arena.remove(id)?;
        match node.prev {
            Some(prev) => {
                if let Some(prev_node) = self.arena.get_mut(prev) {
                    prev_node.next = node.next;
                }
            },
            None => self.head = node.next,
        }
        match node.next {
            Some(next) => {
                if let Some(next_node) = self.arena.get_mut(next) {
                    next_node.prev = node.prev;
                }
            },
            None => self.tail = node.prev,
        }
        Some(node.value)
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.head = None;
        self.tail = None;
    }

    fn push_front(&mut self, value: T) -> SlotId {
        let id = self.arena.insert(Node {
            value,
            prev: None,
            next: self.head,
        });
        match self.head {
            Some(old_head) => {
                if let Some(node) = self.arena.get_mut(old_head) {
                    node.prev = Some(id);
                }
            },
            None => self.tail = Some(id),
        }
        self.head = Some(id);
        id
    }

    fn insert_after(&mut self, anchor: SlotId, value: T) -> SlotId {
        let next = self.arena.get(anchor).and_then(|node| node.next);
        let id = self.arena.insert(Node {
            value,
            prev: Some(anchor),
            next,
        });
        if let Some(node) = self.arena.get_mut(anchor) {
            node.next = Some(id);
        }
        match next {
            Some(next) => {
                if let Some(node) = self.arena.get_mut(next) {
                    node.prev = Some(id);
                }
            },
            None => self.tail = Some(id),
        }
        id
    }
}

impl<T: Ord> SortedList<T> {
    /// Inserts `value` after the last element that compares `>=` to it.
    ///
    /// Scans from the tail. Returns the new node and the number of elements
    /// stepped over.
    pub fn insert_desc(&mut self, value: T) -> (SlotId, usize) {
        let mut steps = 0;
        let mut anchor = self.tail;
        while let Some(id) = anchor {
            let node = match self.arena.get(id) {
                Some(node) => node,
                None => break,
            };
            if node.value.cmp(&value) != Ordering::Less {
                break;
            }
            steps += 1;
            anchor = node.prev;
        }
        let id = match anchor {
            Some(anchor) => self.insert_after(anchor, value),
            None => self.push_front(value),
        };
        (id, steps)
    }

    /// Validates links, length, and descending order.
    #[cfg(any(test, debug_assertions))]
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let mut count = 0usize;
        let mut prev: Option<SlotId> = None;
        let mut current = self.head;
        while let Some(id) = current {
            let node = self
                .arena
                .get(id)
                .ok_or_else(|| InvariantError::new(format!("stale SlotId {:?} in chain", id)))?;
            if node.prev != prev {
                return Err(InvariantError::new(format!(
                    "node {:?} prev {:?} != expected {:?}",
                    id, node.prev, prev
                )));
            }
            if let Some(prev_value) = prev.and_then(|p| self.get(p)) {
                if prev_value < &node.value {
                    return Err(InvariantError::new(format!(
                        "node {:?} is greater than its predecessor",
                        id
                    )));
                }
            }
            count += 1;
            if count > self.len() {
                return Err(InvariantError::new("cycle detected in chain"));
            }
            prev = Some(id);
            current = node.next;
        }
        if self.tail != prev {
            return Err(InvariantError::new(format!(
                "tail {:?} != last reachable node {:?}",
                self.tail, prev
            )));
        }
        if count != self.len() {
            return Err(InvariantError::new(format!(
                "counted {} nodes but arena holds {}",
                count,
                self.len()
            )));
        }
        Ok(())
    }
}

impl<T> Default for SortedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Double-ended iterator over a [`SortedList`], head (greatest) first.
pub struct Iter<'a, T> {
    list: &'a SortedList<T>,
    front: Option<SlotId>,
    back: Option<SlotId>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.list.arena.get(self.front?)?;
        self.front = node.next;
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let list = self.list;
        let node = list.arena.get(self.back?)?;
        self.back = node.prev;
        self.remaining -= 1;
        Some(&node.value)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            list: self.list,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}
