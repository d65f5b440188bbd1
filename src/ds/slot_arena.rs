//! Slot arena with an intrusive free chain.
//!
//! Values live in a `Vec` of slots; a removed slot becomes `Vacant` and is
//! threaded onto a singly linked free chain, so `insert` reuses the most
//! recently freed index before growing the vector. [`SlotId`]s are plain
//! indices and stay valid until their slot is removed.
//!
//! ```text
//!   slots:  [ Occupied(a) | Vacant(→3) | Occupied(c) | Vacant(end) ]
//!   free:   1 ─► 3 ─► end
//! ```

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(pub(crate) usize);

#[derive(Debug, Clone)]
enum Slot<T> {
    Occupied(T),
    Vacant { next_free: Option<usize> },
}

#[derive(Debug, Clone)]
pub struct SlotArena<T> {
    slots: Vec<Slot<T>>,
    free_head: Option<usize>,
    len: usize,
}

impl<T> SlotArena<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_head: None,
            len: 0,
        }
    }

    pub fn insert(&mut self, value: T) -> SlotId {
        self.len += 1;
        match self.free_head {
            Some(idx) => {
                let old = std::mem::replace(&mut self.slots[idx], Slot::Occupied(value));
                if let Slot::Vacant { next_free } = old {
                    self.free_head = next_free;
                }
                SlotId(idx)
            },
            None => {
                self.slots.push(Slot::Occupied(value));
                SlotId(self.slots.len() - 1)
            },
        }
    }

    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        let slot = self.slots.get_mut(id.0)?;
        if !matches!(slot, Slot::Occupied(_)) {
            return None;
        }
        let vacant = Slot::Vacant {
            next_free: self.free_head,
        };
        match std::mem::replace(slot, vacant) {
            Slot::Occupied(value) => {
                self.free_head = Some(id.0);
                self.len -= 1;
                Some(value)
            },
            Slot::Vacant { .. } => None,
        }
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        match self.slots.get(id.0)? {
            Slot::Occupied(value) => Some(value),
            Slot::Vacant { .. } => None,
        }
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        match self.slots.get_mut(id.0)? {
            Slot::Occupied(value) => Some(value),
            Slot::Vacant { .. } => None,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drops every value; keeps the allocation.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free_head = None;
        self.len = 0;
    }
}

impl<T> Default for SlotArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_get_remove() {
        let mut arena = SlotArena::new();
        let a = arena.insert("a");
        let b = arena.insert("b");
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.get(a), Some(&"a"));
        assert_eq!(arena.get(b), Some(&"b"));

        assert_eq!(arena.remove(a), Some("a"));
        assert_eq!(arena.get(a), None);
        assert!(arena.get(a).is_none());
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn freed_slots_are_reused_most_recent_first() {
        let mut arena = SlotArena::new();
        let a = arena.insert(1);
        let b = arena.insert(2);
        let _c = arena.insert(3);
        arena.remove(a);
        arena.remove(b);

        let d = arena.insert(4);
        let e = arena.insert(5);
        assert_eq!(d, b);
        assert_eq!(e, a);
        assert_eq!(arena.len(), 3);

        let f = arena.insert(6);
        assert_eq!(f, SlotId(3));
    }

    #[test]
    fn double_remove_is_a_no_op() {
        let mut arena = SlotArena::new();
        let a = arena.insert(10);
        assert_eq!(arena.remove(a), Some(10));
        assert_eq!(arena.remove(a), None);
        assert_eq!(arena.len(), 0);
        assert_eq!(arena.remove(SlotId(99)), None);
    }

    #[test]
    fn get_mut_updates_in_place() {
        let mut arena = SlotArena::with_capacity(4);
        let a = arena.insert(1);
        if let Some(v) = arena.get_mut(a) {
            *v = 7;
        }
        assert_eq!(arena.get(a), Some(&7));
    }

    #[test]
    fn clear_resets_free_chain() {
        let mut arena = SlotArena::new();
        let a = arena.insert(1);
        arena.insert(2);
        arena.remove(a);
        arena.clear();
        assert!(arena.is_empty());
        let b = arena.insert(3);
        assert_eq!(b, SlotId(0));
    }
}
