// Copyright 2020 Xavier Gillard
//
// Permission is hereby granted, free of charge, to any person obtaining a copy of
// this software and associated documentation files (the "Software"), to deal in
// the Software without restriction, including without limitation the rights to
// use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of
// the Software, and to permit persons to whom the Software is furnished to do so,
// subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS
// FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR
// COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER
// IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN
// CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! This module provides a pool of slots that can be released individually.
//! It is the storage of the subproblems which live in the solver fringe for
//! the whole duration of a search (as opposed to the nodes of a decision
//! diagram, which are reclaimed in bulk after each compilation).

/// A slot in the pool: either occupied or a link in the free list
#[derive(Debug, Clone)]
enum Slot<T> {
    Occupied(T),
    Vacant(Option<usize>),
}

/// A pool of values addressed by stable slot indices. Removing a value puts
/// its slot on a free list so that it is reused by the next insertion.
#[derive(Debug, Clone)]
pub struct Slab<T> {
    slots: Vec<Slot<T>>,
    free: Option<usize>,
    len: usize,
}

impl <T> Default for Slab<T> {
    fn default() -> Self {
        Self { slots: vec![], free: None, len: 0 }
    }
}

impl <T> Slab<T> {
    /// Creates an empty pool
    pub fn new() -> Self {
        Self::default()
    }
    /// The number of occupied slots
    pub fn len(&self) -> usize {
        self.len
    }
    /// Returns true iff no slot is occupied
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
    /// The total number of slots (occupied or free) ever created
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
    /// Stores the given value and returns the slot where it has been placed
    pub fn insert(&mut self, value: T) -> usize {
        self.len += 1;
        if let Some(slot) = self.free {
            if let Slot::Vacant(next) = self.slots[slot] {
                self.free = next;
            }
            self.slots[slot] = Slot::Occupied(value);
            slot
        } else {
            self.slots.push(Slot::Occupied(value));
            self.slots.len() - 1
        }
    }
    /// Releases the given slot and returns the value it held (if any)
    pub fn remove(&mut self, slot: usize) -> Option<T> {
        match self.slots.get(slot) {
            Some(Slot::Occupied(_)) => {
                let old = std::mem::replace(&mut self.slots[slot], Slot::Vacant(self.free));
                self.free = Some(slot);
                self.len -= 1;
                match old {
                    Slot::Occupied(value) => Some(value),
                    Slot::Vacant(_) => None,
                }
            },
            _ => None
        }
    }
    /// Returns true iff the given slot holds a value
    pub fn contains(&self, slot: usize) -> bool {
        matches!(self.slots.get(slot), Some(Slot::Occupied(_)))
    }
    pub fn get(&self, slot: usize) -> Option<&T> {
        match self.slots.get(slot) {
            Some(Slot::Occupied(value)) => Some(value),
            _ => None
        }
    }
    pub fn get_mut(&mut self, slot: usize) -> Option<&mut T> {
        match self.slots.get_mut(slot) {
            Some(Slot::Occupied(value)) => Some(value),
            _ => None
        }
    }
    /// Releases all slots. The memory is retained.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free = None;
        self.len = 0;
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################

#[cfg(test)]
mod test_slab {
    use super::Slab;

    #[test]
    fn insert_returns_consecutive_slots_when_nothing_was_released() {
        let mut slab = Slab::new();
        assert_eq!(0, slab.insert("a"));
        assert_eq!(1, slab.insert("b"));
        assert_eq!(2, slab.insert("c"));
        assert_eq!(3, slab.len());
        assert_eq!(Some(&"b"), slab.get(1));
    }
    #[test]
    fn remove_releases_the_slot_and_returns_its_value() {
        let mut slab = Slab::new();
        let a = slab.insert(10);
        let b = slab.insert(20);
        assert_eq!(Some(10), slab.remove(a));
        assert!(!slab.contains(a));
        assert!(slab.contains(b));
        assert_eq!(1, slab.len());
        assert_eq!(None, slab.get(a));
    }
    #[test]
    fn removing_twice_the_same_slot_has_no_effect() {
        let mut slab = Slab::new();
        let a = slab.insert(10);
        assert_eq!(Some(10), slab.remove(a));
        assert_eq!(None, slab.remove(a));
        assert_eq!(None, slab.remove(42));
        assert_eq!(0, slab.len());
    }
    #[test]
    fn released_slots_are_reused_last_released_first() {
        let mut slab = Slab::new();
        let a = slab.insert(1);
        let b = slab.insert(2);
        let _ = slab.insert(3);
        slab.remove(a);
        slab.remove(b);
        assert_eq!(b, slab.insert(4));
        assert_eq!(a, slab.insert(5));
        assert_eq!(3, slab.insert(6));
        assert_eq!(4, slab.capacity());
    }
    #[test]
    fn get_mut_allows_modifying_the_value_in_place() {
        let mut slab = Slab::new();
        let a = slab.insert(vec![1]);
        if let Some(v) = slab.get_mut(a) {
            v.push(2);
        }
        assert_eq!(Some(&vec![1, 2]), slab.get(a));
    }
    #[test]
    fn clear_releases_everything() {
        let mut slab = Slab::new();
        slab.insert(1);
        slab.insert(2);
        slab.clear();
        assert!(slab.is_empty());
        assert_eq!(0, slab.insert(3));
    }
}
