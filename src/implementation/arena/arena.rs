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

//! This module provides the implementation of a segmented bump allocator 
//! that supports O(1) marking and bulk rollback to a mark.

use std::ops::{Index, IndexMut, Range};

/// The default number of slots in one segment of an arena
pub const DEFAULT_SEGMENT_SIZE: usize = 4096;

/// An opaque token remembering the position of the bump pointer of an arena
/// at a given time. Rolling an arena back to a mark invalidates everything
/// that has been allocated since the mark was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Mark {
    segment: usize,
    offset: usize,
}

/// A segmented bump allocator of `T` slots. 
///
/// Slots are addressed by dense indices (`segment * segment_size + offset`).
/// The storage of a segment is allocated once and never moves: a segment is 
/// only ever released when the arena itself is dropped. This is why rolling 
/// back the arena to a mark and allocating the same number of slots again 
/// reuses exactly the same addresses.
///
/// # Example
/// ```
/// # use ddbb::Arena;
/// let mut arena = Arena::with_segment_size(4);
/// let a = arena.alloc("a");
/// let mark = arena.mark();
/// let b = arena.alloc("b");
/// arena.clear(mark);
/// assert_eq!(Some(&"a"), arena.get(a));
/// assert_eq!(None, arena.get(b)); // b has been discarded by the rollback
/// ```
#[derive(Debug)]
pub struct Arena<T> {
    /// The segments composing the arena. Each of them has a capacity of
    /// exactly `segment_size` slots.
    segments: Vec<Vec<T>>,
    /// The number of slots in each segment
    segment_size: usize,
    /// The index of the segment currently receiving allocations
    current: usize,
    /// The number of live slots
    len: usize,
}

impl <T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl <T> Arena<T> {
    /// Creates an arena with the default segment size
    pub fn new() -> Self {
        Self::with_segment_size(DEFAULT_SEGMENT_SIZE)
    }
    /// Creates an arena whose segments hold `segment_size` slots each
    pub fn with_segment_size(segment_size: usize) -> Self {
        assert!(segment_size > 0, "an arena segment must hold at least one slot");
        Self {
            segments: vec![Vec::with_capacity(segment_size)],
            segment_size,
            current: 0,
            len: 0,
        }
    }
    /// The number of slots in one segment
    pub fn segment_size(&self) -> usize {
        self.segment_size
    }
    /// The number of segments that have been linked so far (including those
    /// which are currently unused because of a rollback)
    pub fn nb_segments(&self) -> usize {
        self.segments.len()
    }
    /// The number of live slots
    pub fn len(&self) -> usize {
        self.len
    }
    /// Returns true iff no slot is live
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bump-allocates one slot holding the given value and returns its index.
    pub fn alloc(&mut self, value: T) -> usize {
        if self.segments[self.current].len() == self.segment_size {
            self.link_next_segment();
        }
        let offset = self.segments[self.current].len();
        self.segments[self.current].push(value);
        self.len += 1;
        self.current * self.segment_size + offset
    }
    /// Bump-allocates a block of contiguous slots holding the given values and
    /// returns the range of their indices. A block never straddles two 
    /// segments: when the current segment cannot hold it, the remainder of 
    /// that segment is left unused.
    ///
    /// # Panics
    /// When the block is larger than one segment.
    pub fn alloc_iter<I>(&mut self, values: I) -> Range<usize> 
    where I: IntoIterator<Item = T>, I::IntoIter: ExactSizeIterator
    {
        let values = values.into_iter();
        let n = values.len();
        assert!(n <= self.segment_size, "cannot allocate a block of {n} slots in segments of {}", self.segment_size);
        if self.segments[self.current].len() + n > self.segment_size {
            self.link_next_segment();
        }
        let start = self.current * self.segment_size + self.segments[self.current].len();
        self.segments[self.current].extend(values);
        self.len += n;
        start..start + n
    }
    /// Returns a token remembering the current position of the bump pointer
    pub fn mark(&self) -> Mark {
        Mark { segment: self.current, offset: self.segments[self.current].len() }
    }
    /// Rolls the arena back to the given mark. All slots allocated after the
    /// mark was taken are dropped at once. No segment is released.
    ///
    /// # Panics
    /// When the mark lies beyond the current position of the bump pointer 
    /// (marks must be rolled back to in the reverse order they were taken).
    pub fn clear(&mut self, mark: Mark) {
        assert!(mark <= self.mark(), "cannot roll back to {mark:?}: it lies beyond {:?}", self.mark());
        for segment in self.segments[mark.segment + 1..=self.current].iter_mut() {
            self.len -= segment.len();
            segment.clear();
        }
        let segment = &mut self.segments[mark.segment];
        self.len -= segment.len() - mark.offset;
        segment.truncate(mark.offset);
        self.current = mark.segment;
    }
    /// Rolls the arena back to its very beginning
    pub fn reset(&mut self) {
        self.clear(Mark { segment: 0, offset: 0 })
    }
    /// Returns the slot at the given index, or None when that index was never
    /// allocated or has been invalidated by a rollback.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.segments.get(index / self.segment_size)
            .and_then(|s| s.get(index % self.segment_size))
    }
    /// Mutable version of `get`
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        let size = self.segment_size;
        self.segments.get_mut(index / size)
            .and_then(|s| s.get_mut(index % size))
    }
    /// Iterates over all live slots (in allocation order) along with their index
    pub fn iter(&self) -> impl Iterator<Item = (usize, &T)> + '_ {
        let size = self.segment_size;
        self.segments[..=self.current].iter().enumerate()
            .flat_map(move |(s, seg)| seg.iter().enumerate().map(move |(o, x)| (s * size + o, x)))
    }

    fn link_next_segment(&mut self) {
        self.current += 1;
        if self.current == self.segments.len() {
            self.segments.push(Vec::with_capacity(self.segment_size));
        }
    }
}

impl <T> Index<usize> for Arena<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Some(x) => x,
            None => panic!("slot {index} does not exist in the current generation of the arena"),
        }
    }
}
impl <T> IndexMut<usize> for Arena<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        match self.get_mut(index) {
            Some(x) => x,
            None => panic!("slot {index} does not exist in the current generation of the arena"),
        }
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################

#[cfg(test)]
mod test_arena {
    use super::Arena;

    #[test]
    fn by_default_it_is_empty() {
        let arena = Arena::<usize>::default();
        assert!(arena.is_empty());
        assert_eq!(0, arena.len());
        assert_eq!(1, arena.nb_segments());
    }
    #[test]
    fn indices_are_dense_and_monotonic() {
        let mut arena = Arena::with_segment_size(3);
        let ids = (0..10).map(|i| arena.alloc(i)).collect::<Vec<_>>();
        assert_eq!((0..10).collect::<Vec<_>>(), ids);
        assert_eq!(4, arena.nb_segments());
        for i in 0..10 {
            assert_eq!(i, arena[i]);
        }
    }
    #[test]
    fn a_new_segment_is_linked_when_the_current_one_is_exhausted() {
        let mut arena = Arena::with_segment_size(2);
        arena.alloc(1);
        arena.alloc(2);
        assert_eq!(1, arena.nb_segments());
        arena.alloc(3);
        assert_eq!(2, arena.nb_segments());
    }
    #[test]
    fn rollback_invalidates_everything_allocated_after_the_mark() {
        let mut arena = Arena::with_segment_size(2);
        let a = arena.alloc('a');
        let mark = arena.mark();
        let b = arena.alloc('b');
        let c = arena.alloc('c');
        let d = arena.alloc('d');
        assert_eq!(4, arena.len());

        arena.clear(mark);
        assert_eq!(1, arena.len());
        assert_eq!(Some(&'a'), arena.get(a));
        assert_eq!(None, arena.get(b));
        assert_eq!(None, arena.get(c));
        assert_eq!(None, arena.get(d));
        // segments are retained
        assert_eq!(2, arena.nb_segments());
    }
    #[test]
    fn rollback_then_allocation_reuses_the_same_addresses() {
        let mut arena = Arena::<usize>::with_segment_size(8);
        for i in 0..5 {
            arena.alloc(i);
        }
        let mark = arena.mark();
        let first = (0..12).map(|i| arena.alloc(i)).collect::<Vec<_>>();
        let first_addr = first.iter().map(|i| &arena[*i] as *const usize).collect::<Vec<_>>();

        arena.clear(mark);
        let second = (0..12).map(|i| arena.alloc(100 + i)).collect::<Vec<_>>();
        let second_addr = second.iter().map(|i| &arena[*i] as *const usize).collect::<Vec<_>>();

        assert_eq!(first, second);
        assert_eq!(first_addr, second_addr);
        assert_eq!(3, arena.nb_segments());
    }
    #[test]
    fn blocks_never_straddle_two_segments() {
        let mut arena = Arena::with_segment_size(4);
        arena.alloc(0);
        arena.alloc(0);
        let block = arena.alloc_iter(vec![1, 2, 3]);
        assert_eq!(4..7, block);
        assert_eq!(5, arena.len());
        assert_eq!(None, arena.get(2));
        assert_eq!(vec![1, 2, 3], block.map(|i| arena[i]).collect::<Vec<_>>());
    }
    #[test]
    fn block_rollback_reuses_the_same_addresses() {
        let mut arena = Arena::with_segment_size(16);
        arena.alloc_iter(0..3);
        let mark = arena.mark();
        let block = arena.alloc_iter(0..10);
        let addr = &arena[block.start] as *const i32;
        arena.clear(mark);
        let again = arena.alloc_iter(10..20);
        assert_eq!(block, again);
        assert_eq!(addr, &arena[again.start] as *const i32);
    }
    #[test]
    #[should_panic]
    fn a_block_larger_than_a_segment_is_a_programming_error() {
        let mut arena = Arena::with_segment_size(4);
        arena.alloc_iter(0..5);
    }
    #[test]
    #[should_panic]
    fn rolling_back_out_of_order_is_a_programming_error() {
        let mut arena = Arena::with_segment_size(4);
        let early = arena.mark();
        arena.alloc(1);
        let late = arena.mark();
        arena.clear(early);
        arena.clear(late);
    }
    #[test]
    #[should_panic]
    fn indexing_an_invalidated_slot_is_a_programming_error() {
        let mut arena = Arena::with_segment_size(4);
        let mark = arena.mark();
        let x = arena.alloc(1);
        arena.clear(mark);
        let _ = arena[x];
    }
    #[test]
    fn reset_discards_everything() {
        let mut arena = Arena::with_segment_size(2);
        for i in 0..7 {
            arena.alloc(i);
        }
        arena.reset();
        assert!(arena.is_empty());
        assert_eq!(0, arena.alloc(42));
    }
    #[test]
    fn iter_visits_the_live_slots_in_allocation_order() {
        let mut arena = Arena::with_segment_size(2);
        for i in 0..5 {
            arena.alloc(i * 10);
        }
        let seen = arena.iter().map(|(i, x)| (i, *x)).collect::<Vec<_>>();
        assert_eq!(vec![(0, 0), (1, 10), (2, 20), (3, 30), (4, 40)], seen);
    }
}
