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

//! This module provides a growable circular queue. It is the work list of
//! the breadth first traversals performed when compiling a decision diagram
//! (layer by layer expansion, reachability and topological ordering).

/// A FIFO queue backed by a circular buffer whose capacity doubles when it
/// is full. Pushing and popping never shift the elements.
#[derive(Debug, Clone)]
pub struct RingQueue<T> {
    buffer: Vec<Option<T>>,
    head: usize,
    len: usize,
}

impl <T> Default for RingQueue<T> {
    fn default() -> Self {
        Self::with_capacity(16)
    }
}

impl <T> RingQueue<T> {
    /// Creates an empty queue
    pub fn new() -> Self {
        Self::default()
    }
    /// Creates an empty queue able to hold `capacity` items before growing
    pub fn with_capacity(capacity: usize) -> Self {
        let mut buffer = Vec::with_capacity(capacity.max(1));
        buffer.resize_with(capacity.max(1), || None);
        Self { buffer, head: 0, len: 0 }
    }
    /// The number of items in the queue
    pub fn len(&self) -> usize {
        self.len
    }
    /// Returns true iff there is no item in the queue
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
    /// The number of items the queue can hold before it needs to grow
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }
    /// Appends an item at the back of the queue
    pub fn push_back(&mut self, item: T) {
        if self.len == self.buffer.len() {
            self.grow();
        }
        let tail = (self.head + self.len) % self.buffer.len();
        self.buffer[tail] = Some(item);
        self.len += 1;
    }
    /// Removes the item at the front of the queue
    pub fn pop_front(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        let item = self.buffer[self.head].take();
        self.head = (self.head + 1) % self.buffer.len();
        self.len -= 1;
        item
    }
    /// Returns a reference to the item at the front of the queue
    pub fn front(&self) -> Option<&T> {
        if self.len == 0 {
            None
        } else {
            self.buffer[self.head].as_ref()
        }
    }
    /// Removes all items from the queue. The capacity is retained.
    pub fn clear(&mut self) {
        while self.pop_front().is_some() {}
        self.head = 0;
    }
    /// Removes the `n` items at the front of the queue and appends them to `out`
    pub fn drain_front_into(&mut self, n: usize, out: &mut Vec<T>) {
        for _ in 0..n.min(self.len) {
            if let Some(x) = self.pop_front() {
                out.push(x);
            }
        }
    }

    /// Doubles the capacity of the buffer, unwrapping its content in order
    fn grow(&mut self) {
        let capacity = self.buffer.len();
        let mut buffer: Vec<Option<T>> = Vec::with_capacity(capacity * 2);
        for i in 0..self.len {
            buffer.push(self.buffer[(self.head + i) % capacity].take());
        }
        buffer.resize_with(capacity * 2, || None);
        self.buffer = buffer;
        self.head = 0;
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################

#[cfg(test)]
mod test_ring_queue {
    use super::RingQueue;

    #[test]
    fn by_default_it_is_empty() {
        let mut q = RingQueue::<usize>::new();
        assert!(q.is_empty());
        assert_eq!(None, q.front());
        assert_eq!(None, q.pop_front());
    }
    #[test]
    fn it_is_first_in_first_out() {
        let mut q = RingQueue::with_capacity(4);
        for i in 0..4 {
            q.push_back(i);
        }
        assert_eq!(Some(&0), q.front());
        for i in 0..4 {
            assert_eq!(Some(i), q.pop_front());
        }
        assert!(q.is_empty());
    }
    #[test]
    fn it_wraps_around_without_growing() {
        let mut q = RingQueue::with_capacity(3);
        q.push_back(1);
        q.push_back(2);
        q.pop_front();
        q.push_back(3);
        q.push_back(4);
        assert_eq!(3, q.capacity());
        assert_eq!(vec![2, 3, 4], std::iter::from_fn(|| q.pop_front()).collect::<Vec<_>>());
    }
    #[test]
    fn it_doubles_when_full_and_keeps_the_order() {
        let mut q = RingQueue::with_capacity(2);
        q.push_back(1);
        q.push_back(2);
        q.pop_front();
        q.push_back(3);
        q.push_back(4); // wrapped and full: grows
        q.push_back(5);
        assert_eq!(4, q.capacity());
        assert_eq!(vec![2, 3, 4, 5], std::iter::from_fn(|| q.pop_front()).collect::<Vec<_>>());
    }
    #[test]
    fn drain_front_takes_at_most_the_available_items() {
        let mut q = RingQueue::new();
        for i in 0..5 {
            q.push_back(i);
        }
        let mut out = vec![];
        q.drain_front_into(3, &mut out);
        assert_eq!(vec![0, 1, 2], out);
        q.drain_front_into(10, &mut out);
        assert_eq!(vec![0, 1, 2, 3, 4], out);
        assert!(q.is_empty());
    }
    #[test]
    fn clear_empties_the_queue() {
        let mut q = RingQueue::new();
        q.push_back('a');
        q.push_back('b');
        q.clear();
        assert!(q.is_empty());
        q.push_back('c');
        assert_eq!(Some('c'), q.pop_front());
    }
}
