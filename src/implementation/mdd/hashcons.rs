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

//! This module provides the hash-consing table which guarantees that, within
//! one compilation, a given state is represented by one single node.

use std::{hash::Hash, sync::Arc};

use fxhash::FxHashMap;

/// The dense identifier of a node within one generation of the node arena
pub type NodeId = usize;

/// The outcome of looking a state up in the hash-consing table
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Probe {
    /// The state is already represented by the given node
    Found(NodeId),
    /// There is no node for this state (yet)
    Absent,
}

/// Maps each distinct state to the canonical node representing it.
///
/// The table is emptied at the beginning of each compilation; at that point
/// its generation counter is bumped so that the ids handed out in a previous
/// generation can be recognized as stale by whoever kept them around.
#[derive(Debug, Clone)]
pub struct HashConsTable<T> {
    map: FxHashMap<Arc<T>, NodeId>,
    generation: usize,
}

impl <T> Default for HashConsTable<T> {
    fn default() -> Self {
        Self { map: FxHashMap::default(), generation: 0 }
    }
}

impl <T: Eq + Hash> HashConsTable<T> {
    pub fn new() -> Self {
        Self::default()
    }
    /// The number of times this table has been cleared
    pub fn generation(&self) -> usize {
        self.generation
    }
    /// The number of states stored in the current generation
    pub fn len(&self) -> usize {
        self.map.len()
    }
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
    /// Empties the table and moves on to the next generation
    pub fn clear(&mut self) {
        self.map.clear();
        self.generation += 1;
    }
    /// Tells whether a node already represents the given state
    pub fn probe(&self, state: &T) -> Probe {
        match self.map.get(state) {
            Some(id) => Probe::Found(*id),
            None => Probe::Absent,
        }
    }
    /// Associates `state` with the node `id` unless the state is already 
    /// represented. In both cases it returns the canonical node of the state.
    pub fn insert_if_absent(&mut self, state: Arc<T>, id: NodeId) -> NodeId {
        *self.map.entry(state).or_insert(id)
    }
    /// Forces `state` to be represented by node `id` from now on. This is 
    /// how the states that were merged away are redirected to their aggregate.
    pub fn rebind(&mut self, state: Arc<T>, id: NodeId) {
        self.map.insert(state, id);
    }
    /// Forgets the node associated with the given state
    pub fn remove(&mut self, state: &T) -> Option<NodeId> {
        self.map.remove(state)
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################

#[cfg(test)]
mod test_hashcons {
    use std::sync::Arc;
    use super::{HashConsTable, Probe};

    #[test]
    fn probing_an_unknown_state_yields_absent() {
        let table = HashConsTable::<usize>::new();
        assert_eq!(Probe::Absent, table.probe(&42));
        assert!(table.is_empty());
    }
    #[test]
    fn the_first_insertion_of_a_state_decides_its_canonical_node() {
        let mut table = HashConsTable::new();
        assert_eq!(3, table.insert_if_absent(Arc::new("a"), 3));
        assert_eq!(3, table.insert_if_absent(Arc::new("a"), 7));
        assert_eq!(Probe::Found(3), table.probe(&"a"));
        assert_eq!(1, table.len());
    }
    #[test]
    fn equal_states_built_separately_resolve_to_the_same_node() {
        let mut table = HashConsTable::new();
        table.insert_if_absent(Arc::new(vec![1, 2, 3]), 0);
        let other = vec![1, 2, 3];
        assert_eq!(Probe::Found(0), table.probe(&other));
    }
    #[test]
    fn rebind_redirects_a_state_to_another_node() {
        let mut table = HashConsTable::new();
        table.insert_if_absent(Arc::new(1), 0);
        table.insert_if_absent(Arc::new(2), 1);
        table.rebind(Arc::new(1), 1);
        assert_eq!(Probe::Found(1), table.probe(&1));
        assert_eq!(Probe::Found(1), table.probe(&2));
    }
    #[test]
    fn clear_empties_the_table_and_bumps_the_generation() {
        let mut table = HashConsTable::new();
        table.insert_if_absent(Arc::new(1), 0);
        assert_eq!(0, table.generation());
        table.clear();
        assert_eq!(1, table.generation());
        assert_eq!(Probe::Absent, table.probe(&1));
        assert_eq!(9, table.insert_if_absent(Arc::new(1), 9));
    }
    #[test]
    fn remove_forgets_the_state() {
        let mut table = HashConsTable::new();
        table.insert_if_absent(Arc::new('x'), 4);
        assert_eq!(Some(4), table.remove(&'x'));
        assert_eq!(Probe::Absent, table.probe(&'x'));
    }
}
