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

//! This module provides the decision diagram compiler. A diagram is unrolled
//! breadth first from the root of a subproblem. All of its nodes, edges and
//! adjacency lists are allocated in arenas which are rolled back when the next
//! compilation starts, and each distinct state is hash-consed onto a single 
//! node.

use std::{cmp::Ordering, fmt::Debug, hash::Hash, ops::Range, sync::Arc};

use tracing::{debug, trace};

use crate::{Arena, CompilationInput, CompilationType, Completion, CutsetType, DecisionDiagram, 
    HashConsTable, Label, Mark, NodeFlags, NodeId, Probe, RingQueue, Sense, Solution, SubProblem, 
    TieBreak, DEFAULT_SEGMENT_SIZE};

/// The identifier of an edge: its position in the edge arena
pub(super) type EdgeId = usize;
/// The identifier of a cell of an adjacency list
pub(super) type ListId = usize;
/// The (shared) empty adjacency list. It is allocated once and for all before
/// the base mark of the list arena.
pub(super) const NIL: ListId = 0;
/// How many of the least promising nodes of a layer are tried as merge 
/// partners for the node being relaxed
pub const MERGE_LOOKAHEAD: usize = 16;

/// Represents an effective node from the decision diagram
#[derive(Debug, Clone)]
pub(super) struct Node<T> {
    /// The state associated to this node
    pub(super) state: Arc<T>,
    /// The value of the best path between the root of the diagram and this
    /// specific node
    pub(super) value_top: isize,
    /// The value of the best path between this node and the sink.
    /// 
    /// ### Note
    /// This field is only ever meaningful for marked nodes, once the diagram 
    /// has been fully unrolled.
    pub(super) value_bot: isize,
    /// The local bound estimate of the node (if the model provides one)
    pub(super) rub: Option<isize>,
    /// The last edge on the best path between the root and this node
    pub(super) best: Option<EdgeId>,
    /// The head of the list of edges entering this node
    pub(super) parents: ListId,
    /// The head of the list of edges leaving this node
    pub(super) children: ListId,
    pub(super) flags: NodeFlags,
    /// The number of decisions that have been made since the problem root
    pub(super) depth: usize,
}
impl <T> Node<T> {
    fn new(state: Arc<T>, value_top: isize, depth: usize, flags: NodeFlags) -> Self {
        Node {
            state,
            value_top,
            value_bot: value_top,
            rub: None,
            best: None,
            parents: NIL,
            children: NIL,
            flags,
            depth,
        }
    }
}

/// Materializes one edge of the decision diagram. It logically connects two 
/// nodes and annotates the link with a label and a cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Edge {
    pub(super) from: NodeId,
    pub(super) to: NodeId,
    pub(super) label: Label,
    pub(super) cost: isize,
    /// Dead edges are those which were redirected by a merge or which lead 
    /// to a node that was trimmed away. They stay in the adjacency lists but
    /// are ignored by all traversals.
    pub(super) alive: bool,
}

/// A cell of the singly linked lists which form the adjacency lists of nodes
#[derive(Debug, Clone, Copy)]
pub(super) enum EdgesList {
    Cons { head: EdgeId, tail: ListId },
    Nil,
}

/// The decision diagram in itself. 
///
/// Nodes, edges and adjacency list cells live in three arenas that are rolled
/// back to their base mark at the beginning of each compilation. Because of
/// that, the identifiers handed out by one compilation are meaningless once 
/// the next one has started: the only data that survives a compilation is what
/// it exports as `SubProblem`s.
#[derive(Debug)]
pub struct Mdd<T> {
    pub(super) nodes: Arena<Node<T>>,
    pub(super) edges: Arena<Edge>,
    pub(super) lists: Arena<EdgesList>,
    nodes_base: Mark,
    edges_base: Mark,
    lists_base: Mark,

    /// Maps each state to its canonical node
    table: HashConsTable<T>,
    /// The work list of the breadth first traversals
    queue: RingQueue<NodeId>,
    /// Scratch buffer holding the layer being squashed and expanded
    layer: Vec<NodeId>,
    /// The members of all layers (root layer first)
    pub(super) layer_nodes: Vec<NodeId>,
    /// The position of each layer in `layer_nodes`
    pub(super) layers: Vec<Range<usize>>,
    /// The nodes reachable from the root in topological order
    order: Vec<NodeId>,
    /// Scratch data of the topological sort, indexed by node id
    reached: Vec<bool>,
    in_degree: Vec<usize>,

    /// The labels leading from the problem root to the root of this diagram
    path_to_root: Vec<Label>,
    /// The dual bound of the subproblem at the root of this diagram
    residual_bound: isize,
    sense: Sense,
    comp_type: CompilationType,

    root: Option<NodeId>,
    sink: Option<NodeId>,
    /// The sink when it is reachable from the root
    best_node: Option<NodeId>,
    /// The index (in `layers`) of the last exact layer, should a layer have 
    /// been merged
    lel: Option<usize>,
    pub(super) cutset: Vec<NodeId>,
    discarded: Vec<NodeId>,
    /// True iff a layer was trimmed during a restricted compilation
    trimmed: bool,
    /// True iff some nodes were merged during a relaxed compilation
    merged: bool,
    /// True iff the best path traverses no merged node
    exact_best_path: bool,
    is_exact: bool,
}

// Tech note: the macros below are only meant to avoid fighting the borrow 
// checker. Each adjacency list cell and edge is copied out before the action
// runs, so the action is free to mutate the diagram.

/// This macro performs an action for each live edge of a given adjacency list
macro_rules! foreach {
    (parent of $id:expr, $dd:expr, $action:expr) => {
        foreach!(@list $dd.nodes[$id].parents, $dd, $action)
    };
    (child of $id:expr, $dd:expr, $action:expr) => {
        foreach!(@list $dd.nodes[$id].children, $dd, $action)
    };
    (@list $list:expr, $dd:expr, $action:expr) => {
        let mut list = $list;
        loop {
            let cell = $dd.lists[list];
            match cell {
                EdgesList::Nil => break,
                EdgesList::Cons { head, tail } => {
                    let edge = $dd.edges[head];
                    if edge.alive {
                        $action(head, edge);
                    }
                    list = tail;
                }
            }
        }
    };
}

impl <T> Default for Mdd<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl <T> DecisionDiagram<T> for Mdd<T>
where T: Eq + Hash + Clone + Debug
{
    fn compile(&mut self, input: &CompilationInput<T>) -> Completion {
        self._compile(input)
    }
    fn is_exact(&self) -> bool {
        self.is_exact
    }
    fn best_value(&self) -> Option<isize> {
        self.best_node.map(|id| self.nodes[id].value_top)
    }
    fn best_solution(&self) -> Option<Solution> {
        self.best_node.map(|id| self.path_to(id))
    }
    fn best_exact_value(&self) -> Option<isize> {
        if self.exact_best_path {
            self.best_value()
        } else {
            None
        }
    }
    fn best_exact_solution(&self) -> Option<Solution> {
        if self.exact_best_path {
            self.best_solution()
        } else {
            None
        }
    }
    fn drain_cutset<F>(&mut self, func: F)
    where F: FnMut(SubProblem<T>)
    {
        self._drain_cutset(func)
    }
    fn drain_discarded<F>(&mut self, func: F)
    where F: FnMut(SubProblem<T>)
    {
        self._drain_discarded(func)
    }
}

impl <T> Mdd<T> {
    pub fn new() -> Self {
        Self::with_segment_size(DEFAULT_SEGMENT_SIZE)
    }
    /// Creates a diagram whose arenas grow by segments of the given size
    pub fn with_segment_size(segment_size: usize) -> Self {
        let nodes = Arena::with_segment_size(segment_size);
        let edges = Arena::with_segment_size(segment_size);
        let mut lists = Arena::with_segment_size(segment_size);
        lists.alloc(EdgesList::Nil);

        Self {
            nodes_base: nodes.mark(),
            edges_base: edges.mark(),
            lists_base: lists.mark(),
            nodes,
            edges,
            lists,
            table: HashConsTable::default(),
            queue: RingQueue::new(),
            layer: vec![],
            layer_nodes: vec![],
            layers: vec![],
            order: vec![],
            reached: vec![],
            in_degree: vec![],
            path_to_root: vec![],
            residual_bound: 0,
            sense: Sense::Maximize,
            comp_type: CompilationType::Exact,
            root: None,
            sink: None,
            best_node: None,
            lel: None,
            cutset: vec![],
            discarded: vec![],
            trimmed: false,
            merged: false,
            exact_best_path: false,
            is_exact: true,
        }
    }
}

// --- INSPECTION --------------------------------------------------------------
impl <T> Mdd<T> where T: Eq + Hash {
    /// The number of times this diagram has been compiled
    pub fn generation(&self) -> usize {
        self.table.generation()
    }
    /// How was the last diagram compiled ?
    pub fn comp_type(&self) -> CompilationType {
        self.comp_type
    }
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }
    /// The sink node of the diagram (whether it is reachable or not)
    pub fn sink(&self) -> Option<NodeId> {
        self.sink
    }
    /// Returns the node standing for the given state in the last compilation
    /// (after a merge, the states that were merged away resolve to the node
    /// of their aggregate).
    pub fn lookup(&self, state: &T) -> Option<NodeId> {
        match self.table.probe(state) {
            Probe::Found(id) => Some(id),
            Probe::Absent => None,
        }
    }
    /// The state of the given node.
    ///
    /// # Panics
    /// When the node does not belong to the last compilation
    pub fn state_of(&self, id: NodeId) -> &T {
        self.nodes[id].state.as_ref()
    }
    pub fn is_node_exact(&self, id: NodeId) -> bool {
        self.nodes[id].flags.is_exact()
    }
    pub fn is_node_merged(&self, id: NodeId) -> bool {
        self.nodes[id].flags.is_merged()
    }
    pub fn is_node_deleted(&self, id: NodeId) -> bool {
        self.nodes[id].flags.is_deleted()
    }
    /// True iff the node was not expanded because it could not improve on
    /// the best known value
    pub fn is_node_pruned(&self, id: NodeId) -> bool {
        self.nodes[id].flags.is_pruned()
    }
    pub fn is_node_in_cutset(&self, id: NodeId) -> bool {
        self.nodes[id].flags.is_cutset()
    }
    /// The value of the best path from the root to the given node
    pub fn value_top(&self, id: NodeId) -> isize {
        self.nodes[id].value_top
    }
    /// The value of the best path from the given node to the sink, or None
    /// when the node does not lie on any path to the sink
    pub fn value_bot(&self, id: NodeId) -> Option<isize> {
        let node = &self.nodes[id];
        if node.flags.is_marked() {
            Some(node.value_bot)
        } else {
            None
        }
    }
    /// The number of nodes allocated by the last compilation (including
    /// the nodes that were trimmed or merged away)
    pub fn nb_nodes(&self) -> usize {
        self.nodes.len()
    }
    /// The number of edges allocated by the last compilation
    pub fn nb_edges(&self) -> usize {
        self.edges.len()
    }
    /// The number of edges that were not redirected or killed
    pub fn nb_live_edges(&self) -> usize {
        self.edges.iter().filter(|(_, e)| e.alive).count()
    }
    /// The number of nodes of each layer (root layer first, sink excluded)
    /// once they have been trimmed or merged.
    pub fn layer_widths(&self) -> Vec<usize> {
        self.layers.iter().map(|l| l.len()).collect()
    }
    /// The live edges leaving a node as (label, destination, cost) triples
    pub fn children_of(&self, id: NodeId) -> Vec<(Label, NodeId, isize)> {
        let mut out = vec![];
        foreach!(child of id, self, |_, e: Edge| out.push((e.label, e.to, e.cost)));
        out.sort_unstable();
        out
    }
}

// --- COMPILATION -------------------------------------------------------------
impl <T> Mdd<T> where T: Eq + Hash + Clone + Debug {
    fn _clear(&mut self) {
        self.nodes.clear(self.nodes_base);
        self.edges.clear(self.edges_base);
        self.lists.clear(self.lists_base);
        self.table.clear();
        self.queue.clear();
        self.layer.clear();
        self.layer_nodes.clear();
        self.layers.clear();
        self.order.clear();
        self.reached.clear();
        self.in_degree.clear();
        self.path_to_root.clear();
        self.root = None;
        self.sink = None;
        self.best_node = None;
        self.lel = None;
        self.cutset.clear();
        self.discarded.clear();
        self.trimmed = false;
        self.merged = false;
        self.exact_best_path = false;
        self.is_exact = true;
    }

    fn _compile(&mut self, input: &CompilationInput<T>) -> Completion {
        self._clear();
        self._initialize(input);

        let mut depth = 0;
        while !self.queue.is_empty() {
            let mut layer = std::mem::take(&mut self.layer);
            layer.clear();
            let width = self.queue.len();
            self.queue.drain_front_into(width, &mut layer);

            self._compute_local_bounds(input, &layer);
            self._squash_if_needed(input, depth, &mut layer);

            let from = self.layer_nodes.len();
            self.layer_nodes.extend_from_slice(&layer);
            self.layers.push(from..self.layer_nodes.len());

            for id in layer.iter().copied() {
                self._expand(input, id);
            }
            self.layer = layer;
            depth += 1;
        }

        self._finalize(input);

        debug!(
            comp_type = ?input.comp_type,
            depth = input.residual.depth,
            nodes = self.nodes.len(),
            edges = self.edges.len(),
            layers = self.layers.len(),
            exact = self.is_exact,
            best = ?self.best_value(),
            "compiled decision diagram"
        );

        Completion { is_exact: self.is_exact, best_value: self.best_value() }
    }

    fn _initialize(&mut self, input: &CompilationInput<T>) {
        let residual = input.residual;
        self.sense = input.model.sense();
        self.comp_type = input.comp_type;
        self.residual_bound = residual.bound;
        self.path_to_root.extend_from_slice(&residual.path);

        let root = self.nodes.alloc(Node::new(residual.state.clone(), residual.value, residual.depth, NodeFlags::new_exact()));
        self.root = Some(root);

        if input.model.is_sink(residual.state.as_ref()) {
            self.sink = Some(root);
        } else {
            self.table.insert_if_absent(residual.state.clone(), root);
            let target = Arc::new(input.model.target());
            let sink = self.nodes.alloc(Node::new(target, self.sense.worst(), residual.depth, NodeFlags::new_exact()));
            self.sink = Some(sink);
            self.queue.push_back(root);
        }
    }

    fn _compute_local_bounds(&mut self, input: &CompilationInput<T>, layer: &[NodeId]) {
        for id in layer.iter().copied() {
            let rub = input.model.local_bound(self.nodes[id].state.as_ref(), input.comp_type);
            self.nodes[id].rub = rub;
        }
    }

    /// Applies all the labels of its domain to the given node
    fn _expand(&mut self, input: &CompilationInput<T>, id: NodeId) {
        let node = &self.nodes[id];
        if let (Some(best), Some(rub)) = (input.best_known, node.rub) {
            if !self.sense.is_better(node.value_top.saturating_add(rub), best) {
                self.nodes[id].flags.set_pruned(true);
                return;
            }
        }

        let state = node.state.clone();
        let children = node.children;
        let mut domain = input.model.label_domain(state.as_ref(), input.comp_type);
        foreach!(@list children, self, |_, e: Edge| { domain.remove(e.label); });

        for label in domain.iter() {
            if let Some(next) = input.model.transition(state.as_ref(), label) {
                let cost = input.model.cost(state.as_ref(), label);
                self._branch_on(input, id, label, cost, next);
            }
        }
    }

    fn _branch_on(&mut self, input: &CompilationInput<T>, from: NodeId, label: Label, cost: isize, next: T) {
        if input.model.is_sink(&next) {
            if let Some(sink) = self.sink {
                self._append_edge(from, sink, label, cost);
            }
            return;
        }
        match self.table.probe(&next) {
            Probe::Found(to) => {
                self._append_edge(from, to, label, cost);
            },
            Probe::Absent => {
                let depth = self.nodes[from].depth + 1;
                let state = Arc::new(next);
                let to = self.nodes.alloc(Node::new(state.clone(), self.sense.worst(), depth, NodeFlags::new_exact()));
                self.table.insert_if_absent(state, to);
                self.queue.push_back(to);
                self._append_edge(from, to, label, cost);
            }
        }
    }

    /// Connects two nodes, registers the edge in both adjacency lists and 
    /// updates the forward bound of the destination.
    fn _append_edge(&mut self, from: NodeId, to: NodeId, label: Label, cost: isize) -> EdgeId {
        let eid = self.edges.alloc(Edge { from, to, label, cost, alive: true });
        let tail = self.nodes[to].parents;
        self.nodes[to].parents = self.lists.alloc(EdgesList::Cons { head: eid, tail });
        let tail = self.nodes[from].children;
        self.nodes[from].children = self.lists.alloc(EdgesList::Cons { head: eid, tail });

        let parent = &self.nodes[from];
        let parent_exact = parent.flags.is_exact();
        let value = parent.value_top.saturating_add(cost);
        let depth = parent.depth + 1;

        let sense = self.sense;
        let node = &mut self.nodes[to];
        let exact = parent_exact && node.flags.test(NodeFlags::F_EXACT);
        node.flags.set_exact(exact);
        node.depth = node.depth.max(depth);
        if node.best.is_none() || sense.is_better(value, node.value_top) {
            node.best = Some(eid);
            node.value_top = value;
        }
        eid
    }

    /// Ranks two nodes of a layer: `Less` means that `a` is more promising
    fn _rank(&self, a: NodeId, b: NodeId, tie_break: TieBreak) -> Ordering {
        let na = &self.nodes[a];
        let nb = &self.nodes[b];
        self.sense.compare(nb.value_top, na.value_top)
            .then_with(|| match (tie_break, na.rub, nb.rub) {
                (TieBreak::LocalBound, Some(ra), Some(rb)) => self.sense.compare(rb, ra),
                _ => Ordering::Equal,
            })
            .then_with(|| a.cmp(&b))
    }

    fn _squash_if_needed(&mut self, input: &CompilationInput<T>, depth: usize, layer: &mut Vec<NodeId>) {
        match input.comp_type {
            CompilationType::Exact => { /* do nothing: you want to explore the complete DD */ },
            CompilationType::Restricted => {
                if layer.len() > input.max_width {
                    self._restrict(input, layer);
                }
            },
            CompilationType::Relaxed => {
                // the first layer below the root is never merged
                if layer.len() > input.max_width && depth > 1 && self._relax(input, layer) && self.lel.is_none() {
                    self.lel = Some(depth - 1);
                }
            },
        }
    }

    fn _restrict(&mut self, input: &CompilationInput<T>, layer: &mut Vec<NodeId>) {
        let tie_break = input.tie_break;
        layer.sort_unstable_by(|a, b| self._rank(*a, *b, tie_break));

        let before = layer.len();
        for id in layer.drain(input.max_width..) {
            self.nodes[id].flags.set_deleted(true);
            foreach!(parent of id, self, |eid: EdgeId, _| { self.edges[eid].alive = false; });
            let state = self.nodes[id].state.clone();
            self.table.remove(state.as_ref());
            self.discarded.push(id);
        }
        self.trimmed = true;
        trace!(before, after = layer.len(), "restricted layer");
    }

    /// Shrinks the layer by merging its least promising nodes. It returns true
    /// iff at least one merge took place.
    ///
    /// A node is only offered the `MERGE_LOOKAHEAD` least promising nodes of
    /// the layer as partners. When none of them accepts it, the node stays 
    /// in the layer unmerged.
    fn _relax(&mut self, input: &CompilationInput<T>, layer: &mut Vec<NodeId>) -> bool {
        let tie_break = input.tie_break;
        layer.sort_unstable_by(|a, b| self._rank(*a, *b, tie_break));

        let before = layer.len();
        let mut stuck = vec![];
        let mut nb_stuck = 0;
        let mut merged_any = false;
        while layer.len() + nb_stuck > input.max_width {
            let Some(worst) = layer.pop() else { break };
            let window = layer.len().saturating_sub(MERGE_LOOKAHEAD);
            let partner = layer[window..].iter().enumerate().rev().find_map(|(pos, other)| {
                input.model.merge(self.nodes[worst].state.as_ref(), self.nodes[*other].state.as_ref())
                    .map(|merged| (window + pos, merged))
            });
            match partner {
                None => {
                    self.nodes[worst].flags.set_stuck(true);
                    stuck.push(worst);
                    nb_stuck += 1;
                },
                Some((pos, merged)) => {
                    let other = layer.remove(pos);
                    let target = self._merge_pair(input, layer, &mut nb_stuck, worst, other, merged);
                    let at = layer.binary_search_by(|x| self._rank(*x, target, tie_break))
                        .unwrap_or_else(|pos| pos);
                    layer.insert(at, target);
                    merged_any = true;
                },
            }
        }
        // stuck nodes that were recycled by a merge are already back in the layer
        for id in stuck {
            if self.nodes[id].flags.is_stuck() {
                self.nodes[id].flags.set_stuck(false);
                layer.push(id);
            }
        }
        self.merged |= merged_any;
        trace!(before, after = layer.len(), merged = merged_any, "relaxed layer");
        merged_any
    }

    /// Merges the nodes `a` and `b` of the current layer into a node whose 
    /// state is `merged` and returns the id of that node. The aggregate is 
    /// hash-consed: when a node of the layer already holds the merged state,
    /// that node is recycled (and taken out of `layer`, or out of the stuck 
    /// nodes).
    ///
    /// # Note
    /// `layer` must be sorted by rank, best first.
    fn _merge_pair(&mut self, input: &CompilationInput<T>, layer: &mut Vec<NodeId>, nb_stuck: &mut usize, 
        a: NodeId, b: NodeId, merged: T) -> NodeId 
    {
        let tie_break = input.tie_break;
        let recycled = match self.table.probe(&merged) {
            Probe::Found(id) if id == a || id == b => Some(id),
            Probe::Found(id) if self.nodes[id].flags.is_stuck() => {
                self.nodes[id].flags.set_stuck(false);
                *nb_stuck -= 1;
                Some(id)
            },
            Probe::Found(id) => layer.binary_search_by(|x| self._rank(*x, id, tie_break))
                .ok()
                .map(|pos| layer.remove(pos)),
            Probe::Absent => None,
        };
        let target = match recycled {
            Some(id) => id,
            None => {
                let depth = self.nodes[a].depth;
                let state = Arc::new(merged);
                let mut node = Node::new(state.clone(), self.sense.worst(), depth, NodeFlags::new_merged());
                node.rub = input.model.local_bound(state.as_ref(), input.comp_type);
                let id = self.nodes.alloc(node);
                self.table.rebind(state, id);
                id
            }
        };
        self.nodes[target].flags.set_merged(true);

        for x in [a, b] {
            if x != target {
                self._transfer_edges(x, target);
            }
        }
        target
    }

    /// Redirects all live edges of `from` to `to` and deletes `from`
    fn _transfer_edges(&mut self, from: NodeId, to: NodeId) {
        foreach!(parent of from, self, |eid: EdgeId, e: Edge| {
            self.edges[eid].alive = false;
            self._append_edge(e.from, to, e.label, e.cost);
        });
        foreach!(child of from, self, |eid: EdgeId, e: Edge| {
            self.edges[eid].alive = false;
            self._append_edge(to, e.to, e.label, e.cost);
        });
        self.nodes[from].flags.set_deleted(true);
        let state = self.nodes[from].state.clone();
        self.table.rebind(state, to);
    }

    // --- FINALIZATION --------------------------------------------------------
    fn _finalize(&mut self, input: &CompilationInput<T>) {
        self._sort_topologically();
        self._forward_pass(input);
        self._backward_pass();
        self._finalize_exact();
        self._finalize_cutset(input);
    }

    /// Identifies the nodes reachable from the root and sorts them in 
    /// topological order (Kahn's algorithm).
    ///
    /// # Panics
    /// When the transition relation of the model has a cycle
    fn _sort_topologically(&mut self) {
        let n = self.nodes.len();
        self.reached.resize(n, false);
        self.in_degree.resize(n, 0);

        let root = match self.root {
            Some(root) => root,
            None => return,
        };

        let mut count = 0;
        self.queue.clear();
        self.reached[root] = true;
        self.queue.push_back(root);
        while let Some(id) = self.queue.pop_front() {
            count += 1;
            foreach!(child of id, self, |_, e: Edge| {
                self.in_degree[e.to] += 1;
                if !self.reached[e.to] {
                    self.reached[e.to] = true;
                    self.queue.push_back(e.to);
                }
            });
        }

        self.queue.push_back(root);
        while let Some(id) = self.queue.pop_front() {
            self.order.push(id);
            foreach!(child of id, self, |_, e: Edge| {
                self.in_degree[e.to] -= 1;
                if self.in_degree[e.to] == 0 {
                    self.queue.push_back(e.to);
                }
            });
        }
        assert!(self.order.len() == count, "the transition relation of the model has a cycle");
    }

    /// Recomputes the forward bounds and the exactness of all reachable nodes
    fn _forward_pass(&mut self, input: &CompilationInput<T>) {
        let sense = self.sense;
        for i in 0..self.order.len() {
            let id = self.order[i];
            if Some(id) == self.root {
                let root = &mut self.nodes[id];
                root.value_top = input.residual.value;
                root.best = None;
                root.flags.set_exact(true);
                continue;
            }

            let mut value = sense.worst();
            let mut best = None;
            let mut exact = true;
            foreach!(parent of id, self, |eid: EdgeId, e: Edge| {
                if self.reached[e.from] {
                    let parent = &self.nodes[e.from];
                    exact &= parent.flags.is_exact();
                    let candidate = parent.value_top.saturating_add(e.cost);
                    if best.is_none() || sense.is_better(candidate, value) {
                        value = candidate;
                        best = Some(eid);
                    }
                }
            });
            let node = &mut self.nodes[id];
            node.value_top = value;
            node.best = best;
            node.flags.set_exact(exact);
        }
    }

    /// Computes the backward bounds of all the nodes lying on a path to the 
    /// sink and marks them.
    fn _backward_pass(&mut self) {
        let sense = self.sense;
        for id in self.order.iter().copied() {
            let node = &mut self.nodes[id];
            node.value_bot = sense.worst();
            node.flags.set_marked(false);
        }
        match self.sink {
            Some(sink) if self.reached.get(sink).copied().unwrap_or(false) => {
                let node = &mut self.nodes[sink];
                node.value_bot = 0;
                node.flags.set_marked(true);
            },
            _ => return,
        }

        for i in (0..self.order.len()).rev() {
            let id = self.order[i];
            let node = &self.nodes[id];
            if !node.flags.is_marked() {
                continue;
            }
            let value = node.value_bot;
            foreach!(parent of id, self, |_, e: Edge| {
                if self.reached[e.from] {
                    let candidate = value.saturating_add(e.cost);
                    let parent = &mut self.nodes[e.from];
                    if parent.flags.is_marked() {
                        parent.value_bot = sense.best(parent.value_bot, candidate);
                    } else {
                        parent.value_bot = candidate;
                        parent.flags.set_marked(true);
                    }
                }
            });
        }
    }

    fn _finalize_exact(&mut self) {
        self.best_node = self.sink.filter(|s| self.reached.get(*s).copied().unwrap_or(false));
        self.exact_best_path = self._has_exact_best_path(self.best_node);
        self.is_exact = match self.comp_type {
            CompilationType::Exact => true,
            CompilationType::Restricted => !self.trimmed,
            CompilationType::Relaxed => !self.merged || self.exact_best_path,
        };
    }

    /// Returns true iff the best path leading to `node` crosses no merged node
    fn _has_exact_best_path(&self, node: Option<NodeId>) -> bool {
        let mut current = node;
        while let Some(id) = current {
            let node = &self.nodes[id];
            if node.flags.is_merged() {
                return false;
            }
            current = node.best.map(|e| self.edges[e].from);
        }
        true
    }

    fn _finalize_cutset(&mut self, input: &CompilationInput<T>) {
        if input.comp_type != CompilationType::Relaxed {
            return;
        }
        if let Some(lel) = self.lel {
            match input.cutset {
                CutsetType::LastExactLayer => self._compute_last_exact_layer_cutset(lel),
                CutsetType::Frontier => self._compute_frontier_cutset(),
            }
        }
    }

    fn _compute_last_exact_layer_cutset(&mut self, lel: usize) {
        let range = self.layers[lel].clone();
        for i in range {
            let id = self.layer_nodes[i];
            if self.reached[id] {
                self.nodes[id].flags.set_cutset(true);
                self.cutset.push(id);
            }
        }
    }

    fn _compute_frontier_cutset(&mut self) {
        for i in 0..self.order.len() {
            let id = self.order[i];
            if !self.nodes[id].flags.is_exact() || Some(id) == self.sink {
                continue;
            }
            let mut frontier = false;
            foreach!(child of id, self, |_, e: Edge| {
                frontier |= !self.nodes[e.to].flags.is_exact();
            });
            if frontier {
                self.nodes[id].flags.set_cutset(true);
                self.cutset.push(id);
            }
        }
    }

    // --- EXPORT --------------------------------------------------------------
    /// The labels of the best path from the problem root to the given node
    fn path_to(&self, id: NodeId) -> Vec<Label> {
        let mut labels = vec![];
        let mut current = self.nodes[id].best;
        while let Some(eid) = current {
            let edge = self.edges[eid];
            labels.push(edge.label);
            current = self.nodes[edge.from].best;
        }
        let mut path = Vec::with_capacity(self.path_to_root.len() + labels.len());
        path.extend_from_slice(&self.path_to_root);
        path.extend(labels.into_iter().rev());
        path
    }

    /// Deep copies a node into a subproblem that outlives this compilation
    fn _subproblem(&self, id: NodeId, bound: isize) -> SubProblem<T> {
        let node = &self.nodes[id];
        SubProblem {
            state: node.state.clone(),
            value: node.value_top,
            path: self.path_to(id),
            bound,
            depth: node.depth,
        }
    }

    fn _drain_cutset<F>(&mut self, mut func: F)
    where F: FnMut(SubProblem<T>)
    {
        let mut cutset = std::mem::take(&mut self.cutset);
        if let Some(best_value) = self.best_value() {
            let sense = self.sense;
            for id in cutset.iter().copied() {
                let node = &self.nodes[id];
                if !node.flags.is_marked() {
                    continue;
                }
                let mut bound = sense.tighter(node.value_top.saturating_add(node.value_bot), best_value);
                bound = sense.tighter(bound, self.residual_bound);
                if let Some(rub) = node.rub {
                    bound = sense.tighter(bound, node.value_top.saturating_add(rub));
                }
                func(self._subproblem(id, bound));
            }
        }
        cutset.clear();
        self.cutset = cutset;
    }

    fn _drain_discarded<F>(&mut self, mut func: F)
    where F: FnMut(SubProblem<T>)
    {
        let mut discarded = std::mem::take(&mut self.discarded);
        let sense = self.sense;
        for id in discarded.iter().copied() {
            let node = &self.nodes[id];
            let mut bound = self.residual_bound;
            if let Some(rub) = node.rub {
                bound = sense.tighter(bound, node.value_top.saturating_add(rub));
            }
            func(self._subproblem(id, bound));
        }
        discarded.clear();
        self.discarded = discarded;
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################
