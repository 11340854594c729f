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

//! This module lets you visualize the decision diagrams you have compiled.

use std::{fmt::Debug, hash::Hash};

use derive_builder::Builder;

use super::clean::{Edge, EdgesList, Mdd};
use crate::{CompilationType, NodeId};

/// This is how you configure the output visualisation e.g.
/// if you want to see the local bounds and the nodes that have been merged
#[derive(Debug, Clone, Builder)]
pub struct VizConfig {
    /// This flag must be true (default) if you want to see the value of
    /// each node (value of the best path from the root)
    #[builder(default = "true")]
    pub show_value: bool,
    /// This flag must be true (default) if you want to see the value of the
    /// best path from each node to the sink
    #[builder(default = "true")]
    pub show_locb: bool,
    /// This flag must be true (default) if you want to see the local bound
    /// estimate of each node
    #[builder(default = "true")]
    pub show_rub: bool,
    /// This flag must be true (default) if you want to see all nodes that
    /// have been deleted because of restrict operations
    #[builder(default = "true")]
    pub show_deleted: bool,
    /// This flag must be true (default) if you want to see all nodes that
    /// have been deleted because they were merged into a relaxed node
    #[builder(default = "true")]
    pub show_merged: bool,
}

impl Default for VizConfig {
    fn default() -> Self {
        VizConfig { show_value: true, show_locb: true, show_rub: true, show_deleted: true, show_merged: true }
    }
}

impl <T: Debug + Eq + Hash> Mdd<T> {
    /// Renders the diagram produced by the last compilation.
    /// Note: the output is a string of (not compiled) 'dot'. This gives you 
    /// the freedom to fiddle with the graph if needed.
    pub fn as_graphviz(&self, config: &VizConfig) -> String {
        let mut out = String::from("digraph {\n\tranksep = 3;\n\n");

        for (id, node) in self.nodes.iter() {
            if node.flags.is_deleted() {
                // only relaxed compilations merge nodes away
                let merged_away = self.comp_type() == CompilationType::Relaxed;
                if (merged_away && !config.show_merged) || (!merged_away && !config.show_deleted) {
                    continue;
                }
            }
            out.push_str(&format!("\t{id} [{}];\n", self.node_attributes(id, config)));
            self.edges_of(id, &mut out);
        }

        out.push_str("}\n");
        out
    }

    /// Writes the edges entering one node
    fn edges_of(&self, id: NodeId, out: &mut String) {
        let node = &self.nodes[id];
        let mut list = node.parents;
        while let EdgesList::Cons { head, tail } = self.lists[list] {
            let edge = self.edges[head];
            Self::edge(&edge, node.best == Some(head), out);
            list = tail;
        }
    }
    fn edge(edge: &Edge, is_best: bool, out: &mut String) {
        let width = if is_best { 3 } else { 1 };
        let style = if edge.alive { "solid" } else { "dotted" };
        out.push_str(&format!("\t{} -> {} [penwidth={width},style={style},label=\"{}\\ncost = {}\"];\n", 
            edge.from, edge.to, edge.label, edge.cost));
    }
    /// Creates the list of attributes that are used to configure one node
    fn node_attributes(&self, id: NodeId, config: &VizConfig) -> String {
        let node = &self.nodes[id];
        let shape = if node.flags.is_deleted() || node.flags.is_merged() { "diamond" } else { "circle" };
        let peripheries = if node.flags.is_cutset() { 2 } else { 1 };
        // pruned nodes were never expanded
        let style = if node.flags.is_pruned() { "\"filled,dashed\"" } else { "filled" };
        let color = if Some(id) == self.sink() {
            "black"
        } else if node.flags.is_exact() {
            "\"#99ccff\""
        } else if node.flags.is_merged() {
            "yellow"
        } else {
            "lightgray"
        };

        let mut label = format!("{:?}", node.state);
        if config.show_value {
            label.push_str(&format!("\\nval: {}", Self::extreme(node.value_top)));
        }
        if config.show_locb {
            let locb = if node.flags.is_marked() { Self::extreme(node.value_bot) } else { "-".to_string() };
            label.push_str(&format!("\\nlocb: {locb}"));
        }
        if config.show_rub {
            let rub = node.rub.map(Self::extreme).unwrap_or_else(|| "-".to_string());
            label.push_str(&format!("\\nrub: {rub}"));
        }
        let label = label.replace('"', "\\\"");
        format!("shape={shape},style={style},color={color},peripheries={peripheries},label=\"{label}\"")
    }
    /// An utility method to replace extreme values with +inf and -inf
    fn extreme(x: isize) -> String {
        match x {
            isize::MAX => "+inf".to_string(),
            isize::MIN => "-inf".to_string(),
            _ => format!("{x}"),
        }
    }
}
