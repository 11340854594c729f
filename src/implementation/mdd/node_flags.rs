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

//! This module provides the compact set of boolean properties attached to each
//! node of a decision diagram while it is being compiled.

/// This structure stores a compact set of flags relating to a given node.
/// So far, it maintains the following:
/// - Exact    which is true iff all the paths leading to that node are exact
/// - Merged   which is true iff the node is the aggregate produced by a merge
/// - Marked   which is true iff the node lies on a path to the sink
/// - Cutset   which is true iff the node belongs to the exact cut-set
/// - Deleted  which is true iff the node was trimmed away from its layer
/// - Pruned   which is true iff the node was not expanded because its rough
///            upper bound could not improve on the best known solution
/// - Stuck    which is only true while a layer is being relaxed, for the 
///            nodes that no partner accepted to merge with
///
/// # Remark
/// A merged node is never exact. However, a node can be inexact and not merged
/// when one of its ancestors was merged. This is why the exactness of a node
/// is recomputed from its parents once a diagram has been fully expanded.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct NodeFlags(u8);

impl NodeFlags {
    pub const F_EXACT  : u8 = 1;
    pub const F_MERGED : u8 = 2;
    pub const F_MARKED : u8 = 4;
    pub const F_CUTSET : u8 = 8;
    pub const F_DELETED: u8 = 16;
    pub const F_PRUNED : u8 = 32;
    pub const F_STUCK  : u8 = 64;

    /// Creates the flags of a node that was reached through transitions only
    #[inline]
    pub fn new_exact() -> Self {
        NodeFlags(Self::F_EXACT)
    }
    /// Creates the flags of a node that results from a merge
    #[inline]
    pub fn new_merged() -> Self {
        NodeFlags(Self::F_MERGED)
    }
    /// Returns true iff the exact flag is on and the merged flag is off
    #[inline]
    pub fn is_exact(self) -> bool {
        self.test(Self::F_EXACT) && !self.test(Self::F_MERGED)
    }
    #[inline]
    pub fn is_merged(self) -> bool {
        self.test(Self::F_MERGED)
    }
    #[inline]
    pub fn is_marked(self) -> bool {
        self.test(Self::F_MARKED)
    }
    #[inline]
    pub fn is_cutset(self) -> bool {
        self.test(Self::F_CUTSET)
    }
    #[inline]
    pub fn is_deleted(self) -> bool {
        self.test(Self::F_DELETED)
    }
    #[inline]
    pub fn is_pruned(self) -> bool {
        self.test(Self::F_PRUNED)
    }
    #[inline]
    pub fn is_stuck(self) -> bool {
        self.test(Self::F_STUCK)
    }
    #[inline]
    pub fn set_exact(&mut self, value: bool) {
        self.set(Self::F_EXACT, value)
    }
    #[inline]
    pub fn set_merged(&mut self, value: bool) {
        self.set(Self::F_MERGED, value)
    }
    #[inline]
    pub fn set_marked(&mut self, value: bool) {
        self.set(Self::F_MARKED, value)
    }
    #[inline]
    pub fn set_cutset(&mut self, value: bool) {
        self.set(Self::F_CUTSET, value)
    }
    #[inline]
    pub fn set_deleted(&mut self, value: bool) {
        self.set(Self::F_DELETED, value)
    }
    #[inline]
    pub fn set_pruned(&mut self, value: bool) {
        self.set(Self::F_PRUNED, value)
    }
    #[inline]
    pub fn set_stuck(&mut self, value: bool) {
        self.set(Self::F_STUCK, value)
    }
    /// Checks whether all the flags encoded in the given mask are turned on
    #[inline]
    pub fn test(self, mask: u8) -> bool {
        self.0 & mask == mask
    }
    /// Turns the flags of the given mask on or off
    #[inline]
    pub fn set(&mut self, mask: u8, value: bool) {
        if value {
            self.0 |= mask;
        } else {
            self.0 &= !mask;
        }
    }
}
impl Default for NodeFlags {
    fn default() -> Self {
        Self::new_exact()
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################
