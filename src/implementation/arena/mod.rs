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

//! This module provides the memory management building blocks of the library.
//! Decision diagrams are compiled over and over again during a branch and 
//! bound search. Hence, rather than allocating (and freeing) thousands of 
//! nodes individually, every compilation bump-allocates its nodes, edges and 
//! adjacency lists in arenas which are rolled back to a mark in one single 
//! operation when the next compilation starts.
//! 
//! Besides the arena itself, this module offers the containers which are used
//! around it: a circular queue (breadth first traversals) and a slab (pool of
//! long lived objects that are released individually).
mod arena;
mod queue;
mod slab;

pub use arena::*;
pub use queue::*;
pub use slab::*;
