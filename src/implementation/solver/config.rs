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

//! This module provides the configuration of the solver.

use derive_builder::Builder;

use crate::{CutsetType, TieBreak, DEFAULT_SEGMENT_SIZE};

/// This is how you tell the solver how to compile the decision diagrams it
/// relies upon.
///
/// # Example
/// ```
/// # use ddbb::*;
/// let config = SolverConfigBuilder::default()
///     .max_width(10)
///     .cutset(CutsetType::Frontier)
///     .build()
///     .unwrap();
/// assert_eq!(10, config.max_width);
/// assert_eq!(TieBreak::CreationOrder, config.tie_break);
///
/// assert!(SolverConfigBuilder::default().max_width(0).build().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct SolverConfig {
    /// The maximum number of nodes a layer of a restricted or relaxed 
    /// diagram may hold (`usize::MAX` amounts to an exact compilation)
    #[builder(default = "100")]
    pub max_width: usize,
    /// The kind of exact cut-set that is extracted from relaxed diagrams
    #[builder(default)]
    pub cutset: CutsetType,
    /// How the nodes having the same value are ranked
    #[builder(default)]
    pub tie_break: TieBreak,
    /// The value of a solution known beforehand (if any). Subproblems that
    /// cannot improve it are never explored. 
    #[builder(default, setter(strip_option))]
    pub initial_primal: Option<isize>,
    /// The number of slots by which the arenas of the diagrams grow
    #[builder(default = "DEFAULT_SEGMENT_SIZE")]
    pub segment_size: usize,
}

impl SolverConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(0) = self.max_width {
            return Err("the maximum width must be at least 1".to_string());
        }
        if let Some(0) = self.segment_size {
            return Err("the arena segments must hold at least one slot".to_string());
        }
        Ok(())
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            max_width: 100,
            cutset: CutsetType::default(),
            tie_break: TieBreak::default(),
            initial_primal: None,
            segment_size: DEFAULT_SEGMENT_SIZE,
        }
    }
}
