// SPDX-License-Identifier: MIT
//
// Copyright (c) 2025 Alexandre Severino
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum OutlineError {
    #[error("outline needs at least 3 vertices, got {count}")]
    TooFewVertices { count: usize },
    #[error("vertex {0} is not a live vertex of this outline")]
    InvalidVertex(usize),
    #[error("vertex {index} has a non-finite position")]
    NonFiniteCoordinate { index: usize },
    #[error("tracking coordinates descend {descents} times around the outline")]
    CoordinateOrder { descents: usize },
}

#[derive(Debug, Error)]
pub enum MappingError {
    #[error("invalid parameters: {reason}")]
    InvalidParams { reason: String },
    #[error(transparent)]
    Geometry(#[from] OutlineError),
    #[error("degenerate decomposition: {reason}")]
    Degenerate { reason: String },
    #[error("no outline stored for frame {frame}")]
    MissingFrame { frame: usize },
    #[error("outline handler failed at frame {frame}: {reason}")]
    Handler { frame: usize, reason: String },
    #[error("coordinate inconsistency at frame {frame}: {source}")]
    Inconsistent {
        frame: usize,
        #[source]
        source: OutlineError,
    },
}

impl MappingError {
    /// Errors confined to one frame pair. A run stops at such a frame but keeps the
    /// frames already saved.
    pub fn is_frame_local(&self) -> bool {
        matches!(
            self,
            MappingError::Geometry(_) | MappingError::Degenerate { .. } | MappingError::Inconsistent { .. }
        )
    }
}
