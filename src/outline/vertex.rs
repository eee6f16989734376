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

use crate::geometry::{Point2, Vector2};

/// A node of an [`Outline`](crate::outline::Outline).
///
/// `next`/`prev` are arena indices; `usize::MAX` marks an unlinked vertex.
#[derive(Clone, Debug)]
pub struct Vertex {
    pub position: Point2,
    /// Outward unit normal.
    pub normal: Vector2,
    /// Stable identifier, never reused within a tracking run.
    pub tracking: u64,
    /// Normalised arc position on the frame this vertex was tracked from.
    pub coord: f64,
    /// Signed displacement of the last migration, positive along the outward normal.
    pub distance: f64,
    /// Set on crossings between two consecutive outlines.
    pub intersect: bool,
    /// Shared id of the crossing on both outlines.
    pub intersection: Option<usize>,
    /// Excluded from migration.
    pub frozen: bool,
    pub(crate) next: usize,
    pub(crate) prev: usize,
    pub removed: bool,
}

impl Vertex {
    pub fn new(position: Point2, tracking: u64) -> Self {
        Self {
            position,
            normal: Vector2::zero(),
            tracking,
            coord: 0.0,
            distance: 0.0,
            intersect: false,
            intersection: None,
            frozen: false,
            next: usize::MAX,
            prev: usize::MAX,
            removed: false,
        }
    }

    /// Clears the crossing flags set by a frame pair.
    pub fn clear_marks(&mut self) {
        self.intersect = false;
        self.intersection = None;
        self.frozen = false;
    }
}
