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

use std::{collections::BTreeMap, ops::Range};

use crate::{error::MappingError, geometry::Point2, outline::Outline};

/// Source and sink of one tracked cell's outlines, one per frame.
pub trait OutlineHandler {
    /// Frames holding an outline.
    fn frame_range(&self) -> Range<usize>;

    fn get(&self, frame: usize) -> Result<Outline, MappingError>;

    fn save(&mut self, outline: &Outline, frame: usize) -> Result<(), MappingError>;
}

/// Keeps raw input frames and the mapped outlines in memory.
///
/// Input frames are turned into outlines on every `get`, so malformed frames only
/// fail when the run reaches them.
#[derive(Debug, Clone, Default)]
pub struct MemoryOutlines {
    start: usize,
    frames: Vec<Vec<Point2>>,
    mapped: BTreeMap<usize, Outline>,
}

impl MemoryOutlines {
    pub fn new(start: usize, frames: Vec<Vec<Point2>>) -> Self {
        Self {
            start,
            frames,
            mapped: BTreeMap::new(),
        }
    }

    pub fn push(&mut self, points: Vec<Point2>) {
        self.frames.push(points);
    }

    pub fn mapped(&self, frame: usize) -> Option<&Outline> {
        self.mapped.get(&frame)
    }

    pub fn saved_frames(&self) -> Vec<usize> {
        self.mapped.keys().copied().collect()
    }
}

impl OutlineHandler for MemoryOutlines {
    fn frame_range(&self) -> Range<usize> {
        self.start..self.start + self.frames.len()
    }

    fn get(&self, frame: usize) -> Result<Outline, MappingError> {
        let points = frame
            .checked_sub(self.start)
            .and_then(|i| self.frames.get(i))
            .ok_or(MappingError::MissingFrame { frame })?;
        Ok(Outline::from_points(points)?)
    }

    fn save(&mut self, outline: &Outline, frame: usize) -> Result<(), MappingError> {
        self.mapped.insert(frame, outline.clone());
        Ok(())
    }
}
