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

//! Electrostatic contour migration: point correspondence between the outlines of a
//! deforming cell in consecutive frames.
//!
//! Each outline of a frame pair is split into sectors at the crossings of the two
//! outlines. In every sector one side migrates onto the other through the field of
//! two charge curves, the landed vertices are written back in order, and the result
//! is repaired and resampled before it becomes the source of the next pair.

pub mod error;
pub mod geometry;
pub mod kernel;
pub mod mapping;
pub mod outline;
pub mod outline_processing;

pub use error::{MappingError, OutlineError};
pub use geometry::{Point2, Polyline, Vector2};
pub use mapping::{EcmParams, FramePair, MemoryOutlines, OutlineHandler, RunReport, Tracker};
pub use outline::{Outline, Vertex};
