// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Edge-function scan converter
//!
//! Walks the bounding box from a [`TriangleSetup`] in row-major order and
//! yields a [`Fragment`] for every covered pixel center. Edge values and
//! attributes are evaluated once at the first pixel center and then updated
//! incrementally: each step right adds the x coefficients, each new row
//! restarts from the saved row-start values plus the y coefficients.
//!
//! # State machine
//!
//! ```text
//! Idle -> InitEdges -> InitAttributes -> Scan -> Done
//! ```
//!
//! `InitEdges` short-circuits to `Done` when the box is empty. The scan
//! yields at most one fragment per visited pixel.

use crate::core::fixed::Fixed;
use crate::core::gpu::primitives::{Attributes, Fragment};

use super::setup::{pixel_center, EdgeValue, TriangleSetup};

/// Scan converter state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RasterState {
    Idle,
    InitEdges,
    InitAttributes,
    /// Currently visiting pixel `(x, y)`
    Scan { x: i32, y: i32 },
    Done,
}

/// Incremental triangle rasterizer
///
/// # Examples
///
/// ```
/// use celery3d::core::fixed::Fixed;
/// use celery3d::core::gpu::Vertex;
/// use celery3d::core::gpu::render::rasterizer::Rasterizer;
/// use celery3d::core::gpu::render::setup::TriangleSetup;
///
/// let v0 = Vertex::new(Fixed::from_int(0), Fixed::from_int(0));
/// let v1 = Vertex::new(Fixed::from_int(4), Fixed::from_int(0));
/// let v2 = Vertex::new(Fixed::from_int(0), Fixed::from_int(4));
/// let setup = TriangleSetup::new(&v0, &v1, &v2, 8, 8);
///
/// let fragments: Vec<_> = Rasterizer::new(&setup).collect();
/// // Centers on the hypotenuse belong to a bottom-right edge and are skipped
/// assert_eq!(fragments.len(), 6);
/// assert_eq!((fragments[0].x, fragments[0].y), (0, 0));
/// ```
#[derive(Debug, Clone)]
pub struct Rasterizer<'a> {
    setup: &'a TriangleSetup,
    state: RasterState,
    row_edges: [EdgeValue; 3],
    edges: [EdgeValue; 3],
    row_attrs: [Fixed; Attributes::COUNT],
    attrs: [Fixed; Attributes::COUNT],
}

impl<'a> Rasterizer<'a> {
    /// Create a rasterizer for a set-up triangle
    ///
    /// Invalid (zero-area) setups start in `Done` and yield nothing.
    pub fn new(setup: &'a TriangleSetup) -> Self {
        let state = if setup.valid {
            RasterState::Idle
        } else {
            RasterState::Done
        };
        Self {
            setup,
            state,
            row_edges: [EdgeValue::ZERO; 3],
            edges: [EdgeValue::ZERO; 3],
            row_attrs: [Fixed::ZERO; Attributes::COUNT],
            attrs: [Fixed::ZERO; Attributes::COUNT],
        }
    }

    pub fn state(&self) -> RasterState {
        self.state
    }

    /// Advance by one state transition, returning a fragment if one was produced
    pub fn step(&mut self) -> Option<Fragment> {
        match self.state {
            RasterState::Idle => {
                self.state = RasterState::InitEdges;
                None
            }
            RasterState::InitEdges => {
                let bbox = self.setup.bbox;
                if bbox.is_empty() {
                    self.state = RasterState::Done;
                    return None;
                }
                for (value, edge) in self.row_edges.iter_mut().zip(&self.setup.edges) {
                    *value = edge.at_center(bbox.min_x, bbox.min_y);
                }
                self.edges = self.row_edges;
                self.state = RasterState::InitAttributes;
                None
            }
            RasterState::InitAttributes => {
                let bbox = self.setup.bbox;
                let (px, py) = pixel_center(bbox.min_x, bbox.min_y);
                self.row_attrs = self.setup.attributes_at(px, py).to_array();
                self.attrs = self.row_attrs;
                self.state = RasterState::Scan {
                    x: bbox.min_x,
                    y: bbox.min_y,
                };
                None
            }
            RasterState::Scan { x, y } => {
                let fragment = if self.inside() {
                    Some(Fragment::from_attributes(
                        x,
                        y,
                        &Attributes::from_array(self.attrs),
                    ))
                } else {
                    None
                };
                self.advance(x, y);
                fragment
            }
            RasterState::Done => None,
        }
    }

    #[inline(always)]
    fn inside(&self) -> bool {
        let ccw = self.setup.ccw;
        self.setup
            .edges
            .iter()
            .zip(&self.edges)
            .all(|(edge, &value)| edge.inside(value, ccw))
    }

    #[inline(always)]
    fn advance(&mut self, x: i32, y: i32) {
        let bbox = self.setup.bbox;
        let ddx = self.setup.ddx.to_array();
        let ddy = self.setup.ddy.to_array();

        if x < bbox.max_x {
            for (value, edge) in self.edges.iter_mut().zip(&self.setup.edges) {
                *value += edge.step_x();
            }
            for (attr, d) in self.attrs.iter_mut().zip(ddx) {
                *attr += d;
            }
            self.state = RasterState::Scan { x: x + 1, y };
        } else if y < bbox.max_y {
            for (value, edge) in self.row_edges.iter_mut().zip(&self.setup.edges) {
                *value += edge.step_y();
            }
            for (attr, d) in self.row_attrs.iter_mut().zip(ddy) {
                *attr += d;
            }
            self.edges = self.row_edges;
            self.attrs = self.row_attrs;
            self.state = RasterState::Scan {
                x: bbox.min_x,
                y: y + 1,
            };
        } else {
            self.state = RasterState::Done;
        }
    }
}

impl Iterator for Rasterizer<'_> {
    type Item = Fragment;

    fn next(&mut self) -> Option<Fragment> {
        while self.state != RasterState::Done {
            if let Some(fragment) = self.step() {
                return Some(fragment);
            }
        }
        None
    }
}
