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

use ecmm::error::MappingError;
use ecmm::geometry::Point2;
use ecmm::mapping::{EcmParams, decompose};
use ecmm::outline::{Outline, mark_intersections};

fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Outline {
    Outline::from_points(&[
        Point2::new(x0, y0),
        Point2::new(x0, y1),
        Point2::new(x1, y1),
        Point2::new(x1, y0),
    ])
    .unwrap()
}

fn crossing_pair() -> (Outline, Outline) {
    let mut o1 = rect(0.0, 0.0, 2.0, 2.0);
    let mut o2 = rect(1.0, 0.5, 3.0, 2.5);
    assert_eq!(mark_intersections(&mut o1, &mut o2), 2);
    (o1, o2)
}

#[test]
fn two_crossings_make_two_sectors() {
    let (mut o1, mut o2) = crossing_pair();
    let sectors = decompose(&mut o1, &mut o2, &EcmParams::default()).unwrap();
    assert_eq!(sectors.len(), 2);

    let sum_o1: f64 = sectors.iter().map(|s| s.length_o1).sum();
    let sum_o2: f64 = sectors.iter().map(|s| s.length_o2).sum();
    assert!((sum_o1 - o1.length()).abs() < 1e-9);
    assert!((sum_o2 - o2.length()).abs() < 1e-9);

    let interior: usize = sectors.iter().map(|s| s.vert_s_o1).sum();
    assert_eq!(interior + sectors.len(), o1.len());
    assert!(sectors.iter().all(|s| !s.whole));
}

#[test]
fn sector_direction_and_polarity() {
    let (mut o1, mut o2) = crossing_pair();
    let sectors = decompose(&mut o1, &mut o2, &EcmParams::default()).unwrap();

    // the arc of o2 outside o1 is the long side of its sector
    let grow = sectors.iter().find(|s| s.expansion).expect("one growing sector");
    assert!((grow.length_o1 - 2.5).abs() < 1e-9);
    assert!((grow.length_o2 - 5.5).abs() < 1e-9);
    assert!(!grow.forward_map);
    assert_eq!(grow.outer_normal, 1.0);

    let shrink = sectors.iter().find(|s| !s.expansion).expect("one shrinking sector");
    assert!((shrink.length_o1 - 5.5).abs() < 1e-9);
    assert!(shrink.forward_map);
    assert_eq!(shrink.outer_normal, 1.0);
}

#[test]
fn forced_directions() {
    let (mut o1, mut o2) = crossing_pair();
    let params = EcmParams {
        force_forward_mapping: true,
        ..EcmParams::default()
    };
    let sectors = decompose(&mut o1, &mut o2, &params).unwrap();
    assert!(sectors.iter().all(|s| s.forward_map));

    let (mut o1, mut o2) = crossing_pair();
    let params = EcmParams {
        force_forward_mapping: true,
        force_backward_mapping: true,
        ..EcmParams::default()
    };
    let sectors = decompose(&mut o1, &mut o2, &params).unwrap();
    assert!(sectors.iter().all(|s| !s.forward_map));
}

#[test]
fn nested_outlines_give_one_whole_sector() {
    let mut o1 = rect(0.0, 0.0, 1.0, 1.0);
    let mut o2 = rect(-0.05, -0.05, 1.05, 1.05);
    assert_eq!(mark_intersections(&mut o1, &mut o2), 0);
    let sectors = decompose(&mut o1, &mut o2, &EcmParams::default()).unwrap();
    assert_eq!(sectors.len(), 1);
    let s = &sectors[0];
    assert!(s.whole);
    assert!(s.expansion);
    assert!(!s.forward_map);
    assert_eq!(s.length_o1, o1.length());
    assert_eq!(s.vert_s_o1, 4);

    let sectors = decompose(&mut o2, &mut o1, &EcmParams::default()).unwrap();
    assert!(!sectors[0].expansion);
    assert!(sectors[0].forward_map);
}

#[test]
fn sectors_can_be_disabled() {
    let params = EcmParams {
        force_no_sectors: true,
        ..EcmParams::default()
    };
    let mut o1 = rect(0.0, 0.0, 1.0, 1.0);
    let mut o2 = rect(-0.05, -0.05, 1.05, 1.05);
    mark_intersections(&mut o1, &mut o2);
    let sectors = decompose(&mut o1, &mut o2, &params).unwrap();
    assert_eq!(sectors.len(), 1);
    assert!(sectors[0].whole);

    // crossing outlines cannot be mapped as a whole
    let (mut o1, mut o2) = crossing_pair();
    assert!(matches!(
        decompose(&mut o1, &mut o2, &params),
        Err(MappingError::Degenerate { .. })
    ));
    assert!(o1.iter().all(|v| !o1.vertex(v).intersect && !o1.vertex(v).frozen));
    assert!(o2.iter().all(|v| o2.vertex(v).intersection.is_none()));
    // crossing vertices stay in place as ordinary vertices
    assert_eq!(o1.len(), 6);
}

#[test]
fn unpaired_crossings_are_degenerate() {
    let (mut o1, mut o2) = crossing_pair();
    for o in [&mut o1, &mut o2] {
        let v = o.iter().find(|&v| o.vertex(v).intersection == Some(0)).unwrap();
        o.vertex_mut(v).clear_marks();
    }
    let err = decompose(&mut o1, &mut o2, &EcmParams::default()).unwrap_err();
    assert!(matches!(err, MappingError::Degenerate { .. }));
    assert!(err.is_frame_local());
}

#[test]
fn disjoint_outlines_are_degenerate() {
    let mut o1 = rect(0.0, 0.0, 1.0, 1.0);
    let mut o2 = rect(3.0, 0.0, 4.0, 1.0);
    assert_eq!(mark_intersections(&mut o1, &mut o2), 0);
    assert!(matches!(
        decompose(&mut o1, &mut o2, &EcmParams::default()),
        Err(MappingError::Degenerate { .. })
    ));
}

#[test]
fn summary_carries_sector_facts() {
    let (mut o1, mut o2) = crossing_pair();
    let sectors = decompose(&mut o1, &mut o2, &EcmParams::default()).unwrap();
    let summary = sectors[0].summary(3);
    assert_eq!(summary.id, sectors[0].id);
    assert_eq!(summary.unsnapped, 3);
    assert_eq!(summary.length_o1, sectors[0].length_o1);
}
