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

use std::f64::consts::TAU;

use ecmm::geometry::Point2;
use ecmm::kernel::segments_cross;
use ecmm::outline::Outline;
use ecmm::outline_processing::{
    DENSITY_RATIO, RepairOptions, correct_density, cut_self_intersections, remove_nano_edges, repair,
};
use rand::{Rng, SeedableRng, rngs::StdRng};

fn crossing_edge_pairs(outline: &Outline) -> usize {
    let pts = outline.positions();
    let n = pts.len();
    let mut count = 0;
    for i in 0..n {
        for j in (i + 2)..n {
            if i == 0 && j == n - 1 {
                continue;
            }
            if segments_cross(&pts[i], &pts[(i + 1) % n], &pts[j], &pts[(j + 1) % n]) {
                count += 1;
            }
        }
    }
    count
}

fn star(rng: &mut StdRng, n: usize) -> Vec<Point2> {
    (0..n)
        .map(|i| {
            let a = TAU * i as f64 / n as f64;
            let r = 1.0 + rng.random_range(0.0..0.3);
            Point2::new(r * a.cos(), r * a.sin())
        })
        .collect()
}

#[test]
fn bow_tie_is_cut() {
    let pts = [
        Point2::new(0.0, 0.0),
        Point2::new(1.0, 1.0),
        Point2::new(1.0, 0.0),
        Point2::new(0.0, 1.0),
    ];
    let mut outline = Outline::from_points(&pts).unwrap();
    assert_eq!(crossing_edge_pairs(&outline), 1);
    assert_eq!(cut_self_intersections(&mut outline).unwrap(), 1);
    assert_eq!(crossing_edge_pairs(&outline), 0);
    assert_eq!(outline.len(), 3);
    assert!(outline
        .positions()
        .iter()
        .any(|p| p.distance_to(&Point2::new(0.5, 0.5)) < 1e-12));
}

#[test]
fn random_polygons_end_simple() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..50 {
        let n = rng.random_range(5..25);
        let pts: Vec<Point2> = (0..n)
            .map(|_| Point2::new(rng.random_range(0.0..1.0), rng.random_range(0.0..1.0)))
            .collect();
        let Ok(mut outline) = Outline::from_points(&pts) else {
            continue;
        };
        cut_self_intersections(&mut outline).unwrap();
        assert_eq!(crossing_edge_pairs(&outline), 0);
        assert!(outline.len() >= 3);
    }
}

#[test]
fn nano_edges_keep_the_older_vertex() {
    let pts = [
        Point2::new(0.0, 0.0),
        Point2::new(0.0, 1.0),
        Point2::new(1e-4, 1.0),
        Point2::new(1.0, 1.0),
        Point2::new(1.0, 0.0),
    ];
    let mut outline = Outline::from_points(&pts).unwrap();
    assert_eq!(remove_nano_edges(&mut outline, 1e-3).unwrap(), 1);
    assert_eq!(outline.len(), 4);
    let ids: Vec<u64> = outline.iter().map(|v| outline.vertex(v).tracking).collect();
    assert_eq!(ids, vec![0, 1, 3, 4]);
    let merged = outline.iter().find(|&v| outline.vertex(v).tracking == 1).unwrap();
    assert!((outline.position(merged).x - 5e-5).abs() < 1e-12);
}

#[test]
fn triangles_keep_their_nano_edges() {
    let pts = [Point2::new(0.0, 0.0), Point2::new(0.0, 1.0), Point2::new(1e-4, 1.0)];
    let mut outline = Outline::from_points(&pts).unwrap();
    assert_eq!(remove_nano_edges(&mut outline, 1e-3).unwrap(), 0);
    assert_eq!(outline.len(), 3);

    let options = RepairOptions {
        min_edge_length: 1e-3,
        spacing: None,
    };
    let report = repair(&mut outline, &options).unwrap();
    assert_eq!(report.nano_edges, 0);
    assert_eq!(outline.len(), 3);
}

#[test]
fn density_stays_in_band() {
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..10 {
        let mut outline = Outline::from_points(&star(&mut rng, 40)).unwrap();
        let spacing = rng.random_range(0.03..0.3);
        correct_density(&mut outline, spacing).unwrap();
        for v in outline.iter() {
            let e = outline.edge_length(v);
            assert!(e >= spacing / DENSITY_RATIO - 1e-12, "edge {e} too short for {spacing}");
            assert!(e <= spacing * DENSITY_RATIO + 1e-12, "edge {e} too long for {spacing}");
        }
    }
}

#[test]
fn density_correction_is_idempotent() {
    let mut rng = StdRng::seed_from_u64(9);
    let mut outline = Outline::from_points(&star(&mut rng, 60)).unwrap();
    let first = correct_density(&mut outline, 0.05).unwrap();
    assert!(first.inserted > 0);
    let count = outline.len();
    let second = correct_density(&mut outline, 0.05).unwrap();
    assert_eq!(second.inserted + second.removed, 0);
    assert_eq!(outline.len(), count);
}

#[test]
fn density_keeps_untouched_ids() {
    let pts = [
        Point2::new(0.0, 0.0),
        Point2::new(0.0, 1.0),
        Point2::new(1.0, 1.0),
        Point2::new(1.0, 0.0),
    ];
    let mut outline = Outline::from_points(&pts).unwrap();
    let report = correct_density(&mut outline, 0.25).unwrap();
    assert_eq!(report.inserted, 12);
    assert_eq!(outline.len(), 16);
    for id in 0..4 {
        assert!(outline.iter().any(|v| outline.vertex(v).tracking == id));
    }
    assert!(outline.check_coordinates().is_ok());
}

#[test]
fn full_repair_report() {
    let pts = [
        Point2::new(0.0, 0.0),
        Point2::new(2.0, 2.0),
        Point2::new(2.0, 0.0),
        Point2::new(0.0, 2.0),
    ];
    let mut outline = Outline::from_points(&pts).unwrap();
    let report = repair(&mut outline, &RepairOptions::new(0.2)).unwrap();
    assert_eq!(report.intersections_cut, 1);
    assert!(report.density.inserted > 0);
    assert_eq!(crossing_edge_pairs(&outline), 0);
}
