//! Integrationstests für Ring-Traversierung und Snapshot-Konstruktion:
//! - Abflachen terminiert auch auf geschlossenen Ringen
//! - Polygon-Umkehrung und Umlaufrichtung
//! - Ring-Invariante nach gemischten Einfüge-/Lösch-Folgen

use approx::assert_abs_diff_eq;
use glam::{DAffine2, DVec2};
use zone_spline::{EditableSpline, SerializableSpline, TraversalMode, Winding};

/// Regelmäßiges n-Eck gegen den Uhrzeigersinn
fn polygon(n: usize) -> Vec<DVec2> {
    (0..n)
        .map(|i| {
            let angle = i as f64 * std::f64::consts::TAU / n as f64;
            DVec2::new(angle.cos(), angle.sin())
        })
        .collect()
}

#[test]
fn test_flatten_count_matches_vertex_count() {
    for n in [0usize, 1, 2, 3, 17, 256] {
        let mut editable = EditableSpline::new();
        for point in polygon(n) {
            editable.append_vertex(point);
        }

        let snapshot = SerializableSpline::from_editable(&editable);
        assert_eq!(snapshot.len(), n);
        assert_eq!(snapshot.len(), editable.vertex_count());
    }
}

#[test]
fn test_documented_flatten_scenario() {
    let mut editable = EditableSpline::new();
    editable.append_vertex(DVec2::new(0.0, 0.0));
    editable.append_vertex(DVec2::new(1.0, 0.0));
    editable.append_vertex(DVec2::new(1.0, 1.0));

    let snapshot = SerializableSpline::from_editable(&editable);
    assert_eq!(
        snapshot.points(),
        &[
            DVec2::new(0.0, 0.0),
            DVec2::new(1.0, 0.0),
            DVec2::new(1.0, 1.0)
        ]
    );
}

#[test]
fn test_documented_polygon_scenario() {
    let snapshot = SerializableSpline::from_polygon(&[
        DVec2::new(0.0, 0.0),
        DVec2::new(1.0, 0.0),
        DVec2::new(1.0, 1.0),
    ]);
    assert_eq!(
        snapshot.points(),
        &[
            DVec2::new(1.0, 1.0),
            DVec2::new(1.0, 0.0),
            DVec2::new(0.0, 0.0)
        ]
    );
}

#[test]
fn test_polygon_and_ring_sources_share_winding_convention() {
    let ccw_polygon = polygon(8);
    assert_eq!(Winding::of(&ccw_polygon), Winding::CounterClockwise);

    let from_polygon = SerializableSpline::from_polygon(&ccw_polygon);
    assert_eq!(Winding::of(from_polygon.points()), Winding::Clockwise);

    let editable = EditableSpline::from_serializable(&from_polygon);
    let flattened = SerializableSpline::from_editable(&editable);
    assert_eq!(Winding::of(flattened.points()), Winding::Clockwise);
}

#[test]
fn test_ring_invariant_after_mixed_edits() {
    let mut editable = EditableSpline::new();
    let mut ids = Vec::new();
    for point in polygon(10) {
        ids.push(editable.append_vertex(point));
    }

    for (step, id) in ids.iter().enumerate() {
        if step % 3 == 0 {
            editable.remove_vertex(*id);
        } else if step % 3 == 1 {
            editable.insert_after(*id, DVec2::splat(step as f64));
        } else {
            editable.insert_before(*id, DVec2::splat(-(step as f64)));
        }
        assert!(editable.ring_is_consistent(), "Ring inkonsistent nach Schritt {step}");
    }

    assert_eq!(editable.vertex_count(), 10 - 4 + 6);
    assert_eq!(
        editable.vertices(TraversalMode::NoLoop).count(),
        editable.vertex_count()
    );
    assert_eq!(
        SerializableSpline::from_editable(&editable).len(),
        editable.vertex_count()
    );
}

#[test]
fn test_loop_traversal_is_unbounded() {
    let mut editable = EditableSpline::new();
    for point in polygon(3) {
        editable.append_vertex(point);
    }

    assert_eq!(editable.vertices(TraversalMode::Loop).take(1000).count(), 1000);
}

#[test]
fn test_quarter_turn_and_identity() {
    let snapshot = SerializableSpline::from_polygon(&[DVec2::new(1.0, 0.0)]);
    let rotated = snapshot.transformed(&DAffine2::from_angle(std::f64::consts::FRAC_PI_2));
    assert_abs_diff_eq!(rotated.points()[0].x, 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(rotated.points()[0].y, 1.0, epsilon = 1e-12);

    let square = SerializableSpline::from_polygon(&polygon(4));
    assert_eq!(square.transformed_with(|p| p), square);
}
