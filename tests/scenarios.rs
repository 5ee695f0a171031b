use polymask::style::DrawingStyle;
use polymask::{Annotator, Point, PointerDown, RecordingSurface, SurfaceEvent};

fn annotator() -> Annotator<RecordingSurface> {
    Annotator::new(RecordingSurface::new(), DrawingStyle::default())
}

fn pts(list: &[(f32, f32)]) -> Vec<Point> {
    list.iter().map(|&p| p.into()).collect()
}

/// Scenario A: three clicks leave an open triangle.
fn scenario_a() -> Annotator<RecordingSurface> {
    let mut a = annotator();
    for p in [(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)] {
        a.pointer_down(p.into());
    }
    a
}

#[test]
fn test_scenario_a_open_triangle() {
    let a = scenario_a();
    assert_eq!(a.session().vertices(), pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]));
    assert!(!a.session().is_closed());
    assert!(a.registry().is_empty());
    assert_eq!(a.anchors().len(), 3);
}

#[test]
fn test_scenario_b_closing_commits_mask() {
    let mut a = scenario_a();
    a.vertex_hover_enter(0);
    assert_eq!(a.pointer_down(Point::new(0.0, 0.0)), PointerDown::Closed);

    assert_eq!(a.registry().len(), 1);
    assert_eq!(
        a.registry().masks()[0].vertices(),
        pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 0.0)])
    );
    assert!(a.session().vertices().is_empty());
    assert!(!a.session().is_closed());
    assert!(!a.session().is_hover_on_start());
}

#[test]
fn test_scenario_c_single_vertex_cannot_close() {
    let mut a = annotator();
    a.pointer_down(Point::new(5.0, 5.0));
    a.vertex_hover_enter(0);
    assert!(matches!(
        a.pointer_down(Point::new(5.0, 5.0)),
        PointerDown::Extended { index: 1, .. }
    ));
    assert_eq!(a.session().vertices(), pts(&[(5.0, 5.0), (5.0, 5.0)]));
    assert!(!a.session().is_closed());
    assert!(a.registry().is_empty());
}

#[test]
fn test_scenario_d_moves_after_closure_leave_mask_alone() {
    let mut a = scenario_a();
    a.vertex_hover_enter(0);
    a.pointer_down(Point::new(0.0, 0.0));
    let committed = a.registry().masks()[0].clone();
    let drawn = a.surface().persistent[0].clone();

    a.pointer_move(Point::new(77.0, 88.0));
    a.dispatch(SurfaceEvent::PointerMove(Point::new(1.0, 2.0)));

    assert_eq!(a.registry().masks()[0], committed);
    assert_eq!(a.surface().persistent[0], drawn);
    // Idle again: moves do not start a live tail
    assert!(a.surface().live.as_ref().unwrap().is_empty());
}

#[test]
fn test_closed_mask_last_vertex_equals_first() {
    let mut a = annotator();
    for p in [(3.0, 1.0), (9.0, 2.0), (8.0, 8.0), (2.0, 7.0)] {
        a.pointer_down(p.into());
    }
    a.vertex_hover_enter(0);
    a.pointer_down(Point::new(100.0, 100.0));

    let mask = &a.registry().masks()[0];
    assert_eq!(mask.vertices().first(), mask.vertices().last());
    assert_eq!(mask.base_vertices().len(), 4);
}

#[test]
fn test_live_tail_only_while_open() {
    let mut a = annotator();
    a.pointer_down(Point::new(0.0, 0.0));
    a.pointer_move(Point::new(4.0, 4.0));
    assert_eq!(a.surface().live.as_ref().unwrap().points, vec![0.0, 0.0, 4.0, 4.0]);
    assert_eq!(a.presenter().current().points, vec![0.0, 0.0, 4.0, 4.0]);
}

#[test]
fn test_masks_accumulate_in_order() {
    let mut a = annotator();
    let shapes = [
        [(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)],
        [(20.0, 20.0), (30.0, 20.0), (30.0, 30.0)],
        [(40.0, 0.0), (50.0, 0.0), (45.0, 9.0)],
    ];
    let mut snapshots = Vec::new();
    for shape in shapes {
        for p in shape {
            a.pointer_down(p.into());
        }
        a.vertex_hover_enter(0);
        a.pointer_down(Point::ORIGIN);

        // earlier masks never change
        assert_eq!(&a.registry().masks()[..snapshots.len()], snapshots.as_slice());
        snapshots = a.registry().masks().to_vec();
    }
    assert_eq!(a.registry().len(), 3);
    assert_eq!(a.surface().persistent.len(), 3);
    assert_eq!(a.registry().masks()[1].vertices()[0], Point::new(20.0, 20.0));
}

/// Deterministic pseudo-random event streams: closure never happens with
/// fewer than three vertices, and every mask has at least three corners.
#[test]
fn test_closure_vertex_floor_over_event_streams() {
    let mut seed: u32 = 0x2545_f491;
    let mut next = move || {
        seed ^= seed << 13;
        seed ^= seed >> 17;
        seed ^= seed << 5;
        seed
    };

    for _ in 0..200 {
        let mut a = annotator();
        for _ in 0..40 {
            let r = next();
            let p = Point::new((r % 100) as f32, ((r / 100) % 100) as f32);
            let before = a.session().vertices().len();
            match r % 5 {
                0 | 1 => {
                    let outcome = a.pointer_down(p);
                    if outcome == PointerDown::Closed {
                        assert!(before >= 3, "closed with {before} vertices");
                    }
                }
                2 => a.pointer_move(p),
                3 => a.vertex_hover_enter((r % 4) as usize),
                _ => a.vertex_hover_exit((r % 4) as usize),
            }
        }
        for mask in a.registry().masks() {
            assert!(mask.base_vertices().len() >= 3);
        }
    }
}

#[test]
fn test_hover_exit_idempotent() {
    let mut a = scenario_a();
    a.vertex_hover_enter(0);
    a.vertex_hover_exit(0);
    let session = a.session().clone();
    let scales: Vec<f32> = a.surface().markers.values().map(|m| m.scale).collect();

    a.vertex_hover_exit(0);
    a.vertex_hover_exit(0);

    assert_eq!(a.session(), &session);
    let after: Vec<f32> = a.surface().markers.values().map(|m| m.scale).collect();
    assert_eq!(after, scales);
}

#[test]
fn test_surface_driven_session() {
    let mut a = annotator();
    for p in [(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)] {
        a.surface_mut().pointer = p.into();
        a.dispatch(SurfaceEvent::PointerMove(p.into()));
        a.dispatch(SurfaceEvent::PointerDown);
    }
    let start = a.anchors()[0].handle;
    a.dispatch(SurfaceEvent::MarkerEnter(start));
    a.dispatch(SurfaceEvent::PointerDown);

    assert_eq!(a.registry().len(), 1);
    assert!(a.surface().markers.is_empty());
}
