use spike_runner::geometry::Rect;

#[test]
fn edges_from_center_and_size() {
    let r = Rect::new(100.0, 50.0, 20.0, 10.0);
    assert_eq!(r.left(), 90.0);
    assert_eq!(r.right(), 110.0);
    assert_eq!(r.top(), 45.0);
    assert_eq!(r.bottom(), 55.0);
}

#[test]
fn try_new_rejects_empty_sizes() {
    assert!(Rect::try_new(0.0, 0.0, 1.0, 1.0).is_some());
    assert!(Rect::try_new(0.0, 0.0, 0.0, 1.0).is_none());
    assert!(Rect::try_new(0.0, 0.0, 1.0, -2.0).is_none());
}

#[test]
fn overlapping_rects() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    let b = Rect::new(8.0, 8.0, 10.0, 10.0);
    assert!(a.overlaps(&b));
    assert!(b.overlaps(&a));
}

#[test]
fn touching_edges_do_not_overlap() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    let right = Rect::new(10.0, 0.0, 10.0, 10.0);
    let below = Rect::new(0.0, 10.0, 10.0, 10.0);
    assert!(!a.overlaps(&right));
    assert!(!a.overlaps(&below));
}

#[test]
fn contained_rect_overlaps() {
    let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
    let inner = Rect::new(5.0, 5.0, 2.0, 2.0);
    assert!(outer.overlaps(&inner));
}

#[test]
fn contains_point_is_half_open() {
    let r = Rect::new(5.0, 0.5, 10.0, 1.0); // cells 0..10 on row 0
    assert!(r.contains_point(0.0, 0.0));
    assert!(r.contains_point(9.0, 0.0));
    assert!(!r.contains_point(10.0, 0.0));
    assert!(!r.contains_point(0.0, 1.0));
}

#[test]
fn with_bottom_keeps_size() {
    let r = Rect::new(250.0, 250.0, 20.0, 20.0).with_bottom(301.0);
    assert_eq!(r.bottom(), 301.0);
    assert_eq!(r.y, 291.0);
    assert_eq!(r.height, 20.0);
    assert_eq!(r.x, 250.0);
}

#[test]
fn translate_moves_center() {
    let r = Rect::new(1.0, 2.0, 3.0, 4.0).translate(-1.0, 0.5);
    assert_eq!((r.x, r.y), (0.0, 2.5));
    assert_eq!((r.width, r.height), (3.0, 4.0));
}
