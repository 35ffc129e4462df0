use super::*;

#[test]
fn horizontal_and_vertical_runs() {
    let h: Vec<_> = BresenhamLine::new((2, 5), (6, 5)).collect();
    assert_eq!(h, vec![(2, 5), (3, 5), (4, 5), (5, 5), (6, 5)]);
    let v: Vec<_> = BresenhamLine::new((1, 3), (1, 0)).collect();
    assert_eq!(v, vec![(1, 3), (1, 2), (1, 1), (1, 0)]);
}

#[test]
fn single_point_line() {
    let p: Vec<_> = BresenhamLine::new((4, 4), (4, 4)).collect();
    assert_eq!(p, vec![(4, 4)]);
}

#[test]
fn steep_line_has_one_pixel_per_row() {
    let pts: Vec<_> = BresenhamLine::new((0, 0), (3, 10)).collect();
    assert_eq!(pts.len(), 11);
    assert_eq!(pts.first(), Some(&(0, 0)));
    assert_eq!(pts.last(), Some(&(3, 10)));
    for (i, (_, y)) in pts.iter().enumerate() {
        assert_eq!(*y, i as i32);
    }
}

#[test]
fn diagonal_is_symmetric() {
    let fwd: Vec<_> = BresenhamLine::new((0, 0), (5, 5)).collect();
    let mut back: Vec<_> = BresenhamLine::new((5, 5), (0, 0)).collect();
    back.reverse();
    assert_eq!(fwd, back);
}
