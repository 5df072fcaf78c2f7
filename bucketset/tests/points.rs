//! Point array set operations, sorting and serialization

use bucketset::{Point, Pta, SortBy, SortOrder};

fn pta(points: &[(i32, i32)]) -> Pta {
    points.iter().copied().collect()
}

#[test]
fn intersection_example() {
    let a = pta(&[(0, 0), (1, 1), (2, 2)]);
    let b = pta(&[(1, 1), (2, 2), (3, 3)]);
    let expected = pta(&[(1, 1), (2, 2)]);
    assert_eq!(a.intersection_by_hash(&b).unwrap(), expected);
    assert_eq!(a.intersection_by_tree(&b), expected);
}

#[test]
fn union_and_dedup() {
    let a = pta(&[(5, 5), (1, 2), (5, 5)]);
    let b = pta(&[(1, 2), (-4, 0)]);
    let expected = pta(&[(5, 5), (1, 2), (-4, 0)]);
    assert_eq!(a.union_by_hash(&b).unwrap(), expected);
    assert_eq!(a.union_by_tree(&b), expected);

    let dedup = a.remove_dups_by_hash().unwrap();
    assert_eq!(dedup.values(), &[Point::new(5.0, 5.0), Point::new(1.0, 2.0)]);
    assert_eq!(dedup.find(&Point::new(1.0, 2.0)), Some(1));
    assert_eq!(a.remove_dups_by_tree(), pta(&[(5, 5), (1, 2)]));
}

#[test]
fn lookup_by_pixel() {
    let mut points = Pta::new();
    for i in 0..200 {
        points.push(i as f32 * 0.25, 3.0);
    }
    let index = points.hash_index().unwrap();
    // 9.5 up to 10.25 all round to pixel 10, and 9.5 comes first
    assert_eq!(index.find(&Point::new(10.25, 3.0)), Some(38));
    assert_eq!(index.find(&Point::new(10.3, 3.0)), Some(38));
    assert_eq!(index.find(&Point::new(10.6, 3.0)), Some(42));
    assert!(!index.contains(&Point::new(10.25, 3.5)));
    assert!(!index.contains(&Point::new(60.0, 3.0)));
}

#[test]
fn subpixel_points_agree_across_engines() {
    let a: Pta = [(1.2, 1.0), (0.8, 1.0), (3.0, 3.4)].into_iter().collect();
    let b: Pta = [(0.8, 1.0), (5.0, 5.0)].into_iter().collect();

    let by_hash = a.remove_dups_by_hash().unwrap();
    assert_eq!(by_hash.values(), a.remove_dups_by_tree().points());
    assert_eq!(
        by_hash.values(),
        &[Point::new(1.2, 1.0), Point::new(3.0, 3.4)]
    );

    let common = a.intersection_by_hash(&b).unwrap();
    assert_eq!(common, a.intersection_by_tree(&b));
    assert_eq!(common.points(), &[Point::new(0.8, 1.0)]);

    assert_eq!(a.union_by_hash(&b).unwrap(), a.union_by_tree(&b));
}

#[test]
fn pixel_grid_round_trip() {
    let grid: Pta = (0..40)
        .flat_map(|y| (0..40).map(move |x| (x, y)))
        .collect();
    let mut doubled = grid.clone();
    doubled.join(&grid, ..).unwrap();
    assert_eq!(doubled.len(), 3200);

    let dedup = doubled.remove_dups_by_hash().unwrap();
    assert_eq!(dedup.values(), grid.points());
    assert_eq!(doubled.intersection_by_hash(&grid).unwrap(), grid);
}

#[test]
fn sorted_copy() {
    let points = pta(&[(3, 0), (1, 5), (2, 1)]);
    let (sorted, index) = points.sort(SortBy::X, SortOrder::Increasing);
    assert_eq!(index, vec![1, 2, 0]);
    assert_eq!(sorted, pta(&[(1, 5), (2, 1), (3, 0)]));
    let (by_y, _) = points.sort(SortBy::Y, SortOrder::Decreasing);
    assert_eq!(by_y, sorted);
    assert_eq!(points.sort_by_index(&index).unwrap(), sorted);
}

#[test]
fn json_layout() {
    let points = pta(&[(1, 2), (-3, 4)]);
    let json = serde_json::to_string(&points).unwrap();
    assert_eq!(json, r#"[{"x":1.0,"y":2.0},{"x":-3.0,"y":4.0}]"#);
    let parsed: Pta = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, points);

    let by: SortBy = serde_json::from_str(r#""y""#).unwrap();
    assert_eq!(by, SortBy::Y);
}
