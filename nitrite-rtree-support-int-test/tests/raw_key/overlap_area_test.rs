use nitrite_rtree_support::{overlap_area, Rectangle};
use nitrite_rtree_support_int_test::test_util::{
    create_test_context, key, random_rect, rect, run_test, seeded_rng,
};

fn intersection(a: &Rectangle, b: &Rectangle) -> Option<Rectangle> {
    let r = rect(
        a.min_x.max(b.min_x),
        a.min_y.max(b.min_y),
        a.max_x.min(b.max_x),
        a.max_y.min(b.max_y),
    );
    r.is_valid().then_some(r)
}

#[test]
fn test_overlap_area_scenario() {
    run_test(create_test_context, |ctx| {
        let a = key(&rect(0.0, 0.0, 10.0, 10.0));
        let b = key(&rect(5.0, 5.0, 15.0, 15.0));
        assert_eq!(ctx.support().overlap_area(&a, &b, 32)?, 25.0);
        assert_eq!(
            ctx.support().overlap_area(&a, &b, 32)?,
            ctx.support().area(None, &rect(5.0, 5.0, 10.0, 10.0))
        );
        Ok(())
    });
}

#[test]
fn test_overlap_area_is_symmetric() {
    run_test(create_test_context, |ctx| {
        let mut rng = seeded_rng(31);
        for _ in 0..500 {
            let a = key(&random_rect(&mut rng, 100.0));
            let b = key(&random_rect(&mut rng, 100.0));
            assert_eq!(
                ctx.support().overlap_area(&a, &b, 32)?,
                ctx.support().overlap_area(&b, &a, 32)?
            );
        }
        Ok(())
    });
}

#[test]
fn test_overlap_area_matches_intersection() {
    run_test(create_test_context, |ctx| {
        let mut rng = seeded_rng(37);
        for _ in 0..500 {
            let a = random_rect(&mut rng, 100.0);
            let b = random_rect(&mut rng, 100.0);
            let expected = intersection(&a, &b).map_or(0.0, |r| ctx.support().area(None, &r));
            assert_eq!(overlap_area(&key(&a), &key(&b), 32)?, expected);
        }
        Ok(())
    });
}

#[test]
fn test_disjoint_on_any_axis_is_zero() {
    run_test(create_test_context, |_ctx| {
        let a = key(&rect(0.0, 0.0, 10.0, 10.0));
        assert_eq!(overlap_area(&a, &key(&rect(11.0, 0.0, 20.0, 10.0)), 32)?, 0.0);
        assert_eq!(overlap_area(&a, &key(&rect(0.0, -5.0, 10.0, -1.0)), 32)?, 0.0);
        assert_eq!(overlap_area(&a, &key(&rect(20.0, 20.0, 30.0, 30.0)), 32)?, 0.0);
        Ok(())
    });
}

#[test]
fn test_contained_key_overlaps_with_its_area() {
    run_test(create_test_context, |ctx| {
        let outer = key(&rect(-50.0, -50.0, 50.0, 50.0));
        let mut rng = seeded_rng(41);
        for _ in 0..200 {
            let inner = random_rect(&mut rng, 50.0);
            assert_eq!(
                overlap_area(&key(&inner), &outer, 32)?,
                ctx.support().area(None, &inner)
            );
        }
        Ok(())
    });
}

#[test]
fn test_single_dimension_prefix() {
    run_test(create_test_context, |_ctx| {
        let a = key(&rect(0.0, 0.0, 10.0, 10.0));
        let b = key(&rect(4.0, 100.0, 6.0, 200.0));
        assert_eq!(overlap_area(&a, &b, 16)?, 2.0);
        assert_eq!(overlap_area(&a, &b, 32)?, 0.0);
        Ok(())
    });
}
