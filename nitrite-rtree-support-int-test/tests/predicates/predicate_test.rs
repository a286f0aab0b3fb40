use nitrite_rtree_support::predicates;
use nitrite_rtree_support_int_test::test_util::{
    create_test_context, random_rect, rect, run_test, seeded_rng, SPHERE_SRID,
};

#[test]
fn test_contains_under_each_model() {
    run_test(create_test_context, |ctx| {
        let support = ctx.support();
        let outer = rect(170.0, -10.0, 190.0, 10.0);
        let across = rect(-178.0, -5.0, -175.0, 5.0);

        assert!(!support.contains(None, &outer, &across));
        assert!(!support.contains(ctx.srs(3857).as_ref(), &outer, &across));
        assert!(support.contains(ctx.srs(4326).as_ref(), &outer, &across));
        assert!(support.contains(ctx.srs(SPHERE_SRID).as_ref(), &outer, &across));
        Ok(())
    });
}

#[test]
fn test_unknown_srid_is_cartesian() {
    run_test(create_test_context, |ctx| {
        assert!(ctx.srs(0).is_none());
        assert!(ctx.srs(123_456).is_none());

        let outer = rect(170.0, -10.0, 190.0, 10.0);
        let across = rect(-178.0, -5.0, -175.0, 5.0);
        let srs = ctx.srs(123_456);
        assert!(!ctx.support().contains(srs.as_ref(), &outer, &across));
        Ok(())
    });
}

#[test]
fn test_contains_matches_free_function() {
    run_test(create_test_context, |ctx| {
        let mut rng = seeded_rng(7);
        for _ in 0..200 {
            let a = random_rect(&mut rng, 100.0);
            let b = random_rect(&mut rng, 100.0);
            let expected = a.min_x <= b.min_x
                && b.max_x <= a.max_x
                && a.min_y <= b.min_y
                && b.max_y <= a.max_y;
            assert_eq!(ctx.support().contains(None, &a, &b), expected);
            assert_eq!(predicates::contains(None, &a, &b), expected);
        }
        Ok(())
    });
}

#[test]
fn test_equals_is_region_equality() {
    run_test(create_test_context, |ctx| {
        let support = ctx.support();
        let wgs84 = ctx.srs(4326);

        let a = rect(0.1 + 0.2, 0.0, 1.0, 1.0);
        let b = rect(0.3, 0.0, 1.0, 1.0);
        assert_ne!(a, b);
        assert!(support.equals(None, &a, &b));

        let east = rect(180.0, 0.0, 190.0, 10.0);
        let west = rect(-180.0, 0.0, -170.0, 10.0);
        assert!(support.equals(wgs84.as_ref(), &east, &west));
        assert!(!support.equals(None, &east, &west));
        Ok(())
    });
}

#[test]
fn test_intersects_is_always_true() {
    run_test(create_test_context, |ctx| {
        let support = ctx.support();
        let wgs84 = ctx.srs(4326);
        let mut rng = seeded_rng(11);
        for _ in 0..500 {
            let a = random_rect(&mut rng, 1000.0);
            let b = random_rect(&mut rng, 1000.0);
            assert!(support.intersects(None, &a, &b));
            assert!(support.intersects(wgs84.as_ref(), &a, &b));
            assert!(!support.disjoint(None, &a, &b));
        }

        // far apart, a separating-axis test would say false
        let a = rect(0.0, 0.0, 1.0, 1.0);
        let b = rect(50.0, 50.0, 60.0, 60.0);
        assert!(support.intersects(None, &a, &b));
        assert!(!support.disjoint(None, &a, &b));
        Ok(())
    });
}

#[test]
fn test_malformed_input_degrades_to_false() {
    run_test(create_test_context, |ctx| {
        let support = ctx.support();
        let a = rect(0.0, 0.0, 10.0, 10.0);
        let broken = rect(1.0, f64::NAN, 2.0, 2.0);

        assert!(!support.contains(None, &a, &broken));
        assert!(!support.equals(ctx.srs(4326).as_ref(), &broken, &broken));
        assert!(!support.within(None, &broken, &a));
        assert!(predicates::try_equals(None, &broken, &a).is_err());
        Ok(())
    });
}
