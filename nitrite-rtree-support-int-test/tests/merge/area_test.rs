use nitrite_rtree_support::{merge, Rectangle};
use nitrite_rtree_support_int_test::test_util::{
    create_test_context, random_rect, rect, run_test, seeded_rng, SPHERE_SRID,
};
use std::f64::consts::PI;

fn relative_error(actual: f64, expected: f64) -> f64 {
    ((actual - expected) / expected).abs()
}

#[test]
fn test_cartesian_area_is_exact() {
    run_test(create_test_context, |ctx| {
        let mut rng = seeded_rng(23);
        for _ in 0..500 {
            let r = random_rect(&mut rng, 1e4);
            let expected = (r.max_x - r.min_x) * (r.max_y - r.min_y);
            assert_eq!(ctx.support().area(None, &r), expected);
            assert_eq!(ctx.support().area(ctx.srs(3857).as_ref(), &r), expected);
        }
        Ok(())
    });
}

#[test]
fn test_degenerate_areas_are_zero() {
    run_test(create_test_context, |ctx| {
        let support = ctx.support();
        let wgs84 = ctx.srs(4326);
        for r in [rect(3.0, 3.0, 3.0, 3.0), rect(1.0, 2.0, 1.0, 8.0), rect(1.0, 2.0, 9.0, 2.0)] {
            assert_eq!(support.area(None, &r), 0.0);
            assert_eq!(support.area(wgs84.as_ref(), &r), 0.0);
        }
        Ok(())
    });
}

#[test]
fn test_geographic_area_wgs84() {
    run_test(create_test_context, |ctx| {
        let support = ctx.support();
        let wgs84 = ctx.srs(4326);

        let cell = support.area(wgs84.as_ref(), &rect(0.0, 0.0, 1.0, 1.0));
        assert!(relative_error(cell, 12_308_776_256.88) < 1e-9);

        let square = support.area(wgs84.as_ref(), &rect(0.0, 0.0, 10.0, 10.0));
        assert!(relative_error(square, 1_227_857_363_074.86) < 1e-9);

        let globe = support.area(wgs84.as_ref(), &rect(-180.0, -90.0, 180.0, 90.0));
        assert!(relative_error(globe, 510_065_621_724_088.4) < 1e-9);
        Ok(())
    });
}

#[test]
fn test_geographic_area_sphere() {
    run_test(create_test_context, |ctx| {
        let sphere = ctx.srs(SPHERE_SRID);
        let radius: f64 = 6_371_007.0;
        let hemisphere = ctx
            .support()
            .area(sphere.as_ref(), &rect(-180.0, 0.0, 180.0, 90.0));
        assert!(relative_error(hemisphere, 2.0 * PI * radius * radius) < 1e-12);
        Ok(())
    });
}

#[test]
fn test_geographic_area_is_translation_invariant_in_longitude() {
    run_test(create_test_context, |ctx| {
        let wgs84 = ctx.srs(4326);
        let here = ctx.support().area(wgs84.as_ref(), &rect(0.0, 20.0, 5.0, 30.0));
        let there = ctx.support().area(wgs84.as_ref(), &rect(100.0, 20.0, 105.0, 30.0));
        assert!(relative_error(here, there) < 1e-9);
        Ok(())
    });
}

#[test]
fn test_join_area() {
    run_test(create_test_context, |ctx| {
        let support = ctx.support();
        let a = rect(0.0, 0.0, 10.0, 10.0);
        let b = rect(5.0, 5.0, 15.0, 15.0);
        assert_eq!(support.join_area(None, &a, &b), 225.0);

        let wgs84 = ctx.srs(4326);
        let joined = support.joined(wgs84.as_ref(), &a, &b);
        let expected = support.area(wgs84.as_ref(), &joined);
        assert!(relative_error(support.join_area(wgs84.as_ref(), &a, &b), expected) < 1e-12);
        assert!(relative_error(expected, 2_753_525_997_478.5) < 1e-9);
        Ok(())
    });
}

#[test]
fn test_join_area_is_never_non_finite() {
    run_test(create_test_context, |ctx| {
        let support = ctx.support();
        let low = rect(-f64::MAX, -f64::MAX, -1.0, -1.0);
        let high = rect(1.0, 1.0, f64::MAX, f64::MAX);
        assert_eq!(support.join_area(None, &low, &high), f64::MAX);

        let infinite = rect(f64::NEG_INFINITY, 0.0, 0.0, 1.0);
        assert_eq!(support.join_area(None, &infinite, &high), f64::MAX);
        assert!(merge::try_join_area(None, &infinite, &high).is_ok());
        Ok(())
    });
}

#[test]
fn test_geographic_join_area_overflow_is_max() {
    run_test(create_test_context, |ctx| {
        let support = ctx.support();
        let small = rect(0.0, 0.0, 10.0, 10.0);
        for srid in [4326, SPHERE_SRID] {
            let srs = ctx.srs(srid);
            assert_eq!(
                support.join_area(srs.as_ref(), &Rectangle::full_domain(), &small),
                f64::MAX
            );
            assert!(!support.area(srs.as_ref(), &Rectangle::full_domain()).is_finite());
        }
        Ok(())
    });
}

#[test]
fn test_malformed_entry_ranks_last() {
    run_test(create_test_context, |ctx| {
        let support = ctx.support();
        let node = rect(0.0, 0.0, 10.0, 10.0);
        let broken = rect(f64::NAN, 0.0, 1.0, 1.0);
        let far = rect(0.0, 0.0, 1000.0, 1000.0);

        assert_eq!(support.join_area(None, &node, &broken), f64::MAX);
        assert_eq!(support.join_area(ctx.srs(4326).as_ref(), &node, &broken), f64::MAX);
        assert!(support.join_area(None, &node, &broken) > support.join_area(None, &node, &far));
        assert_eq!(support.area(None, &broken), 0.0);
        Ok(())
    });
}
