use nitrite_rtree_support::Rectangle;
use nitrite_rtree_support_int_test::test_util::{
    create_test_context, random_rect, rect, run_test, seeded_rng,
};

fn reversed(rect: &Rectangle) -> Rectangle {
    Rectangle::from_mbr([rect.max_x, rect.min_x, rect.max_y, rect.min_y])
}

#[test]
fn test_reversed_encoding_inverts_result() {
    run_test(create_test_context, |ctx| {
        let support = ctx.support();
        let a = Rectangle::from_mbr([10.0, 0.0, 10.0, 0.0]);
        let b = rect(0.0, 0.0, 10.0, 10.0);

        assert!(a.is_inverted());
        assert!(support.within(None, &a.normalized(), &b));
        assert!(!support.within(None, &a, &b));
        Ok(())
    });
}

#[test]
fn test_identical_reversed_rectangles_are_not_inverted() {
    run_test(create_test_context, |ctx| {
        let a = Rectangle::from_mbr([10.0, 0.0, 10.0, 0.0]);
        assert!(ctx.support().within(None, &a, &a));
        assert!(ctx.support().within(ctx.srs(4326).as_ref(), &a, &a));
        Ok(())
    });
}

#[test]
fn test_reversed_answer_is_negated_forward_answer() {
    run_test(create_test_context, |ctx| {
        let support = ctx.support();
        let wgs84 = ctx.srs(4326);
        let mut rng = seeded_rng(3);
        for _ in 0..300 {
            let a = random_rect(&mut rng, 80.0);
            let b = random_rect(&mut rng, 80.0);
            if a.width() == 0.0 || a.height() == 0.0 || a == b {
                continue;
            }
            let flipped = reversed(&a);
            assert_eq!(support.within(None, &flipped, &b), !support.within(None, &a, &b));
            assert_eq!(
                support.within(wgs84.as_ref(), &flipped, &b),
                !support.within(wgs84.as_ref(), &a, &b)
            );
        }
        Ok(())
    });
}

#[test]
fn test_reversed_outer_rectangle_is_normalized() {
    run_test(create_test_context, |ctx| {
        let a = rect(2.0, 2.0, 4.0, 4.0);
        let b = reversed(&rect(0.0, 0.0, 10.0, 10.0));
        assert!(ctx.support().within(None, &a, &b));
        Ok(())
    });
}

#[test]
fn test_within_is_contains_swapped() {
    run_test(create_test_context, |ctx| {
        let support = ctx.support();
        let mut rng = seeded_rng(5);
        for _ in 0..300 {
            let a = random_rect(&mut rng, 50.0);
            let b = random_rect(&mut rng, 50.0);
            assert_eq!(support.within(None, &a, &b), support.contains(None, &b, &a));
        }
        Ok(())
    });
}
