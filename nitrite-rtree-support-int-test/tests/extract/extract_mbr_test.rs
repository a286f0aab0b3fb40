use nitrite_rtree_support::wkb::encode_wkb_big_endian;
use nitrite_rtree_support::{
    extract_mbr, Coordinate, Geometry, MbrStatus, Rectangle, RtreeSupport, SpatialError,
};
use nitrite_rtree_support_int_test::test_util::{
    box_polygon, create_test_context, line, random_rect, rect, record, record_with_payload,
    run_test, seeded_rng,
};

#[test]
fn test_polygon_envelope() {
    run_test(create_test_context, |ctx| {
        let mut rng = seeded_rng(43);
        for _ in 0..100 {
            let r = random_rect(&mut rng, 1e5);
            let extracted = ctx.support().extract_mbr(None, &record(0, &box_polygon(&r)))?;
            assert_eq!(extracted.rectangle, r);
            assert_eq!(extracted.srid, 0);
        }
        Ok(())
    });
}

#[test]
fn test_big_endian_payload() {
    run_test(create_test_context, |ctx| {
        let geometry = line(&[(1.0, 9.0), (-4.0, 2.0), (3.0, 3.0)]);
        let payload = encode_wkb_big_endian(&geometry)?;
        let extracted = ctx
            .support()
            .extract_mbr(None, &record_with_payload(0, &payload))?;
        assert_eq!(extracted.rectangle, rect(-4.0, 2.0, 1.0, 9.0));
        Ok(())
    });
}

#[test]
fn test_collection_envelope() {
    run_test(create_test_context, |ctx| {
        let collection = Geometry::GeometryCollection(vec![
            Geometry::point(-5.0, 1.0),
            Geometry::empty_point(),
            Geometry::MultiPoint(vec![Coordinate::new(2.0, 8.0)]),
            box_polygon(&rect(0.0, -3.0, 1.0, 0.0)),
        ]);
        let extracted = ctx.support().extract_mbr(None, &record(0, &collection))?;
        assert_eq!(extracted.rectangle, rect(-5.0, -3.0, 2.0, 8.0));
        Ok(())
    });
}

#[test]
fn test_empty_geometry_is_full_domain() {
    run_test(create_test_context, |ctx| {
        for geometry in [
            Geometry::empty_point(),
            Geometry::MultiPoint(vec![]),
            Geometry::GeometryCollection(vec![Geometry::GeometryCollection(vec![])]),
        ] {
            let extracted = ctx.support().extract_mbr(None, &record(0, &geometry))?;
            assert_eq!(
                extracted.rectangle.to_mbr(),
                [f64::MIN, f64::MAX, f64::MIN, f64::MAX]
            );

            let wgs84 = ctx.srs(4326);
            let extracted = ctx
                .support()
                .extract_mbr(wgs84.as_ref(), &record(4326, &geometry))?;
            assert_eq!(extracted.rectangle, Rectangle::full_domain());
        }
        Ok(())
    });
}

#[test]
fn test_geographic_envelope_follows_geodesics() {
    run_test(create_test_context, |ctx| {
        let wgs84 = ctx.srs(4326);
        let geometry = line(&[(0.0, 60.0), (90.0, 60.0)]);

        let geographic = ctx
            .support()
            .extract_mbr(wgs84.as_ref(), &record(4326, &geometry))?;
        assert!(geographic.rectangle.max_y > 67.0 && geographic.rectangle.max_y < 68.0);
        assert!((geographic.rectangle.min_y - 60.0).abs() < 1e-9);
        assert!((geographic.rectangle.max_x - 90.0).abs() < 1e-9);

        let planar = ctx.support().extract_mbr(None, &record(4326, &geometry))?;
        assert_eq!(planar.rectangle, rect(0.0, 60.0, 90.0, 60.0));
        Ok(())
    });
}

#[test]
fn test_extract_record_mbr_fetches_srs() {
    run_test(create_test_context, |ctx| {
        let geometry = line(&[(0.0, 60.0), (90.0, 60.0)]);
        let extracted = ctx
            .support()
            .extract_record_mbr(ctx.session(), &record(4326, &geometry))?;
        assert!(extracted.rectangle.max_y > 67.0);

        let extracted = ctx
            .support()
            .extract_record_mbr(ctx.session(), &record(3857, &geometry))?;
        assert_eq!(extracted.rectangle.max_y, 60.0);
        Ok(())
    });
}

#[test]
fn test_out_of_range_geographic_coordinates() {
    run_test(create_test_context, |ctx| {
        let wgs84 = ctx.srs(4326);
        let result = ctx
            .support()
            .extract_mbr(wgs84.as_ref(), &record(4326, &Geometry::point(200.0, 0.0)));
        assert!(matches!(result, Err(SpatialError::MalformedCoordinates(_))));
        Ok(())
    });
}

#[test]
fn test_srid_must_match_reference_system() {
    run_test(create_test_context, |ctx| {
        let wgs84 = ctx.srs(4326);
        let result = ctx
            .support()
            .extract_mbr(wgs84.as_ref(), &record(3857, &Geometry::point(1.0, 1.0)));
        assert!(matches!(
            result,
            Err(SpatialError::SridMismatch {
                expected: 4326,
                found: 3857
            })
        ));
        Ok(())
    });
}

#[test]
fn test_mixed_srid_index() {
    run_test(create_test_context, |ctx| {
        let planar = record(3857, &Geometry::point(1.0, 1.0));
        assert_eq!(ctx.support().extract_mbr(None, &planar)?.srid, 3857);

        let strict = RtreeSupport::builder().allow_mixed_srid_index(false).build()?;
        assert!(matches!(
            strict.extract_mbr(None, &planar),
            Err(SpatialError::MixedSridRejected(3857))
        ));
        assert!(strict.extract_mbr(None, &record(0, &Geometry::point(1.0, 1.0))).is_ok());
        Ok(())
    });
}

#[test]
fn test_malformed_records_fail() {
    run_test(create_test_context, |ctx| {
        let support = ctx.support();
        let valid = record(0, &box_polygon(&rect(0.0, 0.0, 1.0, 1.0)));

        let cases: Vec<Vec<u8>> = vec![
            vec![],
            vec![0, 0, 0],
            record_with_payload(0, &[]),
            valid[..valid.len() - 8].to_vec(),
            record_with_payload(0, &[9, 1, 0, 0, 0]),
            record_with_payload(0, &[1, 42, 0, 0, 0]),
            [valid.as_slice(), &[0u8][..]].concat(),
        ];
        for case in cases {
            let result = support.extract_mbr(None, &case);
            assert!(result.is_err(), "accepted {:?}", case);
            assert_eq!(MbrStatus::from(&result).code(), -1);
        }

        assert_eq!(MbrStatus::from(&extract_mbr(None, &valid)).code(), 0);
        Ok(())
    });
}
