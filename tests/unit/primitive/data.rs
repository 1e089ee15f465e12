use super::*;

#[test]
fn empty_payload_matches_requested_type() {
    for ty in PrimitiveType::ALL {
        assert_eq!(Primitive::empty(ty).primitive_type(), ty);
    }
}

#[test]
fn accessors_only_match_their_variant() {
    let mut p = Primitive::empty(PrimitiveType::Polygon);
    assert!(p.as_polygon().is_some());
    assert!(p.as_mesh().is_none());
    assert!(p.as_surface_mut().is_none());
    p.as_polygon_mut().unwrap().vertices.push(Point::new(1.0, 2.0));
    assert_eq!(p.as_polygon().unwrap().vertices.len(), 1);
}

#[test]
fn convex_outline_is_fanned() {
    let square = Polygon::convex([
        Point::new(0.0, 0.0),
        Point::new(4.0, 0.0),
        Point::new(4.0, 4.0),
        Point::new(0.0, 4.0),
    ]);
    assert_eq!(square.triangles, vec![[0, 1, 2], [0, 2, 3]]);
    square.validate().unwrap();

    assert!(Polygon::convex([Point::ORIGIN, Point::new(1.0, 0.0)]).triangles.is_empty());
}

#[test]
fn polygon_validation_reports_bad_index() {
    let poly = Polygon {
        vertices: vec![Point::ORIGIN; 3],
        triangles: vec![[0, 1, 3]],
    };
    let err = poly.validate().unwrap_err();
    assert!(err.to_string().contains("references vertex 3"));
}

#[test]
fn transformed_triangles_apply_transform_and_skip_bad_indices() {
    let poly = Polygon {
        vertices: vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(0.0, 1.0)],
        triangles: vec![[0, 1, 2], [0, 1, 7]],
    };
    let tris: Vec<_> = poly
        .transformed_triangles(Affine::translate((10.0, 20.0)))
        .collect();
    assert_eq!(
        tris,
        vec![[
            Point::new(10.0, 20.0),
            Point::new(11.0, 20.0),
            Point::new(10.0, 21.0)
        ]]
    );
}

#[test]
fn primitive_type_serializes_snake_case() {
    let json = serde_json::to_string(&PrimitiveType::ColoredPolygon).unwrap();
    assert_eq!(json, "\"colored_polygon\"");
}

#[test]
fn colored_polygon_roundtrips_through_json() {
    let colored = ColoredPolygon {
        polygon: Polygon::convex([
            Point::new(0.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(0.0, 2.0),
        ]),
        color: Color::GREEN,
    };
    let json = serde_json::to_string(&colored).unwrap();
    let back: ColoredPolygon = serde_json::from_str(&json).unwrap();
    assert_eq!(back, colored);
}
