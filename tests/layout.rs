mod common;

use common::{assert_digits, d, init_tracing};
use tacitsvg::{
    ArithmeticError, Circle, Drawing, Error, ExactDecimal, Measure, Point, Rectangle, ShapeId,
    UnsupportedOperation,
};

type Geometry = Vec<(ExactDecimal, ExactDecimal, ExactDecimal, ExactDecimal)>;

fn geometry(drawing: &Drawing, ids: &[ShapeId]) -> Geometry {
    ids.iter()
        .map(|&id| {
            let shape = drawing.shape(id).unwrap();
            (
                shape.explicit_x().unwrap(),
                shape.explicit_y().unwrap(),
                shape.explicit_width().unwrap(),
                shape.explicit_height().unwrap(),
            )
        })
        .collect()
}

fn chain(drawing: &mut Drawing, ids: &[ShapeId]) {
    for pair in ids.windows(2) {
        drawing.set_right_of(pair[1], pair[0]).unwrap();
    }
}

#[test]
fn resolution_is_order_independent() {
    init_tracing();
    const N: usize = 4;

    // constraints first, shapes added afterwards, width before height
    let mut early = Drawing::new();
    let early_ids: Vec<_> = (0..N).map(|_| early.create(Circle::new())).collect();
    chain(&mut early, &early_ids);
    for &id in &early_ids {
        early.add_shape(id).unwrap();
    }
    early.set_explicit_width(400).unwrap();
    early.set_explicit_height(150).unwrap();

    // shapes and dimensions first, constraints last, height before width
    let mut late = Drawing::new();
    let late_ids: Vec<_> = (0..N).map(|_| late.add(Circle::new())).collect();
    late.set_explicit_height(150).unwrap();
    late.set_explicit_width(400).unwrap();
    chain(&mut late, &late_ids);

    assert_eq!(geometry(&early, &early_ids), geometry(&late, &late_ids));
    assert_eq!(early.ratio().unwrap(), 100);
}

#[test]
fn re_adding_a_shape_changes_nothing() {
    let mut drawing = Drawing::new();
    let a = drawing.add(Circle::new());
    let b = drawing.add(Circle::new());
    drawing.set_right_of(b, a).unwrap();
    drawing.add_shape(a).unwrap();
    drawing.add_shape(b).unwrap();

    assert_eq!(drawing.shapes().collect::<Vec<_>>(), vec![a, b]);
    assert_eq!(drawing.implicit_width().unwrap(), 2);
}

#[test]
fn single_shape_fits_the_tighter_dimension() {
    let mut drawing = Drawing::new();
    let only = drawing.add(Circle::new());
    drawing.set_explicit_dimensions(80, 30).unwrap();

    assert_eq!(drawing.ratio().unwrap(), 30);
    let shape = drawing.shape(only).unwrap();
    assert_eq!(shape.explicit_width().unwrap(), 30);
    assert_eq!(shape.explicit_center().unwrap(), Point::new(40, 15));
}

#[test]
fn two_chained_shapes_split_the_width() {
    let mut drawing = Drawing::new();
    let a = drawing.add(Rectangle::new());
    let b = drawing.add(Rectangle::new());
    drawing.set_right_of(b, a).unwrap();
    drawing.set_explicit_dimensions(200, 100).unwrap();

    for id in [a, b] {
        let shape = drawing.shape(id).unwrap();
        assert_eq!(shape.explicit_width().unwrap(), 100);
        assert_eq!(shape.explicit_height().unwrap(), 100);
    }
    assert_eq!(drawing.shape(a).unwrap().explicit_x().unwrap(), 0);
    assert_eq!(drawing.shape(b).unwrap().explicit_x().unwrap(), 100);
}

#[test]
fn one_circle_fills_a_square() {
    let mut drawing = Drawing::new();
    let circle = drawing.add(Circle::new());
    drawing.set_explicit_dimensions(100, 100).unwrap();

    let circle = drawing.shape(circle).unwrap();
    assert_eq!(circle.explicit_center().unwrap(), Point::new(50, 50));
    assert_eq!(circle.explicit_width().unwrap(), 100);
}

#[test]
fn two_circles_share_a_square() {
    let mut drawing = Drawing::new();
    let a = drawing.add(Circle::new());
    let b = drawing.add(Circle::new());
    drawing.set_right_of(b, a).unwrap();
    drawing.set_explicit_dimensions(100, 100).unwrap();

    assert_eq!(drawing.shape(a).unwrap().explicit_center().unwrap(), Point::new(25, 50));
    assert_eq!(drawing.shape(b).unwrap().explicit_center().unwrap(), Point::new(75, 50));
    assert_eq!(drawing.shape(b).unwrap().explicit_width().unwrap(), 50);
}

#[test]
fn three_circles_divide_into_thirds() {
    let mut drawing = Drawing::new();
    let ids: Vec<_> = (0..3).map(|_| drawing.add(Circle::new())).collect();
    chain(&mut drawing, &ids);
    drawing.set_explicit_dimensions(100, 100).unwrap();

    let centers: Vec<Point> = ids
        .iter()
        .map(|&id| drawing.shape(id).unwrap().explicit_center().unwrap())
        .collect();
    assert_digits(centers[0].x(), "16.666666666");
    assert_eq!(centers[1].x(), 50);
    assert_digits(centers[2].x(), "83.333333333");
    assert!(centers.iter().all(|c| c.y() == 50));
}

#[test]
fn left_of_and_above_mirror_their_counterparts() {
    let mut drawing = Drawing::new();
    let center = drawing.add(Rectangle::new());
    let left = drawing.add(Rectangle::new());
    let top = drawing.add(Rectangle::new());
    drawing.set_left_of(left, center).unwrap();
    drawing.set_above(top, center).unwrap();
    drawing.set_explicit_dimensions(200, 200).unwrap();

    let left = drawing.shape(left).unwrap();
    let top = drawing.shape(top).unwrap();
    assert_eq!(left.implicit_x_center().unwrap(), -1);
    assert_eq!(top.implicit_y_center().unwrap(), -1);
    assert_eq!(left.explicit_x().unwrap(), 0);
    assert_eq!(left.explicit_y().unwrap(), 100);
    assert_eq!(top.explicit_x().unwrap(), 100);
    assert_eq!(top.explicit_y().unwrap(), 0);
}

#[test]
fn implicit_gaps_scale_with_the_drawing() {
    let mut drawing = Drawing::new();
    let a = drawing.add(Circle::new());
    let b = drawing.add(Circle::new());
    drawing.set_below_with_gap(b, a, Measure::implicit(1)).unwrap();
    drawing.set_explicit_height(300).unwrap();

    assert_eq!(drawing.implicit_height().unwrap(), 3);
    assert_eq!(drawing.ratio().unwrap(), 100);
    assert_eq!(drawing.shape(b).unwrap().explicit_y().unwrap(), 200);
    assert_eq!(drawing.explicit_width().unwrap(), 100);
}

#[test]
fn ports_sit_on_edge_midpoints() {
    let mut drawing = Drawing::new();
    let rect = drawing.add(Rectangle::with_aspect_ratio(2));
    drawing.set_explicit_dimensions(200, 100).unwrap();

    let rect = drawing.shape(rect).unwrap();
    assert_eq!(rect.left_port().unwrap(), Point::new(0, 50));
    assert_eq!(rect.right_port().unwrap(), Point::new(200, 50));
    assert_eq!(rect.top_port().unwrap(), Point::new(100, 0));
    assert_eq!(rect.bottom_port().unwrap(), Point::new(100, 100));
}

#[test]
fn repeated_reads_are_stable() {
    let mut drawing = Drawing::new();
    let a = drawing.add(Circle::new());
    let b = drawing.add(Circle::new());
    drawing.set_right_of(b, a).unwrap();
    drawing.set_explicit_dimensions(d("99.9"), 70).unwrap();

    let first = geometry(&drawing, &[a, b]);
    let second = geometry(&drawing, &[a, b]);
    assert_eq!(first, second);
    assert_eq!(drawing.ratio().unwrap(), d("49.95"));
}

#[test]
fn self_adjacency_is_an_unsupported_operation() {
    let mut drawing = Drawing::new();
    let a = drawing.add(Circle::new());
    let err = drawing.set_right_of(a, a).unwrap_err();
    assert!(err.is_unsupported_operation());
    assert!(matches!(
        err,
        Error::Unsupported(UnsupportedOperation::SelfAdjacency { .. })
    ));
    assert_eq!(drawing.implicit_width().unwrap(), 1);
}

#[test]
fn cycles_are_rejected() {
    let mut drawing = Drawing::new();
    let a = drawing.add(Circle::new());
    let b = drawing.add(Circle::new());
    let c = drawing.add(Circle::new());
    drawing.set_right_of(b, a).unwrap();
    drawing.set_right_of(c, b).unwrap();

    let err = drawing.set_right_of(a, c).unwrap_err();
    assert_eq!(err, Error::Unsupported(UnsupportedOperation::ConstraintCycle));
    assert_eq!(drawing.implicit_width().unwrap(), 3);
}

#[test]
fn long_fractional_aspect_ratio_resolves() {
    init_tracing();
    let mut drawing = Drawing::new();
    let circle = drawing.add(Circle::new());
    let rect = drawing.add(Rectangle::with_aspect_ratio(d("1.123456789")));
    drawing.set_right_of(rect, circle).unwrap();
    drawing.set_explicit_dimensions(100, 100).unwrap();

    let ratio = drawing.ratio().unwrap();
    assert_eq!(ratio, d("47.09302328072944836364"));

    let circle = drawing.shape(circle).unwrap();
    assert_eq!(circle.explicit_width().unwrap(), ratio);
    assert!(circle.explicit_x().unwrap() >= 0);

    let rect = drawing.shape(rect).unwrap();
    let width = rect.explicit_width().unwrap();
    assert_eq!(width, d("52.90697671927055163635"));
    let right = rect.explicit_x().unwrap().checked_add(&width).unwrap();
    let overshoot = right.checked_sub(&ExactDecimal::from(100)).unwrap();
    assert!(overshoot.abs() < d("1e-18"), "right edge at {right}");

    assert!(drawing.render_with_dimensions(100, 100).is_ok());
}

#[test]
fn fractional_diameters_scale_exactly() {
    let mut drawing = Drawing::new();
    let big = drawing.add(Circle::with_diameter(d("1.5")));
    let small = drawing.add(Circle::with_diameter(d("0.333333333333")));
    drawing.set_right_of(small, big).unwrap();
    drawing.set_explicit_dimensions(220, 100).unwrap();

    let big = drawing.shape(big).unwrap();
    assert_eq!(big.explicit_width().unwrap(), 100);
    assert_eq!(big.explicit_y().unwrap(), 0);

    let small = drawing.shape(small).unwrap();
    assert_eq!(small.explicit_width().unwrap(), d("22.2222222222"));
    assert_eq!(small.explicit_y().unwrap(), d("38.8888888889"));
}

#[test]
fn gaps_beyond_decimal_range_are_errors() {
    let mut drawing = Drawing::new();
    let a = drawing.add(Circle::new());
    let b = drawing.add(Circle::new());
    let c = drawing.add(Circle::new());
    let huge = Measure::explicit(d("5e28"));
    drawing.set_right_of_with_gap(b, a, huge).unwrap();
    drawing.set_right_of_with_gap(c, b, huge).unwrap();

    assert_eq!(
        drawing.implicit_width().unwrap_err(),
        Error::Arithmetic(ArithmeticError::Overflow)
    );
    assert!(drawing.render().is_err());
}
