//! Shapes: Closed Variant Visitation
//!
//! Sums the area of a mixed list of shapes twice: once through a visitor
//! type, once through closures collected by the overload builder.
//!
//! Run with `cargo run --example shapes`.

use std::f64::consts::PI;

use tola_variant::optional::to_int;
use tola_variant::{Variant, Visitor, visit};

// =============================================================================
// Step 1: Alternatives
// =============================================================================

#[derive(Debug, Clone, Copy)]
struct Circle {
    radius: f64,
}

#[derive(Debug, Clone, Copy)]
struct Square {
    size: f64,
}

#[derive(Debug, Clone, Copy)]
struct Rectangle {
    width: f64,
    height: f64,
}

#[derive(Debug, Variant)]
enum Shape {
    Circle(Circle),
    Square(Square),
    Rectangle(Rectangle),
}

// =============================================================================
// Step 2: Visitor, one impl per alternative
// =============================================================================

struct Area;

impl Visitor<Circle> for Area {
    type Output = f64;
    fn visit(&mut self, c: &Circle) -> f64 {
        PI * c.radius * c.radius
    }
}

impl Visitor<Square> for Area {
    type Output = f64;
    fn visit(&mut self, s: &Square) -> f64 {
        s.size * s.size
    }
}

impl Visitor<Rectangle> for Area {
    type Output = f64;
    fn visit(&mut self, r: &Rectangle) -> f64 {
        r.width * r.height
    }
}

fn main() {
    let shapes = [
        Shape::from(Circle { radius: 1.0 }),
        Shape::from(Square { size: 10.0 }),
        Shape::from(Rectangle { width: 10.0, height: 1.0 }),
    ];

    // =========================================================================
    // Step 3: Visit
    // =========================================================================

    let total: f64 = shapes.iter().map(|shape| visit(&mut Area, shape)).sum();
    println!("visitor total area:  {total:.2}");

    let mut area = Shape::overload()
        .on_circle(|c| PI * c.radius * c.radius)
        .on_square(|s| s.size * s.size)
        .on_rectangle(|r| r.width * r.height);
    let total: f64 = shapes.iter().map(|shape| area.visit(shape)).sum();
    println!("overload total area: {total:.2}");

    // =========================================================================
    // Step 4: Catch-all and access errors
    // =========================================================================

    let mut label = Shape::overload()
        .on_circle(|c| format!("circle of radius {}", c.radius))
        .rest(|shape| format!("some {}", shape.alternative().to_lowercase()));
    for shape in &shapes {
        println!("{}", label.visit(shape));
    }

    match shapes[1].get::<Circle>() {
        Ok(circle) => println!("unexpected circle {circle:?}"),
        Err(err) => println!("error: {err}"),
    }

    // =========================================================================
    // Step 5: Optional parsing
    // =========================================================================

    for input in ["123", "a", "123a4", "-42"] {
        match to_int(input).value() {
            Ok(n) => println!("{input:>6} -> {n}"),
            Err(err) => println!("{input:>6} -> {err}"),
        }
    }
}
