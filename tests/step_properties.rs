use bevy::prelude::Color;
use rand::{rngs::StdRng, Rng, SeedableRng};

use bouncing_ball::{Ball, Container};

fn ball(x: f32, y: f32, radius: f32, speed_x: f32, speed_y: f32) -> Ball {
    Ball {
        x,
        y,
        radius,
        speed_x,
        speed_y,
        color: Color::WHITE,
    }
}

/// Containment with a little slack for `(max - r) + r` rounding.
fn inside(c: &Container, b: &Ball) -> bool {
    const EPS: f32 = 1e-3;
    b.x - b.radius >= c.min_x - EPS
        && b.x + b.radius <= c.max_x + EPS
        && b.y - b.radius >= c.min_y - EPS
        && b.y + b.radius <= c.max_y + EPS
}

#[test]
fn left_wall_example() {
    let c = Container::new(0.0, 0.0, 200.0, 200.0);
    let mut b = ball(5.0, 100.0, 10.0, -5.0, 0.0);
    b.step(&c);
    assert_eq!(b.x, 10.0);
    assert_eq!(b.speed_x, 5.0);
    assert_eq!(b.y, 100.0);
}

#[test]
fn bottom_wall_example() {
    let c = Container::new(0.0, 0.0, 200.0, 200.0);
    let mut b = ball(100.0, 195.0, 10.0, 0.0, 8.0);
    b.step(&c);
    assert_eq!(b.y, 190.0);
    assert_eq!(b.speed_y, -8.0);
}

#[test]
fn rescale_example() {
    let mut b = ball(100.0, 100.0, 10.0, 3.0, 4.0);
    b.set_speed(10.0);
    assert!((b.speed_x - 6.0).abs() < 1e-5);
    assert!((b.speed_y - 8.0).abs() < 1e-5);
    assert!((b.speed_y / b.speed_x - 4.0 / 3.0).abs() < 1e-5);
}

#[test]
fn corner_hit_reflects_both_axes() {
    let c = Container::new(0.0, 0.0, 200.0, 200.0);
    let mut b = ball(12.0, 12.0, 10.0, -5.0, -5.0);
    b.step(&c);
    assert_eq!((b.x, b.y), (10.0, 10.0));
    assert_eq!((b.speed_x, b.speed_y), (5.0, 5.0));
}

#[test]
fn offset_container_is_respected() {
    let c = Container::new(50.0, 30.0, 150.0, 90.0);
    let mut b = ball(60.0, 60.0, 10.0, -20.0, 0.0);
    b.step(&c);
    assert_eq!(b.x, 60.0);
    assert_eq!(b.speed_x, 20.0);
}

#[test]
fn random_balls_stay_inside_and_keep_speed() {
    let mut rng = StdRng::seed_from_u64(2024);
    for _ in 0..100 {
        let w = rng.gen_range(50.0..1000.0f32);
        let h = rng.gen_range(50.0..1000.0f32);
        let c = Container::from_size(w, h);
        let radius = rng.gen_range(1.0..c.max_radius());
        let x = rng.gen_range(radius..=w - radius);
        let y = rng.gen_range(radius..=h - radius);
        let angle = rng.gen_range(0.0..360.0f32);
        let speed = rng.gen_range(0.5..40.0f32);
        let mut b = Ball::new(x, y, radius, speed, angle, Color::WHITE);
        let start = b.speed();
        for _ in 0..500 {
            b.step(&c);
            assert!(inside(&c, &b), "escaped {c}: {b}");
        }
        assert!((b.speed() - start).abs() <= start * 1e-5);
    }
}

#[test]
fn recenter_after_external_shrink() {
    let mut c = Container::from_size(640.0, 480.0);
    let mut b = ball(600.0, 400.0, 30.0, 2.0, 2.0);
    c.resize(0.0, 0.0, 320.0, 240.0);
    // resize alone leaves the ball outside
    assert!(!c.contains_circle(b.x, b.y, b.radius));
    b.recenter(&c);
    assert_eq!((b.x, b.y), (290.0, 210.0));
    assert!(c.contains_circle(b.x, b.y, b.radius));
}
