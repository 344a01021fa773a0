//! Closed-form intercept without acceleration.
//!
//! The projectile leaves at full speed `s`; it meets the target when
//! `|D + V·t|² = (s·t)²`, i.e.
//! `(V·V − s²)·t² + 2(D·V)·t + D·D = 0`.

use super::{InterceptQuery, InterceptSolution};
use crate::math::{normalize_or_zero, Vec3};

/// Leading coefficients smaller than this are solved as a linear equation.
const DEGENERATE_QUADRATIC: f32 = 1e-6;

pub(super) fn solve(query: &InterceptQuery) -> Option<InterceptSolution> {
    let d = query.target_pos - query.launch_pos;
    let v = query.target_velocity;
    let s = query.max_speed;

    let a = v.dot(&v) - s * s;
    let b = 2.0 * d.dot(&v);
    let c = d.dot(&d);

    let (intercept_t, alt_t) = if a.abs() < DEGENERATE_QUADRATIC {
        // target as fast as the ball: only a closing target can be caught
        if b.abs() < DEGENERATE_QUADRATIC {
            return None;
        }
        let t = -c / b;
        (t, t)
    } else {
        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }
        let root = discriminant.sqrt();
        let r0 = (-b - root) / (2.0 * a);
        let r1 = (-b + root) / (2.0 * a);
        let (near, far) = if r0 <= r1 { (r0, r1) } else { (r1, r0) };

        if near > 0.0 {
            (near, far)
        } else {
            (far, far)
        }
    };

    if intercept_t <= 0.0 || !intercept_t.is_finite() {
        return None;
    }

    let intercept = query.target_position_at(intercept_t);
    let aim = intercept
        - query.launch_pos
        - query.acceleration * (0.5 * intercept_t * intercept_t);

    let direction = normalize_or_zero(&aim);
    if direction == Vec3::zeros() {
        return None;
    }

    Some(InterceptSolution { direction, speed: s, intercept_t, alt_t })
}
