use bevy_math::Vec2;

use crate::{ThrustDirection, VehicleSpec};

/// Highest sustainable velocity along `direction` (local frame).
///
/// Each axis gets its own top speed from the thrust-to-weight ratio of the
/// thruster pushing that way; off-axis bearings lie on the ellipse spanned by
/// the two axis maxima. The result keeps `direction`'s bearing and is capped by
/// [`VehicleSpec::velocity_cap`].
pub fn max_velocity(direction: Vec2, spec: &VehicleSpec, mass: f32) -> Vec2 {
    let Some(dir) = direction.try_normalize() else {
        return Vec2::ZERO;
    };
    if !(mass > 0.0) {
        return Vec2::ZERO;
    }

    let horiz = if dir.x > 0.0 { ThrustDirection::East } else { ThrustDirection::West };
    let vert = if dir.y > 0.0 { ThrustDirection::North } else { ThrustDirection::South };
    let horiz_max = axis_max_velocity(spec.thrust(horiz), mass, spec);
    let vert_max = axis_max_velocity(spec.thrust(vert), mass, spec);

    let speed = ellipse_radius(horiz_max, vert_max, dir);
    dir * speed.min(spec.velocity_cap())
}

/// Top speed along one axis for a given thrust.
pub(super) fn axis_max_velocity(thrust: f32, mass: f32, spec: &VehicleSpec) -> f32 {
    let twr = thrust.abs() / mass;
    let mult = (twr / spec.base_max_velocity_twr).powf(spec.max_velocity_scaling_exponent);
    if mult.is_finite() {
        spec.base_max_linear_velocity * mult
    } else {
        0.0
    }
}

/// Radius of the axis-aligned ellipse with semi-axes `h` (x) and `v` (y) along
/// the unit vector `dir`.
fn ellipse_radius(h: f32, v: f32, dir: Vec2) -> f32 {
    // Exact axis bearings short-circuit; the slope form is undefined there.
    if dir.y == 0.0 {
        return h;
    }
    if dir.x == 0.0 {
        return v;
    }
    // r = h·v / sqrt(h²·sin² + v²·cos²)
    let denom = (h * h * dir.y * dir.y + v * v * dir.x * dir.x).sqrt();
    if denom > 0.0 {
        h * v / denom
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_spec() -> VehicleSpec {
        VehicleSpec {
            linear_thrust: [100.0; 4],
            angular_thrust: 10.0,
            base_max_linear_velocity: 10.0,
            base_max_velocity_twr: 10.0,
            max_velocity_scaling_exponent: 1.0,
            upper_max_velocity: 1000.0,
            set_max_velocity: None,
            max_angular_velocity: 4.0,
            brake_coefficient: 1.5,
        }
    }

    #[test]
    fn axis_aligned_is_exact() {
        let spec = square_spec();
        let v = max_velocity(Vec2::X, &spec, 10.0);
        assert_eq!(v, Vec2::new(10.0, 0.0));
        let v = max_velocity(Vec2::NEG_Y * 3.0, &spec, 10.0);
        assert_eq!(v, Vec2::new(0.0, -10.0));
    }

    #[test]
    fn opposite_directions_have_equal_magnitude() {
        let spec = square_spec();
        let east = max_velocity(Vec2::X, &spec, 10.0);
        let west = max_velocity(Vec2::NEG_X, &spec, 10.0);
        assert_eq!(east.length(), west.length());
    }

    #[test]
    fn diagonal_interpolates_between_axes() {
        let mut spec = square_spec();
        // East twice as strong as north → east max 20, north max 10.
        spec.linear_thrust = [100.0, 200.0, 100.0, 100.0];
        let diag = max_velocity(Vec2::new(1.0, 1.0), &spec, 10.0).length();
        assert!(diag > 10.0 && diag < 20.0, "diag = {diag}");

        // Near-axis bearings converge on the axis maximum.
        let near_east = max_velocity(Vec2::new(1.0, 1e-4), &spec, 10.0).length();
        assert!((near_east - 20.0).abs() < 1e-2, "near_east = {near_east}");
    }

    #[test]
    fn equal_axes_give_a_circle() {
        let spec = square_spec();
        let diag = max_velocity(Vec2::new(-1.0, 1.0), &spec, 10.0).length();
        assert!((diag - 10.0).abs() < 1e-4, "diag = {diag}");
    }

    #[test]
    fn capped_by_global_and_user_limits() {
        let mut spec = square_spec();
        spec.upper_max_velocity = 8.0;
        assert!((max_velocity(Vec2::X, &spec, 10.0).length() - 8.0).abs() < 1e-6);
        spec.set_max_velocity = Some(3.0);
        assert!((max_velocity(Vec2::X, &spec, 10.0).length() - 3.0).abs() < 1e-6);
    }

    #[test]
    fn degenerate_inputs_return_zero() {
        let spec = square_spec();
        assert_eq!(max_velocity(Vec2::ZERO, &spec, 10.0), Vec2::ZERO);
        assert_eq!(max_velocity(Vec2::X, &spec, 0.0), Vec2::ZERO);

        let mut dead = spec.clone();
        dead.linear_thrust = [0.0; 4];
        assert_eq!(max_velocity(Vec2::new(1.0, 1.0), &dead, 10.0), Vec2::ZERO);
    }
}
