pub use bevy_math::{DVec2, Vec3};

pub type Vec3f = Vec3;

/// Smallest yaw/pitch increment of the host's 16-bit angle encoding, in degrees.
pub const ANGLE_UNIT: f64 = 360.0 / 65536.0;

/// Horizontal speeds below this count as standing still.
pub const MIN_SPEED: f64 = 0.1;

/// Quantizes an angle the way the host does: truncate to whole angle units and
/// wrap into [0, 360).
pub fn anglemod(a: f64) -> f64 {
    let units = (a * (65536.0 / 360.0)) as i64 & 65535;
    units as f64 * ANGLE_UNIT
}

#[inline]
pub fn horizontal(v: Vec3f) -> DVec2 {
    DVec2::new(v.x as f64, v.y as f64)
}

/// Heading of a horizontal vector in degrees, counter-clockwise from +X.
#[inline]
pub fn heading_deg(v: DVec2) -> f64 {
    v.y.atan2(v.x).to_degrees()
}

#[inline]
pub fn unit_from_yaw(yaw_deg: f64) -> DVec2 {
    let (s, c) = yaw_deg.to_radians().sin_cos();
    DVec2::new(c, s)
}
