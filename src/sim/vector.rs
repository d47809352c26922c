//! 2D velocity/direction values
//!
//! Velocities are plain `glam::Vec2` values: copied by value, zero by
//! default, scaled with `*` (which returns a new vector). The only extra
//! behaviour is an in-place normalise that leaves a zero vector untouched.

use glam::Vec2;

/// Velocity/direction pair used by every entity
pub type Vector2 = Vec2;

/// In-place normalisation
pub trait Normalise {
    /// Scale to unit length; a zero-length vector is left as is
    fn normalise(&mut self);
}

impl Normalise for Vec2 {
    #[inline]
    fn normalise(&mut self) {
        let magnitude = self.length();
        if magnitude == 0.0 {
            return;
        }
        *self /= magnitude;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normalise_zero_is_noop() {
        let mut v = Vector2::ZERO;
        v.normalise();
        assert_eq!(v, Vector2::ZERO);
    }

    #[test]
    fn test_normalise_unit_length() {
        let mut v = Vector2::new(3.0, 4.0);
        v.normalise();
        assert!((v.x - 0.6).abs() < 1e-6);
        assert!((v.y - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_scale_returns_new_vector() {
        let v = Vector2::new(1.0, -2.0);
        let scaled = v * 3.0;
        assert_eq!(scaled, Vector2::new(3.0, -6.0));
        assert_eq!(v, Vector2::new(1.0, -2.0));
    }

    proptest! {
        #[test]
        fn prop_normalised_length_is_one(x in -1.0e3f32..1.0e3, y in -1.0e3f32..1.0e3) {
            prop_assume!(x.abs() > 1e-3 || y.abs() > 1e-3);
            let mut v = Vector2::new(x, y);
            v.normalise();
            prop_assert!((v.length() - 1.0).abs() < 1e-4);
        }
    }
}
