//! Math utilities and types
//!
//! Collision geometry is stored by the physics compiler as single precision
//! positions, so everything here is `f32`.

pub use nalgebra::Vector3;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// Build a vector from a slice of exactly three components.
///
/// Returns `None` when the slice has any other length.
pub fn vec3_from_slice(components: &[f32]) -> Option<Vec3> {
    match components {
        [x, y, z] => Some(Vec3::new(*x, *y, *z)),
        _ => None,
    }
}

/// Group a flat `x, y, z, x, y, z, ...` sequence into vectors.
///
/// A trailing partial group (fewer than three values) is dropped.
pub fn vec3s_from_flat(values: &[f32]) -> Vec<Vec3> {
    values
        .chunks_exact(3)
        .filter_map(vec3_from_slice)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3s_from_flat_groups_triples() {
        let vectors = vec3s_from_flat(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(vectors, vec![Vec3::new(1.0, 2.0, 3.0), Vec3::new(4.0, 5.0, 6.0)]);
    }

    #[test]
    fn test_vec3s_from_flat_drops_partial_tail() {
        let vectors = vec3s_from_flat(&[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(vectors.len(), 1);
    }

    #[test]
    fn test_vec3_from_slice_rejects_wrong_length() {
        assert!(vec3_from_slice(&[1.0, 2.0]).is_none());
        assert!(vec3_from_slice(&[1.0, 2.0, 3.0, 4.0]).is_none());
    }
}
