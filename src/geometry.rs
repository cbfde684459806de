use nalgebra_glm::{vec3, Vec3};

/// The tutorial triangle in normalized device coordinates: left, right, top.
pub fn triangle() -> [Vec3; 3] {
    [
        vec3(-0.5, -0.5, 0.0),
        vec3(0.5, -0.5, 0.0),
        vec3(0.0, 0.5, 0.0),
    ]
}

/// Flattens vertices into tightly packed `x, y, z` floats.
pub fn positions(vertices: &[Vec3]) -> Vec<f32> {
    vertices
        .iter()
        .flat_map(|v| v.as_slice().iter().copied())
        .collect()
}

/// Whether `v` lies inside the [-1, 1] cube. Anything outside is clipped.
pub fn in_ndc(v: &Vec3) -> bool {
    v.iter().all(|c| (-1.0..=1.0).contains(c))
}
