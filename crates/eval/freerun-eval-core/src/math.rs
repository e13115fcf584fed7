//! Small vector/quaternion helpers over plain arrays.

/// Linear interpolation of scalars.
#[inline]
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
pub fn lerp_vec3(a: [f32; 3], b: [f32; 3], t: f32) -> [f32; 3] {
    [
        lerp_f32(a[0], b[0], t),
        lerp_f32(a[1], b[1], t),
        lerp_f32(a[2], b[2], t),
    ]
}

#[inline]
pub fn dot3(a: [f32; 3], b: [f32; 3]) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

#[inline]
fn cross3(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

/// Rotate a vector by a quaternion (x,y,z,w): v' = v + w*t + q×t with
/// t = 2(q×v).
#[inline]
pub fn quat_rotate_vec3(q: [f32; 4], v: [f32; 3]) -> [f32; 3] {
    let axis = [q[0], q[1], q[2]];
    let t = cross3(axis, v);
    let t = [t[0] * 2.0, t[1] * 2.0, t[2] * 2.0];
    let c = cross3(axis, t);
    [
        v[0] + q[3] * t[0] + c[0],
        v[1] + q[3] * t[1] + c[1],
        v[2] + q[3] * t[2] + c[2],
    ]
}

/// Quaternion for a rotation of `angle` radians around the X axis.
#[inline]
pub fn quat_rotate_x(angle: f32) -> [f32; 4] {
    let half = angle * 0.5;
    [half.sin(), 0.0, 0.0, half.cos()]
}

/// Quaternion for a rotation of `angle` radians around the Y axis.
#[inline]
pub fn quat_rotate_y(angle: f32) -> [f32; 4] {
    let half = angle * 0.5;
    [0.0, half.sin(), 0.0, half.cos()]
}

/// Quaternion for a rotation of `angle` radians around the Z axis.
#[inline]
pub fn quat_rotate_z(angle: f32) -> [f32; 4] {
    let half = angle * 0.5;
    [0.0, 0.0, half.sin(), half.cos()]
}
