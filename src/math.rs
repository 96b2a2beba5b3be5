use druid::Color;

pub type Vec3 = [f64; 3];
pub type Mat3 = [[f64; 3]; 3];

pub const IDENTITY: Mat3 = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];

/// Edge function used in rasterization
pub fn edge_function(a: &[f64; 2], b: &[f64; 2], c: &[f64; 2]) -> f64 {
    (c[0] - a[0]) * (b[1] - a[1]) - (c[1] - a[1]) * (b[0] - a[0])
}

/// Multiplies a 3x3 matrix by a 3-dimensional vector
pub fn multiply_matrix_vector(matrix: &Mat3, vector: &Vec3) -> Vec3 {
    let mut result = [0.0; 3];
    for i in 0..3 {
        for j in 0..3 {
            result[i] += matrix[i][j] * vector[j];
        }
    }
    result
}

/// Multiplies two 3x3 matrices
pub fn multiply_matrices(a: &Mat3, b: &Mat3) -> Mat3 {
    let mut result = [[0.0; 3]; 3];
    for i in 0..3 {
        for j in 0..3 {
            for k in 0..3 {
                result[i][j] += a[i][k] * b[k][j];
            }
        }
    }
    result
}

/// Right-handed rotation about the X axis, angle in degrees
pub fn rotation_x(degrees: f64) -> Mat3 {
    let (s, c) = degrees.to_radians().sin_cos();
    [[1.0, 0.0, 0.0], [0.0, c, -s], [0.0, s, c]]
}

/// Right-handed rotation about the Y axis, angle in degrees
pub fn rotation_y(degrees: f64) -> Mat3 {
    let (s, c) = degrees.to_radians().sin_cos();
    [[c, 0.0, s], [0.0, 1.0, 0.0], [-s, 0.0, c]]
}

/// Rodrigues rotation about an arbitrary unit axis, angle in degrees
pub fn rotation_about_axis(axis: &Vec3, degrees: f64) -> Mat3 {
    let [x, y, z] = normalize(axis);
    let (s, c) = degrees.to_radians().sin_cos();
    let t = 1.0 - c;
    [
        [t * x * x + c, t * x * y - s * z, t * x * z + s * y],
        [t * x * y + s * z, t * y * y + c, t * y * z - s * x],
        [t * x * z - s * y, t * y * z + s * x, t * z * z + c],
    ]
}

pub fn add(a: &Vec3, b: &Vec3) -> Vec3 {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

pub fn sub(a: &Vec3, b: &Vec3) -> Vec3 {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

pub fn scale(v: &Vec3, s: f64) -> Vec3 {
    [v[0] * s, v[1] * s, v[2] * s]
}

pub fn dot(a: &Vec3, b: &Vec3) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

pub fn cross(a: &Vec3, b: &Vec3) -> Vec3 {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

pub fn length(v: &Vec3) -> f64 {
    dot(v, v).sqrt()
}

/// Returns the unit vector, or the input unchanged when it has zero length
pub fn normalize(v: &Vec3) -> Vec3 {
    let len = length(v);
    if len == 0.0 {
        *v
    } else {
        scale(v, 1.0 / len)
    }
}

/// Two-sided Lambert intensity for a point lit from `light_pos`
pub fn calculate_light_intensity(
    normal: &Vec3,
    position: &Vec3,
    light_pos: &Vec3,
    ambient: f64,
    diffuse: f64,
) -> f64 {
    let light_dir = normalize(&sub(light_pos, position));
    ambient + diffuse * dot(normal, &light_dir).abs()
}

/// Applies lighting to a color
pub fn apply_lighting(color: &Vec3, intensity: f64) -> Color {
    let channel = |c: f64| (c * intensity * 255.0).round().clamp(0.0, 255.0) as u8;
    Color::rgb8(channel(color[0]), channel(color[1]), channel(color[2]))
}

/// Converts a [0, 1] RGB triple to an opaque color
pub fn to_color(color: &Vec3) -> Color {
    apply_lighting(color, 1.0)
}
