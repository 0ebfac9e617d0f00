#![forbid(unsafe_code)]

//! Perspective camera.
//!
//! Conventions: right-handed world, camera looks down its local `-Z` with
//! `+Y` up. Rotation is an XYZ Euler triple (radians) applied as
//! `Rx * Ry * Rz`, so a camera with zero rotation at `(0, 0, d)` looks at
//! the origin.

use hearth_core::geometry::Vec3;

/// A world point mapped to the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    /// Pixel column (may be outside the viewport).
    pub x: f32,
    /// Pixel row (may be outside the viewport).
    pub y: f32,
    /// Distance along the view axis, in world units.
    pub depth: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    position: Vec3,
    rotation: Vec3,
    fov_deg: f32,
    near: f32,
    far: f32,
    viewport: (f32, f32),
    // Row-major rotation, cached from `rotation`.
    basis: [[f32; 3]; 3],
    focal: f32,
}

impl Camera {
    /// Perspective camera at the origin with no rotation.
    pub fn perspective(fov_deg: f32, near: f32, far: f32) -> Self {
        let mut camera = Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            fov_deg,
            near,
            far,
            viewport: (1.0, 1.0),
            basis: IDENTITY,
            focal: 1.0,
        };
        camera.rebuild();
        camera
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Set the Euler rotation (radians, XYZ order).
    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self.rebuild();
        self
    }

    /// Set the viewport in pixels. Aspect ratio follows.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.viewport = (width.max(1) as f32, height.max(1) as f32);
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        self.viewport.0 / self.viewport.1
    }

    #[inline]
    pub fn viewport(&self) -> (f32, f32) {
        self.viewport
    }

    fn rebuild(&mut self) {
        let (sx, cx) = self.rotation.x.sin_cos();
        let (sy, cy) = self.rotation.y.sin_cos();
        let (sz, cz) = self.rotation.z.sin_cos();
        let rx = [[1.0, 0.0, 0.0], [0.0, cx, -sx], [0.0, sx, cx]];
        let ry = [[cy, 0.0, sy], [0.0, 1.0, 0.0], [-sy, 0.0, cy]];
        let rz = [[cz, -sz, 0.0], [sz, cz, 0.0], [0.0, 0.0, 1.0]];
        self.basis = mat_mul(mat_mul(rx, ry), rz);
        self.focal = 1.0 / (self.fov_deg.to_radians() / 2.0).tan();
    }

    /// World point in camera space.
    pub fn to_view(&self, p: Vec3) -> Vec3 {
        let d = p - self.position;
        let m = &self.basis;
        // Transpose multiply: world-to-camera is the inverse rotation.
        Vec3::new(
            m[0][0] * d.x + m[1][0] * d.y + m[2][0] * d.z,
            m[0][1] * d.x + m[1][1] * d.y + m[2][1] * d.z,
            m[0][2] * d.x + m[1][2] * d.y + m[2][2] * d.z,
        )
    }

    /// Project a world point to viewport pixels.
    ///
    /// Returns `None` for points outside the near/far range or behind the
    /// camera. Points beside the frustum still project; rasterizers clip.
    pub fn project(&self, p: Vec3) -> Option<Projected> {
        let v = self.to_view(p);
        let depth = -v.z;
        if !depth.is_finite() || depth < self.near || depth > self.far {
            return None;
        }
        let (w, h) = self.viewport;
        let ndc_x = self.focal / self.aspect() * v.x / depth;
        let ndc_y = self.focal * v.y / depth;
        Some(Projected {
            x: (ndc_x + 1.0) * 0.5 * w,
            y: (1.0 - ndc_y) * 0.5 * h,
            depth,
        })
    }

    /// On-screen size in pixels of an object `size` world units across at `depth`.
    #[inline]
    pub fn pixel_scale(&self, size: f32, depth: f32) -> f32 {
        if depth <= 0.0 {
            return 0.0;
        }
        size * self.focal * self.viewport.1 * 0.5 / depth
    }
}

const IDENTITY: [[f32; 3]; 3] = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];

fn mat_mul(a: [[f32; 3]; 3], b: [[f32; 3]; 3]) -> [[f32; 3]; 3] {
    let mut out = [[0.0; 3]; 3];
    for (i, row) in out.iter_mut().enumerate() {
        for (j, cell) in row.iter_mut().enumerate() {
            *cell = (0..3).map(|k| a[i][k] * b[k][j]).sum();
        }
    }
    out
}
