//! Orthographic 3D projection for static scatter plots.

/// An axis-aligned 3D box in data units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Bounds3d {
    pub(crate) min: [f64; 3],
    pub(crate) max: [f64; 3],
}

impl Bounds3d {
    /// Unit cube, the extent of a view with no points.
    pub(crate) const UNIT: Self = Self { min: [0.0; 3], max: [1.0; 3] };

    /// Smallest box containing every point, or None when there are no points.
    pub(crate) fn of(points: &[[f64; 3]]) -> Option<Self> {
        let first = *points.first()?;
        Some(points.iter().fold(Self { min: first, max: first }, |mut b, p| {
            for k in 0..3 {
                b.min[k] = b.min[k].min(p[k]);
                b.max[k] = b.max[k].max(p[k]);
            }
            b
        }))
    }

    /// Extent along axis k; degenerate axes report 1.0 so normalization stays finite.
    #[inline]
    pub(crate) fn extent(&self, k: usize) -> f64 {
        let e = self.max[k] - self.min[k];
        if e > 0.0 { e } else { 1.0 }
    }

    /// Map a data point into the unit cube centered on the origin, one axis at a time.
    pub(crate) fn normalize(&self, p: &[f64; 3]) -> [f64; 3] {
        let mut out = [0.0; 3];
        for k in 0..3 {
            let mid = (self.min[k] + self.max[k]) / 2.0;
            out[k] = (p[k] - mid) / self.extent(k);
        }
        out
    }
}

/// Orthographic camera looking at the origin from a given azimuth and elevation.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Camera3d {
    right: [f64; 3],
    up: [f64; 3],
    eye: [f64; 3],
    scale: f64,
    center: (f64, f64),
}

impl Camera3d {
    /// Camera at `azimuth`/`elevation` degrees; `scale` pixels per unit, screen `center` in pixels.
    pub(crate) fn new(azimuth: f64, elevation: f64, scale: f64, center: (f64, f64)) -> Self {
        let (a, e) = (azimuth.to_radians(), elevation.to_radians());
        Self {
            right: [-a.sin(), a.cos(), 0.0],
            up: [-e.sin() * a.cos(), -e.sin() * a.sin(), e.cos()],
            eye: [e.cos() * a.cos(), e.cos() * a.sin(), e.sin()],
            scale,
            center,
        }
    }

    /// Project a normalized point to SVG coords (Y down).
    #[inline]
    pub(crate) fn project(&self, p: &[f64; 3]) -> (f64, f64) {
        let sx = dot(p, &self.right);
        let sy = dot(p, &self.up);
        (self.center.0 + sx * self.scale, self.center.1 - sy * self.scale)
    }

    /// Distance toward the viewer; larger values are drawn later.
    #[inline]
    pub(crate) fn depth(&self, p: &[f64; 3]) -> f64 { dot(p, &self.eye) }
}

#[inline]
fn dot(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

/// The 12 edges of the unit cube centered on the origin.
pub(crate) fn cube_edges() -> Vec<([f64; 3], [f64; 3])> {
    let corners = (0..8)
        .map(|i| [
            if i & 1 == 0 { -0.5 } else { 0.5 },
            if i & 2 == 0 { -0.5 } else { 0.5 },
            if i & 4 == 0 { -0.5 } else { 0.5 },
        ])
        .collect::<Vec<_>>();

    let mut edges = Vec::with_capacity(12);
    for i in 0..8usize {
        for bit in [1usize, 2, 4] {
            if i & bit == 0 {
                edges.push((corners[i], corners[i | bit]));
            }
        }
    }
    edges
}
