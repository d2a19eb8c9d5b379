//! Cubic Bézier curve describing the top edge of a curved box.

use crate::math::vec2::Vec2;

/// Number of sub-intervals scanned when searching the curve for a given x.
const X_SEARCH_STEPS: usize = 32;
/// Bisection iterations used to refine a root once it is bracketed.
const X_BISECTION_STEPS: usize = 64;

/// A point of the curve with the directions of the tangents entering and
/// leaving it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlPoint {
    pub position: Vec2,
    pub input_direction: Vec2,
    pub output_direction: Vec2,
}

impl ControlPoint {
    pub fn new(position: Vec2, input_direction: Vec2, output_direction: Vec2) -> Self {
        Self {
            position,
            input_direction,
            output_direction,
        }
    }
}

/// A point found on a section, with its curve parameter in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedPoint {
    pub position: Vec2,
    pub t: f64,
}

/// A two-point curve, i.e. a single cubic section from `first` to `second`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Curve {
    pub first: ControlPoint,
    pub second: ControlPoint,
}

impl Curve {
    pub fn new(first: ControlPoint, second: ControlPoint) -> Self {
        Self { first, second }
    }

    /// Point of the section at parameter `t`, evaluated with de Casteljau so
    /// that a curve whose control points share a coordinate returns it exactly.
    pub fn point_at(&self, t: f64) -> Vec2 {
        let p0 = self.first.position;
        let p1 = self.first.output_direction;
        let p2 = self.second.input_direction;
        let p3 = self.second.position;

        let a = lerp(p0, p1, t);
        let b = lerp(p1, p2, t);
        let c = lerp(p2, p3, t);
        let d = lerp(a, b, t);
        let e = lerp(b, c, t);
        lerp(d, e, t)
    }

    /// All points of the section whose x-coordinate is `x`, ordered by
    /// increasing parameter. Empty when `x` is outside the curve's span.
    pub fn points_at_x(&self, x: f64) -> Vec<ResolvedPoint> {
        let tolerance = 1e-9 * x.abs().max(self.x_span()).max(1.0);
        let f = |t: f64| self.point_at(t).x - x;

        let mut roots: Vec<f64> = Vec::new();

        let step = 1.0 / X_SEARCH_STEPS as f64;
        for i in 0..X_SEARCH_STEPS {
            let t0 = i as f64 * step;
            let t1 = if i + 1 == X_SEARCH_STEPS { 1.0 } else { t0 + step };
            let f0 = f(t0);
            let f1 = f(t1);

            if f0.abs() <= tolerance {
                push_root(&mut roots, t0);
            } else if f1.abs() > tolerance && f0.signum() != f1.signum() {
                push_root(&mut roots, bisect(&f, t0, t1, f0));
            }
        }

        if f(1.0).abs() <= tolerance {
            push_root(&mut roots, 1.0);
        }

        roots
            .into_iter()
            .map(|t| ResolvedPoint {
                position: self.point_at(t),
                t,
            })
            .collect()
    }

    fn x_span(&self) -> f64 {
        (self.second.position.x - self.first.position.x).abs()
    }
}

fn push_root(roots: &mut Vec<f64>, t: f64) {
    if roots.last().map_or(true, |&last| (t - last).abs() > 1e-9) {
        roots.push(t);
    }
}

fn lerp(a: Vec2, b: Vec2, t: f64) -> Vec2 {
    a + (b - a) * t
}

/// Refines a root of `f` bracketed by `[lo, hi]`, `f(lo)` having value `f_lo`.
fn bisect<F: Fn(f64) -> f64>(f: &F, mut lo: f64, mut hi: f64, mut f_lo: f64) -> f64 {
    for _ in 0..X_BISECTION_STEPS {
        let mid = 0.5 * (lo + hi);
        let f_mid = f(mid);
        if f_mid == 0.0 {
            return mid;
        }
        if f_mid.signum() == f_lo.signum() {
            lo = mid;
            f_lo = f_mid;
        } else {
            hi = mid;
        }
    }
    0.5 * (lo + hi)
}
