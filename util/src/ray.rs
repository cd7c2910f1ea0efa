use cgmath::{Point3, Vector3};

/// Stand-in for an infinite parametric distance. An axis whose direction component is zero gets
/// this as both its per-voxel distance and its first boundary distance, so it never wins the
/// comparison in `step`.
pub const LARGE: f64 = 1e7;

/// Incremental traversal of the voxel grid along a line segment (Amanatides & Woo).
///
/// The current voxel is always an exact integer triple: each step moves one unit along exactly
/// one axis, and only the parametric boundary distances are accumulated as floats.
///
/// The traversal does not stop at `to`. Callers drive it one voxel at a time, usually up to some
/// maximum number of steps, and decide for themselves when they have seen enough.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoxelRaycast {
    position: Point3<i64>,
    step: [i64; 3],
    t_delta: [f64; 3],
    t_max: [f64; 3],
    last_axis: Option<usize>,
    t: f64,
}

fn sign(n: f64) -> i64 {
    if n > 0.0 {
        1
    } else if n < 0.0 {
        -1
    } else {
        0
    }
}

/// Distance from `n` down to the integer boundary at or below it.
fn frac0(n: f64) -> f64 {
    n - n.floor()
}

/// Distance from `n` up to the next integer boundary above it.
fn frac1(n: f64) -> f64 {
    1.0 - n + n.floor()
}

impl VoxelRaycast {
    pub fn new(from: Point3<f64>, to: Point3<f64>) -> Self {
        let from = [from.x, from.y, from.z];
        let d = [to.x - from[0], to.y - from[1], to.z - from[2]];

        let mut step = [0; 3];
        let mut t_delta = [LARGE; 3];
        let mut t_max = [LARGE; 3];

        for i in 0..3 {
            step[i] = sign(d[i]);
            if step[i] != 0 {
                t_delta[i] = f64::min(step[i] as f64 / d[i], LARGE);
                t_max[i] = if step[i] > 0 {
                    t_delta[i] * frac1(from[i])
                } else {
                    t_delta[i] * frac0(from[i])
                };
            }
        }

        VoxelRaycast {
            position: Point3::new(
                from[0].floor() as i64,
                from[1].floor() as i64,
                from[2].floor() as i64,
            ),
            step,
            t_delta,
            t_max,
            last_axis: None,
            t: 0.0,
        }
    }

    /// Advances to the next voxel along the ray and returns it.
    ///
    /// The axis whose next boundary is nearest is crossed. Exact ties go to X, then Y, then Z.
    pub fn step(&mut self) -> Point3<i64> {
        let t_max = &self.t_max;
        let axis = if t_max[0] <= t_max[1] {
            if t_max[0] <= t_max[2] {
                0
            } else {
                2
            }
        } else if t_max[1] <= t_max[2] {
            1
        } else {
            2
        };

        self.t = self.t_max[axis];
        self.position[axis] += self.step[axis];
        self.t_max[axis] += self.t_delta[axis];
        self.last_axis = Some(axis);

        self.position
    }

    #[inline]
    pub fn position(&self) -> Point3<i64> {
        self.position
    }

    /// The per-axis step direction, each component one of -1, 0 or 1.
    #[inline]
    pub fn direction(&self) -> Vector3<i64> {
        Vector3::new(self.step[0], self.step[1], self.step[2])
    }

    /// The axis crossed by the most recent call to `step`, or `None` before the first step.
    #[inline]
    pub fn last_axis(&self) -> Option<usize> {
        self.last_axis
    }

    /// Normal of the voxel face the ray entered the current voxel through. `None` before the
    /// first step.
    pub fn entry_normal(&self) -> Option<Vector3<i64>> {
        let axis = self.last_axis?;
        let mut normal = Vector3::new(0, 0, 0);
        normal[axis] = -self.step[axis];
        Some(normal)
    }

    /// Ray parameter at which the current voxel was entered, where 0 is `from` and 1 is `to`.
    #[inline]
    pub fn t(&self) -> f64 {
        self.t
    }
}

impl Iterator for VoxelRaycast {
    type Item = Point3<i64>;

    /// Never returns `None`: the sequence of voxels along a ray is unbounded.
    fn next(&mut self) -> Option<Self::Item> {
        Some(self.step())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64, z: f64) -> Point3<f64> {
        Point3::new(x, y, z)
    }

    #[test]
    fn test_axis_aligned() {
        let mut ray = VoxelRaycast::new(p(0., 0., 0.), p(5., 0., 0.));
        let mut visited = vec![ray.position()];
        for _ in 0..5 {
            visited.push(ray.step());
        }

        let expected: Vec<_> = (0..=5).map(|x| Point3::new(x, 0, 0)).collect();
        assert_eq!(visited, expected);
    }

    #[test]
    fn test_zero_length() {
        let mut ray = VoxelRaycast::new(p(0.5, 0.5, 0.5), p(0.5, 0.5, 0.5));
        assert_eq!(ray.t_delta, [LARGE; 3]);
        for _ in 0..100 {
            assert_eq!(ray.step(), Point3::new(0, 0, 0));
        }
    }

    #[test]
    fn test_negative_direction() {
        let ray = VoxelRaycast::new(p(0.5, 2.25, -0.5), p(-3.5, 2.25, -0.5));
        assert_eq!(ray.position(), Point3::new(0, 2, -1));

        let visited: Vec<_> = ray.take(4).collect();
        let expected: Vec<_> = (1..=4).map(|x| Point3::new(-x, 2, -1)).collect();
        assert_eq!(visited, expected);
    }

    #[test]
    fn test_diagonal_is_face_connected() {
        let from = p(0.2, 0.7, 0.4);
        let to = p(7.9, -3.1, 5.3);
        let mut ray = VoxelRaycast::new(from, to);
        let mut prev = ray.position();
        let mut prev_t = 0.0;

        for _ in 0..30 {
            let next = ray.step();
            let d = next - prev;
            assert_eq!(d.x.abs() + d.y.abs() + d.z.abs(), 1);
            assert!(ray.t() >= prev_t);
            prev_t = ray.t();
            prev = next;
        }

        assert_eq!(ray.direction(), Vector3::new(1, -1, 1));
    }

    #[test]
    fn test_reaches_end_voxel() {
        let from = p(0.5, 0.5, 0.5);
        let to = p(3.5, 2.5, 1.5);
        let mut ray = VoxelRaycast::new(from, to);

        // Manhattan distance between the end voxels is 3 + 2 + 1.
        for _ in 0..6 {
            ray.step();
        }
        assert_eq!(ray.position(), Point3::new(3, 2, 1));
    }

    #[test]
    fn test_tie_break_order() {
        // Every boundary is crossed at the same t, so the fixed axis priority decides.
        let ray = VoxelRaycast::new(p(0.5, 0.5, 0.5), p(1.5, 1.5, 1.5));
        let visited: Vec<_> = ray.take(3).collect();
        assert_eq!(
            visited,
            vec![
                Point3::new(1, 0, 0),
                Point3::new(1, 1, 0),
                Point3::new(1, 1, 1)
            ]
        );
    }

    #[test]
    fn test_entry_normal() {
        let mut ray = VoxelRaycast::new(p(0.5, 0.5, 0.5), p(0.5, -4.5, 0.5));
        assert_eq!(ray.entry_normal(), None);
        ray.step();
        assert_eq!(ray.last_axis(), Some(1));
        assert_eq!(ray.entry_normal(), Some(Vector3::new(0, 1, 0)));
    }
}
