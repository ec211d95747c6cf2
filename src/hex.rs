//! Doubled-height hex coordinates.
//!
//! A cell is addressed by column `x` and row `y`, where rows advance in
//! half-hex steps so that `x + y` is always even. Flat-top layout.

use serde::{Deserialize, Serialize};

/// Doubled-height offsets of the six neighbours, clockwise from south-east.
const DIRECTIONS: [(i32, i32); 6] = [(1, 1), (1, -1), (0, -2), (-1, -1), (-1, 1), (0, 2)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Hex {
    pub x: i32,
    pub y: i32,
}

impl Hex {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Whether the coordinate names a real cell (`x + y` even).
    pub fn is_valid(self) -> bool {
        (self.x ^ self.y) & 1 == 0
    }

    pub fn neighbours(self) -> [Hex; 6] {
        DIRECTIONS.map(|(dx, dy)| Hex::new(self.x + dx, self.y + dy))
    }

    /// Grid distance in hex steps.
    pub fn distance(self, other: Hex) -> u32 {
        let dx = self.x.abs_diff(other.x);
        let dy = self.y.abs_diff(other.y);
        dx + dy.saturating_sub(dx) / 2
    }

    /// Hexes on the straight line from `self` to `other`, both ends included.
    pub fn line_to(self, other: Hex) -> Vec<Hex> {
        let n = self.distance(other);
        if n == 0 {
            return vec![self];
        }

        // nudge off exact edges so ties round consistently
        let (aq, ar, as_) = self.to_cube_f64();
        let (bq, br, bs) = other.to_cube_f64();
        let (aq, ar, as_) = (aq + 1e-6, ar + 2e-6, as_ - 3e-6);
        let (bq, br, bs) = (bq + 1e-6, br + 2e-6, bs - 3e-6);

        (0..=n)
            .map(|i| {
                let t = f64::from(i) / f64::from(n);
                Hex::from_cube_round(
                    aq + (bq - aq) * t,
                    ar + (br - ar) * t,
                    as_ + (bs - as_) * t,
                )
            })
            .collect()
    }

    /// Every hex at distance `<= range`, centre included.
    ///
    /// Lazy, so huge ranges cost nothing until iterated. Cells whose
    /// coordinates would not fit in `i32` are left out.
    pub fn within_range(self, range: u32) -> impl Iterator<Item = Hex> {
        let n = i64::from(range);
        let (x, y) = (i64::from(self.x), i64::from(self.y));
        let (min, max) = (i64::from(i32::MIN), i64::from(i32::MAX));

        let dq_lo = (-n).max(min - x);
        let dq_hi = n.min(max - x);
        (dq_lo..=dq_hi).flat_map(move |dq| {
            // row = y + 2 * dr + dq must stay representable
            let dr_lo = (-n).max(-dq - n).max(-(y + dq - min).div_euclid(2));
            let dr_hi = n.min(-dq + n).min((max - y - dq).div_euclid(2));
            (dr_lo..=dr_hi).map(move |dr| Hex::new((x + dq) as i32, (y + 2 * dr + dq) as i32))
        })
    }

    /// Centre of this hex in pixel space for a flat-top layout.
    pub fn to_pixel(self, size: f64) -> (f64, f64) {
        let x = size * 1.5 * f64::from(self.x);
        let y = size * 3f64.sqrt() / 2.0 * f64::from(self.y);
        (x, y)
    }

    /// The hex containing pixel `(x, y)` for a flat-top layout.
    pub fn nearest(x: f64, y: f64, size: f64) -> Hex {
        let q = (2.0 / 3.0 * x) / size;
        let r = (-1.0 / 3.0 * x + 3f64.sqrt() / 3.0 * y) / size;
        Hex::from_cube_round(q, r, -q - r)
    }

    fn to_cube_f64(self) -> (f64, f64, f64) {
        let q = f64::from(self.x);
        let r = f64::from((self.y - self.x) / 2);
        (q, r, -q - r)
    }

    fn from_cube_round(q: f64, r: f64, s: f64) -> Hex {
        let mut rq = q.round();
        let mut rr = r.round();
        let rs = s.round();

        let dq = (rq - q).abs();
        let dr = (rr - r).abs();
        let ds = (rs - s).abs();

        if dq > dr && dq > ds {
            rq = -rr - rs;
        } else if dr > ds {
            rr = -rq - rs;
        }

        let col = rq as i32;
        let row = 2 * rr as i32 + col;
        Hex::new(col, row)
    }
}

impl From<(i32, i32)> for Hex {
    fn from((x, y): (i32, i32)) -> Self {
        Hex::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neighbours_are_one_step_away() {
        let origin = Hex::new(3, 5);
        for n in origin.neighbours() {
            assert!(n.is_valid());
            assert_eq!(origin.distance(n), 1);
        }
    }

    #[test]
    fn test_distance() {
        let a = Hex::new(0, 0);
        assert_eq!(a.distance(a), 0);
        assert_eq!(a.distance(Hex::new(0, 6)), 3);
        assert_eq!(a.distance(Hex::new(4, 0)), 4);
        assert_eq!(a.distance(Hex::new(2, 6)), 4);
        assert_eq!(Hex::new(2, 6).distance(a), 4);
    }

    #[test]
    fn test_line_has_distance_plus_one_hexes() {
        let a = Hex::new(0, 0);
        let b = Hex::new(5, 9);
        let line = a.line_to(b);
        assert_eq!(line.len() as u32, a.distance(b) + 1);
        assert_eq!(line.first(), Some(&a));
        assert_eq!(line.last(), Some(&b));
        for pair in line.windows(2) {
            assert_eq!(pair[0].distance(pair[1]), 1);
        }
    }

    #[test]
    fn test_within_range() {
        let centre = Hex::new(2, 4);
        assert_eq!(centre.within_range(0).collect::<Vec<_>>(), vec![centre]);

        let ring: Vec<Hex> = centre.within_range(2).collect();
        assert_eq!(ring.len(), 19);
        assert!(ring.iter().all(|h| h.is_valid() && centre.distance(*h) <= 2));
    }

    #[test]
    fn test_within_huge_range() {
        let origin = Hex::new(0, 0);
        let sample: Vec<Hex> = origin.within_range(40_000).take(1000).collect();
        assert_eq!(sample.len(), 1000);
        assert!(sample.iter().all(|h| h.is_valid() && origin.distance(*h) <= 40_000));

        assert!(origin.within_range(u32::MAX).next().is_some());
    }

    #[test]
    fn test_within_range_at_coordinate_limits() {
        let corner = Hex::new(i32::MAX, i32::MAX);
        let near: Vec<Hex> = corner.within_range(1).collect();
        assert_eq!(near.len(), 3);
        assert!(near.contains(&corner));
        assert!(near.contains(&Hex::new(i32::MAX, i32::MAX - 2)));
        assert!(near.contains(&Hex::new(i32::MAX - 1, i32::MAX - 1)));

        let low = Hex::new(i32::MIN, i32::MIN);
        assert_eq!(low.within_range(1).count(), 3);
    }

    #[test]
    fn test_nearest_inverts_to_pixel() {
        for hex in Hex::new(0, 0).within_range(3) {
            let (px, py) = hex.to_pixel(10.0);
            assert_eq!(Hex::nearest(px, py, 10.0), hex);
            assert_eq!(Hex::nearest(px + 2.0, py - 3.0, 10.0), hex);
        }
    }

    #[test]
    fn test_validity() {
        assert!(Hex::new(1, 1).is_valid());
        assert!(Hex::new(-1, 3).is_valid());
        assert!(!Hex::new(1, 2).is_valid());
    }
}
