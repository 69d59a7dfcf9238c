//! Perimeter reversal: turn a closed-loop scan path into repeated
//! back-and-forth mowing passes.
//!
//! The input traces one or more laps of a closed perimeter. A reversal pass
//! flips one lap's points in place, so consecutive laps are driven in
//! alternating directions (a boustrophedon pattern). The reversal creates a
//! geometric seam between the last flipped lap and the first untouched one;
//! a bridge point three quarters of the way up the reverse lane smooths the
//! transition.
//!
//! Preconditions: at least 2 points, and the point nearest the start must be
//! the one that closes the first lap. Non-convex or self-intersecting
//! perimeters can defeat the nearest-point detection; that is a property of
//! the input, not something this transform tries to repair.

use log::{debug, warn};

use crate::core::geo::{self, GeoPoint};

/// Detects the loop length: the index of the point nearest the start
/// (excluding the start itself), assumed to close the first lap.
///
/// Returns `None` for sequences with fewer than 2 points. The first minimum
/// wins on exact ties.
pub fn detect_loop_length(points: &[GeoPoint]) -> Option<usize> {
    if points.len() < 2 {
        return None;
    }
    let start = &points[0];
    let mut shortest = f64::MAX;
    let mut index = 1;
    for (i, point) in points.iter().enumerate().skip(1) {
        let d = geo::distance(start, point);
        if d < shortest {
            shortest = d;
            index = i;
        }
    }
    Some(index)
}

/// Reorders a closed-loop path into `num_reverse_passes` back-and-forth
/// passes.
///
/// Walking the list in consecutive blocks of one loop length, the first
/// `num_reverse_passes` blocks are reversed in place. A bridge point is
/// inserted at the seam between the reversed and untouched regions, and the
/// path is rotated to start on the point that originally closed the first
/// lap (duplicated at the front).
///
/// The pass count is clamped so that `loop_len * (passes + 2)` never exceeds
/// the number of points; when it clamps all the way to zero (or zero passes
/// were requested) the sequence is returned unchanged.
pub fn reverse_perimeter(mut points: Vec<GeoPoint>, num_reverse_passes: usize) -> Vec<GeoPoint> {
    let loop_len = match detect_loop_length(&points) {
        Some(l) => l,
        None => {
            warn!("perimeter reversal skipped: need at least 2 points");
            return points;
        }
    };

    // Largest pass count with loop_len * (passes + 2) <= len; comparing
    // against this instead of the product keeps arbitrary CLI pass counts
    // from overflowing the multiplication.
    let feasible = (points.len() / loop_len).saturating_sub(2);
    let mut passes = num_reverse_passes;
    if passes > feasible {
        passes = feasible;
        debug!(
            "clamped reverse passes from {} to {} (loop length {}, {} points)",
            num_reverse_passes,
            passes,
            loop_len,
            points.len()
        );
    }
    if passes == 0 {
        return points;
    }

    // The point that originally closed the first lap; the output path is
    // rotated to start there.
    let lap_close = points[loop_len - 1].clone();

    for block in 0..passes {
        points[block * loop_len..(block + 1) * loop_len].reverse();
    }

    // Bridge the seam between the reversed and untouched regions.
    let s1 = passes * loop_len;
    if s1 < points.len() {
        let split1 = geo::midpoint(&points[s1], &points[s1 - 1]);
        let split2 = geo::midpoint(
            &points[(passes + 1) * loop_len - 1],
            &points[(passes - 1) * loop_len],
        );
        // Three quarters of the way from split1 toward split2.
        let bridge = geo::midpoint(&geo::midpoint(&split1, &split2), &split2);
        points.insert(s1, bridge);
    }

    points.insert(0, lap_close);
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds `laps` traversals of a small square perimeter, each lap offset
    /// slightly eastward so the nearest point to the start is the first
    /// point of lap 1, plus `extra` points of a final partial lap.
    fn looped_path(laps: usize, extra: usize) -> Vec<GeoPoint> {
        let lap = [(33.0, -111.0), (33.001, -111.0), (33.001, -111.001), (33.0, -111.001)];
        let mut points = Vec::new();
        for k in 0..laps {
            for &(lat, lng) in &lap {
                points.push(GeoPoint::new(lat, lng + 0.00001 * k as f64, 30.0));
            }
        }
        for i in 0..extra {
            let (lat, lng) = lap[i % lap.len()];
            points.push(GeoPoint::new(lat, lng + 0.00001 * laps as f64, 30.0));
        }
        points
    }

    #[test]
    fn test_detect_loop_length() {
        let points = looped_path(3, 0);
        assert_eq!(detect_loop_length(&points), Some(4));
    }

    #[test]
    fn test_detect_loop_length_too_short() {
        assert_eq!(detect_loop_length(&[]), None);
        assert_eq!(detect_loop_length(&[GeoPoint::new(33.0, -111.0, 0.0)]), None);
    }

    #[test]
    fn test_clamp_to_zero_leaves_sequence_unchanged() {
        // 10 points, loop length 4: floor(10/4) - 2 = 0 feasible passes.
        let points = looped_path(2, 2);
        assert_eq!(points.len(), 10);

        let result = reverse_perimeter(points.clone(), 5);
        assert_eq!(result, points);
    }

    #[test]
    fn test_huge_pass_count_clamps_without_overflow() {
        // 12 points, loop length 4: at most 1 feasible pass, even when the
        // requested count would overflow a naive loop_len * (passes + 2).
        let points = looped_path(3, 0);
        let result = reverse_perimeter(points.clone(), usize::MAX);
        assert_eq!(result, reverse_perimeter(points, 1));
    }

    #[test]
    fn test_zero_passes_is_noop() {
        let points = looped_path(3, 0);
        let result = reverse_perimeter(points.clone(), 0);
        assert_eq!(result, points);
    }

    #[test]
    fn test_single_reverse_pass_seam_and_rotation() {
        // 12 points, loop length 4, one reversed block.
        let points = looped_path(3, 0);
        assert_eq!(points.len(), 12);

        let result = reverse_perimeter(points.clone(), 1);

        // One bridge point plus the duplicated lap-closing point.
        assert_eq!(result.len(), 14);

        // The path starts on the point that closed the original first lap.
        assert_eq!(result[0], points[3]);

        // Block 0 reversed in place, shifted right by the prepended point.
        assert_eq!(result[1], points[3]);
        assert_eq!(result[2], points[2]);
        assert_eq!(result[3], points[1]);
        assert_eq!(result[4], points[0]);

        // Bridge point sits at the seam (original index 4, shifted to 5) and
        // carries the lane's altitude.
        assert!((result[5].alt - 30.0).abs() < 1e-9);
        assert!(result[5].tag.is_empty());
        assert_ne!(result[5], points[0]);

        // Untouched region follows, order preserved.
        assert_eq!(result[6..], points[4..]);
    }

    #[test]
    fn test_two_reverse_passes() {
        // 16 points, loop length 4: up to 2 passes feasible.
        let points = looped_path(4, 0);
        let result = reverse_perimeter(points.clone(), 2);

        assert_eq!(result.len(), 18);
        // Both blocks reversed.
        assert_eq!(result[1], points[3]);
        assert_eq!(result[4], points[0]);
        assert_eq!(result[5], points[7]);
        assert_eq!(result[8], points[4]);
        // Bridge at the seam, then the untouched remainder.
        assert_eq!(result[10..], points[8..]);
    }
}
