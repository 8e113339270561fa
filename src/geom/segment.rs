use geo::line_measures::Distance;
use geo::{Closest, ClosestPoint, Coord, Euclidean, Line, LineString, Point};

/// Length of a straight segment.
#[inline]
pub(crate) fn segment_length(line: &Line<f64>) -> f64 {
    line.dx().hypot(line.dy())
}

/// Break lines into their two-point segments, in order.
pub(crate) fn line_segments<'a>(lines: impl IntoIterator<Item = &'a LineString<f64>>) -> Vec<Line<f64>> {
    lines.into_iter().flat_map(|line| line.lines()).collect()
}

/// Stitch segments between every pair of lines that come within `max_length`
/// of each other without touching.
///
/// The stitch joins the closest pair of vertices of the two lines.
pub(crate) fn link_segments(lines: &[LineString<f64>], max_length: f64) -> Vec<Line<f64>> {
    let mut links = Vec::new();
    for (i, a) in lines.iter().enumerate() {
        for b in &lines[i + 1..] {
            let distance = Euclidean.distance(a, b);
            if distance > max_length || distance == 0.0 { continue }
            if let Some(link) = nearest_vertices(a, b) { links.push(link) }
        }
    }
    links
}

/// Closest vertex pair between two lines; first pair wins ties.
fn nearest_vertices(a: &LineString<f64>, b: &LineString<f64>) -> Option<Line<f64>> {
    let mut best: Option<(f64, Line<f64>)> = None;
    for &p in a.coords() {
        for &q in b.coords() {
            let d = (p.x - q.x).hypot(p.y - q.y);
            if best.is_none_or(|(best_d, _)| d < best_d) { best = Some((d, Line::new(p, q))) }
        }
    }
    best.map(|(_, line)| line)
}

/// Index of the segment nearest to `point`. Strict minimum; the first
/// segment seen wins ties.
pub(crate) fn nearest_segment(point: &Point<f64>, segments: &[Line<f64>]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, segment) in segments.iter().enumerate() {
        let d = Euclidean.distance(point, segment);
        if best.is_none_or(|(_, best_d)| d < best_d) { best = Some((i, d)) }
    }
    best.map(|(i, _)| i)
}

/// Foot of the perpendicular from `point` onto `segment`, clamped to the segment.
pub(crate) fn foot_point(point: &Point<f64>, segment: &Line<f64>) -> Coord<f64> {
    match segment.closest_point(point) {
        Closest::Intersection(p) | Closest::SinglePoint(p) => p.into(),
        Closest::Indeterminate => segment.start,
    }
}

/// A tie-in from `point` to its foot on `segment`, plus the two halves of
/// `segment` split at that foot, as `(tie_in, start_half, end_half)`.
pub(crate) fn tie_in_segments(point: &Point<f64>, segment: &Line<f64>) -> (Line<f64>, Line<f64>, Line<f64>) {
    let foot = foot_point(point, segment);
    (
        Line::new(point.0, foot),
        Line::new(segment.start, foot),
        Line::new(foot, segment.end),
    )
}
