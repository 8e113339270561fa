use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::geom::turning_angle;
use crate::graph::SegmentGraph;
use crate::model::{Pole, PoleType};

/// Flag and type every pole from its neighbours on `lines`.
///
/// A pole with fewer than two neighbours is `has_one`; a turn sharper than
/// `min_angle_degrees` between consecutive neighbours sets `has_angle`. Either
/// flag, or a panel, makes the pole compact. Poles that are not on `lines`
/// are reported and left untyped. Returns pole indices grouped by type.
pub fn choose_pole_types<E>(
    poles: &mut [Pole],
    lines: &SegmentGraph<E>,
    min_angle_degrees: f64,
) -> BTreeMap<PoleType, Vec<usize>> {
    let mut groups: BTreeMap<PoleType, Vec<usize>> = BTreeMap::new();

    for (i, pole) in poles.iter_mut().enumerate() {
        let here = pole.xy();
        let Some(neighbors) = lines.neighbors(here) else {
            warn!(pole = %pole.id, x = here.x, y = here.y, "pole is not connected to any line");
            continue;
        };

        if neighbors.len() < 2 {
            pole.has_one = true;
        } else {
            pole.has_angle = neighbors.windows(2)
                .any(|pair| turning_angle(pair[0], here, pair[1]) < min_angle_degrees);
        }

        let pole_type = if pole.has_one || pole.has_angle || pole.has_panel { PoleType::Compact } else { PoleType::Spread };
        pole.pole_type = Some(pole_type);
        groups.entry(pole_type).or_default().push(i);
    }

    debug!(
        compact = groups.get(&PoleType::Compact).map_or(0, Vec::len),
        spread = groups.get(&PoleType::Spread).map_or(0, Vec::len),
        "classified poles"
    );
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{Coord, Point};

    fn c(x: f64, y: f64) -> Coord<f64> { Coord { x, y } }

    fn lines(segments: &[((f64, f64), (f64, f64))]) -> SegmentGraph<()> {
        let mut graph = SegmentGraph::new();
        for &(a, b) in segments {
            graph.add_segment(a.into(), b.into(), ());
        }
        graph
    }

    #[test]
    fn ends_turns_and_straights() {
        // An L with a straight run: (0,0) - (10,0) - (20,0) - (20,10).
        let graph = lines(&[((0.0, 0.0), (10.0, 0.0)), ((10.0, 0.0), (20.0, 0.0)), ((20.0, 0.0), (20.0, 10.0))]);
        let mut poles = vec![
            Pole::new("end", Point::new(0.0, 0.0)),
            Pole::new("straight", Point::new(10.0, 0.0)),
            Pole::new("corner", Point::new(20.0, 0.0)),
        ];
        let groups = choose_pole_types(&mut poles, &graph, 150.0);

        assert!(poles[0].has_one);
        assert!(!poles[1].has_one && !poles[1].has_angle);
        assert!(poles[2].has_angle);
        assert_eq!(poles[1].pole_type, Some(PoleType::Spread));
        assert_eq!(groups[&PoleType::Compact], vec![0, 2]);
        assert_eq!(groups[&PoleType::Spread], vec![1]);
    }

    #[test]
    fn panel_forces_compact() {
        let graph = lines(&[((0.0, 0.0), (10.0, 0.0)), ((10.0, 0.0), (20.0, 0.0))]);
        let mut poles = vec![Pole::new("mid", Point::new(10.0, 0.0))];
        poles[0].has_panel = true;
        choose_pole_types(&mut poles, &graph, 150.0);
        assert_eq!(poles[0].pole_type, Some(PoleType::Compact));
        assert!(!poles[0].has_angle);
    }

    #[test]
    fn only_consecutive_neighbours_are_compared() {
        // Neighbours in order: east, west, just north of east. East and the
        // last one are nearly parallel but never compared.
        let graph = lines(&[((0.0, 0.0), (1.0, 0.0)), ((0.0, 0.0), (-1.0, 0.0)), ((0.0, 0.0), (1.0, 0.1))]);
        let mut poles = vec![Pole::new("hub", Point::new(0.0, 0.0))];
        choose_pole_types(&mut poles, &graph, 150.0);
        assert!(!poles[0].has_angle);
        assert_eq!(graph.neighbors(c(0.0, 0.0)).unwrap().len(), 3);
    }

    #[test]
    fn stray_pole_is_skipped() {
        let graph = lines(&[((0.0, 0.0), (10.0, 0.0))]);
        let mut poles = vec![Pole::new("stray", Point::new(50.0, 50.0))];
        let groups = choose_pole_types(&mut poles, &graph, 150.0);
        assert_eq!(poles[0].pole_type, None);
        assert!(groups.is_empty());
    }
}
