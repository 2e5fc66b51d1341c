use geo::{BooleanOps, Coord, LineString, MultiPolygon, Polygon, Relate, Validation};

/// Split a stored vertex ring at its break markers and assemble a
/// MultiPolygon, repairing self-intersecting input before it reaches
/// any predicate. Returns the geometry plus whether a repair was
/// applied.
///
/// Rings with fewer than three distinct vertices cannot enclose area
/// and are discarded here rather than handed to the predicates.
pub fn polygons_from_vertices(vertices: &[Option<[f64; 2]>]) -> (MultiPolygon<f64>, bool) {
    let mut rings: Vec<LineString<f64>> = Vec::new();
    let mut current: Vec<Coord<f64>> = Vec::new();

    // Trailing sentinel flushes the last ring.
    for vertex in vertices.iter().chain(std::iter::once(&None)) {
        match vertex {
            Some([lon, lat]) => current.push(Coord { x: *lon, y: *lat }),
            None => {
                let closed = current.len() > 1 && current.first() == current.last();
                let distinct = if closed { current.len() - 1 } else { current.len() };
                if distinct >= 3 {
                    if !closed {
                        current.push(current[0]);
                    }
                    rings.push(LineString::new(std::mem::take(&mut current)));
                } else {
                    current.clear();
                }
            }
        }
    }

    let polygons = MultiPolygon::new(
        rings.into_iter().map(|ring| Polygon::new(ring, vec![])).collect(),
    );
    repair(polygons)
}

/// Re-node invalid geometry by unioning it with itself, which splits a
/// self-intersecting ring into separate valid parts (the planar
/// equivalent of a zero-width buffer).
fn repair(polygons: MultiPolygon<f64>) -> (MultiPolygon<f64>, bool) {
    if polygons.0.is_empty() || polygons.is_valid() {
        return (polygons, false);
    }
    let fixed = polygons.union(&polygons);
    (fixed, true)
}

/// Exact adjacency predicate: two precincts border iff their polygons
/// touch (shared boundary, no interior overlap) or intersect. Empty or
/// degenerate geometry never borders anything, mirroring the policy of
/// treating topology failures as "not adjacent".
pub fn borders(a: &MultiPolygon<f64>, b: &MultiPolygon<f64>) -> bool {
    if a.0.is_empty() || b.0.is_empty() {
        return false;
    }
    let im = a.relate(b);
    im.is_touches() || im.is_intersects()
}
