use std::collections::BTreeMap;

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use serde_json::Value;

use crate::graph::{Graph, Node};
use crate::pipeline::Diagnostics;
use crate::types::{BBox, NodeId};

/// One raw polygon record, as handed over by the shapefile/GeoJSON
/// parsing collaborator.
#[derive(Debug, Clone, Deserialize)]
pub struct Record {
    /// Source id; strings and integers are both accepted.
    pub id: Value,
    #[serde(default)]
    pub properties: BTreeMap<String, Value>,
    pub geometry: Geometry,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Geometry {
    /// GeoJSON geometry type. Only polygon shapes carry adjacency
    /// semantics; other types pass through with their coordinates
    /// flattened the same way.
    #[serde(rename = "type")]
    pub ty: String,
    pub coordinates: Value,
}

/// Turn raw records into graph nodes with geometry summaries.
///
/// A record whose coordinates flatten to zero valid vertices has no
/// centroid; it is dropped and counted, not fatal. Structurally
/// malformed coordinates abort the whole load, since later stages
/// cannot work on corrupt geometry.
pub fn load_records(records: &[Record], diag: &mut Diagnostics) -> Result<Graph> {
    let mut graph = Graph::new();
    for (i, record) in records.iter().enumerate() {
        match node_from_record(record).with_context(|| format!("Failed to load record #{i}"))? {
            Some(node) => graph.add_node(node),
            None => diag.dropped_records += 1,
        }
    }
    Ok(graph)
}

fn node_from_record(record: &Record) -> Result<Option<Node>> {
    let id = match &record.id {
        Value::String(s) => NodeId::new(s.clone()),
        Value::Number(n) => NodeId::new(n.to_string()),
        other => bail!("record id must be a string or integer, got {other}"),
    };

    let mut vertices = Vec::new();
    flatten_coordinates(&record.geometry.coordinates, &mut vertices)
        .with_context(|| format!("malformed coordinates in record {id}"))?;

    let mut bbox = BBox::EMPTY;
    let (mut sum_lon, mut sum_lat, mut total) = (0.0, 0.0, 0usize);
    for vertex in vertices.iter().flatten() {
        let [lon, lat] = *vertex;
        bbox.extend(lon, lat);
        sum_lon += lon;
        sum_lat += lat;
        total += 1;
    }

    // No valid vertices means no centroid (division by zero); the
    // caller reports the drop.
    if total == 0 {
        return Ok(None);
    }

    Ok(Some(Node {
        id,
        vertices,
        bbox,
        centroid: [sum_lon / total as f64, sum_lat / total as f64],
        properties: record.properties.clone(),
        district: None,
    }))
}

/// Flatten arbitrarily nested coordinate arrays into one ordered vertex
/// list, emitting a `None` break marker after every nested ring so
/// multi-part geometries keep their structure.
fn flatten_coordinates(value: &Value, out: &mut Vec<Option<[f64; 2]>>) -> Result<()> {
    let Value::Array(items) = value else {
        bail!("coordinates must be an array, got {value}");
    };

    if let Some(pair) = as_lon_lat(items) {
        out.push(Some(pair));
        return Ok(());
    }

    for item in items {
        match item {
            Value::Array(inner) => {
                if let Some(pair) = as_lon_lat(inner) {
                    out.push(Some(pair));
                } else {
                    flatten_coordinates(item, out)?;
                    out.push(None);
                }
            }
            other => bail!("expected a coordinate pair or ring, got {other}"),
        }
    }
    Ok(())
}

/// A coordinate entry must have exactly two numeric components.
fn as_lon_lat(items: &[Value]) -> Option<[f64; 2]> {
    match items {
        [lon, lat] => Some([lon.as_f64()?, lat.as_f64()?]),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(id: Value, coordinates: Value) -> Record {
        Record {
            id,
            properties: BTreeMap::new(),
            geometry: Geometry { ty: "Polygon".into(), coordinates },
        }
    }

    fn load_one(record: &Record) -> Result<Option<Node>> {
        node_from_record(record)
    }

    #[test]
    fn flat_ring_has_no_break_markers() {
        let r = record(json!("p1"), json!([[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]]));
        let node = load_one(&r).unwrap().unwrap();
        assert_eq!(
            node.vertices,
            vec![Some([0.0, 0.0]), Some([1.0, 0.0]), Some([1.0, 1.0])]
        );
    }

    #[test]
    fn nested_rings_get_break_markers() {
        // A polygon with a hole: one break after each ring.
        let r = record(
            json!("p1"),
            json!([
                [[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 4.0]],
                [[1.0, 1.0], [2.0, 1.0], [2.0, 2.0]]
            ]),
        );
        let node = load_one(&r).unwrap().unwrap();
        assert_eq!(node.vertices.iter().filter(|v| v.is_none()).count(), 2);
        assert_eq!(node.vertices.iter().filter(|v| v.is_some()).count(), 7);
    }

    #[test]
    fn break_markers_are_excluded_from_aggregates() {
        let r = record(
            json!("p1"),
            json!([
                [[0.0, 0.0], [2.0, 0.0]],
                [[2.0, 2.0], [0.0, 2.0]]
            ]),
        );
        let node = load_one(&r).unwrap().unwrap();
        assert_eq!(node.centroid, [1.0, 1.0]);
        assert_eq!(node.bbox.min_lon, 0.0);
        assert_eq!(node.bbox.max_lon, 2.0);
        assert_eq!(node.bbox.min_lat, 0.0);
        assert_eq!(node.bbox.max_lat, 2.0);
    }

    #[test]
    fn integer_ids_are_accepted() {
        let r = record(json!(17), json!([[0.0, 0.0]]));
        let node = load_one(&r).unwrap().unwrap();
        assert_eq!(node.id, NodeId::from("17"));
    }

    #[test]
    fn non_scalar_id_is_fatal() {
        let r = record(json!({"fid": 1}), json!([[0.0, 0.0]]));
        assert!(load_one(&r).is_err());
    }

    #[test]
    fn triple_coordinate_is_fatal() {
        let r = record(json!("p1"), json!([[0.0, 0.0, 7.5], [1.0, 0.0]]));
        assert!(load_one(&r).is_err());
    }

    #[test]
    fn empty_geometry_is_dropped_not_fatal() {
        let records = vec![
            record(json!("empty"), json!([])),
            record(json!("ok"), json!([[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]])),
        ];
        let mut diag = Diagnostics::default();
        let graph = load_records(&records, &mut diag).unwrap();

        assert_eq!(graph.node_count(), 1);
        assert_eq!(diag.dropped_records, 1);
        assert!(graph.node(&"ok".into()).is_some());
    }

    #[test]
    fn properties_pass_through_verbatim() {
        let mut r = record(json!("p1"), json!([[0.0, 0.0]]));
        r.properties.insert("POP10".into(), json!(4821));
        r.properties.insert("NAME".into(), json!("Ward 3"));

        let node = load_one(&r).unwrap().unwrap();
        assert_eq!(node.properties["POP10"], json!(4821));
        assert_eq!(node.properties["NAME"], json!("Ward 3"));
    }
}
