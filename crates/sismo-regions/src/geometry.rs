//! Point-in-polygon for GeoJSON `Polygon` and `MultiPolygon`
//!
//! Coordinates are `[lon, lat]`. The first ring of a polygon is its outline,
//! the rest are holes.

use serde_json::Value;

type Ring = Vec<(f64, f64)>;

pub(crate) fn contains(geometry: &Value, lon: f64, lat: f64) -> bool {
    let coords = match geometry.get("coordinates") {
        Some(c) => c,
        None => return false,
    };

    match geometry.get("type").and_then(|t| t.as_str()) {
        Some("Polygon") => polygon_contains(coords, lon, lat),
        Some("MultiPolygon") => coords
            .as_array()
            .is_some_and(|polys| polys.iter().any(|p| polygon_contains(p, lon, lat))),
        _ => false,
    }
}

fn polygon_contains(rings: &Value, lon: f64, lat: f64) -> bool {
    let rings: Vec<Ring> = match rings.as_array() {
        Some(r) => r.iter().filter_map(parse_ring).collect(),
        None => return false,
    };

    let Some((outline, holes)) = rings.split_first() else {
        return false;
    };

    ring_contains(outline, lon, lat) && !holes.iter().any(|h| ring_contains(h, lon, lat))
}

fn parse_ring(ring: &Value) -> Option<Ring> {
    ring.as_array()?
        .iter()
        .map(|p| {
            let p = p.as_array()?;
            Some((p.first()?.as_f64()?, p.get(1)?.as_f64()?))
        })
        .collect()
}

/// Even-odd ray casting
fn ring_contains(ring: &[(f64, f64)], x: f64, y: f64) -> bool {
    if ring.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let (xi, yi) = ring[i];
        let (xj, yj) = ring[j];
        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}
