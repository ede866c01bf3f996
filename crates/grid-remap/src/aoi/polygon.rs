//! WKT polygon parsing and point-in-polygon tests.

use grid_common::BoundingBox;

use super::AoiParseError;

/// A polygon with an exterior ring and optional holes.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub exterior: Vec<(f64, f64)>,
    pub holes: Vec<Vec<(f64, f64)>>,
}

impl Polygon {
    pub fn new(exterior: Vec<(f64, f64)>) -> Self {
        Self {
            exterior,
            holes: Vec::new(),
        }
    }

    /// Strictly inside the exterior ring and outside every hole. Points on
    /// any ring's boundary are not contained.
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        if on_ring(&self.exterior, x, y) || self.holes.iter().any(|h| on_ring(h, x, y)) {
            return false;
        }
        ring_contains(&self.exterior, x, y) && !self.holes.iter().any(|h| ring_contains(h, x, y))
    }
}

/// An area of interest made of one or more polygons.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaOfInterest {
    pub polygons: Vec<Polygon>,
}

impl AreaOfInterest {
    pub fn new(polygons: Vec<Polygon>) -> Self {
        Self { polygons }
    }

    /// Parse a WKT `POLYGON` or `MULTIPOLYGON`.
    ///
    /// Accepts formats:
    /// - `POLYGON((x1 y1, x2 y2, x3 y3, x1 y1))`
    /// - `POLYGON((exterior), (hole))`
    /// - `MULTIPOLYGON(((ring1)), ((ring2), (hole2)))`
    ///
    /// Coordinates are taken in the domain's own CRS; no range checks are made.
    pub fn from_wkt(wkt: &str) -> Result<Self, AoiParseError> {
        let wkt = wkt.trim();

        let polygons = if let Some(body) = strip_keyword(wkt, "MULTIPOLYGON") {
            split_top_level(strip_parens(body)?)
                .into_iter()
                .map(|part| parse_polygon_body(strip_parens(part)?))
                .collect::<Result<Vec<_>, _>>()?
        } else if let Some(body) = strip_keyword(wkt, "POLYGON") {
            vec![parse_polygon_body(strip_parens(body)?)?]
        } else {
            return Err(AoiParseError::InvalidWkt(
                "Expected POLYGON or MULTIPOLYGON format".to_string(),
            ));
        };

        if polygons.is_empty() {
            return Err(AoiParseError::InvalidWkt(
                "MULTIPOLYGON must contain at least one polygon".to_string(),
            ));
        }

        Ok(Self { polygons })
    }

    /// Check if a point lies in any of the polygons.
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        self.polygons.iter().any(|p| p.contains_point(x, y))
    }

    /// Bounding box of all exterior rings.
    pub fn bbox(&self) -> Option<BoundingBox> {
        let points: Vec<(f64, f64)> = self
            .polygons
            .iter()
            .flat_map(|p| p.exterior.iter().copied())
            .collect();
        BoundingBox::from_points(&points)
    }
}

/// Case-insensitive ASCII keyword prefix.
fn strip_keyword<'a>(wkt: &'a str, keyword: &str) -> Option<&'a str> {
    let head = wkt.get(..keyword.len())?;
    head.eq_ignore_ascii_case(keyword).then(|| &wkt[keyword.len()..])
}

/// Ray casting over a single ring. The ring may or may not repeat its first point.
fn ring_contains(ring: &[(f64, f64)], x: f64, y: f64) -> bool {
    let n = ring.len();
    if n < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = n - 1;

    for i in 0..n {
        let (xi, yi) = ring[i];
        let (xj, yj) = ring[j];

        if ((yi > y) != (yj > y)) && (x < (xj - xi) * (y - yi) / (yj - yi) + xi) {
            inside = !inside;
        }
        j = i;
    }

    inside
}

/// Point lies on one of the ring's edges, including the closing edge.
fn on_ring(ring: &[(f64, f64)], x: f64, y: f64) -> bool {
    let n = ring.len();
    (0..n).any(|i| on_segment(ring[i], ring[(i + 1) % n], x, y))
}

fn on_segment((x1, y1): (f64, f64), (x2, y2): (f64, f64), x: f64, y: f64) -> bool {
    if x < x1.min(x2) || x > x1.max(x2) || y < y1.min(y2) || y > y1.max(y2) {
        return false;
    }
    let cross = (x2 - x1) * (y - y1) - (y2 - y1) * (x - x1);
    let scale = (x2 - x1).abs().max((y2 - y1).abs()).max(1.0);
    cross.abs() <= BOUNDARY_EPS * scale * scale
}

const BOUNDARY_EPS: f64 = 1e-12;

/// `((exterior), (hole), ...)` with the outer parens already removed.
fn parse_polygon_body(body: &str) -> Result<Polygon, AoiParseError> {
    let mut rings = split_top_level(body)
        .into_iter()
        .map(|ring| parse_ring(strip_parens(ring)?))
        .collect::<Result<Vec<_>, _>>()?;

    if rings.is_empty() {
        return Err(AoiParseError::InvalidWkt("Polygon has no rings".to_string()));
    }
    let exterior = rings.remove(0);

    Ok(Polygon {
        exterior,
        holes: rings,
    })
}

fn parse_ring(coords: &str) -> Result<Vec<(f64, f64)>, AoiParseError> {
    let points = coords
        .split(',')
        .map(|pair| {
            let pair = pair.trim();
            let parts: Vec<&str> = pair.split_whitespace().collect();
            if parts.len() != 2 {
                return Err(AoiParseError::InvalidWkt(format!(
                    "Expected 'x y' format, got '{}'",
                    pair
                )));
            }

            let x: f64 = parts[0]
                .parse()
                .map_err(|_| AoiParseError::InvalidCoordinate(parts[0].to_string()))?;
            let y: f64 = parts[1]
                .parse()
                .map_err(|_| AoiParseError::InvalidCoordinate(parts[1].to_string()))?;

            Ok((x, y))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if points.len() < 3 {
        return Err(AoiParseError::InvalidWkt(
            "Ring must have at least 3 points".to_string(),
        ));
    }

    Ok(points)
}

/// Remove one enclosing pair of parentheses.
fn strip_parens(s: &str) -> Result<&str, AoiParseError> {
    let s = s.trim();
    if !s.starts_with('(') {
        return Err(AoiParseError::InvalidWkt(format!("Missing opening parenthesis in '{}'", s)));
    }
    if !s.ends_with(')') {
        return Err(AoiParseError::InvalidWkt(format!("Missing closing parenthesis in '{}'", s)));
    }
    Ok(&s[1..s.len() - 1])
}

/// Split on commas that are not nested in parentheses.
fn split_top_level(s: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;

    for (i, ch) in s.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth -= 1,
            ',' if depth == 0 => {
                parts.push(&s[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    let last = &s[start..];
    if !last.trim().is_empty() {
        parts.push(last);
    }

    parts
}
