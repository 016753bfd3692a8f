//! WGS84 bounding box parsing.

use serde::{Deserialize, Serialize};

/// Geographic extent of a feature type in lon/lat degrees.
///
/// Corners follow the OWS convention: `[lon, lat]` pairs, lower-left then
/// upper-right.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wgs84BoundingBox {
    pub lower_corner: [f64; 2],
    pub upper_corner: [f64; 2],
}

impl Wgs84BoundingBox {
    pub fn new(lower_corner: [f64; 2], upper_corner: [f64; 2]) -> Self {
        Self {
            lower_corner,
            upper_corner,
        }
    }

    /// Parse OWS corner text: space-separated "lon lat" pairs.
    ///
    /// Extra trailing coordinates are ignored; any unparsable number yields
    /// `None` rather than an error.
    pub fn from_corner_text(lower: &str, upper: &str) -> Option<Self> {
        Some(Self {
            lower_corner: parse_corner(lower)?,
            upper_corner: parse_corner(upper)?,
        })
    }

    /// Parse WFS 1.x `LatLongBoundingBox` attributes.
    pub fn from_extent_attrs(minx: &str, miny: &str, maxx: &str, maxy: &str) -> Option<Self> {
        Some(Self {
            lower_corner: [minx.trim().parse().ok()?, miny.trim().parse().ok()?],
            upper_corner: [maxx.trim().parse().ok()?, maxy.trim().parse().ok()?],
        })
    }
}

fn parse_corner(text: &str) -> Option<[f64; 2]> {
    let mut parts = text.split_whitespace();
    let lon = parts.next()?.parse().ok()?;
    let lat = parts.next()?.parse().ok()?;
    Some([lon, lat])
}
