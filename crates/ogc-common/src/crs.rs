//! Coordinate Reference System identifier normalization.
//!
//! Capabilities documents spell the same CRS several ways depending on the
//! service version and vendor. Everything here works on the textual
//! identifier; no projection math is involved.

/// Canonical identifier for WGS84 geographic coordinates.
pub const EPSG_4326: &str = "EPSG:4326";

/// Canonical identifier for Web Mercator.
pub const EPSG_3857: &str = "EPSG:3857";

const URN_PREFIX: &str = "urn:ogc:def:crs:EPSG:";
const HTTP_MARKER: &str = "opengis.net/def/crs/EPSG/";

/// Rewrite a CRS identifier into canonical `EPSG:<code>` form.
///
/// Recognized spellings:
/// - `urn:ogc:def:crs:EPSG::4326` (double colon)
/// - `urn:ogc:def:crs:EPSG:6.0:4326` (version segment)
/// - `http://www.opengis.net/def/crs/EPSG/0/4326` (HTTP URI)
///
/// Anything else, including identifiers already in canonical form, passes
/// through unchanged. Idempotent.
pub fn normalize(raw: &str) -> String {
    if let Some(rest) = raw.strip_prefix(URN_PREFIX) {
        // The segment before the last colon is either empty or a version.
        if let Some((_, tail)) = rest.split_once(':') {
            let code = leading_digits(tail);
            if !code.is_empty() {
                return format!("EPSG:{code}");
            }
        }
    }

    if let Some(idx) = raw.find(HTTP_MARKER) {
        let rest = &raw[idx + HTTP_MARKER.len()..];
        if let Some((version, tail)) = rest.split_once('/') {
            let code = leading_digits(tail);
            if is_all_digits(version) && !code.is_empty() {
                return format!("EPSG:{code}");
            }
        }
    }

    raw.to_string()
}

/// Whether the identifier refers to EPSG:4326.
///
/// Normalizes first, then falls back to a permissive substring test
/// (`"4326"` or `"CRS84"` anywhere in the raw string). The fallback
/// tolerates servers that deviate from the canonical URN/URI forms at the
/// cost of rare false positives.
pub fn is_epsg_4326(raw: &str) -> bool {
    normalize(raw) == EPSG_4326 || raw.contains("4326") || raw.contains("CRS84")
}

/// Whether the identifier refers to EPSG:3857 (same fallback rule).
pub fn is_epsg_3857(raw: &str) -> bool {
    normalize(raw) == EPSG_3857 || raw.contains("3857")
}

/// Whether an output format name advertises a GeoJSON-family encoding.
///
/// A case-insensitive `"json"` containment check covers `geojson`, `json`
/// and `application/json`.
pub fn is_geojson_format(format: &str) -> bool {
    format.to_ascii_lowercase().contains("json")
}

fn leading_digits(s: &str) -> &str {
    let end = s
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(s.len());
    &s[..end]
}

fn is_all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
