//! Location string parsing for map display

use serde::Serialize;

/// Parsed map coordinates. Either side may be absent when the stored
/// location string is not a usable "lat,lng" pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Coordinates {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

/// Parse a free-text location into map coordinates.
///
/// Splits on the first comma and parses each trimmed side as a float. A
/// side that fails to parse (or parses non-finite) yields None rather than
/// an error; a string without a comma yields no coordinates at all. The
/// stored location string itself is never modified.
pub fn parse_location(location: &str) -> Coordinates {
    let Some((lat_raw, lng_raw)) = location.split_once(',') else {
        return Coordinates::default();
    };

    Coordinates {
        lat: parse_part(lat_raw),
        lng: parse_part(lng_raw),
    }
}

fn parse_part(part: &str) -> Option<f64> {
    part.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
