use crate::error::{CalcError, CalcResult};
use crate::models::{BoundingBox, Coordinate, MapView};

/// Earth's radius in kilometers
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Zoom used when there is no spread to measure (zero or one point)
pub const DEFAULT_ZOOM: u8 = 7;

/// Spread thresholds in degrees, widest first. A spread strictly above the
/// threshold maps to the paired zoom level.
const ZOOM_STEPS: [(f64, u8); 11] = [
    (20.0, 3),
    (10.0, 4),
    (5.0, 5),
    (2.0, 6),
    (1.0, 7),
    (0.5, 8),
    (0.2, 9),
    (0.1, 10),
    (0.05, 11),
    (0.02, 12),
    (0.01, 13),
];

pub const MIN_ZOOM: u8 = 3;
pub const MAX_ZOOM: u8 = 14;

/// Calculate the Haversine distance between two points in kilometers
#[inline]
pub fn haversine_distance_km(a: &Coordinate, b: &Coordinate) -> f64 {
    let lat1_rad = a.latitude.to_radians();
    let lat2_rad = b.latitude.to_radians();
    let delta_lat = (b.latitude - a.latitude).to_radians();
    let delta_lon = (b.longitude - a.longitude).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    // Rounding can push antipodal pairs just past 1
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Arithmetic mean of latitudes and longitudes
pub fn centroid(points: &[Coordinate]) -> CalcResult<Coordinate> {
    if points.is_empty() {
        return Err(CalcError::EmptyInput("centroid of no points"));
    }

    let n = points.len() as f64;
    let (lat_sum, lon_sum) = points
        .iter()
        .fold((0.0_f64, 0.0_f64), |(lat, lon), p| (lat + p.latitude, lon + p.longitude));

    Ok(Coordinate {
        latitude: lat_sum / n,
        longitude: lon_sum / n,
    })
}

/// Smallest box containing every point, or `None` for no points
pub fn bounds(points: &[Coordinate]) -> Option<BoundingBox> {
    let first = points.first()?;

    let init = BoundingBox {
        min_lat: first.latitude,
        max_lat: first.latitude,
        min_lon: first.longitude,
        max_lon: first.longitude,
    };

    Some(points.iter().skip(1).fold(init, |bbox, p| BoundingBox {
        min_lat: bbox.min_lat.min(p.latitude),
        max_lat: bbox.max_lat.max(p.latitude),
        min_lon: bbox.min_lon.min(p.longitude),
        max_lon: bbox.max_lon.max(p.longitude),
    }))
}

/// Heuristic map zoom (3..=14) that fits all points
///
/// Fewer than two points have no spread, so the fixed default of 7 is used.
pub fn zoom_level_for_bounds(points: &[Coordinate]) -> u8 {
    zoom_level_with_default(points, DEFAULT_ZOOM)
}

/// Same as [`zoom_level_for_bounds`] with a caller-chosen default for
/// fewer than two points. The default is clamped to 3..=14.
pub fn zoom_level_with_default(points: &[Coordinate], default_zoom: u8) -> u8 {
    let default_zoom = default_zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    if points.len() < 2 {
        return default_zoom;
    }

    match bounds(points) {
        Some(bbox) => zoom_for_spread(bbox.max_spread()),
        None => default_zoom,
    }
}

#[inline]
fn zoom_for_spread(spread: f64) -> u8 {
    ZOOM_STEPS
        .iter()
        .find(|(threshold, _)| spread > *threshold)
        .map(|(_, zoom)| *zoom)
        .unwrap_or(MAX_ZOOM)
}

/// Center and zoom for a set of points
pub fn map_view(points: &[Coordinate], default_zoom: u8) -> CalcResult<MapView> {
    Ok(MapView {
        center: centroid(points)?,
        zoom: zoom_level_with_default(points, default_zoom),
    })
}

/// Calculate a bounding box around a center point
///
/// This is much faster than Haversine for pre-filtering. Longitudes may run
/// past ±180° when the circle crosses the antimeridian, and a circle that
/// reaches a pole spans every longitude.
pub fn calculate_bounding_box(center: &Coordinate, radius_km: f64) -> BoundingBox {
    // Angular radius of the search circle
    let angular = radius_km / EARTH_RADIUS_KM;
    let lat_delta = angular.to_degrees();

    // Widest longitude offset of the circle, reached off the center latitude
    let cos_lat = center.latitude.to_radians().cos();
    let lon_delta = if angular.sin() < cos_lat {
        (angular.sin() / cos_lat).asin().to_degrees()
    } else {
        180.0
    };

    BoundingBox {
        min_lat: center.latitude - lat_delta,
        max_lat: center.latitude + lat_delta,
        min_lon: center.longitude - lon_delta,
        max_lon: center.longitude + lon_delta,
    }
}

/// Check if a point is within a bounding box
///
/// Boxes extending past ±180° longitude continue on the other side of the
/// antimeridian; boxes extending past a pole cover every longitude.
#[inline]
pub fn is_within_bounding_box(point: &Coordinate, bbox: &BoundingBox) -> bool {
    if point.latitude < bbox.min_lat || point.latitude > bbox.max_lat {
        return false;
    }

    if bbox.min_lat <= -90.0 || bbox.max_lat >= 90.0 {
        return true;
    }

    [point.longitude, point.longitude + 360.0, point.longitude - 360.0]
        .iter()
        .any(|lon| *lon >= bbox.min_lon && *lon <= bbox.max_lon)
}

/// Indices of the points within `radius_km` of `center`
///
/// Uses the bounding box as a cheap pre-filter before the exact distance.
pub fn within_radius(center: &Coordinate, points: &[Coordinate], radius_km: f64) -> Vec<usize> {
    let bbox = calculate_bounding_box(center, radius_km);

    points
        .iter()
        .enumerate()
        .filter(|(_, p)| is_within_bounding_box(p, &bbox))
        .filter(|(_, p)| haversine_distance_km(center, p) <= radius_km)
        .map(|(i, _)| i)
        .collect()
}

/// Distance from `from` to the closest of `points`
pub fn nearest_distance_km(from: &Coordinate, points: &[Coordinate]) -> Option<f64> {
    points
        .iter()
        .map(|p| haversine_distance_km(from, p))
        .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
}
