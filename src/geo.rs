//! Great-circle distance and OSGB36→WGS84 grid conversion.
//!
//! Mirrors the shape of a haversine distance module but works in statute
//! miles (not km/driving-speed) since the planner's heuristic cost is
//! expressed in miles, per the BPLAN domain convention.

/// Earth radius in statute miles.
const EARTH_RADIUS_MILES: f64 = 3958.8;

/// OSGB36 Airy 1830 ellipsoid semi-major axis, metres.
const OSGB36_A: f64 = 6377563.396;
/// OSGB36 Airy 1830 ellipsoid semi-minor axis, metres.
const OSGB36_B: f64 = 6356256.909;
/// National Grid true origin scale factor.
const NG_F0: f64 = 0.9996012717;
/// National Grid true origin latitude, radians.
const NG_LAT0: f64 = 49.0 * std::f64::consts::PI / 180.0;
/// National Grid true origin longitude, radians.
const NG_LON0: f64 = -2.0 * std::f64::consts::PI / 180.0;
/// National Grid true origin northing, metres.
const NG_N0: f64 = -100000.0;
/// National Grid true origin easting, metres.
const NG_E0: f64 = 400000.0;

/// Great-circle distance between two (lat, lon) WGS84 points, in statute
/// miles. Returns `None` if either point is absent.
pub fn distance_miles(a: Option<(f64, f64)>, b: Option<(f64, f64)>) -> Option<f64> {
    let (lat1, lon1) = a?;
    let (lat2, lon2) = b?;

    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().asin();

    let dist = EARTH_RADIUS_MILES * c;
    if dist.is_finite() {
        Some(dist)
    } else {
        None
    }
}

/// Convert an OS National Grid (Easting, Northing) pair to WGS84 (lat, lon).
///
/// Implements the standard Ordnance Survey OSGB36-to-WGS84 transform via the
/// Airy 1830 ellipsoid and transverse Mercator projection, followed by a
/// Helmert datum shift. Returns `None` on any non-finite intermediate
/// result.
pub fn bng_to_wgs(easting: i32, northing: i32) -> Option<(f64, f64)> {
    let (lat, lon) = osgb36_to_latlon(easting as f64, northing as f64);
    if !lat.is_finite() || !lon.is_finite() {
        return None;
    }

    let (lat_wgs, lon_wgs, _) = helmert_osgb36_to_wgs84(lat, lon, 0.0);
    if lat_wgs.is_finite() && lon_wgs.is_finite() {
        Some((lat_wgs.to_degrees(), lon_wgs.to_degrees()))
    } else {
        None
    }
}

/// Inverse transverse Mercator: National Grid (E, N) -> OSGB36 (lat, lon) in
/// radians.
fn osgb36_to_latlon(e: f64, n: f64) -> (f64, f64) {
    let a = OSGB36_A;
    let b = OSGB36_B;
    let e2 = (a * a - b * b) / (a * a);
    let n_ratio = (a - b) / (a + b);

    let mut lat = NG_LAT0;
    let mut m;
    loop {
        lat = (n - NG_N0 - m_arc(lat, NG_LAT0, b, n_ratio)) / (a * NG_F0) + lat;
        m = m_arc(lat, NG_LAT0, b, n_ratio);
        if (n - NG_N0 - m).abs() < 0.00001 {
            break;
        }
    }

    let sin_lat = lat.sin();
    let cos_lat = lat.cos();
    let tan_lat = lat.tan();

    let nu = a * NG_F0 / (1.0 - e2 * sin_lat * sin_lat).sqrt();
    let rho = a * NG_F0 * (1.0 - e2) / (1.0 - e2 * sin_lat * sin_lat).powf(1.5);
    let eta2 = nu / rho - 1.0;

    let vii = tan_lat / (2.0 * rho * nu);
    let viii = tan_lat / (24.0 * rho * nu.powi(3)) * (5.0 + 3.0 * tan_lat * tan_lat + eta2
        - 9.0 * tan_lat * tan_lat * eta2);
    let ix = tan_lat / (720.0 * rho * nu.powi(5))
        * (61.0 + 90.0 * tan_lat * tan_lat + 45.0 * tan_lat.powi(4));

    let x = e - NG_E0;

    let xv = 1.0 / (cos_lat * nu);
    let xvi = 1.0 / (cos_lat * nu.powi(3) * 6.0) * (nu / rho + 2.0 * tan_lat * tan_lat);
    let xvii = 1.0 / (cos_lat * nu.powi(5) * 120.0)
        * (5.0 + 28.0 * tan_lat * tan_lat + 24.0 * tan_lat.powi(4));
    let xviii = 1.0 / (cos_lat * nu.powi(7) * 5040.0)
        * (61.0 + 662.0 * tan_lat * tan_lat + 1320.0 * tan_lat.powi(4)
            + 720.0 * tan_lat.powi(6));

    let out_lat = lat - vii * x.powi(2) + viii * x.powi(4) - ix * x.powi(6);
    let out_lon = NG_LON0 + xv * x - xvi * x.powi(3) + xvii * x.powi(5) - xviii * x.powi(7);

    (out_lat, out_lon)
}

/// Meridional arc distance from the equator to `lat`, relative to `lat0`.
/// Standard Ordnance Survey series, scaled by `b * F0`.
fn m_arc(lat: f64, lat0: f64, b: f64, n_ratio: f64) -> f64 {
    let n = n_ratio;
    let series = (1.0 + n + 5.0 / 4.0 * n.powi(2) + 5.0 / 4.0 * n.powi(3)) * (lat - lat0)
        - (3.0 * n + 3.0 * n.powi(2) + 21.0 / 8.0 * n.powi(3))
            * (lat - lat0).sin()
            * (lat + lat0).cos()
        + (15.0 / 8.0 * n.powi(2) + 15.0 / 8.0 * n.powi(3))
            * (2.0 * (lat - lat0)).sin()
            * (2.0 * (lat + lat0)).cos()
        - 35.0 / 24.0 * n.powi(3) * (3.0 * (lat - lat0)).sin() * (3.0 * (lat + lat0)).cos();
    b * NG_F0 * series
}

/// Helmert 7-parameter datum transform, OSGB36 -> WGS84.
///
/// Input/output latitude and longitude in radians; height in metres.
fn helmert_osgb36_to_wgs84(lat: f64, lon: f64, height: f64) -> (f64, f64, f64) {
    // OSGB36 Airy 1830 -> Cartesian
    let a = OSGB36_A;
    let b = OSGB36_B;
    let e2 = (a * a - b * b) / (a * a);
    let sin_lat = lat.sin();
    let cos_lat = lat.cos();
    let nu = a / (1.0 - e2 * sin_lat * sin_lat).sqrt();

    let x = (nu + height) * cos_lat * lon.cos();
    let y = (nu + height) * cos_lat * lon.sin();
    let z = ((1.0 - e2) * nu + height) * sin_lat;

    // Helmert shift parameters, OSGB36 -> WGS84 (published OS transform).
    let tx = 446.448;
    let ty = -125.157;
    let tz = 542.060;
    let s = -0.0000204894; // scale factor
    let rx = (0.1502_f64 / 3600.0).to_radians();
    let ry = (0.2470_f64 / 3600.0).to_radians();
    let rz = (0.8421_f64 / 3600.0).to_radians();

    let x2 = tx + (1.0 + s) * x - rz * y + ry * z;
    let y2 = ty + rz * x + (1.0 + s) * y - rx * z;
    let z2 = tz - ry * x + rx * y + (1.0 + s) * z;

    // WGS84 Cartesian -> geodetic (iterative)
    let wgs_a = 6378137.0;
    let wgs_b = 6356752.314245;
    let wgs_e2 = (wgs_a * wgs_a - wgs_b * wgs_b) / (wgs_a * wgs_a);

    let p = (x2 * x2 + y2 * y2).sqrt();
    let mut lat2 = (z2 / (p * (1.0 - wgs_e2))).atan();
    for _ in 0..10 {
        let sin_lat2 = lat2.sin();
        let nu2 = wgs_a / (1.0 - wgs_e2 * sin_lat2 * sin_lat2).sqrt();
        lat2 = (z2 + wgs_e2 * nu2 * sin_lat2) / p;
        lat2 = lat2.atan();
    }
    let sin_lat2 = lat2.sin();
    let nu2 = wgs_a / (1.0 - wgs_e2 * sin_lat2 * sin_lat2).sqrt();
    let height2 = p / lat2.cos() - nu2;
    let lon2 = y2.atan2(x2);

    (lat2, lon2, height2)
}
