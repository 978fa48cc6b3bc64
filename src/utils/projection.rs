use crate::models::CartesianTriple;

/// Project (ra, dec) in radians onto a sphere of radius `parallax`.
///
/// Parallax is not validated; zero or negative values simply scale the result.
pub fn radec_rad_to_cartesian(ra: f64, dec: f64, parallax: f64) -> CartesianTriple {
    let cos_dec = dec.cos();
    CartesianTriple::new(
        parallax * cos_dec * ra.cos(),
        parallax * cos_dec * ra.sin(),
        parallax * dec.sin(),
    )
}

/// Project (ra, dec) in decimal degrees onto a sphere of radius `parallax`
pub fn radec_to_cartesian(ra_deg: f64, dec_deg: f64, parallax: f64) -> CartesianTriple {
    radec_rad_to_cartesian(ra_deg.to_radians(), dec_deg.to_radians(), parallax)
}
