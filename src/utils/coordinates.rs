use crate::error::{ProcessingError, Result};
use crate::models::{AngleInput, AngleKind};
use crate::utils::constants::{
    ANGLE_DECIMAL_PLACES, DEGREES_PER_HOUR, MINUTES_PER_UNIT, SECONDS_PER_UNIT,
};

/// Round to a fixed number of decimal places
pub fn round_to_places(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Convert a right ascension to decimal degrees, rounded to 4 places
///
/// # Examples
/// ```
/// use catalog_normalizer::models::AngleInput;
/// use catalog_normalizer::utils::ra_to_decimal;
///
/// let ra = ra_to_decimal(&AngleInput::Sexagesimal("05 34 31.94".to_string())).unwrap();
/// assert_eq!(ra, 83.6331);
/// ```
pub fn ra_to_decimal(ra: &AngleInput) -> Result<f64> {
    normalize_angle(ra, AngleKind::RightAscension)
}

/// Convert a declination to decimal degrees, rounded to 4 places
///
/// # Examples
/// ```
/// use catalog_normalizer::models::AngleInput;
/// use catalog_normalizer::utils::dec_to_decimal;
///
/// let dec = dec_to_decimal(&AngleInput::Sexagesimal("-22 00 52.2".to_string())).unwrap();
/// assert_eq!(dec, -22.0145);
/// ```
pub fn dec_to_decimal(dec: &AngleInput) -> Result<f64> {
    normalize_angle(dec, AngleKind::Declination)
}

pub fn normalize_angle(input: &AngleInput, kind: AngleKind) -> Result<f64> {
    let degrees = match input {
        AngleInput::DecimalDegrees(value) => *value,
        AngleInput::Sexagesimal(text) => match kind {
            AngleKind::RightAscension => hms_to_decimal(text)?,
            AngleKind::Declination => dms_to_decimal(text)?,
        },
    };

    if !degrees.is_finite() {
        return Err(ProcessingError::InvalidAngle(format!(
            "{} value {:?} is not a finite number of degrees",
            kind.column(),
            input
        )));
    }

    Ok(round_to_places(degrees, ANGLE_DECIMAL_PLACES))
}

/// Convert radians to decimal degrees, rounded to 4 places
pub fn radians_to_decimal(radians: f64) -> f64 {
    round_to_places(radians.to_degrees(), ANGLE_DECIMAL_PLACES)
}

/// Convert "H M S" hour-angle text to unrounded decimal degrees
pub fn hms_to_decimal(hms: &str) -> Result<f64> {
    let [hours, minutes, seconds] = split_sexagesimal(hms, false)?;
    Ok((hours + minutes / MINUTES_PER_UNIT + seconds / SECONDS_PER_UNIT) * DEGREES_PER_HOUR)
}

/// Convert "D M S" text to unrounded decimal degrees.
///
/// Only the degrees token carries the sign; a leading '-' negates the whole
/// angle, so "-00 30 00" is -0.5.
pub fn dms_to_decimal(dms: &str) -> Result<f64> {
    let [degrees, minutes, seconds] = split_sexagesimal(dms, true)?;
    let is_negative = dms.trim_start().starts_with('-');

    let magnitude = degrees.abs() + minutes / MINUTES_PER_UNIT + seconds / SECONDS_PER_UNIT;

    if is_negative {
        Ok(-magnitude)
    } else {
        Ok(magnitude)
    }
}

/// Split into three numeric tokens. Only the leading token may carry a sign,
/// and only when `signed_lead` is set.
fn split_sexagesimal(text: &str, signed_lead: bool) -> Result<[f64; 3]> {
    let parts: Vec<&str> = text.split_whitespace().collect();

    if parts.len() != 3 {
        return Err(ProcessingError::InvalidAngle(format!(
            "Invalid sexagesimal format: '{}'. Expected 3 whitespace-separated tokens, got {}",
            text,
            parts.len()
        )));
    }

    let mut values = [0.0; 3];
    for (position, (value, part)) in values.iter_mut().zip(&parts).enumerate() {
        let has_sign = part.starts_with(|c: char| c == '+' || c == '-');
        if has_sign && (position > 0 || !signed_lead) {
            return Err(ProcessingError::InvalidAngle(format!(
                "Unexpected sign on token '{}' in '{}'",
                part, text
            )));
        }
        *value = part.parse::<f64>().map_err(|_| {
            ProcessingError::InvalidAngle(format!("Invalid token '{}' in '{}'", part, text))
        })?;
    }

    Ok(values)
}

/// Format decimal degrees as "H M S" hour angle
pub fn decimal_to_hms(degrees: f64) -> String {
    let hours_decimal = degrees.rem_euclid(360.0) / DEGREES_PER_HOUR;
    let (hours, minutes, seconds) = split_units(hours_decimal, 2);

    format!("{:02} {:02} {:05.2}", hours % 24, minutes, seconds)
}

/// Format decimal degrees as "±D M S"
pub fn decimal_to_dms(degrees: f64) -> String {
    let sign = if degrees < 0.0 { "-" } else { "+" };
    let (whole, minutes, seconds) = split_units(degrees.abs(), 1);

    format!("{}{:02} {:02} {:04.1}", sign, whole, minutes, seconds)
}

/// Split into whole units, minutes and seconds. Seconds are rounded to
/// `second_places` before splitting so a carry never leaves 60 in a field.
fn split_units(value: f64, second_places: i32) -> (u32, u32, f64) {
    let total_seconds = round_to_places(value * SECONDS_PER_UNIT, second_places);
    let whole = (total_seconds / SECONDS_PER_UNIT).floor();
    let remainder = total_seconds - whole * SECONDS_PER_UNIT;
    let minutes = (remainder / MINUTES_PER_UNIT).floor();
    let seconds = remainder - minutes * MINUTES_PER_UNIT;

    (whole as u32, minutes as u32, seconds)
}
