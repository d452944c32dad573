//! Length units used by WordprocessingML and their CSS conversions.
//!
//! - twips: twentieths of a point, used for spacing, indentation and page geometry
//! - EMU: English Metric Units, used for drawing extents
//! - half-points: font sizes
//! - eighths of a point: border widths

pub const EMUS_PER_INCH: i64 = 914_400;
pub const EMUS_PER_PT: i64 = 12_700;
pub const EMUS_PER_TWIP: i64 = 635;
pub const TWIPS_PER_PT: i64 = 20;
pub const TWIPS_PER_INCH: i64 = 1_440;
/// Line spacing in `auto` mode is expressed in 240ths of a line.
pub const AUTO_LINE_UNITS: i64 = 240;

/// A4 page width in twips.
pub const A4_WIDTH_TWIPS: i64 = 11_906;
/// A4 page height in twips.
pub const A4_HEIGHT_TWIPS: i64 = 16_838;

#[inline]
pub fn emu_to_pt_f64(emu: i64) -> f64 {
    emu as f64 / EMUS_PER_PT as f64
}

#[inline]
pub fn twips_to_pt_f64(twips: i64) -> f64 {
    twips as f64 / TWIPS_PER_PT as f64
}

#[inline]
pub fn half_points_to_pt_f64(half_points: i64) -> f64 {
    half_points as f64 / 2.0
}

#[inline]
pub fn eighths_to_pt_f64(eighths: i64) -> f64 {
    eighths as f64 / 8.0
}

/// Format a number for CSS without a trailing `.0` on whole values.
///
/// Values are rounded to three decimals first so that twips divisions like
/// `1/3` do not produce long tails.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let rounded = (value * 1000.0).round() / 1000.0;
    if rounded.fract() == 0.0 && rounded.abs() < i64::MAX as f64 {
        let mut buf = itoa::Buffer::new();
        return buf.format(rounded as i64).to_string();
    }
    let mut buf = ryu::Buffer::new();
    buf.format_finite(rounded).to_string()
}

/// Format a point value as a CSS length, e.g. `12pt` or `0.5pt`.
#[inline]
pub fn css_pt(value: f64) -> String {
    let mut s = format_number(value);
    s.push_str("pt");
    s
}
