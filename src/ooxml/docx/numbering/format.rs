//! Number formats for list labels (`w:numFmt`).
use serde::Serialize;

/// Glyph emitted for bullet levels regardless of the counter value.
pub const BULLET: &str = "\u{2022}";

const ROMAN: [(u32, &str); 13] = [
    (1000, "M"),
    (900, "CM"),
    (500, "D"),
    (400, "CD"),
    (100, "C"),
    (90, "XC"),
    (50, "L"),
    (40, "XL"),
    (10, "X"),
    (9, "IX"),
    (5, "V"),
    (4, "IV"),
    (1, "I"),
];

/// How a counter value is rendered.
///
/// Tokens without a dedicated rendering here (`ordinal`, `chineseCounting`,
/// ...) fall back to [`NumberFormat::Decimal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum NumberFormat {
    #[default]
    Decimal,
    UpperRoman,
    LowerRoman,
    UpperLetter,
    LowerLetter,
    Bullet,
    /// No label at all (`none`)
    None,
}

impl NumberFormat {
    pub fn from_xml(s: &str) -> Self {
        match s {
            "upperRoman" => Self::UpperRoman,
            "lowerRoman" => Self::LowerRoman,
            "upperLetter" => Self::UpperLetter,
            "lowerLetter" => Self::LowerLetter,
            "bullet" => Self::Bullet,
            "none" => Self::None,
            _ => Self::Decimal,
        }
    }

    /// Render `value` in this format.
    ///
    /// Roman and alphabetic forms have no zero; a zero value is written as a
    /// decimal `0`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use longan::ooxml::docx::numbering::NumberFormat;
    ///
    /// assert_eq!(NumberFormat::UpperRoman.format(4), "IV");
    /// assert_eq!(NumberFormat::LowerLetter.format(27), "aa");
    /// ```
    pub fn format(self, value: u32) -> String {
        match self {
            Self::Decimal => itoa::Buffer::new().format(value).to_string(),
            Self::UpperRoman if value > 0 => to_roman(value),
            Self::LowerRoman if value > 0 => to_roman(value).to_ascii_lowercase(),
            Self::UpperLetter if value > 0 => to_alpha(value),
            Self::LowerLetter if value > 0 => to_alpha(value).to_ascii_lowercase(),
            Self::Bullet => BULLET.to_string(),
            Self::None => String::new(),
            _ => itoa::Buffer::new().format(value).to_string(),
        }
    }

    #[inline]
    pub fn is_bullet(self) -> bool {
        self == Self::Bullet
    }
}

/// Subtractive Roman numeral in upper case. Values above 3999 repeat `M`.
pub fn to_roman(mut value: u32) -> String {
    let mut out = String::new();
    for (weight, symbol) in ROMAN {
        while value >= weight {
            out.push_str(symbol);
            value -= weight;
        }
    }
    out
}

/// Bijective base-26 letters in upper case (`1` is `A`, `27` is `AA`).
pub fn to_alpha(mut value: u32) -> String {
    let mut letters = Vec::new();
    while value > 0 {
        value -= 1;
        letters.push(b'A' + (value % 26) as u8);
        value /= 26;
    }
    letters.reverse();
    String::from_utf8_lossy(&letters).into_owned()
}
