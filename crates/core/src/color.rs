//! The product color palette and hex/RGB conversion.

use serde::{Deserialize, Serialize};

/// An opaque RGB triple. Placements are always fully opaque; alpha is
/// attached when building the upsert payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// One selectable palette entry.
#[derive(Debug, Clone, Copy)]
pub struct PaletteColor {
    pub name: &'static str,
    pub hex: &'static str,
}

/// The twenty colors offered for pixel coloring.
pub const PALETTE: [PaletteColor; 20] = [
    PaletteColor { name: "Red", hex: "#EF4444" },
    PaletteColor { name: "Orange", hex: "#F97316" },
    PaletteColor { name: "Amber", hex: "#F59E0B" },
    PaletteColor { name: "Yellow", hex: "#EAB308" },
    PaletteColor { name: "Lime", hex: "#84CC16" },
    PaletteColor { name: "Green", hex: "#22C55E" },
    PaletteColor { name: "Emerald", hex: "#10B981" },
    PaletteColor { name: "Teal", hex: "#14B8A6" },
    PaletteColor { name: "Cyan", hex: "#06B6D4" },
    PaletteColor { name: "Sky", hex: "#0EA5E9" },
    PaletteColor { name: "Blue", hex: "#3B82F6" },
    PaletteColor { name: "Indigo", hex: "#6366F1" },
    PaletteColor { name: "Violet", hex: "#8B5CF6" },
    PaletteColor { name: "Purple", hex: "#A855F7" },
    PaletteColor { name: "Fuchsia", hex: "#D946EF" },
    PaletteColor { name: "Pink", hex: "#EC4899" },
    PaletteColor { name: "Rose", hex: "#F43F5E" },
    PaletteColor { name: "White", hex: "#FFFFFF" },
    PaletteColor { name: "Gray", hex: "#6B7280" },
    PaletteColor { name: "Black", hex: "#000000" },
];

impl Rgb {
    /// Parse a `#RRGGBB` string (the `#` is optional, case-insensitive).
    ///
    /// Unparseable input falls back to black, matching the tolerant
    /// behavior the product has always had for color fields.
    pub fn from_hex(hex: &str) -> Self {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Rgb { r: 0, g: 0, b: 0 };
        }
        // Infallible after the digit check above.
        let channel =
            |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).unwrap_or(0);
        Rgb {
            r: channel(0..2),
            g: channel(2..4),
            b: channel(4..6),
        }
    }

    /// Format as a lowercase `#rrggbb` string.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Resolve a user-supplied color argument: a palette name
/// (case-insensitive) or a hex string.
///
/// Returns `None` only when the input is neither a known name nor
/// something that looks like hex at all.
pub fn resolve_color(input: &str) -> Option<Rgb> {
    if let Some(entry) = PALETTE
        .iter()
        .find(|c| c.name.eq_ignore_ascii_case(input.trim()))
    {
        return Some(Rgb::from_hex(entry.hex));
    }
    let digits = input.trim().strip_prefix('#').unwrap_or(input.trim());
    if digits.len() == 6 && digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Some(Rgb::from_hex(digits));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_palette_red() {
        assert_eq!(Rgb::from_hex("#EF4444"), Rgb { r: 239, g: 68, b: 68 });
    }

    #[test]
    fn hash_prefix_is_optional() {
        assert_eq!(Rgb::from_hex("3B82F6"), Rgb { r: 59, g: 130, b: 246 });
    }

    #[test]
    fn lowercase_accepted() {
        assert_eq!(Rgb::from_hex("#ffd700"), Rgb { r: 255, g: 215, b: 0 });
    }

    #[test]
    fn malformed_hex_falls_back_to_black() {
        assert_eq!(Rgb::from_hex("nope"), Rgb { r: 0, g: 0, b: 0 });
        assert_eq!(Rgb::from_hex("#12345"), Rgb { r: 0, g: 0, b: 0 });
        assert_eq!(Rgb::from_hex("#1234567"), Rgb { r: 0, g: 0, b: 0 });
    }

    #[test]
    fn hex_round_trip_is_lowercase() {
        assert_eq!(Rgb { r: 239, g: 68, b: 68 }.to_hex(), "#ef4444");
        assert_eq!(Rgb::from_hex(&Rgb { r: 1, g: 2, b: 3 }.to_hex()), Rgb { r: 1, g: 2, b: 3 });
    }

    #[test]
    fn palette_has_twenty_parseable_entries() {
        assert_eq!(PALETTE.len(), 20);
        for entry in PALETTE {
            // Every palette hex must round-trip exactly.
            let rgb = Rgb::from_hex(entry.hex);
            assert_eq!(rgb.to_hex(), entry.hex.to_ascii_lowercase(), "{}", entry.name);
        }
    }

    #[test]
    fn resolve_by_name_is_case_insensitive() {
        assert_eq!(resolve_color("red"), Some(Rgb { r: 239, g: 68, b: 68 }));
        assert_eq!(resolve_color("EMERALD"), Some(Rgb { r: 16, g: 185, b: 129 }));
    }

    #[test]
    fn resolve_by_hex() {
        assert_eq!(resolve_color("#06B6D4"), Some(Rgb { r: 6, g: 182, b: 212 }));
    }

    #[test]
    fn resolve_rejects_garbage() {
        assert_eq!(resolve_color("chartreuse-ish"), None);
        assert_eq!(resolve_color(""), None);
    }
}
