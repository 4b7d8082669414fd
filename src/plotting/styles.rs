use plotters::style::{RGBAColor, RGBColor};

/// Chart theme configuration
pub struct ChartTheme {
    pub background_color: RGBAColor,
    pub text_color: RGBAColor,
    pub grid_color: RGBAColor,
    pub axis_color: RGBAColor,
    /// Fill opacity for radar polygons and polar wedges
    pub area_opacity: f64,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            background_color: RGBAColor(15, 23, 42, 1.0),
            text_color: RGBAColor(226, 232, 240, 0.9),
            grid_color: RGBAColor(148, 163, 184, 0.25),
            axis_color: RGBAColor(226, 232, 240, 0.8),
            area_opacity: 0.7,
        }
    }
}

/// Chart style configuration
pub struct ChartStyle {
    pub line_width: u32,
    pub font_size: u32,
    pub caption_size: u32,
    pub margin: u32,
    pub label_area_size: u32,
    /// Width reserved for the legend on round charts
    pub legend_width: u32,
    pub legend_swatch: u32,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            line_width: 2,
            font_size: 15,
            caption_size: 24,
            margin: 10,
            label_area_size: 50,
            legend_width: 190,
            legend_swatch: 12,
        }
    }
}

const FALLBACK_COLOR: RGBColor = RGBColor(148, 163, 184);

/// Parse `#rrggbb` or `#rgb`. Anything else falls back to slate gray.
pub fn parse_hex_color(hex: &str) -> RGBColor {
    let digits = hex.trim().trim_start_matches('#');
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return FALLBACK_COLOR;
    }
    let expanded: String = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 => digits.to_string(),
        _ => return FALLBACK_COLOR,
    };

    let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).ok();
    match (channel(0), channel(2), channel(4)) {
        (Some(r), Some(g), Some(b)) => RGBColor(r, g, b),
        _ => FALLBACK_COLOR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#3178c6"), RGBColor(0x31, 0x78, 0xc6));
        assert_eq!(parse_hex_color("fff"), RGBColor(255, 255, 255));
        assert_eq!(parse_hex_color("#zzzzzz"), FALLBACK_COLOR);
        assert_eq!(parse_hex_color(""), FALLBACK_COLOR);
        assert_eq!(parse_hex_color("#ééé"), FALLBACK_COLOR);
    }
}
