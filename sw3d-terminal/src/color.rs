/// CSS color strings to terminal colors
use crossterm::style::Color;

/// Named colors the demo scenes draw with.
const NAMED_COLORS: &[(&str, (u8, u8, u8))] = &[
    ("black", (0, 0, 0)),
    ("white", (255, 255, 255)),
    ("red", (255, 0, 0)),
    ("green", (0, 128, 0)),
    ("blue", (0, 0, 255)),
    ("yellow", (255, 255, 0)),
    ("cyan", (0, 255, 255)),
    ("magenta", (255, 0, 255)),
    ("grey", (128, 128, 128)),
    ("gray", (128, 128, 128)),
    ("royalblue", (65, 105, 225)),
];

/// Parse `rgb(r,g,b)`, `#rrggbb` or a named color into 8-bit channels.
///
/// Fractional channels are rounded and clamped. Returns `None` for anything
/// else.
pub fn parse_rgb(css: &str) -> Option<(u8, u8, u8)> {
    let css = css.trim();

    if let Some(body) = css
        .strip_prefix("rgb(")
        .and_then(|rest| rest.strip_suffix(')'))
    {
        let mut channels = body.split(',').map(|c| c.trim().parse::<f64>());
        let mut next = || -> Option<u8> {
            let value = channels.next()?.ok()?;
            Some(value.round().clamp(0.0, 255.0) as u8)
        };
        let rgb = (next()?, next()?, next()?);
        return channels.next().is_none().then_some(rgb);
    }

    if let Some(hex) = css.strip_prefix('#') {
        if hex.len() != 6 {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        return Some((channel(0)?, channel(2)?, channel(4)?));
    }

    NAMED_COLORS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(css))
        .map(|&(_, rgb)| rgb)
}

/// Terminal color for a CSS color, white when it cannot be parsed.
pub fn to_terminal_color(css: &str) -> Color {
    match parse_rgb(css) {
        Some((r, g, b)) => Color::Rgb { r, g, b },
        None => {
            tracing::warn!(color = css, "unrecognized color, drawing white");
            Color::White
        }
    }
}

/// Perceived brightness in `0.0..=1.0`.
pub fn luminance((r, g, b): (u8, u8, u8)) -> f64 {
    (0.2126 * f64::from(r) + 0.7152 * f64::from(g) + 0.0722 * f64::from(b)) / 255.0
}
