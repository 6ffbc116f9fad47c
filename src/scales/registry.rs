//! Named color-interpolation scales offered by the `colorsDropdown` field.
//!
//! The registry is a fixed, ordered table built at compile time; it is never mutated. The
//! whitelist adds 1-based ids and a terminal synthetic `Custom` entry that has no gradient.

use crate::foundation::color::HexColor;

/// Name of the synthetic whitelist entry without a gradient.
pub const CUSTOM_SCALE: &str = "Custom";

/// Number of samples in a dropdown preview strip.
pub const PREVIEW_SAMPLES: usize = 10;

/// Midpoint used for the representative tag color.
pub const CHIP_SAMPLE_T: f64 = 0.5;

/// Interpolation function `t ∈ [0, 1] -> color`.
pub type Interpolator = fn(f64) -> colorous::Color;

macro_rules! scale {
    ($name:literal, $gradient:ident) => {
        (
            $name,
            (|t: f64| colorous::$gradient.eval_continuous(t)) as Interpolator,
        )
    };
}

static SCALES: [(&str, Interpolator); 37] = [
    scale!("YlGnBu", YELLOW_GREEN_BLUE),
    scale!("Viridis", VIRIDIS),
    scale!("Inferno", INFERNO),
    scale!("Magma", MAGMA),
    scale!("Plasma", PLASMA),
    scale!("Warm", WARM),
    scale!("Cool", COOL),
    scale!("CubehelixDefault", CUBEHELIX),
    scale!("BuGn", BLUE_GREEN),
    scale!("BuPu", BLUE_PURPLE),
    scale!("GnBu", GREEN_BLUE),
    scale!("OrRd", ORANGE_RED),
    scale!("PuBuGn", PURPLE_BLUE_GREEN),
    scale!("PuBu", PURPLE_BLUE),
    scale!("PuRd", PURPLE_RED),
    scale!("RdPu", RED_PURPLE),
    scale!("YlGn", YELLOW_GREEN),
    scale!("YlOrBr", YELLOW_ORANGE_BROWN),
    scale!("YlOrRd", YELLOW_ORANGE_RED),
    scale!("Turbo", TURBO),
    scale!("Cividis", CIVIDIS),
    scale!("Rainbow", RAINBOW),
    scale!("Sinebow", SINEBOW),
    scale!("Blues", BLUES),
    scale!("Greens", GREENS),
    scale!("Greys", GREYS),
    scale!("Purples", PURPLES),
    scale!("Reds", REDS),
    scale!("Spectral", SPECTRAL),
    scale!("RdYlGn", RED_YELLOW_GREEN),
    scale!("RdYlBu", RED_YELLOW_BLUE),
    scale!("RdGy", RED_GREY),
    scale!("RdBu", RED_BLUE),
    scale!("PiYG", PINK_GREEN),
    scale!("PRGn", PURPLE_GREEN),
    scale!("PuOr", PURPLE_ORANGE),
    scale!("BrBG", BROWN_GREEN),
];

/// One selectable whitelist entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ScaleEntry {
    /// 1-based position in the whitelist.
    pub id: u32,
    /// Scale name; also the tag text and the committed value.
    pub name: &'static str,
}

impl ScaleEntry {
    /// `true` for the synthetic `Custom` entry.
    pub fn is_custom(&self) -> bool {
        self.name == CUSTOM_SCALE
    }
}

/// Whitelist in display order: every registry scale, then `Custom`.
pub fn whitelist() -> impl Iterator<Item = ScaleEntry> {
    SCALES
        .iter()
        .map(|(name, _)| *name)
        .chain(std::iter::once(CUSTOM_SCALE))
        .enumerate()
        .map(|(i, name)| ScaleEntry {
            id: i as u32 + 1,
            name,
        })
}

/// Number of whitelist entries, `Custom` included.
pub fn whitelist_len() -> usize {
    SCALES.len() + 1
}

/// Whitelist entry by name (`Custom` included).
pub fn whitelist_entry(name: &str) -> Option<ScaleEntry> {
    whitelist().find(|e| e.name == name)
}

/// Interpolation function registered under `name`.
pub fn lookup(name: &str) -> Option<Interpolator> {
    SCALES.iter().find(|(n, _)| *n == name).map(|(_, f)| *f)
}

/// Evaluate the named scale at `t` (clamped to `[0, 1]`).
pub fn sample(name: &str, t: f64) -> Option<HexColor> {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    lookup(name).map(|f| HexColor::from(f(t)))
}

/// Representative tag color: the scale at its midpoint, or neutral grey for `Custom` and
/// unknown names.
pub fn chip_color(name: &str) -> HexColor {
    sample(name, CHIP_SAMPLE_T).unwrap_or(HexColor::NEUTRAL)
}

/// Ten evenly spaced samples (`i / 9`) for the dropdown preview strip.
pub fn preview_strip(name: &str) -> Option<[HexColor; PREVIEW_SAMPLES]> {
    let interpolate = lookup(name)?;
    let last = (PREVIEW_SAMPLES - 1) as f64;
    Some(std::array::from_fn(|i| {
        HexColor::from(interpolate(i as f64 / last))
    }))
}

/// Tag text split into a scale name and an optional description.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScaleLabel {
    /// Trimmed scale name.
    pub name: String,
    /// Text between the first `<` and `>`, trimmed.
    pub description: Option<String>,
}

/// Split `"Name <description>"` into its parts.
pub fn parse_scale_label(text: &str) -> ScaleLabel {
    let Some(open) = text.find('<') else {
        return ScaleLabel {
            name: text.trim().to_owned(),
            description: None,
        };
    };
    let name = text[..open].trim().to_owned();
    let rest = &text[open + 1..];
    let description = rest.find('>').map(|close| rest[..close].trim().to_owned());
    ScaleLabel {
        name,
        description: description.filter(|d| !d.is_empty()),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scales/registry.rs"]
mod tests;
