use crate::foundation::core::RgbaRaster;

/// Checkerboard tile edge in pixels.
pub const TILE_SIZE: u32 = 16;

/// Two-color checkerboard palette behind the preview.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Near-black tiles.
    #[default]
    Dark,
    /// Near-white tiles.
    Light,
    /// Handheld-console greens.
    Phosphor,
}

impl Theme {
    /// `(even, odd)` tile colors.
    pub fn colors(self) -> ([u8; 4], [u8; 4]) {
        match self {
            Self::Dark => ([0x00, 0x00, 0x00, 255], [0x11, 0x11, 0x11, 255]),
            Self::Light => ([0xff, 0xff, 0xff, 255], [0xee, 0xee, 0xee, 255]),
            Self::Phosphor => ([0x0f, 0x38, 0x0f, 255], [0x8b, 0xac, 0x0f, 255]),
        }
    }

    /// Next theme in the light, dark, phosphor cycle.
    pub fn next(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Phosphor,
            Self::Phosphor => Self::Light,
        }
    }
}

impl std::str::FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            "phosphor" | "green" => Ok(Self::Phosphor),
            other => Err(format!("unknown theme '{other}'")),
        }
    }
}

/// Fill the whole raster with the theme's checkerboard.
pub fn paint_checkerboard(dst: &mut RgbaRaster, theme: Theme) {
    let (even, odd) = theme.colors();
    let width = dst.width as usize;
    if width == 0 {
        return;
    }
    for (y, row) in dst.data.chunks_exact_mut(width * 4).enumerate() {
        let ty = y as u32 / TILE_SIZE;
        for (x, px) in row.chunks_exact_mut(4).enumerate() {
            let tx = x as u32 / TILE_SIZE;
            let c = if (tx + ty) % 2 == 0 { even } else { odd };
            px.copy_from_slice(&c);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/background.rs"]
mod tests;
