//! Publisher branding

use serde::Serialize;

/// Tailwind-style shade steps, lightest first
pub const SHADES: [u16; 11] = [50, 100, 200, 300, 400, 500, 600, 700, 800, 900, 950];

/// Eleven hex colours, one per entry of [`SHADES`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Palette(pub [&'static str; 11]);

impl Palette {
    /// Colour for a shade step such as `600`
    pub fn shade(&self, step: u16) -> Option<&'static str> {
        SHADES
            .iter()
            .position(|s| *s == step)
            .map(|i| self.0[i])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ThemeColors {
    pub primary: Palette,
    pub secondary: Palette,
}

/// The branding a publisher storefront is rendered with
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Theme {
    /// Storage and routing key (`lumina`, `blueleaf`, `sunstone`)
    pub key: &'static str,
    pub app_name: &'static str,
    /// Icon name for the logo
    pub logo: &'static str,
    pub colors: ThemeColors,
}
