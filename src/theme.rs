use catppuccin::PALETTE;
use ratatui::style::Color;

/// Convert a catppuccin color to a ratatui color.
const fn catppuccin_to_color(c: &catppuccin::Color) -> Color {
    Color::Rgb(c.rgb.r, c.rgb.g, c.rgb.b)
}

/// Application theme.
///
/// Holds the palette entries the landing page and dialogs draw with. The
/// factory functions build one theme per Catppuccin flavor; the light Latte
/// flavor is closest to the clinic's white site.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub base: Color,
    pub mantle: Color,

    pub surface0: Color,
    pub surface1: Color,

    pub overlay0: Color,
    pub overlay1: Color,

    pub text: Color,
    pub subtext0: Color,

    pub mauve: Color,
    pub red: Color,
    pub peach: Color,
    pub green: Color,
    pub blue: Color,
    pub lavender: Color,
}

impl Theme {
    /// Create a theme from a Catppuccin flavor.
    const fn from_catppuccin(flavor: &catppuccin::Flavor) -> Self {
        let c = &flavor.colors;
        Self {
            base: catppuccin_to_color(&c.base),
            mantle: catppuccin_to_color(&c.mantle),
            surface0: catppuccin_to_color(&c.surface0),
            surface1: catppuccin_to_color(&c.surface1),
            overlay0: catppuccin_to_color(&c.overlay0),
            overlay1: catppuccin_to_color(&c.overlay1),
            text: catppuccin_to_color(&c.text),
            subtext0: catppuccin_to_color(&c.subtext0),
            mauve: catppuccin_to_color(&c.mauve),
            red: catppuccin_to_color(&c.red),
            peach: catppuccin_to_color(&c.peach),
            green: catppuccin_to_color(&c.green),
            blue: catppuccin_to_color(&c.blue),
            lavender: catppuccin_to_color(&c.lavender),
        }
    }

    pub const fn catppuccin_latte() -> Self {
        Self::from_catppuccin(&PALETTE.latte)
    }

    pub const fn catppuccin_frappe() -> Self {
        Self::from_catppuccin(&PALETTE.frappe)
    }

    pub const fn catppuccin_macchiato() -> Self {
        Self::from_catppuccin(&PALETTE.macchiato)
    }

    pub const fn catppuccin_mocha() -> Self {
        Self::from_catppuccin(&PALETTE.mocha)
    }

    pub const fn base(&self) -> Color {
        self.base
    }

    pub const fn mantle(&self) -> Color {
        self.mantle
    }

    pub const fn surface0(&self) -> Color {
        self.surface0
    }

    pub const fn surface1(&self) -> Color {
        self.surface1
    }

    pub const fn overlay0(&self) -> Color {
        self.overlay0
    }

    pub const fn overlay1(&self) -> Color {
        self.overlay1
    }

    pub const fn text(&self) -> Color {
        self.text
    }

    pub const fn subtext0(&self) -> Color {
        self.subtext0
    }

    pub const fn mauve(&self) -> Color {
        self.mauve
    }

    pub const fn peach(&self) -> Color {
        self.peach
    }

    pub const fn lavender(&self) -> Color {
        self.lavender
    }

    // Semantic aliases

    /// Primary brand color, used for buttons and links.
    pub const fn primary(&self) -> Color {
        self.blue
    }

    pub const fn success(&self) -> Color {
        self.green
    }

    pub const fn error(&self) -> Color {
        self.red
    }

    pub const fn selection_bg(&self) -> Color {
        self.surface1
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::catppuccin_latte()
    }
}

/// Returns the built-in themes with their configuration names.
pub fn available_themes() -> Vec<(&'static str, Theme)> {
    vec![
        ("Catppuccin Latte", Theme::catppuccin_latte()),
        ("Catppuccin Frappé", Theme::catppuccin_frappe()),
        ("Catppuccin Macchiato", Theme::catppuccin_macchiato()),
        ("Catppuccin Mocha", Theme::catppuccin_mocha()),
    ]
}

/// Look up a theme by name. Returns the default theme if not found.
pub fn theme_from_name(name: &str) -> Theme {
    available_themes()
        .into_iter()
        .find(|(theme_name, _)| theme_name.eq_ignore_ascii_case(name))
        .map(|(_, theme)| theme)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        let mocha = Theme::catppuccin_mocha();
        assert_eq!(theme_from_name("catppuccin mocha").base, mocha.base);
    }

    #[test]
    fn test_unknown_name_falls_back() {
        let latte = Theme::catppuccin_latte();
        assert_eq!(theme_from_name("solarized").base, latte.base);
    }
}
