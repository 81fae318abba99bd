use serde::{Deserialize, Serialize};

/// Background theme requested from the display surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    White,
    Green,
    Red,
}

/// Concrete colours for a theme, as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: &'static str,
    /// Button bar beside the text fields.
    pub bar: &'static str,
    pub text: &'static str,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::White, Theme::Green, Theme::Red];

    pub fn palette(self) -> Palette {
        match self {
            Theme::White => Palette {
                background: "#ffffff",
                bar: "#000000",
                text: "#000000",
            },
            Theme::Green => Palette {
                background: "#00ff00",
                bar: "#00aa55",
                text: "#000000",
            },
            Theme::Red => Palette {
                background: "#ff0000",
                bar: "#aa0000",
                text: "#000000",
            },
        }
    }

    /// CSS class name used by the face.
    pub fn css_class(self) -> &'static str {
        match self {
            Theme::White => "theme-white",
            Theme::Green => "theme-green",
            Theme::Red => "theme-red",
        }
    }
}
