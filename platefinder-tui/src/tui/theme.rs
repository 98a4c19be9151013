use ratatui::style::Color;

/// Colours for the handful of things the browser highlights.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub bar_bg: Color,
    pub bar_fg: Color,
    pub focus: Color,  // focused border, title, page label
    pub detail: Color, // phone numbers, selected cuisine, mode tag
    pub rating: Color,
    pub hint: Color,
    pub error: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            bar_bg: Color::Black,
            bar_fg: Color::Gray,
            focus: Color::LightYellow,
            detail: Color::LightCyan,
            rating: Color::Green,
            hint: Color::DarkGray,
            error: Color::LightRed,
        }
    }

    pub fn light() -> Self {
        Self {
            bar_bg: Color::Gray,
            bar_fg: Color::Black,
            focus: Color::Blue,
            detail: Color::Magenta,
            rating: Color::Green,
            hint: Color::DarkGray,
            error: Color::Red,
        }
    }

    /// Terminal defaults everywhere except errors.
    pub fn plain() -> Self {
        Self {
            bar_bg: Color::Reset,
            bar_fg: Color::Reset,
            focus: Color::Reset,
            detail: Color::Reset,
            rating: Color::Reset,
            hint: Color::Reset,
            error: Color::Red,
        }
    }

    /// Unknown names fall back to `dark`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "light" => Self::light(),
            "plain" | "none" => Self::plain(),
            _ => Self::dark(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_case_insensitive_with_dark_fallback() {
        assert_eq!(Theme::from_name("Light"), Theme::light());
        assert_eq!(Theme::from_name("none"), Theme::plain());
        assert_eq!(Theme::from_name("solarized"), Theme::dark());
    }
}
