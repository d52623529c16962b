use ratatui::style::Color;

pub struct Theme {
    pub bg: Color,
    pub fg: Color,
    pub primary: Color,   // Blue
    pub secondary: Color, // Orange
    pub comment: Color,   // Grey
    pub border_focused: Color,
    pub border_normal: Color,
    pub highlight_bg: Color,
}

pub const DEFAULT_THEME: Theme = Theme {
    bg: Color::Rgb(30, 30, 46),
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250),
    secondary: Color::Rgb(250, 179, 135),
    comment: Color::Rgb(108, 112, 134),
    border_focused: Color::Rgb(249, 226, 175), // Yellow border for the foreground screen
    border_normal: Color::Rgb(108, 112, 134),
    highlight_bg: Color::Rgb(50, 50, 70),
};
