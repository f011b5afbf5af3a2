use ratatui::style::Color;

// Catppuccin Mocha
pub struct CatppuccinTheme;

impl CatppuccinTheme {
    pub const MANTLE: Color = Color::Rgb(24, 24, 37);     // #181825
    pub const CRUST: Color = Color::Rgb(17, 17, 27);      // #11111b
    pub const SURFACE0: Color = Color::Rgb(49, 50, 68);   // #313244

    pub const TEXT: Color = Color::Rgb(205, 214, 244);    // #cdd6f4
    pub const SUBTEXT0: Color = Color::Rgb(166, 173, 200); // #a6adc8

    pub const MAUVE: Color = Color::Rgb(203, 166, 247);   // #cba6f7
    pub const PEACH: Color = Color::Rgb(250, 179, 135);   // #fab387
    pub const YELLOW: Color = Color::Rgb(249, 226, 175);  // #f9e2af
    pub const GREEN: Color = Color::Rgb(166, 227, 161);   // #a6e3a1
    pub const TEAL: Color = Color::Rgb(148, 226, 213);    // #94e2d5
    pub const BLUE: Color = Color::Rgb(137, 180, 250);    // #89b4fa
    pub const LAVENDER: Color = Color::Rgb(180, 190, 254); // #b4befe

    pub fn sent_color() -> Color { Self::PEACH }
    pub fn recv_color() -> Color { Self::TEAL }
}
