use ratatui::style::Color;

pub const TITLE: Color = Color::Rgb(0xe5, 0xe5, 0xe5);
pub const SWIPEABLE_BORDER: Color = Color::Rgb(0x62, 0x9d, 0x50);
pub const LOCKED_BORDER: Color = Color::Rgb(0xef, 0x44, 0x44);
pub const NEUTRAL_BORDER: Color = Color::Rgb(0x6b, 0x72, 0x80);
pub const PART_OF_SPEECH: Color = Color::Rgb(0xda, 0x77, 0x56);
pub const MUTED: Color = Color::Rgb(0x9c, 0xa3, 0xaf);
pub const ERROR: Color = Color::Rgb(0xef, 0x44, 0x44);
