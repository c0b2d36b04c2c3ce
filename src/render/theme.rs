use clap::ValueEnum;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Named color schemes for the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Classic,
    Ocean,
    Sunset,
    Forest,
}

/// Colors a theme resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub snake_head: Color,
    pub snake_body: Color,
    pub food: Color,
    pub border: Color,
    pub score: Color,
}

impl Theme {
    pub fn palette(&self) -> Palette {
        let (snake_head, snake_body, food) = match self {
            Theme::Classic => (
                Color::Rgb(0x00, 0xff, 0x41),
                Color::Rgb(0x00, 0xcc, 0x33),
                Color::Rgb(0xff, 0xaa, 0x00),
            ),
            Theme::Ocean => (
                Color::Rgb(0x00, 0xd4, 0xff),
                Color::Rgb(0x00, 0xa8, 0xcc),
                Color::Rgb(0xff, 0x6b, 0x35),
            ),
            Theme::Sunset => (
                Color::Rgb(0xff, 0x6b, 0x35),
                Color::Rgb(0xcc, 0x55, 0x2a),
                Color::Rgb(0xf7, 0x93, 0x1e),
            ),
            Theme::Forest => (
                Color::Rgb(0x32, 0xcd, 0x32),
                Color::Rgb(0x28, 0xa4, 0x28),
                Color::Rgb(0xff, 0x45, 0x00),
            ),
        };

        Palette {
            snake_head,
            snake_body,
            food,
            border: snake_head,
            score: Color::Rgb(0xff, 0xaa, 0x00),
        }
    }
}
