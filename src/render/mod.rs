pub mod renderer;
pub mod theme;

pub use renderer::{Overlay, Renderer};
pub use theme::Theme;
