//! Local persistence: the high score and optional JSON game config

pub mod config_file;
pub mod high_score;

pub use config_file::load_game_config;
pub use high_score::{HighScoreRecorder, HighScoreStore, HIGH_SCORE_KEY};
