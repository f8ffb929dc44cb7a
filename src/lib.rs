pub mod debug;
pub mod hotbar;
pub mod interaction;
pub mod item;
pub mod player;
pub mod ron;
pub use crate::ron as ron_loader;
pub mod settings;
pub mod ui;
pub mod world;
