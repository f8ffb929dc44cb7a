pub mod atmosphere;
pub mod display;
pub mod setup;

pub use atmosphere::sync_atmosphere_settings;
pub use display::{sync_shadow_settings, sync_vsync_settings};
pub use setup::setup;
