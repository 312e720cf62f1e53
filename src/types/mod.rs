// MiniArc shared type definitions
// Each submodule defines types used across the session core.

pub mod content;
pub mod errors;
pub mod history;
pub mod intent;
pub mod navigation;
pub mod session;
pub mod settings;
pub mod tab;
pub mod toolbar;
