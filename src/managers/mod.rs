pub mod browser_session;
pub mod history_manager;
#[cfg(feature = "persistence")]
pub mod session_manager;
pub mod tab_manager;
pub mod toolbar_manager;
