//! Seam to the component that actually fetches and renders pages.
//!
//! The shell never touches web content itself. Each tab owns one
//! [`ContentHandle`] handed out by a [`ContentHost`], and every navigation
//! request goes through the host by handle. Load completions come back as
//! [`Intent`](crate::types::intent::Intent) values carrying the same handle.

pub mod headless;

pub use headless::{HeadlessHost, HostCommand};

use crate::types::content::ContentHandle;

/// Content-rendering collaborator addressed by session handle.
pub trait ContentHost {
    /// Starts a fresh session. Handles are never reused.
    fn create_session(&mut self) -> ContentHandle;
    /// Tears a session down. Called exactly once per handle.
    fn release_session(&mut self, handle: ContentHandle);
    /// Puts the session on the display surface.
    fn attach(&mut self, handle: ContentHandle);
    /// Takes the session off the display surface without stopping it.
    fn detach(&mut self, handle: ContentHandle);
    fn load(&mut self, handle: ContentHandle, url: &str);
    fn reload(&mut self, handle: ContentHandle);
    fn go_back(&mut self, handle: ContentHandle);
    fn go_forward(&mut self, handle: ContentHandle);
    fn can_go_back(&self, handle: ContentHandle) -> bool;
    fn can_go_forward(&self, handle: ContentHandle) -> bool;
}
