//! MiniArc demo: drives a headless session through a short browsing script
//! and prints the toolbar state and host commands after each step.
//!
//! Run with `RUST_LOG=debug` to see every toolbar transition.

use miniarc::content::HeadlessHost;
use miniarc::managers::browser_session::BrowserSession;
use miniarc::types::content::ContentHandle;
use miniarc::types::errors::ShellError;
use miniarc::types::intent::Intent;
use miniarc::types::settings::ShellSettings;
use miniarc::types::toolbar::{SwipeDirection, ToolbarButton};

fn section(name: &str) {
    println!("───────────────────────────────────────────────────────────────");
    println!("  {}", name);
    println!("───────────────────────────────────────────────────────────────");
}

fn step(session: &mut BrowserSession<HeadlessHost>, label: &str, intent: Intent) {
    let outcome = session.dispatch(intent);
    let snapshot = session.snapshot();
    println!("  {:<32} mode={:?} tabs={}", label, snapshot.mode, snapshot.tabs.len());
    if let Err(e) = outcome {
        println!("    rejected: {}", e);
    }
    for command in session.host_mut().drain_commands() {
        println!("    -> {:?}", command);
    }
}

fn main() -> Result<(), ShellError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    println!("MiniArc v{} demo", env!("CARGO_PKG_VERSION"));
    let mut session = BrowserSession::new(HeadlessHost::new(), &ShellSettings::default())?;

    section("Open and load");
    step(&mut session, "press new tab", Intent::PressButton { button: ToolbarButton::NewTab });
    step(&mut session, "submit example.com", Intent::SubmitText { text: "example.com".into() });
    step(
        &mut session,
        "load finished",
        Intent::LoadFinished {
            session: ContentHandle(1),
            final_url: Some("https://example.com/".into()),
            title: Some("Example Domain".into()),
        },
    );

    section("Search in a second tab");
    step(&mut session, "press new tab", Intent::PressButton { button: ToolbarButton::NewTab });
    step(&mut session, "submit rust borrow checker", Intent::SubmitText { text: "rust borrow checker".into() });

    section("Toolbar gestures");
    step(&mut session, "expand", Intent::PressButton { button: ToolbarButton::Expand });
    step(&mut session, "collapse", Intent::PressButton { button: ToolbarButton::Collapse });
    step(&mut session, "swipe up", Intent::Swipe { direction: SwipeDirection::Up });
    step(&mut session, "swipe down", Intent::Swipe { direction: SwipeDirection::Down });
    step(&mut session, "tap address", Intent::PressButton { button: ToolbarButton::Address });
    step(&mut session, "submit http://", Intent::SubmitText { text: "http://".into() });
    step(&mut session, "tap outside", Intent::TapOutside);

    section("Tab switcher");
    step(&mut session, "show tabs", Intent::ShowTabSwitcher);
    step(&mut session, "swipe first card up", Intent::SwipeCard { index: 0, direction: SwipeDirection::Up });
    step(&mut session, "select remaining tab", Intent::SelectTabAt { index: 0 });

    let snapshot = session.snapshot();
    println!();
    println!("{}", serde_json::to_string_pretty(&snapshot).unwrap_or_default());
    Ok(())
}
