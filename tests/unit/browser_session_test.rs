//! Scenario tests for the browser session: intents in, snapshot and host
//! commands out.

use miniarc::content::{ContentHost, HeadlessHost, HostCommand};
use miniarc::managers::browser_session::BrowserSession;
use miniarc::managers::history_manager::HistoryManagerTrait;
use miniarc::managers::tab_manager::TabRegistryTrait;
use miniarc::types::content::{ContentHandle, ResponseDecision};
use miniarc::types::errors::{HistoryError, NavigationError, ShellError, TabError, ToolbarError};
use miniarc::types::history::VisitRecord;
use miniarc::types::intent::Intent;
use miniarc::types::settings::{ClosePolicy, ShellSettings};
use miniarc::types::tab::TabId;
use miniarc::types::toolbar::{SwipeDirection, ToolbarButton, ToolbarEvent, ToolbarMode};

fn session() -> BrowserSession<HeadlessHost> {
    BrowserSession::new(HeadlessHost::new(), &ShellSettings::default()).unwrap()
}

fn press(session: &mut BrowserSession<HeadlessHost>, button: ToolbarButton) {
    session.dispatch(Intent::PressButton { button }).unwrap();
}

fn submit(session: &mut BrowserSession<HeadlessHost>, text: &str) {
    session
        .dispatch(Intent::SubmitText { text: text.to_string() })
        .unwrap();
}

/// Opens a tab on `text` through the new-tab button and returns its handle.
fn open_tab(session: &mut BrowserSession<HeadlessHost>, text: &str) -> ContentHandle {
    press(session, ToolbarButton::NewTab);
    submit(session, text);
    session.tabs().get_active_tab().unwrap().content
}

fn finish(session: &mut BrowserSession<HeadlessHost>, handle: ContentHandle, url: &str, title: &str) {
    session
        .dispatch(Intent::LoadFinished {
            session: handle,
            final_url: Some(url.to_string()),
            title: Some(title.to_string()),
        })
        .unwrap();
}

#[test]
fn test_initial_snapshot() {
    let snapshot = session().snapshot();
    assert_eq!(snapshot.mode, ToolbarMode::Default);
    assert_eq!(snapshot.controls, vec![ToolbarButton::NewTab, ToolbarButton::Tabs]);
    assert!(snapshot.tabs.is_empty());
    assert_eq!(snapshot.active_tab, None);
    assert!(!snapshot.can_go_back);
}

#[test]
fn test_new_tab_submit_creates_tab_and_browses() {
    let mut session = session();
    press(&mut session, ToolbarButton::NewTab);
    assert_eq!(session.mode(), ToolbarMode::Searching);

    submit(&mut session, "example.com");
    let snapshot = session.snapshot();
    assert_eq!(snapshot.mode, ToolbarMode::Browsing);
    assert_eq!(snapshot.tabs.len(), 1);
    assert_eq!(snapshot.active_tab, Some(TabId(1)));
    assert!(snapshot.tabs[0].loading);

    let handle = session.tabs().get_active_tab().unwrap().content;
    assert_eq!(session.host().current_url(handle), Some("https://example.com"));
}

#[test]
fn test_new_tab_while_browsing_adds_second_tab() {
    let mut session = session();
    open_tab(&mut session, "a.com");
    open_tab(&mut session, "b.com");
    assert_eq!(session.tabs().tab_count(), 2);
    assert_eq!(session.snapshot().active_tab, Some(TabId(2)));
}

#[test]
fn test_address_submit_navigates_active_tab() {
    let mut session = session();
    let handle = open_tab(&mut session, "a.com");
    press(&mut session, ToolbarButton::Address);
    submit(&mut session, "hello world");

    assert_eq!(session.tabs().tab_count(), 1);
    assert_eq!(
        session.host().current_url(handle),
        Some("https://www.google.com/search?q=hello%20world")
    );
    assert_eq!(session.mode(), ToolbarMode::Browsing);
}

#[test]
fn test_always_open_new_tab_setting() {
    let mut settings = ShellSettings::default();
    settings.tabs.always_open_new_tab = true;
    let mut session = BrowserSession::new(HeadlessHost::new(), &settings).unwrap();
    open_tab(&mut session, "a.com");
    press(&mut session, ToolbarButton::Address);
    submit(&mut session, "b.com");
    assert_eq!(session.tabs().tab_count(), 2);
}

#[test]
fn test_invalid_url_sets_inline_error_without_mutation() {
    let mut session = session();
    press(&mut session, ToolbarButton::NewTab);
    session.host_mut().drain_commands();

    let result = session.dispatch(Intent::SubmitText { text: "http://".into() });
    assert!(matches!(
        result,
        Err(ShellError::Navigation(NavigationError::InvalidInput(_)))
    ));

    let snapshot = session.snapshot();
    assert_eq!(snapshot.mode, ToolbarMode::Searching);
    assert!(snapshot.tabs.is_empty());
    assert_eq!(snapshot.input_error.as_deref(), Some("Invalid URL: http://"));
    assert!(session.host().pending_commands().is_empty());

    submit(&mut session, "example.com");
    assert_eq!(session.snapshot().input_error, None);
}

#[test]
fn test_submit_outside_search_is_rejected() {
    let mut session = session();
    let result = session.dispatch(Intent::SubmitText { text: "example.com".into() });
    assert!(matches!(
        result,
        Err(ShellError::Toolbar(ToolbarError::IllegalTransition {
            from: ToolbarMode::Default,
            event: ToolbarEvent::Submitted,
        }))
    ));
    assert_eq!(session.tabs().tab_count(), 0);
}

#[test]
fn test_tap_outside_dismisses_search() {
    let mut session = session();
    open_tab(&mut session, "a.com");
    press(&mut session, ToolbarButton::Address);
    session.dispatch(Intent::TapOutside).unwrap();
    assert_eq!(session.mode(), ToolbarMode::Browsing);

    // Ignored outside of search.
    session.dispatch(Intent::TapOutside).unwrap();
    assert_eq!(session.mode(), ToolbarMode::Browsing);
}

#[test]
fn test_dismiss_without_tabs_returns_to_default() {
    let mut session = session();
    press(&mut session, ToolbarButton::NewTab);
    session.dispatch(Intent::TapOutside).unwrap();
    assert_eq!(session.mode(), ToolbarMode::Default);
}

#[test]
fn test_history_shown_only_while_searching() {
    let mut session = session();
    let handle = open_tab(&mut session, "a.com");
    finish(&mut session, handle, "https://a.com/", "A");
    assert!(session.snapshot().history.is_empty());

    press(&mut session, ToolbarButton::Address);
    let history = session.snapshot().history;
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].title, "A");
}

#[test]
fn test_select_history_navigates_to_stored_url() {
    let mut session = session();
    let a = open_tab(&mut session, "a.com");
    finish(&mut session, a, "https://a.com/", "A");
    let b = open_tab(&mut session, "b.com");
    finish(&mut session, b, "https://b.com/", "B");

    press(&mut session, ToolbarButton::Address);
    session.dispatch(Intent::SelectHistory { index: 1 }).unwrap();
    assert_eq!(session.host().current_url(b), Some("https://a.com/"));
    assert_eq!(session.mode(), ToolbarMode::Browsing);
}

#[test]
fn test_select_history_outside_search_names_the_gesture() {
    let mut session = session();
    let a = open_tab(&mut session, "a.com");
    finish(&mut session, a, "https://a.com/", "A");

    let result = session.dispatch(Intent::SelectHistory { index: 0 });
    assert!(matches!(
        result,
        Err(ShellError::Toolbar(ToolbarError::IllegalTransition {
            from: ToolbarMode::Browsing,
            event: ToolbarEvent::HistorySelected,
        }))
    ));
    assert_eq!(session.mode(), ToolbarMode::Browsing);
}

#[test]
fn test_select_history_out_of_range() {
    let mut session = session();
    press(&mut session, ToolbarButton::NewTab);
    let result = session.dispatch(Intent::SelectHistory { index: 0 });
    assert!(matches!(
        result,
        Err(ShellError::History(HistoryError::IndexOutOfRange(0)))
    ));
}

#[test]
fn test_background_load_does_not_move_active() {
    let mut session = session();
    let a = open_tab(&mut session, "a.com");
    let _b = open_tab(&mut session, "b.com");

    finish(&mut session, a, "https://a.com/", "A");
    let snapshot = session.snapshot();
    assert_eq!(snapshot.active_tab, Some(TabId(2)));
    assert_eq!(snapshot.tabs[0].title, "A");
    assert!(!snapshot.tabs[0].loading);
    assert!(snapshot.tabs[1].loading);
    assert_eq!(session.history().len(), 1);
    assert_eq!(session.history().latest().unwrap().tab_id, TabId(1));
}

#[test]
fn test_unknown_session_load_is_rejected() {
    let mut session = session();
    let result = session.dispatch(Intent::LoadFinished {
        session: ContentHandle(42),
        final_url: Some("https://a.com/".into()),
        title: None,
    });
    assert!(matches!(
        result,
        Err(ShellError::Tab(TabError::UnknownSession(ContentHandle(42))))
    ));
    assert!(session.history().is_empty());
}

#[test]
fn test_failed_load_records_no_visit() {
    let mut session = session();
    let a = open_tab(&mut session, "a.com");
    session
        .dispatch(Intent::LoadFailed { session: a, reason: "timeout".into() })
        .unwrap();
    assert!(session.history().is_empty());
    assert!(!session.snapshot().tabs[0].loading);
}

#[test]
fn test_info_buttons_drive_host() {
    let mut session = session();
    let a = open_tab(&mut session, "a.com");
    press(&mut session, ToolbarButton::Address);
    submit(&mut session, "b.com");
    press(&mut session, ToolbarButton::Expand);
    assert_eq!(session.mode(), ToolbarMode::Info);
    assert!(session.snapshot().can_go_back);

    press(&mut session, ToolbarButton::Back);
    assert_eq!(session.host().current_url(a), Some("https://a.com"));
    press(&mut session, ToolbarButton::Forward);
    assert_eq!(session.host().current_url(a), Some("https://b.com"));

    session.host_mut().drain_commands();
    press(&mut session, ToolbarButton::Reload);
    assert_eq!(session.host_mut().drain_commands(), vec![HostCommand::Reload { session: a }]);

    press(&mut session, ToolbarButton::Collapse);
    assert_eq!(session.mode(), ToolbarMode::Browsing);
}

#[test]
fn test_hidden_button_is_rejected() {
    let mut session = session();
    let result = session.dispatch(Intent::PressButton { button: ToolbarButton::Back });
    assert!(matches!(
        result,
        Err(ShellError::Toolbar(ToolbarError::ControlUnavailable { .. }))
    ));
}

#[test]
fn test_back_without_history_is_noop() {
    let mut session = session();
    open_tab(&mut session, "a.com");
    press(&mut session, ToolbarButton::Expand);
    session.host_mut().drain_commands();
    press(&mut session, ToolbarButton::Back);
    assert!(session.host().pending_commands().is_empty());
}

#[test]
fn test_swipes_hide_and_reveal_toolbar() {
    let mut session = session();
    open_tab(&mut session, "a.com");
    session.dispatch(Intent::Swipe { direction: SwipeDirection::Up }).unwrap();
    assert_eq!(session.mode(), ToolbarMode::Hidden);
    session.dispatch(Intent::Swipe { direction: SwipeDirection::Down }).unwrap();
    assert_eq!(session.mode(), ToolbarMode::Browsing);
}

#[test]
fn test_horizontal_swipes_navigate_history() {
    let mut session = session();
    let a = open_tab(&mut session, "a.com");
    press(&mut session, ToolbarButton::Address);
    submit(&mut session, "b.com");

    session.dispatch(Intent::Swipe { direction: SwipeDirection::Right }).unwrap();
    assert_eq!(session.host().current_url(a), Some("https://a.com"));
    session.dispatch(Intent::Swipe { direction: SwipeDirection::Left }).unwrap();
    assert_eq!(session.host().current_url(a), Some("https://b.com"));
}

#[test]
fn test_tab_switcher_select_and_close() {
    let mut session = session();
    open_tab(&mut session, "a.com");
    open_tab(&mut session, "b.com");
    open_tab(&mut session, "c.com");

    press(&mut session, ToolbarButton::Tabs);
    let snapshot = session.snapshot();
    assert!(snapshot.tab_switcher_open);
    assert_eq!(snapshot.mode, ToolbarMode::Default);

    session
        .dispatch(Intent::SwipeCard { index: 0, direction: SwipeDirection::Up })
        .unwrap();
    assert_eq!(session.tabs().tab_order(), vec![TabId(2), TabId(3)]);

    session.dispatch(Intent::SelectTabAt { index: 0 }).unwrap();
    let snapshot = session.snapshot();
    assert!(!snapshot.tab_switcher_open);
    assert_eq!(snapshot.active_tab, Some(TabId(2)));
    assert_eq!(snapshot.mode, ToolbarMode::Browsing);
}

#[test]
fn test_sideways_card_swipe_is_ignored() {
    let mut session = session();
    open_tab(&mut session, "a.com");
    session.dispatch(Intent::ShowTabSwitcher).unwrap();
    session
        .dispatch(Intent::SwipeCard { index: 0, direction: SwipeDirection::Left })
        .unwrap();
    assert_eq!(session.tabs().tab_count(), 1);
}

#[test]
fn test_closing_last_tab_resets_toolbar() {
    let mut session = session();
    let a = open_tab(&mut session, "a.com");
    session.dispatch(Intent::ShowTabSwitcher).unwrap();
    session.dispatch(Intent::CloseTabAt { index: 0 }).unwrap();

    let snapshot = session.snapshot();
    assert!(snapshot.tabs.is_empty());
    assert_eq!(snapshot.active_tab, None);
    assert_eq!(snapshot.mode, ToolbarMode::Default);
    assert!(!snapshot.tab_switcher_open);
    assert_eq!(session.host().released_sessions(), vec![a]);
}

#[test]
fn test_close_active_uses_previous_tab() {
    let mut session = session();
    open_tab(&mut session, "a.com");
    open_tab(&mut session, "b.com");
    open_tab(&mut session, "c.com");
    session.dispatch(Intent::SelectTab { id: TabId(2) }).unwrap();
    session.dispatch(Intent::CloseTab { id: TabId(2) }).unwrap();
    assert_eq!(session.snapshot().active_tab, Some(TabId(1)));
}

#[test]
fn test_close_unknown_tab() {
    let mut session = session();
    let result = session.dispatch(Intent::CloseTab { id: TabId(5) });
    assert!(matches!(result, Err(ShellError::Tab(TabError::NotFound(TabId(5))))));
    let result = session.dispatch(Intent::SelectTabAt { index: 0 });
    assert!(matches!(result, Err(ShellError::Tab(TabError::InvalidIndex(0)))));
}

#[test]
fn test_hide_switcher_returns_to_browsing() {
    let mut session = session();
    open_tab(&mut session, "a.com");
    session.dispatch(Intent::ShowTabSwitcher).unwrap();
    session.dispatch(Intent::HideTabSwitcher).unwrap();
    assert_eq!(session.mode(), ToolbarMode::Browsing);
    assert!(!session.tab_switcher_open());
}

#[test]
fn test_response_policy_allows_everything() {
    let mut session = session();
    let a = open_tab(&mut session, "a.com");
    assert_eq!(session.on_response_received(a, 200), ResponseDecision::Allow);
    assert_eq!(session.on_response_received(a, 404), ResponseDecision::Allow);
    assert_eq!(
        session.on_response_received(ContentHandle(77), 404),
        ResponseDecision::Allow
    );
}

#[test]
fn test_apply_settings_changes_close_policy() {
    let mut session = session();
    let mut settings = ShellSettings::default();
    settings.tabs.close_policy = ClosePolicy::Next;
    session.apply_settings(&settings).unwrap();

    open_tab(&mut session, "a.com");
    open_tab(&mut session, "b.com");
    open_tab(&mut session, "c.com");
    session.dispatch(Intent::SelectTab { id: TabId(2) }).unwrap();
    session.dispatch(Intent::CloseTab { id: TabId(2) }).unwrap();
    assert_eq!(session.snapshot().active_tab, Some(TabId(3)));
}

#[test]
fn test_export_and_restore_session() {
    let mut session = session();
    let a = open_tab(&mut session, "a.com");
    finish(&mut session, a, "https://a.com/", "A");
    open_tab(&mut session, "b.com");
    session.dispatch(Intent::SelectTab { id: TabId(1) }).unwrap();

    let data = session.export_session(1_700_000_000);
    assert_eq!(data.tabs.len(), 2);
    assert_eq!(data.tabs[0].url.as_deref(), Some("https://a.com/"));
    assert_eq!(data.tabs[1].url.as_deref(), Some("https://b.com"));
    assert_eq!(data.tabs[1].title, "Untitled");
    assert_eq!(data.active_index, Some(0));

    let mut restored = BrowserSession::new(HeadlessHost::new(), &ShellSettings::default()).unwrap();
    restored.restore_session(&data).unwrap();
    let snapshot = restored.snapshot();
    assert_eq!(snapshot.tabs.len(), 2);
    assert_eq!(snapshot.mode, ToolbarMode::Browsing);
    assert_eq!(snapshot.active_tab, Some(snapshot.tabs[0].id));

    assert_eq!(snapshot.tabs[0].title, "A");

    let first = restored.tabs().tabs()[0].content;
    assert_eq!(restored.host().current_url(first), Some("https://a.com/"));
    assert!(!restored.host().can_go_back(first));
}

#[test]
fn test_restored_tabs_export_before_reloading() {
    let mut session = session();
    let a = open_tab(&mut session, "a.com");
    finish(&mut session, a, "https://a.com/", "A");
    let data = session.export_session(1);

    let mut restored = BrowserSession::new(HeadlessHost::new(), &ShellSettings::default()).unwrap();
    restored.restore_session(&data).unwrap();
    restored.dispatch(Intent::ShowTabSwitcher).unwrap();

    let again = restored.export_session(2);
    assert_eq!(again.tabs, data.tabs);
}

#[test]
fn test_pending_navigation_is_exported() {
    let mut session = session();
    let a = open_tab(&mut session, "a.com");
    finish(&mut session, a, "https://a.com/", "A");
    press(&mut session, ToolbarButton::Address);
    submit(&mut session, "b.com");
    assert_eq!(session.export_session(1).tabs[0].url.as_deref(), Some("https://b.com"));

    finish(&mut session, a, "https://b.com/", "B");
    let tab = &session.tabs().tabs()[0];
    assert_eq!(tab.pending_url, None);
    assert_eq!(session.export_session(2).tabs[0].url.as_deref(), Some("https://b.com/"));
}

#[test]
fn test_failed_load_keeps_requested_url() {
    let mut session = session();
    let a = open_tab(&mut session, "a.com");
    session
        .dispatch(Intent::LoadFailed { session: a, reason: "offline".into() })
        .unwrap();
    assert_eq!(session.export_session(1).tabs[0].url.as_deref(), Some("https://a.com"));
}

#[test]
fn test_restored_history_keeps_tab_ids_unique() {
    let mut session = session();
    session.restore_history(vec![VisitRecord {
        id: "old".into(),
        tab_id: TabId(7),
        url: "https://old.com/".into(),
        url_string: "https://old.com/".into(),
        title: "Old".into(),
        visited_at: 1,
    }]);
    open_tab(&mut session, "a.com");
    assert_eq!(session.snapshot().active_tab, Some(TabId(8)));
    assert_eq!(session.history().len(), 1);
}
