//! Property-based tests for the toolbar state machine.
//!
//! Random event walks never reach a mode outside the five known ones,
//! rejected events never change the mode, and from any reachable mode the
//! machine can get back to Browsing.

use miniarc::managers::toolbar_manager::{ToolbarStateMachine, ToolbarStateMachineTrait};
use miniarc::types::toolbar::{ToolbarEvent, ToolbarMode};
use proptest::prelude::*;

fn arb_event() -> impl Strategy<Value = ToolbarEvent> {
    prop_oneof![
        Just(ToolbarEvent::NewTabPressed),
        Just(ToolbarEvent::AddressTapped),
        Just(ToolbarEvent::Expand),
        Just(ToolbarEvent::Collapse),
        Just(ToolbarEvent::SwipedAway),
        Just(ToolbarEvent::SwipedBack),
        Just(ToolbarEvent::Submitted),
        Just(ToolbarEvent::HistorySelected),
        Just(ToolbarEvent::DismissedOutside),
        Just(ToolbarEvent::TabSwitcherShown),
        Just(ToolbarEvent::AllTabsClosed),
        Just(ToolbarEvent::BrowsingRequested),
    ]
}

/// The one event that leads from `mode` back toward Browsing.
fn way_back(mode: ToolbarMode) -> ToolbarEvent {
    match mode {
        ToolbarMode::Default => ToolbarEvent::BrowsingRequested,
        ToolbarMode::Browsing => ToolbarEvent::BrowsingRequested,
        ToolbarMode::Searching => ToolbarEvent::Submitted,
        ToolbarMode::Info => ToolbarEvent::Collapse,
        ToolbarMode::Hidden => ToolbarEvent::SwipedBack,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn random_walks_stay_in_known_modes(events in prop::collection::vec(arb_event(), 0..80)) {
        let mut machine = ToolbarStateMachine::new();
        for event in events {
            let before = machine.mode();
            match machine.handle(event) {
                Ok(next) => prop_assert_eq!(machine.mode(), next),
                Err(_) => prop_assert_eq!(machine.mode(), before),
            }
            prop_assert!(ToolbarMode::ALL.contains(&machine.mode()));
            prop_assert_eq!(
                machine.search_origin().is_some(),
                machine.mode() == ToolbarMode::Searching
            );
        }
    }

    #[test]
    fn every_reachable_mode_returns_to_browsing(events in prop::collection::vec(arb_event(), 0..40)) {
        let mut machine = ToolbarStateMachine::new();
        for event in events {
            let _ = machine.handle(event);
        }
        let back = way_back(machine.mode());
        prop_assert_eq!(machine.handle(back), Ok(ToolbarMode::Browsing));
    }

    #[test]
    fn visible_controls_match_mode(events in prop::collection::vec(arb_event(), 0..40)) {
        let mut machine = ToolbarStateMachine::new();
        for event in events {
            let _ = machine.handle(event);
            for button in machine.mode().controls() {
                prop_assert!(machine.check_control(*button).is_ok());
            }
        }
    }
}
