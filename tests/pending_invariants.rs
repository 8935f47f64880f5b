//! Property tests for the confirmation state machine and context window.

mod common;

use canvas_orchestrator::domain::action::ActionKind;
use canvas_orchestrator::domain::conversation::{ConversationStore, Message};
use proptest::prelude::*;

use common::Mocks;

#[derive(Debug, Clone, Copy)]
enum Step {
    Stage(ActionKind),
    Unscoped,
    Affirm,
    Cancel,
    Chat,
}

impl Step {
    fn message(&self) -> &'static str {
        match self {
            Step::Stage(ActionKind::Quiz) => "create a quiz [Intro CS] about recursion",
            Step::Stage(ActionKind::Announcement) => "post an announcement [Intro CS] about the exam",
            Step::Stage(ActionKind::Assignment) => "create an assignment [Intro CS] on sorting",
            Step::Stage(ActionKind::Page) => "create a page [Intro CS] about office hours",
            Step::Unscoped => "post something",
            Step::Affirm => "Yes",
            Step::Cancel => "don't post",
            Step::Chat => "what is a binary tree?",
        }
    }
}

fn arb_step() -> impl Strategy<Value = Step> {
    prop_oneof![
        prop::sample::select(ActionKind::ALL.to_vec()).prop_map(Step::Stage),
        Just(Step::Unscoped),
        Just(Step::Affirm),
        Just(Step::Cancel),
        Just(Step::Chat),
    ]
}

/// Reference model: the pending kind and the number of executions.
#[derive(Debug, Default)]
struct Model {
    pending: Option<ActionKind>,
    executed: usize,
}

impl Model {
    fn apply(&mut self, step: Step) {
        match step {
            Step::Stage(kind) if self.pending.is_none() => self.pending = Some(kind),
            Step::Affirm => {
                if self.pending.take().is_some() {
                    self.executed += 1;
                }
            }
            Step::Cancel => self.pending = None,
            _ => {}
        }
    }
}

proptest! {
    #[test]
    fn orchestrator_tracks_the_reference_model(steps in prop::collection::vec(arb_step(), 1..25)) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let mocks = Mocks::with_courses();
            let mut orchestrator = mocks.orchestrator();
            let mut model = Model::default();

            for step in steps {
                orchestrator.process_message(step.message(), None).await;
                model.apply(step);

                let actual = orchestrator.pending_action().map(|a| a.kind());
                prop_assert_eq!(actual, model.pending);
                prop_assert_eq!(
                    orchestrator.get_state().pending_action.map(|a| a.kind()),
                    model.pending
                );
                prop_assert_eq!(mocks.executor.call_count(), model.executed);
            }
            Ok(())
        })?;
    }

    #[test]
    fn every_message_is_logged_with_a_reply(steps in prop::collection::vec(arb_step(), 1..15)) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let mocks = Mocks::with_courses();
            let mut orchestrator = mocks.orchestrator();

            for step in &steps {
                orchestrator.process_message(step.message(), None).await;
            }

            prop_assert_eq!(orchestrator.get_state().state.messages.len(), steps.len() * 2);
            Ok(())
        })?;
    }

    #[test]
    fn context_window_is_bounded(count in 0usize..40, window in 0usize..12) {
        let mut store = ConversationStore::new();
        for i in 0..count {
            store.append(Message::user(format!("message {i}")));
        }

        let context = store.recent_context(window);

        prop_assert_eq!(context.len(), count.min(window));
        prop_assert_eq!(context.lines().count(), count.min(window));
        if count == 0 || window == 0 {
            prop_assert_eq!(context.to_string(), "");
        } else {
            let expected_last = format!("User: message {}", count - 1);
            prop_assert!(context.to_string().ends_with(&expected_last));
        }
    }
}
