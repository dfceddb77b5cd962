//! Tests of the suggestion feed: filtering, accepting and dismissing suggestions

use taskmate::config::Settings;
use taskmate::controller::AddOutcome;
use taskmate::mock_api::MockApi;
use taskmate::mock_behaviour::MockBehaviour;
use taskmate::storage::{ExclusionSet, Storage};
use taskmate::view::{FeedState, NotificationKind};
use taskmate::{Controller, Suggestion};


fn controller_with_storage(api: MockApi, storage: Storage) -> Controller<MockApi> {
    let _ = env_logger::builder().is_test(true).try_init();
    Controller::new(api, storage, Settings::default().without_delays())
}

fn controller(api: MockApi) -> Controller<MockApi> {
    controller_with_storage(api, Storage::in_memory())
}

fn from_email(text: &str, email_id: &str) -> Suggestion {
    Suggestion {
        email_id: Some(email_id.to_string()),
        ..Suggestion::new(text)
    }
}

fn card_texts(controller: &Controller<MockApi>) -> Vec<String> {
    controller.suggestions().cards().iter()
        .map(|card| card.text().to_string())
        .collect()
}


#[tokio::test]
async fn test_existing_tasks_are_not_suggested() {
    let mut controller = controller(MockApi::new());
    controller.add_task("pay rent", None, None, None);

    let filtered = controller.filter_suggestions(vec![Suggestion::new("Pay rent")]);
    assert!(filtered.is_empty());

    let filtered = controller.filter_suggestions(vec![Suggestion::new("  PAY RENT"), Suggestion::new("Pay taxes")]);
    assert_eq!(filtered, vec![Suggestion::new("Pay taxes")]);
}

#[tokio::test]
async fn test_refresh_filters_suggestions() {
    let api = MockApi::new().with_suggestions(vec![
        Suggestion::new("Pay rent"),
        from_email("Book flights", "m1"),
        from_email("Reply to landlord", "m2"),
        from_email("Renew insurance", "m3"),
        Suggestion::new(""),
        Suggestion::new("book flights"),
    ]);
    let mut storage = Storage::in_memory();
    storage.insert(ExclusionSet::ProcessedEmails, "m2");
    storage.insert(ExclusionSet::DeletedEventIds, "m3");

    let mut controller = controller_with_storage(api, storage);
    controller.add_task("pay rent", None, None, None);

    assert!(controller.refresh_suggestions().await);
    assert_eq!(card_texts(&controller), vec!["Book flights"]);

    let card = &controller.suggestions().cards()[0];
    assert_eq!(card.email_link(), Some("https://mail.google.com/mail/u/0/#inbox/m1"));
    assert_eq!(card.email_id(), Some("m1"));
}

#[tokio::test]
async fn test_placeholders() {
    let mut controller = controller(MockApi::new());
    assert_eq!(controller.suggestions().state(), &FeedState::Idle);

    let ticket = controller.begin_suggestions_fetch();
    assert_eq!(controller.suggestions().state().placeholder().as_deref(), Some("Loading suggestions..."));
    controller.apply_suggestions(ticket, Ok(Vec::new()));
    assert_eq!(controller.suggestions().state().placeholder().as_deref(), Some("No suggestions found based on your interests"));

    controller.add_task("Pay rent", None, None, None);
    controller.api().set_suggestions(vec![Suggestion::new("Pay rent")]);
    controller.refresh_suggestions().await;
    assert_eq!(controller.suggestions().state(), &FeedState::NoNewSuggestions);
    assert_eq!(controller.suggestions().state().placeholder().as_deref(), Some("No new suggestions found"));
}

#[tokio::test]
async fn test_fetch_failure() {
    let api = MockApi::new().with_behaviour(MockBehaviour{
        suggestions_behaviour: (0, 1),
        ..MockBehaviour::default()
    });
    let mut controller = controller(api);

    controller.refresh_suggestions().await;
    let placeholder = controller.suggestions().state().placeholder().unwrap();
    assert!(placeholder.starts_with("Failed to load suggestions: "));
    assert!(controller.suggestions().cards().is_empty());
}

#[tokio::test]
async fn test_obsolete_suggestions_are_ignored() {
    let mut controller = controller(MockApi::new());

    let old = controller.begin_suggestions_fetch();
    let new = controller.begin_suggestions_fetch();

    assert!(controller.apply_suggestions(old, Ok(vec![Suggestion::new("Old suggestion")])) == false);
    assert_eq!(controller.suggestions().state(), &FeedState::Loading);

    assert!(controller.apply_suggestions(new, Ok(vec![Suggestion::new("New suggestion")])));
    assert_eq!(card_texts(&controller), vec!["New suggestion"]);
}

#[tokio::test]
async fn test_accept_suggestion() {
    let suggestion = Suggestion {
        text: "Book flights".to_string(),
        deadline: Some("Friday 5pm".to_string()),
        location: Some("Travel agency".to_string()),
        email_id: Some("m1".to_string()),
        is_time_sensitive: true,
        event_date: Some("2024-06-01T17:00:00".to_string()),
    };
    let mut controller = controller(MockApi::new().with_suggestions(vec![suggestion]));
    controller.refresh_suggestions().await;
    let card_id = controller.suggestions().cards()[0].id();

    let task_id = match controller.accept_suggestion(card_id).await {
        AddOutcome::Synced(id) => id,
        other => panic!("Unexpected outcome {:?}", other),
    };

    let request = controller.api().add_task_requests().remove(0);
    assert_eq!(request.task_text, "Book flights");
    assert_eq!(request.event_date, "2024-06-01T17:00:00");
    assert_eq!(request.display_date, "Friday 5pm");
    assert_eq!(request.raw_deadline.as_deref(), Some("Friday 5pm"));
    let debug_info = request.debug_info.unwrap();
    assert!(debug_info.has_event_date && debug_info.has_deadline);
    assert_eq!(debug_info.attributes, vec!["eventDate", "deadline"]);

    let task = controller.tasks().get(task_id).unwrap().task();
    assert_eq!(task.text(), "Book flights");
    assert_eq!(task.deadline(), Some("Friday 5pm"));
    let event_id = task.event_id().unwrap().to_string();

    assert!(controller.suggestions().cards().is_empty());
    assert_eq!(controller.storage().get(ExclusionSet::ProcessedEmails), &["m1".to_string()]);
    assert_eq!(controller.storage().get(ExclusionSet::CurrentEventIds), &[event_id]);
    let notification = controller.notifications().last().unwrap();
    assert_eq!(notification.message, "Task added to calendar!");
    assert_eq!(notification.kind, NotificationKind::Success);

    // The email has been processed, it is not suggested again
    controller.refresh_suggestions().await;
    assert_eq!(controller.suggestions().state(), &FeedState::NoNewSuggestions);
}

#[tokio::test]
async fn test_accept_duplicate_suggestion() {
    let mut controller = controller(MockApi::new().with_suggestions(vec![from_email("Call Bob", "m1")]));
    controller.refresh_suggestions().await;
    let card_id = controller.suggestions().cards()[0].id();

    controller.add_task("call bob", None, None, None);
    assert_eq!(controller.accept_suggestion(card_id).await, AddOutcome::Duplicate);

    assert_eq!(controller.tasks().len(), 1);
    assert!(controller.suggestions().cards().is_empty());
    assert!(controller.api().add_task_requests().is_empty());
    assert_eq!(controller.notifications().last().unwrap().message, "This task already exists in your list!");

    assert_eq!(controller.accept_suggestion(card_id).await, AddOutcome::NotFound);
}

#[tokio::test]
async fn test_accept_suggestion_falls_back_to_local() {
    let api = MockApi::new()
        .with_suggestions(vec![from_email("Call Bob", "m1")])
        .with_behaviour(MockBehaviour{
            add_task_behaviour: (0, 1),
            ..MockBehaviour::default()
        });
    let mut controller = controller(api);
    controller.refresh_suggestions().await;
    let card_id = controller.suggestions().cards()[0].id();

    let task_id = match controller.accept_suggestion(card_id).await {
        AddOutcome::LocalOnly(id) => id,
        other => panic!("Unexpected outcome {:?}", other),
    };

    assert_eq!(controller.tasks().get(task_id).unwrap().task().event_id(), None);
    assert!(controller.suggestions().cards().is_empty());
    assert!(controller.storage().get(ExclusionSet::ProcessedEmails).is_empty());
    assert!(controller.notifications().last().unwrap().message.starts_with("Error adding task: "));
}

#[tokio::test]
async fn test_accept_with_expired_session_keeps_the_card() {
    let api = MockApi::new().with_suggestions(vec![Suggestion::new("Call Bob")]);
    let mut controller = controller(api);
    controller.refresh_suggestions().await;
    let card_id = controller.suggestions().cards()[0].id();

    controller.api().set_authenticated(false, None);
    assert_eq!(controller.accept_suggestion(card_id).await, AddOutcome::Redirected);
    assert_eq!(controller.navigation(), Some("/login"));
    assert!(controller.suggestions().card(card_id).is_some());
    assert_eq!(controller.tasks().len(), 0);
}

#[tokio::test]
async fn test_dismiss_suggestion() {
    let api = MockApi::new().with_suggestions(vec![
        from_email("Reply to Alice", "m1"),
        from_email("Send the slides to Alice", "m1"),
        Suggestion::new("Water the plants"),
    ]);
    let mut controller = controller(api);
    controller.refresh_suggestions().await;

    let ids: Vec<_> = controller.suggestions().cards().iter().map(|card| card.id()).collect();
    assert_eq!(ids.len(), 3);

    assert!(controller.dismiss_suggestion(ids[0]));
    assert!(controller.dismiss_suggestion(ids[1]));
    assert!(controller.dismiss_suggestion(ids[2]));
    assert!(controller.dismiss_suggestion(ids[2]) == false);

    assert!(controller.suggestions().cards().is_empty());
    assert_eq!(controller.storage().get(ExclusionSet::ProcessedEmails), &["m1".to_string()]);
    assert!(controller.api().add_task_requests().is_empty());
}

#[tokio::test]
async fn test_dismissed_email_with_custom_link_base() {
    let _ = env_logger::builder().is_test(true).try_init();
    let settings = Settings {
        email_link_base: "https://mail.example.com/message/".to_string(),
        ..Settings::default().without_delays()
    };
    let api = MockApi::new().with_suggestions(vec![from_email("Reply to Alice", "m1")]);
    let mut controller = Controller::new(api, Storage::in_memory(), settings);

    controller.refresh_suggestions().await;
    let card = controller.suggestions().cards()[0].clone();
    assert_eq!(card.email_link(), Some("https://mail.example.com/message/m1"));

    assert!(controller.dismiss_suggestion(card.id()));
    assert_eq!(controller.storage().get(ExclusionSet::ProcessedEmails), &["m1".to_string()]);

    controller.refresh_suggestions().await;
    assert_eq!(controller.suggestions().state(), &FeedState::NoNewSuggestions);
}
