//! End-to-end sign-up flows through the submission controller.

use std::sync::Arc;
use std::time::Duration;

use portico_core::Settings;
use portico_forms::signup::{CONFIRM, EMAIL, PASSWORD, USERNAME};
use portico_forms::FieldEvent;
use portico_test::{ScriptedSignUpClient, SignUpFixture, SignUpHarness};
use portico_views::{NotificationKind, SubmissionStatus, SubmitEvent, SubmitOutcome};

#[tokio::test]
async fn test_successful_sign_up() {
    let harness = SignUpHarness::new(ScriptedSignUpClient::new()).unwrap();
    harness.fill(&SignUpFixture::jane_doe());

    let mut event = SubmitEvent::new();
    let outcome = harness.controller.handle_submit_event(&mut event).await;

    assert_eq!(outcome, SubmitOutcome::Succeeded);
    assert!(event.default_prevented());

    harness.client.assert_calls(1);
    let request = harness.client.last_request().unwrap();
    assert_eq!(request.username, "Jane Doe");
    assert_eq!(request.email, "jane@x.com");
    assert_eq!(request.password.expose(), "secret1");

    harness.notifier.assert_sequence(&[
        (NotificationKind::Loading, "Loading ..."),
        (NotificationKind::Success, "Success!"),
    ]);
    let notifications = harness.notifier.notifications();
    assert_eq!(notifications[0].duration, Duration::ZERO);
    assert_eq!(notifications[1].duration, Duration::from_secs(2));
    assert!(notifications.iter().all(|n| n.key == "/signup"));

    harness.navigator.assert_navigated_once_to("/");
    assert_eq!(
        harness.controller.history(),
        [
            SubmissionStatus::Idle,
            SubmissionStatus::Validating,
            SubmissionStatus::Submitting,
            SubmissionStatus::Succeeded,
            SubmissionStatus::Idle,
        ]
    );
    assert_eq!(harness.controller.status(), SubmissionStatus::Idle);
}

#[tokio::test]
async fn test_resubmit_after_success_starts_a_new_submission() {
    let harness = SignUpHarness::new(ScriptedSignUpClient::new()).unwrap();
    harness.fill(&SignUpFixture::jane_doe());

    assert_eq!(harness.controller.submit().await, SubmitOutcome::Succeeded);
    assert_eq!(harness.controller.status(), SubmissionStatus::Idle);

    assert_eq!(harness.controller.submit().await, SubmitOutcome::Succeeded);
    harness.client.assert_calls(2);
    assert_eq!(harness.navigator.routes(), ["/", "/"]);
    let history = harness.controller.history();
    assert_eq!(history.iter().filter(|s| **s == SubmissionStatus::Succeeded).count(), 2);
    assert_eq!(history.last(), Some(&SubmissionStatus::Idle));
}

#[tokio::test]
async fn test_failed_sign_up_keeps_values() {
    let harness = SignUpHarness::new(ScriptedSignUpClient::failing("Email already in use")).unwrap();
    harness.fill(&SignUpFixture::jane_doe());

    let outcome = harness.controller.submit().await;

    assert_eq!(outcome, SubmitOutcome::Failed("Email already in use".to_string()));
    let errors = harness.notifier.of_kind(NotificationKind::Error);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].content, "Email already in use");
    assert_eq!(errors[0].duration, Duration::from_secs(2));
    assert_eq!(harness.notifier.visible()["/signup"].kind, NotificationKind::Error);
    harness.navigator.assert_not_navigated();

    assert_eq!(harness.controller.status(), SubmissionStatus::Idle);
    assert_eq!(harness.controller.value(USERNAME), "Jane Doe");
    assert_eq!(harness.controller.value(EMAIL), "jane@x.com");
    assert_eq!(harness.controller.value(PASSWORD), "secret1");
    assert_eq!(harness.controller.value(CONFIRM), "secret1");
    assert!(harness.controller.field_props().iter().all(|p| p.error.is_none()));
}

#[tokio::test]
async fn test_retry_after_failure() {
    let client = ScriptedSignUpClient::new().then_fail("Service unavailable");
    let harness = SignUpHarness::new(client).unwrap();
    harness.fill(&SignUpFixture::jane_doe());

    assert!(matches!(harness.controller.submit().await, SubmitOutcome::Failed(_)));
    assert_eq!(harness.controller.submit().await, SubmitOutcome::Succeeded);
    harness.client.assert_calls(2);
    harness.navigator.assert_navigated_once_to("/");
}

#[tokio::test]
async fn test_invalid_input_never_reaches_client() {
    let fixtures = [
        SignUpFixture::jane_doe().with_confirm("secret2"),
        SignUpFixture::jane_doe().with_confirm(""),
        SignUpFixture::jane_doe().with_email("jane-at-x"),
        SignUpFixture {
            username: "   ".to_string(),
            ..SignUpFixture::jane_doe()
        },
    ];
    for fixture in fixtures {
        let harness = SignUpHarness::new(ScriptedSignUpClient::new()).unwrap();
        harness.fill(&fixture);
        let outcome = harness.controller.submit().await;
        assert!(matches!(outcome, SubmitOutcome::Invalid(ref e) if e.len() == 1), "{fixture:?} gave {outcome:?}");
        harness.client.assert_calls(0);
        harness.notifier.assert_count(0);
        harness.navigator.assert_not_navigated();
    }
}

#[tokio::test]
async fn test_submit_on_empty_form_shows_every_error() {
    let harness = SignUpHarness::new(ScriptedSignUpClient::new()).unwrap();
    let SubmitOutcome::Invalid(errors) = harness.controller.submit().await else {
        panic!("empty form must be invalid");
    };
    assert_eq!(errors[USERNAME], "Please input your name!");
    assert_eq!(errors[EMAIL], "Please input your E-mail!");
    assert_eq!(errors[PASSWORD], "Please input your password!");
    assert_eq!(errors[CONFIRM], "Please confirm your password!");
    assert!(harness.controller.field_props().iter().all(|p| p.error.is_some()));
}

#[tokio::test]
async fn test_double_submit_is_dropped() {
    let harness = SignUpHarness::new(ScriptedSignUpClient::new()).unwrap();
    harness.fill(&SignUpFixture::jane_doe());
    harness.client.hold();

    let first = tokio::spawn({
        let controller = Arc::clone(&harness.controller);
        async move { controller.submit().await }
    });
    harness.client.wait_for_calls(1).await;
    assert_eq!(harness.controller.status(), SubmissionStatus::Submitting);

    assert_eq!(harness.controller.submit().await, SubmitOutcome::Ignored);

    harness.client.release();
    assert_eq!(first.await.unwrap(), SubmitOutcome::Succeeded);
    harness.client.assert_calls(1);
    harness.navigator.assert_navigated_once_to("/");
    assert_eq!(harness.notifier.of_kind(NotificationKind::Loading).len(), 1);
}

#[tokio::test]
async fn test_concurrent_submits_make_one_call() {
    let harness = SignUpHarness::new(ScriptedSignUpClient::new()).unwrap();
    harness.fill(&SignUpFixture::jane_doe());
    harness.client.hold();

    let (first, second, ()) = tokio::join!(
        harness.controller.submit(),
        harness.controller.submit(),
        async {
            harness.client.wait_for_calls(1).await;
            harness.client.release();
        }
    );

    assert_eq!(first, SubmitOutcome::Succeeded);
    assert_eq!(second, SubmitOutcome::Ignored);
    harness.client.assert_calls(1);
}

#[tokio::test]
async fn test_unmount_discards_completion() {
    let harness = SignUpHarness::new(ScriptedSignUpClient::new()).unwrap();
    harness.fill(&SignUpFixture::jane_doe());
    harness.client.hold();

    let pending = tokio::spawn({
        let controller = Arc::clone(&harness.controller);
        async move { controller.submit().await }
    });
    harness.client.wait_for_calls(1).await;
    harness.controller.unmount();
    harness.client.release();

    assert_eq!(pending.await.unwrap(), SubmitOutcome::Discarded);
    harness.notifier.assert_sequence(&[(NotificationKind::Loading, "Loading ...")]);
    harness.navigator.assert_not_navigated();
    assert_eq!(harness.controller.status(), SubmissionStatus::Submitting);
}

#[tokio::test]
async fn test_unmount_discards_failure_too() {
    let harness = SignUpHarness::new(ScriptedSignUpClient::failing("Email already in use")).unwrap();
    harness.fill(&SignUpFixture::jane_doe());
    harness.client.hold();

    let pending = tokio::spawn({
        let controller = Arc::clone(&harness.controller);
        async move { controller.submit().await }
    });
    harness.client.wait_for_calls(1).await;
    harness.controller.unmount();
    harness.client.release();

    assert_eq!(pending.await.unwrap(), SubmitOutcome::Discarded);
    assert!(harness.notifier.of_kind(NotificationKind::Error).is_empty());
}

#[tokio::test]
async fn test_aborted_submit_frees_the_slot() {
    let harness = SignUpHarness::new(ScriptedSignUpClient::new()).unwrap();
    harness.fill(&SignUpFixture::jane_doe());
    harness.client.hold();

    let pending = tokio::spawn({
        let controller = Arc::clone(&harness.controller);
        async move { controller.submit().await }
    });
    harness.client.wait_for_calls(1).await;
    pending.abort();
    assert!(pending.await.unwrap_err().is_cancelled());

    assert_eq!(harness.controller.status(), SubmissionStatus::Idle);
    assert!(!harness.notifier.visible().contains_key("/signup"));

    harness.client.release();
    assert_eq!(harness.controller.submit().await, SubmitOutcome::Succeeded);
    harness.client.assert_calls(2);
    harness.navigator.assert_navigated_once_to("/");
    assert_eq!(harness.notifier.visible()["/signup"].kind, NotificationKind::Success);
}

#[tokio::test]
async fn test_confirm_follows_password_through_controller() {
    let harness = SignUpHarness::new(ScriptedSignUpClient::new()).unwrap();
    harness.fill(&SignUpFixture::jane_doe());

    let ran = harness.controller.apply(FieldEvent::change(PASSWORD, "secret9"));
    assert_eq!(ran, [CONFIRM]);
    let props = harness.controller.field_props();
    let confirm = props.iter().find(|p| p.name == CONFIRM).unwrap();
    assert_eq!(confirm.error.as_deref(), Some("Your passwords are different."));
}

#[tokio::test]
async fn test_settings_drive_routes_and_content() {
    let mut settings = Settings::default();
    settings.routes.index = "/home".to_string();
    settings.routes.sign_up = "/register".to_string();
    settings.notifications.success_content = "Welcome!".to_string();
    settings.notifications.transient_duration_ms = 500;

    let harness = SignUpHarness::with_settings(ScriptedSignUpClient::new(), settings).unwrap();
    harness.fill(&SignUpFixture::jane_doe());
    assert_eq!(harness.controller.submit().await, SubmitOutcome::Succeeded);

    harness.navigator.assert_navigated_once_to("/home");
    let shown = harness.notifier.visible();
    assert_eq!(shown["/register"].content, "Welcome!");
    assert_eq!(shown["/register"].duration, Duration::from_millis(500));
}
