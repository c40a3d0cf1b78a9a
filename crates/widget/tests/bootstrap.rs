mod support;

use omni_widget::{
    DEFAULT_THEME_COLOR, Message, Sender, TurnPhase, Visibility, WELCOME_DELAY, WELCOME_MESSAGE,
};

use support::{API_URL, Harness, SurfaceCall};

#[tokio::test]
async fn boot_injects_styles_mounts_binds_then_welcomes() {
    let harness = Harness::new();
    let handle = harness
        .mount(&[
            ("data-user-id", "user-42"),
            ("data-api-url", API_URL),
            ("data-theme-color", "#ff5500"),
        ])
        .unwrap();

    let calls = harness.surface.calls();
    assert!(matches!(&calls[0], SurfaceCall::InjectStyles(css) if css.contains("#ff5500")));
    assert_eq!(calls[1], SurfaceCall::Mount);
    assert_eq!(calls[2], SurfaceCall::Bind);
    assert_eq!(calls.len(), 3);
    assert!(handle.widget().messages().is_empty());
    assert_eq!(harness.runtime.pending_tasks(), 1);

    harness.runtime.run_pending().await;

    assert_eq!(harness.runtime.sleeps(), vec![WELCOME_DELAY]);
    assert_eq!(
        handle.widget().messages(),
        vec![Message::bot(WELCOME_MESSAGE)]
    );
    assert_eq!(handle.widget().visibility(), Visibility::Closed);
    assert_eq!(handle.widget().phase(), TurnPhase::Idle);
}

#[tokio::test]
async fn default_theme_color_when_attribute_is_absent() {
    let harness = Harness::new();
    harness
        .mount(&[("data-user-id", "u"), ("data-api-url", API_URL)])
        .unwrap();

    assert!(matches!(
        &harness.surface.calls()[0],
        SurfaceCall::InjectStyles(css) if css.contains(DEFAULT_THEME_COLOR)
    ));
}

#[tokio::test]
async fn missing_base_url_mounts_nothing() {
    let harness = Harness::new();

    let result = harness.mount(&[("data-user-id", "user-42")]);

    assert!(result.is_err());
    assert!(harness.surface.calls().is_empty());
    assert_eq!(harness.runtime.pending_tasks(), 0);
    let errors = harness.diagnostics.config_errors.borrow();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("data-api-url"));
}

#[tokio::test]
async fn missing_credential_mounts_nothing() {
    let harness = Harness::new();

    let result = harness.mount(&[("data-api-url", API_URL), ("data-user-id", "   ")]);

    assert!(result.is_err());
    assert!(harness.surface.calls().is_empty());
    assert_eq!(harness.diagnostics.config_errors.borrow().len(), 1);
}

#[tokio::test]
async fn toggle_alternates_and_focuses_on_open() {
    let harness = Harness::new();
    let handle = harness.mount_default();

    assert_eq!(handle.toggle(), Visibility::Open);
    assert_eq!(handle.toggle(), Visibility::Closed);
    assert_eq!(handle.toggle(), Visibility::Open);

    assert_eq!(
        harness.surface.calls(),
        vec![
            SurfaceCall::Visible(true),
            SurfaceCall::FocusInput,
            SurfaceCall::Visible(false),
            SurfaceCall::Visible(true),
            SurfaceCall::FocusInput,
        ]
    );
}

#[tokio::test]
async fn toggle_does_not_touch_the_conversation() {
    let harness = Harness::new();
    let handle = harness.mount_default();
    harness.runtime.run_pending().await;
    let before = handle.widget().messages();

    handle.toggle();
    handle.toggle();

    assert_eq!(handle.widget().messages(), before);
}

#[tokio::test]
async fn bound_dispatcher_routes_surface_events() {
    let harness = Harness::new();
    let handle = harness.mount_default();
    harness.runtime.run_pending().await;
    let dispatcher = harness.surface.dispatcher().unwrap();
    harness.transport.respond(200, r#"{"response":"routed"}"#);

    dispatcher.toggle();
    assert_eq!(handle.widget().visibility(), Visibility::Open);

    dispatcher.submit("from the send button");
    assert_eq!(harness.runtime.pending_tasks(), 1);
    harness.runtime.run_pending().await;

    let messages = handle.widget().messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[1], Message::user("from the send button"));
    assert_eq!(messages[2], Message::bot("routed"));
}

#[tokio::test]
async fn dispatcher_outliving_the_widget_is_inert() {
    let harness = Harness::new();
    let handle = harness.mount_default();
    let dispatcher = harness.surface.dispatcher().unwrap();
    harness.runtime.run_pending().await;

    drop(handle);
    harness.surface.clear();

    dispatcher.toggle();
    dispatcher.submit("anyone?");

    assert!(harness.surface.calls().is_empty());
    assert_eq!(harness.runtime.pending_tasks(), 0);
    assert!(harness.transport.requests().is_empty());
}

#[tokio::test]
async fn welcome_line_is_plain_bot_entry() {
    let harness = Harness::new();
    let _handle = harness.mount_default();

    harness.runtime.run_pending().await;

    let shown = harness.surface.shown();
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].1, Sender::Bot);
    assert_eq!(shown[0].3, WELCOME_MESSAGE);
}
