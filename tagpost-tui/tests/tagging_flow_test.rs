mod common;

use common::{sample_post, spawn_server, MockState, TOKEN};
use std::time::Duration;
use tagpost::api::ApiClient;
use tagpost::app::App;
use tagpost::tagging::view::{self, PickerView};
use tagpost_types::{Friend, TaggedFriends};

async fn app_for(base_url: &str) -> App {
    let mut client = ApiClient::new(base_url);
    client.set_session_token(Some(TOKEN.to_string()));
    App::new(client)
}

/// Run queued fetches and apply results until `done` holds
async fn settle(app: &mut App, done: impl Fn(&App) -> bool) {
    app.dispatch_pending_fetches();
    for _ in 0..200 {
        app.drain_fetch_outcomes();
        if done(&*app) {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("fetch outcome never arrived");
}

fn labels(app: &App) -> Vec<String> {
    app.edit_post_tags.tag_chips().iter().map(|c| c.label.clone()).collect()
}

#[tokio::test]
async fn test_edit_post_resolves_known_names_and_keeps_unknown_ids() {
    let post = sample_post(Some(TaggedFriends::from(vec!["a", "b"])), Some("Lisbon"));
    let base_url = spawn_server(MockState {
        friends: Some(vec![Friend::new("a", "Alice")]),
        post: Some(post.clone()),
        ..Default::default()
    })
    .await;
    let mut app = app_for(&base_url).await;

    let fetched = app.api_client.get_post(post.id).await.unwrap();
    app.open_composer_edit_post(&fetched);
    assert!(app.edit_post_tags.tags_resolving());

    settle(&mut app, |app| !app.edit_post_tags.tags_resolving()).await;

    assert_eq!(labels(&app), vec!["Alice", "b"]);
    assert_eq!(view::location_chip(&app.edit_post_tags), Some("Lisbon"));
}

#[tokio::test]
async fn test_picker_shows_failure_when_friends_endpoint_errors() {
    let base_url = spawn_server(MockState::default()).await;
    let mut app = app_for(&base_url).await;
    app.open_composer_new_post();
    app.open_tag_picker();

    settle(&mut app, |app| {
        !matches!(view::picker(&app.new_post_tags), PickerView::Loading)
    })
    .await;

    match view::picker(&app.new_post_tags) {
        PickerView::Failed(msg) => assert!(msg.contains("friend store unavailable")),
        other => panic!("unexpected picker view: {:?}", other),
    }
    assert!(app.composer_state.is_open());
}

#[tokio::test]
async fn test_saving_edit_sends_tags_and_location() {
    let post = sample_post(Some(TaggedFriends::from(vec!["a"])), None);
    let state = MockState {
        friends: Some(vec![Friend::new("a", "Alice"), Friend::new("b", "Bob")]),
        post: Some(post.clone()),
        ..Default::default()
    };
    let last_update = state.last_update.clone();
    let base_url = spawn_server(state).await;
    let mut app = app_for(&base_url).await;

    app.open_composer_edit_post(&post);
    settle(&mut app, |app| !app.edit_post_tags.tags_resolving()).await;

    app.open_tag_picker();
    settle(&mut app, |app| matches!(view::picker(&app.edit_post_tags), PickerView::Rows(_))).await;
    app.composer_state.picker_index = 1;
    app.toggle_highlighted_friend();
    app.confirm_tag_selection();

    app.open_location_editor();
    *app.edit_post_tags.location_input_mut().unwrap() = "  Harbour Street  ".to_string();
    app.confirm_location();

    app.submit_composer().await.unwrap();

    let sent = last_update.lock().unwrap().take().expect("PUT was not received");
    assert_eq!(sent.tagged_friends, r#"["a","b"]"#);
    assert_eq!(sent.location, "Harbour Street");
    assert_eq!(sent.content, "Sunset at the pier");
    assert!(!app.composer_state.is_open());
    assert!(app.last_saved.is_some());
}
