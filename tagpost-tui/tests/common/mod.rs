// Shared mock server for integration tests
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tagpost_types::{ErrorResponse, Friend, FriendsResponse, Post, TaggedFriends, UpdatePostRequest};
use uuid::Uuid;

pub const TOKEN: &str = "test-session-token";

#[derive(Clone, Default)]
pub struct MockState {
    pub friends: Option<Vec<Friend>>,
    pub post: Option<Post>,
    pub last_update: Arc<Mutex<Option<UpdatePostRequest>>>,
}

pub fn sample_post(tagged: Option<TaggedFriends>, location: Option<&str>) -> Post {
    Post {
        id: Uuid::new_v4(),
        author_id: Uuid::new_v4(),
        author_username: "alice".to_string(),
        content: "Sunset at the pier".to_string(),
        created_at: Utc::now(),
        tagged_friends: tagged,
        location: location.map(String::from),
    }
}

fn authorized(headers: &HeaderMap) -> bool {
    headers.get("X-Session-Token").and_then(|v| v.to_str().ok()) == Some(TOKEN)
}

async fn list_friends(
    State(state): State<MockState>,
    headers: HeaderMap,
) -> Result<Json<FriendsResponse>, (StatusCode, Json<ErrorResponse>)> {
    if !authorized(&headers) {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse {
                error: "missing session".to_string(),
                details: None,
            }),
        ));
    }
    match state.friends {
        Some(friends) => Ok(Json(FriendsResponse { friends })),
        None => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "friend store unavailable".to_string(),
                details: Some("sqlite busy".to_string()),
            }),
        )),
    }
}

async fn get_post(State(state): State<MockState>, Path(id): Path<Uuid>) -> Result<Json<Post>, StatusCode> {
    state
        .post
        .filter(|p| p.id == id)
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn update_post(
    State(state): State<MockState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdatePostRequest>,
) -> Result<Json<Post>, StatusCode> {
    let mut post = state.post.clone().filter(|p| p.id == id).ok_or(StatusCode::NOT_FOUND)?;
    post.content = request.content.clone();
    post.tagged_friends = Some(TaggedFriends::from(request.tagged_friends.clone()));
    post.location = Some(request.location.clone());
    *state.last_update.lock().unwrap() = Some(request);
    Ok(Json(post))
}

/// Serve `state` on an ephemeral port and return its base URL
pub async fn spawn_server(state: MockState) -> String {
    let app = Router::new()
        .route("/friends", get(list_friends))
        .route("/posts/:id", get(get_post).put(update_post))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}
