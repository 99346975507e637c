use std::sync::Arc;

use tagpost_types::Friend;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

use super::FriendFetch;
use crate::api::{ApiResult, FriendsSource};

/// Which composer session a fetch belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionSlot {
    NewPost,
    EditPost,
}

/// A finished friend list fetch, ready to be applied on the event loop
#[derive(Debug)]
pub struct FetchOutcome {
    pub slot: SessionSlot,
    pub fetch: FriendFetch,
    pub result: ApiResult<Vec<Friend>>,
}

/// Run `fetch` in the background and report back over `tx`.
///
/// The caller does not wait; if the receiver is gone by the time the fetch
/// lands the outcome is dropped.
pub fn spawn_friend_fetch(
    source: Arc<dyn FriendsSource>,
    slot: SessionSlot,
    fetch: FriendFetch,
    tx: UnboundedSender<FetchOutcome>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let result = source.list_friends().await;
        if tx.send(FetchOutcome { slot, fetch, result }).is_err() {
            log::debug!("Friend fetch finished after the receiver closed");
        }
    })
}
