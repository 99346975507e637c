//! Friend tagging and location state for the post composer.

mod error;
mod fetch;
mod form;
mod location;
mod name_cache;
mod selection;
mod session;
pub mod view;

pub use error::{TaggingError, TaggingResult};
pub use fetch::{spawn_friend_fetch, FetchOutcome, SessionSlot};
pub use form::FormFields;
pub use location::{validate_location, MAX_LOCATION_CHARS};
pub use name_cache::NameCache;
pub use selection::TagSelection;
pub use session::{FetchPurpose, FriendFetch, PickerContent, TagSession};
