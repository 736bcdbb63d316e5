//! Domain entities - the core business objects.

mod key;
mod post;
mod user;

pub use key::{KEY_PREFIX_WIDTH, KEY_SUFFIX_WIDTH, generate_key, generate_key_at};
pub use post::{ContentInput, MAX_CONTENT_LENGTH, Post, PostMetadata};
pub use user::User;
