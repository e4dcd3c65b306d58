//! Client library for the voices-server HTTP API.
//!
//! Wraps every endpoint of the content-sharing backend (accounts, posts,
//! support toggling, comments, image upload/delivery, stats) behind a typed
//! async interface. The API carries no session tokens: calls acting on
//! behalf of a user take that user's id explicitly, exactly like the wire
//! contract.
#![warn(missing_docs)]

mod error;
mod http_client;
mod models;

pub use error::{VoicesClientError, VoicesClientResult};
pub use http_client::VoicesClient;
pub use models::{
    Author, Comment, LikeToggle, PlatformStats, PostDetail, PostInput, PostSummary, User,
};
