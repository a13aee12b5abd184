//! crates/wishlist_core/src/ports.rs
//!
//! Defines the service contract (trait) for the remote game-voting API.
//! This trait forms the boundary of the hexagonal architecture, allowing the
//! core and the web layer to be independent of the SOAP transport.

use async_trait::async_trait;

use crate::domain::Game;

//=========================================================================================
// Remote API Error and Result Types
//=========================================================================================

/// Failure taxonomy for remote game-API calls.
///
/// The remote signals failure exclusively by returning the boolean `false`
/// in place of the expected payload; the adapter normalizes that sentinel
/// and any transport-level fault into this type. Nothing outside the
/// adapter may construct these.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The configured api key was rejected at startup. Fatal: the process
    /// refuses to serve.
    #[error("The api key is invalid")]
    InvalidApiKey,

    /// An operation that expected data or `true` got the failure sentinel
    /// (bad id, duplicate, and so on).
    #[error("The id is invalid")]
    InvalidId,

    /// The transport itself failed (network, timeout, malformed response).
    /// Carries the underlying fault's code and message for diagnostics.
    #[error("{message} with error code {code}")]
    Transport { code: String, message: String },
}

/// A convenience type alias for `Result<T, ApiError>`.
pub type ApiResult<T> = Result<T, ApiError>;

//=========================================================================================
// Service Port (Trait)
//=========================================================================================

/// The remote game-voting API as seen by the rest of the application.
#[async_trait]
pub trait GameService: Send + Sync {
    /// Check the validity of the api key. A bad key reports `Ok(false)`
    /// rather than an error; only transport faults fail.
    async fn check_key(&self) -> ApiResult<bool>;

    /// Fetch every game, wanted and owned, as one snapshot.
    async fn games(&self) -> ApiResult<Vec<Game>>;

    /// Cast a vote for a wanted game.
    async fn add_vote(&self, id: i64) -> ApiResult<()>;

    /// Suggest a new game. The adapter handles storage escaping of the
    /// title; callers pass it as entered (trimmed).
    async fn add_game(&self, title: &str) -> ApiResult<()>;

    /// Mark a game as purchased.
    async fn set_owned(&self, id: i64) -> ApiResult<()>;

    /// Remove every game from the remote list.
    async fn clear_games(&self) -> ApiResult<()>;
}
