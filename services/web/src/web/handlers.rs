//! services/web/src/web/handlers.rs
//!
//! Contains the Axum handlers for the five routes. Every mutation ends in a
//! redirect back to the listing page carrying a notice code; remote-API
//! errors never escape to the HTTP layer.

use axum::{
    extract::{Extension, Form, Path, Query, State},
    http::header,
    response::{IntoResponse, Redirect, Response},
};
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;
use tracing::error;
use wishlist_core::dates;
use wishlist_core::domain::{GamesCollection, UserIdentity};
use wishlist_core::ports::ApiError;
use wishlist_core::sanitize;

use crate::web::flash::Notice;
use crate::web::middleware::{cleared_cookie, performed_cookie};
use crate::web::state::AppState;
use crate::web::views;

//=========================================================================================
// Request Payload Structs
//=========================================================================================

#[derive(Deserialize)]
pub struct ListParams {
    pub notice: Option<Notice>,
}

#[derive(Deserialize)]
pub struct AddGameForm {
    pub title: Option<String>,
}

//=========================================================================================
// Handlers
//=========================================================================================

/// GET / - the games dashboard. No identity gate: anyone may view.
pub async fn list_handler(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<UserIdentity>,
    Query(params): Query<ListParams>,
) -> Response {
    let games = match state.games.games().await {
        Ok(games) => games,
        Err(e) => return api_failure(&e),
    };

    let mut games = GamesCollection::new(games);
    games.sort_wanted_by_votes();
    games.sort_owned_by_title();

    views::games_page(&mut games, &user, params.notice).into_response()
}

/// POST /add-game - suggest a new game.
pub async fn add_game_handler(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<UserIdentity>,
    Form(form): Form<AddGameForm>,
) -> Response {
    if !user.can_perform {
        return go_home(Notice::CannotAccess);
    }

    let Some(title) = form.title else {
        return go_home(Notice::MissingTitle);
    };
    let title = sanitize::cleanup(&title);
    if title.is_empty() {
        return go_home(Notice::EmptyTitle);
    }

    // Duplicate check runs against a fresh snapshot; the remote also
    // dedups, but a duplicate should read as validation, not as an error.
    let games = match state.games.games().await {
        Ok(games) => GamesCollection::new(games),
        Err(e) => return api_failure(&e),
    };
    if games.title_exists(&title) {
        return go_home(Notice::DuplicateTitle);
    }

    if let Err(e) = state.games.add_game(&title).await {
        return api_failure(&e);
    }

    go_home_performed(Notice::GameAdded, &user)
}

/// GET /add-vote/{id} - vote for a wanted game.
pub async fn add_vote_handler(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<UserIdentity>,
    Path(id): Path<i64>,
) -> Response {
    if !user.can_perform {
        return go_home(Notice::CannotAccess);
    }

    let mut games = match state.games.games().await {
        Ok(games) => GamesCollection::new(games),
        Err(e) => return api_failure(&e),
    };
    if !games.is_in_wanted(id) {
        return go_home(Notice::NotVotable);
    }

    if let Err(e) = state.games.add_vote(id).await {
        return api_failure(&e);
    }

    go_home_performed(Notice::VoteAdded, &user)
}

/// GET /own-game/{id} - mark a game as purchased.
///
/// Carries no can-perform gate, same as clearing: these are maintenance
/// actions, not once-per-day votes.
pub async fn own_game_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Response {
    if let Err(e) = state.games.set_owned(id).await {
        return api_failure(&e);
    }
    go_home(Notice::GameOwned)
}

/// GET /clear-games - wipe the remote list and drop the visitor cookie.
pub async fn clear_games_handler(State(state): State<Arc<AppState>>) -> Response {
    if let Err(e) = state.games.clear_games().await {
        return api_failure(&e);
    }
    (
        [(header::SET_COOKIE, cleared_cookie())],
        Redirect::to(&home(Notice::GamesCleared)),
    )
        .into_response()
}

//=========================================================================================
// Helpers
//=========================================================================================

fn home(notice: Notice) -> String {
    format!("/?notice={}", notice.code())
}

fn go_home(notice: Notice) -> Response {
    Redirect::to(&home(notice)).into_response()
}

/// Success redirect after a performing action: records the acted-today
/// cookie, expiring at the next UTC midnight.
fn go_home_performed(notice: Notice, user: &UserIdentity) -> Response {
    let expires = dates::tomorrow_at_midnight_utc(Utc::now());
    (
        [(header::SET_COOKIE, performed_cookie(&user.id, expires))],
        Redirect::to(&home(notice)),
    )
        .into_response()
}

/// Every remote-API failure ends up here: logged, then surfaced to the
/// visitor as the generic message. No cookie is set.
fn api_failure(err: &ApiError) -> Response {
    error!("remote game api call failed: {err}");
    go_home(Notice::ApiFailure)
}
