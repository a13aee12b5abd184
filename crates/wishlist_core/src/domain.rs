//! crates/wishlist_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of the web framework and of the remote
//! API's wire format.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::dates;

/// Whether a game is still on the wishlist or already purchased.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Wanted,
    Owned,
}

impl GameStatus {
    /// Status string for a wanted game on the wire.
    pub const WIRE_WANTED: &'static str = "wantit";

    /// Status string for an owned game on the wire.
    pub const WIRE_OWNED: &'static str = "gotit";

    /// Parse the remote API's status string. The remote partitions on
    /// "wantit" versus everything else, so unknown values read as owned.
    pub fn from_wire(s: &str) -> Self {
        if s == Self::WIRE_WANTED {
            GameStatus::Wanted
        } else {
            GameStatus::Owned
        }
    }

    pub fn as_wire(&self) -> &'static str {
        match self {
            GameStatus::Wanted => Self::WIRE_WANTED,
            GameStatus::Owned => Self::WIRE_OWNED,
        }
    }
}

/// A game mirrored from the remote voting API for display.
///
/// Games are created and owned entirely by the remote system; this side only
/// reads them and requests mutations. `ip` and `vote_time` are remote
/// metadata carried through untouched.
#[derive(Debug, Clone)]
pub struct Game {
    pub id: i64,
    pub title: String,
    pub votes: i64,
    pub status: GameStatus,
    pub ip: String,
    pub vote_time: String,
}

/// One fetch's worth of games, split lazily into wanted and owned views.
///
/// The split is computed at most once per snapshot, on first access of
/// either view, and never recomputed; a fresh fetch produces a fresh
/// collection. The sort methods reorder the cached views in place.
#[derive(Debug)]
pub struct GamesCollection {
    games: Vec<Game>,
    split: Option<SplitGames>,
}

#[derive(Debug)]
struct SplitGames {
    wanted: Vec<Game>,
    owned: Vec<Game>,
}

impl GamesCollection {
    pub fn new(games: Vec<Game>) -> Self {
        Self { games, split: None }
    }

    /// Games still open for voting.
    pub fn wanted(&mut self) -> &[Game] {
        &self.ensure_split().wanted
    }

    /// Games the office already owns.
    pub fn owned(&mut self) -> &[Game] {
        &self.ensure_split().owned
    }

    /// Stable sort of the wanted view by votes, highest first. Ties keep
    /// their original relative order.
    pub fn sort_wanted_by_votes(&mut self) {
        self.ensure_split()
            .wanted
            .sort_by(|a, b| b.votes.cmp(&a.votes));
    }

    /// Stable sort of the owned view by title, byte-wise ascending.
    pub fn sort_owned_by_title(&mut self) {
        self.ensure_split()
            .owned
            .sort_by(|a, b| a.title.cmp(&b.title));
    }

    /// Case-insensitive title match against every game in the snapshot,
    /// wanted and owned alike.
    pub fn title_exists(&self, title: &str) -> bool {
        let lowered = title.to_lowercase();
        self.games.iter().any(|g| g.title.to_lowercase() == lowered)
    }

    /// True iff a game with this id is in the wanted view.
    pub fn is_in_wanted(&mut self, id: i64) -> bool {
        self.wanted().iter().any(|g| g.id == id)
    }

    fn ensure_split(&mut self) -> &mut SplitGames {
        let games = &self.games;
        self.split.get_or_insert_with(|| {
            let (wanted, owned) = games
                .iter()
                .cloned()
                .partition(|g| g.status == GameStatus::Wanted);
            SplitGames { wanted, owned }
        })
    }
}

/// The per-request visitor identity, reconstructed on every request from
/// nothing but the cookie value and the wall-clock date. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    /// Cookie-supplied id, or a freshly generated one for first-time
    /// visitors. Opaque; only ever echoed back into the cookie.
    pub id: String,
    /// True if the browser presented our acted-today cookie. Cookie
    /// presence alone counts as proof of a prior action.
    pub has_performed_today: bool,
    /// False once the visitor has acted today, and always false on
    /// weekends.
    pub can_perform: bool,
}

impl UserIdentity {
    /// Derive the identity for one request from the inbound cookie value
    /// and the current instant.
    pub fn derive(cookie_id: Option<String>, now: DateTime<Utc>) -> Self {
        let has_performed_today = cookie_id.is_some();
        let id = cookie_id.unwrap_or_else(|| Uuid::new_v4().to_string());
        let can_perform = !has_performed_today && !dates::is_weekend(now.date_naive());

        Self {
            id,
            has_performed_today,
            can_perform,
        }
    }
}
