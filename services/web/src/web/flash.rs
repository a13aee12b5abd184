//! services/web/src/web/flash.rs
//!
//! Stateless flash messages. The original framework kept these in a server
//! session; here the notice code travels as a query parameter on the
//! redirect back to the listing page and is mapped to its message text when
//! rendering. Validation outcomes are ordinary control flow expressed as
//! notices, never errors.

use serde::Deserialize;

/// Every user-facing message the app can show after a redirect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Notice {
    CannotAccess,
    MissingTitle,
    EmptyTitle,
    DuplicateTitle,
    NotVotable,
    GameAdded,
    VoteAdded,
    GameOwned,
    GamesCleared,
    ApiFailure,
}

impl Notice {
    /// The query-parameter code; must stay in sync with the serde renames.
    pub fn code(self) -> &'static str {
        match self {
            Notice::CannotAccess => "cannot-access",
            Notice::MissingTitle => "missing-title",
            Notice::EmptyTitle => "empty-title",
            Notice::DuplicateTitle => "duplicate-title",
            Notice::NotVotable => "not-votable",
            Notice::GameAdded => "game-added",
            Notice::VoteAdded => "vote-added",
            Notice::GameOwned => "game-owned",
            Notice::GamesCleared => "games-cleared",
            Notice::ApiFailure => "api-failure",
        }
    }

    pub fn text(self) -> &'static str {
        match self {
            Notice::CannotAccess => "Cannot access this resource at this time",
            Notice::MissingTitle => "Request was made without title",
            Notice::EmptyTitle => "The title must not be empty",
            Notice::DuplicateTitle => "This title already exists",
            Notice::NotVotable => "This game may not be voted on",
            Notice::GameAdded => "Game added to wanted list",
            Notice::VoteAdded => "Vote added for game",
            Notice::GameOwned => "Game added to owned list.",
            Notice::GamesCleared => "All games cleared",
            Notice::ApiFailure => {
                "An unexpected error occurred and your request could not be processed. \
                 Please let us know if this error persists."
            }
        }
    }

    pub fn is_success(self) -> bool {
        matches!(
            self,
            Notice::GameAdded | Notice::VoteAdded | Notice::GameOwned | Notice::GamesCleared
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip_through_query_deserialization() {
        for notice in [
            Notice::CannotAccess,
            Notice::MissingTitle,
            Notice::EmptyTitle,
            Notice::DuplicateTitle,
            Notice::NotVotable,
            Notice::GameAdded,
            Notice::VoteAdded,
            Notice::GameOwned,
            Notice::GamesCleared,
            Notice::ApiFailure,
        ] {
            let parsed: Notice =
                serde_json::from_value(serde_json::Value::String(notice.code().to_string()))
                    .unwrap();
            assert_eq!(parsed, notice);
        }
    }
}
