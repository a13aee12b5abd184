pub mod dates;
pub mod domain;
pub mod ports;
pub mod sanitize;

pub use domain::{Game, GameStatus, GamesCollection, UserIdentity};
pub use ports::{ApiError, ApiResult, GameService};
