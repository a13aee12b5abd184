pub mod flash;
pub mod handlers;
pub mod middleware;
pub mod state;
pub mod views;

// Re-export the handlers and middleware to make them easily accessible
// to the binary that will build the web server router.
pub use handlers::{
    add_game_handler, add_vote_handler, clear_games_handler, list_handler, own_game_handler,
};
pub use middleware::derive_user;
