//! services/web/src/web/views.rs
//!
//! Server-rendered HTML for the single listing page. The markup is small
//! enough that it is built with `format!`; titles are HTML-escaped since
//! they are visitor-supplied free text.

use axum::response::Html;
use wishlist_core::domain::{Game, GamesCollection, UserIdentity};

use crate::web::flash::Notice;

/// Render the games dashboard: notice banner, wanted games with vote
/// links, the suggestion form, and the owned list.
pub fn games_page(
    games: &mut GamesCollection,
    user: &UserIdentity,
    notice: Option<Notice>,
) -> Html<String> {
    let mut page = String::with_capacity(2048);
    page.push_str(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\">\
         <title>Xbox Game Wishlist</title></head><body>",
    );
    page.push_str("<h1>Xbox Game Wishlist</h1>");

    if let Some(notice) = notice {
        let kind = if notice.is_success() { "success" } else { "error" };
        page.push_str(&format!(
            "<p class=\"notice {kind}\">{}</p>",
            escape(notice.text())
        ));
    }

    page.push_str("<h2>Wanted games</h2>");
    render_wanted(&mut page, games.wanted(), user);

    if user.can_perform {
        page.push_str(
            "<form method=\"post\" action=\"/add-game\">\
             <input type=\"text\" name=\"title\" placeholder=\"Suggest a game\">\
             <button type=\"submit\">Add game</button></form>",
        );
    }

    page.push_str("<h2>Owned games</h2>");
    render_owned(&mut page, games.owned());

    page.push_str("<p><a href=\"/clear-games\">Clear all games</a></p>");
    page.push_str("</body></html>");

    Html(page)
}

fn render_wanted(page: &mut String, wanted: &[Game], user: &UserIdentity) {
    if wanted.is_empty() {
        page.push_str("<p>No games wanted right now.</p>");
        return;
    }
    page.push_str("<table><tr><th>Title</th><th>Votes</th><th></th><th></th></tr>");
    for game in wanted {
        let vote_cell = if user.can_perform {
            format!("<a href=\"/add-vote/{}\">vote</a>", game.id)
        } else {
            String::new()
        };
        page.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td>\
             <td><a href=\"/own-game/{}\">got it</a></td></tr>",
            escape(&game.title),
            game.votes,
            vote_cell,
            game.id,
        ));
    }
    page.push_str("</table>");
}

fn render_owned(page: &mut String, owned: &[Game]) {
    if owned.is_empty() {
        page.push_str("<p>No games owned yet.</p>");
        return;
    }
    page.push_str("<ul>");
    for game in owned {
        page.push_str(&format!("<li>{}</li>", escape(&game.title)));
    }
    page.push_str("</ul>");
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use wishlist_core::domain::GameStatus;

    fn game(id: i64, title: &str, votes: i64, status: GameStatus) -> Game {
        Game {
            id,
            title: title.to_string(),
            votes,
            status,
            ip: String::new(),
            vote_time: String::new(),
        }
    }

    fn weekday_user(can_perform: bool) -> UserIdentity {
        UserIdentity {
            id: "abc".to_string(),
            has_performed_today: !can_perform,
            can_perform,
        }
    }

    #[test]
    fn escapes_titles() {
        let mut games = GamesCollection::new(vec![game(
            1,
            "<script>alert('x')</script>",
            0,
            GameStatus::Wanted,
        )]);
        let Html(page) = games_page(&mut games, &weekday_user(true), None);
        assert!(!page.contains("<script>alert"));
        assert!(page.contains("&lt;script&gt;"));
    }

    #[test]
    fn hides_vote_links_and_form_when_blocked() {
        let mut games = GamesCollection::new(vec![game(1, "Halo", 2, GameStatus::Wanted)]);
        let Html(page) = games_page(&mut games, &weekday_user(false), None);
        assert!(!page.contains("/add-vote/1"));
        assert!(!page.contains("action=\"/add-game\""));
        // Owning stays available regardless.
        assert!(page.contains("/own-game/1"));
    }

    #[test]
    fn shows_notice_text() {
        let mut games = GamesCollection::new(Vec::new());
        let Html(page) = games_page(&mut games, &weekday_user(true), Some(Notice::VoteAdded));
        assert!(page.contains("Vote added for game"));
        assert!(page.contains("notice success"));
    }

    #[test]
    fn lists_both_views() {
        let mut games = GamesCollection::new(vec![
            game(1, "Halo", 2, GameStatus::Wanted),
            game(2, "Forza", 0, GameStatus::Owned),
        ]);
        let Html(page) = games_page(&mut games, &weekday_user(true), None);
        assert!(page.contains("Halo"));
        assert!(page.contains("<li>Forza</li>"));
    }
}
