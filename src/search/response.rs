//! Plain-text answer to a request.

use super::filters::QueryFilters;
use super::format::{MovieDisplay, OrUnavailable, UNAVAILABLE};
use std::fmt::Write;

pub const NO_RESULTS: &str = "Désolé, je n'ai pas trouvé de films correspondant à vos critères.";
const CARD_SEPARATOR_WIDTH: usize = 50;

/// Opening sentence describing what was understood.
pub fn response_intro(filters: &QueryFilters) -> String {
    let mut intro = String::from("Voici les films que j'ai trouvés ");
    if !filters.genres.is_empty() {
        let _ = write!(intro, "dans le genre {} ", filters.genres.join(", "));
    }
    if !filters.themes.is_empty() {
        let _ = write!(intro, "sur le thème {} ", filters.themes.join(", "));
    }
    if let Some(mood) = filters.mood {
        let _ = write!(intro, "avec une ambiance {} ", mood.label());
    }
    if let Some(year) = filters.year {
        let _ = write!(intro, "sortis en {} ", year);
    } else if let Some(period) = filters.period {
        let _ = write!(intro, "de période {} ", period.label());
    }
    if filters.prefer_unknown {
        intro.push_str("parmi les films méconnus ");
    }
    intro.push(':');
    intro
}

pub fn score_label(score: Option<f64>) -> String {
    match score {
        Some(score) => format!("{:.1}/10", score),
        None => UNAVAILABLE.to_string(),
    }
}

/// One movie, one line per attribute.
pub fn render_card(movie: &MovieDisplay) -> String {
    let mut card = String::new();
    let _ = writeln!(
        card,
        "🎬 {} ({})",
        OrUnavailable(&movie.title),
        OrUnavailable(&movie.year)
    );
    let _ = writeln!(card, "📝 Genre : {}", OrUnavailable(&movie.genres));
    let _ = writeln!(
        card,
        "⭐ Note : {}/10 ({} votes)",
        OrUnavailable(&movie.rating),
        OrUnavailable(&movie.vote_count)
    );
    let _ = writeln!(card, "📊 Score ajusté : {}", score_label(movie.weighted_score));
    let _ = writeln!(card, "📈 Popularité : {}", OrUnavailable(&movie.popularity));
    let _ = writeln!(card, "📖 {}", OrUnavailable(&movie.description));
    card
}

/// Full answer: an apology when nothing matched, otherwise the intro and
/// one card per movie.
pub fn render_response(filters: &QueryFilters, movies: &[MovieDisplay]) -> String {
    if movies.is_empty() {
        return NO_RESULTS.to_string();
    }
    let mut response = response_intro(filters);
    response.push_str("\n\n");
    for movie in movies {
        response.push_str(&render_card(movie));
        response.push_str(&"─".repeat(CARD_SEPARATOR_WIDTH));
        response.push('\n');
    }
    response
}
