//! Shared constants for end-to-end tests
//!
//! When the fixture catalog changes, update only this file and
//! `fixtures::test_movies`.

/// "Now", as seen by the recommender under test.
pub const CURRENT_YEAR: i32 = 2025;

pub const TITLE_MAD_MAX: &str = "Mad Max: Fury Road";
pub const TITLE_TOP_GUN: &str = "Top Gun: Maverick";
pub const TITLE_DINNER: &str = "Le Dîner de cons";
pub const TITLE_INTOUCHABLES: &str = "Intouchables";
pub const TITLE_GODFATHER: &str = "Le Parrain";
pub const TITLE_OBSCURE_COMEDY: &str = "Petite comédie de quartier";
pub const TITLE_RUSH: &str = "Rush";
pub const TITLE_BIG_BLUE: &str = "Le Grand Bleu";

/// Number of movies in the fixture catalog.
pub const MOVIE_COUNT: usize = 8;
