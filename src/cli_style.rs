use crate::catalog_store::CatalogPage;
use crate::search::{
    response_intro, score_label, MovieDisplay, OrUnavailable, Recommendation, NO_RESULTS,
};
use clap::builder::styling::{AnsiColor, Color, Style};
use clap::builder::Styles;
use crossterm::style::{Attribute, Color as CtColor, Stylize};
use unicode_width::UnicodeWidthStr;

// ═══════════════════════════════════════════════════════════════════════════════
// Clap Styles
// ═══════════════════════════════════════════════════════════════════════════════

pub fn get_styles() -> Styles {
    clap::builder::Styles::styled()
        .usage(
            Style::new()
                .bold()
                .underline()
                .fg_color(Some(Color::Ansi(AnsiColor::Yellow))),
        )
        .header(
            Style::new()
                .bold()
                .underline()
                .fg_color(Some(Color::Ansi(AnsiColor::Yellow))),
        )
        .literal(
            Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Green))),
        )
        .invalid(
            Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Red))),
        )
        .error(
            Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Red))),
        )
        .valid(
            Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Green))),
        )
        .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::BrightBlack))))
}

// ═══════════════════════════════════════════════════════════════════════════════
// Color Palette - Cinema Theme
// ═══════════════════════════════════════════════════════════════════════════════

pub mod colors {
    use crossterm::style::Color;

    pub const GOLD: Color = Color::Rgb {
        r: 255,
        g: 200,
        b: 60,
    };
    pub const AMBER: Color = Color::Rgb {
        r: 255,
        g: 150,
        b: 40,
    };
    pub const CRIMSON: Color = Color::Rgb {
        r: 220,
        g: 40,
        b: 70,
    };
    pub const CYAN: Color = Color::Rgb {
        r: 0,
        g: 220,
        b: 220,
    };
    pub const GREEN: Color = Color::Rgb {
        r: 0,
        g: 255,
        b: 136,
    };
    pub const RED: Color = Color::Rgb {
        r: 255,
        g: 85,
        b: 85,
    };
    pub const BLUE: Color = Color::Rgb {
        r: 100,
        g: 149,
        b: 237,
    };
    pub const DIM: Color = Color::Rgb {
        r: 128,
        g: 128,
        b: 128,
    };
    pub const WHITE: Color = Color::Rgb {
        r: 255,
        g: 255,
        b: 255,
    };
}

// ═══════════════════════════════════════════════════════════════════════════════
// Box Drawing Characters
// ═══════════════════════════════════════════════════════════════════════════════

pub mod box_chars {
    // Double line box
    pub const DOUBLE_TOP_LEFT: &str = "╔";
    pub const DOUBLE_TOP_RIGHT: &str = "╗";
    pub const DOUBLE_BOTTOM_LEFT: &str = "╚";
    pub const DOUBLE_BOTTOM_RIGHT: &str = "╝";
    pub const DOUBLE_HORIZONTAL: &str = "═";
    pub const DOUBLE_VERTICAL: &str = "║";

    pub const SINGLE_HORIZONTAL: &str = "─";
    pub const SINGLE_VERTICAL: &str = "│";

    // Rounded box
    pub const ROUND_TOP_LEFT: &str = "╭";
    pub const ROUND_TOP_RIGHT: &str = "╮";
    pub const ROUND_BOTTOM_LEFT: &str = "╰";
    pub const ROUND_BOTTOM_RIGHT: &str = "╯";

    // T-junctions
    pub const T_LEFT: &str = "├";
    pub const T_RIGHT: &str = "┤";
    pub const T_TOP: &str = "┬";
    pub const T_BOTTOM: &str = "┴";
    pub const CROSS: &str = "┼";

    pub const BULLET: &str = "●";
    pub const BULLET_EMPTY: &str = "○";
    pub const DIAMOND: &str = "◆";
    pub const STAR: &str = "★";
    pub const CHECK: &str = "✓";
    pub const CROSS_MARK: &str = "✗";
}

// ═══════════════════════════════════════════════════════════════════════════════
// Banner
// ═══════════════════════════════════════════════════════════════════════════════

pub fn print_banner() {
    let banner = r#"
    ██████╗ ███████╗ ██████╗ ██████╗ ██████╗  ██████╗ ████████╗
    ██╔══██╗██╔════╝██╔════╝██╔═══██╗██╔══██╗██╔═══██╗╚══██╔══╝
    ██████╔╝█████╗  ██║     ██║   ██║██████╔╝██║   ██║   ██║
    ██╔══██╗██╔══╝  ██║     ██║   ██║██╔══██╗██║   ██║   ██║
    ██║  ██║███████╗╚██████╗╚██████╔╝██████╔╝╚██████╔╝   ██║
    ╚═╝  ╚═╝╚══════╝ ╚═════╝ ╚═════╝ ╚═════╝  ╚═════╝    ╚═╝
"#;

    let gradient_colors = [
        colors::GOLD,
        colors::GOLD,
        colors::AMBER,
        colors::AMBER,
        colors::CRIMSON,
        colors::CRIMSON,
        colors::CRIMSON,
    ];

    for (i, line) in banner.lines().enumerate() {
        let color = gradient_colors.get(i).unwrap_or(&colors::GOLD);
        println!("{}", line.with(*color).bold());
    }

    let subtitle = "  ═════════════  RECOMMANDATIONS DE FILMS  ═════════════";
    println!("{}", subtitle.with(colors::DIM));
    println!();
}

// ═══════════════════════════════════════════════════════════════════════════════
// Status Indicators
// ═══════════════════════════════════════════════════════════════════════════════

fn print_status(symbol: &str, color: CtColor, message: &str) {
    println!(" {} {}", symbol.with(color).bold(), message.with(color));
}

pub fn print_success(message: &str) {
    print_status(box_chars::CHECK, colors::GREEN, message);
}

pub fn print_error(message: &str) {
    print_status(box_chars::CROSS_MARK, colors::RED, message);
}

pub fn print_warning(message: &str) {
    print_status("⚠", colors::AMBER, message);
}

pub fn print_info(message: &str) {
    print_status("ℹ", colors::BLUE, message);
}

// ═══════════════════════════════════════════════════════════════════════════════
// Section Headers
// ═══════════════════════════════════════════════════════════════════════════════

const SECTION_WIDTH: usize = 60;

pub fn print_section_header(title: &str) {
    let title_len = title.width();
    let padding = SECTION_WIDTH.saturating_sub(title_len + 4) / 2;

    println!();
    print!("{}", box_chars::ROUND_TOP_LEFT.with(colors::GOLD));
    print!(
        "{}",
        box_chars::SINGLE_HORIZONTAL
            .repeat(padding)
            .with(colors::GOLD)
    );
    print!(
        " {} ",
        title.with(colors::GOLD).bold().attribute(Attribute::Italic)
    );
    print!(
        "{}",
        box_chars::SINGLE_HORIZONTAL
            .repeat(SECTION_WIDTH.saturating_sub(title_len + 4 + padding))
            .with(colors::GOLD)
    );
    println!("{}", box_chars::ROUND_TOP_RIGHT.with(colors::GOLD));
}

pub fn print_section_footer() {
    print!("{}", box_chars::ROUND_BOTTOM_LEFT.with(colors::GOLD));
    print!(
        "{}",
        box_chars::SINGLE_HORIZONTAL
            .repeat(SECTION_WIDTH)
            .with(colors::GOLD)
    );
    println!("{}", box_chars::ROUND_BOTTOM_RIGHT.with(colors::GOLD));
    println!();
}

// ═══════════════════════════════════════════════════════════════════════════════
// Key-Value Display
// ═══════════════════════════════════════════════════════════════════════════════

pub fn print_key_value(key: &str, value: &str) {
    println!(
        "  {} {} {}",
        box_chars::BULLET.with(colors::AMBER),
        format!("{}:", key).with(colors::DIM),
        value.with(colors::WHITE)
    );
}

pub fn print_empty_list(message: &str) {
    println!(
        "  {} {}",
        box_chars::BULLET_EMPTY.with(colors::DIM),
        message.with(colors::DIM).attribute(Attribute::Italic)
    );
}

// ═══════════════════════════════════════════════════════════════════════════════
// Movie Cards
// ═══════════════════════════════════════════════════════════════════════════════

pub fn print_movie_card(rank: usize, movie: &MovieDisplay) {
    println!(
        "  {} {} {}",
        format!("{}.", rank).with(colors::GOLD).bold(),
        OrUnavailable(&movie.title).to_string().with(colors::WHITE).bold(),
        format!("({})", OrUnavailable(&movie.year)).with(colors::DIM)
    );
    println!(
        "     {} {}",
        "Genre".with(colors::DIM),
        OrUnavailable(&movie.genres).to_string().with(colors::CYAN)
    );
    println!(
        "     {} {}/10  {}",
        box_chars::STAR.with(colors::GOLD),
        OrUnavailable(&movie.rating),
        format!("({} votes)", OrUnavailable(&movie.vote_count)).with(colors::DIM)
    );
    println!(
        "     {} {}  {} {}",
        "Score".with(colors::DIM),
        score_label(movie.weighted_score).with(colors::GREEN),
        "Popularité".with(colors::DIM),
        OrUnavailable(&movie.popularity)
    );
    println!(
        "     {}",
        OrUnavailable(&movie.description)
            .to_string()
            .with(colors::WHITE)
            .attribute(Attribute::Italic)
    );
    println!();
}

/// Intro line then one card per movie, or the apology when nothing matched.
pub fn print_recommendation(recommendation: &Recommendation) {
    if recommendation.movies.is_empty() {
        print_empty_list(NO_RESULTS);
        return;
    }
    print_section_header("Recommandations");
    println!();
    println!("  {}", response_intro(&recommendation.filters).with(colors::AMBER));
    println!();
    for (i, movie) in recommendation.movies.iter().enumerate() {
        print_movie_card(i + 1, movie);
    }
    print_section_footer();
}

pub fn print_similar(reference: &str, movies: &[MovieDisplay]) {
    if movies.is_empty() {
        print_empty_list(&format!("Aucun film similaire à '{}'", reference));
        return;
    }
    print_section_header(&format!("Similaires à {}", reference));
    println!();
    for (i, movie) in movies.iter().enumerate() {
        print_movie_card(i + 1, movie);
    }
    print_section_footer();
}

// ═══════════════════════════════════════════════════════════════════════════════
// Table Display
// ═══════════════════════════════════════════════════════════════════════════════

pub struct TableBuilder {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    col_widths: Vec<usize>,
}

impl TableBuilder {
    pub fn new(headers: Vec<&str>) -> Self {
        let col_widths: Vec<usize> = headers.iter().map(|h| h.width()).collect();
        TableBuilder {
            headers: headers.into_iter().map(String::from).collect(),
            rows: Vec::new(),
            col_widths,
        }
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        for (i, cell) in row.iter().enumerate() {
            if i < self.col_widths.len() {
                self.col_widths[i] = self.col_widths[i].max(cell.width());
            }
        }
        self.rows.push(row);
    }

    fn print_border(&self, left: &str, junction: &str, right: &str) {
        print!("{}", left.with(colors::GOLD));
        for (i, width) in self.col_widths.iter().enumerate() {
            print!(
                "{}",
                box_chars::SINGLE_HORIZONTAL
                    .repeat(width + 2)
                    .with(colors::GOLD)
            );
            if i + 1 < self.col_widths.len() {
                print!("{}", junction.with(colors::GOLD));
            }
        }
        println!("{}", right.with(colors::GOLD));
    }

    pub fn print(&self) {
        self.print_border(
            box_chars::ROUND_TOP_LEFT,
            box_chars::T_TOP,
            box_chars::ROUND_TOP_RIGHT,
        );

        print!("{}", box_chars::SINGLE_VERTICAL.with(colors::GOLD));
        for (i, header) in self.headers.iter().enumerate() {
            let padding = self.col_widths[i] - header.width();
            print!(
                " {}{} ",
                header.clone().with(colors::GOLD).bold(),
                " ".repeat(padding)
            );
            print!("{}", box_chars::SINGLE_VERTICAL.with(colors::GOLD));
        }
        println!();

        self.print_border(box_chars::T_LEFT, box_chars::CROSS, box_chars::T_RIGHT);

        for row in &self.rows {
            print!("{}", box_chars::SINGLE_VERTICAL.with(colors::GOLD));
            for (i, cell) in row.iter().enumerate() {
                let width = self.col_widths.get(i).unwrap_or(&0);
                let padding = width.saturating_sub(cell.width());
                print!(
                    " {}{} ",
                    cell.clone().with(colors::WHITE),
                    " ".repeat(padding)
                );
                print!("{}", box_chars::SINGLE_VERTICAL.with(colors::GOLD));
            }
            println!();
        }

        self.print_border(
            box_chars::ROUND_BOTTOM_LEFT,
            box_chars::T_BOTTOM,
            box_chars::ROUND_BOTTOM_RIGHT,
        );
    }
}

pub fn print_catalog_page(page: &CatalogPage) {
    print_section_header(&format!("Films (page {}/{})", page.page, page.total_pages));
    if page.movies.is_empty() {
        print_empty_list("Le catalogue est vide");
        print_section_footer();
        return;
    }

    let mut table = TableBuilder::new(vec!["Titre", "Année", "Note", "Votes"]);
    for movie in &page.movies {
        table.add_row(vec![
            movie.title.clone(),
            OrUnavailable(&movie.release_year).to_string(),
            OrUnavailable(&movie.vote_average).to_string(),
            OrUnavailable(&movie.vote_count).to_string(),
        ]);
    }
    table.print();

    let footer = format!(
        "--- Page {}/{} ({} films) ---",
        page.page, page.total_pages, page.total_movies
    );
    println!("  {}", footer.with(colors::DIM));
    if page.page < page.total_pages {
        println!(
            "  {}",
            format!("Tapez 'list page {}' pour la suite", page.page + 1).with(colors::DIM)
        );
    }
    print_section_footer();
}

// ═══════════════════════════════════════════════════════════════════════════════
// Prompt Styling
// ═══════════════════════════════════════════════════════════════════════════════

pub fn get_prompt() -> String {
    format!(
        "{}{}{} ",
        "❯".with(colors::GOLD).bold(),
        "❯".with(colors::AMBER).bold(),
        "❯".with(colors::CRIMSON).bold(),
    )
}

// ═══════════════════════════════════════════════════════════════════════════════
// Welcome Message
// ═══════════════════════════════════════════════════════════════════════════════

pub fn print_welcome(lines: &[(&str, String)]) {
    print_banner();

    let box_width: usize = 64;

    print!("  {}", box_chars::DOUBLE_TOP_LEFT.with(colors::CRIMSON));
    print!(
        "{}",
        box_chars::DOUBLE_HORIZONTAL
            .repeat(box_width)
            .with(colors::CRIMSON)
    );
    println!("{}", box_chars::DOUBLE_TOP_RIGHT.with(colors::CRIMSON));

    for (key, value) in lines {
        print!("  {}", box_chars::DOUBLE_VERTICAL.with(colors::CRIMSON));
        let content = format!("  {} {}", format!("{}:", key).with(colors::DIM), value);
        let visible_len = key.width() + 2 + value.width() + 2;
        print!("{}", content);
        print!("{}", " ".repeat(box_width.saturating_sub(visible_len)));
        println!("{}", box_chars::DOUBLE_VERTICAL.with(colors::CRIMSON));
    }

    print!("  {}", box_chars::DOUBLE_VERTICAL.with(colors::CRIMSON));
    print!("{}", " ".repeat(box_width));
    println!("{}", box_chars::DOUBLE_VERTICAL.with(colors::CRIMSON));

    print!("  {}", box_chars::DOUBLE_VERTICAL.with(colors::CRIMSON));
    let help_msg = "  Décrivez le film que vous cherchez, ou tapez 'help'";
    print!("{}", help_msg.with(colors::DIM));
    print!("{}", " ".repeat(box_width.saturating_sub(help_msg.width())));
    println!("{}", box_chars::DOUBLE_VERTICAL.with(colors::CRIMSON));

    print!("  {}", box_chars::DOUBLE_BOTTOM_LEFT.with(colors::CRIMSON));
    print!(
        "{}",
        box_chars::DOUBLE_HORIZONTAL
            .repeat(box_width)
            .with(colors::CRIMSON)
    );
    println!("{}", box_chars::DOUBLE_BOTTOM_RIGHT.with(colors::CRIMSON));
    println!();
}

// ═══════════════════════════════════════════════════════════════════════════════
// Help Display
// ═══════════════════════════════════════════════════════════════════════════════

pub struct CommandHelp {
    pub name: &'static str,
    pub args: &'static str,
    pub description: &'static str,
}

pub fn print_help(commands: &[CommandHelp]) {
    println!();
    print_section_header("Commandes disponibles");
    println!();

    println!(
        "  {} {}",
        box_chars::DIAMOND.with(colors::GOLD),
        "Recherche".with(colors::GOLD).bold()
    );
    println!(
        "      {}  {}",
        "<texte libre>".with(colors::GREEN).bold(),
        "ex: \"un thriller méconnu des années 90\"".with(colors::WHITE)
    );
    println!();

    let vocabulary_commands: Vec<_> = commands
        .iter()
        .filter(|c| matches!(c.name, "add" | "reload"))
        .collect();

    let catalog_commands: Vec<_> = commands
        .iter()
        .filter(|c| matches!(c.name, "list" | "similar" | "import" | "stats"))
        .collect();

    let system_commands: Vec<_> = commands
        .iter()
        .filter(|c| matches!(c.name, "help" | "quit"))
        .collect();

    fn print_command_group(title: &str, commands: &[&CommandHelp], color: CtColor) {
        println!(
            "  {} {}",
            box_chars::DIAMOND.with(color),
            title.with(color).bold()
        );
        for cmd in commands {
            println!(
                "      {} {}  {}",
                cmd.name.with(colors::GREEN).bold(),
                cmd.args.with(colors::DIM),
                cmd.description.with(colors::WHITE)
            );
        }
        println!();
    }

    print_command_group("Catalogue", &catalog_commands, colors::CYAN);
    print_command_group("Vocabulaire", &vocabulary_commands, colors::AMBER);
    print_command_group("Système", &system_commands, colors::CRIMSON);

    print_section_footer();
}

// ═══════════════════════════════════════════════════════════════════════════════
// Goodbye Message
// ═══════════════════════════════════════════════════════════════════════════════

pub fn print_goodbye() {
    println!();
    println!(
        "  {} {}",
        "🎬".with(colors::GOLD),
        "Au revoir ! Bon film.".with(colors::AMBER).bold()
    );
    println!();
}
