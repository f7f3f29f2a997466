use book_connect::app::{Action, App, Overlay};
use book_connect::catalog::Catalog;
use book_connect::config::Config;
use book_connect::filter::FilterCriteria;
use book_connect::logging;
use book_connect::theme::ThemeChoice;
use book_connect::ui::{self, search::SearchInputResult, settings::SettingsInputResult};
use clap::{Parser, Subcommand};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::path::PathBuf;

/// Browse a book catalog: search, page through results and read details
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to a JSON catalog file (defaults to the bundled sample)
    #[arg(short, long)]
    catalog: Option<PathBuf>,

    /// Path to the TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Books revealed per "Show more"
    #[arg(short = 'n', long, value_parser = clap::value_parser!(u16).range(1..))]
    page_size: Option<u16>,

    /// Start in day or night theme
    #[arg(short, long, value_enum)]
    theme: Option<ThemeChoice>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the TUI browser (default)
    Run,
    /// Load and validate the catalog, then print a summary
    Check,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match cli.config.clone().or_else(Config::default_path) {
        Some(path) => match Config::load(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {}", e.user_message());
                std::process::exit(1);
            }
        },
        None => Config::default(),
    };

    let _log_guard = logging::init(&logging::log_dir(), config.log_level.as_deref());

    let catalog_path = cli.catalog.clone().or_else(|| config.catalog.clone());
    let catalog = match &catalog_path {
        Some(path) => Catalog::load(path).await,
        None => Catalog::sample(),
    };
    let catalog = match catalog {
        Ok(catalog) => catalog,
        Err(e) => {
            tracing::error!(error = %e, "catalog load failed");
            eprintln!("Error: {}", e.user_message());
            std::process::exit(1);
        }
    };

    if catalog.is_empty() {
        tracing::warn!("catalog has no books");
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Check => {
            println!(
                "{}: {} books, {} authors, {} genres",
                catalog_path
                    .as_ref()
                    .map_or_else(|| "sample catalog".to_string(), |p| p.display().to_string()),
                catalog.len(),
                catalog.author_options().len(),
                catalog.genre_options().len()
            );
        }
        Commands::Run => {
            let page_size = cli
                .page_size
                .map(usize::from)
                .unwrap_or(config.page_size);
            let theme = cli
                .theme
                .or(config.theme_choice()?)
                .or_else(ThemeChoice::detect)
                .unwrap_or_default();
            tracing::info!(page_size, theme = theme.label(), "starting browser");

            let mut app = App::new(catalog, page_size, theme);

            // Init terminal
            let mut terminal = ratatui::init();

            // Main loop
            let result = run_app(&mut terminal, &mut app);

            // Restore terminal
            ratatui::restore();

            if let Err(e) = result {
                tracing::error!(error = %e, "ui loop failed");
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

fn run_app(
    terminal: &mut ratatui::DefaultTerminal,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        for signal in app.take_signals() {
            tracing::debug!(?signal, "signal");
        }

        terminal.draw(|frame| ui::render(app, frame))?;

        if app.should_quit {
            return Ok(());
        }

        // Poll for events with a 250ms timeout
        if event::poll(std::time::Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key(app, key);
                }
            }
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Ctrl+C always quits
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match &mut app.overlay {
        Overlay::Search(form) => {
            if let Some(result) = form.handle_key(key) {
                app.close_overlay();
                if let SearchInputResult::Submit(criteria) = result {
                    app.dispatch(Action::SubmitSearch(criteria));
                }
            }
            return;
        }
        Overlay::Settings(form) => {
            if let Some(result) = form.handle_key(key) {
                app.close_overlay();
                if let SettingsInputResult::Submit(choice) = result {
                    app.dispatch(Action::SubmitThemeChoice(choice));
                }
            }
            return;
        }
        // If help is showing, any key closes it
        Overlay::Help => {
            app.close_overlay();
            return;
        }
        Overlay::None => {}
    }

    if app.selection.selected().is_some() {
        handle_detail_key(app, key);
    } else {
        handle_list_key(app, key);
    }
}

fn handle_list_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
        }
        KeyCode::Char('?') => {
            app.overlay = Overlay::Help;
        }
        KeyCode::Char('/') => {
            app.open_search();
        }
        KeyCode::Char('t') => {
            app.open_settings();
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.list_next();
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.list_prev();
        }
        KeyCode::Home | KeyCode::Char('g') => {
            app.list_first();
        }
        KeyCode::End | KeyCode::Char('G') => {
            app.list_last();
        }
        KeyCode::Enter => {
            app.open_highlighted();
        }
        KeyCode::Char('m') | KeyCode::Char(' ') => {
            // The button is disabled once everything is revealed
            if app.more_control().enabled {
                app.dispatch(Action::RequestMorePages);
            }
        }
        KeyCode::Esc => {
            // Clear filters
            if !app.criteria.is_unconstrained() {
                app.dispatch(Action::SubmitSearch(FilterCriteria::default()));
            }
        }
        _ => {}
    }
}

fn handle_detail_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => {
            app.dispatch(Action::CloseDetail);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.scroll_down();
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.scroll_up();
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(app: &mut App, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn sample_app(page_size: usize) -> App {
        App::new(Catalog::sample().unwrap(), page_size, ThemeChoice::Day)
    }

    #[test]
    fn test_search_overlay_round_trip() {
        let mut app = sample_app(5);
        press(&mut app, KeyCode::Char('/'));
        assert!(matches!(app.overlay, Overlay::Search(_)));
        for c in "dune".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);
        assert!(matches!(app.overlay, Overlay::None));
        let titles: Vec<&str> = app.view.matches().iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["Dune", "Dune Messiah"]);

        // Esc on the list clears the search
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.view.matches().len(), app.catalog.len());
    }

    #[test]
    fn test_cancelled_search_changes_nothing() {
        let mut app = sample_app(5);
        press(&mut app, KeyCode::Char('/'));
        press(&mut app, KeyCode::Char('z'));
        press(&mut app, KeyCode::Esc);
        assert!(matches!(app.overlay, Overlay::None));
        assert_eq!(app.view.matches().len(), app.catalog.len());
    }

    #[test]
    fn test_show_more_key_stops_when_disabled() {
        let mut app = sample_app(5);
        let total = app.catalog.len();
        for _ in 0..10 {
            press(&mut app, KeyCode::Char('m'));
        }
        assert_eq!(app.view.visible().len(), total);
        assert_eq!(app.view.page(), total.div_ceil(5));
    }

    #[test]
    fn test_detail_open_and_close() {
        let mut app = sample_app(5);
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.detail_book().map(|b| b.title.as_str()), Some("Emma"));
        // list keys are inert while the detail is open
        press(&mut app, KeyCode::Char('m'));
        assert_eq!(app.view.page(), 1);
        press(&mut app, KeyCode::Esc);
        assert!(app.selection.selected().is_none());
    }

    #[test]
    fn test_detail_blocks_search_and_q_only_closes() {
        let mut app = sample_app(5);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('/'));
        assert!(matches!(app.overlay, Overlay::None));
        assert_eq!(app.detail_book().map(|b| b.title.as_str()), Some("Dune"));

        press(&mut app, KeyCode::Char('q'));
        assert!(app.selection.selected().is_none());
        assert!(!app.should_quit);
    }

    #[test]
    fn test_theme_settings() {
        let mut app = sample_app(5);
        press(&mut app, KeyCode::Char('t'));
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.theme, ThemeChoice::Night);
    }

    #[test]
    fn test_help_closes_on_any_key() {
        let mut app = sample_app(5);
        press(&mut app, KeyCode::Char('?'));
        assert!(matches!(app.overlay, Overlay::Help));
        press(&mut app, KeyCode::Char('x'));
        assert!(matches!(app.overlay, Overlay::None));
        assert!(!app.should_quit);
    }

    #[test]
    fn test_cli_parses_flags() {
        let cli = Cli::try_parse_from(["book-connect", "--theme", "night", "-n", "12", "check"]).unwrap();
        assert_eq!(cli.theme, Some(ThemeChoice::Night));
        assert_eq!(cli.page_size, Some(12));
        assert!(matches!(cli.command, Some(Commands::Check)));
        assert!(Cli::try_parse_from(["book-connect", "-n", "0"]).is_err());
    }
}
