use crate::catalog::{BookRecord, Catalog};
use crate::filter::{self, FilterCriteria};
use crate::pagination::ViewState;
use crate::theme::{ThemeChoice, ThemeColors};
use crate::ui::search::SearchForm;
use crate::ui::settings::SettingsForm;

/// Which overlay, if any, is drawn over the book list.
#[derive(Debug, Clone)]
pub enum Overlay {
    None,
    Search(SearchForm),
    Settings(SettingsForm),
    Help,
}

/// User intents the controller reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SubmitSearch(FilterCriteria),
    RequestMorePages,
    OpenDetail(String),
    CloseDetail,
    SubmitThemeChoice(ThemeChoice),
}

/// Notifications describing each state transition, drained by the UI loop.
///
/// Observation only: widgets read the `App` state these summarize, and the
/// loop just logs what it drains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signal {
    RenderList { count: usize },
    UpdateMoreControl { remaining: usize, enabled: bool },
    RenderDetail(Option<String>),
    ShowEmptyResultMessage(bool),
    SetThemeVariables(ThemeColors),
}

/// State of the "Show more" button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoreControl {
    pub remaining: usize,
    pub enabled: bool,
}

impl MoreControl {
    pub fn label(&self) -> String {
        format!("Show more ({})", self.remaining)
    }
}

/// The book whose detail overlay is open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveSelection {
    selected: Option<String>,
}

impl ActiveSelection {
    /// Select `book_id` if it is part of the current matches; otherwise nothing changes.
    pub fn open(&mut self, view: &ViewState, book_id: &str) -> bool {
        match view.find(book_id) {
            Some(book) => {
                self.selected = Some(book.id.clone());
                true
            }
            None => false,
        }
    }

    pub fn close(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }
}

/// Main application state.
pub struct App {
    pub catalog: Catalog,
    pub view: ViewState,
    pub selection: ActiveSelection,
    pub theme: ThemeChoice,
    /// Criteria of the last submitted search, used to prefill the form.
    pub criteria: FilterCriteria,

    pub overlay: Overlay,
    pub should_quit: bool,

    /// Cursor within the revealed books.
    pub list_selected: usize,
    pub detail_scroll: u16,

    pub status_msg: String,
    signals: Vec<Signal>,
}

impl App {
    pub fn new(catalog: Catalog, page_size: usize, theme: ThemeChoice) -> Self {
        let view = ViewState::new(catalog.books().to_vec(), page_size);
        let status_msg = format!("{} books loaded", catalog.len());
        let mut app = Self {
            catalog,
            view,
            selection: ActiveSelection::default(),
            theme,
            criteria: FilterCriteria::default(),

            overlay: Overlay::None,
            should_quit: false,

            list_selected: 0,
            detail_scroll: 0,

            status_msg,
            signals: Vec::new(),
        };
        app.signals.push(Signal::SetThemeVariables(theme.colors()));
        app.emit_list_signals();
        app
    }

    pub fn dispatch(&mut self, action: Action) {
        tracing::debug!(?action, "dispatch");
        match action {
            Action::SubmitSearch(criteria) => self.submit_search(criteria),
            Action::RequestMorePages => {
                self.request_more_pages();
            }
            Action::OpenDetail(id) => self.open_detail(&id),
            Action::CloseDetail => self.close_detail(),
            Action::SubmitThemeChoice(choice) => self.submit_theme_choice(choice),
        }
    }

    /// Drain the signals emitted since the last call.
    pub fn take_signals(&mut self) -> Vec<Signal> {
        std::mem::take(&mut self.signals)
    }

    /// Filter the whole catalog and start again from the first page.
    pub fn submit_search(&mut self, criteria: FilterCriteria) {
        let matches = filter::apply(&self.catalog, &criteria);
        tracing::info!(
            title = %criteria.title_query,
            author = ?criteria.author,
            genre = ?criteria.genre,
            found = matches.len(),
            "search applied"
        );
        self.view.replace_matches(matches);
        self.list_selected = 0;

        self.status_msg = if self.view.matches().is_empty() {
            "No results found. Your filters might be too narrow.".to_string()
        } else if criteria.is_unconstrained() {
            format!("{} books", self.view.matches().len())
        } else {
            format!("{} books match your search", self.view.matches().len())
        };
        self.criteria = criteria;
        self.emit_list_signals();
    }

    /// Reveal the next page. Returns `false` when everything is already shown.
    pub fn request_more_pages(&mut self) -> bool {
        if !self.view.advance() {
            tracing::debug!(page = self.view.page(), "no more pages");
            return false;
        }
        self.list_selected = self.view.range().start;
        self.status_msg = format!(
            "Showing {} of {} books",
            self.view.visible().len(),
            self.view.matches().len()
        );
        self.emit_list_signals();
        true
    }

    pub fn open_detail(&mut self, book_id: &str) {
        if self.selection.open(&self.view, book_id) {
            self.detail_scroll = 0;
            self.signals
                .push(Signal::RenderDetail(Some(book_id.to_string())));
        } else {
            tracing::debug!(book_id, "detail requested for a book outside the current matches");
        }
    }

    pub fn close_detail(&mut self) {
        self.selection.close();
        self.signals.push(Signal::RenderDetail(None));
    }

    pub fn submit_theme_choice(&mut self, choice: ThemeChoice) {
        tracing::info!(theme = choice.label(), "theme changed");
        self.theme = choice;
        self.signals.push(Signal::SetThemeVariables(choice.colors()));
    }

    pub fn more_control(&self) -> MoreControl {
        let remaining = self.view.remaining_count();
        MoreControl {
            remaining,
            enabled: remaining > 0,
        }
    }

    pub fn show_empty_message(&self) -> bool {
        self.view.matches().is_empty()
    }

    /// Book shown in the detail overlay, if one is open.
    pub fn detail_book(&self) -> Option<&BookRecord> {
        self.view.find(self.selection.selected()?)
    }

    /// Book under the list cursor.
    pub fn highlighted_book(&self) -> Option<&BookRecord> {
        self.view.visible().get(self.list_selected)
    }

    /// Open the detail overlay for the book under the cursor.
    pub fn open_highlighted(&mut self) {
        if let Some(id) = self.highlighted_book().map(|b| b.id.clone()) {
            self.dispatch(Action::OpenDetail(id));
        }
    }

    pub fn list_next(&mut self) {
        if self.list_selected + 1 < self.view.visible().len() {
            self.list_selected += 1;
        }
    }

    pub fn list_prev(&mut self) {
        self.list_selected = self.list_selected.saturating_sub(1);
    }

    pub fn list_first(&mut self) {
        self.list_selected = 0;
    }

    pub fn list_last(&mut self) {
        self.list_selected = self.view.visible().len().saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.detail_scroll = self.detail_scroll.saturating_add(1);
    }

    pub fn scroll_up(&mut self) {
        self.detail_scroll = self.detail_scroll.saturating_sub(1);
    }

    pub fn open_search(&mut self) {
        self.overlay = Overlay::Search(SearchForm::new(&self.catalog, &self.criteria));
    }

    pub fn open_settings(&mut self) {
        self.overlay = Overlay::Settings(SettingsForm::new(self.theme));
    }

    pub fn close_overlay(&mut self) {
        self.overlay = Overlay::None;
    }

    fn emit_list_signals(&mut self) {
        let more = self.more_control();
        self.signals.push(Signal::RenderList {
            count: self.view.visible().len(),
        });
        self.signals.push(Signal::UpdateMoreControl {
            remaining: more.remaining,
            enabled: more.enabled,
        });
        self.signals
            .push(Signal::ShowEmptyResultMessage(self.show_empty_message()));
    }
}
