//! Listing page state and key handling.
//!
//! Everything here runs on the UI thread. The doctor fetch and the
//! autocomplete lookups run on the tokio runtime and report back over
//! channels that [`App::poll`] drains once per frame.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::{
    runtime::Handle,
    sync::{
        mpsc::UnboundedReceiver,
        oneshot::{self, error::TryRecvError},
    },
};
use tracing::debug;

use docdir_contracts::{
    config::DirectoryConfig,
    doctor::Doctor,
    error::{DirectoryError, DirectoryResult},
    query::{self, ConsultMode, SortKey},
    suggest::SearchEvent,
};
use docdir_core::{
    panel::{FilterPanel, PanelSection},
    Listing, ListingView, ParamUpdate,
};
use docdir_remote::Sources;
use docdir_suggest::{Autocomplete, LocalIndex, SuggestionUpdate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Search,
    Panel,
    Results,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Search => Focus::Panel,
            Focus::Panel => Focus::Results,
            Focus::Results => Focus::Search,
        }
    }
}

/// One selectable line of the filter panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelRow {
    Header(PanelSection),
    Sort(SortKey),
    Specialty(String),
    /// `None` is "All".
    Mode(Option<ConsultMode>),
    ClearAll,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

pub struct App {
    pub listing: Listing,
    pub autocomplete: Autocomplete,
    pub panel: FilterPanel,
    pub focus: Focus,
    pub panel_cursor: usize,
    /// Typing goes to the panel's specialty search box.
    pub editing_filter: bool,
    pub results_offset: usize,
    suggestions_rx: UnboundedReceiver<SuggestionUpdate>,
    load_rx: Option<oneshot::Receiver<DirectoryResult<Vec<Doctor>>>>,
}

impl App {
    /// Build the page and start the one-time doctor fetch on `handle`.
    pub fn new(listing: Listing, sources: &Sources, cfg: &DirectoryConfig, handle: Handle) -> Self {
        let (tx, rx) = oneshot::channel();
        let doctors = Arc::clone(&sources.doctors);
        handle.spawn(async move {
            let _ = tx.send(doctors.fetch_doctors().await);
        });

        let mut app = Self::without_fetch(listing, sources, cfg, handle);
        app.load_rx = Some(rx);
        app
    }

    fn without_fetch(
        listing: Listing,
        sources: &Sources,
        cfg: &DirectoryConfig,
        handle: Handle,
    ) -> Self {
        let (autocomplete, suggestions_rx) = Autocomplete::new(
            Arc::new(LocalIndex::default()),
            Arc::clone(&sources.symptoms),
            std::time::Duration::from_millis(cfg.debounce_ms),
            cfg.suggestion_cap,
            handle,
        );
        Self {
            listing,
            autocomplete,
            panel: FilterPanel::from_doctors(&[]),
            focus: Focus::Search,
            panel_cursor: 0,
            editing_filter: false,
            results_offset: 0,
            suggestions_rx,
            load_rx: None,
        }
    }

    /// Drain finished background work. Returns true if anything changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;

        if let Some(rx) = self.load_rx.as_mut() {
            let outcome = match rx.try_recv() {
                Ok(result) => Some(result),
                Err(TryRecvError::Empty) => None,
                Err(TryRecvError::Closed) => Some(Err(DirectoryError::Fetch {
                    url: String::new(),
                    reason: "doctor fetch task ended without a result".to_string(),
                })),
            };
            if let Some(result) = outcome {
                self.load_rx = None;
                self.finish_loading(result);
                changed = true;
            }
        }

        while let Ok(update) = self.suggestions_rx.try_recv() {
            changed |= self.autocomplete.receive(update);
        }
        changed
    }

    /// Record the doctor fetch and rebuild everything derived from the list.
    pub fn finish_loading(&mut self, result: DirectoryResult<Vec<Doctor>>) {
        self.listing.finish_loading(result);
        self.panel = FilterPanel::from_doctors(self.listing.doctors());
        self.autocomplete
            .set_index(Arc::new(LocalIndex::from_doctors(self.listing.doctors())));
        self.panel_cursor = 0;
    }

    /// Number of doctors in the current view.
    pub fn result_count(&self) -> usize {
        match self.listing.view() {
            ListingView::Doctors(doctors) => doctors.len(),
            ListingView::Loading | ListingView::Empty => 0,
        }
    }

    /// The filter panel as it is currently laid out.
    pub fn panel_rows(&self) -> Vec<PanelRow> {
        let mut rows = vec![PanelRow::Header(PanelSection::Sort)];
        if self.panel.is_expanded(PanelSection::Sort) {
            rows.push(PanelRow::Sort(SortKey::Fees));
            rows.push(PanelRow::Sort(SortKey::Experience));
        }

        rows.push(PanelRow::Header(PanelSection::Specialties));
        if self.panel.is_expanded(PanelSection::Specialties) {
            rows.extend(
                self.panel
                    .visible_specialties()
                    .into_iter()
                    .map(|s| PanelRow::Specialty(s.to_string())),
            );
        }

        rows.push(PanelRow::Header(PanelSection::Mode));
        if self.panel.is_expanded(PanelSection::Mode) {
            rows.push(PanelRow::Mode(Some(ConsultMode::Video)));
            rows.push(PanelRow::Mode(Some(ConsultMode::Clinic)));
            rows.push(PanelRow::Mode(None));
        }

        rows.push(PanelRow::ClearAll);
        rows
    }

    /// Whether a panel row reflects the current parameters.
    pub fn is_selected(&self, row: &PanelRow) -> bool {
        let params = self.listing.params();
        match row {
            PanelRow::Sort(key) => params.sort() == Some(*key),
            PanelRow::Specialty(name) => FilterPanel::is_checked(params, name),
            PanelRow::Mode(mode) => params.get(query::MODE) == mode.map(ConsultMode::as_str),
            PanelRow::Header(_) | PanelRow::ClearAll => false,
        }
    }

    // ── Key handling ──────────────────────────────────────────────────────────

    pub fn handle_key(&mut self, key: KeyEvent) -> Control {
        if key.kind != KeyEventKind::Press {
            return Control::Continue;
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Control::Quit;
        }
        if key.code == KeyCode::Tab {
            self.cycle_focus();
            return Control::Continue;
        }

        match self.focus {
            Focus::Search => {
                self.search_key(key.code);
                Control::Continue
            }
            Focus::Panel => self.panel_key(key.code),
            Focus::Results => self.results_key(key.code),
        }
    }

    fn cycle_focus(&mut self) {
        if self.focus == Focus::Search {
            self.autocomplete.blur();
        }
        self.editing_filter = false;
        self.focus = self.focus.next();
    }

    fn search_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char(c) => self.autocomplete.push_char(c),
            KeyCode::Backspace => self.autocomplete.backspace(),
            KeyCode::Down => self.autocomplete.highlight_next(),
            KeyCode::Up => self.autocomplete.highlight_prev(),
            KeyCode::Enter => {
                let event = self.autocomplete.confirm();
                self.search(event);
            }
            KeyCode::Esc => self.autocomplete.blur(),
            _ => {}
        }
    }

    fn panel_key(&mut self, code: KeyCode) -> Control {
        if self.editing_filter {
            let mut term = self.panel.search_term().to_string();
            match code {
                KeyCode::Char(c) => term.push(c),
                KeyCode::Backspace => {
                    term.pop();
                }
                KeyCode::Enter | KeyCode::Esc => self.editing_filter = false,
                _ => {}
            }
            self.panel.set_search_term(term);
            self.clamp_panel_cursor();
            return Control::Continue;
        }

        match code {
            KeyCode::Char('q') => return Control::Quit,
            KeyCode::Up | KeyCode::Char('k') => {
                self.panel_cursor = self.panel_cursor.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.panel_cursor += 1;
                self.clamp_panel_cursor();
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.activate_panel_row(),
            KeyCode::Char('/') => self.editing_filter = true,
            KeyCode::Char('x') => self.clear_all(),
            _ => {}
        }
        Control::Continue
    }

    fn results_key(&mut self, code: KeyCode) -> Control {
        match code {
            KeyCode::Char('q') => return Control::Quit,
            KeyCode::Up | KeyCode::Char('k') => {
                self.results_offset = self.results_offset.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.results_offset + 1 < self.result_count() {
                    self.results_offset += 1;
                }
            }
            KeyCode::Home => self.results_offset = 0,
            KeyCode::Char('x') => self.clear_all(),
            _ => {}
        }
        Control::Continue
    }

    fn clamp_panel_cursor(&mut self) {
        let last = self.panel_rows().len().saturating_sub(1);
        self.panel_cursor = self.panel_cursor.min(last);
    }

    fn activate_panel_row(&mut self) {
        let Some(row) = self.panel_rows().into_iter().nth(self.panel_cursor) else {
            return;
        };
        let update = match row {
            PanelRow::Header(section) => {
                self.panel.toggle_section(section);
                self.clamp_panel_cursor();
                return;
            }
            PanelRow::Sort(key) => FilterPanel::select_sort(key),
            PanelRow::Specialty(name) => FilterPanel::toggle_specialty(self.listing.params(), &name),
            PanelRow::Mode(mode) => FilterPanel::select_mode(mode),
            PanelRow::ClearAll => {
                self.clear_all();
                return;
            }
        };
        self.apply(update);
    }

    fn search(&mut self, event: SearchEvent) {
        debug!(term = %event.term, category = %event.category, "search committed");
        self.apply(ParamUpdate::Search(event));
    }

    fn clear_all(&mut self) {
        self.autocomplete.clear();
        self.apply(FilterPanel::clear_all());
    }

    fn apply(&mut self, update: ParamUpdate) {
        self.listing.apply(update);
        self.results_offset = 0;
    }
}
