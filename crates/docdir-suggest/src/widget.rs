//! The autocomplete state machine.
//!
//! The widget is driven from the UI thread: key handlers call
//! [`Autocomplete::set_input`] and friends, and the draw loop drains the
//! receiver returned by [`Autocomplete::new`] into [`Autocomplete::receive`].
//! Lookups run on the tokio runtime behind the debouncer.

use std::{sync::Arc, time::Duration};

use tokio::{
    runtime::Handle,
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
};
use tracing::{debug, warn};

use docdir_contracts::suggest::{SearchCategory, SearchEvent, Suggestion, SuggestionSet};
use docdir_core::traits::SymptomSource;

use crate::{
    debounce::{Debouncer, Sequenced},
    index::LocalIndex,
};

pub type SuggestionUpdate = Sequenced<SuggestionSet>;

pub struct Autocomplete {
    input: String,
    suggestions: SuggestionSet,
    visible: bool,
    pending: bool,
    highlighted: Option<usize>,
    index: Arc<LocalIndex>,
    symptoms: Arc<dyn SymptomSource>,
    cap: usize,
    debouncer: Debouncer,
    tx: UnboundedSender<SuggestionUpdate>,
}

impl Autocomplete {
    /// Create a widget and the channel its debounced lookups report on.
    pub fn new(
        index: Arc<LocalIndex>,
        symptoms: Arc<dyn SymptomSource>,
        delay: Duration,
        cap: usize,
        handle: Handle,
    ) -> (Self, UnboundedReceiver<SuggestionUpdate>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let widget = Self {
            input: String::new(),
            suggestions: SuggestionSet::default(),
            visible: false,
            pending: false,
            highlighted: None,
            index,
            symptoms,
            cap,
            debouncer: Debouncer::new(delay, handle),
            tx,
        };
        (widget, rx)
    }

    /// Swap in a new local index, e.g. once the doctor list has loaded.
    pub fn set_index(&mut self, index: Arc<LocalIndex>) {
        self.index = index;
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn suggestions(&self) -> &SuggestionSet {
        &self.suggestions
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    /// Sequence number of the most recent lookup.
    pub fn latest_sequence(&self) -> u64 {
        self.debouncer.latest()
    }

    /// Replace the input text and schedule a lookup for it.
    ///
    /// A blank query hides the panel at once and schedules nothing.
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
        self.highlighted = None;

        if self.input.trim().is_empty() {
            self.reset();
            return;
        }

        // Surrounding spaces take part in matching, like any other character.
        let query = self.input.to_lowercase();
        self.pending = true;
        let index = Arc::clone(&self.index);
        let symptoms = Arc::clone(&self.symptoms);
        let cap = self.cap;

        let sequence = self.debouncer.schedule(
            move || async move {
                let mut set = index.lookup(&query, cap);
                match symptoms.search_symptoms(&query).await {
                    Ok(mut terms) => {
                        terms.truncate(cap);
                        set.symptoms = terms;
                    }
                    Err(e) => warn!(query = %query, error = %e, "symptom search failed"),
                }
                set
            },
            self.tx.clone(),
        );
        debug!(sequence, input = %self.input, "suggestion lookup scheduled");
    }

    pub fn push_char(&mut self, c: char) {
        let mut text = std::mem::take(&mut self.input);
        text.push(c);
        self.set_input(text);
    }

    pub fn backspace(&mut self) {
        let mut text = std::mem::take(&mut self.input);
        text.pop();
        self.set_input(text);
    }

    /// Apply a finished lookup. Returns `false` for a stale update, which is
    /// dropped.
    pub fn receive(&mut self, update: SuggestionUpdate) -> bool {
        if !self.debouncer.is_current(update.sequence) {
            debug!(sequence = update.sequence, "ignoring stale suggestions");
            return false;
        }
        self.suggestions = update.value;
        self.visible = true;
        self.pending = false;
        self.highlighted = None;
        true
    }

    /// Move the highlight down the flattened suggestion list, wrapping.
    pub fn highlight_next(&mut self) {
        let len = self.suggestions.len();
        if !self.visible || len == 0 {
            return;
        }
        self.highlighted = Some(match self.highlighted {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        });
    }

    pub fn highlight_prev(&mut self) {
        let len = self.suggestions.len();
        if !self.visible || len == 0 {
            return;
        }
        self.highlighted = Some(match self.highlighted {
            Some(i) if i > 0 => i - 1,
            _ => len - 1,
        });
    }

    pub fn highlighted_suggestion(&self) -> Option<Suggestion> {
        let i = self.highlighted?;
        self.suggestions.flatten().into_iter().nth(i)
    }

    /// Commit a suggestion: the input takes its label and the panel closes.
    pub fn select(&mut self, suggestion: &Suggestion) -> SearchEvent {
        self.input = suggestion.label.clone();
        self.reset();
        SearchEvent::new(suggestion.label.clone(), suggestion.category)
    }

    /// Commit the highlighted suggestion, or the raw input as a free-text
    /// search when nothing is highlighted.
    pub fn confirm(&mut self) -> SearchEvent {
        if let Some(suggestion) = self.highlighted_suggestion() {
            return self.select(&suggestion);
        }
        let term = self.input.clone();
        self.reset();
        SearchEvent::new(term, SearchCategory::Search)
    }

    /// Hide and discard suggestions; any lookup still running becomes stale.
    pub fn blur(&mut self) {
        self.reset();
    }

    /// Empty the input and hide the panel.
    pub fn clear(&mut self) {
        self.input.clear();
        self.reset();
    }

    fn reset(&mut self) {
        self.debouncer.invalidate();
        self.suggestions = SuggestionSet::default();
        self.visible = false;
        self.pending = false;
        self.highlighted = None;
    }
}
