//! Rendering.
//!
//! Layout:
//!   ┌─── search ──────────────────────────────────────────────────────────┐
//!   │  Search: <input>                                                    │
//!   │  ?symptom=headache&sort=fees                                        │
//!   ├─── filters ─────────────┬─── doctors ───────────────────────────────┤
//!   │  ▾ Sort by              │  (M) Dr. Meera Iyer                       │
//!   │  ▾ Specialities         │      Neurologist · 15 yrs exp. · ₹ 800    │
//!   │  ▾ Mode of consultation │      ...                                  │
//!   ├─────────────────────────┴───────────────────────────────────────────┤
//!   │  footer (key bindings)                                              │
//!   └─────────────────────────────────────────────────────────────────────┘
//!
//! The suggestion dropdown is drawn last, over the doctor list.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

use docdir_contracts::{
    query::{ConsultMode, SortKey},
    suggest::SearchCategory,
};
use docdir_core::{card::DoctorCard, panel::PanelSection, ListingView, LoadState};

use crate::app::{App, Focus, PanelRow};

const ACCENT: Color = Color::Cyan;

pub fn ui(f: &mut Frame, app: &App) {
    let full = f.area();

    let outer_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // search box + query string
            Constraint::Min(8),    // filters | doctors
            Constraint::Length(3), // footer
        ])
        .split(full);

    render_search(f, outer_chunks[0], app);

    let mid_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(32), Constraint::Percentage(68)])
        .split(outer_chunks[1]);

    render_panel(f, mid_chunks[0], app);
    render_doctors(f, mid_chunks[1], app);
    render_footer(f, outer_chunks[2], app);

    if app.autocomplete.is_visible() {
        render_suggestions(f, outer_chunks[0], full, app);
    }
}

fn border(focused: bool) -> Style {
    if focused {
        Style::default().fg(ACCENT)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

// ── Search box ────────────────────────────────────────────────────────────────

fn render_search(f: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == Focus::Search;
    let input = app.autocomplete.input();

    let mut first = vec![
        Span::styled("Search: ", Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)),
        Span::raw(input.to_string()),
    ];
    if input.is_empty() && !focused {
        first.push(Span::styled(
            "Search Symptoms, Doctors, Specialists, Clinics",
            Style::default().fg(Color::DarkGray),
        ));
    }
    if app.autocomplete.is_pending() {
        first.push(Span::styled("  …", Style::default().fg(Color::Yellow)));
    }

    let params = app.listing.params();
    let query_line = if params.is_empty() {
        Line::from(Span::styled("(no filters)", Style::default().fg(Color::DarkGray)))
    } else {
        Line::from(Span::styled(params.to_string(), Style::default().fg(Color::Gray)))
    };

    let paragraph = Paragraph::new(vec![Line::from(first), query_line]).block(
        Block::default()
            .title(" Doctor Directory ")
            .borders(Borders::ALL)
            .border_style(border(focused)),
    );
    f.render_widget(paragraph, area);

    if focused {
        let x = area.x + 1 + "Search: ".len() as u16 + input.chars().count() as u16;
        f.set_cursor_position((x.min(area.right().saturating_sub(2)), area.y + 1));
    }
}

fn render_suggestions(f: &mut Frame, anchor: Rect, full: Rect, app: &App) {
    let suggestions = app.autocomplete.suggestions();
    let highlighted = app.autocomplete.highlighted();

    let mut items: Vec<ListItem> = Vec::new();
    let mut flat = 0usize;
    let mut selected_line = None;

    if suggestions.is_empty() {
        items.push(ListItem::new(Span::styled(
            "No matches",
            Style::default().fg(Color::DarkGray),
        )));
    }
    for (category, entries) in suggestions.groups() {
        if entries.is_empty() {
            continue;
        }
        items.push(ListItem::new(Span::styled(
            category_title(category),
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD),
        )));
        for entry in entries {
            if highlighted == Some(flat) {
                selected_line = Some(items.len());
            }
            items.push(ListItem::new(format!("  {}", entry)));
            flat += 1;
        }
    }

    let height = (items.len() as u16 + 2).min(full.height.saturating_sub(anchor.bottom()));
    let width = anchor.width.saturating_sub(4).min(60);
    let area = Rect::new(anchor.x + 2, anchor.bottom(), width, height);

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(ACCENT)),
        )
        .highlight_style(Style::default().fg(Color::Black).bg(ACCENT));
    let mut state = ListState::default().with_selected(selected_line);

    f.render_widget(Clear, area);
    f.render_stateful_widget(list, area, &mut state);
}

fn category_title(category: SearchCategory) -> &'static str {
    match category {
        SearchCategory::Symptoms => "Symptoms",
        SearchCategory::Doctors => "Doctors",
        SearchCategory::Specialists => "Specialists",
        SearchCategory::Clinics => "Clinics",
        SearchCategory::Search => "Search",
    }
}

// ── Filter panel ──────────────────────────────────────────────────────────────

fn render_panel(f: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == Focus::Panel;
    let rows = app.panel_rows();

    let items: Vec<ListItem> = rows.iter().map(|row| panel_item(app, row)).collect();

    let title = if app.editing_filter {
        format!(" Filters  /{}▏ ", app.panel.search_term())
    } else if !app.panel.search_term().is_empty() {
        format!(" Filters  /{} ", app.panel.search_term())
    } else {
        " Filters ".to_string()
    };

    let list = List::new(items)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(border(focused)),
        )
        .highlight_style(if focused {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        });

    let mut state = ListState::default().with_selected(Some(app.panel_cursor));
    f.render_stateful_widget(list, area, &mut state);
}

fn panel_item<'a>(app: &App, row: &PanelRow) -> ListItem<'a> {
    let radio = |on: bool| if on { "(•) " } else { "( ) " };
    let check = |on: bool| if on { "[x] " } else { "[ ] " };
    let selected = app.is_selected(row);

    let line = match row {
        PanelRow::Header(section) => {
            let arrow = if app.panel.is_expanded(*section) { "▾ " } else { "▸ " };
            let name = match section {
                PanelSection::Sort => "Sort by",
                PanelSection::Specialties => "Specialities",
                PanelSection::Mode => "Mode of consultation",
            };
            Line::from(Span::styled(
                format!("{}{}", arrow, name),
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            ))
        }
        PanelRow::Sort(key) => {
            let label = match key {
                SortKey::Fees => "Price: Low-High",
                SortKey::Experience => "Experience: Most Experience first",
            };
            Line::from(format!("  {}{}", radio(selected), label))
        }
        PanelRow::Specialty(name) => Line::from(format!("  {}{}", check(selected), name)),
        PanelRow::Mode(mode) => {
            let label = match mode {
                Some(ConsultMode::Video) => "Video Consultation",
                Some(ConsultMode::Clinic) => "In-clinic Consultation",
                None => "All",
            };
            Line::from(format!("  {}{}", radio(selected), label))
        }
        PanelRow::ClearAll => Line::from(Span::styled(
            "Clear All",
            Style::default().fg(Color::Red),
        )),
    };
    ListItem::new(line)
}

// ── Doctor list ───────────────────────────────────────────────────────────────

fn render_doctors(f: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == Focus::Results;

    let fetched = match app.listing.load_state() {
        LoadState::Ready { fetched_at, .. } => {
            format!("  fetched {}", fetched_at.format("%H:%M:%S"))
        }
        LoadState::Loading => String::new(),
    };

    let block = |count: Option<usize>| {
        let title = match count {
            Some(n) => format!(" Doctors ({}){} ", n, fetched),
            None => " Doctors ".to_string(),
        };
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border(focused))
    };

    match app.listing.view() {
        ListingView::Loading => {
            let p = Paragraph::new(Span::styled(
                "Loading doctors...",
                Style::default().fg(Color::Yellow),
            ))
            .block(block(None));
            f.render_widget(p, area);
        }
        ListingView::Empty => {
            let p = Paragraph::new(Span::styled(
                "No doctors found matching your criteria",
                Style::default().fg(Color::DarkGray),
            ))
            .block(block(Some(0)));
            f.render_widget(p, area);
        }
        ListingView::Doctors(doctors) => {
            let width = area.width.saturating_sub(8) as usize;
            let items: Vec<ListItem> = doctors
                .iter()
                .skip(app.results_offset)
                .map(|d| card_item(&DoctorCard::from_doctor(d), width))
                .collect();
            let list = List::new(items).block(block(Some(doctors.len())));
            f.render_widget(list, area);
        }
    }
}

fn card_item<'a>(card: &DoctorCard, width: usize) -> ListItem<'a> {
    let mut lines = vec![Line::from(vec![
        Span::styled(
            format!("({}) ", card.avatar),
            Style::default().fg(Color::Black).bg(ACCENT),
        ),
        Span::styled(
            truncate(&card.name, width),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ])];

    lines.push(Line::from(vec![
        Span::raw("    "),
        Span::styled(card.specialty.clone(), Style::default().fg(Color::Gray)),
        Span::raw(" · "),
        Span::raw(card.experience.clone()),
        Span::raw(" · "),
        Span::styled(card.fee.clone(), Style::default().fg(Color::Green)),
    ]));

    let place = match (&card.clinic, &card.locality) {
        (Some(c), Some(l)) => format!("{}, {}", c, l),
        (Some(c), None) => c.clone(),
        (None, Some(l)) => l.clone(),
        (None, None) => String::new(),
    };
    if !place.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("    {}", truncate(&place, width)),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let mut modes = Vec::new();
    if card.video_consult {
        modes.push(Span::styled("    ▸ Video ", Style::default().fg(Color::Magenta)));
    }
    if card.in_clinic {
        let indent = if modes.is_empty() { "    " } else { "" };
        modes.push(Span::styled(
            format!("{}▸ In-clinic", indent),
            Style::default().fg(Color::Blue),
        ));
    }
    if !modes.is_empty() {
        lines.push(Line::from(modes));
    }

    lines.push(Line::from(""));
    ListItem::new(lines)
}

// ── Footer ────────────────────────────────────────────────────────────────────

fn render_footer(f: &mut Frame, area: Rect, app: &App) {
    let key = |k: &'static str| Span::styled(k, Style::default().fg(ACCENT));

    let mut spans: Vec<Span> = vec![key(" [Tab] "), Span::raw("Focus  ")];

    match app.focus {
        Focus::Search => {
            spans.extend([
                key("[↑↓] "),
                Span::raw("Highlight  "),
                key("[Enter] "),
                Span::raw("Search  "),
                key("[Esc] "),
                Span::raw("Close  "),
            ]);
        }
        Focus::Panel if app.editing_filter => {
            spans.extend([key("[Enter/Esc] "), Span::raw("Done  ")]);
        }
        Focus::Panel => {
            spans.extend([
                key("[↑↓] "),
                Span::raw("Move  "),
                key("[Space] "),
                Span::raw("Toggle  "),
                key("[/] "),
                Span::raw("Find specialty  "),
                key("[x] "),
                Span::raw("Clear all  "),
                key("[q] "),
                Span::raw("Quit"),
            ]);
        }
        Focus::Results => {
            spans.extend([
                key("[↑↓] "),
                Span::raw("Scroll  "),
                key("[x] "),
                Span::raw("Clear all  "),
                key("[q] "),
                Span::raw("Quit"),
            ]);
        }
    }
    spans.push(key("  [Ctrl-C] "));
    spans.push(Span::raw("Quit"));

    let footer = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(footer, area);
}

// ── Utility helpers ───────────────────────────────────────────────────────────

/// Truncate a string to at most `max` chars, appending "…" if truncated.
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}
