//! docdir — Doctor Directory CLI
//!
//! Scriptable front-end over the same listing, filter panel and autocomplete
//! the TUI uses.
//!
//! Usage:
//!   cargo run -p docdir-cli -- --offline list --symptom headache --sort fees
//!   cargo run -p docdir-cli -- list --query '?specialties=Dentist,Cardiologist&mode=video'
//!   cargo run -p docdir-cli -- --offline suggest "derm"
//!   cargo run -p docdir-cli -- --offline specialties --filter ph
//!   cargo run -p docdir-cli -- map-symptom "lower back pain"

use std::{path::PathBuf, sync::Arc, time::Duration};

use clap::{Args, Parser, Subcommand};
use tokio::runtime::Handle;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use docdir_contracts::{
    config::DirectoryConfig,
    error::DirectoryResult,
    query::{self, QueryParams},
    suggest::{SearchCategory, SearchEvent},
};
use docdir_core::{
    card::DoctorCard, panel::FilterPanel, traits::SymptomMapping, Listing, ListingView,
    ParamUpdate,
};
use docdir_mapping::TomlSymptomMapping;
use docdir_remote::Sources;
use docdir_suggest::{Autocomplete, LocalIndex};

// ── CLI definition ────────────────────────────────────────────────────────────

/// docdir — browse a directory of doctors by name, symptom, specialty or clinic.
#[derive(Parser)]
#[command(
    name = "docdir",
    about = "Doctor directory browser",
    long_about = "Fetches the doctor list once, then filters and sorts it the same way\n\
                  the interactive listing does. State can be passed as a query string."
)]
struct Cli {
    /// TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// TOML symptom → specialty table (overrides the config's mapping_path).
    #[arg(long, global = true)]
    mapping: Option<PathBuf>,

    /// Use the built-in fixture doctors and symptoms instead of the network.
    #[arg(long, global = true)]
    offline: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the doctors matching the given filters.
    List(ListArgs),
    /// Run one autocomplete lookup and print the four suggestion groups.
    Suggest {
        /// Text typed into the search box.
        text: String,
    },
    /// Print the filter panel's specialty list.
    Specialties {
        /// Only show specialties containing this text.
        #[arg(long)]
        filter: Option<String>,
    },
    /// Print the specialties a symptom maps to.
    MapSymptom {
        symptom: String,
    },
}

#[derive(Args, Debug, Default)]
struct ListArgs {
    /// Starting state as a query string, e.g. '?symptom=tooth&sort=fees'.
    #[arg(long)]
    query: Option<String>,

    #[command(flatten)]
    search: SearchArgs,

    /// Comma-separated specialties; a doctor matches if it has any of them.
    #[arg(long)]
    specialties: Option<String>,

    /// Consultation mode: video or clinic.
    #[arg(long)]
    mode: Option<String>,

    /// Sort order: fees (ascending) or experience (descending).
    #[arg(long)]
    sort: Option<String>,
}

/// At most one search kind at a time, as in the search box.
#[derive(Args, Debug, Default)]
#[group(multiple = false)]
struct SearchArgs {
    /// Doctor name fragment.
    #[arg(long)]
    search: Option<String>,
    /// Exact specialty name.
    #[arg(long)]
    specialty: Option<String>,
    /// Symptom, resolved through the symptom table.
    #[arg(long)]
    symptom: Option<String>,
    /// Exact clinic name.
    #[arg(long)]
    clinic: Option<String>,
}

impl SearchArgs {
    fn event(&self) -> Option<SearchEvent> {
        let (term, category) = if let Some(t) = &self.search {
            (t, SearchCategory::Search)
        } else if let Some(t) = &self.specialty {
            (t, SearchCategory::Specialists)
        } else if let Some(t) = &self.symptom {
            (t, SearchCategory::Symptoms)
        } else if let Some(t) = &self.clinic {
            (t, SearchCategory::Clinics)
        } else {
            return None;
        };
        Some(SearchEvent::new(term.clone(), category))
    }
}

impl ListArgs {
    /// The updates these flags stand for, applied after `--query`.
    fn updates(&self) -> Vec<ParamUpdate> {
        let mut updates = Vec::new();
        if let Some(event) = self.search.event() {
            updates.push(ParamUpdate::Search(event));
        }
        if let Some(v) = &self.specialties {
            updates.push(ParamUpdate::set(query::SPECIALTIES, v.as_str()));
        }
        if let Some(v) = &self.mode {
            updates.push(ParamUpdate::set(query::MODE, v.as_str()));
        }
        if let Some(v) = &self.sort {
            updates.push(ParamUpdate::set(query::SORT, v.as_str()));
        }
        updates
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() {
    // Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("docdir error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> DirectoryResult<()> {
    let cfg = DirectoryConfig::load(cli.config.as_deref())?;
    let mapping_path = cli.mapping.or_else(|| cfg.mapping_path.clone());
    let mapping: Arc<dyn SymptomMapping> =
        Arc::new(TomlSymptomMapping::load(mapping_path.as_deref())?);

    if let Command::MapSymptom { symptom } = &cli.command {
        print_mapping(symptom, mapping.as_ref());
        return Ok(());
    }

    let sources = Sources::from_config(&cfg, cli.offline)?;
    let mut listing = Listing::new(mapping);
    listing.load(sources.doctors.as_ref()).await;

    match cli.command {
        Command::List(args) => run_list(listing, &args),
        Command::Suggest { text } => run_suggest(&listing, &sources, &cfg, &text).await,
        Command::Specialties { filter } => run_specialties(&listing, filter),
        Command::MapSymptom { .. } => {}
    }
    Ok(())
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// Restore `--query`, then apply the search and filter flags on top of it.
fn apply_list_args(listing: &mut Listing, args: &ListArgs) {
    if let Some(qs) = &args.query {
        listing.replace_params(QueryParams::parse(qs));
    }
    for update in args.updates() {
        listing.apply(update);
    }
}

fn run_list(mut listing: Listing, args: &ListArgs) {
    apply_list_args(&mut listing, args);

    match listing.view() {
        ListingView::Loading => println!("Loading doctors..."),
        ListingView::Empty => println!("No doctors found matching your criteria"),
        ListingView::Doctors(doctors) => {
            for doctor in &doctors {
                print_card(&DoctorCard::from_doctor(doctor));
            }
            println!("{} doctor(s)", doctors.len());
        }
    }
    println!("query: {}", listing.params());
}

async fn run_suggest(listing: &Listing, sources: &Sources, cfg: &DirectoryConfig, text: &str) {
    let index = Arc::new(LocalIndex::from_doctors(listing.doctors()));
    let (mut autocomplete, mut rx) = Autocomplete::new(
        index,
        Arc::clone(&sources.symptoms),
        Duration::from_millis(cfg.debounce_ms),
        cfg.suggestion_cap,
        Handle::current(),
    );

    autocomplete.set_input(text);
    if !autocomplete.is_pending() {
        println!("(empty query, no suggestions)");
        return;
    }

    while let Some(update) = rx.recv().await {
        if autocomplete.receive(update) {
            break;
        }
        debug!("dropped stale suggestion update");
    }

    let suggestions = autocomplete.suggestions();
    if suggestions.is_empty() {
        println!("No suggestions for '{}'", text);
        return;
    }
    for (category, items) in suggestions.groups() {
        if items.is_empty() {
            continue;
        }
        println!("{}:", category);
        for item in items {
            println!("  {}", item);
        }
    }
}

fn run_specialties(listing: &Listing, filter: Option<String>) {
    let mut panel = FilterPanel::from_doctors(listing.doctors());
    if let Some(term) = filter {
        panel.set_search_term(term);
    }
    for specialty in panel.visible_specialties() {
        let mark = if FilterPanel::is_checked(listing.params(), specialty) {
            "[x]"
        } else {
            "[ ]"
        };
        println!("{} {}", mark, specialty);
    }
}

fn print_mapping(symptom: &str, mapping: &dyn SymptomMapping) {
    println!("{} → {}", symptom, mapping.specialties_for(symptom).join(", "));
}

// ── Output ────────────────────────────────────────────────────────────────────

fn print_card(card: &DoctorCard) {
    let mut modes = Vec::new();
    if card.video_consult {
        modes.push("video");
    }
    if card.in_clinic {
        modes.push("in-clinic");
    }

    println!("({}) {}", card.avatar, card.name);
    println!("    {} · {} · {}", card.specialty, card.experience, card.fee);
    match (&card.clinic, &card.locality) {
        (Some(clinic), Some(locality)) => println!("    {}, {}", clinic, locality),
        (Some(clinic), None) => println!("    {}", clinic),
        (None, Some(locality)) => println!("    {}", locality),
        (None, None) => {}
    }
    if !modes.is_empty() {
        println!("    consult: {}", modes.join(", "));
    }
    println!();
}
