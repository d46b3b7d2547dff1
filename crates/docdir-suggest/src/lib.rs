//! # docdir-suggest
//!
//! The search box of the doctor directory.
//!
//! - [`index`] — doctor names, specialties and clinics matched in memory
//! - [`debounce`] — one pending timer at a time, results tagged with a
//!   monotonic sequence number so late answers can be dropped
//! - [`widget`] — the `Autocomplete` state machine the front-ends drive

pub mod debounce;
pub mod index;
pub mod widget;

pub use debounce::{Debouncer, Sequenced};
pub use index::LocalIndex;
pub use widget::{Autocomplete, SuggestionUpdate};

#[cfg(test)]
mod tests {
    use std::{
        sync::{
            atomic::{AtomicUsize, Ordering},
            Arc,
        },
        time::Duration,
    };

    use async_trait::async_trait;
    use tokio::{runtime::Handle, sync::mpsc::UnboundedReceiver, time};

    use docdir_contracts::{
        error::{DirectoryError, DirectoryResult},
        suggest::{SearchCategory, Suggestion, SuggestionSet},
    };
    use docdir_core::traits::SymptomSource;
    use docdir_remote::fixtures::{sample_doctors, StaticSymptomSource};

    use crate::{
        debounce::Sequenced,
        index::LocalIndex,
        widget::{Autocomplete, SuggestionUpdate},
    };

    const DELAY: Duration = Duration::from_millis(300);

    // ── Test doubles ──────────────────────────────────────────────────────────

    /// Counts calls and answers with the query echoed back.
    #[derive(Default)]
    struct CountingSource {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl SymptomSource for CountingSource {
        async fn search_symptoms(&self, query: &str) -> DirectoryResult<Vec<String>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![format!("{query} symptom")])
        }
    }

    /// Answers "a" slowly and everything else quickly.
    struct SlowSource;

    #[async_trait]
    impl SymptomSource for SlowSource {
        async fn search_symptoms(&self, query: &str) -> DirectoryResult<Vec<String>> {
            let wait = if query == "a" { 1000 } else { 10 };
            time::sleep(Duration::from_millis(wait)).await;
            Ok(vec![query.to_string()])
        }
    }

    struct FailingSource;

    #[async_trait]
    impl SymptomSource for FailingSource {
        async fn search_symptoms(&self, _query: &str) -> DirectoryResult<Vec<String>> {
            Err(DirectoryError::Fetch {
                url: "http://symptoms.invalid".to_string(),
                reason: "connection refused".to_string(),
            })
        }
    }

    fn sample_index() -> Arc<LocalIndex> {
        Arc::new(LocalIndex::from_doctors(&sample_doctors().unwrap()))
    }

    fn widget(
        symptoms: Arc<dyn SymptomSource>,
    ) -> (Autocomplete, UnboundedReceiver<SuggestionUpdate>) {
        Autocomplete::new(sample_index(), symptoms, DELAY, 3, Handle::current())
    }

    // ── 1. Local index ────────────────────────────────────────────────────────

    #[test]
    fn index_dedups_specialties_and_clinics_in_first_seen_order() {
        let index = sample_index();
        assert_eq!(index.doctor_count(), 8);

        let clinics = index.clinics();
        assert_eq!(
            clinics.iter().filter(|c| c.as_str() == "City Health Centre").count(),
            1
        );
        assert_eq!(clinics[0], "NeuroCare Clinic");

        let specialties = index.specialties();
        assert_eq!(
            specialties.iter().filter(|s| s.as_str() == "Dermatologist").count(),
            1
        );
        assert_eq!(&specialties[..3], ["Neurologist", "Dentist", "General Physician"]);
    }

    #[test]
    fn lookup_is_case_insensitive_and_capped() {
        let index = sample_index();

        let set = index.lookup("DR.", 3);
        assert_eq!(set.doctors.len(), 3);
        assert_eq!(set.doctors[0], "Dr. Meera Iyer");
        assert!(set.symptoms.is_empty());

        let set = index.lookup("clinic", 2);
        assert_eq!(set.clinics, vec!["NeuroCare Clinic", "Clear Vision Eye Clinic"]);

        let set = index.lookup("derma", 3);
        assert_eq!(set.specialists, vec!["Dermatologist"]);
    }

    // ── 2. Blank input ────────────────────────────────────────────────────────

    #[tokio::test(start_paused = true)]
    async fn blank_query_hides_panel_without_network_call() {
        let source = Arc::new(CountingSource::default());
        let (mut ac, mut rx) = widget(source.clone());

        ac.set_input("   ");
        time::sleep(DELAY * 2).await;

        assert!(!ac.is_visible());
        assert!(!ac.is_pending());
        assert!(ac.suggestions().is_empty());
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn clearing_input_cancels_pending_lookup() {
        let source = Arc::new(CountingSource::default());
        let (mut ac, mut rx) = widget(source.clone());

        ac.set_input("head");
        assert!(ac.is_pending());
        ac.set_input("");
        time::sleep(DELAY * 2).await;

        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
        assert!(rx.try_recv().is_err());
        assert!(!ac.is_visible());
    }

    // ── 3. Debounce ───────────────────────────────────────────────────────────

    #[tokio::test(start_paused = true)]
    async fn rapid_keystrokes_collapse_into_one_lookup() {
        let source = Arc::new(CountingSource::default());
        let (mut ac, mut rx) = widget(source.clone());

        for c in "derm".chars() {
            ac.push_char(c);
            time::sleep(Duration::from_millis(100)).await;
        }

        let update = rx.recv().await.unwrap();
        assert_eq!(update.sequence, ac.latest_sequence());
        assert_eq!(update.value.symptoms, vec!["derm symptom"]);
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);

        assert!(ac.receive(update));
        assert!(ac.is_visible());
        assert!(!ac.is_pending());
        assert_eq!(ac.suggestions().specialists, vec!["Dermatologist"]);
    }

    #[tokio::test(start_paused = true)]
    async fn nothing_is_sent_before_the_quiet_period() {
        let source = Arc::new(CountingSource::default());
        let (mut ac, mut rx) = widget(source.clone());

        ac.set_input("fever");
        time::sleep(Duration::from_millis(299)).await;
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
        assert!(rx.try_recv().is_err());

        time::sleep(Duration::from_millis(2)).await;
        assert!(rx.recv().await.is_some());
    }

    // ── 4. Out-of-order responses ─────────────────────────────────────────────

    #[tokio::test(start_paused = true)]
    async fn slow_stale_response_is_discarded() {
        let (mut ac, mut rx) = widget(Arc::new(SlowSource));

        ac.set_input("a");
        time::sleep(Duration::from_millis(350)).await;
        ac.set_input("ab");

        let update = rx.recv().await.unwrap();
        assert_eq!(update.value.symptoms, vec!["ab"]);
        assert!(ac.receive(update));

        // The slow "a" answer finishes later and must never arrive.
        let late = time::timeout(Duration::from_millis(2000), rx.recv()).await;
        assert!(late.is_err(), "stale response was delivered");
        assert_eq!(ac.suggestions().symptoms, vec!["ab"]);
    }

    #[tokio::test(start_paused = true)]
    async fn receive_rejects_superseded_sequence() {
        let (mut ac, _rx) = widget(Arc::new(CountingSource::default()));

        ac.set_input("den");
        let old = ac.latest_sequence();
        ac.set_input("dent");

        let stale = Sequenced {
            sequence: old,
            value: SuggestionSet {
                doctors: vec!["Dr. Stale".to_string()],
                ..SuggestionSet::default()
            },
        };
        assert!(!ac.receive(stale));
        assert!(!ac.is_visible());
        assert!(ac.suggestions().is_empty());
    }

    // ── 5. Symptom source failure ─────────────────────────────────────────────

    #[tokio::test(start_paused = true)]
    async fn symptom_failure_leaves_group_empty() {
        let (mut ac, mut rx) = widget(Arc::new(FailingSource));

        ac.set_input("dr. meera");
        let update = rx.recv().await.unwrap();
        assert!(update.value.symptoms.is_empty());
        assert_eq!(update.value.doctors, vec!["Dr. Meera Iyer"]);
    }

    #[tokio::test(start_paused = true)]
    async fn surrounding_spaces_take_part_in_matching() {
        let (mut ac, mut rx) = widget(Arc::new(FailingSource));

        ac.set_input("Meera ");
        let update = rx.recv().await.unwrap();
        assert_eq!(update.value.doctors, vec!["Dr. Meera Iyer"]);

        ac.set_input("Iyer ");
        let update = rx.recv().await.unwrap();
        assert!(update.value.doctors.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn symptom_group_is_capped() {
        let (mut ac, mut rx) = widget(Arc::new(StaticSymptomSource::sample(5)));

        ac.set_input("e");
        let update = rx.recv().await.unwrap();
        assert_eq!(update.value.symptoms.len(), 3);
        assert!(update.value.doctors.len() <= 3);
        assert!(update.value.clinics.len() <= 3);
    }

    // ── 6. Selection ──────────────────────────────────────────────────────────

    #[tokio::test(start_paused = true)]
    async fn selecting_suggestion_emits_category_and_hides_panel() {
        let (mut ac, mut rx) = widget(Arc::new(StaticSymptomSource::sample(5)));

        ac.set_input("head");
        let update = rx.recv().await.unwrap();
        assert!(ac.receive(update));
        assert_eq!(ac.suggestions().symptoms[0], "Headache");

        let event = ac.select(&Suggestion {
            category: SearchCategory::Symptoms,
            label: "Headache".to_string(),
        });
        assert_eq!(event.term, "Headache");
        assert_eq!(event.category, SearchCategory::Symptoms);
        assert_eq!(ac.input(), "Headache");
        assert!(!ac.is_visible());
        assert!(ac.suggestions().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn confirm_uses_highlight_or_free_text() {
        let (mut ac, mut rx) = widget(Arc::new(StaticSymptomSource::sample(5)));

        ac.set_input("smile");
        let update = rx.recv().await.unwrap();
        assert!(ac.receive(update));
        assert_eq!(ac.suggestions().clinics, vec!["Smile Dental Studio"]);

        ac.highlight_next();
        let event = ac.confirm();
        assert_eq!(event.category, SearchCategory::Clinics);
        assert_eq!(event.term, "Smile Dental Studio");

        ac.set_input("  something else ");
        let event = ac.confirm();
        assert_eq!(event.category, SearchCategory::Search);
        assert_eq!(event.term, "  something else ");
        assert!(!ac.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn highlight_wraps_over_flattened_list() {
        let (mut ac, mut rx) = widget(Arc::new(StaticSymptomSource::sample(5)));

        ac.highlight_next();
        assert_eq!(ac.highlighted(), None);

        ac.set_input("skin");
        let update = rx.recv().await.unwrap();
        assert!(ac.receive(update));
        // "Skin rash", "Itchy skin" and the "Skin Deep Clinic".
        assert_eq!(ac.suggestions().len(), 3);

        ac.highlight_prev();
        assert_eq!(ac.highlighted(), Some(2));
        ac.highlight_next();
        assert_eq!(ac.highlighted(), Some(0));
        assert_eq!(
            ac.highlighted_suggestion().map(|s| s.label),
            Some("Skin rash".to_string())
        );
    }

    #[tokio::test(start_paused = true)]
    async fn blur_discards_in_flight_results() {
        let source = Arc::new(CountingSource::default());
        let (mut ac, mut rx) = widget(source);

        ac.set_input("cough");
        ac.blur();
        time::sleep(DELAY * 2).await;

        assert!(rx.try_recv().is_err());
        assert!(!ac.is_visible());
        assert_eq!(ac.input(), "cough");
    }
}
