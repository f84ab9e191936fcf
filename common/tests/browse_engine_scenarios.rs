//! End-to-end scenarios for the browse engine, driven by a fake host that
//! records every command and owns a virtual clock for the debounce timers.

use std::time::Duration;

use common::{
    browse_engine::{BrowseEngine, DebounceTimer, EngineCommand, RequestTicket, ResultView},
    disease_entry::Entry,
    entries_query::{EntriesQuery, ValueScope},
    error::QueryError,
    filter::{ChainField, FilterDraft, SearchField, SortOrder},
    query_response::{EntriesPage, Pagination, SuggestionMatches, UniqueValues},
};

struct ArmedTimer {
    deadline: Duration,
    timer: DebounceTimer,
    epoch: u64,
}

/// Runs timers on a virtual clock and keeps every I/O command for inspection.
#[derive(Default)]
struct FakeHost {
    now: Duration,
    timers: Vec<ArmedTimer>,
    issued: Vec<(Duration, EngineCommand)>,
}

impl FakeHost {
    fn run(&mut self, commands: Vec<EngineCommand>) {
        for command in commands {
            match command {
                EngineCommand::ArmTimer { timer, epoch, delay } => {
                    self.timers.push(ArmedTimer { deadline: self.now + delay, timer, epoch })
                }
                other => self.issued.push((self.now, other)),
            }
        }
    }

    /// Moves the clock to `at_ms`, firing due timers in deadline order.
    fn advance_to(&mut self, engine: &mut BrowseEngine, at_ms: u64) {
        let target = Duration::from_millis(at_ms);
        loop {
            self.timers.sort_by_key(|t| t.deadline);
            if self.timers.first().is_none_or(|t| t.deadline > target) {
                break;
            }
            let due = self.timers.remove(0);
            self.now = due.deadline;
            let commands = engine.on_timer_fired(due.timer, due.epoch);
            self.run(commands);
        }
        self.now = target;
    }

    fn entries_fetches(&self) -> Vec<(RequestTicket, EntriesQuery)> {
        self.issued
            .iter()
            .filter_map(|(_, c)| match c {
                EngineCommand::FetchEntries { ticket, query } => Some((*ticket, query.clone())),
                _ => None,
            })
            .collect()
    }

    fn value_fetches(&self) -> Vec<(RequestTicket, ChainField, ValueScope)> {
        self.issued
            .iter()
            .filter_map(|(_, c)| match c {
                EngineCommand::FetchUniqueValues { ticket, field, scope } => Some((*ticket, *field, scope.clone())),
                _ => None,
            })
            .collect()
    }

    fn suggestion_fetches(&self) -> Vec<(Duration, RequestTicket, String)> {
        self.issued
            .iter()
            .filter_map(|(at, c)| match c {
                EngineCommand::FetchSuggestions { ticket, request } => Some((*at, *ticket, request.term.clone())),
                _ => None,
            })
            .collect()
    }

    fn clear(&mut self) {
        self.issued.clear();
    }
}

fn entry(disease: &str, antibody: &str, antigen: &str, epitope: Option<&str>) -> Entry {
    Entry {
        id: format!("{disease}/{antibody}/{antigen}"),
        disease: disease.into(),
        autoantibody: antibody.into(),
        autoantigen: antigen.into(),
        epitope: epitope.map(String::from),
        uniprot_id: None,
        entry_type: None,
        additional: Vec::new(),
        created_at: None,
        updated_at: None,
    }
}

fn page_of(data: Vec<Entry>) -> EntriesPage {
    let total = data.len() as u64;
    EntriesPage { data, pagination: Pagination { page: 1, limit: 20, total, pages: total.div_ceil(20) } }
}

fn scope(disease: Option<&str>, autoantibody: Option<&str>, autoantigen: Option<&str>) -> ValueScope {
    ValueScope {
        disease: disease.map(String::from),
        autoantibody: autoantibody.map(String::from),
        autoantigen: autoantigen.map(String::from),
    }
}

#[test]
fn change_disease_clears_descendants_and_fetches_two_scoped_sets() {
    let mut engine = BrowseEngine::new();
    let mut host = FakeHost::default();
    host.run(engine.change_disease("SLE"));
    host.run(engine.change_autoantibody("Anti-Sm"));
    host.run(engine.change_autoantigen("Sm"));
    host.run(engine.change_epitope("PPPGMRPP"));
    host.clear();

    for disease in ["Sjogren syndrome", "Myasthenia gravis"] {
        host.clear();
        host.run(engine.change_disease(disease));

        let draft = engine.draft();
        assert_eq!(draft.disease, disease);
        assert_eq!((draft.autoantibody.as_str(), draft.autoantigen.as_str(), draft.epitope.as_str()), ("", "", ""));

        let fetches = host.value_fetches();
        assert_eq!(fetches.len(), 2);
        assert_eq!(fetches[0].1, ChainField::Autoantibody);
        assert_eq!(fetches[1].1, ChainField::Autoantigen);
        for (_, _, s) in &fetches {
            assert_eq!(*s, scope(Some(disease), None, None));
        }
        assert_eq!(host.entries_fetches().len(), 1);
    }
}

#[test]
fn clearing_the_disease_fetches_no_dependent_sets() {
    let mut engine = BrowseEngine::new();
    let mut host = FakeHost::default();
    host.run(engine.change_disease("SLE"));
    host.clear();

    host.run(engine.change_disease(""));
    assert!(host.value_fetches().is_empty());
    assert!(engine.options(ChainField::Autoantibody).is_empty());
    let (_, query) = &host.entries_fetches()[0];
    assert_eq!(query.filters, FilterDraft::default());
}

#[test]
fn epitope_scope_excludes_autoantibody() {
    let mut engine = BrowseEngine::new();
    let mut host = FakeHost::default();
    host.run(engine.change_disease("SLE"));
    host.run(engine.change_autoantibody("Anti-dsDNA"));
    let antigen_fetch = host.value_fetches().last().cloned().unwrap();
    assert_eq!(antigen_fetch.1, ChainField::Autoantigen);
    assert_eq!(antigen_fetch.2, scope(Some("SLE"), Some("Anti-dsDNA"), None));

    host.clear();
    host.run(engine.change_autoantigen("dsDNA"));
    let fetches = host.value_fetches();
    assert_eq!(fetches.len(), 1);
    assert_eq!(fetches[0].1, ChainField::Epitope);
    assert_eq!(fetches[0].2, scope(Some("SLE"), None, Some("dsDNA")));
    assert_eq!(
        fetches[0].2.to_query_pairs(),
        vec![("disease", "SLE".to_string()), ("autoantigen", "dsDNA".to_string())]
    );
}

#[test]
fn clear_all_twice_matches_clear_all_once() {
    let mut engine = BrowseEngine::new();
    let mut host = FakeHost::default();
    host.run(engine.mount());
    let (ticket, _, _) = host.value_fetches()[0].clone();
    engine.on_unique_values_loaded(
        ticket,
        Ok(UniqueValues { field: ChainField::Disease, data: vec!["SLE".into(), "Graves disease".into()] }),
    );
    host.run(engine.change_disease("SLE"));
    for (ticket, field, _) in host.value_fetches().into_iter().skip(1) {
        engine.on_unique_values_loaded(ticket, Ok(UniqueValues { field, data: vec!["x".into()] }));
    }
    host.run(engine.set_search_text("lupus"));

    let snapshot = |engine: &BrowseEngine| {
        (
            engine.draft().clone(),
            engine.applied().clone(),
            ChainField::ALL.map(|f| engine.options(f).to_vec()),
        )
    };

    host.run(engine.clear_all());
    let once = snapshot(&engine);
    host.run(engine.clear_all());
    let twice = snapshot(&engine);

    assert_eq!(once, twice);
    assert_eq!(once.0, FilterDraft::default());
    assert_eq!(once.1, FilterDraft::default());
    assert_eq!(once.2[0], vec!["SLE".to_string(), "Graves disease".to_string()]);
    assert!(once.2[1..].iter().all(|values| values.is_empty()));

    let (_, last_query) = host.entries_fetches().pop().unwrap();
    assert_eq!(last_query, EntriesQuery::first_page(FilterDraft::default()));
}

#[test]
fn keystrokes_inside_the_debounce_window_coalesce_into_one_fetch() {
    let mut engine = BrowseEngine::new();
    let mut host = FakeHost::default();
    for (at, text) in [(0, "lu"), (100, "lup"), (200, "lupu"), (300, "lupus")] {
        host.advance_to(&mut engine, at);
        host.run(engine.set_search_text(text));
    }
    host.advance_to(&mut engine, 549);
    assert!(host.suggestion_fetches().is_empty());

    host.advance_to(&mut engine, 2_000);
    let fetches = host.suggestion_fetches();
    assert_eq!(fetches.len(), 1);
    assert_eq!(fetches[0].0, Duration::from_millis(550));
    assert_eq!(fetches[0].2, "lupus");
    assert!(engine.suggestions_visible());
    assert!(host.entries_fetches().is_empty());
    assert_eq!(engine.applied().search, "lupus");
}

#[test]
fn suggestions_group_the_raw_matches() {
    let mut engine = BrowseEngine::new();
    let mut host = FakeHost::default();
    host.run(engine.set_search_text("anti"));
    host.advance_to(&mut engine, 250);
    let (_, ticket, _) = host.suggestion_fetches()[0].clone();

    let raw = vec![
        entry("SLE", "Anti-Sm", "Sm", None),
        entry("SLE", "Anti-dsDNA", "dsDNA", Some("KRSR")),
        entry("Sjogren syndrome", "Anti-Ro60", "Ro60", None),
    ];
    engine.on_suggestions_loaded(ticket, Ok(SuggestionMatches { data: raw, count: 3 }));

    assert!(!engine.suggestions_loading());
    assert_eq!(engine.suggestions().values(ChainField::Disease), &["SLE".to_string(), "Sjogren syndrome".to_string()]);
    assert_eq!(engine.suggestions().values(ChainField::Epitope), &["KRSR".to_string()]);

    host.run(engine.select_suggestion(ChainField::Autoantibody, "Anti-Ro60"));
    assert!(!engine.suggestions_visible());
    let (_, query) = host.entries_fetches().pop().unwrap();
    assert_eq!(query.page, 1);
    assert_eq!(query.filters.search_field, SearchField::Autoantibody);
    let pairs = query.to_query_pairs();
    assert!(pairs.contains(&("search", "Anti-Ro60".to_string())));
    assert!(pairs.contains(&("field", "autoantibody".to_string())));
}

#[test]
fn failed_suggestion_lookup_just_hides_the_panel() {
    let mut engine = BrowseEngine::new();
    let mut host = FakeHost::default();
    host.run(engine.set_search_text("lupus"));
    host.advance_to(&mut engine, 300);
    let (_, ticket, _) = host.suggestion_fetches()[0].clone();
    engine.on_suggestions_loaded(ticket, Err(QueryError::network("503: unavailable")));

    assert!(!engine.suggestions_visible());
    assert!(engine.suggestions().is_empty());
    assert_eq!(engine.results_error(), None);
}

#[test]
fn enter_with_all_fields_sends_no_field_parameter() {
    let mut engine = BrowseEngine::new();
    let mut host = FakeHost::default();
    host.run(engine.set_search_text("  lupus "));
    host.run(engine.submit_search());

    let fetches = host.entries_fetches();
    assert_eq!(fetches.len(), 1);
    let pairs = fetches[0].1.to_query_pairs();
    assert!(pairs.contains(&("search", "lupus".to_string())));
    assert!(pairs.contains(&("page", "1".to_string())));
    assert!(pairs.iter().all(|(k, _)| *k != "field"));

    // pending debounce timers were cancelled by the submission
    host.advance_to(&mut engine, 5_000);
    assert!(host.suggestion_fetches().is_empty());
}

#[test]
fn blank_submission_is_ignored() {
    let mut engine = BrowseEngine::new();
    engine.set_search_text("   ");
    assert!(engine.submit_search().is_empty());
    assert!(!engine.has_interacted());
}

#[test]
fn toggle_sort_flips_and_flips_back() {
    let mut engine = BrowseEngine::new();
    engine.toggle_sort("disease");
    assert_eq!(engine.draft().sort_order, SortOrder::Desc);
    engine.toggle_sort("disease");
    assert_eq!(engine.draft().sort_order, SortOrder::Asc);

    engine.toggle_sort("disease");
    let commands = engine.toggle_sort("autoantigen");
    assert_eq!(engine.draft().sort_by, "autoantigen");
    assert_eq!(engine.draft().sort_order, SortOrder::Asc);
    match commands.as_slice() {
        [EngineCommand::FetchEntries { query, .. }] => {
            assert_eq!(query.filters.sort_by, "autoantigen");
            assert_eq!(query.page, 1);
        }
        other => panic!("unexpected commands {other:?}"),
    }
}

#[test]
fn empty_page_after_interaction_is_no_results() {
    let mut engine = BrowseEngine::new();
    let mut host = FakeHost::default();
    host.run(engine.mount());
    assert_eq!(engine.result_view(), ResultView::InitialEmpty);

    host.run(engine.change_disease("Unknown"));
    assert_eq!(engine.result_view(), ResultView::Loading);
    let (ticket, _) = host.entries_fetches()[0].clone();
    engine.on_entries_loaded(ticket, Ok(page_of(Vec::new())));

    assert!(engine.has_interacted());
    assert_eq!(engine.result_view(), ResultView::NoResults);
}

#[test]
fn dismissing_a_first_query_failure_shows_no_results() {
    let mut engine = BrowseEngine::new();
    let mut host = FakeHost::default();
    host.run(engine.change_disease("SLE"));
    let (ticket, _) = host.entries_fetches()[0].clone();
    engine.on_entries_loaded(ticket, Err(QueryError::network("timed out")));
    assert_eq!(engine.result_view(), ResultView::Error("timed out".into()));

    engine.dismiss_error();
    assert!(engine.has_interacted());
    assert_eq!(engine.result_view(), ResultView::NoResults);
}

#[test]
fn paging_keeps_the_applied_filters() {
    let mut engine = BrowseEngine::new();
    let mut host = FakeHost::default();
    host.run(engine.change_disease("SLE"));
    host.run(engine.set_field(common::filter::FilterField::Type, "IgG", true));
    host.clear();

    host.run(engine.go_to_page(4));
    let (_, query) = host.entries_fetches()[0].clone();
    assert_eq!(query.page, 4);
    assert_eq!(query.filters.disease, "SLE");
    assert_eq!(query.filters.entry_type, "IgG");
    assert_eq!(engine.draft().entry_type, "IgG");
}

#[test]
fn late_response_never_overwrites_a_newer_one() {
    let mut engine = BrowseEngine::new();
    let mut host = FakeHost::default();
    host.run(engine.change_disease("SLE"));
    host.run(engine.change_disease("Graves disease"));

    let fetches = host.entries_fetches();
    let (old_ticket, _) = fetches[0].clone();
    let (new_ticket, _) = fetches[1].clone();
    engine.on_entries_loaded(new_ticket, Ok(page_of(vec![entry("Graves disease", "TRAb", "TSHR", None)])));
    engine.on_entries_loaded(old_ticket, Ok(page_of(vec![entry("SLE", "Anti-Sm", "Sm", None)])));
    assert_eq!(engine.entries()[0].disease, "Graves disease");

    let antibody_fetches = host
        .value_fetches()
        .into_iter()
        .filter(|(_, f, _)| *f == ChainField::Autoantibody)
        .collect::<Vec<_>>();
    let stale = antibody_fetches[0].0;
    let fresh = antibody_fetches[1].0;
    engine.on_unique_values_loaded(fresh, Ok(UniqueValues { field: ChainField::Autoantibody, data: vec!["TRAb".into()] }));
    engine.on_unique_values_loaded(stale, Ok(UniqueValues { field: ChainField::Autoantibody, data: vec!["Anti-Sm".into()] }));
    assert_eq!(engine.options(ChainField::Autoantibody), &["TRAb".to_string()]);
}

#[test]
fn response_for_a_cleared_field_is_dropped() {
    let mut engine = BrowseEngine::new();
    let mut host = FakeHost::default();
    host.run(engine.change_disease("SLE"));
    let (ticket, field, _) = host.value_fetches()[0].clone();
    host.run(engine.clear_all());

    engine.on_unique_values_loaded(ticket, Ok(UniqueValues { field, data: vec!["Anti-Sm".into()] }));
    assert!(engine.options(ChainField::Autoantibody).is_empty());
}

#[test]
fn dependent_value_failure_is_scoped_to_its_field() {
    let mut engine = BrowseEngine::new();
    let mut host = FakeHost::default();
    host.run(engine.change_disease("SLE"));
    let fetches = host.value_fetches();
    let (antibody, _, _) = fetches[0].clone();
    let (antigen, _, _) = fetches[1].clone();

    engine.on_unique_values_loaded(antibody, Err(QueryError::network("502: bad gateway")));
    engine.on_unique_values_loaded(antigen, Ok(UniqueValues { field: ChainField::Autoantigen, data: vec!["Sm".into()] }));

    assert_eq!(engine.field_error(ChainField::Autoantibody), Some("502: bad gateway"));
    assert_eq!(engine.field_error(ChainField::Autoantigen), None);
    assert_eq!(engine.options(ChainField::Autoantigen), &["Sm".to_string()]);
    assert_eq!(engine.draft().disease, "SLE");
    assert_eq!(engine.results_error(), None);
}

#[test]
fn nothing_lands_after_unmount() {
    let mut engine = BrowseEngine::new();
    let mut host = FakeHost::default();
    host.run(engine.change_disease("SLE"));
    host.run(engine.set_search_text("lupus"));
    engine.unmount();

    let (ticket, _) = host.entries_fetches()[0].clone();
    engine.on_entries_loaded(ticket, Ok(page_of(vec![entry("SLE", "Anti-Sm", "Sm", None)])));
    assert!(engine.entries().is_empty());

    host.advance_to(&mut engine, 1_000);
    assert!(host.suggestion_fetches().is_empty());
    assert_eq!(engine.applied().search, "");
    assert!(engine.change_autoantibody("Anti-Sm").is_empty());
}
