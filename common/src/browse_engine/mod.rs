//! Cascading filter and suggestion engine behind the disease browse page.
//!
//! The engine holds the filter draft, the applied filters, the dependent value
//! sets of the disease → autoantibody → autoantigen → epitope chain and the
//! live suggestion index. It performs no I/O: every operation returns the
//! [`EngineCommand`]s the host must run, and the host reports results back
//! through the `on_*` methods together with the ticket it was given.

mod commands;
pub mod constants;
mod debounce;
mod dependent_values;
mod suggestion_index;
mod view;

pub use commands::{DebounceTimer, EngineCommand, RequestTarget, RequestTicket};
pub use dependent_values::ValueSet;
pub use suggestion_index::{SuggestionGroup, SuggestionIndex};
pub use view::ResultView;

use commands::RequestGenerations;
use constants::MIN_SUGGESTION_TERM_LEN;
use debounce::SearchDebounce;
use dependent_values::DependentValues;

use crate::{
    disease_entry::Entry,
    entries_query::{EntriesQuery, SuggestionRequest, ValueScope},
    error::QueryError,
    filter::{AppliedFilters, ChainField, FilterChip, FilterDraft, FilterField, SearchField},
    query_response::{EntriesPage, Pagination, StatisticsOverview, SuggestionMatches, UniqueValues},
};

#[derive(Debug, Clone, Default)]
pub struct BrowseEngine {
    draft: FilterDraft,
    /// Drives the filter chips. Moves ahead of `acknowledged` while a query is in flight.
    applied: AppliedFilters,
    /// Filters of the last query that succeeded.
    acknowledged: AppliedFilters,
    pending_query: Option<EntriesQuery>,
    entries: Vec<Entry>,
    pagination: Pagination,
    has_interacted: bool,
    results_error: Option<String>,
    values: DependentValues,
    suggestions: SuggestionIndex,
    suggestions_visible: bool,
    suggestions_loading: bool,
    statistics: Option<StatisticsOverview>,
    requests: RequestGenerations,
    debounce: SearchDebounce,
    unmounted: bool,
}

impl BrowseEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the root disease options and the statistics overview. Entries
    /// are only fetched after the first interaction.
    pub fn mount(&mut self) -> Vec<EngineCommand> {
        if self.unmounted {
            return Vec::new();
        }
        let mut commands = vec![self.fetch_values(ChainField::Disease, ValueScope::unscoped())];
        let ticket = self.requests.issue(RequestTarget::Statistics);
        commands.push(EngineCommand::FetchStatistics { ticket });
        commands
    }

    /// Stops every later response and timer from touching the state.
    pub fn unmount(&mut self) {
        self.unmounted = true;
        self.debounce.cancel_all();
        self.suggestions_visible = false;
        self.suggestions_loading = false;
    }

    pub fn is_unmounted(&self) -> bool {
        self.unmounted
    }

    /// Writes `value` into the draft. With `apply_immediately` the draft becomes
    /// the applied filter set and page 1 is queried; without it only the
    /// free-text search schedules anything (its debounce timers).
    pub fn set_field(&mut self, field: FilterField, value: impl Into<String>, apply_immediately: bool) -> Vec<EngineCommand> {
        if self.unmounted {
            return Vec::new();
        }
        let value = value.into();
        if field == FilterField::Search && !apply_immediately {
            return self.set_search_text(value);
        }
        self.draft.set(field, value);
        if apply_immediately { self.apply_draft() } else { Vec::new() }
    }

    /// Keystroke in the search box: restarts both debounce timers.
    pub fn set_search_text(&mut self, text: impl Into<String>) -> Vec<EngineCommand> {
        if self.unmounted {
            return Vec::new();
        }
        self.draft.search = text.into();
        let mut commands = vec![self.debounce.restart(DebounceTimer::ApplySearch)];
        if term_is_long_enough(&self.draft.search) {
            commands.push(self.debounce.restart(DebounceTimer::Suggestions));
        } else {
            self.debounce.cancel(DebounceTimer::Suggestions);
            // short terms never reach the suggestion timer; the panel closes now
            self.hide_suggestions();
        }
        commands
    }

    pub fn set_search_field(&mut self, field: SearchField) {
        self.draft.search_field = field;
    }

    pub fn change_disease(&mut self, value: impl Into<String>) -> Vec<EngineCommand> {
        self.change_chain(ChainField::Disease, value.into())
    }

    pub fn change_autoantibody(&mut self, value: impl Into<String>) -> Vec<EngineCommand> {
        self.change_chain(ChainField::Autoantibody, value.into())
    }

    pub fn change_autoantigen(&mut self, value: impl Into<String>) -> Vec<EngineCommand> {
        self.change_chain(ChainField::Autoantigen, value.into())
    }

    pub fn change_epitope(&mut self, value: impl Into<String>) -> Vec<EngineCommand> {
        self.change_chain(ChainField::Epitope, value.into())
    }

    fn change_chain(&mut self, field: ChainField, value: String) -> Vec<EngineCommand> {
        if self.unmounted {
            return Vec::new();
        }
        self.draft.set(field.into(), value);
        for &descendant in field.descendants() {
            self.draft.set(descendant.into(), "");
            self.drop_values(descendant);
        }
        let mut commands = self.apply_draft();

        if self.draft.chain_value(field).trim().is_empty() {
            return commands;
        }
        for (child, scope_fields) in dependent_fetches(field) {
            if scope_fields.iter().any(|f| self.draft.chain_value(*f).trim().is_empty()) {
                continue;
            }
            let scope = scope_fields
                .iter()
                .fold(ValueScope::unscoped(), |scope, f| scope.with(*f, self.draft.chain_value(*f)));
            commands.push(self.fetch_values(*child, scope));
        }
        commands
    }

    /// Back to defaults: unfiltered first page, only the disease options kept.
    pub fn clear_all(&mut self) -> Vec<EngineCommand> {
        if self.unmounted {
            return Vec::new();
        }
        self.draft = FilterDraft::default();
        self.applied = AppliedFilters::default();
        self.acknowledged = AppliedFilters::default();
        for &field in ChainField::Disease.descendants() {
            self.drop_values(field);
        }
        self.debounce.cancel_all();
        self.hide_suggestions();
        self.results_error = None;
        self.apply_draft()
    }

    /// Same column flips the order, a new column starts ascending.
    pub fn toggle_sort(&mut self, field: &str) -> Vec<EngineCommand> {
        if self.unmounted {
            return Vec::new();
        }
        if self.draft.sort_by == field {
            self.draft.sort_order = self.draft.sort_order.flipped();
        } else {
            self.draft.sort_by = field.to_string();
            self.draft.sort_order = Default::default();
        }
        self.apply_draft()
    }

    /// Search button or Enter. Ignored while the trimmed term is empty.
    pub fn submit_search(&mut self) -> Vec<EngineCommand> {
        if self.unmounted {
            return Vec::new();
        }
        let term = self.draft.search.trim();
        if term.is_empty() {
            return Vec::new();
        }
        self.draft.search = term.to_string();
        self.debounce.cancel_all();
        self.hide_suggestions();
        self.apply_draft()
    }

    pub fn select_suggestion(&mut self, section: ChainField, value: impl Into<String>) -> Vec<EngineCommand> {
        if self.unmounted {
            return Vec::new();
        }
        self.draft.search_field = section.into();
        self.draft.search = value.into();
        self.debounce.cancel_all();
        self.hide_suggestions();
        self.apply_draft()
    }

    /// Re-queries the applied filters at `page`. No filter is reset.
    pub fn go_to_page(&mut self, page: u64) -> Vec<EngineCommand> {
        if self.unmounted {
            return Vec::new();
        }
        self.has_interacted = true;
        vec![self.fetch_entries(EntriesQuery::page(self.applied.clone(), page))]
    }

    /// Current page again, used after a create, update or delete.
    pub fn refresh(&mut self) -> Vec<EngineCommand> {
        if self.unmounted || !self.has_interacted {
            return Vec::new();
        }
        let page = self.pagination.page;
        self.go_to_page(page)
    }

    pub fn hide_suggestions(&mut self) {
        self.suggestions_visible = false;
        self.suggestions_loading = false;
        self.requests.invalidate(RequestTarget::Suggestions);
    }

    pub fn dismiss_error(&mut self) {
        self.results_error = None;
    }

    pub fn on_timer_fired(&mut self, timer: DebounceTimer, epoch: u64) -> Vec<EngineCommand> {
        if self.unmounted || !self.debounce.fire(timer, epoch) {
            tracing::debug!(?timer, epoch, "ignoring stale debounce timer");
            return Vec::new();
        }
        match timer {
            DebounceTimer::ApplySearch => {
                if self.draft.search != self.applied.search {
                    self.applied.search = self.draft.search.clone();
                }
                Vec::new()
            }
            DebounceTimer::Suggestions => {
                if !term_is_long_enough(&self.draft.search) {
                    self.hide_suggestions();
                    return Vec::new();
                }
                let ticket = self.requests.issue(RequestTarget::Suggestions);
                self.suggestions_visible = true;
                self.suggestions_loading = true;
                vec![EngineCommand::FetchSuggestions {
                    ticket,
                    request: SuggestionRequest::all_fields(self.draft.search.trim()),
                }]
            }
        }
    }

    pub fn on_entries_loaded(&mut self, ticket: RequestTicket, result: Result<EntriesPage, QueryError>) {
        if !self.accept(&ticket) {
            return;
        }
        let query = self.pending_query.take();
        match result {
            Ok(page) => {
                if let Some(query) = query {
                    self.acknowledged = query.filters;
                }
                self.entries = page.data;
                self.pagination = page.pagination;
                self.results_error = None;
            }
            Err(err) => {
                tracing::warn!(%err, "entries query failed");
                self.applied = self.acknowledged.clone();
                self.results_error = Some(err.to_string());
            }
        }
    }

    pub fn on_unique_values_loaded(&mut self, ticket: RequestTicket, result: Result<UniqueValues, QueryError>) {
        let RequestTarget::UniqueValues(field) = ticket.target else {
            tracing::error!(?ticket, "unique values delivered with a foreign ticket");
            return;
        };
        if !self.accept(&ticket) {
            return;
        }
        match result {
            Ok(values) => self.values.fill(field, values.data),
            Err(err) => {
                tracing::warn!(%field, %err, "unique values fetch failed");
                self.values.fail(field, err.to_string());
            }
        }
    }

    pub fn on_suggestions_loaded(&mut self, ticket: RequestTicket, result: Result<SuggestionMatches, QueryError>) {
        if !self.accept(&ticket) {
            return;
        }
        self.suggestions_loading = false;
        match result {
            Ok(matches) => self.suggestions = SuggestionIndex::build(&matches.data),
            Err(err) => {
                tracing::debug!(%err, "suggestion lookup failed");
                self.suggestions = SuggestionIndex::default();
                self.suggestions_visible = false;
            }
        }
    }

    pub fn on_statistics_loaded(&mut self, ticket: RequestTicket, result: Result<StatisticsOverview, QueryError>) {
        if !self.accept(&ticket) {
            return;
        }
        match result {
            Ok(stats) => self.statistics = Some(stats),
            Err(err) => tracing::warn!(%err, "statistics overview failed"),
        }
    }

    pub fn draft(&self) -> &FilterDraft {
        &self.draft
    }

    pub fn applied(&self) -> &AppliedFilters {
        &self.applied
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn page_window(&self) -> Vec<u64> {
        self.pagination.page_window()
    }

    pub fn has_interacted(&self) -> bool {
        self.has_interacted
    }

    pub fn result_view(&self) -> ResultView {
        if self.requests.is_pending(RequestTarget::Entries) {
            return ResultView::Loading;
        }
        if !self.has_interacted {
            return ResultView::InitialEmpty;
        }
        match (&self.results_error, self.entries.is_empty()) {
            (Some(err), true) => ResultView::Error(err.clone()),
            (_, false) => ResultView::Rows,
            (None, true) => ResultView::NoResults,
        }
    }

    /// Dismissible banner text of the last failed results query.
    pub fn results_error(&self) -> Option<&str> {
        self.results_error.as_deref()
    }

    pub fn options(&self, field: ChainField) -> &[String] {
        self.values.get(field).map(|set| set.values.as_slice()).unwrap_or(&[])
    }

    pub fn value_set(&self, field: ChainField) -> ValueSet {
        self.values.get(field).cloned().unwrap_or_default()
    }

    pub fn field_error(&self, field: ChainField) -> Option<&str> {
        self.values.get(field).and_then(|set| set.error.as_deref())
    }

    pub fn is_loading_options(&self, field: ChainField) -> bool {
        self.values.get(field).is_some_and(|set| set.loading)
    }

    /// A chain dropdown is enabled once its parent has a value.
    pub fn is_selectable(&self, field: ChainField) -> bool {
        match field.parent() {
            None => true,
            Some(parent) => !self.draft.chain_value(parent).trim().is_empty(),
        }
    }

    pub fn suggestions(&self) -> &SuggestionIndex {
        &self.suggestions
    }

    pub fn suggestions_visible(&self) -> bool {
        self.suggestions_visible
    }

    pub fn suggestions_loading(&self) -> bool {
        self.suggestions_loading
    }

    pub fn statistics(&self) -> Option<&StatisticsOverview> {
        self.statistics.as_ref()
    }

    pub fn has_active_filters(&self) -> bool {
        self.draft.has_active_filters()
    }

    pub fn active_filter_chips(&self) -> Vec<FilterChip> {
        self.applied.chips()
    }

    fn apply_draft(&mut self) -> Vec<EngineCommand> {
        self.applied = self.draft.clone();
        self.has_interacted = true;
        vec![self.fetch_entries(EntriesQuery::first_page(self.applied.clone()))]
    }

    fn fetch_entries(&mut self, query: EntriesQuery) -> EngineCommand {
        let ticket = self.requests.issue(RequestTarget::Entries);
        self.pending_query = Some(query.clone());
        EngineCommand::FetchEntries { ticket, query }
    }

    fn fetch_values(&mut self, field: ChainField, scope: ValueScope) -> EngineCommand {
        let ticket = self.requests.issue(RequestTarget::UniqueValues(field));
        self.values.begin(field);
        EngineCommand::FetchUniqueValues { ticket, field, scope }
    }

    fn drop_values(&mut self, field: ChainField) {
        self.values.clear(field);
        self.requests.invalidate(RequestTarget::UniqueValues(field));
    }

    fn accept(&mut self, ticket: &RequestTicket) -> bool {
        if self.unmounted {
            tracing::debug!(?ticket, "dropping response after unmount");
            return false;
        }
        if !self.requests.settle(ticket) {
            tracing::debug!(?ticket, "dropping stale response");
            return false;
        }
        true
    }
}

fn term_is_long_enough(text: &str) -> bool {
    text.trim().chars().count() >= MIN_SUGGESTION_TERM_LEN
}

/// Option sets reloaded when `field` changes, with the ancestors that scope each.
/// The epitope scope skips the autoantibody.
fn dependent_fetches(field: ChainField) -> &'static [(ChainField, &'static [ChainField])] {
    match field {
        ChainField::Disease => &[
            (ChainField::Autoantibody, &[ChainField::Disease]),
            (ChainField::Autoantigen, &[ChainField::Disease]),
        ],
        ChainField::Autoantibody => &[(ChainField::Autoantigen, &[ChainField::Disease, ChainField::Autoantibody])],
        ChainField::Autoantigen => &[(ChainField::Epitope, &[ChainField::Disease, ChainField::Autoantigen])],
        ChainField::Epitope => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries_ticket(commands: &[EngineCommand]) -> RequestTicket {
        commands
            .iter()
            .find_map(|c| match c {
                EngineCommand::FetchEntries { ticket, .. } => Some(*ticket),
                _ => None,
            })
            .expect("no entries fetch")
    }

    fn page(rows: usize) -> EntriesPage {
        EntriesPage {
            data: (0..rows)
                .map(|i| Entry {
                    id: i.to_string(),
                    disease: "SLE".into(),
                    autoantibody: "Anti-Sm".into(),
                    autoantigen: "Sm".into(),
                    epitope: None,
                    uniprot_id: None,
                    entry_type: None,
                    additional: Vec::new(),
                    created_at: None,
                    updated_at: None,
                })
                .collect(),
            pagination: Pagination { page: 1, limit: 20, total: rows as u64, pages: 1 },
        }
    }

    #[test]
    fn mount_loads_root_options_and_statistics_only() {
        let mut engine = BrowseEngine::new();
        let commands = engine.mount();
        assert_eq!(commands.len(), 2);
        assert!(matches!(
            &commands[0],
            EngineCommand::FetchUniqueValues { field: ChainField::Disease, scope, .. } if scope.is_empty()
        ));
        assert!(matches!(commands[1], EngineCommand::FetchStatistics { .. }));
        assert_eq!(engine.result_view(), ResultView::InitialEmpty);
        assert!(engine.is_loading_options(ChainField::Disease));
    }

    #[test]
    fn failed_query_keeps_previous_rows_and_filters() {
        let mut engine = BrowseEngine::new();
        let first = engine.change_disease("SLE");
        engine.on_entries_loaded(entries_ticket(&first), Ok(page(3)));

        let second = engine.change_disease("Sjogren syndrome");
        assert_eq!(engine.applied().disease, "Sjogren syndrome");
        engine.on_entries_loaded(entries_ticket(&second), Err(QueryError::network("500: boom")));

        assert_eq!(engine.entries().len(), 3);
        assert_eq!(engine.applied().disease, "SLE");
        assert_eq!(engine.draft().disease, "Sjogren syndrome");
        assert_eq!(engine.results_error(), Some("500: boom"));
        assert_eq!(engine.result_view(), ResultView::Rows);

        engine.dismiss_error();
        assert_eq!(engine.results_error(), None);
    }

    #[test]
    fn first_failure_without_rows_is_an_error_view() {
        let mut engine = BrowseEngine::new();
        let commands = engine.change_disease("SLE");
        engine.on_entries_loaded(entries_ticket(&commands), Err(QueryError::network("timed out")));
        assert_eq!(engine.result_view(), ResultView::Error("timed out".into()));
    }

    #[test]
    fn chain_dropdowns_unlock_top_down() {
        let mut engine = BrowseEngine::new();
        assert!(engine.is_selectable(ChainField::Disease));
        assert!(!engine.is_selectable(ChainField::Autoantibody));
        engine.change_disease("SLE");
        assert!(engine.is_selectable(ChainField::Autoantibody));
        assert!(!engine.is_selectable(ChainField::Autoantigen));
        engine.change_autoantibody("Anti-Sm");
        assert!(engine.is_selectable(ChainField::Autoantigen));
        assert!(!engine.is_selectable(ChainField::Epitope));
    }

    #[test]
    fn apply_timer_commits_search_without_querying() {
        let mut engine = BrowseEngine::new();
        let commands = engine.set_search_text("lupus");
        let apply_epoch = commands
            .iter()
            .find_map(|c| match c {
                EngineCommand::ArmTimer { timer: DebounceTimer::ApplySearch, epoch, .. } => Some(*epoch),
                _ => None,
            })
            .unwrap();
        assert!(engine.on_timer_fired(DebounceTimer::ApplySearch, apply_epoch).is_empty());
        assert_eq!(engine.applied().search, "lupus");
        assert_eq!(engine.active_filter_chips()[0].value, "lupus");
        assert!(!engine.has_interacted());
    }

    #[test]
    fn short_term_hides_suggestions_without_arming() {
        let mut engine = BrowseEngine::new();
        let commands = engine.set_search_text(" l ");
        assert_eq!(commands.len(), 1);
        assert!(!engine.suggestions_visible());
    }

    #[test]
    fn refresh_requeries_current_page() {
        let mut engine = BrowseEngine::new();
        assert!(engine.refresh().is_empty());
        let first = engine.go_to_page(3);
        let mut loaded = page(1);
        loaded.pagination = Pagination { page: 3, limit: 20, total: 41, pages: 3 };
        engine.on_entries_loaded(entries_ticket(&first), Ok(loaded));
        match engine.refresh().as_slice() {
            [EngineCommand::FetchEntries { query, .. }] => assert_eq!(query.page, 3),
            other => panic!("unexpected commands {other:?}"),
        }
    }
}
