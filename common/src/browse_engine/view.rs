/// What the result area of the browse page shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultView {
    /// Nothing was asked for yet.
    InitialEmpty,
    Loading,
    /// The query failed and there are no earlier rows to fall back on.
    Error(String),
    /// No rows to show after the first query, including a dismissed failure.
    NoResults,
    Rows,
}

impl ResultView {
    pub fn shows_rows(&self) -> bool {
        matches!(self, ResultView::Rows)
    }
}
