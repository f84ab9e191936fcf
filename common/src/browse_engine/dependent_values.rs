use std::collections::BTreeMap;

use crate::filter::ChainField;

/// Options of one chain dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValueSet {
    pub values: Vec<String>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Legal values per chain field given the ancestors selected in the draft.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct DependentValues {
    sets: BTreeMap<ChainField, ValueSet>,
}

impl DependentValues {
    pub(crate) fn get(&self, field: ChainField) -> Option<&ValueSet> {
        self.sets.get(&field)
    }

    /// Previous options stay visible until the response lands.
    pub(crate) fn begin(&mut self, field: ChainField) {
        let set = self.sets.entry(field).or_default();
        set.loading = true;
        set.error = None;
    }

    pub(crate) fn fill(&mut self, field: ChainField, values: Vec<String>) {
        self.sets.insert(field, ValueSet { values, loading: false, error: None });
    }

    pub(crate) fn fail(&mut self, field: ChainField, message: String) {
        let set = self.sets.entry(field).or_default();
        set.loading = false;
        set.error = Some(message);
    }

    pub(crate) fn clear(&mut self, field: ChainField) {
        self.sets.remove(&field);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_keeps_previous_options() {
        let mut values = DependentValues::default();
        values.fill(ChainField::Autoantibody, vec!["Anti-Sm".into()]);
        values.begin(ChainField::Autoantibody);
        values.fail(ChainField::Autoantibody, "503: unavailable".into());
        let set = values.get(ChainField::Autoantibody).unwrap();
        assert_eq!(set.values, vec!["Anti-Sm".to_string()]);
        assert!(!set.loading);
        assert_eq!(set.error.as_deref(), Some("503: unavailable"));
    }
}
