use crate::error::{FinderError, EMPTY_SELECTION_MESSAGE};
use crate::model::SearchCriteria;

/// Where the form is in its submit cycle
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormPhase {
    #[default]
    Idle,
    Submitting,
    Success,
    ValidationFailed(String),
}

/// Ingredient selection slots plus the optional max-ingredient bound.
///
/// Starts with a single blank slot. The first slot can be cleared but never
/// removed. Any edit after a failed validation returns the form to `Idle`.
#[derive(Debug, Clone)]
pub struct SearchForm {
    slots: Vec<String>,
    max_ingredients: Option<usize>,
    phase: FormPhase,
}

impl Default for SearchForm {
    fn default() -> Self {
        Self {
            slots: vec![String::new()],
            max_ingredients: None,
            phase: FormPhase::Idle,
        }
    }
}

impl SearchForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-filled form, one slot per name
    pub fn with_selection<I, S>(names: I, max_ingredients: Option<usize>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut slots: Vec<String> = names.into_iter().map(Into::into).collect();
        if slots.is_empty() {
            slots.push(String::new());
        }
        Self {
            slots,
            max_ingredients,
            phase: FormPhase::Idle,
        }
    }

    pub fn slots(&self) -> &[String] {
        &self.slots
    }

    pub fn max_ingredients(&self) -> Option<usize> {
        self.max_ingredients
    }

    pub fn phase(&self) -> &FormPhase {
        &self.phase
    }

    pub fn validation_message(&self) -> Option<&str> {
        match &self.phase {
            FormPhase::ValidationFailed(message) => Some(message),
            _ => None,
        }
    }

    pub fn set_slot(&mut self, index: usize, value: impl Into<String>) -> Result<(), FinderError> {
        let slot = self
            .slots
            .get_mut(index)
            .ok_or_else(|| FinderError::Validation(format!("No ingredient slot {index}")))?;
        *slot = value.into();
        self.edited();
        Ok(())
    }

    pub fn add_slot(&mut self) -> usize {
        self.slots.push(String::new());
        self.edited();
        self.slots.len() - 1
    }

    pub fn remove_slot(&mut self, index: usize) -> Result<String, FinderError> {
        if index == 0 {
            return Err(FinderError::Validation(
                "The first ingredient slot cannot be removed".to_string(),
            ));
        }
        if index >= self.slots.len() {
            return Err(FinderError::Validation(format!("No ingredient slot {index}")));
        }
        let removed = self.slots.remove(index);
        self.edited();
        Ok(removed)
    }

    /// `None` means no limit
    pub fn set_max_ingredients(&mut self, max: Option<usize>) -> Result<(), FinderError> {
        if max == Some(0) {
            return Err(FinderError::Validation(
                "Maximum ingredient count must be at least 1".to_string(),
            ));
        }
        self.max_ingredients = max;
        self.edited();
        Ok(())
    }

    /// Validate and move to `Submitting`.
    ///
    /// Fails without touching the network when every slot is blank.
    pub fn submit(&mut self) -> Result<SearchCriteria, FinderError> {
        match SearchCriteria::new(&self.slots, self.max_ingredients) {
            Some(criteria) => {
                self.phase = FormPhase::Submitting;
                Ok(criteria)
            }
            None => {
                self.phase = FormPhase::ValidationFailed(EMPTY_SELECTION_MESSAGE.to_string());
                Err(FinderError::Validation(EMPTY_SELECTION_MESSAGE.to_string()))
            }
        }
    }

    /// Mark the submitted search as finished
    pub fn finish(&mut self) {
        if self.phase == FormPhase::Submitting {
            self.phase = FormPhase::Success;
        }
    }

    /// The submitted search failed; the form can be submitted again
    pub fn abort(&mut self) {
        if self.phase == FormPhase::Submitting {
            self.phase = FormPhase::Idle;
        }
    }

    fn edited(&mut self) {
        if matches!(self.phase, FormPhase::ValidationFailed(_)) {
            self.phase = FormPhase::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_form_has_one_blank_slot() {
        let form = SearchForm::new();
        assert_eq!(form.slots(), &[String::new()]);
        assert_eq!(form.phase(), &FormPhase::Idle);
    }

    #[test]
    fn test_blank_submit_fails_validation() {
        let mut form = SearchForm::new();
        form.add_slot();
        form.set_slot(1, "   ").unwrap();

        let err = form.submit().unwrap_err();
        assert!(err.is_validation());
        assert_eq!(form.validation_message(), Some(EMPTY_SELECTION_MESSAGE));
    }

    #[test]
    fn test_edit_after_failure_returns_to_idle() {
        let mut form = SearchForm::new();
        assert!(form.submit().is_err());

        form.set_slot(0, "Chicken").unwrap();
        assert_eq!(form.phase(), &FormPhase::Idle);
        assert!(form.validation_message().is_none());
    }

    #[test]
    fn test_submit_skips_blank_slots() {
        let mut form = SearchForm::new();
        form.set_slot(0, "Chicken").unwrap();
        form.add_slot();
        let third = form.add_slot();
        form.set_slot(third, "Salt").unwrap();
        form.set_max_ingredients(Some(8)).unwrap();

        let criteria = form.submit().unwrap();
        assert_eq!(criteria.ingredients(), &["Chicken".to_string(), "Salt".to_string()]);
        assert_eq!(criteria.max_ingredients(), Some(8));
        assert_eq!(form.phase(), &FormPhase::Submitting);

        form.finish();
        assert_eq!(form.phase(), &FormPhase::Success);
    }

    #[test]
    fn test_first_slot_cannot_be_removed() {
        let mut form = SearchForm::new();
        assert!(form.remove_slot(0).is_err());

        form.add_slot();
        form.set_slot(1, "Garlic").unwrap();
        assert_eq!(form.remove_slot(1).unwrap(), "Garlic");
        assert_eq!(form.slots().len(), 1);
        assert!(form.remove_slot(3).is_err());
    }

    #[test]
    fn test_zero_max_is_rejected() {
        let mut form = SearchForm::new();
        assert!(form.set_max_ingredients(Some(0)).is_err());
        assert_eq!(form.max_ingredients(), None);
        form.set_max_ingredients(Some(3)).unwrap();
        form.set_max_ingredients(None).unwrap();
        assert_eq!(form.max_ingredients(), None);
    }

    #[test]
    fn test_with_selection_never_empty() {
        let form = SearchForm::with_selection(Vec::<String>::new(), None);
        assert_eq!(form.slots().len(), 1);
    }
}
