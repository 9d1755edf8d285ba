use std::sync::Arc;

use dashboard_core::{Dashboard, Suggestion};
use inquire::{
    CustomUserError,
    autocompletion::{Autocomplete, Replacement},
};
use tokio::runtime::Handle;

/// Feeds every keystroke to the dashboard's suggestion fetcher.
///
/// inquire calls this synchronously, so lookups are driven with
/// `Handle::block_on`; the prompt itself must run inside `block_in_place`.
#[derive(Debug, Clone)]
pub struct CityCompleter {
    dashboard: Arc<Dashboard>,
    runtime: Handle,
}

impl CityCompleter {
    pub fn new(dashboard: Arc<Dashboard>, runtime: Handle) -> Self {
        Self { dashboard, runtime }
    }
}

impl Autocomplete for CityCompleter {
    fn get_suggestions(&mut self, input: &str) -> Result<Vec<String>, CustomUserError> {
        let suggestions = self.runtime.block_on(self.dashboard.set_city(input));
        Ok(suggestions.iter().map(|s| s.label()).collect())
    }

    fn get_completion(
        &mut self,
        _input: &str,
        highlighted_suggestion: Option<String>,
    ) -> Result<Replacement, CustomUserError> {
        let Some(label) = highlighted_suggestion else {
            return Ok(None);
        };

        // choosing only fills the input; the user still has to press enter
        let chosen = select_by_label(&self.dashboard, &label).map(|s| s.name);
        Ok(chosen.or(Some(label)))
    }
}

/// Select the visible suggestion whose label is `label`, if any.
pub fn select_by_label(dashboard: &Dashboard, label: &str) -> Option<Suggestion> {
    let index = dashboard
        .state()
        .suggestions
        .iter()
        .position(|s| s.label() == label)?;

    dashboard.select_suggestion(index)
}
