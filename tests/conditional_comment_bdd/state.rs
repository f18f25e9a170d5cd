//! Scenario state for conditional comment behavioural tests.

use autocomment::{TaskConfig, TaskResult};
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;

use super::DevOpsServer;

/// Shared scenario state for conditional comment behaviour tests.
#[derive(ScenarioState, Default)]
pub(crate) struct CommentState {
    /// Mock Azure DevOps service.
    pub(crate) server: Slot<DevOpsServer>,
    /// Pipeline variables withheld from the task.
    pub(crate) omitted_variables: Slot<Vec<String>>,
    /// Task inputs assembled by the scenario.
    pub(crate) config: Slot<TaskConfig>,
    /// Outcome of the task run.
    pub(crate) result: Slot<TaskResult>,
}

impl CommentState {
    /// Applies `update` to the task inputs, starting from defaults.
    pub(crate) fn update_config(&self, update: impl FnOnce(&mut TaskConfig)) {
        let mut config = self.config.take().unwrap_or_default();
        update(&mut config);
        self.config.set(config);
    }
}
