//! The repository lifecycle suite: create, list, delete, list.

use std::fmt;

use super::context::Scenario;
use super::error::StepError;
use super::steps;
use crate::infra::github::ClientConfig;
use crate::shared::config::RepositoryDefaults;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Passed,
    Failed(String),
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRecord {
    pub phrase: String,
    pub outcome: StepOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioReport {
    pub title: String,
    pub steps: Vec<StepRecord>,
}

impl ScenarioReport {
    /// Build a report from the phrases of a scenario and how far it got.
    ///
    /// On failure at step `i`, steps before `i` passed and steps after it
    /// were never run.
    fn from_outcome(
        title: &str,
        phrases: Vec<String>,
        outcome: Result<(), (usize, StepError)>,
    ) -> Self {
        let failure = outcome.err();
        let steps = phrases
            .into_iter()
            .enumerate()
            .map(|(index, phrase)| {
                let outcome = match &failure {
                    None => StepOutcome::Passed,
                    Some((failed, _)) if index < *failed => StepOutcome::Passed,
                    Some((failed, err)) if index == *failed => StepOutcome::Failed(err.to_string()),
                    Some(_) => StepOutcome::Skipped,
                };
                StepRecord { phrase, outcome }
            })
            .collect();

        match &failure {
            None => tracing::info!(scenario = title, "scenario passed"),
            Some((index, err)) => {
                tracing::warn!(scenario = title, step = index, error = %err, "scenario failed")
            }
        }

        Self {
            title: title.to_string(),
            steps,
        }
    }

    pub fn passed(&self) -> bool {
        self.steps.iter().all(|s| s.outcome == StepOutcome::Passed)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LifecycleReport {
    pub scenarios: Vec<ScenarioReport>,
}

impl LifecycleReport {
    pub fn passed(&self) -> bool {
        self.scenarios.iter().all(ScenarioReport::passed)
    }
}

impl fmt::Display for LifecycleReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for scenario in &self.scenarios {
            writeln!(f, "Scenario: {}", scenario.title)?;
            for step in &scenario.steps {
                match &step.outcome {
                    StepOutcome::Passed => writeln!(f, "  [passed]  {}", step.phrase)?,
                    StepOutcome::Skipped => writeln!(f, "  [skipped] {}", step.phrase)?,
                    StepOutcome::Failed(message) => {
                        writeln!(f, "  [failed]  {}", step.phrase)?;
                        writeln!(f, "            {message}")?;
                    }
                }
            }
            writeln!(f)?;
        }

        let failed = self.scenarios.iter().filter(|s| !s.passed()).count();
        write!(
            f,
            "{} scenarios ({} passed, {} failed)",
            self.scenarios.len(),
            self.scenarios.len() - failed,
            failed
        )
    }
}

/// Run both lifecycle scenarios for `name`.
///
/// Each scenario gets its own [`Scenario`] built from `config`, so no session,
/// last response or listing carries over. A failed create does not stop the
/// delete scenario from running.
pub async fn run_lifecycle(
    config: &ClientConfig,
    token: Option<&str>,
    defaults: &RepositoryDefaults,
    name: &str,
) -> LifecycleReport {
    let create = create_scenario(config, token, defaults, name).await;
    let delete = delete_scenario(config, token, defaults, name).await;
    LifecycleReport {
        scenarios: vec![create, delete],
    }
}

/// Fresh scenario state; a client that cannot be built fails the first step.
fn start(
    config: &ClientConfig,
    defaults: &RepositoryDefaults,
) -> Result<Scenario, (usize, StepError)> {
    Scenario::new(config, defaults.clone()).map_err(|e| (0, e.into()))
}

async fn create_scenario(
    config: &ClientConfig,
    token: Option<&str>,
    defaults: &RepositoryDefaults,
    name: &str,
) -> ScenarioReport {
    let phrases = vec![
        "Given I am an authenticated user".to_string(),
        format!("When I create a repository called \"{name}\""),
        "And I request a list of my repositories".to_string(),
        format!("Then the results should include a repository named \"{name}\""),
    ];

    let outcome = async {
        let mut scenario = start(config, defaults)?;
        steps::i_am_an_authenticated_user(&mut scenario, token).map_err(|e| (0, e))?;
        steps::i_create_a_repository_called(&mut scenario, name)
            .await
            .map_err(|e| (1, e))?;
        steps::i_request_a_list_of_my_repositories(&mut scenario)
            .await
            .map_err(|e| (2, e))?;
        steps::the_results_should_include_a_repository_named(&scenario, name)
            .map_err(|e| (3, e))?;
        Ok::<_, (usize, StepError)>(())
    }
    .await;

    ScenarioReport::from_outcome("Create a new repository", phrases, outcome)
}

async fn delete_scenario(
    config: &ClientConfig,
    token: Option<&str>,
    defaults: &RepositoryDefaults,
    name: &str,
) -> ScenarioReport {
    let phrases = vec![
        "Given I am an authenticated user".to_string(),
        format!("When I delete a repository called \"{name}\""),
        "And I request a list of my repositories".to_string(),
        format!("Then the results should not include a repository named \"{name}\""),
    ];

    let outcome = async {
        let mut scenario = start(config, defaults)?;
        steps::i_am_an_authenticated_user(&mut scenario, token).map_err(|e| (0, e))?;
        steps::i_delete_a_repository_called(&mut scenario, name)
            .await
            .map_err(|e| (1, e))?;
        steps::i_request_a_list_of_my_repositories(&mut scenario)
            .await
            .map_err(|e| (2, e))?;
        steps::the_results_should_not_include_a_repository_named(&scenario, name)
            .map_err(|e| (3, e))?;
        Ok::<_, (usize, StepError)>(())
    }
    .await;

    ScenarioReport::from_outcome("Remove a repository", phrases, outcome)
}
