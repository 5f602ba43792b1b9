//! Scenario steps for the repository lifecycle.
//!
//! Each function is one phrase of the scenario suite and operates on the
//! [`Scenario`] it belongs to: the client carries the session and last
//! response, and the list step stores what it fetched for the assertions
//! that follow.

use super::context::Scenario;
use super::error::{Result, StepError};
use crate::infra::github::{RepositoryDescriptor, RepositorySummary, contains_repository};

/// Given I am an authenticated user
pub fn i_am_an_authenticated_user(scenario: &mut Scenario, token: Option<&str>) -> Result<()> {
    let token = token.ok_or(StepError::MissingToken)?;
    scenario.client.authenticate(token)?;
    Ok(())
}

/// When I create a repository called :name
pub async fn i_create_a_repository_called(scenario: &mut Scenario, name: &str) -> Result<()> {
    let descriptor = RepositoryDescriptor {
        name: name.to_string(),
        description: scenario.defaults.description.clone(),
        homepage: scenario.defaults.homepage.clone(),
        is_private: scenario.defaults.private,
    };
    scenario.client.create_repository(&descriptor).await?;
    check_response_code(scenario, 201)
}

/// When I delete a repository called :name
///
/// The owner is always the authenticated user.
pub async fn i_delete_a_repository_called(scenario: &mut Scenario, name: &str) -> Result<()> {
    scenario.client.delete_repository(None, name).await?;
    check_response_code(scenario, 204)
}

/// When I request a list of my repositories
pub async fn i_request_a_list_of_my_repositories(scenario: &mut Scenario) -> Result<()> {
    let repositories = scenario.client.list_my_repositories().await?;
    check_response_code(scenario, 200)?;
    scenario.results = Some(repositories);
    Ok(())
}

/// Then the results should include a repository named :name
pub fn the_results_should_include_a_repository_named(scenario: &Scenario, name: &str) -> Result<()> {
    if contains_repository(listed(scenario)?, name) {
        Ok(())
    } else {
        Err(StepError::RepositoryMissing(name.to_string()))
    }
}

/// Then the results should not include a repository named :name
pub fn the_results_should_not_include_a_repository_named(
    scenario: &Scenario,
    name: &str,
) -> Result<()> {
    if contains_repository(listed(scenario)?, name) {
        Err(StepError::RepositoryPresent(name.to_string()))
    } else {
        Ok(())
    }
}

pub fn check_response_code(scenario: &Scenario, expected: u16) -> Result<()> {
    let actual = scenario.client.last_status_code()?;
    if actual != expected {
        return Err(StepError::UnexpectedStatus { expected, actual });
    }
    Ok(())
}

fn listed(scenario: &Scenario) -> Result<&[RepositorySummary]> {
    scenario.results().ok_or(StepError::NoResults)
}
