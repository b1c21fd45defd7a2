//! Validation and resolution tests for roster entities.

use std::collections::HashMap;

use crate::team::domain::{Agent, AgentId, Team, TeamDomainError, TeamId, resolve_team};
use rstest::rstest;

#[rstest]
fn agent_requires_a_name() {
    let agent = Agent::new(AgentId::new(), " ");
    assert_eq!(agent.validate(), Err(TeamDomainError::EmptyAgentName(agent.id)));
}

#[rstest]
fn team_rejects_repeated_member() {
    let member = AgentId::new();
    let team = Team::new(TeamId::new(), "Red").with_agent(member).with_agent(member);

    assert_eq!(
        team.validate(),
        Err(TeamDomainError::DuplicateMember {
            team: team.id,
            agent: member,
        })
    );
}

#[rstest]
fn resolve_keeps_member_order() {
    let first = Agent::new(AgentId::new(), "Ada");
    let second = Agent::new(AgentId::new(), "Brook");
    let agents = HashMap::from([(first.id, first.clone()), (second.id, second.clone())]);
    let team = Team::new(TeamId::new(), "Blue")
        .with_agent(second.id)
        .with_agent(first.id);

    let view = resolve_team(team, &agents).expect("members resolve");

    assert_eq!(view.agents, vec![second, first]);
}

#[rstest]
fn resolve_reports_missing_member() {
    let ghost = AgentId::new();
    let team = Team::new(TeamId::new(), "Green").with_agent(ghost);

    let err = resolve_team(team, &HashMap::new()).expect_err("member is missing");

    assert_eq!(err.agent, ghost);
}
