//! Agent, team, and analysis scenarios against the in-memory store.

use super::helpers::{four_node_project, state};
use jag_atlas::analysis::domain::{Analysis, AnalysisId};
use jag_atlas::http::AppState;
use jag_atlas::persistence::RepositoryError;
use jag_atlas::team::domain::{Agent, AgentId, Team, TeamId};
use jag_atlas::team::services::RosterError;
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn team_reads_resolve_members(state: AppState) {
    let ada = state
        .roster
        .put_agent(Agent::new(AgentId::new(), "Ada"))
        .await
        .expect("agent stored");
    let team = state
        .roster
        .put_team(Team::new(TeamId::new(), "Blue").with_agent(ada.id))
        .await
        .expect("team stored");

    let view = state.roster.get_team(team.id).await.expect("team found");

    assert_eq!(view.agents, vec![ada]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn subscribed_team_survives_until_unsubscribed(state: AppState) {
    let root = state.jags.put(four_node_project()).await.expect("project stored");
    let team = state
        .roster
        .put_team(Team::new(TeamId::new(), "Blue"))
        .await
        .expect("team stored");
    let analysis = Analysis::new(AnalysisId::new(), "Review", root).with_team(team.id);
    state.analyses.put(analysis.clone()).await.expect("analysis stored");

    let blocked = state.roster.delete_team(team.id).await;
    assert!(matches!(
        blocked,
        Err(RosterError::Repository(RepositoryError::Conflict(_)))
    ));

    let unsubscribed = Analysis {
        teams: Vec::new(),
        ..analysis
    };
    state.analyses.put(unsubscribed).await.expect("analysis replaced");
    state.roster.delete_team(team.id).await.expect("team deleted");
}
