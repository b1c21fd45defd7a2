//! Service tests for analyses over a shared in-memory database.

use std::sync::Arc;

use crate::analysis::{
    adapters::memory::InMemoryAnalysisRepository,
    domain::{Analysis, AnalysisDomainError, AnalysisId},
    services::{AnalysisError, AnalysisService},
};
use crate::changes::ChangeFeed;
use crate::jag::{adapters::memory::InMemoryJagRepository, domain::{JagTree, NodeId}, services::JagProjectService};
use crate::persistence::{InMemoryDatabase, RepositoryError};
use crate::team::{
    adapters::memory::InMemoryRosterRepository,
    domain::{Team, TeamId},
    services::RosterService,
};
use rstest::{fixture, rstest};

struct Harness {
    analyses: AnalysisService<InMemoryAnalysisRepository>,
    jags: JagProjectService<InMemoryJagRepository>,
    roster: RosterService<InMemoryRosterRepository>,
}

#[fixture]
fn harness() -> Harness {
    let database = InMemoryDatabase::new();
    let changes = ChangeFeed::default();
    Harness {
        analyses: AnalysisService::new(
            Arc::new(InMemoryAnalysisRepository::new(database.clone())),
            changes.clone(),
        ),
        jags: JagProjectService::new(
            Arc::new(InMemoryJagRepository::new(database.clone())),
            changes.clone(),
        ),
        roster: RosterService::new(Arc::new(InMemoryRosterRepository::new(database)), changes),
    }
}

async fn seed(harness: &Harness) -> (NodeId, TeamId) {
    let root = harness
        .jags
        .put(JagTree::new(NodeId::new(1), "urn:root"))
        .await
        .expect("project stored");
    let team = harness
        .roster
        .put_team(Team::new(TeamId::new(), "Red"))
        .await
        .expect("team stored");
    (root, team.id)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn put_then_get_keeps_subscriptions(harness: Harness) {
    let (root, team) = seed(&harness).await;
    let analysis = Analysis::new(AnalysisId::new(), "Review", root).with_team(team);

    harness.analyses.put(analysis.clone()).await.expect("put");

    let fetched = harness.analyses.get(analysis.id).await.expect("get");
    assert_eq!(fetched, analysis);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_root_is_a_conflict(harness: Harness) {
    let result = harness
        .analyses
        .put(Analysis::new(AnalysisId::new(), "Review", NodeId::new(404)))
        .await;

    assert!(matches!(
        result,
        Err(AnalysisError::Repository(RepositoryError::Conflict(_)))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn repeated_team_is_rejected(harness: Harness) {
    let (root, team) = seed(&harness).await;

    let result = harness
        .analyses
        .put(Analysis::new(AnalysisId::new(), "Review", root).with_team(team).with_team(team))
        .await;

    assert!(matches!(
        result,
        Err(AnalysisError::Domain(AnalysisDomainError::DuplicateTeam { .. }))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn subscribed_team_and_analysed_project_are_protected(harness: Harness) {
    let (root, team) = seed(&harness).await;
    let analysis = Analysis::new(AnalysisId::new(), "Review", root).with_team(team);
    harness.analyses.put(analysis.clone()).await.expect("put");

    assert!(harness.roster.delete_team(team).await.is_err());
    assert!(harness.jags.delete(root).await.is_err());

    harness.analyses.delete(analysis.id).await.expect("delete analysis");
    harness.roster.delete_team(team).await.expect("delete team");
    harness.jags.delete(root).await.expect("delete project");
    assert!(harness.analyses.list().await.expect("list").is_empty());
}
