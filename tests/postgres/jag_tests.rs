//! JAG and roster persistence against `PostgreSQL`.

use jag_atlas::analysis::domain::{Analysis, AnalysisId};
use jag_atlas::jag::domain::{JagTree, NodeId};
use jag_atlas::team::domain::{Agent, AgentId, Team, TeamId};

use super::helpers::BoxError;
use crate::scratch_or_skip;

fn project() -> JagTree {
    JagTree::new(NodeId::new(1), "urn:root")
        .with_child(
            JagTree::new(NodeId::new(2), "urn:left")
                .with_child(JagTree::new(NodeId::new(4), "urn:leaf")),
        )
        .with_child(JagTree::new(NodeId::new(3), "urn:right"))
}

#[tokio::test(flavor = "multi_thread")]
async fn project_reassembles_from_its_rows() -> Result<(), BoxError> {
    let scratch = scratch_or_skip!();
    let jags = &scratch.state.jags;

    let root = jags.put(project()).await?;
    let tree = jags.get(root).await?;

    let ids: Vec<NodeId> = tree.children.iter().map(|node| node.id).collect();
    assert_eq!(ids, vec![NodeId::new(2), NodeId::new(3)]);
    let left = tree.children.first().ok_or("node 2 missing")?;
    let leaves: Vec<NodeId> = left.children.iter().map(|node| node.id).collect();
    assert_eq!(leaves, vec![NodeId::new(4)]);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn replacing_a_project_deletes_stale_nodes() -> Result<(), BoxError> {
    let scratch = scratch_or_skip!();
    let jags = &scratch.state.jags;
    jags.put(project()).await?;

    jags.put(JagTree::new(NodeId::new(1), "urn:root")).await?;

    let tree = jags.get(NodeId::new(1)).await?;
    assert!(tree.children.is_empty());
    assert_eq!(jags.list().await?.len(), 1);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn analysis_delete_clears_subscriptions() -> Result<(), BoxError> {
    let scratch = scratch_or_skip!();
    let state = &scratch.state;
    let root = state.jags.put(project()).await?;
    let agent = state.roster.put_agent(Agent::new(AgentId::new(), "Ada")).await?;
    let team = state
        .roster
        .put_team(Team::new(TeamId::new(), "Blue").with_agent(agent.id))
        .await?;
    let analysis = state
        .analyses
        .put(Analysis::new(AnalysisId::new(), "Review", root).with_team(team.id))
        .await?;

    assert_eq!(state.analyses.get(analysis.id).await?.teams, vec![team.id]);
    assert_eq!(state.roster.get_team(team.id).await?.agents, vec![agent]);

    state.analyses.delete(analysis.id).await?;
    state.roster.delete_team(team.id).await?;
    state.jags.delete(root).await?;
    assert!(state.analyses.list().await?.is_empty());
    Ok(())
}
