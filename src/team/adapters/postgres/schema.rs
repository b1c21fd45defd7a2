//! Diesel schema for agents, teams, and membership.

diesel::table! {
    /// Agent rows.
    agent (id) {
        /// Agent identifier.
        id -> Uuid,
        /// Display name.
        name -> Text,
    }
}

diesel::table! {
    /// Team rows.
    team (id) {
        /// Team identifier.
        id -> Uuid,
        /// Display name.
        name -> Text,
    }
}

diesel::table! {
    /// Team membership rows.
    performer (team_id, agent_id) {
        /// Team.
        team_id -> Uuid,
        /// Member agent.
        agent_id -> Uuid,
        /// Display order within the team.
        ordinal -> Int4,
    }
}

diesel::allow_tables_to_appear_in_same_query!(agent, team, performer);
