//! Diesel schema for analyses, subscriptions, and assessments.

diesel::table! {
    /// Analysis rows.
    analysis (id) {
        /// Analysis identifier.
        id -> Uuid,
        /// Display name.
        name -> Text,
        /// Root node of the analysed project.
        root_id -> Int8,
    }
}

diesel::table! {
    /// Teams subscribed to an analysis.
    subscription (analysis_id, team_id) {
        /// Analysis.
        analysis_id -> Uuid,
        /// Subscribed team.
        team_id -> Uuid,
        /// Display order.
        ordinal -> Int4,
    }
}

diesel::table! {
    /// Per-node assessments made within an analysis.
    assessment (id) {
        /// Assessment identifier.
        id -> Uuid,
        /// Owning analysis.
        analysis_id -> Uuid,
        /// Assessed node.
        node_id -> Int8,
        /// Assessment value.
        #[sql_name = "assessment"]
        value -> Text,
    }
}

diesel::table! {
    /// Per-agent refinements of an assessment.
    agent_assessment (agent_id, assessment_id) {
        /// Assessing agent.
        agent_id -> Uuid,
        /// Refined assessment.
        assessment_id -> Uuid,
        /// Assessment value.
        assessment -> Text,
    }
}

diesel::allow_tables_to_appear_in_same_query!(analysis, subscription, assessment, agent_assessment);
