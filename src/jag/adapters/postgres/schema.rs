//! Diesel schema for JAG node rows.

diesel::table! {
    /// JAG node rows; a project is the set of rows sharing `project_id`.
    node (id) {
        /// Node identifier.
        id -> Int8,
        /// Instantiated activity urn.
        #[max_length = 255]
        urn -> Varchar,
        /// Parent node, null for the project root.
        parent_id -> Nullable<Int8>,
        /// Root node id of the project.
        project_id -> Int8,
        /// Position among siblings.
        ordinal -> Int4,
        /// Horizontal canvas position.
        x -> Float8,
        /// Vertical canvas position.
        y -> Float8,
        /// Name in the parent's context.
        context_name -> Nullable<Text>,
        /// Description in the parent's context.
        context_description -> Nullable<Text>,
        /// Recorded return value.
        return_value -> Nullable<Text>,
        /// Recorded return state.
        return_state -> Nullable<Text>,
        /// Lock flag.
        is_locked -> Bool,
        /// Expansion flag.
        is_expanded -> Bool,
    }
}
