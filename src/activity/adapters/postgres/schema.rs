//! Diesel schema for activity persistence.

diesel::table! {
    /// Activity header rows.
    activity (urn) {
        /// Globally unique identifier.
        #[max_length = 255]
        urn -> Varchar,
        /// Display name.
        name -> Text,
        /// Free-form description.
        description -> Text,
        /// Author of the definition.
        author -> Nullable<Text>,
        /// Creation timestamp.
        created_date -> Nullable<Timestamptz>,
        /// Last modification timestamp.
        modified_date -> Nullable<Timestamptz>,
        /// Lock flag.
        is_locked -> Bool,
        /// Lock holder.
        locked_by -> Nullable<Text>,
        /// Connector execution mode.
        #[max_length = 32]
        connector_execution -> Varchar,
        /// Connector operator.
        #[max_length = 32]
        connector_operator -> Varchar,
        /// Connector return policy.
        #[max_length = 32]
        connector_returns -> Varchar,
        /// Display flag.
        collapsed -> Bool,
    }
}

diesel::table! {
    /// Endpoint rows owned by activities.
    endpoint (id) {
        /// Endpoint identifier.
        id -> Int8,
        /// Owning activity.
        #[max_length = 255]
        activity_urn -> Varchar,
        /// `in` or `out`.
        #[max_length = 8]
        direction -> Varchar,
        /// Exchanged value name.
        exchange_name -> Text,
        /// Exchanged value type.
        exchange_type -> Text,
    }
}

diesel::table! {
    /// Child references owned by activities.
    subactivity (parent_urn, id) {
        /// Owning activity.
        #[max_length = 255]
        parent_urn -> Varchar,
        /// Placement identifier.
        #[max_length = 255]
        id -> Varchar,
        /// Referenced activity.
        #[max_length = 255]
        urn -> Varchar,
        /// Declaration order.
        ordinal -> Int4,
    }
}

diesel::table! {
    /// Endpoint bindings owned by activities.
    binding (activity_urn, from_endpoint, to_endpoint) {
        /// Owning activity.
        #[max_length = 255]
        activity_urn -> Varchar,
        /// Source endpoint.
        from_endpoint -> Int8,
        /// Target endpoint.
        to_endpoint -> Int8,
        /// Declaration order.
        ordinal -> Int4,
    }
}
