//! Table lifecycle against `PostgreSQL`.

use jag_atlas::schema::ports::SchemaError;

use super::helpers::BoxError;
use crate::scratch_or_skip;

#[tokio::test(flavor = "multi_thread")]
async fn parent_table_cannot_be_dropped_first() -> Result<(), BoxError> {
    let scratch = scratch_or_skip!();

    let result = scratch.state.schema.drop_table("activity").await;

    match result {
        Err(SchemaError::ForeignKeyViolation { dependents, .. }) => {
            assert_eq!(dependents, vec!["endpoint", "subactivity", "binding"]);
        }
        other => return Err(format!("expected foreign key violation, got {other:?}").into()),
    }
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn drop_and_recreate_every_table() -> Result<(), BoxError> {
    let scratch = scratch_or_skip!();
    let schema = &scratch.state.schema;

    schema.drop_tables().await?;
    assert!(schema.status().await?.iter().all(|table| !table.exists));

    schema.create_tables().await?;
    assert!(schema.status().await?.iter().all(|table| table.exists));
    Ok(())
}
