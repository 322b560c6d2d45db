use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, Schema};

use crate::infrastructure::entity::users;

/// Create the `users` table, including the unique index on `email`, if it
/// does not exist yet.
pub async fn ensure_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let mut create_users = schema.create_table_from_entity(users::Entity);
    create_users.if_not_exists();

    db.execute(backend.build(&create_users)).await?;
    tracing::info!("users table ready");

    Ok(())
}

#[cfg(test)]
mod tests {
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    use super::*;

    #[tokio::test]
    async fn creates_users_table_with_unique_email() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        ensure_schema(&db).await.unwrap();

        let log = db.into_transaction_log();
        assert_eq!(log.len(), 1);
        let sql = format!("{:?}", log[0]);
        assert!(sql.contains("CREATE TABLE IF NOT EXISTS"));
        assert!(sql.contains("UNIQUE"));
    }
}
