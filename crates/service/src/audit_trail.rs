use common::pagination::Pagination;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};

use models::audit_log;

use crate::errors::ServiceError;

/// List an account's audit entries, newest first, with pagination.
pub async fn list_audit_logs(
    db: &DatabaseConnection,
    account_id: i64,
    opts: Pagination,
) -> Result<Vec<audit_log::Model>, ServiceError> {
    let (page_idx, per_page) = opts.normalize();
    let rows = audit_log::Entity::find()
        .filter(audit_log::Column::AccountId.eq(account_id))
        .order_by_desc(audit_log::Column::Id)
        .paginate(db, per_page)
        .fetch_page(page_idx)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;

    #[tokio::test]
    async fn lists_newest_first_and_paginates_per_account() -> Result<(), anyhow::Error> {
        let db = test_support::get_db().await?;
        let (account, user) = test_support::seed_admin(&db).await?;
        let (other, other_user) = test_support::seed_admin(&db).await?;

        for i in 0..3 {
            audit_log::create(&db, account.id, user.id, &user.name, &format!("action_{i}"), "{}").await?;
        }
        audit_log::create(&db, other.id, other_user.id, &other_user.name, "foreign", "{}").await?;

        let page = list_audit_logs(&db, account.id, Pagination { page: 1, per_page: 2 }).await?;
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].action_name, "action_2");
        assert_eq!(page[1].action_name, "action_1");

        let rest = list_audit_logs(&db, account.id, Pagination { page: 2, per_page: 2 }).await?;
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].action_name, "action_0");
        Ok(())
    }
}
