use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::monkeys::id::MonkeyId;

/// One cart line joined with its monkey, as returned to the client.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CartLine {
    pub id: String,
    pub name: String,
    pub image: String,
    pub price: i32,
    pub quantity: i32,
}

pub async fn list(db: &PgPool, account_id: Uuid) -> Result<Vec<CartLine>, sqlx::Error> {
    sqlx::query_as::<_, CartLine>(
        r#"
        SELECT m.id,
               m.name,
               m.image_url AS image,
               m.price,
               c.quantity
        FROM cart_lines c
        JOIN monkeys m ON m.id = c.monkey_id
        WHERE c.account_id = $1
        ORDER BY m.id
        "#,
    )
    .bind(account_id)
    .fetch_all(db)
    .await
}

/// Insert a line with quantity 1, or bump the existing line's quantity.
///
/// The upsert is a single store operation so two concurrent adds for the same
/// pair converge to one line with the correct total.
pub async fn add(db: &PgPool, account_id: Uuid, monkey_id: &MonkeyId) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO cart_lines (account_id, monkey_id, quantity)
        VALUES ($1, $2, 1)
        ON CONFLICT (account_id, monkey_id)
            DO UPDATE SET quantity = cart_lines.quantity + 1
        "#,
    )
    .bind(account_id)
    .bind(monkey_id.as_str())
    .execute(db)
    .await?;
    Ok(())
}

/// Delete a line. Removing a line that does not exist is not an error.
pub async fn remove(
    db: &PgPool,
    account_id: Uuid,
    monkey_id: &MonkeyId,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        DELETE FROM cart_lines
        WHERE account_id = $1 AND monkey_id = $2
        "#,
    )
    .bind(account_id)
    .bind(monkey_id.as_str())
    .execute(db)
    .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::repo::Account;

    fn monkey(raw: &str) -> MonkeyId {
        MonkeyId::parse(raw).expect("seeded id")
    }

    #[sqlx::test]
    async fn add_twice_increments_a_single_line(pool: PgPool) {
        let account = Account::create(&pool, "carter", "carter@x.com", "digest")
            .await
            .expect("account");
        let id = monkey("monk-002");

        add(&pool, account.id, &id).await.expect("first add");
        add(&pool, account.id, &id).await.expect("second add");

        let lines = list(&pool, account.id).await.expect("list");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].id, "monk-002");
        assert_eq!(lines[0].quantity, 2);
    }

    #[sqlx::test]
    async fn remove_missing_line_is_not_an_error(pool: PgPool) {
        let account = Account::create(&pool, "dana", "dana@x.com", "digest")
            .await
            .expect("account");
        let id = monkey("monk-003");

        remove(&pool, account.id, &id).await.expect("first remove");
        remove(&pool, account.id, &id).await.expect("second remove");
        assert!(list(&pool, account.id).await.expect("list").is_empty());
    }

    #[sqlx::test]
    async fn remove_deletes_the_whole_line(pool: PgPool) {
        let account = Account::create(&pool, "elia", "elia@x.com", "digest")
            .await
            .expect("account");
        let id = monkey("monk-004");

        add(&pool, account.id, &id).await.expect("add");
        add(&pool, account.id, &id).await.expect("add again");
        remove(&pool, account.id, &id).await.expect("remove");

        // No zero-quantity residue.
        assert!(list(&pool, account.id).await.expect("list").is_empty());
    }
}
