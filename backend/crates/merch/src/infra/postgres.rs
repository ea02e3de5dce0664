//! PostgreSQL Ledger Store
//!
//! Balance changes are single guarded `UPDATE` statements, so concurrent
//! transactions on the same account serialize on the row lock and re-check
//! the guard against the committed balance. Integrity violations raised by
//! the schema are mapped back to domain errors.

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres};

use crate::domain::entity::{
    Account, InventoryEntry, NewAccount, Purchase, ReceivedCoins, SentCoins,
};
use crate::domain::repository::{LedgerStore, LedgerTransaction};
use crate::domain::value_object::{Coins, ItemName, UserName, UserPassword};
use crate::error::{MerchError, MerchResult};

/// PostgreSQL-backed Ledger Store
#[derive(Clone)]
pub struct PgLedgerStore {
    pool: PgPool,
}

impl PgLedgerStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Open PostgreSQL transaction
///
/// `sqlx::Transaction` rolls back on drop unless committed.
pub struct PgLedgerTransaction {
    tx: sqlx::Transaction<'static, Postgres>,
}

// ============================================================================
// Error mapping
// ============================================================================

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation())
}

fn is_check_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|db_err| db_err.is_check_violation())
}

/// Map a foreign key violation to the missing side of the reference
fn map_foreign_key_violation(err: sqlx::Error) -> MerchError {
    let Some(db_err) = err.as_database_error() else {
        return MerchError::Database(err);
    };
    if !db_err.is_foreign_key_violation() {
        return MerchError::Database(err);
    }
    match db_err.constraint() {
        Some(constraint) if constraint.contains("item") => MerchError::ItemNotFound,
        _ => MerchError::UserNotFound,
    }
}

// ============================================================================
// Ledger Store Implementation
// ============================================================================

impl LedgerStore for PgLedgerStore {
    type Transaction = PgLedgerTransaction;

    async fn begin(&self) -> MerchResult<PgLedgerTransaction> {
        let tx = self.pool.begin().await?;
        Ok(PgLedgerTransaction { tx })
    }

    async fn find_account(&self, user_name: &UserName) -> MerchResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT
                username,
                password_hash,
                coins,
                created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(user_name.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_account()).transpose()
    }

    async fn create_account(&self, account: &NewAccount) -> MerchResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (
                username,
                password_hash,
                coins
            ) VALUES ($1, $2, $3)
            "#,
        )
        .bind(account.user_name.as_str())
        .bind(account.password_hash.as_phc_string())
        .bind(account.starting_balance.as_db())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                MerchError::UserAlreadyExists
            } else {
                MerchError::Database(e)
            }
        })?;

        Ok(())
    }

    async fn find_price(&self, item: &ItemName) -> MerchResult<Option<Coins>> {
        let price: Option<i64> = sqlx::query_scalar("SELECT price FROM products WHERE item = $1")
            .bind(item.as_str())
            .fetch_optional(&self.pool)
            .await?;

        price.map(Coins::from_db).transpose()
    }

    async fn list_inventory(&self, user_name: &UserName) -> MerchResult<Vec<InventoryEntry>> {
        let rows = sqlx::query_as::<_, InventoryRow>(
            r#"
            SELECT item, quantity
            FROM inventory
            WHERE username = $1 AND quantity > 0
            ORDER BY item
            "#,
        )
        .bind(user_name.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|r| r.into_entry()).collect()
    }

    async fn list_sent(&self, user_name: &UserName) -> MerchResult<Vec<SentCoins>> {
        let rows = sqlx::query_as::<_, TransferRow>(
            r#"
            SELECT to_username AS counterparty, amount
            FROM coin_transfers
            WHERE from_username = $1
            ORDER BY transfer_id
            "#,
        )
        .bind(user_name.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|r| {
                Ok(SentCoins {
                    amount: Coins::from_db(r.amount)?,
                    to_user: UserName::from_db(r.counterparty),
                })
            })
            .collect()
    }

    async fn list_received(&self, user_name: &UserName) -> MerchResult<Vec<ReceivedCoins>> {
        let rows = sqlx::query_as::<_, TransferRow>(
            r#"
            SELECT from_username AS counterparty, amount
            FROM coin_transfers
            WHERE to_username = $1
            ORDER BY transfer_id
            "#,
        )
        .bind(user_name.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|r| {
                Ok(ReceivedCoins {
                    amount: Coins::from_db(r.amount)?,
                    from_user: UserName::from_db(r.counterparty),
                })
            })
            .collect()
    }
}

// ============================================================================
// Ledger Transaction Implementation
// ============================================================================

impl LedgerTransaction for PgLedgerTransaction {
    async fn deduct_coins(&mut self, user_name: &UserName, amount: Coins) -> MerchResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET coins = coins - $2
            WHERE username = $1 AND coins >= $2
            "#,
        )
        .bind(user_name.as_str())
        .bind(amount.as_db())
        .execute(&mut *self.tx)
        .await?;

        if result.rows_affected() == 1 {
            return Ok(());
        }

        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE username = $1)")
                .bind(user_name.as_str())
                .fetch_one(&mut *self.tx)
                .await?;

        if exists {
            Err(MerchError::InsufficientFunds)
        } else {
            Err(MerchError::UserNotFound)
        }
    }

    async fn add_coins(&mut self, user_name: &UserName, amount: Coins) -> MerchResult<()> {
        let result = sqlx::query("UPDATE users SET coins = coins + $2 WHERE username = $1")
            .bind(user_name.as_str())
            .bind(amount.as_db())
            .execute(&mut *self.tx)
            .await
            .map_err(|e| {
                if is_check_violation(&e) {
                    MerchError::BalanceOverflow
                } else {
                    MerchError::Database(e)
                }
            })?;

        if result.rows_affected() == 0 {
            return Err(MerchError::UserNotFound);
        }

        Ok(())
    }

    async fn record_purchase(&mut self, purchase: &Purchase) -> MerchResult<()> {
        sqlx::query(
            r#"
            INSERT INTO purchases (
                username,
                item,
                price
            ) VALUES ($1, $2, $3)
            "#,
        )
        .bind(purchase.buyer.as_str())
        .bind(purchase.item.as_str())
        .bind(purchase.price.as_db())
        .execute(&mut *self.tx)
        .await
        .map_err(map_foreign_key_violation)?;

        Ok(())
    }

    async fn credit_inventory(&mut self, user_name: &UserName, item: &ItemName) -> MerchResult<()> {
        sqlx::query(
            r#"
            INSERT INTO inventory (username, item, quantity)
            VALUES ($1, $2, 1)
            ON CONFLICT (username, item)
            DO UPDATE SET quantity = inventory.quantity + 1
            "#,
        )
        .bind(user_name.as_str())
        .bind(item.as_str())
        .execute(&mut *self.tx)
        .await
        .map_err(map_foreign_key_violation)?;

        Ok(())
    }

    async fn record_transfer(
        &mut self,
        from: &UserName,
        to: &UserName,
        amount: Coins,
    ) -> MerchResult<()> {
        sqlx::query(
            r#"
            INSERT INTO coin_transfers (
                from_username,
                to_username,
                amount
            ) VALUES ($1, $2, $3)
            "#,
        )
        .bind(from.as_str())
        .bind(to.as_str())
        .bind(amount.as_db())
        .execute(&mut *self.tx)
        .await
        .map_err(map_foreign_key_violation)?;

        Ok(())
    }

    async fn commit(self) -> MerchResult<()> {
        self.tx.commit().await?;
        Ok(())
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct AccountRow {
    username: String,
    password_hash: String,
    coins: i64,
    created_at: DateTime<Utc>,
}

impl AccountRow {
    fn into_account(self) -> MerchResult<Account> {
        Ok(Account {
            user_name: UserName::from_db(self.username),
            password_hash: UserPassword::from_phc_string(self.password_hash)?,
            coins: Coins::from_db(self.coins)?,
            created_at: self.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct InventoryRow {
    item: String,
    quantity: i32,
}

impl InventoryRow {
    fn into_entry(self) -> MerchResult<InventoryEntry> {
        let quantity = u32::try_from(self.quantity).map_err(|_| {
            MerchError::Internal(format!("negative inventory quantity: {}", self.quantity))
        })?;
        Ok(InventoryEntry {
            item: ItemName::from_db(self.item),
            quantity,
        })
    }
}

#[derive(sqlx::FromRow)]
struct TransferRow {
    counterparty: String,
    amount: i64,
}
