//! SQL implementation of the entity store
//!
//! Email uniqueness is a table constraint and booking transitions are single
//! conditional `UPDATE ... RETURNING` statements, so the database provides the
//! atomicity the services rely on.

use crate::error::DbError;
use crate::repository::{BookingChange, EntityStore, SwapOutcome};
use crate::DbClient;
use schedulink_common::models::{NewSlot, NewUser, Slot, SlotChanges, SlotFilter, User};
use sqlx::any::{AnyArguments, AnyRow};
use sqlx::query::Query;
use sqlx::{Any, Decode, Row, Type, ValueRef};
use tracing::{debug, error, info};

const USER_COLUMNS: &str = "id, email, name, phone";
const SLOT_COLUMNS: &str =
    "id, title, description, date, start_time, end_time, is_booked, user_id, booked_by_user_id";

const CREATE_USERS: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        email TEXT NOT NULL UNIQUE,
        name TEXT NOT NULL,
        phone TEXT
    )
"#;

// user_id and booked_by_user_id carry no foreign keys; dangling ids are allowed.
const CREATE_SLOTS: &str = r#"
    CREATE TABLE IF NOT EXISTS slots (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        description TEXT,
        date TEXT NOT NULL,
        start_time TEXT NOT NULL,
        end_time TEXT NOT NULL,
        is_booked INTEGER NOT NULL DEFAULT 0,
        user_id INTEGER,
        booked_by_user_id INTEGER,
        CHECK ((is_booked = 0 AND booked_by_user_id IS NULL)
            OR (is_booked = 1 AND booked_by_user_id IS NOT NULL))
    )
"#;

const CREATE_SLOTS_DATE_INDEX: &str = "CREATE INDEX IF NOT EXISTS idx_slots_date ON slots (date)";

/// A value bound into a dynamically built statement.
enum SqlValue {
    Text(String),
    Int(i64),
}

fn bind_value<'q>(
    query: Query<'q, Any, AnyArguments<'q>>,
    value: SqlValue,
) -> Query<'q, Any, AnyArguments<'q>> {
    match value {
        SqlValue::Text(text) => query.bind(text),
        SqlValue::Int(int) => query.bind(int),
    }
}

/// Hands out `$1`, `$2`, ... in order.
#[derive(Default)]
struct Placeholders(usize);

impl Placeholders {
    fn next(&mut self) -> String {
        self.0 += 1;
        format!("${}", self.0)
    }
}

/// Reads a nullable column.
///
/// The Any driver reports a NULL value with its own NULL type, which no
/// `Option<T>` decoder accepts, so NULL is checked on the raw value first.
fn nullable<'r, T>(row: &'r AnyRow, column: &str) -> Result<Option<T>, DbError>
where
    T: Decode<'r, Any> + Type<Any>,
{
    if row.try_get_raw(column)?.is_null() {
        return Ok(None);
    }
    Ok(Some(row.try_get(column)?))
}

fn user_from_row(row: &AnyRow) -> Result<User, DbError> {
    Ok(User {
        id: row.try_get("id")?,
        email: row.try_get("email")?,
        name: row.try_get("name")?,
        phone: nullable(row, "phone")?,
    })
}

fn slot_from_row(row: &AnyRow) -> Result<Slot, DbError> {
    Ok(Slot {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        description: nullable(row, "description")?,
        date: row.try_get("date")?,
        start_time: row.try_get("start_time")?,
        end_time: row.try_get("end_time")?,
        is_booked: row.try_get::<i64, _>("is_booked")? != 0,
        creator_id: nullable(row, "user_id")?,
        booked_by_id: nullable(row, "booked_by_user_id")?,
    })
}

/// SQL implementation of the entity store
#[derive(Debug, Clone)]
pub struct SqlEntityStore {
    db_client: DbClient,
}

impl SqlEntityStore {
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }

    /// Create the `users` and `slots` tables if they don't already exist.
    pub async fn init_schema(&self) -> Result<(), DbError> {
        debug!("Initializing scheduling schema");

        let mut tx = self.db_client.begin().await?;
        for statement in [CREATE_USERS, CREATE_SLOTS, CREATE_SLOTS_DATE_INDEX] {
            sqlx::query(statement)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    error!("Failed to initialize schema: {}", e);
                    DbError::QueryError(e.to_string())
                })?;
        }
        tx.commit()
            .await
            .map_err(|e| DbError::TransactionError(e.to_string()))?;

        info!("Scheduling schema initialized successfully");
        Ok(())
    }

    /// INSERT with only the columns that carry a value, returning `returning`.
    async fn insert_row(
        &self,
        table: &str,
        values: Vec<(&str, SqlValue)>,
        returning: &str,
    ) -> Result<AnyRow, sqlx::Error> {
        let mut params = Placeholders::default();
        let columns: Vec<&str> = values.iter().map(|(column, _)| *column).collect();
        let placeholders: Vec<String> = values.iter().map(|_| params.next()).collect();
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
            table,
            columns.join(", "),
            placeholders.join(", "),
            returning
        );

        let mut query = sqlx::query(&sql);
        for (_, value) in values {
            query = bind_value(query, value);
        }
        query.fetch_one(self.db_client.pool()).await
    }
}

impl EntityStore for SqlEntityStore {
    async fn insert_user(&self, user: NewUser) -> Result<User, DbError> {
        debug!("Inserting user: {}", user.email);

        let mut values = vec![
            ("email", SqlValue::Text(user.email.clone())),
            ("name", SqlValue::Text(user.name)),
        ];
        if let Some(phone) = user.phone {
            values.push(("phone", SqlValue::Text(phone)));
        }

        let row = self
            .insert_row("users", values, USER_COLUMNS)
            .await
            .map_err(|e| {
                let err = DbError::from_query(e, &user.email);
                if !matches!(err, DbError::UniqueViolation(_)) {
                    error!("Failed to insert user: {}", err);
                }
                err
            })?;
        user_from_row(&row)
    }

    async fn get_user(&self, id: i64) -> Result<Option<User>, DbError> {
        let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to find user {}: {}", id, e);
                DbError::QueryError(e.to_string())
            })?;
        row.as_ref().map(user_from_row).transpose()
    }

    async fn list_users(&self) -> Result<Vec<User>, DbError> {
        let sql = format!("SELECT {} FROM users ORDER BY id", USER_COLUMNS);
        let rows = sqlx::query(&sql)
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to list users: {}", e);
                DbError::QueryError(e.to_string())
            })?;
        rows.iter().map(user_from_row).collect()
    }

    async fn insert_slot(&self, slot: NewSlot) -> Result<Slot, DbError> {
        debug!("Inserting slot: {} on {}", slot.title, slot.date);

        let mut values = vec![
            ("title", SqlValue::Text(slot.title)),
            ("date", SqlValue::Text(slot.date)),
            ("start_time", SqlValue::Text(slot.start_time)),
            ("end_time", SqlValue::Text(slot.end_time)),
        ];
        if let Some(description) = slot.description {
            values.push(("description", SqlValue::Text(description)));
        }
        if let Some(creator_id) = slot.creator_id {
            values.push(("user_id", SqlValue::Int(creator_id)));
        }

        let row = self
            .insert_row("slots", values, SLOT_COLUMNS)
            .await
            .map_err(|e| {
                error!("Failed to insert slot: {}", e);
                DbError::QueryError(e.to_string())
            })?;
        slot_from_row(&row)
    }

    async fn get_slot(&self, id: i64) -> Result<Option<Slot>, DbError> {
        let sql = format!("SELECT {} FROM slots WHERE id = $1", SLOT_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to find slot {}: {}", id, e);
                DbError::QueryError(e.to_string())
            })?;
        row.as_ref().map(slot_from_row).transpose()
    }

    async fn list_slots(&self, filter: &SlotFilter) -> Result<Vec<Slot>, DbError> {
        let mut params = Placeholders::default();
        let mut clauses = Vec::new();
        let mut values = Vec::new();

        if let Some(date) = &filter.date {
            clauses.push(format!("date = {}", params.next()));
            values.push(SqlValue::Text(date.clone()));
        }
        if let Some(is_booked) = filter.is_booked {
            clauses.push(format!("is_booked = {}", params.next()));
            values.push(SqlValue::Int(i64::from(is_booked)));
        }
        if let Some(creator_id) = filter.creator_id {
            clauses.push(format!("user_id = {}", params.next()));
            values.push(SqlValue::Int(creator_id));
        }
        if let Some(booked_by_id) = filter.booked_by_id {
            clauses.push(format!("booked_by_user_id = {}", params.next()));
            values.push(SqlValue::Int(booked_by_id));
        }

        let mut sql = format!("SELECT {} FROM slots", SLOT_COLUMNS);
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY id");

        let mut query = sqlx::query(&sql);
        for value in values {
            query = bind_value(query, value);
        }
        let rows = query
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to list slots: {}", e);
                DbError::QueryError(e.to_string())
            })?;
        rows.iter().map(slot_from_row).collect()
    }

    async fn update_slot(&self, id: i64, changes: SlotChanges) -> Result<Option<Slot>, DbError> {
        // `None` inside an assignment clears the column
        let assignments: Vec<(&str, Option<String>)> = [
            ("title", changes.title.map(Some)),
            ("description", changes.description),
            ("date", changes.date.map(Some)),
            ("start_time", changes.start_time.map(Some)),
            ("end_time", changes.end_time.map(Some)),
        ]
        .into_iter()
        .filter_map(|(column, value)| value.map(|v| (column, v)))
        .collect();

        if assignments.is_empty() {
            return self.get_slot(id).await;
        }

        let mut params = Placeholders::default();
        let set_clause: Vec<String> = assignments
            .iter()
            .map(|(column, value)| match value {
                Some(_) => format!("{} = {}", column, params.next()),
                None => format!("{} = NULL", column),
            })
            .collect();
        let sql = format!(
            "UPDATE slots SET {} WHERE id = {} RETURNING {}",
            set_clause.join(", "),
            params.next(),
            SLOT_COLUMNS
        );

        let mut query = sqlx::query(&sql);
        for value in assignments.into_iter().filter_map(|(_, value)| value) {
            query = query.bind(value);
        }
        let row = query
            .bind(id)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to update slot {}: {}", id, e);
                DbError::QueryError(e.to_string())
            })?;
        row.as_ref().map(slot_from_row).transpose()
    }

    async fn delete_slot(&self, id: i64) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM slots WHERE id = $1")
            .bind(id)
            .execute(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to delete slot {}: {}", id, e);
                DbError::QueryError(e.to_string())
            })?;
        Ok(result.rows_affected() > 0)
    }

    async fn swap_booking(&self, id: i64, change: BookingChange) -> Result<SwapOutcome, DbError> {
        let (sql, binds) = match change {
            BookingChange::Book { user_id } => (
                format!(
                    "UPDATE slots SET is_booked = 1, booked_by_user_id = $1 \
                     WHERE id = $2 AND is_booked = 0 RETURNING {}",
                    SLOT_COLUMNS
                ),
                vec![user_id, id],
            ),
            // NULL is written literally; the Any driver can't bind an untyped None
            BookingChange::Release => (
                format!(
                    "UPDATE slots SET is_booked = 0, booked_by_user_id = NULL \
                     WHERE id = $1 AND is_booked = 1 RETURNING {}",
                    SLOT_COLUMNS
                ),
                vec![id],
            ),
        };

        let mut query = sqlx::query(&sql);
        for value in binds {
            query = query.bind(value);
        }
        let row = query
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to swap booking on slot {}: {}", id, e);
                DbError::QueryError(e.to_string())
            })?;

        match row {
            Some(row) => Ok(SwapOutcome::Swapped(slot_from_row(&row)?)),
            None => Ok(match self.get_slot(id).await? {
                Some(current) => SwapOutcome::Conflict(current),
                None => SwapOutcome::Missing,
            }),
        }
    }
}
