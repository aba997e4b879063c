//! Table and column names of the user cache, plus DDL for both tables.

use sea_query::Alias;

///
/// ColumnDef
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ColumnDef {
    pub name: &'static str,
    pub sql_type: &'static str,
}

const fn col(name: &'static str, sql_type: &'static str) -> ColumnDef {
    ColumnDef { name, sql_type }
}

///
/// CachedUsers
///
/// Locally persisted snapshots of remote user profiles. `user_id` holds the
/// user key string: `id` or `id@host`.
///

pub mod cached_users {
    use super::{ColumnDef, col};

    pub const TABLE_NAME: &str = "cached_users";

    pub const ID: &str = "_id";
    pub const USER_ID: &str = "user_id";

    pub const COLUMNS: &[ColumnDef] = &[
        col(ID, "INTEGER PRIMARY KEY AUTOINCREMENT"),
        col(USER_ID, "TEXT NOT NULL UNIQUE"),
        col("created_at", "INTEGER"),
        col("name", "TEXT"),
        col("screen_name", "TEXT"),
        col("profile_image_url", "TEXT"),
        col("description", "TEXT"),
        col("location", "TEXT"),
        col("url", "TEXT"),
        col("followers_count", "INTEGER"),
        col("friends_count", "INTEGER"),
        col("statuses_count", "INTEGER"),
        col("is_protected", "INTEGER"),
        col("is_verified", "INTEGER"),
        col("last_seen", "INTEGER"),
    ];
}

///
/// CachedRelationships
///
/// Follow/mute/block state between an account and a user. Flags are 0/1
/// and may be NULL when unknown.
///

pub mod cached_relationships {
    use super::{ColumnDef, col};

    pub const TABLE_NAME: &str = "cached_relationships";

    pub const ID: &str = "_id";
    pub const ACCOUNT_ID: &str = "account_id";
    pub const USER_ID: &str = "user_id";
    pub const FOLLOWING: &str = "following";
    pub const FOLLOWED_BY: &str = "followed_by";
    pub const BLOCKING: &str = "blocking";
    pub const BLOCKED_BY: &str = "blocked_by";
    pub const MUTING: &str = "muting";
    pub const RETWEET_ENABLED: &str = "retweet_enabled";
    pub const NOTIFICATIONS_ENABLED: &str = "notifications_enabled";

    pub const COLUMNS: &[ColumnDef] = &[
        col(ID, "INTEGER PRIMARY KEY AUTOINCREMENT"),
        col(ACCOUNT_ID, "TEXT NOT NULL"),
        col(USER_ID, "TEXT NOT NULL"),
        col(FOLLOWING, "INTEGER"),
        col(FOLLOWED_BY, "INTEGER"),
        col(BLOCKING, "INTEGER"),
        col(BLOCKED_BY, "INTEGER"),
        col(MUTING, "INTEGER"),
        col(RETWEET_ENABLED, "INTEGER"),
        col(NOTIFICATIONS_ENABLED, "INTEGER"),
    ];

    /// One relationship row per (account, user).
    pub const UNIQUE: &[&str] = &[ACCOUNT_ID, USER_ID];
}

/// `cached_users.<name>`
#[must_use]
pub fn user_column(name: &str) -> (Alias, Alias) {
    (Alias::new(cached_users::TABLE_NAME), Alias::new(name))
}

/// `cached_relationships.<name>`
#[must_use]
pub fn relationship_column(name: &str) -> (Alias, Alias) {
    (Alias::new(cached_relationships::TABLE_NAME), Alias::new(name))
}

/// `CREATE TABLE IF NOT EXISTS` statements for both cache tables.
#[must_use]
pub fn create_tables_sql() -> String {
    let mut sql = create_table_sql(cached_users::TABLE_NAME, cached_users::COLUMNS, &[]);
    sql.push('\n');
    sql.push_str(&create_table_sql(
        cached_relationships::TABLE_NAME,
        cached_relationships::COLUMNS,
        cached_relationships::UNIQUE,
    ));

    sql
}

fn create_table_sql(table: &str, columns: &[ColumnDef], unique: &[&str]) -> String {
    let mut defs: Vec<String> = columns
        .iter()
        .map(|c| format!("{} {}", c.name, c.sql_type))
        .collect();
    if !unique.is_empty() {
        defs.push(format!("UNIQUE ({})", unique.join(", ")));
    }

    format!("CREATE TABLE IF NOT EXISTS {table} ({});", defs.join(", "))
}
