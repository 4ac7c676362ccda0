//! Translation of a [`RecordQuery`] into SQL fragments.
//!
//! Repositories splice the fragments into their `SELECT` and then bind the
//! collected values in the same order the placeholders were numbered:
//! name pattern, owner keys, limit, offset.

use rpgdash_core::store::{Direction, Field, Filter, RecordQuery};

/// Maps a rankable field to its column in one table.
pub type ColumnMap = fn(Field) -> Option<&'static str>;

/// How one table exposes the query vocabulary.
pub struct Table {
    pub columns: ColumnMap,
    /// Expression matched by name searches; `None` if the table has no name.
    /// Defaults blank names the same way the record conversion does.
    pub name_expr: Option<&'static str>,
    /// Column matched by owner-key restrictions.
    pub owner_column: Option<&'static str>,
}

fn character_column(field: Field) -> Option<&'static str> {
    Some(match field {
        Field::Id => "id",
        Field::OwnerKey => "owner_key",
        Field::Level => "level",
        Field::Experience => "experience",
        Field::Bounty => "bounty",
        Field::Reputation => "reputation",
        Field::KilledPlayers => "killed_players",
        Field::RpPoints => "rp_points",
        Field::MonstersKilled => "monsters_killed",
        Field::ItemsCrafted => "items_crafted",
        Field::ResourcesGathered => "resources_gathered",
        Field::BossesKilled => "bosses_killed",
        Field::Platinum => "platinum",
        Field::Gold => "gold",
        Field::Silver => "silver",
        Field::Bronze => "bronze",
        Field::Points => return None,
    })
}

fn progress_column(field: Field) -> Option<&'static str> {
    match field {
        Field::OwnerKey => Some("owner_key"),
        Field::Level => Some("level"),
        Field::Experience => Some("xp"),
        _ => None,
    }
}

fn clan_column(field: Field) -> Option<&'static str> {
    match field {
        Field::Id => Some("id"),
        Field::Level => Some("level"),
        Field::Points => Some("points"),
        _ => None,
    }
}

pub const CHARACTERS: Table = Table {
    columns: character_column,
    name_expr: Some("COALESCE(NULLIF(TRIM(name), ''), 'Unknown')"),
    owner_column: Some("owner_key"),
};

pub const LEVEL_PROGRESS: Table = Table {
    columns: progress_column,
    name_expr: None,
    owner_column: Some("owner_key"),
};

pub const CLANS: Table = Table {
    columns: clan_column,
    name_expr: Some("name"),
    owner_column: None,
};

/// Escape LIKE metacharacters and wrap in `%` for a substring match with
/// `ESCAPE '\'`.
pub fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// SQL fragments for one query plus the values to bind, in bind order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clauses {
    /// `WHERE ...`, or empty.
    pub where_clause: String,
    /// `ORDER BY ...`, or empty.
    pub order_by: String,
    /// `LIMIT $n OFFSET $m`. A NULL limit fetches every row.
    pub window: String,
    pub name_pattern: Option<String>,
    pub owner_keys: Option<Vec<String>>,
    pub limit: Option<i64>,
    pub offset: i64,
}

fn filter_condition(filter: Filter, columns: ColumnMap) -> Option<String> {
    let compare = |field: Field, op: &str| {
        columns(field).map_or_else(|| "FALSE".to_string(), |col| format!("{col} {op} 0"))
    };
    match filter {
        Filter::All => None,
        Filter::Positive(field) => Some(compare(field, ">")),
        Filter::Negative(field) => Some(compare(field, "<")),
        Filter::AnyPositive(fields) => {
            let parts: Vec<String> = fields
                .iter()
                .filter_map(|f| columns(*f))
                .map(|col| format!("{col} > 0"))
                .collect();
            if parts.is_empty() {
                Some("FALSE".to_string())
            } else {
                Some(format!("({})", parts.join(" OR ")))
            }
        }
    }
}

/// Build the clauses for `query` against `table`.
pub fn build(query: &RecordQuery, table: &Table) -> Clauses {
    let mut conditions = Vec::new();
    let mut bind_idx = 1u32;
    let mut name_pattern = None;
    let mut owner_keys = None;

    if let Some(condition) = filter_condition(query.filter, table.columns) {
        conditions.push(condition);
    }

    if let Some(term) = query.name_contains.as_deref().filter(|t| !t.is_empty()) {
        match table.name_expr {
            Some(expr) => {
                conditions.push(format!("{expr} ILIKE ${bind_idx} ESCAPE '\\'"));
                bind_idx += 1;
                name_pattern = Some(like_pattern(term));
            }
            None => conditions.push("FALSE".to_string()),
        }
    }

    if let Some(keys) = &query.owner_keys {
        match table.owner_column {
            Some(col) => {
                conditions.push(format!("{col} = ANY(${bind_idx})"));
                bind_idx += 1;
                owner_keys = Some(keys.clone());
            }
            None => conditions.push("FALSE".to_string()),
        }
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    let sort: Vec<String> = query
        .sort
        .iter()
        .filter_map(|key| {
            let col = (table.columns)(key.field)?;
            let dir = match key.direction {
                Direction::Ascending => "ASC",
                Direction::Descending => "DESC",
            };
            Some(format!("{col} {dir}"))
        })
        .collect();
    let order_by = if sort.is_empty() {
        String::new()
    } else {
        format!("ORDER BY {}", sort.join(", "))
    };

    Clauses {
        where_clause,
        order_by,
        window: format!("LIMIT ${bind_idx} OFFSET ${}", bind_idx + 1),
        name_pattern,
        owner_keys,
        limit: query.limit.map(|l| i64::try_from(l).unwrap_or(i64::MAX)),
        offset: i64::try_from(query.skip).unwrap_or(i64::MAX),
    }
}
