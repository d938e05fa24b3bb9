//! Navigation state
//!
//! The catalog → schema → table selection and the transitions between
//! selections. A `Selection` is never edited in place: every navigation step
//! produces a whole new value, which is what keeps the prefix invariant
//! (`table` implies `schema` implies `catalog`).

use std::collections::HashMap;

/// Label of the first breadcrumb
pub const HOME: &str = "Home";

/// The currently drilled-into catalog/schema/table triple
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    catalog: Option<String>,
    schema: Option<String>,
    table: Option<String>,
}

impl Selection {
    /// Nothing selected
    pub fn new() -> Self {
        Self::default()
    }

    /// `{catalog, -, -}` regardless of what was selected before
    pub fn select_catalog(catalog: impl Into<String>) -> Self {
        Self {
            catalog: Some(catalog.into()),
            schema: None,
            table: None,
        }
    }

    /// `{catalog, schema, -}`. The catalog is taken as given.
    pub fn select_schema(catalog: impl Into<String>, schema: impl Into<String>) -> Self {
        Self {
            catalog: Some(catalog.into()),
            schema: Some(schema.into()),
            table: None,
        }
    }

    /// `{catalog, schema, table}`
    pub fn select_table(
        catalog: impl Into<String>,
        schema: impl Into<String>,
        table: impl Into<String>,
    ) -> Self {
        Self {
            catalog: Some(catalog.into()),
            schema: Some(schema.into()),
            table: Some(table.into()),
        }
    }

    pub fn catalog(&self) -> Option<&str> {
        self.catalog.as_deref()
    }

    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    pub fn table(&self) -> Option<&str> {
        self.table.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.catalog.is_none()
    }

    /// "Home" followed by one label per selected level, outermost first
    pub fn breadcrumbs(&self) -> Vec<&str> {
        let mut trail = vec![HOME];
        trail.extend(
            [&self.catalog, &self.schema, &self.table]
                .into_iter()
                .map_while(|level| level.as_deref()),
        );
        trail
    }

    /// Heading for the content pane, named after the deepest selected level
    pub fn title(&self) -> String {
        match (&self.catalog, &self.schema, &self.table) {
            (_, _, Some(table)) => format!("Table: {}", table),
            (_, Some(schema), None) => format!("Schema: {}", schema),
            (Some(catalog), None, None) => format!("Catalog: {}", catalog),
            (None, _, _) => "Welcome".to_string(),
        }
    }

    /// Dot-joined name of the deepest selected level (`hive.default.t1`)
    pub fn qualified_name(&self) -> Option<String> {
        let trail = self.breadcrumbs();
        let parts = &trail[1..];
        if parts.is_empty() {
            None
        } else {
            Some(parts.join("."))
        }
    }

    /// The keys a load at `level` must have been issued for to still apply
    pub fn parents_of(&self, level: Level) -> Vec<String> {
        let keys = [&self.catalog, &self.schema, &self.table];
        keys.into_iter()
            .take(level.depth())
            .map_while(|k| k.clone())
            .collect()
    }
}

/// A hierarchy level that can be loaded from the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Catalogs,
    Schemas,
    Tables,
    /// Column metadata of the selected table
    Details,
}

impl Level {
    /// Number of parent keys a load at this level is parameterised by
    pub fn depth(self) -> usize {
        match self {
            Level::Catalogs => 0,
            Level::Schemas => 1,
            Level::Tables => 2,
            Level::Details => 3,
        }
    }

    /// What a panel at this level shows for an empty listing
    pub fn empty_message(self) -> &'static str {
        match self {
            Level::Catalogs => "No catalogs found",
            Level::Schemas => "No schemas found in this catalog",
            Level::Tables => "No tables found in this schema",
            Level::Details => "No columns found for this table",
        }
    }

    pub fn noun(self) -> &'static str {
        match self {
            Level::Catalogs => "catalogs",
            Level::Schemas => "schemas",
            Level::Tables => "tables",
            Level::Details => "columns",
        }
    }
}

/// A navigation request raised by a list row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavIntent {
    SelectCatalog {
        catalog: String,
    },
    SelectSchema {
        catalog: String,
        schema: String,
    },
    SelectTable {
        catalog: String,
        schema: String,
        table: String,
    },
}

impl NavIntent {
    /// The selection this intent leads to
    pub fn apply(&self) -> Selection {
        match self {
            NavIntent::SelectCatalog { catalog } => Selection::select_catalog(catalog.as_str()),
            NavIntent::SelectSchema { catalog, schema } => {
                Selection::select_schema(catalog.as_str(), schema.as_str())
            }
            NavIntent::SelectTable {
                catalog,
                schema,
                table,
            } => Selection::select_table(catalog.as_str(), schema.as_str(), table.as_str()),
        }
    }
}

/// Identifies one load so its response can be matched against current state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    pub level: Level,
    /// Monotonic across all levels, never reused
    pub seq: u64,
    /// Parent keys the request was issued for
    pub parents: Vec<String>,
}

/// What to do with a response that is no longer the newest for its level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StalePolicy {
    /// Drop responses that were superseded or whose parents are no longer selected
    #[default]
    Discard,
    /// Render whatever arrives last
    LastWins,
}

/// Issues load tickets and remembers the newest one per level
#[derive(Debug, Default)]
pub struct LoadTracker {
    next_seq: u64,
    latest: HashMap<Level, u64>,
}

impl LoadTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket for a new load, superseding older loads at that level
    pub fn issue(&mut self, level: Level, parents: Vec<String>) -> LoadTicket {
        self.next_seq += 1;
        self.latest.insert(level, self.next_seq);
        LoadTicket {
            level,
            seq: self.next_seq,
            parents,
        }
    }

    /// Whether no newer load has been issued at the ticket's level
    pub fn is_latest(&self, ticket: &LoadTicket) -> bool {
        self.latest.get(&ticket.level) == Some(&ticket.seq)
    }

    /// Whether a response for `ticket` should still be applied
    pub fn accepts(&self, ticket: &LoadTicket, selection: &Selection, policy: StalePolicy) -> bool {
        match policy {
            StalePolicy::LastWins => true,
            StalePolicy::Discard => {
                self.is_latest(ticket) && selection.parents_of(ticket.level) == ticket.parents
            }
        }
    }
}
