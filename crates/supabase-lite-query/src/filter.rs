use std::collections::BTreeMap;
use std::fmt::Display;

use supabase_lite_core::{SupabaseError, SupabaseResult};

/// Query-string keys the builder owns; a filter on a column of the same name
/// would clobber them.
pub const RESERVED_PARAMS: &[&str] = &["select", "on_conflict", "order", "limit", "offset"];

/// Filter methods for query builders.
///
/// Filters are stored as PostgREST query parameters keyed by column, so a
/// second filter on the same column replaces the first.
pub trait Filterable: Sized {
    /// Get a mutable reference to the query parameters.
    fn params_mut(&mut self) -> &mut BTreeMap<String, String>;

    /// Record a builder error to be returned when the query executes.
    fn defer_error(&mut self, err: SupabaseError);

    /// Filter: column = value (`column=eq.value`)
    ///
    /// An invalid column name makes `execute` fail with a validation error.
    fn eq(mut self, column: &str, value: impl Display) -> Self {
        if let Err(e) = validate_column_name(column) {
            tracing::error!("Invalid column name in eq filter: {e}");
            self.defer_error(e);
            return self;
        }
        self.params_mut()
            .insert(column.to_string(), format!("eq.{value}"));
        self
    }
}

/// Validate a column name used as a filter key.
pub fn validate_column_name(name: &str) -> SupabaseResult<()> {
    if name.trim().is_empty() {
        return Err(SupabaseError::validation("Column name cannot be empty"));
    }
    if RESERVED_PARAMS.contains(&name) {
        return Err(SupabaseError::validation(format!(
            "Column name {name:?} collides with a reserved query parameter"
        )));
    }
    if name.contains(['"', ';', '&', '=', '?', '#']) || name.contains("--") {
        return Err(SupabaseError::validation(format!(
            "Invalid column name: {name:?} (contains prohibited characters)"
        )));
    }
    Ok(())
}

/// Validate a table name before it is placed in a URL path.
pub fn validate_table_name(name: &str) -> SupabaseResult<()> {
    if name.trim().is_empty() {
        return Err(SupabaseError::validation("Table name cannot be empty"));
    }
    if name.contains(['/', '?', '#', '"', ';', ' ']) || name.contains("..") {
        return Err(SupabaseError::validation(format!(
            "Invalid table name: {name:?} (contains prohibited characters)"
        )));
    }
    Ok(())
}
