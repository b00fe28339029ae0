//! PostgREST table access for supabase-lite.
//!
//! Only the subset the résumé backend needs: column selection, equality
//! filters, and upsert with merge-duplicates resolution.

pub mod builder;
mod execute;
pub mod filter;

pub use builder::{QueryBuilder, Request, MERGE_DUPLICATES};
pub use filter::{validate_column_name, validate_table_name, Filterable};

use supabase_lite_core::SupabaseClient;

/// Extension trait adding table access to [`SupabaseClient`].
pub trait SupabaseClientQueryExt {
    /// Start a query on a table.
    fn table(&self, table: &str) -> QueryBuilder;

    /// Alias of [`table`](Self::table).
    fn from_(&self, table: &str) -> QueryBuilder {
        self.table(table)
    }
}

impl SupabaseClientQueryExt for SupabaseClient {
    fn table(&self, table: &str) -> QueryBuilder {
        QueryBuilder::new(self.clone(), table)
    }
}
