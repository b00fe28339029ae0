//! Shared building blocks for the supabase-lite crates: deployment
//! coordinates, the root client, the error type, and the normalized table
//! response.

pub mod client;
pub mod config;
pub mod error;
pub mod response;
pub mod value;

pub use client::SupabaseClient;
pub use config::SupabaseConfig;
pub use error::{SupabaseError, SupabaseResult};
pub use response::{Decode, SupabaseResponse};
pub use value::Row;
