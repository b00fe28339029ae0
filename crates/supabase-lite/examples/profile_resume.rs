//! Profile résumé round trip: authenticate a caller, save a PDF, read it back.
//!
//! Run with: cargo run --example profile_resume -p supabase-lite -- <pdf> [access-token]
//!
//! Requires `SUPABASE_URL` and `SUPABASE_SERVICE_ROLE_KEY` (a `.env` file works).
//! With a token the résumé is stored under the resolved user; without one a
//! fixed demo user id is used.

use supabase_lite::prelude::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEMO_USER: &str = "00000000-0000-0000-0000-000000000001";
const DEMO_TEXT: &str = "Backend engineer. Rust, PostgreSQL, distributed systems, \
                         observability and on-call ownership of payment services.";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("supabase_lite=debug,profile_resume=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut args = std::env::args().skip(1);
    let pdf_path = args.next().ok_or("usage: profile_resume <pdf> [access-token]")?;
    let token = args.next();

    let client = SupabaseClient::new(SupabaseConfig::from_env()?)?;

    // ── 1. Auth ────────────────────────────────────────────────
    println!("═══ Auth ═══");
    let user_id = match token {
        Some(token) => {
            let header = format!("Bearer {token}");
            match client.auth().authenticate(Some(&header)).await {
                Ok(user) => {
                    println!("Authenticated as {} ({:?})", user.id, user.email);
                    user.id
                }
                Err(e) => {
                    println!("{e} (would answer {})", e.status());
                    return Ok(());
                }
            }
        }
        None => {
            println!("No token given, using demo user {DEMO_USER}");
            DEMO_USER.to_string()
        }
    };

    // ── 2. Save ────────────────────────────────────────────────
    println!("\n═══ Save ═══");
    let pdf = std::fs::read(&pdf_path)?;
    let filename = std::path::Path::new(&pdf_path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("resume.pdf")
        .to_string();

    let resumes = ProfileResumes::new(client.clone());
    let saved = resumes.save(&user_id, &filename, pdf, DEMO_TEXT).await?;
    println!(
        "Saved {} at {} (uploaded {})",
        saved.filename, saved.storage_path, saved.uploaded_at
    );

    // ── 3. Read back ───────────────────────────────────────────
    println!("\n═══ Read back ═══");
    match resumes.find(&user_id).await? {
        Some(row) => println!("Row: {} / {} chars of text", row.filename, row.text.len()),
        None => println!("No row found"),
    }
    if let Some(text) = resumes.find_text(&user_id).await? {
        println!("Text: {text}");
    }

    // Raw table access through the same client.
    let resp = client
        .table("profile_resumes")
        .select("user_id,filename")
        .eq("user_id", &user_id)
        .execute()
        .await?;
    println!("Raw rows: {}", resp.rows().len());

    Ok(())
}
