//! User CLI commands: create, list.

use std::collections::HashMap;

use anyhow::Result;
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::style;
use dialoguer::Password;

use pastebin_types::user::CreateUserRequest;

use crate::state::AppState;

/// Create a user. Prompts for the password when `--password` is not given.
///
/// # Examples
///
/// ```bash
/// pastebin user create alice --email alice@example.com
/// ```
pub async fn create_user(
    state: &AppState,
    username: String,
    email: Option<String>,
    password: Option<String>,
    json: bool,
) -> Result<()> {
    let password = match password {
        Some(p) => p,
        None => Password::new()
            .with_prompt(format!("Password for {username}"))
            .with_confirmation("Repeat password", "Passwords do not match")
            .interact()?,
    };

    let user = state
        .user_service
        .create_user(CreateUserRequest {
            username,
            email,
            password,
        })
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&user)?);
        return Ok(());
    }

    println!();
    println!("  {} User created", style("✓").green().bold());
    println!();
    println!("  {}  {}", style("ID:").bold(), user.id);
    println!("  {}  {}", style("Username:").bold(), style(&user.username).cyan());
    if !user.email.is_empty() {
        println!("  {}  {}", style("Email:").bold(), user.email);
    }
    println!();

    Ok(())
}

/// List users with their snippet counts.
pub async fn list_users(state: &AppState, json: bool) -> Result<()> {
    let users = state.user_service.list_users().await?;
    let snippet_counts: HashMap<_, _> = state
        .user_service
        .list_profiles()
        .await?
        .into_iter()
        .map(|p| (p.id, p.snippets.len()))
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&users)?);
        return Ok(());
    }

    if users.is_empty() {
        println!();
        println!("  No users yet. Create one with:");
        println!();
        println!("    {}", style("pastebin user create <username>").cyan());
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("ID").fg(Color::White),
        Cell::new("Username").fg(Color::White),
        Cell::new("Email").fg(Color::White),
        Cell::new("Snippets").fg(Color::White),
        Cell::new("Joined").fg(Color::White),
    ]);

    for user in &users {
        table.add_row(vec![
            Cell::new(user.id),
            Cell::new(&user.username).fg(Color::Cyan),
            Cell::new(&user.email),
            Cell::new(snippet_counts.get(&user.id).copied().unwrap_or(0)),
            Cell::new(user.date_joined.format("%Y-%m-%d").to_string()).fg(Color::DarkGrey),
        ]);
    }

    println!();
    println!("{table}");
    println!();

    Ok(())
}
