//! Snippet CLI commands: list, show, create, delete.
//!
//! `show` renders code with syntect, mapping the snippet's language and style
//! onto the bundled syntaxes and themes.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::style;
use dialoguer::Confirm;
use serde_json::{Map, Value};
use syntect::easy::HighlightLines;
use syntect::highlighting::{Style, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::{as_24_bit_terminal_escaped, LinesWithEndings};

use pastebin_core::permission::AccessPolicy;
use pastebin_types::snippet::{Snippet, SnippetId};

use crate::state::AppState;

/// List all snippets.
pub async fn list_snippets(state: &AppState, json: bool) -> Result<()> {
    let snippets = state.snippet_service.list_snippets().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&snippets)?);
        return Ok(());
    }

    if snippets.is_empty() {
        println!();
        println!("  No snippets yet. Create one with:");
        println!();
        println!("    {}", style("pastebin snippet create <file>").cyan());
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("ID").fg(Color::White),
        Cell::new("Title").fg(Color::White),
        Cell::new("Language").fg(Color::White),
        Cell::new("Owner").fg(Color::White),
        Cell::new("Lines").fg(Color::White),
        Cell::new("Created").fg(Color::White),
    ]);

    for snippet in &snippets {
        let title = if snippet.title.is_empty() {
            Cell::new("(untitled)").fg(Color::DarkGrey)
        } else {
            Cell::new(&snippet.title)
        };
        let owner = match &snippet.owner {
            Some(name) => Cell::new(name).fg(Color::Cyan),
            None => Cell::new("-").fg(Color::DarkGrey),
        };
        table.add_row(vec![
            Cell::new(snippet.id),
            title,
            Cell::new(&snippet.language),
            owner,
            Cell::new(snippet.code.lines().count()),
            Cell::new(snippet.created.format("%Y-%m-%d %H:%M").to_string()).fg(Color::DarkGrey),
        ]);
    }

    println!();
    println!("{table}");
    println!();

    Ok(())
}

/// Print one snippet, highlighted in its own language and style.
pub async fn show_snippet(state: &AppState, id: i64, json: bool) -> Result<()> {
    let snippet = state.snippet_service.get_snippet(SnippetId(id)).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&snippet)?);
        return Ok(());
    }

    let title = if snippet.title.is_empty() {
        "(untitled)"
    } else {
        snippet.title.as_str()
    };
    println!();
    println!(
        "  {} {}  {}",
        style(format!("#{}", snippet.id)).dim(),
        style(title).bold(),
        style(format!(
            "{} · {} · {}",
            snippet.language,
            snippet.style,
            snippet.owner.as_deref().unwrap_or("no owner")
        ))
        .dim()
    );
    println!();
    print!("{}", highlight_snippet(&snippet));
    println!();

    Ok(())
}

/// Create a snippet from `file`, or from stdin when no file is given.
///
/// The same validation as the API applies. With `--owner` the snippet is
/// created on behalf of that user.
#[allow(clippy::too_many_arguments)]
pub async fn create_snippet(
    state: &AppState,
    file: Option<PathBuf>,
    title: Option<String>,
    language: Option<String>,
    style_name: Option<String>,
    linenos: bool,
    owner: Option<String>,
    json: bool,
) -> Result<()> {
    let code = match &file {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read code from stdin")?;
            buf
        }
    };

    let mut payload = Map::new();
    payload.insert("code".to_string(), Value::String(code));
    if let Some(title) = title {
        payload.insert("title".to_string(), Value::String(title));
    }
    if let Some(language) = language {
        payload.insert("language".to_string(), Value::String(language));
    }
    if let Some(style_name) = style_name {
        payload.insert("style".to_string(), Value::String(style_name));
    }
    payload.insert("linenos".to_string(), Value::Bool(linenos));
    let payload = Value::Object(payload);

    let snippet = match owner {
        Some(username) => {
            let user = state.user_service.get_user_by_username(&username).await?;
            state
                .snippet_service
                .create_snippet(AccessPolicy::OwnerOrReadOnly, Some(&user), &payload)
                .await?
        }
        None => {
            state
                .snippet_service
                .create_snippet(AccessPolicy::Open, None, &payload)
                .await?
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&snippet)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} Snippet {} created",
        style("✓").green().bold(),
        style(format!("#{}", snippet.id)).cyan()
    );
    println!();

    Ok(())
}

/// Delete a snippet, asking for confirmation unless `force` is set.
pub async fn delete_snippet(state: &AppState, id: i64, force: bool, json: bool) -> Result<()> {
    let snippet = state.snippet_service.get_snippet(SnippetId(id)).await?;

    if !force && !json {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Permanently delete snippet {}?",
                style(format!("#{}", snippet.id)).red().bold()
            ))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("  Cancelled.");
            return Ok(());
        }
    }

    state
        .snippet_service
        .delete_snippet(AccessPolicy::Open, None, snippet.id)
        .await?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({ "deleted": snippet.id }))?
        );
    } else {
        println!("  {} Snippet #{} deleted", style("✓").green().bold(), snippet.id);
    }

    Ok(())
}

/// syntect theme closest to a named style.
fn theme_for_style(style_name: &str) -> &'static str {
    match style_name {
        "solarized-dark" => "Solarized (dark)",
        "solarized-light" => "Solarized (light)",
        "monokai" | "fruity" | "native" | "vim" => "base16-mocha.dark",
        _ => "base16-ocean.dark",
    }
}

/// Render a snippet as 24-bit terminal escapes, with a gutter if `linenos` is set.
fn highlight_snippet(snippet: &Snippet) -> String {
    let syntax_set = SyntaxSet::load_defaults_newlines();
    let theme_set = ThemeSet::load_defaults();

    let syntax = syntax_set
        .find_syntax_by_token(&snippet.language)
        .unwrap_or_else(|| syntax_set.find_syntax_plain_text());
    let theme = &theme_set.themes[theme_for_style(&snippet.style)];
    let mut h = HighlightLines::new(syntax, theme);

    let mut output = String::new();
    for (n, line) in LinesWithEndings::from(&snippet.code).enumerate() {
        let ranges: Vec<(Style, &str)> = h.highlight_line(line, &syntax_set).unwrap_or_default();
        let escaped = as_24_bit_terminal_escaped(&ranges[..], false);
        let gutter = if snippet.linenos {
            format!("{} ", style(format!("{:>4}", n + 1)).dim())
        } else {
            String::new()
        };
        output.push_str(&format!("  {gutter}{}\x1b[0m", escaped.trim_end_matches('\n')));
        output.push('\n');
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_theme_is_bundled() {
        let themes = ThemeSet::load_defaults();
        for style_name in pastebin_types::snippet::STYLE_CHOICES {
            let theme = theme_for_style(style_name);
            assert!(themes.themes.contains_key(theme), "{style_name} -> {theme}");
        }
    }
}
