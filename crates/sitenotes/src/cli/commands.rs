//! # CLI Layer
//!
//! The only place that knows about stdout, stderr, stdin, and export files.
//!
//! ## Responsibilities
//!
//! 1. **Argument parsing**: `setup.rs` turns shell arguments into [`Commands`]
//! 2. **Context setup**: load [`NotesConfig`], apply `--store`, build the API
//! 3. **Dispatch**: call the matching `SiteNotesApi` method
//! 4. **Output**: render the `CmdResult` as text or JSON
//!
//! Errors bubble up to `main.rs`, which prints them and exits non-zero.

use super::render::{
    now_millis, print_messages, render_domains, render_full_notes, render_note_list,
};
use super::setup::{Cli, Commands};
use crate::logging::{init_logging, LogConfig};
use anyhow::{bail, Context, Result};
use clap::Parser;
use sitenotesapp::api::SiteNotesApi;
use sitenotesapp::commands::CmdResult;
use sitenotesapp::config::NotesConfig;
use sitenotesapp::store::fs_backend::FsBackend;
use std::fs;
use std::io::{IsTerminal, Read};
use std::path::{Path, PathBuf};

struct AppContext {
    api: SiteNotesApi<FsBackend>,
    json: bool,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&LogConfig::from_verbosity(cli.verbose));

    let ctx = init_context(&cli)?;

    match cli.command {
        Commands::List { domain, full } => handle_list(&ctx, &domain, full),
        Commands::Add { domain, text } => handle_add(&ctx, &domain, text),
        Commands::Update { domain, id, text } => handle_update(&ctx, &domain, &id, text),
        Commands::Delete { domain, id } => handle_delete(&ctx, &domain, &id),
        Commands::Clear { domain, yes } => handle_clear(&ctx, &domain, yes),
        Commands::Search { domain, term } => handle_search(&ctx, &domain, &term.join(" ")),
        Commands::Export { domain, output } => handle_export(&ctx, &domain, output),
        Commands::Domains => handle_domains(&ctx),
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let mut config = NotesConfig::load(cli.config.as_deref())?;
    if let Some(store) = &cli.store {
        config.store_file = Some(store.clone());
    }
    tracing::debug!(?config, "configuration loaded");

    Ok(AppContext {
        api: SiteNotesApi::from_config(&config)?,
        json: cli.json,
    })
}

fn handle_list(ctx: &AppContext, domain: &str, full: bool) -> Result<()> {
    let result = ctx.api.list_notes(domain)?;
    print_listing(ctx, &result, full)
}

fn handle_search(ctx: &AppContext, domain: &str, term: &str) -> Result<()> {
    let result = ctx.api.search_notes(domain, term)?;
    print_listing(ctx, &result, false)
}

fn handle_add(ctx: &AppContext, domain: &str, words: Vec<String>) -> Result<()> {
    let text = text_from_args_or_stdin(words)?;
    let result = ctx.api.add_note(domain, &text)?;
    print_mutation(ctx, &result)
}

fn handle_update(ctx: &AppContext, domain: &str, id: &str, words: Vec<String>) -> Result<()> {
    let text = text_from_args_or_stdin(words)?;
    let result = ctx.api.update_note(domain, id, &text)?;
    print_mutation(ctx, &result)
}

fn handle_delete(ctx: &AppContext, domain: &str, id: &str) -> Result<()> {
    let result = ctx.api.delete_note(domain, id)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_clear(ctx: &AppContext, domain: &str, yes: bool) -> Result<()> {
    if !yes {
        bail!("refusing to delete every note for {domain} without --yes");
    }
    let result = ctx.api.clear_domain(domain)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_export(ctx: &AppContext, domain: &str, output: Option<PathBuf>) -> Result<()> {
    let result = ctx.api.export_notes(domain)?;
    let Some(export) = result.export else {
        print_messages(&result.messages);
        return Ok(());
    };

    if output.as_deref() == Some(Path::new("-")) {
        println!("{}", export.json);
        return Ok(());
    }

    let target = export_target(output, &export.filename);
    fs::write(&target, format!("{}\n", export.json))
        .with_context(|| format!("writing export to {}", target.display()))?;
    tracing::debug!(path = %target.display(), "export written");

    print_messages(&result.messages);
    println!("{}", target.display());
    Ok(())
}

fn handle_domains(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.domains()?;
    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&result.domains)?);
        return Ok(());
    }
    print!("{}", render_domains(&result.domains));
    print_messages(&result.messages);
    Ok(())
}

fn print_listing(ctx: &AppContext, result: &CmdResult, full: bool) -> Result<()> {
    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&result.listed_notes)?);
        return Ok(());
    }
    if full {
        print!("{}", render_full_notes(&result.listed_notes));
    } else {
        print!("{}", render_note_list(&result.listed_notes, now_millis()));
    }
    print_messages(&result.messages);
    Ok(())
}

fn print_mutation(ctx: &AppContext, result: &CmdResult) -> Result<()> {
    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&result.affected_notes)?);
        return Ok(());
    }
    print_messages(&result.messages);
    Ok(())
}

/// Joined argument words, or all of stdin when no words were given and
/// input is piped.
fn text_from_args_or_stdin(words: Vec<String>) -> Result<String> {
    if !words.is_empty() {
        return Ok(words.join(" "));
    }
    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        bail!("no note text given (pass it as arguments or pipe it on stdin)");
    }
    let mut buffer = String::new();
    stdin
        .lock()
        .read_to_string(&mut buffer)
        .context("reading note text from stdin")?;
    Ok(buffer)
}

fn export_target(output: Option<PathBuf>, suggested: &str) -> PathBuf {
    match output {
        Some(path) if path.is_dir() => path.join(suggested),
        Some(path) => path,
        None => PathBuf::from(suggested),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_target_defaults_to_suggested_name() {
        assert_eq!(
            export_target(None, "secure-notes-a.com-2026-10-16.json"),
            PathBuf::from("secure-notes-a.com-2026-10-16.json")
        );
    }

    #[test]
    fn export_target_joins_directories() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            export_target(Some(dir.path().to_path_buf()), "n.json"),
            dir.path().join("n.json")
        );
        let file = dir.path().join("mine.json");
        assert_eq!(export_target(Some(file.clone()), "n.json"), file);
    }

    #[test]
    fn argument_words_are_joined() {
        let text = text_from_args_or_stdin(vec!["a".into(), "b".into()]).unwrap();
        assert_eq!(text, "a b");
    }
}
