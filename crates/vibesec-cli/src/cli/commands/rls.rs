//! `vibesec rls` – query the demo notes table with or without row-level security.

use anyhow::{Context, Result};
use std::io::{self, Write};
use vibesec_core::rls::NotesTable;

use crate::cli::render::write_json;
use crate::cli::Outcome;

pub struct RlsArgs {
    pub user: String,
    pub rls: bool,
    /// `OWNER=DATA` rows to insert first.
    pub add: Vec<String>,
    pub empty: bool,
    pub json: bool,
}

fn build_table(add: &[String], empty: bool) -> Result<NotesTable> {
    let mut table = if empty {
        NotesTable::new()
    } else {
        NotesTable::with_demo_rows()
    };
    for row in add {
        let (owner, data) = row
            .split_once('=')
            .with_context(|| format!("--add expects OWNER=DATA, got '{row}'"))?;
        table
            .insert(owner, data)
            .with_context(|| format!("--add '{row}': owner and data must be non-empty"))?;
    }
    Ok(table)
}

pub fn run_rls(args: &RlsArgs) -> Result<Outcome> {
    let table = build_table(&args.add, args.empty)?;
    let result = table.query(&args.user, args.rls);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.json {
        write_json(&mut out, &result)?;
    } else {
        writeln!(out, "{}", result.sql)?;
        writeln!(out, "{}", result.title())?;
        for note in &result.rows {
            let mark = if note.owner == result.user { " " } else { "!" };
            writeln!(out, "{mark} {:>3}  {:<12} {}", note.id, note.owner, note.data)?;
        }
        if let Some(warning) = result.warning() {
            writeln!(out, "{warning}")?;
        }
    }
    Ok(Outcome::flagged_if(result.exposed > 0))
}
