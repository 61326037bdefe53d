use super::{ask_confirmation, open_db, open_session};
use crate::cli::parser::{Commands, NoteAction};
use crate::config::Config;
use crate::core::filter::NoteSearch;
use crate::core::notes;
use crate::errors::AppResult;
use crate::models::{ClientNote, NoteForm};
use crate::session::{View, authorize};
use crate::ui::messages::{info, success};
use crate::utils::colors::{CYAN, GREY, RESET};

const NOTE_WRAP_WIDTH: usize = 72;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Note { action } = cmd else {
        return Ok(());
    };

    let session = open_session(cfg);
    authorize(View::Notes, &session)?;
    let store = open_db(cfg)?;

    match action {
        NoteAction::List { search } => {
            let search = NoteSearch {
                term: search.clone(),
            };
            print_notes(&notes::list(&store, &session, &search)?);
        }
        NoteAction::Add { client, text } => {
            let form = NoteForm {
                client_name: client.clone(),
                note: text.clone(),
            };
            let added = notes::create(&store, &session, &form)?;
            success(format!("Note added for {}", added.client_name));
        }
        NoteAction::Edit { id, client, text } => {
            // Fields left out keep their stored value.
            let current = notes::get(&store, id)?;
            let client = client.as_deref().unwrap_or(&current.client_name);
            let text = text.as_deref().unwrap_or(&current.note);
            notes::update(&store, &session, id, client, text)?;
            success(format!("Note {} updated", id));
        }
        NoteAction::Del { id, yes } => {
            let note = notes::get(&store, id)?;
            if !*yes
                && !ask_confirmation(&format!(
                    "Delete the note for {}? This action is irreversible.",
                    note.client_name
                ))
            {
                info("Operation cancelled.");
                return Ok(());
            }
            notes::delete(&store, &session, id)?;
            success(format!("Note {} deleted", id));
        }
    }
    Ok(())
}

fn print_notes(rows: &[ClientNote]) {
    if rows.is_empty() {
        info("No notes found");
        return;
    }
    for n in rows {
        println!(
            "{CYAN}{}{RESET}  {GREY}{}  updated {}{RESET}",
            n.client_name, n.id, n.updated_at
        );
        for line in textwrap::wrap(&n.note, NOTE_WRAP_WIDTH) {
            println!("    {}", line);
        }
        println!();
    }
    info(format!("{} note(s)", rows.len()));
}
