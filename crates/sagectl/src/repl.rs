//! REPL - conversational interface for Sage.
//!
//! Plain stdin loop: each line goes through the coach against the
//! session's history; `clear` resets the session, `quit` leaves.

use crate::render;
use crate::session::SessionStore;
use anyhow::Result;
use chrono::Local;
use console::style;
use sage_core::coach::{Coach, ConversationEntry};
use std::io::{self, BufRead, Write};
use uuid::Uuid;

fn print_welcome() {
    println!();
    println!("{}", style("Sage - food waste & nutrition coach").green().bold());
    println!("Tell me what's in your kitchen (e.g. \"tomato, bread, cheese\").");
    println!("Commands: 'clear' resets the conversation, 'quit' exits.");
    println!();
}

fn print_prompt() {
    print!("{} ", style("you>").cyan().bold());
    let _ = io::stdout().flush();
}

/// Run the interactive chat loop until EOF or `quit`.
pub fn run(coach: &mut Coach) -> Result<()> {
    print_welcome();

    let session_id = Uuid::new_v4().to_string();
    let mut store = SessionStore::new();

    print_prompt();
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let input = line.trim();

        match input {
            "" => {}
            "quit" | "exit" => break,
            "clear" => {
                store.clear(&session_id);
                println!("{}", style("Conversation cleared.").dim());
            }
            message => {
                let today = Local::now().date_naive();
                let reply = {
                    let history = store.history(&session_id);
                    coach.respond(message, history, today)
                };
                let text = render::render_reply(&reply);

                store.append(&session_id, ConversationEntry::user(message));
                store.append(&session_id, ConversationEntry::coach(text.clone()));

                println!();
                println!("{text}");
                println!();
            }
        }

        print_prompt();
    }

    println!();
    println!("{}", style("Happy cooking - waste less, eat well!").green());
    Ok(())
}
