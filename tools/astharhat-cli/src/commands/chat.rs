//! Shopping assistant chat.

use anyhow::{Context as _, Result};
use astharhat_ai::{ChatSession, Role};
use console::style;
use dialoguer::Input;

use super::ChatArgs;
use crate::context::Context;

const EXIT_WORDS: [&str; 3] = ["exit", "quit", "/q"];

/// Run the chat command.
pub async fn run(args: ChatArgs, ctx: &Context) -> Result<()> {
    let mut session = ChatSession::new(ctx.model(), &ctx.catalog);

    if let Some(message) = args.message {
        let spinner = ctx.output.spinner("Thinking...");
        let reply = session.send(&message).await;
        spinner.finish_and_clear();

        if ctx.output.is_json() {
            ctx.output.json(&session.transcript());
        } else if let Some(reply) = reply {
            print_assistant(&reply.text);
        }
        return Ok(());
    }

    ctx.output.header("AstharHat AI Assistant");
    for message in session.transcript() {
        if message.role == Role::Model {
            print_assistant(&message.text);
        }
    }
    ctx.output.info("Type `exit` to leave.");

    loop {
        let input: String = Input::new()
            .with_prompt("You")
            .allow_empty(true)
            .interact_text()
            .context("Failed to read input")?;

        if EXIT_WORDS.contains(&input.trim()) {
            break;
        }

        let spinner = ctx.output.spinner("Thinking...");
        let reply = session.send(&input).await;
        spinner.finish_and_clear();

        if let Some(reply) = reply {
            print_assistant(&reply.text);
        }
    }

    if ctx.output.is_json() {
        ctx.output.json(&session.transcript());
    }
    Ok(())
}

fn print_assistant(text: &str) {
    println!("\n{}\n{}\n", style("AstharHat").cyan().bold(), text);
}
