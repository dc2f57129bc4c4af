//! Interactive chat loop

use std::io::{BufRead, Write};

use anyhow::Result;
use gantry::{AssistantClient, ChatRequest};

use super::{print_json, print_reply};

const HELP: &str = "Available commands:
  * Type any question or message to chat
  * 'status' - Check system status
  * 'models' - List available models
  * 'clear' - Clear conversation history
  * 'quit' or 'exit' - End session";

/// Reads one line per turn until EOF or a quit word. Request failures are
/// reported and the loop keeps going.
pub async fn run(
    client: &AssistantClient,
    input: impl BufRead,
    out: &mut impl Write,
) -> Result<()> {
    writeln!(out, "Interactive chat. Type 'quit' or 'exit' to end, 'help' for commands.")?;

    let mut lines = input.lines();
    loop {
        write!(out, "\nYou: ")?;
        out.flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let message = line.trim();

        match message.to_ascii_lowercase().as_str() {
            "" => continue,
            "quit" | "exit" | "q" => break,
            "help" => writeln!(out, "{HELP}")?,
            command => {
                if let Err(error) = turn(client, command, message, out).await {
                    tracing::warn!(error = %error, "chat turn failed");
                    writeln!(out, "Error: {error}")?;
                    writeln!(out, "Please check if the assistant service is running")?;
                }
            }
        }
    }

    writeln!(out, "Goodbye!")?;
    Ok(())
}

async fn turn(
    client: &AssistantClient,
    command: &str,
    message: &str,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        "status" => print_json(out, "System Status:", &client.get_system_status().await?),
        "models" => print_json(out, "Available Models:", &client.get_available_models().await?),
        "clear" => {
            client.clear_conversation(None).await?;
            writeln!(out, "Conversation history cleared")?;
            Ok(())
        }
        _ => {
            let response = client.chat(&ChatRequest::new(message)).await?;
            print_reply(out, &response)
        }
    }
}
