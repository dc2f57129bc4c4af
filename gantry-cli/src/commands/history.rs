//! History and clear commands

use std::io::Write;

use anyhow::Result;
use gantry::AssistantClient;
use serde_json::Value;

use super::print_json;

pub async fn show(
    client: &AssistantClient,
    session: Option<&str>,
    limit: u32,
    out: &mut impl Write,
) -> Result<()> {
    writeln!(out, "Getting conversation history...")?;
    if let Some(session) = session {
        writeln!(out, "   Session ID: {session}")?;
    }
    writeln!(out, "   Limit: {limit}")?;

    let history = client.get_conversation_history(session, limit).await?;
    writeln!(out)?;
    print_json(out, "Conversation History:", &history)
}

pub async fn clear(
    client: &AssistantClient,
    session: Option<&str>,
    out: &mut impl Write,
) -> Result<()> {
    match session {
        Some(session) => writeln!(out, "Clearing conversation history for session: {session}")?,
        None => writeln!(out, "Clearing all conversation history...")?,
    }

    let result = client.clear_conversation(session).await?;
    let message = result
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("History cleared");
    writeln!(out, "{message}")?;
    Ok(())
}
