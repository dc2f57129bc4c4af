//! Ask command

use std::io::Write;

use anyhow::{Result, bail};
use gantry::{AssistantClient, ChatRequest};
use serde_json::{Map, Value};

use super::print_reply;

/// Context must be a JSON object; anything else is rejected before any request is sent.
pub fn parse_context(raw: Option<&str>) -> Result<Map<String, Value>> {
    let Some(raw) = raw else {
        return Ok(Map::new());
    };

    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(context)) => Ok(context),
        _ => bail!("Invalid JSON context: {raw}"),
    }
}

pub async fn run(
    client: &AssistantClient,
    question: &str,
    context: Option<&str>,
    out: &mut impl Write,
) -> Result<()> {
    let context = parse_context(context)?;

    writeln!(out, "Question: {question}")?;
    if !context.is_empty() {
        writeln!(
            out,
            "Context: {}",
            serde_json::to_string_pretty(&Value::Object(context.clone()))?
        )?;
    }

    let response = client
        .ask_question(&ChatRequest::new(question).with_context(context))
        .await?;
    writeln!(out)?;
    print_reply(out, &response)
}
