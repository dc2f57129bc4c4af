//! Analyze and recommend commands

use std::io::Write;

use anyhow::Result;
use gantry::{AnalysisRequest, AssistantClient, RecommendationRequest};

use super::print_json;

const PREVIEW_CHARS: usize = 100;

fn preview(text: &str) -> String {
    let mut chars = text.chars();
    let head = chars.by_ref().take(PREVIEW_CHARS).collect::<String>();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}

pub async fn analyze(
    client: &AssistantClient,
    text: &str,
    analysis_type: &str,
    out: &mut impl Write,
) -> Result<()> {
    writeln!(out, "Analyzing text: {}", preview(text))?;
    writeln!(out, "Analysis type: {analysis_type}")?;

    let result = client
        .analyze_document(&AnalysisRequest::new(text).with_analysis_type(analysis_type))
        .await?;
    writeln!(out)?;
    print_json(out, "Analysis Results:", &result)
}

pub async fn recommend(
    client: &AssistantClient,
    query: &str,
    limit: u32,
    out: &mut impl Write,
) -> Result<()> {
    writeln!(out, "Getting recommendations for: {query}")?;
    writeln!(out, "Limit: {limit}")?;

    let result = client
        .get_recommendations(&RecommendationRequest::new(query).with_limit(limit))
        .await?;
    writeln!(out)?;
    print_json(out, "Recommendations:", &result)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{analyze, preview, recommend};
    use crate::commands::testing;

    #[test]
    fn preview_truncates_long_text() {
        assert_eq!(preview("short"), "short");
        let long = "x".repeat(150);
        assert_eq!(preview(&long), format!("{}...", "x".repeat(100)));
    }

    #[tokio::test]
    async fn analyze_and_recommend_send_their_requests() {
        let (client, service) = testing::client(vec![
            Ok(json!({ "summary": "brief" })),
            Ok(json!({ "recommendations": ["a"] })),
        ]);
        let mut out = Vec::new();

        analyze(&client, "Quarterly report", "summary", &mut out)
            .await
            .expect("analysis succeeds");
        recommend(&client, "books", 2, &mut out)
            .await
            .expect("recommendations succeed");

        let requests = service.requests.lock().expect("requests lock");
        assert_eq!(
            requests[0].1.body,
            Some(json!({ "document_text": "Quarterly report", "analysis_type": "summary" }))
        );
        assert_eq!(requests[1].0, "http://assistant.test/recommendations");
        assert_eq!(requests[1].1.body, Some(json!({ "query": "books", "limit": 2 })));

        let printed = String::from_utf8(out).expect("utf8 output");
        assert!(printed.contains("\"summary\": \"brief\""));
    }
}
