//! CLI argument definitions

use clap::{Parser, Subcommand};

use gantry::gassistant::{
    DEFAULT_ANALYSIS_TYPE, DEFAULT_HISTORY_LIMIT, DEFAULT_RECOMMENDATION_LIMIT,
};
use gantry::gtransport::DEFAULT_BASE_URL;

#[derive(Parser)]
#[command(name = "gantry")]
#[command(author, version, about = "Command-line client for the assistant service")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Assistant service URL
    #[arg(short, long, global = true, env = "ASSISTANT_URL", default_value = DEFAULT_BASE_URL)]
    pub url: String,

    /// Request timeout in seconds
    #[arg(short, long, global = true, default_value_t = 30)]
    pub timeout: u64,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check service health
    Health,

    /// Get system status
    Status,

    /// List available models
    Models,

    /// Start an interactive chat on stdin
    Chat,

    /// Ask a single question
    Ask {
        question: String,

        /// Additional context as a JSON object
        #[arg(short, long)]
        context: Option<String>,
    },

    /// Analyze a document
    Analyze {
        text: String,

        /// Analysis type
        #[arg(long = "type", default_value = DEFAULT_ANALYSIS_TYPE)]
        analysis_type: String,
    },

    /// Get recommendations
    Recommend {
        query: String,

        /// Number of recommendations
        #[arg(short, long, default_value_t = DEFAULT_RECOMMENDATION_LIMIT)]
        limit: u32,
    },

    /// Get conversation history
    History {
        /// Number of messages
        #[arg(short, long, default_value_t = DEFAULT_HISTORY_LIMIT)]
        limit: u32,

        /// Session ID
        #[arg(short, long)]
        session: Option<String>,
    },

    /// Clear conversation history
    Clear {
        /// Session ID
        #[arg(short, long)]
        session: Option<String>,
    },
}
