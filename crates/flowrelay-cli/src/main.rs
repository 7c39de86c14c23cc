//! flowrelay command-line client.
//!
//! Provides the `flowrelay` binary for talking to the configured flow engine
//! without starting the HTTP server. Uses the same `ChatService` as the
//! server's `/chat` endpoint, so a message produces the same result from both
//! entry points.

use std::process;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use flowrelay_core::{ChatRequest, FlowConfig};
use flowrelay_server::client::FlowClient;
use flowrelay_server::service::ChatService;
use flowrelay_server::telemetry;

/// LangFlow chat relay tools.
#[derive(Parser)]
#[command(name = "flowrelay", about = "LangFlow chat relay tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Send one message to the flow and print the chat result as JSON.
    Ask {
        /// Message to send.
        message: String,

        /// Conversation id to echo back (default: a fresh UUID).
        #[arg(short, long)]
        conversation_id: Option<String>,
    },
    /// Resolve configuration and print the flow endpoint.
    CheckConfig,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    telemetry::init_tracing("warn");

    let cli = Cli::parse();

    let exit_code = match cli.command {
        Commands::Ask {
            message,
            conversation_id,
        } => run_ask(message, conversation_id).await,
        Commands::CheckConfig => run_check_config(),
    };

    process::exit(exit_code);
}

async fn run_ask(message: String, conversation_id: Option<String>) -> i32 {
    let config = match FlowConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {}", err);
            return 1;
        }
    };
    let client = match FlowClient::new(config) {
        Ok(client) => client,
        Err(err) => {
            eprintln!("error: {}", err);
            return 1;
        }
    };
    let service = ChatService::new(Arc::new(client));

    let mut request = ChatRequest::new(message);
    request.conversation_id = conversation_id;

    match service.handle_chat(request).await {
        Ok(result) => match serde_json::to_string_pretty(&result) {
            Ok(json) => {
                println!("{}", json);
                0
            }
            Err(err) => {
                eprintln!("error: failed to encode result: {}", err);
                1
            }
        },
        Err(err) => {
            eprintln!("error: LangFlow execution error: {}", err);
            1
        }
    }
}

fn run_check_config() -> i32 {
    match FlowConfig::from_env() {
        Ok(config) => {
            println!("endpoint: {}", config.run_url());
            println!("api key:  configured");
            println!("timeout:  {}s", config.timeout().as_secs());
            0
        }
        Err(err) => {
            eprintln!("error: {}", err);
            1
        }
    }
}
