use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::{Map, Value, json};
use std::io::{self, BufRead, Write};
use std::process;
use tokio::runtime::Runtime;
use tracing_subscriber::EnvFilter;

mod catalog;
mod client;
mod config;
mod mcp;
mod task;
mod tools;

#[derive(Parser)]
#[command(name = "mcp-chatppt")]
#[command(version, about = "MCP server for the ChatPPT document-generation API")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start MCP stdio server
    Serve {
        /// Serve MCP over stdio (NDJSON)
        #[arg(long)]
        stdio: bool,
    },
    /// Query generation progress for a task
    Query {
        /// PPT-ID returned by a build or mutate tool
        ppt_id: String,
        /// Output JSON structuredContent
        #[arg(long)]
        json: bool,
    },
    /// Build a presentation from a theme text
    Build {
        /// Theme text or markdown
        theme: String,
        /// Output JSON structuredContent
        #[arg(long)]
        json: bool,
    },
    /// Fetch the download address of a finished presentation
    Download {
        /// PPT-ID of the finished task
        ppt_id: String,
        /// Output JSON structuredContent
        #[arg(long)]
        json: bool,
    },
    /// Generate an outline from a theme text
    Outline {
        /// Theme text to outline
        text: String,
        /// Output JSON structuredContent
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { stdio } => {
            if stdio {
                run_stdio_server()
            } else {
                anyhow::bail!("only --stdio transport is supported")
            }
        }
        Commands::Query { ppt_id, json } => {
            run_tool(mcp::contracts::TOOL_QUERY, one_arg("ppt_id", ppt_id), json)
        }
        Commands::Build { theme, json } => {
            run_tool(mcp::contracts::TOOL_BUILD, one_arg("theme", theme), json)
        }
        Commands::Download { ppt_id, json } => run_tool(
            mcp::contracts::TOOL_DOWNLOAD,
            one_arg("ppt_id", ppt_id),
            json,
        ),
        Commands::Outline { text, json } => {
            run_tool(mcp::contracts::TOOL_OUTLINE, one_arg("ppt_text", text), json)
        }
    }
}

// stdout carries the MCP protocol; diagnostics go to stderr.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();
}

fn one_arg(name: &str, value: String) -> Value {
    let mut map = Map::new();
    map.insert(name.to_string(), json!(value));
    Value::Object(map)
}

fn run_tool(name: &str, args: Value, json_output: bool) -> Result<()> {
    let runtime = Runtime::new().context("failed to start async runtime")?;
    let result = runtime.block_on(tools::dispatch(name, &args));
    print_tool_result(result, json_output)
}

fn print_tool_result(result: Value, json_output: bool) -> Result<()> {
    let is_error = result
        .get("isError")
        .and_then(|value| value.as_bool())
        .unwrap_or(false);

    if is_error {
        let message = result
            .get("structuredContent")
            .and_then(|value| value.get("error"))
            .and_then(|value| value.get("message"))
            .and_then(|value| value.as_str())
            .unwrap_or("tool error");
        eprintln!("{message}");
        process::exit(1);
    }

    if json_output {
        let structured = result
            .get("structuredContent")
            .cloned()
            .unwrap_or_else(|| json!({}));
        let output = serde_json::to_string_pretty(&structured)?;
        println!("{output}");
        return Ok(());
    }

    let text = result
        .get("content")
        .and_then(|value| value.as_array())
        .and_then(|arr| arr.first())
        .and_then(|value| value.get("text"))
        .and_then(|value| value.as_str())
        .unwrap_or("");
    println!("{text}");
    Ok(())
}

fn run_stdio_server() -> Result<()> {
    let runtime = Runtime::new().context("failed to start async runtime")?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    let reader = stdin.lock().lines();
    let mut writer = io::BufWriter::new(stdout.lock());

    for line in reader {
        let line = line.context("failed to read stdin")?;
        if line.trim().is_empty() {
            continue;
        }

        let request: Value = match serde_json::from_str(&line) {
            Ok(value) => value,
            Err(_) => continue,
        };

        let method = request.get("method").and_then(|value| value.as_str());
        let id = request.get("id").cloned();
        let response = match (method, id) {
            (Some("initialize"), Some(id)) => Some(json!({
                "jsonrpc": "2.0",
                "id": id,
                "result": {
                    "protocolVersion": "2025-11-25",
                    "capabilities": {
                        "tools": {}
                    },
                    "serverInfo": {
                        "name": env!("CARGO_PKG_NAME"),
                        "version": env!("CARGO_PKG_VERSION")
                    }
                }
            })),
            (Some("tools/list"), Some(id)) => Some(json!({
                "jsonrpc": "2.0",
                "id": id,
                "result": {
                    "tools": mcp::tool_definitions()
                }
            })),
            (Some("tools/call"), Some(id)) => {
                let result = handle_tool_call(&runtime, &request);
                Some(json!({
                    "jsonrpc": "2.0",
                    "id": id,
                    "result": result
                }))
            }
            _ => None,
        };

        if let Some(response) = response {
            let serialized =
                serde_json::to_string(&response).context("failed to serialize response")?;
            writeln!(writer, "{serialized}").context("failed to write response")?;
            writer.flush().context("failed to flush response")?;
        }
    }

    Ok(())
}

fn handle_tool_call(runtime: &Runtime, request: &Value) -> Value {
    let params = request.get("params");
    let Some(params) = params.and_then(|value| value.as_object()) else {
        return tools::error_result(
            mcp::errors::INVALID_INPUT,
            "params must be an object",
            None,
        );
    };

    let name = params.get("name").and_then(|value| value.as_str());
    let Some(name) = name else {
        return tools::error_result(
            mcp::errors::INVALID_INPUT,
            "params.name must be a string",
            None,
        );
    };

    let args = params
        .get("arguments")
        .cloned()
        .unwrap_or_else(|| json!({}));

    runtime.block_on(tools::dispatch(name, &args))
}
