mod cli;
mod input;

use std::error::Error;
use std::sync::Arc;

use blockmind_core::agent::Agent;
use blockmind_core::catalog::builtin_registry;
use blockmind_core::coalescer::{IncomingMessage, MessageCoalescer};
use blockmind_core::config::AgentConfig;
use blockmind_core::memory::{InMemoryMemory, JsonFileMemory, Memory};
use blockmind_core::model::{ModelProvider, OpenAiClient};
use blockmind_core::tooling::ToolDispatcher;
use blockmind_core::world::OfflineWorld;
use blockmind_core::AppConfig;
use clap::Parser;
use cli::Cli;
use serde_json::json;
use tokio::io::{self, AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();
    let cli = Cli::parse();
    debug!(?cli, "CLI arguments parsed");

    let mut config = AppConfig::load(cli.config.as_deref())?;
    cli.apply(&mut config);
    info!(
        username = %config.agent.username,
        model = %config.model.model,
        endpoint = %config.model.endpoint,
        "Configuration loaded"
    );

    let registry = builtin_registry()?;
    let dispatcher = ToolDispatcher::new(Arc::new(registry));
    let provider = OpenAiClient::from_config(&config.model);
    let memory: Arc<dyn Memory> = if config.memory.enabled {
        let memory = JsonFileMemory::for_agent(&config.memory.dir, &config.agent.username);
        info!(path = %memory.path().display(), "Using file memory");
        Arc::new(memory)
    } else {
        info!("Memory persistence disabled");
        Arc::new(InMemoryMemory::new())
    };
    let world = Arc::new(OfflineWorld::new(
        config.agent.username.clone(),
        config.world.mode.clone(),
        config.world.position,
    ));

    let mut agent = Agent::resume(provider, dispatcher, memory, world, config.agent_options()).await?;

    let (coalescer, mut batches) = MessageCoalescer::spawn(config.coalescer.window);
    let own_username = config.agent.username.clone();
    let reader = tokio::spawn(async move {
        let mut lines = BufReader::new(io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    let Some(message) = input::parse_line(&line, &own_username) else {
                        continue;
                    };
                    if coalescer.push(message).await.is_err() {
                        break;
                    }
                }
                Ok(None) => break,
                Err(err) => {
                    warn!(error = %err, "Failed to read standard input");
                    break;
                }
            }
        }
        coalescer.close().await;
    });

    info!("Waiting for chat lines on standard input");
    while let Some(batch) = batches.recv().await {
        handle_batch(&mut agent, batch, &config.agent, cli.json).await?;
    }
    if let Err(err) = reader.await {
        warn!(error = %err, "Input reader task did not finish cleanly");
    }

    info!("Input closed, shutting down");
    Ok(())
}

async fn handle_batch<P: ModelProvider>(
    agent: &mut Agent<P>,
    batch: Vec<IncomingMessage>,
    settings: &AgentConfig,
    as_json: bool,
) -> Result<(), Box<dyn Error>> {
    info!(messages = batch.len(), "Processing chat batch");
    agent.push_inputs(batch);

    if settings.address_check {
        match agent.is_addressed_to_me().await {
            Ok(true) => {}
            Ok(false) => {
                debug!("Chat was not addressed to the agent");
                return Ok(());
            }
            Err(err) => warn!(error = %err, "Address check failed, answering anyway"),
        }
    }

    if as_json {
        let output = match agent.try_respond().await {
            Ok(outcome) => json!({
                "content": outcome.response,
                "tool_steps": outcome.steps,
                "stopped_by": outcome.stopped_by,
            }),
            Err(err) => json!({
                "content": err.user_message(),
                "error": err.diagnostic(),
            }),
        };
        println!("{}", serde_json::to_string(&output)?);
    } else {
        let reply = agent.respond().await;
        println!("<{}> {}", settings.username, reply);
    }

    let pruned = agent.prune_tools(settings.volatile_tools.as_slice()).await;
    if pruned > 0 {
        debug!(pruned, "Dropped stale observations");
    }
    Ok(())
}

fn init_tracing() {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    });
}
