//! reagent command implementations

use anyhow::{Context, Result};
use std::io::Write;
use tracing::info;

use reagent_agent::tools::default_tools;
use reagent_agent::{AgentOptions, ReactAgent};
use reagent_config::{self, Config};
use reagent_provider::OpenAiCompatProvider;

/// Initialize config
pub async fn init_command() -> Result<()> {
    println!("◆ Initializing reagent...");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let config = reagent_config::init()
        .await
        .context("Failed to write default config")?;

    println!("Config:    {}", reagent_config::config_path().display());
    println!("Model:     {}", model_label(&config));

    println!("\n◆ reagent initialized");
    println!("\nNext steps:");
    println!("  1. Add your model API key to ~/.reagent/config.json");
    println!("     (or export OPENAI_API_KEY)");
    println!("  2. Add your Ares search key under tools.ares.api_key");
    println!("     (or export TRAVERSAAL_ARES_API_KEY)");
    println!("  3. Ask something: reagent ask -m \"What is the capital of France?\"");

    Ok(())
}

fn model_label(config: &Config) -> String {
    config
        .model()
        .unwrap_or_else(|| "[Provider default]".to_string())
}

/// Build an agent from config
async fn build_agent(max_steps: Option<u32>) -> Result<ReactAgent<OpenAiCompatProvider>> {
    let config = Config::load().await.context("Failed to load config")?;

    let api_key = config
        .api_key()
        .context("No API key configured. Set provider.api_key in ~/.reagent/config.json")?;
    let provider = OpenAiCompatProvider::new(api_key, config.api_base(), config.model());

    let tools = default_tools(&config).context("Failed to set up tools")?;

    let mut options = AgentOptions::from_config(&config);
    if let Some(max_steps) = max_steps {
        options.max_steps = max_steps;
    }

    Ok(ReactAgent::with_options(provider, tools, options))
}

/// Ask the agent, once or interactively
pub async fn ask_command(message: Option<String>, max_steps: Option<u32>) -> Result<()> {
    let mut agent = build_agent(max_steps).await?;

    if let Some(msg) = message {
        let report = agent.run(&msg).await;
        info!(
            "◆ TURN DONE: steps={}, dispatches={}",
            report.steps, report.dispatches
        );
        println!("\n◆ {}", report.outcome.into_text());
        return Ok(());
    }

    println!("◆ Interactive mode (type 'exit' to quit)");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    loop {
        print!("◆ ");
        std::io::stdout().flush()?;

        let mut input = String::new();
        if std::io::stdin().read_line(&mut input)? == 0 {
            break;
        }

        let input = input.trim();
        if input.is_empty() {
            continue;
        }
        if input == "exit" || input == "quit" {
            break;
        }

        let answer = agent.call(input).await;
        println!("\n◆ {}\n", answer);
    }

    Ok(())
}

/// Show system status
pub async fn status_command() -> Result<()> {
    let config_path = reagent_config::config_path();

    println!("◆ reagent System Status");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    println!(
        "Config:    {} {}",
        config_path.display(),
        if config_path.exists() {
            "[OK]"
        } else {
            "[Missing]"
        }
    );

    let config = Config::load().await.context("Failed to load config")?;
    println!("Model:     {}", model_label(&config));
    println!(
        "API Key:   {}",
        if config.has_api_key() {
            "[Set]"
        } else {
            "[Missing]"
        }
    );
    println!(
        "API Base:  {}",
        config.api_base().unwrap_or_else(|| "[Default]".to_string())
    );
    println!("Max steps: {}", config.max_steps());
    println!(
        "Ares:      {}",
        match (config.tools.ares.enabled, config.ares_api_key().is_some()) {
            (false, _) => "[Disabled]",
            (true, true) => "[Enabled]",
            (true, false) => "[Enabled, key missing]",
        }
    );

    println!("\n◆ Ready");

    Ok(())
}

/// List enabled tools as the model sees them
pub async fn tools_command() -> Result<()> {
    let config = Config::load().await.context("Failed to load config")?;
    let registry = default_tools(&config).context("Failed to set up tools")?;

    if registry.is_empty() {
        println!("No tools enabled");
        return Ok(());
    }

    println!("◆ {} tool(s)", registry.len());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("{}", registry.catalogue());

    Ok(())
}
