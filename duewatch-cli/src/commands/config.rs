//! Config command - show configuration and credential status

use clap::Args;
use duewatch_core::{Config, Secrets};

/// Show current configuration
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Create a template secrets file at the default location
    #[arg(long)]
    pub init_secrets: bool,
}

fn presence(token: Option<String>) -> &'static str {
    if token.is_some() {
        "set"
    } else {
        "(not set)"
    }
}

impl ConfigArgs {
    /// Execute the config command
    pub fn execute(&self, config: &Config, secrets: &Secrets) -> anyhow::Result<()> {
        if self.init_secrets {
            let path = Secrets::create_template()?;
            println!("Created secrets template at {}", path.display());
            println!("Fill in the tokens, then keep the file mode at 600.");
            return Ok(());
        }

        println!("Duewatch Configuration");
        println!("======================");
        println!();
        println!("GitHub:");
        println!(
            "  organization: {}",
            config.github.organization.as_deref().unwrap_or("(not set)")
        );
        println!("  graphql_url: {}", config.github.graphql_url);
        println!("  timeout: {:?}", config.github.timeout);
        println!("  min_rate_remaining: {}", config.github.min_rate_remaining);
        println!();
        println!("Slack:");
        println!("  post_message_url: {}", config.slack.post_message_url);
        println!();
        println!("Directory:");
        println!("  url: {}", config.directory.url.as_deref().unwrap_or("(not set)"));
        println!();
        println!("Credentials:");
        println!("  github token: {}", presence(secrets.github_token()));
        println!("  slack bot token: {}", presence(secrets.slack_bot_token()));
        println!("  directory token: {}", presence(secrets.directory_token()));
        println!();

        if let Some(path) = Config::default_config_path() {
            println!("Config file: {}", path.display());
            if path.exists() {
                println!("  (exists)");
            } else {
                println!("  (not found - using defaults)");
            }
        }
        if let Some(path) = Secrets::default_secrets_path() {
            println!("Secrets file: {}", path.display());
            if path.exists() {
                println!("  (exists)");
            } else {
                println!("  (not found - run with --init-secrets)");
            }
        }
        Ok(())
    }
}
