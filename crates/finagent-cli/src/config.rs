//! Command-line arguments and credential entry

use anyhow::{Context, Result, bail};
use clap::Parser;
use finagent_llm::providers::GroqConfig;
use finagent_sectors::config::DEFAULT_BASE_URL;
use finagent_sectors::{AgentSettings, DEFAULT_MODEL, SectorsConfig};
use finagent_utils::ApiKey;
use std::io::{BufRead, Write};

#[derive(Parser, Debug)]
#[command(name = "finagent")]
#[command(about = "Ask questions about IDX-listed companies", long_about = None)]
#[command(version)]
pub struct Args {
    /// sectors.app API key (asked for interactively if not given)
    #[arg(long, env = "SECTORS_API_KEY", hide_env_values = true)]
    pub sectors_api_key: Option<String>,

    /// Groq API key (asked for interactively if not given)
    #[arg(long, env = "GROQ_API_KEY", hide_env_values = true)]
    pub groq_api_key: Option<String>,

    /// Chat model
    #[arg(long, env = "GROQ_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Groq API base URL
    #[arg(long, env = "GROQ_API_BASE")]
    pub groq_api_base: Option<String>,

    /// sectors.app API base URL
    #[arg(long, env = "SECTORS_API_BASE", default_value = DEFAULT_BASE_URL)]
    pub sectors_api_base: String,

    /// Model request timeout in seconds; waits indefinitely if unset
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Maximum model calls per question
    #[arg(long, default_value_t = 10)]
    pub max_iterations: usize,

    /// Default log filter, overridden by RUST_LOG
    #[arg(long, default_value = "warn")]
    pub log: String,
}

/// Everything needed to start a session
#[derive(Debug)]
pub struct Settings {
    pub sectors: SectorsConfig,
    pub groq: GroqConfig,
    pub agent: AgentSettings,
}

impl Args {
    /// Resolve settings, prompting on `output` / reading `input` for missing keys
    pub fn into_settings(self, input: &mut impl BufRead, output: &mut impl Write) -> Result<Settings> {
        let sectors_key = resolve_key(self.sectors_api_key, "Sectors API Key", input, output)?;
        let groq_key = resolve_key(self.groq_api_key, "Groq API Key", input, output)?;

        let sectors = SectorsConfig::new(sectors_key)?.with_base_url(&self.sectors_api_base)?;

        let mut groq = GroqConfig::new(groq_key);
        if let Some(base) = self.groq_api_base {
            groq = groq.with_api_base(base);
        }
        if let Some(secs) = self.timeout_secs {
            groq = groq.with_timeout(secs);
        }

        let agent = AgentSettings {
            model: self.model,
            max_iterations: self.max_iterations,
            ..AgentSettings::default()
        };

        Ok(Settings {
            sectors,
            groq,
            agent,
        })
    }
}

/// Use the given key, or ask for it once
fn resolve_key(
    given: Option<String>,
    label: &str,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<ApiKey> {
    if let Some(key) = given.map(ApiKey::new).filter(|k| !k.is_empty()) {
        return Ok(key);
    }

    write!(output, "{label}: ")?;
    output.flush()?;

    let mut line = String::new();
    input
        .read_line(&mut line)
        .with_context(|| format!("failed to read {label}"))?;

    let key = ApiKey::new(line);
    if key.is_empty() {
        bail!("{label} is required");
    }
    Ok(key)
}
