//! Interactive chat with the IDX financial agent
//!
//! # Usage
//!
//! ```bash
//! export SECTORS_API_KEY="..."
//! export GROQ_API_KEY="..."
//!
//! cargo run --bin finagent
//! ```

use clap::Parser;
use finagent_cli::repl::{Line, parse_line, print_banner, read_line};
use finagent_cli::{Args, ChatSession, Notice, ThinkingPrinter};
use std::io::{self, Write};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    finagent_utils::init_tracing(&args.log);

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout();

    let settings = args.into_settings(&mut input, &mut stdout)?;
    info!(model = %settings.agent.model, "Starting finagent");

    let agent = finagent_sectors::connect(&settings.sectors, settings.groq, &settings.agent)?
        .event_handler(Arc::new(ThinkingPrinter::stderr()))
        .build()?;
    let mut session = ChatSession::new(Arc::new(agent));

    print_banner();

    loop {
        print!("> ");
        stdout.flush()?;

        let Some(line) = read_line(&mut input) else {
            break;
        };

        let question = match parse_line(&line) {
            Line::Exit => break,
            Line::Empty => continue,
            Line::Turn(text) => text,
        };

        eprintln!("🧠 thinking...");
        match session.submit(question).await {
            Ok(answer) => println!("{answer}\n"),
            Err(e) => eprintln!("{}\n", Notice::from(&e)),
        }
    }

    println!("Goodbye!");
    Ok(())
}
