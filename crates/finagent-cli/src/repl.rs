//! Line handling for the interactive chat

use std::io::BufRead;

/// What a line typed at the prompt means
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    /// End the session
    Exit,
    /// Blank line, nothing to do
    Empty,
    /// A question for the agent, trimmed
    Turn(&'a str),
}

pub fn parse_line(raw: &str) -> Line<'_> {
    match raw.trim() {
        "" => Line::Empty,
        "/exit" | "/quit" => Line::Exit,
        text => Line::Turn(text),
    }
}

/// Read the next raw line; `None` at end of input or once stdin fails
pub fn read_line(input: &mut impl BufRead) -> Option<String> {
    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(0) => None,
        Ok(_) => Some(line),
        Err(e) => {
            eprintln!("Error reading input: {e}");
            None
        }
    }
}

pub fn print_banner() {
    println!(
        r"
╔══════════════════════════════════════════════════════════════╗
║                    Financials Agent AI                       ║
║                                                              ║
║  Ask about companies listed on the Indonesia Stock Exchange: ║
║    What are the top 5 most traded stocks yesterday?          ║
║    Show the dividend report of BBCA                          ║
║    Which banks are listed on IDX?                            ║
║                                                              ║
║  /exit or Ctrl-D to quit                                     ║
╚══════════════════════════════════════════════════════════════╝
"
    );
}
