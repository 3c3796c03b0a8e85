//! Prints the agent's intermediate steps while a turn runs

use async_trait::async_trait;
use finagent_runtime::ExecutorEventHandler;
use serde_json::Value;
use std::io::{self, Write};
use std::sync::Mutex;

const INPUT_PREVIEW_CHARS: usize = 120;

/// Writes one line per tool call to a terminal stream
///
/// Goes to stderr in the binary so stdout carries only answers.
pub struct ThinkingPrinter<W: Write + Send> {
    out: Mutex<W>,
}

impl ThinkingPrinter<io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write + Send> ThinkingPrinter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        match self.out.into_inner() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn line(&self, text: &str) {
        if let Ok(mut out) = self.out.lock() {
            // Display only; a closed stream must not fail the turn
            let _ = writeln!(out, "{text}");
            let _ = out.flush();
        }
    }
}

#[async_trait]
impl<W: Write + Send> ExecutorEventHandler for ThinkingPrinter<W> {
    async fn on_tool_start(&self, _id: &str, name: &str, input: &Value) {
        let args: String = input.to_string().chars().take(INPUT_PREVIEW_CHARS).collect();
        self.line(&format!("  → {name} {args}"));
    }

    async fn on_tool_done(
        &self,
        _id: &str,
        name: &str,
        result: Result<&Value, &str>,
        duration_ms: u64,
    ) {
        match result {
            Ok(_) => self.line(&format!("  ✓ {name} ({duration_ms} ms)")),
            Err(e) => self.line(&format!("  ✗ {name} ({duration_ms} ms): {e}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_prints_tool_lifecycle() {
        let printer = ThinkingPrinter::new(Vec::new());
        let input = json!({ "stock": "BBRI" });

        printer.on_tool_start("call_1", "get_daily_tx", &input).await;
        printer
            .on_tool_done("call_1", "get_daily_tx", Ok(&json!([])), 42)
            .await;
        printer
            .on_tool_done(
                "call_2",
                "get_company_report",
                Err("Please specify a section from the documentation"),
                1,
            )
            .await;
        printer.on_complete("done").await;

        let printed = String::from_utf8(printer.into_inner()).unwrap();
        assert_eq!(
            printed,
            "  → get_daily_tx {\"stock\":\"BBRI\"}\n  \
             ✓ get_daily_tx (42 ms)\n  \
             ✗ get_company_report (1 ms): Please specify a section from the documentation\n"
        );
    }

    #[tokio::test]
    async fn test_long_input_is_truncated() {
        let printer = ThinkingPrinter::new(Vec::new());
        let input = json!({ "sub_sector": "x".repeat(500) });

        printer.on_tool_start("c", "get_companies_by_subsector", &input).await;

        let printed = String::from_utf8(printer.into_inner()).unwrap();
        let args = printed.trim_end().trim_start_matches("  → get_companies_by_subsector ");
        assert_eq!(args.chars().count(), INPUT_PREVIEW_CHARS);
    }
}
