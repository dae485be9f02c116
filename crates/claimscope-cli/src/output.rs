//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use claimscope_analyzer::AnalysisTrace;
use claimscope_domain::{PredictionBundle, MAX_NOVELTY_SCORE};
use colored::Colorize;
use serde_json::{json, Map, Value};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    show_reasoning: bool,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, show_reasoning: bool, color_enabled: bool) -> Self {
        Self {
            format,
            show_reasoning,
            color_enabled,
        }
    }

    /// Format the result of one run.
    pub fn format_trace(&self, trace: &AnalysisTrace) -> Result<String> {
        match self.format {
            OutputFormat::Text => Ok(self.format_text(&trace.clone().into_bundle())),
            OutputFormat::Json => self.format_json(trace),
        }
    }

    /// Result lines: claims, novelty and summary.
    pub fn format_text(&self, bundle: &PredictionBundle) -> String {
        let mut lines = vec![
            format!("Claims: {}", python_list_repr(&bundle.claims)),
            format!("Novelty: {}/{}", bundle.novelty_score, MAX_NOVELTY_SCORE),
        ];
        if self.show_reasoning {
            lines.push(format!("Reasoning: {}", bundle.reasoning));
        }
        lines.push(format!("Summary: {}", bundle.summary));
        lines.join("\n")
    }

    /// Bundle as pretty JSON, with stage rationales when present.
    fn format_json(&self, trace: &AnalysisTrace) -> Result<String> {
        let bundle = trace.clone().into_bundle();
        let mut document = json!({
            "claims": bundle.claims,
            "novelty_score": bundle.novelty_score,
            "reasoning": bundle.reasoning,
            "summary": bundle.summary,
        });

        let rationales: Map<String, Value> = trace
            .rationales()
            .into_iter()
            .map(|(stage, text)| (stage.to_string(), Value::String(text.to_string())))
            .collect();
        if !rationales.is_empty() {
            document["rationales"] = Value::Object(rationales);
        }

        Ok(serde_json::to_string_pretty(&document)?)
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        if self.color_enabled {
            format!("{} {}", "Error:".red().bold(), message)
        } else {
            format!("Error: {}", message)
        }
    }
}

/// Render strings the way Python prints a `list[str]`.
///
/// `["a", "it's"]` becomes `['a', "it's"]`.
pub fn python_list_repr(items: &[String]) -> String {
    let inner: Vec<String> = items.iter().map(|s| python_str_repr(s)).collect();
    format!("[{}]", inner.join(", "))
}

/// Render one string the way Python's `repr` does.
///
/// Control characters, separators other than the ASCII space and the
/// common invisible format characters are escaped as `\xNN`, `\uNNNN` or
/// `\UNNNNNNNN`. Unassigned and private-use code points are printed as-is.
pub fn python_str_repr(s: &str) -> String {
    let quote = if s.contains('\'') && !s.contains('"') { '"' } else { '\'' };

    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if is_printable(c) => out.push(c),
            c => out.push_str(&escape_code_point(c)),
        }
    }
    out.push(quote);
    out
}

fn is_printable(c: char) -> bool {
    if c == ' ' {
        return true;
    }
    if c.is_control() || c.is_whitespace() {
        return false;
    }
    !matches!(
        c,
        '\u{ad}' | '\u{200b}'..='\u{200f}' | '\u{202a}'..='\u{202e}' | '\u{2060}'..='\u{2064}' | '\u{feff}'
    )
}

fn escape_code_point(c: char) -> String {
    match c as u32 {
        n @ 0..=0xff => format!("\\x{:02x}", n),
        n @ 0x100..=0xffff => format!("\\u{:04x}", n),
        n => format!("\\U{:08x}", n),
    }
}
