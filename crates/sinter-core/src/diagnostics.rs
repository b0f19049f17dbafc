use crate::span::Span;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::sync::{Arc, Mutex};

/// Runtime configuration for emitting diagnostics.
#[derive(Debug, Clone)]
pub struct DiagnosticDisplayOptions {
    pub template: DiagnosticTemplate,
    pub verbose_info: bool,
}

/// Built-in output templates supported by the diagnostic manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticTemplate {
    Pretty,
    Plain,
}

impl DiagnosticDisplayOptions {
    pub fn pretty(verbose_info: bool) -> Self {
        Self {
            template: DiagnosticTemplate::Pretty,
            verbose_info,
        }
    }

    pub fn plain(verbose_info: bool) -> Self {
        Self {
            template: DiagnosticTemplate::Plain,
            verbose_info,
        }
    }
}

impl Default for DiagnosticDisplayOptions {
    fn default() -> Self {
        DiagnosticDisplayOptions::pretty(false)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_context: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl Diagnostic {
    pub fn new(level: DiagnosticLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            span: None,
            code: None,
            source_context: None,
            suggestions: Vec::new(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Warning, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Info, message)
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_source_context(mut self, context: impl Into<String>) -> Self {
        self.source_context = Some(context.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;

        if let Some(code) = &self.code {
            write!(f, " [{}]", code)?;
        }

        if !self.suggestions.is_empty() {
            let hints = self.suggestions.join("; ");
            write!(f, " (hints: {})", hints)?;
        }

        Ok(())
    }
}

/// Append-only diagnostics sink with an explicit per-run lifecycle: create
/// one per compilation run, pass it down by reference, drain or emit at the
/// end. Never process-global.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticManager {
    diagnostics: Arc<Mutex<Vec<Diagnostic>>>,
}

impl DiagnosticManager {
    pub fn new() -> Self {
        Self {
            diagnostics: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn add_diagnostic(&self, diagnostic: Diagnostic) {
        if let Ok(mut diagnostics) = self.diagnostics.lock() {
            diagnostics.push(diagnostic);
        }
    }

    pub fn add_diagnostics(&self, mut new_diagnostics: Vec<Diagnostic>) {
        if let Ok(mut diagnostics) = self.diagnostics.lock() {
            diagnostics.append(&mut new_diagnostics);
        }
    }

    pub fn get_diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics
            .lock()
            .map(|d| d.clone())
            .unwrap_or_default()
    }

    pub fn has_errors(&self) -> bool {
        self.level_present(DiagnosticLevel::Error)
    }

    pub fn has_warnings(&self) -> bool {
        self.level_present(DiagnosticLevel::Warning)
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.lock().map(|d| d.is_empty()).unwrap_or(true)
    }

    pub fn clear(&self) {
        if let Ok(mut diagnostics) = self.diagnostics.lock() {
            diagnostics.clear();
        }
    }

    fn level_present(&self, level: DiagnosticLevel) -> bool {
        self.diagnostics
            .lock()
            .map(|d| d.iter().any(|diag| diag.level == level))
            .unwrap_or(false)
    }

    /// Serialize the collected stream for consumption by an external build
    /// tool.
    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(&self.get_diagnostics())?)
    }

    /// Emit collected diagnostics to stderr using the selected template. The
    /// fallback context is used when a diagnostic does not carry its own.
    pub fn emit(&self, fallback_context: Option<&str>, options: &DiagnosticDisplayOptions) {
        for diagnostic in self.get_diagnostics() {
            let context = diagnostic
                .source_context
                .as_deref()
                .or(fallback_context)
                .unwrap_or("interpolation");

            let lines = match options.template {
                DiagnosticTemplate::Pretty => render_pretty(&diagnostic, context, options),
                DiagnosticTemplate::Plain => render_plain(&diagnostic, context, options),
            };

            for line in lines.unwrap_or_default() {
                eprintln!("{}", line);
            }
        }
    }
}

fn render_pretty(
    diagnostic: &Diagnostic,
    context: &str,
    options: &DiagnosticDisplayOptions,
) -> Option<Vec<String>> {
    if matches!(diagnostic.level, DiagnosticLevel::Info) && !options.verbose_info {
        return None;
    }

    let prefix = match diagnostic.level {
        DiagnosticLevel::Error => "error:",
        DiagnosticLevel::Warning => "warning:",
        DiagnosticLevel::Info => "info:",
    };

    let header = match diagnostic.code.as_ref() {
        Some(code) => format!("{} [{}] {} ({})", prefix, context, diagnostic.message, code),
        None => format!("{} [{}] {}", prefix, context, diagnostic.message),
    };

    let mut lines = vec![header];

    if let Some(span) = &diagnostic.span {
        lines.push(format!("   at {}", span));
    }

    for suggestion in &diagnostic.suggestions {
        lines.push(format!("   hint: {}", suggestion));
    }

    Some(lines)
}

fn render_plain(
    diagnostic: &Diagnostic,
    context: &str,
    options: &DiagnosticDisplayOptions,
) -> Option<Vec<String>> {
    if matches!(diagnostic.level, DiagnosticLevel::Info) && !options.verbose_info {
        return None;
    }

    let level = match diagnostic.level {
        DiagnosticLevel::Error => "ERROR",
        DiagnosticLevel::Warning => "WARNING",
        DiagnosticLevel::Info => "INFO",
    };

    let mut line = format!("[{}] {}: {}", context, level, diagnostic.message);
    if let Some(code) = &diagnostic.code {
        line.push_str(&format!(" ({})", code));
    }
    if let Some(span) = &diagnostic.span {
        line.push_str(&format!(" at {}", span));
    }

    Some(vec![line])
}
