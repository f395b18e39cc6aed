//! Custom panic hook for structured crash reports.
//!
//! A panic inside an invocation still unwinds through the scratch guard, so
//! the scratch directory is removed; the report tells the user which phase
//! and archive were active when it happened.

use super::context::{get_current_context, InvocationContext};
use std::panic::PanicHookInfo;
use tracing::Span;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const RULE: &str =
    "════════════════════════════════════════════════════════════════════════════════";

/// Install the custom panic hook.
///
/// Call early in `main()` before any invocation begins.
pub fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        eprintln!("{}", render_crash_report(info, &get_current_context()));
    }));
}

fn render_crash_report(info: &PanicHookInfo<'_>, context: &InvocationContext) -> String {
    let mut lines = vec![
        String::new(),
        RULE.to_string(),
        format!("JSDCE CRASH REPORT (version {}, {})", VERSION, std::env::consts::OS),
        RULE.to_string(),
        format!("Panic: {}", truncate(&extract_panic_message(info), 200)),
    ];

    if let Some(location) = info.location() {
        lines.push(format!(
            "Location: {}:{}:{}",
            location.file(),
            location.line(),
            location.column()
        ));
    }

    lines.extend(context_lines(context));

    if let Some(metadata) = Span::current().metadata() {
        lines.push(format!("Span: {}", metadata.name()));
    }

    if std::env::var("RUST_BACKTRACE").is_ok() {
        lines.push(format!("{}", std::backtrace::Backtrace::capture()));
    } else {
        lines.push("Run with RUST_BACKTRACE=1 for stack trace".to_string());
    }
    lines.push(RULE.to_string());
    lines.join("\n")
}

fn context_lines(context: &InvocationContext) -> Vec<String> {
    let mut lines = Vec::new();
    match &context.phase {
        Some(phase) => lines.push(format!("Phase: {}", phase)),
        None => lines.push("Phase: (not set - crash occurred before the invocation started)".to_string()),
    }
    if let Some(archive) = &context.current_archive {
        lines.push(format!("Archive: {}", archive.display()));
    }
    lines
}

fn extract_panic_message(info: &PanicHookInfo<'_>) -> String {
    if let Some(s) = info.payload().downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = info.payload().downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
