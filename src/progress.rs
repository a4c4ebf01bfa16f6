use console::Term;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

const TEMPLATE: &str = "{spinner} {msg} [{elapsed_precise}] {human_pos} lines ({per_sec})";

/// Spinner on stderr counting lines, or a hidden bar when progress is off.
///
/// Draws through `Term::stderr()` so the spinner also lands in redirected or
/// captured stderr. It never touches stdout.
pub(crate) fn line_progress(enabled: bool, label: &str) -> ProgressBar {
    if !enabled {
        return ProgressBar::hidden();
    }

    let style = ProgressStyle::with_template(TEMPLATE).unwrap_or_else(|e| {
        tracing::debug!(error = %e, "invalid progress template, using default spinner");
        ProgressStyle::default_spinner()
    });
    let target = ProgressDrawTarget::term_like(Box::new(Term::stderr()));
    let bar = ProgressBar::with_draw_target(None, target).with_style(style);
    bar.set_message(label.to_string());
    bar
}
