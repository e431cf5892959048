//! Button actions: pure text operations composed with feedback.

use crate::cleanup::remove_empty_parens;
use crate::feedback::FeedbackController;
use crate::platform::{Affordance, ClipboardPlatform, TextSlot};
use crate::timer::TimerPlatform;

/// What a copy click did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    /// Output was empty; nothing was written.
    Empty,
    Copied,
    /// Clipboard rejected the write. Logged, feedback withheld.
    Failed,
}

/// Copy the output to the clipboard and show feedback on success.
pub async fn copy_output<O, C, P, A>(
    output: &O,
    clipboard: &C,
    feedback: &FeedbackController<P, A>,
) -> CopyOutcome
where
    O: TextSlot + ?Sized,
    C: ClipboardPlatform + ?Sized,
    P: TimerPlatform + 'static,
    A: Affordance + 'static,
{
    let text = output.text();
    if text.is_empty() {
        return CopyOutcome::Empty;
    }

    match clipboard.write_text(&text).await {
        Ok(()) => {
            feedback.trigger();
            CopyOutcome::Copied
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to copy output to clipboard");
            CopyOutcome::Failed
        }
    }
}

/// Strip empty `()` pairs from the output and show feedback.
///
/// Returns `false` without touching anything when the output is empty.
pub fn remove_output_parens<O, P, A>(output: &O, feedback: &FeedbackController<P, A>) -> bool
where
    O: TextSlot + ?Sized,
    P: TimerPlatform + 'static,
    A: Affordance + 'static,
{
    let text = output.text();
    if text.is_empty() {
        return false;
    }

    let cleaned = remove_empty_parens(&text);
    output.set_text(&cleaned);
    feedback.trigger();
    true
}
