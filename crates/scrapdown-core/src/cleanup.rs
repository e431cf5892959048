//! Text cleanup applied to converter output.

use std::borrow::Cow;

/// The literal pair removed by [`remove_empty_parens`].
pub const EMPTY_PARENS: &str = "()";

/// Remove every literal `()` in one left-to-right pass.
///
/// Only the two-character sequence is matched, so nested pairs are not
/// collapsed recursively: `"b(())"` becomes `"b()"`. Borrows the input
/// when there is nothing to remove.
pub fn remove_empty_parens(text: &str) -> Cow<'_, str> {
    if text.contains(EMPTY_PARENS) {
        Cow::Owned(text.replace(EMPTY_PARENS, ""))
    } else {
        Cow::Borrowed(text)
    }
}
