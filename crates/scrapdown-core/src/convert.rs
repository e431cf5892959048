//! Conversion controller: input slot → external converter → output slot.
//!
//! A conversion reads the input once. Blank input clears the output
//! synchronously and never reaches the converter. Anything else is handed
//! to the converter; its result, or `Error: <message>` on failure, is
//! written to the output exactly once.
//!
//! Each started conversion takes a new generation number. A result is only
//! written if no newer conversion (or blank clear) started while it was in
//! flight, so a slow converter cannot overwrite fresher output.

use std::cell::Cell;
use std::rc::Rc;

use futures_util::FutureExt;
use futures_util::future::LocalBoxFuture;

use crate::platform::{Converter, TextSlot};

/// Prefix written before a converter failure message.
pub const ERROR_PREFIX: &str = "Error: ";

/// The external converter rejected its input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, miette::Diagnostic)]
#[error("{message}")]
#[diagnostic(code(scrapdown::convert))]
pub struct ConvertError {
    pub message: String,
}

impl ConvertError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Render a converter outcome as output text.
pub fn render_outcome(outcome: Result<String, ConvertError>) -> String {
    match outcome {
        Ok(converted) => converted,
        Err(e) => format!("{ERROR_PREFIX}{}", e.message),
    }
}

/// Input is empty or whitespace-only.
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

pub struct ConversionController<I, O, C> {
    input: I,
    output: O,
    converter: C,
    generation: Cell<u64>,
}

impl<I, O, C> ConversionController<I, O, C>
where
    I: TextSlot + 'static,
    O: TextSlot + 'static,
    C: Converter + 'static,
{
    pub fn new(input: I, output: O, converter: C) -> Rc<Self> {
        Rc::new(Self {
            input,
            output,
            converter,
            generation: Cell::new(0),
        })
    }

    /// Start a conversion of the current input.
    ///
    /// The blank-input path completes before this returns and yields
    /// `None`. Otherwise the returned future performs the conversion and
    /// the single output write; it must be driven to completion by the
    /// caller (usually via a [`Spawner`](crate::platform::Spawner)).
    pub fn convert(self: &Rc<Self>) -> Option<LocalBoxFuture<'static, ()>> {
        let markdown = self.input.text();
        let generation = self.generation.get().wrapping_add(1);
        self.generation.set(generation);

        if is_blank(&markdown) {
            tracing::trace!("blank input, clearing output");
            self.output.set_text("");
            return None;
        }

        let pending = self.converter.convert(&markdown);
        let this = Rc::clone(self);
        Some(
            async move {
                let outcome = pending.await;
                if let Err(e) = &outcome {
                    tracing::debug!(error = %e, "converter rejected input");
                }
                if this.generation.get() != generation {
                    tracing::debug!(generation, "discarding stale conversion result");
                    return;
                }
                this.output.set_text(&render_outcome(outcome));
            }
            .boxed_local(),
        )
    }

    /// Convert and wait for the output write.
    pub async fn convert_now(self: &Rc<Self>) {
        if let Some(pending) = self.convert() {
            pending.await;
        }
    }

    /// Does the input currently hold any text at all?
    pub fn has_input(&self) -> bool {
        !self.input.text().is_empty()
    }

    pub fn output(&self) -> &O {
        &self.output
    }
}
