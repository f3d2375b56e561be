//! Incremental extraction over a fragment stream.
//!
//! This module provides [`ElementStream`], which folds a model's raw
//! fragment stream into typed items as the response arrives.

use std::collections::VecDeque;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures::Stream;
use glean_ai_client::ClientError;
use glean_ai_core::ChatFragment;
use glean_ai_output::{
    extract_fenced_block, parse_tolerant, validated_element, OutputSchema, OutputShape,
};
use pin_project_lite::pin_project;
use serde_json::Value;

use crate::error::StreamError;
use crate::item::StreamItem;

/// Where a stream is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamPhase {
    /// Constructed, not yet polled.
    Idle,
    /// Consuming fragments from the model.
    Accumulating,
    /// The model is done; remaining settled elements are being handed out.
    Draining,
    /// Nothing left to yield.
    Done,
}

pin_project! {
    /// A stream of validated items built up from response fragments.
    ///
    /// Behavior follows the schema's shape, decided once at construction:
    ///
    /// * **Text** passes every raw delta through untouched, as soon as it
    ///   arrives.
    /// * **Sequence** accumulates fragments into a buffer and, after each
    ///   one, re-runs extraction and tolerant parsing over the whole buffer.
    ///   Every element of the candidate collection except the last is
    ///   settled; the trailing element is withheld because the next
    ///   fragment could still extend it (a partial `[1, 2` must not leak a
    ///   `2` that later turns out to be `25`). Once the model finishes, a
    ///   final pass settles the trailing element too.
    /// * **Object** yields nothing. A single object is only meaningful
    ///   whole; callers run the batch path for it.
    ///
    /// Settled elements are validated one at a time. A rejected element is
    /// skipped for good and the stream moves on; the emission cursor never
    /// moves backwards, so each index is yielded at most once and in order.
    /// Empty fragments are no-ops in every phase. An upstream error is
    /// yielded once and ends the stream without a drain pass.
    pub struct ElementStream<F, S> {
        #[pin]
        fragments: F,
        schema: Arc<S>,
        shape: OutputShape,
        buffer: String,
        emitted: usize,
        pending: VecDeque<(usize, Value)>,
        phase: StreamPhase,
    }
}

impl<F, S> ElementStream<F, S>
where
    S: OutputSchema,
{
    /// Wraps a fragment stream with the given schema.
    pub fn new(fragments: F, schema: Arc<S>) -> Self {
        let shape = schema.shape();
        Self {
            fragments,
            schema,
            shape,
            buffer: String::new(),
            emitted: 0,
            pending: VecDeque::new(),
            phase: StreamPhase::Idle,
        }
    }

    /// The shape driving this stream.
    pub fn shape(&self) -> OutputShape {
        self.shape
    }

    /// The current phase.
    pub fn phase(&self) -> StreamPhase {
        self.phase
    }

    /// Everything received from the model so far.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// How many elements have been settled so far.
    ///
    /// Counts rejected elements too; the cursor advances whether or not an
    /// element survives validation.
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    /// Whether the stream has finished.
    pub fn is_complete(&self) -> bool {
        self.phase == StreamPhase::Done
    }
}

/// Re-parses the whole buffer and queues newly settled elements.
///
/// Mid-stream the trailing element stays unsettled; the final pass takes it
/// as well. The cursor only ever moves forward.
fn settle_elements(
    buffer: &str,
    emitted: &mut usize,
    pending: &mut VecDeque<(usize, Value)>,
    final_pass: bool,
) {
    let window = extract_fenced_block(buffer);
    let candidate = parse_tolerant(window);
    let Value::Array(items) = candidate else {
        return;
    };

    let settled = if final_pass {
        items.len()
    } else {
        items.len().saturating_sub(1)
    };
    if settled > *emitted {
        tracing::trace!(from = *emitted, to = settled, "elements settled");
    }
    for (index, item) in items.into_iter().enumerate().take(settled).skip(*emitted) {
        pending.push_back((index, item));
    }
    *emitted = (*emitted).max(settled);
}

impl<F, S> Stream for ElementStream<F, S>
where
    F: Stream<Item = Result<ChatFragment, ClientError>>,
    S: OutputSchema,
{
    type Item = Result<StreamItem<S::Element>, StreamError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        if *this.phase == StreamPhase::Idle {
            *this.phase = StreamPhase::Accumulating;
        }

        loop {
            // Settled elements go out before the upstream is touched again.
            while let Some((index, candidate)) = this.pending.pop_front() {
                if let Some(element) =
                    validated_element(this.schema.as_ref(), &candidate, index)
                {
                    return Poll::Ready(Some(Ok(StreamItem::Element(element))));
                }
                // A rejected element is skipped for good.
            }

            match *this.phase {
                StreamPhase::Done => return Poll::Ready(None),
                StreamPhase::Draining => {
                    *this.phase = StreamPhase::Done;
                    return Poll::Ready(None);
                }
                StreamPhase::Idle | StreamPhase::Accumulating => {}
            }

            match this.fragments.as_mut().poll_next(cx) {
                Poll::Ready(Some(Ok(fragment))) => {
                    let delta = match fragment.delta {
                        Some(delta) if !delta.is_empty() => delta,
                        _ => continue,
                    };
                    this.buffer.push_str(&delta);

                    match this.shape {
                        OutputShape::Text => {
                            return Poll::Ready(Some(Ok(StreamItem::Text(delta))));
                        }
                        OutputShape::Object => continue,
                        OutputShape::Sequence => {
                            settle_elements(this.buffer, this.emitted, this.pending, false);
                            continue;
                        }
                    }
                }
                Poll::Ready(Some(Err(err))) => {
                    *this.phase = StreamPhase::Done;
                    return Poll::Ready(Some(Err(StreamError::Client(err))));
                }
                Poll::Ready(None) => {
                    *this.phase = StreamPhase::Draining;
                    if *this.shape == OutputShape::Sequence {
                        settle_elements(this.buffer, this.emitted, this.pending, true);
                    }
                    continue;
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}
