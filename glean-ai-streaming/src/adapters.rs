//! Extension trait for narrowing element streams.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures::Stream;
use pin_project_lite::pin_project;

use crate::error::StreamError;
use crate::item::StreamItem;

/// Adapters over any stream of [`StreamItem`]s.
///
/// Both adapters pass the first error through and then end, so a transport
/// failure always reaches the caller exactly once.
pub trait GleanStreamExt<E>: Stream<Item = Result<StreamItem<E>, StreamError>> + Sized {
    /// Keeps only sequence elements.
    fn elements(self) -> Elements<Self> {
        Elements {
            inner: self,
            done: false,
        }
    }

    /// Keeps only raw text deltas.
    fn text_deltas(self) -> TextDeltas<Self> {
        TextDeltas {
            inner: self,
            done: false,
        }
    }
}

impl<S, E> GleanStreamExt<E> for S where S: Stream<Item = Result<StreamItem<E>, StreamError>> {}

pin_project! {
    /// Stream of validated elements only.
    #[must_use = "streams do nothing unless polled"]
    pub struct Elements<S> {
        #[pin]
        inner: S,
        done: bool,
    }
}

impl<S, E> Stream for Elements<S>
where
    S: Stream<Item = Result<StreamItem<E>, StreamError>>,
{
    type Item = Result<E, StreamError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();
        if *this.done {
            return Poll::Ready(None);
        }
        loop {
            match futures::ready!(this.inner.as_mut().poll_next(cx)) {
                Some(Ok(StreamItem::Element(element))) => {
                    return Poll::Ready(Some(Ok(element)));
                }
                Some(Ok(StreamItem::Text(_))) => continue,
                Some(Err(err)) => {
                    *this.done = true;
                    return Poll::Ready(Some(Err(err)));
                }
                None => return Poll::Ready(None),
            }
        }
    }
}

pin_project! {
    /// Stream of raw text deltas only.
    #[must_use = "streams do nothing unless polled"]
    pub struct TextDeltas<S> {
        #[pin]
        inner: S,
        done: bool,
    }
}

impl<S, E> Stream for TextDeltas<S>
where
    S: Stream<Item = Result<StreamItem<E>, StreamError>>,
{
    type Item = Result<String, StreamError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();
        if *this.done {
            return Poll::Ready(None);
        }
        loop {
            match futures::ready!(this.inner.as_mut().poll_next(cx)) {
                Some(Ok(StreamItem::Text(text))) => return Poll::Ready(Some(Ok(text))),
                Some(Ok(StreamItem::Element(_))) => continue,
                Some(Err(err)) => {
                    *this.done = true;
                    return Poll::Ready(Some(Err(err)));
                }
                None => return Poll::Ready(None),
            }
        }
    }
}
