//! Items yielded by an element stream.

/// One item from an [`ElementStream`](crate::ElementStream).
///
/// Which variant shows up is fixed by the schema's shape: text-shaped
/// streams yield `Text` deltas and sequence-shaped streams yield `Element`s.
/// The [`GleanStreamExt`](crate::GleanStreamExt) adapters narrow a stream to
/// one variant.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamItem<E> {
    /// A raw text delta, passed through as it arrived.
    Text(String),
    /// A validated element of a sequence.
    Element(E),
}

impl<E> StreamItem<E> {
    /// Returns `true` for a text delta.
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    /// Returns `true` for a sequence element.
    pub fn is_element(&self) -> bool {
        matches!(self, Self::Element(_))
    }

    /// The text delta, if this is one.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Element(_) => None,
        }
    }

    /// Consumes the item, returning the element if this is one.
    pub fn into_element(self) -> Option<E> {
        match self {
            Self::Text(_) => None,
            Self::Element(element) => Some(element),
        }
    }

    /// Consumes the item, returning the text delta if this is one.
    pub fn into_text(self) -> Option<String> {
        match self {
            Self::Text(text) => Some(text),
            Self::Element(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_accessors() {
        let text: StreamItem<i64> = StreamItem::Text("hi".into());
        assert!(text.is_text());
        assert_eq!(text.as_text(), Some("hi"));
        assert_eq!(text.into_element(), None);

        let element: StreamItem<i64> = StreamItem::Element(7);
        assert!(element.is_element());
        assert_eq!(element.as_text(), None);
        assert_eq!(element.into_element(), Some(7));
    }
}
