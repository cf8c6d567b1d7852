//! Tag source trait and an in-memory tag buffer

use crate::error::Result;
use crate::io::dxf::{Location, Tag, TagEvent};
use encoding_rs::Encoding;
use std::sync::Arc;

/// A sequential source of tags
pub trait DxfStreamReader {
    /// Pull the next tag.
    ///
    /// A `0` tag is returned as [`TagEvent::EndOfEntity`]; whether it ends
    /// the current record or starts the next one is up to the caller.
    fn next_tag(&mut self) -> Result<TagEvent>;

    /// Push a tag back to be returned by the next `next_tag` call.
    ///
    /// Pushed tags are returned in reverse push order.
    fn push_back(&mut self, tag: Tag);

    /// Location of the most recently returned tag
    fn location(&self) -> Location;

    /// Fallback encoding for value lines that are not valid UTF-8
    fn set_encoding(&mut self, _encoding: &'static Encoding) {}

    /// Look at the next tag without consuming it
    fn peek(&mut self) -> Result<TagEvent> {
        let event = self.next_tag()?;
        match &event {
            TagEvent::Tag(tag) | TagEvent::EndOfEntity(tag) => self.push_back(tag.clone()),
            TagEvent::EndOfStream => {}
        }
        Ok(event)
    }
}

impl<S: DxfStreamReader + ?Sized> DxfStreamReader for &mut S {
    fn next_tag(&mut self) -> Result<TagEvent> {
        (**self).next_tag()
    }

    fn push_back(&mut self, tag: Tag) {
        (**self).push_back(tag)
    }

    fn location(&self) -> Location {
        (**self).location()
    }

    fn set_encoding(&mut self, encoding: &'static Encoding) {
        (**self).set_encoding(encoding)
    }
}

impl<S: DxfStreamReader + ?Sized> DxfStreamReader for Box<S> {
    fn next_tag(&mut self) -> Result<TagEvent> {
        (**self).next_tag()
    }

    fn push_back(&mut self, tag: Tag) {
        (**self).push_back(tag)
    }

    fn location(&self) -> Location {
        (**self).location()
    }

    fn set_encoding(&mut self, encoding: &'static Encoding) {
        (**self).set_encoding(encoding)
    }
}

/// Classify a freshly read tag
pub(crate) fn classify(tag: Tag) -> TagEvent {
    if tag.code != 0 {
        TagEvent::Tag(tag)
    } else if tag.value.trim() == "EOF" {
        TagEvent::EndOfStream
    } else {
        TagEvent::EndOfEntity(tag)
    }
}

/// Tags already split from a stream, each with the line it was read at
#[derive(Debug, Clone)]
pub struct TagBuffer {
    source: Arc<str>,
    tags: std::vec::IntoIter<(usize, Tag)>,
    pushed: Vec<(usize, Tag)>,
    line: usize,
    finished: bool,
}

impl TagBuffer {
    /// Create a buffer from tags and their line numbers
    pub fn new(source: impl Into<Arc<str>>, tags: Vec<(usize, Tag)>) -> Self {
        Self {
            source: source.into(),
            tags: tags.into_iter(),
            pushed: Vec::new(),
            line: 0,
            finished: false,
        }
    }

    /// Report `line` as the current location until the first tag is pulled
    pub fn starting_at(mut self, line: usize) -> Self {
        self.line = line;
        self
    }

    /// Create a buffer from bare tags, numbering them as a text stream would
    pub fn from_tags(source: impl Into<Arc<str>>, tags: impl IntoIterator<Item = Tag>) -> Self {
        let numbered = tags
            .into_iter()
            .enumerate()
            .map(|(index, tag)| (index * 2 + 1, tag))
            .collect();
        Self::new(source, numbered)
    }
}

impl DxfStreamReader for TagBuffer {
    fn next_tag(&mut self) -> Result<TagEvent> {
        if let Some((line, tag)) = self.pushed.pop() {
            self.line = line;
            return Ok(classify(tag));
        }
        if self.finished {
            return Ok(TagEvent::EndOfStream);
        }
        match self.tags.next() {
            Some((line, tag)) => {
                self.line = line;
                let event = classify(tag);
                if event == TagEvent::EndOfStream {
                    self.finished = true;
                }
                Ok(event)
            }
            None => {
                self.finished = true;
                Ok(TagEvent::EndOfStream)
            }
        }
    }

    fn push_back(&mut self, tag: Tag) {
        self.pushed.push((self.line, tag));
    }

    fn location(&self) -> Location {
        Location::new(self.source.clone(), self.line)
    }
}
