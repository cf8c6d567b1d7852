//! Tag sink trait

use crate::error::Result;
use crate::io::dxf::Tag;
use crate::types::Value;

/// Trait for writing group code / value pairs
pub trait DxfStreamWriter {
    /// Write one tag with its value text as is
    fn write_string(&mut self, code: i32, value: &str) -> Result<()>;

    /// Write a typed value in its canonical text form
    fn write_value(&mut self, code: i32, value: &Value) -> Result<()> {
        self.write_string(code, &value.to_string())
    }

    /// Flush the writer
    fn flush(&mut self) -> Result<()>;
}

/// Convenience operations for any [`DxfStreamWriter`]
pub trait DxfStreamWriterExt: DxfStreamWriter {
    /// Write an already encoded tag
    fn write_tag(&mut self, tag: &Tag) -> Result<()> {
        self.write_string(tag.code, &tag.value)
    }

    /// Write a sequence of tags in order
    fn write_tags(&mut self, tags: &[Tag]) -> Result<()> {
        tags.iter().try_for_each(|tag| self.write_tag(tag))
    }

    /// Write a `0` keyword (record type, `SECTION`, `ENDTAB`, ...)
    fn write_keyword(&mut self, keyword: &str) -> Result<()> {
        self.write_string(0, keyword)
    }

    /// Write a subclass marker
    fn write_subclass(&mut self, marker: &str) -> Result<()> {
        self.write_string(100, marker)
    }

    /// Write `0 SECTION` and the section name
    fn begin_section(&mut self, name: &str) -> Result<()> {
        self.write_keyword("SECTION")?;
        self.write_string(2, name)
    }

    /// Write `0 ENDSEC`
    fn end_section(&mut self) -> Result<()> {
        self.write_keyword("ENDSEC")
    }
}

impl<W: DxfStreamWriter + ?Sized> DxfStreamWriterExt for W {}

impl<W: DxfStreamWriter + ?Sized> DxfStreamWriter for &mut W {
    fn write_string(&mut self, code: i32, value: &str) -> Result<()> {
        (**self).write_string(code, value)
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }
}

/// Collects tags in memory
impl DxfStreamWriter for Vec<Tag> {
    fn write_string(&mut self, code: i32, value: &str) -> Result<()> {
        self.push(Tag::new(code, value));
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}
