//! DXF (Drawing Exchange Format) tag stream reading and writing

mod code_page;
mod group_code_value;
mod parallel;
mod reader;
mod tag;
mod writer;

pub use code_page::{decode_line, encoding_from_code_page};
pub use group_code_value::GroupCodeValueType;
pub use parallel::{decode_par, read_chain_par, split_records, RecordTags};
pub use reader::{
    decode, is_structure_keyword, read_chain, read_table, DxfReader, DxfReaderConfiguration,
    DxfStreamReader, DxfTextReader, RecordReader, TagBuffer, STRUCTURE_KEYWORDS,
};
pub use tag::{Location, Tag, TagEvent};
pub use writer::{
    encode, encode_tags, DxfStreamWriter, DxfStreamWriterExt, DxfTextWriter, DxfWriter,
    DxfWriterConfiguration, LineEnding, SectionWriter,
};
