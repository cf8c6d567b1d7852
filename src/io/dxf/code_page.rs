//! `$DWGCODEPAGE` names and the decoding of non-UTF-8 value lines
//!
//! Files written before release 2007 store text in the code page named by
//! the `$DWGCODEPAGE` header variable. Lines are decoded as UTF-8 first;
//! only lines that are not valid UTF-8 go through the code page.

use encoding_rs::Encoding;
use std::borrow::Cow;

/// Code page names and the encoding that reads them
static CODE_PAGES: &[(&str, &Encoding)] = &[
    ("ansi_874", encoding_rs::WINDOWS_874),
    ("ansi_932", encoding_rs::SHIFT_JIS),
    ("ansi_936", encoding_rs::GBK),
    ("ansi_949", encoding_rs::EUC_KR),
    ("ansi_950", encoding_rs::BIG5),
    ("ansi_1250", encoding_rs::WINDOWS_1250),
    ("ansi_1251", encoding_rs::WINDOWS_1251),
    ("ansi_1252", encoding_rs::WINDOWS_1252),
    ("ansi_1253", encoding_rs::WINDOWS_1253),
    ("ansi_1254", encoding_rs::WINDOWS_1254),
    ("ansi_1255", encoding_rs::WINDOWS_1255),
    ("ansi_1256", encoding_rs::WINDOWS_1256),
    ("ansi_1257", encoding_rs::WINDOWS_1257),
    ("ansi_1258", encoding_rs::WINDOWS_1258),
    ("big5", encoding_rs::BIG5),
    ("gb2312", encoding_rs::GBK),
    ("johab", encoding_rs::EUC_KR),
    ("korean", encoding_rs::EUC_KR),
    ("dos850", encoding_rs::WINDOWS_1252),
    ("dos852", encoding_rs::WINDOWS_1250),
    ("dos855", encoding_rs::IBM866),
    ("dos857", encoding_rs::WINDOWS_1254),
    ("dos866", encoding_rs::IBM866),
    ("dos869", encoding_rs::WINDOWS_1253),
    ("iso8859-1", encoding_rs::WINDOWS_1252),
    ("iso8859-2", encoding_rs::ISO_8859_2),
    ("iso8859-5", encoding_rs::ISO_8859_5),
    ("iso8859-7", encoding_rs::ISO_8859_7),
    ("iso8859-8", encoding_rs::ISO_8859_8),
    ("iso8859-9", encoding_rs::WINDOWS_1254),
    ("iso8859-15", encoding_rs::ISO_8859_15),
    ("koi8-r", encoding_rs::KOI8_R),
    ("koi8-u", encoding_rs::KOI8_U),
];

/// Encoding for a `$DWGCODEPAGE` name.
///
/// Names are matched case-insensitively, and `iso_8859-x` is accepted for
/// `iso8859-x`. Returns `None` for UTF-8 and plain ASCII. Unknown names fall
/// back to Windows-1252, the most common pre-2007 code page.
pub fn encoding_from_code_page(code_page: &str) -> Option<&'static Encoding> {
    let name = code_page.trim().to_ascii_lowercase().replace("iso_", "iso");
    match name.as_str() {
        "ascii" | "utf-8" | "utf8" | "unicode" => None,
        name => CODE_PAGES
            .iter()
            .find(|(known, _)| *known == name)
            .map(|(_, encoding)| *encoding)
            .or(Some(encoding_rs::WINDOWS_1252)),
    }
}

/// Decode one line: UTF-8, else the fallback encoding, else Latin-1
pub fn decode_line<'a>(bytes: &'a [u8], fallback: Option<&'static Encoding>) -> Cow<'a, str> {
    if let Ok(text) = std::str::from_utf8(bytes) {
        return Cow::Borrowed(text);
    }
    match fallback {
        Some(encoding) => encoding.decode_without_bom_handling(bytes).0,
        None => Cow::Owned(bytes.iter().map(|&b| b as char).collect()),
    }
}
