//! DXF format versions

use std::fmt;

/// DXF format version, ordered chronologically
///
/// The variant names are the `$ACADVER` strings written in a file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DxfVersion {
    /// Release 10
    AC1006,
    /// Release 11 and 12
    AC1009,
    /// Release 13
    AC1012,
    /// Release 14
    AC1014,
    /// AutoCAD 2000
    AC1015,
    /// AutoCAD 2004
    AC1018,
    /// AutoCAD 2007
    AC1021,
    /// AutoCAD 2010
    AC1024,
    /// AutoCAD 2013
    AC1027,
    /// AutoCAD 2018
    AC1032,
}

impl DxfVersion {
    /// Oldest version known to the codec
    pub const OLDEST: DxfVersion = DxfVersion::AC1006;

    /// Newest version known to the codec
    pub const LATEST: DxfVersion = DxfVersion::AC1032;

    /// All versions, oldest first
    pub const ALL: [DxfVersion; 10] = [
        DxfVersion::AC1006,
        DxfVersion::AC1009,
        DxfVersion::AC1012,
        DxfVersion::AC1014,
        DxfVersion::AC1015,
        DxfVersion::AC1018,
        DxfVersion::AC1021,
        DxfVersion::AC1024,
        DxfVersion::AC1027,
        DxfVersion::AC1032,
    ];

    /// Parse an `$ACADVER` string such as `AC1015`
    pub fn from_version_string(text: &str) -> Option<Self> {
        let version = match text.trim().to_ascii_uppercase().as_str() {
            "AC1006" => DxfVersion::AC1006,
            "AC1009" => DxfVersion::AC1009,
            "AC1012" => DxfVersion::AC1012,
            "AC1014" => DxfVersion::AC1014,
            "AC1015" => DxfVersion::AC1015,
            "AC1018" => DxfVersion::AC1018,
            "AC1021" => DxfVersion::AC1021,
            "AC1024" => DxfVersion::AC1024,
            "AC1027" => DxfVersion::AC1027,
            "AC1032" => DxfVersion::AC1032,
            _ => return None,
        };
        Some(version)
    }

    /// The `$ACADVER` string for this version
    pub fn as_str(self) -> &'static str {
        match self {
            DxfVersion::AC1006 => "AC1006",
            DxfVersion::AC1009 => "AC1009",
            DxfVersion::AC1012 => "AC1012",
            DxfVersion::AC1014 => "AC1014",
            DxfVersion::AC1015 => "AC1015",
            DxfVersion::AC1018 => "AC1018",
            DxfVersion::AC1021 => "AC1021",
            DxfVersion::AC1024 => "AC1024",
            DxfVersion::AC1027 => "AC1027",
            DxfVersion::AC1032 => "AC1032",
        }
    }

    /// Marketing name of the release
    pub fn release_name(self) -> &'static str {
        match self {
            DxfVersion::AC1006 => "R10",
            DxfVersion::AC1009 => "R11/R12",
            DxfVersion::AC1012 => "R13",
            DxfVersion::AC1014 => "R14",
            DxfVersion::AC1015 => "2000",
            DxfVersion::AC1018 => "2004",
            DxfVersion::AC1021 => "2007",
            DxfVersion::AC1024 => "2010",
            DxfVersion::AC1027 => "2013",
            DxfVersion::AC1032 => "2018",
        }
    }

    /// Whether text in this version is always UTF-8
    pub fn is_unicode(self) -> bool {
        self >= DxfVersion::AC1021
    }
}

impl Default for DxfVersion {
    fn default() -> Self {
        DxfVersion::LATEST
    }
}

impl fmt::Display for DxfVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_versions_are_ordered() {
        assert!(DxfVersion::AC1009 < DxfVersion::AC1012);
        assert!(DxfVersion::AC1032 > DxfVersion::AC1015);
        assert!(DxfVersion::ALL.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_version_string_roundtrip() {
        for version in DxfVersion::ALL {
            assert_eq!(DxfVersion::from_version_string(version.as_str()), Some(version));
        }
        assert_eq!(DxfVersion::from_version_string(" ac1015 "), Some(DxfVersion::AC1015));
        assert_eq!(DxfVersion::from_version_string("AC9999"), None);
    }

    #[test]
    fn test_unicode_versions() {
        assert!(!DxfVersion::AC1018.is_unicode());
        assert!(DxfVersion::AC1021.is_unicode());
    }
}
