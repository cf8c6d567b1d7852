//! Core value types shared by the codec

mod handle;
mod value;
mod version;

pub use handle::Handle;
pub use value::{format_double, Value};
pub use version::DxfVersion;

use bitflags::bitflags;

bitflags! {
    /// Standard flags (group code 70) of symbol table records.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct StandardFlags: i16 {
        /// Layer is frozen; for other records, entry is anonymous.
        const FROZEN = 1;
        /// Layer is frozen by default in new viewports.
        const FROZEN_IN_NEW_VIEWPORTS = 2;
        /// Layer is locked.
        const LOCKED = 4;
        /// Record is dependent on an external reference.
        const XREF_DEPENDENT = 16;
        /// Externally dependent record has been resolved.
        const XREF_RESOLVED = 32;
        /// Record was referenced by at least one entity the last time the drawing was edited.
        const REFERENCED = 64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_flags() {
        let flags = StandardFlags::from_bits_truncate(5);
        assert!(flags.contains(StandardFlags::FROZEN));
        assert!(flags.contains(StandardFlags::LOCKED));
        assert!(!flags.contains(StandardFlags::XREF_DEPENDENT));
        assert_eq!((StandardFlags::FROZEN | StandardFlags::REFERENCED).bits(), 65);
    }
}
