//! Symbol tables: a `TABLE` header record and its entries

use crate::chain::Chain;
use crate::record::EntityRecord;
use crate::schema::TABLE;

/// One symbol table as framed by `0 TABLE` ... `0 ENDTAB`
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// The `TABLE` record: table name (2), handle, owners, entry count (70)
    pub header: EntityRecord,
    /// Entries in file order
    pub entries: Chain<EntityRecord>,
}

impl Table {
    /// Create an empty table named after its entry type, e.g. `LAYER`
    pub fn new(name: &str) -> Self {
        let mut header = EntityRecord::new(&TABLE);
        // code 2 is a text field of TABLE, so this cannot fail
        let _ = header.set(2, name);
        Self {
            header,
            entries: Chain::new(),
        }
    }

    /// Table name, e.g. `LAYER`
    pub fn name(&self) -> &str {
        self.header.name().unwrap_or_default()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry with the given name, compared case-insensitively
    pub fn get(&self, name: &str) -> Option<&EntityRecord> {
        self.entries
            .iter()
            .find(|entry| entry.name().is_some_and(|n| n.eq_ignore_ascii_case(name)))
    }

    /// Append an entry
    pub fn add(&mut self, entry: EntityRecord) {
        self.entries.append(entry);
    }

    /// Iterate over the entries
    pub fn iter(&self) -> impl Iterator<Item = &EntityRecord> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::LAYER;

    #[test]
    fn test_table_lookup_is_case_insensitive() {
        let mut table = Table::new("LAYER");
        let mut walls = EntityRecord::new(&LAYER);
        walls.set(2, "Walls").unwrap();
        table.add(walls);

        assert_eq!(table.name(), "LAYER");
        assert_eq!(table.len(), 1);
        assert!(table.get("WALLS").is_some());
        assert!(table.get("doors").is_none());
    }
}
