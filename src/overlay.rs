//! Handle cross-reference overlay
//!
//! Soft and hard pointers are stored verbatim as [`Handle`] text, in the
//! order they were read and inside the 102 group they appeared in. Nothing
//! here resolves a handle to a record; [`adjacency`] exposes the pointers as
//! an adjacency list for callers that want to walk the graph.

use crate::io::dxf::Tag;
use crate::record::EntityRecord;
use crate::types::Handle;
use indexmap::IndexMap;

/// Application group holding the reactors of a record
pub const REACTORS: &str = "ACAD_REACTORS";

/// Application group holding the extension dictionary of a record
pub const XDICTIONARY: &str = "ACAD_XDICTIONARY";

/// Kind of reference a handle-typed group code expresses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerKind {
    /// Advisory reference (330-339, 390-399)
    SoftPointer,
    /// Reference that keeps its target alive (340-349, 480-481)
    HardPointer,
    /// Ownership that does not keep the target alive (350-359)
    SoftOwner,
    /// Ownership (360-369)
    HardOwner,
}

impl PointerKind {
    /// Kind of a group code, `None` for codes that are not pointers
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            330..=339 | 390..=399 => Some(PointerKind::SoftPointer),
            340..=349 | 480..=481 => Some(PointerKind::HardPointer),
            350..=359 => Some(PointerKind::SoftOwner),
            360..=369 => Some(PointerKind::HardOwner),
            _ => None,
        }
    }

    /// Whether the reference expresses ownership
    pub fn is_owner(self) -> bool {
        matches!(self, PointerKind::SoftOwner | PointerKind::HardOwner)
    }
}

/// One handle reference and the group code it was read with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlePointer {
    pub code: i32,
    pub handle: Handle,
}

impl HandlePointer {
    pub fn new(code: i32, handle: impl Into<Handle>) -> Self {
        Self {
            code,
            handle: handle.into(),
        }
    }

    /// Pointer kind, when the code is a pointer code
    pub fn kind(&self) -> Option<PointerKind> {
        PointerKind::from_code(self.code)
    }
}

/// A 102 `{NAME ... }` group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandleGroup {
    /// Group name without the opening brace
    pub name: String,
    pub pointers: Vec<HandlePointer>,
}

impl HandleGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pointers: Vec::new(),
        }
    }
}

/// Owner-handle data of one record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HandleOverlay {
    /// Groups in read order
    pub groups: Vec<HandleGroup>,
    /// Pointers outside any group (owner 330, 360), in read order
    pub pointers: Vec<HandlePointer>,
}

impl HandleOverlay {
    /// Create an empty overlay
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the overlay holds no groups and no pointers
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty() && self.pointers.is_empty()
    }

    /// Group with the given name
    pub fn group(&self, name: &str) -> Option<&HandleGroup> {
        self.groups.iter().find(|group| group.name == name)
    }

    /// Group with the given name, created at the end when absent
    pub fn group_mut(&mut self, name: &str) -> &mut HandleGroup {
        let index = match self.groups.iter().position(|group| group.name == name) {
            Some(index) => index,
            None => {
                self.groups.push(HandleGroup::new(name));
                self.groups.len() - 1
            }
        };
        &mut self.groups[index]
    }

    /// Reactor handles
    pub fn reactors(&self) -> impl Iterator<Item = &Handle> + '_ {
        self.group(REACTORS)
            .into_iter()
            .flat_map(|group| group.pointers.iter().map(|pointer| &pointer.handle))
    }

    /// Extension dictionary handle
    pub fn xdictionary(&self) -> Option<&Handle> {
        self.group(XDICTIONARY)
            .and_then(|group| group.pointers.first())
            .map(|pointer| &pointer.handle)
    }

    /// First ungrouped 330 pointer: the owner of the record
    pub fn soft_owner(&self) -> Option<&Handle> {
        self.nth(330, 0)
    }

    /// The `n`-th (0-based) ungrouped pointer read with `code`
    pub fn nth(&self, code: i32, n: usize) -> Option<&Handle> {
        self.pointers
            .iter()
            .filter(|pointer| pointer.code == code)
            .nth(n)
            .map(|pointer| &pointer.handle)
    }

    /// Add a reactor (330 in the reactors group)
    pub fn add_reactor(&mut self, handle: impl Into<Handle>) {
        self.group_mut(REACTORS)
            .pointers
            .push(HandlePointer::new(330, handle));
    }

    /// Set the extension dictionary (360 in the dictionary group)
    pub fn set_xdictionary(&mut self, handle: impl Into<Handle>) {
        let group = self.group_mut(XDICTIONARY);
        group.pointers.clear();
        group.pointers.push(HandlePointer::new(360, handle));
    }

    /// Set the owner, replacing the first ungrouped 330 pointer
    pub fn set_soft_owner(&mut self, handle: impl Into<Handle>) {
        let pointer = HandlePointer::new(330, handle);
        match self.pointers.iter_mut().find(|p| p.code == 330) {
            Some(existing) => *existing = pointer,
            None => self.pointers.insert(0, pointer),
        }
    }

    /// Append an ungrouped pointer
    pub fn push_pointer(&mut self, code: i32, handle: impl Into<Handle>) {
        self.pointers.push(HandlePointer::new(code, handle));
    }

    /// Every pointer with a non-null target, grouped ones first
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        let grouped = self.groups.iter().flat_map(|group| {
            group
                .pointers
                .iter()
                .map(move |pointer| (Some(group.name.as_str()), pointer))
        });
        let ungrouped = self.pointers.iter().map(|pointer| (None, pointer));
        grouped.chain(ungrouped).filter_map(|(group, pointer)| {
            let kind = pointer.kind()?;
            if pointer.handle.is_null() {
                return None;
            }
            Some(Edge {
                group: group.map(str::to_string),
                field: None,
                kind,
                code: pointer.code,
                target: pointer.handle.clone(),
            })
        })
    }

    /// Append the overlay's tags: groups wrapped in 102 braces, then the
    /// ungrouped pointers. Empty handles and groups left empty are skipped.
    pub fn encode_into(&self, tags: &mut Vec<Tag>) {
        for group in &self.groups {
            let mut pointers = group
                .pointers
                .iter()
                .filter(|pointer| !pointer.handle.as_str().is_empty())
                .peekable();
            if pointers.peek().is_none() {
                continue;
            }
            tags.push(Tag::new(102, format!("{{{}", group.name)));
            tags.extend(pointers.map(|p| Tag::new(p.code, p.handle.as_str())));
            tags.push(Tag::new(102, "}"));
        }
        tags.extend(
            self.pointers
                .iter()
                .filter(|pointer| !pointer.handle.as_str().is_empty())
                .map(|p| Tag::new(p.code, p.handle.as_str())),
        );
    }
}

/// A reference from one record to another
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    /// 102 group the pointer was read in
    pub group: Option<String>,
    /// Schema field holding the pointer, for typed handle fields
    pub field: Option<&'static str>,
    pub kind: PointerKind,
    pub code: i32,
    pub target: Handle,
}

/// Outgoing references of every record that has a handle, keyed by that
/// handle in input order.
///
/// Both overlay pointers and handle-typed schema fields contribute edges.
/// Targets are not checked against the record set.
pub fn adjacency<'a, I>(records: I) -> IndexMap<Handle, Vec<Edge>>
where
    I: IntoIterator<Item = &'a EntityRecord>,
{
    let mut graph: IndexMap<Handle, Vec<Edge>> = IndexMap::new();
    for record in records {
        let Some(source) = record.handle.as_ref().filter(|h| !h.is_null()) else {
            continue;
        };
        let mut edges: Vec<Edge> = record.handles.edges().collect();
        for (def, value) in record.fields() {
            let Some(kind) = PointerKind::from_code(def.code) else {
                continue;
            };
            for target in value.as_slice().iter().filter_map(|v| v.as_handle()) {
                if target.is_null() {
                    continue;
                }
                edges.push(Edge {
                    group: None,
                    field: Some(def.name),
                    kind,
                    code: def.code,
                    target: target.clone(),
                });
            }
        }
        graph.entry(source.clone()).or_default().extend(edges);
    }
    graph
}
