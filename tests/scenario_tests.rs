//! End-to-end scenarios over whole tables and files

mod common;

use common::builders::{layer, sample_record, TWO_LAYERS};
use common::comparison::{assert_clean, assert_records_eq};
use common::{encode_record, read_text_chain, roundtrip};
use dxf_records::io::dxf::{encode_tags, DxfReaderConfiguration, DxfWriterConfiguration, Tag};
use dxf_records::overlay::{PointerKind, REACTORS, XDICTIONARY};
use dxf_records::schema::{DICTIONARY, LAYER, LINE};
use dxf_records::types::{DxfVersion, Handle};
use dxf_records::{adjacency, Chain, DxfError, DxfReader, DxfWriter, EntityRecord, NotificationType, Table};

/// Tags of a plain DXF text fragment, one pair per two lines.
fn fragment_tags(text: &str) -> Vec<Tag> {
    let lines: Vec<&str> = text.lines().collect();
    lines
        .chunks(2)
        .map(|pair| Tag::new(pair[0].trim().parse().unwrap(), pair[1]))
        .collect()
}

#[test]
fn test_two_layer_table() {
    let (chain, notes) = read_text_chain(TWO_LAYERS, DxfVersion::AC1009);
    assert!(notes.is_empty(), "{notes:?}");
    assert_eq!(chain.len(), 2);

    let layers: Vec<&EntityRecord> = chain.iter().collect();
    assert_eq!(layers[0].name(), Some("WALLS"));
    assert_eq!(layers[0].int(62), Some(7));
    assert_eq!(layers[1].name(), Some("DOORS"));
    assert_eq!(layers[1].int(62), Some(1));
    assert_eq!(layers[1].text(6), Some("CONTINUOUS"));

    let mut written: Vec<Tag> = Vec::new();
    for record in &chain {
        written.extend(encode_record(record, DxfVersion::AC1009));
    }
    let mut expected = fragment_tags(TWO_LAYERS);
    assert_eq!(expected.pop(), Some(Tag::new(0, "ENDTAB")));
    assert_eq!(written, expected);
}

#[test]
fn test_empty_name_is_rejected() {
    let text = "0\nLAYER\n2\n\n62\n3\n0\nLAYER\n2\nDOORS\n62\n1\n";
    let (chain, notes) = read_text_chain(text, DxfVersion::AC1009);
    assert_eq!(chain.len(), 1);
    assert_eq!(chain.iter().next().and_then(|l| l.name()), Some("DOORS"));
    let invalid = notes.of_type(NotificationType::InvalidRecord);
    assert_eq!(invalid.len(), 1);
    assert!(invalid[0].message.contains("name"));

    let unnamed = layer("", 3);
    let err = encode_tags(&LAYER, &unnamed, DxfVersion::AC1009).unwrap_err();
    assert!(matches!(err, DxfError::MissingRequiredField { code: 2, .. }));
}

#[test]
fn test_overlay_survives_roundtrip() {
    let mut walls = layer("WALLS", 7).with_handle("10");
    walls.handles.add_reactor("1F");
    walls.handles.add_reactor("20");
    walls.handles.set_xdictionary("3B");
    walls.handles.set_soft_owner("2");

    let (decoded, notes) = roundtrip(&walls, DxfVersion::AC1015);
    assert_clean(&notes, "overlay");
    assert_records_eq(&walls, &decoded, "overlay");
    assert_eq!(
        decoded.handles.reactors().map(Handle::as_str).collect::<Vec<_>>(),
        ["1F", "20"]
    );
    assert_eq!(decoded.handles.xdictionary().map(Handle::as_str), Some("3B"));
    assert_eq!(decoded.handles.soft_owner().map(Handle::as_str), Some("2"));
}

#[test]
fn test_overlay_is_not_written_before_release_14() {
    let mut walls = layer("WALLS", 7).with_handle("10");
    walls.handles.add_reactor("1F");
    walls.handles.set_soft_owner("2");
    let tags = encode_record(&walls, DxfVersion::AC1012);
    assert!(tags.iter().all(|tag| tag.code != 102 && tag.code != 330));
}

#[test]
fn test_adjacency_lists_every_reference() {
    let mut walls = layer("WALLS", 7).with_handle("10");
    walls.handles.add_reactor("1F");
    walls.handles.set_xdictionary("3B");
    walls.handles.set_soft_owner("2");

    let mut dictionary = EntityRecord::new(&DICTIONARY).with_handle("3B");
    dictionary.handles.set_soft_owner("10");
    for (name, handle) in [("A", "40"), ("B", "41")] {
        dictionary.push(3, name).unwrap();
        dictionary.push(350, Handle::new(handle)).unwrap();
    }
    let anonymous = layer("NO_HANDLE", 1);

    let graph = adjacency([&walls, &dictionary, &anonymous]);
    assert_eq!(graph.len(), 2);
    assert_eq!(graph.keys().map(Handle::as_str).collect::<Vec<_>>(), ["10", "3B"]);

    let edges = &graph[&Handle::new("10")];
    assert_eq!(edges.len(), 3);
    assert_eq!(edges[0].group.as_deref(), Some(REACTORS));
    assert_eq!(edges[0].kind, PointerKind::SoftPointer);
    assert_eq!(edges[1].group.as_deref(), Some(XDICTIONARY));
    assert_eq!(edges[1].kind, PointerKind::HardOwner);
    assert_eq!(edges[2].group, None);
    assert_eq!(edges[2].target, Handle::new("2"));

    let entries: Vec<&str> = graph[&Handle::new("3B")]
        .iter()
        .filter(|edge| edge.field == Some("entry_handles"))
        .map(|edge| edge.target.as_str())
        .collect();
    assert_eq!(entries, ["40", "41"]);
    assert!(graph[&Handle::new("3B")]
        .iter()
        .filter(|edge| edge.field.is_some())
        .all(|edge| edge.kind == PointerKind::SoftOwner && edge.kind.is_owner()));
}

/// Write a small drawing, then read it back section by section.
#[test]
fn test_file_roundtrip() {
    let version = DxfVersion::AC1015;
    let mut table = Table::new("LAYER");
    table.header.handle = Some(Handle::new("2"));
    table.add(layer("0", 7).with_handle("10"));
    table.add(layer("WALLS", 5).with_handle("11"));

    let entities: Chain<EntityRecord> = (0..100)
        .map(|i| {
            let mut line = sample_record(&LINE, version);
            line.handle = Some(Handle::from_value(0x100 + i));
            line.set(11, i as f64).unwrap();
            line
        })
        .collect();

    let config = DxfWriterConfiguration {
        version,
        ..Default::default()
    };
    let mut writer = DxfWriter::new(Vec::new(), config);
    writer.write_header().unwrap();
    writer.begin_section("TABLES").unwrap();
    assert_eq!(writer.write_table(&table).unwrap(), 2);
    writer.end_section().unwrap();
    writer.begin_section("ENTITIES").unwrap();
    assert_eq!(writer.write_chain(&entities).unwrap(), 100);
    writer.end_section().unwrap();
    writer.finish().unwrap();
    assert!(writer.notifications().is_empty());
    let bytes = writer.into_inner();

    let mut reader = DxfReader::from_reader(&bytes[..], DxfReaderConfiguration::default()).unwrap();
    assert_eq!(reader.read_header().unwrap(), version);
    assert!(reader.enter_section("TABLES").unwrap());
    let layers = reader.next_table().unwrap().unwrap();
    assert_eq!(layers.name(), "LAYER");
    assert_eq!(layers.header.int(70), Some(2));
    for (expected, actual) in table.iter().zip(layers.iter()) {
        assert_records_eq(expected, actual, "layer table");
    }
    reader.leave_section().unwrap();

    assert!(reader.enter_section("ENTITIES").unwrap());
    let lines = reader.read_chain_par().unwrap();
    assert_eq!(lines.len(), 100);
    for (expected, actual) in entities.iter().zip(lines.iter()) {
        assert_records_eq(expected, actual, "entities");
    }
    reader.leave_section().unwrap();
    assert!(!reader.enter_section("OBJECTS").unwrap());
    assert_clean(reader.notifications(), "file");
}

/// The lazy record reader stops early without draining the stream.
#[test]
fn test_records_can_be_abandoned() {
    let mut text = String::from("0\nSECTION\n2\nENTITIES\n");
    for i in 0..10 {
        text.push_str(&format!("0\nPOINT\n5\n{:X}\n8\n0\n", 0x20 + i));
    }
    text.push_str("0\nENDSEC\n0\nEOF\n");

    let mut reader = DxfReader::from_reader(text.as_bytes(), DxfReaderConfiguration::default())
        .unwrap()
        .with_version(DxfVersion::AC1009);
    assert!(reader.enter_section("ENTITIES").unwrap());
    let first: Vec<EntityRecord> = reader.records().take(3).map(Result::unwrap).collect();
    assert_eq!(first.len(), 3);
    assert_eq!(first[2].handle, Some(Handle::new("22")));

    let rest = reader.read_chain().unwrap();
    assert_eq!(rest.len(), 7);
    assert_eq!(rest.iter().next().and_then(|p| p.handle.clone()), Some(Handle::new("23")));
}
