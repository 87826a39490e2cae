// tests/ndjson.rs
//
// Line-level tolerance of the NDJSON reader used by `tag_ndjson`.

use std::io::{self, BufRead, Cursor, Read};

use social_tagger::ingest::ndjson::read_items;

#[test]
fn bad_lines_are_skipped_and_counted() {
    let mut input: Vec<u8> = Vec::new();
    input.extend_from_slice(br#"{"id":"a","body":"crew training"}"#);
    input.extend_from_slice(b"\n{not json\n\n   \n");
    input.extend_from_slice(b"{\"id\":\"b\",\"body\":\"bad \xff\xfe byte\"}\n");
    input.extend_from_slice(b"{\"id\":\"c\",\"body\":\"port fees\"}\r\n");
    input.extend_from_slice(br#"{"id":"d"}"#); // no trailing newline

    let batch = read_items(Cursor::new(input)).unwrap();
    let ids: Vec<_> = batch.items.iter().map(|it| it.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "c", "d"]);
    assert_eq!(batch.bad_lines, 2);
}

#[test]
fn empty_input_reads_nothing() {
    let batch = read_items(Cursor::new(Vec::new())).unwrap();
    assert!(batch.items.is_empty());
    assert_eq!(batch.bad_lines, 0);
}

/// Reader whose underlying source fails outright.
struct BrokenReader;

impl Read for BrokenReader {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::other("disk gone"))
    }
}

#[test]
fn io_errors_stay_fatal() {
    let reader: Box<dyn BufRead> = Box::new(io::BufReader::new(BrokenReader));
    let err = read_items(reader).unwrap_err();
    assert!(format!("{err:#}").contains("reading input"));
}
