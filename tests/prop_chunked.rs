use icapwire::chunked;
use icapwire::{ChunkedError, HeaderStore};
use proptest::prelude::*;

fn encode_chunked(chunks: &[Vec<u8>]) -> Vec<u8> {
    let mut out = Vec::new();
    for chunk in chunks.iter().filter(|c| !c.is_empty()) {
        out.extend_from_slice(format!("{:X}\r\n", chunk.len()).as_bytes());
        out.extend_from_slice(chunk);
        out.extend_from_slice(b"\r\n");
    }
    out.extend_from_slice(b"0\r\n\r\n");
    out
}

proptest! {
    #[test]
    fn decode_concatenates_chunks(chunks in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..64), 0..8)) {
        let payload = encode_chunked(&chunks);
        let decoded = chunked::decode(Some(payload.as_slice())).unwrap().unwrap();
        prop_assert_eq!(decoded, chunks.concat());
    }

    #[test]
    fn decode_never_panics(payload in prop::collection::vec(any::<u8>(), 0..256)) {
        let _ = chunked::decode(Some(payload.as_slice()));
    }

    #[test]
    fn short_chunk_is_truncated(data in prop::collection::vec(any::<u8>(), 0..64), extra in 1usize..64) {
        let declared = data.len() + extra;
        let mut payload = format!("{:x}\r\n", declared).into_bytes();
        payload.extend_from_slice(&data);

        prop_assert_eq!(
            chunked::decode(Some(payload.as_slice())),
            Err(ChunkedError::TruncatedChunkData { declared, remaining: data.len() })
        );
    }

    #[test]
    fn header_names_are_unique_ignoring_case(
        pairs in prop::collection::vec(("[A-Za-z-]{1,8}", "[ -~]{0,16}"), 0..32)
    ) {
        let mut headers = HeaderStore::new();
        for (name, value) in &pairs {
            headers.add_header(name, value);
        }

        prop_assert_eq!(headers.header_names().len(), headers.all_values().len());
        for name in headers.header_names() {
            prop_assert!(headers.values(name).is_some_and(|v| !v.is_empty()));
        }
        let total: usize = headers.all_values().iter().map(|(_, v)| v.len()).sum();
        prop_assert_eq!(total, pairs.len());
    }
}
