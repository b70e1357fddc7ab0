//! Property tests for the chunked content codec.

use std::num::NonZeroU32;

use folio_codec::{decode, encode, try_decode, EncodedContent};
use proptest::prelude::*;

fn chunk_size() -> impl Strategy<Value = NonZeroU32> {
    prop_oneof![
        Just(1_u32),
        Just(1024),
        Just(32768),
        1_u32..=300,
    ]
    .prop_map(|n| NonZeroU32::new(n).unwrap())
}

fn plaintext() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..1024)
}

/// A plaintext together with its envelope, chunks stored in arbitrary order.
fn shuffled_envelope() -> impl Strategy<Value = (Vec<u8>, EncodedContent)> {
    (prop::collection::vec(any::<u8>(), 1..2048), 1_u32..64)
        .prop_flat_map(|(bytes, size)| {
            let encoded = encode(&bytes, NonZeroU32::new(size).unwrap()).unwrap();
            let chunks = Just(encoded.chunks.clone()).prop_shuffle();
            (Just(bytes), Just(encoded), chunks)
        })
        .prop_map(|(bytes, mut encoded, chunks)| {
            encoded.chunks = chunks;
            (bytes, encoded)
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn decode_inverts_encode(bytes in plaintext(), size in chunk_size()) {
        let encoded = encode(&bytes, size).unwrap();
        prop_assert_eq!(try_decode(&encoded).unwrap(), bytes);
    }

    #[test]
    fn chunk_count_is_ceiling(bytes in plaintext(), size in chunk_size()) {
        let encoded = encode(&bytes, size).unwrap();
        let expected = bytes.len().div_ceil(size.get() as usize);
        prop_assert_eq!(encoded.chunks.len(), expected);
    }

    #[test]
    fn indices_are_contiguous_from_zero(bytes in plaintext(), size in chunk_size()) {
        let encoded = encode(&bytes, size).unwrap();
        let indices: Vec<u32> = encoded.chunks.iter().map(|chunk| chunk.index).collect();
        let expected: Vec<u32> = (0..encoded.chunks.len() as u32).collect();
        prop_assert_eq!(indices, expected);
        prop_assert!(encoded.validate().is_ok());
    }

    #[test]
    fn sizes_add_up(bytes in plaintext(), size in chunk_size()) {
        let encoded = encode(&bytes, size).unwrap();
        let sum: u64 = encoded.chunks.iter().map(|chunk| u64::from(chunk.original_size)).sum();
        prop_assert_eq!(encoded.original_size_bytes, bytes.len() as u64);
        prop_assert_eq!(sum, bytes.len() as u64);
    }

    #[test]
    fn shuffled_storage_still_decodes((bytes, encoded) in shuffled_envelope()) {
        prop_assert_eq!(decode(&encoded), bytes);
    }

    #[test]
    fn stored_form_round_trips(bytes in plaintext(), size in chunk_size()) {
        let encoded = encode(&bytes, size).unwrap();
        let restored = EncodedContent::from_bytes(&encoded.to_bytes().unwrap()).unwrap();
        prop_assert_eq!(try_decode(&restored).unwrap(), bytes);
    }
}

#[test]
fn multi_megabyte_body_round_trips() {
    let paragraph = "Breaking news: the council approved the new budget after a long debate. ";
    let body = paragraph.repeat(3 * 1024 * 1024 / paragraph.len() + 1);
    let encoded = encode(body.as_bytes(), folio_codec::DEFAULT_CHUNK_SIZE).unwrap();

    assert_eq!(
        encoded.chunks.len(),
        body.len().div_ceil(folio_codec::DEFAULT_CHUNK_SIZE.get() as usize)
    );
    assert!(encoded.compressed_size_bytes() < encoded.original_size_bytes);
    assert_eq!(try_decode(&encoded).unwrap(), body.as_bytes());
}

#[test]
fn single_byte_and_boundary_sizes() {
    for (len, size) in [(1_usize, 1_u32), (1, 1024), (1024, 1024), (1025, 1024), (32768, 32768)] {
        let bytes = vec![b'x'; len];
        let encoded = encode(&bytes, NonZeroU32::new(size).unwrap()).unwrap();
        assert_eq!(encoded.chunks.len(), len.div_ceil(size as usize));
        assert_eq!(try_decode(&encoded).unwrap(), bytes);
    }
}
