use crate::fixtures::TEST_DOCUMENT;
use docledger_core::domain::hashes::{digest, DigestBuilder};
use docledger_core::foundation::ContentDigest;

#[test]
fn test_digest_when_repeated_then_identical() {
    let first = digest(TEST_DOCUMENT);
    for _ in 0..16 {
        assert_eq!(digest(TEST_DOCUMENT), first);
    }
}

#[test]
fn test_digest_when_single_byte_differs_then_different() {
    let mut altered = TEST_DOCUMENT.to_vec();
    altered[0] ^= 0x01;
    assert_ne!(digest(&altered), digest(TEST_DOCUMENT));
}

#[test]
fn test_digest_when_input_empty_then_total() {
    let empty = digest(&[]);
    assert_eq!(empty.to_hex().len(), 66);
    assert!(empty.to_hex().starts_with("0xe3b0c442"));
}

#[test]
fn test_digest_text_form_when_parsed_back_then_same_key() {
    let key = digest(TEST_DOCUMENT);
    let text = key.to_hex();
    assert_eq!(text, text.to_lowercase());
    let parsed: ContentDigest = text.parse().expect("parse digest");
    assert_eq!(parsed, key);
}

#[test]
fn test_digest_builder_when_fed_byte_by_byte_then_matches_one_shot() {
    let mut builder = DigestBuilder::new();
    for byte in TEST_DOCUMENT {
        builder.update(std::slice::from_ref(byte));
    }
    assert_eq!(builder.finalize(), digest(TEST_DOCUMENT));
}
