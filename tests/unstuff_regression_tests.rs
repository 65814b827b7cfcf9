//! Integration tests for codeword unstuffing through the public API
//!
//! Covers the documented scenarios (mixed stuffing, message-region rejection,
//! truncated tails) plus symbol-level and batch entry points.

use aztec_bits::tools::{pack_words, parse_bit_string, parse_symbol_line};
use aztec_bits::{
    AztecError, AztecStructure, AztecSymbol, BitView, CodewordUnstuffer, ReadOrder, Unstuffer,
    ValidationError, WordGeometry, unstuff,
};

fn view_of(bytes: &[u8], bits: usize) -> BitView<'_> {
    BitView::wrap(bytes, bits).expect("test input fits its bytes")
}

#[test]
fn test_scenario_mixed_words() {
    let bytes = pack_words(&[0b0011, 0b0001, 0b1110], 4);
    let out = unstuff(&view_of(&bytes, 12), 4, 2).unwrap();
    assert_eq!(out.len(), 10);
    assert_eq!(out.to_string(), "0011000111");
}

#[test]
fn test_scenario_reserved_word_in_message() {
    let bytes = pack_words(&[0b0000], 4);
    let err = unstuff(&view_of(&bytes, 4), 4, 1).unwrap_err();
    assert!(err.is_validation());
    assert_eq!(
        err,
        AztecError::Validation(ValidationError::ReservedWordInMessage { index: 0, value: 0 })
    );
}

#[test]
fn test_tail_remainder_is_not_read() {
    // Only the first 8 of 10 bits form complete words.
    let with_tail = parse_bit_string("0101 1010 11").unwrap();
    let bytes = with_tail.clone().into_bytes();
    let out = unstuff(&view_of(&bytes, with_tail.len()), 4, 2).unwrap();
    assert_eq!(out.to_string(), "01011010");
}

#[test]
fn test_non_reserved_words_pass_through() {
    for width in [2usize, 4, 6, 8, 10, 12] {
        let geometry = WordGeometry::new(width, 1).unwrap();
        let ones = geometry.ones();
        for value in [2u64, ones / 2, ones - 2] {
            if geometry.is_stuffed(value) || geometry.is_reserved(value) {
                continue;
            }
            let bytes = pack_words(&[value], width);
            let out = unstuff(&view_of(&bytes, width), width, 1).unwrap();
            assert_eq!(out.len(), width, "width {width} value {value}");
            assert_eq!(
                out.as_view().read(0, width, ReadOrder::MsbFirst).unwrap(),
                value
            );
        }
    }
}

#[test]
fn test_stuffed_words_recover_top_bits() {
    for width in [2usize, 6, 8, 10, 12] {
        let geometry = WordGeometry::new(width, 1).unwrap();
        let low = pack_words(&[1], width);
        let out = unstuff(&view_of(&low, width), width, 1).unwrap();
        assert_eq!(out.len(), width - 1);
        assert_eq!(out.as_view().read(0, width - 1, ReadOrder::MsbFirst).unwrap(), 0);

        let high = pack_words(&[geometry.ones_minus_one()], width);
        let out = unstuff(&view_of(&high, width), width, 1).unwrap();
        assert_eq!(out.len(), width - 1);
        assert_eq!(
            out.as_view().read(0, width - 1, ReadOrder::MsbFirst).unwrap(),
            geometry.ones_minus_one() >> 1
        );
    }
}

#[test]
fn test_length_accounting() {
    let words = [0b000001, 0b100101, 0b111110, 0b011010, 0b000001, 0b110011];
    let bytes = pack_words(&words, 6);
    let out = unstuff(&view_of(&bytes, words.len() * 6), 6, words.len()).unwrap();
    assert_eq!(out.len(), words.len() * 6 - 3);
}

#[test]
fn test_reserved_values_outside_message_are_kept() {
    let bytes = pack_words(&[0b100101, 0b000000, 0b111111], 6);
    let out = unstuff(&view_of(&bytes, 18), 6, 1).unwrap();
    assert_eq!(out.to_string(), "100101000000111111");
}

#[test]
fn test_failure_returns_no_partial_output() {
    // A valid prefix does not leak out when a later message word fails.
    let bytes = pack_words(&[0b100101, 0b000001, 0b111111], 6);
    let result = unstuff(&view_of(&bytes, 18), 6, 3);
    assert!(matches!(
        result,
        Err(AztecError::Validation(ValidationError::ReservedWordInMessage { index: 2, .. }))
    ));
}

#[test]
fn test_error_kinds_are_distinguishable() {
    let bytes = [0xAA];
    let config = unstuff(&view_of(&bytes, 8), 1, 0).unwrap_err();
    assert!(matches!(config, AztecError::Configuration(_)));
    assert!(!config.is_validation());

    let range = BitView::wrap(&bytes, 16).unwrap_err();
    assert!(matches!(range, AztecError::OutOfRange { .. }));
    assert!(!range.is_validation());
}

#[test]
fn test_repeated_calls_are_identical() {
    let bytes = pack_words(&[0b1010, 0b0001, 0b0110, 0b1110], 4);
    let snapshot = bytes.clone();
    let view = view_of(&bytes, 16);
    let geometry = WordGeometry::new(4, 4).unwrap();
    let a = CodewordUnstuffer::unstuff(&view, geometry).unwrap();
    let b = CodewordUnstuffer::unstuff(&view, geometry).unwrap();
    assert_eq!(a, b);
    assert_eq!(bytes, snapshot);
}

#[test]
fn test_symbol_from_fixture_line() {
    // 3 layers → 8-bit words: 0x31 normal, 0x01 stuffed, 0xFE stuffed; 0x00 lies past the message window
    let symbol = parse_symbol_line("full 3 3 3101fe00", 1).unwrap().unwrap();
    assert_eq!(symbol.word_bit_count().unwrap(), 8);
    let bits = symbol.unstuff().unwrap();
    assert_eq!(bits.to_string(), "0011000100000001111111");
}

#[test]
fn test_batch_mixed_results() {
    let good = AztecSymbol::new(AztecStructure::Compact, 2, 2, pack_words(&[0b010101, 0b000001], 6));
    let bad = AztecSymbol::new(AztecStructure::Compact, 2, 1, pack_words(&[0b111111], 6));
    let wiring = AztecSymbol::new(AztecStructure::Compact, 9, 1, vec![0x55]);
    let symbols = vec![good, bad, wiring];

    let results = Unstuffer::with_par_min_batch(2).unstuff_batch(&symbols);
    assert_eq!(results[0].as_ref().unwrap().to_string(), "01010100000");
    assert!(results[1].as_ref().unwrap_err().is_validation());
    assert!(matches!(results[2], Err(AztecError::Configuration(_))));
}
