//! Fuzz target for the terminal input parser.
//!
//! The parser sees raw bytes from the terminal, so it must never panic and
//! must always make progress.

#![no_main]

use jkl::input::{InputParser, ParseError};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let parser = InputParser::new();
    let mut remaining = data;

    while !remaining.is_empty() {
        match parser.parse(remaining) {
            Ok((_event, consumed)) => {
                assert!(consumed > 0 && consumed <= remaining.len());
                remaining = &remaining[consumed..];
            }
            Err(ParseError::Empty) => break,
            Err(ParseError::Incomplete) => {
                if let Some((_event, consumed)) = parser.parse_pending_escape(remaining) {
                    remaining = &remaining[consumed..];
                } else {
                    break;
                }
            }
            Err(ParseError::UnrecognizedSequence(seq)) => {
                assert!(!seq.is_empty() && seq.len() <= remaining.len());
                remaining = &remaining[seq.len()..];
            }
            Err(ParseError::InvalidUtf8) => remaining = &remaining[1..],
        }
    }
});
