#![no_main]

use arbitrary::Arbitrary;
use jsontape::{ParseError, Parser, ParserOptions, Token};
use libfuzzer_sys::fuzz_target;

const TOKEN_CAP: usize = 256;

#[derive(Arbitrary, Debug)]
struct Input<'a> {
    flags: u8,
    splits: Vec<u8>,
    json: &'a [u8],
}

fuzz_target!(|input: Input<'_>| {
    let options = ParserOptions {
        allow_leading_zeros: input.flags & 1 != 0,
        allow_multiple_json_values: input.flags & 2 != 0,
    };

    // One-shot reference run, plus the count-only equivalence check.
    let mut oneshot = Parser::new(options);
    let mut reference = vec![Token::default(); TOKEN_CAP];
    let reference_result = oneshot.parse(input.json, &mut reference);

    let mut counter = Parser::new(options);
    match (counter.count(input.json), reference_result) {
        (Ok(counted), Ok(used)) => assert_eq!(counted, used),
        // Write mode can only fail earlier via capacity exhaustion.
        (Ok(_), Err(ParseError::NoMemory { .. })) => {}
        (Err(a), Err(b)) if a == b => {}
        (count, parse) => panic!("count-only {count:?} vs write {parse:?}"),
    }

    if let Ok(used) = reference_result {
        for token in &reference[..used] {
            assert!(token.start <= token.end && token.end <= input.json.len());
        }
    }

    // Incremental run over the same buffer with non-decreasing lengths.
    let mut parser = Parser::new(options);
    let mut tokens = vec![Token::default(); TOKEN_CAP];
    let mut len = 0;
    let mut splits = input.splits.iter();
    let final_result = loop {
        let grow = 1 + usize::from(splits.next().copied().unwrap_or(u8::MAX));
        len = (len + grow).min(input.json.len());
        match parser.parse(&input.json[..len], &mut tokens) {
            Err(err) if err.is_partial() => {
                if len == input.json.len() {
                    break Err(err);
                }
            }
            Ok(used) => {
                if len == input.json.len() {
                    break Ok(used);
                }
                // Early success: the root closed inside the prefix. Keep
                // feeding; in single-value mode the tail may turn invalid.
            }
            // Terminal for the session; the one-shot run must fail too.
            Err(err) => {
                assert!(reference_result.is_err(), "incremental {err} but one-shot ok");
                return;
            }
        }
    };

    match (final_result, reference_result) {
        (Ok(used), Ok(expected)) => {
            assert_eq!(used, expected);
            assert_eq!(tokens[..used], reference[..expected]);
        }
        (Ok(_), Err(err)) | (Err(err), Ok(_)) => {
            panic!("incremental and one-shot disagree: {err}");
        }
        (Err(_), Err(_)) => {}
    }
});
