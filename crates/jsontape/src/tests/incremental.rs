use std::vec;

use crate::{nav, tests::utils::tokenize, ParseError, Parser, ParserOptions, Token};

#[test]
fn split_object_resumes() {
    let json = br#"{"async":"working","num":1234}"#;
    let mut parser = Parser::new(ParserOptions::default());
    let mut tokens = vec![Token::default(); 32];

    // Splits inside the key, inside the value string, inside the number.
    for &len in &[6usize, 16, 25] {
        assert!(
            matches!(
                parser.parse(&json[..len], &mut tokens),
                Err(ParseError::Partial { .. })
            ),
            "split at {len}"
        );
    }

    let used = parser.parse(json, &mut tokens).expect("full buffer");
    tokens.truncate(used);
    assert_eq!(tokens[0].size, 2);

    let val = nav::object_get(json, &tokens, 0, "async").expect("async");
    assert!(nav::token_eq(json, &tokens[val], "working"));

    let num = nav::object_get(json, &tokens, 0, "num").expect("num");
    assert_eq!(nav::parse_i64(json, &tokens[num]), Ok(1234));
}

#[test]
fn byte_by_byte() {
    let json = br#"{"key": "value", "list": [1, 2, 3], "nested": {"a": true}}"#;
    let mut parser = Parser::new(ParserOptions::default());
    let mut tokens = vec![Token::default(); 50];

    let mut used = 0;
    for len in 1..=json.len() {
        match parser.parse(&json[..len], &mut tokens) {
            Ok(n) => {
                assert_eq!(len, json.len(), "completed before the root closed");
                used = n;
            }
            Err(err) => {
                assert!(err.is_partial(), "split at {len}: {err}");
            }
        }
    }
    tokens.truncate(used);

    let list = nav::object_get(json, &tokens, 0, "list").expect("list");
    assert_eq!(tokens[list].size, 3);
    let flag = nav::path(
        json,
        &tokens,
        0,
        &[nav::PathItem::Key("nested"), nav::PathItem::Key("a")],
    )
    .expect("nested.a");
    assert_eq!(nav::parse_bool(json, &tokens[flag]), Ok(true));
}

#[test]
fn every_split_matches_one_shot() {
    let json = r#"{"bool": true, "num": -123.45, "str": "esc \" quote", "deep": [0, {"k": null}]}"#;
    let bytes = json.as_bytes();
    let reference = tokenize(json);

    for split in 1..bytes.len() {
        let mut parser = Parser::new(ParserOptions::default());
        let mut tokens = vec![Token::default(); 64];
        match parser.parse(&bytes[..split], &mut tokens) {
            Err(err) if err.is_partial() => {}
            other => panic!("split at {split}: unexpected {other:?}"),
        }
        let used = parser.parse(bytes, &mut tokens).expect("resume");
        tokens.truncate(used);
        assert_eq!(tokens, reference, "split at {split}");
    }
}

#[test]
fn partial_string_rewinds_to_start() {
    let mut parser = Parser::new(ParserOptions::default());
    let mut tokens = [Token::default(); 4];
    let err = parser
        .parse(br#""a\u12"#, &mut tokens)
        .expect_err("incomplete escape");
    assert!(err.is_partial());
    assert_eq!(parser.pos(), 0);
    assert_eq!(parser.token_count(), 0);
}

#[test]
fn no_progress_is_idempotent() {
    let json = b"[1, 2";
    let mut parser = Parser::new(ParserOptions::default());
    let mut tokens = [Token::default(); 8];

    for _ in 0..3 {
        assert!(matches!(
            parser.parse(json, &mut tokens),
            Err(ParseError::Partial { .. })
        ));
        assert_eq!(parser.pos(), 4);
        assert_eq!(parser.depth(), 1);
        assert_eq!(parser.token_count(), 2);
    }
}

#[test]
fn empty_and_blank_input() {
    let mut parser = Parser::new(ParserOptions::default());
    let mut tokens = [Token::default(); 1];
    assert_eq!(
        parser.parse(b"", &mut tokens),
        Err(ParseError::Partial { pos: 0 })
    );

    let mut parser = Parser::new(ParserOptions::default());
    assert!(matches!(
        parser.parse(b" \t\r\n", &mut tokens),
        Err(ParseError::Partial { .. })
    ));

    let mut counter = Parser::new(ParserOptions::default());
    assert!(matches!(counter.count(b""), Err(ParseError::Partial { .. })));
}

#[test]
fn primitives_wait_for_a_delimiter() {
    // More digits could follow, so a bare number never completes.
    let buf = b"123 ";
    let mut parser = Parser::new(ParserOptions::default());
    let mut tokens = [Token::default(); 2];
    assert!(matches!(
        parser.parse(&buf[..3], &mut tokens),
        Err(ParseError::Partial { .. })
    ));
    assert_eq!(parser.parse(buf, &mut tokens), Ok(1));
    assert_eq!(tokens[0].span(buf), b"123");

    // Literals follow the same rule.
    let buf = b"true\n";
    let mut parser = Parser::new(ParserOptions::default());
    assert!(matches!(
        parser.parse(&buf[..4], &mut tokens),
        Err(ParseError::Partial { .. })
    ));
    assert_eq!(parser.parse(buf, &mut tokens), Ok(1));
    assert_eq!(tokens[0].span(buf), b"true");
}

#[test]
fn rollback_preserves_container_size() {
    let buf = b"[12, 345]";
    let mut parser = Parser::new(ParserOptions::default());
    let mut tokens = vec![Token::default(); 8];

    assert!(matches!(
        parser.parse(&buf[..3], &mut tokens),
        Err(ParseError::Partial { .. })
    ));
    assert!(matches!(
        parser.parse(&buf[..7], &mut tokens),
        Err(ParseError::Partial { .. })
    ));

    let used = parser.parse(buf, &mut tokens).expect("full buffer");
    assert_eq!(used, 3);
    assert_eq!(tokens[0].size, 2);
    assert_eq!(tokens[1].span(buf), b"12");
    assert_eq!(tokens[2].span(buf), b"345");
}

#[test]
fn rollback_restores_root_state() {
    let buf = b"fal";
    let mut parser = Parser::new(ParserOptions::default());
    let mut tokens = [Token::default(); 1];
    assert!(matches!(
        parser.parse(buf, &mut tokens),
        Err(ParseError::Partial { .. })
    ));
    // A second top-level value must still be rejected only after a first one
    // actually lands, so the partial literal may not have set the root flag.
    let grown = b"false ";
    assert_eq!(parser.parse(grown, &mut tokens), Ok(1));
}

#[test]
fn count_mode_resumes_identically() {
    let json = br#"{"k": [true, 12], "s": "x"}"#;
    let expected = tokenize(core::str::from_utf8(json).unwrap()).len();

    let mut counter = Parser::new(ParserOptions::default());
    let mut result = None;
    for len in 1..=json.len() {
        match counter.count(&json[..len]) {
            Ok(n) => result = Some(n),
            Err(err) => assert!(err.is_partial(), "split at {len}: {err}"),
        }
    }
    assert_eq!(result, Some(expected));
}

#[test]
fn permissive_stream_resumes_after_success() {
    let options = ParserOptions {
        allow_multiple_json_values: true,
        ..ParserOptions::default()
    };
    let buf = b"{} {}";
    let mut parser = Parser::new(options);
    let mut tokens = vec![Token::default(); 4];

    assert_eq!(parser.parse(&buf[..2], &mut tokens), Ok(1));
    assert_eq!(parser.parse(buf, &mut tokens), Ok(2));
    assert_eq!((tokens[1].start, tokens[1].end), (3, 5));
}
