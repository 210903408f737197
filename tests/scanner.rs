mod util;

use lexis::rule;
use lexis::LexerBuilder;
use lexis::Rule;
use lexis::Severity;
use lexis::SourceMap;

use util::assert_tokens;
use util::assert_well_formed;
use util::Kind;

fn builder() -> LexerBuilder<Kind> {
  LexerBuilder::new()
}

#[test]
fn keyword_beats_identifier() {
  let lexer = builder()
    .token_with_priority("IF", "if", 10)
    .unwrap()
    .token_with_priority("ID", "[a-zA-Z]+", 1)
    .unwrap()
    .build();

  let mut map = SourceMap::new();
  let id = map.add("test.file", "if");
  let (tokens, diagnostics) = lexer.scan(id, &map);

  assert!(diagnostics.is_empty(), "unexpected: {diagnostics:?}");
  assert_tokens(&tokens, &map, &[("IF", "if", 0, 2), ("EOF", "", 2, 2)]);
}

#[test]
fn longest_match_wins() {
  let lexer = builder()
    .token("A", "a")
    .unwrap()
    .token("AA", "aa")
    .unwrap()
    .build();

  let mut map = SourceMap::new();
  let id = map.add("test.file", "aa");
  let (tokens, diagnostics) = lexer.scan(id, &map);

  assert!(diagnostics.is_empty());
  assert_tokens(&tokens, &map, &[("AA", "aa", 0, 2), ("EOF", "", 2, 2)]);
}

#[test]
fn longest_match_beats_priority() {
  // Priority only breaks ties between equal-length matches; it never
  // shortens the match.
  let lexer = builder()
    .token_with_priority("A", "a", 100)
    .unwrap()
    .token("AA", "aa")
    .unwrap()
    .build();

  let mut map = SourceMap::new();
  let id = map.add("test.file", "aa");
  let (tokens, _) = lexer.scan(id, &map);

  assert_tokens(&tokens, &map, &[("AA", "aa", 0, 2), ("EOF", "", 2, 2)]);
}

#[test]
fn skipped_whitespace_leaves_no_tokens() {
  let lexer = builder()
    .token("WORD", "[a-zA-Z]+")
    .unwrap()
    .skip("WS", r"\s+")
    .unwrap()
    .build();

  let mut map = SourceMap::new();
  let id = map.add("test.file", "hello   world");
  let (tokens, diagnostics) = lexer.scan(id, &map);

  assert!(diagnostics.is_empty());
  assert_tokens(
    &tokens,
    &map,
    &[
      ("WORD", "hello", 0, 5),
      ("WORD", "world", 8, 13),
      ("EOF", "", 13, 13),
    ],
  );
}

#[test]
fn recovery_from_unexpected_character() {
  let lexer = builder().token("LETTER", "[a-zA-Z]").unwrap().build();

  let mut map = SourceMap::new();
  let id = map.add("test.file", "a@b");
  let (tokens, diagnostics) = lexer.scan(id, &map);

  assert_tokens(
    &tokens,
    &map,
    &[("LETTER", "a", 0, 1), ("LETTER", "b", 2, 3), ("EOF", "", 3, 3)],
  );

  assert_eq!(diagnostics.len(), 1);
  let d = &diagnostics[0];
  assert_eq!(d.severity(), Severity::Error);
  assert_eq!(d.message(), "unexpected character");
  assert_eq!(
    d.help(),
    Some("remove this character or add a lexer rule to handle it")
  );

  let primary = d.primary().unwrap();
  assert_eq!(primary.message(), "unexpected '@'");
  assert_eq!((primary.span().start(), primary.span().end()), (1, 2));

  // Exactly one label, and it is the primary one.
  assert_eq!(d.labels().len(), 1);
}

#[test]
fn recovery_advances_by_whole_characters() {
  let lexer = builder()
    .token("LETTER", "[a-z]")
    .unwrap()
    .skip("WS", r"\s+")
    .unwrap()
    .build();

  let mut map = SourceMap::new();
  let id = map.add("test.file", "a\u{e9} b");
  let (tokens, diagnostics) = lexer.scan(id, &map);

  assert_tokens(
    &tokens,
    &map,
    &[("LETTER", "a", 0, 1), ("LETTER", "b", 4, 5), ("EOF", "", 5, 5)],
  );

  // One diagnostic for the two-byte character, not one per byte.
  assert_eq!(diagnostics.len(), 1);
  let primary = diagnostics[0].primary().unwrap();
  assert_eq!(primary.message(), "unexpected '\u{e9}'");
  assert_eq!((primary.span().start(), primary.span().end()), (1, 3));
}

#[test]
fn error_pattern_emits_diagnostic_instead_of_token() {
  let lexer = builder()
    .token_with_priority("STR", r#""[^"]*""#, 10)
    .unwrap()
    .error_with_priority("ERR", r#""[^"]*$"#, rule::UNTERMINATED_STRING, 5)
    .unwrap()
    .build();

  let mut map = SourceMap::new();
  let id = map.add("test.file", r#""hello world"#);
  let (tokens, diagnostics) = lexer.scan(id, &map);

  assert_tokens(&tokens, &map, &[("EOF", "", 12, 12)]);

  assert_eq!(diagnostics.len(), 1);
  let d = &diagnostics[0];
  assert_eq!(d.message(), "unterminated string literal");
  assert_eq!(d.help(), Some("strings must be closed with a matching quote"));

  let primary = d.primary().unwrap();
  assert_eq!(primary.message(), "here");
  assert_eq!((primary.span().start(), primary.span().end()), (0, 12));
}

#[test]
fn terminated_string_still_lexes() {
  let lexer = builder()
    .token_with_priority("STR", r#""[^"]*""#, 10)
    .unwrap()
    .error_with_priority("ERR", r#""[^"]*$"#, rule::UNTERMINATED_STRING, 5)
    .unwrap()
    .build();

  let mut map = SourceMap::new();
  let id = map.add("test.file", r#""hello""#);
  let (tokens, diagnostics) = lexer.scan(id, &map);

  assert!(diagnostics.is_empty());
  assert_tokens(
    &tokens,
    &map,
    &[("STR", "\"hello\"", 0, 7), ("EOF", "", 7, 7)],
  );
}

#[test]
fn unknown_handler_reference_is_consumed_silently() {
  let mut set = lexis::RuleSet::new(Kind::Eof);
  set.add_rule(Rule::new(Kind::Word, "[a-z]+").unwrap());
  set.add_rule(
    Rule::new(Kind::Err, "#+").unwrap().handled_by("no_such_handler"),
  );

  let mut map = SourceMap::new();
  let id = map.add("test.file", "abc###def");
  let (tokens, diagnostics) = set.scan(id, &map);

  // The match is consumed like a skip rule: no token, no diagnostic.
  assert!(diagnostics.is_empty());
  assert_tokens(
    &tokens,
    &map,
    &[("WORD", "abc", 0, 3), ("WORD", "def", 6, 9), ("EOF", "", 9, 9)],
  );
}

#[test]
fn zero_length_match_is_demoted_to_recovery() {
  // `a*` matches emptily everywhere; at a position with no `a`s it must
  // not be selected, or the scanner would never advance.
  let lexer = builder().token("A", "a*").unwrap().build();

  let mut map = SourceMap::new();
  let id = map.add("test.file", "aab");
  let (tokens, diagnostics) = lexer.scan(id, &map);

  assert_tokens(&tokens, &map, &[("A", "aa", 0, 2), ("EOF", "", 3, 3)]);

  assert_eq!(diagnostics.len(), 1);
  assert_eq!(
    diagnostics[0].primary().unwrap().message(),
    "unexpected 'b'"
  );
}

#[test]
fn equal_priority_equal_length_resolves_to_insertion_order() {
  let lexer = builder()
    .token("ID", "ab")
    .unwrap()
    .token("WORD", "a.")
    .unwrap()
    .build();

  let mut map = SourceMap::new();
  let id = map.add("test.file", "ab");
  let (tokens, _) = lexer.scan(id, &map);

  assert_tokens(&tokens, &map, &[("ID", "ab", 0, 2), ("EOF", "", 2, 2)]);
}

#[test]
fn empty_input_scans_to_lone_eof() {
  let lexer = builder().token("WORD", "[a-z]+").unwrap().build();

  let mut map = SourceMap::new();
  let id = map.add("test.file", "");
  let (tokens, diagnostics) = lexer.scan(id, &map);

  assert!(diagnostics.is_empty());
  assert_tokens(&tokens, &map, &[("EOF", "", 0, 0)]);
}

#[test]
fn scan_is_repeatable() {
  // A lexer is immutable; scanning twice gives identical results.
  let lexer = builder()
    .token("WORD", "[a-z]+")
    .unwrap()
    .skip("WS", " +")
    .unwrap()
    .build();

  let mut map = SourceMap::new();
  let id = map.add("test.file", "one two @");

  let (first, d1) = lexer.scan(id, &map);
  let (second, d2) = lexer.scan(id, &map);

  assert_eq!(first, second);
  assert_eq!(d1.len(), d2.len());
}

#[test]
fn mixed_input_is_well_formed() {
  let text = "if x 12 @@ \"oops";
  let lexer = builder()
    .token_with_priority("IF", "if", 10)
    .unwrap()
    .token("ID", "[a-zA-Z]+")
    .unwrap()
    .token("WORD", "[0-9]+")
    .unwrap()
    .skip("WS", r"\s+")
    .unwrap()
    .error("ERR", r#""[^"]*$"#, rule::UNTERMINATED_STRING)
    .unwrap()
    .build();

  let mut map = SourceMap::new();
  let id = map.add("test.file", text);
  let (tokens, diagnostics) = lexer.scan(id, &map);

  // Two recovery steps for `@@`, one error pattern for the open string.
  assert_eq!(diagnostics.len(), 3);
  assert_well_formed(&tokens, &diagnostics, text.len());
}

#[test]
fn tokens_spans_point_into_the_right_file() {
  let lexer = builder().token("WORD", "[a-z]+").unwrap().build();

  let mut map = SourceMap::new();
  let first = map.add("first.file", "aaa");
  let second = map.add("second.file", "bbb");

  let (tokens, _) = lexer.scan(second, &map);
  assert_eq!(tokens[0].span().source(), second);
  assert_eq!(tokens[0].lexeme(&map), "bbb");

  let (tokens, _) = lexer.scan(first, &map);
  assert_eq!(tokens[0].lexeme(&map), "aaa");
}

#[test]
fn lexeme_resolution_falls_back_to_cached_value() {
  let mut map = SourceMap::new();
  let id = map.add("test.file", "hello");

  let span = lexis::Span::new(id, 0, 5);
  let cached = lexis::Token::with_value(Kind::Word, span, "hello");
  let bare = lexis::Token::new(Kind::Word, span);

  assert_eq!(cached.lexeme(&map), "hello");

  // A map that has never seen the file: the cache is the backup, and a
  // token with no cache resolves to the placeholder.
  let empty = SourceMap::new();
  assert_eq!(cached.lexeme(&empty), "hello");
  assert_eq!(bare.lexeme(&empty), "<unknown>");
}
