use super::*;
use conflang_tree::Value;

fn kinds(result: &ParseResult) -> Vec<DiagnosticKind> {
    result.diagnostics.iter().map(|d| d.kind.clone()).collect()
}

fn parse(source: &str) -> ParseResult {
    Parser::new().parse(source)
}

#[test]
fn test_simple_block() {
    let result = parse(
        r#"{
            port = 8080,
            host = "localhost"
        }"#,
    );
    assert!(result.is_ok(), "{:?}", result.diagnostics);
    assert_eq!(result.mapping.get("port"), Some(&Value::Integer(8080)));
    assert_eq!(result.mapping.get("host"), Some(&Value::text("localhost")));
}

#[test]
fn test_constant_in_list() {
    let result = parse(
        "version: 2;
        settings = (list 1 2 [version])",
    );
    assert!(result.is_ok());
    assert_eq!(
        result.mapping.get("settings"),
        Some(&Value::Array(vec![
            Value::Integer(1),
            Value::Integer(2),
            Value::Integer(2),
        ]))
    );
}

#[test]
fn test_nested_block() {
    let result = parse(
        r#"{
            database = {
                name = "test",
                tables = (list users products)
            }
        }"#,
    );
    assert!(result.is_ok());
    let root = Value::Mapping(result.mapping);
    assert_eq!(root.get("database.name").and_then(Value::as_str), Some("test"));
    assert_eq!(
        root.get("database.tables[1]").and_then(Value::as_str),
        Some("products")
    );
}

#[test]
fn test_top_level_array() {
    let result = parse("features = (list api auth logging)");
    let features = result.mapping.get("features").and_then(Value::as_array);
    assert_eq!(
        features,
        Some(&[Value::text("api"), Value::text("auth"), Value::text("logging")][..])
    );
}

#[test]
fn test_comments_have_no_effect() {
    let result = parse(
        r#"<# leading comment #>
        {
            <# inside the block #>
            port = 8080, <# trailing
            and multi-line #>
            host = "localhost"
        }"#,
    );
    assert!(result.is_ok());
    assert_eq!(result.mapping.keys().collect::<Vec<_>>(), vec!["port", "host"]);
}

#[test]
fn test_undefined_constant() {
    let result = parse("value = [undefined_const]");
    assert!(result.has_errors());
    assert_eq!(
        kinds(&result),
        vec![DiagnosticKind::UndefinedConstant("undefined_const".into())]
    );
    assert_eq!(
        result.mapping.get("value"),
        Some(&Value::text("${undefined_const}"))
    );
    assert!(result.messages()[0].to_lowercase().contains("undefined"));
}

#[test]
fn test_invalid_key_in_block() {
    let result = parse("{ Port = 8080, host = ok }");
    assert_eq!(kinds(&result), vec![DiagnosticKind::InvalidKeyName("Port".into())]);
    assert_eq!(result.mapping.keys().collect::<Vec<_>>(), vec!["host"]);
}

#[test]
fn test_underscore_rejected_in_keys_only() {
    let result = parse("with_under: 1;\nwith_under = [with_under]");
    assert_eq!(
        kinds(&result),
        vec![DiagnosticKind::InvalidKeyName("with_under".into())]
    );
}

#[test]
fn test_invalid_constant_name() {
    let result = parse("Max: 10;\nlimit = [Max]");
    assert_eq!(
        kinds(&result),
        vec![
            DiagnosticKind::InvalidConstantName("Max".into()),
            DiagnosticKind::UndefinedConstant("Max".into()),
        ]
    );
}

#[test]
fn test_complex_structure() {
    let result = parse(
        "max_connections: 100;
        {
            server = {
                port = 8080,
                workers = 4,
                limits = {
                    connections = [max_connections],
                    timeout = 30
                },
                modules = (list auth cache database)
            }
        }",
    );
    assert!(result.is_ok(), "{:?}", result.messages());
    let root = Value::Mapping(result.mapping);
    let int = |path| root.get(path).and_then(Value::as_integer);
    assert_eq!(int("server.port"), Some(8080));
    assert_eq!(int("server.workers"), Some(4));
    assert_eq!(int("server.limits.connections"), Some(100));
    assert_eq!(int("server.limits.timeout"), Some(30));
    assert_eq!(
        root.get("server.modules").and_then(Value::as_array).map(<[_]>::len),
        Some(3)
    );
}

#[test]
fn test_constant_holding_mapping() {
    let result = parse("defaults: { retries = 3, mode = fast };\nclient = [defaults]");
    assert!(result.is_ok());
    let root = Value::Mapping(result.mapping);
    assert_eq!(
        root.get("client.retries").and_then(Value::as_integer),
        Some(3)
    );
}

#[test]
fn test_constant_must_precede_use() {
    let result = parse("early = [late]\nlate: 1;\nafter = [late]");
    assert_eq!(
        kinds(&result),
        vec![DiagnosticKind::UndefinedConstant("late".into())]
    );
    assert_eq!(result.mapping.get("after"), Some(&Value::Integer(1)));
}

#[test]
fn test_redeclared_constant_overwrites() {
    let result = parse("n: 1;\na = [n]\nn: 2;\nb = [n]");
    assert!(result.is_ok());
    assert_eq!(result.mapping.get("a"), Some(&Value::Integer(1)));
    assert_eq!(result.mapping.get("b"), Some(&Value::Integer(2)));
}

#[test]
fn test_duplicate_keys_overwrite_in_place() {
    let result = parse("a = 1\nb = 2\n{ a = 3 }");
    assert!(result.is_ok());
    assert_eq!(result.mapping.keys().collect::<Vec<_>>(), vec!["a", "b"]);
    assert_eq!(result.mapping.get("a"), Some(&Value::Integer(3)));
}

#[test]
fn test_numeric_edge_cases_are_text() {
    let result = parse("zero = 0\nneg = -5\npadded = 007\nfloat = 1.5");
    assert!(result.is_ok());
    for (key, text) in [("zero", "0"), ("neg", "-5"), ("padded", "007"), ("float", "1.5")] {
        assert_eq!(result.mapping.get(key), Some(&Value::text(text)), "{key}");
    }
}

#[test]
fn test_quoted_list_items_stay_whole() {
    let result = parse(r#"greetings = (list "hello world" 'good bye')"#);
    assert_eq!(
        result.mapping.get("greetings"),
        Some(&Value::Array(vec![
            Value::text("hello world"),
            Value::text("good bye"),
        ]))
    );
}

#[test]
fn test_apostrophe_in_bare_value() {
    let result = parse("{ owner = o'brien, port = 8080 }");
    assert!(result.is_ok(), "{:?}", result.diagnostics);
    assert_eq!(result.mapping.keys().collect::<Vec<_>>(), vec!["owner", "port"]);
    assert_eq!(result.mapping.get("owner"), Some(&Value::text("o'brien")));
    assert_eq!(result.mapping.get("port"), Some(&Value::Integer(8080)));
}

#[test]
fn test_apostrophe_in_list_item() {
    let result = parse("names = (list o'brien smith jones)");
    assert_eq!(
        result.mapping.get("names"),
        Some(&Value::Array(vec![
            Value::text("o'brien"),
            Value::text("smith"),
            Value::text("jones"),
        ]))
    );
}

#[test]
fn test_empty_value_is_null() {
    let result = parse("nothing =");
    assert!(result.mapping.get("nothing").is_some_and(Value::is_null));
}

#[test]
fn test_empty_block() {
    let result = parse("{}");
    assert!(result.is_ok());
    assert!(result.mapping.is_empty());
}

#[test]
fn test_unrecognized_lines_are_ignored() {
    let result = parse("just some words\n}\n} = 3\nkey = value");
    assert!(result.is_ok());
    assert_eq!(result.mapping.keys().collect::<Vec<_>>(), vec!["key"]);
}

#[test]
fn test_unterminated_block_is_best_effort() {
    let result = parse("{ a = 1,\n  b = { c = 2");
    assert!(result.is_ok());
    let root = Value::Mapping(result.mapping);
    assert_eq!(root.get("a").and_then(Value::as_integer), Some(1));
    assert_eq!(root.get("b.c").and_then(Value::as_integer), Some(2));
}

#[test]
fn test_parsing_resumes_after_block() {
    let result = parse("{ a = 1,\n b = 2 }\nc = 3");
    assert_eq!(result.mapping.keys().collect::<Vec<_>>(), vec!["a", "b", "c"]);
}

#[test]
fn test_unterminated_comment_drops_rest() {
    let result = parse("a = 1\n<# never closed\nb = 2");
    assert!(result.is_ok());
    assert_eq!(result.mapping.keys().collect::<Vec<_>>(), vec!["a"]);
}

#[test]
fn test_nested_diagnostics_are_merged() {
    let result = parse("{ outer = { Inner = 1, ok = [nope] } }");
    assert_eq!(
        kinds(&result),
        vec![
            DiagnosticKind::InvalidKeyName("Inner".into()),
            DiagnosticKind::UndefinedConstant("nope".into()),
        ]
    );
}

#[test]
fn test_constants_visible_at_any_depth() {
    let result = parse("limit: 100;\n{ a = { b = (list { c = [limit] }) } }");
    assert!(result.is_ok());
    let root = Value::Mapping(result.mapping);
    assert_eq!(root.get("a.b[0].c").and_then(Value::as_integer), Some(100));
}

#[test]
fn test_depth_limit() {
    let options = ParseOptions::new().max_depth(3);
    let result = Parser::with_options(options).parse("{ a = { a = { a = { a = { a = 1 } } } } }");
    assert_eq!(kinds(&result), vec![DiagnosticKind::NestingTooDeep { limit: 3 }]);
    let root = Value::Mapping(result.mapping);
    assert!(root.get("a.a.a.a.a").is_some_and(Value::is_null));
}

#[test]
fn test_depth_limit_once_per_statement() {
    let options = ParseOptions::new().max_depth(1);
    let result = Parser::with_options(options).parse(
        "x = (list (list 1 2 3 4))
{ y = { z = { w = 1 } }, v = { u = { t = 2 } } }",
    );
    assert_eq!(
        kinds(&result),
        vec![
            DiagnosticKind::NestingTooDeep { limit: 1 },
            DiagnosticKind::NestingTooDeep { limit: 1 },
        ]
    );
}

#[test]
fn test_pathological_nesting_fails_gracefully() {
    let depth = 10_000;
    let source = format!("x = {}1{}", "(list ".repeat(depth), ")".repeat(depth));
    let result = parse(&source);
    assert_eq!(
        kinds(&result),
        vec![DiagnosticKind::NestingTooDeep {
            limit: DEFAULT_MAX_DEPTH
        }]
    );
}

#[test]
fn test_diagnostic_span_points_at_statement() {
    let source = "<# header #>\nok = 1\nbad = [missing] <# note #>\n";
    let result = parse(source);
    let diagnostic = &result.diagnostics[0];
    assert_eq!(diagnostic.span.slice(source), "bad = [missing]");
}

#[test]
fn test_block_span_covers_all_lines() {
    let source = "{\n  a = 1,\n  B = 2\n}\nafter = 1";
    let result = parse(source);
    assert_eq!(
        result.diagnostics[0].span.slice(source),
        "{\n  a = 1,\n  B = 2\n}"
    );
}

#[test]
fn test_parses_are_independent() {
    let parser = Parser::new();
    assert!(parser.parse("n: 1;").is_ok());
    let result = parser.parse("x = [n]");
    assert_eq!(kinds(&result), vec![DiagnosticKind::UndefinedConstant("n".into())]);
}

#[test]
fn test_into_result() {
    assert!(parse("a = 1").into_result().is_ok());
    assert_eq!(parse("A = 1").into_result().map_err(|d| d.len()), Err(1));
}
