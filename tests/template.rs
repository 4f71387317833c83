//! Tests for URI templates.

use urikit::template::{
    Context, ErrorKind, Expression, Modifier, Operator, Part, TemplateCache, UriTemplate, Value,
};

fn context() -> Context {
    let mut context = Context::new();
    context.insert("list", ["red", "green", "blue"]);
    context.insert("x", "1");
    context.insert("id", 42_u64);
    context.insert("keys", [("a", "1"), ("b", "")]);
    context
}

/// Pairs of templates and expansions.
const TEST_CASES: &[(&str, &str)] = &[
    ("{/list*}", "/red/green/blue"),
    ("{?x,y}", "?x=1"),
    ("/items/{id}", "/items/42"),
    ("{?keys*}", "?a=1&b="),
    ("{;keys*}", ";a=1;b"),
    ("{.keys*}", ".a=1.b="),
    ("{&x}", "&x=1"),
    ("plain", "plain"),
    ("", ""),
];

#[test]
fn expansion() {
    let context = context();
    for (template, expected) in TEST_CASES {
        let expanded = UriTemplate::new(template).and_then(|t| t.expand(&context));
        assert_eq!(expanded.as_deref(), Ok(*expected), "template={template:?}");
    }
}

#[test]
fn strict_expansion() {
    let template = UriTemplate::new("/a/{x}{?y}").unwrap();
    let mut context = context();
    let err = template.expand_strict(&context).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UndefinedVariable);
    assert_eq!(err.location(), 6);

    context.insert("y", "2");
    assert_eq!(template.expand_strict(&context).unwrap(), "/a/1?y=2");
}

#[test]
fn structure() {
    let template = UriTemplate::new("/users/{id}{?fields:3,tags*}").unwrap();
    let expressions: Vec<&Expression> = template
        .parts()
        .iter()
        .filter_map(|part| match part {
            Part::Expression(expr) => Some(expr),
            Part::Literal(_) => None,
        })
        .collect();
    assert_eq!(expressions.len(), 2);
    assert_eq!(expressions[0].operator(), Operator::String);
    assert_eq!(expressions[1].operator(), Operator::FormQuery);
    assert_eq!(expressions[1].operator().as_char(), Some('?'));
    let modifiers: Vec<Modifier> = expressions[1]
        .varlist()
        .iter()
        .map(|spec| spec.modifier())
        .collect();
    assert_eq!(modifiers, [Modifier::MaxLen(3), Modifier::Explode]);
    assert_eq!(template.variables(), ["id", "fields", "tags"]);
    assert_eq!(template.to_string(), "/users/{id}{?fields:3,tags*}");
}

#[test]
fn parse_errors() {
    const TEST_CASES: &[(&str, ErrorKind)] = &[
        ("{", ErrorKind::UnclosedExpression),
        ("{}", ErrorKind::EmptyVarList),
        ("{@x}", ErrorKind::UnknownOperator),
        ("{x y}", ErrorKind::InvalidVarName),
        ("{x:0}", ErrorKind::InvalidModifier),
        ("a\"b", ErrorKind::InvalidLiteral),
        ("50%", ErrorKind::InvalidLiteral),
    ];
    for (template, kind) in TEST_CASES {
        let err = UriTemplate::new(template).unwrap_err();
        assert_eq!(err.kind(), *kind, "template={template:?}");
    }
}

#[test]
fn context_updates_are_visible() {
    let template = UriTemplate::new("{x}/{x}").unwrap();
    let mut context = context();
    assert_eq!(template.expand(&context).unwrap(), "1/1");
    context.insert("x", "a b");
    assert_eq!(template.expand(&context).unwrap(), "a%20b/a%20b");
    context.insert("x", Value::Undefined);
    assert_eq!(template.expand(&context).unwrap(), "/");
}

#[test]
fn cache() {
    let mut cache = TemplateCache::new();
    let context = context();
    for _ in 0..2 {
        let template = cache.get_or_parse("/items/{id}").unwrap();
        assert_eq!(template.expand(&context).unwrap(), "/items/42");
    }
    assert!(cache.get_or_parse("{").is_err());
    assert_eq!(cache.len(), 1);
}

#[test]
fn to_uri() {
    let template = UriTemplate::new("https://example.com/search{?q,page}").unwrap();
    let mut context = Context::new();
    context.insert("q", "caf\u{00E9} au lait");
    context.insert("page", 2);
    let uri = template.expand_to_uri(&context).unwrap();
    assert_eq!(uri.hostname(), Some("example.com"));
    assert_eq!(uri.query(), Some("q=caf%C3%A9%20au%20lait&page=2"));
    assert_eq!(
        uri.query_map().get("q").and_then(|v| v.as_str()),
        Some("caf\u{00E9} au lait")
    );
}
