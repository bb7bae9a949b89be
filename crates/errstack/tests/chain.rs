use errstack::{Error, ErrorKind, walk_deep};
use pretty_assertions::assert_eq;
use strum::IntoEnumIterator;

fn plain(message: &str) -> Error {
    Error::from_std(std::io::Error::other(message.to_string()))
}

struct Case {
    kind: ErrorKind,
    make: fn(&str) -> Error,
    check: fn(&Error) -> bool,
}

macro_rules! case {
    ($kind:ident, $make:ident, $check:ident) => {
        Case {
            kind: ErrorKind::$kind,
            make: |message| errstack::$make(message),
            check: |err| errstack::$check(err),
        }
    };
}

fn cases() -> Vec<Case> {
    vec![
        case!(Timeout, timeout, is_timeout),
        case!(BadRequest, bad_request, is_bad_request),
        case!(NotFound, not_found, is_not_found),
        case!(UserNotFound, user_not_found, is_user_not_found),
        case!(NotSupported, not_supported, is_not_supported),
        case!(NotValid, not_valid, is_not_valid),
        case!(AlreadyExists, already_exists, is_already_exists),
        case!(Unauthorized, unauthorized, is_unauthorized),
        case!(Forbidden, forbidden, is_forbidden),
        case!(NotImplemented, not_implemented, is_not_implemented),
        case!(NotProvisioned, not_provisioned, is_not_provisioned),
        case!(NotAssigned, not_assigned, is_not_assigned),
        case!(MethodNotAllowed, method_not_allowed, is_method_not_allowed),
    ]
}

#[test]
fn every_kind_has_a_case() {
    let kinds: Vec<_> = cases().iter().map(|case| case.kind).collect();
    assert_eq!(kinds, ErrorKind::iter().collect::<Vec<_>>());
}

#[test]
fn classification_round_trip() {
    let cases = cases();
    for case in &cases {
        let err = (case.make)(&format!("test error {}", 1));
        assert!((case.check)(&err), "failed check error: {err}");
        assert_eq!(err.kind(), Some(case.kind));
        assert_eq!(err.to_string(), format!("test error 1 {}", case.kind));

        for other in cases.iter().filter(|other| other.kind != case.kind) {
            assert!(!(other.check)(&err), "{err} also reported as {}", other.kind);
        }
    }
}

#[test]
fn classification_survives_wrapping() {
    let err = errstack::not_found("user 7")
        .annotate("loading profile")
        .with_field("user_id", 7)
        .trace();
    assert!(errstack::is_not_found(&err));
    assert!(!errstack::is_timeout(&err));

    assert!(!errstack::is_not_found(&plain("user 7 not found")));
    assert!(!errstack::is_not_found(&Error::new("user 7 not found")));
}

#[test]
fn walk_deep_finds_the_only_stack() {
    let innermost = Error::new("root");
    let err = innermost.with_field("a", 1).with_field("b", 2);
    assert_eq!(err.chain().count(), 3);

    let found = walk_deep(&err, |node| node.stack_trace_ref().is_some()).expect("stack node");
    assert!(found.cause_ref().is_none());
    assert_eq!(found.to_string(), "root");
}

#[test]
fn walk_deep_without_stack() {
    let err = plain("root").with_field("a", 1).with_field("b", 2);
    assert_eq!(err.chain().count(), 3);
    assert!(walk_deep(&err, |node| node.stack_trace_ref().is_some()).is_none());
    assert!(errstack::stack_tracer(&err).is_none());
}

#[test]
fn reannotating_keeps_a_single_stack() {
    let err = Error::new("ooh")
        .annotate("first")
        .annotate("second")
        .trace()
        .annotate("third");

    let stacks = err.chain().filter(|node| node.stack_trace_ref().is_some()).count();
    assert_eq!(stacks, 1);
    assert_eq!(err.to_string(), "third: second: first: ooh");

    let err = errstack::annotatef!(Some(plain("refused")), "dial {}", "db").expect("annotated");
    let err = errstack::annotate(Some(err), "connect").expect("annotated");
    let stacks = err.chain().filter(|node| node.stack_trace_ref().is_some()).count();
    assert_eq!(stacks, 1);
    assert_eq!(err.to_string(), "connect: dial db: refused");
}

#[test]
fn cause_returns_innermost() {
    let root = errstack::errorf!("hello {}", "world");
    let err = root.clone().annotate("ahh").with_field("k", "v");
    assert_eq!(errstack::cause(&err).to_string(), "hello world");
    assert_eq!(err.cause().to_string(), root.to_string());
}

#[test]
fn fields_union_of_two_attachments() {
    let err = plain("dummy std error")
        .with_fields(errstack::fields! { "key1" => "value1" })
        .with_fields(errstack::fields! { "key2" => "value2", "key3" => "value3" });

    let fields = errstack::fields(&err).expect("fields attached");
    let keys: Vec<_> = fields.keys().map(String::as_str).collect();
    assert_eq!(keys, ["key1", "key2", "key3"]);
}
