//! Error objects, catch hooks and the uncaught-error channel

use super::{call, error_name, global, member};
use jsse_core::{Completion, ErrorKind, Interpreter, JsError, JsValue, Reference};

#[test]
fn test_uncaught_range_error_report() {
    let mut interp = Interpreter::new();
    let err = interp
        .run(|interp| interp.call_method(&JsValue::Number(1.0), "toFixed", &[JsValue::Number(21.0)]))
        .unwrap_err();
    assert_eq!(err.name(), Some("RangeError"));
    assert_eq!(
        err.to_string(),
        "Uncaught RangeError: toFixed() argument must be between 0 and 20"
    );
}

#[test]
fn test_uncaught_reference_error_report() {
    let mut interp = Interpreter::new();
    let err = interp
        .run(|interp| {
            let r = interp.resolve_global("nowhere");
            interp.get_value(&r).into()
        })
        .unwrap_err();
    assert_eq!(err.to_string(), "Uncaught ReferenceError: nowhere is not defined");
}

#[test]
fn test_report_ignores_later_mutation() {
    let mut interp = Interpreter::new();
    let err = interp
        .run(|interp| {
            let exc = interp.create_error(ErrorKind::TypeError, "original");
            let r = Reference::property(exc.clone(), "message", true);
            if let Err(e) = interp.put_value(&r, JsValue::string("rewritten")) {
                return Completion::Throw(e);
            }
            Completion::Throw(exc)
        })
        .unwrap_err();
    assert_eq!(
        err,
        JsError::Uncaught {
            name: "TypeError".to_string(),
            message: "original".to_string(),
        }
    );
}

#[test]
fn test_thrown_primitive_report() {
    let mut interp = Interpreter::new();
    let err = interp
        .run(|_| Completion::Throw(JsValue::string("plain")))
        .unwrap_err();
    assert_eq!(err, JsError::UncaughtValue("plain".to_string()));
    assert_eq!(err.to_string(), "Uncaught plain");
    assert_eq!(err.name(), None);
}

#[test]
fn test_catch_then_inspect() {
    let mut interp = Interpreter::new();
    let result = interp.try_catch(
        |interp| interp.call_method(&JsValue::Null, "valueOf", &[]),
        |interp, exc| Completion::Normal(JsValue::string(&error_name(interp, &exc))),
    );
    match result {
        Completion::Normal(v) => assert_eq!(v, JsValue::string("TypeError")),
        other => panic!("expected normal completion, got {other:?}"),
    }
}

#[test]
fn test_error_constructors() {
    let mut interp = Interpreter::new();
    for name in [
        "Error",
        "TypeError",
        "RangeError",
        "ReferenceError",
        "SyntaxError",
        "EvalError",
        "URIError",
    ] {
        let ctor = global(&mut interp, name);
        let err = interp
            .construct(&ctor, &[JsValue::string("m")])
            .into_result()
            .unwrap();
        assert_eq!(error_name(&mut interp, &err), name);
        assert_eq!(member(&mut interp, &err, "message"), JsValue::string("m"));
        assert_eq!(
            call(&mut interp, &err, "toString", &[]).unwrap(),
            JsValue::string(&format!("{name}: m"))
        );

        let thrown = interp.run(|_| Completion::Throw(err.clone())).unwrap_err();
        assert_eq!(thrown.name(), Some(name));
        assert_eq!(thrown.message(), "m");
    }
}

#[test]
fn test_finally_overrides_only_when_abrupt() {
    let mut interp = Interpreter::new();
    let thrown = interp.throw_error(ErrorKind::Error, "first");
    let kept = interp.try_finally(thrown, |_| Completion::Normal(JsValue::Undefined));
    assert!(matches!(kept, Completion::Throw(_)));

    let thrown = interp.throw_error(ErrorKind::Error, "first");
    let replaced = interp.try_finally(thrown, |interp| interp.throw_error(ErrorKind::TypeError, "second"));
    let Completion::Throw(exc) = replaced else {
        panic!("expected a throw");
    };
    assert_eq!(error_name(&mut interp, &exc), "TypeError");
}
