//! Identifier and property references, autoboxing and the property store

use super::{call, error_name, global, member};
use jsse_core::{
    BindingKind, Completion, Config, Environment, Interpreter, JsValue, PropertyDescriptor,
    Reference,
};
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn test_sloppy_write_creates_implicit_global() {
    let mut interp = Interpreter::new();
    let inner = Environment::new(Some(interp.global_env()));
    let r = interp.resolve_identifier(&inner, "counter", false);
    assert!(r.is_unresolvable());
    interp.put_value(&r, JsValue::Number(1.0)).unwrap();

    assert!(interp.global_env().borrow().has_own("counter"));
    assert!(!inner.borrow().has_own("counter"));
    assert_eq!(global(&mut interp, "counter"), JsValue::Number(1.0));

    let again = interp.resolve_global("counter");
    assert!(interp.delete_reference(&again).unwrap());
    assert!(interp.resolve_global("counter").is_unresolvable());
}

#[test]
fn test_strict_global_config() {
    let mut interp = Interpreter::with_config(Config { strict: true });
    let r = interp.resolve_global("undeclared");
    assert!(r.is_strict());
    let exc = interp.put_value(&r, JsValue::Null).unwrap_err();
    assert_eq!(error_name(&mut interp, &exc), "ReferenceError");
    let exc = interp.delete_reference(&r).unwrap_err();
    assert_eq!(error_name(&mut interp, &exc), "SyntaxError");
}

#[test]
fn test_let_binding_lifecycle() {
    let mut interp = Interpreter::new();
    let block = Environment::new(Some(interp.global_env()));
    block.borrow_mut().declare("x", BindingKind::Let);
    let r = interp.resolve_identifier(&block, "x", true);
    let exc = interp.get_value(&r).unwrap_err();
    assert_eq!(error_name(&mut interp, &exc), "ReferenceError");

    assert!(block.borrow_mut().initialize("x", JsValue::Number(1.0)));
    interp.put_value(&r, JsValue::Number(2.0)).unwrap();
    assert_eq!(interp.get_value(&r).unwrap(), JsValue::Number(2.0));
}

#[test]
fn test_blocked_property_writes() {
    let mut interp = Interpreter::new();
    let number = global(&mut interp, "Number");

    let sloppy = Reference::property(number.clone(), "MAX_VALUE", false);
    interp.put_value(&sloppy, JsValue::Number(1.0)).unwrap();
    assert_eq!(
        member(&mut interp, &number, "MAX_VALUE"),
        JsValue::Number(f64::MAX)
    );

    let strict = Reference::property(number, "MAX_VALUE", true);
    let exc = interp.put_value(&strict, JsValue::Number(1.0)).unwrap_err();
    assert_eq!(error_name(&mut interp, &exc), "TypeError");
}

#[test]
fn test_primitive_base_writes() {
    let mut interp = Interpreter::new();
    let five = JsValue::Number(5.0);
    let sloppy = Reference::property(five.clone(), "tag", false);
    interp.put_value(&sloppy, JsValue::Boolean(true)).unwrap();
    assert!(member(&mut interp, &five, "tag").is_undefined());

    let strict = Reference::property(five, "tag", true);
    let exc = interp.put_value(&strict, JsValue::Boolean(true)).unwrap_err();
    assert_eq!(error_name(&mut interp, &exc), "TypeError");
}

#[test]
fn test_accessor_receives_primitive_this() {
    let mut interp = Interpreter::new();
    let number = global(&mut interp, "Number");
    let proto = member(&mut interp, &number, "prototype");

    let getter = interp.new_function("get kind", 0, |interp, this, _| {
        Completion::Normal(JsValue::string(interp.typeof_val(this)))
    });
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    let setter = interp.new_function("set kind", 1, move |_, this, args| {
        sink.borrow_mut().push((this.clone(), args[0].clone()));
        Completion::Normal(JsValue::Undefined)
    });
    assert!(interp.define_own_property(
        proto.as_object().unwrap(),
        "kind",
        PropertyDescriptor::accessor(Some(getter), Some(setter), false, true),
    ));

    assert_eq!(
        member(&mut interp, &JsValue::Number(5.0), "kind"),
        JsValue::string("number")
    );
    let r = Reference::property(JsValue::Number(5.0), "kind", true);
    interp.put_value(&r, JsValue::string("x")).unwrap();
    assert_eq!(
        seen.borrow().as_slice(),
        &[(JsValue::Number(5.0), JsValue::string("x"))]
    );
}

#[test]
fn test_autobox_wrappers_are_not_retained() {
    let mut interp = Interpreter::new();
    let before = interp.live_object_count();
    for _ in 0..10 {
        call(&mut interp, &JsValue::Number(1.5), "toFixed", &[JsValue::Number(1.0)]).unwrap();
        member(&mut interp, &JsValue::string("abc"), "length");
        let r = Reference::property(JsValue::Boolean(true), "x", false);
        interp.put_value(&r, JsValue::Null).unwrap();
    }
    assert_eq!(interp.live_object_count(), before);

    let boxed = interp.to_object(&JsValue::Number(1.0)).unwrap();
    assert_eq!(interp.live_object_count(), before + 1);
    assert_eq!(interp.format_value(&JsValue::Object(boxed)), "[Number 1]");
}

#[test]
fn test_prototype_cycles_rejected() {
    let mut interp = Interpreter::new();
    let a = interp.new_object();
    let b = interp.new_object();
    let c = interp.new_object();
    assert!(interp.set_prototype_of(b, Some(a)));
    assert!(interp.set_prototype_of(c, Some(b)));
    assert!(!interp.set_prototype_of(a, Some(c)));
    assert!(!interp.set_prototype_of(a, Some(a)));
    assert!(interp.set_prototype_of(a, None));
    assert_eq!(interp.get_prototype_of(a), None);
}

#[test]
fn test_non_extensible_objects() {
    let mut interp = Interpreter::new();
    let obj = interp.new_object();
    let val = JsValue::Object(obj);
    assert!(interp.set_property(obj, "a", JsValue::Number(1.0), &val, true).unwrap());
    assert!(interp.prevent_extensions(obj));
    assert!(!interp.set_property(obj, "b", JsValue::Number(1.0), &val, false).unwrap());
    assert!(interp.set_property(obj, "b", JsValue::Number(1.0), &val, true).is_err());
    assert!(interp.set_property(obj, "a", JsValue::Number(2.0), &val, true).unwrap());
    let other = interp.new_object();
    assert!(!interp.set_prototype_of(obj, Some(other)));
}

#[test]
fn test_delete_properties() {
    let mut interp = Interpreter::new();
    let obj = interp.new_object();
    let val = JsValue::Object(obj);
    interp
        .set_property(obj, "gone", JsValue::Null, &val, false)
        .unwrap();
    let r = Reference::property(val.clone(), "gone", true);
    assert!(interp.delete_reference(&r).unwrap());
    assert!(!interp.has_property(obj, "gone"));

    let number = global(&mut interp, "Number");
    let sloppy = Reference::property(number.clone(), "NaN", false);
    assert!(!interp.delete_reference(&sloppy).unwrap());
    let strict = Reference::property(number, "NaN", true);
    let exc = interp.delete_reference(&strict).unwrap_err();
    assert_eq!(error_name(&mut interp, &exc), "TypeError");
}

#[test]
fn test_read_only_global_values() {
    let mut interp = Interpreter::new();
    let env = interp.global_env();
    let binding_kind = env.borrow().binding("Infinity").map(|b| b.kind);
    assert_eq!(binding_kind, Some(BindingKind::ReadOnly));
    let r = interp.resolve_global("Infinity");
    interp.put_value(&r, JsValue::Number(0.0)).unwrap();
    assert_eq!(interp.get_value(&r).unwrap(), JsValue::Number(f64::INFINITY));
}

#[test]
fn test_implicit_global_lands_in_resolving_chain() {
    let mut interp = Interpreter::new();
    let host_global = Environment::new_global(false);
    let activation = Environment::new(Some(host_global.clone()));
    let r = interp.resolve_identifier(&activation, "leaked", false);
    interp.put_value(&r, JsValue::Number(1.0)).unwrap();

    assert!(host_global.borrow().has_own("leaked"));
    assert!(!interp.global_env().borrow().has_own("leaked"));
    let again = interp.resolve_identifier(&activation, "leaked", false);
    assert!(!again.is_unresolvable());
    assert_eq!(interp.get_value(&again).unwrap(), JsValue::Number(1.0));
}
