//! Number constructor, statics and prototype methods

use super::{call, error_name, global, member};
use jsse_core::{Interpreter, JsValue};

fn new_number(interp: &mut Interpreter, arg: JsValue) -> JsValue {
    let ctor = global(interp, "Number");
    interp.construct(&ctor, &[arg]).into_result().unwrap()
}

#[test]
fn test_nan_value_of() {
    let mut interp = Interpreter::new();
    let number = global(&mut interp, "Number");
    let nan = member(&mut interp, &number, "NaN");
    assert!(call(&mut interp, &nan, "valueOf", &[]).unwrap().is_nan());
    assert_eq!(
        call(&mut interp, &nan, "toFixed", &[]).unwrap(),
        JsValue::string("NaN")
    );
}

#[test]
fn test_non_numeric_string_wraps_nan() {
    let mut interp = Interpreter::new();
    let wrapped = new_number(&mut interp, JsValue::string("adf"));
    assert!(call(&mut interp, &wrapped, "valueOf", &[]).unwrap().is_nan());
}

#[test]
fn test_infinities() {
    let mut interp = Interpreter::new();
    let number = global(&mut interp, "Number");
    let pos = member(&mut interp, &number, "POSITIVE_INFINITY");
    let neg = member(&mut interp, &number, "NEGATIVE_INFINITY");
    assert_eq!(
        call(&mut interp, &pos, "valueOf", &[]).unwrap(),
        JsValue::Number(f64::INFINITY)
    );
    assert_eq!(
        call(&mut interp, &neg, "valueOf", &[]).unwrap(),
        JsValue::Number(f64::NEG_INFINITY)
    );
    assert_eq!(
        call(&mut interp, &pos, "toFixed", &[]).unwrap(),
        JsValue::string("Infinity")
    );
    assert_eq!(
        call(&mut interp, &neg, "toFixed", &[JsValue::Number(2.0)]).unwrap(),
        JsValue::string("-Infinity")
    );
}

#[test]
fn test_wrapper_versus_primitive() {
    let mut interp = Interpreter::new();
    let wrapped = new_number(&mut interp, JsValue::Number(33.0));
    assert_eq!(interp.typeof_val(&wrapped), "object");
    assert_eq!(interp.typeof_val(&JsValue::Number(33.0)), "number");
    assert_eq!(
        call(&mut interp, &wrapped, "valueOf", &[]).unwrap(),
        JsValue::Number(33.0)
    );
    assert_eq!(interp.format_value(&wrapped), "[Number 33]");
}

#[test]
fn test_prototype_links() {
    let mut interp = Interpreter::new();
    let number = global(&mut interp, "Number");
    let proto = member(&mut interp, &number, "prototype");
    assert_eq!(member(&mut interp, &proto, "constructor"), number);
    assert_eq!(
        call(&mut interp, &proto, "valueOf", &[]).unwrap(),
        JsValue::Number(0.0)
    );

    let object = global(&mut interp, "Object");
    let object_proto = member(&mut interp, &object, "prototype");
    assert_eq!(
        interp.get_prototype_of(proto.as_object().unwrap()),
        object_proto.as_object()
    );
}

#[test]
fn test_to_fixed_default_rounds_to_integer() {
    let mut interp = Interpreter::new();
    let wrapped = new_number(&mut interp, JsValue::Number(12345.67890123));
    assert_eq!(
        call(&mut interp, &wrapped, "toFixed", &[]).unwrap(),
        JsValue::string("12346")
    );
}

#[test]
fn test_to_fixed_range() {
    let mut interp = Interpreter::new();
    let n = JsValue::Number(1.5);
    for digits in [-1.0, 21.0, f64::INFINITY] {
        let exc = call(&mut interp, &n, "toFixed", &[JsValue::Number(digits)]).unwrap_err();
        assert_eq!(error_name(&mut interp, &exc), "RangeError");
    }
    assert_eq!(
        call(&mut interp, &n, "toFixed", &[JsValue::Number(0.0)]).unwrap(),
        JsValue::string("2")
    );
    assert_eq!(
        call(&mut interp, &n, "toFixed", &[JsValue::Number(20.0)]).unwrap(),
        JsValue::string("1.50000000000000000000")
    );
}

#[test]
fn test_to_fixed_exact_binary_value() {
    let mut interp = Interpreter::new();
    // 1.005 is stored just below 1.005
    let n = JsValue::Number(1.005);
    assert_eq!(
        call(&mut interp, &n, "toFixed", &[JsValue::Number(2.0)]).unwrap(),
        JsValue::string("1.00")
    );
    let big = JsValue::Number(1e21);
    assert_eq!(
        call(&mut interp, &big, "toFixed", &[JsValue::Number(2.0)]).unwrap(),
        JsValue::string("1e+21")
    );
}

#[test]
fn test_unary_minus() {
    let mut interp = Interpreter::new();
    assert_eq!(
        interp.unary_minus(&JsValue::Number(123.0)).unwrap(),
        JsValue::Number(-123.0)
    );
    let number = global(&mut interp, "Number");
    let pos = member(&mut interp, &number, "POSITIVE_INFINITY");
    let value = call(&mut interp, &pos, "valueOf", &[]).unwrap();
    assert_eq!(
        interp.unary_minus(&value).unwrap(),
        JsValue::Number(f64::NEG_INFINITY)
    );
    let wrapped = new_number(&mut interp, JsValue::Number(7.0));
    assert_eq!(interp.unary_minus(&wrapped).unwrap(), JsValue::Number(-7.0));
}

#[test]
fn test_to_string_and_radix() {
    let mut interp = Interpreter::new();
    let cases = [
        (-0.0, None, "0"),
        (1e21, None, "1e+21"),
        (0.000001, None, "0.000001"),
        (1e-7, None, "1e-7"),
        (255.0, Some(2.0), "11111111"),
        (-255.5, Some(16.0), "-ff.8"),
        (0.5, Some(36.0), "0.i"),
    ];
    for (x, radix, expected) in cases {
        let args: Vec<JsValue> = radix.map(JsValue::Number).into_iter().collect();
        assert_eq!(
            call(&mut interp, &JsValue::Number(x), "toString", &args).unwrap(),
            JsValue::string(expected),
            "{x} radix {radix:?}"
        );
    }
    let exc = call(&mut interp, &JsValue::Number(1.0), "toString", &[JsValue::Number(37.0)])
        .unwrap_err();
    assert_eq!(error_name(&mut interp, &exc), "RangeError");
}

#[test]
fn test_method_on_foreign_this() {
    let mut interp = Interpreter::new();
    let number = global(&mut interp, "Number");
    let proto = member(&mut interp, &number, "prototype");
    let to_fixed = member(&mut interp, &proto, "toFixed");
    for this in [JsValue::string("1"), JsValue::Boolean(true), JsValue::Undefined] {
        let exc = interp
            .call_function(&to_fixed, &this, &[])
            .into_result()
            .unwrap_err();
        assert_eq!(error_name(&mut interp, &exc), "TypeError");
    }
}

#[test]
fn test_argument_conversion_uses_to_primitive() {
    let mut interp = Interpreter::new();
    let obj = JsValue::Object(interp.new_object());
    let value_of = interp.new_function("valueOf", 0, |_, _, _| {
        jsse_core::Completion::Normal(JsValue::Number(3.0))
    });
    interp
        .set_property(obj.as_object().unwrap(), "valueOf", value_of, &obj, true)
        .unwrap();
    assert_eq!(
        call(&mut interp, &JsValue::Number(2.0), "toFixed", &[obj.clone()]).unwrap(),
        JsValue::string("2.000")
    );
    let number = global(&mut interp, "Number");
    let converted = interp
        .call_function(&number, &JsValue::Undefined, &[obj])
        .into_result()
        .unwrap();
    assert_eq!(converted, JsValue::Number(3.0));
}

#[test]
fn test_prototype_string_forms() {
    let mut interp = Interpreter::new();
    let number = global(&mut interp, "Number");
    let proto = member(&mut interp, &number, "prototype");
    for method in ["toString", "toLocaleString"] {
        assert_eq!(
            call(&mut interp, &proto, method, &[]).unwrap(),
            JsValue::string("0"),
            "{method}"
        );
    }
}

#[test]
fn test_wrapped_integer_string_forms() {
    let mut interp = Interpreter::new();
    let wrapped = new_number(&mut interp, JsValue::Number(12.0));
    for method in ["toString", "toLocaleString"] {
        assert_eq!(
            call(&mut interp, &wrapped, method, &[]).unwrap(),
            JsValue::string("12"),
            "{method}"
        );
    }
}

#[test]
fn test_number_called_as_function() {
    let mut interp = Interpreter::new();
    let number = global(&mut interp, "Number");
    let converted = interp
        .call_function(&number, &JsValue::Undefined, &[JsValue::Number(8.0)])
        .into_result()
        .unwrap();
    assert_eq!(converted, JsValue::Number(8.0));
    assert_eq!(interp.typeof_val(&converted), "number");
}

#[test]
fn test_global_value_bindings() {
    let mut interp = Interpreter::new();
    let nan = global(&mut interp, "NaN");
    assert!(call(&mut interp, &nan, "valueOf", &[]).unwrap().is_nan());

    // -Infinity.valueOf() negates the method result
    let infinity = global(&mut interp, "Infinity");
    let value = call(&mut interp, &infinity, "valueOf", &[]).unwrap();
    assert_eq!(value, JsValue::Number(f64::INFINITY));
    assert_eq!(
        interp.unary_minus(&value).unwrap(),
        JsValue::Number(f64::NEG_INFINITY)
    );
}
