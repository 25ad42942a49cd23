use super::super::*;
use super::{BuiltinFn, arg};
use crate::types::number_ops::DigitsOutOfRange;

fn this_number_value(interp: &Interpreter, this: &JsValue) -> Option<f64> {
    match this {
        JsValue::Number(n) => Some(*n),
        JsValue::Object(o) => interp.get_object(o.id).and_then(|obj| {
            let b = obj.borrow();
            if b.class == ObjectClass::Number
                && let Some(JsValue::Number(n)) = b.primitive_value()
            {
                return Some(*n);
            }
            None
        }),
        _ => None,
    }
}

fn this_boolean_value(interp: &Interpreter, this: &JsValue) -> Option<bool> {
    match this {
        JsValue::Boolean(b) => Some(*b),
        JsValue::Object(o) => interp.get_object(o.id).and_then(|obj| {
            let b = obj.borrow();
            if b.class == ObjectClass::Boolean
                && let Some(JsValue::Boolean(v)) = b.primitive_value()
            {
                return Some(*v);
            }
            None
        }),
        _ => None,
    }
}

fn require_number(interp: &mut Interpreter, this: &JsValue, method: &str) -> Result<f64, JsValue> {
    this_number_value(interp, this).ok_or_else(|| {
        interp.create_type_error(&format!(
            "Number.prototype.{method} requires that 'this' be a Number"
        ))
    })
}

fn digits_error(interp: &mut Interpreter, err: DigitsOutOfRange) -> JsValue {
    interp.create_range_error(&err.to_string())
}

/// `undefined` means "argument absent" for the optional digit counts.
fn optional_integer(interp: &mut Interpreter, val: &JsValue) -> Result<Option<f64>, JsValue> {
    if val.is_undefined() {
        return Ok(None);
    }
    interp.to_integer_value(val).map(Some)
}

fn number_to_string(interp: &mut Interpreter, this: &JsValue, args: &[JsValue]) -> Result<JsValue, JsValue> {
    let x = require_number(interp, this, "toString")?;
    let radix = optional_integer(interp, &arg(args, 0))?.unwrap_or(10.0);
    if !(2.0..=36.0).contains(&radix) {
        return Err(interp.create_range_error("toString() radix must be between 2 and 36"));
    }
    Ok(JsValue::string(&number_ops::to_string_radix(x, radix as u32)))
}

fn number_to_fixed(interp: &mut Interpreter, this: &JsValue, args: &[JsValue]) -> Result<JsValue, JsValue> {
    let x = require_number(interp, this, "toFixed")?;
    let f = interp.to_integer_value(&arg(args, 0))?;
    match number_ops::to_fixed(x, f) {
        Ok(s) => Ok(JsValue::string(&s)),
        Err(e) => Err(digits_error(interp, e)),
    }
}

fn number_to_exponential(
    interp: &mut Interpreter,
    this: &JsValue,
    args: &[JsValue],
) -> Result<JsValue, JsValue> {
    let x = require_number(interp, this, "toExponential")?;
    let f = optional_integer(interp, &arg(args, 0))?;
    match number_ops::to_exponential(x, f) {
        Ok(s) => Ok(JsValue::string(&s)),
        Err(e) => Err(digits_error(interp, e)),
    }
}

fn number_to_precision(
    interp: &mut Interpreter,
    this: &JsValue,
    args: &[JsValue],
) -> Result<JsValue, JsValue> {
    let x = require_number(interp, this, "toPrecision")?;
    let p = optional_integer(interp, &arg(args, 0))?;
    match number_ops::to_precision(x, p) {
        Ok(s) => Ok(JsValue::string(&s)),
        Err(e) => Err(digits_error(interp, e)),
    }
}

impl Interpreter {
    pub(crate) fn setup_number_builtins(&mut self) {
        // Number.prototype is itself a Number wrapper around +0.
        let proto_handle = self.create_wrapper(JsValue::Number(0.0));
        let Some(proto) = self.get_object(proto_handle.id) else {
            return;
        };

        let ctor = self.install_constructor(
            "Number",
            1,
            |interp, _this, args| {
                let n = match args.first() {
                    None => 0.0,
                    Some(v) => match interp.to_number_value(v) {
                        Ok(n) => n,
                        Err(e) => return Completion::Throw(e),
                    },
                };
                if interp.new_target().is_some() {
                    return Completion::Normal(JsValue::Object(
                        interp.create_wrapper(JsValue::Number(n)),
                    ));
                }
                Completion::Normal(JsValue::Number(n))
            },
            &proto,
        );

        {
            let mut c = ctor.borrow_mut();
            for (name, value) in [
                ("NaN", f64::NAN),
                ("POSITIVE_INFINITY", f64::INFINITY),
                ("NEGATIVE_INFINITY", f64::NEG_INFINITY),
                ("MAX_VALUE", f64::MAX),
                ("MIN_VALUE", 5e-324),
                ("EPSILON", f64::EPSILON),
                ("MAX_SAFE_INTEGER", 9007199254740991.0),
                ("MIN_SAFE_INTEGER", -9007199254740991.0),
            ] {
                c.insert_property(
                    name.to_string(),
                    PropertyDescriptor::frozen(JsValue::Number(value)),
                );
            }
        }

        let statics: [(&str, usize, BuiltinFn); 4] = [
            ("isNaN", 1, |_interp, _this, args| {
                let result = matches!(arg(args, 0), JsValue::Number(n) if n.is_nan());
                Completion::Normal(JsValue::Boolean(result))
            }),
            ("isFinite", 1, |_interp, _this, args| {
                let result = matches!(arg(args, 0), JsValue::Number(n) if n.is_finite());
                Completion::Normal(JsValue::Boolean(result))
            }),
            ("isInteger", 1, |_interp, _this, args| {
                let result =
                    matches!(arg(args, 0), JsValue::Number(n) if n.is_finite() && n.trunc() == n);
                Completion::Normal(JsValue::Boolean(result))
            }),
            ("isSafeInteger", 1, |_interp, _this, args| {
                let result = matches!(arg(args, 0), JsValue::Number(n)
                    if n.is_finite() && n.trunc() == n && n.abs() <= 9007199254740991.0);
                Completion::Normal(JsValue::Boolean(result))
            }),
        ];
        self.install_methods(&ctor, &statics);

        let methods: [(&str, usize, BuiltinFn); 6] = [
            ("toString", 1, |interp, this, args| {
                number_to_string(interp, this, args).into()
            }),
            ("toLocaleString", 0, |interp, this, _args| {
                let x = match require_number(interp, this, "toLocaleString") {
                    Ok(x) => x,
                    Err(e) => return Completion::Throw(e),
                };
                Completion::Normal(JsValue::string(&number_ops::to_string(x)))
            }),
            ("valueOf", 0, |interp, this, _args| {
                require_number(interp, this, "valueOf")
                    .map(JsValue::Number)
                    .into()
            }),
            ("toFixed", 1, |interp, this, args| {
                number_to_fixed(interp, this, args).into()
            }),
            ("toExponential", 1, |interp, this, args| {
                number_to_exponential(interp, this, args).into()
            }),
            ("toPrecision", 1, |interp, this, args| {
                number_to_precision(interp, this, args).into()
            }),
        ];
        self.install_methods(&proto, &methods);

        self.number_prototype = Some(proto);
    }

    pub(crate) fn setup_boolean_builtins(&mut self) {
        let proto_handle = self.create_wrapper(JsValue::Boolean(false));
        let Some(proto) = self.get_object(proto_handle.id) else {
            return;
        };

        self.install_constructor(
            "Boolean",
            1,
            |interp, _this, args| {
                let b = to_boolean(&arg(args, 0));
                if interp.new_target().is_some() {
                    return Completion::Normal(JsValue::Object(
                        interp.create_wrapper(JsValue::Boolean(b)),
                    ));
                }
                Completion::Normal(JsValue::Boolean(b))
            },
            &proto,
        );

        let methods: [(&str, usize, BuiltinFn); 2] = [
            ("toString", 0, |interp, this, _args| {
                let Some(b) = this_boolean_value(interp, this) else {
                    return interp.throw_error(
                        ErrorKind::TypeError,
                        "Boolean.prototype.toString requires that 'this' be a Boolean",
                    );
                };
                Completion::Normal(JsValue::string(if b { "true" } else { "false" }))
            }),
            ("valueOf", 0, |interp, this, _args| {
                let Some(b) = this_boolean_value(interp, this) else {
                    return interp.throw_error(
                        ErrorKind::TypeError,
                        "Boolean.prototype.valueOf requires that 'this' be a Boolean",
                    );
                };
                Completion::Normal(JsValue::Boolean(b))
            }),
        ];
        self.install_methods(&proto, &methods);

        self.boolean_prototype = Some(proto);
    }
}
