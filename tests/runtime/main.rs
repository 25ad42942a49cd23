//! Integration tests for the runtime core, driven through the public API the
//! way a statement executor would use it.

mod errors;
mod number;
mod reference;

use jsse_core::{Interpreter, JsValue};

pub fn global(interp: &mut Interpreter, name: &str) -> JsValue {
    let r = interp.resolve_global(name);
    interp.get_value(&r).unwrap()
}

/// `base.key` through a property reference.
pub fn member(interp: &mut Interpreter, base: &JsValue, key: &str) -> JsValue {
    let r = interp.property_reference(base.clone(), key);
    interp.get_value(&r).unwrap()
}

pub fn call(
    interp: &mut Interpreter,
    base: &JsValue,
    method: &str,
    args: &[JsValue],
) -> Result<JsValue, JsValue> {
    interp.call_method(base, method, args).into_result()
}

/// The script-visible `name` of a thrown error object.
pub fn error_name(interp: &mut Interpreter, exc: &JsValue) -> String {
    let name = member(interp, exc, "name");
    interp.format_value(&name)
}
