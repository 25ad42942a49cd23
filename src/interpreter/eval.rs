use super::*;
use tracing::trace;

// Conversions, autoboxing and function invocation.
impl Interpreter {
    pub fn typeof_val(&self, val: &JsValue) -> &'static str {
        match val {
            JsValue::Undefined => "undefined",
            JsValue::Null => "object",
            JsValue::Boolean(_) => "boolean",
            JsValue::Number(_) => "number",
            JsValue::String(_) => "string",
            JsValue::Object(_) if self.is_callable(val) => "function",
            JsValue::Object(_) => "object",
        }
    }

    pub fn is_callable(&self, val: &JsValue) -> bool {
        match val {
            JsValue::Object(o) => self
                .get_object(o.id)
                .is_some_and(|obj| obj.borrow().callable.is_some()),
            _ => false,
        }
    }

    pub fn is_constructor(&self, val: &JsValue) -> bool {
        match val {
            JsValue::Object(o) => self.get_object(o.id).is_some_and(|obj| {
                obj.borrow()
                    .callable
                    .as_ref()
                    .is_some_and(|f| f.is_constructor)
            }),
            _ => false,
        }
    }

    fn intrinsic_prototype_for(&self, prim: &JsValue) -> Option<Rc<RefCell<JsObjectData>>> {
        let proto = match prim {
            JsValue::Number(_) => &self.number_prototype,
            JsValue::Boolean(_) => &self.boolean_prototype,
            JsValue::String(_) => &self.string_prototype,
            _ => &self.object_prototype,
        };
        proto.clone().or_else(|| self.object_prototype.clone())
    }

    /// Allocates a wrapper object around a Boolean, Number or String
    /// primitive. The slot is fixed for the lifetime of the wrapper.
    pub(crate) fn create_wrapper(&mut self, prim: JsValue) -> JsObject {
        let mut data = JsObjectData::new();
        data.class = match prim {
            JsValue::Number(_) => ObjectClass::Number,
            JsValue::Boolean(_) => ObjectClass::Boolean,
            JsValue::String(_) => ObjectClass::String,
            _ => ObjectClass::Object,
        };
        data.prototype = self.intrinsic_prototype_for(&prim);
        data.primitive_value = Some(prim);
        let obj = self.allocate_object_slot(data);
        let handle = obj.borrow().handle();
        handle
    }

    // §7.1.18 ToObject
    pub fn to_object(&mut self, val: &JsValue) -> Result<JsObject, JsValue> {
        match val {
            JsValue::Undefined | JsValue::Null => {
                Err(self.create_type_error("Cannot convert undefined or null to object"))
            }
            JsValue::Object(o) => Ok(*o),
            _ => Ok(self.create_wrapper(val.clone())),
        }
    }

    /// Runs `f` against `base` as an object. A primitive base is boxed into a
    /// temporary wrapper for the duration of `f` only; the wrapper's slot is
    /// released afterwards, so the box is never observable later.
    pub(crate) fn with_autoboxed<T>(
        &mut self,
        base: &JsValue,
        f: impl FnOnce(&mut Self, JsObject) -> Result<T, JsValue>,
    ) -> Result<T, JsValue> {
        if let JsValue::Object(o) = base {
            return f(self, *o);
        }
        let wrapper = self.to_object(base)?;
        trace!(id = wrapper.id, "autobox wrapper allocated");
        let result = f(self, wrapper);
        self.release_object_slot(wrapper.id);
        result
    }

    // §7.1.1 ToPrimitive
    pub fn to_primitive(&mut self, val: &JsValue, preferred_type: &str) -> Result<JsValue, JsValue> {
        let JsValue::Object(o) = val else {
            return Ok(val.clone());
        };
        let methods = if preferred_type == "string" {
            ["toString", "valueOf"]
        } else {
            ["valueOf", "toString"]
        };
        for method_name in methods {
            let method = self.get_property(*o, method_name, val)?;
            if self.is_callable(&method) {
                let result = self.call_function(&method, val, &[]).into_result()?;
                if !result.is_object() {
                    return Ok(result);
                }
            }
        }
        Err(self.create_type_error("Cannot convert object to primitive value"))
    }

    pub fn to_number_value(&mut self, val: &JsValue) -> Result<f64, JsValue> {
        let prim = self.to_primitive(val, "number")?;
        Ok(to_number(&prim))
    }

    pub fn to_string_value(&mut self, val: &JsValue) -> Result<String, JsValue> {
        let prim = self.to_primitive(val, "string")?;
        Ok(to_js_string(&prim))
    }

    /// ToIntegerOrInfinity on an arbitrary value; `undefined` becomes 0.
    pub(crate) fn to_integer_value(&mut self, val: &JsValue) -> Result<f64, JsValue> {
        Ok(to_integer_or_infinity(self.to_number_value(val)?))
    }

    // §13.5.4 Unary - : ToNumber, then negate
    pub fn unary_minus(&mut self, val: &JsValue) -> Result<JsValue, JsValue> {
        let n = self.to_number_value(val)?;
        Ok(JsValue::Number(number_ops::unary_minus(n)))
    }

    // §7.2.14 IsLooselyEqual
    pub fn abstract_equality(&mut self, left: &JsValue, right: &JsValue) -> Result<bool, JsValue> {
        if std::mem::discriminant(left) == std::mem::discriminant(right) {
            return Ok(strict_equality(left, right));
        }
        if left.is_nullish() && right.is_nullish() {
            return Ok(true);
        }
        if left.is_number() && right.is_string() {
            return self.abstract_equality(left, &JsValue::Number(to_number(right)));
        }
        if left.is_string() && right.is_number() {
            return self.abstract_equality(&JsValue::Number(to_number(left)), right);
        }
        if left.is_boolean() {
            return self.abstract_equality(&JsValue::Number(to_number(left)), right);
        }
        if right.is_boolean() {
            return self.abstract_equality(left, &JsValue::Number(to_number(right)));
        }
        if left.is_object() && (right.is_string() || right.is_number()) {
            let lprim = self.to_primitive(left, "default")?;
            return self.abstract_equality(&lprim, right);
        }
        if right.is_object() && (left.is_string() || left.is_number()) {
            let rprim = self.to_primitive(right, "default")?;
            return self.abstract_equality(left, &rprim);
        }
        Ok(false)
    }

    pub fn call_function(&mut self, func_val: &JsValue, this_val: &JsValue, args: &[JsValue]) -> Completion {
        let callable = match func_val {
            JsValue::Object(o) => self
                .get_object(o.id)
                .and_then(|obj| obj.borrow().callable.clone()),
            _ => None,
        };
        let Some(func) = callable else {
            let desc = self.typeof_val(func_val);
            return self.throw_error(ErrorKind::TypeError, &format!("{desc} is not a function"));
        };
        let saved = self.new_target.take();
        let result = (func.behavior)(self, this_val, args);
        self.new_target = saved;
        result
    }

    // §7.3.15 Construct
    pub fn construct(&mut self, func_val: &JsValue, args: &[JsValue]) -> Completion {
        if !self.is_constructor(func_val) {
            let desc = self.typeof_val(func_val);
            return self.throw_error(ErrorKind::TypeError, &format!("{desc} is not a constructor"));
        }
        let callable = func_val
            .as_object()
            .and_then(|o| self.get_object(o.id))
            .and_then(|obj| obj.borrow().callable.clone());
        let Some(func) = callable else {
            return self.throw_error(ErrorKind::TypeError, "not a constructor");
        };
        let saved = self.new_target.replace(func_val.clone());
        let result = (func.behavior)(self, &JsValue::Undefined, args);
        self.new_target = saved;
        result
    }
}
