mod error;
mod number;
mod string;

use super::*;
use tracing::debug;

pub(crate) type BuiltinFn = fn(&mut Interpreter, &JsValue, &[JsValue]) -> Completion;

pub(crate) fn arg(args: &[JsValue], idx: usize) -> JsValue {
    args.get(idx).cloned().unwrap_or(JsValue::Undefined)
}

impl Interpreter {
    pub(crate) fn setup_globals(&mut self) {
        // Object.prototype terminates every chain; Function.prototype must
        // exist before the first function object is created.
        let object_proto = self.allocate_object_slot(JsObjectData::new());
        self.object_prototype = Some(object_proto.clone());

        let mut fp = JsObjectData::new();
        fp.prototype = Some(object_proto.clone());
        fp.class = ObjectClass::Function;
        fp.callable = Some(JsFunction::native("", 0, |_, _, _| {
            Completion::Normal(JsValue::Undefined)
        }));
        let function_proto = self.allocate_object_slot(fp);
        self.function_prototype = Some(function_proto.clone());

        self.setup_object_builtins(&object_proto);
        self.setup_function_prototype(&function_proto);
        self.setup_error_builtins();
        self.setup_number_builtins();
        self.setup_boolean_builtins();
        self.setup_string_builtins();

        {
            let mut env = self.global_env.borrow_mut();
            for (name, value) in [
                ("undefined", JsValue::Undefined),
                ("NaN", JsValue::Number(f64::NAN)),
                ("Infinity", JsValue::Number(f64::INFINITY)),
            ] {
                env.define(name, BindingKind::ReadOnly, value);
            }
        }
        debug!(objects = self.live_object_count(), "intrinsics installed");
    }

    pub(crate) fn install_methods(
        &mut self,
        target: &Rc<RefCell<JsObjectData>>,
        methods: &[(&str, usize, BuiltinFn)],
    ) {
        for &(name, arity, func) in methods {
            let fn_val = self.create_function(JsFunction::native(name, arity, func));
            target.borrow_mut().insert_builtin(name.to_string(), fn_val);
        }
    }

    /// Registers a global constructor and links it with `proto` both ways.
    pub(crate) fn install_constructor(
        &mut self,
        name: &str,
        arity: usize,
        func: impl Fn(&mut Interpreter, &JsValue, &[JsValue]) -> Completion + 'static,
        proto: &Rc<RefCell<JsObjectData>>,
    ) -> Rc<RefCell<JsObjectData>> {
        let ctor = self.register_global_fn(name, JsFunction::constructor(name, arity, func));
        let ctor_val = JsValue::Object(ctor.borrow().handle());
        let proto_val = JsValue::Object(proto.borrow().handle());
        proto
            .borrow_mut()
            .insert_builtin("constructor".to_string(), ctor_val);
        ctor.borrow_mut()
            .insert_property("prototype".to_string(), PropertyDescriptor::frozen(proto_val));
        ctor
    }

    fn setup_object_builtins(&mut self, proto: &Rc<RefCell<JsObjectData>>) {
        let methods: [(&str, usize, BuiltinFn); 5] = [
            ("toString", 0, |interp, this, _args| {
                let tag = match this {
                    JsValue::Undefined => "Undefined",
                    JsValue::Null => "Null",
                    _ => {
                        let obj = match interp.to_object(this) {
                            Ok(o) => o,
                            Err(e) => return Completion::Throw(e),
                        };
                        interp
                            .get_object(obj.id)
                            .map_or("Object", |o| o.borrow().class.name())
                    }
                };
                Completion::Normal(JsValue::string(&format!("[object {tag}]")))
            }),
            ("valueOf", 0, |interp, this, _args| {
                interp.to_object(this).map(JsValue::Object).into()
            }),
            ("hasOwnProperty", 1, |interp, this, args| {
                let key = match interp.to_string_value(&arg(args, 0)) {
                    Ok(k) => k,
                    Err(e) => return Completion::Throw(e),
                };
                let found = interp
                    .with_autoboxed(this, |interp, o| Ok(interp.get_own_property(o, &key).is_some()));
                found.map(JsValue::Boolean).into()
            }),
            ("isPrototypeOf", 1, |interp, this, args| {
                let JsValue::Object(v) = arg(args, 0) else {
                    return Completion::Normal(JsValue::Boolean(false));
                };
                let o = match interp.to_object(this) {
                    Ok(o) => o,
                    Err(e) => return Completion::Throw(e),
                };
                let mut cursor = interp.get_prototype_of(v);
                while let Some(p) = cursor {
                    if p == o {
                        return Completion::Normal(JsValue::Boolean(true));
                    }
                    cursor = interp.get_prototype_of(p);
                }
                Completion::Normal(JsValue::Boolean(false))
            }),
            ("propertyIsEnumerable", 1, |interp, this, args| {
                let key = match interp.to_string_value(&arg(args, 0)) {
                    Ok(k) => k,
                    Err(e) => return Completion::Throw(e),
                };
                let found = interp.with_autoboxed(this, |interp, o| {
                    Ok(interp
                        .get_own_property(o, &key)
                        .is_some_and(|d| d.enumerable == Some(true)))
                });
                found.map(JsValue::Boolean).into()
            }),
        ];
        self.install_methods(proto, &methods);

        let ctor = self.install_constructor(
            "Object",
            1,
            |interp, _this, args| {
                let value = arg(args, 0);
                if value.is_nullish() {
                    return Completion::Normal(JsValue::Object(interp.new_object()));
                }
                interp.to_object(&value).map(JsValue::Object).into()
            },
            proto,
        );

        let statics: [(&str, usize, BuiltinFn); 4] = [
            ("getPrototypeOf", 1, |interp, _this, args| {
                let obj = match interp.to_object(&arg(args, 0)) {
                    Ok(o) => o,
                    Err(e) => return Completion::Throw(e),
                };
                Completion::Normal(interp.get_prototype_of(obj).map_or(JsValue::Null, JsValue::Object))
            }),
            ("setPrototypeOf", 2, |interp, _this, args| {
                let target = arg(args, 0);
                if target.is_nullish() {
                    return interp.throw_error(
                        ErrorKind::TypeError,
                        "Object.setPrototypeOf called on null or undefined",
                    );
                }
                let proto = match arg(args, 1) {
                    JsValue::Object(p) => Some(p),
                    JsValue::Null => None,
                    _ => {
                        return interp.throw_error(
                            ErrorKind::TypeError,
                            "Object prototype may only be an Object or null",
                        );
                    }
                };
                let JsValue::Object(obj) = target else {
                    return Completion::Normal(target);
                };
                if !interp.set_prototype_of(obj, proto) {
                    let msg = if interp.is_extensible(obj) {
                        "Cyclic __proto__ value"
                    } else {
                        "Object is not extensible"
                    };
                    return interp.throw_error(ErrorKind::TypeError, msg);
                }
                Completion::Normal(target)
            }),
            ("preventExtensions", 1, |interp, _this, args| {
                let target = arg(args, 0);
                if let JsValue::Object(o) = target {
                    interp.prevent_extensions(o);
                }
                Completion::Normal(target)
            }),
            ("isExtensible", 1, |interp, _this, args| {
                let result = match arg(args, 0) {
                    JsValue::Object(o) => interp.is_extensible(o),
                    _ => false,
                };
                Completion::Normal(JsValue::Boolean(result))
            }),
        ];
        self.install_methods(&ctor, &statics);
    }

    fn setup_function_prototype(&mut self, proto: &Rc<RefCell<JsObjectData>>) {
        let methods: [(&str, usize, BuiltinFn); 2] = [
            ("call", 1, |interp, this, args| {
                if !interp.is_callable(this) {
                    return interp.throw_error(
                        ErrorKind::TypeError,
                        "Function.prototype.call called on a non-function",
                    );
                }
                let this_arg = arg(args, 0);
                let rest = args.get(1..).unwrap_or(&[]);
                interp.call_function(this, &this_arg, rest)
            }),
            ("toString", 0, |interp, this, _args| {
                let name = match this {
                    JsValue::Object(o) if interp.is_callable(this) => interp
                        .get_object(o.id)
                        .and_then(|f| f.borrow().callable.as_ref().map(|c| c.name.clone()))
                        .unwrap_or_default(),
                    _ => {
                        return interp.throw_error(
                            ErrorKind::TypeError,
                            "Function.prototype.toString requires that 'this' be a Function",
                        );
                    }
                };
                Completion::Normal(JsValue::string(&format!(
                    "function {name}() {{ [native code] }}"
                )))
            }),
        ];
        self.install_methods(proto, &methods);
    }
}
