use super::super::*;
use super::BuiltinFn;

fn this_string_value(interp: &Interpreter, this: &JsValue) -> Option<JsString> {
    match this {
        JsValue::String(s) => Some(s.clone()),
        JsValue::Object(o) => interp.get_object(o.id).and_then(|obj| {
            let b = obj.borrow();
            if b.class == ObjectClass::String
                && let Some(JsValue::String(s)) = b.primitive_value()
            {
                return Some(s.clone());
            }
            None
        }),
        _ => None,
    }
}

impl Interpreter {
    pub(crate) fn setup_string_builtins(&mut self) {
        let proto_handle = self.create_wrapper(JsValue::String(JsString::from_str("")));
        let Some(proto) = self.get_object(proto_handle.id) else {
            return;
        };

        self.install_constructor(
            "String",
            1,
            |interp, _this, args| {
                let s = match args.first() {
                    None => JsString::from_str(""),
                    Some(v) => match interp.to_string_value(v) {
                        Ok(s) => JsString::from_str(&s),
                        Err(e) => return Completion::Throw(e),
                    },
                };
                if interp.new_target().is_some() {
                    return Completion::Normal(JsValue::Object(
                        interp.create_wrapper(JsValue::String(s)),
                    ));
                }
                Completion::Normal(JsValue::String(s))
            },
            &proto,
        );

        // toString and valueOf are the same operation on String.prototype.
        let methods: [(&str, usize, BuiltinFn); 2] = [
            ("toString", 0, |interp, this, _args| {
                match this_string_value(interp, this) {
                    Some(s) => Completion::Normal(JsValue::String(s)),
                    None => interp.throw_error(
                        ErrorKind::TypeError,
                        "String.prototype.toString requires that 'this' be a String",
                    ),
                }
            }),
            ("valueOf", 0, |interp, this, _args| {
                match this_string_value(interp, this) {
                    Some(s) => Completion::Normal(JsValue::String(s)),
                    None => interp.throw_error(
                        ErrorKind::TypeError,
                        "String.prototype.valueOf requires that 'this' be a String",
                    ),
                }
            }),
        ];
        self.install_methods(&proto, &methods);

        self.string_prototype = Some(proto);
    }
}
