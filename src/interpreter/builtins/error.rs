use super::super::*;
use super::{BuiltinFn, arg};

fn construct_error(interp: &mut Interpreter, kind: ErrorKind, args: &[JsValue]) -> Completion {
    let message = arg(args, 0);
    if message.is_undefined() {
        // No own `message`; the prototype's empty string shows through.
        let err = interp.create_error(kind, "");
        if let Some(obj) = err.as_object().and_then(|o| interp.get_object(o.id)) {
            obj.borrow_mut().remove_property("message");
        }
        return Completion::Normal(err);
    }
    match interp.to_string_value(&message) {
        Ok(msg) => Completion::Normal(interp.create_error(kind, &msg)),
        Err(e) => Completion::Throw(e),
    }
}

impl Interpreter {
    pub(crate) fn setup_error_builtins(&mut self) {
        let mut base_ctor: Option<Rc<RefCell<JsObjectData>>> = None;
        for kind in ErrorKind::ALL {
            let proto = self.create_object();
            {
                let mut p = proto.borrow_mut();
                if kind != ErrorKind::Error
                    && let Some(base) = self.error_prototypes.get(&ErrorKind::Error)
                {
                    p.prototype = Some(base.clone());
                }
                p.insert_builtin("name".to_string(), JsValue::string(kind.name()));
                p.insert_builtin("message".to_string(), JsValue::string(""));
            }
            // Calling an error constructor without `new` behaves the same.
            let ctor = self.install_constructor(
                kind.name(),
                1,
                move |interp, _this, args| construct_error(interp, kind, args),
                &proto,
            );
            if kind == ErrorKind::Error {
                base_ctor = Some(ctor);
            } else if let Some(base) = &base_ctor {
                ctor.borrow_mut().prototype = Some(base.clone());
            }
            self.error_prototypes.insert(kind, proto);
        }

        let Some(error_proto) = self.error_prototypes.get(&ErrorKind::Error).cloned() else {
            return;
        };
        let methods: [(&str, usize, BuiltinFn); 1] = [("toString", 0, |interp, this, _args| {
            let JsValue::Object(o) = this else {
                return interp.throw_error(
                    ErrorKind::TypeError,
                    "Error.prototype.toString requires that 'this' be an Object",
                );
            };
            let name = match interp.get_property(*o, "name", this) {
                Ok(JsValue::Undefined) => "Error".to_string(),
                Ok(v) => match interp.to_string_value(&v) {
                    Ok(s) => s,
                    Err(e) => return Completion::Throw(e),
                },
                Err(e) => return Completion::Throw(e),
            };
            let msg = match interp.get_property(*o, "message", this) {
                Ok(JsValue::Undefined) => String::new(),
                Ok(v) => match interp.to_string_value(&v) {
                    Ok(s) => s,
                    Err(e) => return Completion::Throw(e),
                },
                Err(e) => return Completion::Throw(e),
            };
            let rendered = match (name.is_empty(), msg.is_empty()) {
                (_, true) => name,
                (true, false) => msg,
                (false, false) => format!("{name}: {msg}"),
            };
            Completion::Normal(JsValue::string(&rendered))
        })];
        self.install_methods(&error_proto, &methods);
    }
}
