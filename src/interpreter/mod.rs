use crate::types::{JsObject, JsString, JsValue, number_ops};
use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::rc::Rc;

mod types;
pub use types::*;

mod helpers;
pub use helpers::*;
mod builtins;
mod errors;
pub use errors::ErrorKind;
mod eval;
mod heap;
mod object;
mod reference;

/// Interpreter-wide settings chosen by the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Config {
    /// Treat the global environment as strict-mode code. References resolved
    /// against it inherit this flag unless the caller overrides it.
    pub strict: bool,
}

pub struct Interpreter {
    global_env: EnvRef,
    objects: Vec<Option<Rc<RefCell<JsObjectData>>>>,
    free_list: Vec<usize>,
    object_prototype: Option<Rc<RefCell<JsObjectData>>>,
    function_prototype: Option<Rc<RefCell<JsObjectData>>>,
    number_prototype: Option<Rc<RefCell<JsObjectData>>>,
    boolean_prototype: Option<Rc<RefCell<JsObjectData>>>,
    string_prototype: Option<Rc<RefCell<JsObjectData>>>,
    error_prototypes: FxHashMap<ErrorKind, Rc<RefCell<JsObjectData>>>,
    new_target: Option<JsValue>,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        let mut interp = Self {
            global_env: Environment::new_global(config.strict),
            objects: Vec::new(),
            free_list: Vec::new(),
            object_prototype: None,
            function_prototype: None,
            number_prototype: None,
            boolean_prototype: None,
            string_prototype: None,
            error_prototypes: FxHashMap::default(),
            new_target: None,
        };
        interp.setup_globals();
        interp
    }

    pub fn global_env(&self) -> EnvRef {
        self.global_env.clone()
    }

    /// `new.target` of the native function currently executing, if it was
    /// invoked through [`Interpreter::construct`].
    pub fn new_target(&self) -> Option<&JsValue> {
        self.new_target.as_ref()
    }

    fn register_global_fn(&mut self, name: &str, func: JsFunction) -> Rc<RefCell<JsObjectData>> {
        let obj = self.alloc_function(func);
        let val = JsValue::Object(obj.borrow().handle());
        self.global_env
            .borrow_mut()
            .define(name, BindingKind::Var, val);
        obj
    }

    /// Renders a value the way a console would show a completion result.
    pub fn format_value(&self, val: &JsValue) -> String {
        match val {
            JsValue::String(s) => s.to_rust_string(),
            JsValue::Object(o) => {
                if let Some(obj) = self.get_object(o.id) {
                    let obj = obj.borrow();
                    if let Some(data) = obj.error_data() {
                        return if data.message.is_empty() {
                            data.kind.name().to_string()
                        } else {
                            format!("{}: {}", data.kind.name(), data.message)
                        };
                    }
                    if let Some(prim) = obj.primitive_value() {
                        return format!("[{} {}]", obj.class.name(), self.format_value(prim));
                    }
                    if obj.callable.is_some() {
                        return "[Function]".to_string();
                    }
                }
                format!("{val}")
            }
            _ => format!("{val}"),
        }
    }
}
