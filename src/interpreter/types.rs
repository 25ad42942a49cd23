use crate::types::{JsObject, JsString, JsValue};
use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::rc::Rc;

use super::ErrorKind;

#[derive(Debug)]
pub enum Completion {
    Normal(JsValue),
    Return(JsValue),
    Throw(JsValue),
    Break(Option<String>),
    Continue(Option<String>),
}

impl Completion {
    pub fn is_abrupt(&self) -> bool {
        !matches!(self, Completion::Normal(_))
    }

    /// Collapses a completion produced by a call into a value or a thrown
    /// exception. Loop control never escapes a function body, so it reads as
    /// `undefined`.
    pub fn into_result(self) -> Result<JsValue, JsValue> {
        match self {
            Completion::Normal(v) | Completion::Return(v) => Ok(v),
            Completion::Throw(e) => Err(e),
            Completion::Break(_) | Completion::Continue(_) => Ok(JsValue::Undefined),
        }
    }
}

impl From<Result<JsValue, JsValue>> for Completion {
    fn from(result: Result<JsValue, JsValue>) -> Self {
        match result {
            Ok(v) => Completion::Normal(v),
            Err(e) => Completion::Throw(e),
        }
    }
}

pub type EnvRef = Rc<RefCell<Environment>>;

#[derive(Debug)]
pub struct Environment {
    pub(crate) bindings: FxHashMap<String, Binding>,
    pub(crate) parent: Option<EnvRef>,
    pub strict: bool,
}

#[derive(Debug, Clone)]
pub struct Binding {
    pub value: JsValue,
    pub kind: BindingKind,
    pub initialized: bool,
    /// Set for globals created by a sloppy-mode write to an undeclared name.
    pub deletable: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingKind {
    Var,
    Let,
    Const,
    /// Immutable global value bindings (`undefined`, `NaN`, `Infinity`).
    ReadOnly,
}

impl Environment {
    pub fn new(parent: Option<EnvRef>) -> EnvRef {
        let strict = parent.as_ref().is_some_and(|p| p.borrow().strict);
        Rc::new(RefCell::new(Environment {
            bindings: FxHashMap::default(),
            parent,
            strict,
        }))
    }

    pub fn new_global(strict: bool) -> EnvRef {
        Rc::new(RefCell::new(Environment {
            bindings: FxHashMap::default(),
            parent: None,
            strict,
        }))
    }

    /// Declares `name` in this frame. `var` and read-only bindings start out
    /// initialized to `undefined`; `let`/`const` stay uninitialized until
    /// [`Environment::initialize`] runs.
    pub fn declare(&mut self, name: &str, kind: BindingKind) {
        self.bindings.insert(
            name.to_string(),
            Binding {
                value: JsValue::Undefined,
                kind,
                initialized: matches!(kind, BindingKind::Var | BindingKind::ReadOnly),
                deletable: false,
            },
        );
    }

    /// Declares and initializes `name` in one step.
    pub fn define(&mut self, name: &str, kind: BindingKind, value: JsValue) {
        self.bindings.insert(
            name.to_string(),
            Binding {
                value,
                kind,
                initialized: true,
                deletable: false,
            },
        );
    }

    /// Initializes a binding of this frame. Returns false if `name` is not
    /// declared here.
    pub fn initialize(&mut self, name: &str, value: JsValue) -> bool {
        match self.bindings.get_mut(name) {
            Some(binding) => {
                binding.value = value;
                binding.initialized = true;
                true
            }
            None => false,
        }
    }

    pub(crate) fn declare_implicit(&mut self, name: &str, value: JsValue) {
        self.bindings.insert(
            name.to_string(),
            Binding {
                value,
                kind: BindingKind::Var,
                initialized: true,
                deletable: true,
            },
        );
    }

    pub fn has_own(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    pub fn binding(&self, name: &str) -> Option<&Binding> {
        self.bindings.get(name)
    }

    /// The innermost frame, starting at `env`, that declares `name`.
    pub fn frame_of(env: &EnvRef, name: &str) -> Option<EnvRef> {
        let mut current = Some(env.clone());
        while let Some(frame) = current {
            if frame.borrow().bindings.contains_key(name) {
                return Some(frame);
            }
            current = frame.borrow().parent.clone();
        }
        None
    }

    /// The global frame at the end of `env`'s chain.
    pub fn outermost(env: &EnvRef) -> EnvRef {
        let mut current = env.clone();
        loop {
            let parent = current.borrow().parent.clone();
            match parent {
                Some(p) => current = p,
                None => return current,
            }
        }
    }
}

#[derive(Debug, Clone)]
pub enum ReferenceBase {
    Environment(EnvRef),
    Value(JsValue),
}

/// A resolved or unresolvable name, produced by identifier resolution or a
/// member access and consumed by `get_value`/`put_value`/`delete_reference`.
#[derive(Debug, Clone)]
pub enum Reference {
    /// `global` is the outermost frame of the chain the name was looked up
    /// in; a sloppy-mode write creates the binding there.
    Unresolved {
        name: String,
        strict: bool,
        global: EnvRef,
    },
    Resolved {
        base: ReferenceBase,
        name: String,
        strict: bool,
    },
}

impl Reference {
    pub fn property(base: JsValue, name: &str, strict: bool) -> Self {
        Reference::Resolved {
            base: ReferenceBase::Value(base),
            name: name.to_string(),
            strict,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Reference::Unresolved { name, .. } | Reference::Resolved { name, .. } => name,
        }
    }

    pub fn is_strict(&self) -> bool {
        match self {
            Reference::Unresolved { strict, .. } | Reference::Resolved { strict, .. } => *strict,
        }
    }

    pub fn is_unresolvable(&self) -> bool {
        matches!(self, Reference::Unresolved { .. })
    }

}

pub type NativeFn = Rc<dyn Fn(&mut super::Interpreter, &JsValue, &[JsValue]) -> Completion>;

#[derive(Clone)]
pub struct JsFunction {
    pub name: String,
    pub arity: usize,
    pub behavior: NativeFn,
    pub is_constructor: bool,
}

impl JsFunction {
    pub fn native(
        name: &str,
        arity: usize,
        f: impl Fn(&mut super::Interpreter, &JsValue, &[JsValue]) -> Completion + 'static,
    ) -> Self {
        JsFunction {
            name: name.to_string(),
            arity,
            behavior: Rc::new(f),
            is_constructor: false,
        }
    }

    pub fn constructor(
        name: &str,
        arity: usize,
        f: impl Fn(&mut super::Interpreter, &JsValue, &[JsValue]) -> Completion + 'static,
    ) -> Self {
        JsFunction {
            is_constructor: true,
            ..Self::native(name, arity, f)
        }
    }
}

impl std::fmt::Debug for JsFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "JsFunction::Native({:?}, {})", self.name, self.arity)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDescriptor {
    pub value: Option<JsValue>,
    pub writable: Option<bool>,
    pub get: Option<JsValue>,
    pub set: Option<JsValue>,
    pub enumerable: Option<bool>,
    pub configurable: Option<bool>,
}

impl PropertyDescriptor {
    pub fn data(value: JsValue, writable: bool, enumerable: bool, configurable: bool) -> Self {
        Self {
            value: Some(value),
            writable: Some(writable),
            get: None,
            set: None,
            enumerable: Some(enumerable),
            configurable: Some(configurable),
        }
    }

    pub fn data_default(value: JsValue) -> Self {
        Self::data(value, true, true, true)
    }

    /// Non-writable, non-enumerable, non-configurable: constructor statics
    /// such as `Number.MAX_VALUE`.
    pub fn frozen(value: JsValue) -> Self {
        Self::data(value, false, false, false)
    }

    pub fn accessor(
        get: Option<JsValue>,
        set: Option<JsValue>,
        enumerable: bool,
        configurable: bool,
    ) -> Self {
        Self {
            value: None,
            writable: None,
            get: Some(get.unwrap_or(JsValue::Undefined)),
            set: Some(set.unwrap_or(JsValue::Undefined)),
            enumerable: Some(enumerable),
            configurable: Some(configurable),
        }
    }

    pub fn empty() -> Self {
        Self {
            value: None,
            writable: None,
            get: None,
            set: None,
            enumerable: None,
            configurable: None,
        }
    }

    pub fn is_data_descriptor(&self) -> bool {
        self.value.is_some() || self.writable.is_some()
    }

    pub fn is_accessor_descriptor(&self) -> bool {
        self.get.is_some() || self.set.is_some()
    }

    pub fn is_generic_descriptor(&self) -> bool {
        !self.is_data_descriptor() && !self.is_accessor_descriptor()
    }

    // §6.2.6.6 CompletePropertyDescriptor
    pub(crate) fn completed(mut self) -> Self {
        if self.is_generic_descriptor() || self.is_data_descriptor() {
            self.value.get_or_insert(JsValue::Undefined);
            self.writable.get_or_insert(false);
        } else {
            self.get.get_or_insert(JsValue::Undefined);
            self.set.get_or_insert(JsValue::Undefined);
        }
        self.enumerable.get_or_insert(false);
        self.configurable.get_or_insert(false);
        self
    }

    /// Applies the fields present in `update` over this complete descriptor.
    /// Switching between data and accessor kinds keeps only the shared
    /// attributes.
    pub(crate) fn merged_with(self, update: PropertyDescriptor) -> Self {
        let mut base = self;
        if base.is_data_descriptor() && update.is_accessor_descriptor() {
            base = PropertyDescriptor {
                value: None,
                writable: None,
                get: Some(JsValue::Undefined),
                set: Some(JsValue::Undefined),
                ..base
            };
        } else if base.is_accessor_descriptor() && update.is_data_descriptor() {
            base = PropertyDescriptor {
                value: Some(JsValue::Undefined),
                writable: Some(false),
                get: None,
                set: None,
                ..base
            };
        }
        PropertyDescriptor {
            value: update.value.or(base.value),
            writable: update.writable.or(base.writable),
            get: update.get.or(base.get),
            set: update.set.or(base.set),
            enumerable: update.enumerable.or(base.enumerable),
            configurable: update.configurable.or(base.configurable),
        }
    }
}

/// Internal class tag. Builtin methods check it instead of a type
/// hierarchy: a Number wrapper is any object tagged `Number` with a numeric
/// primitive slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectClass {
    Object,
    Function,
    Error,
    Number,
    Boolean,
    String,
}

impl ObjectClass {
    pub fn name(self) -> &'static str {
        match self {
            ObjectClass::Object => "Object",
            ObjectClass::Function => "Function",
            ObjectClass::Error => "Error",
            ObjectClass::Number => "Number",
            ObjectClass::Boolean => "Boolean",
            ObjectClass::String => "String",
        }
    }
}

/// The kind and message an error object was created with. Kept apart from
/// the script-visible `name`/`message` properties so hosts can report the
/// original values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorData {
    pub kind: ErrorKind,
    pub message: String,
}

pub struct JsObjectData {
    pub id: u64,
    pub properties: FxHashMap<String, PropertyDescriptor>,
    pub property_order: Vec<String>,
    pub prototype: Option<Rc<RefCell<JsObjectData>>>,
    pub callable: Option<JsFunction>,
    pub class: ObjectClass,
    pub extensible: bool,
    pub(crate) primitive_value: Option<JsValue>,
    pub(crate) error_data: Option<ErrorData>,
}

impl JsObjectData {
    pub(crate) fn new() -> Self {
        Self {
            id: 0,
            properties: FxHashMap::default(),
            property_order: Vec::new(),
            prototype: None,
            callable: None,
            class: ObjectClass::Object,
            extensible: true,
            primitive_value: None,
            error_data: None,
        }
    }

    pub fn handle(&self) -> JsObject {
        JsObject { id: self.id }
    }

    pub fn primitive_value(&self) -> Option<&JsValue> {
        self.primitive_value.as_ref()
    }

    pub fn error_data(&self) -> Option<&ErrorData> {
        self.error_data.as_ref()
    }

    fn string_data(&self) -> Option<&JsString> {
        match (&self.class, &self.primitive_value) {
            (ObjectClass::String, Some(JsValue::String(s))) => Some(s),
            _ => None,
        }
    }

    /// Own property lookup. String wrappers expose their `length` and one
    /// read-only property per code unit without storing them.
    pub fn get_own_property(&self, key: &str) -> Option<PropertyDescriptor> {
        if let Some(desc) = self.properties.get(key) {
            return Some(desc.clone());
        }
        let s = self.string_data()?;
        if key == "length" {
            return Some(PropertyDescriptor::frozen(JsValue::Number(s.len() as f64)));
        }
        let idx = array_index(key)?;
        if idx < s.len() {
            return Some(PropertyDescriptor::data(
                JsValue::String(s.slice_utf16(idx, idx + 1)),
                false,
                true,
                false,
            ));
        }
        None
    }

    pub fn own_keys(&self) -> Vec<String> {
        let mut keys = Vec::new();
        if let Some(s) = self.string_data() {
            keys.extend((0..s.len()).map(|i| i.to_string()));
            keys.push("length".to_string());
        }
        keys.extend(self.property_order.iter().cloned());
        keys
    }

    // §10.1.6.3 ValidateAndApplyPropertyDescriptor
    pub fn define_own_property(&mut self, key: String, desc: PropertyDescriptor) -> bool {
        let Some(current) = self.get_own_property(&key) else {
            if !self.extensible {
                return false;
            }
            self.insert_property(key, desc.completed());
            return true;
        };

        if current.configurable == Some(false) {
            if desc.configurable == Some(true) {
                return false;
            }
            if desc.enumerable.is_some() && desc.enumerable != current.enumerable {
                return false;
            }
            if !desc.is_generic_descriptor()
                && desc.is_accessor_descriptor() != current.is_accessor_descriptor()
            {
                return false;
            }
            if current.is_accessor_descriptor() {
                if desc.get.as_ref().is_some_and(|g| Some(g) != current.get.as_ref()) {
                    return false;
                }
                if desc.set.as_ref().is_some_and(|s| Some(s) != current.set.as_ref()) {
                    return false;
                }
            } else if current.writable == Some(false) {
                if desc.writable == Some(true) {
                    return false;
                }
                if desc.value.as_ref().is_some_and(|v| Some(v) != current.value.as_ref()) {
                    return false;
                }
            }
        }

        let merged = current.merged_with(desc);
        self.insert_property(key, merged);
        true
    }

    pub fn insert_value(&mut self, key: String, value: JsValue) {
        self.insert_property(key, PropertyDescriptor::data_default(value));
    }

    pub fn insert_builtin(&mut self, key: String, value: JsValue) {
        self.insert_property(key, PropertyDescriptor::data(value, true, false, true));
    }

    pub fn insert_property(&mut self, key: String, desc: PropertyDescriptor) {
        if !self.properties.contains_key(&key) {
            self.property_order.push(key.clone());
        }
        self.properties.insert(key, desc);
    }

    pub fn remove_property(&mut self, key: &str) -> bool {
        if self.properties.remove(key).is_some() {
            self.property_order.retain(|k| k != key);
            true
        } else {
            false
        }
    }

    pub fn get_property_value(&self, key: &str) -> Option<JsValue> {
        self.properties.get(key).and_then(|d| d.value.clone())
    }
}

/// Canonical array index: decimal digits without leading zeros.
fn array_index(key: &str) -> Option<usize> {
    let idx = key.parse::<usize>().ok()?;
    (idx.to_string() == key).then_some(idx)
}
