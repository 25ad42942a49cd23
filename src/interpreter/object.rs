use super::*;
use rustc_hash::FxHashSet;
use tracing::debug;

// Property store: [[GetOwnProperty]], [[Get]], [[Set]], [[DefineOwnProperty]],
// [[Delete]] and the prototype slot of ordinary objects (§10.1).
impl Interpreter {
    pub fn get_own_property(&self, obj: JsObject, key: &str) -> Option<PropertyDescriptor> {
        self.get_object(obj.id)?.borrow().get_own_property(key)
    }

    /// First descriptor for `key` along `obj`'s prototype chain.
    pub(crate) fn find_property(&self, obj: JsObject, key: &str) -> Option<PropertyDescriptor> {
        let mut current = self.get_object(obj.id);
        while let Some(o) = current {
            if let Some(desc) = o.borrow().get_own_property(key) {
                return Some(desc);
            }
            current = o.borrow().prototype.clone();
        }
        None
    }

    // §10.1.8.1 OrdinaryGet
    /// Getters run with `receiver` as `this`, which need not be `obj` itself:
    /// autoboxed lookups pass the original primitive.
    pub fn get_property(
        &mut self,
        obj: JsObject,
        key: &str,
        receiver: &JsValue,
    ) -> Result<JsValue, JsValue> {
        match self.find_property(obj, key) {
            Some(desc) if desc.is_accessor_descriptor() => match desc.get {
                Some(getter) if !getter.is_undefined() => {
                    self.call_function(&getter, receiver, &[]).into_result()
                }
                _ => Ok(JsValue::Undefined),
            },
            Some(desc) => Ok(desc.value.unwrap_or(JsValue::Undefined)),
            None => Ok(JsValue::Undefined),
        }
    }

    // §10.1.9.2 OrdinarySetWithOwnDescriptor
    /// Returns `Ok(false)` when the write is refused in sloppy code; strict
    /// callers get a TypeError instead.
    pub fn set_property(
        &mut self,
        obj: JsObject,
        key: &str,
        value: JsValue,
        receiver: &JsValue,
        strict: bool,
    ) -> Result<bool, JsValue> {
        if let Some(desc) = self.find_property(obj, key) {
            if desc.is_accessor_descriptor() {
                return match desc.set {
                    Some(setter) if !setter.is_undefined() => {
                        self.call_function(&setter, receiver, &[value]).into_result()?;
                        Ok(true)
                    }
                    _ => self.reject_write(
                        strict,
                        &format!("Cannot set property {key} of {} which has only a getter", self.describe(receiver)),
                    ),
                };
            }
            if desc.writable == Some(false) {
                return self.reject_write(
                    strict,
                    &format!("Cannot assign to read only property '{key}' of {}", self.describe(receiver)),
                );
            }
        }

        let JsValue::Object(target) = receiver else {
            return self.reject_write(
                strict,
                &format!("Cannot create property '{key}' on {}", self.describe(receiver)),
            );
        };
        let Some(target_obj) = self.get_object(target.id) else {
            return Ok(false);
        };
        let existing = target_obj.borrow().get_own_property(key);
        let applied = match existing {
            Some(own) => {
                if own.is_accessor_descriptor() || own.writable == Some(false) {
                    false
                } else {
                    target_obj.borrow_mut().define_own_property(
                        key.to_string(),
                        PropertyDescriptor {
                            value: Some(value),
                            ..PropertyDescriptor::empty()
                        },
                    )
                }
            }
            None => target_obj
                .borrow_mut()
                .define_own_property(key.to_string(), PropertyDescriptor::data_default(value)),
        };
        if applied {
            Ok(true)
        } else {
            self.reject_write(
                strict,
                &format!("Cannot add property {key}, object is not extensible"),
            )
        }
    }

    fn reject_write(&mut self, strict: bool, msg: &str) -> Result<bool, JsValue> {
        if strict {
            Err(self.create_type_error(msg))
        } else {
            Ok(false)
        }
    }

    fn describe(&self, val: &JsValue) -> String {
        match val {
            JsValue::String(s) => format!("string '{s}'"),
            JsValue::Object(_) => "object".to_string(),
            JsValue::Undefined | JsValue::Null => val.to_string(),
            _ => format!("{} '{val}'", self.typeof_val(val)),
        }
    }

    pub fn define_own_property(
        &mut self,
        obj: JsObject,
        key: &str,
        desc: PropertyDescriptor,
    ) -> bool {
        match self.get_object(obj.id) {
            Some(o) => o.borrow_mut().define_own_property(key.to_string(), desc),
            None => false,
        }
    }

    // §10.1.10.1 OrdinaryDelete
    pub fn delete_property(
        &mut self,
        obj: JsObject,
        key: &str,
        strict: bool,
    ) -> Result<bool, JsValue> {
        let Some(o) = self.get_object(obj.id) else {
            return Ok(true);
        };
        let Some(desc) = o.borrow().get_own_property(key) else {
            return Ok(true);
        };
        if desc.configurable == Some(true) {
            o.borrow_mut().remove_property(key);
            return Ok(true);
        }
        if strict {
            let class = o.borrow().class.name();
            return Err(self.create_type_error(&format!(
                "Cannot delete property '{key}' of [object {class}]"
            )));
        }
        Ok(false)
    }

    pub fn has_property(&self, obj: JsObject, key: &str) -> bool {
        self.find_property(obj, key).is_some()
    }

    pub fn own_keys(&self, obj: JsObject) -> Vec<String> {
        self.get_object(obj.id)
            .map(|o| o.borrow().own_keys())
            .unwrap_or_default()
    }

    pub fn prevent_extensions(&mut self, obj: JsObject) -> bool {
        match self.get_object(obj.id) {
            Some(o) => {
                o.borrow_mut().extensible = false;
                true
            }
            None => false,
        }
    }

    pub fn is_extensible(&self, obj: JsObject) -> bool {
        self.get_object(obj.id)
            .is_some_and(|o| o.borrow().extensible)
    }

    pub fn get_prototype_of(&self, obj: JsObject) -> Option<JsObject> {
        let o = self.get_object(obj.id)?;
        let proto = o.borrow().prototype.clone()?;
        let handle = proto.borrow().handle();
        Some(handle)
    }

    // §10.1.2.1 OrdinarySetPrototypeOf
    /// Refuses (returns false) any change to a non-extensible object and any
    /// link that would make `obj` reachable from its own prototype chain.
    pub fn set_prototype_of(&mut self, obj: JsObject, proto: Option<JsObject>) -> bool {
        let Some(target) = self.get_object(obj.id) else {
            return false;
        };
        let current = self.get_prototype_of(obj);
        if current.map(|p| p.id) == proto.map(|p| p.id) {
            return true;
        }
        if !target.borrow().extensible {
            return false;
        }
        let new_proto = match proto {
            Some(p) => match self.get_object(p.id) {
                Some(rc) => Some(rc),
                None => return false,
            },
            None => None,
        };

        let mut visited = FxHashSet::default();
        let mut cursor = new_proto.clone();
        while let Some(o) = cursor {
            let id = o.borrow().id;
            if id == obj.id {
                debug!(object = obj.id, "prototype assignment rejected: cycle");
                return false;
            }
            if !visited.insert(id) {
                break;
            }
            cursor = o.borrow().prototype.clone();
        }

        target.borrow_mut().prototype = new_proto;
        true
    }
}
