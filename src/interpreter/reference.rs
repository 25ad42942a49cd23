use super::*;
use tracing::debug;

enum BindingWrite {
    Missing,
    Uninitialized,
    Immutable,
    ReadOnly,
    Done,
}

// §9.1 identifier resolution and §6.2.5 the Reference Record operations.
impl Interpreter {
    /// Walks `env` outward to the innermost frame declaring `name`.
    pub fn resolve_identifier(&self, env: &EnvRef, name: &str, strict: bool) -> Reference {
        match Environment::frame_of(env, name) {
            Some(frame) => Reference::Resolved {
                base: ReferenceBase::Environment(frame),
                name: name.to_string(),
                strict,
            },
            None => Reference::Unresolved {
                name: name.to_string(),
                strict,
                global: Environment::outermost(env),
            },
        }
    }

    /// Resolves `name` against the global environment with its strictness.
    pub fn resolve_global(&self, name: &str) -> Reference {
        let strict = self.global_env.borrow().strict;
        self.resolve_identifier(&self.global_env, name, strict)
    }

    /// A member-access reference `base.name` with the global strictness.
    pub fn property_reference(&self, base: JsValue, name: &str) -> Reference {
        Reference::property(base, name, self.global_env.borrow().strict)
    }

    // §6.2.5.5 GetValue
    pub fn get_value(&mut self, reference: &Reference) -> Result<JsValue, JsValue> {
        match reference {
            Reference::Unresolved { name, .. } => {
                Err(self.create_reference_error(&format!("{name} is not defined")))
            }
            Reference::Resolved {
                base: ReferenceBase::Environment(env),
                name,
                ..
            } => {
                let binding = env
                    .borrow()
                    .binding(name)
                    .map(|b| (b.initialized, b.value.clone()));
                match binding {
                    Some((true, value)) => Ok(value),
                    Some((false, _)) => Err(self.create_reference_error(&format!(
                        "Cannot access '{name}' before initialization"
                    ))),
                    None => Err(self.create_reference_error(&format!("{name} is not defined"))),
                }
            }
            Reference::Resolved {
                base: ReferenceBase::Value(base),
                name,
                ..
            } => {
                if base.is_nullish() {
                    return Err(self.create_type_error(&format!(
                        "Cannot read properties of {base} (reading '{name}')"
                    )));
                }
                self.with_autoboxed(base, |interp, obj| interp.get_property(obj, name, base))
            }
        }
    }

    // §6.2.5.6 PutValue
    pub fn put_value(&mut self, reference: &Reference, value: JsValue) -> Result<(), JsValue> {
        match reference {
            Reference::Unresolved {
                name,
                strict,
                global,
            } => {
                if *strict {
                    return Err(self.create_reference_error(&format!("{name} is not defined")));
                }
                debug!(name = name.as_str(), "implicit global created");
                global.borrow_mut().declare_implicit(name, value);
                Ok(())
            }
            Reference::Resolved {
                base: ReferenceBase::Environment(env),
                name,
                strict,
            } => {
                let outcome = {
                    let mut env = env.borrow_mut();
                    match env.bindings.get_mut(name) {
                        None => BindingWrite::Missing,
                        Some(b) if !b.initialized => BindingWrite::Uninitialized,
                        Some(b) => match b.kind {
                            BindingKind::Const => BindingWrite::Immutable,
                            BindingKind::ReadOnly => BindingWrite::ReadOnly,
                            BindingKind::Var | BindingKind::Let => {
                                b.value = value.clone();
                                BindingWrite::Done
                            }
                        },
                    }
                };
                match outcome {
                    BindingWrite::Done => Ok(()),
                    BindingWrite::Missing => {
                        // Deleted after resolution: behaves as unresolvable.
                        let unresolved = Reference::Unresolved {
                            name: name.clone(),
                            strict: *strict,
                            global: Environment::outermost(env),
                        };
                        self.put_value(&unresolved, value)
                    }
                    BindingWrite::Uninitialized => Err(self.create_reference_error(&format!(
                        "Cannot access '{name}' before initialization"
                    ))),
                    BindingWrite::Immutable => Err(self.create_reference_error(&format!(
                        "Assignment to constant variable '{name}'"
                    ))),
                    BindingWrite::ReadOnly if *strict => Err(self.create_type_error(&format!(
                        "Cannot assign to read only variable '{name}'"
                    ))),
                    BindingWrite::ReadOnly => Ok(()),
                }
            }
            Reference::Resolved {
                base: ReferenceBase::Value(base),
                name,
                strict,
            } => {
                if base.is_nullish() {
                    return Err(self.create_type_error(&format!(
                        "Cannot set properties of {base} (setting '{name}')"
                    )));
                }
                self.with_autoboxed(base, |interp, obj| {
                    interp.set_property(obj, name, value, base, *strict)
                })?;
                Ok(())
            }
        }
    }

    // §13.5.1.2 delete UnaryExpression
    pub fn delete_reference(&mut self, reference: &Reference) -> Result<bool, JsValue> {
        match reference {
            Reference::Unresolved { strict: true, .. }
            | Reference::Resolved {
                base: ReferenceBase::Environment(_),
                strict: true,
                ..
            } => Err(self.create_syntax_error(
                "Delete of an unqualified identifier in strict mode.",
            )),
            Reference::Unresolved { .. } => Ok(true),
            Reference::Resolved {
                base: ReferenceBase::Environment(env),
                name,
                ..
            } => {
                let mut env = env.borrow_mut();
                let deletable = env.bindings.get(name).map(|b| b.deletable);
                match deletable {
                    Some(true) => {
                        env.bindings.remove(name);
                        Ok(true)
                    }
                    Some(false) => Ok(false),
                    None => Ok(true),
                }
            }
            Reference::Resolved {
                base: ReferenceBase::Value(base),
                name,
                strict,
            } => {
                if base.is_nullish() {
                    return Err(self.create_type_error("Cannot convert undefined or null to object"));
                }
                self.with_autoboxed(base, |interp, obj| interp.delete_property(obj, name, *strict))
            }
        }
    }

    /// `base.name(...args)`: the member is looked up through a property
    /// reference (autoboxing a primitive base) and called with `this` set to
    /// `base` itself.
    pub fn call_method(&mut self, base: &JsValue, name: &str, args: &[JsValue]) -> Completion {
        let reference = self.property_reference(base.clone(), name);
        let func = match self.get_value(&reference) {
            Ok(v) => v,
            Err(e) => return Completion::Throw(e),
        };
        if !self.is_callable(&func) {
            let msg = format!("{}.{name} is not a function", self.typeof_val(base));
            return self.throw_error(ErrorKind::TypeError, &msg);
        }
        self.call_function(&func, base, args)
    }
}
