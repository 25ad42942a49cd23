//! Value model, reference resolution and the Number builtins of an
//! embeddable ECMAScript runtime.
//!
//! The executor that sits on top of this crate drives everything through
//! [`Interpreter`]: it resolves identifiers to [`Reference`]s, reads and
//! writes through them, calls builtin methods and maps uncaught exceptions to
//! [`JsError`].

pub mod error;
pub mod interpreter;
pub mod types;

pub use error::JsError;
pub use interpreter::{
    Binding, BindingKind, Completion, Config, EnvRef, Environment, ErrorData, ErrorKind,
    Interpreter, JsFunction, ObjectClass, PropertyDescriptor, Reference, ReferenceBase,
};
pub use types::{JsObject, JsString, JsValue, number_ops};
