use super::*;
use crate::error::JsError;
use tracing::trace;

/// The native error constructors (§20.5.5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Error,
    TypeError,
    RangeError,
    ReferenceError,
    SyntaxError,
    EvalError,
    URIError,
}

impl ErrorKind {
    pub const ALL: [ErrorKind; 7] = [
        ErrorKind::Error,
        ErrorKind::TypeError,
        ErrorKind::RangeError,
        ErrorKind::ReferenceError,
        ErrorKind::SyntaxError,
        ErrorKind::EvalError,
        ErrorKind::URIError,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ErrorKind::Error => "Error",
            ErrorKind::TypeError => "TypeError",
            ErrorKind::RangeError => "RangeError",
            ErrorKind::ReferenceError => "ReferenceError",
            ErrorKind::SyntaxError => "SyntaxError",
            ErrorKind::EvalError => "EvalError",
            ErrorKind::URIError => "URIError",
        }
    }
}

impl Interpreter {
    /// Builds an error object of `kind` linked to that kind's intrinsic
    /// prototype. The kind and message are also recorded internally for
    /// uncaught-error reporting.
    pub fn create_error(&mut self, kind: ErrorKind, msg: &str) -> JsValue {
        let proto = self
            .error_prototypes
            .get(&kind)
            .cloned()
            .or_else(|| self.object_prototype.clone());
        let obj = self.create_object();
        {
            let mut o = obj.borrow_mut();
            o.class = ObjectClass::Error;
            o.prototype = proto;
            o.insert_builtin("message".to_string(), JsValue::String(JsString::from_str(msg)));
            o.insert_builtin("name".to_string(), JsValue::String(JsString::from_str(kind.name())));
            o.error_data = Some(ErrorData {
                kind,
                message: msg.to_string(),
            });
        }
        trace!(kind = kind.name(), message = msg, "error created");
        let handle = obj.borrow().handle();
        JsValue::Object(handle)
    }

    pub fn create_type_error(&mut self, msg: &str) -> JsValue {
        self.create_error(ErrorKind::TypeError, msg)
    }

    pub fn create_range_error(&mut self, msg: &str) -> JsValue {
        self.create_error(ErrorKind::RangeError, msg)
    }

    pub fn create_reference_error(&mut self, msg: &str) -> JsValue {
        self.create_error(ErrorKind::ReferenceError, msg)
    }

    pub fn create_syntax_error(&mut self, msg: &str) -> JsValue {
        self.create_error(ErrorKind::SyntaxError, msg)
    }

    pub fn throw_error(&mut self, kind: ErrorKind, msg: &str) -> Completion {
        Completion::Throw(self.create_error(kind, msg))
    }

    /// Runs `body`; if it throws, `handler` receives the thrown value as an
    /// ordinary argument. Every other completion passes through untouched.
    pub fn try_catch<B, H>(&mut self, body: B, handler: H) -> Completion
    where
        B: FnOnce(&mut Self) -> Completion,
        H: FnOnce(&mut Self, JsValue) -> Completion,
    {
        match body(self) {
            Completion::Throw(exc) => {
                trace!("exception caught");
                handler(self, exc)
            }
            other => other,
        }
    }

    /// Runs `finalizer` after `result` has been produced. An abrupt
    /// finalizer completion replaces `result`; a normal one leaves it.
    pub fn try_finally<F>(&mut self, result: Completion, finalizer: F) -> Completion
    where
        F: FnOnce(&mut Self) -> Completion,
    {
        let fin = finalizer(self);
        if fin.is_abrupt() { fin } else { result }
    }

    /// Top-level boundary between the runtime and its host: a `Throw` that
    /// escapes `f` is turned into a [`JsError`].
    pub fn run<F>(&mut self, f: F) -> Result<JsValue, JsError>
    where
        F: FnOnce(&mut Self) -> Completion,
    {
        match f(self) {
            Completion::Throw(exc) => Err(self.uncaught_error(&exc)),
            other => Ok(other.into_result().unwrap_or(JsValue::Undefined)),
        }
    }

    fn uncaught_error(&mut self, exc: &JsValue) -> JsError {
        if let JsValue::Object(o) = exc
            && let Some(obj) = self.get_object(o.id)
            && let Some(data) = obj.borrow().error_data()
        {
            return JsError::Uncaught {
                name: data.kind.name().to_string(),
                message: data.message.clone(),
            };
        }
        let rendered = match self.to_string_value(exc) {
            Ok(s) => s,
            Err(_) => self.format_value(exc),
        };
        JsError::UncaughtValue(rendered)
    }
}
