use super::*;
use tracing::trace;

// Objects live in a slot arena addressed by `JsObject::id`. Slots are only
// handed back through `release_object_slot`, which autoboxing uses for its
// short-lived wrappers; everything else lives as long as the interpreter.
impl Interpreter {
    pub(crate) fn allocate_object_slot(
        &mut self,
        mut data: JsObjectData,
    ) -> Rc<RefCell<JsObjectData>> {
        let idx = match self.free_list.pop() {
            Some(idx) => idx,
            None => {
                self.objects.push(None);
                self.objects.len() - 1
            }
        };
        data.id = idx as u64;
        let obj = Rc::new(RefCell::new(data));
        self.objects[idx] = Some(obj.clone());
        obj
    }

    pub(crate) fn release_object_slot(&mut self, id: u64) {
        let idx = id as usize;
        if let Some(slot) = self.objects.get_mut(idx)
            && slot.take().is_some()
        {
            self.free_list.push(idx);
            trace!(id, "object slot released");
        }
    }

    pub fn get_object(&self, id: u64) -> Option<Rc<RefCell<JsObjectData>>> {
        self.objects.get(id as usize).and_then(|slot| slot.clone())
    }

    /// Number of objects currently allocated.
    pub fn live_object_count(&self) -> usize {
        self.objects.len() - self.free_list.len()
    }

    pub(crate) fn create_object(&mut self) -> Rc<RefCell<JsObjectData>> {
        let mut data = JsObjectData::new();
        data.prototype = self.object_prototype.clone();
        self.allocate_object_slot(data)
    }

    /// A plain object whose prototype is `Object.prototype`.
    pub fn new_object(&mut self) -> JsObject {
        self.create_object().borrow().handle()
    }

    pub(crate) fn create_function(&mut self, func: JsFunction) -> JsValue {
        let obj = self.alloc_function(func);
        let handle = obj.borrow().handle();
        JsValue::Object(handle)
    }

    pub(crate) fn alloc_function(&mut self, func: JsFunction) -> Rc<RefCell<JsObjectData>> {
        let mut obj_data = JsObjectData::new();
        obj_data.prototype = self.function_prototype.clone();
        obj_data.class = ObjectClass::Function;
        obj_data.insert_property(
            "length".to_string(),
            PropertyDescriptor::data(JsValue::Number(func.arity as f64), false, false, true),
        );
        obj_data.insert_property(
            "name".to_string(),
            PropertyDescriptor::data(
                JsValue::String(JsString::from_str(&func.name)),
                false,
                false,
                true,
            ),
        );
        obj_data.callable = Some(func);
        self.allocate_object_slot(obj_data)
    }

    /// Wraps a native closure as a function object.
    pub fn new_function(
        &mut self,
        name: &str,
        arity: usize,
        f: impl Fn(&mut Interpreter, &JsValue, &[JsValue]) -> Completion + 'static,
    ) -> JsValue {
        self.create_function(JsFunction::native(name, arity, f))
    }
}
