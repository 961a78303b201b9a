//! Classes and instances.
//!
//! A class has two member tables. The instance side holds the methods and
//! accessors seen through instances; the static side (the metaclass, named
//! `"C class"`) holds static methods and accessors, seen through the class
//! value itself. Each side links to the matching side of the superclass, so
//! lookups on either walk the inheritance chain.

use std::cell::RefCell;
use std::rc::Rc;

use lox_ir::ast::INIT;
use rustc_hash::FxHashMap;

use super::{FunctionValue, Value};

/// Getter and setter sharing one property name.
#[derive(Clone, Default)]
pub struct Accessors {
    pub getter: Option<Rc<FunctionValue>>,
    pub setter: Option<Rc<FunctionValue>>,
}

/// One side of a class: methods and accessors plus a link to the same side
/// of the superclass.
pub struct Members {
    name: Rc<str>,
    is_static: bool,
    parent: Option<Rc<Members>>,
    methods: FxHashMap<Rc<str>, Rc<FunctionValue>>,
    accessors: FxHashMap<Rc<str>, Accessors>,
}

impl Members {
    pub fn new(class_name: &Rc<str>, is_static: bool, parent: Option<Rc<Members>>) -> Self {
        let name = if is_static {
            Rc::from(format!("{class_name} class"))
        } else {
            Rc::clone(class_name)
        };
        Members {
            name,
            is_static,
            parent,
            methods: FxHashMap::default(),
            accessors: FxHashMap::default(),
        }
    }

    /// `C` for the instance side, `C class` for the static side.
    pub fn name(&self) -> &Rc<str> {
        &self.name
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    pub fn add_method(&mut self, name: Rc<str>, method: FunctionValue) {
        self.methods.insert(name, Rc::new(method));
    }

    pub fn add_getter(&mut self, name: Rc<str>, getter: FunctionValue) {
        self.accessors.entry(name).or_default().getter = Some(Rc::new(getter));
    }

    pub fn add_setter(&mut self, name: Rc<str>, setter: FunctionValue) {
        self.accessors.entry(name).or_default().setter = Some(Rc::new(setter));
    }

    /// Nearest method called `name`, searching superclasses.
    pub fn find_method(&self, name: &str) -> Option<Rc<FunctionValue>> {
        match self.methods.get(name) {
            Some(method) => Some(Rc::clone(method)),
            None => self.parent.as_ref()?.find_method(name),
        }
    }

    /// Nearest accessor pair called `name`, searching superclasses.
    pub fn find_accessors(&self, name: &str) -> Option<Accessors> {
        match self.accessors.get(name) {
            Some(accessors) => Some(accessors.clone()),
            None => self.parent.as_ref()?.find_accessors(name),
        }
    }
}

pub struct Class {
    name: Rc<str>,
    superclass: Option<Rc<Class>>,
    instance_members: Rc<Members>,
    static_members: Rc<Members>,
    /// Fields assigned on the class value itself.
    static_fields: RefCell<FxHashMap<Rc<str>, Value>>,
}

impl Class {
    pub fn new(
        name: Rc<str>,
        superclass: Option<Rc<Class>>,
        instance_members: Members,
        static_members: Members,
    ) -> Self {
        Class {
            name,
            superclass,
            instance_members: Rc::new(instance_members),
            static_members: Rc::new(static_members),
            static_fields: RefCell::new(FxHashMap::default()),
        }
    }

    pub fn name(&self) -> &Rc<str> {
        &self.name
    }

    pub fn superclass(&self) -> Option<&Rc<Class>> {
        self.superclass.as_ref()
    }

    pub fn instance_members(&self) -> &Rc<Members> {
        &self.instance_members
    }

    pub fn static_members(&self) -> &Rc<Members> {
        &self.static_members
    }

    pub fn static_fields(&self) -> &RefCell<FxHashMap<Rc<str>, Value>> {
        &self.static_fields
    }

    /// The `init` method, inherited or not.
    pub fn initializer(&self) -> Option<Rc<FunctionValue>> {
        self.instance_members.find_method(INIT)
    }
}

pub struct Instance {
    class: Rc<Class>,
    fields: RefCell<FxHashMap<Rc<str>, Value>>,
}

impl Instance {
    pub fn new(class: Rc<Class>) -> Self {
        Instance {
            class,
            fields: RefCell::new(FxHashMap::default()),
        }
    }

    pub fn class(&self) -> &Rc<Class> {
        &self.class
    }

    pub fn fields(&self) -> &RefCell<FxHashMap<Rc<str>, Value>> {
        &self.fields
    }
}
