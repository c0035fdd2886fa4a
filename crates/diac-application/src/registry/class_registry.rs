//! Class registry
//!
//! Rust has no runtime reflection, so classes are registered up front: a
//! [`ClassDefinition`] carries the structural signature the compiler reads and
//! the typed closures the runtimes call.
//!
//! ```ignore
//! let mut classes = ClassRegistry::new();
//! classes.register(
//!     ClassDefinition::new("app::Car", |args| Ok(Car::new(args.object::<Engine>(0)?)))
//!         .constructor_param(Param::new("engine", "app::Engine"))
//!         .optional_setter("set_radio", vec![Param::new("radio", "app::Radio")], |car, args| {
//!             car.radio = Some(args.object::<Radio>(0)?);
//!             Ok(())
//!         })
//!         .post_construct("init", |car| car.init()),
//! );
//! ```

use diac_domain::error::{Error, Result};
use diac_domain::ports::{
    ClassFactory, ClassLoader, Object, ProvisionContext, StructuralIntrospector,
};
use diac_domain::{
    Argument, Arguments, ClassSignature, DependencyKey, InjectionPoint, SetterMethod, Value,
};
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Name given to constructors in injection points
pub const CONSTRUCTOR_METHOD: &str = "new";

type Constructor<T> = Box<dyn Fn(Arguments) -> Result<T> + Send + Sync>;
type Method<T> = Box<dyn Fn(&mut T, Arguments) -> Result<()> + Send + Sync>;
type Provide<T> = Box<dyn Fn(&T, &ProvisionContext<'_>) -> Result<Value> + Send + Sync>;

/// A declared parameter: name, dependency key and optional default
#[derive(Debug, Clone)]
pub struct Param {
    name: String,
    key: DependencyKey,
    default: Option<serde_json::Value>,
}

impl Param {
    /// Parameter satisfied by `key`
    pub fn new<N: Into<String>, K: Into<DependencyKey>>(name: N, key: K) -> Self {
        Self {
            name: name.into(),
            key: key.into(),
            default: None,
        }
    }

    /// Declare a default literal
    #[must_use]
    pub fn with_default<V: Into<serde_json::Value>>(mut self, value: V) -> Self {
        self.default = Some(value.into());
        self
    }

    fn into_argument(self, class: &str, method: &str) -> Argument {
        let argument = Argument::new(self.key, InjectionPoint::new(class, method, self.name));
        match self.default {
            Some(value) => argument.with_default(value),
            None => argument,
        }
    }
}

/// Signature plus typed factory closures for one class
pub struct ClassDefinition<T> {
    signature: ClassSignature,
    constructor: Constructor<T>,
    methods: HashMap<String, Method<T>>,
    provide: Option<Provide<T>>,
}

impl<T: Any + Send + Sync> ClassDefinition<T> {
    /// Define `class`, constructed by `constructor`
    pub fn new<S, F>(class: S, constructor: F) -> Self
    where
        S: Into<String>,
        F: Fn(Arguments) -> Result<T> + Send + Sync + 'static,
    {
        Self {
            signature: ClassSignature::new(class),
            constructor: Box::new(constructor),
            methods: HashMap::new(),
            provide: None,
        }
    }

    /// Append a constructor parameter
    #[must_use]
    pub fn constructor_param(mut self, param: Param) -> Self {
        let argument = param.into_argument(&self.signature.class, CONSTRUCTOR_METHOD);
        self.signature.constructor.push(argument);
        self
    }

    /// Declare a required setter
    #[must_use]
    pub fn setter<F>(self, method: &str, params: Vec<Param>, call: F) -> Self
    where
        F: Fn(&mut T, Arguments) -> Result<()> + Send + Sync + 'static,
    {
        self.with_setter(method, params, false, call)
    }

    /// Declare an optional setter
    #[must_use]
    pub fn optional_setter<F>(self, method: &str, params: Vec<Param>, call: F) -> Self
    where
        F: Fn(&mut T, Arguments) -> Result<()> + Send + Sync + 'static,
    {
        self.with_setter(method, params, true, call)
    }

    fn with_setter<F>(mut self, method: &str, params: Vec<Param>, optional: bool, call: F) -> Self
    where
        F: Fn(&mut T, Arguments) -> Result<()> + Send + Sync + 'static,
    {
        let arguments = params
            .into_iter()
            .map(|param| param.into_argument(&self.signature.class, method))
            .collect();
        let mut setter = SetterMethod::new(method, arguments);
        setter.optional = optional;
        self.signature.setters.push(setter);
        self.methods.insert(method.to_string(), Box::new(call));
        self
    }

    /// Declare the post-construct hook
    #[must_use]
    pub fn post_construct<F>(mut self, method: &str, call: F) -> Self
    where
        F: Fn(&mut T) -> Result<()> + Send + Sync + 'static,
    {
        self.signature.post_construct = Some(method.to_string());
        self.methods.insert(
            method.to_string(),
            Box::new(move |target: &mut T, _: Arguments| call(target)),
        );
        self
    }

    /// Make this class a provider
    #[must_use]
    pub fn provides<F>(mut self, provide: F) -> Self
    where
        F: Fn(&T, &ProvisionContext<'_>) -> Result<Value> + Send + Sync + 'static,
    {
        self.provide = Some(Box::new(provide));
        self
    }

    /// Structural signature of the class
    pub fn signature(&self) -> &ClassSignature {
        &self.signature
    }
}

struct TypedFactory<T> {
    class: String,
    constructor: Constructor<T>,
    methods: HashMap<String, Method<T>>,
    provide: Option<Provide<T>>,
}

impl<T: Any + Send + Sync> ClassFactory for TypedFactory<T> {
    fn construct(&self, arguments: Arguments) -> Result<Object> {
        Ok(Box::new((self.constructor)(arguments)?))
    }

    fn invoke(
        &self,
        target: &mut (dyn Any + Send + Sync),
        method: &str,
        arguments: Arguments,
    ) -> Result<()> {
        let call = self.methods.get(method).ok_or_else(|| {
            Error::instantiation(&self.class, format!("no injectable method {method}"))
        })?;
        let target = target
            .downcast_mut::<T>()
            .ok_or_else(|| Error::instantiation(&self.class, "target has a different type"))?;
        call(target, arguments)
    }

    fn provide(
        &self,
        provider: &(dyn Any + Send + Sync),
        context: &ProvisionContext<'_>,
    ) -> Result<Value> {
        let provide = self
            .provide
            .as_ref()
            .ok_or_else(|| Error::instantiation(&self.class, "class is not a provider"))?;
        let provider = provider
            .downcast_ref::<T>()
            .ok_or_else(|| Error::instantiation(&self.class, "provider has a different type"))?;
        provide(provider, context)
    }
}

struct RegisteredClass {
    signature: ClassSignature,
    factory: Arc<dyn ClassFactory>,
}

/// Classes known to the binder and the runtimes
#[derive(Default)]
pub struct ClassRegistry {
    classes: HashMap<String, RegisteredClass>,
}

impl ClassRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a class, replacing any earlier definition with the same name
    pub fn register<T: Any + Send + Sync>(&mut self, definition: ClassDefinition<T>) -> &mut Self {
        let class = definition.signature.class.clone();
        let factory = TypedFactory {
            class: class.clone(),
            constructor: definition.constructor,
            methods: definition.methods,
            provide: definition.provide,
        };
        self.classes.insert(
            class,
            RegisteredClass {
                signature: definition.signature,
                factory: Arc::new(factory),
            },
        );
        self
    }

    /// Whether `class` is registered
    pub fn contains(&self, class: &str) -> bool {
        self.classes.contains_key(class)
    }

    /// Number of registered classes
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Whether no class is registered
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl fmt::Debug for ClassRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.classes.keys().collect();
        names.sort();
        f.debug_struct("ClassRegistry")
            .field("classes", &names)
            .finish()
    }
}

impl StructuralIntrospector for ClassRegistry {
    fn signature_of(&self, class: &str) -> Option<ClassSignature> {
        self.classes.get(class).map(|entry| entry.signature.clone())
    }
}

impl ClassLoader for ClassRegistry {
    fn factory(&self, class: &str) -> Option<Arc<dyn ClassFactory>> {
        self.classes.get(class).map(|entry| Arc::clone(&entry.factory))
    }

    fn introspector(&self) -> &dyn StructuralIntrospector {
        self
    }
}
