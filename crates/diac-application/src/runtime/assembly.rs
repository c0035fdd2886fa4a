//! Pieces shared by both runtimes: object construction, the singleton cache
//! and the per-thread resolution stack.

use diac_domain::error::{Error, Result};
use diac_domain::ports::{ClassFactory, ClassLoader, Object, ProvisionContext};
use diac_domain::{Arguments, DependencyKey, Instance, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};
use std::thread::{self, ThreadId};

/// An object between its constructor call and publication
pub(crate) struct Construction {
    factory: Arc<dyn ClassFactory>,
    object: Object,
}

impl Construction {
    /// Look up the factory for `class` and call its constructor
    pub(crate) fn begin(classes: &dyn ClassLoader, class: &str, arguments: Arguments) -> Result<Self> {
        let factory = classes
            .factory(class)
            .ok_or_else(|| Error::unknown_class(class))?;
        let object = factory.construct(arguments)?;
        Ok(Self { factory, object })
    }

    /// Call a setter or the post-construct hook
    pub(crate) fn call(&mut self, method: &str, arguments: Arguments) -> Result<()> {
        self.factory.invoke(&mut *self.object, method, arguments)
    }

    /// Publish the object
    pub(crate) fn finish(self) -> Value {
        Value::Object(Instance::from(self.object))
    }

    /// Treat the object as a provider and ask it for its value
    pub(crate) fn provide(self, context: &ProvisionContext<'_>) -> Result<Value> {
        self.factory.provide(&*self.object, context)
    }
}

/// Singleton instances by key; the first instance stored wins
#[derive(Default)]
pub(crate) struct SingletonCache {
    values: RwLock<HashMap<DependencyKey, Value>>,
}

impl SingletonCache {
    pub(crate) fn get(&self, key: &DependencyKey) -> Result<Option<Value>> {
        let values = self
            .values
            .read()
            .map_err(|_| Error::internal("singleton cache lock poisoned"))?;
        Ok(values.get(key).cloned())
    }

    /// Store `value` unless another thread got there first; return the stored one
    pub(crate) fn keep_first(&self, key: &DependencyKey, value: Value) -> Result<Value> {
        let mut values = self
            .values
            .write()
            .map_err(|_| Error::internal("singleton cache lock poisoned"))?;
        Ok(values.entry(key.clone()).or_insert(value).clone())
    }
}

/// Keys currently being resolved, per thread
#[derive(Default)]
pub(crate) struct ResolutionStack {
    active: Mutex<Vec<(ThreadId, DependencyKey)>>,
}

impl ResolutionStack {
    /// Mark `key` as in progress on this thread until the guard drops
    pub(crate) fn enter(&self, key: &DependencyKey) -> Result<ResolutionGuard<'_>> {
        let thread = thread::current().id();
        let mut active = self
            .active
            .lock()
            .map_err(|_| Error::internal("resolution stack lock poisoned"))?;

        if active.iter().any(|(t, k)| *t == thread && k == key) {
            let mut path: Vec<DependencyKey> = active
                .iter()
                .filter(|(t, _)| *t == thread)
                .map(|(_, k)| k.clone())
                .collect();
            path.push(key.clone());
            return Err(Error::circular(path));
        }

        active.push((thread, key.clone()));
        Ok(ResolutionGuard {
            stack: self,
            thread,
            key: key.clone(),
        })
    }
}

pub(crate) struct ResolutionGuard<'a> {
    stack: &'a ResolutionStack,
    thread: ThreadId,
    key: DependencyKey,
}

impl Drop for ResolutionGuard<'_> {
    fn drop(&mut self) {
        if let Ok(mut active) = self.stack.active.lock() {
            if let Some(position) = active
                .iter()
                .rposition(|(t, k)| *t == self.thread && *k == self.key)
            {
                active.remove(position);
            }
        }
    }
}
