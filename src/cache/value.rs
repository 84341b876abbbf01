//! Cache Value Module
//!
//! Defines the opaque value type stored in caches by default.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

// == Value ==
/// A dynamically typed, shared value.
///
/// Cloning a `Value` clones the pointer, not the payload: every clone refers
/// to the object that was stored. The payload is recovered with
/// [`Value::downcast_ref`] or [`Value::downcast`].
#[derive(Clone)]
pub struct Value(Arc<dyn Any + Send + Sync>);

impl Value {
    // == Constructor ==
    /// Wraps any thread-safe value.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self(Arc::new(value))
    }

    /// Borrows the payload as `T`, or `None` if it holds another type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }

    /// Returns a shared handle to the payload as `T`.
    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        Arc::clone(&self.0).downcast::<T>().ok()
    }

    /// True if the payload is a `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.0.is::<T>()
    }

    /// True if both values point at the same stored object.
    pub fn ptr_eq(&self, other: &Value) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Value(..)")
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_downcast_ref() {
        let value = Value::new(42_i32);

        assert_eq!(value.downcast_ref::<i32>(), Some(&42));
        assert!(value.downcast_ref::<i64>().is_none());
        assert!(value.is::<i32>());
        assert!(!value.is::<String>());
    }

    #[test]
    fn test_value_downcast_shared() {
        let value = Value::new(vec![1, 2, 3]);
        let inner = value.downcast::<Vec<i32>>().unwrap();

        assert_eq!(*inner, vec![1, 2, 3]);
        assert!(value.downcast::<String>().is_none());
    }

    #[test]
    fn test_value_clone_shares_payload() {
        let value = Value::new("shared".to_string());
        let copy = value.clone();

        assert!(value.ptr_eq(&copy));
        assert!(!value.ptr_eq(&Value::new("shared".to_string())));
    }
}
