//! Type-erased host objects on the operand stack.
//!
//! The host injects objects (storage contexts, iterators, notifications, ...) into the
//! VM by wrapping them in an [`InteropInterface`]. Scripts can move them around and
//! compare them but never see their bytes; host code gets them back with a checked
//! downcast.

use std::{any::Any, fmt, rc::Rc};

use super::StackItem;

/// Object that can be wrapped in an [`InteropInterface`].
///
/// Implemented automatically for every `'static` type with `Debug + PartialEq`, so host
/// types only need the usual derives.
pub trait InteropObject: Any + fmt::Debug {
    fn as_any(&self) -> &dyn Any;

    fn into_any_rc(self: Rc<Self>) -> Rc<dyn Any>;

    /// Compares with another wrapped object using the concrete type's `PartialEq`.
    ///
    /// Objects of different concrete types are never equal.
    fn dyn_eq(&self, other: &dyn InteropObject) -> bool;
}

impl<T: Any + fmt::Debug + PartialEq> InteropObject for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any_rc(self: Rc<Self>) -> Rc<dyn Any> {
        self
    }

    fn dyn_eq(&self, other: &dyn InteropObject) -> bool {
        other.as_any().downcast_ref::<T>().is_some_and(|other| self == other)
    }
}

/// Shared reference to a host object, or null.
///
/// The wrapper shares ownership with the host and never copies the object. Cloning the
/// wrapper clones the `Rc`.
#[derive(Debug, Clone, Default)]
pub struct InteropInterface {
    object: Option<Rc<dyn InteropObject>>,
}

impl InteropInterface {
    /// Wraps a host object, taking ownership of it.
    #[must_use]
    pub fn new<T: InteropObject>(object: T) -> Self {
        Self {
            object: Some(Rc::new(object)),
        }
    }

    /// Wraps an object the host keeps a handle to.
    #[must_use]
    pub fn from_shared(object: Rc<dyn InteropObject>) -> Self {
        Self { object: Some(object) }
    }

    /// Wrapper around no object at all.
    #[must_use]
    pub fn null() -> Self {
        Self { object: None }
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        self.object.is_none()
    }

    /// True iff an object is wrapped.
    #[must_use]
    pub fn to_boolean(&self) -> bool {
        self.object.is_some()
    }

    /// Borrows the wrapped object as `T`, or `None` if it is null or of another type.
    #[must_use]
    pub fn get_interface<T: Any>(&self) -> Option<&T> {
        self.object.as_deref()?.as_any().downcast_ref::<T>()
    }

    /// Returns a new shared handle to the wrapped object as `T`, or `None` on mismatch.
    #[must_use]
    pub fn downcast_rc<T: Any>(&self) -> Option<Rc<T>> {
        let object = Rc::clone(self.object.as_ref()?);
        object.into_any_rc().downcast::<T>().ok()
    }

    /// The wrapped object without any type check.
    #[must_use]
    pub fn object(&self) -> Option<&Rc<dyn InteropObject>> {
        self.object.as_ref()
    }

    /// Equal only to another `InteropInterface` whose object compares equal.
    ///
    /// Two null wrappers are equal; null never equals a wrapped object.
    #[must_use]
    pub fn equals(&self, other: &StackItem) -> bool {
        let StackItem::InteropInterface(other) = other else {
            return false;
        };
        match (&self.object, &other.object) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b) || a.dyn_eq(&**b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<T: InteropObject> From<Rc<T>> for InteropInterface {
    fn from(object: Rc<T>) -> Self {
        Self { object: Some(object) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct StorageContext {
        script_hash: Vec<u8>,
    }

    #[derive(Debug, PartialEq)]
    struct Notification(u32);

    #[test]
    fn downcast_to_wrong_type_is_none() {
        let wrapper = InteropInterface::new(Notification(7));
        assert!(wrapper.get_interface::<StorageContext>().is_none());
        assert_eq!(wrapper.get_interface::<Notification>(), Some(&Notification(7)));
        assert!(InteropInterface::null().get_interface::<Notification>().is_none());
    }

    #[test]
    fn downcast_rc_shares_the_object() {
        let shared = Rc::new(StorageContext {
            script_hash: vec![1, 2, 3],
        });
        let wrapper = InteropInterface::from(Rc::clone(&shared));
        let back = wrapper.downcast_rc::<StorageContext>().unwrap();
        assert!(Rc::ptr_eq(&shared, &back));
        assert!(wrapper.downcast_rc::<Notification>().is_none());
    }

    /// `dyn_eq` must dispatch through the vtable of the other object, not the `Rc`.
    #[test]
    fn equality_uses_the_wrapped_type() {
        let a = InteropInterface::new(Notification(1));
        let b = InteropInterface::new(Notification(1));
        let c = InteropInterface::new(Notification(2));
        assert!(a.equals(&StackItem::InteropInterface(b)));
        assert!(!a.equals(&StackItem::InteropInterface(c)));
    }
}
