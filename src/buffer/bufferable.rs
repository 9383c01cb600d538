//! Bufferable Module
//!
//! The contract a value must satisfy to be stored in the buffer.

use std::rc::Rc;
use std::sync::Arc;

// == Bufferable ==
/// A value exposing a stable identifier, unique among buffered objects.
///
/// The buffer treats values opaquely beyond this identifier.
pub trait Bufferable {
    /// Returns the identifier for this instance.
    fn id(&self) -> &str;
}

/// A string is its own identifier.
impl Bufferable for str {
    fn id(&self) -> &str {
        self
    }
}

impl Bufferable for String {
    fn id(&self) -> &str {
        self.as_str()
    }
}

impl<T: Bufferable + ?Sized> Bufferable for &T {
    fn id(&self) -> &str {
        (**self).id()
    }
}

impl<T: Bufferable + ?Sized> Bufferable for Box<T> {
    fn id(&self) -> &str {
        (**self).id()
    }
}

impl<T: Bufferable + ?Sized> Bufferable for Arc<T> {
    fn id(&self) -> &str {
        (**self).id()
    }
}

impl<T: Bufferable + ?Sized> Bufferable for Rc<T> {
    fn id(&self) -> &str {
        (**self).id()
    }
}
