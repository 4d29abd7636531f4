use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::sync::Arc;

/// A thread-safe, reference-counted resource container with read-write locking.
///
/// `MtResource` is the handle through which published chunks are shared. Every
/// clone points at the same value, so two handles obtained for the same chunk
/// coordinate compare equal under [`MtResource::ptr_eq`].
///
/// # Examples
///
/// ```
/// use chunk_world::core::MtResource;
///
/// let counter = MtResource::new(0);
/// let counter_clone = counter.clone();
///
/// *counter_clone.get_mut() += 1;
/// assert_eq!(*counter.get(), 1);
/// assert!(MtResource::ptr_eq(&counter, &counter_clone));
/// ```
///
/// # Performance Considerations
/// - Read operations (`get()`) can occur concurrently
/// - Write operations (`get_mut()`) are exclusive and will block other operations
pub struct MtResource<T: Send + Sync> {
    pub resource: Arc<RwLock<T>>,
}

impl<T: Send + Sync> MtResource<T> {
    /// Creates a new `MtResource` containing the given value.
    pub fn new(resource: T) -> Self {
        Self {
            resource: Arc::new(RwLock::new(resource)),
        }
    }

    /// Returns a read-only guard that allows reading the contained value.
    pub fn get(&self) -> RwLockReadGuard<'_, T> {
        self.resource.read()
    }

    /// Returns a mutable guard that allows modifying the contained value.
    ///
    /// Blocks until every outstanding read guard has been dropped.
    pub fn get_mut(&self) -> RwLockWriteGuard<'_, T> {
        self.resource.write()
    }

    /// Returns `true` when both handles refer to the same underlying value.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.resource, &b.resource)
    }
}

impl<T: Send + Sync> Clone for MtResource<T> {
    fn clone(&self) -> Self {
        Self {
            resource: self.resource.clone(),
        }
    }
}

impl<T: Send + Sync + std::fmt::Debug> std::fmt::Debug for MtResource<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MtResource")
            .field("resource", &*self.resource.read())
            .finish()
    }
}
