//! # IDs
//! Process-unique IDs namespaced by a marker type: a `UniqueID<Layer>` and a
//! `UniqueID<SomethingElse>` may share a numeric value but are different
//! types and never compare against each other. Use the `Default` impl to
//! allocate a fresh one. IDs are never recycled.

// Map from marker TypeId to the next numeric ID for that namespace.
static ID_SERVER: parking_lot::RwLock<
    std::collections::BTreeMap<std::any::TypeId, std::sync::atomic::AtomicU64>,
> = parking_lot::const_rwlock(std::collections::BTreeMap::new());

/// ID guaranteed unique within this execution of the program.
pub struct UniqueID<T: std::any::Any> {
    id: std::num::NonZeroU64,
    // Namespace marker
    _phantom: std::marker::PhantomData<T>,
}
impl<T: std::any::Any> Clone for UniqueID<T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T: std::any::Any> Copy for UniqueID<T> {}
impl<T: std::any::Any> PartialEq for UniqueID<T> {
    fn eq(&self, other: &Self) -> bool {
        // Namespaces already agree at compile time.
        self.id == other.id
    }
}
impl<T: std::any::Any> Eq for UniqueID<T> {}
impl<T: std::any::Any> std::hash::Hash for UniqueID<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
// Safety - the ID is just a u64. Without these, a !Send or !Sync marker type
// would poison the ID even though no T is ever stored.
unsafe impl<T: std::any::Any> Send for UniqueID<T> {}
unsafe impl<T: std::any::Any> Sync for UniqueID<T> {}

impl<T: std::any::Any> UniqueID<T> {
    /// Get the raw numeric value of this ID.
    /// IDs from differing namespaces may share the same numeric value!
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id.get()
    }
    fn next() -> Self {
        let raw = {
            let read = ID_SERVER.upgradable_read();
            let ty = std::any::TypeId::of::<T>();
            if let Some(atomic) = read.get(&ty) {
                atomic.fetch_add(1, std::sync::atomic::Ordering::Relaxed)
            } else {
                // First allocation in this namespace - transition to exclusive
                // access. Happens at most once per marker type.
                let mut write = parking_lot::RwLockUpgradableReadGuard::upgrade(read);
                write.insert(ty, 2.into());
                1
            }
        };
        let Some(id) = std::num::NonZeroU64::new(raw) else {
            // The counter wrapped. Terminate rather than hand out duplicates -
            // global state is unfixably borked at this point.
            log::error!("{} ID overflow! Aborting!", std::any::type_name::<T>());
            log::logger().flush();
            std::process::abort();
        };
        Self {
            id,
            _phantom: std::marker::PhantomData,
        }
    }
}
impl<T: std::any::Any> Default for UniqueID<T> {
    fn default() -> Self {
        Self::next()
    }
}
impl<T: std::any::Any> std::fmt::Display for UniqueID<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Unwrap here is safe - rsplit always yields at least one element.
        write!(
            f,
            "{}#{}",
            std::any::type_name::<T>().rsplit("::").next().unwrap(),
            self.id
        )
    }
}
impl<T: std::any::Any> std::fmt::Debug for UniqueID<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as std::fmt::Display>::fmt(self, f)
    }
}

#[cfg(test)]
mod test {
    use super::UniqueID;

    #[test]
    fn unique() {
        // Local namespace so other tests' allocations can't interfere.
        struct Namespace;
        type TestID = UniqueID<Namespace>;

        let mut v: Vec<_> = (0..1024).map(|_| TestID::default()).collect();
        v.sort_unstable_by_key(TestID::id);
        let before = v.len();
        v.dedup();
        assert_eq!(before, v.len(), "had duplicate ids");
    }
    #[test]
    fn display_is_namespaced() {
        struct Elsewhere;
        let id = UniqueID::<Elsewhere>::default();
        assert!(id.to_string().starts_with("Elsewhere#"));
    }
}
