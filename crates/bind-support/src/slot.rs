//! Presence-tracking field storage.

/// One field's runtime state: a value plus whether it was ever assigned.
///
/// An unset slot means the element is omitted on write and was not
/// encountered on read. A set slot stays set even when it holds an empty or
/// default value, which is what lets `<Name></Name>` and a missing `<Name>`
/// round-trip differently.
///
/// # Examples
///
/// ```
/// use wsbind_support::Slot;
///
/// let mut name: Slot<String> = Slot::unset();
/// assert!(!name.is_set());
///
/// name.set(String::new());
/// assert!(name.is_set());
/// assert_eq!(name.get().map(String::as_str), Some(""));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Slot<T> {
    value: Option<T>,
}

impl<T> Slot<T> {
    /// Creates a slot that has never been assigned.
    #[inline]
    pub const fn unset() -> Self {
        Slot { value: None }
    }

    /// Creates a slot holding `value`.
    #[inline]
    pub const fn new(value: T) -> Self {
        Slot { value: Some(value) }
    }

    /// Assigns a value and marks the slot as set.
    #[inline]
    pub fn set(&mut self, value: T) {
        self.value = Some(value);
    }

    /// Returns true once a value has been assigned.
    #[inline]
    pub fn is_set(&self) -> bool {
        self.value.is_some()
    }

    #[inline]
    pub fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    #[inline]
    pub fn get_mut(&mut self) -> Option<&mut T> {
        self.value.as_mut()
    }

    /// Returns the value, assigning the result of `f` first if unset.
    pub fn get_or_insert_with(&mut self, f: impl FnOnce() -> T) -> &mut T {
        self.value.get_or_insert_with(f)
    }

    /// Removes the value and returns the slot to the unset state.
    #[inline]
    pub fn clear(&mut self) {
        self.value = None;
    }

    /// Takes the value out, leaving the slot unset.
    #[inline]
    pub fn take(&mut self) -> Option<T> {
        self.value.take()
    }
}

impl<T> Default for Slot<T> {
    #[inline]
    fn default() -> Self {
        Slot::unset()
    }
}

impl<T> From<T> for Slot<T> {
    #[inline]
    fn from(value: T) -> Self {
        Slot::new(value)
    }
}
