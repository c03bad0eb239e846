//! Load state of a remotely-fetched resource.

/// Whether a resource has been fetched.
///
/// A resource is either not yet loaded or loaded. During an explicit
/// refresh it is `Loading`, keeping the previous value so that a failed
/// refresh can restore it unchanged.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    /// Never fetched.
    NotLoaded,
    /// A fetch is in flight.
    Loading {
        /// The value before the fetch started.
        previous: Option<T>,
    },
    /// Fetched successfully.
    Loaded(T),
}

impl<T> Default for LoadState<T> {
    fn default() -> Self {
        Self::NotLoaded
    }
}

impl<T> LoadState<T> {
    /// The current value, including the previous value while loading.
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::NotLoaded => None,
            Self::Loading { previous } => previous.as_ref(),
            Self::Loaded(value) => Some(value),
        }
    }

    /// Mutable access to the loaded value.
    pub fn value_mut(&mut self) -> Option<&mut T> {
        match self {
            Self::NotLoaded => None,
            Self::Loading { previous } => previous.as_mut(),
            Self::Loaded(value) => Some(value),
        }
    }

    /// Check if a fetch is in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }

    /// Check if a value has been fetched at least once.
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }

    /// Enter the loading state, keeping the current value.
    pub fn begin(&mut self) {
        let previous = match std::mem::take(self) {
            Self::NotLoaded => None,
            Self::Loading { previous } => previous,
            Self::Loaded(value) => Some(value),
        };
        *self = Self::Loading { previous };
    }

    /// Store a freshly fetched value.
    pub fn finish(&mut self, value: T) {
        *self = Self::Loaded(value);
    }

    /// Leave the loading state after a failed fetch, restoring the previous value.
    pub fn abort(&mut self) {
        if let Self::Loading { previous } = std::mem::take(self) {
            *self = match previous {
                Some(value) => Self::Loaded(value),
                None => Self::NotLoaded,
            };
        }
    }
}
