use std::fmt;

/// Lifecycle state of a [`Context`](crate::Context).
///
/// ```text
/// Uninitialized ──mount(root)──► Active ──destroy()──► Destroyed
///       └──────────────────destroy()───────────────────────┘
/// ```
///
/// `Destroyed` is terminal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Lifecycle {
    /// Root element not attached; bootstrap is injecting services and wiring subscriptions.
    #[default]
    Uninitialized,
    /// Bootstrap finished.
    Active,
    /// Torn down: subscriptions and registry cleared.
    Destroyed,
}

impl Lifecycle {
    pub fn as_str(self) -> &'static str {
        match self {
            Lifecycle::Uninitialized => "uninitialized",
            Lifecycle::Active => "active",
            Lifecycle::Destroyed => "destroyed",
        }
    }
}

impl fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
