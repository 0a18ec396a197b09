//! Light/dark theme with a persisted user choice.
//!
//! The stored value wins over the system preference. A system preference
//! change is only followed while the user has never toggled manually.

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::error::OknaError;
use crate::ui::{Control, EventFlow, EventKind, SharedUiState, Subscription, UiEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    /// Value of the `data-theme` attribute and the stored flag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn from_key(s: &str) -> Option<Self> {
        match s {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn from_dark(dark: bool) -> Self {
        if dark {
            Self::Dark
        } else {
            Self::Light
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persistent string storage (`localStorage` in the browser).
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), OknaError>;
}

/// The document root the theme is applied to.
pub trait ThemeView {
    fn apply(&self, theme: Theme);
    fn system_prefers_dark(&self) -> bool;
}

pub struct ThemeController {
    store: Rc<dyn KeyValueStore>,
    view: Rc<dyn ThemeView>,
    ui: SharedUiState,
    storage_key: String,
}

impl ThemeController {
    pub fn new(
        store: Rc<dyn KeyValueStore>,
        view: Rc<dyn ThemeView>,
        ui: SharedUiState,
        storage_key: impl Into<String>,
    ) -> Self {
        Self {
            store,
            view,
            ui,
            storage_key: storage_key.into(),
        }
    }

    /// The user's stored choice. Garbage in storage is ignored.
    pub fn saved(&self) -> Option<Theme> {
        let raw = self.store.get(&self.storage_key)?;
        let theme = Theme::from_key(&raw);
        if theme.is_none() {
            tracing::warn!(value = %raw, "Ignoring unknown stored theme");
        }
        theme
    }

    pub fn system(&self) -> Theme {
        Theme::from_dark(self.view.system_prefers_dark())
    }

    /// Apply the stored theme, or the system one when nothing is stored.
    pub fn init(&self) -> Theme {
        let theme = self.saved().unwrap_or_else(|| self.system());
        self.apply(theme);
        theme
    }

    /// Flip the current theme and remember the choice.
    pub fn toggle(&self) -> Theme {
        let current = self.ui.borrow().theme().unwrap_or_else(|| self.system());
        let next = current.toggled();
        self.apply(next);
        if let Err(e) = self.store.set(&self.storage_key, next.as_str()) {
            tracing::warn!("Failed to persist theme: {e}");
        }
        next
    }

    /// Follow an OS-level change unless the user picked a theme.
    pub fn system_changed(&self, dark: bool) -> Option<Theme> {
        if self.saved().is_some() {
            return None;
        }
        let theme = Theme::from_dark(dark);
        self.apply(theme);
        Some(theme)
    }

    fn apply(&self, theme: Theme) {
        tracing::debug!(%theme, "Applying theme");
        self.ui.borrow_mut().set_theme(theme);
        self.view.apply(theme);
    }
}

pub struct ThemeBindings<C> {
    pub toggle: Option<C>,
    /// The `(prefers-color-scheme: dark)` media query list.
    pub color_scheme: Option<C>,
}

/// Apply the initial theme and listen for toggles and OS changes.
pub fn attach<C: Control>(controller: Rc<ThemeController>, bindings: ThemeBindings<C>) -> Subscription {
    controller.init();

    let mut subscription = Subscription::empty();
    if let Some(toggle) = &bindings.toggle {
        let controller = controller.clone();
        subscription.push(toggle.listen(
            EventKind::Click,
            Box::new(move |_| {
                controller.toggle();
                EventFlow::Continue
            }),
        ));
    }
    if let Some(color_scheme) = &bindings.color_scheme {
        subscription.push(color_scheme.listen(
            EventKind::ColorSchemeChange,
            Box::new(move |event| {
                if let UiEvent::ColorScheme { dark } = event {
                    controller.system_changed(*dark);
                }
                EventFlow::Continue
            }),
        ));
    }
    subscription
}
