//! Light/dark theme preference, persisted across runs.
//!
//! Independent of the submit/send workflow; nothing here touches it.

pub mod store;

pub use store::{FilePreferenceStore, MemoryPreferenceStore, PreferenceStore, open_store};

use std::sync::Arc;

use crate::error::ThemeError;

/// Storage key for the persisted mode.
pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    Light,
    Dark,
}

impl ThemeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn flipped(&self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl std::fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ThemeMode {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(format!("Unknown theme: {other}")),
        }
    }
}

/// What the view shows for a mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeVisuals {
    pub light_mode: bool,
    pub moon_icon_hidden: bool,
    pub sun_icon_hidden: bool,
}

impl ThemeVisuals {
    pub fn for_mode(mode: ThemeMode) -> Self {
        let light = mode == ThemeMode::Light;
        Self {
            light_mode: light,
            moon_icon_hidden: light,
            sun_icon_hidden: !light,
        }
    }
}

/// Where the theme is drawn.
pub trait ThemeView: Send + Sync {
    fn apply_theme(&self, visuals: ThemeVisuals);

    /// Whether light mode is currently applied.
    fn is_light_mode(&self) -> bool;
}

/// Guess whether the terminal has a light background from `COLORFGBG`
/// (`"fg;bg"`, where background 7 or 15 is white).
pub fn prefers_light_from_env() -> bool {
    std::env::var("COLORFGBG")
        .ok()
        .is_some_and(|v| colorfgbg_is_light(&v))
}

fn colorfgbg_is_light(value: &str) -> bool {
    value
        .rsplit(';')
        .next()
        .and_then(|bg| bg.trim().parse::<u8>().ok())
        .is_some_and(|bg| bg == 7 || bg == 15)
}

/// Loads, applies, and persists the theme mode.
pub struct ThemePreference {
    store: Arc<dyn PreferenceStore>,
    view: Arc<dyn ThemeView>,
    prefers_light: bool,
}

impl ThemePreference {
    pub fn new(
        store: Arc<dyn PreferenceStore>,
        view: Arc<dyn ThemeView>,
        prefers_light: bool,
    ) -> Self {
        Self {
            store,
            view,
            prefers_light,
        }
    }

    /// Apply the saved mode, or derive one from the environment.
    ///
    /// Any saved value other than `light` means dark.
    pub fn load(&self) -> Result<ThemeMode, ThemeError> {
        let saved = self.store.get(THEME_KEY)?.map(|raw| {
            raw.parse::<ThemeMode>().unwrap_or_else(|e| {
                tracing::warn!("{e}, using dark");
                ThemeMode::Dark
            })
        });

        let mode = match saved {
            Some(mode) => mode,
            None if self.prefers_light => ThemeMode::Light,
            None => ThemeMode::Dark,
        };
        self.set(mode)?;
        Ok(mode)
    }

    pub fn set(&self, mode: ThemeMode) -> Result<(), ThemeError> {
        self.view.apply_theme(ThemeVisuals::for_mode(mode));
        self.store.set(THEME_KEY, mode.as_str())?;
        tracing::debug!(%mode, "Theme applied");
        Ok(())
    }

    pub fn toggle(&self) -> Result<ThemeMode, ThemeError> {
        let current = if self.view.is_light_mode() {
            ThemeMode::Light
        } else {
            ThemeMode::Dark
        };
        let next = current.flipped();
        self.set(next)?;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    struct RecordingThemeView {
        applied: Mutex<Option<ThemeVisuals>>,
    }

    impl ThemeView for RecordingThemeView {
        fn apply_theme(&self, visuals: ThemeVisuals) {
            *self.applied.lock().unwrap() = Some(visuals);
        }

        fn is_light_mode(&self) -> bool {
            self.applied
                .lock()
                .unwrap()
                .is_some_and(|v| v.light_mode)
        }
    }

    fn pref(
        prefers_light: bool,
    ) -> (ThemePreference, Arc<MemoryPreferenceStore>, Arc<RecordingThemeView>) {
        let store = Arc::new(MemoryPreferenceStore::default());
        let view = Arc::new(RecordingThemeView::default());
        (
            ThemePreference::new(store.clone(), view.clone(), prefers_light),
            store,
            view,
        )
    }

    #[test]
    fn saved_mode_wins() {
        let (theme, store, view) = pref(false);
        store.set(THEME_KEY, "light").unwrap();
        assert_eq!(theme.load().unwrap(), ThemeMode::Light);
        assert!(view.is_light_mode());
    }

    #[test]
    fn system_light_preference_used_when_unset() {
        let (theme, store, _view) = pref(true);
        assert_eq!(theme.load().unwrap(), ThemeMode::Light);
        assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("light"));
    }

    #[test]
    fn defaults_to_dark() {
        let (theme, _store, view) = pref(false);
        assert_eq!(theme.load().unwrap(), ThemeMode::Dark);
        assert!(!view.is_light_mode());
    }

    #[test]
    fn unknown_saved_value_means_dark() {
        let (theme, store, _view) = pref(true);
        store.set(THEME_KEY, "sepia").unwrap();
        assert_eq!(theme.load().unwrap(), ThemeMode::Dark);
        assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn toggle_flips_and_persists() {
        let (theme, store, view) = pref(false);
        theme.load().unwrap();

        assert_eq!(theme.toggle().unwrap(), ThemeMode::Light);
        assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("light"));
        let visuals = view.applied.lock().unwrap().unwrap();
        assert!(visuals.moon_icon_hidden);
        assert!(!visuals.sun_icon_hidden);

        assert_eq!(theme.toggle().unwrap(), ThemeMode::Dark);
    }

    #[test]
    fn colorfgbg_parsing() {
        assert!(colorfgbg_is_light("0;15"));
        assert!(colorfgbg_is_light("0;default;7"));
        assert!(!colorfgbg_is_light("15;0"));
        assert!(!colorfgbg_is_light("garbage"));
    }
}
