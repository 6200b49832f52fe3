//! Light/dark theme persisted in local storage.

use crate::config::THEME_KEY;
use flip_timer::{KeyValueStore, LocalStore};
use log::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    /// Stored preference, falling back to dark when nothing usable is saved.
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("light") => Theme::Light,
            _ => Theme::Dark,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

pub fn load_theme() -> Theme {
    Theme::from_stored(LocalStore::new(THEME_KEY).load().as_deref())
}

pub fn save_theme(theme: Theme) {
    LocalStore::new(THEME_KEY).save(theme.as_str());
}

/// Toggle the `dark` class on the document element.
pub fn apply_theme(theme: Theme) {
    let class_list = gloo_utils::document_element().class_list();
    let result = match theme {
        Theme::Dark => class_list.add_1("dark"),
        Theme::Light => class_list.remove_1("dark"),
    };
    if let Err(e) = result {
        warn!("Could not apply {} theme: {:?}", theme.as_str(), e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dark_is_the_default() {
        assert_eq!(Theme::from_stored(None), Theme::Dark);
        assert_eq!(Theme::from_stored(Some("dark")), Theme::Dark);
        assert_eq!(Theme::from_stored(Some("sepia")), Theme::Dark);
        assert_eq!(Theme::from_stored(Some("light")), Theme::Light);
    }

    #[test]
    fn toggling_round_trips_through_storage_names() {
        let light = Theme::Dark.toggled();
        assert_eq!(light, Theme::Light);
        assert_eq!(Theme::from_stored(Some(light.as_str())), Theme::Light);
        assert_eq!(light.toggled(), Theme::Dark);
    }
}
