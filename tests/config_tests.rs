// SPDX-License-Identifier: MPL-2.0

//! Integration tests for configuration module

use shutter_button::Config;
use shutter_button::config::AppTheme;

#[test]
fn test_config_default() {
    let config = Config::default();
    assert_eq!(
        config.app_theme,
        AppTheme::System,
        "Theme should follow the desktop by default"
    );
}

#[test]
fn test_app_theme_dropdown_indices() {
    for (index, theme) in AppTheme::ALL.iter().enumerate() {
        assert_eq!(theme.index(), index);
        assert_eq!(AppTheme::from_index(index), Some(*theme));
    }
    assert_eq!(AppTheme::from_index(AppTheme::ALL.len()), None);
}
