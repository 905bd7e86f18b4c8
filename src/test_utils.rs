//! Test utilities for plugin testing

use crate::prelude::*;

/// Creates a minimal test app with core Bevy plugins needed for testing
///
/// Plugins under test bring their own resources and events; the simulation
/// plugin also initializes [`AppState`].
pub fn create_test_app() -> App {
    let mut app = App::new();

    // Add minimal plugins needed for testing
    app.add_plugins((
        MinimalPlugins,
        bevy::asset::AssetPlugin::default(),
        bevy::input::InputPlugin,
        bevy::state::app::StatesPlugin,
        bevy::transform::TransformPlugin,
    ));

    // Text nodes reference font handles
    app.init_asset::<bevy::text::Font>();

    app
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_test_app() {
        let app = create_test_app();
        assert!(app.world().contains_resource::<Time>());
        assert!(app.world().contains_resource::<ButtonInput<KeyCode>>());
    }
}
