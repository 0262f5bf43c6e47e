use crate::engine::loading::progress::LoadingProgress;
use bevy::prelude::*;

#[cfg(target_arch = "wasm32")]
const STATUS_ELEMENT_ID: &str = "loading-status";

#[derive(Component)]
pub struct StatusText;

#[cfg(not(target_arch = "wasm32"))]
pub fn create_native_overlay(mut commands: Commands) {
    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(0.9, 0.9, 0.9)),
                Node {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(12.0),
                    left: Val::Px(12.0),
                    ..default()
                },
                StatusText,
            ));
        });
}

/// Show the loading status until both assets are ready, then hide it.
/// Failures stay on screen.
pub fn update_status_overlay(
    progress: Res<LoadingProgress>,
    #[cfg(not(target_arch = "wasm32"))] mut query: Query<
        (&mut Text, &mut Visibility),
        With<StatusText>,
    >,
) {
    if !progress.is_changed() {
        return;
    }
    let status = progress.status_line();

    #[cfg(not(target_arch = "wasm32"))]
    {
        for (mut text, mut visibility) in &mut query {
            match &status {
                Some(line) => {
                    text.0 = line.clone();
                    *visibility = Visibility::Inherited;
                }
                None => *visibility = Visibility::Hidden,
            }
        }
    }

    #[cfg(target_arch = "wasm32")]
    {
        write_dom_status(status.as_deref());
    }
}

#[cfg(target_arch = "wasm32")]
fn write_dom_status(status: Option<&str>) {
    let Some(element) = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(STATUS_ELEMENT_ID))
    else {
        return;
    };

    let result = match status {
        Some(line) => {
            element.set_text_content(Some(line));
            element.remove_attribute("hidden")
        }
        None => element.set_attribute("hidden", ""),
    };
    if let Err(e) = result {
        warn!("Failed to update status element: {:?}", e);
    }
}
