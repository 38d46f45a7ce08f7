//! Hover tracking of stars under the cursor
//!
//! Hit testing is done by Bevy's mesh picking backend; this module only turns the pointer
//! `Over`/`Out` messages for `Star` entities into the `HoveredStar` resource.

use bevy::picking::events::{Out, Over, Pointer};
use bevy::prelude::*;

use crate::ui::state::HoveredStar;
use crate::visualization::Star;

/// Apply pointer enter/leave messages for stars.
///
/// Leaving the hovered star (or the window) clears the selection, entering a star selects it.
/// Messages for other entities such as UI nodes are ignored.
pub fn update_hovered_star(
    mut over_events: MessageReader<Pointer<Over>>,
    mut out_events: MessageReader<Pointer<Out>>,
    stars: Query<&Star>,
    mut hovered: ResMut<HoveredStar>,
) {
    for ev in out_events.read() {
        if let Ok(star) = stars.get(ev.entity)
            && hovered.0 == Some(star.index)
        {
            hovered.0 = None;
        }
    }
    for ev in over_events.read() {
        if let Ok(star) = stars.get(ev.entity) {
            debug!("[HOVER] star {}", star.index);
            hovered.0 = Some(star.index);
        }
    }
}

/// The scene is about to be rebuilt; stale indices must not survive.
pub fn reset_hover(mut hovered: ResMut<HoveredStar>) {
    hovered.0 = None;
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::camera::RenderTarget;
    use bevy::picking::backend::HitData;
    use bevy::picking::pointer::{Location, PointerId};

    fn pointer<E: std::fmt::Debug + Clone + Reflect>(entity: Entity, event: E) -> Pointer<E> {
        let target = RenderTarget::default()
            .normalize(Some(Entity::PLACEHOLDER))
            .expect("primary window target");
        Pointer {
            entity,
            pointer_id: PointerId::Mouse,
            pointer_location: Location {
                target,
                position: Vec2::ZERO,
            },
            event,
        }
    }

    fn hit() -> HitData {
        HitData::new(Entity::PLACEHOLDER, 1.0, None, None)
    }

    fn hover_app() -> (App, Entity, Entity) {
        let mut app = App::new();
        app.add_message::<Pointer<Over>>()
            .add_message::<Pointer<Out>>()
            .init_resource::<HoveredStar>()
            .add_systems(Update, update_hovered_star);
        let first = app.world_mut().spawn(Star { index: 0, radius: 1.0 }).id();
        let second = app.world_mut().spawn(Star { index: 7, radius: 1.0 }).id();
        (app, first, second)
    }

    #[test]
    fn test_pointer_over_selects_and_out_clears() {
        let (mut app, _, star) = hover_app();

        app.world_mut()
            .write_message(pointer(star, Over { hit: hit() }));
        app.update();
        assert_eq!(app.world().resource::<HoveredStar>().0, Some(7));

        // Pointer moves off the star into empty space
        app.world_mut()
            .write_message(pointer(star, Out { hit: hit() }));
        app.update();
        assert_eq!(app.world().resource::<HoveredStar>().0, None);
    }

    #[test]
    fn test_moving_between_stars_keeps_new_selection() {
        let (mut app, first, second) = hover_app();
        app.world_mut()
            .write_message(pointer(first, Over { hit: hit() }));
        app.update();

        app.world_mut()
            .write_message(pointer(first, Out { hit: hit() }));
        app.world_mut()
            .write_message(pointer(second, Over { hit: hit() }));
        app.update();
        assert_eq!(app.world().resource::<HoveredStar>().0, Some(7));

        // A stale leave for the first star must not clear the second
        app.world_mut()
            .write_message(pointer(first, Out { hit: hit() }));
        app.update();
        assert_eq!(app.world().resource::<HoveredStar>().0, Some(7));
    }

    #[test]
    fn test_non_star_entities_ignored() {
        let (mut app, _, _) = hover_app();
        let other = app.world_mut().spawn_empty().id();
        app.world_mut()
            .write_message(pointer(other, Over { hit: hit() }));
        app.update();
        assert_eq!(app.world().resource::<HoveredStar>().0, None);
    }
}
