//! Score label, arm buttons and the armed info panel.
//!
//! Which of these exist depends on `GameConfig::arm_mode`: button mode gets
//! a button per palette color (plus one per shape kind when
//! `kind_buttons` is set), click-to-arm mode gets the armed info panel.

use bevy::{
    prelude::*,
    render::{
        render_asset::RenderAssetUsages,
        render_resource::{Extent3d, TextureDimension, TextureFormat},
    },
    utils::HashMap,
};
use itertools::iproduct;
use shape_drop::{
    geometry, ArmMode, ArmTag, ArmedTags, AppState, GameConfig, ShapeKind,
};

use crate::arming::ArmRequest;
use crate::pick::ChosenShape;
use crate::schedule::InGameSet;
use crate::score::{Score, ScoreText};

const TEXT_COLOR: Color = Color::srgb(0.1, 0.1, 0.1);
const KIND_BUTTON_COLOR: Color = Color::srgb(0.35, 0.35, 0.4);
const SWATCH_SIZE: f32 = 40.0;
const SWATCH_PIXELS: u32 = 40;

pub fn plugin(app: &mut App) {
    app.add_systems(
        OnEnter(AppState::InitialGameSetup),
        (build_swatches, spawn_ui),
    )
        .add_systems(Update, arm_button_presses.in_set(InGameSet::Input))
        .add_systems(
            Update,
            (
                highlight_armed_buttons.run_if(resource_changed::<ArmedTags>),
                render_armed_info.run_if(
                    resource_changed::<ChosenShape>
                        .or_else(resource_changed::<Score>),
                ),
            )
                .in_set(InGameSet::Ui),
        );
}

#[derive(Component, Debug, Clone, Copy)]
pub struct ArmButton(pub ArmTag);

#[derive(Component)]
pub struct ArmedInfoText;

#[derive(Component)]
pub struct ArmedSwatch;

/// White silhouette per shape kind, tinted with the picked color.
#[derive(Resource, Debug, Default)]
pub struct SwatchImages(pub HashMap<ShapeKind, Handle<Image>>);

/// RGBA pixels of a `size` x `size` silhouette of `kind`: opaque white
/// inside, transparent outside. Rows run top to bottom.
pub fn swatch_mask(kind: ShapeKind, size: u32) -> Vec<u8> {
    let radius = size as f32 / 2.0;
    let outline = match kind {
        ShapeKind::Star => Some(geometry::star(radius)),
        kind => kind
            .sides()
            .map(|sides| geometry::regular_polygon(sides, radius)),
    };
    iproduct!(0..size, 0..size)
        .flat_map(|(row, col)| {
            let p = Vec2::new(
                col as f32 + 0.5 - radius,
                radius - (row as f32 + 0.5),
            );
            let inside = match (kind, &outline) {
                (ShapeKind::Circle, _) => p.length() <= radius,
                (_, Some(outline)) => geometry::contains_point(outline, p),
                (_, None) => true,
            };
            [255, 255, 255, if inside { 255 } else { 0 }]
        })
        .collect()
}

pub fn build_swatches(mut cmds: Commands, mut images: ResMut<Assets<Image>>) {
    let size = Extent3d {
        width: SWATCH_PIXELS,
        height: SWATCH_PIXELS,
        depth_or_array_layers: 1,
    };
    let handles = ShapeKind::ALL
        .into_iter()
        .map(|kind| {
            let image = Image::new(
                size,
                TextureDimension::D2,
                swatch_mask(kind, SWATCH_PIXELS),
                TextureFormat::Rgba8UnormSrgb,
                RenderAssetUsages::RENDER_WORLD | RenderAssetUsages::MAIN_WORLD,
            );
            (kind, images.add(image))
        })
        .collect();
    cmds.insert_resource(SwatchImages(handles));
}

pub fn armed_info_label(chosen: &ChosenShape) -> String {
    match chosen.0 {
        None => "Current: None".to_string(),
        Some((_, kind)) => format!("Current: {kind}"),
    }
}

fn text(value: impl Into<String>, font_size: f32, color: Color) -> TextBundle {
    TextBundle::from_section(
        value,
        TextStyle {
            font_size,
            color,
            ..default()
        },
    )
}

fn spawn_arm_button(
    parent: &mut ChildBuilder,
    label: String,
    background: Color,
    tag: ArmTag,
) {
    parent
        .spawn(ButtonBundle {
            style: Style {
                padding: UiRect::axes(Val::Px(10.0), Val::Px(6.0)),
                border: UiRect::all(Val::Px(3.0)),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            background_color: background.into(),
            border_color: BorderColor(Color::NONE),
            ..default()
        })
        .insert(ArmButton(tag))
        .with_children(|button| {
            button.spawn(text(label, 18.0, Color::WHITE));
        });
}

pub fn spawn_ui(mut commands: Commands, config: Res<GameConfig>) {
    commands
        .spawn(NodeBundle {
            style: Style {
                position_type: PositionType::Absolute,
                top: Val::Px(12.0),
                left: Val::Px(16.0),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(8.0),
                ..default()
            },
            ..default()
        })
        .insert(Name::new("ui"))
        .with_children(|root| {
            root.spawn(text(Score::default().label(), 28.0, TEXT_COLOR))
                .insert(ScoreText);

            match config.arm_mode {
                ArmMode::Buttons => {
                    root.spawn(NodeBundle {
                        style: Style {
                            flex_direction: FlexDirection::Row,
                            flex_wrap: FlexWrap::Wrap,
                            column_gap: Val::Px(6.0),
                            row_gap: Val::Px(6.0),
                            ..default()
                        },
                        ..default()
                    })
                    .with_children(|buttons| {
                        for color in &config.colors {
                            spawn_arm_button(
                                buttons,
                                color.label(),
                                color.color(),
                                (*color).into(),
                            );
                        }
                        if config.kind_buttons {
                            for kind in &config.shapes {
                                spawn_arm_button(
                                    buttons,
                                    kind.name().to_string(),
                                    KIND_BUTTON_COLOR,
                                    (*kind).into(),
                                );
                            }
                        }
                    });
                }
                ArmMode::ClickToArm => {
                    root.spawn(NodeBundle {
                        style: Style {
                            flex_direction: FlexDirection::Row,
                            align_items: AlignItems::Center,
                            column_gap: Val::Px(8.0),
                            ..default()
                        },
                        ..default()
                    })
                    .with_children(|info| {
                        info.spawn(text(
                            armed_info_label(&ChosenShape::default()),
                            22.0,
                            TEXT_COLOR,
                        ))
                        .insert(ArmedInfoText);
                        info.spawn(ImageBundle {
                            style: Style {
                                width: Val::Px(SWATCH_SIZE),
                                height: Val::Px(SWATCH_SIZE),
                                ..default()
                            },
                            visibility: Visibility::Hidden,
                            ..default()
                        })
                        .insert(ArmedSwatch);
                    });
                }
            }
        });
}

pub fn arm_button_presses(
    buttons: Query<(&Interaction, &ArmButton), Changed<Interaction>>,
    mut requests: EventWriter<ArmRequest>,
) {
    for (interaction, ArmButton(tag)) in buttons.iter() {
        if *interaction == Interaction::Pressed {
            requests.send(ArmRequest::Toggle(*tag));
        }
    }
}

/// Outline armed buttons.
pub fn highlight_armed_buttons(
    armed: Res<ArmedTags>,
    mut buttons: Query<(&ArmButton, &mut BorderColor)>,
) {
    for (ArmButton(tag), mut border) in buttons.iter_mut() {
        border.0 = if armed.contains(*tag) {
            Color::BLACK
        } else {
            Color::NONE
        };
    }
}

pub fn render_armed_info(
    chosen: Res<ChosenShape>,
    swatch_images: Res<SwatchImages>,
    mut texts: Query<&mut Text, With<ArmedInfoText>>,
    mut swatches: Query<(&mut UiImage, &mut Visibility), With<ArmedSwatch>>,
) {
    let label = armed_info_label(&chosen);
    for mut text in texts.iter_mut() {
        if let Some(section) = text.sections.first_mut() {
            section.value.clone_from(&label);
        }
    }
    for (mut image, mut visibility) in swatches.iter_mut() {
        let silhouette = chosen
            .0
            .and_then(|(color, kind)| Some((color, swatch_images.0.get(&kind)?)));
        match silhouette {
            None => *visibility = Visibility::Hidden,
            Some((color, texture)) => {
                image.texture = texture.clone();
                image.color = color.color();
                *visibility = Visibility::Inherited;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shape_drop::ShapeColor;

    #[test]
    fn armed_info_text() {
        assert_eq!(armed_info_label(&ChosenShape(None)), "Current: None");
        assert_eq!(
            armed_info_label(&ChosenShape(Some((
                ShapeColor::Red,
                ShapeKind::Hexagon
            )))),
            "Current: hexagon"
        );
    }

    #[test]
    fn pressed_button_sends_toggle() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_event::<ArmRequest>()
            .add_systems(Update, arm_button_presses);
        let tag = ArmTag::Color(ShapeColor::Green);
        app.world_mut().spawn((Interaction::Pressed, ArmButton(tag)));
        app.world_mut().spawn((
            Interaction::Hovered,
            ArmButton(ArmTag::Color(ShapeColor::Red)),
        ));
        app.update();

        let events = app.world().resource::<Events<ArmRequest>>();
        let sent: Vec<_> = events.iter_current_update_events().copied().collect();
        assert_eq!(sent, vec![ArmRequest::Toggle(tag)]);
    }

    #[test]
    fn armed_buttons_get_outlined() {
        let mut app = App::new();
        let mut armed = ArmedTags::new(3);
        armed.arm(ShapeColor::Blue);
        app.add_plugins(MinimalPlugins)
            .insert_resource(armed)
            .add_systems(Update, highlight_armed_buttons);
        let blue = app
            .world_mut()
            .spawn((ArmButton(ShapeColor::Blue.into()), BorderColor(Color::NONE)))
            .id();
        let red = app
            .world_mut()
            .spawn((ArmButton(ShapeColor::Red.into()), BorderColor(Color::NONE)))
            .id();
        app.update();

        assert_eq!(app.world().get::<BorderColor>(blue).unwrap().0, Color::BLACK);
        assert_eq!(app.world().get::<BorderColor>(red).unwrap().0, Color::NONE);
    }

    fn alpha(mask: &[u8], size: u32, col: u32, row: u32) -> u8 {
        mask[((row * size + col) * 4 + 3) as usize]
    }

    #[test]
    fn swatch_silhouettes_follow_the_kind() {
        let size = 40;
        for kind in ShapeKind::ALL {
            let mask = swatch_mask(kind, size);
            assert_eq!(mask.len(), (size * size * 4) as usize);
            assert_eq!(alpha(&mask, size, 20, 20), 255, "{kind} center");
            let corner = alpha(&mask, size, 0, 0);
            assert_eq!(corner == 255, kind == ShapeKind::Square, "{kind} corner");
        }
        // a triangle pointing up leaves the bottom rows empty
        let triangle = swatch_mask(ShapeKind::Triangle, size);
        assert_eq!(alpha(&triangle, size, 20, 38), 0);
        assert_eq!(alpha(&triangle, size, 20, 2), 255);
        // the star has notches the pentagon doesn't
        let (star, pentagon) = (
            swatch_mask(ShapeKind::Star, size),
            swatch_mask(ShapeKind::Pentagon, size),
        );
        assert_eq!(alpha(&pentagon, size, 12, 10), 255);
        assert_eq!(alpha(&star, size, 12, 10), 0);
    }

    #[test]
    fn armed_info_shows_the_picked_silhouette() {
        let mut app = App::new();
        let triangle = Handle::weak_from_u128(3);
        let swatch_images = SwatchImages(
            [
                (ShapeKind::Circle, Handle::weak_from_u128(1)),
                (ShapeKind::Triangle, triangle.clone()),
            ]
            .into_iter()
            .collect(),
        );
        app.add_plugins(MinimalPlugins)
            .insert_resource(swatch_images)
            .insert_resource(ChosenShape(Some((
                ShapeColor::Amber,
                ShapeKind::Triangle,
            ))))
            .add_systems(Update, render_armed_info);
        let swatch = app
            .world_mut()
            .spawn((ArmedSwatch, UiImage::default(), Visibility::Hidden))
            .id();
        app.update();

        let image = app.world().get::<UiImage>(swatch).unwrap();
        assert_eq!(image.texture, triangle);
        assert_eq!(image.color, ShapeColor::Amber.color());
        assert_eq!(
            *app.world().get::<Visibility>(swatch).unwrap(),
            Visibility::Inherited
        );

        app.world_mut().resource_mut::<ChosenShape>().0 = None;
        app.update();
        assert_eq!(
            *app.world().get::<Visibility>(swatch).unwrap(),
            Visibility::Hidden
        );
    }
}
