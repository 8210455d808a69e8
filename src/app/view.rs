use bevy::prelude::*;
use bevy::sprite::MeshMaterial2d;

use crate::core::config::BallWorldConfig;
use crate::simulation::{Frame, SimulationHandle};

/// Newest frame received from the simulation thread.
#[derive(Resource, Debug, Default)]
pub struct FrameView(pub Option<Frame>);

#[derive(Component)]
pub struct ContainerFill;

#[derive(Component)]
pub struct BallVisual;

#[derive(Component)]
pub struct BallInfoText;

/// Screen space (origin top-left, y down, as the physics uses) to Bevy 2D
/// world space (origin at the view center, y up).
pub fn screen_to_world(x: f32, y: f32, view_w: f32, view_h: f32) -> Vec2 {
    Vec2::new(x - view_w * 0.5, view_h * 0.5 - y)
}

pub fn spawn_scene(
    mut commands: Commands,
    cfg: Res<BallWorldConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    commands.spawn(Camera2d);

    let [r, g, b] = cfg.container.fill_color;
    commands.spawn((
        Sprite::from_color(
            Color::srgb(r, g, b),
            Vec2::new(cfg.window.width, cfg.window.height),
        ),
        Transform::from_xyz(0.0, 0.0, 0.0),
        ContainerFill,
    ));

    // Unit circle scaled to the ball radius every frame.
    let circle = meshes.add(Circle::new(1.0));
    let material = materials.add(cfg.ball.color());
    commands.spawn((
        Mesh2d(circle),
        MeshMaterial2d(material),
        Transform::from_xyz(0.0, 0.0, 1.0).with_scale(Vec3::splat(cfg.ball.radius)),
        BallVisual,
    ));

    commands.spawn((
        Text::new("Ball"),
        TextFont {
            font_size: 12.0,
            ..Default::default()
        },
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(18.0),
            left: Val::Px(20.0),
            ..Default::default()
        },
        BallInfoText,
    ));
}

pub fn pull_frames(sim: Option<Res<SimulationHandle>>, mut view: ResMut<FrameView>) {
    let Some(sim) = sim else {
        return;
    };
    if let Some(frame) = sim.latest_frame() {
        view.0 = Some(frame);
    }
}

fn view_size(windows: &Query<&Window>, frame: &Frame) -> (f32, f32) {
    match windows.single() {
        Ok(w) => (w.width(), w.height()),
        Err(_) => (frame.container.max_x, frame.container.max_y),
    }
}

pub fn sync_visuals(
    view: Res<FrameView>,
    windows: Query<&Window>,
    mut ball_q: Query<&mut Transform, (With<BallVisual>, Without<ContainerFill>)>,
    mut fill_q: Query<(&mut Transform, &mut Sprite), (With<ContainerFill>, Without<BallVisual>)>,
) {
    if !view.is_changed() {
        return;
    }
    let Some(frame) = view.0 else {
        return;
    };
    let (vw, vh) = view_size(&windows, &frame);
    if let Ok(mut tf) = ball_q.single_mut() {
        let p = screen_to_world(frame.ball.x, frame.ball.y, vw, vh);
        tf.translation = p.extend(1.0);
        tf.scale = Vec3::splat(frame.ball.radius);
    }
    if let Ok((mut tf, mut sprite)) = fill_q.single_mut() {
        let c = frame.container;
        let (cx, cy) = c.center();
        tf.translation = screen_to_world(cx, cy, vw, vh).extend(0.0);
        sprite.custom_size = Some(Vec2::new(c.width(), c.height()));
    }
}

/// Container outline, drawn every frame.
pub fn draw_container_border(
    view: Res<FrameView>,
    cfg: Res<BallWorldConfig>,
    windows: Query<&Window>,
    mut gizmos: Gizmos,
) {
    let Some(frame) = view.0 else {
        return;
    };
    let (vw, vh) = view_size(&windows, &frame);
    let c = frame.container;
    let (cx, cy) = c.center();
    let [r, g, b] = cfg.container.border_color;
    gizmos.rect_2d(
        Isometry2d::from_translation(screen_to_world(cx, cy, vw, vh)),
        // Inset by one pixel so the outline stays on screen.
        Vec2::new(c.width() - 1.0, c.height() - 1.0),
        Color::srgb(r, g, b),
    );
}

pub fn hud_line(frame: &Frame) -> String {
    let state = if frame.paused { "  [paused]" } else { "" };
    format!("Ball {}{state}", frame.ball)
}

pub fn update_ball_info(view: Res<FrameView>, mut q_text: Query<&mut Text, With<BallInfoText>>) {
    if !view.is_changed() {
        return;
    }
    let Some(frame) = view.0.as_ref() else {
        return;
    };
    if let Ok(mut text) = q_text.single_mut() {
        text.0 = hud_line(frame);
    }
}
