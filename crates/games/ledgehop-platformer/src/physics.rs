use serde::{Deserialize, Serialize};

use ledgehop_core::game_trait::{FrameInput, Score};
use ledgehop_core::geometry::Rect;

use crate::config::{FieldConfig, Rules};

/// Downward acceleration added to the vertical velocity every frame.
pub const GRAVITY: f32 = 0.5;
/// Vertical velocity set by a jump (negative is up).
pub const JUMP_STRENGTH: f32 = -10.0;
/// Horizontal move per frame while a direction key is held.
pub const PLAYER_SPEED: f32 = 5.0;
/// Player width for AABB collision.
pub const PLAYER_WIDTH: f32 = 40.0;
/// Player height for AABB collision.
pub const PLAYER_HEIGHT: f32 = 60.0;
/// Descent per frame of a triggered falling platform.
pub const FALLING_PLATFORM_SPEED: f32 = 3.0;

/// Configurable platformer physics parameters, loadable from TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub gravity: f32,
    pub jump_strength: f32,
    pub player_speed: f32,
    pub player_width: f32,
    pub player_height: f32,
    pub falling_platform_speed: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            jump_strength: JUMP_STRENGTH,
            player_speed: PLAYER_SPEED,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            falling_platform_speed: FALLING_PLATFORM_SPEED,
        }
    }
}

/// Which sprite the player shows. Switches on jump and on landing only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pose {
    #[default]
    Standing,
    Jumping,
}

/// State of the player-controlled rectangle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub rect: Rect,
    pub vel_y: f32,
    pub on_ground: bool,
    pub score: Score,
    pub pose: Pose,
}

impl PlayerState {
    pub fn new(x: f32, y: f32, physics: &PhysicsConfig) -> Self {
        Self {
            rect: Rect::new(x, y, physics.player_width, physics.player_height),
            vel_y: 0.0,
            on_ground: false,
            score: 0,
            pose: Pose::Standing,
        }
    }

    /// Put the player back at `(x, y)` at rest. Score is kept.
    pub fn respawn_at(&mut self, x: f32, y: f32) {
        self.rect.move_to(x, y);
        self.vel_y = 0.0;
        self.on_ground = false;
    }
}

/// What happened to the player during one physics step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    pub jumped: bool,
    /// Index into the solids slice of the last surface the player landed on.
    pub landed_on: Option<usize>,
}

/// Instantaneous horizontal movement; no acceleration or friction.
pub fn move_horizontal(player: &mut PlayerState, input: &FrameInput, physics: &PhysicsConfig) {
    player.rect.x += input.move_dir() * physics.player_speed;
}

/// Start a jump if `jump_held` and the player is on the ground. Returns
/// whether a jump started; otherwise the player is untouched.
pub fn try_jump(player: &mut PlayerState, jump_held: bool, physics: &PhysicsConfig) -> bool {
    if !(jump_held && player.on_ground) {
        return false;
    }
    player.vel_y = physics.jump_strength;
    player.on_ground = false;
    player.pose = Pose::Jumping;
    true
}

/// Integrate one frame of gravity. No terminal velocity.
pub fn apply_gravity(player: &mut PlayerState, physics: &PhysicsConfig) {
    player.vel_y += physics.gravity;
    player.rect.y += player.vel_y;
}

/// Snap the player on top of every intersecting solid. With
/// `land_only_when_falling` a solid is only resolved while `vel_y > 0`.
///
/// `on_ground` is re-derived from scratch each call.
pub fn resolve_landing(
    player: &mut PlayerState,
    solids: &[Rect],
    land_only_when_falling: bool,
) -> Option<usize> {
    player.on_ground = false;
    let mut landed_on = None;

    for (idx, solid) in solids.iter().enumerate() {
        if !player.rect.intersects(solid) {
            continue;
        }
        if land_only_when_falling && player.vel_y <= 0.0 {
            continue;
        }
        player.rect.set_bottom(solid.top());
        player.vel_y = 0.0;
        player.on_ground = true;
        player.pose = Pose::Standing;
        landed_on = Some(idx);
    }

    landed_on
}

/// Keep the player's rectangle within `[0, width]` horizontally.
pub fn clamp_to_field(player: &mut PlayerState, width: f32) {
    if player.rect.left() < 0.0 {
        player.rect.set_left(0.0);
    }
    if player.rect.right() > width {
        player.rect.set_right(width);
    }
}

/// Tick the player's physics for one frame.
///
/// Order: horizontal move, jump trigger (using `on_ground` as the previous
/// frame left it), gravity, landing resolution, field clamp.
pub fn tick_player(
    player: &mut PlayerState,
    input: &FrameInput,
    solids: &[Rect],
    physics: &PhysicsConfig,
    rules: &Rules,
    field: &FieldConfig,
) -> StepReport {
    move_horizontal(player, input, physics);
    let jumped = try_jump(player, input.jump, physics);
    apply_gravity(player, physics);
    let landed_on = resolve_landing(player, solids, rules.land_only_when_falling);
    if rules.clamp_to_field {
        clamp_to_field(player, field.width);
    }
    StepReport { jumped, landed_on }
}
