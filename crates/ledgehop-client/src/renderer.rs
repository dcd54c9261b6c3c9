use macroquad::color::Color as MqColor;
use macroquad::math::vec2;
use macroquad::shapes::draw_rectangle;
use macroquad::text::draw_text;
use macroquad::texture::{DrawTextureParams, Texture2D, draw_texture_ex, load_texture};
use macroquad::window::clear_background;

use ledgehop_core::color::Color;
use ledgehop_core::geometry::Rect;
use ledgehop_core::host::{Canvas, Sprite};

use crate::assets::AssetError;
use crate::settings::AssetPaths;

const FONT_SIZE: f32 = 36.0;

fn to_mq(color: Color) -> MqColor {
    MqColor::from_rgba(color.r, color.g, color.b, 255)
}

async fn load(path: &str) -> Result<Texture2D, AssetError> {
    load_texture(path).await.map_err(|e| AssetError::Texture {
        path: path.to_string(),
        message: e.to_string(),
    })
}

/// Player images.
pub struct SpriteSheet {
    standing: Texture2D,
    jumping: Texture2D,
}

impl SpriteSheet {
    pub async fn load(paths: &AssetPaths) -> Result<Self, AssetError> {
        Ok(Self {
            standing: load(&paths.player_standing).await?,
            jumping: load(&paths.player_jumping).await?,
        })
    }

    fn texture(&self, sprite: Sprite) -> &Texture2D {
        match sprite {
            Sprite::PlayerStanding => &self.standing,
            Sprite::PlayerJumping => &self.jumping,
        }
    }
}

/// Canvas backed by macroquad's immediate-mode drawing.
pub struct MacroquadCanvas<'a> {
    sprites: &'a SpriteSheet,
}

impl<'a> MacroquadCanvas<'a> {
    pub fn new(sprites: &'a SpriteSheet) -> Self {
        Self { sprites }
    }
}

impl Canvas for MacroquadCanvas<'_> {
    fn clear(&mut self, color: Color) {
        clear_background(to_mq(color));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        draw_rectangle(rect.x, rect.y, rect.width, rect.height, to_mq(color));
    }

    fn draw_sprite(&mut self, sprite: Sprite, at: Rect) {
        draw_texture_ex(
            self.sprites.texture(sprite),
            at.x,
            at.y,
            macroquad::color::WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(at.width, at.height)),
                ..Default::default()
            },
        );
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, color: Color) {
        // macroquad positions text by its baseline.
        draw_text(text, x, y + FONT_SIZE * 0.75, FONT_SIZE, to_mq(color));
    }
}
