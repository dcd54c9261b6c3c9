use serde::{Deserialize, Serialize};

use ledgehop_core::geometry::Rect;

/// Enemy footprint (square).
pub const ENEMY_SIZE: f32 = 40.0;
/// Falling platform width.
pub const FALLING_PLATFORM_WIDTH: f32 = 100.0;
/// Falling platform height.
pub const FALLING_PLATFORM_HEIGHT: f32 = 20.0;
/// Coin footprint (square).
pub const COIN_SIZE: f32 = 20.0;
/// Default left bound of an enemy patrol.
pub const PATROL_MIN_X: f32 = 100.0;
/// Default right bound of an enemy patrol.
pub const PATROL_MAX_X: f32 = 700.0;

/// Horizontally patrolling enemy at a fixed height.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub rect: Rect,
    pub speed: f32,
    /// +1 moving right, -1 moving left.
    pub direction: f32,
    pub patrol_min_x: f32,
    pub patrol_max_x: f32,
}

impl Enemy {
    pub fn new(x: f32, y: f32, speed: f32) -> Self {
        Self {
            rect: Rect::new(x, y, ENEMY_SIZE, ENEMY_SIZE),
            speed,
            direction: 1.0,
            patrol_min_x: PATROL_MIN_X,
            patrol_max_x: PATROL_MAX_X,
        }
    }

    /// Move one frame, reversing once the left edge leaves the patrol band.
    pub fn step(&mut self) {
        self.rect.x += self.speed * self.direction;
        if self.rect.x < self.patrol_min_x || self.rect.x > self.patrol_max_x {
            self.direction = -self.direction;
        }
    }
}

/// Platform that drops away once the player touches it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallingPlatform {
    pub rect: Rect,
    /// Never reset once set.
    pub falling: bool,
}

impl FallingPlatform {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            rect: Rect::new(x, y, FALLING_PLATFORM_WIDTH, FALLING_PLATFORM_HEIGHT),
            falling: false,
        }
    }

    /// Returns true the first time only.
    pub fn trigger(&mut self) -> bool {
        let newly = !self.falling;
        self.falling = true;
        newly
    }

    pub fn descend(&mut self, speed: f32) {
        if self.falling {
            self.rect.y += speed;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    pub rect: Rect,
}

impl Coin {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            rect: Rect::new(x, y, COIN_SIZE, COIN_SIZE),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HazardKind {
    Spike,
    Lava,
}

/// Static rectangle that sends the player back to the start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hazard {
    pub rect: Rect,
    pub kind: HazardKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub rect: Rect,
}

/// What touching an entity means for the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    Hazard(HazardKind),
    Enemy,
    Coin,
    Goal,
}

/// Closed set of level entities, dispatched by `match`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Entity {
    Enemy(Enemy),
    FallingPlatform(FallingPlatform),
    Coin(Coin),
    Hazard(Hazard),
    Goal(Goal),
}

impl Entity {
    pub fn rect(&self) -> Rect {
        match self {
            Entity::Enemy(e) => e.rect,
            Entity::FallingPlatform(p) => p.rect,
            Entity::Coin(c) => c.rect,
            Entity::Hazard(h) => h.rect,
            Entity::Goal(g) => g.rect,
        }
    }

    /// Whether the player can stand on this entity.
    pub fn is_solid(&self) -> bool {
        matches!(self, Entity::FallingPlatform(_))
    }

    /// Advance one frame. `landed_on` is true when the player's landing
    /// resolution this frame snapped onto this entity.
    pub fn update(&mut self, player: &Rect, landed_on: bool, fall_speed: f32) {
        match self {
            Entity::Enemy(e) => e.step(),
            Entity::FallingPlatform(p) => {
                if (landed_on || p.rect.intersects(player)) && p.trigger() {
                    tracing::debug!(x = p.rect.x, y = p.rect.y, "Falling platform triggered");
                }
                p.descend(fall_speed);
            },
            Entity::Coin(_) | Entity::Hazard(_) | Entity::Goal(_) => {},
        }
    }

    /// Contact kind if the player overlaps this entity.
    pub fn contact(&self, player: &Rect) -> Option<Contact> {
        if !self.rect().intersects(player) {
            return None;
        }
        match self {
            Entity::Enemy(_) => Some(Contact::Enemy),
            Entity::Coin(_) => Some(Contact::Coin),
            Entity::Hazard(h) => Some(Contact::Hazard(h.kind)),
            Entity::Goal(_) => Some(Contact::Goal),
            Entity::FallingPlatform(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn far_away() -> Rect {
        Rect::new(-1000.0, -1000.0, 40.0, 60.0)
    }

    #[test]
    fn enemy_patrols_and_reverses() {
        let mut enemy = Enemy::new(690.0, 460.0, 4.0);
        enemy.step(); // 694
        enemy.step(); // 698
        assert_eq!(enemy.direction, 1.0);
        enemy.step(); // 702, out of band
        assert_eq!(enemy.rect.x, 702.0);
        assert_eq!(enemy.direction, -1.0);
        enemy.step();
        assert_eq!(enemy.rect.x, 698.0);
        assert_eq!(enemy.direction, -1.0, "back inside the band keeps direction");
    }

    #[test]
    fn enemy_reverses_at_left_bound() {
        let mut enemy = Enemy::new(102.0, 460.0, 3.0);
        enemy.direction = -1.0;
        enemy.step();
        assert_eq!(enemy.rect.x, 99.0);
        assert_eq!(enemy.direction, 1.0);
    }

    #[test]
    fn enemy_stays_within_one_step_of_band() {
        let mut enemy = Enemy::new(400.0, 460.0, 4.0);
        for _ in 0..1000 {
            enemy.step();
            assert!(enemy.rect.x >= PATROL_MIN_X - 4.0);
            assert!(enemy.rect.x <= PATROL_MAX_X + 4.0);
        }
        assert_eq!(enemy.rect.y, 460.0, "enemies never move vertically");
    }

    #[test]
    fn falling_platform_waits_for_touch() {
        let mut entity = Entity::FallingPlatform(FallingPlatform::new(500.0, 350.0));
        for _ in 0..10 {
            entity.update(&far_away(), false, 3.0);
        }
        assert_eq!(entity.rect().y, 350.0);
    }

    #[test]
    fn landing_triggers_fall_and_it_never_stops() {
        let mut entity = Entity::FallingPlatform(FallingPlatform::new(500.0, 350.0));
        entity.update(&far_away(), true, 3.0);
        assert_eq!(entity.rect().y, 353.0, "descends on the trigger frame");
        for _ in 0..100 {
            entity.update(&far_away(), false, 3.0);
        }
        assert_eq!(entity.rect().y, 353.0 + 300.0);
        let Entity::FallingPlatform(p) = &entity else {
            panic!("variant changed");
        };
        assert!(p.falling);
    }

    #[test]
    fn overlap_also_triggers_fall() {
        let mut entity = Entity::FallingPlatform(FallingPlatform::new(500.0, 350.0));
        let player = Rect::new(520.0, 330.0, 40.0, 60.0);
        entity.update(&player, false, 3.0);
        assert_eq!(entity.rect().y, 353.0);
    }

    #[test]
    fn trigger_is_monotonic() {
        let mut p = FallingPlatform::new(0.0, 0.0);
        assert!(p.trigger());
        assert!(!p.trigger());
        assert!(p.falling);
    }

    #[test]
    fn contacts_by_kind() {
        let player = Rect::new(100.0, 100.0, 40.0, 60.0);
        let spot = Rect::new(110.0, 110.0, 20.0, 20.0);

        assert_eq!(
            Entity::Coin(Coin { rect: spot }).contact(&player),
            Some(Contact::Coin)
        );
        assert_eq!(
            Entity::Goal(Goal { rect: spot }).contact(&player),
            Some(Contact::Goal)
        );
        assert_eq!(
            Entity::Hazard(Hazard {
                rect: spot,
                kind: HazardKind::Lava
            })
            .contact(&player),
            Some(Contact::Hazard(HazardKind::Lava))
        );
        let mut enemy = Enemy::new(0.0, 0.0, 1.0);
        enemy.rect = spot;
        assert_eq!(Entity::Enemy(enemy).contact(&player), Some(Contact::Enemy));
        let mut plat = FallingPlatform::new(0.0, 0.0);
        plat.rect = spot;
        assert_eq!(Entity::FallingPlatform(plat).contact(&player), None);
    }

    #[test]
    fn no_contact_without_overlap() {
        let coin = Entity::Coin(Coin::new(500.0, 500.0));
        assert_eq!(coin.contact(&far_away()), None);
    }

    #[test]
    fn only_falling_platforms_are_solid() {
        assert!(Entity::FallingPlatform(FallingPlatform::new(0.0, 0.0)).is_solid());
        assert!(!Entity::Coin(Coin::new(0.0, 0.0)).is_solid());
        assert!(!Entity::Enemy(Enemy::new(0.0, 0.0, 1.0)).is_solid());
    }
}
