//! All game entity types — pure data, no logic beyond bounding boxes.

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned box in world units (origin top-left, y grows downward).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Rect { x, y, w, h }
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Strict overlap: boxes that merely share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

// ── Status ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver,
    Victory,
}

impl GameStatus {
    /// GameOver and Victory both freeze the simulation until a restart.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameStatus::Playing)
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BulletOwner {
    Player,
    Alien,
}

impl BulletOwner {
    /// Vertical travel direction: player shots go up, alien shots go down.
    pub fn direction(&self) -> i32 {
        match self {
            BulletOwner::Player => -1,
            BulletOwner::Alien => 1,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub x: i32,
    pub y: i32,
    pub owner: BulletOwner,
}

impl Bullet {
    pub const WIDTH: i32 = 4;
    pub const HEIGHT: i32 = 15;
    pub const SPEED: i32 = 10;

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, Self::WIDTH, Self::HEIGHT)
    }
}

// ── Player & aliens ───────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: i32,
    pub y: i32,
}

impl Player {
    pub const WIDTH: i32 = 50;
    pub const HEIGHT: i32 = 30;
    pub const SPEED: i32 = 7;

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, Self::WIDTH, Self::HEIGHT)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlienKind {
    /// Bottom two rows, 10 pts.
    Bot,
    /// Middle rows, 20 pts.
    Mid,
    /// Top row, 30 pts.
    Top,
}

impl AlienKind {
    /// Kind for a given formation row (row 0 is the top).
    pub fn for_row(row: usize) -> Self {
        match row {
            0 => AlienKind::Top,
            1 | 2 => AlienKind::Mid,
            _ => AlienKind::Bot,
        }
    }

    /// Type index in `0..=2`; selects colour and point value.
    pub fn index(&self) -> usize {
        match self {
            AlienKind::Bot => 0,
            AlienKind::Mid => 1,
            AlienKind::Top => 2,
        }
    }

    pub fn points(&self) -> u32 {
        match self {
            AlienKind::Bot => 10,
            AlienKind::Mid => 20,
            AlienKind::Top => 30,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Alien {
    pub x: i32,
    pub y: i32,
    pub kind: AlienKind,
}

impl Alien {
    pub const WIDTH: i32 = 40;
    pub const HEIGHT: i32 = 30;

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, Self::WIDTH, Self::HEIGHT)
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub player: Player,
    /// Live aliens in row-major formation order.
    pub aliens: Vec<Alien>,
    /// Player and alien bullets currently in flight.
    pub bullets: Vec<Bullet>,
    pub score: u32,
    pub lives: u32,
    pub status: GameStatus,
    /// Frames left before the player may fire again.
    pub shoot_cooldown: u32,
    /// Horizontal formation direction, always -1 or +1.
    pub formation_dir: i32,
    pub formation_speed: i32,
    pub frame: u64,
}
