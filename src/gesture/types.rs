use super::timer::TimerToken;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ORIGIN: Self = Self::new(0.0, 0.0);

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn offset_by(self, offset: Offset) -> Self {
        Self::new(self.x + offset.dx, self.y + offset.dy)
    }

    /// Vector from `origin` to `self`.
    pub fn offset_from(self, origin: Point) -> Offset {
        Offset::new(self.x - origin.x, self.y - origin.y)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Offset {
    pub dx: f32,
    pub dy: f32,
}

impl Offset {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    pub const fn new(dx: f32, dy: f32) -> Self {
        Self { dx, dy }
    }

    pub fn length(self) -> f32 {
        self.dx.hypot(self.dy)
    }

    pub fn scale(self, ratio: f32) -> Self {
        Self::new(self.dx * ratio, self.dy * ratio)
    }

    pub fn is_zero(self) -> bool {
        self.dx == 0.0 && self.dy == 0.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerKind {
    Down,
    Move,
    Up,
    Cancel,
}

impl PointerKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Down => "down",
            Self::Move => "move",
            Self::Up => "up",
            Self::Cancel => "cancel",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "down" => Some(Self::Down),
            "move" => Some(Self::Move),
            "up" => Some(Self::Up),
            "cancel" => Some(Self::Cancel),
            _ => None,
        }
    }
}

/// One raw pointer sample in absolute screen coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub x: f32,
    pub y: f32,
    pub t_ms: u64,
}

impl PointerEvent {
    pub const fn new(kind: PointerKind, x: f32, y: f32, t_ms: u64) -> Self {
        Self { kind, x, y, t_ms }
    }

    pub const fn down(x: f32, y: f32, t_ms: u64) -> Self {
        Self::new(PointerKind::Down, x, y, t_ms)
    }

    pub const fn moved(x: f32, y: f32, t_ms: u64) -> Self {
        Self::new(PointerKind::Move, x, y, t_ms)
    }

    pub const fn up(x: f32, y: f32, t_ms: u64) -> Self {
        Self::new(PointerKind::Up, x, y, t_ms)
    }

    pub const fn cancel(x: f32, y: f32, t_ms: u64) -> Self {
        Self::new(PointerKind::Cancel, x, y, t_ms)
    }

    pub const fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Navigation action bound to a joystick direction.
    pub const fn action(self) -> OverlayAction {
        match self {
            Self::Left => OverlayAction::NavigateBack,
            Self::Right => OverlayAction::NavigateRecent,
            Self::Up => OverlayAction::GoHome,
            Self::Down => OverlayAction::OpenNotifications,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OverlayAction {
    OpenMenu,
    NavigateBack,
    NavigateRecent,
    GoHome,
    OpenNotifications,
}

impl OverlayAction {
    pub const ALL: [Self; 5] = [
        Self::OpenMenu,
        Self::NavigateBack,
        Self::NavigateRecent,
        Self::GoHome,
        Self::OpenNotifications,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::OpenMenu => "open_menu",
            Self::NavigateBack => "navigate_back",
            Self::NavigateRecent => "navigate_recent",
            Self::GoHome => "go_home",
            Self::OpenNotifications => "open_notifications",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|action| action.label().eq_ignore_ascii_case(label))
    }
}

/// Which terminal gesture produced an action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionOrigin {
    Click,
    CenteredLongPress,
    Directional(Direction),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BallTransition {
    Immediate,
    Animated { duration_ms: u32 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureEffect {
    /// Drag the whole overlay window.
    MoveOverlayBy(Offset),
    /// Place the ball, already clamped to the joystick radius.
    SetBallPosition(Point),
    SnapBack { position: Point, duration_ms: u32 },
    Vibrate,
    Emit {
        action: OverlayAction,
        origin: ActionOrigin,
    },
    ScheduleLongPress { token: TimerToken, deadline_ms: u64 },
    CancelLongPress { token: TimerToken },
}

impl GestureEffect {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::MoveOverlayBy(_) => "move_by",
            Self::SetBallPosition(_) => "set_position",
            Self::SnapBack { .. } => "snap_back",
            Self::Vibrate => "vibrate",
            Self::Emit { .. } => "emit",
            Self::ScheduleLongPress { .. } => "schedule_long_press",
            Self::CancelLongPress { .. } => "cancel_long_press",
        }
    }
}

const EFFECT_CAPACITY: usize = 4;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct EffectBuffer {
    effects: heapless::Vec<GestureEffect, EFFECT_CAPACITY>,
}

impl EffectBuffer {
    pub const MAX: usize = EFFECT_CAPACITY;

    pub const fn new() -> Self {
        Self {
            effects: heapless::Vec::new(),
        }
    }

    pub fn push(&mut self, effect: GestureEffect) {
        if self.effects.push(effect).is_err() {
            log::warn!("gesture: effect buffer full, dropped={}", effect.label());
        }
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GestureEffect> {
        self.effects.iter()
    }

    pub fn as_slice(&self) -> &[GestureEffect] {
        &self.effects
    }

    pub fn emitted_action(&self) -> Option<(OverlayAction, ActionOrigin)> {
        self.iter().find_map(|effect| match effect {
            GestureEffect::Emit { action, origin } => Some((*action, *origin)),
            _ => None,
        })
    }

    pub fn snap_back_count(&self) -> usize {
        self.iter()
            .filter(|effect| matches!(effect, GestureEffect::SnapBack { .. }))
            .count()
    }
}

impl<'a> IntoIterator for &'a EffectBuffer {
    type Item = &'a GestureEffect;
    type IntoIter = core::slice::Iter<'a, GestureEffect>;

    fn into_iter(self) -> Self::IntoIter {
        self.effects.iter()
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[repr(u8)]
pub enum GestureStateId {
    #[default]
    Idle = 0,
    Pressed = 1,
    Dragging = 2,
    LongPressed = 3,
    LongDragging = 4,
}

impl GestureStateId {
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Pressed => "pressed",
            Self::Dragging => "dragging",
            Self::LongPressed => "long_pressed",
            Self::LongDragging => "long_dragging",
        }
    }
}
