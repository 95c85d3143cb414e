use bevy::math::Vec2;

pub const SPLATTER_POOL_SIZE: usize = 5;
pub const GROUND_POOL_SIZE: usize = 100;

pub const SPLATTER_FRAME_DURATION: f32 = 0.03;
pub const SPLATTER_FRAME_COUNT: usize = 8;
pub const SPLATTER_LIFETIME: f32 = SPLATTER_FRAME_DURATION * SPLATTER_FRAME_COUNT as f32;
/// Splatters are drawn from the fighter's feet up to roughly head height.
pub const SPLATTER_OFFSET: Vec2 = Vec2::new(2.8, 11.0);

pub const GROUND_POOL_FADE_TIME: f32 = 60.0;
pub const GROUND_POOL_VARIANTS: u8 = 3;

/// A reusable, independently timed visual effect.
pub trait Effect {
    /// (Re)start the effect at `position`, discarding any animation in progress.
    fn activate(&mut self, position: Vec2);
    /// Advance by `dt`. Inactive effects must not change.
    fn update(&mut self, dt: f32);
    fn is_active(&self) -> bool;
    fn position(&self) -> Vec2;
    fn elapsed(&self) -> f32;
}

/// Fixed-capacity ring buffer of effects.
///
/// Activation always writes the slot under the cursor and advances it, even
/// if that slot is still animating. Nothing is allocated after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectPool<E, const N: usize> {
    slots: [E; N],
    next: usize,
}

impl<E: Effect, const N: usize> EffectPool<E, N> {
    pub fn from_fn(make: impl FnMut(usize) -> E) -> Self {
        const { assert!(N > 0, "effect pool needs at least one slot") };
        Self {
            slots: std::array::from_fn(make),
            next: 0,
        }
    }

    /// Activate the slot under the cursor. Returns the index that was written.
    pub fn activate(&mut self, position: Vec2) -> usize {
        let index = self.next;
        self.slots[index].activate(position);
        self.next = (self.next + 1) % N;
        index
    }

    pub fn update(&mut self, dt: f32) {
        for slot in &mut self.slots {
            slot.update(dt);
        }
    }

    /// Slots a renderer should draw.
    pub fn active(&self) -> impl Iterator<Item = &E> {
        self.slots.iter().filter(|e| e.is_active())
    }

    pub fn active_count(&self) -> usize {
        self.active().count()
    }

    pub fn slot(&self, index: usize) -> Option<&E> {
        self.slots.get(index)
    }

    pub fn next_index(&self) -> usize {
        self.next
    }
}

impl<E: Effect + Default, const N: usize> Default for EffectPool<E, N> {
    fn default() -> Self {
        Self::from_fn(|_| E::default())
    }
}

// ── Splatter ────────────────────────────────────────────────────────

/// Short frame animation played at the point of a hit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Splatter {
    active: bool,
    elapsed: f32,
    position: Vec2,
}

impl Splatter {
    /// Animation frame to draw, clamped to the last frame.
    pub fn frame_index(&self) -> usize {
        let frame = (self.elapsed / SPLATTER_FRAME_DURATION) as usize;
        frame.min(SPLATTER_FRAME_COUNT - 1)
    }
}

impl Effect for Splatter {
    fn activate(&mut self, position: Vec2) {
        self.active = true;
        self.elapsed = 0.0;
        self.position = position;
    }

    fn update(&mut self, dt: f32) {
        if !self.active {
            return;
        }
        self.elapsed += dt;
        if self.elapsed >= SPLATTER_LIFETIME {
            self.active = false;
        }
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn position(&self) -> Vec2 {
        self.position
    }

    fn elapsed(&self) -> f32 {
        self.elapsed
    }
}

// ── Ground pool ─────────────────────────────────────────────────────

/// Stain left on the floor that fades out linearly over `GROUND_POOL_FADE_TIME`.
#[derive(Debug, Clone, PartialEq)]
pub struct GroundPool {
    active: bool,
    elapsed: f32,
    position: Vec2,
    alpha: f32,
    variant: u8,
}

impl GroundPool {
    pub fn new(variant: u8) -> Self {
        debug_assert!(variant < GROUND_POOL_VARIANTS);
        Self {
            active: false,
            elapsed: 0.0,
            position: Vec2::ZERO,
            alpha: 1.0,
            variant,
        }
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Which of the `GROUND_POOL_VARIANTS` sprites this slot uses.
    pub fn variant(&self) -> u8 {
        self.variant
    }
}

impl Default for GroundPool {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Effect for GroundPool {
    fn activate(&mut self, position: Vec2) {
        self.active = true;
        self.elapsed = 0.0;
        self.alpha = 1.0;
        self.position = position;
    }

    fn update(&mut self, dt: f32) {
        if !self.active {
            return;
        }
        self.elapsed += dt;
        self.alpha = 1.0 - self.elapsed / GROUND_POOL_FADE_TIME;
        if self.alpha <= 0.0 {
            self.alpha = 0.0;
            self.active = false;
        }
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn position(&self) -> Vec2 {
        self.position
    }

    fn elapsed(&self) -> f32 {
        self.elapsed
    }
}

pub type SplatterPool = EffectPool<Splatter, SPLATTER_POOL_SIZE>;
pub type GroundPools = EffectPool<GroundPool, GROUND_POOL_SIZE>;
