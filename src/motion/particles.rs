//! Ambient particle field drawn behind the page.
//!
//! The simulation works in CSS pixels and advances one fixed step per frame;
//! drawing is left to whoever owns the canvas.

use super::lifecycle::Lifecycle;

/// Particles spawned by a click.
pub const CLICK_BURST: usize = 20;
/// Chance per frame of one ambient particle at an active pointer.
pub const AMBIENT_CHANCE: f64 = 0.2;
/// Squared distance inside which the pointer pushes particles away.
const REPULSION_RADIUS_SQ: f64 = 2500.0;
/// How far outside the viewport a particle may drift before it is dropped.
const BOUNDS_MARGIN: f64 = 50.0;

/// splitmix64; small, seedable and plenty for decoration.
#[derive(Clone, Debug)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in [0, 1).
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub r: f64,
    /// Frames left to live
    pub life: f64,
}

impl Particle {
    pub fn alpha(&self) -> f64 {
        (self.life / 100.0).clamp(0.0, 1.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Forces {
    /// Pull toward the focal point, per pixel of distance
    pub attraction: f64,
    /// Constant downward acceleration
    pub gravity: f64,
    /// Pointer push strength
    pub repulsion: f64,
    /// Velocity kept per frame
    pub damping: f64,
}

impl Default for Forces {
    fn default() -> Self {
        Self {
            attraction: 0.0006,
            gravity: 0.02,
            repulsion: 0.15,
            damping: 0.99,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dot {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub alpha: f64,
}

#[derive(Clone, Debug)]
pub struct ParticleField {
    particles: Vec<Particle>,
    pointer: Option<(f64, f64)>,
    forces: Forces,
    rng: Rng,
    running: bool,
}

impl ParticleField {
    pub fn new(seed: u64) -> Self {
        Self {
            particles: Vec::new(),
            pointer: None,
            forces: Forces::default(),
            rng: Rng::new(seed),
            running: false,
        }
    }

    pub fn with_forces(mut self, forces: Forces) -> Self {
        self.forces = forces;
        self
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn insert(&mut self, particle: Particle) {
        self.particles.push(particle);
    }

    pub fn spawn(&mut self, x: f64, y: f64, n: usize) {
        for _ in 0..n {
            let vx = (self.rng.next_f64() - 0.5) * 2.5;
            let vy = (self.rng.next_f64() - 0.9) * 2.5;
            let r = 1.0 + self.rng.next_f64() * 2.6;
            let life = 40.0 + self.rng.next_f64() * 60.0;
            self.particles.push(Particle {
                x,
                y,
                vx,
                vy,
                r,
                life,
            });
        }
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.pointer = Some((x, y));
    }

    pub fn pointer_leave(&mut self) {
        self.pointer = None;
    }

    pub fn click(&mut self, x: f64, y: f64) {
        self.spawn(x, y, CLICK_BURST);
    }

    /// Advances the simulation by one frame inside a `width` x `height` view.
    pub fn step(&mut self, width: f64, height: f64) {
        if !self.running {
            return;
        }
        if let Some((px, py)) = self.pointer {
            if self.rng.next_f64() < AMBIENT_CHANCE {
                self.spawn(px, py, 1);
            }
        }

        let Forces {
            attraction,
            gravity,
            repulsion,
            damping,
        } = self.forces;
        let (cx, cy) = (width * 0.5, height * 0.4);
        let pointer = self.pointer;

        for p in &mut self.particles {
            p.vx += (cx - p.x) * attraction;
            p.vy += (cy - p.y) * attraction + gravity;

            if let Some((px, py)) = pointer {
                let (dx, dy) = (p.x - px, p.y - py);
                let dist2 = dx * dx + dy * dy;
                if dist2 < REPULSION_RADIUS_SQ {
                    let f = repulsion / dist2.sqrt().max(20.0);
                    p.vx += dx * f;
                    p.vy += dy * f;
                }
            }

            p.x += p.vx;
            p.y += p.vy;
            p.vx *= damping;
            p.vy *= damping;
            p.life -= 1.0;
        }

        self.particles.retain(|p| {
            p.life > 0.0
                && p.y <= height + BOUNDS_MARGIN
                && p.x >= -BOUNDS_MARGIN
                && p.x <= width + BOUNDS_MARGIN
        });
    }

    pub fn draw_list(&self) -> impl Iterator<Item = Dot> + '_ {
        self.particles.iter().map(|p| Dot {
            x: p.x,
            y: p.y,
            radius: p.r,
            alpha: p.alpha(),
        })
    }
}

impl Lifecycle for ParticleField {
    fn start(&mut self) {
        self.running = true;
    }

    fn pause(&mut self) {
        self.running = false;
    }

    fn cancel(&mut self) {
        self.running = false;
        self.pointer = None;
        self.particles.clear();
    }

    fn is_running(&self) -> bool {
        self.running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: f64 = 1280.0;
    const H: f64 = 800.0;

    fn gravity_only() -> Forces {
        Forces {
            attraction: 0.0,
            repulsion: 0.0,
            ..Forces::default()
        }
    }

    #[test]
    fn test_rng_is_deterministic_and_in_range() {
        let mut a = Rng::new(7);
        let mut b = Rng::new(7);
        for _ in 0..1000 {
            let v = a.next_f64();
            assert_eq!(v, b.next_f64());
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn test_particle_dies_within_its_lifetime() {
        let mut field = ParticleField::new(1).with_forces(gravity_only());
        field.start();
        field.insert(Particle {
            x: W / 2.0,
            y: 10.0,
            vx: 0.0,
            vy: 0.0,
            r: 2.0,
            life: 57.3,
        });
        for _ in 0..57 {
            field.step(W, H);
        }
        assert_eq!(field.len(), 1);
        field.step(W, H);
        assert!(field.is_empty());
    }

    #[test]
    fn test_every_spawned_particle_terminates() {
        let mut field = ParticleField::new(42);
        field.start();
        field.spawn(W / 2.0, H / 2.0, 50);
        assert_eq!(field.len(), 50);
        for _ in 0..100 {
            field.step(W, H);
        }
        assert!(field.is_empty());
    }

    #[test]
    fn test_leaving_bounds_removes() {
        let mut field = ParticleField::new(3).with_forces(gravity_only());
        field.start();
        field.insert(Particle {
            x: -49.0,
            y: 100.0,
            vx: -5.0,
            vy: 0.0,
            r: 1.0,
            life: 100.0,
        });
        field.step(W, H);
        assert!(field.is_empty());
    }

    #[test]
    fn test_click_and_ambient_spawning() {
        let mut field = ParticleField::new(9);
        field.start();
        field.click(100.0, 100.0);
        assert_eq!(field.len(), CLICK_BURST);

        let mut field = ParticleField::new(9);
        field.start();
        field.pointer_move(400.0, 300.0);
        let mut frames = 0;
        while field.is_empty() {
            field.step(W, H);
            frames += 1;
            assert!(frames < 1000);
        }
        field.pointer_leave();
        for _ in 0..100 {
            field.step(W, H);
        }
        assert!(field.is_empty());
    }

    #[test]
    fn test_pointer_repels() {
        let particle = Particle {
            x: 110.0,
            y: 100.0,
            vx: 0.0,
            vy: 0.0,
            r: 1.0,
            life: 100.0,
        };
        let mut field = ParticleField::new(5).with_forces(Forces {
            attraction: 0.0,
            gravity: 0.0,
            ..Forces::default()
        });
        field.start();
        field.insert(particle);
        field.pointer = Some((100.0, 100.0));
        field.step(W, H);
        let moved = field
            .particles()
            .iter()
            .find(|p| p.r == 1.0 && p.y == 100.0 && p.life == 99.0)
            .copied();
        assert!(moved.is_some_and(|p| p.x > 110.0));
    }

    #[test]
    fn test_paused_and_cancelled_field_does_nothing() {
        let mut field = ParticleField::new(2);
        field.spawn(10.0, 10.0, 5);
        field.step(W, H);
        assert!(field.particles().iter().all(|p| p.x == 10.0));
        field.start();
        field.cancel();
        assert!(field.is_empty());
        assert!(!field.is_running());
    }

    #[test]
    fn test_draw_list_alpha() {
        let mut field = ParticleField::new(0);
        field.insert(Particle {
            x: 0.0,
            y: 0.0,
            vx: 0.0,
            vy: 0.0,
            r: 1.5,
            life: 150.0,
        });
        field.insert(Particle {
            x: 0.0,
            y: 0.0,
            vx: 0.0,
            vy: 0.0,
            r: 1.5,
            life: 25.0,
        });
        let alphas = field.draw_list().map(|d| d.alpha).collect::<Vec<_>>();
        assert_eq!(alphas, vec![1.0, 0.25]);
    }
}
