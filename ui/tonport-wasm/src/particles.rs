//! Drifting particle field behind the card. Pure geometry; drawing lives in
//! `background`.

use rand::Rng;

pub const PARTICLE_COUNT: usize = 60;
/// Particles closer than this are joined by a faint line.
pub const LINK_DISTANCE: f64 = 140.0;
const LINK_MAX_ALPHA: f64 = 0.06;
const MAX_SPEED: f64 = 0.2;

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub radius: f64,
    pub opacity: f64,
    pub hue: u16,
}

impl Particle {
    pub fn random(rng: &mut impl Rng, width: f64, height: f64) -> Self {
        Self {
            x: rng.r#gen::<f64>() * width,
            y: rng.r#gen::<f64>() * height,
            vx: rng.gen_range(-MAX_SPEED..MAX_SPEED),
            vy: rng.gen_range(-MAX_SPEED..MAX_SPEED),
            radius: rng.gen_range(0.5..2.5),
            opacity: rng.gen_range(0.1..0.6),
            hue: if rng.gen_bool(0.3) { 195 } else { 200 },
        }
    }

    /// `hsla(..)` fill for this particle.
    pub fn fill_style(&self) -> String {
        format!("hsla({}, 90%, 65%, {})", self.hue, self.opacity)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub from: usize,
    pub to: usize,
    pub alpha: f64,
}

impl Link {
    pub fn stroke_style(&self) -> String {
        format!("rgba(0, 152, 234, {})", self.alpha)
    }
}

pub struct ParticleField {
    particles: Vec<Particle>,
    width: f64,
    height: f64,
}

impl ParticleField {
    pub fn new(rng: &mut impl Rng, width: f64, height: f64, count: usize) -> Self {
        let particles = (0..count)
            .map(|_| Particle::random(rng, width, height))
            .collect();
        Self::from_particles(particles, width, height)
    }

    pub fn from_particles(particles: Vec<Particle>, width: f64, height: f64) -> Self {
        Self {
            particles,
            width,
            height,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Viewport changed. Particles keep their positions; out-of-bounds ones
    /// bounce back on their next step.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    pub fn links(&self) -> Vec<Link> {
        let mut links = Vec::new();
        for (i, a) in self.particles.iter().enumerate() {
            for (j, b) in self.particles.iter().enumerate().skip(i + 1) {
                let dist = (a.x - b.x).hypot(a.y - b.y);
                if dist < LINK_DISTANCE {
                    links.push(Link {
                        from: i,
                        to: j,
                        alpha: LINK_MAX_ALPHA * (1.0 - dist / LINK_DISTANCE),
                    });
                }
            }
        }
        links
    }

    /// Advance one frame, reflecting velocity at the viewport edges.
    pub fn step(&mut self) {
        for p in &mut self.particles {
            p.x += p.vx;
            p.y += p.vy;
            if p.x < 0.0 || p.x > self.width {
                p.vx = -p.vx;
            }
            if p.y < 0.0 || p.y > self.height {
                p.vy = -p.vy;
            }
        }
    }
}
