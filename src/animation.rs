// file: src/animation.rs
// description: celebratory particle burst generation and display-window scheduling

use crate::config::AnimationConfig;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

/// Fixed palette the tracker frontend has always used for its bursts.
pub const PALETTE: [&str; 5] = ["#FF00FF", "#00FFFF", "#FF3333", "#33FF33", "#FFFF00"];

/// One confetti particle. Immutable once generated; positions are normalized
/// percentages of the viewport, with `y` starting above the visible area.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub id: usize,
    pub x: f64,
    pub y: f64,
    pub rotation: f64,
    pub color: &'static str,
    pub scale: f64,
    pub speed: f64,
}

impl Particle {
    fn generate(id: usize, rng: &mut fastrand::Rng) -> Self {
        Self {
            id,
            x: rng.f64() * 100.0,
            y: -10.0 - rng.f64() * 40.0,
            rotation: rng.f64() * 360.0,
            color: PALETTE[rng.usize(..PALETTE.len())],
            scale: 0.5 + rng.f64() * 0.5,
            speed: 2.0 + rng.f64() * 2.0,
        }
    }
}

/// A full burst of particles, created and discarded as a unit.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleBatch {
    pub particles: Vec<Particle>,
}

impl ParticleBatch {
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

#[derive(Debug)]
struct AnimatorInner {
    batch: Option<ParticleBatch>,
    generation: u64,
    clear_task: Option<JoinHandle<()>>,
    rng: fastrand::Rng,
}

/// Produces one bounded-lifetime particle batch per trigger.
///
/// At most one batch is live at a time: a new trigger replaces the current
/// batch and reschedules the clear. The handle is cheap to clone; all clones
/// observe the same batch.
#[derive(Debug, Clone)]
pub struct ParticleAnimator {
    particle_count: usize,
    display_window: Duration,
    inner: Arc<Mutex<AnimatorInner>>,
}

impl ParticleAnimator {
    pub fn new(config: AnimationConfig) -> Self {
        Self::with_rng(config, fastrand::Rng::new())
    }

    /// Tests inject a seeded source so batch shape is deterministic.
    pub fn with_rng(config: AnimationConfig, rng: fastrand::Rng) -> Self {
        Self {
            particle_count: config.particle_count,
            display_window: config.display_window,
            inner: Arc::new(Mutex::new(AnimatorInner {
                batch: None,
                generation: 0,
                clear_task: None,
                rng,
            })),
        }
    }

    /// Generates a fresh batch, preempting any batch currently displayed, and
    /// schedules its clear after the display window. Must be called from
    /// within a Tokio runtime.
    pub fn trigger(&self) {
        let mut inner = self.inner.lock();
        if let Some(task) = inner.clear_task.take() {
            task.abort();
        }
        inner.generation += 1;
        let generation = inner.generation;
        let particles = (0..self.particle_count)
            .map(|id| Particle::generate(id, &mut inner.rng))
            .collect();
        inner.batch = Some(ParticleBatch { particles });
        debug!(generation, particles = self.particle_count, "Particle burst started");

        let shared = Arc::clone(&self.inner);
        let window = self.display_window;
        inner.clear_task = Some(tokio::spawn(async move {
            tokio::time::sleep(window).await;
            let mut inner = shared.lock();
            // A preempted timer must never wipe the batch that replaced it.
            if inner.generation == generation {
                inner.batch = None;
                inner.clear_task = None;
                debug!(generation, "Particle burst cleared");
            }
        }));
    }

    /// Empties the current batch immediately. Idempotent.
    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        if let Some(task) = inner.clear_task.take() {
            task.abort();
        }
        inner.batch = None;
    }

    /// Current batch, or `None` once the display window has elapsed.
    /// Consumers always see either nothing or a fully formed batch.
    pub fn snapshot(&self) -> Option<ParticleBatch> {
        self.inner.lock().batch.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn animator_with_seed(seed: u64) -> ParticleAnimator {
        ParticleAnimator::with_rng(AnimationConfig::default(), fastrand::Rng::with_seed(seed))
    }

    #[tokio::test(start_paused = true)]
    async fn trigger_produces_full_batch() {
        let animator = animator_with_seed(7);
        animator.trigger();

        let batch = animator.snapshot().expect("batch should be live");
        assert_eq!(batch.len(), 150);
        for (i, particle) in batch.particles.iter().enumerate() {
            assert_eq!(particle.id, i);
            assert!((0.0..100.0).contains(&particle.x));
            assert!((-50.0..=-10.0).contains(&particle.y));
            assert!((0.0..360.0).contains(&particle.rotation));
            assert!((0.5..1.0).contains(&particle.scale));
            assert!((2.0..4.0).contains(&particle.speed));
            assert!(PALETTE.contains(&particle.color));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn same_seed_generates_same_batch() {
        let a = animator_with_seed(42);
        let b = animator_with_seed(42);
        a.trigger();
        b.trigger();
        assert_eq!(a.snapshot(), b.snapshot());
    }

    #[tokio::test(start_paused = true)]
    async fn batch_clears_after_display_window() {
        let animator = animator_with_seed(7);
        animator.trigger();
        assert!(animator.snapshot().is_some());

        tokio::time::sleep(Duration::from_millis(3100)).await;
        assert!(animator.snapshot().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn retrigger_preempts_previous_batch() {
        let animator = animator_with_seed(7);
        animator.trigger();
        let first = animator.snapshot().expect("first batch");

        tokio::time::sleep(Duration::from_secs(2)).await;
        animator.trigger();
        let second = animator.snapshot().expect("second batch");
        assert_ne!(first, second);

        // Four seconds after the first trigger its window has elapsed, but
        // the second batch must survive untouched.
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(animator.snapshot(), Some(second));

        tokio::time::sleep(Duration::from_millis(1100)).await;
        assert!(animator.snapshot().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn clear_is_idempotent() {
        let animator = animator_with_seed(7);
        animator.trigger();
        animator.clear();
        assert!(animator.snapshot().is_none());
        animator.clear();
        assert!(animator.snapshot().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn clear_before_window_prevents_scheduled_wipe() {
        let animator = animator_with_seed(7);
        animator.trigger();
        animator.clear();
        animator.trigger();

        // The first batch's timer was cancelled by clear(); only the second
        // batch's own window applies.
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(animator.snapshot().is_some());
        tokio::time::sleep(Duration::from_millis(1100)).await;
        assert!(animator.snapshot().is_none());
    }
}
