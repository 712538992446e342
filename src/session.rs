//! Session driver
//!
//! Paces the simulation against the wall clock. Two ways to drive it:
//! - [`Session::run`]: owns the loop, fixed-delay ticks until the deadline or
//!   a quit signal (pair with a background reader)
//! - [`Session::step`]: one tick on demand, for hosts that own their event
//!   loop and feed key callbacks on the same thread
//!
//! The deadline is fixed at start. Slow ticks push later ticks back but never
//! push the deadline back.

use std::thread;
use std::time::{Duration, Instant};

use crate::config::SimulationConfig;
use crate::error::SessionError;
use crate::input::InputSource;
use crate::renderer::FrameSink;
use crate::sim::{
    FrameSnapshot, SimRng, SimState, SpawnPolicy, StatisticsAggregate, TickInput, seeded_rng, tick,
};

/// What a finished session reports
#[derive(Debug, Clone)]
pub struct SessionResult {
    pub seed: u64,
    pub ticks: u64,
    pub population: usize,
    pub collected_count: u32,
    pub collected_amount: f64,
    pub stats: StatisticsAggregate,
}

pub struct Session {
    state: SimState,
    rng: SimRng,
    seed: u64,
    duration: Duration,
    tick_interval: Duration,
    started: Option<Instant>,
}

impl Session {
    /// Validate `config` and spawn the population.
    ///
    /// Uses `config.seed` when set, otherwise a fresh random seed.
    pub fn new<P: SpawnPolicy + ?Sized>(
        config: &SimulationConfig,
        spawn: &mut P,
    ) -> Result<Self, SessionError> {
        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = seeded_rng(seed);
        let state = SimState::new(config, spawn, &mut rng)?;
        log::info!(
            "session ready: {}x{} board, {} packets, {} motion, seed {}",
            config.width,
            config.height,
            config.count,
            config.motion.as_str(),
            seed
        );
        Ok(Self {
            state,
            rng,
            seed,
            duration: config.duration(),
            tick_interval: config.tick_interval(),
            started: None,
        })
    }

    pub fn state(&self) -> &SimState {
        &self.state
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Time left before the deadline; the clock starts at the first tick
    pub fn remaining(&self) -> Duration {
        match self.started {
            Some(start) => self.duration.saturating_sub(start.elapsed()),
            None => self.duration,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.started.is_some() && self.remaining().is_zero()
    }

    /// Advance one tick using the current input and return its frame
    pub fn step<I: InputSource + ?Sized>(
        &mut self,
        input: &I,
    ) -> Result<FrameSnapshot, SessionError> {
        self.started.get_or_insert_with(Instant::now);
        let input = TickInput {
            direction: input.current_direction(),
        };
        tick(&mut self.state, &input, &mut self.rng)?;
        Ok(FrameSnapshot::capture(&self.state, self.remaining().as_millis() as u64))
    }

    /// Run fixed-delay ticks until the deadline passes or `input` asks to
    /// quit, presenting every frame to `sink`.
    ///
    /// The tick that observes quit still presents its frame. On exit the
    /// input source is cancelled.
    pub fn run<I, S>(mut self, input: &I, sink: &mut S) -> Result<SessionResult, SessionError>
    where
        I: InputSource + ?Sized,
        S: FrameSink + ?Sized,
    {
        // A host may have stepped already; the clock keeps its first start
        let start = *self.started.get_or_insert_with(Instant::now);
        let deadline = start + self.duration;

        let outcome = self.tick_until(deadline, input, sink);
        input.cancel();
        outcome?;

        log::info!(
            "session over after {} ticks: {} packets, {:.2} total",
            self.state.time_ticks,
            self.state.collected_count,
            self.state.collected_amount
        );
        Ok(self.finish())
    }

    fn tick_until<I, S>(
        &mut self,
        deadline: Instant,
        input: &I,
        sink: &mut S,
    ) -> Result<(), SessionError>
    where
        I: InputSource + ?Sized,
        S: FrameSink + ?Sized,
    {
        loop {
            let quit = input.quit_requested();
            let frame = self.step(input)?;
            if let Err(e) = sink.present(&frame) {
                log::warn!("frame {} not presented: {e}", frame.tick);
            }
            if quit {
                log::info!("quit requested at tick {}", frame.tick);
                return Ok(());
            }

            let now = Instant::now();
            if now >= deadline {
                return Ok(());
            }
            thread::sleep(self.tick_interval.min(deadline - now));
            if Instant::now() >= deadline {
                return Ok(());
            }
        }
    }

    /// Consume the session and hand back its totals
    pub fn finish(self) -> SessionResult {
        SessionResult {
            seed: self.seed,
            ticks: self.state.time_ticks,
            population: self.state.collectibles.len(),
            collected_count: self.state.collected_count,
            collected_amount: self.state.collected_amount,
            stats: self.state.stats,
        }
    }
}

/// Build a session and run it to completion
pub fn run<P, I, S>(
    config: &SimulationConfig,
    spawn: &mut P,
    input: &I,
    sink: &mut S,
) -> Result<SessionResult, SessionError>
where
    P: SpawnPolicy + ?Sized,
    I: InputSource + ?Sized,
    S: FrameSink + ?Sized,
{
    Session::new(config, spawn)?.run(input, sink)
}
