use std::io;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, Condvar, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use bevy::prelude::*;

#[cfg(feature = "debug")]
use crate::debug::logging::StatsLogger;

use super::world::{BallWorld, ControlCommand, Frame};

pub fn tick_interval(update_rate: u32) -> Duration {
    Duration::from_secs_f64(1.0 / f64::from(update_rate.max(1)))
}

/// Single-frame mailbox between the timing thread and the renderer.
///
/// Publishing overwrites whatever the renderer has not read yet, so the
/// newest state always wins and the timing thread never blocks on a slow
/// reader.
#[derive(Default)]
struct FrameSlot {
    latest: Mutex<Option<Frame>>,
    ready: Condvar,
}

impl FrameSlot {
    fn publish(&self, frame: Frame) {
        match self.latest.lock() {
            Ok(mut slot) => {
                if let Some(stale) = slot.replace(frame) {
                    trace!("renderer skipped frame {}", stale.steps);
                }
                self.ready.notify_all();
            }
            Err(_) => warn!("frame slot poisoned; dropping frame {}", frame.steps),
        }
    }

    fn take(&self) -> Option<Frame> {
        self.latest.lock().ok()?.take()
    }

    fn wait(&self, timeout: Duration) -> Option<Frame> {
        let slot = self.latest.lock().ok()?;
        let (mut slot, _) = self
            .ready
            .wait_timeout_while(slot, timeout, |frame| frame.is_none())
            .ok()?;
        slot.take()
    }
}

/// Owner-side handle to the timing thread.
///
/// The thread owns the [`BallWorld`]; everything else talks to it through
/// [`ControlCommand`]s and reads it back as [`Frame`]s. Dropping the handle
/// stops and joins the thread.
#[derive(Resource)]
pub struct SimulationHandle {
    commands: Sender<ControlCommand>,
    frames: Arc<FrameSlot>,
    thread: Option<JoinHandle<BallWorld>>,
}

impl SimulationHandle {
    pub fn spawn(world: BallWorld, update_rate: u32) -> io::Result<Self> {
        Self::spawn_with_log_interval(world, update_rate, 0.0)
    }

    /// Like [`SimulationHandle::spawn`], also logging a stats line every
    /// `log_interval` seconds (0 disables).
    pub fn spawn_with_log_interval(
        world: BallWorld,
        update_rate: u32,
        log_interval: f32,
    ) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let frames = Arc::new(FrameSlot::default());
        let published = Arc::clone(&frames);
        let interval = tick_interval(update_rate);
        let thread = thread::Builder::new()
            .name("ball-simulation".into())
            .spawn(move || run(world, cmd_rx, &published, interval, log_interval))?;
        info!(update_rate, "simulation thread started");
        Ok(Self {
            commands: cmd_tx,
            frames,
            thread: Some(thread),
        })
    }

    /// Extra sender for another input source.
    pub fn sender(&self) -> Sender<ControlCommand> {
        self.commands.clone()
    }

    /// Queues a command. Returns false once the thread has exited.
    pub fn send(&self, cmd: ControlCommand) -> bool {
        self.commands.send(cmd).is_ok()
    }

    /// Newest frame published since the last read, if any.
    pub fn latest_frame(&self) -> Option<Frame> {
        self.frames.take()
    }

    /// Blocks up to `timeout` for an unread frame.
    pub fn wait_frame(&self, timeout: Duration) -> Option<Frame> {
        self.frames.wait(timeout)
    }

    pub fn is_running(&self) -> bool {
        self.thread.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Asks the thread to stop, joins it and hands back the final world.
    pub fn stop(&mut self) -> Result<BallWorld, String> {
        let Some(thread) = self.thread.take() else {
            return Err("simulation already stopped".into());
        };
        // The thread may already be gone; joining below covers that.
        let _ = self.commands.send(ControlCommand::Stop);
        thread
            .join()
            .map_err(|_| "simulation thread panicked".to_string())
    }
}

impl Drop for SimulationHandle {
    fn drop(&mut self) {
        if self.thread.is_some() {
            if let Err(e) = self.stop() {
                error!("simulation shutdown: {e}");
            }
        }
    }
}

fn run(
    mut world: BallWorld,
    commands: Receiver<ControlCommand>,
    frames: &FrameSlot,
    interval: Duration,
    log_interval: f32,
) -> BallWorld {
    #[cfg(feature = "debug")]
    let mut stats = StatsLogger::new(log_interval);
    #[cfg(not(feature = "debug"))]
    let _ = log_interval;

    frames.publish(world.frame());
    let mut next_tick = Instant::now() + interval;
    loop {
        let now = Instant::now();
        if now >= next_tick {
            if world.tick() {
                frames.publish(world.frame());
            }
            #[cfg(feature = "debug")]
            stats.maybe_log(&world);
            next_tick += interval;
            if next_tick <= now {
                // Fell behind (suspended or overloaded); skip instead of bursting.
                next_tick = now + interval;
            }
            continue;
        }
        match commands.recv_timeout(next_tick - now) {
            Ok(ControlCommand::Stop) | Err(RecvTimeoutError::Disconnected) => break,
            Ok(cmd) => {
                world.apply(cmd);
                frames.publish(world.frame());
            }
            Err(RecvTimeoutError::Timeout) => {}
        }
    }
    info!(steps = world.steps(), "simulation thread stopped");
    world
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::BallWorldConfig;
    use crate::physics::{Ball, Container};
    use crate::simulation::world::ControlLimits;

    fn world() -> BallWorld {
        let ball = Ball {
            x: 100.0,
            y: 100.0,
            radius: 10.0,
            speed_x: 3.0,
            speed_y: 4.0,
            color: Color::WHITE,
        };
        BallWorld::new(
            ball,
            Container::from_size(200.0, 200.0),
            ControlLimits::from_config(&BallWorldConfig::default()),
        )
    }

    #[test]
    fn interval_for_default_rate() {
        assert_eq!(tick_interval(30).as_millis(), 33);
        assert_eq!(tick_interval(0), Duration::from_secs(1));
    }

    #[test]
    fn runs_until_stopped() {
        let mut sim = SimulationHandle::spawn(world(), 500).expect("spawn");
        let frame = sim.wait_frame(Duration::from_secs(2));
        assert!(frame.is_some());
        thread::sleep(Duration::from_millis(50));
        assert!(sim.is_running());
        let w = sim.stop().expect("join");
        assert!(w.steps() > 0);
        assert!(w.container.contains_circle(w.ball.x, w.ball.y, w.ball.radius));
        assert!(!sim.send(ControlCommand::TogglePause));
        assert!(sim.stop().is_err());
    }

    #[test]
    fn paused_world_never_steps() {
        let mut paused = world();
        paused.paused = true;
        let mut sim = SimulationHandle::spawn(paused, 500).expect("spawn");
        thread::sleep(Duration::from_millis(40));
        let w = sim.stop().expect("join");
        assert_eq!(w.steps(), 0);
        assert_eq!((w.ball.x, w.ball.y), (100.0, 100.0));
    }

    #[test]
    fn commands_apply_in_order_before_stop() {
        let mut paused = world();
        paused.paused = true;
        let mut sim = SimulationHandle::spawn(paused, 30).expect("spawn");
        assert!(sim.send(ControlCommand::SetRadius(25.0)));
        assert!(sim.send(ControlCommand::SetSpeed(10.0)));
        let w = sim.stop().expect("join");
        assert_eq!(w.ball.radius, 25.0);
        assert!((w.ball.speed() - 10.0).abs() < 1e-4);
        assert!(w.paused);
    }

    #[test]
    fn command_publishes_frame_while_paused() {
        let mut paused = world();
        paused.paused = true;
        let sim = SimulationHandle::spawn(paused, 30).expect("spawn");
        let initial = sim.wait_frame(Duration::from_secs(2)).expect("initial frame");
        assert!(initial.paused);
        sim.send(ControlCommand::SetPaused(false));
        let resumed = sim.wait_frame(Duration::from_secs(2)).expect("frame after command");
        assert!(!resumed.paused);
    }

    #[test]
    fn dropping_senders_ends_thread() {
        let (tx, rx) = mpsc::channel();
        let handle = thread::spawn(move || {
            run(world(), rx, &FrameSlot::default(), tick_interval(200), 0.0)
        });
        tx.send(ControlCommand::AdjustRadius(5.0)).unwrap();
        drop(tx);
        let w = handle.join().expect("join");
        assert_eq!(w.ball.radius, 15.0);
    }

    #[test]
    fn unread_frames_are_replaced_by_newest() {
        let mut paused = world();
        paused.paused = true;
        let mut sim = SimulationHandle::spawn(paused, 30).expect("spawn");
        for r in [21.0, 22.0, 23.0, 24.0, 40.0] {
            assert!(sim.send(ControlCommand::SetRadius(r)));
        }
        sim.stop().expect("join");
        let frame = sim.latest_frame().expect("frame");
        assert_eq!(frame.ball.radius, 40.0);
        assert!(sim.latest_frame().is_none());
    }
}
