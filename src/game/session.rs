use log::{debug, info};

use super::config::GameConfig;
use super::error::Result;
use super::flasher::FlashPlan;
use super::level::{START_LEVEL, level_for_score};
use super::panel::{PANEL_COUNT, PanelColor, Panels, check_index};
use super::scheduler::{Scheduler, TaskHandle};
use super::sequence::SequenceSource;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Intro,
    Playing,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PromptKind {
    Success,
    Failure,
}

/// Modal acknowledgment waiting on the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Prompt {
    pub kind: PromptKind,
    pub score: u32,
    pub level: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PressOutcome {
    Ignored,
    Accepted,
    Completed,
    Mistake,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    StateChanged,
    RoundSucceeded { score: u32, level: u32 },
    RoundFailed { score: u32, level: u32 },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionView {
    pub screen: Screen,
    pub panels: [PanelColor; PANEL_COUNT],
    pub score: u32,
    pub level: u32,
    pub flashing: bool,
    pub prompt: Option<Prompt>,
}

#[derive(Debug)]
enum Task {
    Flash { panel: usize, color: PanelColor },
    FlashDone,
    RevertPress { panel: usize },
    RoundWon,
    RoundLost,
}

pub struct Session {
    config: GameConfig,
    source: Box<dyn SequenceSource>,
    scheduler: Scheduler<Task>,
    screen: Screen,
    panels: Panels,
    target: Vec<usize>,
    progress: Vec<usize>,
    score: u32,
    level: u32,
    flashing: bool,
    pending_outcome: Option<PromptKind>,
    prompt: Option<Prompt>,
    feedback: [Option<TaskHandle>; PANEL_COUNT],
    round_id: u64,
    events: Vec<SessionEvent>,
}

impl Session {
    pub fn new(config: GameConfig, source: Box<dyn SequenceSource>) -> Self {
        Session {
            config,
            source,
            scheduler: Scheduler::new(),
            screen: Screen::Intro,
            panels: Panels::default(),
            target: Vec::new(),
            progress: Vec::new(),
            score: 0,
            level: START_LEVEL,
            flashing: false,
            pending_outcome: None,
            prompt: None,
            feedback: [None; PANEL_COUNT],
            round_id: 0,
            events: Vec::new(),
        }
    }

    #[cfg(test)]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            screen: self.screen,
            panels: self.panels.colors(),
            score: self.score,
            level: self.level,
            flashing: self.flashing,
            prompt: self.prompt,
        }
    }

    #[cfg(test)]
    pub fn target(&self) -> &[usize] {
        &self.target
    }

    #[cfg(test)]
    pub fn progress(&self) -> &[usize] {
        &self.progress
    }

    #[cfg(test)]
    pub fn round_id(&self) -> u64 {
        self.round_id
    }

    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    #[cfg(test)]
    pub fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    pub fn next_wakeup(&self) -> Option<u64> {
        self.scheduler.next_due_ms()
    }

    /// Runs every task due at or before `now_ms`, in deadline order.
    pub fn advance_to(&mut self, now_ms: u64) {
        while let Some(task) = self.scheduler.pop_due(now_ms) {
            self.run_task(task);
        }
    }

    pub fn advance_by(&mut self, delta_ms: u64) {
        let until = self.scheduler.now_ms().saturating_add(delta_ms);
        self.advance_to(until);
    }

    pub fn start_game(&mut self) {
        if self.screen == Screen::Playing {
            debug!("start_game ignored: already playing");
            return;
        }
        info!("Game started");
        self.screen = Screen::Playing;
        self.score = 0;
        self.level = START_LEVEL;
        self.start_round();
    }

    /// Plays a fresh sequence. A mistake still waiting on its outcome resets
    /// score and level first.
    pub fn new_round(&mut self) {
        if self.screen != Screen::Playing {
            debug!("new_round ignored on intro screen");
            return;
        }
        if self.pending_outcome == Some(PromptKind::Failure) {
            info!(
                "Round abandoned after a mistake: final score {}, level {}",
                self.score, self.level
            );
            self.score = 0;
            self.level = START_LEVEL;
        }
        self.start_round();
    }

    pub fn restart_to_intro(&mut self) {
        self.cancel_pending();
        self.screen = Screen::Intro;
        self.panels.reset();
        self.target.clear();
        self.progress.clear();
        self.score = 0;
        self.level = START_LEVEL;
        self.flashing = false;
        self.pending_outcome = None;
        self.prompt = None;
        info!("Back to intro");
        self.notify();
    }

    /// Dismisses the pending prompt and plays the next round. Returns false
    /// when no prompt was up.
    pub fn acknowledge(&mut self) -> bool {
        if self.prompt.take().is_none() {
            return false;
        }
        self.start_round();
        true
    }

    pub fn press(&mut self, index: usize) -> Result<PressOutcome> {
        let panel = check_index(index)?;
        if self.screen != Screen::Playing
            || self.flashing
            || self.pending_outcome.is_some()
            || self.prompt.is_some()
            || self.progress.len() >= self.target.len()
        {
            debug!("Press on panel {panel} ignored");
            return Ok(PressOutcome::Ignored);
        }

        self.panels.set(panel, PanelColor::Pressed);
        self.cancel_feedback(panel);
        let revert = self
            .scheduler
            .schedule_after(self.config.press_feedback_ms, Task::RevertPress { panel });
        self.feedback[panel] = Some(revert);

        self.progress.push(panel);
        let position = self.progress.len() - 1;
        let outcome = if self.target[position] != panel {
            self.panels.set(panel, PanelColor::ErrorFlash);
            self.cancel_feedback(panel);
            self.pending_outcome = Some(PromptKind::Failure);
            self.scheduler
                .schedule_after(self.config.outcome_delay_ms, Task::RoundLost);
            debug!(
                "Panel {panel} at step {position} is wrong (expected {})",
                self.target[position]
            );
            PressOutcome::Mistake
        } else if self.progress.len() == self.target.len() {
            self.score = self.score.saturating_add(self.config.points_per_round);
            self.level = level_for_score(self.score);
            self.pending_outcome = Some(PromptKind::Success);
            self.scheduler
                .schedule_after(self.config.outcome_delay_ms, Task::RoundWon);
            debug!("Sequence complete, score now {}", self.score);
            PressOutcome::Completed
        } else {
            debug!("Panel {panel} at step {position} is right");
            PressOutcome::Accepted
        };
        self.notify();
        Ok(outcome)
    }

    fn start_round(&mut self) {
        self.cancel_pending();
        self.round_id = self.round_id.wrapping_add(1);
        self.prompt = None;
        self.pending_outcome = None;
        self.panels.reset();
        self.progress.clear();
        self.target = self.source.next_sequence(self.level);
        debug!("Round {} target: {:?}", self.round_id, self.target);

        let plan = FlashPlan::new(&self.target, self.level, &self.config);
        for step in &plan.steps {
            self.scheduler.schedule_after(
                step.at_ms,
                Task::Flash {
                    panel: step.panel,
                    color: step.color,
                },
            );
        }
        self.flashing = !self.target.is_empty();
        if self.flashing {
            self.scheduler.schedule_after(plan.done_at_ms, Task::FlashDone);
        }
        info!(
            "Round {} at level {}: {} panels, {} ms interval",
            self.round_id,
            self.level,
            self.target.len(),
            plan.interval_ms
        );
        self.notify();
    }

    fn run_task(&mut self, task: Task) {
        match task {
            Task::Flash { panel, color } => {
                self.panels.set(panel, color);
            }
            Task::FlashDone => {
                self.flashing = false;
            }
            Task::RevertPress { panel } => {
                self.feedback[panel] = None;
                if self.panels.get(panel) == PanelColor::Pressed {
                    self.panels.set(panel, PanelColor::Idle);
                }
            }
            Task::RoundWon => {
                self.pending_outcome = None;
                self.progress.clear();
                for &panel in &self.target {
                    self.panels.set(panel, PanelColor::CorrectFlash);
                }
                let prompt = Prompt {
                    kind: PromptKind::Success,
                    score: self.score,
                    level: self.level,
                };
                info!("Round won: score {}, level {}", prompt.score, prompt.level);
                self.prompt = Some(prompt);
                self.events.push(SessionEvent::RoundSucceeded {
                    score: prompt.score,
                    level: prompt.level,
                });
            }
            Task::RoundLost => {
                let prompt = Prompt {
                    kind: PromptKind::Failure,
                    score: self.score,
                    level: self.level,
                };
                for panel in 0..PANEL_COUNT {
                    self.cancel_feedback(panel);
                }
                self.pending_outcome = None;
                self.progress.clear();
                self.panels.reset();
                self.score = 0;
                self.level = START_LEVEL;
                info!("Round lost: final score {}, level {}", prompt.score, prompt.level);
                self.prompt = Some(prompt);
                self.events.push(SessionEvent::RoundFailed {
                    score: prompt.score,
                    level: prompt.level,
                });
            }
        }
        self.notify();
    }

    fn cancel_feedback(&mut self, panel: usize) {
        if let Some(handle) = self.feedback[panel].take() {
            self.scheduler.cancel(handle);
        }
    }

    fn cancel_pending(&mut self) {
        let dropped = self.scheduler.cancel_all();
        self.feedback = [None; PANEL_COUNT];
        if dropped > 0 {
            debug!("Cancelled {dropped} pending task(s)");
        }
    }

    fn notify(&mut self) {
        if self.events.last() != Some(&SessionEvent::StateChanged) {
            self.events.push(SessionEvent::StateChanged);
        }
    }
}
