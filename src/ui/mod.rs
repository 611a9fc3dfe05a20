pub mod game_common;
pub mod game_scene;

use mouthflap::{RenderSnapshot, Renderer};
use ratatui::{backend::Backend, Terminal};

/// Draws each snapshot to the terminal.
pub struct TerminalRenderer<B: Backend> {
    terminal: Terminal<B>,
    controls: Vec<(&'static str, &'static str)>,
}

impl<B: Backend> TerminalRenderer<B> {
    pub fn new(terminal: Terminal<B>, controls: Vec<(&'static str, &'static str)>) -> Self {
        Self { terminal, controls }
    }

    #[cfg(test)]
    pub fn terminal_mut(&mut self) -> &mut Terminal<B> {
        &mut self.terminal
    }
}

impl<B: Backend> Renderer for TerminalRenderer<B> {
    fn render(&mut self, snapshot: &RenderSnapshot) -> mouthflap::Result<()> {
        let controls = &self.controls;
        self.terminal.draw(|frame| {
            let area = frame.size();
            game_scene::render_game(frame, area, snapshot, controls);
        })?;
        Ok(())
    }
}

/// Logs each snapshot instead of drawing it.
#[derive(Debug, Default)]
pub struct LogRenderer {
    last_score: u32,
}

impl Renderer for LogRenderer {
    fn render(&mut self, snapshot: &RenderSnapshot) -> mouthflap::Result<()> {
        log::debug!("{}", snapshot.summary());
        if snapshot.score != self.last_score {
            log::info!("Score {} at tick {}", snapshot.score, snapshot.tick);
            self.last_score = snapshot.score;
        }
        Ok(())
    }
}
