//! Interactive terminal browser
//!
//! A blocking loop: draw, read one event, apply it to the `Controller`.
//! Everything stateful lives in the controller; this module only owns the
//! terminal, the scroll offset and the threshold prompt.

mod keys;
mod render;
mod terminal;

use std::io;

use crossterm::event::{self, Event, KeyEventKind};

use crate::view::{Action, Controller};

pub use keys::{Command, PromptOutcome, ThresholdPrompt, command_for};
pub use render::{Viewport, draw};
pub use terminal::TerminalSession;

/// Run the browser until the user quits.
///
/// The terminal is restored before this returns, whether it returns `Ok` or `Err`.
pub fn run(controller: &mut Controller) -> io::Result<()> {
    let mut session = TerminalSession::start()?;
    let mut viewport = Viewport::default();
    let mut prompt: Option<ThresholdPrompt> = None;

    while !controller.should_quit() {
        let mut page_size = controller.page_size();
        session
            .terminal()
            .draw(|frame| page_size = draw(frame, controller, &mut viewport, prompt.as_ref()))?;
        if page_size != controller.page_size() {
            controller.apply(Action::Resize { page_size });
        }

        // Resize events need no handling beyond the redraw at the top of the loop
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match prompt.as_mut() {
            Some(editing) => match editing.handle(key) {
                PromptOutcome::Pending => {}
                PromptOutcome::Cancel => prompt = None,
                PromptOutcome::Submit(threshold) => {
                    controller.apply(Action::SetThreshold(threshold));
                    prompt = None;
                }
            },
            None => match command_for(key) {
                Some(Command::Act(action)) => controller.apply(action),
                Some(Command::EditThreshold) => prompt = Some(ThresholdPrompt::default()),
                None => {}
            },
        }
    }

    Ok(())
}
