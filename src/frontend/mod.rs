//! macroquad shell: polls input, dispatches it to the editor and draws

mod actions;
mod input;
mod render;

pub use actions::*;
pub use input::*;
pub use render::*;

use macroquad::prelude::*;

use crate::editor::{Editor, EditorState, Effect};
use crate::io::{FilePrompt, ImageStore};

/// Resize the window to fit the canvas plus the palette panel
fn fit_window(state: &EditorState) {
    let (w, h) = state.preferred_window_size();
    request_new_screen_size(w as f32, h as f32);
}

/// Run the editor until quit is requested
pub async fn run(mut editor: Editor, store: &dyn ImageStore, prompt: &dyn FilePrompt) {
    let registry = ActionRegistry::with_defaults();
    let help = registry.help_line();
    let mut renderer = Renderer::new();
    let mut previous = MouseState::capture();

    fit_window(editor.state());

    loop {
        let mouse = MouseState::capture();
        for event in mouse.events(&previous) {
            editor.pointer(event);
        }
        previous = mouse;

        let ctx = ActionContext::from_state(editor.state());
        for action in registry.process_triggers(&ctx) {
            let effect = editor.run_action(action, store, prompt);
            if matches!(effect, Effect::OpenedBase { .. } | Effect::AddedSheets { .. }) {
                fit_window(editor.state());
            }
        }
        if editor.quit_requested() {
            log::info!("quit");
            break;
        }

        editor.tick(get_frame_time());
        renderer.draw(editor.state(), &help);
        next_frame().await;
    }
}
