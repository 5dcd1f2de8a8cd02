//! Top-level rendering coordinator.
//!
//! Rendering is a two-step process:
//!
//! 1. **View Model Computation**: `AppState` → `UIViewModel`
//! 2. **Component Rendering**: delegate to the layout for the active view

use crate::app::AppState;
use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ScreenBody, UIViewModel};

/// Renders the plugin UI to stdout.
///
/// Prints ANSI-styled output with explicit cursor positioning. Does not clear
/// the screen; Zellij hands the plugin a fresh frame on every render.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);

    render_viewmodel(&viewmodel, &state.theme, rows, cols);
}

fn render_viewmodel(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    match &vm.body {
        ScreenBody::Home(home) => components::render_home_view(vm, home, theme, cols, rows),
        ScreenBody::Search(search) => components::render_search_view(vm, search, theme, cols, rows),
    }
}
