use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, PLAN_FIELDS, Screen};

#[derive(Debug, Clone, Copy)]
pub(crate) enum Action {
    None,
    Quit,
    /// Run `service.analyze`(...) for the selected city and current plan
    RunAnalysis,
}

pub(crate) fn handle_key_event(key: KeyEvent, app: &mut App) -> Action {
    use KeyCode::{Char, Down, Enter, Esc, Left, Right, Up};

    // Global quit shortcuts
    if key.code == Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }
    if key.code == Char('q') && key.modifiers.is_empty() {
        return Action::Quit;
    }

    let mut action = Action::None;

    match app.screen {
        Screen::CitySelect => match key.code {
            Up | Char('k') => {
                if app.city_list_index > 0 {
                    app.city_list_index -= 1;
                }
            }
            Down | Char('j') => {
                if app.city_list_index + 1 < app.cities.len() {
                    app.city_list_index += 1;
                }
            }
            Enter | Char(' ') => {
                app.select_current_city();
            }
            _ => {}
        },

        Screen::PlanSetup => match key.code {
            Up | Char('k') => {
                if app.plan_cursor > 0 {
                    app.plan_cursor -= 1;
                }
            }
            Down | Char('j') => {
                if app.plan_cursor + 1 < PLAN_FIELDS.len() {
                    app.plan_cursor += 1;
                }
            }
            Left | Char('h') => {
                app.adjust_current_field(false);
            }
            Right | Char('l') => {
                app.adjust_current_field(true);
            }
            Char(' ') => {
                app.toggle_current_field();
            }
            Enter => {
                action = Action::RunAnalysis;
            }
            Esc => {
                app.screen = Screen::CitySelect;
                app.selected_city = None;
            }
            _ => {}
        },

        Screen::Results => match key.code {
            Left | Esc | Char('b') => {
                app.screen = Screen::PlanSetup;
            }
            Enter | Char('r') => {
                // Re-run with the same plan, e.g. after editing data on disk
                action = Action::RunAnalysis;
            }
            _ => {}
        },
    }
    action
}
