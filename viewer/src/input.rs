use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use raycast::scene::{Direction, SceneState, INTENSITY_STEP};

/// What a key press or mouse event asks the viewer to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    Quit,
    Nudge(Direction),
    Brighter,
    Dimmer,
    ToggleReflections,
    ToggleFollow,
    Pointer((i32, i32)),
    Click((i32, i32)),
}

pub fn parse_event(event: Event) -> Action {
    match event {
        Event::Key(key) => parse_key_event(key),
        Event::Mouse(mouse) => parse_mouse_event(mouse),
        _ => Action::None,
    }
}

pub fn parse_key_event(event: KeyEvent) -> Action {
    if event.kind == KeyEventKind::Release {
        return Action::None;
    }

    match event.code {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char('w') | KeyCode::Up => Action::Nudge(Direction::Up),
        KeyCode::Char('s') | KeyCode::Down => Action::Nudge(Direction::Down),
        KeyCode::Char('a') | KeyCode::Left => Action::Nudge(Direction::Left),
        KeyCode::Char('d') | KeyCode::Right => Action::Nudge(Direction::Right),
        KeyCode::Char('+') | KeyCode::Char('=') => Action::Brighter,
        KeyCode::Char('-') => Action::Dimmer,
        KeyCode::Char('r') => Action::ToggleReflections,
        KeyCode::Char('f') => Action::ToggleFollow,
        _ => Action::None,
    }
}

/// Terminal columns and rows map one to one onto grid cells.
pub fn parse_mouse_event(event: MouseEvent) -> Action {
    let cell = (event.column as i32, event.row as i32);
    match event.kind {
        MouseEventKind::Moved | MouseEventKind::Drag(_) => Action::Pointer(cell),
        MouseEventKind::Down(MouseButton::Left) => Action::Click(cell),
        _ => Action::None,
    }
}

/// Apply an action to the scene. Returns `false` once the viewer should stop.
pub fn apply(action: Action, scene: &mut SceneState) -> bool {
    match action {
        Action::None => {}
        Action::Quit => return false,
        Action::Nudge(direction) => scene.nudge_light(direction),
        Action::Brighter => scene.adjust_intensity(INTENSITY_STEP),
        Action::Dimmer => scene.adjust_intensity(-INTENSITY_STEP),
        Action::ToggleReflections => scene.toggle_reflections(),
        Action::ToggleFollow => scene.toggle_follow(),
        Action::Pointer(cell) => {
            scene.pointer_moved(cell);
        }
        Action::Click(cell) => scene.click(cell),
    }
    true
}
