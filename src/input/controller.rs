use crate::synth::note::KeyIndex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Idle,
    Hovering(KeyIndex),
    Pressed(KeyIndex),
}

/// What a pointer event asks the rest of the instrument to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    PlayNote(KeyIndex),
    Release,
    BrightnessOn,
    BrightnessOff,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InputState {
    pub pressed_key: Option<KeyIndex>,
    pub hover_key: Option<KeyIndex>,
    /// Follows `pressed_key`: on exactly while a key is held.
    pub brightness: bool,
}

/// Press/hover state machine fed with pointer events that have already been
/// resolved to keys.
#[derive(Debug, Default)]
pub struct InputController {
    state: InputState,
}

impl InputController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input_state(&self) -> &InputState {
        &self.state
    }

    pub fn state(&self) -> ControllerState {
        match (self.state.pressed_key, self.state.hover_key) {
            (Some(key), _) => ControllerState::Pressed(key),
            (None, Some(key)) => ControllerState::Hovering(key),
            (None, None) => ControllerState::Idle,
        }
    }

    pub fn pressed_key(&self) -> Option<KeyIndex> {
        self.state.pressed_key
    }

    pub fn hover_key(&self) -> Option<KeyIndex> {
        self.state.hover_key
    }

    pub fn brightness_on(&self) -> bool {
        self.state.brightness
    }

    /// Hover follows the pointer. While a key is held, sliding onto another key
    /// plays it; sliding off every key keeps the held note.
    pub fn pointer_move(&mut self, key: Option<KeyIndex>) -> Vec<Effect> {
        self.state.hover_key = key;
        let mut effects = Vec::new();
        if let (Some(key), Some(pressed)) = (key, self.state.pressed_key) {
            if key != pressed {
                self.press(key, &mut effects);
            }
        }
        effects
    }

    pub fn pointer_down(&mut self, key: Option<KeyIndex>) -> Vec<Effect> {
        let mut effects = Vec::new();
        if let Some(key) = key {
            self.state.hover_key = Some(key);
            self.press(key, &mut effects);
        }
        effects
    }

    /// Pointer released anywhere, not only over the keyboard.
    pub fn pointer_up(&mut self) -> Vec<Effect> {
        self.state = InputState::default();
        vec![Effect::Release, Effect::BrightnessOff]
    }

    pub fn pointer_leave(&mut self) -> Vec<Effect> {
        self.state.hover_key = None;
        Vec::new()
    }

    fn press(&mut self, key: KeyIndex, effects: &mut Vec<Effect>) {
        let already_pressed = self.state.pressed_key.is_some();
        self.state.pressed_key = Some(key);
        effects.push(Effect::PlayNote(key));
        if !already_pressed {
            self.state.brightness = true;
            effects.push(Effect::BrightnessOn);
        }
    }
}
