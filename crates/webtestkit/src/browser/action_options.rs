// Action options for PageHandle methods
//
// Constraint parameters for element interactions: per-call timeout, input
// delay, mouse button and keyboard modifiers. Every options struct has a
// builder and a cheap Default for the common no-options call.

/// Mouse button for click actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MouseButton {
    /// Left mouse button (default)
    #[default]
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button
    Middle,
}

/// Keyboard modifier keys held during an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyboardModifier {
    /// Alt key
    Alt,
    /// Control key
    Control,
    /// Meta key (Command on macOS, Windows key on Windows)
    Meta,
    /// Shift key
    Shift,
}

impl KeyboardModifier {
    /// The MouseEvent init property this key maps to.
    pub(crate) fn event_property(self) -> &'static str {
        match self {
            KeyboardModifier::Alt => "altKey",
            KeyboardModifier::Control => "ctrlKey",
            KeyboardModifier::Meta => "metaKey",
            KeyboardModifier::Shift => "shiftKey",
        }
    }
}

/// States an element can be waited for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementState {
    /// Present in the DOM
    Attached,
    /// Not present in the DOM
    Detached,
    /// Present, with a non-empty bounding box and not `visibility: hidden`
    Visible,
    /// Detached, or present with an empty box or `visibility: hidden`
    Hidden,
}

/// Options for click and double-click actions
///
/// # Example
///
/// ```ignore
/// use webtestkit::browser::{ClickOptions, MouseButton};
///
/// let options = ClickOptions::builder()
///     .button(MouseButton::Right)
///     .delay_ms(50)
///     .build();
/// ```
#[derive(Debug, Clone, Default)]
pub struct ClickOptions {
    /// Mouse button to click with
    pub button: MouseButton,
    /// Time to hold between press and release, in milliseconds
    pub delay_ms: Option<u64>,
    /// Modifier keys held during the click
    pub modifiers: Vec<KeyboardModifier>,
    /// Per-call deadline override, in milliseconds
    pub timeout_ms: Option<u64>,
}

impl ClickOptions {
    pub fn builder() -> ClickOptionsBuilder {
        ClickOptionsBuilder::default()
    }
}

#[derive(Debug, Default)]
pub struct ClickOptionsBuilder {
    options: ClickOptions,
}

impl ClickOptionsBuilder {
    pub fn button(mut self, button: MouseButton) -> Self {
        self.options.button = button;
        self
    }

    pub fn delay_ms(mut self, delay_ms: u64) -> Self {
        self.options.delay_ms = Some(delay_ms);
        self
    }

    pub fn modifiers(mut self, modifiers: Vec<KeyboardModifier>) -> Self {
        self.options.modifiers = modifiers;
        self
    }

    pub fn timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.options.timeout_ms = Some(timeout_ms);
        self
    }

    pub fn build(self) -> ClickOptions {
        self.options
    }
}

/// Options for character-by-character typing
#[derive(Debug, Clone, Default)]
pub struct TypeOptions {
    /// Time to wait between key presses, in milliseconds
    pub delay_ms: Option<u64>,
    /// Per-call deadline override, in milliseconds
    pub timeout_ms: Option<u64>,
}

impl TypeOptions {
    pub fn builder() -> TypeOptionsBuilder {
        TypeOptionsBuilder::default()
    }
}

#[derive(Debug, Default)]
pub struct TypeOptionsBuilder {
    options: TypeOptions,
}

impl TypeOptionsBuilder {
    pub fn delay_ms(mut self, delay_ms: u64) -> Self {
        self.options.delay_ms = Some(delay_ms);
        self
    }

    pub fn timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.options.timeout_ms = Some(timeout_ms);
        self
    }

    pub fn build(self) -> TypeOptions {
        self.options
    }
}

/// Options for pressing a named key (`Enter`, `Tab`, `ArrowDown`, `a`, ...)
#[derive(Debug, Clone, Default)]
pub struct PressOptions {
    /// Time to wait after the press, in milliseconds
    pub delay_ms: Option<u64>,
    /// Per-call deadline override, in milliseconds
    pub timeout_ms: Option<u64>,
}

impl PressOptions {
    pub fn builder() -> PressOptionsBuilder {
        PressOptionsBuilder::default()
    }
}

#[derive(Debug, Default)]
pub struct PressOptionsBuilder {
    options: PressOptions,
}

impl PressOptionsBuilder {
    pub fn delay_ms(mut self, delay_ms: u64) -> Self {
        self.options.delay_ms = Some(delay_ms);
        self
    }

    pub fn timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.options.timeout_ms = Some(timeout_ms);
        self
    }

    pub fn build(self) -> PressOptions {
        self.options
    }
}

/// Options for `wait_for_state`
#[derive(Debug, Clone)]
pub struct WaitOptions {
    /// State to wait for
    pub state: ElementState,
    /// Per-call deadline override, in milliseconds
    pub timeout_ms: Option<u64>,
}

impl WaitOptions {
    /// Waits for the given state with the configured default timeout.
    pub fn state(state: ElementState) -> Self {
        WaitOptions {
            state,
            timeout_ms: None,
        }
    }

    pub fn timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn click_options_builder_sets_every_field() {
        let options = ClickOptions::builder()
            .button(MouseButton::Middle)
            .delay_ms(25)
            .modifiers(vec![KeyboardModifier::Shift, KeyboardModifier::Control])
            .timeout_ms(5_000)
            .build();

        assert_eq!(options.button, MouseButton::Middle);
        assert_eq!(options.delay_ms, Some(25));
        assert_eq!(options.timeout_ms, Some(5_000));
        assert_eq!(options.modifiers.len(), 2);
    }

    #[test]
    fn default_click_is_an_unmodified_left_click() {
        let options = ClickOptions::default();
        assert_eq!(options.button, MouseButton::Left);
        assert!(options.modifiers.is_empty());
    }

    #[test]
    fn modifiers_map_to_mouse_event_properties() {
        assert_eq!(KeyboardModifier::Control.event_property(), "ctrlKey");
        assert_eq!(KeyboardModifier::Shift.event_property(), "shiftKey");
        assert_eq!(KeyboardModifier::Alt.event_property(), "altKey");
        assert_eq!(KeyboardModifier::Meta.event_property(), "metaKey");
    }
}
