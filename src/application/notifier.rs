/// The status banner: one message slot and a visibility flag.
///
/// A new message overwrites whatever was shown before; nothing is queued and nothing expires.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notifier {
    text: String,
    visible: bool,
}

impl Notifier {
    /// Creates a hidden, empty banner.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the banner text and makes it visible.
    pub fn show(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.visible = true;
    }

    /// Hides the banner. The last text is kept but no longer shown.
    pub fn clear(&mut self) {
        self.visible = false;
    }

    /// The message currently on screen, if any.
    pub fn current(&self) -> Option<&str> {
        self.visible.then_some(self.text.as_str())
    }
}
