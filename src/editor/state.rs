//! Editor state and data

/// Editor state kept across frames (everything that is not the scene)
pub struct EditorState {
    /// Index into the scene's objects
    pub selected: Option<usize>,

    /// Status message (shown in status bar)
    pub status_message: Option<(String, f64)>, // (message, expiry_time)

    /// Show the info overlay
    pub show_hud: bool,

    /// Next color picked for added cubes
    pub palette_index: usize,
}

impl EditorState {
    pub fn new(object_count: usize) -> Self {
        Self {
            selected: if object_count > 0 { Some(0) } else { None },
            status_message: None,
            show_hud: true,
            palette_index: 0,
        }
    }

    /// Set a status message that will be displayed until `now + duration_secs`
    pub fn set_status(&mut self, message: &str, duration_secs: f64, now: f64) {
        self.status_message = Some((message.to_string(), now + duration_secs));
    }

    /// Get current status message if not expired
    pub fn get_status(&self, now: f64) -> Option<&str> {
        if let Some((msg, expiry)) = &self.status_message {
            if now < *expiry {
                return Some(msg);
            }
        }
        None
    }

    /// Keep the selection valid after the object list changed
    pub fn clamp_selection(&mut self, object_count: usize) {
        self.selected = match self.selected {
            _ if object_count == 0 => None,
            Some(i) if i >= object_count => Some(object_count - 1),
            None => Some(0),
            keep => keep,
        };
    }
}
