//! Form field value objects

use crate::format::{self, Mask};

/// A selectable option of a select field: `(raw value, display label)`.
pub type SelectOption = (&'static str, &'static str);

/// A document attached to a file field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileAttachment {
    /// File name shown in the preview and sent to the backend.
    pub name: String,
    /// Path on disk; read only at submission time.
    pub path: String,
}

impl FileAttachment {
    pub fn from_path(path: &str) -> Self {
        let name = path
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(path)
            .to_string();
        Self {
            name,
            path: path.to_string(),
        }
    }
}

/// Type-safe field values
///
/// For masked text the masked rendition is the stored value, exactly what a
/// browser form would have submitted. Currency is the one kind that keeps a
/// separate canonical value beside its display text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Select(String),
    Toggle(bool),
    Currency { display: String, stored: String },
    Files {
        attachments: Vec<FileAttachment>,
        /// Path being typed, not yet attached.
        input: String,
    },
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

/// A single form field with its configuration and value
#[derive(Debug, Clone)]
pub struct FormField {
    pub name: &'static str,
    pub label: &'static str,
    pub value: FieldValue,
    pub required: bool,
    pub mask: Option<Mask>,
    /// Options of a select field; empty for every other kind.
    pub options: &'static [SelectOption],
    pub is_multiline: bool,
}

impl FormField {
    /// Create a new text field
    pub fn text(name: &'static str, label: &'static str, required: bool) -> Self {
        Self {
            name,
            label,
            value: FieldValue::Text(String::new()),
            required,
            mask: None,
            options: &[],
            is_multiline: false,
        }
    }

    /// Create a new multiline text field
    pub fn multiline(name: &'static str, label: &'static str, required: bool) -> Self {
        Self {
            is_multiline: true,
            ..Self::text(name, label, required)
        }
    }

    /// Create a new masked text field
    pub fn masked(name: &'static str, label: &'static str, required: bool, mask: Mask) -> Self {
        Self {
            mask: Some(mask),
            ..Self::text(name, label, required)
        }
    }

    /// Create a new select field
    pub fn select(
        name: &'static str,
        label: &'static str,
        required: bool,
        options: &'static [SelectOption],
    ) -> Self {
        Self {
            name,
            label,
            value: FieldValue::Select(String::new()),
            required,
            mask: None,
            options,
            is_multiline: false,
        }
    }

    /// Create a new toggle (checkbox) field
    pub fn toggle(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            value: FieldValue::Toggle(false),
            required: false,
            mask: None,
            options: &[],
            is_multiline: false,
        }
    }

    /// Create a new currency field, initialized to a zero amount
    pub fn currency(name: &'static str, label: &'static str, required: bool) -> Self {
        let zero = format::format_currency("");
        Self {
            name,
            label,
            value: FieldValue::Currency {
                display: zero.display,
                stored: zero.stored,
            },
            required,
            mask: None,
            options: &[],
            is_multiline: false,
        }
    }

    /// Create a new file-attachment field
    pub fn files(name: &'static str, label: &'static str, required: bool) -> Self {
        Self {
            name,
            label,
            value: FieldValue::Files {
                attachments: Vec::new(),
                input: String::new(),
            },
            required,
            mask: None,
            options: &[],
            is_multiline: false,
        }
    }

    /// Get the stored value sent to the backend (empty for file fields)
    pub fn stored_value(&self) -> &str {
        match &self.value {
            FieldValue::Text(s) | FieldValue::Select(s) => s,
            FieldValue::Toggle(on) => {
                if *on {
                    "on"
                } else {
                    ""
                }
            }
            FieldValue::Currency { stored, .. } => stored,
            FieldValue::Files { .. } => "",
        }
    }

    /// Whether the field counts as empty for validation purposes
    pub fn is_empty(&self) -> bool {
        match &self.value {
            FieldValue::Text(s) | FieldValue::Select(s) => s.trim().is_empty(),
            FieldValue::Toggle(on) => !on,
            // A zero amount is an unfilled currency field.
            FieldValue::Currency { stored, .. } => stored == "0.00",
            FieldValue::Files { attachments, .. } => attachments.is_empty(),
        }
    }

    /// Push a character to the field value, re-applying any mask
    pub fn push_char(&mut self, c: char) {
        match &mut self.value {
            FieldValue::Text(s) => {
                s.push(c);
                if let Some(mask) = self.mask {
                    *s = format::apply(mask, s);
                }
            }
            FieldValue::Select(_) => self.cycle_option(1),
            FieldValue::Toggle(on) => {
                if c == ' ' {
                    *on = !*on;
                }
            }
            FieldValue::Currency { display, stored } => {
                let next = format::format_currency(&format!("{display}{c}"));
                *display = next.display;
                *stored = next.stored;
            }
            FieldValue::Files { input, .. } => input.push(c),
        }
    }

    /// Remove the last character from the field value
    ///
    /// On a file field with an empty path buffer this detaches the most
    /// recently attached document instead.
    pub fn pop_char(&mut self) {
        match &mut self.value {
            FieldValue::Text(s) => {
                s.pop();
                if let Some(mask) = self.mask {
                    *s = format::apply(mask, s);
                }
            }
            FieldValue::Select(s) => s.clear(),
            FieldValue::Toggle(_) => {}
            FieldValue::Currency { display, stored } => {
                let mut d: String = display.chars().filter(char::is_ascii_digit).collect();
                d.pop();
                let next = format::format_currency(&d);
                *display = next.display;
                *stored = next.stored;
            }
            FieldValue::Files { attachments, input } => {
                if input.pop().is_none() {
                    attachments.pop();
                }
            }
        }
    }

    /// Step a select field forward or backward through its options
    pub fn cycle_option(&mut self, delta: isize) {
        let FieldValue::Select(current) = &mut self.value else {
            return;
        };
        if self.options.is_empty() {
            return;
        }
        let len = self.options.len() as isize;
        let next = match self
            .options
            .iter()
            .position(|(v, _)| *v == current.as_str())
        {
            Some(i) => (i as isize + delta).rem_euclid(len),
            // Unselected: forward lands on the first option, backward on the last.
            None => {
                if delta >= 0 {
                    0
                } else {
                    len - 1
                }
            }
        };
        *current = self.options[next as usize].0.to_string();
    }

    /// Attach the typed path on a file field; no-op when the buffer is empty
    pub fn attach_input(&mut self) {
        if let FieldValue::Files { attachments, input } = &mut self.value {
            let path = input.trim();
            if !path.is_empty() {
                attachments.push(FileAttachment::from_path(path));
                input.clear();
            }
        }
    }

    /// Set the stored text value directly (lookup adapters write through this)
    pub fn set_text(&mut self, value: impl Into<String>) {
        match &mut self.value {
            FieldValue::Text(s) | FieldValue::Select(s) => *s = value.into(),
            _ => {}
        }
    }

    /// Clear the field value
    pub fn clear(&mut self) {
        match &mut self.value {
            FieldValue::Text(s) | FieldValue::Select(s) => s.clear(),
            FieldValue::Toggle(on) => *on = false,
            FieldValue::Currency { display, stored } => {
                let zero = format::format_currency("");
                *display = zero.display;
                *stored = zero.stored;
            }
            FieldValue::Files { attachments, input } => {
                attachments.clear();
                input.clear();
            }
        }
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        match &self.value {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Select(s) => self
                .options
                .iter()
                .copied()
                .find(|(v, _)| *v == s.as_str())
                .map(|(_, label)| label.to_string())
                .unwrap_or_default(),
            FieldValue::Toggle(on) => if *on { "[x]" } else { "[ ]" }.to_string(),
            FieldValue::Currency { display, .. } => display.clone(),
            FieldValue::Files { attachments, input } => {
                let mut parts: Vec<String> =
                    attachments.iter().map(|a| format!("📎 {}", a.name)).collect();
                if !input.is_empty() {
                    parts.push(input.clone());
                }
                parts.join("  ")
            }
        }
    }
}
