use action_utils::ActionItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Complete,
    Reopen,
    Delete,
}

/// What to ask the user before a toggle or delete goes through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationPrompt {
    pub intent: Intent,
    pub item_text: String,
    pub title: &'static str,
    pub description: String,
    pub confirm_label: &'static str,
    pub cancel_label: &'static str,
}

impl ConfirmationPrompt {
    pub fn toggle(item: &ActionItem) -> Self {
        let text = &item.text;
        if item.completed {
            Self {
                intent: Intent::Reopen,
                item_text: text.clone(),
                title: "Mark as Incomplete?",
                description: format!("Are you sure you want to mark \"{text}\" as incomplete?"),
                confirm_label: "Mark Incomplete",
                cancel_label: "Cancel",
            }
        } else {
            Self {
                intent: Intent::Complete,
                item_text: text.clone(),
                title: "Mark as Complete?",
                description: format!("Are you sure you want to mark \"{text}\" as done?"),
                confirm_label: "Mark Complete",
                cancel_label: "Cancel",
            }
        }
    }

    pub fn delete(item: &ActionItem) -> Self {
        let text = &item.text;
        Self {
            intent: Intent::Delete,
            item_text: text.clone(),
            title: "Delete Action Item",
            description: format!(
                "Are you sure you want to remove \"{text}\"? This action cannot be undone."
            ),
            confirm_label: "Delete",
            cancel_label: "Cancel",
        }
    }

    /// Completion state the item will have if the prompt is confirmed.
    pub fn target_completed(&self) -> Option<bool> {
        match self.intent {
            Intent::Complete => Some(true),
            Intent::Reopen => Some(false),
            Intent::Delete => None,
        }
    }
}
