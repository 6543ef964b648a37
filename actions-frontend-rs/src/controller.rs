//! Client-side state for the action item list.
//!
//! Toggle and delete are applied to the local list before the server answers,
//! and undone by re-fetching the whole list if the request fails. Create and
//! edit wait for the server and change nothing when it refuses.
//!
//! All mutation goes through `&mut self`, so one controller never has two
//! requests in flight at once.

use action_utils::{
    ActionItem, Category, CreateItemRequest, ItemId, UpdateItemRequest, display_order,
    pending_count, validate_text,
};

use crate::client::{ClientError, ItemsClient};
use crate::confirmation::ConfirmationPrompt;
use crate::feedback::{Feedback, FeedbackKind, NoFeedback};

pub struct ActionItems<C, F = NoFeedback> {
    client: C,
    feedback: F,
    items: Vec<ActionItem>,
    loading: bool,
    selected: Option<ItemId>,
    delete_candidate: Option<ActionItem>,
    complete_candidate: Option<ActionItem>,
}

impl<C: ItemsClient> ActionItems<C, NoFeedback> {
    pub fn new(client: C) -> Self {
        Self::with_feedback(client, NoFeedback)
    }
}

impl<C: ItemsClient, F: Feedback> ActionItems<C, F> {
    pub fn with_feedback(client: C, feedback: F) -> Self {
        Self {
            client,
            feedback,
            items: Vec::new(),
            loading: true,
            selected: None,
            delete_candidate: None,
            complete_candidate: None,
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Items in the order they were received, not display order.
    pub fn items(&self) -> &[ActionItem] {
        &self.items
    }

    pub fn sorted_items(&self) -> Vec<ActionItem> {
        display_order(&self.items)
    }

    pub fn pending_count(&self) -> usize {
        pending_count(&self.items)
    }

    /// True until the first load finishes, successfully or not.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn get(&self, id: &ItemId) -> Option<&ActionItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    pub fn selected(&self) -> Option<&ActionItem> {
        self.selected.as_ref().and_then(|id| self.get(id))
    }

    pub fn open_detail(&mut self, id: &ItemId) -> Option<&ActionItem> {
        if self.get(id).is_none() {
            return None;
        }
        self.selected = Some(id.clone());
        self.selected()
    }

    pub fn close_detail(&mut self) {
        self.selected = None;
    }

    pub fn delete_candidate(&self) -> Option<&ActionItem> {
        self.delete_candidate.as_ref()
    }

    pub fn complete_candidate(&self) -> Option<&ActionItem> {
        self.complete_candidate.as_ref()
    }

    /// Replaces the local list with the server's. On failure the last list
    /// is kept.
    pub async fn load(&mut self) -> Result<(), ClientError> {
        let result = self.client.list().await;
        self.loading = false;
        match result {
            Ok(items) => {
                self.items = items;
                Ok(())
            }
            Err(e) => {
                log::error!("Error fetching items: {e}");
                Err(e)
            }
        }
    }

    /// Blank text is refused before anything is sent.
    pub async fn create(&mut self, text: &str, category: Category) -> Result<(), ClientError> {
        let text = validate_text(text).map_err(|_| ClientError::EmptyText)?;

        let response = self
            .client
            .create(&CreateItemRequest::new(text, category))
            .await;
        match response {
            Ok(item) => {
                self.feedback.notify(FeedbackKind::CreateSucceeded);
                self.items.insert(0, item);
                Ok(())
            }
            Err(e) => {
                log::error!("Error adding item: {e}");
                self.feedback.notify(FeedbackKind::CreateFailed);
                Err(e)
            }
        }
    }

    /// First half of a toggle. Nothing is sent until [`Self::confirm_toggle`].
    pub fn request_toggle(&mut self, id: &ItemId) -> Option<ConfirmationPrompt> {
        let item = self.get(id)?.clone();
        let prompt = ConfirmationPrompt::toggle(&item);
        self.complete_candidate = Some(item);
        Some(prompt)
    }

    pub fn cancel_toggle(&mut self) {
        self.complete_candidate = None;
    }

    pub async fn confirm_toggle(&mut self) -> Result<(), ClientError> {
        let Some(candidate) = self.complete_candidate.take() else {
            return Ok(());
        };
        let id = candidate.id;
        let completed = !candidate.completed;

        if let Some(item) = self.items.iter_mut().find(|item| item.id == id) {
            item.completed = completed;
        }

        let response = self
            .client
            .update(&id, &UpdateItemRequest::completed(completed))
            .await;
        let result = match response {
            Ok(Some(_)) => Ok(()),
            Ok(None) => Err(ClientError::NotFound(id)),
            Err(e) => Err(e),
        };

        match result {
            Ok(()) => {
                self.feedback.notify(FeedbackKind::ToggleSucceeded);
                Ok(())
            }
            Err(e) => {
                log::error!("Error updating item: {e}");
                self.resync().await;
                Err(e)
            }
        }
    }

    /// Waits for the server; the local item is only replaced by what the
    /// server sends back.
    pub async fn edit(&mut self, id: &ItemId, updates: UpdateItemRequest) -> Result<(), ClientError> {
        let updated = match self.client.update(id, &updates).await {
            Ok(Some(item)) => item,
            Ok(None) => {
                let e = ClientError::NotFound(id.clone());
                log::error!("Error updating item: {e}");
                return Err(e);
            }
            Err(e) => {
                log::error!("Error updating item: {e}");
                return Err(e);
            }
        };

        if let Some(item) = self.items.iter_mut().find(|item| &item.id == id) {
            *item = updated;
        }
        self.selected = None;
        Ok(())
    }

    /// First half of a delete. Nothing is sent until [`Self::confirm_delete`].
    pub fn request_delete(&mut self, id: &ItemId) -> Option<ConfirmationPrompt> {
        let item = self.get(id)?.clone();
        let prompt = ConfirmationPrompt::delete(&item);
        self.delete_candidate = Some(item);
        Some(prompt)
    }

    pub fn cancel_delete(&mut self) {
        self.delete_candidate = None;
    }

    pub async fn confirm_delete(&mut self) -> Result<(), ClientError> {
        let Some(candidate) = self.delete_candidate.take() else {
            return Ok(());
        };
        let id = candidate.id;

        if self.selected.as_ref() == Some(&id) {
            self.selected = None;
        }
        self.items.retain(|item| item.id != id);

        match self.client.delete(&id).await {
            Ok(()) => {
                self.feedback.notify(FeedbackKind::DeleteSucceeded);
                Ok(())
            }
            Err(e) => {
                log::error!("Error deleting item: {e}");
                self.resync().await;
                Err(e)
            }
        }
    }

    // A failed resync is already logged by `load`.
    async fn resync(&mut self) {
        let _ = self.load().await;
    }
}
