#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use action_utils::{ActionItem, Category, CreateItemRequest, ItemId, UpdateItemRequest};
use actions_frontend_rs::{ClientError, ItemsClient};
use chrono::{DateTime, Duration, TimeZone, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    List,
    Create,
    Update,
    Delete,
}

#[derive(Default)]
struct Server {
    items: Vec<ActionItem>,
    next_id: u32,
    clock: i64,
    calls: Vec<Call>,
    fail: Option<(Call, ClientError)>,
}

/// In-process stand-in for the items API. Clones share the same server, so
/// a test can keep one handle while the controller owns another.
#[derive(Clone, Default)]
pub struct FakeItems {
    server: Rc<RefCell<Server>>,
}

impl FakeItems {
    pub fn new() -> Self {
        Self::default()
    }

    /// Puts an item straight into the server, bypassing the controller.
    pub fn seed(&self, text: &str, category: Category, completed: bool) -> ActionItem {
        let mut server = self.server.borrow_mut();
        let item = server.make_item(text.to_string(), category);
        let item = ActionItem { completed, ..item };
        server.items.push(item.clone());
        item
    }

    pub fn server_items(&self) -> Vec<ActionItem> {
        self.server.borrow().items.clone()
    }

    pub fn server_item(&self, id: &ItemId) -> Option<ActionItem> {
        self.server
            .borrow()
            .items
            .iter()
            .find(|item| &item.id == id)
            .cloned()
    }

    pub fn remove_on_server(&self, id: &ItemId) {
        self.server.borrow_mut().items.retain(|item| &item.id != id);
    }

    /// The next request of this kind fails with `error`; later ones succeed.
    pub fn fail_next(&self, call: Call, error: ClientError) {
        self.server.borrow_mut().fail = Some((call, error));
    }

    pub fn calls(&self) -> Vec<Call> {
        self.server.borrow().calls.clone()
    }

    pub fn count(&self, call: Call) -> usize {
        self.server
            .borrow()
            .calls
            .iter()
            .filter(|c| **c == call)
            .count()
    }

    fn begin(&self, call: Call) -> Result<(), ClientError> {
        let mut server = self.server.borrow_mut();
        server.calls.push(call);
        match server.fail.take() {
            Some((failing, error)) if failing == call => Err(error),
            other => {
                server.fail = other;
                Ok(())
            }
        }
    }
}

impl Server {
    fn make_item(&mut self, text: String, category: Category) -> ActionItem {
        self.next_id += 1;
        self.clock += 1;
        ActionItem {
            id: ItemId(format!("item-{}", self.next_id)),
            text,
            category,
            completed: false,
            created_at: base_time() + Duration::minutes(self.clock),
        }
    }
}

pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap()
}

pub fn network_down() -> ClientError {
    ClientError::Network("connection refused".to_string())
}

impl ItemsClient for FakeItems {
    async fn list(&self) -> Result<Vec<ActionItem>, ClientError> {
        self.begin(Call::List)?;
        let mut items = self.server_items();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items)
    }

    async fn create(&self, request: &CreateItemRequest) -> Result<ActionItem, ClientError> {
        self.begin(Call::Create)?;
        let text = request
            .text
            .clone()
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| ClientError::Validation("text is required".to_string()))?;
        let category = Category::parse_lenient(request.category.as_deref());
        let mut server = self.server.borrow_mut();
        let item = server.make_item(text.trim().to_string(), category);
        server.items.push(item.clone());
        Ok(item)
    }

    async fn update(
        &self,
        id: &ItemId,
        request: &UpdateItemRequest,
    ) -> Result<Option<ActionItem>, ClientError> {
        self.begin(Call::Update)?;
        let mut server = self.server.borrow_mut();
        let Some(item) = server.items.iter_mut().find(|item| &item.id == id) else {
            return Ok(None);
        };
        if let Some(text) = &request.text {
            item.text = text.trim().to_string();
        }
        if let Some(category) = &request.category {
            item.category = category
                .parse()
                .map_err(|e: action_utils::UnknownCategory| ClientError::Validation(e.to_string()))?;
        }
        if let Some(completed) = request.completed {
            item.completed = completed;
        }
        Ok(Some(item.clone()))
    }

    async fn delete(&self, id: &ItemId) -> Result<(), ClientError> {
        self.begin(Call::Delete)?;
        self.remove_on_server(id);
        Ok(())
    }
}
