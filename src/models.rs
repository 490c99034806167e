use crate::day::capitalize;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub is_checked: bool,
}

impl Item {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            is_checked: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoList {
    pub name: String,
    #[serde(default)]
    pub items: Vec<Item>,
}

impl TodoList {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            items: Vec::new(),
        }
    }
}

/// On-disk document: standalone items of the default list, plus named lists.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TodoData {
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub lists: Vec<TodoList>,
}

#[derive(Debug, Deserialize)]
pub struct AddItemForm {
    #[serde(rename = "taskInput", default)]
    pub task_input: String,
    #[serde(default)]
    pub list: String,
}

#[derive(Debug, Deserialize)]
pub struct CheckItemForm {
    #[serde(default)]
    pub checkbox: String,
    #[serde(rename = "listName", default)]
    pub list_name: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteItemForm {
    #[serde(default)]
    pub delete: String,
    #[serde(rename = "listName", default)]
    pub list_name: String,
}

/// Everything but RFC 3986 unreserved characters.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Which list a request targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListRef {
    /// Standalone items, titled with today's day name.
    Default,
    Named(String),
}

impl ListRef {
    pub fn resolve(raw: &str, day: &str) -> Self {
        let name = capitalize(raw);
        if name.is_empty() || name == day {
            ListRef::Default
        } else {
            ListRef::Named(name)
        }
    }

    pub fn path(&self) -> String {
        match self {
            ListRef::Default => "/".to_string(),
            ListRef::Named(name) => format!("/{}", utf8_percent_encode(name, SEGMENT)),
        }
    }
}
