use serde::{Deserialize, Serialize};

/// Position as served by `/positions`
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct Position {
    pub id: i64,
    pub position_code: String,
    pub position_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Body for create (POST) and update (PUT)
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct PositionPayload {
    pub position_code: String,
    pub position_name: String,
}

/// Create/update form on the dashboard
#[derive(Clone, PartialEq, Debug, Default)]
pub struct PositionForm {
    pub code: String,
    pub name: String,
    /// Id of the row being edited; `None` means the form creates.
    pub editing: Option<i64>,
}

impl PositionForm {
    pub fn payload(&self) -> PositionPayload {
        PositionPayload {
            position_code: self.code.clone(),
            position_name: self.name.clone(),
        }
    }

    pub fn start_edit(&mut self, position: &Position) {
        self.code = position.position_code.clone();
        self.name = position.position_name.clone();
        self.editing = Some(position.id);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }
}
