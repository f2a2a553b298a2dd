// ============================================================================
// POSITIONS STATE - snapshot local de la lista + formulario
// ============================================================================
// Snapshot solo para la vista actual. Cada llamada exitosa se aplica al
// resolverse; no hay reconciliación entre llamadas concurrentes.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;
use crate::models::{Position, PositionForm};

/// Resultado de una llamada exitosa, a aplicar sobre el snapshot
#[derive(Debug, Clone, PartialEq)]
pub enum PositionChange {
    Loaded(Vec<Position>),
    Created(Position),
    Updated(Position),
    Deleted(i64),
}

#[derive(Clone, Default)]
pub struct PositionsState {
    pub items: Rc<RefCell<Vec<Position>>>,
    pub form: Rc<RefCell<PositionForm>>,
    pub loading: Rc<RefCell<bool>>,
    pub error: Rc<RefCell<Option<String>>>,
}

impl PositionsState {
    pub fn get_items(&self) -> Vec<Position> {
        self.items.borrow().clone()
    }

    pub fn get_form(&self) -> PositionForm {
        self.form.borrow().clone()
    }

    pub fn set_form_code(&self, code: String) {
        self.form.borrow_mut().code = code;
    }

    pub fn set_form_name(&self, name: String) {
        self.form.borrow_mut().name = name;
    }

    pub fn start_edit(&self, id: i64) {
        if let Some(position) = self.items.borrow().iter().find(|p| p.id == id) {
            self.form.borrow_mut().start_edit(position);
        }
    }

    pub fn cancel_edit(&self) {
        self.form.borrow_mut().reset();
    }

    pub fn set_loading(&self, loading: bool) {
        *self.loading.borrow_mut() = loading;
    }

    pub fn is_loading(&self) -> bool {
        *self.loading.borrow()
    }

    pub fn set_error(&self, error: Option<String>) {
        *self.error.borrow_mut() = error;
    }

    pub fn get_error(&self) -> Option<String> {
        self.error.borrow().clone()
    }

    pub fn apply(&self, change: PositionChange) {
        match change {
            PositionChange::Loaded(items) => {
                *self.items.borrow_mut() = items;
            }
            PositionChange::Created(position) => {
                self.items.borrow_mut().push(position);
                self.form.borrow_mut().reset();
            }
            PositionChange::Updated(position) => {
                for item in self.items.borrow_mut().iter_mut() {
                    if item.id == position.id {
                        *item = position.clone();
                    }
                }
                self.form.borrow_mut().reset();
            }
            PositionChange::Deleted(id) => {
                self.items.borrow_mut().retain(|p| p.id != id);
            }
        }
        self.set_error(None);
    }

    /// Drop everything (logout)
    pub fn clear(&self) {
        self.items.borrow_mut().clear();
        self.form.borrow_mut().reset();
        self.set_loading(false);
        self.set_error(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(id: i64, code: &str, name: &str) -> Position {
        Position {
            id,
            position_code: code.to_string(),
            position_name: name.to_string(),
            created_at: None,
            updated_at: None,
        }
    }

    fn seeded() -> PositionsState {
        let state = PositionsState::default();
        state.apply(PositionChange::Loaded(vec![
            position(1, "P1", "Engineer"),
            position(2, "P2", "Manager"),
            position(3, "P3", "Analyst"),
        ]));
        state
    }

    #[test]
    fn update_replaces_only_matching_row_and_resets_form() {
        let state = seeded();
        state.start_edit(2);
        assert_eq!(state.get_form().editing, Some(2));
        assert_eq!(state.get_form().code, "P2");

        state.apply(PositionChange::Updated(position(2, "P2", "Director")));

        let items = state.get_items();
        assert_eq!(items.len(), 3);
        assert_eq!(items[1].position_name, "Director");
        assert_eq!(items[0].position_name, "Engineer");
        assert_eq!(state.get_form(), PositionForm::default());
    }

    #[test]
    fn update_for_unknown_id_changes_nothing() {
        let state = seeded();
        let before = state.get_items();
        state.apply(PositionChange::Updated(position(99, "X", "Y")));
        assert_eq!(state.get_items(), before);
    }

    #[test]
    fn delete_removes_only_that_id() {
        let state = seeded();
        state.apply(PositionChange::Deleted(2));
        let ids: Vec<i64> = state.get_items().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn start_edit_ignores_unknown_rows() {
        let state = seeded();
        state.start_edit(42);
        assert!(!state.get_form().is_editing());
    }

    #[test]
    fn successful_change_clears_error() {
        let state = seeded();
        state.set_error(Some("Failed to load positions".to_string()));
        state.apply(PositionChange::Deleted(1));
        assert_eq!(state.get_error(), None);
    }
}
