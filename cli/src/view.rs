//! Text rendering of a `TodosState`.

use std::fmt::Write;

use todo_core::{Todo, TodosState};

pub const FAILURE_BANNER: &str = "Oops... something went wrong";

/// While `error` is set the list is hidden and only the banner and the
/// message are shown.
pub fn render(state: &TodosState) -> String {
    let mut out = String::new();
    if let Some(error) = &state.error {
        let _ = writeln!(out, "{FAILURE_BANNER}");
        let _ = writeln!(out, "  {error}");
        return out;
    }
    if state.todos.is_empty() {
        let _ = writeln!(out, "No todos yet.");
        return out;
    }
    let _ = writeln!(out, "Todos");
    for todo in &state.todos {
        let _ = writeln!(out, "{}", render_item(todo));
    }
    out
}

fn render_item(todo: &Todo) -> String {
    let mark = if todo.completed { 'x' } else { ' ' };
    format!("[{mark}] #{:<4} {}", todo.id, todo.description)
}

#[cfg(test)]
mod tests {
    use todo_core::Outcome;

    use super::*;

    fn todo(id: i64, description: &str, completed: bool) -> Todo {
        Todo {
            id,
            description: description.to_string(),
            completed,
            ..Todo::default()
        }
    }

    #[test]
    fn renders_items_with_completion_marks() {
        let mut state = TodosState::new();
        state.fulfilled(Outcome::Fetched(vec![
            todo(1, "buy milk", false),
            todo(12, "walk dog", true),
        ]));
        let out = render(&state);
        assert_eq!(out, "Todos\n[ ] #1    buy milk\n[x] #12   walk dog\n");
    }

    #[test]
    fn error_hides_the_list() {
        let mut state = TodosState::new();
        state.fulfilled(Outcome::Fetched(vec![todo(1, "buy milk", false)]));
        state.rejected("todo 9 not found");
        let out = render(&state);
        assert!(out.starts_with(FAILURE_BANNER));
        assert!(out.contains("todo 9 not found"));
        assert!(!out.contains("buy milk"));
    }

    #[test]
    fn empty_list_has_placeholder() {
        assert_eq!(render(&TodosState::new()), "No todos yet.\n");
    }
}
