//! Drives intents through the client, a transport and the state container.

use crate::client::TodoClient;
use crate::error::ApiError;
use crate::http::Transport;
use crate::state::{Intent, Outcome, TodosState};
use crate::types::{CreateTodo, UpdateDescription};

/// Owns the single `TodosState` of a client session.
///
/// `dispatch` runs one intent to completion: pending, build, execute, parse,
/// then fulfilled or rejected. There is no retry; a toggle in particular is
/// not safe to repeat because the server inverts on every call.
pub struct Dispatcher<T> {
    client: TodoClient,
    transport: T,
    state: TodosState,
}

impl<T: Transport> Dispatcher<T> {
    pub fn new(client: TodoClient, transport: T) -> Self {
        Self {
            client,
            transport,
            state: TodosState::new(),
        }
    }

    pub fn state(&self) -> &TodosState {
        &self.state
    }

    pub fn client(&self) -> &TodoClient {
        &self.client
    }

    /// Returns the error as well as recording it in the state, so callers can
    /// branch on the kind if they need to.
    pub fn dispatch(&mut self, intent: Intent) -> Result<(), ApiError> {
        self.state.pending();
        match self.round_trip(&intent) {
            Ok(outcome) => {
                self.state.fulfilled(outcome);
                Ok(())
            }
            Err(error) => {
                let message = intent.failure_message(&error);
                tracing::debug!(?intent, %error, "intent rejected");
                self.state.rejected(message);
                Err(error)
            }
        }
    }

    fn round_trip(&mut self, intent: &Intent) -> Result<Outcome, ApiError> {
        let client = &self.client;
        match intent {
            Intent::Fetch => {
                let response = self.transport.execute(&client.build_list_todos())?;
                client.parse_list_todos(response).map(Outcome::Fetched)
            }
            Intent::Add { description } => {
                let request = client.build_create_todo(&CreateTodo::new(description.clone()))?;
                let response = self.transport.execute(&request)?;
                client.parse_create_todo(response).map(Outcome::Added)
            }
            Intent::Delete { id } => {
                let response = self.transport.execute(&client.build_delete_todo(*id))?;
                client.parse_delete_todo(response).map(Outcome::Deleted)
            }
            Intent::ToggleCompleted { id } => {
                let response = self.transport.execute(&client.build_toggle_completed(*id))?;
                client
                    .parse_toggle_completed(response)
                    .map(Outcome::CompletedChanged)
            }
            Intent::ChangeDescription { id, description } => {
                let request = client.build_update_description(
                    *id,
                    &UpdateDescription {
                        description: description.clone(),
                    },
                )?;
                let response = self.transport.execute(&request)?;
                client
                    .parse_update_description(response)
                    .map(Outcome::DescriptionChanged)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crate::http::{HttpMethod, HttpRequest, HttpResponse};

    /// Replays canned responses and records every request it was given.
    #[derive(Default)]
    struct Scripted {
        responses: VecDeque<Result<HttpResponse, ApiError>>,
        seen: Vec<HttpRequest>,
    }

    impl Scripted {
        fn reply(mut self, status: u16, body: &str) -> Self {
            self.responses.push_back(Ok(HttpResponse::new(status, body)));
            self
        }

        fn fail(mut self, message: &str) -> Self {
            self.responses
                .push_back(Err(ApiError::Transport(message.to_string())));
            self
        }
    }

    impl Transport for Scripted {
        fn execute(&mut self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
            self.seen.push(request.clone());
            self.responses
                .pop_front()
                .expect("no scripted response left")
        }
    }

    fn dispatcher(transport: Scripted) -> Dispatcher<Scripted> {
        Dispatcher::new(TodoClient::new("http://api.test"), transport)
    }

    #[test]
    fn fetch_then_add_then_toggle() {
        let transport = Scripted::default()
            .reply(200, r#"[{"id":1,"description":"one","completed":false}]"#)
            .reply(201, r#"{"id":2,"description":"two","completed":false}"#)
            .reply(200, r#"{"id":2,"description":"two","completed":true}"#);
        let mut d = dispatcher(transport);

        d.dispatch(Intent::Fetch).unwrap();
        d.dispatch(Intent::Add {
            description: "two".to_string(),
        })
        .unwrap();
        d.dispatch(Intent::ToggleCompleted { id: 2 }).unwrap();

        let state = d.state();
        assert!(!state.loading);
        assert!(state.error.is_none());
        assert_eq!(state.todos.len(), 2);
        assert!(state.todos[1].completed);

        let methods: Vec<HttpMethod> = d.transport.seen.iter().map(|r| r.method).collect();
        assert_eq!(
            methods,
            vec![HttpMethod::Get, HttpMethod::Post, HttpMethod::Put]
        );
        assert_eq!(d.transport.seen[2].path, "http://api.test/todos/2");
    }

    #[test]
    fn rejected_delete_keeps_list_and_records_server_message() {
        let transport = Scripted::default()
            .reply(200, r#"[{"id":1,"description":"one","completed":false}]"#)
            .reply(404, r#"{"error":"not_found","message":"todo 5 not found"}"#);
        let mut d = dispatcher(transport);

        d.dispatch(Intent::Fetch).unwrap();
        let err = d.dispatch(Intent::Delete { id: 5 }).unwrap_err();

        assert!(matches!(err, ApiError::NotFound { .. }));
        assert_eq!(d.state().error.as_deref(), Some("todo 5 not found"));
        assert_eq!(d.state().todos.len(), 1);
        assert!(!d.state().loading);
    }

    #[test]
    fn transport_failure_uses_intent_fallback() {
        let transport = Scripted::default().fail("connection refused");
        let mut d = dispatcher(transport);

        d.dispatch(Intent::ChangeDescription {
            id: 1,
            description: "new".to_string(),
        })
        .unwrap_err();

        assert_eq!(
            d.state().error.as_deref(),
            Some("failed to change todo description")
        );
    }

    #[test]
    fn change_description_sends_patch_body() {
        let transport =
            Scripted::default().reply(200, r#"{"id":1,"description":"new","completed":false}"#);
        let mut d = dispatcher(transport);

        d.dispatch(Intent::ChangeDescription {
            id: 1,
            description: "new".to_string(),
        })
        .unwrap();

        let request = &d.transport.seen[0];
        assert_eq!(request.method, HttpMethod::Patch);
        let body: serde_json::Value =
            serde_json::from_str(request.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["description"], "new");
    }
}
