//! In-memory fakes for the remote services.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};
use std::sync::Mutex;
use std::time::Duration;
use taskdeck_core::TaskdeckError;
use taskdeck_core::error::Result;
use taskdeck_core::session::{AuthService, AuthToken, Registration, UserProfile};
use taskdeck_core::task::{
    Category, Priority, Stage, SubTask, Tag, TagId, Task, TaskDraft, TaskId, TaskPatch,
    TaskService,
};

#[derive(Default)]
struct ServerState {
    tasks: BTreeMap<TaskId, Task>,
    next_id: i64,
    fail_next: Option<TaskdeckError>,
    fail_at: Option<(usize, TaskdeckError)>,
    offline: bool,
    delays: VecDeque<Duration>,
    calls: usize,
}

/// A task server held in memory.
///
/// Ids start at 1000 so a test can tell them apart from anything a client
/// might make up. Failures and response delays are injected per call.
pub struct FakeTaskServer {
    state: Mutex<ServerState>,
}

impl FakeTaskServer {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(ServerState {
                next_id: 1000,
                ..ServerState::default()
            }),
        }
    }

    /// Inserts a task directly on the server side, returning its id.
    pub fn seed(&self, title: &str, category: Category) -> TaskId {
        let mut state = self.state.lock().unwrap();
        let id = next_id(&mut state);
        state.tasks.insert(
            id,
            Task {
                id,
                title: title.to_string(),
                description: None,
                completed: false,
                category,
                priority: Priority::Medium,
                stage: Stage::Todo,
                due_date: None,
                subtasks: Vec::new(),
                tags: Vec::new(),
            },
        );
        id
    }

    /// The next call fails with `error`.
    pub fn fail_next(&self, error: TaskdeckError) {
        self.state.lock().unwrap().fail_next = Some(error);
    }

    /// The `n`-th call from now fails with `error` (`1` is the next call).
    pub fn fail_nth(&self, n: usize, error: TaskdeckError) {
        let mut state = self.state.lock().unwrap();
        let at = state.calls + n;
        state.fail_at = Some((at, error));
    }

    /// Every call fails as a transport error while set.
    pub fn set_offline(&self, offline: bool) {
        self.state.lock().unwrap().offline = offline;
    }

    /// Queues response delays, consumed one per call in call order.
    pub fn delay_responses(&self, delays: impl IntoIterator<Item = Duration>) {
        self.state.lock().unwrap().delays.extend(delays);
    }

    pub fn calls(&self) -> usize {
        self.state.lock().unwrap().calls
    }

    pub fn server_task(&self, id: TaskId) -> Option<Task> {
        self.state.lock().unwrap().tasks.get(&id).cloned()
    }

    pub fn server_ids(&self) -> HashSet<TaskId> {
        self.state.lock().unwrap().tasks.keys().copied().collect()
    }

    /// Runs `f` against the server state after failure injection, then waits
    /// out the queued delay. The lock is released before waiting.
    async fn call<T>(&self, f: impl FnOnce(&mut ServerState) -> Result<T>) -> Result<T> {
        let (result, delay) = {
            let mut state = self.state.lock().unwrap();
            state.calls += 1;
            let call_index = state.calls;
            let delay = state.delays.pop_front();
            let result = if state.offline {
                Err(TaskdeckError::service(None, "connection refused"))
            } else if let Some(error) = state.fail_next.take() {
                Err(error)
            } else if let Some((_, error)) = state.fail_at.take_if(|(at, _)| *at == call_index) {
                Err(error)
            } else {
                f(&mut state)
            };
            (result, delay)
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        result
    }
}

fn next_id(state: &mut ServerState) -> i64 {
    state.next_id += 1;
    state.next_id
}

fn existing(state: &mut ServerState, id: TaskId) -> Result<&mut Task> {
    state
        .tasks
        .get_mut(&id)
        .ok_or_else(|| TaskdeckError::not_found("task", id))
}

#[async_trait]
impl TaskService for FakeTaskServer {
    async fn list_tasks(&self) -> Result<Vec<Task>> {
        self.call(|state| Ok(state.tasks.values().cloned().collect()))
            .await
    }

    async fn get_task(&self, id: TaskId) -> Result<Task> {
        self.call(|state| existing(state, id).map(|task| task.clone()))
            .await
    }

    async fn create_task(&self, draft: &TaskDraft) -> Result<Task> {
        let draft = draft.normalized()?;
        self.call(move |state| {
            let id = next_id(state);
            let task = Task {
                id,
                title: draft.title,
                description: draft.description,
                completed: false,
                category: draft.category,
                priority: draft.priority,
                stage: draft.stage,
                due_date: draft.due_date,
                subtasks: Vec::new(),
                tags: Vec::new(),
            };
            state.tasks.insert(id, task.clone());
            Ok(task)
        })
        .await
    }

    async fn update_task(&self, id: TaskId, patch: &TaskPatch) -> Result<Task> {
        let patch = patch.normalized()?;
        self.call(move |state| {
            let task = existing(state, id)?;
            if let Some(title) = patch.title {
                task.title = title;
            }
            if let Some(description) = patch.description {
                task.description = description;
            }
            if let Some(completed) = patch.completed {
                task.completed = completed;
            }
            if let Some(category) = patch.category {
                task.category = category;
            }
            if let Some(priority) = patch.priority {
                task.priority = priority;
            }
            if let Some(stage) = patch.stage {
                task.stage = stage;
            }
            if let Some(due_date) = patch.due_date {
                task.due_date = due_date;
            }
            Ok(task.clone())
        })
        .await
    }

    async fn delete_task(&self, id: TaskId) -> Result<()> {
        self.call(|state| {
            state
                .tasks
                .remove(&id)
                .map(|_| ())
                .ok_or_else(|| TaskdeckError::not_found("task", id))
        })
        .await
    }

    async fn add_subtask(&self, task_id: TaskId, text: &str) -> Result<Task> {
        let text = text.trim().to_string();
        if text.is_empty() {
            return Err(TaskdeckError::validation("subtask text must not be empty"));
        }
        self.call(move |state| {
            let id = next_id(state);
            let task = existing(state, task_id)?;
            task.subtasks.push(SubTask {
                id,
                text,
                completed: false,
            });
            Ok(task.clone())
        })
        .await
    }

    async fn add_tag(&self, task_id: TaskId, name: &str) -> Result<()> {
        let name = name.trim().to_string();
        self.call(move |state| {
            let id = next_id(state);
            existing(state, task_id)?.tags.push(Tag { id, name });
            Ok(())
        })
        .await
    }

    async fn remove_tag(&self, task_id: TaskId, tag_id: TagId) -> Result<()> {
        self.call(|state| {
            let task = existing(state, task_id)?;
            let before = task.tags.len();
            task.tags.retain(|tag| tag.id != tag_id);
            if task.tags.len() == before {
                return Err(TaskdeckError::not_found("tag", tag_id));
            }
            Ok(())
        })
        .await
    }

    async fn tasks_by_tag(&self, name: &str) -> Result<Vec<Task>> {
        self.call(|state| {
            Ok(state
                .tasks
                .values()
                .filter(|task| task.has_tag(name))
                .cloned()
                .collect())
        })
        .await
    }
}

#[derive(Default)]
struct AuthState {
    // username -> (password, profile)
    users: HashMap<String, (String, UserProfile)>,
    valid_tokens: HashMap<String, String>,
    offline: bool,
}

/// Auth endpoints held in memory. Tokens are `token-<username>`.
#[derive(Default)]
pub struct FakeAuthServer {
    state: Mutex<AuthState>,
}

impl FakeAuthServer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(username: &str, password: &str) -> Self {
        let server = Self::new();
        server.add_user(username, password);
        server
    }

    pub fn add_user(&self, username: &str, password: &str) -> UserProfile {
        let mut state = self.state.lock().unwrap();
        let profile = UserProfile {
            id: state.users.len() as i64 + 1,
            username: username.to_string(),
            email: format!("{username}@example.com"),
            is_active: true,
        };
        state
            .users
            .insert(username.to_string(), (password.to_string(), profile.clone()));
        profile
    }

    /// Invalidates every issued token, as if they had expired.
    pub fn expire_tokens(&self) {
        self.state.lock().unwrap().valid_tokens.clear();
    }

    pub fn set_offline(&self, offline: bool) {
        self.state.lock().unwrap().offline = offline;
    }

    fn check_online(state: &AuthState) -> Result<()> {
        if state.offline {
            Err(TaskdeckError::service(None, "connection refused"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl AuthService for FakeAuthServer {
    async fn login(&self, username: &str, password: &str) -> Result<AuthToken> {
        let mut state = self.state.lock().unwrap();
        Self::check_online(&state)?;
        match state.users.get(username) {
            Some((expected, _)) if expected == password => {
                let token = format!("token-{username}");
                state.valid_tokens.insert(token.clone(), username.to_string());
                Ok(AuthToken::new(token))
            }
            _ => Err(TaskdeckError::auth("Incorrect username or password")),
        }
    }

    async fn register(&self, registration: &Registration) -> Result<UserProfile> {
        {
            let state = self.state.lock().unwrap();
            Self::check_online(&state)?;
            if state.users.contains_key(&registration.username) {
                return Err(TaskdeckError::validation("Username already taken"));
            }
        }
        Ok(self.add_user(&registration.username, &registration.password))
    }

    async fn profile(&self, token: &AuthToken) -> Result<UserProfile> {
        let state = self.state.lock().unwrap();
        Self::check_online(&state)?;
        let username = state
            .valid_tokens
            .get(token.secret())
            .ok_or_else(|| TaskdeckError::auth("Could not validate credentials"))?;
        state
            .users
            .get(username)
            .map(|(_, profile)| profile.clone())
            .ok_or_else(|| TaskdeckError::auth("session user not found"))
    }
}
