//! Async task bookkeeping.
//!
//! Every request the reducer starts gets a fresh `TaskId`. A result is only
//! applied if its id is still the active one for that kind; anything else
//! (superseded request, screen unmounted since) is dropped.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(pub u64);

#[derive(Debug, Default)]
pub struct TaskSeq {
    next: u64,
}

impl TaskSeq {
    pub fn next_id(&mut self) -> TaskId {
        let id = TaskId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    SignIn,
    SignUp,
    Groups,
    Exercises,
    History,
    ProfileUpdate,
    AvatarUpload,
}

/// Task lifecycle state (stored in `TuiState`, mutated only by the reducer).
#[derive(Debug, Default, Clone)]
pub struct TaskState {
    pub active: Option<TaskId>,
}

impl TaskState {
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    pub fn finish_if_active(&mut self, id: TaskId) -> bool {
        let ok = self.active == Some(id);
        if ok {
            self.active = None;
        }
        ok
    }
}

#[derive(Debug, Default, Clone)]
pub struct Tasks {
    pub sign_in: TaskState,
    pub sign_up: TaskState,
    pub groups: TaskState,
    pub exercises: TaskState,
    pub history: TaskState,
    pub profile_update: TaskState,
    pub avatar_upload: TaskState,
}

impl Tasks {
    pub fn state(&self, kind: TaskKind) -> &TaskState {
        match kind {
            TaskKind::SignIn => &self.sign_in,
            TaskKind::SignUp => &self.sign_up,
            TaskKind::Groups => &self.groups,
            TaskKind::Exercises => &self.exercises,
            TaskKind::History => &self.history,
            TaskKind::ProfileUpdate => &self.profile_update,
            TaskKind::AvatarUpload => &self.avatar_upload,
        }
    }

    pub fn state_mut(&mut self, kind: TaskKind) -> &mut TaskState {
        match kind {
            TaskKind::SignIn => &mut self.sign_in,
            TaskKind::SignUp => &mut self.sign_up,
            TaskKind::Groups => &mut self.groups,
            TaskKind::Exercises => &mut self.exercises,
            TaskKind::History => &mut self.history,
            TaskKind::ProfileUpdate => &mut self.profile_update,
            TaskKind::AvatarUpload => &mut self.avatar_upload,
        }
    }

    /// Starts a task of `kind`, superseding any running one.
    pub fn start(&mut self, seq: &mut TaskSeq, kind: TaskKind) -> TaskId {
        let id = seq.next_id();
        self.state_mut(kind).active = Some(id);
        id
    }

    pub fn is_running(&self, kind: TaskKind) -> bool {
        self.state(kind).is_running()
    }

    pub fn is_any_running(&self) -> bool {
        self.sign_in.is_running()
            || self.sign_up.is_running()
            || self.groups.is_running()
            || self.exercises.is_running()
            || self.history.is_running()
            || self.profile_update.is_running()
            || self.avatar_upload.is_running()
    }
}
