//! UI event types.
//!
//! Everything the reducer reacts to: terminal input, timer ticks, session
//! changes pushed by the holder, and results of async tasks.

use crossterm::event::Event;
use gymtrack_core::api::{ApiResult, AuthError, Exercise, HistoryDay, User};
use gymtrack_core::core::session::SessionState;

use crate::common::TaskId;

#[derive(Debug)]
pub enum UiEvent {
    /// Periodic timer (animation, toast expiry).
    Tick,
    /// Raw terminal input.
    Terminal(Event),

    /// The session holder published a new state.
    SessionChanged(SessionState),

    SignInFinished {
        task: TaskId,
        result: Result<User, AuthError>,
    },
    /// Sign-up creates the account and then signs in; the error is the
    /// message of whichever step failed.
    SignUpFinished {
        task: TaskId,
        result: Result<(), String>,
    },
    GroupsLoaded {
        task: TaskId,
        result: ApiResult<Vec<String>>,
    },
    ExercisesLoaded {
        task: TaskId,
        group: String,
        result: ApiResult<Vec<Exercise>>,
    },
    HistoryLoaded {
        task: TaskId,
        result: ApiResult<Vec<HistoryDay>>,
    },
    ProfileUpdated {
        task: TaskId,
        name: String,
        result: ApiResult<()>,
    },
    AvatarUploaded {
        task: TaskId,
        result: ApiResult<Option<String>>,
    },
}
