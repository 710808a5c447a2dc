pub mod task;
pub mod text;
pub mod text_field;

pub use task::{TaskId, TaskKind, TaskSeq, TaskState, Tasks};
pub use text::truncate_with_ellipsis;
pub use text_field::TextField;
