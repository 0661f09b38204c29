pub mod errors;
pub mod gesture;
pub mod http;
pub mod models;
pub mod session;
pub mod tasks;
pub mod view;
pub mod vocabulary;

pub use errors::FlashcardError;
pub use models::{
    Term,
    TermId,
    TermRecord,
    TermStore,
};
pub use session::{
    BookmarkViewChange,
    SessionState,
    StudySession,
};
pub use view::CardView;
