//! Comment system module
//!
//! Handles the comment record, the create-request schema, validation and
//! the service that ties them to a document store.

pub mod builder;
pub mod model;
pub mod request;
pub mod service;
pub mod validator;

pub use builder::CommentBuilder;
pub use model::Comment;
pub use request::CreateCommentRequest;
pub use service::CommentService;
pub use validator::CommentValidator;
