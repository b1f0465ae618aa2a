//! Comment service: create and read comments against a document store

use super::builder::CommentBuilder;
use super::model::Comment;
use super::request::CreateCommentRequest;
use super::validator::CommentValidator;
use crate::auth::Identity;
use crate::catalog::{Product, Review};
use crate::config::CommentPolicy;
use crate::error::{CommentServiceError, Result};
use crate::store::{Collection, DocumentStore, Filter};
use crate::types::DocumentId;
use std::sync::Arc;
use tracing::{info, warn};

/// Creates and reads comments
pub struct CommentService {
    store: Arc<dyn DocumentStore>,
    policy: CommentPolicy,
    validator: CommentValidator,
}

impl CommentService {
    /// Create a service over a store with the given policy
    pub fn new(store: Arc<dyn DocumentStore>, policy: CommentPolicy) -> Self {
        let validator = CommentValidator::from_policy(&policy);
        Self {
            store,
            policy,
            validator,
        }
    }

    /// Create a comment on behalf of `author`
    ///
    /// All checks run before the insert, so a failed call never writes.
    pub fn create(&self, author: &Identity, request: CreateCommentRequest) -> Result<Comment> {
        if !self.policy.allows(author.role) {
            warn!(user_id = %author.user_id, role = %author.role, "Comment creation denied by role");
            return Err(CommentServiceError::Forbidden(format!(
                "Users with role '{}' may not create comments",
                author.role
            )));
        }

        self.validator.validate_content(&request.comment)?;

        if self.policy.verify_references {
            self.check_references(&request)?;
        }

        let comment = CommentBuilder::from_request(request, author).build()?;
        self.comments()
            .insert_one(&comment)
            .map_err(|e| e.with_context("Failed to store comment"))?;

        info!(
            comment_id = %comment.id,
            user_id = %comment.user,
            review_id = %comment.review,
            "Created comment"
        );
        Ok(comment)
    }

    /// Get a comment by ID
    pub fn get(&self, id: &DocumentId) -> Result<Comment> {
        self.comments().get(id)
    }

    /// All comments on a review, oldest first
    pub fn list_for_review(&self, review: &DocumentId) -> Result<Vec<Comment>> {
        let mut comments = self
            .comments()
            .find(&Filter::new().eq("review", review.as_str()))?;
        comments.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(comments)
    }

    fn comments(&self) -> Collection<'_, Comment> {
        Collection::new(self.store.as_ref())
    }

    fn check_references(&self, request: &CreateCommentRequest) -> Result<()> {
        let product = Collection::<Product>::new(self.store.as_ref()).get(&request.product)?;
        let review = Collection::<Review>::new(self.store.as_ref()).get(&request.review)?;
        self.validator.validate_references(&product, &review)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Role;
    use crate::store::memory::MemoryStore;
    use crate::store::Record;
    use chrono::{Duration, Utc};
    use pretty_assertions::assert_eq;

    struct Fixture {
        store: Arc<MemoryStore>,
        author: Identity,
        product: Product,
        review: Review,
    }

    impl Fixture {
        fn new() -> Self {
            let store = Arc::new(MemoryStore::new());
            let author = Identity {
                user_id: DocumentId::generate(),
                username: "JohnDoe1".to_string(),
                role: Role::Admin,
            };
            let product = Product {
                id: DocumentId::generate(),
                name: "Drone1".to_string(),
                detail: None,
                stock: 30,
                price: 200.0,
                product_img: None,
            };
            let review = Review {
                id: DocumentId::generate(),
                content: "Which drone with camera is right for you?".to_string(),
                product: product.id.clone(),
                review_img: None,
                user: author.user_id.clone(),
            };

            Collection::<Product>::new(store.as_ref())
                .insert_one(&product)
                .unwrap();
            Collection::<Review>::new(store.as_ref())
                .insert_one(&review)
                .unwrap();

            Self {
                store,
                author,
                product,
                review,
            }
        }

        fn service(&self, policy: CommentPolicy) -> CommentService {
            CommentService::new(self.store.clone(), policy)
        }

        fn request(&self, text: &str) -> CreateCommentRequest {
            CreateCommentRequest {
                comment: text.to_string(),
                product: self.product.id.clone(),
                review: self.review.id.clone(),
            }
        }

        fn stored_comments(&self) -> usize {
            self.store.count(Comment::COLLECTION).unwrap()
        }
    }

    #[test]
    fn test_create_persists_comment() {
        let fx = Fixture::new();
        let service = fx.service(CommentPolicy::default());

        let comment = service.create(&fx.author, fx.request("Nice drone")).unwrap();

        assert_eq!(comment.user, fx.author.user_id);
        assert_eq!(fx.stored_comments(), 1);

        let stored = service.get(&comment.id).unwrap();
        assert_eq!(stored, comment);
    }

    #[test]
    fn test_role_gate() {
        let fx = Fixture::new();
        let service = fx.service(CommentPolicy {
            allowed_roles: vec![Role::User],
            ..CommentPolicy::default()
        });

        let err = service.create(&fx.author, fx.request("Nice")).unwrap_err();
        assert_eq!(err.reason_phrase(), "ForbiddenError");
        assert_eq!(fx.stored_comments(), 0);
    }

    #[test]
    fn test_content_rules() {
        let fx = Fixture::new();
        let service = fx.service(CommentPolicy {
            max_length: 5,
            allow_blank: false,
            ..CommentPolicy::default()
        });

        for text in ["", "   ", "too long text"] {
            let err = service.create(&fx.author, fx.request(text)).unwrap_err();
            assert_eq!(err.reason_phrase(), "ValidationError", "text: {:?}", text);
        }
        assert_eq!(fx.stored_comments(), 0);
    }

    #[test]
    fn test_references_unchecked_by_default() {
        let fx = Fixture::new();
        let service = fx.service(CommentPolicy::default());
        let request = CreateCommentRequest {
            comment: "Orphan".to_string(),
            product: DocumentId::generate(),
            review: DocumentId::generate(),
        };

        assert!(service.create(&fx.author, request).is_ok());
    }

    #[test]
    fn test_reference_checks() {
        let fx = Fixture::new();
        let service = fx.service(CommentPolicy {
            verify_references: true,
            ..CommentPolicy::default()
        });

        let missing_product = CreateCommentRequest {
            product: DocumentId::generate(),
            ..fx.request("x")
        };
        let err = service.create(&fx.author, missing_product).unwrap_err();
        assert_eq!(err.reason_phrase(), "ProductNotFoundError");

        let missing_review = CreateCommentRequest {
            review: DocumentId::generate(),
            ..fx.request("x")
        };
        let err = service.create(&fx.author, missing_review).unwrap_err();
        assert_eq!(err.reason_phrase(), "ReviewNotFoundError");

        let other = Product {
            id: DocumentId::generate(),
            name: "Drone2".to_string(),
            ..fx.product.clone()
        };
        Collection::<Product>::new(fx.store.as_ref())
            .insert_one(&other)
            .unwrap();
        let mismatched = CreateCommentRequest {
            product: other.id.clone(),
            ..fx.request("x")
        };
        let err = service.create(&fx.author, mismatched).unwrap_err();
        assert_eq!(err.reason_phrase(), "ValidationError");

        assert_eq!(fx.stored_comments(), 0);
        assert!(service.create(&fx.author, fx.request("ok")).is_ok());
    }

    #[test]
    fn test_get_missing() {
        let fx = Fixture::new();
        let service = fx.service(CommentPolicy::default());
        let err = service.get(&DocumentId::generate()).unwrap_err();
        assert_eq!(err.reason_phrase(), "CommentNotFoundError");
    }

    #[test]
    fn test_list_for_review_is_ordered() {
        let fx = Fixture::new();
        let service = fx.service(CommentPolicy::default());
        let comments = Collection::<Comment>::new(fx.store.as_ref());
        let now = Utc::now();

        for (text, age) in [("second", 1), ("first", 2), ("third", 0)] {
            let comment = CommentBuilder::new(
                fx.product.id.clone(),
                fx.review.id.clone(),
                fx.author.user_id.clone(),
            )
            .content(text)
            .created_at(now - Duration::minutes(age))
            .build()
            .unwrap();
            comments.insert_one(&comment).unwrap();
        }
        service
            .create(
                &fx.author,
                CreateCommentRequest {
                    review: DocumentId::generate(),
                    ..fx.request("elsewhere")
                },
            )
            .unwrap();

        let listed: Vec<String> = service
            .list_for_review(&fx.review.id)
            .unwrap()
            .into_iter()
            .map(|c| c.comment)
            .collect();
        assert_eq!(listed, vec!["first", "second", "third"]);
    }
}
