//! DynamoDB error mapping.
//!
//! Maps AWS SDK errors to `RepositoryError` from `articles_core::storage`.
//! Only the conditional-check failure carries article semantics; everything
//! else becomes `QueryFailed` keyed on the service error code.

use std::fmt::Debug;

use articles_core::storage::{RepositoryError, ARTICLE_ENTITY};
use aws_sdk_dynamodb::error::{ProvideErrorMetadata, SdkError};
use aws_sdk_dynamodb::operation::delete_item::DeleteItemError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::operation::query::QueryError;
use aws_sdk_dynamodb::operation::update_item::UpdateItemError;
use uuid::Uuid;

/// Maps an operation error with no article meaning to `QueryFailed`.
fn service_failure<E: ProvideErrorMetadata + Debug>(operation: &str, err: E) -> RepositoryError {
    let reason = match err.code() {
        Some("ResourceNotFoundException") => "table not found".to_string(),
        Some(
            "ProvisionedThroughputExceededException"
            | "RequestLimitExceeded"
            | "ThrottlingException",
        ) => "throughput exceeded, please retry".to_string(),
        Some("TransactionConflictException") => "transaction conflict, please retry".to_string(),
        Some("ItemCollectionSizeLimitExceededException") => {
            "item collection size limit exceeded".to_string()
        }
        Some("InternalServerError") => "DynamoDB internal server error".to_string(),
        _ => format!("{err:?}"),
    };
    RepositoryError::QueryFailed(format!("{operation}: {reason}"))
}

/// Map a Query SDK error to RepositoryError.
pub fn map_query_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<QueryError, R>,
) -> RepositoryError {
    service_failure("Query", err.into_service_error())
}

/// Map a PutItem SDK error to RepositoryError.
///
/// A failed `attribute_not_exists` condition means the id is taken.
pub fn map_put_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<PutItemError, R>,
    id: Uuid,
) -> RepositoryError {
    match err.into_service_error() {
        PutItemError::ConditionalCheckFailedException(_) => RepositoryError::AlreadyExists {
            entity_type: ARTICLE_ENTITY,
            id: id.to_string(),
        },
        err => service_failure("PutItem", err),
    }
}

/// Map an UpdateItem SDK error to RepositoryError.
///
/// A failed ownership condition is reported as not found.
pub fn map_update_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<UpdateItemError, R>,
    id: Uuid,
) -> RepositoryError {
    match err.into_service_error() {
        UpdateItemError::ConditionalCheckFailedException(_) => {
            RepositoryError::article_not_found(id)
        }
        err => service_failure("UpdateItem", err),
    }
}

/// Map a DeleteItem SDK error to RepositoryError.
///
/// A failed ownership condition is reported as not found.
pub fn map_delete_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<DeleteItemError, R>,
    id: Uuid,
) -> RepositoryError {
    match err.into_service_error() {
        DeleteItemError::ConditionalCheckFailedException(_) => {
            RepositoryError::article_not_found(id)
        }
        err => service_failure("DeleteItem", err),
    }
}

/// Map a malformed or missing response to RepositoryError.
pub fn missing_attributes(operation: &str, id: Uuid) -> RepositoryError {
    RepositoryError::QueryFailed(format!("{operation} returned no attributes for {id}"))
}
