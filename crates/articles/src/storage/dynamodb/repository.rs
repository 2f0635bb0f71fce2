//! DynamoDB repository implementation.
//!
//! Implements the repository trait from `articles_core::storage` using DynamoDB.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use aws_sdk_dynamodb::Client;
use chrono::Utc;
use uuid::Uuid;

use articles_core::article::{Article, ArticleData, Author};
use articles_core::storage::{ArticleRepository, Result};

use super::conversions::{article_to_item, item_to_article};
use super::error::{
    map_delete_item_error, map_put_item_error, map_query_error, map_update_item_error,
    missing_attributes,
};
use super::keys;

type Item = HashMap<String, AttributeValue>;

/// DynamoDB-based repository implementation.
///
/// Provides async access to DynamoDB storage for articles.
pub struct DynamoDbRepository {
    client: Client,
    table_name: String,
}

impl DynamoDbRepository {
    /// Creates a new repository with the given DynamoDB client and table name.
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    /// Creates a new repository using the AWS SDK default credential chain.
    pub async fn from_env(table_name: impl Into<String>) -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self::new(Client::new(&config), table_name)
    }

    /// Get the table name.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Runs a key-condition query to completion, following `LastEvaluatedKey`.
    async fn query_all(
        &self,
        index: Option<&str>,
        key_condition: &str,
        values: &[(&str, String)],
    ) -> Result<Vec<Article>> {
        let mut articles = Vec::new();
        let mut start_key: Option<Item> = None;

        loop {
            let mut request = self
                .client
                .query()
                .table_name(&self.table_name)
                .set_index_name(index.map(str::to_string))
                .key_condition_expression(key_condition)
                .set_exclusive_start_key(start_key.take());
            for (name, value) in values {
                request =
                    request.expression_attribute_values(*name, AttributeValue::S(value.clone()));
            }

            let output = request.send().await.map_err(map_query_error)?;

            for item in output.items() {
                articles.push(item_to_article(item)?);
            }

            match output.last_evaluated_key {
                Some(key) if !key.is_empty() => start_key = Some(key),
                _ => break,
            }
        }

        Ok(articles)
    }
}

#[async_trait]
impl ArticleRepository for DynamoDbRepository {
    async fn find_all(&self) -> Result<Vec<Article>> {
        self.query_all(
            None,
            "PK = :pk",
            &[(":pk", keys::article_pk().to_string())],
        )
        .await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Article>> {
        let items = self
            .query_all(
                None,
                "PK = :pk AND SK = :sk",
                &[
                    (":pk", keys::article_pk().to_string()),
                    (":sk", keys::article_sk(id)),
                ],
            )
            .await?;

        Ok(items.into_iter().next())
    }

    async fn find_by_author(&self, author_id: &str) -> Result<Vec<Article>> {
        self.query_all(
            Some(keys::GSI1),
            "GSI1PK = :pk AND begins_with(GSI1SK, :prefix)",
            &[
                (":pk", keys::article_gsi1_pk(author_id)),
                (":prefix", keys::ARTICLE_PREFIX.to_string()),
            ],
        )
        .await
    }

    async fn save(&self, author: &Author, data: &ArticleData) -> Result<Article> {
        let article = Article::new(author.clone(), data.clone());

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(article_to_item(&article)))
            .condition_expression("attribute_not_exists(SK)")
            .send()
            .await
            .map_err(|e| map_put_item_error(e, article.id))?;

        Ok(article)
    }

    async fn update(&self, owner_id: &str, id: Uuid, data: &ArticleData) -> Result<Article> {
        // Overwrite, not merge: a missing body is removed
        let expression = match data.body {
            Some(_) => "SET #title = :title, #body = :body, updatedAt = :updated",
            None => "SET #title = :title, updatedAt = :updated REMOVE #body",
        };

        let mut request = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .key("PK", AttributeValue::S(keys::article_pk().to_string()))
            .key("SK", AttributeValue::S(keys::article_sk(id)))
            .update_expression(expression)
            .condition_expression("authorId = :owner")
            .expression_attribute_names("#title", "title")
            .expression_attribute_names("#body", "body")
            .expression_attribute_values(":owner", AttributeValue::S(owner_id.to_string()))
            .expression_attribute_values(":title", AttributeValue::S(data.title.clone()))
            .expression_attribute_values(":updated", AttributeValue::S(Utc::now().to_rfc3339()))
            .return_values(ReturnValue::AllNew);
        if let Some(body) = &data.body {
            request = request.expression_attribute_values(":body", AttributeValue::S(body.clone()));
        }

        let output = request
            .send()
            .await
            .map_err(|e| map_update_item_error(e, id))?;

        let item = output
            .attributes
            .ok_or_else(|| missing_attributes("UpdateItem", id))?;
        item_to_article(&item)
    }

    async fn destroy(&self, owner_id: &str, id: Uuid) -> Result<Article> {
        let output = self
            .client
            .delete_item()
            .table_name(&self.table_name)
            .key("PK", AttributeValue::S(keys::article_pk().to_string()))
            .key("SK", AttributeValue::S(keys::article_sk(id)))
            .condition_expression("authorId = :owner")
            .expression_attribute_values(":owner", AttributeValue::S(owner_id.to_string()))
            .return_values(ReturnValue::AllOld)
            .send()
            .await
            .map_err(|e| map_delete_item_error(e, id))?;

        let item = output
            .attributes
            .ok_or_else(|| missing_attributes("DeleteItem", id))?;
        item_to_article(&item)
    }
}
