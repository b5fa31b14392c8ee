//! DynamoDB-backed item store.
//!
//! One item per user, hash key `userId`. Existence guards are DynamoDB
//! condition expressions; `ConditionalCheckFailedException` is reported as
//! `StoreError::PreconditionFailed`, every other SDK failure as `Backend`
//! with the SDK's error text.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use aws_sdk_dynamodb::Client;
use chrono::{DateTime, Utc};

use usersvc_core::model::{UserChanges, UserRecord};
use usersvc_core::store::{ItemStore, StoreError, StoreResult};

use crate::config::StoreSection;

const KEY: &str = "userId";

type Item = HashMap<String, AttributeValue>;

pub struct DynamoItemStore {
    client: Client,
    table: String,
}

impl DynamoItemStore {
    pub fn new(client: Client, table: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
        }
    }

    /// Build a client from the default AWS credential chain, pinned to the
    /// configured region (and endpoint, when set).
    pub async fn from_config(cfg: &StoreSection) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(cfg.region.clone()));
        if let Some(endpoint) = &cfg.endpoint {
            loader = loader.endpoint_url(endpoint);
        }
        let sdk = loader.load().await;
        Self::new(Client::new(&sdk), cfg.table.clone())
    }
}

fn backend<E>(err: E) -> StoreError
where
    E: std::error::Error + 'static,
{
    StoreError::Backend(DisplayErrorContext(&err).to_string())
}

/// Map a failed conditional write; a failed guard is not a backend error.
fn conditional<E, R>(err: SdkError<E, R>) -> StoreError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug + 'static,
{
    let guard_failed = err
        .as_service_error()
        .and_then(|se| se.code())
        .is_some_and(|code| code == "ConditionalCheckFailedException");
    if guard_failed {
        StoreError::PreconditionFailed
    } else {
        backend(err)
    }
}

fn key(user_id: &str) -> AttributeValue {
    AttributeValue::S(user_id.to_owned())
}

fn age_value(age: Option<u32>) -> AttributeValue {
    match age {
        Some(a) => AttributeValue::N(a.to_string()),
        None => AttributeValue::Null(true),
    }
}

/// Record → DynamoDB item. Unset `age` is stored as NULL.
pub fn to_item(record: &UserRecord) -> Item {
    HashMap::from([
        (KEY.to_owned(), key(&record.user_id)),
        ("email".to_owned(), AttributeValue::S(record.email.clone())),
        ("name".to_owned(), AttributeValue::S(record.name.clone())),
        ("age".to_owned(), age_value(record.age)),
        (
            "createdAt".to_owned(),
            AttributeValue::S(record.created_at.to_rfc3339()),
        ),
        (
            "updatedAt".to_owned(),
            AttributeValue::S(record.updated_at.to_rfc3339()),
        ),
    ])
}

fn string_attr(item: &Item, name: &str) -> StoreResult<String> {
    match item.get(name) {
        Some(AttributeValue::S(s)) => Ok(s.clone()),
        _ => Err(StoreError::Backend(format!("item attribute {name} missing or not a string"))),
    }
}

fn time_attr(item: &Item, name: &str) -> StoreResult<DateTime<Utc>> {
    let raw = string_attr(item, name)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| StoreError::Backend(format!("item attribute {name} is not a timestamp: {e}")))
}

/// DynamoDB item → record. Missing or NULL `age` reads as unset.
pub fn from_item(item: &Item) -> StoreResult<UserRecord> {
    let age = match item.get("age") {
        None | Some(AttributeValue::Null(_)) => None,
        Some(AttributeValue::N(n)) => Some(
            n.parse::<u32>()
                .map_err(|e| StoreError::Backend(format!("item attribute age: {e}")))?,
        ),
        Some(_) => return Err(StoreError::Backend("item attribute age is not a number".into())),
    };

    Ok(UserRecord {
        user_id: string_attr(item, KEY)?,
        email: string_attr(item, "email")?,
        name: string_attr(item, "name")?,
        age,
        created_at: time_attr(item, "createdAt")?,
        updated_at: time_attr(item, "updatedAt")?,
    })
}

#[async_trait]
impl ItemStore for DynamoItemStore {
    fn table(&self) -> &str {
        &self.table
    }

    async fn put_if_absent(&self, record: UserRecord) -> StoreResult<()> {
        self.client
            .put_item()
            .table_name(&self.table)
            .set_item(Some(to_item(&record)))
            .condition_expression("attribute_not_exists(userId)")
            .send()
            .await
            .map_err(conditional)?;
        Ok(())
    }

    async fn get_by_id(&self, user_id: &str) -> StoreResult<Option<UserRecord>> {
        let out = self
            .client
            .get_item()
            .table_name(&self.table)
            .key(KEY, key(user_id))
            .send()
            .await
            .map_err(backend)?;
        out.item().map(from_item).transpose()
    }

    async fn scan_up_to(&self, limit: usize) -> StoreResult<Vec<UserRecord>> {
        let limit = i32::try_from(limit).unwrap_or(i32::MAX);
        let out = self
            .client
            .scan()
            .table_name(&self.table)
            .limit(limit)
            .send()
            .await
            .map_err(backend)?;
        out.items().iter().map(from_item).collect()
    }

    // `updatedAt` is taken as given here; DynamoDB has no server-side max().
    async fn update_if_exists(
        &self,
        user_id: &str,
        changes: UserChanges,
        now: DateTime<Utc>,
    ) -> StoreResult<UserRecord> {
        let out = self
            .client
            .update_item()
            .table_name(&self.table)
            .key(KEY, key(user_id))
            .update_expression(
                "SET #name = :name, email = :email, age = :age, updatedAt = :updated",
            )
            .expression_attribute_names("#name", "name")
            .expression_attribute_values(":name", AttributeValue::S(changes.name))
            .expression_attribute_values(":email", AttributeValue::S(changes.email))
            .expression_attribute_values(":age", age_value(changes.age))
            .expression_attribute_values(":updated", AttributeValue::S(now.to_rfc3339()))
            .condition_expression("attribute_exists(userId)")
            .return_values(ReturnValue::AllNew)
            .send()
            .await
            .map_err(conditional)?;

        let attrs = out
            .attributes()
            .ok_or_else(|| StoreError::Backend("update returned no attributes".into()))?;
        from_item(attrs)
    }

    async fn delete_if_exists(&self, user_id: &str) -> StoreResult<()> {
        self.client
            .delete_item()
            .table_name(&self.table)
            .key(KEY, key(user_id))
            .condition_expression("attribute_exists(userId)")
            .send()
            .await
            .map_err(conditional)?;
        Ok(())
    }
}
