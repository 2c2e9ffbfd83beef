//! DynamoDB backend
//!
//! The table has a string partition key `ID` and a string attribute `Name`.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::config::Region;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue;
use std::collections::HashMap;
use tracing::{debug, warn};

use super::{MovieStore, Result, StorageError};
use crate::api::models::Movie;

const ATTR_ID: &str = "ID";
const ATTR_NAME: &str = "Name";

#[derive(Clone, Debug)]
pub struct DynamoStore {
    client: Client,
    table_name: String,
}

impl DynamoStore {
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    /// Build a client from the ambient AWS configuration (credentials chain,
    /// `AWS_REGION`, ...), with optional region and endpoint overrides.
    pub async fn from_env(
        table_name: String,
        region: Option<String>,
        endpoint: Option<String>,
    ) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = region {
            loader = loader.region(Region::new(region));
        }
        if let Some(endpoint) = endpoint {
            loader = loader.endpoint_url(endpoint);
        }

        let sdk_config = loader.load().await;
        debug!(table = %table_name, "DynamoDB client configured");
        Self::new(Client::new(&sdk_config), table_name)
    }
}

fn backend_error<E>(err: E) -> StorageError
where
    E: std::error::Error,
{
    StorageError::Backend(DisplayErrorContext(err).to_string())
}

fn key(id: &str) -> AttributeValue {
    AttributeValue::S(id.to_string())
}

fn string_attr<'a>(item: &'a HashMap<String, AttributeValue>, name: &str) -> Result<&'a str> {
    item.get(name)
        .and_then(|value| value.as_s().ok())
        .map(String::as_str)
        .ok_or_else(|| StorageError::MalformedItem(format!("missing string attribute '{name}'")))
}

fn movie_from_item(item: &HashMap<String, AttributeValue>) -> Result<Movie> {
    Ok(Movie::new(
        string_attr(item, ATTR_ID)?,
        string_attr(item, ATTR_NAME)?,
    ))
}

#[async_trait]
impl MovieStore for DynamoStore {
    async fn get(&self, id: &str) -> Result<Option<Movie>> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(ATTR_ID, key(id))
            .send()
            .await
            .map_err(backend_error)?;

        match output.item() {
            Some(item) if !item.is_empty() => movie_from_item(item).map(Some),
            _ => Ok(None),
        }
    }

    async fn put(&self, movie: &Movie) -> Result<()> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .item(ATTR_ID, key(&movie.id))
            .item(ATTR_NAME, AttributeValue::S(movie.name.clone()))
            .send()
            .await
            .map_err(backend_error)?;
        Ok(())
    }

    async fn update_name(&self, id: &str, name: &str) -> Result<()> {
        self.client
            .update_item()
            .table_name(&self.table_name)
            .key(ATTR_ID, key(id))
            .update_expression("SET #NAME = :name")
            .expression_attribute_names("#NAME", ATTR_NAME)
            .expression_attribute_values(":name", AttributeValue::S(name.to_string()))
            .send()
            .await
            .map_err(backend_error)?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .key(ATTR_ID, key(id))
            .send()
            .await
            .map_err(backend_error)?;
        Ok(())
    }

    async fn scan(&self) -> Result<Vec<Movie>> {
        let output = self
            .client
            .scan()
            .table_name(&self.table_name)
            .send()
            .await
            .map_err(backend_error)?;

        if output.last_evaluated_key().is_some() {
            warn!(
                table = %self.table_name,
                returned = output.items().len(),
                "Scan result truncated by DynamoDB; listing only the first segment"
            );
        }

        output.items().iter().map(movie_from_item).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(pairs: &[(&str, &str)]) -> HashMap<String, AttributeValue> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), AttributeValue::S(v.to_string())))
            .collect()
    }

    #[test]
    fn test_movie_from_item() {
        let movie = movie_from_item(&item(&[("ID", "m1"), ("Name", "Alpha")])).unwrap();
        assert_eq!(movie, Movie::new("m1", "Alpha"));
    }

    #[test]
    fn test_movie_from_item_missing_name() {
        let result = movie_from_item(&item(&[("ID", "m1")]));
        assert!(matches!(result, Err(StorageError::MalformedItem(_))));
    }

    #[test]
    fn test_movie_from_item_rejects_non_string_id() {
        let mut raw = item(&[("Name", "Alpha")]);
        raw.insert("ID".to_string(), AttributeValue::N("1".to_string()));

        assert!(movie_from_item(&raw).is_err());
    }
}
