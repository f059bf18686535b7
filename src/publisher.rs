use std::time::Duration;

use anyhow::{bail, Context, Result};
use reqwest::blocking::Client;
use reqwest::header::AUTHORIZATION;
use reqwest::StatusCode;
use serde::Serialize;
use spdlog::{error, info};

use crate::config::Api;
use crate::credentials::Credentials;
use crate::record::Record;

pub const PUBLISHED_STATUS: &str = "published";
const ERROR_BODY_CHARS: usize = 100;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// JSON body of a blog creation request. Empty values are left out.
#[derive(Serialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BlogPayload<'a> {
    #[serde(skip_serializing_if = "str::is_empty")]
    pub location_id: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    pub title: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    pub slug: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    pub content: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    pub author: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    pub category: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "str::is_empty")]
    pub meta_description: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    pub published_at: &'a str,
    pub status: &'static str,
}

impl<'a> BlogPayload<'a> {
    pub fn new(location_id: &'a str, record: &'a Record) -> Self {
        BlogPayload {
            location_id,
            title: &record.title,
            slug: &record.slug,
            content: &record.content,
            author: &record.author,
            category: record.category.trim(),
            tags: record.tag_list(),
            meta_description: &record.meta_description,
            published_at: &record.publish_date,
            status: PUBLISHED_STATUS,
        }
    }
}

pub struct BlogPublisher {
    client: Client,
    endpoint: String,
    version: String,
    credentials: Credentials,
}

impl BlogPublisher {
    pub fn new(api: &Api, credentials: Credentials) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Error creating HTTP client")?;

        Ok(BlogPublisher {
            client,
            endpoint: format!("{}/blogs/", api.base_url.trim_end_matches('/')),
            version: api.version.clone(),
            credentials,
        })
    }

    /// Sends one post. Only 200 and 201 count as success.
    pub fn publish(&self, record: &Record) -> Result<()> {
        let payload = BlogPayload::new(&self.credentials.location_id, record);

        let response = self.client.post(&self.endpoint)
            .header(AUTHORIZATION, format!("Bearer {}", self.credentials.api_key))
            .header("Version", &self.version)
            .json(&payload)
            .send()
            .with_context(|| format!("Error sending {}", record.slug))?;

        let status = response.status();
        if status == StatusCode::OK || status == StatusCode::CREATED {
            return Ok(());
        }

        let body = response.text().unwrap_or_default();
        let body: String = body.chars().take(ERROR_BODY_CHARS).collect();
        bail!("Failed: {} {}", status.as_u16(), body)
    }
}

#[derive(Debug, Default, PartialEq)]
pub struct PublishSummary {
    pub posted: usize,
    pub failed: usize,
}

impl PublishSummary {
    pub fn total(&self) -> usize {
        self.posted + self.failed
    }
}

/// Publishes every record in order. A failed post never stops the next ones.
pub fn publish_all<'a>(publisher: &BlogPublisher, records: impl IntoIterator<Item = &'a Record>) -> PublishSummary {
    let records: Vec<&Record> = records.into_iter().collect();
    let total = records.len();
    let mut summary = PublishSummary::default();

    for (i, record) in records.into_iter().enumerate() {
        info!("[{}/{}] {}", i + 1, total, record.title);
        match publisher.publish(record) {
            Ok(()) => {
                info!("    Posted {}", record.slug);
                summary.posted += 1;
            }
            Err(e) => {
                error!("    {:#}", e);
                summary.failed += 1;
            }
        }
    }

    summary
}
