// In-process link store
// Same contract as postgres: unique short codes, clicks must reference an
// existing link, analytics reads see one consistent snapshot.

use async_trait::async_trait;
use chrono::Utc;
use std::cmp::Reverse;
use std::collections::HashSet;
use tokio::sync::RwLock;

use super::store::{AnalyticsPage, LinkStore, StoreError};
use crate::models::{Click, ClickRow, Link, NewClick, NewLink};

#[derive(Default)]
struct Tables {
    links: Vec<Link>,
    clicks: Vec<Click>,
    next_link_id: i64,
    next_click_id: i64,
}

#[derive(Default)]
pub struct MemoryLinkStore {
    tables: RwLock<Tables>,
}

impl MemoryLinkStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn link_count(&self) -> usize {
        self.tables.read().await.links.len()
    }

    pub async fn click_count(&self) -> usize {
        self.tables.read().await.clicks.len()
    }

    /// Clicks recorded against one link, oldest first
    pub async fn clicks_for(&self, link_id: i64) -> Vec<Click> {
        self.tables
            .read()
            .await
            .clicks
            .iter()
            .filter(|click| click.link_id == link_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl LinkStore for MemoryLinkStore {
    async fn find_by_original_url(&self, original_url: &str) -> Result<Option<Link>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .links
            .iter()
            .filter(|link| link.original_url == original_url)
            .min_by_key(|link| (link.created_at, link.id))
            .cloned())
    }

    async fn find_by_short_code(&self, short_code: &str) -> Result<Option<Link>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .links
            .iter()
            .find(|link| link.short_code == short_code)
            .cloned())
    }

    async fn short_code_exists(&self, short_code: &str) -> Result<bool, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.links.iter().any(|link| link.short_code == short_code))
    }

    async fn insert_link(&self, new_link: NewLink) -> Result<Link, StoreError> {
        let mut tables = self.tables.write().await;

        if tables
            .links
            .iter()
            .any(|link| link.short_code == new_link.short_code)
        {
            return Err(StoreError::DuplicateShortCode(new_link.short_code));
        }

        tables.next_link_id += 1;
        let link = Link {
            id: tables.next_link_id,
            original_url: new_link.original_url,
            short_code: new_link.short_code,
            created_at: new_link.created_at,
        };
        tables.links.push(link.clone());
        Ok(link)
    }

    async fn insert_click(&self, new_click: NewClick) -> Result<Click, StoreError> {
        let mut tables = self.tables.write().await;

        if !tables.links.iter().any(|link| link.id == new_click.link_id) {
            return Err(StoreError::UnknownLink(new_click.link_id));
        }

        tables.next_click_id += 1;
        let click = Click {
            id: tables.next_click_id,
            link_id: new_click.link_id,
            ip_address: new_click.ip_address,
            user_agent: new_click.user_agent,
            is_valid: new_click.is_valid,
            created_at: new_click.created_at,
        };
        tables.clicks.push(click.clone());
        Ok(click)
    }

    async fn analytics_page(&self, offset: i64, limit: i64) -> Result<AnalyticsPage, StoreError> {
        let tables = self.tables.read().await;

        let mut ordered: Vec<&Link> = tables.links.iter().collect();
        ordered.sort_by_key(|link| Reverse((link.created_at, link.id)));

        let links: Vec<Link> = ordered
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .cloned()
            .collect();

        let ids: HashSet<i64> = links.iter().map(|link| link.id).collect();
        let clicks = tables
            .clicks
            .iter()
            .filter(|click| ids.contains(&click.link_id))
            .map(|click| ClickRow {
                link_id: click.link_id,
                created_at: click.created_at,
                is_valid: click.is_valid,
            })
            .collect();

        Ok(AnalyticsPage {
            total: tables.links.len() as i64,
            links,
            clicks,
        })
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
