// PostgreSQL link store on diesel-async + bb8

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::{AsyncConnection, RunQueryDsl};
use tracing::{debug, instrument};

use super::{
    diesel_pool::DieselPool,
    store::{AnalyticsPage, LinkStore, StoreError},
};
use crate::{
    models::{Click, ClickRow, Link, NewClick, NewLink},
    schema::{clicks, links},
};

#[derive(Clone)]
pub struct PgLinkStore {
    pool: DieselPool,
}

impl PgLinkStore {
    pub fn new(pool: DieselPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkStore for PgLinkStore {
    async fn find_by_original_url(&self, original_url: &str) -> Result<Option<Link>, StoreError> {
        let mut conn = self.pool.get().await?;

        let link = links::table
            .filter(links::original_url.eq(original_url))
            .order((links::created_at.asc(), links::id.asc()))
            .select(Link::as_select())
            .first(&mut conn)
            .await
            .optional()?;

        Ok(link)
    }

    async fn find_by_short_code(&self, short_code: &str) -> Result<Option<Link>, StoreError> {
        let mut conn = self.pool.get().await?;

        let link = links::table
            .filter(links::short_code.eq(short_code))
            .select(Link::as_select())
            .first(&mut conn)
            .await
            .optional()?;

        Ok(link)
    }

    async fn short_code_exists(&self, short_code: &str) -> Result<bool, StoreError> {
        let mut conn = self.pool.get().await?;

        let exists = diesel::select(diesel::dsl::exists(
            links::table.filter(links::short_code.eq(short_code)),
        ))
        .get_result::<bool>(&mut conn)
        .await?;

        Ok(exists)
    }

    #[instrument(skip(self, new_link), fields(short_code = %new_link.short_code))]
    async fn insert_link(&self, new_link: NewLink) -> Result<Link, StoreError> {
        let mut conn = self.pool.get().await?;

        let link = conn
            .build_transaction()
            .run::<_, diesel::result::Error, _>(|conn| {
                Box::pin(async move {
                    diesel::insert_into(links::table)
                        .values(&new_link)
                        .returning(Link::as_returning())
                        .get_result(conn)
                        .await
                })
            })
            .await?;

        debug!("Inserted link {}", link.id);
        Ok(link)
    }

    #[instrument(skip(self, new_click), fields(link_id = new_click.link_id))]
    async fn insert_click(&self, new_click: NewClick) -> Result<Click, StoreError> {
        let mut conn = self.pool.get().await?;

        let click = conn
            .build_transaction()
            .run::<_, diesel::result::Error, _>(|conn| {
                Box::pin(async move {
                    diesel::insert_into(clicks::table)
                        .values(&new_click)
                        .returning(Click::as_returning())
                        .get_result(conn)
                        .await
                })
            })
            .await?;

        Ok(click)
    }

    #[instrument(skip(self))]
    async fn analytics_page(&self, offset: i64, limit: i64) -> Result<AnalyticsPage, StoreError> {
        let mut conn = self.pool.get().await?;

        // Count, page and click rows come from one snapshot
        let page = conn
            .build_transaction()
            .read_only()
            .repeatable_read()
            .run::<_, diesel::result::Error, _>(|conn| {
                Box::pin(async move {
                    let total: i64 = links::table.count().get_result(conn).await?;

                    let page_links: Vec<Link> = links::table
                        .order((links::created_at.desc(), links::id.desc()))
                        .offset(offset)
                        .limit(limit)
                        .select(Link::as_select())
                        .load(conn)
                        .await?;

                    let ids: Vec<i64> = page_links.iter().map(|link| link.id).collect();
                    let page_clicks = if ids.is_empty() {
                        Vec::new()
                    } else {
                        clicks::table
                            .filter(clicks::link_id.eq_any(ids))
                            .select((clicks::link_id, clicks::created_at, clicks::is_valid))
                            .load::<ClickRow>(conn)
                            .await?
                    };

                    Ok(AnalyticsPage {
                        total,
                        links: page_links,
                        clicks: page_clicks,
                    })
                })
            })
            .await?;

        Ok(page)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let mut conn = self.pool.get().await?;
        diesel::sql_query("SELECT 1").execute(&mut conn).await?;
        Ok(())
    }
}
